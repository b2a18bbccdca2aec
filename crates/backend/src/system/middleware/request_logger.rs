use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Access log for every HTTP request: method, path, status, duration and
/// response size.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Buffer the body to learn its real size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                %method,
                %path,
                status = parts.status.as_u16(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Failed to read response body: {e}"
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = parts.status.as_u16();
    if parts.status.is_server_error() {
        tracing::error!(%method, %path, status, elapsed_ms, bytes = bytes.len(), "request");
    } else {
        tracing::info!(%method, %path, status, elapsed_ms, bytes = bytes.len(), "request");
    }

    Response::from_parts(parts, Body::from(bytes))
}

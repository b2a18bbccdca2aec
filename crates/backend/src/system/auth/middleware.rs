use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};

use super::extractor::bearer_token;

/// Middleware that requires a valid bearer JWT and exposes its claims to handlers.
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(req.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = super::jwt::validate_token(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {e:#}");
        StatusCode::UNAUTHORIZED
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, SessionInfo,
};

use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::{jwt, refresh_store};
use crate::system::directory;

fn internal(context: &'static str) -> impl Fn(anyhow::Error) -> StatusCode {
    move |e| {
        tracing::error!("{context}: {e:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Login handler
pub async fn login(Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, StatusCode> {
    let directory = directory::get_directory().map_err(internal("directory unavailable"))?;

    let user = match directory.verify_credentials(&request.username, &request.password) {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!(username = %request.username, "Login rejected: bad credentials");
            return Err(StatusCode::UNAUTHORIZED);
        }
        Err(e) => {
            tracing::info!(username = %request.username, "Login rejected: {e:#}");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    let session = directory
        .session_for(&user.profile.id)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let access_token = jwt::generate_access_token(
        &user.profile.id,
        &user.profile.username,
        user.profile.affiliate,
    )
    .map_err(internal("issuing access token"))?;

    let refresh_token = jwt::generate_refresh_token();
    refresh_store::global()
        .store(&user.profile.id, &refresh_token, jwt::refresh_token_expiration())
        .map_err(internal("storing refresh token"))?;

    let company = directory
        .company_of(user)
        .map(|company| company.name.as_str())
        .unwrap_or("-");
    tracing::info!(
        user_id = %user.profile.id,
        affiliate = user.profile.affiliate,
        company,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        session,
    }))
}

/// Refresh token handler
pub async fn refresh(
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, StatusCode> {
    let user_id = refresh_store::global()
        .validate(&request.refresh_token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let directory = directory::get_directory().map_err(internal("directory unavailable"))?;
    let user = directory
        .get_by_id(&user_id)
        .filter(|user| user.is_active)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let access_token = jwt::generate_access_token(
        &user.profile.id,
        &user.profile.username,
        user.profile.affiliate,
    )
    .map_err(internal("issuing access token"))?;

    Ok(Json(RefreshResponse { access_token }))
}

/// Logout handler
pub async fn logout(Json(request): Json<RefreshRequest>) -> Result<StatusCode, StatusCode> {
    refresh_store::global()
        .revoke(&request.refresh_token)
        .map_err(internal("revoking refresh token"))?;

    Ok(StatusCode::OK)
}

/// Current user with company flags (protected by middleware)
pub async fn current_user(user: CurrentUser) -> Result<Json<SessionInfo>, StatusCode> {
    let directory = directory::get_directory().map_err(internal("directory unavailable"))?;
    let session = directory
        .session_for(user.user_id())
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(session))
}

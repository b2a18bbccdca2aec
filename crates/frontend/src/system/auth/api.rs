use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, SessionInfo,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::shared::api_utils::api_url;

async fn post_json<B: serde::Serialize>(path: &str, body: &B) -> Result<Response, String> {
    Request::post(&api_url(path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))
}

async fn parse<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, String> {
    if !response.ok() {
        return Err(format!("{} failed: {}", what, response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let response = post_json("/api/system/auth/login", &LoginRequest { username, password }).await?;
    parse(response, "Login").await
}

/// Exchange a refresh token for a new access token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    let response = post_json("/api/system/auth/refresh", &RefreshRequest { refresh_token }).await?;
    parse(response, "Refresh").await
}

/// Revoke the refresh token
pub async fn logout(refresh_token: String) -> Result<(), String> {
    let response = post_json("/api/system/auth/logout", &RefreshRequest { refresh_token }).await?;
    if !response.ok() {
        return Err(format!("Logout failed: {}", response.status()));
    }
    Ok(())
}

/// Profile, access map and company flags of the signed-in user
pub async fn get_session(access_token: &str) -> Result<SessionInfo, String> {
    let response = Request::get(&api_url("/api/system/auth/me"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    parse(response, "Session").await
}

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Extensions, HeaderMap, StatusCode},
};
use contracts::system::auth::TokenClaims;

use super::jwt;

/// Token from an `Authorization: Bearer <token>` header. The scheme is
/// matched case-insensitively; an empty token counts as missing.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty()).then_some(token)
}

/// Claims left by `require_auth`, or else the request's own bearer token
/// checked with `validate`.
fn claims_for(
    extensions: &Extensions,
    headers: &HeaderMap,
    validate: impl FnOnce(&str) -> anyhow::Result<TokenClaims>,
) -> Option<TokenClaims> {
    if let Some(claims) = extensions.get::<TokenClaims>() {
        return Some(claims.clone());
    }
    let token = bearer_token(headers)?;
    validate(token)
        .map_err(|e| tracing::debug!("Rejected bearer token: {e:#}"))
        .ok()
}

/// Signed-in user of the request. Works behind `require_auth` and on
/// routes mounted without it.
///
/// `async fn handler(CurrentUser(claims): CurrentUser) -> Response`
pub struct CurrentUser(pub TokenClaims);

impl CurrentUser {
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        claims_for(&parts.extensions, &parts.headers, jwt::validate_token)
            .map(CurrentUser)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

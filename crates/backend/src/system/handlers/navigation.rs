use axum::{
    extract::{Json, Query},
    http::StatusCode,
};
use contracts::system::access::DashboardMode;
use contracts::system::navigation::rules::Decision;
use contracts::system::navigation::{resolver, tree, Locale, NavigationTree};
use serde::Deserialize;

use crate::system::auth::extractor::CurrentUser;
use crate::system::directory;

#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    #[serde(default)]
    pub locale: Option<String>,
}

/// Navigation tree resolved for the caller's access map and company.
pub async fn current_navigation(
    CurrentUser(claims): CurrentUser,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<NavigationTree>, StatusCode> {
    let directory = directory::get_directory().map_err(|e| {
        tracing::error!("directory unavailable: {e:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let session = directory
        .session_for(&claims.sub)
        .ok_or(StatusCode::NOT_FOUND)?;

    let locale = query
        .locale
        .as_deref()
        .map(Locale::parse)
        .unwrap_or_default();
    let mode = DashboardMode::for_user(&session.user);
    let template = tree::template(mode, locale);

    if tracing::enabled!(tracing::Level::DEBUG) {
        for (key, decision) in resolver::explain(&template, &session.user, session.company.as_ref()) {
            if let Decision::Denied(reason) = decision {
                tracing::debug!(user_id = %claims.sub, entry = key.as_str(), ?reason, "Navigation entry hidden");
            }
        }
    }

    let resolved = resolver::resolve(Some(&*template), Some(&session.user), session.company.as_ref())
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(resolved))
}

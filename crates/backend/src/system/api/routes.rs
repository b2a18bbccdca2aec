use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::system::{auth, handlers};

/// System routes of the application
pub fn configure_system_routes() -> Router {
    Router::new()
        // ========================================
        // HEALTH CHECK
        // ========================================
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route("/api/system/auth/login", post(handlers::auth::login))
        .route("/api/system/auth/refresh", post(handlers::auth::refresh))
        .route("/api/system/auth/logout", post(handlers::auth::logout))
        // ========================================
        // PROTECTED
        // ========================================
        .route(
            "/api/system/auth/me",
            get(handlers::auth::current_user)
                .layer(middleware::from_fn(auth::middleware::require_auth)),
        )
        .route(
            "/api/system/navigation",
            get(handlers::navigation::current_navigation)
                .layer(middleware::from_fn(auth::middleware::require_auth)),
        )
}

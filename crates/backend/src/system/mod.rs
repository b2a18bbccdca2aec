pub mod api;
pub mod auth;
pub mod directory;
pub mod handlers;
pub mod middleware;
pub mod tracing;

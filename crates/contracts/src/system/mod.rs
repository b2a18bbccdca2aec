pub mod access;
pub mod auth;
pub mod navigation;
pub mod ui_settings;

pub mod api_utils;
pub mod icons;
pub mod polling;
pub mod settings;

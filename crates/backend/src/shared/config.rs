use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the built frontend, served for every non-API path.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// When absent a random secret is generated on every start.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    pub access_token_hours: i64,
    pub refresh_token_days: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DirectoryConfig {
    /// JSON seed with users and companies; the embedded seed is used if unset.
    #[serde(default)]
    pub path: Option<String>,
}

fn default_static_dir() -> String {
    "dist".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[auth]
access_token_hours = 24
refresh_token_days = 90

[directory]
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.auth.access_token_hours <= 0 || config.auth.refresh_token_days <= 0 {
        anyhow::bail!("token lifetimes must be positive");
    }
    Ok(config)
}

/// Resolve a configured path: absolute paths are kept, relative ones are
/// taken relative to the executable directory.
pub fn resolve_path(configured: &str) -> PathBuf {
    let path = Path::new(configured);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    PathBuf::from(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, "dist");
        assert!(config.auth.jwt_secret.is_none());
        assert_eq!(config.auth.access_token_hours, 24);
        assert!(config.directory.path.is_none());
    }

    #[test]
    fn test_directory_section_is_optional() {
        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [auth]
            jwt_secret = "s3cret"
            access_token_hours = 1
            refresh_token_days = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.server.static_dir, "dist");
        assert_eq!(config.auth.jwt_secret.as_deref(), Some("s3cret"));
        assert!(config.directory.path.is_none());
    }

    #[test]
    fn test_non_positive_lifetimes_are_rejected() {
        let result = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [auth]
            access_token_hours = 0
            refresh_token_days = 7
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let absolute = if cfg!(windows) { "C:\\seed.json" } else { "/etc/seed.json" };
        assert_eq!(resolve_path(absolute), PathBuf::from(absolute));
    }
}

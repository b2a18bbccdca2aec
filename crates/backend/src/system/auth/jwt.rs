use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use rand::Rng;

use crate::shared::config::AuthConfig;

const DEFAULT_ACCESS_TOKEN_HOURS: i64 = 24;
const DEFAULT_REFRESH_TOKEN_DAYS: i64 = 90;

static SETTINGS: OnceCell<JwtSettings> = OnceCell::new();

pub struct JwtSettings {
    secret: String,
    access_token_hours: i64,
    refresh_token_days: i64,
}

impl JwtSettings {
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret = match config.jwt_secret.as_deref() {
            Some(secret) if !secret.is_empty() => secret.to_string(),
            _ => {
                tracing::warn!("No jwt_secret configured - generating one (tokens are lost on restart)");
                generate_jwt_secret()
            }
        };
        Self {
            secret,
            access_token_hours: config.access_token_hours,
            refresh_token_days: config.refresh_token_days,
        }
    }

    pub fn issue_access_token(&self, user_id: &str, username: &str, affiliate: bool) -> Result<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            affiliate,
            exp: (now + chrono::Duration::hours(self.access_token_hours)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        self.encode(&claims)
    }

    fn encode(&self, claims: &TokenClaims) -> Result<String> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to encode JWT token")
    }

    pub fn validate(&self, token: &str) -> Result<TokenClaims> {
        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Failed to decode JWT token")?;
        Ok(token_data.claims)
    }

    pub fn refresh_token_expiration(&self) -> DateTime<Utc> {
        Utc::now() + chrono::Duration::days(self.refresh_token_days)
    }
}

/// Install settings from config. Only the first call takes effect.
pub fn configure(config: &AuthConfig) {
    if SETTINGS.set(JwtSettings::from_config(config)).is_err() {
        tracing::warn!("JWT settings were already configured; keeping the existing ones");
    }
}

fn settings() -> &'static JwtSettings {
    SETTINGS.get_or_init(|| JwtSettings {
        secret: generate_jwt_secret(),
        access_token_hours: DEFAULT_ACCESS_TOKEN_HOURS,
        refresh_token_days: DEFAULT_REFRESH_TOKEN_DAYS,
    })
}

pub fn generate_access_token(user_id: &str, username: &str, affiliate: bool) -> Result<String> {
    settings().issue_access_token(user_id, username, affiliate)
}

pub fn validate_token(token: &str) -> Result<TokenClaims> {
    settings().validate(token)
}

pub fn refresh_token_expiration() -> DateTime<Utc> {
    settings().refresh_token_expiration()
}

/// Generate refresh token (UUID-based)
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with(secret: &str) -> JwtSettings {
        JwtSettings::from_config(&AuthConfig {
            jwt_secret: Some(secret.to_string()),
            access_token_hours: 1,
            refresh_token_days: 7,
        })
    }

    #[test]
    fn issued_token_validates() {
        let settings = settings_with("test-secret");
        let token = settings.issue_access_token("u-1", "alice", true).unwrap();
        let claims = settings.validate(&token).unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.username, "alice");
        assert!(claims.affiliate);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = settings_with("one").issue_access_token("u-1", "alice", false).unwrap();
        assert!(settings_with("two").validate(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let settings = settings_with("test-secret");
        let token = settings.issue_access_token("u-1", "alice", false).unwrap();
        let forged_payload = {
            use base64::{engine::general_purpose, Engine as _};
            general_purpose::URL_SAFE_NO_PAD
                .encode(r#"{"sub":"u-2","username":"mallory","affiliate":false,"exp":9999999999,"iat":0}"#)
        };
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = &forged_payload;
        assert!(settings.validate(&parts.join(".")).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let settings = settings_with("test-secret");
        let now = Utc::now().timestamp() as usize;
        let claims = TokenClaims {
            sub: "u-1".into(),
            username: "alice".into(),
            affiliate: false,
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = settings.encode(&claims).unwrap();
        assert!(settings.validate(&token).is_err());
    }

    #[test]
    fn empty_secret_generates_one() {
        let settings = settings_with("");
        assert!(!settings.secret.is_empty());
        assert!(settings.refresh_token_expiration() > Utc::now());
    }
}

//! In-memory refresh token registry.
//!
//! Only SHA-256 hashes of tokens are kept. Tokens expire and can be revoked;
//! revoked or expired tokens never validate again.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

struct RefreshRecord {
    user_id: String,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
pub struct RefreshStore {
    tokens: RwLock<HashMap<String, RefreshRecord>>,
}

static REFRESH_TOKENS: Lazy<RefreshStore> = Lazy::new(RefreshStore::default);

pub fn global() -> &'static RefreshStore {
    &REFRESH_TOKENS
}

impl RefreshStore {
    pub fn store(&self, user_id: &str, token: &str, expires_at: DateTime<Utc>) -> Result<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| anyhow!("refresh token store is poisoned"))?;
        // Drop stale entries while we hold the lock anyway.
        let now = Utc::now();
        tokens.retain(|_, record| record.expires_at > now && record.revoked_at.is_none());
        tokens.insert(
            hash_token(token),
            RefreshRecord {
                user_id: user_id.to_string(),
                expires_at,
                revoked_at: None,
            },
        );
        Ok(())
    }

    /// Returns the owning user id of a live token.
    pub fn validate(&self, token: &str) -> Result<String> {
        let tokens = self
            .tokens
            .read()
            .map_err(|_| anyhow!("refresh token store is poisoned"))?;
        match tokens.get(&hash_token(token)) {
            Some(record) if record.revoked_at.is_none() && record.expires_at > Utc::now() => {
                Ok(record.user_id.clone())
            }
            _ => Err(anyhow!("Invalid or expired refresh token")),
        }
    }

    pub fn revoke(&self, token: &str) -> Result<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| anyhow!("refresh token store is poisoned"))?;
        if let Some(record) = tokens.get_mut(&hash_token(token)) {
            record.revoked_at.get_or_insert_with(Utc::now);
        }
        Ok(())
    }
}

fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

//! Users and companies known to the service.
//!
//! Loaded once at startup from a JSON seed. Passwords in the seed are hashed
//! on load; only the hashes are kept in memory.

use anyhow::{bail, Context, Result};
use contracts::system::access::{AccessMap, CompanyFlags, UserProfile};
use contracts::system::auth::SessionInfo;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::shared::config::{self, DirectoryConfig};
use crate::system::auth::password;

const DEFAULT_SEED: &str = include_str!("default_seed.json");

static DIRECTORY: OnceCell<Directory> = OnceCell::new();

#[derive(Debug, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub companies: Vec<CompanySeed>,
    pub users: Vec<UserSeed>,
}

#[derive(Debug, Deserialize)]
pub struct CompanySeed {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub flags: CompanyFlags,
}

#[derive(Debug, Deserialize)]
pub struct UserSeed {
    pub id: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub affiliate: bool,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub acc: Option<AccessMap>,
}

fn default_active() -> bool {
    true
}

pub struct Company {
    pub name: String,
    pub flags: CompanyFlags,
}

pub struct DirectoryUser {
    pub profile: UserProfile,
    pub is_active: bool,
    password_hash: String,
}

pub struct Directory {
    users: HashMap<String, DirectoryUser>,
    ids_by_username: HashMap<String, String>,
    companies: HashMap<String, Company>,
}

impl Directory {
    pub fn from_seed(seed: DirectorySeed) -> Result<Self> {
        let mut companies = HashMap::new();
        for company in seed.companies {
            if companies.contains_key(&company.id) {
                bail!("duplicate company id '{}'", company.id);
            }
            companies.insert(
                company.id,
                Company {
                    name: company.name,
                    flags: company.flags,
                },
            );
        }

        let mut users = HashMap::new();
        let mut ids_by_username = HashMap::new();
        for user in seed.users {
            if let Some(company_id) = &user.company_id {
                if !companies.contains_key(company_id) {
                    bail!("user '{}' references unknown company '{}'", user.username, company_id);
                }
            }
            if ids_by_username.contains_key(&user.username) {
                bail!("duplicate username '{}'", user.username);
            }
            if users.contains_key(&user.id) {
                bail!("duplicate user id '{}'", user.id);
            }

            let password_hash = password::hash_password(&user.password)
                .with_context(|| format!("hashing password of '{}'", user.username))?;
            ids_by_username.insert(user.username.clone(), user.id.clone());
            users.insert(
                user.id.clone(),
                DirectoryUser {
                    profile: UserProfile {
                        id: user.id,
                        username: user.username,
                        full_name: user.full_name,
                        affiliate: user.affiliate,
                        company_id: user.company_id,
                        acc: user.acc,
                    },
                    is_active: user.is_active,
                    password_hash,
                },
            );
        }

        Ok(Self {
            users,
            ids_by_username,
            companies,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let seed: DirectorySeed = serde_json::from_str(raw).context("parsing directory seed")?;
        Self::from_seed(seed)
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading directory seed {}", path.display()))?;
                Self::from_json(&raw)
            }
            None => Self::from_json(DEFAULT_SEED),
        }
    }

    pub fn get_by_id(&self, id: &str) -> Option<&DirectoryUser> {
        self.users.get(id)
    }

    /// Company the user belongs to, if any.
    pub fn company_of(&self, user: &DirectoryUser) -> Option<&Company> {
        user.profile
            .company_id
            .as_deref()
            .and_then(|id| self.companies.get(id))
    }

    /// `Ok(None)` for unknown users and wrong passwords; inactive accounts
    /// are an error so the caller can tell them apart in logs.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<&DirectoryUser>> {
        let user = match self
            .ids_by_username
            .get(username)
            .and_then(|id| self.users.get(id))
        {
            Some(user) => user,
            None => return Ok(None),
        };

        if !user.is_active {
            bail!("User account is inactive");
        }

        if !password::verify_password(password, &user.password_hash)? {
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Profile plus company flags, as returned by `/api/system/auth/me`.
    pub fn session_for(&self, user_id: &str) -> Option<SessionInfo> {
        let user = self.users.get(user_id).filter(|user| user.is_active)?;
        let company = self.company_of(user).map(|company| company.flags);
        Some(SessionInfo {
            user: user.profile.clone(),
            company,
        })
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

pub fn initialize(config: &DirectoryConfig) -> Result<()> {
    let path = config.path.as_deref().map(config::resolve_path);
    match &path {
        Some(path) => tracing::info!("Loading directory seed from {}", path.display()),
        None => tracing::warn!("No directory seed configured - using built-in demo users"),
    }

    let directory = Directory::load(path.as_deref())?;
    tracing::info!(users = directory.user_count(), "Directory loaded");

    if DIRECTORY.set(directory).is_err() {
        bail!("directory already initialized");
    }
    Ok(())
}

pub fn get_directory() -> Result<&'static Directory> {
    DIRECTORY
        .get()
        .ok_or_else(|| anyhow::anyhow!("directory is not initialized"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_loads() {
        let directory = Directory::from_json(DEFAULT_SEED).unwrap();
        assert_eq!(directory.user_count(), 3);
        let session = directory.session_for("u-desk").unwrap();
        assert_eq!(session.company.unwrap().company_type, 2);
        assert_eq!(session.user.flag("acc_v_client"), Some(false));
        let desk = directory.get_by_id("u-desk").unwrap();
        assert_eq!(directory.company_of(desk).unwrap().name, "OddsCo");
    }

    #[test]
    fn credentials_are_checked_against_hashes() {
        let directory = Directory::from_json(DEFAULT_SEED).unwrap();
        let user = directory.verify_credentials("partner", "partner").unwrap().unwrap();
        assert!(user.profile.affiliate);
        assert_ne!(user.password_hash, "partner");
        assert!(directory.verify_credentials("partner", "wrong").unwrap().is_none());
        assert!(directory.verify_credentials("nobody", "x").unwrap().is_none());
    }

    #[test]
    fn inactive_users_cannot_log_in_or_get_a_session() {
        let directory = Directory::from_json(
            r#"{"users": [{"id": "1", "username": "gone", "password": "pw", "is_active": false}]}"#,
        )
        .unwrap();
        assert!(directory.verify_credentials("gone", "pw").is_err());
        assert!(directory.session_for("1").is_none());
    }

    #[test]
    fn user_without_company_has_no_flags() {
        let directory = Directory::from_json(
            r#"{"users": [{"id": "1", "username": "solo", "password": "pw"}]}"#,
        )
        .unwrap();
        let session = directory.session_for("1").unwrap();
        assert!(session.company.is_none());
        assert!(directory.company_of(directory.get_by_id("1").unwrap()).is_none());
        assert!(session.user.acc.is_none());
    }

    #[test]
    fn invalid_seeds_are_rejected() {
        let unknown_company = r#"{"users": [{"id": "1", "username": "a", "password": "p", "company_id": "x"}]}"#;
        assert!(Directory::from_json(unknown_company).is_err());

        let duplicate = r#"{"users": [
            {"id": "1", "username": "a", "password": "p"},
            {"id": "2", "username": "a", "password": "p"}
        ]}"#;
        assert!(Directory::from_json(duplicate).is_err());
    }
}

//! Access model shared by backend and frontend.
//!
//! `AccessMap` is the per-user permission dictionary (`acc_v_*` for views,
//! `acc_e_*` for edits). A key that is absent and a key set to JSON `null`
//! both mean "undefined": the caller decides the fallback.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessMap(HashMap<String, Option<bool>>);

impl AccessMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly used by seeds and tests.
    pub fn with(mut self, key: &str, value: bool) -> Self {
        self.0.insert(key.to_string(), Some(value));
        self
    }

    pub fn set(&mut self, key: &str, value: Option<bool>) {
        self.0.insert(key.to_string(), value);
    }

    /// Flag value, `None` when the key is absent or explicitly null.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied().flatten()
    }

    /// Resolve a view flag: defined flags win, undefined ones use `fallback`.
    pub fn view_allowed(&self, key: &str, fallback: bool) -> bool {
        self.flag(key).unwrap_or(fallback)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Option<bool>)> for AccessMap {
    fn from_iter<I: IntoIterator<Item = (String, Option<bool>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub affiliate: bool,
    #[serde(default)]
    pub company_id: Option<String>,
    /// `None` behaves like an empty map: every flag is undefined.
    #[serde(default)]
    pub acc: Option<AccessMap>,
}

impl UserProfile {
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.acc.as_ref().and_then(|acc| acc.flag(key))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyFlags {
    #[serde(default)]
    pub company_type: i32,
    #[serde(default)]
    pub company_wallet_system: bool,
}

impl CompanyFlags {
    /// Company type that trades bets instead of positions.
    pub const BETTING_TYPE: i32 = 2;

    pub fn is_betting(&self) -> bool {
        self.company_type == Self::BETTING_TYPE
    }
}

/// Which navigation template and rule table apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardMode {
    Staff,
    Affiliate,
}

impl DashboardMode {
    pub fn for_user(user: &UserProfile) -> Self {
        if user.affiliate {
            DashboardMode::Affiliate
        } else {
            DashboardMode::Staff
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_missing_flags_are_undefined() {
        let acc: AccessMap =
            serde_json::from_str(r#"{"acc_v_client": null, "acc_v_leads": false}"#).unwrap();
        assert_eq!(acc.flag("acc_v_client"), None);
        assert_eq!(acc.flag("acc_v_missing"), None);
        assert_eq!(acc.flag("acc_v_leads"), Some(false));
        assert!(acc.view_allowed("acc_v_client", true));
        assert!(!acc.view_allowed("acc_v_logs", false));
        assert!(!acc.view_allowed("acc_v_leads", true));
    }

    #[test]
    fn user_without_acc_has_no_flags() {
        let user: UserProfile = serde_json::from_str(r#"{"id": "1", "username": "ops"}"#).unwrap();
        assert!(user.acc.is_none());
        assert_eq!(user.flag("acc_v_client"), None);
        assert_eq!(DashboardMode::for_user(&user), DashboardMode::Staff);
    }

    #[test]
    fn affiliate_users_get_affiliate_mode() {
        let user = UserProfile {
            affiliate: true,
            ..Default::default()
        };
        assert_eq!(DashboardMode::for_user(&user), DashboardMode::Affiliate);
    }

    #[test]
    fn company_defaults_are_permissive_only_for_positions() {
        let company = CompanyFlags::default();
        assert!(!company.is_betting());
        assert!(!company.company_wallet_system);
    }
}

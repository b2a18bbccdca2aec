//! Versioned UI settings behind a single typed accessor.
//!
//! All persisted UI state (locale, navigation layout, per-table preferences)
//! lives in one [`UiSettings`] document. Storage backends only move the raw
//! JSON; decoding, migration and defaults happen in [`SettingsService`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::navigation::Locale;

pub const CURRENT_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavLayout {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavColor {
    #[default]
    Default,
    Inverted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSettings {
    pub rows_per_page: u32,
    #[serde(default)]
    pub hidden_columns: Vec<String>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            rows_per_page: 25,
            hidden_columns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSettings {
    pub version: u32,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub layout: NavLayout,
    #[serde(default)]
    pub nav_color: NavColor,
    #[serde(default)]
    pub tables: BTreeMap<String, TableSettings>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            locale: Locale::default(),
            layout: NavLayout::default(),
            nav_color: NavColor::default(),
            tables: BTreeMap::new(),
        }
    }
}

/// Shape written by the first release: only locale and layout.
#[derive(Debug, Deserialize)]
struct UiSettingsV1 {
    #[serde(default)]
    locale: Locale,
    #[serde(default)]
    layout: NavLayout,
}

#[derive(Debug, Deserialize)]
struct VersionProbe {
    #[serde(default = "legacy_version")]
    version: u32,
}

fn legacy_version() -> u32 {
    1
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings document is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("settings version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("settings version 0 was never written by any release")]
    InvalidVersion,
    #[error("settings storage failed: {0}")]
    Storage(String),
}

impl UiSettings {
    /// Decode a stored document, migrating older versions forward.
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        let probe: VersionProbe = serde_json::from_str(raw)?;
        match probe.version {
            1 => {
                let v1: UiSettingsV1 = serde_json::from_str(raw)?;
                Ok(UiSettings {
                    locale: v1.locale,
                    layout: v1.layout,
                    ..UiSettings::default()
                })
            }
            0 => Err(SettingsError::InvalidVersion),
            CURRENT_VERSION => Ok(serde_json::from_str(raw)?),
            found => Err(SettingsError::UnsupportedVersion {
                found,
                supported: CURRENT_VERSION,
            }),
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn table(&self, table_key: &str) -> TableSettings {
        self.tables.get(table_key).cloned().unwrap_or_default()
    }
}

/// Raw key/value persistence for the settings document.
pub trait SettingsStore {
    fn load_raw(&self) -> Result<Option<String>, SettingsError>;
    fn save_raw(&self, raw: &str) -> Result<(), SettingsError>;
    fn clear(&self) -> Result<(), SettingsError>;
}

/// The only reader and writer of [`UiSettings`].
pub struct SettingsService<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> SettingsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current settings. Missing, garbled or too-new documents yield defaults.
    pub fn load(&self) -> UiSettings {
        self.try_load().unwrap_or_default()
    }

    /// Like [`load`](Self::load) but surfaces decoding failures.
    pub fn try_load(&self) -> Result<UiSettings, SettingsError> {
        match self.store.load_raw()? {
            Some(raw) => UiSettings::from_json(&raw),
            None => Ok(UiSettings::default()),
        }
    }

    pub fn save(&self, settings: &UiSettings) -> Result<(), SettingsError> {
        let mut settings = settings.clone();
        settings.version = CURRENT_VERSION;
        self.store.save_raw(&settings.to_json()?)
    }

    /// Read-modify-write; returns the stored result. A stored document that
    /// cannot be read is left untouched and its error returned; call
    /// [`reset`](Self::reset) first to discard it.
    pub fn update<F>(&self, change: F) -> Result<UiSettings, SettingsError>
    where
        F: FnOnce(&mut UiSettings),
    {
        let mut settings = self.try_load()?;
        change(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }

    pub fn reset(&self) -> Result<(), SettingsError> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryStore(RefCell<Option<String>>);

    impl SettingsStore for MemoryStore {
        fn load_raw(&self) -> Result<Option<String>, SettingsError> {
            Ok(self.0.borrow().clone())
        }

        fn save_raw(&self, raw: &str) -> Result<(), SettingsError> {
            *self.0.borrow_mut() = Some(raw.to_string());
            Ok(())
        }

        fn clear(&self) -> Result<(), SettingsError> {
            *self.0.borrow_mut() = None;
            Ok(())
        }
    }

    fn service_with(raw: Option<&str>) -> SettingsService<MemoryStore> {
        SettingsService::new(MemoryStore(RefCell::new(raw.map(str::to_string))))
    }

    #[test]
    fn empty_store_yields_defaults() {
        assert_eq!(service_with(None).load(), UiSettings::default());
    }

    #[test]
    fn v1_document_is_migrated() {
        let service = service_with(Some(r#"{"locale": "ru", "layout": "horizontal"}"#));
        let settings = service.try_load().unwrap();
        assert_eq!(settings.version, CURRENT_VERSION);
        assert_eq!(settings.locale, Locale::Ru);
        assert_eq!(settings.layout, NavLayout::Horizontal);
        assert_eq!(settings.nav_color, NavColor::Default);
        assert!(settings.tables.is_empty());
    }

    #[test]
    fn garbled_or_future_documents_fall_back() {
        assert_eq!(service_with(Some("{not json")).load(), UiSettings::default());

        let future = service_with(Some(r#"{"version": 9}"#));
        assert!(matches!(
            future.try_load(),
            Err(SettingsError::UnsupportedVersion { found: 9, .. })
        ));
        assert_eq!(future.load(), UiSettings::default());
    }

    #[test]
    fn version_zero_is_invalid_not_too_new() {
        let zero = service_with(Some(r#"{"version": 0}"#));
        let err = zero.try_load().unwrap_err();
        assert!(matches!(err, SettingsError::InvalidVersion));
        assert!(!err.to_string().contains("newer"));
        assert_eq!(zero.load(), UiSettings::default());
    }

    #[test]
    fn update_keeps_an_unreadable_document() {
        let newer = r#"{"version": 9, "theme": "dark"}"#;
        let service = service_with(Some(newer));
        let result = service.update(|s| s.layout = NavLayout::Horizontal);
        assert!(matches!(
            result,
            Err(SettingsError::UnsupportedVersion { found: 9, .. })
        ));
        assert_eq!(service.store.load_raw().unwrap().as_deref(), Some(newer));

        service.reset().unwrap();
        let updated = service.update(|s| s.layout = NavLayout::Horizontal).unwrap();
        assert_eq!(updated.layout, NavLayout::Horizontal);
    }

    #[test]
    fn update_persists_through_the_store() {
        let service = service_with(None);
        service
            .update(|s| {
                s.layout = NavLayout::Horizontal;
                s.tables.insert(
                    "customers".into(),
                    TableSettings {
                        rows_per_page: 50,
                        hidden_columns: vec!["phone".into()],
                    },
                );
            })
            .unwrap();

        let reloaded = service.load();
        assert_eq!(reloaded.layout, NavLayout::Horizontal);
        assert_eq!(reloaded.table("customers").rows_per_page, 50);
        assert_eq!(reloaded.table("leads"), TableSettings::default());

        service.reset().unwrap();
        assert_eq!(service.load(), UiSettings::default());
    }
}

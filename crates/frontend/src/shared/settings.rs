//! Browser side of [`UiSettings`]: a `localStorage` store and a reactive
//! context wrapping the settings service.

use contracts::system::navigation::Locale;
use contracts::system::ui_settings::{
    NavLayout, SettingsError, SettingsService, SettingsStore, UiSettings,
};
use leptos::prelude::*;
use web_sys::window;

const SETTINGS_KEY: &str = "ui_settings";

/// Settings document kept under a single `localStorage` key.
pub struct LocalSettingsStore;

impl LocalSettingsStore {
    fn storage() -> Result<web_sys::Storage, SettingsError> {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| SettingsError::Storage("localStorage is not available".to_string()))
    }
}

impl SettingsStore for LocalSettingsStore {
    fn load_raw(&self) -> Result<Option<String>, SettingsError> {
        Self::storage()?
            .get_item(SETTINGS_KEY)
            .map_err(|e| SettingsError::Storage(format!("{:?}", e)))
    }

    fn save_raw(&self, raw: &str) -> Result<(), SettingsError> {
        Self::storage()?
            .set_item(SETTINGS_KEY, raw)
            .map_err(|e| SettingsError::Storage(format!("{:?}", e)))
    }

    fn clear(&self) -> Result<(), SettingsError> {
        Self::storage()?
            .remove_item(SETTINGS_KEY)
            .map_err(|e| SettingsError::Storage(format!("{:?}", e)))
    }
}

fn service() -> SettingsService<LocalSettingsStore> {
    SettingsService::new(LocalSettingsStore)
}

#[derive(Clone, Copy)]
pub struct UiSettingsContext {
    pub settings: RwSignal<UiSettings>,
}

impl UiSettingsContext {
    pub fn load() -> Self {
        let settings = match service().try_load() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("ui settings unreadable, using defaults: {}", e);
                UiSettings::default()
            }
        };
        Self {
            settings: RwSignal::new(settings),
        }
    }

    /// Applies `change` in memory and persists the result. A stored document
    /// this build cannot read (e.g. written by a newer release) is not
    /// overwritten; the change then lives in memory only.
    pub fn update(&self, change: impl FnOnce(&mut UiSettings)) {
        let mut next = self.settings.get_untracked();
        change(&mut next);
        let persisted = next.clone();
        if let Err(e) = service().update(move |stored| *stored = persisted) {
            log::error!("ui settings not saved: {}", e);
        }
        self.settings.set(next);
    }

    pub fn locale(&self) -> Locale {
        self.settings.with(|s| s.locale)
    }

    pub fn layout(&self) -> NavLayout {
        self.settings.with(|s| s.layout)
    }

    pub fn set_locale(&self, locale: Locale) {
        self.update(|s| s.locale = locale);
    }

    pub fn toggle_layout(&self) {
        self.update(|s| {
            s.layout = match s.layout {
                NavLayout::Vertical => NavLayout::Horizontal,
                NavLayout::Horizontal => NavLayout::Vertical,
            }
        });
    }
}

pub fn use_ui_settings() -> UiSettingsContext {
    use_context::<UiSettingsContext>().expect("UiSettingsContext not provided")
}

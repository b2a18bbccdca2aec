use contracts::system::navigation::{NavKey, NavigationTree};
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: NavKey,
    pub path: String,
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<NavKey>>,
    pub left_open: RwSignal<bool>,
    /// Parent entries currently unfolded in the sidebar.
    pub expanded: RwSignal<Vec<NavKey>>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
            expanded: RwSignal::new(vec![]),
        }
    }

    /// Restores the active tab from `?active=` and keeps the query in sync.
    /// The restored key is only kept if the resolved menu still offers it.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(key) = active_from_query(&search) {
            self.open_tab(key, "");
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(key) = this.active.get() else {
                return;
            };
            let new_url = query_for(key);
            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn open_tab(&self, key: NavKey, path: &str) {
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            log::debug!("open_tab: {}", key.as_str());
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key,
                    path: path.to_string(),
                })
            });
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: NavKey) {
        self.active.set(Some(key));
    }

    pub fn close_tab(&self, key: NavKey) {
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self.active.with_untracked(|active| *active == Some(key)) {
            let next_active = self
                .opened
                .with_untracked(|tabs| tabs.last().map(|t| t.key));
            self.active.set(next_active);
        }
    }

    /// Closes tabs whose entry is no longer in the resolved menu, e.g. after a
    /// session refresh revoked a flag. Tabs restored from the URL get their
    /// path filled in here.
    pub fn sync_with_menu(&self, menu: &NavigationTree) {
        let revoked: Vec<NavKey> = self.opened.with_untracked(|tabs| {
            tabs.iter()
                .filter(|tab| !menu.contains(tab.key))
                .map(|tab| tab.key)
                .collect()
        });
        for key in revoked {
            log::info!("closing tab {}: entry no longer available", key.as_str());
            self.close_tab(key);
        }
        let needs_path = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.path.is_empty()));
        if needs_path {
            self.opened.update(|tabs| {
                for tab in tabs.iter_mut().filter(|tab| tab.path.is_empty()) {
                    if let Some(node) = menu.find(tab.key) {
                        tab.path = node.path.clone();
                    }
                }
            });
        }
    }

    pub fn toggle_expanded(&self, key: NavKey) {
        self.expanded.update(|keys| {
            if let Some(pos) = keys.iter().position(|k| *k == key) {
                keys.remove(pos);
            } else {
                keys.push(key);
            }
        });
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

fn active_from_query(search: &str) -> Option<NavKey> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").and_then(|key| NavKey::parse(key))
}

fn query_for(key: NavKey) -> String {
    let query = serde_qs::to_string(&HashMap::from([("active", key.as_str())])).unwrap_or_default();
    format!("?{}", query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_key_round_trips_through_query() {
        let query = query_for(NavKey::WalletTransactions);
        assert_eq!(query, "?active=wallet_transactions");
        assert_eq!(active_from_query(&query), Some(NavKey::WalletTransactions));
    }

    #[test]
    fn unknown_or_missing_active_key_is_ignored() {
        assert_eq!(active_from_query(""), None);
        assert_eq!(active_from_query("?active=not_a_page"), None);
        assert_eq!(active_from_query("?other=1"), None);
    }
}

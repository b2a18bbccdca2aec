use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::settings::UiSettingsContext;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    // Persisted UI settings (locale, layout, tables).
    provide_context(UiSettingsContext::load());

    view! {
        <AuthProvider>
            <AppShell />
        </AuthProvider>
    }
}

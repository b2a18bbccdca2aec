//! Tab strip and the page area of the active tab.

use contracts::system::navigation::i18n;
use leptos::prelude::*;

use crate::layout::global_context::{AppGlobalContext, Tab};
use crate::shared::icons::icon;
use crate::shared::settings::use_ui_settings;

#[component]
pub fn Center() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <div class="app-tabs__strip">
                <For
                    each=move || ctx.opened.get()
                    key=|tab| tab.key
                    children=move |tab: Tab| view! { <TabHeader tab=tab /> }
                />
            </div>
            <div class="app-tabs__page">
                {move || {
                    let active = ctx.active.get()?;
                    let tab = ctx.opened.with(|tabs| tabs.iter().find(|t| t.key == active).cloned())?;
                    Some(view! { <TabPage tab=tab /> })
                }}
            </div>
        </div>
    }
}

#[component]
fn TabHeader(tab: Tab) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let ui = use_ui_settings();
    let key = tab.key;

    view! {
        <div
            class="app-tabs__tab"
            class:app-tabs__tab--active=move || ctx.active.get() == Some(key)
            on:click=move |_| ctx.activate_tab(key)
        >
            <span>{move || i18n::title(key, ui.locale())}</span>
            <button
                class="app-tabs__close"
                on:click=move |ev| {
                    ev.stop_propagation();
                    ctx.close_tab(key);
                }
            >
                {icon("x")}
            </button>
        </div>
    }
}

/// Placeholder body for a navigation entry; pages themselves live elsewhere.
#[component]
fn TabPage(tab: Tab) -> impl IntoView {
    let ui = use_ui_settings();
    let key = tab.key;

    view! {
        <div class="page">
            <h1 class="page__title">{move || i18n::title(key, ui.locale())}</h1>
            <code class="page__path">{tab.path}</code>
        </div>
    }
}

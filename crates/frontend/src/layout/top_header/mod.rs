//! TopHeader component - application top bar.
//!
//! Holds the sidebar toggle, the horizontal menu when that layout is chosen,
//! locale and layout switches, the signed-in user and logout.

pub mod nav_bar;

use contracts::system::navigation::{Locale, NavigationTree};
use contracts::system::ui_settings::NavLayout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::navigation::NavigationMenu;
use crate::shared::icons::icon;
use crate::shared::settings::use_ui_settings;
use crate::system::auth::context::{do_logout, use_auth};

#[component]
pub fn TopHeader(menu: Memo<Option<NavigationTree>>) -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let ui = use_ui_settings();
    let (auth_state, set_auth_state) = use_auth();

    let is_vertical = move || ui.layout() == NavLayout::Vertical;
    let is_sidebar_visible = move || ctx.left_open.get();

    let logout = move |_| {
        spawn_local(async move {
            do_logout(set_auth_state).await;
        });
    };

    let next_locale = move || match ui.locale() {
        Locale::En => Locale::Ru,
        Locale::Ru => Locale::En,
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <Show when=is_vertical>
                    <button
                        class="top-header__icon-btn"
                        on:click=move |_| ctx.toggle_left()
                    >
                        {move || if is_sidebar_visible() {
                            icon("panel-left-close")
                        } else {
                            icon("panel-left-open")
                        }}
                    </button>
                </Show>
                <span class="top-header__title">"Back Office"</span>
            </div>

            <NavigationMenu menu=menu orientation=NavLayout::Horizontal />

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    title="Language"
                    on:click=move |_| ui.set_locale(next_locale())
                >
                    {icon("globe")}
                    <span>{move || ui.locale().as_str().to_uppercase()}</span>
                </button>

                <button
                    class="top-header__icon-btn"
                    title="Menu layout"
                    on:click=move |_| ui.toggle_layout()
                >
                    {icon("layout")}
                </button>

                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth_state.with(|state| {
                            state
                                .session
                                .as_ref()
                                .map(|s| s.user.full_name.clone().unwrap_or_else(|| s.user.username.clone()))
                                .unwrap_or_default()
                        })}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Logout">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}

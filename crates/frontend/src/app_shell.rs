//! Application shell: the auth gate and the signed-in layout.

use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::navigation::use_navigation;
use crate::layout::Shell;
use crate::shared::polling::{spawn_polling, LifetimeToken};
use crate::system::auth::context::{fetch_session, use_auth, SESSION_POLL_INTERVAL_MS};
use crate::system::pages::login::LoginPage;

/// Signed-in layout. Keeps the session fresh while mounted so access changes
/// made elsewhere reach the menu without a reload.
#[component]
fn MainLayout() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let (_, set_auth_state) = use_auth();

    ctx.init_router_integration();

    let menu = use_navigation();
    Effect::new(move |_| {
        menu.with(|menu| {
            if let Some(menu) = menu {
                ctx.sync_with_menu(menu);
            }
        });
    });

    let token = LifetimeToken::new();
    spawn_polling(
        SESSION_POLL_INTERVAL_MS,
        token.clone(),
        fetch_session,
        move |state| set_auth_state.set(state),
    );
    on_cleanup(move || token.cancel());

    view! { <Shell menu=menu /> }
}

/// Shows `LoginPage` until a session is established, then `MainLayout`.
#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|state| state.is_authenticated())
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}

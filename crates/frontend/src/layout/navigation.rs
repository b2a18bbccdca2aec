//! Resolved navigation for the signed-in user and the component that picks
//! the sidebar or the top bar rendering.

use contracts::system::access::DashboardMode;
use contracts::system::navigation::{resolver, tree, NavigationTree};
use contracts::system::ui_settings::{NavColor, NavLayout};
use leptos::prelude::*;

use crate::layout::left::sidebar::Sidebar;
use crate::layout::top_header::nav_bar::NavBar;
use crate::shared::settings::use_ui_settings;
use crate::system::auth::context::use_auth;

/// Menu for the current session and locale. `None` until a session is known.
///
/// Templates come from the shared per-(mode, locale) cache; only the pruning
/// runs again when the session or the locale changes.
pub fn use_navigation() -> Memo<Option<NavigationTree>> {
    let (auth_state, _) = use_auth();
    let ui = use_ui_settings();

    Memo::new(move |_| {
        let locale = ui.locale();
        auth_state.with(|state| {
            let session = state.session.as_ref()?;
            let template = tree::template(DashboardMode::for_user(&session.user), locale);
            resolver::resolve(
                Some(&*template),
                Some(&session.user),
                session.company.as_ref(),
            )
        })
    })
}

/// Renders `menu` in the requested orientation when it matches the layout
/// chosen in the settings. Nothing is rendered while the menu is `None`.
#[component]
pub fn NavigationMenu(menu: Memo<Option<NavigationTree>>, orientation: NavLayout) -> impl IntoView {
    let ui = use_ui_settings();
    let inverted = move || ui.settings.with(|s| s.nav_color == NavColor::Inverted);

    move || {
        if ui.layout() != orientation {
            return None;
        }
        let tree = menu.get()?;
        let view = match orientation {
            NavLayout::Vertical => view! { <Sidebar tree=tree inverted=inverted() /> }.into_any(),
            NavLayout::Horizontal => view! { <NavBar tree=tree inverted=inverted() /> }.into_any(),
        };
        Some(view)
    }
}

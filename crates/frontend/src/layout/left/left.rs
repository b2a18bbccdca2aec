use contracts::system::navigation::NavigationTree;
use contracts::system::ui_settings::NavLayout;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::navigation::NavigationMenu;
use crate::shared::settings::use_ui_settings;

/// Left zone. Collapsed by the header toggle and absent in horizontal layout.
#[component]
pub fn Left(menu: Memo<Option<NavigationTree>>) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let ui = use_ui_settings();
    let is_open = move || ctx.left_open.get() && ui.layout() == NavLayout::Vertical;

    view! {
        <div data-zone="left" class="left" class:hidden=move || !is_open()>
            <NavigationMenu menu=menu orientation=NavLayout::Vertical />
        </div>
    }
}

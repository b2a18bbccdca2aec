pub mod center;
pub mod global_context;
pub mod left;
pub mod navigation;
pub mod top_header;

use contracts::system::navigation::NavigationTree;
use leptos::prelude::*;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |   TopHeader (horizontal menu if chosen)  |
/// +------------------------------------------+
/// |  Sidebar  |          Tabs + page         |
/// |   (Left)  |           (Center)           |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(menu: Memo<Option<NavigationTree>>) -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader menu=menu />

            <div class="app-body">
                <left::Left menu=menu />

                <div class="app-main">
                    <center::Center />
                </div>
            </div>
        </div>
    }
}

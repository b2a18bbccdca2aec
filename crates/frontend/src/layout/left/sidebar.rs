//! Vertical rendering of the resolved menu: section subheaders, leaf entries
//! and collapsible parents.

use contracts::system::navigation::{NavSection, NavigationNode, NavigationTree};
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::{icon, nav_icon};

#[component]
pub fn Sidebar(tree: NavigationTree, inverted: bool) -> impl IntoView {
    view! {
        <nav class="app-sidebar__content" class:app-sidebar--inverted=inverted>
            {tree.sections.into_iter().map(|section| view! { <SidebarSection section=section /> }).collect_view()}
        </nav>
    }
}

#[component]
fn SidebarSection(section: NavSection) -> impl IntoView {
    view! {
        <div class="app-sidebar__section">
            <div class="app-sidebar__subheader">{section.subheader}</div>
            {section.items.into_iter().map(|node| {
                if node.children.is_empty() {
                    view! { <SidebarLeaf node=node depth=0 /> }.into_any()
                } else {
                    view! { <SidebarParent node=node /> }.into_any()
                }
            }).collect_view()}
        </div>
    }
}

#[component]
fn SidebarParent(node: NavigationNode) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let key = node.key;
    let is_expanded = move || ctx.expanded.with(|keys| keys.contains(&key));
    let children = StoredValue::new(node.children);

    view! {
        <div>
            <div
                class="app-sidebar__item"
                style:padding-left="12px"
                on:click=move |_| ctx.toggle_expanded(key)
            >
                <div class="app-sidebar__item-content">
                    {nav_icon(node.icon)}
                    <span>{node.title}</span>
                </div>
                <div
                    class="app-sidebar__chevron"
                    class:app-sidebar__chevron--expanded=is_expanded
                >
                    {icon("chevron-right")}
                </div>
            </div>
            <Show when=is_expanded>
                <div class="app-sidebar__children">
                    {children
                        .get_value()
                        .into_iter()
                        .map(|child| view! { <SidebarLeaf node=child depth=1 /> })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn SidebarLeaf(node: NavigationNode, depth: usize) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let key = node.key;
    let path = node.path;
    let padding = if depth == 0 { "12px" } else { "24px" };

    view! {
        <div
            class="app-sidebar__item"
            class:app-sidebar__item--active=move || ctx.active.get() == Some(key)
            style:padding-left=padding
            on:click=move |_| ctx.open_tab(key, &path)
        >
            <div class="app-sidebar__item-content">
                {nav_icon(node.icon)}
                <span>{node.title}</span>
            </div>
        </div>
    }
}

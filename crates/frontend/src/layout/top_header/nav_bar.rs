//! Horizontal rendering of the resolved menu. Parents open a dropdown with
//! their children; section subheaders are not shown.

use contracts::system::navigation::{NavKey, NavigationNode, NavigationTree};
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::{icon, nav_icon};

#[component]
pub fn NavBar(tree: NavigationTree, inverted: bool) -> impl IntoView {
    let open_menu = RwSignal::new(None::<NavKey>);
    let items: Vec<NavigationNode> = tree
        .sections
        .into_iter()
        .flat_map(|section| section.items)
        .collect();

    view! {
        <nav class="top-nav" class:top-nav--inverted=inverted>
            {items.into_iter().map(|node| {
                if node.children.is_empty() {
                    view! { <NavBarLink node=node open_menu=open_menu /> }.into_any()
                } else {
                    view! { <NavBarDropdown node=node open_menu=open_menu /> }.into_any()
                }
            }).collect_view()}
        </nav>
    }
}

#[component]
fn NavBarDropdown(node: NavigationNode, open_menu: RwSignal<Option<NavKey>>) -> impl IntoView {
    let key = node.key;
    let is_open = move || open_menu.get() == Some(key);
    let children = StoredValue::new(node.children);

    view! {
        <div class="top-nav__group" on:mouseleave=move |_| open_menu.set(None)>
            <button
                class="top-nav__item"
                on:click=move |_| open_menu.update(|open| {
                    *open = if *open == Some(key) { None } else { Some(key) };
                })
            >
                {nav_icon(node.icon)}
                <span>{node.title}</span>
                {icon("chevron-down")}
            </button>
            <Show when=is_open>
                <div class="top-nav__dropdown">
                    {children
                        .get_value()
                        .into_iter()
                        .map(|child| view! { <NavBarLink node=child open_menu=open_menu /> })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn NavBarLink(node: NavigationNode, open_menu: RwSignal<Option<NavKey>>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let key = node.key;
    let path = node.path;

    view! {
        <button
            class="top-nav__item"
            class:top-nav__item--active=move || ctx.active.get() == Some(key)
            on:click=move |_| {
                open_menu.set(None);
                ctx.open_tab(key, &path);
            }
        >
            {nav_icon(node.icon)}
            <span>{node.title}</span>
        </button>
    }
}

//! Sidebar with collapsible groups of collections

use crate::domain::registry::{NavGroup, NAV_GROUPS};
use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

/// Route of a collection page
pub fn collection_href(key: &str) -> String {
    format!("/{}", key)
}

/// Key of the collection page at `path`, if it is one
pub fn active_key(path: &str) -> Option<&str> {
    let key = path.trim_start_matches('/').split('/').next()?;
    (!key.is_empty()).then_some(key)
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();
    let active = Memo::new(move |_| {
        location
            .pathname
            .with(|path| active_key(path).map(str::to_string))
    });

    // Every group starts expanded
    let expanded_groups = RwSignal::new(NAV_GROUPS.iter().map(|g| g.label).collect::<Vec<_>>());

    view! {
        <nav class="app-sidebar__content">
            <A href="/">
                <div class="app-sidebar__item" class:app-sidebar__item--active=move || active.get().is_none()>
                    <div class="app-sidebar__item-content">
                        {icon("layers")}
                        <span>"Overview"</span>
                    </div>
                </div>
            </A>
            {NAV_GROUPS.iter().map(|group: &'static NavGroup| {
                let label = group.label;
                let is_expanded = move || expanded_groups.with(|g| g.contains(&label));
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                expanded_groups.update(|items| {
                                    if let Some(pos) = items.iter().position(|x| *x == label) {
                                        items.remove(pos);
                                    } else {
                                        items.push(label);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{label}</span>
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
                                {group.collections.iter().map(|collection| {
                                    let key = collection.key;
                                    view! {
                                        <A href=collection_href(key)>
                                            <div
                                                class="app-sidebar__item"
                                                class:app-sidebar__item--active=move || active.with(|a| a.as_deref() == Some(key))
                                                style:padding-left="10px"
                                            >
                                                <div class="app-sidebar__item-content">
                                                    {icon(collection.icon)}
                                                    <span>{collection.list_name}</span>
                                                </div>
                                            </div>
                                        </A>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_key() {
        assert_eq!(active_key("/cities"), Some("cities"));
        assert_eq!(active_key("/cost-items/"), Some("cost-items"));
        assert_eq!(active_key("/"), None);
        assert_eq!(active_key(""), None);
    }
}

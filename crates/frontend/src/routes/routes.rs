use crate::domain::registry::{collection_page, NAV_GROUPS};
use crate::layout::left::sidebar::collection_href;
use crate::layout::Shell;
use crate::shared::icons::icon;
use crate::shared::services::AppServices;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::hooks::use_params_map;
use leptos_router::path;

#[component]
fn Overview() -> impl IntoView {
    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Master data"</h1>
                </div>
            </div>
            <div class="overview">
                {NAV_GROUPS.iter().map(|group| view! {
                    <section class="overview__group">
                        <h2 class="overview__title">{icon(group.icon)}" "{group.label}</h2>
                        <ul class="overview__list">
                            {group.collections.iter().map(|c| view! {
                                <li>
                                    <A href=collection_href(c.key)>
                                        {icon(c.icon)}
                                        " "
                                        {c.list_name}
                                    </A>
                                </li>
                            }).collect_view()}
                        </ul>
                    </section>
                }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <div class="warning-box">
                <span class="warning-box__icon">"⚠"</span>
                <span class="warning-box__text">"This page does not exist."</span>
            </div>
        </div>
    }
}

/// `/:collection`, dispatched by key
#[component]
fn CollectionRoute(services: AppServices) -> impl IntoView {
    let params = use_params_map();
    let key = Memo::new(move |_| params.with(|p| p.get("collection").unwrap_or_default()));

    move || {
        let key = key.get();
        match collection_page(&key, services.clone()) {
            Some(page) => page,
            None => {
                log::warn!("no page for route '/{}'", key);
                view! { <NotFound /> }.into_any()
            }
        }
    }
}

#[component]
pub fn AppRoutes(services: AppServices) -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=Overview />
                    <Route
                        path=path!("/:collection")
                        view=move || view! { <CollectionRoute services=services.clone() /> }
                    />
                </Routes>
            </Shell>
        </Router>
    }
}

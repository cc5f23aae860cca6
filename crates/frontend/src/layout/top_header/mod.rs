//! Top bar: sidebar toggle, application title and the signed-in user.

use crate::shared::icons::icon;
use crate::system::auth::storage::get_user_info;
use contracts::system::auth::UserInfo;
use leptos::prelude::*;

/// Name shown for the stored session
pub fn user_label(user: Option<&UserInfo>) -> String {
    match user {
        Some(u) => u
            .full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(u.username.as_str())
            .to_string(),
        None => "Guest".to_string(),
    }
}

#[component]
pub fn TopHeader(sidebar_open: RwSignal<bool>) -> impl IntoView {
    let user = get_user_info();
    let is_admin = user.as_ref().is_some_and(|u| u.is_admin);
    let label = user_label(user.as_ref());

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| sidebar_open.update(|open| *open = !*open)
                    title=move || if sidebar_open.get() { "Hide navigation" } else { "Show navigation" }
                >
                    {move || if sidebar_open.get() { icon("chevron-left") } else { icon("chevron-right") }}
                </button>
                <span class="top-header__title">"Master Data Console"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>{label}</span>
                    {is_admin.then(|| view! { <span class="badge badge--info">"admin"</span> })}
                </div>
            </div>
        </div>
    }
}

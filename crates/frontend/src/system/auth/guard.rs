use contracts::system::auth::UserInfo;
use leptos::prelude::*;

/// Whether the session may use write affordances guarded by `permission`
pub fn is_allowed(enforce: bool, user: Option<&UserInfo>, permission: &str) -> bool {
    if !enforce {
        return true;
    }
    user.is_some_and(|u| u.has_permission(permission))
}

/// Renders children only when the stored session holds `permission`.
///
/// Presentation only: the backend still authorizes every request.
#[component]
pub fn PermissionGuard(
    #[prop(into)] permission: String,
    /// `auth.enforce_permissions`; when false children always render
    enforce: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let user = super::storage::get_user_info();
    let allowed = is_allowed(enforce, user.as_ref(), &permission);

    view! {
        <Show when=move || allowed>
            {children()}
        </Show>
    }
}

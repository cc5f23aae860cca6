use contracts::system::auth::UserInfo;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const USER_INFO_KEY: &str = "auth_user_info";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .filter(|token| !token.trim().is_empty())
}

/// `Authorization` header value for the stored token
pub fn bearer_header() -> Option<String> {
    get_access_token().map(|token| format!("Bearer {}", token))
}

/// Signed-in user as stored by the login flow; unreadable JSON counts as absent
pub fn get_user_info() -> Option<UserInfo> {
    let raw = get_local_storage()?.get_item(USER_INFO_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("ignoring stored user info: {}", e);
            None
        }
    }
}

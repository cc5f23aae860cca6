use serde::{Deserialize, Serialize};

/// Signed-in user as persisted by the login page of the host portal.
///
/// The console never authenticates by itself: it only reads this record
/// (and the bearer token stored next to it) to decorate requests and to
/// hide write affordances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    /// Granted permissions, e.g. `"banks:write"`
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl UserInfo {
    /// Admins hold every permission
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_admin || self.permissions.iter().any(|p| p == permission || p == "*")
    }

    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

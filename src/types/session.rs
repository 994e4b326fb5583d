use serde::{Deserialize, Serialize};

use super::user::User;

/// Durable storage keys of the session identity.
pub const KEY_USER_NAME: &str = "user_name";
pub const KEY_USER_ID: &str = "user_id";
pub const KEY_GITHUB_USERNAME: &str = "github_username";

/// Typed view of the persisted session identity.
///
/// Each field maps to one string key in the `session_kv` table. Loading and
/// saving live in `managers::session_store`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionContext {
    pub display_name: Option<String>,
    pub user_id: Option<i64>,
    pub github_username: Option<String>,
}

impl SessionContext {
    pub fn for_user(user: &User) -> Self {
        Self {
            display_name: Some(user.display_name.clone()),
            user_id: Some(user.id),
            github_username: user.github_username.clone(),
        }
    }

    /// A usable identity needs both a name and a numeric id.
    pub fn user(&self) -> Option<User> {
        match (&self.display_name, self.user_id) {
            (Some(name), Some(id)) => Some(User {
                id,
                display_name: name.clone(),
                github_username: self.github_username.clone(),
            }),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.user_id.is_none() && self.github_username.is_none()
    }
}

/// How a GitHub login is resolved into a local user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OAuthGrant {
    /// `?code=` from the OAuth redirect.
    Code(String),
    /// `?username=` handed back by the backend redirect.
    Username(String),
}

use serde::{Deserialize, Serialize};

/// The logged-in user. Lives as long as the session identity does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub display_name: String,
    pub github_username: Option<String>,
}

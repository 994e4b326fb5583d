//! Session Store for linkdeck.
//!
//! Persists the logged-in identity in the `session_kv` table and resolves
//! logins (local, email/password, GitHub OAuth) into a backend user id.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};
use tracing::{info, warn};

use crate::database::connection::Database;
use crate::services::api_client::BackendApi;
use crate::types::api::{LoginRequest, RegisterRequest};
use crate::types::errors::{ApiError, AuthError, SessionError, ValidationError};
use crate::types::session::{
    OAuthGrant, SessionContext, KEY_GITHUB_USERNAME, KEY_USER_ID, KEY_USER_NAME,
};
use crate::types::user::User;

impl SessionContext {
    /// Reads the identity keys. Missing keys, and an id that is not an
    /// integer, come back as `None`.
    pub fn load(db: &Database) -> Result<Self, SessionError> {
        let conn = db.connection();
        let read = |key: &str| -> Result<Option<String>, SessionError> {
            conn.query_row(
                "SELECT value FROM session_kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(SessionError::from)
        };

        Ok(Self {
            display_name: read(KEY_USER_NAME)?,
            user_id: read(KEY_USER_ID)?.and_then(|v| v.trim().parse().ok()),
            github_username: read(KEY_GITHUB_USERNAME)?,
        })
    }

    /// Replaces the stored identity with this one. `None` fields are removed.
    pub fn save(&self, db: &Database) -> Result<(), SessionError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        let entries = [
            (KEY_USER_NAME, self.display_name.clone()),
            (KEY_USER_ID, self.user_id.map(|id| id.to_string())),
            (KEY_GITHUB_USERNAME, self.github_username.clone()),
        ];

        let tx = db.connection().unchecked_transaction()?;
        for (key, value) in entries {
            match value {
                Some(value) => tx.execute(
                    "INSERT INTO session_kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                    params![key, value, now],
                )?,
                None => tx.execute("DELETE FROM session_kv WHERE key = ?1", params![key])?,
            };
        }
        tx.commit()?;
        Ok(())
    }

    /// Removes every identity key.
    pub fn clear(db: &Database) -> Result<(), SessionError> {
        db.connection().execute(
            "DELETE FROM session_kv WHERE key IN (?1, ?2, ?3)",
            params![KEY_USER_NAME, KEY_USER_ID, KEY_GITHUB_USERNAME],
        )?;
        Ok(())
    }
}

/// Trait defining session store operations.
#[allow(async_fn_in_trait)]
pub trait SessionStoreTrait {
    fn restore(&self) -> Result<Option<User>, SessionError>;
    fn login_local(&self, name: &str, user_id: i64) -> Result<User, SessionError>;
    async fn login_with_credentials(&self, email: &str, password: &str) -> Result<User, AuthError>;
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), AuthError>;
    async fn resolve_oauth(&self, grant: OAuthGrant) -> Result<User, AuthError>;
    fn logout(&self) -> Result<(), SessionError>;
}

/// Session store backed by SQLite and the bookmark backend.
pub struct SessionStore<B> {
    db: Arc<Database>,
    api: Arc<B>,
}

impl<B: BackendApi> SessionStore<B> {
    pub fn new(db: Arc<Database>, api: Arc<B>) -> Self {
        Self { db, api }
    }

    /// Returns the raw stored identity, complete or not.
    pub fn context(&self) -> Result<SessionContext, SessionError> {
        SessionContext::load(&self.db)
    }

    fn persist(&self, user: &User) -> Result<(), SessionError> {
        SessionContext::for_user(user).save(&self.db)?;
        info!(user_id = user.id, name = %user.display_name, "session stored");
        Ok(())
    }
}

/// Maps backend refusals of credentials to `Rejected`; everything else keeps
/// the usual not-found/network split.
fn credential_error(e: ApiError) -> AuthError {
    match e {
        ApiError::Status { status: 400 | 401 | 403, message } => AuthError::Rejected(message),
        other => AuthError::from(other),
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

impl<B: BackendApi> SessionStoreTrait for SessionStore<B> {
    fn restore(&self) -> Result<Option<User>, SessionError> {
        let user = self.context()?.user();
        if let Some(user) = &user {
            info!(user_id = user.id, "session restored");
        }
        Ok(user)
    }

    /// Records `name` as logged in under the backend id `user_id`.
    fn login_local(&self, name: &str, user_id: i64) -> Result<User, SessionError> {
        require(name, "name")?;
        let user = User {
            id: user_id,
            display_name: name.trim().to_string(),
            github_username: None,
        };
        self.persist(&user)?;
        Ok(user)
    }

    async fn login_with_credentials(&self, email: &str, password: &str) -> Result<User, AuthError> {
        require(email, "email")?;
        require(password, "password")?;

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await.map_err(|e| {
            warn!(error = %e, "credential login failed");
            credential_error(e)
        })?;

        let user = User {
            id: response.user_id,
            display_name: response.username,
            github_username: None,
        };
        self.persist(&user)?;
        Ok(user)
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), AuthError> {
        require(username, "username")?;
        require(email, "email")?;
        require(password, "password")?;

        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.api.register(&request).await.map_err(credential_error)?;
        info!(username = %request.username, "account registered");
        Ok(())
    }

    /// Exchanges an OAuth code (or an already-known GitHub username) for the
    /// backend user id, then persists the identity.
    async fn resolve_oauth(&self, grant: OAuthGrant) -> Result<User, AuthError> {
        let username = match grant {
            OAuthGrant::Code(code) => {
                require(&code, "code")?;
                let callback = self.api.github_callback(&code).await.map_err(|e| {
                    warn!(error = %e, "oauth code exchange failed");
                    AuthError::from(e)
                })?;
                callback.username
            }
            OAuthGrant::Username(username) => {
                require(&username, "username")?;
                username.trim().to_string()
            }
        };

        let resolved = self.api.resolve_github_user(&username).await.map_err(|e| {
            warn!(error = %e, %username, "github username resolution failed");
            AuthError::from(e)
        })?;

        let user = User {
            id: resolved.id,
            display_name: username.clone(),
            github_username: Some(username),
        };
        self.persist(&user)?;
        Ok(user)
    }

    fn logout(&self) -> Result<(), SessionError> {
        SessionContext::clear(&self.db)?;
        info!("session cleared");
        Ok(())
    }
}

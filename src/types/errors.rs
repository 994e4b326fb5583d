use thiserror::Error;

// === ValidationError ===

/// A required field was blank. Raised before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The named field is empty or whitespace only.
    #[error("{0} is required")]
    Required(&'static str),
}

// === ApiError ===

/// Failures talking to the bookmark backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, reset, ...).
    #[error("Network error: {0}")]
    Network(String),
    /// The backend answered 404.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The backend answered with another non-2xx status.
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound(_) => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// === DatabaseError ===

/// Failures opening the session database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The database directory could not be created.
    #[error("Cannot create database directory {path}: {message}")]
    Directory { path: String, message: String },
    /// SQLite refused to open the file or a migration failed.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

// === SessionError ===

/// Errors raised while reading or writing the durable session identity.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Database operation failed.
    #[error("Session storage error: {0}")]
    Storage(String),
    /// The supplied identity was incomplete.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<rusqlite::Error> for SessionError {
    fn from(e: rusqlite::Error) -> Self {
        SessionError::Storage(e.to_string())
    }
}

// === AuthError ===

/// Errors raised while establishing a session against the backend.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The OAuth code or GitHub username could not be resolved to a user.
    #[error("User not found: {0}")]
    NotFound(String),
    /// The backend was unreachable or answered with an unexpected status.
    #[error("Authentication request failed: {0}")]
    Network(String),
    /// The backend refused the supplied credentials or registration data.
    #[error("Authentication rejected: {0}")]
    Rejected(String),
    /// A required field was blank.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The identity was resolved but could not be persisted.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<ApiError> for AuthError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::NotFound(what) => AuthError::NotFound(what),
            other => AuthError::Network(other.to_string()),
        }
    }
}

// === FolderError ===

/// Errors related to folder registry operations.
#[derive(Debug, Error)]
pub enum FolderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    /// No folder with this id is loaded locally.
    #[error("Folder not found: {0}")]
    NotFound(i64),
}

// === BookmarkError ===

/// Errors related to bookmark collection operations.
#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    /// No bookmark with this id is loaded locally.
    #[error("Bookmark not found: {0}")]
    NotFound(i64),
}

// === DashboardError ===

/// Errors surfaced by the dashboard view controller.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The operation needs an active session.
    #[error("Not logged in")]
    NotLoggedIn,
    /// The triggering control is disabled while a previous call is in flight.
    #[error("Operation already in progress: {0}")]
    Busy(crate::types::view::Operation),
    /// `confirm_delete` without a pending confirmation.
    #[error("No delete is awaiting confirmation")]
    NothingToConfirm,
    /// `save_*_edit` without an open edit form.
    #[error("No edit in progress")]
    NoEditTarget,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Folder(#[from] FolderError),
    #[error(transparent)]
    Bookmark(#[from] BookmarkError),
}

// === SettingsError ===

/// Errors related to client settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Serialization or deserialization of settings failed.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The specified settings key is invalid or does not exist.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided value is not valid for the target key.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

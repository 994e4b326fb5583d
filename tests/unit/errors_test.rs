use linkdeck::types::errors::*;
use linkdeck::types::view::Operation;

// === ValidationError Tests ===

#[test]
fn validation_error_names_the_field() {
    assert_eq!(ValidationError::Required("title").to_string(), "title is required");
    assert_eq!(ValidationError::Required("name").to_string(), "name is required");
}

// === ApiError Tests ===

#[test]
fn api_error_display_variants() {
    assert_eq!(
        ApiError::Network("connection refused".to_string()).to_string(),
        "Network error: connection refused"
    );
    assert_eq!(
        ApiError::NotFound("/users/github/ghost".to_string()).to_string(),
        "Not found: /users/github/ghost"
    );
    assert_eq!(
        ApiError::Status {
            status: 500,
            message: "boom".to_string()
        }
        .to_string(),
        "Backend returned 500: boom"
    );
    assert_eq!(
        ApiError::Decode("expected an array".to_string()).to_string(),
        "Malformed response: expected an array"
    );
}

#[test]
fn api_error_status_helper() {
    assert_eq!(ApiError::NotFound("x".into()).status(), Some(404));
    assert_eq!(
        ApiError::Status {
            status: 401,
            message: String::new()
        }
        .status(),
        Some(401)
    );
    assert_eq!(ApiError::Network("x".into()).status(), None);
    assert_eq!(ApiError::Decode("x".into()).status(), None);
}

// === AuthError Tests ===

#[test]
fn auth_error_from_api_not_found_is_not_found() {
    let err = AuthError::from(ApiError::NotFound("ghost".to_string()));
    assert!(matches!(err, AuthError::NotFound(ref what) if what == "ghost"));
}

#[test]
fn auth_error_from_other_api_errors_is_network() {
    let err = AuthError::from(ApiError::Status {
        status: 502,
        message: "bad gateway".to_string(),
    });
    match err {
        AuthError::Network(msg) => assert!(msg.contains("502")),
        other => panic!("expected Network, got {:?}", other),
    }

    let err = AuthError::from(ApiError::Network("reset".to_string()));
    assert!(matches!(err, AuthError::Network(_)));
}

#[test]
fn auth_error_validation_is_transparent() {
    let err = AuthError::from(ValidationError::Required("email"));
    assert_eq!(err.to_string(), "email is required");
}

// === SessionError Tests ===

#[test]
fn session_error_from_rusqlite() {
    let err = SessionError::from(rusqlite::Error::InvalidQuery);
    assert!(err.to_string().starts_with("Session storage error:"));
}

// === Folder / Bookmark errors ===

#[test]
fn folder_and_bookmark_not_found_display() {
    assert_eq!(FolderError::NotFound(7).to_string(), "Folder not found: 7");
    assert_eq!(BookmarkError::NotFound(3).to_string(), "Bookmark not found: 3");
}

#[test]
fn folder_error_wraps_api_error_transparently() {
    let err = FolderError::from(ApiError::Network("down".to_string()));
    assert_eq!(err.to_string(), "Network error: down");
}

// === DashboardError Tests ===

#[test]
fn dashboard_error_display_variants() {
    assert_eq!(DashboardError::NotLoggedIn.to_string(), "Not logged in");
    assert_eq!(
        DashboardError::Busy(Operation::Save).to_string(),
        "Operation already in progress: save"
    );
    assert_eq!(
        DashboardError::NothingToConfirm.to_string(),
        "No delete is awaiting confirmation"
    );
    assert_eq!(DashboardError::NoEditTarget.to_string(), "No edit in progress");
}

#[test]
fn dashboard_error_keeps_inner_message() {
    let err = DashboardError::from(BookmarkError::Validation(ValidationError::Required("url")));
    assert_eq!(err.to_string(), "url is required");
}

#[test]
fn dashboard_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(DashboardError::NotLoggedIn);
    assert!(err.source().is_none());
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
    assert_eq!(
        SettingsError::InvalidKey("nope".to_string()).to_string(),
        "Invalid settings key: nope"
    );
    assert_eq!(
        SettingsError::InvalidValue("wrong type".to_string()).to_string(),
        "Invalid settings value: wrong type"
    );
}

//! Unit tests for the SessionStore public API.
//!
//! These tests exercise identity persistence and login resolution through the
//! `SessionStoreTrait` interface, using an in-memory SQLite database and the
//! in-process backend.

use std::sync::Arc;

use linkdeck::database::Database;
use linkdeck::managers::session_store::{SessionStore, SessionStoreTrait};
use linkdeck::services::memory_backend::MemoryBackend;
use linkdeck::types::errors::{AuthError, SessionError};
use linkdeck::types::session::{OAuthGrant, SessionContext};
use rstest::rstest;
use tempfile::TempDir;

/// Helper: a store over a fresh in-memory database and backend.
fn setup() -> (SessionStore<MemoryBackend>, Arc<Database>, Arc<MemoryBackend>) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to open in-memory database"));
    let backend = Arc::new(MemoryBackend::new());
    (SessionStore::new(db.clone(), backend.clone()), db, backend)
}

// ─── restore / login_local / logout ───

#[test]
fn test_restore_is_none_on_fresh_database() {
    let (store, _db, _) = setup();
    assert_eq!(store.restore().unwrap(), None);
}

#[test]
fn test_login_local_then_restore() {
    let (store, _db, _) = setup();

    let user = store.login_local("  ana ", 12).unwrap();
    assert_eq!(user.display_name, "ana");
    assert_eq!(user.id, 12);

    let restored = store.restore().unwrap().expect("session should be restored");
    assert_eq!(restored, user);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn test_login_local_rejects_blank_name(#[case] name: &str) {
    let (store, _db, _) = setup();
    let err = store.login_local(name, 1).unwrap_err();
    assert!(matches!(err, SessionError::Validation(_)));
    assert_eq!(store.restore().unwrap(), None);
}

#[test]
fn test_logout_clears_identity() {
    let (store, db, _) = setup();
    store.login_local("ana", 1).unwrap();

    store.logout().unwrap();

    assert_eq!(store.restore().unwrap(), None);
    assert!(SessionContext::load(&db).unwrap().is_empty());
}

#[test]
fn test_logout_without_session_is_ok() {
    let (store, _db, _) = setup();
    assert!(store.logout().is_ok());
}

#[test]
fn test_identity_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.db");
    let backend = Arc::new(MemoryBackend::new());

    {
        let db = Arc::new(Database::open(&path).unwrap());
        SessionStore::new(db, backend.clone())
            .login_local("ana", 5)
            .unwrap();
    }

    let db = Arc::new(Database::open(&path).unwrap());
    let restored = SessionStore::new(db, backend).restore().unwrap();
    assert_eq!(restored.map(|u| u.id), Some(5));
}

#[test]
fn test_restore_needs_both_name_and_id() {
    let (store, db, _) = setup();
    SessionContext {
        display_name: Some("ana".to_string()),
        user_id: None,
        github_username: None,
    }
    .save(&db)
    .unwrap();

    assert_eq!(store.restore().unwrap(), None);
    assert_eq!(store.context().unwrap().display_name.as_deref(), Some("ana"));
}

#[test]
fn test_non_numeric_stored_id_is_treated_as_absent() {
    let (store, db, _) = setup();
    db.connection()
        .execute(
            "INSERT INTO session_kv (key, value, updated_at) VALUES ('user_name', 'ana', 0), ('user_id', 'abc', 0)",
            [],
        )
        .unwrap();

    assert_eq!(store.context().unwrap().user_id, None);
    assert_eq!(store.restore().unwrap(), None);
}

#[tokio::test]
async fn test_switching_user_drops_previous_github_username() {
    let (store, _db, backend) = setup();
    backend.add_user("octo", "octo@example.com", "");
    store
        .resolve_oauth(OAuthGrant::Username("octo".into()))
        .await
        .unwrap();

    store.login_local("ana", 9).unwrap();

    let ctx = store.context().unwrap();
    assert_eq!(ctx.github_username, None);
    assert_eq!(ctx.user_id, Some(9));
}

// ─── credentials ───

#[tokio::test]
async fn test_register_then_login_with_credentials() {
    let (store, _db, _) = setup();

    store.register("ana", "ana@example.com", "secret").await.unwrap();
    let user = store
        .login_with_credentials("ana@example.com", "secret")
        .await
        .unwrap();

    assert_eq!(user.display_name, "ana");
    assert_eq!(store.restore().unwrap(), Some(user));
}

#[tokio::test]
async fn test_wrong_password_is_rejected_and_nothing_stored() {
    let (store, _db, backend) = setup();
    backend.add_user("ana", "ana@example.com", "secret");

    let err = store
        .login_with_credentials("ana@example.com", "nope")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Rejected(_)), "{:?}", err);
    assert_eq!(store.restore().unwrap(), None);
}

#[tokio::test]
async fn test_blank_credentials_never_reach_the_backend() {
    let (store, _db, backend) = setup();

    let err = store.login_with_credentials("  ", "secret").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
    let err = store.register("ana", "ana@example.com", "").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let (store, _db, _) = setup();
    store.register("ana", "ana@example.com", "secret").await.unwrap();

    let err = store
        .register("ana", "other@example.com", "secret")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Rejected(_)));
}

#[tokio::test]
async fn test_credentials_with_backend_offline_is_network_error() {
    let (store, _db, backend) = setup();
    backend.set_offline(true);

    let err = store
        .login_with_credentials("ana@example.com", "secret")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Network(_)));
}

// ─── OAuth ───

#[tokio::test]
async fn test_oauth_code_is_exchanged_and_persisted() {
    let (store, _db, backend) = setup();
    let id = backend.add_user("octo", "octo@example.com", "");
    backend.add_oauth_code("abc123", "octo");

    let user = store
        .resolve_oauth(OAuthGrant::Code("abc123".into()))
        .await
        .unwrap();

    assert_eq!(user.id, id);
    assert_eq!(user.display_name, "octo");
    assert_eq!(user.github_username.as_deref(), Some("octo"));

    let ctx = store.context().unwrap();
    assert_eq!(ctx.github_username.as_deref(), Some("octo"));
    assert_eq!(ctx.user_id, Some(id));
}

#[tokio::test]
async fn test_oauth_username_skips_code_exchange() {
    let (store, _db, backend) = setup();
    let id = backend.add_user("octo", "octo@example.com", "");

    let user = store
        .resolve_oauth(OAuthGrant::Username("octo".into()))
        .await
        .unwrap();

    assert_eq!(user.id, id);
    assert_eq!(backend.request_count(), 1);
}

#[tokio::test]
async fn test_oauth_unknown_user_is_not_found() {
    let (store, _db, backend) = setup();
    backend.add_oauth_code("abc123", "ghost");

    let err = store
        .resolve_oauth(OAuthGrant::Code("abc123".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NotFound(_)), "{:?}", err);

    let err = store
        .resolve_oauth(OAuthGrant::Code("bad-code".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NotFound(_)));

    assert_eq!(store.restore().unwrap(), None);
}

#[tokio::test]
async fn test_oauth_offline_is_network_error() {
    let (store, _db, backend) = setup();
    backend.set_offline(true);

    let err = store
        .resolve_oauth(OAuthGrant::Username("octo".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Network(_)));
}

#[tokio::test]
async fn test_oauth_blank_grant_is_validation_error() {
    let (store, _db, backend) = setup();

    let err = store
        .resolve_oauth(OAuthGrant::Code("  ".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
    assert_eq!(backend.request_count(), 0);
}

//! Unit tests for the BookmarkCollection public API.
//!
//! These tests exercise bookmark list/create/update/delete and suggestions
//! through `BookmarkCollectionTrait`, using the in-process backend.

use std::sync::Arc;

use linkdeck::managers::bookmark_collection::{BookmarkCollection, BookmarkCollectionTrait};
use linkdeck::services::memory_backend::MemoryBackend;
use linkdeck::types::bookmark::{BookmarkDraft, BookmarkPatch, DraftField};
use linkdeck::types::errors::{ApiError, BookmarkError, ValidationError};
use rstest::rstest;

const USER: i64 = 7;

fn setup() -> (BookmarkCollection<MemoryBackend>, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    (BookmarkCollection::new(backend.clone()), backend)
}

fn draft(title: &str, url: &str) -> BookmarkDraft {
    BookmarkDraft::new(USER)
        .with_field(DraftField::Title, title)
        .with_field(DraftField::Url, url)
}

fn patch(title: &str, url: &str, description: &str) -> BookmarkPatch {
    BookmarkPatch {
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
    }
}

// ─── create ───

#[tokio::test]
async fn test_create_without_description_is_prepended() {
    let (mut collection, _) = setup();
    collection
        .create(&draft("Older", "https://older.example"))
        .await
        .unwrap();

    let created = collection
        .create(&draft("Example", "https://example.com"))
        .await
        .unwrap();

    let first = &collection.bookmarks()[0];
    assert_eq!(first, &created);
    assert_eq!(first.title, "Example");
    assert_eq!(first.url, "https://example.com");
    assert_eq!(first.description, "");
    assert_eq!(first.owner_id, USER);
    assert_eq!(collection.bookmarks().len(), 2);
}

#[tokio::test]
async fn test_create_uses_backend_id_and_draft_folder() {
    let (mut collection, backend) = setup();

    let created = collection
        .create(&draft("Example", "https://example.com").with_folder(Some(3)))
        .await
        .unwrap();

    let stored = backend.bookmarks_of(USER);
    assert_eq!(stored[0].id, created.id);
    assert_eq!(created.folder_id, Some(3));
    assert_eq!(stored[0].folder_id, Some(3));
}

#[rstest]
#[case("", "https://example.com", "title")]
#[case("   ", "https://example.com", "title")]
#[case("Example", "", "url")]
#[case("Example", " \t", "url")]
#[tokio::test]
async fn test_create_requires_title_and_url(
    #[case] title: &str,
    #[case] url: &str,
    #[case] field: &'static str,
) {
    let (mut collection, backend) = setup();

    let err = collection.create(&draft(title, url)).await.unwrap_err();

    assert!(matches!(err, BookmarkError::Validation(ValidationError::Required(f)) if f == field));
    assert!(collection.bookmarks().is_empty());
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn test_create_failure_leaves_list_unchanged() {
    let (mut collection, backend) = setup();
    backend.set_offline(true);

    let err = collection
        .create(&draft("Example", "https://example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, BookmarkError::Api(ApiError::Network(_))));
    assert!(collection.bookmarks().is_empty());
}

// ─── list ───

#[tokio::test]
async fn test_created_bookmark_round_trips_through_list() {
    let (mut collection, backend) = setup();
    let created = collection
        .create(&draft("Example", "https://example.com"))
        .await
        .unwrap();

    let mut fresh = BookmarkCollection::new(backend);
    let found = fresh
        .list(USER, None)
        .await
        .unwrap()
        .iter()
        .find(|b| b.id == created.id)
        .expect("created bookmark should be listed");
    assert_eq!(found.title, "Example");
    assert_eq!(found.url, "https://example.com");
}

#[tokio::test]
async fn test_list_scopes_by_folder() {
    let (mut collection, _) = setup();
    collection
        .create(&draft("Filed", "https://a.example").with_folder(Some(1)))
        .await
        .unwrap();
    collection
        .create(&draft("Loose", "https://b.example"))
        .await
        .unwrap();

    let scoped = collection.list(USER, Some(1)).await.unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].title, "Filed");

    let all = collection.list(USER, None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "Loose", "newest first");
}

#[tokio::test]
async fn test_list_is_scoped_to_user() {
    let (mut collection, _) = setup();
    collection
        .create(&draft("Mine", "https://a.example"))
        .await
        .unwrap();

    assert!(collection.list(USER + 1, None).await.unwrap().is_empty());
}

// ─── update ───

#[tokio::test]
async fn test_update_patches_local_record_on_success() {
    let (mut collection, backend) = setup();
    let created = collection
        .create(&draft("Example", "https://example.com"))
        .await
        .unwrap();

    collection
        .update(created.id, &patch("Renamed", "https://renamed.example", "notes"))
        .await
        .unwrap();

    let local = collection.get(created.id).unwrap();
    assert_eq!(local.title, "Renamed");
    assert_eq!(local.url, "https://renamed.example");
    assert_eq!(local.description, "notes");
    assert_eq!(backend.bookmarks_of(USER)[0].title, "Renamed");
}

#[tokio::test]
async fn test_update_failure_leaves_local_record_unpatched() {
    let (mut collection, backend) = setup();
    let created = collection
        .create(&draft("Example", "https://example.com"))
        .await
        .unwrap();
    backend.set_offline(true);

    assert!(collection
        .update(created.id, &patch("Renamed", "https://renamed.example", ""))
        .await
        .is_err());
    assert_eq!(collection.get(created.id).unwrap().title, "Example");
}

#[tokio::test]
async fn test_update_with_blank_title_is_rejected() {
    let (mut collection, backend) = setup();
    let created = collection
        .create(&draft("Example", "https://example.com"))
        .await
        .unwrap();
    let requests = backend.request_count();

    let err = collection
        .update(created.id, &patch(" ", "https://example.com", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, BookmarkError::Validation(_)));
    assert_eq!(backend.request_count(), requests);
}

// ─── delete ───

#[tokio::test]
async fn test_delete_twice_is_not_an_error() {
    let (mut collection, _) = setup();
    let keep = collection
        .create(&draft("Keep", "https://keep.example"))
        .await
        .unwrap();
    let gone = collection
        .create(&draft("Gone", "https://gone.example"))
        .await
        .unwrap();

    collection.delete(gone.id).await.unwrap();
    let after_first = collection.bookmarks().to_vec();
    collection.delete(gone.id).await.unwrap();

    assert_eq!(collection.bookmarks(), after_first.as_slice());
    assert_eq!(collection.bookmarks(), &[keep][..]);
}

#[tokio::test]
async fn test_delete_removes_locally_even_when_backend_fails() {
    let (mut collection, backend) = setup();
    let created = collection
        .create(&draft("Example", "https://example.com"))
        .await
        .unwrap();
    backend.set_offline(true);

    let result = collection.delete(created.id).await;

    assert!(matches!(result, Err(BookmarkError::Api(ApiError::Network(_)))));
    assert!(collection.get(created.id).is_none());
}

// ─── suggest ───

#[tokio::test]
async fn test_suggest_returns_backend_suggestion() {
    let (collection, backend) = setup();
    backend.set_suggestion("Try the Rustonomicon");

    let suggestion = collection
        .suggest(&["learning rust".to_string()])
        .await
        .unwrap();
    assert_eq!(suggestion, "Try the Rustonomicon");
}

#[tokio::test]
async fn test_suggest_without_descriptions_is_rejected_locally() {
    let (collection, backend) = setup();

    assert!(matches!(
        collection.suggest(&[]).await,
        Err(BookmarkError::Validation(_))
    ));
    assert_eq!(backend.request_count(), 0);
}

//! Bookmark Collection for linkdeck.
//!
//! In-memory bookmarks of the current user, optionally scoped to one folder.
//! Creates are inserted at the front with the backend-assigned id instead of
//! re-fetching. Updates patch the local record only after the backend accepts
//! them. Deletes always drop the local record.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::services::api_client::BackendApi;
use crate::types::api::{NewBookmarkRequest, SuggestRequest, UpdateBookmarkRequest};
use crate::types::bookmark::{Bookmark, BookmarkDraft, BookmarkPatch};
use crate::types::errors::{BookmarkError, ValidationError};

/// Trait defining bookmark collection operations.
#[allow(async_fn_in_trait)]
pub trait BookmarkCollectionTrait {
    async fn list(&mut self, user_id: i64, folder_id: Option<i64>) -> Result<&[Bookmark], BookmarkError>;
    async fn create(&mut self, draft: &BookmarkDraft) -> Result<Bookmark, BookmarkError>;
    async fn update(&mut self, id: i64, patch: &BookmarkPatch) -> Result<(), BookmarkError>;
    async fn delete(&mut self, id: i64) -> Result<(), BookmarkError>;
    async fn suggest(&self, descriptions: &[String]) -> Result<String, BookmarkError>;
    fn bookmarks(&self) -> &[Bookmark];
}

pub struct BookmarkCollection<B> {
    api: Arc<B>,
    bookmarks: Vec<Bookmark>,
}

impl<B: BackendApi> BookmarkCollection<B> {
    pub fn new(api: Arc<B>) -> Self {
        Self {
            api,
            bookmarks: Vec::new(),
        }
    }

    pub fn get(&self, id: i64) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    pub fn reset(&mut self) {
        self.bookmarks.clear();
    }
}

/// Case-insensitive substring match on title or description.
///
/// An empty term matches everything; input order is kept.
pub fn filter<'a>(collection: &'a [Bookmark], term: &str) -> Vec<&'a Bookmark> {
    if term.is_empty() {
        return collection.iter().collect();
    }
    let needle = term.to_lowercase();
    collection
        .iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&needle)
                || (!b.description.is_empty() && b.description.to_lowercase().contains(&needle))
        })
        .collect()
}

impl<B: BackendApi> BookmarkCollectionTrait for BookmarkCollection<B> {
    /// Replaces the snapshot with the backend's list for the user (and folder).
    async fn list(&mut self, user_id: i64, folder_id: Option<i64>) -> Result<&[Bookmark], BookmarkError> {
        let records = self.api.list_bookmarks(user_id, folder_id).await.map_err(|e| {
            warn!(error = %e, user_id, ?folder_id, "bookmark list failed");
            BookmarkError::from(e)
        })?;
        self.bookmarks = records
            .into_iter()
            .map(|r| r.into_bookmark(user_id))
            .collect();
        debug!(count = self.bookmarks.len(), ?folder_id, "bookmarks loaded");
        Ok(&self.bookmarks)
    }

    async fn create(&mut self, draft: &BookmarkDraft) -> Result<Bookmark, BookmarkError> {
        draft.validate()?;

        let created = self
            .api
            .create_bookmark(&NewBookmarkRequest::from(draft))
            .await
            .map_err(|e| {
                warn!(error = %e, "bookmark create failed");
                BookmarkError::from(e)
            })?;

        let bookmark = Bookmark {
            id: created.id,
            title: draft.title.clone(),
            url: draft.url.clone(),
            description: draft.description.clone(),
            owner_id: draft.owner_id,
            folder_id: draft.folder_id,
        };
        self.bookmarks.insert(0, bookmark.clone());
        Ok(bookmark)
    }

    /// Sends the full replacement; the local record changes only on success.
    async fn update(&mut self, id: i64, patch: &BookmarkPatch) -> Result<(), BookmarkError> {
        patch.validate()?;

        self.api
            .update_bookmark(id, &UpdateBookmarkRequest::from(patch))
            .await
            .map_err(|e| {
                warn!(error = %e, id, "bookmark update failed");
                BookmarkError::from(e)
            })?;

        if let Some(bookmark) = self.bookmarks.iter_mut().find(|b| b.id == id) {
            bookmark.title = patch.title.clone();
            bookmark.url = patch.url.clone();
            bookmark.description = patch.description.clone();
        }
        Ok(())
    }

    /// The local record is removed whatever the backend answers; a backend
    /// failure is still returned. Unknown ids are not an error.
    async fn delete(&mut self, id: i64) -> Result<(), BookmarkError> {
        let result = self.api.delete_bookmark(id).await;
        self.bookmarks.retain(|b| b.id != id);
        result.map_err(|e| {
            warn!(error = %e, id, "bookmark delete failed on the backend");
            BookmarkError::from(e)
        })
    }

    async fn suggest(&self, descriptions: &[String]) -> Result<String, BookmarkError> {
        if descriptions.is_empty() {
            return Err(ValidationError::Required("description").into());
        }
        let request = SuggestRequest {
            descriptions: descriptions.to_vec(),
        };
        let response = self.api.suggest_bookmark(&request).await?;
        Ok(response.suggestion)
    }

    fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }
}

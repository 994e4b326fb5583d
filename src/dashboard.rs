//! Dashboard view controller.
//!
//! Owns the whole screen state: the session, the folder registry, the
//! bookmark collection, the open forms, the delete confirmations and the busy
//! flags. Every user action is one method call; calls run one at a time.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::database::connection::Database;
use crate::managers::bookmark_collection::{self, BookmarkCollection, BookmarkCollectionTrait};
use crate::managers::folder_registry::{FolderRegistry, FolderRegistryTrait};
use crate::managers::session_store::{SessionStore, SessionStoreTrait};
use crate::services::api_client::BackendApi;
use crate::types::bookmark::{Bookmark, BookmarkDraft, BookmarkEdit, DraftField};
use crate::types::errors::{BookmarkError, DashboardError, FolderError};
use crate::types::folder::{Folder, FolderEdit};
use crate::types::session::OAuthGrant;
use crate::types::user::User;
use crate::types::view::{BusyFlags, DeleteState, EntityKind, Operation};

/// Serializable picture of what the screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub user: Option<User>,
    pub folders: Vec<Folder>,
    pub selected_folder: Option<i64>,
    pub search_term: String,
    pub bookmarks: Vec<Bookmark>,
    pub new_bookmark: BookmarkDraft,
    pub bookmark_edit: Option<BookmarkEdit>,
    pub folder_edit: Option<FolderEdit>,
    pub bookmark_delete: DeleteState,
    pub folder_delete: DeleteState,
    pub busy: BusyFlags,
    pub bookmark_edit_error: Option<String>,
    pub folder_edit_error: Option<String>,
    pub alert: Option<String>,
}

pub struct Dashboard<B: BackendApi> {
    session: SessionStore<B>,
    folders: FolderRegistry<B>,
    bookmarks: BookmarkCollection<B>,
    user: Option<User>,
    search_term: String,
    new_bookmark: BookmarkDraft,
    bookmark_edit: Option<BookmarkEdit>,
    folder_edit: Option<FolderEdit>,
    bookmark_delete: DeleteState,
    folder_delete: DeleteState,
    busy: BusyFlags,
    bookmark_edit_error: Option<String>,
    folder_edit_error: Option<String>,
    alert: Option<String>,
}

impl<B: BackendApi> Dashboard<B> {
    pub fn new(db: Arc<Database>, api: Arc<B>) -> Self {
        Self {
            session: SessionStore::new(db, api.clone()),
            folders: FolderRegistry::new(api.clone()),
            bookmarks: BookmarkCollection::new(api),
            user: None,
            search_term: String::new(),
            new_bookmark: BookmarkDraft::default(),
            bookmark_edit: None,
            folder_edit: None,
            bookmark_delete: DeleteState::Idle,
            folder_delete: DeleteState::Idle,
            busy: BusyFlags::default(),
            bookmark_edit_error: None,
            folder_edit_error: None,
            alert: None,
        }
    }

    // ─── Session ───

    /// Restores the stored identity and, if there is one, loads folders and
    /// bookmarks for it.
    pub async fn mount(&mut self) -> Result<Option<User>, DashboardError> {
        let user = self.session.restore()?;
        if let Some(user) = user.clone() {
            self.enter(user).await?;
        }
        Ok(user)
    }

    pub async fn login_local(&mut self, name: &str, user_id: i64) -> Result<User, DashboardError> {
        let user = self.session.login_local(name, user_id)?;
        self.enter(user.clone()).await?;
        Ok(user)
    }

    pub async fn login_with_credentials(&mut self, email: &str, password: &str) -> Result<User, DashboardError> {
        let user = self.session.login_with_credentials(email, password).await?;
        self.enter(user.clone()).await?;
        Ok(user)
    }

    pub async fn register(&mut self, username: &str, email: &str, password: &str) -> Result<(), DashboardError> {
        Ok(self.session.register(username, email, password).await?)
    }

    pub async fn login_oauth(&mut self, grant: OAuthGrant) -> Result<User, DashboardError> {
        let user = self.session.resolve_oauth(grant).await?;
        self.enter(user.clone()).await?;
        Ok(user)
    }

    /// Clears the stored identity and every piece of view state.
    pub fn logout(&mut self) -> Result<(), DashboardError> {
        self.session.logout()?;
        self.clear_view();
        Ok(())
    }

    /// Drops everything tied to the current user: lists, selection, search,
    /// forms, pending deletes and alerts. Busy flags are left alone.
    fn clear_view(&mut self) {
        self.user = None;
        self.folders.reset();
        self.bookmarks.reset();
        self.search_term.clear();
        self.new_bookmark = BookmarkDraft::default();
        self.bookmark_edit = None;
        self.folder_edit = None;
        self.bookmark_delete = DeleteState::Idle;
        self.folder_delete = DeleteState::Idle;
        self.bookmark_edit_error = None;
        self.folder_edit_error = None;
        self.alert = None;
    }

    async fn enter(&mut self, user: User) -> Result<(), DashboardError> {
        info!(user_id = user.id, "dashboard loading");
        self.clear_view();
        self.new_bookmark = BookmarkDraft::new(user.id);
        self.user = Some(user);
        self.refresh_folders().await?;
        self.refresh_bookmarks().await
    }

    fn current_user_id(&self) -> Result<i64, DashboardError> {
        self.user.as_ref().map(|u| u.id).ok_or(DashboardError::NotLoggedIn)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    // ─── Lists and filtering ───

    pub async fn refresh_folders(&mut self) -> Result<(), DashboardError> {
        let user_id = self.current_user_id()?;
        if let Err(e) = self.folders.list(user_id).await {
            self.alert = Some(e.to_string());
            return Err(e.into());
        }
        Ok(())
    }

    /// Re-fetches bookmarks scoped to the selected folder, if any.
    pub async fn refresh_bookmarks(&mut self) -> Result<(), DashboardError> {
        let user_id = self.current_user_id()?;
        let folder_id = self.folders.selected();
        if let Err(e) = self.bookmarks.list(user_id, folder_id).await {
            self.alert = Some(e.to_string());
            return Err(e.into());
        }
        Ok(())
    }

    pub fn folders(&self) -> &[Folder] {
        self.folders.folders()
    }

    pub fn selected_folder(&self) -> Option<i64> {
        self.folders.selected()
    }

    pub async fn select_folder(&mut self, folder_id: Option<i64>) -> Result<(), DashboardError> {
        self.current_user_id()?;
        self.folders.select(folder_id);
        self.refresh_bookmarks().await
    }

    /// Every fetched bookmark, ignoring the search term.
    pub fn bookmarks(&self) -> &[Bookmark] {
        self.bookmarks.bookmarks()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// Fetched bookmarks narrowed by the search term.
    pub fn visible_bookmarks(&self) -> Vec<&Bookmark> {
        bookmark_collection::filter(self.bookmarks.bookmarks(), &self.search_term)
    }

    // ─── Busy flags ───

    pub fn busy(&self) -> BusyFlags {
        self.busy
    }

    fn begin(&mut self, op: Operation) -> Result<(), DashboardError> {
        if self.busy.is_set(op) {
            return Err(DashboardError::Busy(op));
        }
        self.busy.set(op, true);
        Ok(())
    }

    fn finish(&mut self, op: Operation) {
        self.busy.set(op, false);
    }

    // ─── Alerts ───

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn raise<E: Into<DashboardError>>(&mut self, error: E) -> DashboardError {
        let error = error.into();
        warn!(error = %error, "operation failed");
        self.alert = Some(error.to_string());
        error
    }

    // ─── New bookmark form ───

    pub fn new_bookmark(&self) -> &BookmarkDraft {
        &self.new_bookmark
    }

    pub fn update_new_bookmark(&mut self, field: DraftField, value: &str) {
        self.new_bookmark = self.new_bookmark.with_field(field, value);
    }

    /// Submits the new-bookmark form into the selected folder. The form is
    /// cleared on success and kept on failure.
    pub async fn submit_new_bookmark(&mut self) -> Result<Bookmark, DashboardError> {
        let user_id = self.current_user_id()?;
        self.begin(Operation::Add)?;

        let draft = BookmarkDraft {
            owner_id: user_id,
            ..self.new_bookmark.with_folder(self.folders.selected())
        };
        let result = self.bookmarks.create(&draft).await;
        self.finish(Operation::Add);

        match result {
            Ok(bookmark) => {
                self.new_bookmark = BookmarkDraft::new(user_id);
                Ok(bookmark)
            }
            Err(e) => Err(self.raise(e)),
        }
    }

    /// Asks the backend for a bookmark idea based on the loaded descriptions.
    pub async fn suggest_bookmark(&mut self) -> Result<String, DashboardError> {
        self.current_user_id()?;
        let descriptions: Vec<String> = self
            .bookmarks
            .bookmarks()
            .iter()
            .filter(|b| !b.description.trim().is_empty())
            .map(|b| b.description.clone())
            .collect();
        self.bookmarks
            .suggest(&descriptions)
            .await
            .map_err(|e| self.raise(e))
    }

    // ─── Folder create ───

    pub async fn create_folder(&mut self, name: &str) -> Result<Folder, DashboardError> {
        let user_id = self.current_user_id()?;
        self.begin(Operation::Add)?;
        let result = self.folders.create(user_id, name).await;
        self.finish(Operation::Add);
        result.map_err(|e| self.raise(e))
    }

    // ─── Bookmark edit form ───

    pub fn bookmark_edit(&self) -> Option<&BookmarkEdit> {
        self.bookmark_edit.as_ref()
    }

    pub fn bookmark_edit_error(&self) -> Option<&str> {
        self.bookmark_edit_error.as_deref()
    }

    /// Opens the edit form for `id`, replacing any form already open.
    pub fn begin_bookmark_edit(&mut self, id: i64) -> Result<&BookmarkEdit, DashboardError> {
        let bookmark = self
            .bookmarks
            .get(id)
            .ok_or(BookmarkError::NotFound(id))?;
        self.bookmark_edit_error = None;
        Ok(self.bookmark_edit.insert(BookmarkEdit::for_bookmark(bookmark)))
    }

    pub fn update_bookmark_edit(&mut self, field: DraftField, value: &str) -> Result<(), DashboardError> {
        let edit = self.bookmark_edit.as_ref().ok_or(DashboardError::NoEditTarget)?;
        self.bookmark_edit = Some(edit.with_field(field, value));
        Ok(())
    }

    /// Saves the open edit form. Failures stay inline on the form, which
    /// remains open.
    pub async fn save_bookmark_edit(&mut self) -> Result<(), DashboardError> {
        let edit = self.bookmark_edit.clone().ok_or(DashboardError::NoEditTarget)?;
        self.begin(Operation::Save)?;
        self.bookmark_edit_error = None;

        let result = self.bookmarks.update(edit.id, &edit.draft.to_patch()).await;
        self.finish(Operation::Save);

        match result {
            Ok(()) => {
                self.bookmark_edit = None;
                Ok(())
            }
            Err(e) => {
                self.bookmark_edit_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn cancel_bookmark_edit(&mut self) {
        self.bookmark_edit = None;
        self.bookmark_edit_error = None;
    }

    // ─── Folder edit form ───

    pub fn folder_edit(&self) -> Option<&FolderEdit> {
        self.folder_edit.as_ref()
    }

    pub fn folder_edit_error(&self) -> Option<&str> {
        self.folder_edit_error.as_deref()
    }

    pub fn begin_folder_edit(&mut self, id: i64) -> Result<&FolderEdit, DashboardError> {
        let folder = self
            .folders
            .get(id)
            .ok_or(FolderError::NotFound(id))?;
        self.folder_edit_error = None;
        Ok(self.folder_edit.insert(FolderEdit::for_folder(folder)))
    }

    pub fn update_folder_edit(&mut self, name: &str) -> Result<(), DashboardError> {
        let edit = self.folder_edit.as_ref().ok_or(DashboardError::NoEditTarget)?;
        self.folder_edit = Some(edit.with_name(name));
        Ok(())
    }

    pub async fn save_folder_edit(&mut self) -> Result<(), DashboardError> {
        let edit = self.folder_edit.clone().ok_or(DashboardError::NoEditTarget)?;
        self.begin(Operation::Save)?;
        self.folder_edit_error = None;

        let result = self.folders.rename(edit.id, &edit.name).await;
        self.finish(Operation::Save);

        match result {
            Ok(()) => {
                self.folder_edit = None;
                Ok(())
            }
            Err(e) => {
                self.folder_edit_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn cancel_folder_edit(&mut self) {
        self.folder_edit = None;
        self.folder_edit_error = None;
    }

    // ─── Delete confirmation ───

    pub fn delete_state(&self, kind: EntityKind) -> DeleteState {
        match kind {
            EntityKind::Bookmark => self.bookmark_delete,
            EntityKind::Folder => self.folder_delete,
        }
    }

    fn delete_state_mut(&mut self, kind: EntityKind) -> &mut DeleteState {
        match kind {
            EntityKind::Bookmark => &mut self.bookmark_delete,
            EntityKind::Folder => &mut self.folder_delete,
        }
    }

    /// Asks for confirmation before deleting `id`. A pending request for
    /// another record is replaced; a delete already running is not.
    pub fn request_delete(&mut self, kind: EntityKind, id: i64) -> Result<(), DashboardError> {
        let state = self.delete_state_mut(kind);
        if let DeleteState::Deleting(_) = state {
            return Err(DashboardError::Busy(Operation::Delete));
        }
        *state = DeleteState::PendingConfirmation(id);
        Ok(())
    }

    /// Dismisses a pending confirmation. An in-flight delete cannot be cancelled.
    pub fn cancel_delete(&mut self, kind: EntityKind) {
        let state = self.delete_state_mut(kind);
        if let DeleteState::PendingConfirmation(_) = state {
            *state = DeleteState::Idle;
        }
    }

    pub async fn confirm_delete(&mut self, kind: EntityKind) -> Result<(), DashboardError> {
        let id = match self.delete_state(kind) {
            DeleteState::PendingConfirmation(id) => id,
            DeleteState::Deleting(_) => return Err(DashboardError::Busy(Operation::Delete)),
            DeleteState::Idle => return Err(DashboardError::NothingToConfirm),
        };
        self.begin(Operation::Delete)?;
        *self.delete_state_mut(kind) = DeleteState::Deleting(id);

        let result = match kind {
            EntityKind::Bookmark => self.delete_bookmark(id).await,
            EntityKind::Folder => self.delete_folder(id).await,
        };

        *self.delete_state_mut(kind) = DeleteState::Idle;
        self.finish(Operation::Delete);
        result.map_err(|e| self.raise(e))
    }

    async fn delete_bookmark(&mut self, id: i64) -> Result<(), DashboardError> {
        if self.bookmark_edit.as_ref().map(|e| e.id) == Some(id) {
            self.cancel_bookmark_edit();
        }
        Ok(self.bookmarks.delete(id).await?)
    }

    /// Deleting the selected folder clears the filter and re-fetches
    /// bookmarks without a folder scope.
    async fn delete_folder(&mut self, id: i64) -> Result<(), DashboardError> {
        let was_selected = self.folders.selected() == Some(id);
        self.folders.delete(id).await?;
        if self.folder_edit.as_ref().map(|e| e.id) == Some(id) {
            self.cancel_folder_edit();
        }
        if was_selected && self.folders.selected().is_none() {
            self.refresh_bookmarks().await?;
        }
        Ok(())
    }

    // ─── Snapshot ───

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            user: self.user.clone(),
            folders: self.folders.folders().to_vec(),
            selected_folder: self.folders.selected(),
            search_term: self.search_term.clone(),
            bookmarks: self.visible_bookmarks().into_iter().cloned().collect(),
            new_bookmark: self.new_bookmark.clone(),
            bookmark_edit: self.bookmark_edit.clone(),
            folder_edit: self.folder_edit.clone(),
            bookmark_delete: self.bookmark_delete,
            folder_delete: self.folder_delete,
            busy: self.busy,
            bookmark_edit_error: self.bookmark_edit_error.clone(),
            folder_edit_error: self.folder_edit_error.clone(),
            alert: self.alert.clone(),
        }
    }
}


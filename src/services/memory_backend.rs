//! In-process bookmark backend.
//!
//! Behaves like the REST server: it assigns ids, lists bookmarks newest
//! first, answers `DELETE`/`PUT` on unknown ids with success and reports
//! unknown GitHub users as 404. Used by the offline demo and by tests, which
//! can also take it offline or stall its writes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::services::api_client::BackendApi;
use crate::types::api::{
    BookmarkRecord, CallbackResponse, CreatedResponse, FolderRecord, LoginRequest, LoginResponse,
    NewBookmarkRequest, NewFolderRequest, RegisterRequest, RenameFolderRequest, SuggestRequest,
    SuggestResponse, UpdateBookmarkRequest, UserIdResponse,
};
use crate::types::errors::ApiError;

#[derive(Debug, Clone)]
struct StoredUser {
    id: i64,
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone)]
struct StoredFolder {
    owner_id: i64,
    record: FolderRecord,
}

#[derive(Debug, Clone)]
struct StoredBookmark {
    owner_id: i64,
    record: BookmarkRecord,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i64,
    users: Vec<StoredUser>,
    oauth_codes: HashMap<String, String>,
    folders: Vec<StoredFolder>,
    /// Newest first.
    bookmarks: Vec<StoredBookmark>,
    suggestion: Option<String>,
}

impl MemoryState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// `BackendApi` backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    offline: AtomicBool,
    stall_writes: AtomicBool,
    requests: AtomicUsize,
}

fn bad_request(message: &str) -> ApiError {
    ApiError::Status {
        status: 400,
        message: message.to_string(),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Counts the request and fails it if the backend is offline.
    fn enter(&self) -> Result<(), ApiError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Network("backend unreachable".to_string()));
        }
        Ok(())
    }

    /// Like `enter`, but never completes while writes are stalled.
    async fn enter_write(&self) -> Result<(), ApiError> {
        self.enter()?;
        if self.stall_writes.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    /// Every call fails with a network error while set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Write calls hang forever while set.
    pub fn set_stall_writes(&self, stall: bool) {
        self.stall_writes.store(stall, Ordering::SeqCst);
    }

    /// Number of calls received so far, including failed ones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Registers a user directly. Returns the new id.
    pub fn add_user(&self, username: &str, email: &str, password: &str) -> i64 {
        let mut state = self.state();
        let id = state.allocate_id();
        state.users.push(StoredUser {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });
        id
    }

    /// Makes `code` exchangeable for `username` at the OAuth callback.
    pub fn add_oauth_code(&self, code: &str, username: &str) {
        self.state()
            .oauth_codes
            .insert(code.to_string(), username.to_string());
    }

    pub fn set_suggestion(&self, suggestion: &str) {
        self.state().suggestion = Some(suggestion.to_string());
    }

    pub fn folders_of(&self, user_id: i64) -> Vec<FolderRecord> {
        self.state()
            .folders
            .iter()
            .filter(|f| f.owner_id == user_id)
            .map(|f| f.record.clone())
            .collect()
    }

    pub fn bookmarks_of(&self, user_id: i64) -> Vec<BookmarkRecord> {
        self.state()
            .bookmarks
            .iter()
            .filter(|b| b.owner_id == user_id)
            .map(|b| b.record.clone())
            .collect()
    }
}

impl BackendApi for MemoryBackend {
    async fn github_callback(&self, code: &str) -> Result<CallbackResponse, ApiError> {
        self.enter()?;
        let state = self.state();
        state
            .oauth_codes
            .get(code)
            .map(|username| CallbackResponse {
                username: username.clone(),
            })
            .ok_or_else(|| ApiError::NotFound("github callback".to_string()))
    }

    async fn resolve_github_user(&self, username: &str) -> Result<UserIdResponse, ApiError> {
        self.enter()?;
        let state = self.state();
        state
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| UserIdResponse { id: u.id })
            .ok_or_else(|| ApiError::NotFound(format!("github user {}", username)))
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.enter()?;
        if is_blank(&request.email) || request.password.is_empty() {
            return Err(bad_request("email and password are required"));
        }
        let state = self.state();
        let user = state
            .users
            .iter()
            .find(|u| u.email == request.email)
            .ok_or(ApiError::Status {
                status: 401,
                message: "unknown user".to_string(),
            })?;
        if user.password.is_empty() || user.password != request.password {
            return Err(ApiError::Status {
                status: 401,
                message: "invalid credentials".to_string(),
            });
        }
        Ok(LoginResponse {
            user_id: user.id,
            username: user.username.clone(),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.enter_write().await?;
        if is_blank(&request.username) || is_blank(&request.email) || request.password.is_empty() {
            return Err(bad_request("incomplete registration"));
        }
        let mut state = self.state();
        if state
            .users
            .iter()
            .any(|u| u.username == request.username || u.email == request.email)
        {
            return Err(bad_request("username or email already registered"));
        }
        let id = state.allocate_id();
        state.users.push(StoredUser {
            id,
            username: request.username.clone(),
            email: request.email.clone(),
            password: request.password.clone(),
        });
        Ok(())
    }

    async fn list_folders(&self, user_id: i64) -> Result<Vec<FolderRecord>, ApiError> {
        self.enter()?;
        Ok(self.folders_of(user_id))
    }

    async fn create_folder(&self, request: &NewFolderRequest) -> Result<CreatedResponse, ApiError> {
        self.enter_write().await?;
        if is_blank(&request.name) {
            return Err(bad_request("name is required"));
        }
        let mut state = self.state();
        let id = state.allocate_id();
        state.folders.push(StoredFolder {
            owner_id: request.user_id,
            record: FolderRecord {
                id,
                name: request.name.clone(),
            },
        });
        Ok(CreatedResponse { id })
    }

    async fn rename_folder(&self, id: i64, request: &RenameFolderRequest) -> Result<(), ApiError> {
        self.enter_write().await?;
        if is_blank(&request.name) {
            return Err(bad_request("name is required"));
        }
        let mut state = self.state();
        if let Some(folder) = state.folders.iter_mut().find(|f| f.record.id == id) {
            folder.record.name = request.name.clone();
        }
        Ok(())
    }

    async fn delete_folder(&self, id: i64) -> Result<(), ApiError> {
        self.enter_write().await?;
        let mut state = self.state();
        state.folders.retain(|f| f.record.id != id);
        // Contained bookmarks become unfiled.
        for bookmark in state.bookmarks.iter_mut() {
            if bookmark.record.folder_id == Some(id) {
                bookmark.record.folder_id = None;
            }
        }
        Ok(())
    }

    async fn list_bookmarks(
        &self,
        user_id: i64,
        folder_id: Option<i64>,
    ) -> Result<Vec<BookmarkRecord>, ApiError> {
        self.enter()?;
        let state = self.state();
        Ok(state
            .bookmarks
            .iter()
            .filter(|b| b.owner_id == user_id)
            .filter(|b| folder_id.is_none() || b.record.folder_id == folder_id)
            .map(|b| b.record.clone())
            .collect())
    }

    async fn create_bookmark(&self, request: &NewBookmarkRequest) -> Result<CreatedResponse, ApiError> {
        self.enter_write().await?;
        if is_blank(&request.title) || is_blank(&request.url) || request.user_id == 0 {
            return Err(bad_request("missing required fields"));
        }
        let mut state = self.state();
        let id = state.allocate_id();
        state.bookmarks.insert(
            0,
            StoredBookmark {
                owner_id: request.user_id,
                record: BookmarkRecord {
                    id,
                    title: request.title.clone(),
                    url: request.url.clone(),
                    description: Some(request.description.clone()),
                    folder_id: request.folder_id,
                    created_at: None,
                },
            },
        );
        Ok(CreatedResponse { id })
    }

    async fn update_bookmark(&self, id: i64, request: &UpdateBookmarkRequest) -> Result<(), ApiError> {
        self.enter_write().await?;
        let mut state = self.state();
        if let Some(bookmark) = state.bookmarks.iter_mut().find(|b| b.record.id == id) {
            bookmark.record.title = request.title.clone();
            bookmark.record.url = request.url.clone();
            bookmark.record.description = Some(request.description.clone());
        }
        Ok(())
    }

    async fn delete_bookmark(&self, id: i64) -> Result<(), ApiError> {
        self.enter_write().await?;
        self.state().bookmarks.retain(|b| b.record.id != id);
        Ok(())
    }

    async fn suggest_bookmark(&self, request: &SuggestRequest) -> Result<SuggestResponse, ApiError> {
        self.enter()?;
        if request.descriptions.is_empty() {
            return Err(bad_request("no descriptions supplied"));
        }
        let suggestion = self.state().suggestion.clone().unwrap_or_else(|| {
            format!("More on: {}", request.descriptions.join(", "))
        });
        Ok(SuggestResponse { suggestion })
    }
}

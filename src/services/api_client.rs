//! Client side of the bookmark backend's REST surface.
//!
//! [`BackendApi`] is the seam between view state and HTTP: managers are
//! generic over it, [`HttpBackend`] implements it with `reqwest`, and
//! `memory_backend::MemoryBackend` implements it in-process.

use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::api::{
    BookmarkRecord, CallbackResponse, CreatedResponse, FolderRecord, LoginRequest, LoginResponse,
    NewBookmarkRequest, NewFolderRequest, RegisterRequest, RenameFolderRequest, SuggestRequest,
    SuggestResponse, UpdateBookmarkRequest, UserIdResponse,
};
use crate::types::errors::ApiError;

/// Every backend call the client makes. One method per endpoint.
#[allow(async_fn_in_trait)]
pub trait BackendApi {
    /// `GET /github/callback?code=`
    async fn github_callback(&self, code: &str) -> Result<CallbackResponse, ApiError>;
    /// `GET /users/github/{username}`
    async fn resolve_github_user(&self, username: &str) -> Result<UserIdResponse, ApiError>;
    /// `POST /login`
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
    /// `POST /usuarios`
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;
    /// `GET /folders?user_id=`
    async fn list_folders(&self, user_id: i64) -> Result<Vec<FolderRecord>, ApiError>;
    /// `POST /folders`
    async fn create_folder(&self, request: &NewFolderRequest) -> Result<CreatedResponse, ApiError>;
    /// `PUT /folders/{id}`
    async fn rename_folder(&self, id: i64, request: &RenameFolderRequest) -> Result<(), ApiError>;
    /// `DELETE /folders/{id}`
    async fn delete_folder(&self, id: i64) -> Result<(), ApiError>;
    /// `GET /bookmarks?user_id=&folder_id=`
    async fn list_bookmarks(
        &self,
        user_id: i64,
        folder_id: Option<i64>,
    ) -> Result<Vec<BookmarkRecord>, ApiError>;
    /// `POST /bookmarks`
    async fn create_bookmark(&self, request: &NewBookmarkRequest) -> Result<CreatedResponse, ApiError>;
    /// `PUT /bookmarks/{id}`
    async fn update_bookmark(&self, id: i64, request: &UpdateBookmarkRequest) -> Result<(), ApiError>;
    /// `DELETE /bookmarks/{id}`
    async fn delete_bookmark(&self, id: i64) -> Result<(), ApiError>;
    /// `POST /suggest_bookmark`
    async fn suggest_bookmark(&self, request: &SuggestRequest) -> Result<SuggestResponse, ApiError>;
}

/// `BackendApi` over HTTP. No timeouts and no retries: a call lasts as long
/// as the server takes to answer.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Creates a backend client rooted at `base_url` (e.g. `http://localhost:5000`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Network(format!("invalid base url '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Network(format!("invalid base url '{}'", base_url)));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Appends percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(request: RequestBuilder, what: &str) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        debug!(%status, what, "backend responded");
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(what.to_string()));
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder, what: &str) -> Result<T, ApiError> {
        let response = Self::send(request, what).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(format!("{}: {}", what, e)))
    }

    /// Sends a write whose response body carries nothing we use.
    async fn send_empty(request: RequestBuilder, what: &str) -> Result<(), ApiError> {
        Self::send(request, what).await.map(|_| ())
    }
}

impl BackendApi for HttpBackend {
    async fn github_callback(&self, code: &str) -> Result<CallbackResponse, ApiError> {
        let request = self
            .client
            .get(self.endpoint(&["github", "callback"]))
            .query(&[("code", code)]);
        Self::send_json(request, "github callback").await
    }

    async fn resolve_github_user(&self, username: &str) -> Result<UserIdResponse, ApiError> {
        let request = self.client.get(self.endpoint(&["users", "github", username]));
        Self::send_json(request, &format!("github user {}", username)).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let request = self.client.post(self.endpoint(&["login"])).json(request);
        Self::send_json(request, "login").await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let request = self.client.post(self.endpoint(&["usuarios"])).json(request);
        Self::send_empty(request, "register").await
    }

    async fn list_folders(&self, user_id: i64) -> Result<Vec<FolderRecord>, ApiError> {
        let request = self
            .client
            .get(self.endpoint(&["folders"]))
            .query(&[("user_id", user_id)]);
        Self::send_json(request, "folders").await
    }

    async fn create_folder(&self, request: &NewFolderRequest) -> Result<CreatedResponse, ApiError> {
        let request = self.client.post(self.endpoint(&["folders"])).json(request);
        Self::send_json(request, "create folder").await
    }

    async fn rename_folder(&self, id: i64, request: &RenameFolderRequest) -> Result<(), ApiError> {
        let id = id.to_string();
        let request = self.client.put(self.endpoint(&["folders", &id])).json(request);
        Self::send_empty(request, &format!("folder {}", id)).await
    }

    async fn delete_folder(&self, id: i64) -> Result<(), ApiError> {
        let id = id.to_string();
        let request = self.client.delete(self.endpoint(&["folders", &id]));
        Self::send_empty(request, &format!("folder {}", id)).await
    }

    async fn list_bookmarks(
        &self,
        user_id: i64,
        folder_id: Option<i64>,
    ) -> Result<Vec<BookmarkRecord>, ApiError> {
        let mut query = vec![("user_id", user_id)];
        if let Some(folder_id) = folder_id {
            query.push(("folder_id", folder_id));
        }
        let request = self.client.get(self.endpoint(&["bookmarks"])).query(&query);
        Self::send_json(request, "bookmarks").await
    }

    async fn create_bookmark(&self, request: &NewBookmarkRequest) -> Result<CreatedResponse, ApiError> {
        let request = self.client.post(self.endpoint(&["bookmarks"])).json(request);
        Self::send_json(request, "create bookmark").await
    }

    async fn update_bookmark(&self, id: i64, request: &UpdateBookmarkRequest) -> Result<(), ApiError> {
        let id = id.to_string();
        let request = self.client.put(self.endpoint(&["bookmarks", &id])).json(request);
        Self::send_empty(request, &format!("bookmark {}", id)).await
    }

    async fn delete_bookmark(&self, id: i64) -> Result<(), ApiError> {
        let id = id.to_string();
        let request = self.client.delete(self.endpoint(&["bookmarks", &id]));
        Self::send_empty(request, &format!("bookmark {}", id)).await
    }

    async fn suggest_bookmark(&self, request: &SuggestRequest) -> Result<SuggestResponse, ApiError> {
        let request = self.client.post(self.endpoint(&["suggest_bookmark"])).json(request);
        Self::send_json(request, "suggest bookmark").await
    }
}

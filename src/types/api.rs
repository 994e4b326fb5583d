//! Request and response bodies of the bookmark backend.
//!
//! Field names follow the backend's JSON, which is why bookmarks carry
//! `titulo`/`descricao` on the wire.

use serde::{Deserialize, Serialize};

use super::bookmark::{Bookmark, BookmarkDraft, BookmarkPatch};
use super::folder::Folder;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderRecord {
    pub id: i64,
    pub name: String,
}

impl FolderRecord {
    pub fn into_folder(self, owner_id: i64) -> Folder {
        Folder {
            id: self.id,
            name: self.name,
            owner_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkRecord {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    pub url: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub folder_id: Option<i64>,
    #[serde(rename = "criado_em", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl BookmarkRecord {
    pub fn into_bookmark(self, owner_id: i64) -> Bookmark {
        Bookmark {
            id: self.id,
            title: self.title,
            url: self.url,
            description: self.description.unwrap_or_default(),
            owner_id,
            folder_id: self.folder_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewFolderRequest {
    pub name: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameFolderRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewBookmarkRequest {
    pub user_id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    pub url: String,
    #[serde(rename = "descricao")]
    pub description: String,
    pub folder_id: Option<i64>,
}

impl From<&BookmarkDraft> for NewBookmarkRequest {
    fn from(draft: &BookmarkDraft) -> Self {
        Self {
            user_id: draft.owner_id,
            title: draft.title.clone(),
            url: draft.url.clone(),
            description: draft.description.clone(),
            folder_id: draft.folder_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateBookmarkRequest {
    #[serde(rename = "titulo")]
    pub title: String,
    pub url: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

impl From<&BookmarkPatch> for UpdateBookmarkRequest {
    fn from(patch: &BookmarkPatch) -> Self {
        Self {
            title: patch.title.clone(),
            url: patch.url.clone(),
            description: patch.description.clone(),
        }
    }
}

/// Body of `POST /folders` and `POST /bookmarks` responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallbackResponse {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestRequest {
    #[serde(rename = "descricao")]
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestResponse {
    pub suggestion: String,
}

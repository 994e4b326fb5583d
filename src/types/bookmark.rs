use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

/// A saved link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    /// Empty when the user gave none.
    pub description: String,
    pub owner_id: i64,
    pub folder_id: Option<i64>,
}

/// Editable fields of a bookmark form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Title,
    Url,
    Description,
}

impl DraftField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(DraftField::Title),
            "url" => Some(DraftField::Url),
            "description" => Some(DraftField::Description),
            _ => None,
        }
    }
}

/// Unsaved bookmark contents. Updates return a new draft instead of mutating.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub owner_id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub folder_id: Option<i64>,
}

impl BookmarkDraft {
    /// An empty draft owned by `owner_id`.
    pub fn new(owner_id: i64) -> Self {
        Self {
            owner_id,
            ..Self::default()
        }
    }

    /// Returns a copy of this draft with `field` set to `value`.
    pub fn with_field(&self, field: DraftField, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut next = self.clone();
        match field {
            DraftField::Title => next.title = value,
            DraftField::Url => next.url = value,
            DraftField::Description => next.description = value,
        }
        next
    }

    /// Returns a copy of this draft filed under `folder_id`.
    pub fn with_folder(&self, folder_id: Option<i64>) -> Self {
        Self {
            folder_id,
            ..self.clone()
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Url => &self.url,
            DraftField::Description => &self.description,
        }
    }

    /// Title and url must be present; description may be empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_link_fields(&self.title, &self.url)
    }

    pub fn to_patch(&self) -> BookmarkPatch {
        BookmarkPatch {
            title: self.title.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
        }
    }
}

/// Full replacement of a bookmark's editable fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub title: String,
    pub url: String,
    pub description: String,
}

impl BookmarkPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_link_fields(&self.title, &self.url)
    }
}

/// The bookmark edit form: the record being edited plus its pending contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkEdit {
    pub id: i64,
    pub draft: BookmarkDraft,
}

impl BookmarkEdit {
    pub fn for_bookmark(bookmark: &Bookmark) -> Self {
        Self {
            id: bookmark.id,
            draft: BookmarkDraft {
                owner_id: bookmark.owner_id,
                title: bookmark.title.clone(),
                url: bookmark.url.clone(),
                description: bookmark.description.clone(),
                folder_id: bookmark.folder_id,
            },
        }
    }

    pub fn with_field(&self, field: DraftField, value: impl Into<String>) -> Self {
        Self {
            id: self.id,
            draft: self.draft.with_field(field, value),
        }
    }
}

fn require_link_fields(title: &str, url: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required("title"));
    }
    if url.trim().is_empty() {
        return Err(ValidationError::Required("url"));
    }
    Ok(())
}

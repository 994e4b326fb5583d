use serde::{Deserialize, Serialize};

/// A named grouping of bookmarks owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Folder {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
}

/// The folder rename form: one at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderEdit {
    pub id: i64,
    pub name: String,
}

impl FolderEdit {
    pub fn for_folder(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name.clone(),
        }
    }

    /// Returns a copy with the name replaced.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            id: self.id,
            name: name.into(),
        }
    }
}

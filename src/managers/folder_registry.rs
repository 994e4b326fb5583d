//! Folder Registry for linkdeck.
//!
//! In-memory folder list of the current user plus the active folder filter.
//! Create refreshes the whole list from the backend so local ids always match
//! server ids; rename patches locally first and rolls back if the write
//! fails; delete removes locally only after the backend confirms.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::services::api_client::BackendApi;
use crate::types::api::{NewFolderRequest, RenameFolderRequest};
use crate::types::errors::{FolderError, ValidationError};
use crate::types::folder::Folder;

/// Trait defining folder registry operations.
#[allow(async_fn_in_trait)]
pub trait FolderRegistryTrait {
    async fn list(&mut self, user_id: i64) -> Result<&[Folder], FolderError>;
    async fn create(&mut self, user_id: i64, name: &str) -> Result<Folder, FolderError>;
    async fn rename(&mut self, folder_id: i64, new_name: &str) -> Result<(), FolderError>;
    async fn delete(&mut self, folder_id: i64) -> Result<(), FolderError>;
    fn select(&mut self, folder_id: Option<i64>);
    fn selected(&self) -> Option<i64>;
    fn folders(&self) -> &[Folder];
}

pub struct FolderRegistry<B> {
    api: Arc<B>,
    folders: Vec<Folder>,
    selected: Option<i64>,
}

impl<B: BackendApi> FolderRegistry<B> {
    pub fn new(api: Arc<B>) -> Self {
        Self {
            api,
            folders: Vec::new(),
            selected: None,
        }
    }

    pub fn get(&self, folder_id: i64) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == folder_id)
    }

    /// Drops the snapshot and the selection (logout).
    pub fn reset(&mut self) {
        self.folders.clear();
        self.selected = None;
    }

    /// Patches the local name and returns the previous one.
    fn patch_name(&mut self, folder_id: i64, name: &str) -> Option<String> {
        self.folders
            .iter_mut()
            .find(|f| f.id == folder_id)
            .map(|f| std::mem::replace(&mut f.name, name.to_string()))
    }
}

fn require_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required("name"));
    }
    Ok(trimmed)
}

impl<B: BackendApi> FolderRegistryTrait for FolderRegistry<B> {
    /// Replaces the snapshot with the backend's list. Last fetch wins.
    async fn list(&mut self, user_id: i64) -> Result<&[Folder], FolderError> {
        let records = self.api.list_folders(user_id).await.map_err(|e| {
            warn!(error = %e, user_id, "folder list failed");
            FolderError::from(e)
        })?;
        self.folders = records
            .into_iter()
            .map(|r| r.into_folder(user_id))
            .collect();
        debug!(count = self.folders.len(), "folders loaded");
        Ok(&self.folders)
    }

    /// Blank names are rejected before any request; success re-lists.
    async fn create(&mut self, user_id: i64, name: &str) -> Result<Folder, FolderError> {
        let name = require_name(name)?.to_string();

        let request = NewFolderRequest { name, user_id };
        let created = self.api.create_folder(&request).await.map_err(|e| {
            warn!(error = %e, "folder create failed");
            FolderError::from(e)
        })?;

        self.list(user_id).await?;
        Ok(self.get(created.id).cloned().unwrap_or(Folder {
            id: created.id,
            name: request.name,
            owner_id: user_id,
        }))
    }

    async fn rename(&mut self, folder_id: i64, new_name: &str) -> Result<(), FolderError> {
        let new_name = require_name(new_name)?.to_string();
        let previous = self
            .patch_name(folder_id, &new_name)
            .ok_or(FolderError::NotFound(folder_id))?;

        let request = RenameFolderRequest { name: new_name };
        if let Err(e) = self.api.rename_folder(folder_id, &request).await {
            warn!(error = %e, folder_id, "folder rename failed, restoring previous name");
            self.patch_name(folder_id, &previous);
            return Err(e.into());
        }
        Ok(())
    }

    /// Removes the folder once the backend confirms; clears the selection if
    /// it pointed at the deleted folder.
    async fn delete(&mut self, folder_id: i64) -> Result<(), FolderError> {
        self.api.delete_folder(folder_id).await.map_err(|e| {
            warn!(error = %e, folder_id, "folder delete failed");
            FolderError::from(e)
        })?;
        self.folders.retain(|f| f.id != folder_id);
        if self.selected == Some(folder_id) {
            self.selected = None;
        }
        Ok(())
    }

    fn select(&mut self, folder_id: Option<i64>) {
        self.selected = folder_id;
    }

    fn selected(&self) -> Option<i64> {
        self.selected
    }

    fn folders(&self) -> &[Folder] {
        &self.folders
    }
}

// linkdeck state managers
// Managers own the session identity, the folder list and the bookmark list.

pub mod bookmark_collection;
pub mod folder_registry;
pub mod session_store;

// linkdeck shared type definitions
// Each submodule defines types used across the application.

pub mod api;
pub mod bookmark;
pub mod errors;
pub mod folder;
pub mod session;
pub mod settings;
pub mod user;
pub mod view;

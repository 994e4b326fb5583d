//! linkdeck: a bookmark and folder client for a REST backend.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod dashboard;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;

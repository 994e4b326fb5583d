//! linkdeck database layer.
//!
//! Holds the durable session identity in SQLite. Folders and bookmarks are
//! never stored locally; they are rebuilt from the backend on every load.
//!
//! # Usage
//!
//! ```no_run
//! use linkdeck::database::Database;
//!
//! // Open a persistent database
//! let db = Database::open("linkdeck.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//!
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;

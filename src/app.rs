//! App Core for linkdeck.
//!
//! Central struct holding the session database, the settings engine and the
//! dashboard, managing application lifecycle.

use std::sync::Arc;

use tracing::{info, warn};

use crate::dashboard::Dashboard;
use crate::database::connection::Database;
use crate::services::api_client::BackendApi;
use crate::services::settings_engine::SettingsEngine;

/// Central application struct. `B` is the backend every manager talks to.
pub struct App<B: BackendApi> {
    pub db: Arc<Database>,
    pub settings_engine: SettingsEngine,
    pub dashboard: Dashboard<B>,
}

impl<B: BackendApi> App<B> {
    /// Opens the session database at `db_path` and wires the dashboard to `api`.
    pub fn new(
        db_path: &str,
        api: Arc<B>,
        settings_engine: SettingsEngine,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(db_path)?;
        Ok(Self::with_database(db, api, settings_engine))
    }

    /// Builds the app around an already opened database.
    pub fn with_database(db: Database, api: Arc<B>, settings_engine: SettingsEngine) -> Self {
        let db = Arc::new(db);
        let dashboard = Dashboard::new(db.clone(), api);
        Self {
            db,
            settings_engine,
            dashboard,
        }
    }

    /// Startup sequence: restore the stored session and load its folders and
    /// bookmarks. A failed load is logged; the app stays usable.
    pub async fn startup(&mut self) {
        match self.dashboard.mount().await {
            Ok(Some(user)) => info!(user_id = user.id, "resumed session"),
            Ok(None) => info!("no stored session"),
            Err(e) => warn!(error = %e, "startup load failed"),
        }
    }
}

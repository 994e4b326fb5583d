//! linkdeck RPC Server: JSON-RPC over stdin/stdout for a UI shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.add", "params":{}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Requests are handled one at a time, in arrival order.

use std::sync::Arc;

use linkdeck::app::App;
use linkdeck::logging;
use linkdeck::rpc_handler::handle_method;
use linkdeck::services::api_client::HttpBackend;
use linkdeck::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

async fn emit(stdout: &mut io::Stdout, message: &Value) -> io::Result<()> {
    let mut line = message.to_string();
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings_engine = SettingsEngine::new(None);
    let settings = match settings_engine.load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("linkdeck: {}; using defaults", e);
            settings_engine.get_settings().clone()
        }
    };
    logging::init(&settings.logging.level);

    let db_path = settings_engine.database_path();
    let backend = Arc::new(HttpBackend::new(&settings.api.base_url)?);
    info!(api = %backend.base_url(), db = %db_path.display(), "starting");

    let mut app = App::new(&db_path.to_string_lossy(), backend, settings_engine)?;
    app.startup().await;

    let mut stdout = io::stdout();
    emit(
        &mut stdout,
        &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}),
    )
    .await?;

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                emit(&mut stdout, &json!({"id": null, "error": format!("parse error: {}", e)})).await?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&mut app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                error!(method, error = %err, "request failed");
                json!({"id": id, "error": err})
            }
        };
        emit(&mut stdout, &response).await?;
    }

    info!("stdin closed, exiting");
    Ok(())
}

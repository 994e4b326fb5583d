//! RPC method handler for the linkdeck JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be tested against an in-process
//! backend. `handle_method` dispatches one call to the dashboard or the
//! settings engine of an `App`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::services::api_client::BackendApi;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::bookmark::DraftField;
use crate::types::session::OAuthGrant;
use crate::types::view::EntityKind;

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn id_param(params: &Value, name: &str) -> Result<i64, String> {
    params
        .get(name)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| format!("missing {}", name))
}

/// An absent or `null` id means "no folder".
fn optional_id_param(params: &Value, name: &str) -> Result<Option<i64>, String> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or_else(|| format!("invalid {}: expected an integer or null", name)),
    }
}

fn field_param(params: &Value) -> Result<DraftField, String> {
    let name = str_param(params, "field")?;
    DraftField::parse(name).ok_or_else(|| format!("unknown field: {}", name))
}

fn entity_of(method: &str) -> EntityKind {
    if method.starts_with("folder.") {
        EntityKind::Folder
    } else {
        EntityKind::Bookmark
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method<B: BackendApi>(
    app: &mut App<B>,
    method: &str,
    params: &Value,
) -> Result<Value, String> {
    let dash = &mut app.dashboard;
    match method {
        "ping" => Ok(json!({"pong": true})),
        "state" => to_json(dash.snapshot()),

        // ─── Session ───
        "session.restore" => {
            let user = dash.mount().await.map_err(|e| e.to_string())?;
            to_json(user)
        }
        "session.login" => {
            let name = str_param(params, "name")?;
            let user_id = id_param(params, "user_id")?;
            let user = dash.login_local(name, user_id).await.map_err(|e| e.to_string())?;
            to_json(user)
        }
        "session.login_credentials" => {
            let email = str_param(params, "email")?;
            let password = str_param(params, "password")?;
            let user = dash
                .login_with_credentials(email, password)
                .await
                .map_err(|e| e.to_string())?;
            to_json(user)
        }
        "session.register" => {
            let username = str_param(params, "username")?;
            let email = str_param(params, "email")?;
            let password = str_param(params, "password")?;
            dash.register(username, email, password)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "session.oauth" => {
            let grant = if let Ok(code) = str_param(params, "code") {
                OAuthGrant::Code(code.to_string())
            } else if let Ok(username) = str_param(params, "username") {
                OAuthGrant::Username(username.to_string())
            } else {
                return Err("missing code or username".to_string());
            };
            let user = dash.login_oauth(grant).await.map_err(|e| e.to_string())?;
            to_json(user)
        }
        "session.logout" => {
            dash.logout().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Folders ───
        "folder.list" => {
            dash.refresh_folders().await.map_err(|e| e.to_string())?;
            to_json(dash.folders())
        }
        "folder.create" => {
            let name = str_param(params, "name")?;
            let folder = dash.create_folder(name).await.map_err(|e| e.to_string())?;
            to_json(folder)
        }
        "folder.select" => {
            let id = optional_id_param(params, "id")?;
            dash.select_folder(id).await.map_err(|e| e.to_string())?;
            to_json(dash.visible_bookmarks())
        }
        "folder.edit.begin" => {
            let id = id_param(params, "id")?;
            let edit = dash.begin_folder_edit(id).map_err(|e| e.to_string())?;
            to_json(edit)
        }
        "folder.edit.update" => {
            let name = str_param(params, "name")?;
            dash.update_folder_edit(name).map_err(|e| e.to_string())?;
            to_json(dash.folder_edit())
        }
        "folder.edit.save" => {
            dash.save_folder_edit().await.map_err(|e| e.to_string())?;
            to_json(dash.folders())
        }
        "folder.edit.cancel" => {
            dash.cancel_folder_edit();
            Ok(json!({"ok": true}))
        }

        // ─── Bookmarks ───
        "bookmark.list" => {
            dash.refresh_bookmarks().await.map_err(|e| e.to_string())?;
            to_json(dash.visible_bookmarks())
        }
        "bookmark.search" => {
            let term = params.get("term").and_then(|v| v.as_str()).unwrap_or("");
            dash.set_search_term(term);
            to_json(dash.visible_bookmarks())
        }
        "bookmark.draft" => {
            let field = field_param(params)?;
            let value = str_param(params, "value")?;
            dash.update_new_bookmark(field, value);
            to_json(dash.new_bookmark())
        }
        "bookmark.add" => {
            let bookmark = dash.submit_new_bookmark().await.map_err(|e| e.to_string())?;
            to_json(bookmark)
        }
        "bookmark.edit.begin" => {
            let id = id_param(params, "id")?;
            let edit = dash.begin_bookmark_edit(id).map_err(|e| e.to_string())?;
            to_json(edit)
        }
        "bookmark.edit.update" => {
            let field = field_param(params)?;
            let value = str_param(params, "value")?;
            dash.update_bookmark_edit(field, value).map_err(|e| e.to_string())?;
            to_json(dash.bookmark_edit())
        }
        "bookmark.edit.save" => {
            dash.save_bookmark_edit().await.map_err(|e| e.to_string())?;
            to_json(dash.visible_bookmarks())
        }
        "bookmark.edit.cancel" => {
            dash.cancel_bookmark_edit();
            Ok(json!({"ok": true}))
        }
        "bookmark.suggest" => {
            let suggestion = dash.suggest_bookmark().await.map_err(|e| e.to_string())?;
            Ok(json!({"suggestion": suggestion}))
        }

        // ─── Delete confirmation ───
        "bookmark.delete.request" | "folder.delete.request" => {
            let id = id_param(params, "id")?;
            let kind = entity_of(method);
            dash.request_delete(kind, id).map_err(|e| e.to_string())?;
            to_json(dash.delete_state(kind))
        }
        "bookmark.delete.confirm" | "folder.delete.confirm" => {
            let kind = entity_of(method);
            dash.confirm_delete(kind).await.map_err(|e| e.to_string())?;
            to_json(dash.delete_state(kind))
        }
        "bookmark.delete.cancel" | "folder.delete.cancel" => {
            let kind = entity_of(method);
            dash.cancel_delete(kind);
            to_json(dash.delete_state(kind))
        }

        "alert.dismiss" => {
            dash.dismiss_alert();
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => to_json(app.settings_engine.get_settings()),
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

//! linkdeck: bookmark and folder client for the linkdeck REST backend.
//!
//! Entry point: runs a console demo of every dashboard operation against an
//! in-process backend and an in-memory session database. The `linkdeck-rpc`
//! binary is the real front end.

use std::error::Error;
use std::sync::Arc;

use linkdeck::app::App;
use linkdeck::database::connection::Database;
use linkdeck::logging;
use linkdeck::services::memory_backend::MemoryBackend;
use linkdeck::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use linkdeck::types::bookmark::DraftField;
use linkdeck::types::session::OAuthGrant;
use linkdeck::types::view::EntityKind;

type DemoApp = App<MemoryBackend>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init("warn");

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                linkdeck v{} (offline demo)                ║", env!("CARGO_PKG_VERSION"));
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let backend = Arc::new(MemoryBackend::new());
    let settings_path = std::env::temp_dir().join("linkdeck-demo-settings.json");
    let settings = SettingsEngine::new(Some(settings_path.to_string_lossy().to_string()));
    let mut app = App::with_database(Database::open_in_memory()?, backend.clone(), settings);

    demo_settings(&app);
    demo_database(&app)?;
    demo_session(&mut app, &backend).await?;
    demo_folders(&mut app).await?;
    demo_bookmarks(&mut app).await?;
    demo_deletes(&mut app).await?;
    demo_failures(&mut app, &backend).await?;

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ {} backend requests, all components demonstrated", backend.request_count());
    println!("═══════════════════════════════════════════════════════════════");
    Ok(())
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn demo_settings(app: &DemoApp) {
    section("Settings Engine");
    let settings = app.settings_engine.get_settings();
    println!("  API base URL: {}", settings.api.base_url);
    println!("  Log level: {}", settings.logging.level);
    println!("  Database: {}", app.settings_engine.database_path().display());
    println!();
}

fn demo_database(app: &DemoApp) -> Result<(), Box<dyn Error>> {
    section("Session Database");
    let conn = app.db.connection();
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")?;
    let tables: Vec<String> = stmt
        .query_map([], |row| row.get(0))?
        .filter_map(|r| r.ok())
        .collect();
    println!("  Created {} tables: {}", tables.len(), tables.join(", "));
    println!();
    Ok(())
}

async fn demo_session(app: &mut DemoApp, backend: &MemoryBackend) -> Result<(), Box<dyn Error>> {
    section("Session Store");
    let dash = &mut app.dashboard;

    println!("  Restored at startup: {:?}", dash.mount().await?);

    dash.register("ana", "ana@example.com", "secret").await?;
    let user = dash.login_with_credentials("ana@example.com", "secret").await?;
    println!("  Logged in with credentials: {} (id {})", user.display_name, user.id);

    dash.logout()?;
    println!("  Logged out, user = {:?}", dash.user());

    backend.add_user("octo", "octo@example.com", "");
    backend.add_oauth_code("demo-code", "octo");
    let octo = dash.login_oauth(OAuthGrant::Code("demo-code".into())).await?;
    println!("  OAuth login: {} -> id {}", octo.display_name, octo.id);

    dash.logout()?;
    let user = dash.login_local("ana", user.id).await?;
    println!("  Local login as {} (id {})", user.display_name, user.id);
    println!();
    Ok(())
}

async fn demo_folders(app: &mut DemoApp) -> Result<(), Box<dyn Error>> {
    section("Folder Registry");
    let dash = &mut app.dashboard;

    let reading = dash.create_folder("Reading").await?;
    dash.create_folder("Tools").await?;
    println!("  Created folders: {:?}", names(dash.folders().iter().map(|f| &f.name)));

    dash.begin_folder_edit(reading.id)?;
    dash.update_folder_edit("Reading list")?;
    dash.save_folder_edit().await?;
    println!("  Renamed folder {} -> {:?}", reading.id, dash.folders()[0].name);

    match dash.create_folder("   ").await {
        Err(e) => println!("  Blank folder name rejected: {}", e),
        Ok(_) => println!("  ✗ blank folder name accepted"),
    }

    dash.select_folder(Some(reading.id)).await?;
    println!("  Selected folder {:?}", dash.selected_folder());
    println!();
    Ok(())
}

async fn demo_bookmarks(app: &mut DemoApp) -> Result<(), Box<dyn Error>> {
    section("Bookmark Collection");
    let dash = &mut app.dashboard;

    for (title, url, description) in [
        ("The Rust Book", "https://doc.rust-lang.org/book/", "learning rust"),
        ("Tokio", "https://tokio.rs", "async runtime"),
    ] {
        dash.update_new_bookmark(DraftField::Title, title);
        dash.update_new_bookmark(DraftField::Url, url);
        dash.update_new_bookmark(DraftField::Description, description);
        let bookmark = dash.submit_new_bookmark().await?;
        println!("  Added #{} {} (folder {:?})", bookmark.id, bookmark.title, bookmark.folder_id);
    }

    dash.set_search_term("RUST");
    println!("  Search 'RUST': {:?}", names(dash.visible_bookmarks().iter().map(|b| &b.title)));
    dash.set_search_term("");

    let first = dash.bookmarks()[0].id;
    dash.begin_bookmark_edit(first)?;
    dash.update_bookmark_edit(DraftField::Title, "Tokio runtime")?;
    dash.save_bookmark_edit().await?;
    println!("  Edited #{} -> {}", first, dash.bookmarks()[0].title);

    println!("  Suggestion: {}", dash.suggest_bookmark().await?);
    println!();
    Ok(())
}

async fn demo_deletes(app: &mut DemoApp) -> Result<(), Box<dyn Error>> {
    section("Delete Confirmation");
    let dash = &mut app.dashboard;

    let target = dash.bookmarks()[0].id;
    dash.request_delete(EntityKind::Bookmark, target)?;
    println!("  Requested: {:?}", dash.delete_state(EntityKind::Bookmark));
    dash.cancel_delete(EntityKind::Bookmark);
    println!("  Cancelled: {:?}", dash.delete_state(EntityKind::Bookmark));

    dash.request_delete(EntityKind::Bookmark, target)?;
    dash.confirm_delete(EntityKind::Bookmark).await?;
    println!("  Deleted bookmark #{}, {} left", target, dash.bookmarks().len());

    let folder = dash.selected_folder().ok_or("no folder selected")?;
    dash.request_delete(EntityKind::Folder, folder)?;
    dash.confirm_delete(EntityKind::Folder).await?;
    println!(
        "  Deleted selected folder #{}, selection now {:?}, {} bookmarks visible",
        folder,
        dash.selected_folder(),
        dash.visible_bookmarks().len()
    );
    println!();
    Ok(())
}

async fn demo_failures(app: &mut DemoApp, backend: &MemoryBackend) -> Result<(), Box<dyn Error>> {
    section("Failure Handling");
    let dash = &mut app.dashboard;

    dash.update_new_bookmark(DraftField::Title, "No URL");
    if let Err(e) = dash.submit_new_bookmark().await {
        println!("  Validation: {}", e);
    }

    backend.set_offline(true);
    let folder = dash.folders()[0].clone();
    dash.begin_folder_edit(folder.id)?;
    dash.update_folder_edit("Offline rename")?;
    if let Err(e) = dash.save_folder_edit().await {
        println!("  Rename while offline: {}", e);
    }
    println!("  Name rolled back to {:?}", dash.folders()[0].name);
    dash.cancel_folder_edit();
    backend.set_offline(false);

    println!("  Busy flags after failures: {:?}", dash.busy());
    println!("  Snapshot: {}", serde_json::to_string(&dash.snapshot())?);
    Ok(())
}

fn names<'a>(items: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    items.map(String::as_str).collect()
}

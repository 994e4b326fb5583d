// linkdeck platform paths
//
// Config holds `settings.json`; data holds the session database.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "linkdeck";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory for linkdeck.
///
/// - **Linux**: `$XDG_CONFIG_HOME/linkdeck`, else `~/.config/linkdeck`
/// - **macOS**: `~/Library/Application Support/linkdeck`
/// - **Windows**: `%APPDATA%/linkdeck`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join(APP_DIR)
    }
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join(APP_DIR)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR)
    }
}

/// Returns the data directory for linkdeck.
///
/// - **Linux**: `$XDG_DATA_HOME/linkdeck`, else `~/.local/share/linkdeck`
/// - **macOS**: same as the config directory
/// - **Windows**: `%APPDATA%/linkdeck/data`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join(APP_DIR).join("data")
    }
    #[cfg(target_os = "macos")]
    {
        get_config_dir()
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"]).join(APP_DIR)
    }
}

#[cfg(target_os = "windows")]
fn appdata_dir() -> PathBuf {
    env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => fallback.iter().fold(home_dir(), |path, part| path.join(part)),
    }
}

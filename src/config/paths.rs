//! Cross-platform directory path resolution
//!
//! - Linux/macOS: XDG Base Directory specification (~/.config)
//! - Windows: Known Folder API (AppData\Roaming)

use std::path::PathBuf;

const APP_DIR: &str = "mesh-topology";

/// Environment variable replacing the whole configuration directory
const CONFIG_DIR_ENV: &str = "MESH_TOPOLOGY_CONFIG_DIR";

/// Get the configuration directory path
///
/// `MESH_TOPOLOGY_CONFIG_DIR` wins when set, otherwise:
/// - Unix (Linux/macOS): XDG_CONFIG_HOME/mesh-topology or ~/.config/mesh-topology
/// - Windows: %APPDATA%\mesh-topology\config
pub fn config_dir() -> PathBuf {
    resolve_config_dir(
        std::env::var(CONFIG_DIR_ENV).ok(),
        std::env::var("XDG_CONFIG_HOME").ok(),
    )
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

fn resolve_config_dir(explicit: Option<String>, xdg_config_home: Option<String>) -> PathBuf {
    match explicit.filter(|dir| !dir.trim().is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => platform_config_dir(xdg_config_home),
    }
}

#[cfg(windows)]
fn platform_config_dir(_xdg_config_home: Option<String>) -> PathBuf {
    // %APPDATA%\mesh-topology\config
    directories::ProjectDirs::from("", "", APP_DIR)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".config").join(APP_DIR))
}

#[cfg(not(windows))]
fn platform_config_dir(xdg_config_home: Option<String>) -> PathBuf {
    // An empty XDG_CONFIG_HOME counts as unset
    let base = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join(APP_DIR)
}

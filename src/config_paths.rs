//! Where inline-edit keeps its files
//!
//! ```text
//! $XDG_CONFIG_HOME/inline-edit/      (or ~/.config/inline-edit/, %APPDATA%\inline-edit\)
//! ├── config.yaml                    user defaults, see `InlineEditConfig`
//! └── logs/inline-edit.log.YYYY-MM-DD
//! ```

use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "inline-edit";

/// File name prefix of the daily rolling log
pub const LOG_FILE_PREFIX: &str = "inline-edit.log";

/// Root of everything inline-edit stores, `None` when no home directory is known
pub fn config_dir() -> Option<PathBuf> {
    platform_config_root().map(|root| root.join(APP_DIR))
}

#[cfg(target_os = "windows")]
fn platform_config_root() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(not(target_os = "windows"))]
fn platform_config_root() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory (and its parents) if missing
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create directory {}: {}", logs.display(), e))?;
    Ok(logs)
}

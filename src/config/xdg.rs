//! Platform-aware path resolution for bento.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/bento` or `~/.config/bento`
//! - Data (snapshot): `$XDG_DATA_HOME/bento` or `~/.local/share/bento`
//!
//! On **macOS**, uses Apple conventions with XDG env var overrides:
//! - Config: `$XDG_CONFIG_HOME/bento` or `~/Library/Application Support/bento`
//! - Data: `$XDG_DATA_HOME/bento` or `~/Library/Application Support/bento`

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::schema::StorageConfig;

const APP_NAME: &str = "bento";

/// File name of the page snapshot inside [`data_dir`].
pub const SNAPSHOT_FILE_NAME: &str = "bento.json";

/// Returns the configuration directory for bento.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/bento` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.config/bento`
///    - macOS: `~/Library/Application Support/bento`
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join(APP_NAME));
    }
    Ok(platform_config_dir()?.join(APP_NAME))
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> Result<PathBuf, ConfigError> {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().ok_or(ConfigError::NoHomeDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        Ok(home_dir()?.join(".config"))
    }
}

/// Returns the path to the main configuration file.
///
/// Resolves to `config_dir()/config.toml`.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Returns the data directory holding the page snapshot.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/bento` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.local/share/bento`
///    - macOS: `~/Library/Application Support/bento`
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return Ok(PathBuf::from(xdg).join(APP_NAME));
    }
    Ok(platform_data_dir()?.join(APP_NAME))
}

/// Platform-native data base directory (without XDG override).
fn platform_data_dir() -> Result<PathBuf, ConfigError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir().ok_or(ConfigError::NoHomeDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        Ok(home_dir()?.join(".local/share"))
    }
}

/// Resolves the snapshot file from the `[storage]` section.
///
/// An empty `snapshot_path` selects `data_dir()/bento.json`.
pub fn snapshot_path(storage: &StorageConfig) -> Result<PathBuf, ConfigError> {
    if storage.snapshot_path.is_empty() {
        Ok(data_dir()?.join(SNAPSHOT_FILE_NAME))
    } else {
        Ok(expand_tilde(&storage.snapshot_path))
    }
}

fn home_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::NoHomeDir)
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, or no home directory is known, it is
/// returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };
    if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else if path == "~" {
        home
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
///
/// Equivalent to `mkdir -p` with restricted permissions.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

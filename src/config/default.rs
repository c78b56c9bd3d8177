//! Default settings template and file creation.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! writes it to the XDG config path for `bento config init`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Bento Configuration
#
# This file was generated with default values.
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/bento/config.toml

# ==============================================================================
# Storage
# ==============================================================================

[storage]

# Path of the JSON page snapshot.
# Empty string means $XDG_DATA_HOME/bento/bento.json.
# Tilde (~) is expanded to the user's home directory.
snapshot_path = ""

# ==============================================================================
# Layout
# ==============================================================================

[layout]

# Rows scanned when looking for a free slot for a new block.
# Past this limit the block is stacked under the lowest existing block.
scan_row_limit = 100

# Maximum relaxation passes when packing blocks upward.
# If the layout has not settled by then, packing stops and a warning is logged.
max_compaction_passes = 100

# Pack remaining blocks upward after a block is deleted.
compact_on_delete = true

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Logging verbosity level. BENTO_LOG overrides this when set.
# Options: "error", "warn", "info", "debug", "trace"
level = "info"
"#;

// ---------------------------------------------------------------------------
// File creation
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default settings file at the XDG path.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the file was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path()?;
    write_template(&path, force)?;
    Ok(path)
}

/// Writes the template to `path`, honouring `force` as described above.
fn write_template(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(|e| ConfigError::WriteError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
            ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
    }

    tracing::info!("Wrote default configuration to {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

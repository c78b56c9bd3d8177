//! TOML settings schema for the bento editor.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so an empty or partial file is always valid.

use serde::{Deserialize, Serialize};

use bento_grid::{DEFAULT_MAX_COMPACTION_PASSES, DEFAULT_SCAN_ROW_LIMIT};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root settings encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [storage]
/// [layout]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where the page snapshot lives.
    pub storage: StorageConfig,
    /// Layout engine caps and compaction policy.
    pub layout: LayoutConfig,
    /// Log verbosity.
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Snapshot location.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON snapshot. Empty string means the platform data
    /// directory (`$XDG_DATA_HOME/bento/bento.json`). A leading `~` is
    /// expanded.
    pub snapshot_path: String,
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Layout engine settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Rows scanned for a free slot before a new block is stacked at the bottom.
    pub scan_row_limit: u32,
    /// Relaxation passes before compaction gives up on a fixed point.
    pub max_compaction_passes: u32,
    /// Repack blocks upward after every deletion.
    pub compact_on_delete: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scan_row_limit: DEFAULT_SCAN_ROW_LIMIT,
            max_compaction_passes: DEFAULT_MAX_COMPACTION_PASSES,
            compact_on_delete: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging settings. `BENTO_LOG` overrides `level` when set.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default verbosity.
    pub level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

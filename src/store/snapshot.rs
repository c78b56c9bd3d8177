//! Snapshot persistence and JSON import/export.
//!
//! The snapshot is a single pretty-printed JSON `BentoConfig`. Writes go
//! through a temp file in the same directory, are fsynced, then renamed over
//! the target so a crash never leaves a half-written snapshot.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Deserialize;

use super::{check_rows, BentoStore, StoreError};
use crate::config::schema::LayoutConfig;
use crate::model::{timestamp_now, BentoConfig, Block, Grid, Metadata, Profile, Theme};

/// Top-level shape accepted by import. Every section is optional here so
/// missing ones can be reported by name.
#[derive(Deserialize)]
struct RawConfig {
    metadata: Option<Metadata>,
    theme: Option<Theme>,
    grid: Option<Grid>,
    profile: Option<Profile>,
    blocks: Option<Vec<Block>>,
}

/// Parses a page configuration from JSON.
///
/// `metadata`, `theme`, `grid` and `blocks` are required. A missing or null
/// `profile` is filled with the default profile, which is how snapshots
/// written before profiles existed are migrated.
///
/// # Errors
///
/// * `StoreError::Parse` - Malformed JSON or wrongly typed fields.
/// * `StoreError::MissingSection` - A required section is absent.
/// * `StoreError::Layout` - The grid has zero columns.
/// * `StoreError::DuplicateBlockId` - Two blocks share an id.
/// * `StoreError::RowLimit` / `StoreError::OutOfBounds` - A block's edges
///   overflow or reach past [`bento_grid::MAX_ROWS`].
///
/// Overlapping blocks and blocks wider than the grid are accepted and only
/// logged, so pages saved by a looser editor still open.
pub fn parse_config(json: &str) -> Result<BentoConfig, StoreError> {
    let raw: RawConfig =
        serde_json::from_str(json).map_err(|e| StoreError::Parse(e.to_string()))?;

    let config = BentoConfig {
        metadata: raw.metadata.ok_or(StoreError::MissingSection("metadata"))?,
        theme: raw.theme.ok_or(StoreError::MissingSection("theme"))?,
        grid: raw.grid.ok_or(StoreError::MissingSection("grid"))?,
        profile: raw.profile.unwrap_or_default(),
        blocks: raw.blocks.ok_or(StoreError::MissingSection("blocks"))?,
    };
    if config.grid.columns == 0 {
        return Err(bento_grid::LayoutError::InvalidColumns.into());
    }
    check_blocks(&config)?;
    Ok(config)
}

/// Rejects shared ids and geometry the engine cannot address.
fn check_blocks(config: &BentoConfig) -> Result<(), StoreError> {
    let mut ids = HashSet::new();
    for block in &config.blocks {
        if !ids.insert(block.id.as_str()) {
            return Err(StoreError::DuplicateBlockId(block.id.clone()));
        }
        if block.position.x.checked_add(block.size.width).is_none() {
            return Err(StoreError::OutOfBounds {
                x: block.position.x,
                width: block.size.width,
                columns: config.grid.columns,
            });
        }
        check_rows(block.rect())?;
    }
    Ok(())
}

impl BentoStore {
    /// Opens the store backed by the snapshot at `path`.
    ///
    /// - Missing file: starts from the default page.
    /// - Unparseable file: logs the error and starts from the default page.
    ///   The file stays untouched until the first [`save`](Self::save), which
    ///   moves it aside to `<name>.corrupt` before writing.
    ///
    /// # Errors
    ///
    /// * `StoreError::Read` - The file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>, layout: LayoutConfig) -> Result<Self, StoreError> {
        let path = path.into();
        let mut corrupt = false;
        let config = match fs::read_to_string(&path) {
            Ok(content) => match parse_config(&content) {
                Ok(config) => {
                    tracing::debug!(
                        "Loaded {} blocks from {}",
                        config.blocks.len(),
                        path.display()
                    );
                    config
                }
                Err(e) => {
                    tracing::error!("Failed to load snapshot {}: {}", path.display(), e);
                    corrupt = true;
                    BentoConfig::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No snapshot at {}, starting fresh", path.display());
                BentoConfig::default()
            }
            Err(e) => return Err(StoreError::Read { path, source: e }),
        };

        let mut store = Self::with_config(config, layout);
        store.snapshot_path = Some(path);
        store.corrupt_snapshot = corrupt;
        store.warn_layout_issues();
        Ok(store)
    }

    /// Writes the page to the snapshot file, stamping `metadata.updatedAt`.
    ///
    /// Creates missing parent directories.
    ///
    /// # Errors
    ///
    /// * `StoreError::NoSnapshotPath` - The store is in-memory only.
    /// * `StoreError::Write` - The temp file could not be written or synced.
    /// * `StoreError::WriteAtomic` - The final rename failed; the temp file is
    ///   kept as a safety copy.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let path = self
            .snapshot_path
            .clone()
            .ok_or(StoreError::NoSnapshotPath)?;
        if self.corrupt_snapshot {
            set_aside_corrupt(&path);
            self.corrupt_snapshot = false;
        }
        self.config.metadata.updated_at = timestamp_now();
        let json = self.export_config()?;
        write_atomic(&path, &json)?;
        tracing::debug!("Saved snapshot to {}", path.display());
        Ok(())
    }

    /// Serializes the page as pretty-printed JSON.
    pub fn export_config(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(&self.config).map_err(|e| StoreError::Serialize(e.to_string()))
    }

    /// Replaces the page with one parsed from JSON and clears the selection.
    ///
    /// On error the current page is left untouched.
    ///
    /// # Errors
    ///
    /// See [`parse_config`].
    pub fn import_config(&mut self, json: &str) -> Result<(), StoreError> {
        let config = parse_config(json)?;
        tracing::info!("Imported configuration with {} blocks", config.blocks.len());
        self.config = config;
        self.selected_block_id = None;
        self.warn_layout_issues();
        Ok(())
    }

    /// Replaces the page with defaults and fresh timestamps; clears the selection.
    pub fn reset_config(&mut self) {
        self.config = BentoConfig::default();
        self.selected_block_id = None;
        tracing::info!("Reset configuration to defaults");
    }
}

/// Writes `content` to `path` through a timestamped temp file and a rename.
fn write_atomic(path: &Path, content: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bento.json".to_string());
    let timestamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let temp_path = path.with_file_name(format!("{}.tmp.{}", file_name, timestamp));

    fs::write(&temp_path, content).map_err(|e| StoreError::Write {
        path: temp_path.clone(),
        source: e,
    })?;

    let file = fs::File::open(&temp_path).map_err(|e| StoreError::Write {
        path: temp_path.clone(),
        source: e,
    })?;
    file.sync_all().map_err(|e| StoreError::Write {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|_| StoreError::WriteAtomic {
        path: path.to_path_buf(),
        temp_path: temp_path.clone(),
    })?;

    Ok(())
}

/// Renames an unreadable snapshot so the next save does not destroy it.
fn set_aside_corrupt(path: &Path) {
    let backup = path.with_extension("json.corrupt");
    match fs::rename(path, &backup) {
        Ok(()) => tracing::warn!("Moved unreadable snapshot to {}", backup.display()),
        Err(e) => tracing::warn!(
            "Could not move unreadable snapshot {} aside: {}",
            path.display(),
            e
        ),
    }
}

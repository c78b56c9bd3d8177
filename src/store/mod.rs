//! Page configuration store.
//!
//! [`BentoStore`] owns one [`BentoConfig`] plus the editor's selection, and is
//! the only place that calls into the layout engine. It is an ordinary owned
//! value: open it from a snapshot, mutate it, then [`save`](BentoStore::save)
//! it explicitly. Nothing is persisted behind the caller's back.
//!
//! Operations are split by concern:
//! - `blocks`: add, update, delete, duplicate, reorder, move, compact
//! - `sections`: theme, grid, profile and metadata updates
//! - `snapshot`: load, save, import, export, reset

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bento_grid::{GridLayout, Rect, MAX_ROWS};

use crate::config::schema::LayoutConfig;
use crate::model::{BentoConfig, Block, BlockId};

#[cfg(test)]
mod tests;

mod blocks;
mod error;
mod sections;
mod snapshot;

pub use error::StoreError;
pub use snapshot::parse_config;

/// Editable page state backed by an optional JSON snapshot file.
#[derive(Debug, Clone)]
pub struct BentoStore {
    /// The page being edited.
    config: BentoConfig,
    /// Currently selected block. Never persisted.
    selected_block_id: Option<BlockId>,
    /// Engine caps and compaction policy.
    layout: LayoutConfig,
    /// Where `save` writes. `None` for purely in-memory stores.
    snapshot_path: Option<PathBuf>,
    /// The snapshot on disk could not be parsed; move it aside before the
    /// first save overwrites it.
    corrupt_snapshot: bool,
}

impl BentoStore {
    /// Creates an in-memory store holding the default page.
    pub fn new(layout: LayoutConfig) -> Self {
        Self::with_config(BentoConfig::default(), layout)
    }

    /// Creates an in-memory store around an existing page.
    pub fn with_config(config: BentoConfig, layout: LayoutConfig) -> Self {
        Self {
            config,
            selected_block_id: None,
            layout,
            snapshot_path: None,
            corrupt_snapshot: false,
        }
    }

    /// The page being edited.
    pub fn config(&self) -> &BentoConfig {
        &self.config
    }

    /// All blocks in display order.
    pub fn blocks(&self) -> &[Block] {
        &self.config.blocks
    }

    /// Looks up a block by id.
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.config.block(id)
    }

    /// Snapshot file backing this store, if any.
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Engine settings in use.
    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Selects a block, or clears the selection with `None`.
    pub fn select_block(&mut self, id: Option<BlockId>) {
        self.selected_block_id = id;
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected_block_id = None;
    }

    /// Id of the selected block.
    pub fn selected_block_id(&self) -> Option<&str> {
        self.selected_block_id.as_deref()
    }

    /// The selected block, if the selection still points at one.
    pub fn selected_block(&self) -> Option<&Block> {
        self.selected_block_id
            .as_deref()
            .and_then(|id| self.config.block(id))
    }

    // -----------------------------------------------------------------------
    // Engine plumbing
    // -----------------------------------------------------------------------

    /// Builds the engine for the current grid width.
    pub(crate) fn grid_layout(&self) -> Result<GridLayout, StoreError> {
        Ok(GridLayout::new(self.config.grid.columns)?
            .with_scan_row_limit(self.layout.scan_row_limit)
            .with_max_compaction_passes(self.layout.max_compaction_passes))
    }

    /// Rectangles of every block, in display order.
    pub(crate) fn rects(&self) -> Vec<Rect> {
        self.config.blocks.iter().map(Block::rect).collect()
    }

    /// Rectangles of every block keyed by id.
    pub(crate) fn keyed_rects(&self) -> BTreeMap<BlockId, Rect> {
        self.config
            .blocks
            .iter()
            .map(|b| (b.id.clone(), b.rect()))
            .collect()
    }

    /// Logs every layout problem in the current page.
    pub(crate) fn warn_layout_issues(&self) {
        let Ok(grid) = self.grid_layout() else {
            tracing::warn!("Grid has zero columns, skipping layout validation");
            return;
        };
        for issue in grid.validate(&self.keyed_rects()) {
            tracing::warn!("Layout issue: {:?}", issue);
        }
    }
}

/// Rejects rectangles whose bottom edge overflows or passes [`MAX_ROWS`].
pub(crate) fn check_rows(rect: Rect) -> Result<(), StoreError> {
    match rect.position.y.checked_add(rect.size.height) {
        Some(bottom) if bottom <= MAX_ROWS => Ok(()),
        _ => Err(StoreError::RowLimit {
            y: rect.position.y,
            height: rect.size.height,
            limit: MAX_ROWS,
        }),
    }
}

impl Default for BentoStore {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

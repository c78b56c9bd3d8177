//! Error types for store operations.

use std::path::PathBuf;

use bento_grid::LayoutError;
use thiserror::Error;

use crate::model::BlockId;

/// Errors returned by [`BentoStore`](super::BentoStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No block with this id exists.
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    /// The layout engine rejected the input (bad size, zero columns).
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// A block would extend past the last grid column.
    #[error("Block at column {x} with width {width} does not fit a {columns}-column grid")]
    OutOfBounds {
        /// Requested column.
        x: u32,
        /// Block width.
        width: u32,
        /// Grid column count.
        columns: u32,
    },

    /// A block reaches past the last row the editor supports.
    #[error("Block at row {y} with height {height} extends past the {limit}-row limit")]
    RowLimit {
        /// Requested row.
        y: u32,
        /// Block height.
        height: u32,
        /// Exclusive bottom edge, see [`bento_grid::MAX_ROWS`].
        limit: u32,
    },

    /// Two blocks in a page share an id.
    #[error("Duplicate block id: {0}")]
    DuplicateBlockId(BlockId),

    /// A reorder request is not a permutation of the current blocks.
    #[error("Block order must list every existing block exactly once")]
    InvalidOrder,

    /// The snapshot file could not be read.
    #[error("Failed to read snapshot: {path}")]
    Read {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file or its temp copy could not be written.
    #[error("Failed to write snapshot: {path}")]
    Write {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The final rename of an atomic write failed.
    #[error("Failed to write snapshot atomically: {path} - Safety copy at: {temp_path}")]
    WriteAtomic {
        /// Snapshot path.
        path: PathBuf,
        /// Temp file left behind with the new content.
        temp_path: PathBuf,
    },

    /// The JSON could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// The JSON parsed but lacks a required section.
    #[error("Invalid configuration: missing `{0}` section")]
    MissingSection(&'static str),

    /// The configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// `save` was called on a store without a snapshot path.
    #[error("No snapshot path configured for this store")]
    NoSnapshotPath,
}

//! Auto-placement and compaction of rectangular blocks on a fixed-column grid
//!
//! This crate is the layout engine behind the bento page editor. It knows
//! nothing about block content: callers hand it rectangles keyed by whatever
//! identifier they use and read back positions.
//!
//! Two operations matter:
//!
//! - [`GridLayout::find_first_available_position`] picks the top-left-most
//!   free slot for a new block.
//! - [`GridLayout::compact_up`] pulls every block upward to close vertical
//!   gaps, for example after a deletion.
//!
//! Both are synchronous, allocation-light and hold no state between calls.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//! use bento_grid::{GridLayout, Position, Rect, Size};
//!
//! let grid = GridLayout::new(4)?;
//!
//! let placed = [Rect::from_xywh(0, 0, 2, 1)];
//! let slot = grid.find_first_available_position(&placed, Size::new(2, 1))?;
//! assert_eq!(slot, Position::new(2, 0));
//!
//! let mut blocks = BTreeMap::from([("left", Rect::from_xywh(0, 3, 2, 1))]);
//! grid.compact_up(&mut blocks);
//! assert_eq!(blocks["left"].position, Position::new(0, 0));
//! # Ok::<(), bento_grid::LayoutError>(())
//! ```

#![warn(missing_docs)]

mod engine;
mod error;
mod geometry;

pub use engine::{
    Compaction, GridLayout, LayoutIssue, Move, DEFAULT_MAX_COMPACTION_PASSES,
    DEFAULT_SCAN_ROW_LIMIT, MAX_ROWS,
};
pub use error::{LayoutError, Result};
pub use geometry::{Position, Rect, Size};

//! Placement and compaction over a fixed-column, unbounded-row grid.
//!
//! [`GridLayout`] carries the grid width and the two iteration caps that keep
//! both operations bounded on pathological input:
//!
//! - `scan_row_limit`: how many rows [`GridLayout::find_first_available_position`]
//!   scans before falling back to stacking below everything.
//! - `max_compaction_passes`: how many relaxation passes
//!   [`GridLayout::compact_up`] runs before giving up on reaching a fixed point.
//!
//! Compaction is a greedy relaxation. It is deterministic and idempotent, but a
//! different processing order could in principle pack tighter; the result is
//! not a global optimum.

use std::collections::{BTreeMap, HashSet};

use crate::error::{LayoutError, Result};
use crate::geometry::{Position, Rect, Size};

/// Rows scanned for a free slot before falling back to the bottom.
pub const DEFAULT_SCAN_ROW_LIMIT: u32 = 100;

/// Relaxation passes before compaction stops without a fixed point.
pub const DEFAULT_MAX_COMPACTION_PASSES: u32 = 100;

/// Exclusive bottom edge for blocks accepted from outside the engine.
///
/// The engine itself accepts any coordinates; callers that load layouts from
/// disk use this to refuse rows no editor would produce.
pub const MAX_ROWS: u32 = 10_000;

/// Grid width plus iteration caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    columns: u32,
    scan_row_limit: u32,
    max_compaction_passes: u32,
}

/// One upward move performed during compaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move<K> {
    /// Key of the moved block.
    pub key: K,
    /// Row before the move.
    pub from_y: u32,
    /// Row after the move.
    pub to_y: u32,
}

/// Outcome of [`GridLayout::compact_up`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compaction<K> {
    /// Passes executed, including the final pass that found nothing to move.
    pub passes: u32,
    /// `false` when the pass cap was hit while blocks were still moving.
    pub converged: bool,
    /// Every move in the order it happened. A block may appear more than once.
    pub moves: Vec<Move<K>>,
}

impl<K> Compaction<K> {
    /// Returns `true` if at least one block moved.
    pub fn changed(&self) -> bool {
        !self.moves.is_empty()
    }
}

/// A problem found by [`GridLayout::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutIssue<K> {
    /// The block has a zero width or height.
    EmptySize {
        /// Offending block.
        key: K,
    },
    /// The block extends past the last column.
    OutOfBounds {
        /// Offending block.
        key: K,
        /// Its rectangle.
        rect: Rect,
    },
    /// Two blocks cover at least one common cell.
    Overlap {
        /// Lower key of the pair.
        first: K,
        /// Higher key of the pair.
        second: K,
    },
}

impl GridLayout {
    /// Creates a layout for a grid of `columns` columns with default caps.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidColumns` if `columns` is zero.
    pub fn new(columns: u32) -> Result<Self> {
        if columns == 0 {
            return Err(LayoutError::InvalidColumns);
        }
        Ok(Self {
            columns,
            scan_row_limit: DEFAULT_SCAN_ROW_LIMIT,
            max_compaction_passes: DEFAULT_MAX_COMPACTION_PASSES,
        })
    }

    /// Overrides the number of rows scanned by placement.
    pub fn with_scan_row_limit(mut self, rows: u32) -> Self {
        self.scan_row_limit = rows;
        self
    }

    /// Overrides the compaction pass cap.
    pub fn with_max_compaction_passes(mut self, passes: u32) -> Self {
        self.max_compaction_passes = passes;
        self
    }

    /// Grid column count.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Rows scanned by placement.
    pub fn scan_row_limit(&self) -> u32 {
        self.scan_row_limit
    }

    /// Compaction pass cap.
    pub fn max_compaction_passes(&self) -> u32 {
        self.max_compaction_passes
    }

    /// Checks that a block of `size` can exist on this grid.
    ///
    /// # Errors
    ///
    /// - `LayoutError::InvalidSize` if either dimension is zero.
    /// - `LayoutError::TooWide` if `size.width` exceeds the column count.
    pub fn check_size(&self, size: Size) -> Result<()> {
        if size.is_empty() {
            return Err(LayoutError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }
        if size.width > self.columns {
            return Err(LayoutError::TooWide {
                width: size.width,
                columns: self.columns,
            });
        }
        Ok(())
    }

    /// Finds the top-left-most free slot for a block of `size`.
    ///
    /// Candidates are scanned row-major: every column of row 0, then row 1,
    /// and so on up to `scan_row_limit`. The first candidate whose cells are
    /// all unoccupied wins. If none is free, the block goes to column 0 just
    /// below the lowest existing block.
    ///
    /// The returned rectangle never overlaps any of `placed` and stays within
    /// the grid's columns.
    ///
    /// # Errors
    ///
    /// See [`GridLayout::check_size`].
    pub fn find_first_available_position(&self, placed: &[Rect], size: Size) -> Result<Position> {
        self.check_size(size)?;

        // Only cells a candidate can touch matter, which keeps tall blocks cheap.
        let window = Rect::from_xywh(
            0,
            0,
            self.columns,
            self.scan_row_limit.saturating_add(size.height),
        );
        let occupied: HashSet<(u32, u32)> = placed
            .iter()
            .filter_map(|rect| rect.intersection(&window))
            .flat_map(|rect| rect.cells())
            .collect();
        let last_col = self.columns - size.width;

        for row in 0..self.scan_row_limit {
            for col in 0..=last_col {
                let candidate = Rect::new(Position::new(col, row), size);
                if candidate.cells().all(|cell| !occupied.contains(&cell)) {
                    log::debug!(
                        "Placing {}x{} block at ({col}, {row})",
                        size.width,
                        size.height
                    );
                    return Ok(candidate.position);
                }
            }
        }

        let max_bottom = placed.iter().map(Rect::bottom).max().unwrap_or(0);
        log::warn!(
            "No free {}x{} slot in the first {} rows, stacking at row {max_bottom}",
            size.width,
            size.height,
            self.scan_row_limit
        );
        Ok(Position::new(0, max_bottom))
    }

    /// Moves every block as far up as it can go without overlapping another.
    ///
    /// Columns and sizes are never changed. Each pass visits blocks top to
    /// bottom, then left to right (ties broken by key), and drops each one to
    /// the lowest row index in `0..y` where it collides with no other block's
    /// current rectangle. Passes repeat until nothing moves or the pass cap is
    /// reached; hitting the cap is logged and reported, not treated as an error.
    pub fn compact_up<K>(&self, blocks: &mut BTreeMap<K, Rect>) -> Compaction<K>
    where
        K: Ord + Clone,
    {
        let mut moves = Vec::new();
        if blocks.is_empty() {
            return Compaction {
                passes: 0,
                converged: true,
                moves,
            };
        }

        let mut passes = 0;
        let mut changed = true;
        while changed && passes < self.max_compaction_passes {
            changed = false;
            passes += 1;

            let mut order: Vec<K> = blocks.keys().cloned().collect();
            order.sort_by_key(|key| {
                let rect = &blocks[key];
                (rect.position.y, rect.position.x)
            });

            for key in order {
                let rect = blocks[&key];
                if rect.position.y == 0 {
                    continue;
                }

                let target = (0..rect.position.y).find(|&test_y| {
                    let candidate = rect.with_y(test_y);
                    blocks
                        .iter()
                        .all(|(other_key, other)| *other_key == key || !candidate.overlaps(other))
                });

                if let Some(to_y) = target {
                    blocks.insert(key.clone(), rect.with_y(to_y));
                    moves.push(Move {
                        key,
                        from_y: rect.position.y,
                        to_y,
                    });
                    changed = true;
                }
            }
        }

        if changed {
            log::warn!(
                "Compaction stopped after {passes} passes without reaching a fixed point"
            );
        } else {
            log::debug!("Compaction settled after {passes} passes, {} moves", moves.len());
        }

        Compaction {
            passes,
            converged: !changed,
            moves,
        }
    }

    /// Reports empty, out-of-bounds and overlapping blocks.
    ///
    /// Issues are ordered by key; each overlapping pair is reported once.
    pub fn validate<K>(&self, blocks: &BTreeMap<K, Rect>) -> Vec<LayoutIssue<K>>
    where
        K: Ord + Clone,
    {
        let mut issues = Vec::new();
        let entries: Vec<(&K, &Rect)> = blocks.iter().collect();

        for (i, (key, rect)) in entries.iter().enumerate() {
            if rect.size.is_empty() {
                issues.push(LayoutIssue::EmptySize {
                    key: (*key).clone(),
                });
                continue;
            }
            if !rect.fits_columns(self.columns) {
                issues.push(LayoutIssue::OutOfBounds {
                    key: (*key).clone(),
                    rect: **rect,
                });
            }
            for (other_key, other) in &entries[i + 1..] {
                if rect.overlaps(other) {
                    issues.push(LayoutIssue::Overlap {
                        first: (*key).clone(),
                        second: (*other_key).clone(),
                    });
                }
            }
        }

        issues
    }
}

//! Integer grid geometry: cell positions, block sizes and rectangles.
//!
//! All extents are half-open: a rectangle at `(x, y)` with size
//! `width × height` covers columns `x..x + width` and rows `y..y + height`.
//! Edges saturate at `u32::MAX`, so extreme coordinates never overflow.

use serde::{Deserialize, Serialize};

/// Top-left cell of a block. `x` is the column, `y` the row (both 0-based).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column index.
    pub x: u32,
    /// Row index. Rows are unbounded.
    pub y: u32,
}

impl Position {
    /// Creates a position at column `x`, row `y`.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Block footprint in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Number of columns covered.
    pub width: u32,
    /// Number of rows covered.
    pub height: u32,
}

impl Size {
    /// Creates a size of `width × height` cells.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A positioned, sized rectangle on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left cell.
    pub position: Position,
    /// Footprint.
    pub size: Size,
}

impl Rect {
    /// Creates a rectangle anchored at `position`.
    pub const fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Shorthand for `Rect::new(Position::new(x, y), Size::new(width, height))`.
    pub const fn from_xywh(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::new(Position::new(x, y), Size::new(width, height))
    }

    /// First column past the right edge.
    pub const fn right(&self) -> u32 {
        self.position.x.saturating_add(self.size.width)
    }

    /// First row past the bottom edge.
    pub const fn bottom(&self) -> u32 {
        self.position.y.saturating_add(self.size.height)
    }

    /// Same rectangle moved to row `y`.
    pub const fn with_y(self, y: u32) -> Self {
        Self::new(Position::new(self.position.x, y), self.size)
    }

    /// Axis-aligned intersection test.
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let overlaps_x = self.position.x < other.right() && other.position.x < self.right();
        let overlaps_y = self.position.y < other.bottom() && other.position.y < self.bottom();
        overlaps_x && overlaps_y
    }

    /// Returns `true` if the rectangle fits horizontally inside `columns`.
    pub fn fits_columns(&self, columns: u32) -> bool {
        self.right() <= columns
    }

    /// Part of this rectangle inside `window`, or `None` if they are disjoint.
    pub fn intersection(&self, window: &Rect) -> Option<Rect> {
        let x = self.position.x.max(window.position.x);
        let y = self.position.y.max(window.position.y);
        let right = self.right().min(window.right());
        let bottom = self.bottom().min(window.bottom());
        (x < right && y < bottom).then(|| Rect::from_xywh(x, y, right - x, bottom - y))
    }

    /// Iterates the `(row, col)` keys of every covered cell, row-major.
    ///
    /// Yields `width × height` items; clip with [`Rect::intersection`] first
    /// when the rectangle may be large.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        let (left, right) = (self.position.x, self.right());
        (self.position.y..self.bottom()).flat_map(move |row| (left..right).map(move |col| (row, col)))
    }
}

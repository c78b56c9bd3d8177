//! Error types for grid placement.

use thiserror::Error;

/// Invalid input to a layout operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The grid has no columns.
    #[error("Grid must have at least one column")]
    InvalidColumns,

    /// A block size has a zero dimension.
    #[error("Invalid block size {width}x{height}: both dimensions must be at least 1")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A block is wider than the grid.
    #[error("Block width {width} exceeds grid of {columns} columns")]
    TooWide {
        /// Requested width.
        width: u32,
        /// Grid column count.
        columns: u32,
    },
}

/// Result type alias for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_wide_display() {
        let err = LayoutError::TooWide {
            width: 5,
            columns: 4,
        };
        let display = err.to_string();
        assert!(display.contains('5'), "Error should contain width");
        assert!(display.contains("4 columns"), "Error should contain columns");
    }

    #[test]
    fn test_invalid_size_display() {
        let err = LayoutError::InvalidSize {
            width: 0,
            height: 2,
        };
        assert!(err.to_string().contains("0x2"));
    }
}

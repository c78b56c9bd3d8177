//! Tests for the page data model.
//!
//! - `model` - defaults, parsing and partial updates
//! - `serialization` - JSON shape compatibility with exported pages

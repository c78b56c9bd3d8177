//! Bento page editor library.
//!
//! A bento page is a fixed-column grid of rectangular blocks (links, text,
//! images, titles, maps) plus a theme, a profile card and document metadata.
//! This crate holds the data model, the editable [`store::BentoStore`] with
//! JSON snapshot persistence, and the settings and logging plumbing used by
//! the `bento` binary. Block placement and compaction live in the
//! [`bento_grid`] crate.
//!
//! ```
//! use bento::config::schema::LayoutConfig;
//! use bento::store::BentoStore;
//! use bento::BlockType;
//!
//! let mut store = BentoStore::new(LayoutConfig::default());
//! let title = store.add_block(BlockType::Title, None, None).unwrap();
//! let link = store.add_block(BlockType::Link, None, None).unwrap();
//! assert_eq!((title.position.x, title.position.y), (0, 0));
//! assert_eq!((link.position.x, link.position.y), (0, 1));
//! ```

/// Settings file schema, loading and XDG path resolution.
pub mod config;

/// Tracing subscriber setup.
pub mod logging;

/// Editable page state and snapshot persistence.
pub mod store;

/// Persisted page data model.
mod model;
pub use model::*;

#[cfg(test)]
mod tests;

//! Tests for BentoStore.
//!
//! - `blocks` - add, update, delete, duplicate, reorder, move, compact
//! - `sections` - theme, grid, profile and metadata edits
//! - `snapshot` - import/export and on-disk persistence

mod blocks;

use super::BentoStore;
use crate::config::schema::LayoutConfig;
use crate::model::{Block, BlockType, Position, Size};

/// Store with default page and layout settings.
fn new_store() -> BentoStore {
    BentoStore::new(LayoutConfig::default())
}

/// Store that leaves gaps in place after deletions.
fn store_without_auto_compact() -> BentoStore {
    BentoStore::new(LayoutConfig {
        compact_on_delete: false,
        ..LayoutConfig::default()
    })
}

/// Adds a block at an explicit position with the type's default size.
fn add_at(store: &mut BentoStore, kind: BlockType, x: u32, y: u32) -> Block {
    store
        .add_block(kind, Some(Position::new(x, y)), None)
        .expect("add_block should succeed")
}

/// Current position of a block.
fn position_of(store: &BentoStore, id: &str) -> Position {
    store.block(id).expect("block should exist").position
}

/// Asserts that no two blocks share a cell.
fn assert_no_overlap(store: &BentoStore) {
    let blocks = store.blocks();
    for (i, a) in blocks.iter().enumerate() {
        for b in &blocks[i + 1..] {
            assert!(
                !a.rect().overlaps(&b.rect()),
                "{} {:?} overlaps {} {:?}",
                a.id,
                a.rect(),
                b.id,
                b.rect()
            );
        }
    }
}

#[test]
fn test_new_store_is_empty_default_page() {
    let store = new_store();
    assert!(store.blocks().is_empty());
    assert!(store.selected_block_id().is_none());
    assert!(store.snapshot_path().is_none());
    assert_eq!(store.config().grid.columns, 4);
}

#[test]
fn test_select_and_clear_selection() {
    let mut store = new_store();
    let block = store
        .add_block(BlockType::Link, None, None)
        .expect("add_block should succeed");
    store.clear_selection();
    assert!(store.selected_block().is_none());

    store.select_block(Some(block.id.clone()));
    assert_eq!(store.selected_block().map(|b| b.id.as_str()), Some(block.id.as_str()));

    store.select_block(None);
    assert!(store.selected_block_id().is_none());
}

#[test]
fn test_selection_of_unknown_id_yields_no_block() {
    let mut store = new_store();
    store.select_block(Some("ghost".to_string()));
    assert_eq!(store.selected_block_id(), Some("ghost"));
    assert!(store.selected_block().is_none());
}

#[test]
fn test_default_size_helper_matches_block_type() {
    let mut store = new_store();
    let block = add_at(&mut store, BlockType::Text, 0, 0);
    assert_eq!(block.size, Size::new(2, 4));
}

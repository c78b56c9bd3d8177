//! Block operation tests.

use super::*;
use crate::model::{BlockContent, BlockUpdate};
use crate::store::StoreError;
use bento_grid::LayoutError;

// ---------------------------------------------------------------------------
// add_block
// ---------------------------------------------------------------------------

#[test]
fn test_add_uses_type_defaults_and_selects() {
    let mut store = new_store();
    let block = store
        .add_block(BlockType::Link, None, None)
        .expect("add_block should succeed");

    assert_eq!(block.size, Size::new(2, 1));
    assert_eq!(block.position, Position::new(0, 0));
    assert_eq!(block.content.title.as_deref(), Some("Mon Lien"));
    assert!(block.id.starts_with("block-"));
    assert!(block.style.is_none());
    assert_eq!(store.selected_block_id(), Some(block.id.as_str()));
    assert_eq!(store.blocks().len(), 1);
}

#[test]
fn test_add_fills_top_left_first() {
    let mut store = new_store();
    let title = store.add_block(BlockType::Title, None, None).expect("title");
    let first = store.add_block(BlockType::Link, None, None).expect("first link");
    let second = store.add_block(BlockType::Link, None, None).expect("second link");
    let text = store.add_block(BlockType::Text, None, None).expect("text");

    assert_eq!(title.position, Position::new(0, 0));
    assert_eq!(first.position, Position::new(0, 1));
    assert_eq!(second.position, Position::new(2, 1));
    assert_eq!(text.position, Position::new(0, 2));
    assert_no_overlap(&store);
}

#[test]
fn test_add_fills_gap_in_earlier_row() {
    let mut store = new_store();
    add_at(&mut store, BlockType::Link, 0, 0);
    add_at(&mut store, BlockType::Link, 0, 2);
    let block = store.add_block(BlockType::Link, None, None).expect("add");
    assert_eq!(block.position, Position::new(2, 0));
}

#[test]
fn test_add_with_content_merges_over_defaults() {
    let mut store = new_store();
    let content = BlockContent {
        url: Some("https://github.com/me".to_string()),
        ..Default::default()
    };
    let block = store
        .add_block_with_content(BlockType::Link, content, None, None)
        .expect("add should succeed");
    assert_eq!(block.content.title.as_deref(), Some("Mon Lien"));
    assert_eq!(block.content.url.as_deref(), Some("https://github.com/me"));
}

#[test]
fn test_add_custom_size() {
    let mut store = new_store();
    let block = store
        .add_block(BlockType::Image, None, Some(Size::new(4, 2)))
        .expect("add should succeed");
    assert_eq!(block.size, Size::new(4, 2));
}

#[test]
fn test_add_too_wide_is_rejected() {
    let mut store = new_store();
    let err = store
        .add_block(BlockType::Title, None, Some(Size::new(5, 1)))
        .expect_err("should reject");
    assert!(matches!(
        err,
        StoreError::Layout(LayoutError::TooWide {
            width: 5,
            columns: 4
        })
    ));
    assert!(store.blocks().is_empty());
}

#[test]
fn test_add_empty_size_is_rejected() {
    let mut store = new_store();
    let err = store
        .add_block(BlockType::Link, None, Some(Size::new(0, 1)))
        .expect_err("should reject");
    assert!(matches!(err, StoreError::Layout(LayoutError::InvalidSize { .. })));
}

#[test]
fn test_add_explicit_position_out_of_bounds() {
    let mut store = new_store();
    let err = store
        .add_block(BlockType::Link, Some(Position::new(3, 0)), None)
        .expect_err("should reject");
    assert!(matches!(
        err,
        StoreError::OutOfBounds {
            x: 3,
            width: 2,
            columns: 4
        }
    ));
}

#[test]
fn test_add_generates_unique_ids() {
    let mut store = new_store();
    let a = store.add_block(BlockType::Link, None, None).expect("a");
    let b = store.add_block(BlockType::Link, None, None).expect("b");
    assert_ne!(a.id, b.id);
}

// ---------------------------------------------------------------------------
// update_block
// ---------------------------------------------------------------------------

#[test]
fn test_update_merges_content() {
    let mut store = new_store();
    let block = store.add_block(BlockType::Link, None, None).expect("add");
    let updated = store
        .update_block(
            &block.id,
            BlockUpdate {
                content: Some(BlockContent {
                    url: Some("https://example.org".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .expect("update should succeed");

    assert_eq!(updated.id, block.id);
    assert_eq!(updated.content.title.as_deref(), Some("Mon Lien"));
    assert_eq!(updated.content.url.as_deref(), Some("https://example.org"));
    assert_eq!(store.block(&block.id), Some(&updated));
}

#[test]
fn test_update_type_and_size() {
    let mut store = new_store();
    let block = store.add_block(BlockType::Link, None, None).expect("add");
    let updated = store
        .update_block(
            &block.id,
            BlockUpdate {
                kind: Some(BlockType::Text),
                size: Some(Size::new(4, 2)),
                ..Default::default()
            },
        )
        .expect("update should succeed");
    assert_eq!(updated.kind, BlockType::Text);
    assert_eq!(updated.size, Size::new(4, 2));
    assert_eq!(updated.position, block.position);
}

#[test]
fn test_update_rejects_size_leaving_grid() {
    let mut store = new_store();
    let block = add_at(&mut store, BlockType::Link, 2, 0);
    let err = store
        .update_block(
            &block.id,
            BlockUpdate {
                size: Some(Size::new(3, 1)),
                ..Default::default()
            },
        )
        .expect_err("should reject");
    assert!(matches!(err, StoreError::OutOfBounds { .. }));
    assert_eq!(store.block(&block.id).map(|b| b.size), Some(Size::new(2, 1)));
}

#[test]
fn test_update_unknown_block() {
    let mut store = new_store();
    let err = store
        .update_block("missing", BlockUpdate::default())
        .expect_err("should fail");
    assert!(matches!(err, StoreError::BlockNotFound(id) if id == "missing"));
}

// ---------------------------------------------------------------------------
// delete_block / compact
// ---------------------------------------------------------------------------

#[test]
fn test_delete_compacts_remaining_blocks() {
    let mut store = new_store();
    let top = add_at(&mut store, BlockType::Title, 0, 0);
    let below = add_at(&mut store, BlockType::Link, 0, 1);
    let right = add_at(&mut store, BlockType::Link, 2, 1);

    let removed = store.delete_block(&top.id).expect("delete should succeed");
    assert_eq!(removed.id, top.id);
    assert!(store.block(&top.id).is_none());
    assert_eq!(position_of(&store, &below.id), Position::new(0, 0));
    assert_eq!(position_of(&store, &right.id), Position::new(2, 0));
}

#[test]
fn test_delete_single_remaining_block_rises_to_top() {
    let mut store = new_store();
    let first = add_at(&mut store, BlockType::Link, 0, 0);
    let last = add_at(&mut store, BlockType::Link, 0, 3);
    store.delete_block(&first.id).expect("delete should succeed");
    assert_eq!(position_of(&store, &last.id), Position::new(0, 0));
}

#[test]
fn test_delete_without_auto_compact_keeps_gap() {
    let mut store = store_without_auto_compact();
    let top = add_at(&mut store, BlockType::Title, 0, 0);
    let below = add_at(&mut store, BlockType::Link, 0, 1);
    store.delete_block(&top.id).expect("delete should succeed");
    assert_eq!(position_of(&store, &below.id), Position::new(0, 1));
}

#[test]
fn test_delete_clears_selection_of_removed_block() {
    let mut store = new_store();
    let kept = store.add_block(BlockType::Link, None, None).expect("kept");
    let removed = store.add_block(BlockType::Link, None, None).expect("removed");
    assert_eq!(store.selected_block_id(), Some(removed.id.as_str()));

    store.delete_block(&removed.id).expect("delete should succeed");
    assert!(store.selected_block_id().is_none());

    store.select_block(Some(kept.id.clone()));
    let other = store.add_block(BlockType::Link, None, None).expect("other");
    store.select_block(Some(kept.id.clone()));
    store.delete_block(&other.id).expect("delete should succeed");
    assert_eq!(store.selected_block_id(), Some(kept.id.as_str()));
}

#[test]
fn test_delete_unknown_block() {
    let mut store = new_store();
    assert!(matches!(
        store.delete_block("missing"),
        Err(StoreError::BlockNotFound(_))
    ));
}

#[test]
fn test_compact_reports_moves_and_is_idempotent() {
    let mut store = store_without_auto_compact();
    let a = add_at(&mut store, BlockType::Link, 0, 2);
    let b = add_at(&mut store, BlockType::Text, 2, 5);

    let report = store.compact().expect("compact should succeed");
    assert!(report.changed());
    assert!(report.converged);
    assert_eq!(position_of(&store, &a.id), Position::new(0, 0));
    assert_eq!(position_of(&store, &b.id), Position::new(2, 0));

    let again = store.compact().expect("compact should succeed");
    assert!(!again.changed());
    assert_no_overlap(&store);
}

#[test]
fn test_compact_keeps_columns_and_sizes() {
    let mut store = store_without_auto_compact();
    let wide = add_at(&mut store, BlockType::Title, 0, 4);
    let narrow = add_at(&mut store, BlockType::Link, 2, 7);
    store.compact().expect("compact should succeed");

    let wide_now = store.block(&wide.id).expect("wide");
    let narrow_now = store.block(&narrow.id).expect("narrow");
    assert_eq!(wide_now.position, Position::new(0, 0));
    assert_eq!(wide_now.size, wide.size);
    assert_eq!(narrow_now.position, Position::new(2, 1));
    assert_eq!(narrow_now.size, narrow.size);
}

// ---------------------------------------------------------------------------
// duplicate_block
// ---------------------------------------------------------------------------

#[test]
fn test_duplicate_lands_below_source() {
    let mut store = new_store();
    let source = add_at(&mut store, BlockType::Text, 0, 0);
    let copy = store.duplicate_block(&source.id).expect("duplicate should succeed");

    assert_ne!(copy.id, source.id);
    assert_eq!(copy.position, Position::new(0, 4));
    assert_eq!(copy.size, source.size);
    assert_eq!(copy.content, source.content);
    assert_eq!(copy.kind, source.kind);
    assert_eq!(store.selected_block_id(), Some(copy.id.as_str()));
    assert_eq!(store.blocks().len(), 2);
}

#[test]
fn test_duplicate_falls_back_to_free_slot_when_below_is_taken() {
    let mut store = new_store();
    let source = add_at(&mut store, BlockType::Text, 0, 0);
    add_at(&mut store, BlockType::Text, 2, 0);
    add_at(&mut store, BlockType::Link, 0, 4);

    let copy = store.duplicate_block(&source.id).expect("duplicate should succeed");
    assert_eq!(copy.position, Position::new(2, 4));
    assert_no_overlap(&store);
}

#[test]
fn test_duplicate_unknown_block() {
    let mut store = new_store();
    assert!(matches!(
        store.duplicate_block("missing"),
        Err(StoreError::BlockNotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// reorder_blocks / update_block_position
// ---------------------------------------------------------------------------

#[test]
fn test_reorder_follows_given_order() {
    let mut store = new_store();
    let a = store.add_block(BlockType::Link, None, None).expect("a");
    let b = store.add_block(BlockType::Link, None, None).expect("b");
    let c = store.add_block(BlockType::Link, None, None).expect("c");

    store
        .reorder_blocks(&[c.id.clone(), a.id.clone(), b.id.clone()])
        .expect("reorder should succeed");
    let ids: Vec<&str> = store.blocks().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec![c.id.as_str(), a.id.as_str(), b.id.as_str()]);
    assert_eq!(position_of(&store, &a.id), a.position);
}

#[test]
fn test_reorder_rejects_non_permutations() {
    let mut store = new_store();
    let a = store.add_block(BlockType::Link, None, None).expect("a");
    let b = store.add_block(BlockType::Link, None, None).expect("b");

    let missing = store.reorder_blocks(&[a.id.clone()]);
    let repeated = store.reorder_blocks(&[a.id.clone(), a.id.clone()]);
    let unknown = store.reorder_blocks(&[a.id.clone(), "ghost".to_string()]);
    assert!(matches!(missing, Err(StoreError::InvalidOrder)));
    assert!(matches!(repeated, Err(StoreError::InvalidOrder)));
    assert!(matches!(unknown, Err(StoreError::InvalidOrder)));

    let ids: Vec<&str> = store.blocks().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec![a.id.as_str(), b.id.as_str()]);
}

#[test]
fn test_move_block() {
    let mut store = new_store();
    let block = store.add_block(BlockType::Link, None, None).expect("add");
    store
        .update_block_position(&block.id, Position::new(2, 5))
        .expect("move should succeed");
    assert_eq!(position_of(&store, &block.id), Position::new(2, 5));
}

#[test]
fn test_move_out_of_bounds_is_rejected() {
    let mut store = new_store();
    let block = store.add_block(BlockType::Link, None, None).expect("add");
    let err = store
        .update_block_position(&block.id, Position::new(3, 0))
        .expect_err("should reject");
    assert!(matches!(err, StoreError::OutOfBounds { .. }));
    assert_eq!(position_of(&store, &block.id), Position::new(0, 0));
}

#[test]
fn test_move_past_row_limit_is_rejected() {
    let mut store = new_store();
    let block = store.add_block(BlockType::Link, None, None).expect("add");
    for y in [bento_grid::MAX_ROWS, u32::MAX] {
        let err = store
            .update_block_position(&block.id, Position::new(0, y))
            .expect_err("should reject");
        assert!(matches!(err, StoreError::RowLimit { .. }));
    }
    assert_eq!(position_of(&store, &block.id), Position::new(0, 0));
}

#[test]
fn test_duplicate_on_last_row_goes_to_free_slot() {
    let mut store = new_store();
    let last = add_at(&mut store, BlockType::Link, 0, bento_grid::MAX_ROWS - 1);
    let copy = store.duplicate_block(&last.id).expect("duplicate");
    assert_eq!(copy.position, Position::new(0, 0));
    assert_no_overlap(&store);
}

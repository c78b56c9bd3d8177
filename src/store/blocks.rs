//! Block operations for the BentoStore.
//!
//! Placement of new blocks and the repack after a deletion go through the
//! layout engine; everything else edits the block list directly.

use std::collections::{HashMap, HashSet};

use bento_grid::{Compaction, Position, Rect, Size};

use super::{check_rows, BentoStore, StoreError};
use crate::model::{generate_block_id, Block, BlockContent, BlockId, BlockType, BlockUpdate};

impl BentoStore {
    /// Adds a block of `kind` with the type's placeholder content.
    ///
    /// `size` defaults to the type's default size. Without a `position` the
    /// block goes to the first free slot found by the engine. The new block
    /// becomes the selection.
    ///
    /// # Errors
    ///
    /// * `StoreError::Layout` - The size is empty or wider than the grid.
    /// * `StoreError::OutOfBounds` - An explicit position leaves the grid.
    /// * `StoreError::RowLimit` - An explicit position reaches past the last
    ///   supported row.
    pub fn add_block(
        &mut self,
        kind: BlockType,
        position: Option<Position>,
        size: Option<Size>,
    ) -> Result<Block, StoreError> {
        self.add_block_with_content(kind, BlockContent::default(), position, size)
    }

    /// Adds a block whose content is `content` laid over the type's defaults.
    ///
    /// Same placement rules and errors as [`BentoStore::add_block`].
    pub fn add_block_with_content(
        &mut self,
        kind: BlockType,
        content: BlockContent,
        position: Option<Position>,
        size: Option<Size>,
    ) -> Result<Block, StoreError> {
        let size = size.unwrap_or_else(|| kind.default_size());
        let grid = self.grid_layout()?;
        grid.check_size(size)?;

        let position = match position {
            Some(position) => {
                self.check_fits(Rect::new(position, size))?;
                position
            }
            None => grid.find_first_available_position(&self.rects(), size)?,
        };

        let block = Block {
            id: self.fresh_block_id(),
            kind,
            position,
            size,
            content: kind.default_content().merged(content),
            style: None,
        };
        tracing::info!(
            "Added {} block {} at ({}, {})",
            kind,
            block.id,
            position.x,
            position.y
        );

        self.config.blocks.push(block.clone());
        self.selected_block_id = Some(block.id.clone());
        Ok(block)
    }

    /// Applies a partial update to a block.
    ///
    /// Content fields are merged into the existing content; the other fields
    /// replace their current value when set. The id never changes.
    ///
    /// # Errors
    ///
    /// * `StoreError::BlockNotFound` - No block has this id.
    /// * `StoreError::Layout` / `StoreError::OutOfBounds` - The new geometry
    ///   does not fit the grid.
    pub fn update_block(&mut self, id: &str, update: BlockUpdate) -> Result<Block, StoreError> {
        let index = self.index_of(id)?;
        let current = &self.config.blocks[index];

        let position = update.position.unwrap_or(current.position);
        let size = update.size.unwrap_or(current.size);
        if position != current.position || size != current.size {
            self.grid_layout()?.check_size(size)?;
            self.check_fits(Rect::new(position, size))?;
        }

        let block = &mut self.config.blocks[index];
        block.position = position;
        block.size = size;
        if let Some(kind) = update.kind {
            block.kind = kind;
        }
        if let Some(content) = update.content {
            block.content.merge(content);
        }
        if let Some(style) = update.style {
            block.style = Some(style);
        }
        tracing::debug!("Updated block {}", id);
        Ok(block.clone())
    }

    /// Removes a block and, unless disabled in the layout settings, compacts
    /// the remaining blocks upward.
    ///
    /// Clears the selection if it pointed at the removed block.
    ///
    /// # Errors
    ///
    /// * `StoreError::BlockNotFound` - No block has this id.
    pub fn delete_block(&mut self, id: &str) -> Result<Block, StoreError> {
        let index = self.index_of(id)?;
        let removed = self.config.blocks.remove(index);

        if self.selected_block_id.as_deref() == Some(id) {
            self.selected_block_id = None;
        }
        tracing::info!("Deleted block {}", id);

        if self.layout.compact_on_delete {
            self.compact()?;
        }
        Ok(removed)
    }

    /// Pulls every block as far up as it can go and writes the new rows back.
    ///
    /// Returns the engine's report. Hitting the pass cap is not an error.
    pub fn compact(&mut self) -> Result<Compaction<BlockId>, StoreError> {
        let grid = self.grid_layout()?;
        let mut rects = self.keyed_rects();
        let report = grid.compact_up(&mut rects);

        for block in &mut self.config.blocks {
            if let Some(rect) = rects.get(&block.id) {
                block.position = rect.position;
            }
        }

        if report.changed() {
            tracing::info!(
                "Compacted {} moves in {} passes",
                report.moves.len(),
                report.passes
            );
        }
        if !report.converged {
            tracing::warn!(
                "Compaction hit the {} pass cap; layout may still have gaps",
                grid.max_compaction_passes()
            );
        }
        Ok(report)
    }

    /// Copies a block under a fresh id and selects the copy.
    ///
    /// The copy goes directly below the source when that spot is free, and
    /// to the first free slot otherwise.
    ///
    /// # Errors
    ///
    /// * `StoreError::BlockNotFound` - No block has this id.
    pub fn duplicate_block(&mut self, id: &str) -> Result<Block, StoreError> {
        let source = self.config.blocks[self.index_of(id)?].clone();
        let grid = self.grid_layout()?;

        let below = Rect::new(
            Position::new(source.position.x, source.rect().bottom()),
            source.size,
        );
        let rects = self.rects();
        let below_is_free =
            check_rows(below).is_ok() && !rects.iter().any(|r| r.overlaps(&below));
        let position = if below_is_free {
            below.position
        } else {
            grid.find_first_available_position(&rects, source.size)?
        };

        let copy = Block {
            id: self.fresh_block_id(),
            position,
            ..source
        };
        tracing::info!("Duplicated block {} as {}", id, copy.id);

        self.config.blocks.push(copy.clone());
        self.selected_block_id = Some(copy.id.clone());
        Ok(copy)
    }

    /// Rearranges the block list to follow `order`.
    ///
    /// Display order only; positions are untouched.
    ///
    /// # Errors
    ///
    /// * `StoreError::InvalidOrder` - `order` is not a permutation of the
    ///   current block ids.
    pub fn reorder_blocks(&mut self, order: &[BlockId]) -> Result<(), StoreError> {
        let mut seen = HashSet::new();
        let is_permutation = order.len() == self.config.blocks.len()
            && order
                .iter()
                .all(|id| self.config.block(id).is_some() && seen.insert(id));
        if !is_permutation {
            return Err(StoreError::InvalidOrder);
        }

        let mut by_id: HashMap<BlockId, Block> = std::mem::take(&mut self.config.blocks)
            .into_iter()
            .map(|b| (b.id.clone(), b))
            .collect();
        self.config.blocks = order.iter().filter_map(|id| by_id.remove(id)).collect();
        tracing::debug!("Reordered {} blocks", order.len());
        Ok(())
    }

    /// Moves a block to an explicit position (drag and drop).
    ///
    /// Only the grid's horizontal bound is enforced; overlapping other blocks
    /// is left to the caller.
    ///
    /// # Errors
    ///
    /// * `StoreError::BlockNotFound` - No block has this id.
    /// * `StoreError::OutOfBounds` / `StoreError::RowLimit` - The block would
    ///   leave the grid.
    pub fn update_block_position(&mut self, id: &str, position: Position) -> Result<(), StoreError> {
        let index = self.index_of(id)?;
        let size = self.config.blocks[index].size;
        self.check_fits(Rect::new(position, size))?;
        self.config.blocks[index].position = position;
        tracing::debug!("Moved block {} to ({}, {})", id, position.x, position.y);
        Ok(())
    }

    fn index_of(&self, id: &str) -> Result<usize, StoreError> {
        self.config
            .block_index(id)
            .ok_or_else(|| StoreError::BlockNotFound(id.to_string()))
    }

    fn check_fits(&self, rect: Rect) -> Result<(), StoreError> {
        check_rows(rect)?;
        let columns = self.config.grid.columns;
        if rect.fits_columns(columns) {
            Ok(())
        } else {
            Err(StoreError::OutOfBounds {
                x: rect.position.x,
                width: rect.size.width,
                columns,
            })
        }
    }

    fn fresh_block_id(&self) -> BlockId {
        loop {
            let id = generate_block_id();
            if self.config.block(&id).is_none() {
                return id;
            }
        }
    }
}

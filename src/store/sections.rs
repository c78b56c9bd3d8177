//! Theme, grid, profile and metadata operations.

use super::{BentoStore, StoreError};
use crate::model::{Grid, GridUpdate, MetadataUpdate, Profile, ProfileUpdate, Theme, ThemeUpdate};
use bento_grid::LayoutError;

impl BentoStore {
    /// Applies a partial theme update.
    pub fn update_theme(&mut self, update: ThemeUpdate) {
        update.apply(&mut self.config.theme);
    }

    /// Restores the default theme.
    pub fn reset_theme(&mut self) {
        self.config.theme = Theme::default();
    }

    /// Applies a partial grid update.
    ///
    /// Existing blocks are not moved when the column count changes; blocks
    /// left outside the narrower grid are reported in the log.
    ///
    /// # Errors
    ///
    /// * `StoreError::Layout` - The update sets `columns` to zero.
    pub fn update_grid(&mut self, update: GridUpdate) -> Result<(), StoreError> {
        if update.columns == Some(0) {
            return Err(LayoutError::InvalidColumns.into());
        }
        update.apply(&mut self.config.grid);
        self.warn_layout_issues();
        Ok(())
    }

    /// Restores the default grid.
    pub fn reset_grid(&mut self) {
        self.config.grid = Grid::default();
        self.warn_layout_issues();
    }

    /// Applies a partial metadata update. Timestamps are managed by the store.
    pub fn update_metadata(&mut self, update: MetadataUpdate) {
        update.apply(&mut self.config.metadata);
    }

    /// Applies a partial profile update.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        update.apply(&mut self.config.profile);
    }

    /// Restores the default profile.
    pub fn reset_profile(&mut self) {
        self.config.profile = Profile::default();
    }
}

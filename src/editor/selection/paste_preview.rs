//! # Paste Preview
//!
//! A non-committing projection of the clipboard. Only the candidate position is stored; the
//! projected voxels are computed on demand and never written to the world.

use crate::voxels::coordinates::checked_delta;
use crate::voxels::voxel::voxel_type::VoxelType;
use crate::voxels::WorldPos;

use super::voxel_selection::{SelectionBounds, VoxelSelection};

/// Where the clipboard would land if pasted now.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PastePreview {
    position: Option<WorldPos>,
}

impl PastePreview {
    /// Shows the preview at `position`.
    pub fn enable(&mut self, position: WorldPos) {
        self.position = Some(position);
    }

    /// Moves an active preview. Does nothing while the preview is hidden.
    ///
    /// # Returns
    /// `true` if the preview was active.
    pub fn update(&mut self, position: WorldPos) -> bool {
        match self.position.as_mut() {
            Some(current) => {
                *current = position;
                true
            }
            None => false,
        }
    }

    /// Hides the preview.
    ///
    /// # Returns
    /// `true` if it was active.
    pub fn disable(&mut self) -> bool {
        self.position.take().is_some()
    }

    /// Whether the preview is shown.
    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }

    /// Where the preview is anchored, if it is shown.
    pub fn position(&self) -> Option<WorldPos> {
        self.position
    }

    /// The clipboard entries translated to the preview position.
    pub fn project(&self, clipboard: &VoxelSelection) -> Option<Vec<(WorldPos, VoxelType)>> {
        let anchor = self.position?;
        let placed = clipboard.placed_at(anchor);
        if placed.is_empty() {
            return None;
        }
        Some(
            placed
                .into_iter()
                .map(|voxel| (voxel.position, voxel.voxel_type))
                .collect(),
        )
    }

    /// The clipboard bounds translated to the preview position.
    pub fn bounds(&self, clipboard: &VoxelSelection) -> Option<SelectionBounds> {
        let anchor = self.position?;
        let bounds = clipboard.bounds()?;
        bounds.translated(checked_delta(bounds.min, anchor)?)
    }
}

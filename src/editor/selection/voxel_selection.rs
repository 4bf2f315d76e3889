//! # Voxel Selection
//!
//! A materialized set of solid voxels together with their axis-aligned bounding box. The same
//! type backs both the live selection and the clipboard, which is an independent copy of it.

use cgmath::Vector3;

use crate::voxels::coordinates::{checked_delta, checked_offset, CHUNK_HEIGHT};
use crate::voxels::voxel::voxel_type::VoxelType;
use crate::voxels::world::VoxelWorld;
use crate::voxels::WorldPos;

/// One selected cell and the material it held when it was selected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelectedVoxel {
    /// World position of the cell.
    pub position: WorldPos,
    /// Material captured at selection time.
    pub voxel_type: VoxelType,
}

/// An inclusive axis-aligned box of world positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelectionBounds {
    /// Smallest corner.
    pub min: WorldPos,
    /// Largest corner, inclusive.
    pub max: WorldPos,
}

impl SelectionBounds {
    /// Builds the box spanned by two corners given in any order.
    pub fn from_corners(a: WorldPos, b: WorldPos) -> Self {
        SelectionBounds {
            min: WorldPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: WorldPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Whether `position` lies inside the box.
    pub fn contains(&self, position: WorldPos) -> bool {
        (self.min.x..=self.max.x).contains(&position.x)
            && (self.min.y..=self.max.y).contains(&position.y)
            && (self.min.z..=self.max.z).contains(&position.z)
    }

    /// Number of cells along each axis.
    pub fn size(&self) -> Vector3<i32> {
        self.max - self.min + Vector3::new(1, 1, 1)
    }

    /// The same box moved by `delta`, or `None` if a corner leaves the `i32` range.
    pub fn translated(&self, delta: Vector3<i32>) -> Option<Self> {
        Some(SelectionBounds {
            min: checked_offset(self.min, delta)?,
            max: checked_offset(self.max, delta)?,
        })
    }

    fn include(&mut self, position: WorldPos) {
        self.min = WorldPos::new(
            self.min.x.min(position.x),
            self.min.y.min(position.y),
            self.min.z.min(position.z),
        );
        self.max = WorldPos::new(
            self.max.x.max(position.x),
            self.max.y.max(position.y),
            self.max.z.max(position.z),
        );
    }
}

/// A set of selected voxels and their bounds.
///
/// The bounds are `None` exactly when the selection is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoxelSelection {
    voxels: Vec<SelectedVoxel>,
    bounds: Option<SelectionBounds>,
}

impl VoxelSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        VoxelSelection::default()
    }

    /// Builds a selection from explicit entries and computes their bounds.
    pub fn from_voxels(voxels: Vec<SelectedVoxel>) -> Self {
        let mut bounds: Option<SelectionBounds> = None;
        for voxel in &voxels {
            match bounds.as_mut() {
                Some(bounds) => bounds.include(voxel.position),
                None => bounds = Some(SelectionBounds::from_corners(voxel.position, voxel.position)),
            }
        }
        VoxelSelection { voxels, bounds }
    }

    /// Scans every cell of `area` and keeps the solid ones.
    ///
    /// Cells in chunks that are not loaded are skipped, as are heights outside the world.
    pub fn scan(world: &VoxelWorld, area: SelectionBounds) -> Self {
        let mut voxels = Vec::new();
        let (low, high) = (area.min.y.max(0), area.max.y.min(CHUNK_HEIGHT - 1));
        for y in low..=high {
            for z in area.min.z..=area.max.z {
                for x in area.min.x..=area.max.x {
                    let position = WorldPos::new(x, y, z);
                    if let Some(voxel) = world.get_voxel(position).filter(|voxel| voxel.is_solid()) {
                        voxels.push(SelectedVoxel {
                            position,
                            voxel_type: voxel.voxel_type(),
                        });
                    }
                }
            }
        }
        VoxelSelection::from_voxels(voxels)
    }

    /// The selected voxels, in scan order.
    pub fn voxels(&self) -> &[SelectedVoxel] {
        &self.voxels
    }

    /// Bounding box of the selected voxels.
    pub fn bounds(&self) -> Option<SelectionBounds> {
        self.bounds
    }

    /// Number of selected voxels.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Drops every entry and the bounds.
    pub fn clear(&mut self) {
        self.voxels.clear();
        self.bounds = None;
    }

    /// Moves every entry and the bounds by `delta`.
    ///
    /// # Returns
    /// `false`, leaving the selection untouched, if the bounds would leave the `i32` range.
    pub fn translate(&mut self, delta: Vector3<i32>) -> bool {
        let Some(bounds) = self.bounds else {
            return true;
        };
        let Some(moved) = bounds.translated(delta) else {
            return false;
        };
        // Every entry lies inside the bounds, so the entries cannot overflow either.
        for voxel in &mut self.voxels {
            voxel.position += delta;
        }
        self.bounds = Some(moved);
        true
    }

    /// The entries moved so that the bounds' minimum corner lands on `anchor`.
    ///
    /// Empty when the selection is empty or the placement would leave the `i32` range.
    pub fn placed_at(&self, anchor: WorldPos) -> Vec<SelectedVoxel> {
        let Some(bounds) = self.bounds else {
            return Vec::new();
        };
        let Some(offset) = checked_delta(bounds.min, anchor) else {
            return Vec::new();
        };
        if bounds.translated(offset).is_none() {
            return Vec::new();
        }
        self.voxels
            .iter()
            .map(|voxel| SelectedVoxel {
                position: voxel.position + offset,
                voxel_type: voxel.voxel_type,
            })
            .collect()
    }
}

//! # Stroke
//!
//! A `Stroke` is one logical edit in progress: it borrows the world, writes cells through the
//! single recording write path, and collects the resulting commands into a batch.

use crate::voxels::coordinates::{checked_offset, CHUNK_HEIGHT};
use crate::voxels::voxel::voxel_type::VoxelType;
use crate::voxels::voxel::Voxel;
use crate::voxels::world::VoxelWorld;
use crate::voxels::WorldPos;

use super::history::{CommandBatch, TerraformCommand};
use super::tool::{disc_columns, square_columns, Footprint, TerraformMode};

/// Writes `new_voxel` at `position` and records the change into `batch`.
///
/// This is the only editing path that touches the world. A write is rejected, and nothing is
/// recorded, when the height is out of range, when the cell already holds `new_voxel`, or when
/// the cell is bedrock.
///
/// # Returns
/// `true` if the cell changed.
pub(crate) fn write_voxel(
    world: &mut VoxelWorld,
    batch: &mut CommandBatch,
    position: WorldPos,
    new_voxel: Voxel,
) -> bool {
    let Some(old_voxel) = world.voxel_or_air(position) else {
        return false;
    };
    if old_voxel == new_voxel || !old_voxel.voxel_type().is_editable() {
        return false;
    }
    if !world.set_voxel(position, new_voxel) {
        return false;
    }
    batch.push(TerraformCommand {
        position,
        old_voxel,
        new_voxel,
    });
    true
}

pub(crate) struct Stroke<'a> {
    world: &'a mut VoxelWorld,
    batch: CommandBatch,
    mode: TerraformMode,
    material: VoxelType,
}

impl<'a> Stroke<'a> {
    pub(crate) fn new(world: &'a mut VoxelWorld, mode: TerraformMode, material: VoxelType) -> Self {
        Stroke {
            world,
            batch: CommandBatch::new(),
            mode,
            material,
        }
    }

    /// Hands back the commands recorded so far.
    pub(crate) fn into_batch(self) -> CommandBatch {
        self.batch
    }

    fn write(&mut self, position: WorldPos, voxel: Voxel) -> bool {
        write_voxel(self.world, &mut self.batch, position, voxel)
    }

    fn solid_at(&self, position: WorldPos) -> Option<bool> {
        self.world.voxel_or_air(position).map(|voxel| voxel.is_solid())
    }

    /// The `(x, z)` of the column `(dx, dz)` away from `center`, unless it leaves the `i32` range.
    fn column(center: WorldPos, dx: i32, dz: i32) -> Option<(i32, i32)> {
        Some((center.x.checked_add(dx)?, center.z.checked_add(dz)?))
    }

    /// Writes one cell according to the active mode.
    pub(crate) fn apply_filtered(&mut self, position: WorldPos) -> bool {
        let Some(current) = self.world.voxel_or_air(position) else {
            return false;
        };
        match self.mode.target_for(current.voxel_type(), self.material) {
            Some(target) => self.write(position, Voxel::new(target)),
            None => false,
        }
    }

    /// Applies the mode to every cell of `footprint` around `center`.
    ///
    /// Cells past the edge of the coordinate range are skipped like cells outside the world height.
    pub(crate) fn fill(&mut self, center: WorldPos, footprint: Footprint, radius: i32) {
        for offset in footprint.offsets(radius) {
            if let Some(position) = checked_offset(center, offset) {
                self.apply_filtered(position);
            }
        }
    }

    /// Levels every column within `radius` of `center` to `center.y`.
    ///
    /// Solid cells above the target height are cleared and air cells from the bottom of the
    /// world up to the target height are filled with the material, caves included.
    pub(crate) fn flatten(&mut self, center: WorldPos, radius: i32) {
        let target = center.y;
        let fill = Voxel::new(self.material);
        for (dx, dz) in disc_columns(radius) {
            let Some((x, z)) = Self::column(center, dx, dz) else {
                continue;
            };
            for y in (target + 1)..CHUNK_HEIGHT {
                let position = WorldPos::new(x, y, z);
                if self.solid_at(position) == Some(true) {
                    self.write(position, Voxel::AIR);
                }
            }
            for y in 0..=target {
                let position = WorldPos::new(x, y, z);
                if self.solid_at(position) == Some(false) {
                    self.write(position, fill);
                }
            }
        }
    }

    /// Pulls each column within `radius` of `center` halfway toward the average surface height.
    pub(crate) fn smooth(&mut self, center: WorldPos, radius: i32) {
        let heights: Vec<i32> = square_columns(radius)
            .filter_map(|(dx, dz)| Self::column(center, dx, dz))
            .filter_map(|(x, z)| self.world.surface_height(x, z))
            .collect();
        if heights.is_empty() {
            return;
        }
        let average = heights.iter().sum::<i32>() / heights.len() as i32;

        for (dx, dz) in disc_columns(radius) {
            let Some((x, z)) = Self::column(center, dx, dz) else {
                continue;
            };
            let surface = self.world.surface_height(x, z).unwrap_or(0);
            let target = (surface + average) / 2;

            if target > surface {
                for y in (surface + 1)..=target {
                    self.apply_filtered(WorldPos::new(x, y, z));
                }
            } else if target < surface {
                for y in ((target + 1)..=surface).rev() {
                    let position = WorldPos::new(x, y, z);
                    if self.solid_at(position) == Some(true) {
                        self.write(position, Voxel::AIR);
                    }
                }
            }
        }
    }

    /// Recolors solid cells within `radius` of `center`; air is left alone.
    pub(crate) fn paint(&mut self, center: WorldPos, radius: i32) {
        let paint = Voxel::new(self.material);
        for offset in Footprint::Ball.offsets(radius) {
            let Some(position) = checked_offset(center, offset) else {
                continue;
            };
            if let Some(current) = self.world.voxel_or_air(position) {
                if current.is_solid() && current != paint {
                    self.write(position, paint);
                }
            }
        }
    }
}

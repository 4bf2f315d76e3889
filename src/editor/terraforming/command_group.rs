//! # Command Groups
//!
//! Lets callers outside the tool engine (the selection manager, scripted edits) build one undo
//! entry out of arbitrary voxel writes.

use crate::voxels::voxel::Voxel;
use crate::voxels::world::VoxelWorld;
use crate::voxels::WorldPos;

use super::history::CommandBatch;
use super::stroke::write_voxel;
use super::TerraformingSystem;

/// An open command group.
///
/// Every change recorded through the group lands in one batch. The batch is pushed onto the undo
/// stack by [`CommandGroup::end_command_group`] or, on any other exit path, when the group is
/// dropped. A group that recorded nothing leaves the history untouched.
pub struct CommandGroup<'t, 'w> {
    system: &'t mut TerraformingSystem<'w>,
    batch: CommandBatch,
}

impl<'t, 'w> CommandGroup<'t, 'w> {
    pub(super) fn new(system: &'t mut TerraformingSystem<'w>) -> Self {
        CommandGroup {
            system,
            batch: CommandBatch::new(),
        }
    }

    /// Writes `voxel` at `position` and records the change in this group.
    ///
    /// # Returns
    /// `true` if the cell changed. Writes without a world, out of range, onto an equal voxel or
    /// onto bedrock change nothing.
    pub fn record_voxel_change(&mut self, position: WorldPos, voxel: Voxel) -> bool {
        match self.system.world.as_deref_mut() {
            Some(world) => write_voxel(world, &mut self.batch, position, voxel),
            None => false,
        }
    }

    /// Read access to the world being edited.
    pub fn world(&self) -> Option<&VoxelWorld> {
        self.system.world()
    }

    /// Number of changes recorded so far.
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Closes the group and pushes its batch.
    ///
    /// # Returns
    /// The number of voxels the group changed.
    pub fn end_command_group(mut self) -> usize {
        self.commit()
    }

    fn commit(&mut self) -> usize {
        let batch = std::mem::take(&mut self.batch);
        let changed = batch.len();
        self.system.commit_group(batch);
        changed
    }
}

impl Drop for CommandGroup<'_, '_> {
    fn drop(&mut self) {
        self.commit();
    }
}

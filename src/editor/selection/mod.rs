//! # Selection Manager
//!
//! Box selection, clipboard and paste preview.
//!
//! The manager never writes voxels itself. Deletes, cuts, pastes and moves open a command
//! group on the [`TerraformingSystem`] passed in, so they land on the same undo history as tool
//! applications and a single undo reverts the whole operation.
//!
//! ## States
//!
//! * **Idle**: nothing selected.
//! * **Selecting**: `start_selection` anchored a box and `update_selection` drags its far
//!   corner.
//! * **Selected**: `finalize_selection` scanned the box and kept its solid voxels.

pub mod paste_preview;
pub mod voxel_selection;

use cgmath::Vector3;
use log::Level;

use crate::core::logging::{facade_logger, SharedLogger};
use crate::editor::terraforming::TerraformingSystem;
use crate::log_to;
use crate::voxels::coordinates::checked_offset;
use crate::voxels::voxel::voxel_type::VoxelType;
use crate::voxels::voxel::Voxel;
use crate::voxels::world::VoxelWorld;
use crate::voxels::WorldPos;

use paste_preview::PastePreview;
use voxel_selection::{SelectedVoxel, SelectionBounds, VoxelSelection};

const LOG_TARGET: &str = "voxel_terraform::selection";

/// The result of a selection or clipboard operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// A read-only operation finished with this many voxels involved.
    Completed {
        /// Voxels selected or copied.
        voxels: usize,
    },
    /// A mutating operation finished and was recorded as one undo entry (if it changed anything).
    Applied {
        /// Voxels that actually changed.
        changed: usize,
    },
    /// No world was available.
    NoWorld,
    /// There was nothing selected.
    EmptySelection,
    /// There was nothing in the clipboard.
    EmptyClipboard,
}

impl SelectionOutcome {
    /// Whether the operation ran, as opposed to being refused.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            SelectionOutcome::Completed { .. } | SelectionOutcome::Applied { .. }
        )
    }
}

/// Tracks the selection box, the selected voxels, the clipboard and the paste preview.
pub struct SelectionManager {
    selecting: bool,
    anchor: WorldPos,
    corner: WorldPos,
    selection: VoxelSelection,
    clipboard: VoxelSelection,
    preview: PastePreview,
    logger: SharedLogger,
}

impl Default for SelectionManager {
    fn default() -> Self {
        SelectionManager::new(facade_logger())
    }
}

impl SelectionManager {
    /// Creates an idle manager that logs to `logger`.
    pub fn new(logger: SharedLogger) -> Self {
        SelectionManager {
            selecting: false,
            anchor: WorldPos::new(0, 0, 0),
            corner: WorldPos::new(0, 0, 0),
            selection: VoxelSelection::new(),
            clipboard: VoxelSelection::new(),
            preview: PastePreview::default(),
            logger,
        }
    }

    /// Drops the current selection and anchors a new box at `position`.
    pub fn start_selection(&mut self, position: WorldPos) {
        self.selection.clear();
        self.selecting = true;
        self.anchor = position;
        self.corner = position;
        log_to!(self.logger, LOG_TARGET, Level::Debug, "selection started at {:?}", position);
    }

    /// Moves the far corner of the box being dragged. Ignored unless selecting.
    pub fn update_selection(&mut self, position: WorldPos) {
        if self.selecting {
            self.corner = position;
        }
    }

    /// Ends the drag and selects every solid voxel inside the box.
    pub fn finalize_selection(&mut self, world: Option<&VoxelWorld>) -> SelectionOutcome {
        if !self.selecting {
            return SelectionOutcome::EmptySelection;
        }
        self.selecting = false;

        let Some(world) = world else {
            log_to!(self.logger, LOG_TARGET, Level::Warn, "cannot finalize selection without a world");
            return SelectionOutcome::NoWorld;
        };
        let area = SelectionBounds::from_corners(self.anchor, self.corner);
        self.selection = VoxelSelection::scan(world, area);
        log_to!(
            self.logger,
            LOG_TARGET,
            Level::Info,
            "selected {} voxels",
            self.selection.len()
        );
        SelectionOutcome::Completed {
            voxels: self.selection.len(),
        }
    }

    /// Returns to idle, forgetting the box and the selected voxels.
    pub fn clear_selection(&mut self) {
        self.selecting = false;
        self.selection.clear();
        self.anchor = WorldPos::new(0, 0, 0);
        self.corner = WorldPos::new(0, 0, 0);
    }

    /// Whether something is selected or a box is being dragged.
    pub fn has_selection(&self) -> bool {
        self.selecting || !self.selection.is_empty()
    }

    /// Whether a box is being dragged.
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Number of selected voxels.
    pub fn selection_size(&self) -> usize {
        self.selection.len()
    }

    /// The selected voxels.
    pub fn selected_voxels(&self) -> &[SelectedVoxel] {
        self.selection.voxels()
    }

    /// The finalized selection.
    pub fn selection(&self) -> &VoxelSelection {
        &self.selection
    }

    /// The box being dragged while selecting, otherwise the bounds of the selected voxels.
    pub fn selection_bounds(&self) -> Option<SelectionBounds> {
        if self.selecting {
            Some(SelectionBounds::from_corners(self.anchor, self.corner))
        } else {
            self.selection.bounds()
        }
    }

    /// Sets every selected voxel to air as one undo entry, then clears the selection.
    pub fn delete_selected(&mut self, terraform: &mut TerraformingSystem) -> SelectionOutcome {
        if let Some(refusal) = self.check_selection(terraform, "delete") {
            return refusal;
        }
        let changed = self.clear_selected_voxels(terraform);
        log_to!(self.logger, LOG_TARGET, Level::Info, "deleted {} voxels", changed);
        self.clear_selection();
        SelectionOutcome::Applied { changed }
    }

    /// Copies the selection into the clipboard, replacing its previous contents.
    pub fn copy_to_clipboard(&mut self, world: Option<&VoxelWorld>) -> SelectionOutcome {
        if self.selection.is_empty() {
            log_to!(self.logger, LOG_TARGET, Level::Warn, "nothing to copy");
            return SelectionOutcome::EmptySelection;
        }
        if world.is_none() {
            log_to!(self.logger, LOG_TARGET, Level::Warn, "cannot copy without a world");
            return SelectionOutcome::NoWorld;
        }
        self.clipboard = self.selection.clone();
        log_to!(
            self.logger,
            LOG_TARGET,
            Level::Info,
            "copied {} voxels to the clipboard",
            self.clipboard.len()
        );
        SelectionOutcome::Completed {
            voxels: self.clipboard.len(),
        }
    }

    /// Copies the selection into the clipboard, then deletes it as one undo entry.
    pub fn cut_to_clipboard(&mut self, terraform: &mut TerraformingSystem) -> SelectionOutcome {
        if let Some(refusal) = self.check_selection(terraform, "cut") {
            return refusal;
        }
        self.clipboard = self.selection.clone();
        let changed = self.clear_selected_voxels(terraform);
        log_to!(
            self.logger,
            LOG_TARGET,
            Level::Info,
            "cut {} voxels to the clipboard",
            self.clipboard.len()
        );
        self.clear_selection();
        SelectionOutcome::Applied { changed }
    }

    /// Whether the clipboard holds anything.
    pub fn has_clipboard_data(&self) -> bool {
        !self.clipboard.is_empty()
    }

    /// The clipboard contents.
    pub fn clipboard(&self) -> &VoxelSelection {
        &self.clipboard
    }

    /// Writes the clipboard so its minimum corner lands on `target`, as one undo entry.
    ///
    /// Existing content at the destination is overwritten.
    pub fn paste_from_clipboard(
        &mut self,
        target: WorldPos,
        terraform: &mut TerraformingSystem,
    ) -> SelectionOutcome {
        if self.clipboard.is_empty() {
            log_to!(self.logger, LOG_TARGET, Level::Warn, "nothing to paste: clipboard is empty");
            return SelectionOutcome::EmptyClipboard;
        }
        if !terraform.has_world() {
            log_to!(self.logger, LOG_TARGET, Level::Warn, "cannot paste without a world");
            return SelectionOutcome::NoWorld;
        }

        let mut group = terraform.begin_command_group();
        for voxel in self.clipboard.placed_at(target) {
            group.record_voxel_change(voxel.position, Voxel::new(voxel.voxel_type));
        }
        let changed = group.end_command_group();
        log_to!(
            self.logger,
            LOG_TARGET,
            Level::Info,
            "pasted {} voxels at {:?} ({} changed)",
            self.clipboard.len(),
            target,
            changed
        );
        SelectionOutcome::Applied { changed }
    }

    /// Moves the selected voxels by `delta` as one undo entry.
    ///
    /// Every source cell is cleared before any destination is written, so overlapping moves
    /// keep their content. A voxel only moves if its source could be cleared (bedrock cannot)
    /// and its destination is a writable cell inside the world. Voxels that cannot move stay
    /// selected where they are; the rest of the selection follows the voxels.
    pub fn move_selection(
        &mut self,
        delta: Vector3<i32>,
        terraform: &mut TerraformingSystem,
    ) -> SelectionOutcome {
        if let Some(refusal) = self.check_selection(terraform, "move") {
            return refusal;
        }
        if delta == Vector3::new(0, 0, 0) {
            return SelectionOutcome::Applied { changed: 0 };
        }

        let mut group = terraform.begin_command_group();
        let mut next = Vec::with_capacity(self.selection.len());
        let mut refill = Vec::new();
        for voxel in self.selection.voxels() {
            let destination = checked_offset(voxel.position, delta).filter(|&destination| {
                group
                    .world()
                    .and_then(|world| world.voxel_or_air(destination))
                    .is_some_and(|current| current.voxel_type().is_editable())
            });
            let Some(destination) = destination else {
                next.push(*voxel);
                continue;
            };
            let cleared = group.record_voxel_change(voxel.position, Voxel::AIR)
                || group
                    .world()
                    .and_then(|world| world.voxel_or_air(voxel.position))
                    .is_some_and(|current| current.is_air());
            if cleared {
                let moved = SelectedVoxel {
                    position: destination,
                    voxel_type: voxel.voxel_type,
                };
                refill.push(moved);
                next.push(moved);
            } else {
                next.push(*voxel);
            }
        }
        for voxel in &refill {
            group.record_voxel_change(voxel.position, Voxel::new(voxel.voxel_type));
        }
        let changed = group.end_command_group();

        let stayed = self.selection.len() - refill.len();
        self.selection = VoxelSelection::from_voxels(next);
        log_to!(
            self.logger,
            LOG_TARGET,
            Level::Info,
            "moved {} voxels by {:?} ({} stayed)",
            refill.len(),
            delta,
            stayed
        );
        SelectionOutcome::Applied { changed }
    }

    /// Starts previewing the clipboard at `position`.
    ///
    /// # Returns
    /// `false`, with a warning, if the clipboard is empty.
    pub fn enable_paste_preview(&mut self, position: WorldPos) -> bool {
        if self.clipboard.is_empty() {
            log_to!(
                self.logger,
                LOG_TARGET,
                Level::Warn,
                "cannot enable paste preview: clipboard is empty"
            );
            return false;
        }
        self.preview.enable(position);
        true
    }

    /// Moves the paste preview. Ignored unless the preview is enabled.
    pub fn update_paste_preview(&mut self, position: WorldPos) {
        self.preview.update(position);
    }

    /// Hides the paste preview.
    pub fn disable_paste_preview(&mut self) {
        self.preview.disable();
    }

    /// Whether the paste preview is shown.
    pub fn is_paste_preview_active(&self) -> bool {
        self.preview.is_active()
    }

    /// The voxels a paste at the preview position would write.
    pub fn paste_preview_data(&self) -> Option<Vec<(WorldPos, VoxelType)>> {
        self.preview.project(&self.clipboard)
    }

    /// The box a paste at the preview position would cover.
    pub fn paste_preview_bounds(&self) -> Option<SelectionBounds> {
        self.preview.bounds(&self.clipboard)
    }

    fn check_selection(
        &self,
        terraform: &TerraformingSystem,
        action: &str,
    ) -> Option<SelectionOutcome> {
        if self.selection.is_empty() {
            log_to!(self.logger, LOG_TARGET, Level::Warn, "nothing to {}", action);
            return Some(SelectionOutcome::EmptySelection);
        }
        if !terraform.has_world() {
            log_to!(self.logger, LOG_TARGET, Level::Warn, "cannot {} without a world", action);
            return Some(SelectionOutcome::NoWorld);
        }
        None
    }

    fn clear_selected_voxels(&self, terraform: &mut TerraformingSystem) -> usize {
        let mut group = terraform.begin_command_group();
        for voxel in self.selection.voxels() {
            group.record_voxel_change(voxel.position, Voxel::AIR);
        }
        group.end_command_group()
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use crate::core::config::EditorConfig;
    use crate::core::logging::test_support::CapturingLogger;

    use super::*;

    fn stone_layer(world: &mut VoxelWorld) {
        for x in 0..16 {
            for z in 0..16 {
                world.set_voxel(WorldPos::new(x, 60, z), Voxel::new(VoxelType::STONE));
            }
        }
    }

    fn select(manager: &mut SelectionManager, world: &VoxelWorld, a: WorldPos, b: WorldPos) -> SelectionOutcome {
        manager.start_selection(a);
        manager.update_selection(b);
        manager.finalize_selection(Some(world))
    }

    #[test]
    fn test_selection_state_machine() {
        let mut world = VoxelWorld::new();
        stone_layer(&mut world);
        let mut manager = SelectionManager::default();
        assert!(!manager.has_selection());

        manager.update_selection(WorldPos::new(3, 3, 3));
        assert_eq!(manager.selection_bounds(), None);

        manager.start_selection(WorldPos::new(4, 62, 4));
        manager.update_selection(WorldPos::new(0, 58, 0));
        assert!(manager.is_selecting());
        assert!(manager.has_selection());
        assert_eq!(
            manager.selection_bounds(),
            Some(SelectionBounds::from_corners(WorldPos::new(0, 58, 0), WorldPos::new(4, 62, 4)))
        );

        assert_eq!(manager.finalize_selection(Some(&world)), SelectionOutcome::Completed { voxels: 25 });
        assert!(!manager.is_selecting());
        assert_eq!(
            manager.selection_bounds(),
            Some(SelectionBounds::from_corners(WorldPos::new(0, 60, 0), WorldPos::new(4, 60, 4)))
        );

        assert_eq!(manager.finalize_selection(Some(&world)), SelectionOutcome::EmptySelection);
        manager.clear_selection();
        assert!(!manager.has_selection());
        assert_eq!(manager.selection_size(), 0);
    }

    #[test]
    fn test_finalize_without_world() {
        let mut manager = SelectionManager::default();
        manager.start_selection(WorldPos::new(0, 0, 0));
        assert_eq!(manager.finalize_selection(None), SelectionOutcome::NoWorld);
        assert!(!manager.is_selecting());
    }

    #[test]
    fn test_delete_is_one_undo_entry() {
        let mut world = VoxelWorld::new();
        stone_layer(&mut world);
        let mut manager = SelectionManager::default();
        select(&mut manager, &world, WorldPos::new(0, 60, 0), WorldPos::new(2, 60, 2));

        let mut terraform = TerraformingSystem::new(Some(&mut world));
        assert_eq!(manager.delete_selected(&mut terraform), SelectionOutcome::Applied { changed: 9 });
        assert!(!manager.has_selection());
        assert_eq!(terraform.history_size(), 1);
        assert!(terraform.undo());
        assert!(terraform.world().is_some_and(|world| world.is_solid(WorldPos::new(1, 60, 1))));
    }

    #[test]
    fn test_refusals_are_reported_and_logged() {
        let capture = CapturingLogger::shared();
        let mut manager = SelectionManager::new(capture.clone());
        let mut world = VoxelWorld::new();
        let mut terraform =
            TerraformingSystem::with_config(Some(&mut world), &EditorConfig::default(), capture.clone());

        assert_eq!(manager.cut_to_clipboard(&mut terraform), SelectionOutcome::EmptySelection);
        assert_eq!(manager.delete_selected(&mut terraform), SelectionOutcome::EmptySelection);
        assert_eq!(
            manager.paste_from_clipboard(WorldPos::new(0, 0, 0), &mut terraform),
            SelectionOutcome::EmptyClipboard
        );
        assert!(!manager.enable_paste_preview(WorldPos::new(0, 0, 0)));
        assert!(!terraform.can_undo());

        let warnings = capture.messages(Level::Warn);
        assert_eq!(warnings[0], "nothing to cut");
        assert_eq!(warnings[1], "nothing to delete");
        assert_eq!(warnings[2], "nothing to paste: clipboard is empty");
        assert_eq!(warnings[3], "cannot enable paste preview: clipboard is empty");
    }

    #[test]
    fn test_operations_without_a_world() {
        let mut world = VoxelWorld::new();
        stone_layer(&mut world);
        let mut manager = SelectionManager::default();
        select(&mut manager, &world, WorldPos::new(0, 60, 0), WorldPos::new(1, 60, 1));

        let mut terraform = TerraformingSystem::new(None);
        assert_eq!(manager.delete_selected(&mut terraform), SelectionOutcome::NoWorld);
        assert_eq!(manager.copy_to_clipboard(None), SelectionOutcome::NoWorld);
        assert_eq!(manager.selection_size(), 4);
        assert!(!manager.has_clipboard_data());
    }

    #[test]
    fn test_move_selection_follows_voxels() {
        let mut world = VoxelWorld::new();
        stone_layer(&mut world);
        world.set_voxel(WorldPos::new(0, 61, 0), Voxel::new(VoxelType::GLASS));
        let mut manager = SelectionManager::default();
        select(&mut manager, &world, WorldPos::new(0, 61, 0), WorldPos::new(0, 61, 0));

        let mut terraform = TerraformingSystem::new(Some(&mut world));
        let outcome = manager.move_selection(Vector3::new(3, 2, 0), &mut terraform);
        assert_eq!(outcome, SelectionOutcome::Applied { changed: 2 });
        assert_eq!(manager.selected_voxels()[0].position, WorldPos::new(3, 63, 0));
        assert_eq!(
            manager.selection_bounds(),
            Some(SelectionBounds::from_corners(WorldPos::new(3, 63, 0), WorldPos::new(3, 63, 0)))
        );

        let world = terraform.world().unwrap();
        assert_eq!(world.get_voxel(WorldPos::new(3, 63, 0)), Some(&Voxel::new(VoxelType::GLASS)));
        assert_eq!(world.get_voxel(WorldPos::new(0, 61, 0)), Some(&Voxel::AIR));
    }

    #[test]
    fn test_move_never_clones_bedrock() {
        let mut world = VoxelWorld::new();
        world.set_voxel(WorldPos::new(0, 0, 0), Voxel::new(VoxelType::BEDROCK));
        world.set_voxel(WorldPos::new(1, 0, 0), Voxel::new(VoxelType::STONE));
        let mut manager = SelectionManager::default();
        select(&mut manager, &world, WorldPos::new(0, 0, 0), WorldPos::new(1, 0, 0));
        assert_eq!(manager.selection_size(), 2);

        let mut terraform = TerraformingSystem::new(Some(&mut world));
        let outcome = manager.move_selection(Vector3::new(3, 0, 0), &mut terraform);
        // The stone leaves (1, 0, 0) and lands on (4, 0, 0); the bedrock stays put.
        assert_eq!(outcome, SelectionOutcome::Applied { changed: 2 });

        let world = terraform.world().unwrap();
        assert_eq!(world.get_voxel(WorldPos::new(0, 0, 0)), Some(&Voxel::new(VoxelType::BEDROCK)));
        assert_eq!(world.get_voxel(WorldPos::new(3, 0, 0)), Some(&Voxel::AIR));
        assert_eq!(world.get_voxel(WorldPos::new(4, 0, 0)), Some(&Voxel::new(VoxelType::STONE)));

        let positions: Vec<WorldPos> =
            manager.selected_voxels().iter().map(|voxel| voxel.position).collect();
        assert_eq!(positions, vec![WorldPos::new(0, 0, 0), WorldPos::new(4, 0, 0)]);
    }

    #[test]
    fn test_move_past_the_world_edge_leaves_voxels_in_place() {
        let mut world = VoxelWorld::new();
        world.set_voxel(WorldPos::new(i32::MAX, 250, 0), Voxel::new(VoxelType::GLASS));
        let mut manager = SelectionManager::default();
        select(
            &mut manager,
            &world,
            WorldPos::new(i32::MAX, 250, 0),
            WorldPos::new(i32::MAX, 250, 0),
        );

        let mut terraform = TerraformingSystem::new(Some(&mut world));
        for delta in [Vector3::new(1, 0, 0), Vector3::new(0, 10, 0)] {
            assert_eq!(
                manager.move_selection(delta, &mut terraform),
                SelectionOutcome::Applied { changed: 0 }
            );
        }
        assert!(!terraform.can_undo());
        assert_eq!(manager.selected_voxels()[0].position, WorldPos::new(i32::MAX, 250, 0));
        assert!(terraform
            .world()
            .is_some_and(|world| world.is_solid(WorldPos::new(i32::MAX, 250, 0))));
    }

    #[test]
    fn test_paste_past_the_coordinate_edge_is_a_no_op() {
        let mut world = VoxelWorld::new();
        stone_layer(&mut world);
        let mut manager = SelectionManager::default();
        select(&mut manager, &world, WorldPos::new(0, 60, 0), WorldPos::new(3, 60, 0));
        manager.copy_to_clipboard(Some(&world));

        let mut terraform = TerraformingSystem::new(Some(&mut world));
        assert_eq!(
            manager.paste_from_clipboard(WorldPos::new(i32::MAX - 1, 60, 0), &mut terraform),
            SelectionOutcome::Applied { changed: 0 }
        );
        assert_eq!(
            manager.paste_from_clipboard(WorldPos::new(i32::MIN, 60, 0), &mut terraform),
            SelectionOutcome::Applied { changed: 4 }
        );
        assert_eq!(terraform.history_size(), 1);
    }

    #[test]
    fn test_overlapping_move_keeps_content() {
        let mut world = VoxelWorld::new();
        stone_layer(&mut world);
        let mut manager = SelectionManager::default();
        select(&mut manager, &world, WorldPos::new(0, 60, 0), WorldPos::new(3, 60, 0));

        let mut terraform = TerraformingSystem::new(Some(&mut world));
        assert_eq!(
            manager.move_selection(Vector3::new(0, 0, 0), &mut terraform),
            SelectionOutcome::Applied { changed: 0 }
        );
        assert!(!terraform.can_undo());
        manager.move_selection(Vector3::new(1, 1, 0), &mut terraform);
        let world = terraform.world().unwrap();
        for x in 1..=4 {
            assert!(world.is_solid(WorldPos::new(x, 61, 0)));
        }
        assert!(!world.is_solid(WorldPos::new(0, 60, 0)));
    }

    #[test]
    fn test_paste_preview_tracks_clipboard() {
        let mut world = VoxelWorld::new();
        stone_layer(&mut world);
        let mut manager = SelectionManager::default();
        select(&mut manager, &world, WorldPos::new(2, 60, 2), WorldPos::new(3, 60, 3));
        assert_eq!(manager.copy_to_clipboard(Some(&world)), SelectionOutcome::Completed { voxels: 4 });

        manager.update_paste_preview(WorldPos::new(9, 9, 9));
        assert!(!manager.is_paste_preview_active());
        assert!(manager.enable_paste_preview(WorldPos::new(10, 70, 10)));
        manager.update_paste_preview(WorldPos::new(12, 70, 10));

        let data = manager.paste_preview_data().unwrap();
        assert_eq!(data.len(), 4);
        assert!(data.contains(&(WorldPos::new(13, 70, 11), VoxelType::STONE)));
        let bounds = manager.paste_preview_bounds().unwrap();
        assert_eq!(bounds.min, WorldPos::new(12, 70, 10));
        assert_eq!(bounds.max, WorldPos::new(13, 70, 11));
        assert!(!world.is_solid(WorldPos::new(12, 70, 10)));

        manager.disable_paste_preview();
        assert!(manager.paste_preview_data().is_none());
    }
}

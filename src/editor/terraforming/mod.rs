//! # Terraforming System
//!
//! The stateful tool engine. It holds the active tool, mode, material and size, runs the fill
//! algorithms against a borrowed [`VoxelWorld`], and keeps the undo/redo history.
//!
//! ## Write Path
//!
//! Every editing write goes through one recording function. It rejects out-of-range heights,
//! writes that would not change the cell, and writes onto bedrock, and it records a
//! [`TerraformCommand`] for everything else. The commands of one action form one batch, so a
//! single undo reverts a whole brush dab or line stroke.
//!
//! ```
//! use voxel_terraform::editor::terraforming::{tool::TerraformTool, TerraformingSystem};
//! use voxel_terraform::voxels::{voxel::voxel_type::VoxelType, world::VoxelWorld, WorldPos};
//!
//! let mut world = VoxelWorld::new();
//! let mut terraform = TerraformingSystem::new(Some(&mut world));
//! terraform.set_tool(TerraformTool::FilledCube);
//! terraform.set_voxel_type(VoxelType::DIRT);
//!
//! assert!(terraform.apply_tool(WorldPos::new(0, 64, 0)));
//! assert!(terraform.undo());
//! assert!(!terraform.can_undo());
//! ```

pub mod command_group;
pub mod history;
mod stroke;
pub mod tool;

use log::Level;

use crate::core::config::EditorConfig;
use crate::core::logging::{facade_logger, SharedLogger};
use crate::log_to;
use crate::voxels::coordinates::is_valid_height;
use crate::voxels::voxel::voxel_type::VoxelType;
use crate::voxels::world::VoxelWorld;
use crate::voxels::WorldPos;

use command_group::CommandGroup;
use history::{CommandBatch, CommandHistory};
pub use history::TerraformCommand;
use stroke::Stroke;
use tool::{line_points, Footprint, TerraformMode, TerraformTool};

const LOG_TARGET: &str = "voxel_terraform::terraforming";

/// Applies terraforming tools to a borrowed world and records them for undo.
pub struct TerraformingSystem<'w> {
    world: Option<&'w mut VoxelWorld>,
    tool: TerraformTool,
    mode: TerraformMode,
    voxel_type: VoxelType,
    tool_size: i32,
    min_tool_size: i32,
    max_tool_size: i32,
    history: CommandHistory,
    logger: SharedLogger,
}

impl<'w> TerraformingSystem<'w> {
    /// Creates a system with the default configuration, logging through the `log` facade.
    pub fn new(world: Option<&'w mut VoxelWorld>) -> Self {
        Self::with_config(world, &EditorConfig::default(), facade_logger())
    }

    /// Creates a system from a configuration and an injected logger.
    ///
    /// # Arguments
    /// * `world` - The world to edit. Without one every editing call is a no-op.
    /// * `config` - Starting tool state, size bounds and undo capacity.
    /// * `logger` - Receives this system's log records.
    pub fn with_config(
        world: Option<&'w mut VoxelWorld>,
        config: &EditorConfig,
        logger: SharedLogger,
    ) -> Self {
        let config = config.clone().normalized();
        TerraformingSystem {
            world,
            tool: config.default_tool,
            mode: config.default_mode,
            voxel_type: config.default_voxel_type,
            tool_size: config.default_tool_size,
            min_tool_size: config.min_tool_size,
            max_tool_size: config.max_tool_size,
            history: CommandHistory::new(config.undo_capacity),
            logger,
        }
    }

    /// Points the system at another world, or at none.
    ///
    /// The history refers to positions in the previous world, so it is cleared.
    pub fn set_world(&mut self, world: Option<&'w mut VoxelWorld>) {
        self.world = world;
        self.history.clear();
    }

    /// Read access to the world being edited.
    pub fn world(&self) -> Option<&VoxelWorld> {
        self.world.as_deref()
    }

    /// Whether a world is attached.
    pub fn has_world(&self) -> bool {
        self.world.is_some()
    }

    /// The logger this system writes to. Components working alongside it share the same one.
    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// Selects the active tool.
    pub fn set_tool(&mut self, tool: TerraformTool) {
        self.tool = tool;
        log_to!(self.logger, LOG_TARGET, Level::Debug, "tool set to {:?}", tool);
    }

    /// The active tool.
    pub fn tool(&self) -> TerraformTool {
        self.tool
    }

    /// Selects how tools write cells.
    pub fn set_mode(&mut self, mode: TerraformMode) {
        self.mode = mode;
        log_to!(self.logger, LOG_TARGET, Level::Debug, "mode set to {:?}", mode);
    }

    /// The active mode.
    pub fn mode(&self) -> TerraformMode {
        self.mode
    }

    /// Sets the material tools write. Air is not a material and is ignored; use
    /// [`TerraformMode::Remove`] to clear voxels.
    pub fn set_voxel_type(&mut self, voxel_type: VoxelType) {
        if voxel_type.is_air() {
            log_to!(self.logger, LOG_TARGET, Level::Debug, "ignoring air as a material");
            return;
        }
        self.voxel_type = voxel_type;
        log_to!(self.logger, LOG_TARGET, Level::Debug, "material set to {:?}", voxel_type);
    }

    /// The active material.
    pub fn voxel_type(&self) -> VoxelType {
        self.voxel_type
    }

    /// Sets the tool radius, clamped into the configured size range.
    pub fn set_tool_size(&mut self, size: i32) {
        self.tool_size = size.clamp(self.min_tool_size, self.max_tool_size);
        log_to!(self.logger, LOG_TARGET, Level::Debug, "tool size set to {}", self.tool_size);
    }

    /// The active tool radius.
    pub fn tool_size(&self) -> i32 {
        self.tool_size
    }

    /// Runs the active tool centered at `center`.
    ///
    /// # Returns
    /// `true` if at least one voxel changed. Otherwise nothing is recorded.
    pub fn apply_tool(&mut self, center: WorldPos) -> bool {
        if !is_valid_height(center.y) {
            return false;
        }
        let Some(world) = self.world.as_deref_mut() else {
            return false;
        };

        let radius = self.tool_size;
        let mut stroke = Stroke::new(world, self.mode, self.voxel_type);
        match self.tool {
            TerraformTool::SingleBlock | TerraformTool::Line => {
                stroke.apply_filtered(center);
            }
            TerraformTool::Brush | TerraformTool::FilledSphere => {
                stroke.fill(center, Footprint::Ball, radius)
            }
            TerraformTool::Sphere => stroke.fill(center, Footprint::Shell, radius),
            TerraformTool::Cube => stroke.fill(center, Footprint::Frame, radius),
            TerraformTool::FilledCube => stroke.fill(center, Footprint::Box, radius),
            TerraformTool::Flatten => stroke.flatten(center, radius),
            TerraformTool::Smooth => stroke.smooth(center, radius),
            TerraformTool::Paint => stroke.paint(center, radius),
        }

        let batch = stroke.into_batch();
        self.commit_batch(batch, "apply tool")
    }

    /// Draws a stroke from `start` to `end`, both inclusive.
    ///
    /// Each point of the 3D line gets a brush dab if the brush is active, or a single voxel
    /// otherwise. The whole stroke is recorded as one batch. Points above or below the world
    /// are skipped, so a stroke crossing the height limit still paints its in-range part.
    ///
    /// # Returns
    /// `true` if at least one voxel changed.
    pub fn apply_tool_line(&mut self, start: WorldPos, end: WorldPos) -> bool {
        let Some(world) = self.world.as_deref_mut() else {
            return false;
        };

        let brush = self.tool == TerraformTool::Brush;
        let radius = self.tool_size;
        let mut stroke = Stroke::new(world, self.mode, self.voxel_type);
        for point in line_points(start, end) {
            if brush {
                stroke.fill(point, Footprint::Ball, radius);
            } else {
                stroke.apply_filtered(point);
            }
        }

        let batch = stroke.into_batch();
        self.commit_batch(batch, "line stroke")
    }

    /// Opens a command group whose writes become a single undo entry.
    pub fn begin_command_group(&mut self) -> CommandGroup<'_, 'w> {
        CommandGroup::new(self)
    }

    /// Reverts the most recent batch.
    ///
    /// # Returns
    /// `false` if there is nothing to undo or no world is attached.
    pub fn undo(&mut self) -> bool {
        let Some(world) = self.world.as_deref_mut() else {
            return false;
        };
        let Some(batch) = self.history.pop_undo() else {
            return false;
        };

        for command in batch.iter().rev() {
            world.set_voxel(command.position, command.old_voxel);
        }
        log_to!(self.logger, LOG_TARGET, Level::Info, "undo: restored {} voxels", batch.len());
        self.history.push_redo(batch);
        true
    }

    /// Reapplies the most recently undone batch.
    ///
    /// # Returns
    /// `false` if there is nothing to redo or no world is attached.
    pub fn redo(&mut self) -> bool {
        let Some(world) = self.world.as_deref_mut() else {
            return false;
        };
        let Some(batch) = self.history.pop_redo() else {
            return false;
        };

        for command in &batch {
            world.set_voxel(command.position, command.new_voxel);
        }
        log_to!(self.logger, LOG_TARGET, Level::Info, "redo: reapplied {} voxels", batch.len());
        self.history.push_undo(batch);
        true
    }

    /// Whether [`Self::undo`] would do anything.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether [`Self::redo`] would do anything.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of undoable batches. Never exceeds the configured capacity.
    pub fn history_size(&self) -> usize {
        self.history.undo_len()
    }

    /// Number of redoable batches.
    pub fn redo_size(&self) -> usize {
        self.history.redo_len()
    }

    /// Forgets all undo and redo state. The world is left as it is.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Pushes a finished command group batch. Empty batches are dropped.
    pub(super) fn commit_group(&mut self, batch: CommandBatch) -> bool {
        let changed = batch.len();
        if !self.history.record(batch) {
            return false;
        }
        log_to!(self.logger, LOG_TARGET, Level::Info, "command group: changed {} voxels", changed);
        true
    }

    /// Pushes a finished tool batch. Empty batches are dropped.
    fn commit_batch(&mut self, batch: CommandBatch, action: &str) -> bool {
        let changed = batch.len();
        if !self.history.record(batch) {
            return false;
        }
        log_to!(
            self.logger,
            LOG_TARGET,
            Level::Info,
            "{}: changed {} voxels ({:?}, {:?})",
            action,
            changed,
            self.tool,
            self.mode
        );
        true
    }
}

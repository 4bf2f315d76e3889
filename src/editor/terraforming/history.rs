//! # Command History
//!
//! Bounded undo and redo stacks of command batches.
//!
//! The undo side is a ring buffer: once it holds `capacity` batches, pushing another drops the
//! oldest from the front. Recording a fresh batch invalidates everything on the redo side.

use std::collections::VecDeque;

use crate::voxels::voxel::Voxel;
use crate::voxels::WorldPos;

/// One recorded voxel change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TerraformCommand {
    /// Where the change happened.
    pub position: WorldPos,
    /// The voxel before the change.
    pub old_voxel: Voxel,
    /// The voxel after the change.
    pub new_voxel: Voxel,
}

/// The commands produced by one logical action, in the order they were applied.
pub type CommandBatch = Vec<TerraformCommand>;

/// Undo and redo stacks for command batches.
#[derive(Debug)]
pub struct CommandHistory {
    undo_stack: VecDeque<CommandBatch>,
    redo_stack: Vec<CommandBatch>,
    capacity: usize,
}

impl CommandHistory {
    /// Creates an empty history holding at most `capacity` undoable batches (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        CommandHistory {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: Vec::new(),
            capacity,
        }
    }

    /// Records the batch of a new action and clears the redo stack.
    ///
    /// Empty batches are ignored and leave the redo stack untouched.
    ///
    /// # Returns
    /// `true` if the batch was stored.
    pub fn record(&mut self, batch: CommandBatch) -> bool {
        if batch.is_empty() {
            return false;
        }
        self.redo_stack.clear();
        self.push_undo(batch);
        true
    }

    /// Pushes onto the undo stack, evicting the oldest batch when full. The redo stack is kept.
    pub fn push_undo(&mut self, batch: CommandBatch) {
        while self.undo_stack.len() >= self.capacity {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(batch);
    }

    /// Takes the most recent undoable batch.
    pub fn pop_undo(&mut self) -> Option<CommandBatch> {
        self.undo_stack.pop_back()
    }

    /// Pushes an undone batch so it can be redone.
    pub fn push_redo(&mut self, batch: CommandBatch) {
        self.redo_stack.push(batch);
    }

    /// Takes the most recently undone batch.
    pub fn pop_redo(&mut self) -> Option<CommandBatch> {
        self.redo_stack.pop()
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undoable batches.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redoable batches.
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Maximum number of undoable batches.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forgets everything on both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

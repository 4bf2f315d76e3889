//! # Editor
//!
//! The interactive editing layer on top of voxel storage.
//!
//! * `terraforming` - Tool state, fill algorithms and the undo/redo history
//! * `selection` - Box selection, clipboard and paste preview, recorded through the same history
//!
//! Both components borrow the world rather than own it. A host keeps the `VoxelWorld` by value
//! and lends it to a `TerraformingSystem` for the length of an editing session.

pub mod selection;
pub mod terraforming;

//! # Voxel Storage
//!
//! This module contains the voxel data model: the material types, the dense chunk storage, and
//! the sparse world that owns every chunk.
//!
//! ## Architecture
//!
//! The storage is organized into several key components:
//!
//! * **Voxel**: Defines individual voxel cells and the closed set of materials
//! * **Chunk**: Manages fixed-size dense 3D arrays of voxels, the unit of dirty invalidation
//! * **World**: Owns the chunks and provides a unified interface for the entire voxel space
//! * **Coordinates**: Converts between world positions and (chunk, local) pairs
//!
//! ## Data Flow
//!
//! 1. World receives requests for voxel access or modification
//! 2. World delegates to the appropriate chunk (creating it on first solid write)
//! 3. Changes mark the chunk dirty
//! 4. The renderer drains the dirty set and rebuilds meshes on its own schedule
//!
//! ## Thread Safety
//!
//! Storage is single-threaded. All writes go through [`world::VoxelWorld::set_voxel`]; a
//! multi-threaded host would guard that one call.

pub mod chunk;
pub mod coordinates;
pub mod voxel;
pub mod world;

pub use coordinates::{ChunkPos, LocalPos, WorldPos};

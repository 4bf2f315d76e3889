//! # World Module
//!
//! This module provides the `VoxelWorld` struct which owns every chunk of the voxel world.
//! It translates world positions into (chunk, local) pairs and is the only place voxel data
//! is written.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach: a chunk only exists once a solid voxel has been
//! written into it or it was created explicitly. Reads against a missing chunk report "no
//! voxel" and never allocate, which keeps scans over empty space cheap.
//!
//! ## Dirty Signal
//!
//! Every changing write marks the owning chunk dirty. The mesh regenerator polls
//! [`VoxelWorld::take_dirty_chunks`]; the world never waits on it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::chunk::Chunk;
use super::coordinates::{local_position, ChunkPos, WorldPos};
use super::voxel::Voxel;

/// Represents a voxel world composed of multiple chunks.
///
/// The world is stored as a sparse 2D grid of chunk columns. Every chunk spans the full
/// vertical extent of the world.
///
/// # Examples
///
/// ```
/// use voxel_terraform::voxels::{voxel::voxel_type::VoxelType, voxel::Voxel, world::VoxelWorld, WorldPos};
///
/// let mut world = VoxelWorld::new();
/// assert!(world.get_voxel(WorldPos::new(-3, 64, 7)).is_none());
///
/// world.set_voxel(WorldPos::new(-3, 64, 7), Voxel::new(VoxelType::STONE));
/// assert_eq!(world.chunk_count(), 1);
/// ```
#[derive(Default)]
pub struct VoxelWorld {
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<ChunkPos, Chunk>,
}

impl VoxelWorld {
    /// Creates a new, empty world with no chunks loaded.
    pub fn new() -> Self {
        VoxelWorld {
            chunks: HashMap::new(),
        }
    }

    /// Retrieves the chunk at the specified chunk coordinates, if it is loaded.
    pub fn get_chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    /// Retrieves the chunk at the specified chunk coordinates for modification.
    pub fn get_chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }

    /// Returns the chunk at `pos`, creating an empty one if none is loaded.
    pub fn load_chunk(&mut self, pos: ChunkPos) -> &mut Chunk {
        self.chunks.entry(pos).or_insert_with(|| Chunk::new(pos))
    }

    /// Inserts a fully built chunk, replacing any chunk at the same position.
    ///
    /// This is the path serializers use to hand loaded data back to the world.
    ///
    /// # Returns
    /// The chunk that was previously loaded at that position, if any.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> Option<Chunk> {
        self.chunks.insert(chunk.position(), chunk)
    }

    /// Removes the chunk at `pos` from the world and hands it back to the caller.
    pub fn unload_chunk(&mut self, pos: ChunkPos) -> Option<Chunk> {
        self.chunks.remove(&pos)
    }

    /// Drops every loaded chunk.
    pub fn clear_all_chunks(&mut self) {
        self.chunks.clear();
    }

    /// Iterates over all loaded chunks in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// The number of loaded chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Gets the voxel at a world position.
    ///
    /// This never creates a chunk.
    ///
    /// # Returns
    /// `None` if the owning chunk is not loaded or the y component is outside the world.
    pub fn get_voxel(&self, pos: WorldPos) -> Option<&Voxel> {
        let local = local_position(pos)?;
        self.chunks
            .get(&ChunkPos::from_world_pos(pos))?
            .get_voxel(local.x, local.y, local.z)
    }

    /// Gets the voxel at a world position, reading cells of unloaded chunks as air.
    ///
    /// # Returns
    /// `None` only if the y component is outside the world.
    pub fn voxel_or_air(&self, pos: WorldPos) -> Option<Voxel> {
        local_position(pos)?;
        Some(self.get_voxel(pos).copied().unwrap_or(Voxel::AIR))
    }

    /// Writes a voxel at a world position, creating the owning chunk if needed.
    ///
    /// Writing air into an unloaded chunk does nothing: the cell already reads as air and no
    /// chunk is allocated for it.
    ///
    /// # Returns
    /// `true` if the stored value changed. Positions with an out-of-range y are rejected.
    pub fn set_voxel(&mut self, pos: WorldPos, voxel: Voxel) -> bool {
        let Some(local) = local_position(pos) else {
            return false;
        };

        let chunk_pos = ChunkPos::from_world_pos(pos);
        let chunk = match self.chunks.entry(chunk_pos) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                if voxel.is_air() {
                    return false;
                }
                entry.insert(Chunk::new(chunk_pos))
            }
        };
        chunk.set_voxel(local.x, local.y, local.z, voxel)
    }

    /// Whether the voxel at `pos` is loaded and solid.
    pub fn is_solid(&self, pos: WorldPos) -> bool {
        self.get_voxel(pos).is_some_and(|voxel| voxel.is_solid())
    }

    /// Finds the height of the highest solid voxel in the world column at `(x, z)`.
    ///
    /// # Returns
    /// `None` if the column's chunk is not loaded or the column holds no solid voxel.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        let column_base = WorldPos::new(x, 0, z);
        let local = local_position(column_base)?;
        let chunk = self.chunks.get(&ChunkPos::from_world_pos(column_base))?;
        chunk.top_solid_y(local.x, local.z).map(|y| y as i32)
    }

    /// Positions of all chunks currently flagged dirty.
    pub fn dirty_chunks(&self) -> Vec<ChunkPos> {
        let mut dirty: Vec<ChunkPos> = self
            .chunks
            .values()
            .filter(|chunk| chunk.is_dirty())
            .map(|chunk| chunk.position())
            .collect();
        dirty.sort();
        dirty
    }

    /// Returns the dirty chunk positions and clears their flags.
    ///
    /// The mesh regenerator calls this once per frame to learn what to rebuild.
    pub fn take_dirty_chunks(&mut self) -> Vec<ChunkPos> {
        let mut dirty = Vec::new();
        for chunk in self.chunks.values_mut().filter(|chunk| chunk.is_dirty()) {
            chunk.clear_dirty();
            dirty.push(chunk.position());
        }
        dirty.sort();
        dirty
    }
}

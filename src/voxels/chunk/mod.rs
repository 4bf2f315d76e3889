//! # Chunk Module
//!
//! This module provides the `Chunk` struct, a dense 16x256x16 block of voxel storage, and the
//! iterators external collaborators use to enumerate its cells.
//!
//! ## Storage Layout
//!
//! Chunks keep two views of the same data:
//! - `voxels`: A dense vector holding one `Voxel` per cell, so every cell always has a value
//! - `solid_array`: A bit vector (1 bit per cell) mirroring which cells are solid
//!
//! Both are stored in the same order: x varies fastest, then z, then y. A whole horizontal
//! plane of the chunk is therefore contiguous, and a column is a strided walk through memory.
//!
//! ### Performance Characteristics
//! - **Voxel Lookup**: O(1) - Direct index into `voxels`
//! - **Solidity Check**: O(1) - Just check the bit in `solid_array`
//! - **Solid Iteration**: Skips air using the set bits of `solid_array`
//!
//! ## Dirty Tracking
//!
//! Every write that changes a cell marks the chunk dirty. The flag is the signal the mesh
//! regenerator consumes; the chunk itself never clears it.

use bitvec::prelude::BitVec;

use chunk_iteration::{ChunkSolidIterator, ChunkVoxelIterator};

use super::coordinates::{
    to_world_pos, ChunkPos, LocalPos, WorldPos, CHUNK_HEIGHT, CHUNK_PLANE_SIZE, CHUNK_SIZE,
    CHUNK_VOLUME,
};
use super::voxel::voxel_type::VoxelType;
use super::voxel::Voxel;

pub mod chunk_iteration;

/// Represents a 16x256x16 column of voxels in the world.
///
/// Chunks are the unit of storage and of invalidation. Each chunk owns its cell array and
/// knows its position in chunk coordinates.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not world coordinates).
    position: ChunkPos,

    /// One voxel per cell, indexed by `Chunk::index`.
    voxels: Vec<Voxel>,

    /// Bit `i` is set when `voxels[i]` is solid.
    solid_array: BitVec,

    /// Number of set bits in `solid_array`.
    solid_count: usize,

    /// Whether the chunk changed since the renderer last consumed it.
    dirty: bool,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all cells are air).
    ///
    /// The chunk starts dirty so that the renderer picks it up the first time it is seen.
    pub fn new(position: ChunkPos) -> Self {
        Chunk {
            position,
            voxels: vec![Voxel::AIR; CHUNK_VOLUME],
            solid_array: BitVec::repeat(false, CHUNK_VOLUME),
            solid_count: 0,
            dirty: true,
        }
    }

    /// Creates a chunk where every cell holds `voxel_type`.
    pub fn filled(position: ChunkPos, voxel_type: VoxelType) -> Self {
        let mut chunk = Chunk::new(position);
        chunk.fill(Voxel::new(voxel_type));
        chunk
    }

    /// Rebuilds a chunk from the raw cell bytes produced by [`Chunk::as_bytes`].
    ///
    /// # Returns
    /// `None` if `bytes` does not hold exactly one byte per cell, or if any byte is not a known
    /// voxel type.
    pub fn from_bytes(position: ChunkPos, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != CHUNK_VOLUME {
            return None;
        }

        let mut chunk = Chunk::new(position);
        for (index, &raw) in bytes.iter().enumerate() {
            let voxel_type = VoxelType::from_int(raw)?;
            chunk.write_index(index, Voxel::new(voxel_type));
        }
        Some(chunk)
    }

    /// The position of this chunk in chunk coordinates.
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    /// Converts local coordinates to the flat storage index.
    fn index(x: usize, y: usize, z: usize) -> usize {
        x + CHUNK_SIZE as usize * z + CHUNK_PLANE_SIZE as usize * y
    }

    /// Converts a flat storage index back into local coordinates.
    pub(crate) fn local_from_index(index: usize) -> LocalPos {
        let size = CHUNK_SIZE as usize;
        let plane = CHUNK_PLANE_SIZE as usize;
        LocalPos::new(index % size, index / plane, (index % plane) / size)
    }

    fn in_bounds(x: usize, y: usize, z: usize) -> bool {
        x < CHUNK_SIZE as usize && y < CHUNK_HEIGHT as usize && z < CHUNK_SIZE as usize
    }

    /// Gets a reference to the voxel at the specified chunk-relative coordinates.
    ///
    /// # Returns
    /// `None` if the coordinates are outside the chunk.
    pub fn get_voxel(&self, x: usize, y: usize, z: usize) -> Option<&Voxel> {
        if !Self::in_bounds(x, y, z) {
            return None;
        }
        Some(&self.voxels[Self::index(x, y, z)])
    }

    /// Writes a voxel at the specified chunk-relative coordinates.
    ///
    /// Keeps `solid_array` in sync and marks the chunk dirty when the cell changes.
    ///
    /// # Returns
    /// `true` if the cell changed. Out-of-bounds coordinates and writes of the value already
    /// stored return `false`.
    pub fn set_voxel(&mut self, x: usize, y: usize, z: usize, voxel: Voxel) -> bool {
        if !Self::in_bounds(x, y, z) {
            return false;
        }
        self.write_index(Self::index(x, y, z), voxel)
    }

    fn write_index(&mut self, index: usize, voxel: Voxel) -> bool {
        let old = self.voxels[index];
        if old == voxel {
            return false;
        }

        let was_solid = old.is_solid();
        let is_solid = voxel.is_solid();
        if was_solid != is_solid {
            self.solid_array.set(index, is_solid);
            if is_solid {
                self.solid_count += 1;
            } else {
                self.solid_count -= 1;
            }
        }

        self.voxels[index] = voxel;
        self.dirty = true;
        true
    }

    /// Overwrites every cell with `voxel`.
    pub fn fill(&mut self, voxel: Voxel) {
        self.voxels.fill(voxel);
        let is_solid = voxel.is_solid();
        self.solid_array.fill(is_solid);
        self.solid_count = if is_solid { CHUNK_VOLUME } else { 0 };
        self.dirty = true;
    }

    /// Checks if the voxel at the specified chunk-relative coordinates is solid.
    ///
    /// # Returns
    /// `true` if the voxel is solid, `false` if it's air or out of bounds.
    pub fn is_voxel_solid(&self, x: usize, y: usize, z: usize) -> bool {
        Self::in_bounds(x, y, z) && self.solid_array[Self::index(x, y, z)]
    }

    /// Finds the highest solid cell in the column at local `(x, z)`.
    ///
    /// # Returns
    /// The local y of the top solid voxel, or `None` for an all-air (or out-of-bounds) column.
    pub fn top_solid_y(&self, x: usize, z: usize) -> Option<usize> {
        if !Self::in_bounds(x, 0, z) {
            return None;
        }
        (0..CHUNK_HEIGHT as usize)
            .rev()
            .find(|&y| self.solid_array[Self::index(x, y, z)])
    }

    /// Number of solid cells in the chunk.
    pub fn solid_count(&self) -> usize {
        self.solid_count
    }

    /// Whether every cell is air.
    pub fn is_empty(&self) -> bool {
        self.solid_count == 0
    }

    /// Whether the chunk needs its mesh regenerated.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flags the chunk as needing mesh regeneration.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clears the dirty flag once the renderer has consumed the change.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Converts a local position in this chunk to a world position.
    pub fn world_position(&self, local: LocalPos) -> WorldPos {
        to_world_pos(self.position, local)
    }

    /// The dense cell array in storage order.
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// The dense cell array viewed as raw bytes, one byte per cell.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.voxels)
    }

    /// Iterates over every cell of the chunk in storage order.
    pub fn iter(&self) -> ChunkVoxelIterator<'_> {
        ChunkVoxelIterator::new(self)
    }

    /// Iterates over the solid cells of the chunk, skipping air.
    pub fn iter_solid(&self) -> ChunkSolidIterator<'_> {
        ChunkSolidIterator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk() -> Chunk {
        Chunk::new(ChunkPos::new(0, 0))
    }

    #[test]
    fn test_new_chunk_is_all_air() {
        let chunk = chunk();
        assert!(chunk.is_empty());
        assert!(chunk.voxels().iter().all(|voxel| voxel.is_air()));
        assert_eq!(chunk.get_voxel(15, 255, 15), Some(&Voxel::AIR));
    }

    #[test]
    fn test_set_and_get_at_bounds() {
        let mut chunk = chunk();
        assert!(chunk.set_voxel(0, 0, 0, Voxel::new(VoxelType::STONE)));
        assert!(chunk.set_voxel(15, 255, 15, Voxel::new(VoxelType::GRASS)));
        assert_eq!(chunk.get_voxel(0, 0, 0).unwrap().voxel_type(), VoxelType::STONE);
        assert_eq!(chunk.get_voxel(15, 255, 15).unwrap().voxel_type(), VoxelType::GRASS);
        assert_eq!(chunk.solid_count(), 2);
    }

    #[test]
    fn test_out_of_bounds_access_is_rejected() {
        let mut chunk = chunk();
        assert!(chunk.get_voxel(16, 0, 0).is_none());
        assert!(chunk.get_voxel(0, 256, 0).is_none());
        assert!(!chunk.set_voxel(0, 0, 16, Voxel::new(VoxelType::STONE)));
        assert!(chunk.is_empty());
    }

    #[test]
    fn test_set_voxel_marks_dirty_only_on_change() {
        let mut chunk = chunk();
        chunk.clear_dirty();
        assert!(!chunk.set_voxel(1, 1, 1, Voxel::AIR));
        assert!(!chunk.is_dirty());

        assert!(chunk.set_voxel(1, 1, 1, Voxel::new(VoxelType::DIRT)));
        assert!(chunk.is_dirty());
    }

    #[test]
    fn test_solid_array_tracks_writes() {
        let mut chunk = chunk();
        chunk.set_voxel(3, 40, 7, Voxel::new(VoxelType::SAND));
        assert!(chunk.is_voxel_solid(3, 40, 7));
        chunk.set_voxel(3, 40, 7, Voxel::new(VoxelType::GLASS));
        assert_eq!(chunk.solid_count(), 1);
        chunk.set_voxel(3, 40, 7, Voxel::AIR);
        assert!(!chunk.is_voxel_solid(3, 40, 7));
        assert!(chunk.is_empty());
    }

    #[test]
    fn test_top_solid_y() {
        let mut chunk = chunk();
        assert_eq!(chunk.top_solid_y(2, 2), None);
        chunk.set_voxel(2, 10, 2, Voxel::new(VoxelType::STONE));
        chunk.set_voxel(2, 64, 2, Voxel::new(VoxelType::GRASS));
        assert_eq!(chunk.top_solid_y(2, 2), Some(64));
        assert_eq!(chunk.top_solid_y(3, 2), None);
    }

    #[test]
    fn test_fill_and_byte_round_trip() {
        let mut chunk = Chunk::filled(ChunkPos::new(-2, 5), VoxelType::STONE);
        assert_eq!(chunk.solid_count(), CHUNK_VOLUME);
        chunk.set_voxel(4, 100, 9, Voxel::AIR);
        chunk.set_voxel(5, 101, 9, Voxel::new(VoxelType::WATER));

        let restored = Chunk::from_bytes(chunk.position(), chunk.as_bytes()).unwrap();
        assert_eq!(restored.position(), ChunkPos::new(-2, 5));
        assert_eq!(restored.voxels(), chunk.voxels());
        assert_eq!(restored.solid_count(), CHUNK_VOLUME - 1);
    }

    #[test]
    fn test_from_bytes_rejects_bad_input() {
        assert!(Chunk::from_bytes(ChunkPos::new(0, 0), &[0u8; 10]).is_none());
        let mut bytes = vec![0u8; CHUNK_VOLUME];
        bytes[77] = 200;
        assert!(Chunk::from_bytes(ChunkPos::new(0, 0), &bytes).is_none());
    }

    #[test]
    fn test_world_position_of_negative_chunk() {
        let chunk = Chunk::new(ChunkPos::new(-1, 2));
        assert_eq!(
            chunk.world_position(LocalPos::new(15, 7, 0)),
            WorldPos::new(-1, 7, 32)
        );
    }

    #[test]
    fn test_index_round_trip() {
        for &(x, y, z) in &[(0, 0, 0), (15, 0, 0), (0, 255, 0), (0, 0, 15), (7, 130, 11)] {
            let local = Chunk::local_from_index(Chunk::index(x, y, z));
            assert_eq!(local, LocalPos::new(x, y, z));
        }
    }
}

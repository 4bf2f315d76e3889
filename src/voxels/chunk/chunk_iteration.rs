//! # Chunk Iteration Module
//!
//! This module provides iterators for traversing the cells of a chunk in storage order.
//!
//! ## Serializer-Facing Iteration
//!
//! `ChunkVoxelIterator` yields every cell, air included, so a serializer can stream the dense
//! array without knowing the storage layout. `ChunkSolidIterator` uses the chunk's
//! `solid_array` bit vector to jump directly between solid cells, which is what selection and
//! debugging tools usually want.

use crate::voxels::coordinates::{LocalPos, CHUNK_VOLUME};
use crate::voxels::voxel::Voxel;

use super::Chunk;

/// An iterator over every cell in a chunk, yielding its local position and voxel.
///
/// Cells are produced in storage order: x varies fastest, then z, then y.
pub struct ChunkVoxelIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Index of the next cell to yield
    current_offset: usize,
}

impl<'a> ChunkVoxelIterator<'a> {
    /// Creates a new `ChunkVoxelIterator` positioned at local `(0, 0, 0)`.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkVoxelIterator {
            chunk_ref,
            current_offset: 0,
        }
    }
}

impl<'a> Iterator for ChunkVoxelIterator<'a> {
    type Item = (LocalPos, &'a Voxel);

    fn next(&mut self) -> Option<Self::Item> {
        let voxel = self.chunk_ref.voxels.get(self.current_offset)?;
        let position = Chunk::local_from_index(self.current_offset);
        self.current_offset += 1;
        Some((position, voxel))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = CHUNK_VOLUME.saturating_sub(self.current_offset);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkVoxelIterator<'_> {}

/// An iterator over the solid cells of a chunk.
///
/// Air cells are skipped by scanning the set bits of the chunk's `solid_array`, so runs of air
/// are crossed a machine word at a time.
pub struct ChunkSolidIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Position in the solid array where the next search starts
    current_solid_offset: usize,
}

impl<'a> ChunkSolidIterator<'a> {
    /// Creates a new `ChunkSolidIterator` positioned at the first solid cell.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkSolidIterator {
            chunk_ref,
            current_solid_offset: 0,
        }
    }
}

impl<'a> Iterator for ChunkSolidIterator<'a> {
    type Item = (LocalPos, &'a Voxel);

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.chunk_ref.solid_array.get(self.current_solid_offset..)?;
        let index = self.current_solid_offset + remaining.first_one()?;
        self.current_solid_offset = index + 1;
        Some((Chunk::local_from_index(index), &self.chunk_ref.voxels[index]))
    }
}

#[cfg(test)]
mod tests {
    use crate::voxels::coordinates::ChunkPos;
    use crate::voxels::voxel::voxel_type::VoxelType;

    use super::*;

    #[test]
    fn test_voxel_iterator_visits_every_cell_in_order() {
        let chunk = Chunk::new(ChunkPos::new(0, 0));
        let mut iter = chunk.iter();
        assert_eq!(iter.len(), CHUNK_VOLUME);

        let (first, _) = iter.next().unwrap();
        let (second, _) = iter.next().unwrap();
        assert_eq!(first, LocalPos::new(0, 0, 0));
        assert_eq!(second, LocalPos::new(1, 0, 0));
        assert_eq!(iter.count(), CHUNK_VOLUME - 2);
    }

    #[test]
    fn test_solid_iterator_skips_air() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        chunk.set_voxel(1, 2, 3, Voxel::new(VoxelType::STONE));
        chunk.set_voxel(15, 200, 0, Voxel::new(VoxelType::LEAVES));

        let solid: Vec<_> = chunk
            .iter_solid()
            .map(|(local, voxel)| (local, voxel.voxel_type()))
            .collect();
        assert_eq!(
            solid,
            vec![
                (LocalPos::new(1, 2, 3), VoxelType::STONE),
                (LocalPos::new(15, 200, 0), VoxelType::LEAVES),
            ]
        );
    }
}

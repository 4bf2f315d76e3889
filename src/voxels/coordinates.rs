//! # Coordinates Module
//!
//! Conversions between absolute world positions and the (chunk, local) pairs used to address
//! chunk storage.
//!
//! Chunks partition the world on the XZ plane only; every chunk spans the full vertical extent
//! of the world. Chunk coordinates use floor division, so a negative world coordinate such as
//! `-1` lands in chunk `-1` at local coordinate `15` rather than in chunk `0`.

use cgmath::{Point3, Vector3};

/// The width and depth of a chunk in voxels.
pub const CHUNK_SIZE: i32 = 16;
/// The height of a chunk in voxels. This is also the vertical extent of the world.
pub const CHUNK_HEIGHT: i32 = 256;
/// The number of voxels in a single horizontal plane of a chunk (CHUNK_SIZE²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_SIZE * CHUNK_SIZE;
/// The total number of voxels in a chunk.
pub const CHUNK_VOLUME: usize = (CHUNK_PLANE_SIZE * CHUNK_HEIGHT) as usize;

/// An absolute integer position in the voxel world.
pub type WorldPos = Point3<i32>;

/// A position inside a chunk, each component in `0..CHUNK_SIZE` (or `0..CHUNK_HEIGHT` for y).
pub type LocalPos = Point3<usize>;

/// Identifies a chunk by its column on the XZ plane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    /// Chunk column along the world X axis.
    pub x: i32,
    /// Chunk column along the world Z axis.
    pub z: i32,
}

impl ChunkPos {
    /// Creates a chunk position from its column coordinates.
    pub fn new(x: i32, z: i32) -> Self {
        ChunkPos { x, z }
    }

    /// Returns the chunk that owns the given world position.
    ///
    /// The y component is ignored since chunks cover the whole vertical range.
    pub fn from_world_pos(pos: WorldPos) -> Self {
        ChunkPos {
            x: pos.x.div_euclid(CHUNK_SIZE),
            z: pos.z.div_euclid(CHUNK_SIZE),
        }
    }

    /// The world position of this chunk's local `(0, 0, 0)` cell.
    pub fn origin(&self) -> WorldPos {
        Point3::new(self.x * CHUNK_SIZE, 0, self.z * CHUNK_SIZE)
    }
}

/// Checks whether `y` lies inside the vertical extent of the world.
pub fn is_valid_height(y: i32) -> bool {
    (0..CHUNK_HEIGHT).contains(&y)
}

/// Converts a world position into chunk-local coordinates.
///
/// # Returns
/// `None` when the y component is outside `0..CHUNK_HEIGHT`. The x and z components are always
/// in `0..CHUNK_SIZE`, including for negative world coordinates.
pub fn local_position(pos: WorldPos) -> Option<LocalPos> {
    if !is_valid_height(pos.y) {
        return None;
    }
    Some(Point3::new(
        pos.x.rem_euclid(CHUNK_SIZE) as usize,
        pos.y as usize,
        pos.z.rem_euclid(CHUNK_SIZE) as usize,
    ))
}

/// Reassembles a world position from a chunk and a local position inside it.
pub fn to_world_pos(chunk: ChunkPos, local: LocalPos) -> WorldPos {
    let origin = chunk.origin();
    Point3::new(
        origin.x + local.x as i32,
        local.y as i32,
        origin.z + local.z as i32,
    )
}

/// Adds `delta` to `pos`.
///
/// # Returns
/// `None` if any component leaves the `i32` range.
pub fn checked_offset(pos: WorldPos, delta: Vector3<i32>) -> Option<WorldPos> {
    Some(Point3::new(
        pos.x.checked_add(delta.x)?,
        pos.y.checked_add(delta.y)?,
        pos.z.checked_add(delta.z)?,
    ))
}

/// The offset that carries `from` onto `to`, or `None` if it does not fit in `i32`.
pub fn checked_delta(from: WorldPos, to: WorldPos) -> Option<Vector3<i32>> {
    Some(Vector3::new(
        to.x.checked_sub(from.x)?,
        to.y.checked_sub(from.y)?,
        to.z.checked_sub(from.z)?,
    ))
}

/// Shifts a raycast hit by the face normal it was hit on.
///
/// Interaction code hands the editor the solid voxel under the cursor plus the normal of the
/// face that was hit; placing "on top of" a face targets the neighbouring cell. Returns `None`
/// at the edge of the coordinate range.
pub fn offset_by_normal(pos: WorldPos, normal: Vector3<i32>) -> Option<WorldPos> {
    checked_offset(pos, normal)
}

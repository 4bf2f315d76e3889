//! # Voxel Module
//!
//! This module provides the voxel cell type stored in chunks, along with the closed set of
//! materials a cell can hold.

use std::fmt;

use voxel_type::VoxelType;

pub mod voxel_type;

/// The underlying integer type used to represent voxel types in memory.
/// This is used for efficient storage and serialization of voxel data.
pub type VoxelTypeSize = u8;

/// Represents a single voxel cell in the world.
///
/// This is a lightweight structure that stores only the material tag. The all-zero bit pattern
/// is `AIR`, so zeroed chunk memory is a valid empty chunk.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute and the `Pod` derive let a chunk's cell array be viewed as raw
/// bytes, which is the format external serializers read and write.
#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Voxel {
    voxel_type: VoxelTypeSize,
}

impl Voxel {
    /// The empty voxel.
    pub const AIR: Voxel = Voxel { voxel_type: 0 };

    /// Creates a new voxel of the specified type.
    pub fn new(voxel_type: VoxelType) -> Self {
        Voxel {
            voxel_type: voxel_type as VoxelTypeSize,
        }
    }

    /// Gets the material of this voxel.
    ///
    /// Voxels built through [`Voxel::new`] always hold a known type. A raw value that does not
    /// match any type reads as `AIR`.
    pub fn voxel_type(&self) -> VoxelType {
        VoxelType::from_int(self.voxel_type).unwrap_or(VoxelType::AIR)
    }

    /// The compact storage value of this voxel.
    pub fn as_int(&self) -> VoxelTypeSize {
        self.voxel_type
    }

    /// Whether this voxel is the empty sentinel.
    pub fn is_air(&self) -> bool {
        self.voxel_type().is_air()
    }

    /// Whether this voxel occupies space (any type other than `AIR`).
    pub fn is_solid(&self) -> bool {
        self.voxel_type().is_solid()
    }
}

impl From<VoxelType> for Voxel {
    fn from(voxel_type: VoxelType) -> Self {
        Voxel::new(voxel_type)
    }
}

impl fmt::Debug for Voxel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Voxel({:?})", self.voxel_type())
    }
}

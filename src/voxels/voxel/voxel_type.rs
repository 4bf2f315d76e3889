//! # Voxel Type Module
//!
//! This module defines the closed set of materials a voxel can hold.
//! It provides functionality for type identification, conversion from the compact storage
//! format, and random material selection.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::VoxelTypeSize;

/// Enumerates all possible voxel materials in the world.
///
/// The discriminants are stable: external serializers store voxels as their `VoxelTypeSize`
/// value, so new materials must only ever be appended. `AIR` is the empty sentinel and every
/// other variant counts as solid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum VoxelType {
    /// Empty space.
    #[default]
    AIR = 0,
    /// Bare rock, the bulk of most terrain.
    STONE = 1,
    /// Soil found beneath grass.
    DIRT = 2,
    /// Grass-covered soil.
    GRASS = 3,
    /// Beach and desert sand.
    SAND = 4,
    /// Water. Solid for editing purposes even though it is a liquid.
    WATER = 5,
    /// Tree trunk wood.
    WOOD = 6,
    /// Tree foliage.
    LEAVES = 7,
    /// The indestructible floor of the world. Editing operations never change it.
    BEDROCK = 8,
    /// Snow cover.
    SNOW = 9,
    /// Frozen water.
    ICE = 10,
    /// Broken stone.
    COBBLESTONE = 11,
    /// Processed wood.
    PLANKS = 12,
    /// Transparent glass.
    GLASS = 13,
}

impl VoxelType {
    /// The number of voxel types, including `AIR`.
    pub const COUNT: usize = 14;

    /// Returns every voxel type in discriminant order.
    pub fn all() -> [VoxelType; Self::COUNT] {
        [
            VoxelType::AIR,
            VoxelType::STONE,
            VoxelType::DIRT,
            VoxelType::GRASS,
            VoxelType::SAND,
            VoxelType::WATER,
            VoxelType::WOOD,
            VoxelType::LEAVES,
            VoxelType::BEDROCK,
            VoxelType::SNOW,
            VoxelType::ICE,
            VoxelType::COBBLESTONE,
            VoxelType::PLANKS,
            VoxelType::GLASS,
        ]
    }

    /// Converts a `VoxelTypeSize` to a `VoxelType`.
    ///
    /// This is typically used when reading voxel data back from the compact storage format.
    ///
    /// # Returns
    /// The corresponding `VoxelType`, or `None` if the value is not a known discriminant.
    pub fn from_int(vtype: VoxelTypeSize) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(vtype)
    }

    /// Whether this is the empty sentinel.
    pub fn is_air(self) -> bool {
        self == VoxelType::AIR
    }

    /// Whether this type occupies space. True for every type except `AIR`.
    pub fn is_solid(self) -> bool {
        !self.is_air()
    }

    /// Whether editing operations may change a voxel of this type.
    pub fn is_editable(self) -> bool {
        self != VoxelType::BEDROCK
    }

    /// Picks a random material that is solid and editable.
    ///
    /// Used to scatter varied materials when building demonstration terrain.
    pub fn get_random_material() -> Self {
        loop {
            let candidate = Self::all()[fastrand::usize(1..Self::COUNT)];
            if candidate.is_editable() {
                return candidate;
            }
        }
    }
}

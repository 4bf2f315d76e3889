//! # Terraforming Tools
//!
//! The closed sets of tools and modes, plus the pure geometry each tool fills.
//!
//! Footprints are expressed as integer offsets from the tool center and are generated in a
//! fixed order (y, then z, then x), so command batches are reproducible.

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::voxels::coordinates::checked_delta;
use crate::voxels::voxel::voxel_type::VoxelType;
use crate::voxels::WorldPos;

/// Tool types for terraforming.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerraformTool {
    /// Writes only the targeted voxel.
    #[default]
    SingleBlock,
    /// Filled sphere used for organic sculpting and drag strokes.
    Brush,
    /// Hollow sphere, one voxel thick.
    Sphere,
    /// Solid sphere.
    FilledSphere,
    /// Hollow cube frame.
    Cube,
    /// Solid cube.
    FilledCube,
    /// Straight line between two points. At a single point it acts like `SingleBlock`.
    Line,
    /// Levels terrain to the height of the targeted voxel.
    Flatten,
    /// Moves surface heights toward the neighbourhood average.
    Smooth,
    /// Changes the material of solid voxels without touching geometry.
    Paint,
}

impl TerraformTool {
    /// Every tool, in declaration order.
    pub fn all() -> [TerraformTool; 10] {
        [
            TerraformTool::SingleBlock,
            TerraformTool::Brush,
            TerraformTool::Sphere,
            TerraformTool::FilledSphere,
            TerraformTool::Cube,
            TerraformTool::FilledCube,
            TerraformTool::Line,
            TerraformTool::Flatten,
            TerraformTool::Smooth,
            TerraformTool::Paint,
        ]
    }
}

/// How the cells computed by a tool are written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerraformMode {
    /// Write the active material.
    #[default]
    Place,
    /// Write air.
    Remove,
    /// Write the active material, but only over cells that are already solid.
    Replace,
}

impl TerraformMode {
    /// Decides what a cell currently holding `current` should become.
    ///
    /// # Returns
    /// The type to write, or `None` when this mode leaves the cell alone.
    pub fn target_for(self, current: VoxelType, material: VoxelType) -> Option<VoxelType> {
        match self {
            TerraformMode::Place => Some(material),
            TerraformMode::Remove => Some(VoxelType::AIR),
            TerraformMode::Replace if current.is_solid() => Some(material),
            TerraformMode::Replace => None,
        }
    }
}

/// The volumetric shapes tools are built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Footprint {
    /// Offsets within Euclidean distance `r`.
    Ball,
    /// Offsets whose distance lies in `[r - 0.5, r + 0.5]`.
    Shell,
    /// Every offset in `[-r, r]³`.
    Box,
    /// Offsets on the outer faces of `[-r, r]³`.
    Frame,
}

impl Footprint {
    fn contains(self, offset: Vector3<i32>, r: i32) -> bool {
        let d2 = offset.x * offset.x + offset.y * offset.y + offset.z * offset.z;
        match self {
            Footprint::Ball => d2 <= r * r,
            // (r - 0.5)² <= d² <= (r + 0.5)² with integer d², since r² ± r + 0.25 is never integral.
            Footprint::Shell => d2 > r * r - r && d2 <= r * r + r,
            Footprint::Box => true,
            Footprint::Frame => {
                offset.x.abs() == r || offset.y.abs() == r || offset.z.abs() == r
            }
        }
    }

    /// All offsets of this footprint with radius (or half-size) `r`.
    pub(crate) fn offsets(self, r: i32) -> Vec<Vector3<i32>> {
        let mut offsets = Vec::new();
        for y in -r..=r {
            for z in -r..=r {
                for x in -r..=r {
                    let offset = Vector3::new(x, y, z);
                    if self.contains(offset, r) {
                        offsets.push(offset);
                    }
                }
            }
        }
        offsets
    }
}

/// The `(dx, dz)` columns within horizontal distance `r` of a center.
pub(crate) fn disc_columns(r: i32) -> Vec<(i32, i32)> {
    let mut columns = Vec::new();
    for z in -r..=r {
        for x in -r..=r {
            if x * x + z * z <= r * r {
                columns.push((x, z));
            }
        }
    }
    columns
}

/// Every `(dx, dz)` column of the `[-r, r]²` square around a center.
pub(crate) fn square_columns(r: i32) -> impl Iterator<Item = (i32, i32)> {
    (-r..=r).flat_map(move |z| (-r..=r).map(move |x| (x, z)))
}

/// Steps a 3D Bresenham line from `start` to `end`, both inclusive.
///
/// Consecutive points always touch (they differ by at most one along each axis), so a stroke
/// drawn with this never leaves gaps. A line whose span does not fit in `i32` has no points.
pub(crate) fn line_points(start: WorldPos, end: WorldPos) -> Vec<WorldPos> {
    let Some(delta) = checked_delta(start, end) else {
        return Vec::new();
    };
    let abs = [
        i64::from(delta.x).abs(),
        i64::from(delta.y).abs(),
        i64::from(delta.z).abs(),
    ];
    let step = [delta.x.signum(), delta.y.signum(), delta.z.signum()];
    let steps = abs[0].max(abs[1]).max(abs[2]);

    let mut current = [start.x, start.y, start.z];
    let mut error = [
        2 * abs[0] - steps,
        2 * abs[1] - steps,
        2 * abs[2] - steps,
    ];

    let mut points = Vec::with_capacity(steps as usize + 1);
    points.push(start);
    for _ in 0..steps {
        for axis in 0..3 {
            if error[axis] > 0 {
                current[axis] += step[axis];
                error[axis] -= 2 * steps;
            }
            error[axis] += 2 * abs[axis];
        }
        points.push(WorldPos::new(current[0], current[1], current[2]));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_targets() {
        use VoxelType::{AIR, GRASS, STONE};
        assert_eq!(TerraformMode::Place.target_for(AIR, GRASS), Some(GRASS));
        assert_eq!(TerraformMode::Remove.target_for(STONE, GRASS), Some(AIR));
        assert_eq!(TerraformMode::Replace.target_for(STONE, GRASS), Some(GRASS));
        assert_eq!(TerraformMode::Replace.target_for(AIR, GRASS), None);
    }

    #[test]
    fn test_ball_footprint_counts() {
        assert_eq!(Footprint::Ball.offsets(1).len(), 7);
        // Lattice points inside a sphere of radius 3.
        assert_eq!(Footprint::Ball.offsets(3).len(), 123);
    }

    #[test]
    fn test_shell_excludes_center_and_far_corners() {
        let shell = Footprint::Shell.offsets(1);
        // 6 face neighbours plus 12 edge neighbours; corners are at distance √3 > 1.5.
        assert_eq!(shell.len(), 18);
        assert!(!shell.contains(&Vector3::new(0, 0, 0)));
        assert!(!shell.contains(&Vector3::new(1, 1, 1)));

        for offset in Footprint::Shell.offsets(4) {
            let distance = ((offset.x * offset.x + offset.y * offset.y + offset.z * offset.z)
                as f32)
                .sqrt();
            assert!((3.5..=4.5).contains(&distance));
        }
    }

    #[test]
    fn test_box_and_frame_counts() {
        assert_eq!(Footprint::Box.offsets(2).len(), 125);
        // A 5³ box minus its 3³ interior.
        assert_eq!(Footprint::Frame.offsets(2).len(), 125 - 27);
        assert!(!Footprint::Frame.offsets(2).contains(&Vector3::new(1, -1, 0)));
    }

    #[test]
    fn test_disc_columns() {
        assert_eq!(disc_columns(1).len(), 5);
        assert_eq!(disc_columns(2).len(), 13);
        assert_eq!(square_columns(2).count(), 25);
    }

    #[test]
    fn test_line_points_reach_the_end_without_gaps() {
        let cases = [
            (WorldPos::new(0, 0, 0), WorldPos::new(0, 0, 0)),
            (WorldPos::new(0, 10, 0), WorldPos::new(7, 10, 0)),
            (WorldPos::new(3, 60, -2), WorldPos::new(-5, 64, 9)),
            (WorldPos::new(-4, 20, 4), WorldPos::new(4, 12, -4)),
        ];
        for (start, end) in cases {
            let points = line_points(start, end);
            let delta = end - start;
            let steps = delta.x.abs().max(delta.y.abs()).max(delta.z.abs());
            assert_eq!(points.len(), steps as usize + 1);
            assert_eq!(points.first(), Some(&start));
            assert_eq!(points.last(), Some(&end));
            for pair in points.windows(2) {
                let step = pair[1] - pair[0];
                assert!(step.x.abs() <= 1 && step.y.abs() <= 1 && step.z.abs() <= 1);
            }
        }
    }

    #[test]
    fn test_line_points_at_the_coordinate_edges() {
        let points = line_points(WorldPos::new(i32::MAX - 2, 10, 0), WorldPos::new(i32::MAX, 10, 0));
        assert_eq!(points.len(), 3);
        assert_eq!(points.last(), Some(&WorldPos::new(i32::MAX, 10, 0)));

        assert!(line_points(WorldPos::new(i32::MIN, 10, 0), WorldPos::new(i32::MAX, 10, 0)).is_empty());
    }
}

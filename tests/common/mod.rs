#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use log::{Level, Log, Metadata, Record};
use voxel_terraform::voxels::voxel::{voxel_type::VoxelType, Voxel};
use voxel_terraform::voxels::world::VoxelWorld;
use voxel_terraform::voxels::WorldPos;

/// Records every log message so tests can check what was reported.
#[derive(Default)]
pub struct CapturingLogger {
    records: Mutex<Vec<(Level, String, String)>>,
}

impl CapturingLogger {
    pub fn shared() -> Arc<CapturingLogger> {
        Arc::new(CapturingLogger::default())
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(record_level, _, _)| *record_level == level)
            .map(|(_, _, message)| message.clone())
            .collect()
    }

    pub fn targets(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(_, target, _)| target.clone())
            .collect()
    }
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().unwrap().push((
            record.level(),
            record.target().to_string(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

/// A world with a solid layer of `voxel_type` covering `x, z` in `[from, to)` at every height
/// in `ys`.
pub fn layered_world(
    from: i32,
    to: i32,
    ys: std::ops::RangeInclusive<i32>,
    voxel_type: VoxelType,
) -> VoxelWorld {
    let mut world = VoxelWorld::new();
    for y in ys {
        for x in from..to {
            for z in from..to {
                world.set_voxel(WorldPos::new(x, y, z), Voxel::new(voxel_type));
            }
        }
    }
    world
}

pub fn type_at(world: &VoxelWorld, position: WorldPos) -> VoxelType {
    world
        .get_voxel(position)
        .map_or(VoxelType::AIR, |voxel| voxel.voxel_type())
}

/// Every loaded cell as `(position, type)`, for comparing whole worlds.
pub fn snapshot(world: &VoxelWorld) -> Vec<(WorldPos, VoxelType)> {
    let mut cells: Vec<(WorldPos, VoxelType)> = world
        .chunks()
        .flat_map(|chunk| {
            chunk
                .iter_solid()
                .map(move |(local, voxel)| (chunk.world_position(local), voxel.voxel_type()))
        })
        .collect();
    cells.sort_by_key(|(position, _)| (position.x, position.y, position.z));
    cells
}

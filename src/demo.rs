//! Scripted editing session used by the binary.

use cgmath::Vector3;
use log::info;

use crate::core::config::EditorConfig;
use crate::core::logging::SharedLogger;
use crate::editor::selection::SelectionManager;
use crate::editor::terraforming::tool::{TerraformMode, TerraformTool};
use crate::editor::terraforming::TerraformingSystem;
use crate::voxels::voxel::voxel_type::VoxelType;
use crate::voxels::voxel::Voxel;
use crate::voxels::world::VoxelWorld;
use crate::voxels::WorldPos;

const PLATEAU_RADIUS: i32 = 24;
const PLATEAU_TOP: i32 = 40;
const SCATTER_DABS: usize = 12;

/// A bedrock floor, stone body, dirt layer and grass top spanning a square of chunks.
fn build_plateau() -> VoxelWorld {
    let mut world = VoxelWorld::new();
    for x in -PLATEAU_RADIUS..PLATEAU_RADIUS {
        for z in -PLATEAU_RADIUS..PLATEAU_RADIUS {
            for y in 0..=PLATEAU_TOP {
                let voxel_type = match y {
                    0 => VoxelType::BEDROCK,
                    y if y == PLATEAU_TOP => VoxelType::GRASS,
                    y if y >= PLATEAU_TOP - 3 => VoxelType::DIRT,
                    _ => VoxelType::STONE,
                };
                world.set_voxel(WorldPos::new(x, y, z), Voxel::new(voxel_type));
            }
        }
    }
    world
}

fn report(step: &str, changed: bool) {
    info!("{:<16} {}", step, if changed { "changed terrain" } else { "no change" });
}

pub(crate) fn run_session(config: &EditorConfig, logger: SharedLogger) {
    let mut world = build_plateau();
    info!(
        "Built plateau: {} chunks, {} dirty",
        world.chunk_count(),
        world.take_dirty_chunks().len()
    );

    let mut selection = SelectionManager::new(logger.clone());
    let mut terraform = TerraformingSystem::with_config(Some(&mut world), config, logger);
    let surface = PLATEAU_TOP + 1;

    terraform.set_tool(TerraformTool::Brush);
    terraform.set_tool_size(3);
    terraform.set_voxel_type(VoxelType::GRASS);
    report("brush", terraform.apply_tool(WorldPos::new(8, surface, 8)));

    terraform.set_tool(TerraformTool::Sphere);
    terraform.set_tool_size(4);
    terraform.set_voxel_type(VoxelType::GLASS);
    report("sphere", terraform.apply_tool(WorldPos::new(-12, surface + 8, -12)));

    terraform.set_tool(TerraformTool::FilledCube);
    terraform.set_tool_size(2);
    terraform.set_mode(TerraformMode::Remove);
    report("carve", terraform.apply_tool(WorldPos::new(0, PLATEAU_TOP - 1, 0)));
    terraform.set_mode(TerraformMode::Place);

    terraform.set_tool(TerraformTool::Flatten);
    terraform.set_tool_size(5);
    terraform.set_voxel_type(VoxelType::SAND);
    report("flatten", terraform.apply_tool(WorldPos::new(-8, PLATEAU_TOP - 4, 10)));
    report("flatten again", terraform.apply_tool(WorldPos::new(-8, PLATEAU_TOP - 4, 10)));

    terraform.set_tool(TerraformTool::Smooth);
    terraform.set_tool_size(4);
    terraform.set_voxel_type(VoxelType::DIRT);
    report("smooth", terraform.apply_tool(WorldPos::new(-4, PLATEAU_TOP, 8)));

    terraform.set_tool(TerraformTool::Paint);
    terraform.set_tool_size(3);
    terraform.set_voxel_type(VoxelType::SNOW);
    report("paint", terraform.apply_tool(WorldPos::new(12, PLATEAU_TOP, -12)));

    terraform.set_tool(TerraformTool::Brush);
    terraform.set_tool_size(1);
    terraform.set_voxel_type(VoxelType::COBBLESTONE);
    report(
        "line stroke",
        terraform.apply_tool_line(WorldPos::new(-20, surface, 20), WorldPos::new(20, surface + 6, 16)),
    );

    for _ in 0..SCATTER_DABS {
        let x = fastrand::i32(-PLATEAU_RADIUS..PLATEAU_RADIUS);
        let z = fastrand::i32(-PLATEAU_RADIUS..PLATEAU_RADIUS);
        terraform.set_voxel_type(VoxelType::get_random_material());
        terraform.apply_tool(WorldPos::new(x, surface, z));
    }
    info!("Scatter done, {} undoable batches", terraform.history_size());

    selection.start_selection(WorldPos::new(4, surface, 4));
    selection.update_selection(WorldPos::new(12, surface + 3, 12));
    info!("Finalize selection: {:?}", selection.finalize_selection(terraform.world()));
    info!("Copy: {:?}", selection.copy_to_clipboard(terraform.world()));

    let paste_target = WorldPos::new(-16, surface, -16);
    if selection.enable_paste_preview(WorldPos::new(0, surface, 0)) {
        selection.update_paste_preview(paste_target);
        info!("Paste preview covers {:?}", selection.paste_preview_bounds());
        selection.disable_paste_preview();
    }
    info!("Paste: {:?}", selection.paste_from_clipboard(paste_target, &mut terraform));

    report("undo paste", terraform.undo());
    report("redo paste", terraform.redo());

    selection.start_selection(WorldPos::new(-16, surface, -16));
    selection.update_selection(WorldPos::new(-8, surface + 3, -8));
    selection.finalize_selection(terraform.world());
    info!(
        "Move: {:?}",
        selection.move_selection(Vector3::new(0, 2, 0), &mut terraform)
    );
    info!("Cut: {:?}", selection.cut_to_clipboard(&mut terraform));
    info!("Cut again: {:?}", selection.cut_to_clipboard(&mut terraform));

    let mut undone = 0;
    while terraform.undo() {
        undone += 1;
    }
    info!("Undid {} batches, {} redoable", undone, terraform.redo_size());
    drop(terraform);

    info!("{} chunks need remeshing", world.take_dirty_chunks().len());
}

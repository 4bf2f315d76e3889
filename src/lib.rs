#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terraform
//!
//! A chunked, mutable voxel grid with an interactive terraforming editor on top.
//!
//! The crate stores typed volumetric data in a sparse map of dense chunks and applies
//! parametric editing operations to it (placement, removal, shape brushes, smoothing,
//! levelling, repainting) with full undo/redo and clipboard support.
//!
//! ## Key Modules
//!
//! * `voxels` - Voxel types, dense chunks and the sparse world that owns them
//! * `editor` - The terraforming tool engine and the selection/clipboard manager
//! * `core` - Configuration and the injected logging used by the editor
//!
//! ## Architecture
//!
//! Data flows one way:
//! * A caller supplies a target position (or a selection box)
//! * The editor computes the affected cells and writes each change through one recording path
//! * The changes of one action become one undo entry
//! * The world marks touched chunks dirty for an external mesh regenerator
//!
//! ## Usage
//!
//! ```rust
//! use voxel_terraform::editor::selection::SelectionManager;
//! use voxel_terraform::editor::terraforming::TerraformingSystem;
//! use voxel_terraform::voxels::{voxel::voxel_type::VoxelType, world::VoxelWorld, WorldPos};
//!
//! let mut world = VoxelWorld::new();
//! let mut terraform = TerraformingSystem::new(Some(&mut world));
//! terraform.apply_tool(WorldPos::new(0, 10, 0));
//!
//! let mut selection = SelectionManager::default();
//! selection.start_selection(WorldPos::new(0, 10, 0));
//! selection.finalize_selection(terraform.world());
//! selection.copy_to_clipboard(terraform.world());
//! selection.paste_from_clipboard(WorldPos::new(5, 10, 5), &mut terraform);
//!
//! assert_eq!(terraform.history_size(), 2);
//! ```

use std::fs::File;
use std::io::BufReader;

use log::{error, info, LevelFilter};

use crate::core::config::EditorConfig;
use crate::core::logging::facade_logger;

pub mod core;
mod demo;
pub mod editor;
pub mod voxels;

/// Runs the scripted demo session.
///
/// Logging goes to stdout and is filtered by `RUST_LOG` (info by default). If a path is given
/// as the first argument it is read as a JSON `EditorConfig`.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path),
        None => EditorConfig::default(),
    };
    demo::run_session(&config, facade_logger());
}

fn load_config(path: &str) -> EditorConfig {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            error!("Can't open config {}: {}", path, err);
            return EditorConfig::default();
        }
    };
    match EditorConfig::from_reader(BufReader::new(file)) {
        Ok(config) => {
            info!("Loaded config from {}", path);
            config
        }
        Err(err) => {
            error!("Invalid config {}: {}", path, err);
            EditorConfig::default()
        }
    }
}

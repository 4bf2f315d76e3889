//! # Voxel Terraform Demo Entry Point
//!
//! Runs a scripted editing session against a generated plateau and logs every step.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release -- editor.json
//! ```

fn main() {
    voxel_terraform::run();
}

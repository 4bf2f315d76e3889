//! # Editor Configuration
//!
//! Tunables for the terraforming editor. Every field has a default, so a config file only has
//! to name the values it changes:
//!
//! ```json
//! { "undo_capacity": 250, "default_tool": "brush", "default_voxel_type": "grass" }
//! ```

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::editor::terraforming::tool::{TerraformMode, TerraformTool};
use crate::voxels::voxel::voxel_type::VoxelType;

/// Editor settings, loaded from JSON or built from defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undoable batches kept. The oldest batch is dropped beyond this.
    pub undo_capacity: usize,
    /// Smallest accepted tool size.
    pub min_tool_size: i32,
    /// Largest accepted tool size.
    pub max_tool_size: i32,
    /// Tool active when the editor starts.
    pub default_tool: TerraformTool,
    /// Mode active when the editor starts.
    pub default_mode: TerraformMode,
    /// Material active when the editor starts.
    pub default_voxel_type: VoxelType,
    /// Tool size when the editor starts.
    pub default_tool_size: i32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            undo_capacity: 100,
            min_tool_size: 1,
            max_tool_size: 10,
            default_tool: TerraformTool::SingleBlock,
            default_mode: TerraformMode::Place,
            default_voxel_type: VoxelType::STONE,
            default_tool_size: 1,
        }
    }
}

impl EditorConfig {
    /// Parses a config from a JSON string.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json).map(Self::normalized)
    }

    /// Parses a config from any JSON source, such as an open file.
    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader).map(Self::normalized)
    }

    /// Repairs values that would leave the editor unusable.
    ///
    /// The size range is forced to start at 1 and be non-empty, the default size is clamped
    /// into it, the capacity is at least 1, and an air default material falls back to stone.
    pub fn normalized(mut self) -> Self {
        self.min_tool_size = self.min_tool_size.max(1);
        self.max_tool_size = self.max_tool_size.max(self.min_tool_size);
        self.default_tool_size = self
            .default_tool_size
            .clamp(self.min_tool_size, self.max_tool_size);
        self.undo_capacity = self.undo_capacity.max(1);
        if self.default_voxel_type.is_air() {
            self.default_voxel_type = VoxelType::STONE;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = EditorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.undo_capacity, 100);
        assert_eq!(config.max_tool_size, 10);
    }

    #[test]
    fn test_partial_config_overrides_named_fields() {
        let config = EditorConfig::from_json_str(
            r#"{ "undo_capacity": 5, "default_tool": "filled_sphere", "default_mode": "replace",
                 "default_voxel_type": "snow", "default_tool_size": 4 }"#,
        )
        .unwrap();
        assert_eq!(config.undo_capacity, 5);
        assert_eq!(config.default_tool, TerraformTool::FilledSphere);
        assert_eq!(config.default_mode, TerraformMode::Replace);
        assert_eq!(config.default_voxel_type, VoxelType::SNOW);
        assert_eq!(config.default_tool_size, 4);
        assert_eq!(config.min_tool_size, 1);
    }

    #[test]
    fn test_invalid_ranges_are_repaired() {
        let config = EditorConfig::from_json_str(
            r#"{ "undo_capacity": 0, "min_tool_size": -3, "max_tool_size": 0,
                 "default_tool_size": 50, "default_voxel_type": "air" }"#,
        )
        .unwrap();
        assert_eq!(config.undo_capacity, 1);
        assert_eq!(config.min_tool_size, 1);
        assert_eq!(config.max_tool_size, 1);
        assert_eq!(config.default_tool_size, 1);
        assert_eq!(config.default_voxel_type, VoxelType::STONE);
    }

    #[test]
    fn test_unknown_tool_is_an_error() {
        assert!(EditorConfig::from_json_str(r#"{ "default_tool": "chisel" }"#).is_err());
        assert!(EditorConfig::from_reader("not json".as_bytes()).is_err());
    }
}

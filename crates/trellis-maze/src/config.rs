use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::image::WHITE;

/// Knobs for reading a maze image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Packed `0xRRGGBB` colour of open (background) pixels. Every other
    /// colour is a wall.
    #[serde(default = "default_open_color")]
    pub open_color: u32,
    /// Weight given to every passage edge.
    #[serde(default = "default_passage_weight")]
    pub passage_weight: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            open_color: default_open_color(),
            passage_weight: default_passage_weight(),
        }
    }
}

/// Load a [`MazeConfig`] from a TOML file. A missing file yields defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<MazeConfig> {
    if !path.exists() {
        return Ok(MazeConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<MazeConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_open_color() -> u32 {
    WHITE
}

const fn default_passage_weight() -> f64 {
    1.0
}

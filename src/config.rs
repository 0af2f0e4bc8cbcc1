//! YAML configuration (`butterfly-indoor.yaml`)
//!
//! ```yaml
//! nodes: data/Nodes.geojson
//! edges: data/Edges.geojson
//! respect_accessibility: true
//! floor_names:
//!   0: ground
//!   1: first
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, RouteError};
use crate::node::Floor;

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "butterfly-indoor.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Node feature collection
    pub nodes: PathBuf,
    /// Edge feature collection
    pub edges: PathBuf,
    /// Apply the accessibility filter before routing
    pub respect_accessibility: bool,
    /// Display names per floor level
    pub floor_names: BTreeMap<i32, String>,
}

impl Default for Config {
    fn default() -> Self {
        let mut floor_names = BTreeMap::new();
        floor_names.insert(0, "ground".to_string());
        floor_names.insert(1, "first".to_string());

        Self {
            nodes: PathBuf::from("Nodes.geojson"),
            edges: PathBuf::from("Edges.geojson"),
            respect_accessibility: true,
            floor_names,
        }
    }
}

impl Config {
    /// Read a config file. Relative data paths resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| RouteError::Config(format!("cannot read {}: {e}", path.display())))?;
        let mut config = Self::from_yaml(&text)
            .map_err(|e| RouteError::Config(format!("{}: {e}", path.display())))?;

        if let Some(base) = path.parent() {
            config.nodes = base.join(&config.nodes);
            config.edges = base.join(&config.edges);
        }

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse config text; missing keys take their defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| RouteError::Config(e.to_string()))
    }

    /// Display name for a floor, falling back to [`Floor::name`]
    pub fn floor_name(&self, floor: Floor) -> String {
        self.floor_names
            .get(&floor.0)
            .cloned()
            .unwrap_or_else(|| floor.name())
    }

    /// Resolve a floor from a display name or a number
    pub fn parse_floor(&self, label: &str) -> Option<Floor> {
        let label = label.trim();
        self.floor_names
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(label))
            .map(|(&level, _)| Floor(level))
            .or_else(|| Floor::parse_label(label))
    }
}

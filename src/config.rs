//! Tunable knobs for pathfinding, loadable from a TOML file.
//!
//! None of these change the search semantics described in the data model;
//! they only expose constants spec.md leaves fixed in prose (the 5-step
//! direction lookahead) so deployments can tune them without recompiling.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for [`crate::InfluenceMap`] pathfinding entry points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathfindConfig {
    /// Number of steps `pathfind_direction` looks ahead before returning
    /// `next_point`. Spec default is 5.
    pub lookahead_steps: usize,
    /// Default value for the `large` flag used by the
    /// [`crate::InfluenceMap::pathfind_direction_default`] convenience
    /// wrapper. Direct calls to `pathfind_direction`/`pathfind_path` are
    /// unaffected and always take an explicit flag.
    pub default_large_unit: bool,
}

impl Default for PathfindConfig {
    fn default() -> Self {
        Self {
            lookahead_steps: 5,
            default_large_unit: false,
        }
    }
}

impl PathfindConfig {
    /// Loads configuration from a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Ok(toml::from_str(&data)?)
    }

    /// Loads configuration from a TOML file, falling back to [`Default`]
    /// if the file is missing or malformed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_path(path).unwrap_or_default()
    }
}

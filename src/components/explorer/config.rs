use serde::{Deserialize, Serialize};

use super::error::{ExplorerError, Result};

pub const DEFAULT_INITIAL_NODE_DISPLAY: usize = 300;
pub const DEFAULT_MAX_NEIGHBOURS: usize = 100;

/// Read-only display ceilings supplied by the browser settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplorerConfig {
	/// Maximum number of nodes shown when a result is first rendered.
	pub initial_node_display: usize,
	/// Maximum number of neighbours a single node may be expanded to.
	pub max_neighbours: usize,
}

impl Default for ExplorerConfig {
	fn default() -> Self {
		Self {
			initial_node_display: DEFAULT_INITIAL_NODE_DISPLAY,
			max_neighbours: DEFAULT_MAX_NEIGHBOURS,
		}
	}
}

impl ExplorerConfig {
	pub fn from_json(json: &str) -> Result<Self> {
		serde_json::from_str(json).map_err(ExplorerError::Config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_keys_fall_back_to_defaults() {
		let config = ExplorerConfig::from_json(r#"{"maxNeighbours": 25}"#).unwrap();
		assert_eq!(config.max_neighbours, 25);
		assert_eq!(config.initial_node_display, DEFAULT_INITIAL_NODE_DISPLAY);
	}

	#[test]
	fn malformed_settings_are_a_config_error() {
		let err = ExplorerConfig::from_json(r#"{"initialNodeDisplay": "lots"}"#).unwrap_err();
		assert!(matches!(err, ExplorerError::Config(_)));
	}
}

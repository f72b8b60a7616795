use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::layout::border::MIN_BORDER_WIDTH;
use crate::layout::engine::LayoutConfig;
use crate::utils::validation::DEFAULT_WINDOW;

/// Order in which strips computed concurrently are appended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripOrder {
    /// Order in which the genomes were requested
    #[default]
    Requested,
    /// Order in which their computations finished
    Completion,
}

/// Configuration for a strip controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub layout: LayoutConfig,

    /// Narrowest a region may be squeezed by a border drag, in pixels
    pub min_border_width: f64,

    /// Length of the window opened on a genome with no other cue, in bp
    pub default_window: i64,

    pub strip_order: StripOrder,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            min_border_width: MIN_BORDER_WIDTH,
            default_window: DEFAULT_WINDOW,
            strip_order: StripOrder::default(),
        }
    }
}

impl ContextConfig {
    /// Load a configuration from a JSON file; missing fields keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

//! Run configuration for the tracelen binary.
//!
//! A TOML file names the layout snapshot, the two measurement layers, and
//! the optional cell/port selection. Missing required fields fail at load
//! time with the offending field named.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracelen_core::{LayerSelector, MeasureParams};

/// One drawing layer, as named in the config file.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LayerConfig {
    pub layer_no: u32,
    pub layer_dtype: u32,
}

impl From<LayerConfig> for LayerSelector {
    fn from(cfg: LayerConfig) -> Self {
        LayerSelector::new(cfg.layer_no, cfg.layer_dtype)
    }
}

/// A full measurement run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// JSON layout snapshot to measure.
    pub layout_file: PathBuf,
    /// Layer holding the routed path geometry.
    pub path_layer: LayerConfig,
    /// Layer holding the cutting regions and port labels.
    pub cutting_layer: LayerConfig,
    /// Top cell to measure; required when several top cells exist.
    #[serde(default)]
    pub cell_name: Option<String>,
    /// When non-empty, restricts the report to pairs of these ports.
    #[serde(default)]
    pub nodes: Vec<String>,
    /// Optional CSV output path for the report.
    #[serde(default)]
    pub report_file: Option<PathBuf>,
}

impl RunConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: RunConfig = toml::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Converts the file-level settings into pipeline parameters.
    pub fn measure_params(&self) -> MeasureParams {
        MeasureParams {
            path_layer: self.path_layer.into(),
            cutting_layer: self.cutting_layer.into(),
            cell_name: self.cell_name.clone(),
            nodes: self.nodes.clone(),
        }
    }
}

//! Top-level measurement pipeline.
//!
//! Runs the full data flow on a loaded layout snapshot: geometry selection,
//! cut classification, label association, segmentation, and shortest-path
//! reporting. Single-threaded and synchronous; every stage fully consumes
//! its predecessor's output, and a run either completes or fails outright.

use crate::error::Result;
use crate::layout::{self, LayerSelector, Layout};
use crate::report::{self, PathReport};
use crate::{ports, segment};
use tracing::info;

/// Caller-supplied parameters for one measurement run.
#[derive(Debug, Clone)]
pub struct MeasureParams {
    /// Layer holding the routed path geometry.
    pub path_layer: LayerSelector,
    /// Layer holding the cutting regions and their port labels.
    pub cutting_layer: LayerSelector,
    /// Top cell to measure; required when several top cells exist.
    pub cell_name: Option<String>,
    /// When non-empty, restricts the report to pairs of these ports.
    pub nodes: Vec<String>,
}

impl MeasureParams {
    pub fn new(path_layer: LayerSelector, cutting_layer: LayerSelector) -> Self {
        Self {
            path_layer,
            cutting_layer,
            cell_name: None,
            nodes: Vec::new(),
        }
    }
}

/// Measures shortest-path lengths between all labeled ports in the layout.
///
/// Lengths are in the layout's own units; no conversion is applied.
pub fn measure_path_lengths(layout: &Layout, params: &MeasureParams) -> Result<PathReport> {
    let (paths, candidates, labels) = layout::select_geometry(
        layout,
        params.path_layer,
        params.cutting_layer,
        params.cell_name.as_deref(),
    )?;

    let cuts_per_path = ports::associate_cuts(&paths, &candidates, &labels)?;
    let records = segment::segment_records(&paths, &cuts_per_path)?;
    let graph = report::build_graph(&records);
    let full = report::all_pairs_report(&graph)?;
    let positive = full.retain_positive()?;

    let result = if params.nodes.is_empty() {
        positive
    } else {
        positive.filter_nodes(&params.nodes)
    };
    info!(rows = result.rows().len(), "measurement complete");
    Ok(result)
}

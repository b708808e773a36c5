//! Error types for the measurement pipeline.
//!
//! Every stage reports failures through [`MeasureError`]; no stage retries or
//! recovers locally. All inputs are deterministic derivations of one static
//! layout snapshot, so a second attempt without fixing the input would
//! reproduce the identical error.

use thiserror::Error;

/// Errors that can occur while extracting path lengths from a layout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    /// The layout contains no top-level cell to measure.
    #[error("Layout has no top-level cells")]
    NoCells,

    /// More than one top-level cell exists and none was selected.
    #[error("Layout has {count} top-level cells, specify a cell name")]
    AmbiguousCell {
        /// Number of top-level cells found.
        count: usize,
    },

    /// The requested cell does not exist in the layout.
    #[error("No cell named '{name}' in layout")]
    UnknownCell {
        /// The cell name that was requested.
        name: String,
    },

    /// Two or more cutting regions carry the same label text.
    #[error("Duplicate port labels {labels:?}, cutting regions must be named uniquely")]
    DuplicateLabels {
        /// Every repeated occurrence after the first, in input order.
        labels: Vec<String>,
    },

    /// A designer-supplied label collides with the generated tail-name scheme.
    #[error("Port label '{label}' collides with the reserved polygon_<i>_tail_<j> name pattern")]
    ReservedLabel {
        /// The offending label text.
        label: String,
    },

    /// A segment's area/perimeter pair has no real length solution.
    #[error(
        "No real solution for segment length: area = {area}, perimeter = {perimeter}, \
         discriminant = {discriminant}"
    )]
    NoRealLength {
        /// Area of the offending sub-polygon.
        area: f64,
        /// Perimeter of the offending sub-polygon.
        perimeter: f64,
        /// The negative discriminant that was computed.
        discriminant: f64,
    },

    /// A valid cut produced an empty intersection with its path polygon.
    ///
    /// By construction a valid cut must overlap its path, so this indicates
    /// inconsistent geometry from the classifier and is never ignored.
    #[error("Cutting region '{label}' does not intersect its path polygon")]
    EmptyCutIntersection {
        /// Label of the cut whose intersection came back empty.
        label: String,
    },

    /// The assembled measurement graph has no nodes at all.
    #[error("No measurable path structure found, measurement graph is empty")]
    EmptyGraph,

    /// Every port pair was unreachable or degenerate after filtering.
    #[error("No positive-length port pairs remain in the report")]
    NoMeasurablePairs,
}

/// Result type alias for measurement operations.
pub type Result<T> = std::result::Result<T, MeasureError>;

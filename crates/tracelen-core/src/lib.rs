//! # tracelen-core
//!
//! Extracts physical path (waveguide/trace) lengths from a 2D polygon
//! layout. Designated "cutting" shapes on a secondary layer act as named
//! measurement ports: each one severs the path geometry, the resulting
//! sub-pieces are named by the port labels they touch, and an undirected
//! length graph answers shortest-path queries between all port pairs.
//!
//! ## Pipeline
//!
//! 1. **Geometry selection** ([`layout`]) - pick path and cutting shapes by
//!    layer/datatype, merge the path layer into maximal polygons.
//! 2. **Cut classification** ([`classify`]) - keep only cutting shapes that
//!    truly sever a path.
//! 3. **Label association** ([`ports`]) - bind each valid cut to the unique
//!    label inside it and reposition labels onto the cut/path boundary.
//! 4. **Segmentation** ([`segment`]) - split paths at their cuts and recover
//!    each piece's length from area and perimeter.
//! 5. **Reporting** ([`report`]) - assemble the length graph and produce the
//!    deduplicated all-pairs shortest-path table.
//!
//! All lengths are in the layout's native units; no conversion is applied.

pub mod classify;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod pipeline;
pub mod ports;
pub mod report;
pub mod segment;

pub use error::{MeasureError, Result};
pub use geometry::{BooleanOutcome, Point, Polygon};
pub use layout::{Cell, Instance, LayerSelector, Layout, LayoutShape, LayoutText, TextLabel};
pub use pipeline::{measure_path_lengths, MeasureParams};
pub use report::{PathReport, PathRow, UNREACHABLE};
pub use segment::SegmentRecord;

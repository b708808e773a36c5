//! Path segmentation and segment-length computation.
//!
//! Each path polygon is split at all of its valid cuts in one pass, every
//! resulting sub-piece is named by the repositioned port labels falling
//! inside it, and its traversed length is recovered from area and perimeter
//! alone.

use crate::error::{MeasureError, Result};
use crate::geometry::{self, Polygon};
use crate::ports::{self, ValidCut};
use tracing::{debug, error};

/// One measured edge of the output graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    pub node1: String,
    pub node2: String,
    pub length: f64,
}

fn round_12(value: f64) -> f64 {
    (value * 1e12).round() / 1e12
}

/// Recovers the traversed length of a roughly rectangular sub-polygon from
/// its area and perimeter.
///
/// For an ideal rectangle of sides L and w, `perimeter/4 = (L+w)/2` and the
/// discriminant equals `((L-w)/2)^2`, so the sum yields `max(L, w)` without
/// needing to know the polygon's orientation. The discriminant is rounded
/// to 12 decimal places to absorb floating-point noise from the geometry
/// engine before the sign check; a genuinely negative discriminant has no
/// real length solution and is an input error, never clamped.
pub fn measured_length(poly: &Polygon) -> Result<f64> {
    let area = poly.area();
    let perimeter = poly.perimeter();
    let discriminant = round_12(perimeter * perimeter / 16.0 - area);
    if discriminant < 0.0 {
        error!(area, perimeter, discriminant, "negative discriminant in length formula");
        return Err(MeasureError::NoRealLength {
            area,
            perimeter,
            discriminant,
        });
    }
    Ok(perimeter / 4.0 + discriminant.sqrt())
}

/// Distinct label texts whose origin falls inside `poly`, in first-seen order.
fn node_names(poly: &Polygon, labels: &[crate::layout::TextLabel]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for label in labels {
        if poly.contains(label.origin) && !names.iter().any(|n| n == &label.text) {
            names.push(label.text.clone());
        }
    }
    names
}

/// Splits every path polygon at its cuts and emits one [`SegmentRecord`]
/// per measurable sub-piece.
///
/// A sub-piece naming exactly two ports connects them directly. A sub-piece
/// naming exactly one port is an open end and gets a synthetic
/// `polygon_<path>_tail_<n>` partner, with the tail counter scoped to its
/// path polygon. Pieces naming zero or more than two ports are not
/// measurable segments and are skipped.
pub fn segment_records(
    paths: &[Polygon],
    cuts_per_path: &[Vec<ValidCut>],
) -> Result<Vec<SegmentRecord>> {
    let mut records = Vec::new();
    for (index, (path, cuts)) in paths.iter().zip(cuts_per_path).enumerate() {
        if cuts.is_empty() {
            continue;
        }

        let mut path_labels = Vec::new();
        for cut in cuts {
            if let Some(label) = &cut.label {
                path_labels.extend(ports::project_onto_path(path, &cut.polygon, &label.text)?);
            }
        }

        let cut_polygons: Vec<Polygon> = cuts.iter().map(|c| c.polygon.clone()).collect();
        let pieces = geometry::subtract_all(path, &cut_polygons);
        debug!(path = index, pieces = pieces.len(), "split path polygon");

        let mut tail_counter = 0usize;
        for piece in &pieces {
            let names = node_names(piece, &path_labels);
            let (node1, node2) = match names.len() {
                1 => {
                    let tail = format!("polygon_{}_tail_{}", index, tail_counter);
                    tail_counter += 1;
                    (names.into_iter().next().unwrap_or_default(), tail)
                }
                2 => {
                    let mut it = names.into_iter();
                    let first = it.next().unwrap_or_default();
                    let second = it.next().unwrap_or_default();
                    (first, second)
                }
                _ => continue,
            };
            let length = measured_length(piece)?;
            records.push(SegmentRecord {
                node1,
                node2,
                length,
            });
        }
    }
    Ok(records)
}

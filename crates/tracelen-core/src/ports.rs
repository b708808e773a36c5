//! Port-label association and repositioning.
//!
//! Valid cuts become named measurement ports by binding each one to the text
//! label whose origin falls inside it. Label text must be globally unique;
//! duplicates are a layout defect reported in full. Labels are then
//! re-derived on the cut/path intersection boundary so that after splitting,
//! every adjacent sub-piece holds at least one point carrying the port name.

use crate::classify;
use crate::error::{MeasureError, Result};
use crate::geometry::{self, Polygon};
use crate::layout::TextLabel;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::{debug, error};

/// Generated open-end names follow `polygon_<path>_tail_<n>`; designer
/// labels matching this pattern would collide with them.
fn tail_name_pattern() -> &'static Regex {
    static TAIL_PATTERN: OnceLock<Regex> = OnceLock::new();
    TAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^polygon_\d+_tail_\d+$").expect("invalid tail name pattern")
    })
}

/// A cutting polygon proven to sever a path, with its port label when one
/// was placed inside it.
#[derive(Debug, Clone)]
pub struct ValidCut {
    pub polygon: Polygon,
    pub label: Option<TextLabel>,
}

/// Every repeated occurrence after the first, in input order.
pub fn find_duplicates<T: Eq + std::hash::Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for item in items {
        if !seen.insert(item.clone()) {
            duplicates.push(item.clone());
        }
    }
    duplicates
}

/// Filters cutting candidates down to valid cuts, binds labels, and groups
/// the cuts per path polygon.
///
/// Returns one `Vec<ValidCut>` per entry of `paths`, in path order, each
/// preserving the candidates' own iteration order.
pub fn associate_cuts(
    paths: &[Polygon],
    candidates: &[Polygon],
    labels: &[TextLabel],
) -> Result<Vec<Vec<ValidCut>>> {
    let valid: Vec<&Polygon> = candidates
        .iter()
        .filter(|c| classify::severs_path(c, paths))
        .collect();
    debug!(
        candidates = candidates.len(),
        valid = valid.len(),
        "classified cutting candidates"
    );

    // Only labels sitting inside some valid cut take part in measurement.
    let origins: Vec<_> = labels.iter().map(|l| l.origin).collect();
    let valid_owned: Vec<Polygon> = valid.iter().map(|&p| p.clone()).collect();
    let kept: Vec<&TextLabel> = labels
        .iter()
        .zip(geometry::points_inside(&origins, &valid_owned))
        .filter_map(|(label, inside)| inside.then_some(label))
        .collect();

    let texts: Vec<String> = kept.iter().map(|l| l.text.clone()).collect();
    let duplicates = find_duplicates(&texts);
    if !duplicates.is_empty() {
        error!(?duplicates, "duplicate port labels in layout");
        return Err(MeasureError::DuplicateLabels { labels: duplicates });
    }
    if let Some(reserved) = texts.iter().find(|t| tail_name_pattern().is_match(t)) {
        return Err(MeasureError::ReservedLabel {
            label: reserved.clone(),
        });
    }

    // First label inside each cut wins; a cut may legitimately stay
    // unlabeled and then only contributes a split, not a port name.
    let assigned: Vec<ValidCut> = valid
        .iter()
        .map(|&cut| ValidCut {
            polygon: cut.clone(),
            label: kept
                .iter()
                .find(|l| cut.contains(l.origin))
                .map(|&l| l.clone()),
        })
        .collect();

    // A cut tested against the full path set may owe its validity to a
    // different path polygon; re-test against each path individually.
    let per_path = paths
        .iter()
        .map(|path| {
            assigned
                .iter()
                .filter(|cut| classify::severs_path(&cut.polygon, std::slice::from_ref(path)))
                .cloned()
                .collect()
        })
        .collect();
    Ok(per_path)
}

/// Re-derives a port's label points on the boundary where its cut overlaps
/// the path, one label per intersection vertex.
///
/// The designer's single label origin need not land inside the post-split
/// sub-polygons; the intersection vertices by construction lie on every
/// adjacent sub-piece's boundary.
pub fn project_onto_path(path: &Polygon, cut: &Polygon, text: &str) -> Result<Vec<TextLabel>> {
    let overlap = geometry::intersection(cut, path).into_vec();
    let Some(first) = overlap.first() else {
        error!(label = text, "valid cut has empty intersection with its path");
        return Err(MeasureError::EmptyCutIntersection {
            label: text.to_string(),
        });
    };
    Ok(first
        .points()
        .into_iter()
        .map(|p| TextLabel::new(text, p))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Polygon {
        Polygon::new(&[
            Point::new(x1, y1),
            Point::new(x2, y1),
            Point::new(x2, y2),
            Point::new(x1, y2),
        ])
    }

    #[test]
    fn test_find_duplicates_reports_every_repeat() {
        let items: Vec<String> = ["a", "b", "a", "c", "a"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(find_duplicates(&items), vec!["a".to_string(), "a".to_string()]);
        assert!(find_duplicates(&["x", "y", "z"]).is_empty());
    }

    #[test]
    fn test_association_binds_labels_and_groups_by_path() {
        let path = rect(0.0, 0.0, 30.0, 1.0);
        let cuts = vec![rect(9.5, -0.5, 10.5, 1.5), rect(19.5, -0.5, 20.5, 1.5)];
        let labels = vec![
            TextLabel::new("a", Point::new(10.0, 0.5)),
            TextLabel::new("b", Point::new(20.0, 0.5)),
            TextLabel::new("stray", Point::new(50.0, 50.0)),
        ];
        let grouped = associate_cuts(&[path], &cuts, &labels).expect("association");
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].len(), 2);
        assert_eq!(grouped[0][0].label.as_ref().map(|l| l.text.as_str()), Some("a"));
        assert_eq!(grouped[0][1].label.as_ref().map(|l| l.text.as_str()), Some("b"));
    }

    #[test]
    fn test_invalid_candidates_dropped() {
        let path = rect(0.0, 0.0, 30.0, 1.0);
        let cuts = vec![
            rect(9.5, -0.5, 10.5, 1.5),
            rect(5.0, 0.25, 6.0, 0.75), // interior, not a cut
        ];
        let labels = vec![TextLabel::new("a", Point::new(10.0, 0.5))];
        let grouped = associate_cuts(&[path], &cuts, &labels).expect("association");
        assert_eq!(grouped[0].len(), 1);
    }

    #[test]
    fn test_duplicate_labels_fatal() {
        let path = rect(0.0, 0.0, 30.0, 1.0);
        let cuts = vec![rect(9.5, -0.5, 10.5, 1.5), rect(19.5, -0.5, 20.5, 1.5)];
        let labels = vec![
            TextLabel::new("p", Point::new(10.0, 0.5)),
            TextLabel::new("p", Point::new(20.0, 0.5)),
        ];
        let err = associate_cuts(&[path], &cuts, &labels).unwrap_err();
        assert_eq!(
            err,
            MeasureError::DuplicateLabels {
                labels: vec!["p".to_string()]
            }
        );
    }

    #[test]
    fn test_reserved_tail_names_rejected() {
        let path = rect(0.0, 0.0, 30.0, 1.0);
        let cuts = vec![rect(9.5, -0.5, 10.5, 1.5)];
        let labels = vec![TextLabel::new("polygon_0_tail_1", Point::new(10.0, 0.5))];
        let err = associate_cuts(&[path], &cuts, &labels).unwrap_err();
        assert!(matches!(err, MeasureError::ReservedLabel { .. }));
    }

    #[test]
    fn test_cuts_grouped_to_their_own_path() {
        let path_a = rect(0.0, 0.0, 20.0, 1.0);
        let path_b = rect(0.0, 10.0, 20.0, 11.0);
        let cut_a = rect(9.5, -0.5, 10.5, 1.5);
        let cut_b = rect(9.5, 9.5, 10.5, 11.5);
        let labels = vec![
            TextLabel::new("a", Point::new(10.0, 0.5)),
            TextLabel::new("b", Point::new(10.0, 10.5)),
        ];
        let grouped = associate_cuts(
            &[path_a, path_b],
            &[cut_a, cut_b],
            &labels,
        )
        .expect("association");
        assert_eq!(grouped[0].len(), 1);
        assert_eq!(grouped[1].len(), 1);
        assert_eq!(grouped[0][0].label.as_ref().map(|l| l.text.as_str()), Some("a"));
        assert_eq!(grouped[1][0].label.as_ref().map(|l| l.text.as_str()), Some("b"));
    }

    #[test]
    fn test_projection_lands_on_intersection_vertices() {
        let path = rect(0.0, 0.0, 30.0, 1.0);
        let cut = rect(9.5, -0.5, 10.5, 1.5);
        let moved = project_onto_path(&path, &cut, "a").expect("projection");
        // The thin overlap slab is a quad; one label per vertex.
        assert_eq!(moved.len(), 4);
        assert!(moved.iter().all(|l| l.text == "a"));
        assert!(moved
            .iter()
            .all(|l| (l.origin.x - 9.5).abs() < 1e-9 || (l.origin.x - 10.5).abs() < 1e-9));
    }

    #[test]
    fn test_projection_requires_overlap() {
        let path = rect(0.0, 0.0, 30.0, 1.0);
        let away = rect(50.0, 0.0, 51.0, 1.0);
        let err = project_onto_path(&path, &away, "a").unwrap_err();
        assert_eq!(
            err,
            MeasureError::EmptyCutIntersection {
                label: "a".to_string()
            }
        );
    }
}

//! Cut-validity classification.
//!
//! A cutting region only counts as a measurement port if it severs the path
//! into separable pieces across the path's full width. Regions that merely
//! touch an endpoint, sit inside the path, or miss it entirely are rejected.

use crate::geometry::{self, Polygon};

/// Decides whether `candidate` truly severs any polygon in `paths`.
///
/// The test runs on the boolean difference `paths MINUS candidate`:
/// - more than one remaining piece means the candidate split the path;
/// - exactly one piece with a non-empty overlap means the candidate touched
///   the path without splitting it. That is still a valid cut when it
///   straddles the path boundary edge-to-edge, which is the case exactly
///   when none of the candidate's own vertices lie inside the path. A
///   candidate with corners in the path interior is an end-of-path marker,
///   not a cut;
/// - anything else (no overlap, or the candidate swallowed the path) is not
///   a cut.
pub fn severs_path(candidate: &Polygon, paths: &[Polygon]) -> bool {
    let remainder = geometry::difference(paths, candidate);
    match remainder.len() {
        0 => false,
        1 => {
            geometry::intersects_any(paths, candidate)
                && !geometry::any_vertex_inside(candidate, paths)
        }
        _ => true,
    }
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
    fn test_full_width_interior_cut_is_valid() {
        let path = rect(0.0, 0.0, 20.0, 1.0);
        let cut = rect(9.5, -0.5, 10.5, 1.5);
        assert!(severs_path(&cut, &[path]));
    }

    #[test]
    fn test_end_straddling_cut_is_valid() {
        // Straddles the path's left edge without leaving stray corners in
        // the interior: remainder is a single piece, vertices all outside.
        let path = rect(0.0, 0.0, 20.0, 1.0);
        let cut = rect(-0.1, -0.5, 0.1, 1.5);
        assert!(severs_path(&cut, &[path]));
    }

    #[test]
    fn test_fully_interior_candidate_is_invalid() {
        let path = rect(0.0, 0.0, 20.0, 1.0);
        let inside = rect(5.0, 0.25, 6.0, 0.75);
        assert!(!severs_path(&inside, &[path]));
    }

    #[test]
    fn test_end_marker_with_corners_inside_is_invalid() {
        // Overlaps the end of the path but its right corners sit in the
        // path interior, so it marks an endpoint rather than severing.
        let path = rect(0.0, 0.0, 20.0, 1.0);
        let marker = rect(-1.0, 0.25, 1.0, 0.75);
        assert!(!severs_path(&marker, &[path]));
    }

    #[test]
    fn test_disjoint_candidate_is_invalid() {
        let path = rect(0.0, 0.0, 20.0, 1.0);
        let away = rect(30.0, 0.0, 31.0, 1.0);
        assert!(!severs_path(&away, &[path]));
    }

    #[test]
    fn test_candidate_covering_whole_path_is_invalid() {
        let path = rect(0.0, 0.0, 20.0, 1.0);
        let cover = rect(-1.0, -1.0, 21.0, 2.0);
        assert!(!severs_path(&cover, &[path]));
    }

    #[test]
    fn test_multiple_disjoint_paths_retested_individually() {
        let path_a = rect(0.0, 0.0, 20.0, 1.0);
        let path_b = rect(0.0, 10.0, 20.0, 11.0);
        let cut = rect(9.5, -0.5, 10.5, 1.5);
        // Against the full set the difference trivially has two pieces.
        assert!(severs_path(&cut, &[path_a.clone(), path_b.clone()]));
        // Re-testing per path resolves which one actually owns the cut.
        assert!(severs_path(&cut, &[path_a]));
        assert!(!severs_path(&cut, &[path_b]));
    }
}

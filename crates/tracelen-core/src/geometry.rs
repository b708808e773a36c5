//! Planar geometry primitives for the measurement pipeline.
//!
//! Wraps `cavalier_contours` polylines behind a [`Polygon`] type and exposes
//! the set-wise boolean operations the pipeline needs: union-merging raw
//! layer shapes, subtracting cutting regions, and intersecting cuts with
//! paths. Every boolean result is surfaced as a [`BooleanOutcome`] because
//! the engine may legitimately return zero, one, or many polygons from any
//! operation; callers branch on that cardinality explicitly.

use cavalier_contours::core::math::Vector2;
use cavalier_contours::polyline::{BooleanOp, PlineSource, PlineSourceMut, PlineVertex, Polyline};
use serde::{Deserialize, Serialize};

/// Tolerance for treating a point on a polygon boundary as contained.
///
/// Repositioned port labels sit exactly on the split boundary of the
/// sub-polygon they name, so containment tests must not lose them to
/// floating-point edge cases.
const BOUNDARY_EPS: f64 = 1e-9;

/// A 2D point in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}

/// A closed, simple polygon derived from layout geometry.
///
/// Vertices are normalized counter-clockwise on construction. The pipeline
/// never mutates a polygon's points, it only derives new polygons through
/// boolean operations.
#[derive(Debug, Clone)]
pub struct Polygon {
    pline: Polyline<f64>,
}

impl Polygon {
    /// Builds a polygon from an ordered vertex list (implicitly closed).
    ///
    /// Input winding does not matter; vertices are reordered
    /// counter-clockwise before the polyline is built.
    pub fn new(points: &[Point]) -> Self {
        let mut vertices: Vec<Point> = points.to_vec();
        let mut signed_area = 0.0;
        for i in 0..vertices.len() {
            let p1 = vertices[i];
            let p2 = vertices[(i + 1) % vertices.len()];
            signed_area += p1.x * p2.y - p2.x * p1.y;
        }
        if signed_area < 0.0 {
            vertices.reverse();
        }

        let mut pline = Polyline::new();
        for p in vertices {
            pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
        }
        pline.set_is_closed(true);
        Self { pline }
    }

    fn from_pline(pline: Polyline) -> Self {
        Self { pline }
    }

    /// The polygon's vertices in order.
    pub fn points(&self) -> Vec<Point> {
        (0..self.pline.vertex_count())
            .filter_map(|i| self.pline.get(i))
            .map(|v| Point::new(v.x, v.y))
            .collect()
    }

    /// Enclosed area (always non-negative).
    pub fn area(&self) -> f64 {
        self.pline.area().abs()
    }

    /// Boundary length.
    pub fn perimeter(&self) -> f64 {
        self.pline.path_length()
    }

    /// Strict interior containment test (boundary points are excluded).
    pub fn contains_interior(&self, p: Point) -> bool {
        self.pline.winding_number(Vector2::new(p.x, p.y)) != 0
    }

    /// Containment test that also accepts points on the boundary.
    pub fn contains(&self, p: Point) -> bool {
        self.contains_interior(p) || self.boundary_distance(p) <= BOUNDARY_EPS
    }

    /// Distance from `p` to the closest point on the polygon boundary.
    fn boundary_distance(&self, p: Point) -> f64 {
        let pts = self.points();
        let mut best = f64::MAX;
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            best = best.min(segment_distance(p, a, b));
        }
        best
    }

    fn boolean(&self, other: &Polygon, op: BooleanOp) -> Vec<Polygon> {
        // Holes (negative plines) are dropped: path geometry is a solid
        // strip, and a cut punching a hole without reaching the boundary is
        // exactly the case the classifier rejects.
        self.pline
            .boolean(&other.pline, op)
            .pos_plines
            .into_iter()
            .map(|r| Polygon::from_pline(r.pline))
            .collect()
    }
}

/// Result cardinality of a boolean operation over polygon sets.
#[derive(Debug, Clone)]
pub enum BooleanOutcome {
    /// The operation produced no geometry.
    Empty,
    /// The operation produced exactly one polygon.
    Single(Polygon),
    /// The operation produced two or more disjoint polygons.
    Many(Vec<Polygon>),
}

impl BooleanOutcome {
    fn from_vec(mut polygons: Vec<Polygon>) -> Self {
        match polygons.len() {
            0 => BooleanOutcome::Empty,
            1 => BooleanOutcome::Single(polygons.remove(0)),
            _ => BooleanOutcome::Many(polygons),
        }
    }

    /// Number of polygons produced.
    pub fn len(&self) -> usize {
        match self {
            BooleanOutcome::Empty => 0,
            BooleanOutcome::Single(_) => 1,
            BooleanOutcome::Many(polys) => polys.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BooleanOutcome::Empty)
    }

    /// Flattens the outcome into a plain vector.
    pub fn into_vec(self) -> Vec<Polygon> {
        match self {
            BooleanOutcome::Empty => Vec::new(),
            BooleanOutcome::Single(poly) => vec![poly],
            BooleanOutcome::Many(polys) => polys,
        }
    }
}

/// Subtracts `cut` from every polygon in `paths` and collects the pieces.
pub fn difference(paths: &[Polygon], cut: &Polygon) -> BooleanOutcome {
    let pieces = paths
        .iter()
        .flat_map(|p| p.boolean(cut, BooleanOp::Not))
        .collect();
    BooleanOutcome::from_vec(pieces)
}

/// Intersects two polygons.
pub fn intersection(a: &Polygon, b: &Polygon) -> BooleanOutcome {
    BooleanOutcome::from_vec(a.boolean(b, BooleanOp::And))
}

/// Whether `cut` overlaps any polygon in `paths`.
pub fn intersects_any(paths: &[Polygon], cut: &Polygon) -> bool {
    paths
        .iter()
        .any(|p| !p.boolean(cut, BooleanOp::And).is_empty())
}

/// Whether any vertex of `candidate` lies strictly inside any of `polygons`.
pub fn any_vertex_inside(candidate: &Polygon, polygons: &[Polygon]) -> bool {
    candidate
        .points()
        .iter()
        .any(|&v| polygons.iter().any(|p| p.contains_interior(v)))
}

/// Batch point-in-polygon-set test, one flag per input point.
pub fn points_inside(points: &[Point], polygons: &[Polygon]) -> Vec<bool> {
    points
        .iter()
        .map(|&pt| polygons.iter().any(|p| p.contains(pt)))
        .collect()
}

/// Splits `polygon` by subtracting every cutter in sequence.
pub fn subtract_all(polygon: &Polygon, cutters: &[Polygon]) -> Vec<Polygon> {
    let mut pieces = vec![polygon.clone()];
    for cutter in cutters {
        pieces = pieces
            .iter()
            .flat_map(|p| p.boolean(cutter, BooleanOp::Not))
            .collect();
    }
    pieces
}

/// Merges raw layer shapes so overlapping shapes become single maximal
/// polygons. Shapes that stay disjoint stay separate.
pub fn union_merge(shapes: Vec<Polygon>) -> Vec<Polygon> {
    let mut merged: Vec<Polygon> = Vec::new();
    for shape in shapes {
        let mut current = shape;
        // Joining may connect previously-separate regions, so rescan after
        // every successful merge until nothing else joins.
        loop {
            let mut joined = false;
            let mut i = 0;
            while i < merged.len() {
                let mut result = merged[i].boolean(&current, BooleanOp::Or);
                if result.len() == 1 {
                    current = result.remove(0);
                    merged.swap_remove(i);
                    joined = true;
                    break;
                }
                i += 1;
            }
            if !joined {
                break;
            }
        }
        merged.push(current);
    }
    merged
}

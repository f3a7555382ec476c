//! Lane polygons: validation and inclusive point containment.

use nalgebra::Point2;

use crate::error::ConfigError;

/// Identifier of a traffic lane. Lower ids win when polygons overlap.
pub type LaneId = u32;

/// Distance under which a point counts as lying on a polygon edge.
const EDGE_EPSILON: f64 = 1e-9;

/// A simple closed polygon covering one traffic lane, in integer pixel coordinates.
///
/// The closing edge from the last vertex back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanePolygon {
    pub lane_id: LaneId,
    pub vertices: Vec<Point2<i32>>,
}

impl LanePolygon {
    pub fn new(lane_id: LaneId, vertices: Vec<Point2<i32>>) -> Self {
        Self { lane_id, vertices }
    }

    /// Build from `(x, y)` pairs.
    pub fn from_points(lane_id: LaneId, points: &[(i32, i32)]) -> Self {
        Self::new(
            lane_id,
            points.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
        )
    }

    /// Iterate over edges as `(start, end)`, including the closing edge.
    fn edges(&self) -> impl Iterator<Item = (Point2<i128>, Point2<i128>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (widen(self.vertices[i]), widen(self.vertices[(i + 1) % n])))
    }

    /// Twice the signed area (shoelace formula). Zero for degenerate shapes.
    pub fn doubled_area(&self) -> i128 {
        self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum()
    }

    /// Check that the polygon is simple and encloses a non-zero area.
    ///
    /// Integer arithmetic keeps the check exact. Coordinates are widened to
    /// `i128`, which holds every product of two `i32` differences.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidPolygon {
            lane_id: self.lane_id,
            reason,
        };

        let n = self.vertices.len();
        if n < 3 {
            return Err(invalid(format!("needs at least 3 vertices, got {n}")));
        }

        for i in 0..n {
            if self.vertices[i] == self.vertices[(i + 1) % n] {
                return Err(invalid(format!("vertex {i} is repeated")));
            }
        }

        if self.doubled_area() == 0 {
            return Err(invalid("encloses zero area".to_string()));
        }

        let edges: Vec<_> = self.edges().collect();

        // Consecutive edges may only share their common vertex.
        for i in 0..n {
            let (a, b) = edges[i];
            let (_, c) = edges[(i + 1) % n];
            let turn = cross(a, b, c);
            let back = (a.x - b.x) * (c.x - b.x) + (a.y - b.y) * (c.y - b.y);
            if turn == 0 && back > 0 {
                return Err(invalid(format!(
                    "edge {i} folds back onto edge {}",
                    (i + 1) % n
                )));
            }
        }

        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (p1, p2) = edges[i];
                let (p3, p4) = edges[j];
                if segments_intersect(p1, p2, p3, p4) {
                    return Err(invalid(format!("edges {i} and {j} intersect")));
                }
            }
        }

        Ok(())
    }

    /// Inclusive point-in-polygon test: points on an edge or vertex are inside.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        let n = self.vertices.len();
        let mut inside = false;

        for i in 0..n {
            let a = to_f64(self.vertices[i]);
            let b = to_f64(self.vertices[(i + 1) % n]);

            if on_edge(&a, &b, point) {
                return true;
            }

            if (a.y > point.y) != (b.y > point.y) {
                let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
        }

        inside
    }
}

#[inline]
fn widen(p: Point2<i32>) -> Point2<i128> {
    Point2::new(i128::from(p.x), i128::from(p.y))
}

#[inline]
fn to_f64(p: Point2<i32>) -> Point2<f64> {
    Point2::new(f64::from(p.x), f64::from(p.y))
}

/// z-component of (b - a) x (c - a).
#[inline]
fn cross(a: Point2<i128>, b: Point2<i128>, c: Point2<i128>) -> i128 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// `c` lies within the bounding box of segment `ab` (collinearity checked by the caller).
#[inline]
fn within_span(a: Point2<i128>, b: Point2<i128>, c: Point2<i128>) -> bool {
    c.x >= a.x.min(b.x) && c.x <= a.x.max(b.x) && c.y >= a.y.min(b.y) && c.y <= a.y.max(b.y)
}

/// Closed segment intersection, touching endpoints included.
fn segments_intersect(
    p1: Point2<i128>,
    p2: Point2<i128>,
    p3: Point2<i128>,
    p4: Point2<i128>,
) -> bool {
    let d1 = cross(p3, p4, p1).signum();
    let d2 = cross(p3, p4, p2).signum();
    let d3 = cross(p1, p2, p3).signum();
    let d4 = cross(p1, p2, p4).signum();

    if d1 * d2 < 0 && d3 * d4 < 0 {
        return true;
    }

    (d1 == 0 && within_span(p3, p4, p1))
        || (d2 == 0 && within_span(p3, p4, p2))
        || (d3 == 0 && within_span(p1, p2, p3))
        || (d4 == 0 && within_span(p1, p2, p4))
}

fn on_edge(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> bool {
    let ab = *b - *a;
    let ap = *p - *a;
    let length = ab.norm();
    if length == 0.0 {
        return nalgebra::distance(a, p) <= EDGE_EPSILON;
    }
    let offset = (ab.x * ap.y - ab.y * ap.x).abs() / length;
    if offset > EDGE_EPSILON {
        return false;
    }
    p.x >= a.x.min(b.x) - EDGE_EPSILON
        && p.x <= a.x.max(b.x) + EDGE_EPSILON
        && p.y >= a.y.min(b.y) - EDGE_EPSILON
        && p.y <= a.y.max(b.y) + EDGE_EPSILON
}

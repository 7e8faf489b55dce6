// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stateless 2D geometry primitives
//!
//! Line-segment intersection, point-in-polygon, and the shoelace family of
//! polygon measures. Polygons are given as open rings: the closing edge from
//! the last point back to the first is implied.

use nalgebra::Vector2;

use crate::types::Point2D;

/// Cross-product denominators below this are treated as parallel.
pub const INTERSECTION_EPSILON: f64 = 1e-4;

/// Squared lengths below this are treated as zero-length segments.
const DEGENERATE_LENGTH_SQ: f64 = 1e-10;

/// Euclidean distance between two points
pub fn distance(a: &Point2D, b: &Point2D) -> f64 {
    a.distance_to(b)
}

/// Intersection point of the finite segments `p1-p2` and `p3-p4`.
///
/// Uses the parametric form `p1 + t(p2 - p1) = p3 + u(p4 - p3)` and only
/// accepts `t, u` in `[0, 1]`. Nearly parallel pairs (denominator below
/// [`INTERSECTION_EPSILON`]) are rejected rather than producing a far-away,
/// numerically unstable point.
pub fn segment_intersection(
    p1: &Point2D,
    p2: &Point2D,
    p3: &Point2D,
    p4: &Point2D,
) -> Option<Point2D> {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < INTERSECTION_EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point2D::new(
            p1.x + t * (p2.x - p1.x),
            p1.y + t * (p2.y - p1.y),
        ))
    } else {
        None
    }
}

/// Crossing-number (even-odd) point-in-polygon test.
///
/// Works for non-convex rings. The result for a point lying exactly on an
/// edge is unspecified: it may report either side.
pub fn point_in_polygon(point: &Point2D, ring: &[Point2D]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = &ring[i];
        let pj = &ring[j];
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Polygon area using the shoelace formula (absolute value)
pub fn polygon_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }

    area.abs() / 2.0
}

/// Closed-ring perimeter: sum of consecutive edge lengths including the
/// closing edge.
pub fn polygon_perimeter(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }

    (0..n)
        .map(|i| points[i].distance_to(&points[(i + 1) % n]))
        .sum()
}

/// Arithmetic mean of the ring's vertices.
///
/// This is not the area-weighted centroid. For a non-convex ring it can fall
/// outside the polygon.
pub fn polygon_centroid(points: &[Point2D]) -> Option<Point2D> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point2D::new(sx / n, sy / n))
}

/// Foot of the perpendicular from `point` onto segment `a-b`, clamped to
/// the segment. `None` for a zero-length segment.
pub fn closest_point_on_segment(point: &Point2D, a: &Point2D, b: &Point2D) -> Option<Point2D> {
    let ab = Vector2::new(b.x - a.x, b.y - a.y);
    let length_sq = ab.norm_squared();
    if length_sq < DEGENERATE_LENGTH_SQ {
        return None;
    }

    let ap = Vector2::new(point.x - a.x, point.y - a.y);
    let t = (ap.dot(&ab) / length_sq).clamp(0.0, 1.0);
    Some(Point2D::new(a.x + t * ab.x, a.y + t * ab.y))
}

/// Distance from `point` to segment `a-b`
pub fn point_segment_distance(point: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    match closest_point_on_segment(point, a, b) {
        Some(foot) => point.distance_to(&foot),
        None => point.distance_to(a),
    }
}

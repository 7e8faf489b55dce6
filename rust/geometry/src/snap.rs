// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interactive snap resolution
//!
//! Given a pointer position and the current drawing, pick the single best
//! point to snap to. Candidates are generated per enabled [`SnapType`],
//! anything farther than the snap radius is discarded, and the rest are
//! ordered by type priority (descending) then distance (ascending).
//!
//! Resolution is stateless and meant to run on every pointer move, so
//! [`find_snap_point`] keeps only the best candidate seen so far instead of
//! collecting and sorting. Callers should still coalesce pointer events to
//! one call per frame; there is no throttling or caching here.
//!
//! Cost per call is O(S) for vertices and midpoints, O(S²) for
//! intersections, O(O) for object centers and O(1) for the grid.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::primitives::{closest_point_on_segment, segment_intersection};
use crate::types::{Bounds, ElementId, LineSegment, Point2D, SegmentId, VertexId};

/// Kind of snap target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapType {
    /// Segment endpoint
    Vertex,
    /// Crossing of two segments
    Intersection,
    /// Segment midpoint
    Midpoint,
    /// Center of an object's bounding box
    Center,
    /// Foot of the perpendicular onto a reference segment
    Perpendicular,
    /// Nearest grid point
    Grid,
}

/// Fixed type → priority table. Higher wins.
const SNAP_PRIORITIES: [(SnapType, u8); 6] = [
    (SnapType::Vertex, 10),
    (SnapType::Intersection, 9),
    (SnapType::Midpoint, 8),
    (SnapType::Center, 7),
    (SnapType::Perpendicular, 6),
    (SnapType::Grid, 1),
];

impl SnapType {
    pub const ALL: [SnapType; 6] = [
        SnapType::Vertex,
        SnapType::Intersection,
        SnapType::Midpoint,
        SnapType::Center,
        SnapType::Perpendicular,
        SnapType::Grid,
    ];

    /// Priority used for tie-breaking between candidate types
    pub const fn priority(self) -> u8 {
        SNAP_PRIORITIES[self as usize].1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SnapType::Vertex => "vertex",
            SnapType::Intersection => "intersection",
            SnapType::Midpoint => "midpoint",
            SnapType::Center => "center",
            SnapType::Perpendicular => "perpendicular",
            SnapType::Grid => "grid",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl std::fmt::Display for SnapType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SnapType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SnapType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownSnapType(s.to_string()))
    }
}

/// Set of enabled snap types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapMask {
    bits: u8,
}

impl SnapMask {
    pub const NONE: SnapMask = SnapMask { bits: 0 };
    pub const ALL: SnapMask = SnapMask { bits: 0b11_1111 };

    pub fn from_types(types: &[SnapType]) -> Self {
        types.iter().fold(Self::NONE, |mask, &t| mask.with(t))
    }

    pub fn with(self, snap_type: SnapType) -> Self {
        Self {
            bits: self.bits | snap_type.bit(),
        }
    }

    pub fn without(self, snap_type: SnapType) -> Self {
        Self {
            bits: self.bits & !snap_type.bit(),
        }
    }

    pub fn is_enabled(&self, snap_type: SnapType) -> bool {
        self.bits & snap_type.bit() != 0
    }
}

impl Default for SnapMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Snap settings supplied by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapConfig {
    /// Candidates farther than this from the pointer are discarded
    pub snap_radius: f64,
    /// Grid spacing in world units
    pub grid_size: f64,
    /// Enabled snap types
    pub enabled: SnapMask,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            snap_radius: 15.0,
            grid_size: 10.0,
            enabled: SnapMask::ALL,
        }
    }
}

impl SnapConfig {
    /// Reject settings that indicate a bug in the caller.
    pub fn validate(&self) -> Result<()> {
        if !(self.snap_radius >= 0.0) {
            return Err(Error::InvalidSnapRadius(self.snap_radius));
        }
        if self.enabled.is_enabled(SnapType::Grid) && !(self.grid_size > 0.0) {
            return Err(Error::InvalidGridSize(self.grid_size));
        }
        Ok(())
    }
}

/// An object whose bounding-box center can be snapped to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SnapObject {
    pub id: ElementId,
    pub bounds: Bounds,
}

/// What produced a snap candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum SnapSource {
    /// An endpoint of `segment`; `vertex` is its host id when known
    Vertex {
        segment: SegmentId,
        vertex: Option<VertexId>,
    },
    Segment(SegmentId),
    SegmentPair(SegmentId, SegmentId),
    Object(ElementId),
    Grid,
}

/// A transient snap target computed for one pointer position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapCandidate {
    pub point: Point2D,
    pub snap_type: SnapType,
    pub source: SnapSource,
    pub priority: u8,
    /// Distance from the pointer
    pub distance: f64,
}

impl SnapCandidate {
    fn new(pointer: &Point2D, point: Point2D, snap_type: SnapType, source: SnapSource) -> Self {
        Self {
            point,
            snap_type,
            source,
            priority: snap_type.priority(),
            distance: pointer.distance_to(&point),
        }
    }

    /// Resolution order: priority descending, then distance ascending.
    pub fn rank(&self, other: &SnapCandidate) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.distance.total_cmp(&other.distance))
    }
}

/// Nearest point on a uniform grid
pub fn grid_point(pointer: &Point2D, grid_size: f64) -> Point2D {
    Point2D::new(
        (pointer.x / grid_size).round() * grid_size,
        (pointer.y / grid_size).round() * grid_size,
    )
}

/// Perpendicular snap onto one specific segment.
///
/// Zero-length segments yield `None`. No radius filtering is applied.
pub fn perpendicular_snap(pointer: &Point2D, line: &LineSegment) -> Option<SnapCandidate> {
    let foot = closest_point_on_segment(pointer, &line.start, &line.end)?;
    Some(SnapCandidate::new(
        pointer,
        foot,
        SnapType::Perpendicular,
        SnapSource::Segment(line.id),
    ))
}

/// Best snap target for `pointer`, or `None` when nothing enabled is within
/// the snap radius.
///
/// The default sweep covers vertices, intersections, midpoints, object
/// centers and the grid. Perpendicular snapping needs a reference segment,
/// see [`find_snap_point_with_reference`].
pub fn find_snap_point(
    pointer: &Point2D,
    lines: &[LineSegment],
    objects: &[SnapObject],
    config: &SnapConfig,
) -> Result<Option<SnapCandidate>> {
    resolve(pointer, lines, objects, config, None)
}

/// Like [`find_snap_point`], adding the perpendicular foot onto `reference`
/// (the wall being drawn from) when perpendicular snapping is enabled.
pub fn find_snap_point_with_reference(
    pointer: &Point2D,
    lines: &[LineSegment],
    objects: &[SnapObject],
    config: &SnapConfig,
    reference: &LineSegment,
) -> Result<Option<SnapCandidate>> {
    resolve(pointer, lines, objects, config, Some(reference))
}

/// Every in-radius candidate in resolution order, for hover hints.
///
/// Ties in priority and distance keep generation order.
pub fn snap_candidates(
    pointer: &Point2D,
    lines: &[LineSegment],
    objects: &[SnapObject],
    config: &SnapConfig,
    reference: Option<&LineSegment>,
) -> Result<Vec<SnapCandidate>> {
    config.validate()?;

    let mut candidates = Vec::new();
    visit_candidates(pointer, lines, objects, config, reference, |candidate| {
        if candidate.distance <= config.snap_radius {
            candidates.push(candidate);
        }
    });
    candidates.sort_by(|a, b| a.rank(b));
    Ok(candidates)
}

fn resolve(
    pointer: &Point2D,
    lines: &[LineSegment],
    objects: &[SnapObject],
    config: &SnapConfig,
    reference: Option<&LineSegment>,
) -> Result<Option<SnapCandidate>> {
    config.validate()?;

    let mut best: Option<SnapCandidate> = None;
    visit_candidates(pointer, lines, objects, config, reference, |candidate| {
        if candidate.distance > config.snap_radius {
            return;
        }
        // Strictly better only, so the first of equal candidates is kept
        let replace = match &best {
            Some(current) => candidate.rank(current) == Ordering::Less,
            None => true,
        };
        if replace {
            best = Some(candidate);
        }
    });

    tracing::trace!(
        x = pointer.x,
        y = pointer.y,
        snapped = ?best.as_ref().map(|c| c.snap_type),
        "Resolved snap"
    );
    Ok(best)
}

/// Generates candidates for every enabled type in a fixed order.
fn visit_candidates<F>(
    pointer: &Point2D,
    lines: &[LineSegment],
    objects: &[SnapObject],
    config: &SnapConfig,
    reference: Option<&LineSegment>,
    mut visit: F,
) where
    F: FnMut(SnapCandidate),
{
    let enabled = config.enabled;

    if enabled.is_enabled(SnapType::Vertex) {
        for line in lines {
            let endpoints = [
                (line.start, line.start_vertex()),
                (line.end, line.end_vertex()),
            ];
            for (point, vertex) in endpoints {
                let source = SnapSource::Vertex {
                    segment: line.id,
                    vertex,
                };
                visit(SnapCandidate::new(pointer, point, SnapType::Vertex, source));
            }
        }
    }

    if enabled.is_enabled(SnapType::Intersection) {
        for (i, a) in lines.iter().enumerate() {
            for b in &lines[i + 1..] {
                if let Some(hit) = segment_intersection(&a.start, &a.end, &b.start, &b.end) {
                    visit(SnapCandidate::new(
                        pointer,
                        hit,
                        SnapType::Intersection,
                        SnapSource::SegmentPair(a.id, b.id),
                    ));
                }
            }
        }
    }

    if enabled.is_enabled(SnapType::Midpoint) {
        for line in lines.iter().filter(|l| l.length() > 0.0) {
            visit(SnapCandidate::new(
                pointer,
                line.midpoint(),
                SnapType::Midpoint,
                SnapSource::Segment(line.id),
            ));
        }
    }

    if enabled.is_enabled(SnapType::Center) {
        for object in objects {
            visit(SnapCandidate::new(
                pointer,
                object.bounds.center(),
                SnapType::Center,
                SnapSource::Object(object.id),
            ));
        }
    }

    if enabled.is_enabled(SnapType::Perpendicular) {
        if let Some(candidate) = reference.and_then(|line| perpendicular_snap(pointer, line)) {
            visit(candidate);
        }
    }

    if enabled.is_enabled(SnapType::Grid) {
        visit(SnapCandidate::new(
            pointer,
            grid_point(pointer, config.grid_size),
            SnapType::Grid,
            SnapSource::Grid,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config(radius: f64, types: &[SnapType]) -> SnapConfig {
        SnapConfig {
            snap_radius: radius,
            grid_size: 10.0,
            enabled: SnapMask::from_types(types),
        }
    }

    fn wall(id: u64, x0: f64, y0: f64, x1: f64, y1: f64) -> LineSegment {
        LineSegment::new(id, Point2D::new(x0, y0), Point2D::new(x1, y1))
    }

    #[test]
    fn test_priority_table() {
        assert_eq!(SnapType::Vertex.priority(), 10);
        assert_eq!(SnapType::Intersection.priority(), 9);
        assert_eq!(SnapType::Midpoint.priority(), 8);
        assert_eq!(SnapType::Center.priority(), 7);
        assert_eq!(SnapType::Perpendicular.priority(), 6);
        assert_eq!(SnapType::Grid.priority(), 1);
    }

    #[test]
    fn test_snap_type_parsing() {
        assert_eq!("midpoint".parse::<SnapType>().unwrap(), SnapType::Midpoint);
        assert_eq!(
            "tangent".parse::<SnapType>(),
            Err(Error::UnknownSnapType("tangent".to_string()))
        );
    }

    #[test]
    fn test_mask_toggles() {
        let mask = SnapMask::NONE.with(SnapType::Grid).with(SnapType::Vertex);
        assert!(mask.is_enabled(SnapType::Grid));
        assert!(!mask.is_enabled(SnapType::Center));
        assert!(!mask.without(SnapType::Grid).is_enabled(SnapType::Grid));
        for t in SnapType::ALL {
            assert!(SnapMask::ALL.is_enabled(t));
        }
    }

    #[test]
    fn test_vertex_beats_closer_grid_point() {
        let lines = [wall(1, 0.0, 0.0, 100.0, 0.0)];
        let pointer = Point2D::new(4.0, 3.0);
        let snap = find_snap_point(&pointer, &lines, &[], &config(15.0, &SnapType::ALL))
            .unwrap()
            .unwrap();

        // Grid point (0, 0) coincides with the vertex; vertex wins on priority
        assert_eq!(snap.snap_type, SnapType::Vertex);
        assert_eq!(snap.point, Point2D::new(0.0, 0.0));
        assert_eq!(
            snap.source,
            SnapSource::Vertex {
                segment: SegmentId(1),
                vertex: None,
            }
        );
        assert_relative_eq!(snap.distance, 5.0);
    }

    #[test]
    fn test_grid_when_vertex_out_of_radius() {
        let lines = [wall(1, 0.0, 5.0, 0.0, 200.0)];
        // 20 units from the (0, 5) vertex, on the x = 20 grid line
        let pointer = Point2D::new(20.0, 5.0);
        let snap = find_snap_point(
            &pointer,
            &lines,
            &[],
            &config(15.0, &[SnapType::Vertex, SnapType::Grid]),
        )
        .unwrap()
        .unwrap();

        assert_eq!(snap.snap_type, SnapType::Grid);
        assert_eq!(snap.source, SnapSource::Grid);
        assert_relative_eq!(snap.point.x, 20.0);
    }

    #[test]
    fn test_nothing_in_radius() {
        let lines = [wall(1, 0.0, 0.0, 100.0, 0.0)];
        let pointer = Point2D::new(50.0, 40.0);
        let snap = find_snap_point(
            &pointer,
            &lines,
            &[],
            &config(15.0, &[SnapType::Vertex, SnapType::Midpoint]),
        )
        .unwrap();
        assert!(snap.is_none());
    }

    #[test]
    fn test_intersection_and_midpoint() {
        let lines = [wall(1, 0.0, 0.0, 100.0, 100.0), wall(2, 0.0, 100.0, 100.0, 0.0)];
        let pointer = Point2D::new(52.0, 49.0);

        let snap = find_snap_point(&pointer, &lines, &[], &config(10.0, &SnapType::ALL))
            .unwrap()
            .unwrap();
        assert_eq!(snap.snap_type, SnapType::Intersection);
        assert_eq!(snap.source, SnapSource::SegmentPair(SegmentId(1), SegmentId(2)));

        let snap = find_snap_point(
            &pointer,
            &lines,
            &[],
            &config(10.0, &[SnapType::Midpoint, SnapType::Grid]),
        )
        .unwrap()
        .unwrap();
        assert_eq!(snap.snap_type, SnapType::Midpoint);
        assert_eq!(snap.point, Point2D::new(50.0, 50.0));
        // Both midpoints coincide; the first generated wins
        assert_eq!(snap.source, SnapSource::Segment(SegmentId(1)));
    }

    #[test]
    fn test_object_center() {
        let objects = [SnapObject {
            id: ElementId(7),
            bounds: Bounds::new(10.0, 10.0, 30.0, 50.0),
        }];
        let snap = find_snap_point(
            &Point2D::new(22.0, 28.0),
            &[],
            &objects,
            &config(10.0, &[SnapType::Center]),
        )
        .unwrap()
        .unwrap();
        assert_eq!(snap.point, Point2D::new(20.0, 30.0));
        assert_eq!(snap.source, SnapSource::Object(ElementId(7)));
    }

    #[test]
    fn test_zero_length_segment_is_skipped_for_midpoint() {
        let lines = [wall(1, 10.0, 10.0, 10.0, 10.0)];
        let pointer = Point2D::new(10.0, 11.0);

        let snap =
            find_snap_point(&pointer, &lines, &[], &config(5.0, &[SnapType::Midpoint])).unwrap();
        assert!(snap.is_none());

        let perp = find_snap_point_with_reference(
            &pointer,
            &lines,
            &[],
            &config(5.0, &[SnapType::Perpendicular]),
            &lines[0],
        )
        .unwrap();
        assert!(perp.is_none());
    }

    #[test]
    fn test_perpendicular_is_opt_in() {
        let reference = wall(3, 0.0, 0.0, 100.0, 0.0);
        let pointer = Point2D::new(42.0, 6.0);
        let cfg = config(10.0, &[SnapType::Perpendicular]);

        assert!(find_snap_point(&pointer, &[], &[], &cfg).unwrap().is_none());

        let snap = find_snap_point_with_reference(&pointer, &[], &[], &cfg, &reference)
            .unwrap()
            .unwrap();
        assert_eq!(snap.snap_type, SnapType::Perpendicular);
        assert_eq!(snap.point, Point2D::new(42.0, 0.0));
        assert_relative_eq!(snap.distance, 6.0);
    }

    #[test]
    fn test_candidates_are_ranked() {
        let lines = [wall(1, 0.0, 0.0, 20.0, 0.0)];
        let pointer = Point2D::new(9.0, 2.0);
        let all =
            snap_candidates(&pointer, &lines, &[], &config(12.0, &SnapType::ALL), None).unwrap();

        let kinds: Vec<SnapType> = all.iter().map(|c| c.snap_type).collect();
        assert_eq!(
            kinds,
            vec![SnapType::Vertex, SnapType::Vertex, SnapType::Midpoint, SnapType::Grid]
        );
        assert_eq!(all[0].point, Point2D::new(0.0, 0.0));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let lines = [wall(1, 0.0, 0.0, 20.0, 0.0)];
        let pointer = Point2D::new(0.0, 0.0);

        let err =
            find_snap_point(&pointer, &lines, &[], &config(-1.0, &SnapType::ALL)).unwrap_err();
        assert_eq!(err, Error::InvalidSnapRadius(-1.0));

        let mut cfg = config(5.0, &SnapType::ALL);
        cfg.grid_size = 0.0;
        assert_eq!(
            find_snap_point(&pointer, &lines, &[], &cfg).unwrap_err(),
            Error::InvalidGridSize(0.0)
        );

        // Grid size does not matter when grid snapping is off
        cfg.enabled = cfg.enabled.without(SnapType::Grid);
        assert!(find_snap_point(&pointer, &lines, &[], &cfg).is_ok());
    }

    #[test]
    fn test_grid_point_rounding() {
        assert_eq!(grid_point(&Point2D::new(14.0, -6.0), 10.0), Point2D::new(10.0, -10.0));
        assert_eq!(grid_point(&Point2D::new(20.0, 5.0), 10.0), Point2D::new(20.0, 10.0));
    }
}

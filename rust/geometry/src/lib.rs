// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan-Lite Geometry
//!
//! Data model and stateless geometry for interactive floor plan drawing:
//! vertices and wall segments, axis-aligned bounds, the primitive
//! predicates (segment intersection, point-in-polygon, shoelace measures)
//! and the snap resolution engine that runs on every pointer move.
//!
//! # Usage
//!
//! ```rust
//! use plan_lite_geometry::{
//!     find_snap_point, resolve_segments, Point2D, Segment, SnapConfig, SnapType, Vertex,
//! };
//!
//! let vertices = vec![Vertex::new(1, 0.0, 0.0), Vertex::new(2, 100.0, 0.0)];
//! let segments = vec![Segment::new(1, 1, 2)];
//! let lines = resolve_segments(&vertices, &segments);
//!
//! let snap = find_snap_point(&Point2D::new(3.0, 4.0), &lines, &[], &SnapConfig::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(snap.snap_type, SnapType::Vertex);
//! ```

pub mod error;
pub mod primitives;
pub mod snap;
pub mod types;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};

pub use error::{Error, Result};
pub use primitives::{
    closest_point_on_segment, distance, point_in_polygon, point_segment_distance, polygon_area,
    polygon_centroid, polygon_perimeter, segment_intersection, INTERSECTION_EPSILON,
};
pub use snap::{
    find_snap_point, find_snap_point_with_reference, grid_point, perpendicular_snap,
    snap_candidates, SnapCandidate, SnapConfig, SnapMask, SnapObject, SnapSource, SnapType,
};
pub use types::{
    resolve_segments, Bounds, ElementId, LineSegment, Point2D, Segment, SegmentId, Vertex,
    VertexId, DEFAULT_WALL_THICKNESS,
};

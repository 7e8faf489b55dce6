// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan-Lite Topology
//!
//! Wall graph analysis for 2D floor plans.
//!
//! The host owns the drawing; every analysis here takes an immutable
//! snapshot of its vertices and segments, builds a private arena-based
//! [`WallGraph`] and returns derived data:
//!
//! - [`detect_rooms`]: unique closed wall cycles with area, perimeter,
//!   centroid and a coarse [`RoomType`]
//! - [`cleanup_walls`]: collinear segment merging plus T-junction and
//!   malformed-segment reports
//! - [`find_wall_gaps`] and [`auto_close_room`]: near-miss vertices and
//!   the segment that would close them
//! - [`analyze_walls`]: all of the above in one [`TopologyReport`]
//!
//! These run on explicit user action, not per frame.
//!
//! ```rust
//! use plan_lite_geometry::{Segment, Vertex};
//! use plan_lite_topology::{detect_rooms, RoomType};
//!
//! let vertices = vec![
//!     Vertex::new(1, 0.0, 0.0),
//!     Vertex::new(2, 100.0, 0.0),
//!     Vertex::new(3, 100.0, 80.0),
//!     Vertex::new(4, 0.0, 80.0),
//! ];
//! let segments = vec![
//!     Segment::new(1, 1, 2),
//!     Segment::new(2, 2, 3),
//!     Segment::new(3, 3, 4),
//!     Segment::new(4, 4, 1),
//! ];
//!
//! let rooms = detect_rooms(&vertices, &segments, 0.1).unwrap();
//! assert_eq!(rooms.len(), 1);
//! assert_eq!(rooms[0].room_type, RoomType::Bedroom);
//! ```

pub mod arena;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod gaps;
pub mod keys;
pub mod report;
pub mod rooms;
pub mod serialization;

pub use arena::{Incidence, SegmentData, SkipReason, SkippedSegment, VertexData, WallGraph};
pub use cleanup::{
    cleanup_walls, dangling_vertices, find_t_junctions, vertex_degrees, CleanupReport,
};
pub use config::TopologyConfig;
pub use error::{Error, Result};
pub use gaps::{auto_close_room, find_wall_gaps, next_segment_id, WallGap};
pub use keys::{SegmentKey, VertexKey};
pub use report::{analyze_walls, TopologyReport};
pub use rooms::{detect_rooms, detect_rooms_with, find_cycles, Room, RoomClassifier, RoomType};
pub use serialization::PlanSnapshot;

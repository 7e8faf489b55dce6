// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room detection as closed cycles in the wall graph.
//!
//! From every vertex a depth-first search walks simple paths and records a
//! cycle whenever it steps back onto the start vertex after at least three
//! edges. The same cycle is found from each of its vertices and in both
//! directions, so cycles are deduplicated by their vertex set before rooms
//! are emitted.
//!
//! The search enumerates simple paths and is exponential in graph
//! connectivity. Wall graphs have vertex degree ≤ 4 in practice, and this
//! runs on explicit user action, never per frame.

use plan_lite_geometry::{
    point_in_polygon, polygon_area, polygon_centroid, polygon_perimeter, Point2D, Segment, Vertex,
    VertexId,
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::arena::WallGraph;
use crate::error::{require_positive, Result};
use crate::keys::VertexKey;

/// Coarse room classification by area.
///
/// This is a presentation heuristic for labelling, not a physical property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomType {
    Bathroom,
    Bedroom,
    Living,
    Office,
    Storage,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Bathroom => "bathroom",
            RoomType::Bedroom => "bedroom",
            RoomType::Living => "living",
            RoomType::Office => "office",
            RoomType::Storage => "storage",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Area thresholds (in scaled square units) used to classify rooms.
///
/// A room is the first type whose upper bound its area is below; anything
/// at or above `office_below` is storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomClassifier {
    pub bathroom_below: f64,
    pub bedroom_below: f64,
    pub living_below: f64,
    pub office_below: f64,
}

impl Default for RoomClassifier {
    fn default() -> Self {
        Self {
            bathroom_below: 50.0,
            bedroom_below: 150.0,
            living_below: 250.0,
            office_below: 400.0,
        }
    }
}

impl RoomClassifier {
    pub fn classify(&self, area: f64) -> RoomType {
        if area < self.bathroom_below {
            RoomType::Bathroom
        } else if area < self.bedroom_below {
            RoomType::Bedroom
        } else if area < self.living_below {
            RoomType::Living
        } else if area < self.office_below {
            RoomType::Office
        } else {
            RoomType::Storage
        }
    }
}

/// A detected enclosed cycle of walls.
///
/// Rooms are derived data: recomputed on every detection call and never
/// stored by the kernel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Cycle vertices in traversal order (closing edge implied)
    pub vertex_ids: Vec<VertexId>,
    /// Vertex positions matching `vertex_ids`, in drawing units
    pub boundary: Vec<Point2D>,
    /// Area scaled by `unit_scale²`
    pub area: f64,
    /// Perimeter scaled by `unit_scale`
    pub perimeter: f64,
    /// Mean of the boundary vertices, in drawing units
    pub centroid: Point2D,
    pub room_type: RoomType,
}

impl Room {
    /// Whether a drawing-space point lies inside the room boundary.
    pub fn contains(&self, point: &Point2D) -> bool {
        point_in_polygon(point, &self.boundary)
    }
}

/// Detect rooms with the default [`RoomClassifier`].
pub fn detect_rooms(
    vertices: &[Vertex],
    segments: &[Segment],
    unit_scale: f64,
) -> Result<Vec<Room>> {
    detect_rooms_with(vertices, segments, unit_scale, &RoomClassifier::default())
}

/// Detect rooms as the unique closed cycles of the wall graph.
///
/// `unit_scale` converts drawing units to real units (e.g. 0.1 m per unit):
/// areas are multiplied by its square and perimeters by it. The centroid
/// is reported unscaled so it can be used to place labels in the drawing.
pub fn detect_rooms_with(
    vertices: &[Vertex],
    segments: &[Segment],
    unit_scale: f64,
    classifier: &RoomClassifier,
) -> Result<Vec<Room>> {
    require_positive("unit scale", unit_scale)?;

    let graph = WallGraph::build(vertices, segments);
    let cycles = find_cycles(&graph);

    let rooms: Vec<Room> = cycles
        .iter()
        .filter_map(|cycle| build_room(&graph, cycle, unit_scale, classifier))
        .collect();

    tracing::debug!(
        vertices = graph.vertex_count(),
        segments = graph.segment_count(),
        rooms = rooms.len(),
        "Detected rooms"
    );
    Ok(rooms)
}

/// Every unique simple cycle of at least three edges, in discovery order.
pub fn find_cycles(graph: &WallGraph) -> Vec<Vec<VertexKey>> {
    let mut search = CycleSearch {
        graph,
        limit: graph.vertex_count(),
        path: Vec::new(),
        on_path: FxHashSet::default(),
        signatures: FxHashSet::default(),
        cycles: Vec::new(),
    };

    for &start in graph.vertex_keys() {
        search.path.push(start);
        search.on_path.insert(start);
        search.extend(start);
        search.on_path.remove(&start);
        search.path.pop();
    }

    search.cycles
}

struct CycleSearch<'a> {
    graph: &'a WallGraph,
    /// The path can never hold more vertices than the graph has.
    limit: usize,
    path: Vec<VertexKey>,
    on_path: FxHashSet<VertexKey>,
    signatures: FxHashSet<Vec<VertexId>>,
    cycles: Vec<Vec<VertexKey>>,
}

impl CycleSearch<'_> {
    fn extend(&mut self, current: VertexKey) {
        let start = self.path[0];

        for next in self.graph.neighbors(current) {
            if next == start {
                // path.len() vertices plus the closing edge
                if self.path.len() >= 3 {
                    self.record();
                }
                continue;
            }
            if self.on_path.contains(&next) || self.path.len() >= self.limit {
                continue;
            }

            self.path.push(next);
            self.on_path.insert(next);
            self.extend(next);
            self.on_path.remove(&next);
            self.path.pop();
        }
    }

    fn record(&mut self) {
        let mut signature: Vec<VertexId> = self
            .path
            .iter()
            .filter_map(|&key| self.graph.vertex_id(key))
            .collect();
        signature.sort_unstable();

        if self.signatures.insert(signature) {
            self.cycles.push(self.path.clone());
        }
    }
}

fn build_room(
    graph: &WallGraph,
    cycle: &[VertexKey],
    unit_scale: f64,
    classifier: &RoomClassifier,
) -> Option<Room> {
    let mut vertex_ids = Vec::with_capacity(cycle.len());
    let mut boundary = Vec::with_capacity(cycle.len());
    for &key in cycle {
        let vertex = graph.vertex(key)?;
        vertex_ids.push(vertex.id);
        boundary.push(vertex.position);
    }

    let area = polygon_area(&boundary) * unit_scale * unit_scale;
    let perimeter = polygon_perimeter(&boundary) * unit_scale;
    let centroid = polygon_centroid(&boundary)?;

    Some(Room {
        vertex_ids,
        boundary,
        area,
        perimeter,
        centroid,
        room_type: classifier.classify(area),
    })
}

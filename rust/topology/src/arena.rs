// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based wall graph.
//!
//! The [`WallGraph`] is a private working copy of the host's vertex and
//! segment lists. Vertices and segments live in slot maps with generational
//! keys, a hash index maps host ids to keys, and every vertex keeps the
//! list of segments incident to it. Rooms are cycles in this graph, so the
//! structure is cyclic by nature; keeping it as flat maps plus an adjacency
//! index avoids reference cycles entirely.
//!
//! Segments that reference a missing vertex, and self-loops, are skipped
//! while building and reported through [`WallGraph::skipped_segments`].

use plan_lite_geometry::{Point2D, Segment, SegmentId, Vertex, VertexId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::keys::{SegmentKey, VertexKey};

/// Incident segments of one vertex. Wall vertices rarely exceed degree 4.
pub type Incidence = SmallVec<[SegmentKey; 4]>;

/// Data stored for a vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub id: VertexId,
    pub position: Point2D,
    pub(crate) segments: Incidence,
}

/// Data stored for a segment: the host segment plus its resolved endpoints.
#[derive(Debug, Clone)]
pub struct SegmentData {
    pub segment: Segment,
    pub start: VertexKey,
    pub end: VertexKey,
}

impl SegmentData {
    /// The endpoint opposite `vertex`, if `vertex` is one of the ends.
    pub fn other_end(&self, vertex: VertexKey) -> Option<VertexKey> {
        if self.start == vertex {
            Some(self.end)
        } else if self.end == vertex {
            Some(self.start)
        } else {
            None
        }
    }
}

/// Why a segment was left out of the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// One or both endpoint ids are not in the vertex list
    MissingVertex,
    /// Both ends reference the same vertex
    SelfLoop,
}

/// A segment that was skipped while building the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSegment {
    pub id: SegmentId,
    pub reason: SkipReason,
}

/// The wall graph: vertex and segment arenas with an id index and
/// per-vertex incidence lists.
///
/// # Example
///
/// ```
/// use plan_lite_geometry::{Segment, Vertex};
/// use plan_lite_topology::WallGraph;
///
/// let vertices = vec![Vertex::new(1, 0.0, 0.0), Vertex::new(2, 10.0, 0.0)];
/// let segments = vec![Segment::new(1, 1, 2), Segment::new(2, 1, 9)];
///
/// let graph = WallGraph::build(&vertices, &segments);
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.segment_count(), 1);
/// assert_eq!(graph.skipped_segments().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct WallGraph {
    vertices: SlotMap<VertexKey, VertexData>,
    segments: SlotMap<SegmentKey, SegmentData>,
    vertex_index: FxHashMap<VertexId, VertexKey>,
    // Insertion order; slot maps reuse freed slots, so iteration order alone
    // would change after a merge.
    vertex_order: Vec<VertexKey>,
    segment_order: Vec<SegmentKey>,
    skipped: Vec<SkippedSegment>,
    duplicate_vertices: Vec<VertexId>,
}

impl WallGraph {
    /// Creates a new, empty wall graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph from host data, skipping malformed segments.
    ///
    /// A repeated vertex id keeps its first occurrence; the others are
    /// listed by [`WallGraph::duplicate_vertices`].
    pub fn build(vertices: &[Vertex], segments: &[Segment]) -> Self {
        let mut graph = Self::new();

        for vertex in vertices {
            if graph.add_vertex(vertex.id, vertex.position()).is_none() {
                tracing::warn!(vertex = %vertex.id, "Ignoring duplicate vertex id");
                graph.duplicate_vertices.push(vertex.id);
            }
        }

        for segment in segments {
            if let Err(reason) = graph.add_segment(segment.clone()) {
                tracing::warn!(segment = %segment.id, ?reason, "Skipping malformed segment");
                graph.skipped.push(SkippedSegment {
                    id: segment.id,
                    reason,
                });
            }
        }

        tracing::debug!(
            vertices = graph.vertex_count(),
            segments = graph.segment_count(),
            skipped = graph.skipped.len(),
            duplicates = graph.duplicate_vertices.len(),
            "Built wall graph"
        );
        graph
    }

    // --- Vertex operations ---

    /// Adds a vertex. Returns `None` if the id is already present.
    pub fn add_vertex(&mut self, id: VertexId, position: Point2D) -> Option<VertexKey> {
        if self.vertex_index.contains_key(&id) {
            return None;
        }
        let key = self.vertices.insert(VertexData {
            id,
            position,
            segments: Incidence::new(),
        });
        self.vertex_index.insert(id, key);
        self.vertex_order.push(key);
        Some(key)
    }

    /// Removes a vertex together with every segment incident to it.
    pub fn remove_vertex(&mut self, key: VertexKey) -> Option<VertexData> {
        let incident: Incidence = self.vertices.get(key)?.segments.clone();
        for segment in incident {
            self.remove_segment(segment);
        }
        let data = self.vertices.remove(key)?;
        self.vertex_index.remove(&data.id);
        self.vertex_order.retain(|&k| k != key);
        Some(data)
    }

    /// Returns the vertex data for the given key, or `None` if not found.
    pub fn vertex(&self, key: VertexKey) -> Option<&VertexData> {
        self.vertices.get(key)
    }

    /// Looks up the key of a host vertex id.
    pub fn vertex_key(&self, id: VertexId) -> Option<VertexKey> {
        self.vertex_index.get(&id).copied()
    }

    pub fn vertex_id(&self, key: VertexKey) -> Option<VertexId> {
        self.vertices.get(key).map(|v| v.id)
    }

    pub fn position(&self, key: VertexKey) -> Option<Point2D> {
        self.vertices.get(key).map(|v| v.position)
    }

    /// Returns the number of vertices in the graph.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex keys in insertion order.
    pub fn vertex_keys(&self) -> &[VertexKey] {
        &self.vertex_order
    }

    /// Number of segments incident to a vertex (0 for unknown keys).
    pub fn degree(&self, key: VertexKey) -> usize {
        self.vertices.get(key).map_or(0, |v| v.segments.len())
    }

    /// Segments incident to a vertex.
    pub fn incident_segments(&self, key: VertexKey) -> &[SegmentKey] {
        self.vertices
            .get(key)
            .map_or(&[][..], |v| v.segments.as_slice())
    }

    /// Distinct neighbouring vertices, in incidence order.
    ///
    /// Parallel segments between the same pair contribute one neighbour.
    pub fn neighbors(&self, key: VertexKey) -> SmallVec<[VertexKey; 4]> {
        let mut out: SmallVec<[VertexKey; 4]> = SmallVec::new();
        for &segment in self.incident_segments(key) {
            if let Some(other) = self.segments.get(segment).and_then(|s| s.other_end(key)) {
                if !out.contains(&other) {
                    out.push(other);
                }
            }
        }
        out
    }

    /// Whether any segment joins `a` and `b`.
    pub fn connected(&self, a: VertexKey, b: VertexKey) -> bool {
        self.incident_segments(a).iter().any(|&segment| {
            self.segments
                .get(segment)
                .and_then(|s| s.other_end(a))
                == Some(b)
        })
    }

    // --- Segment operations ---

    /// Adds a segment, resolving its endpoint ids.
    ///
    /// The segment is appended to the scan order.
    pub fn add_segment(&mut self, segment: Segment) -> Result<SegmentKey, SkipReason> {
        if segment.is_self_loop() {
            return Err(SkipReason::SelfLoop);
        }
        let (start, end) = match (self.vertex_key(segment.start), self.vertex_key(segment.end)) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(SkipReason::MissingVertex),
        };

        let key = self.segments.insert(SegmentData {
            segment,
            start,
            end,
        });
        self.link(start, key);
        self.link(end, key);
        self.segment_order.push(key);
        Ok(key)
    }

    /// Removes a segment and unlinks it from both endpoints.
    pub fn remove_segment(&mut self, key: SegmentKey) -> Option<SegmentData> {
        let data = self.segments.remove(key)?;
        self.unlink(data.start, key);
        self.unlink(data.end, key);
        self.segment_order.retain(|&k| k != key);
        Some(data)
    }

    /// Returns the segment data for the given key, or `None` if not found.
    pub fn segment(&self, key: SegmentKey) -> Option<&SegmentData> {
        self.segments.get(key)
    }

    /// Returns the number of segments in the graph.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Segment keys in scan order.
    pub fn segment_keys(&self) -> &[SegmentKey] {
        &self.segment_order
    }

    /// The current segments, as host values, in scan order.
    pub fn to_segments(&self) -> Vec<Segment> {
        self.segment_order
            .iter()
            .filter_map(|&key| self.segments.get(key))
            .map(|data| data.segment.clone())
            .collect()
    }

    /// Segments skipped during [`WallGraph::build`].
    pub fn skipped_segments(&self) -> &[SkippedSegment] {
        &self.skipped
    }

    /// Repeated vertex ids dropped during [`WallGraph::build`], one entry
    /// per ignored occurrence.
    pub fn duplicate_vertices(&self) -> &[VertexId] {
        &self.duplicate_vertices
    }

    // --- Adjacency index helpers ---

    fn link(&mut self, vertex: VertexKey, segment: SegmentKey) {
        if let Some(v) = self.vertices.get_mut(vertex) {
            v.segments.push(segment);
        }
    }

    fn unlink(&mut self, vertex: VertexKey, segment: SegmentKey) {
        if let Some(v) = self.vertices.get_mut(vertex) {
            v.segments.retain(|s| *s != segment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> WallGraph {
        let vertices = vec![
            Vertex::new(1, 0.0, 0.0),
            Vertex::new(2, 10.0, 0.0),
            Vertex::new(3, 0.0, 10.0),
        ];
        let segments = vec![
            Segment::new(10, 1, 2),
            Segment::new(11, 2, 3),
            Segment::new(12, 3, 1),
        ];
        WallGraph::build(&vertices, &segments)
    }

    #[test]
    fn new_graph_is_empty() {
        let graph = WallGraph::new();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.segment_count(), 0);
        assert!(graph.skipped_segments().is_empty());
    }

    #[test]
    fn build_indexes_vertices_and_segments() {
        let graph = triangle();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.segment_count(), 3);

        let v1 = graph.vertex_key(VertexId(1)).unwrap();
        let v2 = graph.vertex_key(VertexId(2)).unwrap();
        assert_eq!(graph.degree(v1), 2);
        assert!(graph.connected(v1, v2));
        assert_eq!(graph.position(v2), Some(Point2D::new(10.0, 0.0)));
    }

    #[test]
    fn build_skips_malformed_segments() {
        let vertices = vec![Vertex::new(1, 0.0, 0.0), Vertex::new(2, 1.0, 0.0)];
        let segments = vec![
            Segment::new(1, 1, 2),
            Segment::new(2, 2, 2),
            Segment::new(3, 2, 77),
        ];
        let graph = WallGraph::build(&vertices, &segments);

        assert_eq!(graph.segment_count(), 1);
        assert_eq!(
            graph.skipped_segments(),
            &[
                SkippedSegment {
                    id: SegmentId(2),
                    reason: SkipReason::SelfLoop
                },
                SkippedSegment {
                    id: SegmentId(3),
                    reason: SkipReason::MissingVertex
                },
            ]
        );
    }

    #[test]
    fn duplicate_vertex_id_keeps_first() {
        let vertices = vec![Vertex::new(1, 0.0, 0.0), Vertex::new(1, 5.0, 5.0)];
        let graph = WallGraph::build(&vertices, &[]);
        assert_eq!(graph.vertex_count(), 1);
        let key = graph.vertex_key(VertexId(1)).unwrap();
        assert_eq!(graph.position(key), Some(Point2D::new(0.0, 0.0)));
        assert_eq!(graph.duplicate_vertices(), &[VertexId(1)]);
    }

    #[test]
    fn neighbors_collapse_parallel_segments() {
        let vertices = vec![Vertex::new(1, 0.0, 0.0), Vertex::new(2, 1.0, 0.0)];
        let segments = vec![Segment::new(1, 1, 2), Segment::new(2, 2, 1)];
        let graph = WallGraph::build(&vertices, &segments);

        let v1 = graph.vertex_key(VertexId(1)).unwrap();
        assert_eq!(graph.degree(v1), 2);
        assert_eq!(graph.neighbors(v1).len(), 1);
    }

    #[test]
    fn remove_segment_unlinks_endpoints() {
        let mut graph = triangle();
        let first = graph.segment_keys()[0];
        let removed = graph.remove_segment(first).unwrap();
        assert_eq!(removed.segment.id, SegmentId(10));

        let v1 = graph.vertex_key(VertexId(1)).unwrap();
        let v2 = graph.vertex_key(VertexId(2)).unwrap();
        assert!(!graph.connected(v1, v2));
        assert_eq!(graph.degree(v1), 1);
        assert_eq!(graph.segment_keys().len(), 2);
    }

    #[test]
    fn remove_vertex_drops_incident_segments() {
        let mut graph = triangle();
        let v3 = graph.vertex_key(VertexId(3)).unwrap();
        graph.remove_vertex(v3).unwrap();

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.segment_count(), 1);
        assert!(graph.vertex_key(VertexId(3)).is_none());
        assert_eq!(graph.to_segments()[0].id, SegmentId(10));
    }

    #[test]
    fn added_segment_goes_to_end_of_scan_order() {
        let mut graph = triangle();
        let first = graph.segment_keys()[0];
        graph.remove_segment(first);
        let key = graph.add_segment(Segment::new(20, 1, 2)).unwrap();

        assert_eq!(graph.segment_keys().last(), Some(&key));
        let ids: Vec<u64> = graph.to_segments().iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![11, 12, 20]);
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collinear wall merging and degree diagnostics.
//!
//! Drawing a long wall in several clicks leaves intermediate vertices that
//! carry no information. [`cleanup_walls`] merges each pair of segments
//! that meet at such a vertex and point in the same or opposite direction,
//! repeating until no pair qualifies. T-junctions are reported separately
//! and never resolved automatically.

use std::f64::consts::PI;

use plan_lite_geometry::{Segment, SegmentId, Vertex, VertexId};
use serde::{Deserialize, Serialize};

use crate::arena::{SkippedSegment, WallGraph};
use crate::error::{require_non_negative, Result};
use crate::keys::{SegmentKey, VertexKey};

/// Outcome of [`cleanup_walls`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupReport {
    /// The full wall list after merging, in scan order
    pub merged_segments: Vec<Segment>,
    /// Vertices that were merged away (shared vertex of each merged pair)
    pub removed_vertices: Vec<VertexId>,
    /// Segments absorbed into a neighbour
    pub removed_segments: Vec<SegmentId>,
    /// Vertices with exactly three incident segments
    pub t_junctions: Vec<VertexId>,
    /// Input segments left out as malformed
    pub skipped_segments: Vec<SkippedSegment>,
    /// Repeated vertex ids whose later occurrences were ignored
    #[serde(default)]
    pub duplicate_vertices: Vec<VertexId>,
}

impl CleanupReport {
    pub fn merge_count(&self) -> usize {
        self.removed_vertices.len()
    }
}

/// A mergeable pair found by the scan.
struct Merge {
    keep: SegmentKey,
    absorb: SegmentKey,
    shared: VertexKey,
    outer_keep: VertexKey,
    outer_absorb: VertexKey,
}

/// Merge collinear wall segments to a fixed point and flag T-junctions.
///
/// Two segments qualify when they share exactly one vertex, that vertex has
/// no other segments, and their directions away from it differ by at most
/// `angle_tolerance` (radians) from 0 or π. The pair is replaced by one
/// segment between the two outer vertices that keeps the first segment's
/// id, thickness and material; the shared vertex is reported as removed.
/// A pair is left alone when its outer vertices are already joined.
///
/// After every merge the full pairwise scan restarts, so the cost is
/// quadratic per merge.
pub fn cleanup_walls(
    vertices: &[Vertex],
    segments: &[Segment],
    angle_tolerance: f64,
) -> Result<CleanupReport> {
    require_non_negative("angle tolerance", angle_tolerance)?;

    let mut graph = WallGraph::build(vertices, segments);
    let t_junctions = vertices_with_degree(&graph, 3);

    let mut removed_vertices = Vec::new();
    let mut removed_segments = Vec::new();

    while let Some(merge) = find_mergeable_pair(&graph, angle_tolerance) {
        if let Some((vertex, segment)) = apply_merge(&mut graph, merge) {
            removed_vertices.push(vertex);
            removed_segments.push(segment);
        } else {
            break;
        }
    }

    tracing::debug!(
        merges = removed_vertices.len(),
        t_junctions = t_junctions.len(),
        remaining = graph.segment_count(),
        "Cleaned up walls"
    );

    Ok(CleanupReport {
        merged_segments: graph.to_segments(),
        removed_vertices,
        removed_segments,
        t_junctions,
        skipped_segments: graph.skipped_segments().to_vec(),
        duplicate_vertices: graph.duplicate_vertices().to_vec(),
    })
}

/// Vertices with exactly three incident segments, in vertex order.
pub fn find_t_junctions(vertices: &[Vertex], segments: &[Segment]) -> Vec<VertexId> {
    vertices_with_degree(&WallGraph::build(vertices, segments), 3)
}

/// Vertices with a single incident segment (open wall ends).
pub fn dangling_vertices(vertices: &[Vertex], segments: &[Segment]) -> Vec<VertexId> {
    vertices_with_degree(&WallGraph::build(vertices, segments), 1)
}

/// Incident segment count per vertex, in vertex order.
pub fn vertex_degrees(vertices: &[Vertex], segments: &[Segment]) -> Vec<(VertexId, usize)> {
    let graph = WallGraph::build(vertices, segments);
    graph
        .vertex_keys()
        .iter()
        .filter_map(|&key| Some((graph.vertex_id(key)?, graph.degree(key))))
        .collect()
}

fn vertices_with_degree(graph: &WallGraph, degree: usize) -> Vec<VertexId> {
    graph
        .vertex_keys()
        .iter()
        .filter(|&&key| graph.degree(key) == degree)
        .filter_map(|&key| graph.vertex_id(key))
        .collect()
}

fn find_mergeable_pair(graph: &WallGraph, tolerance: f64) -> Option<Merge> {
    let order = graph.segment_keys();

    for (i, &first) in order.iter().enumerate() {
        let a = graph.segment(first)?;
        for &second in &order[i + 1..] {
            let b = graph.segment(second)?;

            let Some(shared) = shared_vertex(a.start, a.end, b.start, b.end) else {
                continue;
            };
            if graph.degree(shared) != 2 {
                continue;
            }
            let (Some(outer_keep), Some(outer_absorb)) = (a.other_end(shared), b.other_end(shared))
            else {
                continue;
            };
            if graph.connected(outer_keep, outer_absorb) {
                continue;
            }

            if directions_aligned(graph, shared, outer_keep, outer_absorb, tolerance) {
                return Some(Merge {
                    keep: first,
                    absorb: second,
                    shared,
                    outer_keep,
                    outer_absorb,
                });
            }
        }
    }
    None
}

/// The single vertex two segments have in common, if exactly one.
fn shared_vertex(a0: VertexKey, a1: VertexKey, b0: VertexKey, b1: VertexKey) -> Option<VertexKey> {
    let a0_shared = a0 == b0 || a0 == b1;
    let a1_shared = a1 == b0 || a1 == b1;
    match (a0_shared, a1_shared) {
        (true, false) => Some(a0),
        (false, true) => Some(a1),
        _ => None,
    }
}

fn directions_aligned(
    graph: &WallGraph,
    shared: VertexKey,
    outer_a: VertexKey,
    outer_b: VertexKey,
    tolerance: f64,
) -> bool {
    let (Some(pivot), Some(pa), Some(pb)) = (
        graph.position(shared),
        graph.position(outer_a),
        graph.position(outer_b),
    ) else {
        return false;
    };

    // Zero-length walls have no direction
    if pivot.distance_to(&pa) == 0.0 || pivot.distance_to(&pb) == 0.0 {
        return false;
    }

    let angle_a = (pa.y - pivot.y).atan2(pa.x - pivot.x);
    let angle_b = (pb.y - pivot.y).atan2(pb.x - pivot.x);

    // Fold into [0, π]
    let mut diff = (angle_a - angle_b).abs() % (2.0 * PI);
    if diff > PI {
        diff = 2.0 * PI - diff;
    }

    diff <= tolerance || (PI - diff) <= tolerance
}

/// Replaces the pair with one segment and drops the shared vertex.
///
/// Returns the removed vertex id and the absorbed segment id.
fn apply_merge(graph: &mut WallGraph, merge: Merge) -> Option<(VertexId, SegmentId)> {
    let start = graph.vertex_id(merge.outer_keep)?;
    let end = graph.vertex_id(merge.outer_absorb)?;

    let kept = graph.remove_segment(merge.keep)?;
    let absorbed = graph.remove_segment(merge.absorb)?;
    let removed = graph.remove_vertex(merge.shared)?;

    let mut segment = kept.segment;
    segment.start = start;
    segment.end = end;
    if graph.add_segment(segment).is_err() {
        tracing::warn!(vertex = %removed.id, "Merged segment rejected");
        return None;
    }

    Some((removed.id, absorbed.segment.id))
}

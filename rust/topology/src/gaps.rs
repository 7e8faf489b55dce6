// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Near-miss gaps between wall vertices, and closing them.

use plan_lite_geometry::{Segment, SegmentId, Vertex, VertexId, DEFAULT_WALL_THICKNESS};
use serde::{Deserialize, Serialize};

use crate::arena::WallGraph;
use crate::error::{require_non_negative, Result};

/// Two vertices that are close together but not joined by a wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallGap {
    pub v1: VertexId,
    pub v2: VertexId,
    pub distance: f64,
}

/// Find vertex pairs within `max_gap_distance` that no segment joins.
///
/// O(n²) over vertices. Results are sorted by ascending distance; equal
/// distances keep vertex order.
pub fn find_wall_gaps(
    vertices: &[Vertex],
    segments: &[Segment],
    max_gap_distance: f64,
) -> Result<Vec<WallGap>> {
    require_non_negative("max gap distance", max_gap_distance)?;

    let graph = WallGraph::build(vertices, segments);
    let keys = graph.vertex_keys();

    let mut gaps = Vec::new();
    for (i, &a) in keys.iter().enumerate() {
        for &b in &keys[i + 1..] {
            if graph.connected(a, b) {
                continue;
            }
            let (Some(va), Some(vb)) = (graph.vertex(a), graph.vertex(b)) else {
                continue;
            };
            let distance = va.position.distance_to(&vb.position);
            if distance <= max_gap_distance {
                gaps.push(WallGap {
                    v1: va.id,
                    v2: vb.id,
                    distance,
                });
            }
        }
    }

    gaps.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    tracing::debug!(gaps = gaps.len(), max_gap_distance, "Found wall gaps");
    Ok(gaps)
}

/// A new segment joining `start` and `end`.
///
/// Returns `None` if either vertex is missing, they are the same vertex,
/// a segment between them already exists, or no segment id is left. The
/// new id is one past the largest existing segment id. Thickness and material are copied from a
/// wall already attached to `start`, if any.
pub fn auto_close_room(
    start: VertexId,
    end: VertexId,
    vertices: &[Vertex],
    segments: &[Segment],
) -> Option<Segment> {
    if start == end {
        return None;
    }
    let has_vertex = |id: VertexId| vertices.iter().any(|v| v.id == id);
    if !has_vertex(start) || !has_vertex(end) {
        return None;
    }
    if segments.iter().any(|s| s.joins(start, end)) {
        return None;
    }

    let Some(id) = next_segment_id(segments) else {
        tracing::warn!(%start, %end, "No free segment id to close the room");
        return None;
    };
    let template = segments.iter().find(|s| s.start == start || s.end == start);
    Some(Segment {
        id,
        start,
        end,
        thickness: template.map_or(DEFAULT_WALL_THICKNESS, |s| s.thickness),
        material: template.and_then(|s| s.material.clone()),
    })
}

/// One past the largest segment id in use, or `None` once `u64::MAX` is
/// taken.
pub fn next_segment_id(segments: &[Segment]) -> Option<SegmentId> {
    match segments.iter().map(|s| s.id.0).max() {
        Some(max) => max.checked_add(1).map(SegmentId),
        None => Some(SegmentId(1)),
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end analysis of small floor plans.

use approx::assert_relative_eq;
use plan_lite_geometry::{Point2D, Segment, SegmentId, Vertex, VertexId};
use plan_lite_topology::{
    analyze_walls, auto_close_room, cleanup_walls, detect_rooms, find_t_junctions,
    find_wall_gaps, PlanSnapshot, RoomType, TopologyConfig, TopologyReport,
};
use rustc_hash::FxHashSet;

/// 100 x 80 rectangle split by an interior wall at x = 60.
///
/// ```text
/// 1 ---- 5 ---- 2
/// |      |      |
/// 4 ---- 6 ---- 3
/// ```
fn two_rooms() -> (Vec<Vertex>, Vec<Segment>) {
    let vertices = vec![
        Vertex::new(1, 0.0, 0.0),
        Vertex::new(2, 100.0, 0.0),
        Vertex::new(3, 100.0, 80.0),
        Vertex::new(4, 0.0, 80.0),
        Vertex::new(5, 60.0, 0.0),
        Vertex::new(6, 60.0, 80.0),
    ];
    let segments = vec![
        Segment::new(1, 1, 5),
        Segment::new(2, 5, 2),
        Segment::new(3, 2, 3),
        Segment::new(4, 3, 6),
        Segment::new(5, 6, 4),
        Segment::new(6, 4, 1),
        Segment::new(7, 5, 6),
    ];
    (vertices, segments)
}

fn vertex_set(ids: &[VertexId]) -> Vec<u64> {
    let mut set: Vec<u64> = ids.iter().map(|id| id.0).collect();
    set.sort_unstable();
    set
}

#[test]
fn rectangle_scaled_to_meters() {
    let vertices = vec![
        Vertex::new(1, 0.0, 0.0),
        Vertex::new(2, 100.0, 0.0),
        Vertex::new(3, 100.0, 80.0),
        Vertex::new(4, 0.0, 80.0),
    ];
    let segments = vec![
        Segment::new(1, 1, 2),
        Segment::new(2, 2, 3),
        Segment::new(3, 3, 4),
        Segment::new(4, 4, 1),
    ];

    let rooms = detect_rooms(&vertices, &segments, 0.1).unwrap();
    assert_eq!(rooms.len(), 1);
    assert_relative_eq!(rooms[0].area, 80.0, epsilon = 1e-9);
    assert_relative_eq!(rooms[0].perimeter, 36.0, epsilon = 1e-9);
    assert_eq!(rooms[0].centroid, Point2D::new(50.0, 40.0));
}

#[test]
fn split_rectangle_has_unique_cycles() {
    let (vertices, segments) = two_rooms();
    let rooms = detect_rooms(&vertices, &segments, 0.1).unwrap();

    // Left room, right room and the outer boundary
    assert_eq!(rooms.len(), 3);

    let sets: FxHashSet<Vec<u64>> = rooms.iter().map(|r| vertex_set(&r.vertex_ids)).collect();
    assert_eq!(sets.len(), rooms.len());
    assert!(sets.contains(&vec![1, 4, 5, 6]));
    assert!(sets.contains(&vec![2, 3, 5, 6]));
    assert!(sets.contains(&vec![1, 2, 3, 4, 5, 6]));

    let mut areas: Vec<f64> = rooms.iter().map(|r| r.area).collect();
    areas.sort_by(f64::total_cmp);
    assert_relative_eq!(areas[0], 32.0, epsilon = 1e-9);
    assert_relative_eq!(areas[1], 48.0, epsilon = 1e-9);
    assert_relative_eq!(areas[2], 80.0, epsilon = 1e-9);
    assert!(rooms.iter().all(|r| r.room_type == RoomType::Bathroom
        || r.room_type == RoomType::Bedroom));
}

#[test]
fn interior_wall_ends_are_t_junctions() {
    let (vertices, segments) = two_rooms();
    let mut junctions = find_t_junctions(&vertices, &segments);
    junctions.sort();
    assert_eq!(junctions, vec![VertexId(5), VertexId(6)]);
}

#[test]
fn cleanup_merges_straight_runs_but_not_t_junctions() {
    let (vertices, segments) = two_rooms();
    let report = cleanup_walls(&vertices, &segments, 0.01).unwrap();

    // Both top and bottom runs pass through a T-junction, so nothing merges
    assert_eq!(report.merge_count(), 0);
    assert_eq!(report.merged_segments.len(), segments.len());
    assert_eq!(report.t_junctions.len(), 2);
}

#[test]
fn cleanup_merges_split_wall() {
    let vertices = vec![
        Vertex::new(1, 0.0, 0.0),
        Vertex::new(2, 50.0, 0.0),
        Vertex::new(3, 100.0, 0.0),
        Vertex::new(4, 100.0, 80.0),
        Vertex::new(5, 0.0, 80.0),
    ];
    let segments = vec![
        Segment::new(1, 1, 2),
        Segment::new(2, 2, 3),
        Segment::new(3, 3, 4),
        Segment::new(4, 4, 5),
        Segment::new(5, 5, 1),
    ];

    let report = cleanup_walls(&vertices, &segments, 0.01).unwrap();
    assert_eq!(report.merge_count(), 1);
    assert_eq!(report.removed_vertices, vec![VertexId(2)]);
    assert_eq!(report.merged_segments.len(), 4);

    let merged = report
        .merged_segments
        .iter()
        .find(|s| s.id == SegmentId(1))
        .unwrap();
    assert!(merged.joins(VertexId(1), VertexId(3)));

    // The merged walls describe the same room
    let before = detect_rooms(&vertices, &segments, 0.1).unwrap();
    let after = detect_rooms(&vertices, &report.merged_segments, 0.1).unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(after.len(), 1);
    assert_relative_eq!(before[0].area, after[0].area, epsilon = 1e-9);
}

#[test]
fn closing_a_gap_creates_a_room() {
    let vertices = vec![
        Vertex::new(1, 0.0, 0.0),
        Vertex::new(2, 100.0, 0.0),
        Vertex::new(3, 100.0, 80.0),
        Vertex::new(4, 0.0, 80.0),
    ];
    let mut segments = vec![
        Segment::new(1, 1, 2),
        Segment::new(2, 2, 3),
        Segment::new(3, 3, 4),
    ];
    assert!(detect_rooms(&vertices, &segments, 0.1).unwrap().is_empty());

    let gaps = find_wall_gaps(&vertices, &segments, 80.0).unwrap();
    assert_eq!(gaps.len(), 1);
    assert_eq!((gaps[0].v1, gaps[0].v2), (VertexId(1), VertexId(4)));

    let closing = auto_close_room(gaps[0].v1, gaps[0].v2, &vertices, &segments).unwrap();
    assert_eq!(closing.id, SegmentId(4));
    segments.push(closing);

    assert_eq!(detect_rooms(&vertices, &segments, 0.1).unwrap().len(), 1);
}

#[test]
fn analyze_snapshot_round_trip() {
    let (vertices, segments) = two_rooms();
    let snapshot = PlanSnapshot::new(vertices, segments);
    let json = snapshot.to_json().unwrap();

    let restored = PlanSnapshot::from_json(&json).unwrap();
    let report = analyze_walls(
        &restored.vertices,
        &restored.segments,
        &TopologyConfig::default(),
    )
    .unwrap();
    assert_eq!(report.rooms.len(), 3);

    let parsed = TopologyReport::from_json(&report.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed.rooms.len(), 3);
    assert_eq!(parsed.cleanup.t_junctions.len(), 2);
}

#[test]
fn invalid_config_is_rejected() {
    let (vertices, segments) = two_rooms();
    let config = TopologyConfig {
        angle_tolerance: f64::NAN,
        ..Default::default()
    };
    assert!(analyze_walls(&vertices, &segments, &config).is_err());
}

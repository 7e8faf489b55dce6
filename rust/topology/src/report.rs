// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Combined wall analysis for a single "analyze" action in the host.

use plan_lite_geometry::{Segment, Vertex};
use serde::{Deserialize, Serialize};

use crate::cleanup::{cleanup_walls, CleanupReport};
use crate::config::TopologyConfig;
use crate::error::Result;
use crate::gaps::{find_wall_gaps, WallGap};
use crate::rooms::{detect_rooms_with, Room};

/// Rooms, cleanup suggestions and gaps for one drawing snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyReport {
    pub rooms: Vec<Room>,
    pub cleanup: CleanupReport,
    pub gaps: Vec<WallGap>,
}

/// Run room detection, wall cleanup and gap search on the same input.
///
/// Each analysis reads the original drawing; rooms are detected on the
/// walls as drawn, not on the cleaned-up result.
pub fn analyze_walls(
    vertices: &[Vertex],
    segments: &[Segment],
    config: &TopologyConfig,
) -> Result<TopologyReport> {
    config.validate()?;

    let rooms = detect_rooms_with(vertices, segments, config.unit_scale, &config.room_classifier)?;
    let cleanup = cleanup_walls(vertices, segments, config.angle_tolerance)?;
    let gaps = find_wall_gaps(vertices, segments, config.max_gap_distance)?;

    tracing::info!(
        rooms = rooms.len(),
        merges = cleanup.merge_count(),
        t_junctions = cleanup.t_junctions.len(),
        gaps = gaps.len(),
        "Wall analysis complete"
    );

    Ok(TopologyReport {
        rooms,
        cleanup,
        gaps,
    })
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON interchange with the host.
//!
//! The host hands over a [`PlanSnapshot`] of its vertex and segment lists
//! and receives a [`TopologyReport`] back. Field names are camelCase so the
//! same shapes can be consumed from TypeScript.

use plan_lite_geometry::{Segment, Vertex};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::report::TopologyReport;

/// Immutable copy of the host's drawing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub vertices: Vec<Vertex>,
    pub segments: Vec<Segment>,
}

impl PlanSnapshot {
    pub fn new(vertices: Vec<Vertex>, segments: Vec<Segment>) -> Self {
        Self { vertices, segments }
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the snapshot to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl TopologyReport {
    /// Serializes the report to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the report to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a report from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::{analyze_walls, TopologyConfig};

    const SNAPSHOT: &str = r#"{
        "vertices": [
            {"id": 1, "x": 0.0, "y": 0.0},
            {"id": 2, "x": 100.0, "y": 0.0},
            {"id": 3, "x": 100.0, "y": 80.0},
            {"id": 4, "x": 0.0, "y": 80.0}
        ],
        "segments": [
            {"id": 1, "start": 1, "end": 2, "thickness": 2.0},
            {"id": 2, "start": 2, "end": 3, "thickness": 2.0, "material": "brick"},
            {"id": 3, "start": 3, "end": 4, "thickness": 2.0},
            {"id": 4, "start": 4, "end": 1, "thickness": 2.0}
        ]
    }"#;

    #[test]
    fn snapshot_from_json() {
        let snapshot = PlanSnapshot::from_json(SNAPSHOT).unwrap();
        assert_eq!(snapshot.vertices.len(), 4);
        assert_eq!(snapshot.segments[1].material.as_deref(), Some("brick"));
        assert_eq!(snapshot.segments[0].material, None);
    }

    #[test]
    fn report_uses_camel_case() {
        let snapshot = PlanSnapshot::from_json(SNAPSHOT).unwrap();
        let report = analyze_walls(
            &snapshot.vertices,
            &snapshot.segments,
            &TopologyConfig::default(),
        )
        .unwrap();

        let json = report.to_json().unwrap();
        assert!(json.contains("\"vertexIds\""));
        assert!(json.contains("\"roomType\":\"bedroom\""));
        assert!(json.contains("\"mergedSegments\""));

        let parsed = TopologyReport::from_json(&json).unwrap();
        assert_eq!(parsed.rooms.len(), 1);
        assert_eq!(parsed.rooms[0].vertex_ids, report.rooms[0].vertex_ids);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = PlanSnapshot::from_json("{\"vertices\": [").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}

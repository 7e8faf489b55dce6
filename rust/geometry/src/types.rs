// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for the floor plan drawing: points, vertices, wall segments
//! and axis-aligned bounds.
//!
//! The host application owns the vertex and segment lists. Everything in
//! the kernel reads them by shared reference and hands back new values.

use std::fmt;

use nalgebra::Point2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A 2D point in world units (simplified for serialization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: &Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

id_type!(
    /// Host-assigned identifier of a drawing vertex.
    VertexId
);
id_type!(
    /// Host-assigned identifier of a wall segment.
    SegmentId
);
id_type!(
    /// Host-assigned identifier of any selectable or snappable element.
    ElementId
);

/// A corner of the drawing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id: VertexId(id),
            x,
            y,
        }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Default wall thickness in world units when none is known
pub const DEFAULT_WALL_THICKNESS: f64 = 1.0;

/// An undirected wall edge between two vertices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: SegmentId,
    pub start: VertexId,
    pub end: VertexId,
    /// Wall thickness in world units
    pub thickness: f64,
    /// Optional material tag (e.g. "concrete", "drywall")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

impl Segment {
    pub fn new(id: u64, start: u64, end: u64) -> Self {
        Self {
            id: SegmentId(id),
            start: VertexId(start),
            end: VertexId(end),
            thickness: DEFAULT_WALL_THICKNESS,
            material: None,
        }
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// A segment whose two ends are the same vertex.
    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }

    /// Whether this segment joins `a` and `b`, in either direction.
    pub fn joins(&self, a: VertexId, b: VertexId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    /// The endpoint opposite `vertex`, if `vertex` is one of the ends.
    pub fn other_end(&self, vertex: VertexId) -> Option<VertexId> {
        if self.start == vertex {
            Some(self.end)
        } else if self.end == vertex {
            Some(self.start)
        } else {
            None
        }
    }
}

/// A wall segment with both endpoints resolved to coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LineSegment {
    pub id: SegmentId,
    pub start: Point2D,
    pub end: Point2D,
    /// Host vertex ids of `start` and `end`, when resolved from vertices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<(VertexId, VertexId)>,
}

impl LineSegment {
    pub fn new(id: u64, start: Point2D, end: Point2D) -> Self {
        Self {
            id: SegmentId(id),
            start,
            end,
            vertices: None,
        }
    }

    pub fn with_vertices(mut self, start: u64, end: u64) -> Self {
        self.vertices = Some((VertexId(start), VertexId(end)));
        self
    }

    pub fn start_vertex(&self) -> Option<VertexId> {
        self.vertices.map(|(start, _)| start)
    }

    pub fn end_vertex(&self) -> Option<VertexId> {
        self.vertices.map(|(_, end)| end)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn midpoint(&self) -> Point2D {
        self.start.midpoint(&self.end)
    }
}

/// Resolve segments against their vertices.
///
/// Segments that reference a missing vertex, and self-loops, are skipped.
/// The host can cache the result between pointer moves while the drawing
/// is unchanged.
pub fn resolve_segments(vertices: &[Vertex], segments: &[Segment]) -> Vec<LineSegment> {
    let positions: FxHashMap<VertexId, Point2D> =
        vertices.iter().map(|v| (v.id, v.position())).collect();

    let mut lines = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.is_self_loop() {
            tracing::warn!(segment = %segment.id, "Skipping self-loop segment");
            continue;
        }
        match (positions.get(&segment.start), positions.get(&segment.end)) {
            (Some(&start), Some(&end)) => lines.push(LineSegment {
                id: segment.id,
                start,
                end,
                vertices: Some((segment.start, segment.end)),
            }),
            _ => {
                tracing::warn!(
                    segment = %segment.id,
                    start = %segment.start,
                    end = %segment.end,
                    "Skipping segment with missing vertex"
                );
            }
        }
    }
    lines
}

/// Axis-aligned bounding box.
///
/// Y grows downward, so `min_y` is the top edge and `max_y` the bottom.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box from a top-left corner and a size.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Box spanned by two arbitrary corners (e.g. a drag start and end).
    pub fn from_corners(a: Point2D, b: Point2D) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points(points: &[Point2D]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn top_left(&self) -> Point2D {
        Point2D::new(self.min_x, self.min_y)
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Standard AABB overlap test. Touching edges count as overlapping.
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(self.max_x < other.min_x
            || other.max_x < self.min_x
            || self.max_y < other.min_y
            || other.max_y < self.min_y)
    }

    /// Whether `other` lies entirely inside this box (edges inclusive).
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    pub fn contains_point(&self, point: &Point2D) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Same size, moved so its top-left corner sits at `top_left`.
    pub fn moved_to(&self, top_left: Point2D) -> Bounds {
        Bounds::from_rect(top_left.x, top_left.y, self.width(), self.height())
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Bounds {
        Bounds::new(self.min_x + dx, self.min_y + dy, self.max_x + dx, self.max_y + dy)
    }
}

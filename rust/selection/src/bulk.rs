// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bulk geometric edits on selected element boxes.
//!
//! Every function here is pure: it reads the element boxes and returns the
//! new top-left corner for each element it would move. Applying the map
//! (and resizing nothing) is up to the host.

use std::fmt;
use std::str::FromStr;

use plan_lite_geometry::{Bounds, ElementId, Point2D};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::SelectableElement;

/// New top-left corner per element id
pub type PositionMap = FxHashMap<ElementId, Point2D>;

/// Box edge or centerline to line up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignEdge {
    Left,
    /// Vertical centerline
    Center,
    Right,
    Top,
    /// Horizontal centerline
    Middle,
    Bottom,
}

impl AlignEdge {
    pub const ALL: [AlignEdge; 6] = [
        AlignEdge::Left,
        AlignEdge::Center,
        AlignEdge::Right,
        AlignEdge::Top,
        AlignEdge::Middle,
        AlignEdge::Bottom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlignEdge::Left => "left",
            AlignEdge::Center => "center",
            AlignEdge::Right => "right",
            AlignEdge::Top => "top",
            AlignEdge::Middle => "middle",
            AlignEdge::Bottom => "bottom",
        }
    }
}

impl fmt::Display for AlignEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlignEdge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlignEdge::ALL
            .into_iter()
            .find(|edge| edge.as_str() == s)
            .ok_or_else(|| Error::UnknownAlignEdge(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn start(&self, bounds: &Bounds) -> f64 {
        match self {
            Axis::Horizontal => bounds.min_x,
            Axis::Vertical => bounds.min_y,
        }
    }

    fn end(&self, bounds: &Bounds) -> f64 {
        match self {
            Axis::Horizontal => bounds.max_x,
            Axis::Vertical => bounds.max_y,
        }
    }

    fn size(&self, bounds: &Bounds) -> f64 {
        self.end(bounds) - self.start(bounds)
    }

    /// `top_left` with its coordinate along this axis replaced
    fn place(&self, top_left: Point2D, position: f64) -> Point2D {
        match self {
            Axis::Horizontal => Point2D::new(position, top_left.y),
            Axis::Vertical => Point2D::new(top_left.x, position),
        }
    }
}

fn selected_elements<'a>(
    elements: &'a [SelectableElement],
    selected: &FxHashSet<ElementId>,
) -> Vec<&'a SelectableElement> {
    elements
        .iter()
        .filter(|e| selected.contains(&e.id))
        .collect()
}

/// Line up `edge` of every selected box with the same edge (or centerline)
/// of the box enclosing the whole selection.
///
/// Empty when nothing in `elements` is selected.
pub fn align(
    elements: &[SelectableElement],
    selected: &FxHashSet<ElementId>,
    edge: AlignEdge,
) -> PositionMap {
    let chosen = selected_elements(elements, selected);
    let Some(outer) = chosen
        .iter()
        .map(|e| e.bounds)
        .reduce(|acc, b| acc.union(&b))
    else {
        return PositionMap::default();
    };
    let center = outer.center();

    let positions: PositionMap = chosen
        .iter()
        .map(|e| {
            let b = &e.bounds;
            let (x, y) = match edge {
                AlignEdge::Left => (outer.min_x, b.min_y),
                AlignEdge::Center => (center.x - b.width() / 2.0, b.min_y),
                AlignEdge::Right => (outer.max_x - b.width(), b.min_y),
                AlignEdge::Top => (b.min_x, outer.min_y),
                AlignEdge::Middle => (b.min_x, center.y - b.height() / 2.0),
                AlignEdge::Bottom => (b.min_x, outer.max_y - b.height()),
            };
            (e.id, Point2D::new(x, y))
        })
        .collect();

    tracing::debug!(%edge, elements = positions.len(), "Aligned selection");
    positions
}

/// Space selected boxes so the gaps between neighbours along `axis` are
/// equal.
///
/// Boxes are ordered by their leading edge (ties keep element order). The
/// first and last stay where they are and appear in the map unchanged; the
/// interior ones are packed between them with
/// `gap = (last.end - first.start - Σ sizes) / (count - 1)`. The gap is
/// negative when the boxes do not fit, so they overlap evenly.
///
/// Fewer than three selected elements yields an empty map.
pub fn distribute(
    elements: &[SelectableElement],
    selected: &FxHashSet<ElementId>,
    axis: Axis,
) -> PositionMap {
    let mut chosen = selected_elements(elements, selected);
    let count = chosen.len();
    if count < 3 {
        return PositionMap::default();
    }
    chosen.sort_by(|a, b| axis.start(&a.bounds).total_cmp(&axis.start(&b.bounds)));

    let first = &chosen[0].bounds;
    let last = &chosen[count - 1].bounds;
    let outer_span = axis.end(last) - axis.start(first);
    let total_size: f64 = chosen.iter().map(|e| axis.size(&e.bounds)).sum();
    let gap = (outer_span - total_size) / (count - 1) as f64;

    let mut positions = PositionMap::default();
    let mut cursor = axis.start(first);
    for (i, e) in chosen.iter().enumerate() {
        let top_left = e.bounds.top_left();
        let position = if i == count - 1 {
            top_left
        } else {
            axis.place(top_left, cursor)
        };
        positions.insert(e.id, position);
        cursor += axis.size(&e.bounds) + gap;
    }

    tracing::debug!(?axis, elements = count, gap, "Distributed selection");
    positions
}

/// Move every selected box by `(dx, dy)`.
pub fn translate(
    elements: &[SelectableElement],
    selected: &FxHashSet<ElementId>,
    dx: f64,
    dy: f64,
) -> PositionMap {
    selected_elements(elements, selected)
        .into_iter()
        .map(|e| {
            let top_left = e.bounds.top_left();
            (e.id, Point2D::new(top_left.x + dx, top_left.y + dy))
        })
        .collect()
}

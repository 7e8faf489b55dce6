// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Selection inputs: elements, modes, options and gestures.

use std::fmt;
use std::str::FromStr;

use plan_lite_geometry::{Bounds, ElementId, Point2D};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kind of drawable behind a selectable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    Vertex,
    Segment,
    Room,
    Opening,
    Annotation,
}

/// A host-built view of something that can be selected.
///
/// Only the axis-aligned box takes part in hit testing, whatever the
/// element's real shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectableElement {
    pub id: ElementId,
    pub element_type: ElementType,
    pub bounds: Bounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_id: Option<String>,
}

impl SelectableElement {
    pub fn new(id: u64, element_type: ElementType, bounds: Bounds) -> Self {
        Self {
            id: ElementId(id),
            element_type,
            bounds,
            category: None,
            layer_id: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_layer(mut self, layer_id: impl Into<String>) -> Self {
        self.layer_id = Some(layer_id.into());
        self
    }

    pub fn center(&self) -> Point2D {
        self.bounds.center()
    }
}

/// The active selection tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionMode {
    #[default]
    Single,
    Box,
    Lasso,
    MagicWand,
    Paint,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 5] = [
        SelectionMode::Single,
        SelectionMode::Box,
        SelectionMode::Lasso,
        SelectionMode::MagicWand,
        SelectionMode::Paint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Single => "single",
            SelectionMode::Box => "box",
            SelectionMode::Lasso => "lasso",
            SelectionMode::MagicWand => "magicWand",
            SelectionMode::Paint => "paint",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SelectionMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}

/// How a drag box tests element boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoxCompare {
    /// Any overlap selects
    #[default]
    Intersect,
    /// The element box must lie fully inside
    Contain,
}

/// Attribute the magic wand matches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchCriteria {
    Type,
    Category,
    Layer,
}

impl MatchCriteria {
    /// Whether `candidate` matches `reference` on this attribute.
    ///
    /// Elements without a category (or layer) never match on it.
    pub fn matches(&self, reference: &SelectableElement, candidate: &SelectableElement) -> bool {
        match self {
            MatchCriteria::Type => reference.element_type == candidate.element_type,
            MatchCriteria::Category => {
                reference.category.is_some() && reference.category == candidate.category
            }
            MatchCriteria::Layer => {
                reference.layer_id.is_some() && reference.layer_id == candidate.layer_id
            }
        }
    }
}

/// Default paint brush radius in world units
pub const DEFAULT_BRUSH_SIZE: f64 = 10.0;

/// Selection tool state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionOptions {
    pub mode: SelectionMode,
    /// Add to the current selection instead of replacing it
    pub additive: bool,
    /// Remove from the current selection (single mode only)
    pub subtractive: bool,
    /// Paint radius in world units
    pub brush_size: f64,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Single,
            additive: false,
            subtractive: false,
            brush_size: DEFAULT_BRUSH_SIZE,
        }
    }
}

/// Mode-specific parameters of one selection gesture
#[derive(Debug, Clone, Copy)]
pub enum SelectionGesture<'a> {
    Single {
        id: ElementId,
    },
    Box {
        start: Point2D,
        end: Point2D,
        compare: BoxCompare,
    },
    Lasso {
        path: &'a [Point2D],
    },
    MagicWand {
        reference: &'a SelectableElement,
        criteria: MatchCriteria,
    },
    Paint {
        path: &'a [Point2D],
    },
}

impl SelectionGesture<'_> {
    pub fn mode(&self) -> SelectionMode {
        match self {
            SelectionGesture::Single { .. } => SelectionMode::Single,
            SelectionGesture::Box { .. } => SelectionMode::Box,
            SelectionGesture::Lasso { .. } => SelectionMode::Lasso,
            SelectionGesture::MagicWand { .. } => SelectionMode::MagicWand,
            SelectionGesture::Paint { .. } => SelectionMode::Paint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        for mode in SelectionMode::ALL {
            assert_eq!(mode.as_str().parse::<SelectionMode>().unwrap(), mode);
        }
        assert_eq!(
            "marquee".parse::<SelectionMode>(),
            Err(Error::UnknownMode("marquee".to_string()))
        );
    }

    #[test]
    fn test_mode_serializes_like_its_name() {
        let json = serde_json::to_string(&SelectionMode::MagicWand).unwrap();
        assert_eq!(json, "\"magicWand\"");
    }

    #[test]
    fn test_criteria_ignore_missing_attributes() {
        let bounds = Bounds::from_rect(0.0, 0.0, 1.0, 1.0);
        let a = SelectableElement::new(1, ElementType::Opening, bounds);
        let b = SelectableElement::new(2, ElementType::Opening, bounds);

        assert!(MatchCriteria::Type.matches(&a, &b));
        assert!(!MatchCriteria::Category.matches(&a, &b));
        assert!(!MatchCriteria::Layer.matches(&a, &b));

        let a = a.with_layer("L1");
        let b = b.with_layer("L1").with_category("door");
        assert!(MatchCriteria::Layer.matches(&a, &b));
        assert!(!MatchCriteria::Category.matches(&a, &b));
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan-Lite Selection
//!
//! Multi-mode selection and bulk edits over axis-aligned element boxes.
//!
//! The [`SelectionEngine`] keeps the selected ids between pointer events
//! and supports five tools (single click, drag box, lasso, magic wand and
//! paint brush). The [`bulk`] functions compute new positions for the
//! selected elements without touching them.
//!
//! ```rust
//! use plan_lite_geometry::{Bounds, Point2D};
//! use plan_lite_selection::{
//!     align, AlignEdge, BoxCompare, ElementType, SelectableElement, SelectionEngine,
//! };
//!
//! let elements = vec![
//!     SelectableElement::new(1, ElementType::Room, Bounds::from_rect(0.0, 0.0, 10.0, 10.0)),
//!     SelectableElement::new(2, ElementType::Room, Bounds::from_rect(30.0, 20.0, 10.0, 10.0)),
//! ];
//!
//! let mut engine = SelectionEngine::new();
//! engine.select_box(
//!     Point2D::new(-1.0, -1.0),
//!     Point2D::new(50.0, 50.0),
//!     &elements,
//!     BoxCompare::Contain,
//!     false,
//! );
//! assert_eq!(engine.len(), 2);
//!
//! let moves = align(&elements, engine.selection(), AlignEdge::Top);
//! assert_eq!(moves[&elements[1].id], Point2D::new(30.0, 0.0));
//! ```

pub mod bulk;
pub mod engine;
pub mod error;
pub mod types;

pub use bulk::{align, distribute, translate, AlignEdge, Axis, PositionMap};
pub use engine::SelectionEngine;
pub use error::{Error, Result};
pub use types::{
    BoxCompare, ElementType, MatchCriteria, SelectableElement, SelectionGesture, SelectionMode,
    SelectionOptions, DEFAULT_BRUSH_SIZE,
};

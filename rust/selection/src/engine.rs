// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stateful selection engine.
//!
//! The engine holds the selected ids and the tool options between pointer
//! events. Each gesture is a pure hit test over the element boxes passed in
//! for that call, followed by a merge into the current set: replace by
//! default, union when additive. The engine never keeps references to the
//! host's elements; ids of deleted elements stay selected until the host
//! calls [`SelectionEngine::retain_existing`].

use plan_lite_geometry::{point_in_polygon, Bounds, ElementId, Point2D};
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::types::{
    BoxCompare, MatchCriteria, SelectableElement, SelectionGesture, SelectionMode,
    SelectionOptions,
};

#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    selected: FxHashSet<ElementId>,
    options: SelectionOptions,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SelectionOptions) -> Result<Self> {
        let mut engine = Self::new();
        engine.set_options(options)?;
        Ok(engine)
    }

    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SelectionOptions) -> Result<()> {
        check_brush_size(options.brush_size)?;
        self.options = options;
        Ok(())
    }

    /// Switch tools. The current selection is kept.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.options.mode = mode;
    }

    /// Run one gesture of the active mode with the engine's options.
    ///
    /// A single click on an id missing from `elements` leaves the selection
    /// unchanged. Returns the selected ids afterwards, sorted.
    pub fn apply(
        &mut self,
        gesture: SelectionGesture<'_>,
        elements: &[SelectableElement],
    ) -> Result<Vec<ElementId>> {
        let requested = gesture.mode();
        if requested != self.options.mode {
            return Err(Error::ModeMismatch {
                active: self.options.mode,
                requested,
            });
        }

        let additive = self.options.additive;
        match gesture {
            SelectionGesture::Single { id } => {
                if elements.iter().any(|e| e.id == id) {
                    self.select_single(id, additive, self.options.subtractive);
                } else {
                    tracing::trace!(%id, "Ignoring click on unknown element");
                }
            }
            SelectionGesture::Box {
                start,
                end,
                compare,
            } => {
                self.select_box(start, end, elements, compare, additive);
            }
            SelectionGesture::Lasso { path } => {
                self.select_lasso(path, elements, additive);
            }
            SelectionGesture::MagicWand {
                reference,
                criteria,
            } => {
                self.select_magic_wand(reference, elements, criteria, additive);
            }
            SelectionGesture::Paint { path } => {
                self.select_paint(path, elements, self.options.brush_size)?;
            }
        }

        Ok(self.selected_ids())
    }

    /// Click selection: subtractive removes `id`, additive adds it, plain
    /// replaces the selection with `{id}`. Subtractive wins over additive.
    pub fn select_single(&mut self, id: ElementId, additive: bool, subtractive: bool) {
        if subtractive {
            self.selected.remove(&id);
        } else if additive {
            self.selected.insert(id);
        } else {
            self.selected.clear();
            self.selected.insert(id);
        }
        tracing::trace!(%id, additive, subtractive, "Single select");
    }

    /// Drag-box selection between two arbitrary corners.
    pub fn select_box(
        &mut self,
        start: Point2D,
        end: Point2D,
        elements: &[SelectableElement],
        compare: BoxCompare,
        additive: bool,
    ) -> usize {
        let region = Bounds::from_corners(start, end);
        let hits = elements.iter().filter(|e| match compare {
            BoxCompare::Intersect => region.intersects(&e.bounds),
            BoxCompare::Contain => region.contains_bounds(&e.bounds),
        });
        let count = self.commit(hits.map(|e| e.id), additive);
        tracing::trace!(?compare, hits = count, "Box select");
        count
    }

    /// Freehand selection: an element is inside when its box center is.
    ///
    /// A path of fewer than three points encloses nothing.
    pub fn select_lasso(
        &mut self,
        path: &[Point2D],
        elements: &[SelectableElement],
        additive: bool,
    ) -> usize {
        let hits = elements
            .iter()
            .filter(|e| point_in_polygon(&e.center(), path));
        let count = self.commit(hits.map(|e| e.id), additive);
        tracing::trace!(points = path.len(), hits = count, "Lasso select");
        count
    }

    /// Select every element matching `reference` on `criteria`.
    ///
    /// The reference itself is included when it is in `elements`.
    pub fn select_magic_wand(
        &mut self,
        reference: &SelectableElement,
        elements: &[SelectableElement],
        criteria: MatchCriteria,
        additive: bool,
    ) -> usize {
        let hits = elements
            .iter()
            .filter(|e| criteria.matches(reference, e));
        let count = self.commit(hits.map(|e| e.id), additive);
        tracing::trace!(reference = %reference.id, ?criteria, hits = count, "Magic wand select");
        count
    }

    /// Brush selection along a stroke. Always adds to the selection.
    ///
    /// Every sampled point of `path` picks up the elements whose box center
    /// is within `brush_size` of it.
    pub fn select_paint(
        &mut self,
        path: &[Point2D],
        elements: &[SelectableElement],
        brush_size: f64,
    ) -> Result<usize> {
        check_brush_size(brush_size)?;

        let hits = elements.iter().filter(|e| {
            let center = e.center();
            path.iter().any(|p| p.distance_to(&center) <= brush_size)
        });
        let count = self.commit(hits.map(|e| e.id), true);
        tracing::trace!(points = path.len(), brush_size, hits = count, "Paint select");
        Ok(count)
    }

    pub fn select_all(&mut self, elements: &[SelectableElement]) {
        self.selected = elements.iter().map(|e| e.id).collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Select exactly the elements that are not selected now.
    ///
    /// Selected ids missing from `elements` are dropped.
    pub fn invert_selection(&mut self, elements: &[SelectableElement]) {
        self.selected = elements
            .iter()
            .map(|e| e.id)
            .filter(|id| !self.selected.contains(id))
            .collect();
    }

    /// Box enclosing every selected element present in `elements`, or
    /// `None` when none is.
    pub fn selection_bounds(&self, elements: &[SelectableElement]) -> Option<Bounds> {
        elements
            .iter()
            .filter(|e| self.selected.contains(&e.id))
            .map(|e| e.bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Drop selected ids that no longer name an element.
    pub fn retain_existing(&mut self, elements: &[SelectableElement]) {
        let existing: FxHashSet<ElementId> = elements.iter().map(|e| e.id).collect();
        let before = self.selected.len();
        self.selected.retain(|id| existing.contains(id));
        if self.selected.len() != before {
            tracing::debug!(
                pruned = before - self.selected.len(),
                "Pruned selection of deleted elements"
            );
        }
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selection(&self) -> &FxHashSet<ElementId> {
        &self.selected
    }

    /// Selected ids in ascending order
    pub fn selected_ids(&self) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = self.selected.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Replace or extend the selection with `hits`; returns the hit count.
    fn commit(&mut self, hits: impl Iterator<Item = ElementId>, additive: bool) -> usize {
        if !additive {
            self.selected.clear();
        }
        let mut count = 0;
        for id in hits {
            self.selected.insert(id);
            count += 1;
        }
        count
    }
}

fn check_brush_size(brush_size: f64) -> Result<()> {
    if brush_size >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidBrushSize(brush_size))
    }
}

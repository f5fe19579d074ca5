// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use kurbo::{Point, Rect, Size};

use crate::{LayoutState, Positioned};

/// The surface a virtualizing layout uses to talk to the element which hosts it.
///
/// The host owns the item data, the viewport, the container pool and the
/// [`LayoutState`] slot. The layout only decides *which* indices need containers
/// and *where* they go.
///
/// All fallible methods report faults through [`Self::Error`]; layouts propagate
/// these unchanged and abandon the current pass.
pub trait VirtualizingHost {
    /// The positioned data item type.
    type Item: Positioned;
    /// A handle to a realized visual container.
    type Element;
    /// A fault raised by the host while realizing, measuring, arranging or recycling.
    type Error;

    /// The number of items which can be laid out.
    fn item_count(&self) -> usize;

    /// The item at `index`, if the host has one.
    ///
    /// Layouts only call this with `index < self.item_count()`.
    fn item_at_mut(&mut self, index: usize) -> Option<&mut Self::Item>;

    /// The area, in canvas coordinates, for which containers should be realized.
    fn realization_rect(&self) -> Rect;

    /// Realize the container for `index`, or return the one already realized for it.
    ///
    /// This must be idempotent for an index which is already realized.
    fn get_or_create_element_at(&mut self, index: usize) -> Result<Self::Element, Self::Error>;

    /// Measure a realized container with the given available size.
    ///
    /// If this fails, the layout recycles `element` before reporting the fault,
    /// so a container is never left realized for an item which isn't in view.
    fn measure_element(
        &mut self,
        element: &Self::Element,
        available_size: Size,
    ) -> Result<(), Self::Error>;

    /// Place a realized container with its top-left corner at `origin`.
    ///
    /// `size` is the item's own extent, which may be negative.
    fn arrange_element(
        &mut self,
        element: &Self::Element,
        origin: Point,
        size: Size,
    ) -> Result<(), Self::Error>;

    /// Return a container to the host's reuse pool.
    fn recycle_element(&mut self, element: Self::Element) -> Result<(), Self::Error>;

    /// The layout state of the current attachment, if any.
    ///
    /// This reads the same slot as [`layout_state_mut`](Self::layout_state_mut).
    /// Both are required because a shared borrow of the slot can't be derived from
    /// the `&mut self` accessor; implementations are usually `self.slot.as_ref()`.
    fn layout_state(&self) -> Option<&LayoutState>;

    /// The slot in which the layout keeps its per-attachment state.
    ///
    /// Layouts install and clear the state through this slot; hosts should only store it.
    fn layout_state_mut(&mut self) -> &mut Option<LayoutState>;
}

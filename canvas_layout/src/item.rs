// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use kurbo::{Point, Rect, Size};

/// An item which can be placed by a [`CanvasLayout`](crate::CanvasLayout).
///
/// Consumers provide the bounds; the in-view flag belongs to the layout.
/// Only the layout should call [`set_in_view`](Self::set_in_view).
pub trait Positioned {
    /// The item's top-left corner in canvas coordinates.
    fn origin(&self) -> Point;

    /// The item's extent, exactly as the consumer provided it.
    ///
    /// This may be negative; it is passed to the host unchanged.
    fn size(&self) -> Size;

    /// The item's bounds in canvas coordinates.
    ///
    /// The rect is `(left, top, left + width, top + height)` and is *not* normalized:
    /// an item with a negative width has `x1 < x0`.
    ///
    /// Recomputing the size from this rect can lose precision; use [`size`](Self::size) instead.
    fn bounds(&self) -> Rect {
        let origin = self.origin();
        let size = self.size();
        Rect::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// Whether the item intersected the realization rect during the last measure pass.
    fn is_in_view(&self) -> bool;

    /// Records the result of the latest intersection test.
    fn set_in_view(&mut self, in_view: bool);
}

/// A plain positioned item.
///
/// This is the simplest [`Positioned`] implementation.
/// Hosts with their own item types can implement [`Positioned`] directly instead.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedItem {
    /// Offset of the item's left edge from the canvas origin.
    pub left: f64,
    /// Offset of the item's top edge from the canvas origin.
    pub top: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
    in_view: bool,
}

impl PositionedItem {
    /// Create an item which is not yet in view.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            in_view: false,
        }
    }

    /// Create an item covering `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl Positioned for PositionedItem {
    fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn is_in_view(&self) -> bool {
        self.in_view
    }

    fn set_in_view(&mut self, in_view: bool) {
        self.in_view = in_view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_starts_out_of_view() {
        let item = PositionedItem::new(10., 20., 30., 40.);
        assert!(!item.is_in_view());
        assert_eq!(item.bounds(), Rect::new(10., 20., 40., 60.));
    }

    #[test]
    fn negative_extent_is_not_normalized() {
        let item = PositionedItem::new(100., 100., -20., 10.);
        let bounds = item.bounds();
        assert_eq!(bounds.x0, 100.);
        assert_eq!(bounds.x1, 80.);
        assert_eq!(bounds.width(), -20.);
    }

    #[test]
    fn size_is_exact_for_fractional_and_distant_items() {
        let fractional = PositionedItem::new(0.1, 0.1, 0.2, 0.2);
        assert_eq!(fractional.size(), Size::new(0.2, 0.2));

        let distant = PositionedItem::new(1e16, 0., 1., 1.);
        assert_eq!(distant.origin(), Point::new(1e16, 0.));
        assert_eq!(distant.size(), Size::new(1., 1.));
    }

    #[test]
    fn from_rect_keeps_origin_and_size() {
        let item = PositionedItem::from_rect(Rect::new(5., 6., 15., 26.));
        assert_eq!(item, PositionedItem::new(5., 6., 10., 20.));
    }
}

// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use kurbo::{Rect, Size};
use tracing::trace_span;

use crate::{Positioned, VirtualizingHost, VirtualizingLayout};

/// How an item's bounds are tested against the realization rect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewportTest {
    /// An item is in view if its overlap with the realization rect has a positive
    /// width *or* a positive height.
    ///
    /// This is looser than a true intersection test: an item which shares a column
    /// (or a row) with the realization rect is realized even when it is far away on
    /// the other axis.
    #[default]
    EitherAxis,
    /// An item is in view only if its overlap has a positive width *and* a positive height.
    BothAxes,
}

impl ViewportTest {
    /// Whether `bounds` counts as in view for `realization_rect`.
    pub fn is_in_view(self, bounds: Rect, realization_rect: Rect) -> bool {
        let overlap = bounds.intersect(realization_rect);
        match self {
            Self::EitherAxis => overlap.width() > 0. || overlap.height() > 0.,
            Self::BothAxes => overlap.width() > 0. && overlap.height() > 0.,
        }
    }
}

/// A virtualizing layout which positions items at their own canvas coordinates.
///
/// The size of the canvas is the furthest right and bottom edge of any item.
/// Every measure pass tests every item against the host's
/// [realization rect](VirtualizingHost::realization_rect):
///
/// - An item which comes into view gets a container, which is measured at the item's size.
/// - An item which leaves the view has its container recycled.
/// - An item which stays in (or out of) view is left alone.
///
/// Arrange then places the container of every in-view item at the item's origin and size.
///
/// If the host fails to measure a freshly realized container, the container is recycled
/// and the fault is returned; the item stays out of view so the next pass retries it.
///
/// The cost of a pass is linear in the number of items, as there is no spatial index.
///
/// `CanvasLayout` holds only configuration, so one instance can drive many hosts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanvasLayout {
    viewport_test: ViewportTest,
}

// --- MARK: BUILDERS
impl CanvasLayout {
    /// Create a layout using [`ViewportTest::EitherAxis`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method to choose how items are tested against the realization rect.
    pub fn with_viewport_test(mut self, viewport_test: ViewportTest) -> Self {
        self.viewport_test = viewport_test;
        self
    }

    /// The viewport test in use.
    pub fn viewport_test(&self) -> ViewportTest {
        self.viewport_test
    }
}

// --- MARK: IMPL LAYOUT
impl VirtualizingLayout for CanvasLayout {
    fn measure<H: VirtualizingHost>(
        &self,
        host: &mut H,
        available_size: Size,
    ) -> Result<Size, H::Error> {
        let item_count = host.item_count();
        let _span = trace_span!("CanvasLayout", pass = "measure", item_count).entered();

        match host.layout_state_mut() {
            Some(state) => state.clear_realized(),
            None => tracing::warn!("CanvasLayout measured by a host it isn't attached to"),
        }

        let realization_rect = host.realization_rect();
        let mut max_width: f64 = 0.;
        let mut max_height: f64 = 0.;

        for index in 0..item_count {
            let Some(item) = host.item_at_mut(index) else {
                tracing::warn!(index, "CanvasLayout skipped index with no item");
                continue;
            };
            let bounds = item.bounds();
            let size = item.size();
            let was_in_view = item.is_in_view();

            max_width = max_width.max(bounds.x1);
            max_height = max_height.max(bounds.y1);

            let in_view = self.viewport_test.is_in_view(bounds, realization_rect);
            if in_view && !was_in_view {
                let element = host.get_or_create_element_at(index)?;
                if let Err(err) = host.measure_element(&element, size) {
                    // The item stays out of view, so its container must not stay realized.
                    if host.recycle_element(element).is_err() {
                        tracing::warn!(index, "Couldn't recycle container after failed measure");
                    }
                    return Err(err);
                }
                tracing::debug!(index, "Realized item entering the view");
            } else if !in_view && was_in_view {
                let element = host.get_or_create_element_at(index)?;
                host.recycle_element(element)?;
                tracing::debug!(index, "Recycled item leaving the view");
            }

            if let Some(item) = host.item_at_mut(index) {
                item.set_in_view(in_view);
            }
            if in_view && let Some(state) = host.layout_state_mut() {
                state.push_realized(index, bounds);
            }
        }

        let desired_size = Size::new(max_width, max_height);
        tracing::trace!(?available_size, ?desired_size, "CanvasLayout measured");
        Ok(desired_size)
    }

    fn arrange<H: VirtualizingHost>(
        &self,
        host: &mut H,
        final_size: Size,
    ) -> Result<Size, H::Error> {
        let item_count = host.item_count();
        let _span = trace_span!("CanvasLayout", pass = "arrange", item_count).entered();

        for index in 0..item_count {
            let Some(item) = host.item_at_mut(index) else {
                continue;
            };
            if !item.is_in_view() {
                continue;
            }
            let origin = item.origin();
            let size = item.size();
            let element = host.get_or_create_element_at(index)?;
            host.arrange_element(&element, origin, size)?;
        }

        Ok(final_size)
    }
}

// --- MARK: TESTS
#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0., 0., 300., 300.);

    #[test]
    fn overlapping_item_is_in_view() {
        let bounds = Rect::new(200., 0., 300., 100.);
        assert!(ViewportTest::EitherAxis.is_in_view(bounds, VIEWPORT));
        assert!(ViewportTest::BothAxes.is_in_view(bounds, VIEWPORT));
    }

    #[test]
    fn disjoint_item_is_out_of_view() {
        let bounds = Rect::new(1000., 1000., 1050., 1050.);
        assert!(!ViewportTest::EitherAxis.is_in_view(bounds, VIEWPORT));
        assert!(!ViewportTest::BothAxes.is_in_view(bounds, VIEWPORT));
    }

    #[test]
    fn single_axis_overlap_only_counts_for_either_axis() {
        // Same column as the viewport, far below it.
        let bounds = Rect::new(0., 5000., 100., 5100.);
        assert!(ViewportTest::EitherAxis.is_in_view(bounds, VIEWPORT));
        assert!(!ViewportTest::BothAxes.is_in_view(bounds, VIEWPORT));
    }

    #[test]
    fn touching_edges_are_out_of_view() {
        let bounds = Rect::new(300., 300., 400., 400.);
        assert!(!ViewportTest::EitherAxis.is_in_view(bounds, VIEWPORT));
    }

    #[test]
    fn negative_extent_is_never_in_view() {
        let bounds = Rect::new(100., 100., 80., 80.);
        assert!(!ViewportTest::EitherAxis.is_in_view(bounds, VIEWPORT));
    }

    #[test]
    fn builder_sets_viewport_test() {
        assert_eq!(CanvasLayout::new().viewport_test(), ViewportTest::EitherAxis);
        let layout = CanvasLayout::new().with_viewport_test(ViewportTest::BothAxes);
        assert_eq!(layout.viewport_test(), ViewportTest::BothAxes);
    }

    #[test]
    fn layout_is_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CanvasLayout>();
    }
}

// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use kurbo::Rect;

/// A unique identifier for a [`LayoutState`].
///
/// Two states with the same id are the same attachment;
/// a host which detaches and re-attaches gets a new id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutStateId(NonZeroU64);

impl LayoutStateId {
    fn next() -> Self {
        static LAYOUT_STATE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);
        let id = LAYOUT_STATE_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        // The counter starts at one and won't wrap around in practice.
        Self(NonZeroU64::new(id).unwrap_or(NonZeroU64::MIN))
    }

    /// Returns the integer value of the id.
    pub fn to_raw(self) -> u64 {
        self.0.get()
    }
}

/// Per-attachment state of a virtualizing layout.
///
/// Each host which the layout is attached to owns exactly one of these, in its
/// [layout state slot](crate::VirtualizingHost::layout_state_mut).
/// The layout itself stores nothing, since it could be in use by multiple hosts simultaneously.
///
/// The realized-item cache is refreshed by every measure pass.
/// The layout re-tests every item each pass and never reads the cache back;
/// it is kept for hosts which want to inspect what is currently realized.
#[derive(Debug)]
pub struct LayoutState {
    id: LayoutStateId,
    first_realized_index: Option<usize>,
    layout_rects: Vec<Rect>,
}

impl LayoutState {
    pub(crate) fn new() -> Self {
        Self {
            id: LayoutStateId::next(),
            first_realized_index: None,
            layout_rects: Vec::new(),
        }
    }

    /// The id of this attachment.
    pub fn id(&self) -> LayoutStateId {
        self.id
    }

    /// Index of the first item which was in view after the last measure pass.
    ///
    /// `None` if nothing was in view, or if no measure pass has run yet.
    pub fn first_realized_index(&self) -> Option<usize> {
        self.first_realized_index
    }

    /// Bounds of every in-view item after the last measure pass, in index order.
    pub fn layout_rects(&self) -> &[Rect] {
        &self.layout_rects
    }

    /// The number of items which were in view after the last measure pass.
    pub fn realized_count(&self) -> usize {
        self.layout_rects.len()
    }

    pub(crate) fn clear_realized(&mut self) {
        self.first_realized_index = None;
        self.layout_rects.clear();
    }

    pub(crate) fn push_realized(&mut self, index: usize, rect: Rect) {
        self.first_realized_index.get_or_insert(index);
        self.layout_rects.push(rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let first = LayoutState::new();
        let second = LayoutState::new();
        assert_ne!(first.id(), second.id());
        assert!(second.id().to_raw() > first.id().to_raw());
    }

    #[test]
    fn first_realized_index_keeps_lowest_pushed() {
        let mut state = LayoutState::new();
        assert_eq!(state.first_realized_index(), None);

        state.push_realized(3, Rect::new(0., 0., 1., 1.));
        state.push_realized(7, Rect::new(1., 1., 2., 2.));
        assert_eq!(state.first_realized_index(), Some(3));
        assert_eq!(state.realized_count(), 2);

        state.clear_realized();
        assert_eq!(state.first_realized_index(), None);
        assert!(state.layout_rects().is_empty());
    }
}

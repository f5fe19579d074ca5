// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use canvas_layout::kurbo::{Point, Rect, Size};
use canvas_layout::{LayoutState, Positioned as _, PositionedItem, VirtualizingHost};

/// A fake container handed out by a [`RecordingHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// A recording of host method calls.
///
/// Internally stores a queue of [`Records`](Record).
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct Recording(Rc<RefCell<VecDeque<Record>>>);

/// A recording of a call a layout made on a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A brand new container was created for an index.
    Created {
        /// The realized index.
        index: usize,
        /// The new container.
        element: ElementId,
    },
    /// A container was taken from the recycle pool for an index.
    Reused {
        /// The realized index.
        index: usize,
        /// The reused container.
        element: ElementId,
    },
    /// The container of an already realized index was returned.
    Fetched {
        /// The realized index.
        index: usize,
        /// Its container.
        element: ElementId,
    },
    /// A container was measured.
    Measured {
        /// The measured container.
        element: ElementId,
        /// The available size passed by the layout.
        available_size: Size,
    },
    /// A container was arranged.
    Arranged {
        /// The arranged container.
        element: ElementId,
        /// Where the layout placed its top-left corner.
        origin: Point,
        /// The size the layout gave it.
        size: Size,
    },
    /// A container was returned to the pool.
    Recycled {
        /// The recycled container.
        element: ElementId,
    },
}

impl Record {
    /// True for records of a `get_or_create_element_at` call.
    pub fn is_get_or_create(&self) -> bool {
        matches!(
            self,
            Self::Created { .. } | Self::Reused { .. } | Self::Fetched { .. }
        )
    }
}

/// The host calls into which a [`RecordingHost`] can inject faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum HostCall {
    Realize,
    Measure,
    Arrange,
    Recycle,
}

impl HostCall {
    fn verb(self) -> &'static str {
        match self {
            Self::Realize => "realize",
            Self::Measure => "measure",
            Self::Arrange => "arrange",
            Self::Recycle => "recycle",
        }
    }
}

impl Recording {
    /// True if no calls have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// The number of calls in the recording.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Clear recorded calls.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Returns the next call in the recording, if one exists.
    ///
    /// This consumes the call.
    pub fn next(&self) -> Option<Record> {
        self.0.borrow_mut().pop_front()
    }

    /// Returns a vec of calls drained from the recording.
    pub fn drain(&self) -> Vec<Record> {
        self.0.borrow_mut().drain(..).collect::<Vec<_>>()
    }

    fn push(&self, record: Record) {
        self.0.borrow_mut().push_back(record);
    }
}

/// A fault injected into a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostError {
    message: String,
}

impl HostError {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for HostError {}

/// An in-memory virtualization host which records every call made on it.
///
/// Containers are plain [`ElementId`]s.
/// Recycled containers go to a pool and are reused before new ones are created.
///
/// ```
/// use canvas_layout::kurbo::{Rect, Size};
/// use canvas_layout::{CanvasLayout, PositionedItem, VirtualizingLayout};
/// use canvas_layout_testing::{ElementId, Record, RecordingHost};
///
/// let mut host = RecordingHost::new(vec![PositionedItem::new(0., 0., 10., 10.)]);
/// host.set_realization_rect(Rect::new(0., 0., 100., 100.));
///
/// let layout = CanvasLayout::new();
/// layout.initialize_for_context(&mut host);
/// layout.measure(&mut host, Size::new(100., 100.)).unwrap();
///
/// let recording = host.recording();
/// assert_eq!(recording.next(), Some(Record::Created { index: 0, element: ElementId(0) }));
/// ```
#[derive(Debug, Default)]
pub struct RecordingHost {
    items: Vec<Option<PositionedItem>>,
    realization_rect: Rect,
    realized: BTreeMap<usize, ElementId>,
    pool: Vec<ElementId>,
    next_element: u64,
    failures: BTreeSet<(HostCall, usize)>,
    recording: Recording,
    layout_state: Option<LayoutState>,
}

impl RecordingHost {
    /// Create a host over `items`, with an empty realization rect.
    pub fn new(items: Vec<PositionedItem>) -> Self {
        Self {
            items: items.into_iter().map(Some).collect(),
            ..Self::default()
        }
    }

    /// Set the viewport used for the next measure pass.
    pub fn set_realization_rect(&mut self, rect: Rect) {
        self.realization_rect = rect;
    }

    /// Builder-style method to set the realization rect.
    pub fn with_realization_rect(mut self, rect: Rect) -> Self {
        self.set_realization_rect(rect);
        self
    }

    /// Make every `get_or_create_element_at` call for `index` fail.
    pub fn fail_on_realize(&mut self, index: usize) {
        self.failures.insert((HostCall::Realize, index));
    }

    /// Make measuring the container of `index` fail.
    pub fn fail_on_measure(&mut self, index: usize) {
        self.failures.insert((HostCall::Measure, index));
    }

    /// Make arranging the container of `index` fail.
    pub fn fail_on_arrange(&mut self, index: usize) {
        self.failures.insert((HostCall::Arrange, index));
    }

    /// Make recycling the container of `index` fail.
    pub fn fail_on_recycle(&mut self, index: usize) {
        self.failures.insert((HostCall::Recycle, index));
    }

    /// Stop injecting faults.
    pub fn clear_failures(&mut self) {
        self.failures.clear();
    }

    /// The item at `index`, if it has data.
    pub fn item(&self, index: usize) -> Option<&PositionedItem> {
        self.items.get(index).and_then(Option::as_ref)
    }

    /// Mutable access to the item at `index`, e.g. to move it between passes.
    pub fn item_mut(&mut self, index: usize) -> Option<&mut PositionedItem> {
        self.items.get_mut(index).and_then(Option::as_mut)
    }

    /// Drop the data for `index`, leaving an empty slot behind.
    pub fn clear_item(&mut self, index: usize) {
        if let Some(slot) = self.items.get_mut(index) {
            *slot = None;
        }
    }

    /// Indices of the items whose in-view flag is set, in order.
    pub fn in_view_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.as_ref().is_some_and(|item| item.is_in_view()))
            .map(|(index, _)| index)
            .collect()
    }

    /// Indices which currently own a container, in order.
    pub fn realized_indices(&self) -> Vec<usize> {
        self.realized.keys().copied().collect()
    }

    /// The container realized for `index`.
    pub fn realized_element(&self, index: usize) -> Option<ElementId> {
        self.realized.get(&index).copied()
    }

    /// The number of containers waiting in the recycle pool.
    pub fn pooled_count(&self) -> usize {
        self.pool.len()
    }

    /// The number of containers ever created.
    pub fn created_count(&self) -> u64 {
        self.next_element
    }

    /// A handle to the calls recorded on this host.
    pub fn recording(&self) -> Recording {
        self.recording.clone()
    }

    fn check(&self, call: HostCall, index: usize) -> Result<(), HostError> {
        if self.failures.contains(&(call, index)) {
            return Err(HostError::new(format!(
                "failed to {} item {index}",
                call.verb()
            )));
        }
        Ok(())
    }

    fn index_of(&self, element: ElementId) -> Result<usize, HostError> {
        self.realized
            .iter()
            .find_map(|(index, realized)| (*realized == element).then_some(*index))
            .ok_or_else(|| HostError::new(format!("{element:?} is not realized")))
    }
}

impl VirtualizingHost for RecordingHost {
    type Item = PositionedItem;
    type Element = ElementId;
    type Error = HostError;

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_at_mut(&mut self, index: usize) -> Option<&mut PositionedItem> {
        self.item_mut(index)
    }

    fn realization_rect(&self) -> Rect {
        self.realization_rect
    }

    fn get_or_create_element_at(&mut self, index: usize) -> Result<ElementId, HostError> {
        self.check(HostCall::Realize, index)?;
        if let Some(&element) = self.realized.get(&index) {
            self.recording.push(Record::Fetched { index, element });
            return Ok(element);
        }
        let element = match self.pool.pop() {
            Some(element) => {
                self.recording.push(Record::Reused { index, element });
                element
            }
            None => {
                let element = ElementId(self.next_element);
                self.next_element += 1;
                self.recording.push(Record::Created { index, element });
                element
            }
        };
        self.realized.insert(index, element);
        Ok(element)
    }

    fn measure_element(
        &mut self,
        element: &ElementId,
        available_size: Size,
    ) -> Result<(), HostError> {
        self.check(HostCall::Measure, self.index_of(*element)?)?;
        self.recording.push(Record::Measured {
            element: *element,
            available_size,
        });
        Ok(())
    }

    fn arrange_element(
        &mut self,
        element: &ElementId,
        origin: Point,
        size: Size,
    ) -> Result<(), HostError> {
        self.check(HostCall::Arrange, self.index_of(*element)?)?;
        self.recording.push(Record::Arranged {
            element: *element,
            origin,
            size,
        });
        Ok(())
    }

    fn recycle_element(&mut self, element: ElementId) -> Result<(), HostError> {
        let index = self.index_of(element)?;
        self.check(HostCall::Recycle, index)?;
        self.realized.remove(&index);
        self.pool.push(element);
        self.recording.push(Record::Recycled { element });
        Ok(())
    }

    fn layout_state(&self) -> Option<&LayoutState> {
        self.layout_state.as_ref()
    }

    fn layout_state_mut(&mut self) -> &mut Option<LayoutState> {
        &mut self.layout_state
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn host() -> RecordingHost {
        RecordingHost::new(vec![
            PositionedItem::new(0., 0., 10., 10.),
            PositionedItem::new(20., 0., 10., 10.),
        ])
    }

    #[test]
    fn get_or_create_is_idempotent() {
        let mut host = host();
        let first = host.get_or_create_element_at(1).unwrap();
        let second = host.get_or_create_element_at(1).unwrap();
        assert_eq!(first, second);
        assert_eq!(host.created_count(), 1);

        let recording = host.recording();
        assert_matches!(recording.next(), Some(Record::Created { index: 1, .. }));
        assert_matches!(recording.next(), Some(Record::Fetched { index: 1, .. }));
        assert!(recording.is_empty());
    }

    #[test]
    fn recycled_elements_are_reused() {
        let mut host = host();
        let element = host.get_or_create_element_at(0).unwrap();
        host.recycle_element(element).unwrap();
        assert_eq!(host.pooled_count(), 1);
        assert!(host.realized_indices().is_empty());

        let reused = host.get_or_create_element_at(1).unwrap();
        assert_eq!(reused, element);
        assert_eq!(host.pooled_count(), 0);
        assert_eq!(host.realized_element(1), Some(element));

        let records = host.recording().drain();
        assert_matches!(records.last(), Some(Record::Reused { index: 1, .. }));
    }

    #[test]
    fn recycling_unknown_element_fails() {
        let mut host = host();
        let err = host.recycle_element(ElementId(42)).unwrap_err();
        assert_eq!(err.message(), "ElementId(42) is not realized");
    }

    #[test]
    fn injected_failure_is_reported() {
        let mut host = host();
        host.fail_on_realize(0);
        assert!(host.get_or_create_element_at(0).is_err());
        assert!(host.get_or_create_element_at(1).is_ok());

        host.clear_failures();
        assert!(host.get_or_create_element_at(0).is_ok());
    }

    #[test]
    fn injected_failures_target_one_call_and_index() {
        let mut host = host();
        let first = host.get_or_create_element_at(0).unwrap();
        let second = host.get_or_create_element_at(1).unwrap();
        host.fail_on_measure(0);
        host.fail_on_arrange(1);
        host.fail_on_recycle(0);

        let err = host.measure_element(&first, Size::new(1., 1.)).unwrap_err();
        assert_eq!(err.message(), "failed to measure item 0");
        assert!(host.measure_element(&second, Size::new(1., 1.)).is_ok());

        assert!(host.arrange_element(&first, Point::ORIGIN, Size::ZERO).is_ok());
        let err = host
            .arrange_element(&second, Point::ORIGIN, Size::ZERO)
            .unwrap_err();
        assert_eq!(err.message(), "failed to arrange item 1");

        assert!(host.recycle_element(first).is_err());
        assert_eq!(host.realized_indices(), vec![0, 1]);
        assert!(host.recycle_element(second).is_ok());
    }

    #[test]
    fn cleared_item_has_no_data() {
        let mut host = host();
        host.clear_item(0);
        assert_eq!(host.item_count(), 2);
        assert!(host.item_at_mut(0).is_none());
        assert!(host.item(1).is_some());
    }
}

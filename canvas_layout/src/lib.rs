// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! A virtualizing layout which places items at explicit canvas coordinates.
//!
//! Unlike flow, stack or wrap layouts, a [`CanvasLayout`] does not compute positions:
//! every item already carries its own `left`, `top`, `width` and `height`.
//! What the layout *does* decide is which items currently need a live container.
//! Only items which intersect the host's realization rect (usually the viewport) are
//! realized, and containers of items which scroll away are handed back to the host
//! for recycling.
//!
//! The layout is a pure strategy object.
//! Everything it mutates lives in the [`VirtualizingHost`] it is called with:
//! the items' in-view flags, the host's containers, and the [`LayoutState`] slot.
//! This means a single `CanvasLayout` can be shared between any number of hosts.
//!
//! # Protocol
//!
//! A host drives the layout in this order:
//!
//! 1. [`initialize_for_context`](VirtualizingLayout::initialize_for_context) when it attaches the layout.
//! 2. For every layout cycle, [`measure`](VirtualizingLayout::measure), then [`arrange`](VirtualizingLayout::arrange).
//! 3. [`uninitialize_for_context`](VirtualizingLayout::uninitialize_for_context) when it detaches.
//!
//! ```
//! use canvas_layout::kurbo::{Rect, Size};
//! use canvas_layout::{CanvasLayout, PositionedItem, VirtualizingLayout};
//! use canvas_layout_testing::RecordingHost;
//!
//! let mut host = RecordingHost::new(vec![
//!     PositionedItem::new(0., 0., 100., 100.),
//!     PositionedItem::new(1000., 1000., 50., 50.),
//! ]);
//! host.set_realization_rect(Rect::new(0., 0., 300., 300.));
//!
//! let layout = CanvasLayout::new();
//! layout.initialize_for_context(&mut host);
//! let desired = layout.measure(&mut host, Size::new(300., 300.)).unwrap();
//! assert_eq!(desired, Size::new(1050., 1050.));
//! layout.arrange(&mut host, desired).unwrap();
//! assert_eq!(host.realized_indices(), vec![0]);
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use kurbo;

mod canvas;
mod host;
mod item;
mod layout;
mod state;

pub use canvas::{CanvasLayout, ViewportTest};
pub use host::VirtualizingHost;
pub use item::{Positioned, PositionedItem};
pub use layout::VirtualizingLayout;
pub use state::{LayoutState, LayoutStateId};

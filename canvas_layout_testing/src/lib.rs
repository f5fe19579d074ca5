// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Helpers for testing and demonstrating [`canvas_layout`].
//!
//! The main type is [`RecordingHost`], an in-memory [`VirtualizingHost`] which keeps
//! a pool of fake containers and records every call a layout makes into a [`Recording`].
//!
//! Note: These types are meant to help maintainers of `canvas_layout`, and hosts which
//! want to check their layouts against a reference host. They are not a UI framework.
//!
//! [`VirtualizingHost`]: canvas_layout::VirtualizingHost

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

mod recording_host;
mod tracing_backend;

pub use recording_host::{ElementId, HostError, Record, RecordingHost, Recording};
pub use tracing_backend::{
    TracingSubscriberHasBeenSetError, default_tracing_subscriber, try_init_test_tracing,
    try_init_tracing,
};

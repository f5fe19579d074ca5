// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Scrolls a viewport across a scattered canvas and logs which items get containers.
//!
//! Run with `RUST_LOG=debug` (the default in debug builds) to see every
//! realize and recycle decision.

use std::error::Error;

use canvas_layout::kurbo::{Rect, Size, Vec2};
use canvas_layout::{
    CanvasLayout, PositionedItem, ViewportTest, VirtualizingHost, VirtualizingLayout,
};
use canvas_layout_testing::{RecordingHost, try_init_tracing};

const VIEWPORT_SIZE: Size = Size::new(400., 300.);

/// A loose grid of cards with varying sizes.
fn scattered_cards() -> Vec<PositionedItem> {
    (0..12)
        .flat_map(|row| (0..12).map(move |column| (row, column)))
        .map(|(row, column)| {
            let width = 80. + f64::from((row + column) % 3) * 20.;
            let height = 60. + f64::from((row * column) % 4) * 15.;
            PositionedItem::new(f64::from(column) * 150., f64::from(row) * 130., width, height)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    try_init_tracing()?;

    let layout = CanvasLayout::new().with_viewport_test(ViewportTest::BothAxes);
    let mut host = RecordingHost::new(scattered_cards());
    layout.initialize_for_context(&mut host);

    let step = Vec2::new(120., 90.);
    for frame in 0..10 {
        let origin = (step * f64::from(frame)).to_point();
        host.set_realization_rect(Rect::from_origin_size(origin, VIEWPORT_SIZE));

        let desired = layout.measure(&mut host, VIEWPORT_SIZE)?;
        layout.arrange(&mut host, desired)?;

        let first = host
            .layout_state()
            .and_then(|state| state.first_realized_index());
        tracing::info!(
            frame,
            realized = host.realized_indices().len(),
            pooled = host.pooled_count(),
            created = host.created_count(),
            ?first,
            "Laid out canvas of {}x{}",
            desired.width,
            desired.height,
        );
        host.recording().clear();
    }

    layout.uninitialize_for_context(&mut host);
    Ok(())
}

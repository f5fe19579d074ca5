// Copyright 2025 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

use kurbo::Size;

use crate::{LayoutState, VirtualizingHost};

/// A layout strategy which realizes containers on demand.
///
/// Implementations must not keep mutable per-host state on `self`:
/// anything which has to survive between passes goes in the host's [`LayoutState`].
/// For a single host, [`measure`](Self::measure) always runs before
/// [`arrange`](Self::arrange) within a layout cycle.
pub trait VirtualizingLayout {
    /// Attach the layout to `host`.
    ///
    /// Installs a fresh [`LayoutState`] if the host has none.
    /// An existing state is kept, so calling this twice is a no-op.
    fn initialize_for_context<H: VirtualizingHost>(&self, host: &mut H) {
        let slot = host.layout_state_mut();
        if slot.is_none() {
            let state = LayoutState::new();
            tracing::debug!(state = state.id().to_raw(), "Attached layout to host");
            *slot = Some(state);
        }
    }

    /// Detach the layout from `host`, dropping its [`LayoutState`].
    ///
    /// Disposing of containers is left to the host.
    fn uninitialize_for_context<H: VirtualizingHost>(&self, host: &mut H) {
        if let Some(state) = host.layout_state_mut().take() {
            tracing::debug!(state = state.id().to_raw(), "Detached layout from host");
        }
    }

    /// Compute the desired size of the content, realizing and recycling containers
    /// as items enter and leave the realization rect.
    fn measure<H: VirtualizingHost>(
        &self,
        host: &mut H,
        available_size: Size,
    ) -> Result<Size, H::Error>;

    /// Place every realized container and return the size actually used.
    fn arrange<H: VirtualizingHost>(&self, host: &mut H, final_size: Size)
    -> Result<Size, H::Error>;
}

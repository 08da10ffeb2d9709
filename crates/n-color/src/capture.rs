// SPDX-License-Identifier: MIT
//
// Mouse capture — an exclusive token for "who owns the pointer right now".
//
// The application owns exactly one `CaptureSlot`. An interactive region
// (the gradient grid, or one of the sliders) acquires it on a press and
// keeps receiving drag events until it releases the slot. While held, no
// other region may acquire it. There is no timeout: release (or an
// explicit `revoke`) is the only way out.

use crate::state::Channel;

/// A region that can hold the pointer capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureOwner {
    /// The saturation/value gradient.
    Grid,
    /// The slider bound to a channel.
    Slider(Channel),
}

/// The single capture slot shared by every interactive region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureSlot {
    holder: Option<CaptureOwner>,
}

impl CaptureSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self { holder: None }
    }

    /// Current holder, if any.
    #[inline]
    #[must_use]
    pub const fn holder(&self) -> Option<CaptureOwner> {
        self.holder
    }

    #[inline]
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.holder.is_none()
    }

    #[inline]
    #[must_use]
    pub fn is_held_by(&self, owner: CaptureOwner) -> bool {
        self.holder == Some(owner)
    }

    /// Take the slot if it is free. Returns whether `owner` now holds it.
    ///
    /// Re-acquiring a slot you already hold succeeds without change.
    pub fn try_acquire(&mut self, owner: CaptureOwner) -> bool {
        match self.holder {
            None => {
                log::debug!("pointer captured by {owner:?}");
                self.holder = Some(owner);
                true
            }
            Some(current) => current == owner,
        }
    }

    /// Give the slot back. Only the current holder can release it.
    pub fn release(&mut self, owner: CaptureOwner) -> bool {
        if self.is_held_by(owner) {
            log::debug!("pointer released by {owner:?}");
            self.holder = None;
            true
        } else {
            false
        }
    }

    /// Forcibly clear the slot regardless of holder.
    pub fn revoke(&mut self) -> Option<CaptureOwner> {
        let previous = self.holder.take();
        if let Some(owner) = previous {
            log::debug!("pointer capture revoked from {owner:?}");
        }
        previous
    }
}

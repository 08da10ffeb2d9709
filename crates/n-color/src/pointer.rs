// SPDX-License-Identifier: MIT
//
// PointerController — drag the gradient grid with the mouse.
//
// Two states:
//
//   Idle ──(left press inside area, slot free)──▶ Captured
//   Captured ──(press / drag / move anywhere)──▶ Captured, writes s and v
//   Captured ──(any release, or slot revoked)──▶ Idle
//
// The controller only writes saturation and value into `ColorState`; the
// caller is expected to wrap the call in a reconciliation cycle so RGB
// follows.

use crate::area::GridArea;
use crate::capture::{CaptureOwner, CaptureSlot};
use crate::state::ColorState;

/// Mouse button that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press(PointerButton),
    Release,
    Drag(PointerButton),
    Move,
}

/// A pointer event in 0-indexed screen cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: u16,
    pub y: u16,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Captured,
}

/// Result of handing an event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerResponse {
    /// Not for the grid; let other regions look at it.
    Ignored,
    /// Handled by the grid.
    Consumed,
    /// Handled, and capture was just acquired: the grid wants focus.
    Acquired,
}

impl PointerResponse {
    #[inline]
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    #[inline]
    #[must_use]
    pub const fn wants_focus(self) -> bool {
        matches!(self, Self::Acquired)
    }
}

/// Map a pointer position onto `(saturation, value)` for an area.
///
/// Returns `None` when the area has zero width or height.
#[must_use]
pub fn map_to_sv(x: u16, y: u16, area: GridArea) -> Option<(i32, i32)> {
    let span_x = area.span_x();
    let span_y = area.span_y();
    if span_x == 0 || span_y == 0 {
        return None;
    }
    let v = ((i32::from(x) - area.x_min) * 255 / span_x).clamp(0, 255);
    let s = ((i32::from(y) - area.y_min) * 255 / span_y).clamp(0, 255);
    Some((s, v))
}

/// The grid's half of the pointer protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerController {
    state: CaptureState,
}

impl PointerController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: CaptureState::Idle,
        }
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> CaptureState {
        self.state
    }

    #[inline]
    #[must_use]
    pub const fn is_captured(&self) -> bool {
        matches!(self.state, CaptureState::Captured)
    }

    /// Feed one pointer event.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        area: GridArea,
        slot: &mut CaptureSlot,
        color: &mut ColorState,
    ) -> PointerResponse {
        // Someone else cleared or took the slot since the last event.
        if self.is_captured() && !slot.is_held_by(CaptureOwner::Grid) {
            log::debug!("grid capture lost to {:?}", slot.holder());
            self.state = CaptureState::Idle;
        }

        if event.kind == PointerKind::Release {
            if self.is_captured() {
                slot.release(CaptureOwner::Grid);
                self.state = CaptureState::Idle;
                return PointerResponse::Consumed;
            }
            return PointerResponse::Ignored;
        }

        let mut acquired = false;
        if !self.is_captured()
            && event.kind == PointerKind::Press(PointerButton::Left)
            && area.contains(event.x, event.y)
            && slot.try_acquire(CaptureOwner::Grid)
        {
            self.state = CaptureState::Captured;
            acquired = true;
        }

        if !self.is_captured() {
            return PointerResponse::Ignored;
        }

        if let Some((s, v)) = map_to_sv(event.x, event.y, area) {
            color.set_saturation_value(s, v);
        }

        if acquired {
            PointerResponse::Acquired
        } else {
            PointerResponse::Consumed
        }
    }
}

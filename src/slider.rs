// SPDX-License-Identifier: MIT
//
// Slider — one labelled gauge bound to a color channel.
//
//   Hue:        ██████████████████──────────────────────
//   └── label ─┘└──────────────── bar ─────────────────┘
//
// The bar spans 0..=255. A left press on the bar takes the shared capture
// slot and jumps the value under the pointer; drags keep writing while the
// slot is held, and any release lets go. The slider never reconciles: the
// caller runs it inside a `ColorState::cycle`, so the other family follows.

use n_color::{CaptureOwner, CaptureSlot, Channel, ColorState};
use n_color::{PointerButton, PointerEvent, PointerKind, PointerResponse};
use n_term::buffer::{ClipRect, FrameBuffer};
use n_term::cell::Attr;
use n_term::color::CellColor;

/// Columns taken by `"Saturation: "`, the longest label.
pub const LABEL_WIDTH: u16 = 12;

const FILLED: char = '█';
const EMPTY: char = '─';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    channel: Channel,
    /// Where the bar was last painted. `None` until the first frame.
    bar: Option<ClipRect>,
}

impl Slider {
    #[must_use]
    pub const fn new(channel: Channel) -> Self {
        Self { channel, bar: None }
    }

    #[inline]
    #[must_use]
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    #[inline]
    #[must_use]
    pub const fn bar(&self) -> Option<ClipRect> {
        self.bar
    }

    const fn owner(&self) -> CaptureOwner {
        CaptureOwner::Slider(self.channel)
    }

    /// `"Hue:"` padded to [`LABEL_WIDTH`].
    #[must_use]
    pub fn label(&self) -> String {
        let name = format!("{}:", self.channel.name());
        format!("{name:<width$}", width = LABEL_WIDTH as usize)
    }

    /// Value under column `x` of `bar`, or `None` for a bar too narrow to
    /// have a range.
    #[must_use]
    pub fn value_at(bar: ClipRect, x: u16) -> Option<i32> {
        let span = i32::from(bar.width) - 1;
        if span <= 0 {
            return None;
        }
        Some(((i32::from(x) - bar.x) * 255 / span).clamp(0, 255))
    }

    /// Number of filled cells for `value` in a bar `width` wide.
    #[must_use]
    pub fn filled_cells(value: i32, width: u16) -> u16 {
        let filled = value.clamp(0, 255) * i32::from(width) / 255;
        u16::try_from(filled).unwrap_or(width)
    }

    /// Feed one pointer event. Mirrors the grid's capture protocol.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        slot: &mut CaptureSlot,
        color: &mut ColorState,
    ) -> PointerResponse {
        let owner = self.owner();

        if event.kind == PointerKind::Release {
            return if slot.release(owner) {
                PointerResponse::Consumed
            } else {
                PointerResponse::Ignored
            };
        }

        let Some(bar) = self.bar() else {
            return PointerResponse::Ignored;
        };

        let mut acquired = false;
        if !slot.is_held_by(owner)
            && event.kind == PointerKind::Press(PointerButton::Left)
            && bar.contains(event.x, event.y)
        {
            acquired = slot.try_acquire(owner);
        }

        if !slot.is_held_by(owner) {
            return PointerResponse::Ignored;
        }

        if let Some(value) = Self::value_at(bar, event.x) {
            color.set(self.channel, value);
        }

        if acquired {
            log::debug!("{} slider captured the pointer", self.channel);
            PointerResponse::Acquired
        } else {
            PointerResponse::Consumed
        }
    }

    /// Paint label and bar into `[x, x + width)` on row `y` and remember
    /// the bar's rectangle for hit testing.
    pub fn paint(
        &mut self,
        buf: &mut FrameBuffer,
        x: u16,
        y: u16,
        width: u16,
        color: &ColorState,
        focused: bool,
    ) {
        let (label_fg, label_attrs) = if focused {
            (CellColor::Default, Attr::BOLD)
        } else {
            (CellColor::Default, Attr::empty())
        };
        let clip = ClipRect::from_unsigned(x, y, width, 1);
        buf.paint_text(
            x,
            y,
            &self.label(),
            label_fg,
            CellColor::Default,
            label_attrs,
            Some(&clip),
        );

        let bar_width = width.saturating_sub(LABEL_WIDTH);
        if bar_width == 0 {
            self.bar = None;
            return;
        }
        let bar_x = x + LABEL_WIDTH;
        let bar = ClipRect::from_unsigned(bar_x, y, bar_width, 1);
        self.bar = Some(bar);

        let fill_fg = if focused {
            CellColor::WHITE
        } else {
            CellColor::GRAY
        };
        let filled = Self::filled_cells(color.get(self.channel), bar_width);
        for i in 0..bar_width {
            let (ch, fg) = if i < filled {
                (FILLED, fill_fg)
            } else {
                (EMPTY, CellColor::GRAY)
            };
            buf.paint_cell(bar_x + i, y, ch, fg, CellColor::Default, Attr::empty(), None);
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use n_color::Rgb;
    use pretty_assertions::assert_eq;

    const LEFT: PointerKind = PointerKind::Press(PointerButton::Left);
    const DRAG: PointerKind = PointerKind::Drag(PointerButton::Left);

    /// A Red slider painted at (0, 0) with a 256-column bar, so column
    /// `LABEL_WIDTH + n` maps to value `n`.
    fn painted(channel: Channel) -> (Slider, ColorState) {
        let mut slider = Slider::new(channel);
        let color = ColorState::default();
        let mut buf = FrameBuffer::new(LABEL_WIDTH + 256, 1);
        slider.paint(&mut buf, 0, 0, LABEL_WIDTH + 256, &color, false);
        (slider, color)
    }

    fn send(
        slider: &mut Slider,
        slot: &mut CaptureSlot,
        color: &mut ColorState,
        kind: PointerKind,
        x: u16,
    ) -> PointerResponse {
        color.cycle(|c| slider.handle_pointer(PointerEvent::new(kind, x, 0), slot, c))
    }

    #[test]
    fn labels_are_padded() {
        assert_eq!(Slider::new(Channel::Hue).label(), "Hue:        ");
        assert_eq!(Slider::new(Channel::Saturation).label(), "Saturation: ");
        assert_eq!(Slider::new(Channel::Blue).label().len(), LABEL_WIDTH as usize);
    }

    #[test]
    fn value_mapping() {
        let bar = ClipRect::from_unsigned(10, 0, 256, 1);
        assert_eq!(Slider::value_at(bar, 10), Some(0));
        assert_eq!(Slider::value_at(bar, 138), Some(128));
        assert_eq!(Slider::value_at(bar, 265), Some(255));
        assert_eq!(Slider::value_at(bar, 0), Some(0));
        assert_eq!(Slider::value_at(bar, 400), Some(255));
        assert_eq!(Slider::value_at(ClipRect::from_unsigned(0, 0, 1, 1), 0), None);
    }

    #[test]
    fn filled_cells_scale() {
        assert_eq!(Slider::filled_cells(0, 40), 0);
        assert_eq!(Slider::filled_cells(255, 40), 40);
        assert_eq!(Slider::filled_cells(128, 40), 20);
        assert_eq!(Slider::filled_cells(300, 40), 40);
    }

    #[test]
    fn unpainted_slider_ignores_presses() {
        let mut slider = Slider::new(Channel::Red);
        let mut slot = CaptureSlot::new();
        let mut color = ColorState::default();
        assert_eq!(
            send(&mut slider, &mut slot, &mut color, LEFT, 20),
            PointerResponse::Ignored
        );
        assert!(slot.is_free());
    }

    #[test]
    fn press_drag_release() {
        let (mut slider, mut color) = painted(Channel::Green);
        let mut slot = CaptureSlot::new();

        let r = send(&mut slider, &mut slot, &mut color, LEFT, LABEL_WIDTH + 100);
        assert_eq!(r, PointerResponse::Acquired);
        assert!(slot.is_held_by(CaptureOwner::Slider(Channel::Green)));
        assert_eq!(color.rgb(), Rgb::new(255, 100, 0));

        // Dragging off the bar keeps writing, clamped.
        let r = send(&mut slider, &mut slot, &mut color, DRAG, 0);
        assert_eq!(r, PointerResponse::Consumed);
        assert_eq!(color.get(Channel::Green), 0);

        let r = send(&mut slider, &mut slot, &mut color, PointerKind::Release, 3);
        assert_eq!(r, PointerResponse::Consumed);
        assert!(slot.is_free());

        let r = send(&mut slider, &mut slot, &mut color, DRAG, LABEL_WIDTH + 50);
        assert_eq!(r, PointerResponse::Ignored);
        assert_eq!(color.get(Channel::Green), 0);
    }

    #[test]
    fn press_on_label_is_ignored() {
        let (mut slider, mut color) = painted(Channel::Red);
        let mut slot = CaptureSlot::new();
        assert_eq!(
            send(&mut slider, &mut slot, &mut color, LEFT, 2),
            PointerResponse::Ignored
        );
        assert_eq!(color, ColorState::default());
    }

    #[test]
    fn busy_slot_blocks_capture() {
        let (mut slider, mut color) = painted(Channel::Red);
        let mut slot = CaptureSlot::new();
        assert!(slot.try_acquire(CaptureOwner::Grid));
        assert_eq!(
            send(&mut slider, &mut slot, &mut color, LEFT, LABEL_WIDTH + 10),
            PointerResponse::Ignored
        );
        // Someone else's release is not ours to consume.
        assert_eq!(
            send(&mut slider, &mut slot, &mut color, PointerKind::Release, 0),
            PointerResponse::Ignored
        );
        assert!(slot.is_held_by(CaptureOwner::Grid));
    }

    #[test]
    fn hsv_slider_drives_rgb() {
        let (mut slider, mut color) = painted(Channel::Value);
        let mut slot = CaptureSlot::new();
        send(&mut slider, &mut slot, &mut color, LEFT, LABEL_WIDTH);
        assert_eq!(color.get(Channel::Value), 0);
        assert_eq!(color.rgb(), Rgb::BLACK);
    }

    #[test]
    fn paint_draws_label_and_bar() {
        let mut slider = Slider::new(Channel::Hue);
        let color = ColorState::default();
        let mut buf = FrameBuffer::new(32, 1);
        slider.paint(&mut buf, 0, 0, 32, &color, true);
        // Red has hue 0: nothing filled.
        assert_eq!(buf.row_text(0), format!("Hue:        {}", "─".repeat(20)));
        assert_eq!(slider.bar(), Some(ClipRect::from_unsigned(12, 0, 20, 1)));
        assert!(buf.get(0, 0).unwrap().attrs.contains(Attr::BOLD));
    }

    #[test]
    fn paint_full_bar() {
        let mut slider = Slider::new(Channel::Red);
        let color = ColorState::default();
        let mut buf = FrameBuffer::new(20, 1);
        slider.paint(&mut buf, 0, 0, 20, &color, false);
        assert_eq!(buf.row_text(0), format!("Red:        {}", "█".repeat(8)));
    }

    #[test]
    fn too_narrow_has_no_bar() {
        let mut slider = Slider::new(Channel::Red);
        let mut buf = FrameBuffer::new(10, 1);
        slider.paint(&mut buf, 0, 0, 10, &ColorState::default(), false);
        assert_eq!(slider.bar(), None);
    }
}

// SPDX-License-Identifier: MIT
//
// ColorState — the one mutable source of truth for the picked color.
//
// Both views of the color are stored: an RGB triple and an HSV triple, each
// directly bindable by a slider. They are kept consistent by a per-event
// reconciliation cycle:
//
//   snapshot → delegate the event → diff against the snapshot →
//   push the conversion from whichever family changed → clamp everything
//
// HSV is checked first. Within one cycle only one family is ever treated
// as authoritative, so the two views cannot fight each other, and the
// family that was just edited keeps its exact values (a hue drag never
// nudges saturation or value through a lossy round trip).
//
// Fields are `i32` on purpose: pointer math and slider steps may land
// outside 0–255, and the cycle's final clamp is what brings them back.

use std::fmt;

use crate::math::{Hsv, Rgb, hsv_to_rgb, rgb_to_hsv};

// ─── Channel ─────────────────────────────────────────────────────────────────

/// One of the six editable integer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Hue,
    Saturation,
    Value,
    Red,
    Green,
    Blue,
}

/// Which representation a channel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Rgb,
    Hsv,
}

impl Channel {
    /// Slider order: the HSV family first, then RGB.
    pub const ALL: [Self; 6] = [
        Self::Hue,
        Self::Saturation,
        Self::Value,
        Self::Red,
        Self::Green,
        Self::Blue,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
            Self::Value => "Value",
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
        }
    }

    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Self::Hue | Self::Saturation | Self::Value => Family::Hsv,
            Self::Red | Self::Green | Self::Blue => Family::Rgb,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Hue => 3,
            Self::Saturation => 4,
            Self::Value => 5,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// All six fields captured before an event is delegated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    fields: [i32; 6],
}

impl Snapshot {
    fn changed(&self, now: &[i32; 6], family: Family) -> bool {
        let range = match family {
            Family::Rgb => 0..3,
            Family::Hsv => 3..6,
        };
        self.fields[range.clone()] != now[range]
    }
}

// ─── ColorState ──────────────────────────────────────────────────────────────

/// Reconciled RGB + HSV storage.
///
/// Mutate through [`set`](Self::set) (slider path) or
/// [`set_saturation_value`](Self::set_saturation_value) (pointer fast path),
/// always inside [`cycle`](Self::cycle) or between a
/// [`snapshot`](Self::snapshot) / [`reconcile`](Self::reconcile) pair.
#[derive(Clone, PartialEq, Eq)]
pub struct ColorState {
    /// `[r, g, b, h, s, v]`, indexed by [`Channel::slot`].
    fields: [i32; 6],
}

/// Clamp into the 8-bit range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn to_u8(x: i32) -> u8 {
    if x < 0 {
        0
    } else if x > 255 {
        255
    } else {
        x as u8
    }
}

impl ColorState {
    /// Create a state from an RGB color, deriving its HSV view.
    #[must_use]
    pub fn new(rgb: Rgb) -> Self {
        let hsv = rgb_to_hsv(rgb);
        Self {
            fields: [
                i32::from(rgb.r),
                i32::from(rgb.g),
                i32::from(rgb.b),
                i32::from(hsv.h),
                i32::from(hsv.s),
                i32::from(hsv.v),
            ],
        }
    }

    /// Raw value of one field (may be out of range mid-cycle).
    #[inline]
    #[must_use]
    pub const fn get(&self, channel: Channel) -> i32 {
        self.fields[channel.slot()]
    }

    /// Write one field. Out-of-range values are accepted and clamped at the
    /// end of the cycle.
    #[inline]
    pub const fn set(&mut self, channel: Channel, value: i32) {
        self.fields[channel.slot()] = value;
    }

    /// Add `delta` to one field.
    #[inline]
    pub const fn nudge(&mut self, channel: Channel, delta: i32) {
        self.fields[channel.slot()] += delta;
    }

    /// Pointer fast path: write saturation and value together.
    #[inline]
    pub const fn set_saturation_value(&mut self, s: i32, v: i32) {
        self.fields[Channel::Saturation.slot()] = s;
        self.fields[Channel::Value.slot()] = v;
    }

    /// The RGB view, clamped.
    #[must_use]
    pub const fn rgb(&self) -> Rgb {
        Rgb::new(
            to_u8(self.fields[0]),
            to_u8(self.fields[1]),
            to_u8(self.fields[2]),
        )
    }

    /// The HSV view, clamped.
    #[must_use]
    pub const fn hsv(&self) -> Hsv {
        Hsv::new(
            to_u8(self.fields[3]),
            to_u8(self.fields[4]),
            to_u8(self.fields[5]),
        )
    }

    /// Capture all six fields before delegating an event.
    #[must_use]
    pub const fn snapshot(&self) -> Snapshot {
        Snapshot { fields: self.fields }
    }

    /// Finish a cycle started with [`snapshot`](Self::snapshot).
    ///
    /// Returns the family that was treated as authoritative, or `None` when
    /// nothing changed. Clamping happens either way.
    pub fn reconcile(&mut self, before: Snapshot) -> Option<Family> {
        let source = if before.changed(&self.fields, Family::Hsv) {
            let rgb = hsv_to_rgb(self.hsv());
            self.fields[0] = i32::from(rgb.r);
            self.fields[1] = i32::from(rgb.g);
            self.fields[2] = i32::from(rgb.b);
            Some(Family::Hsv)
        } else if before.changed(&self.fields, Family::Rgb) {
            let hsv = rgb_to_hsv(self.rgb());
            self.fields[3] = i32::from(hsv.h);
            self.fields[4] = i32::from(hsv.s);
            self.fields[5] = i32::from(hsv.v);
            Some(Family::Rgb)
        } else {
            None
        };

        for field in &mut self.fields {
            *field = (*field).clamp(0, 255);
        }

        if let Some(family) = source {
            log::trace!("reconciled from {family:?}: {:?} {:?}", self.rgb(), self.hsv());
        }
        source
    }

    /// Run one mutation cycle: snapshot, apply `f`, reconcile.
    pub fn cycle<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let before = self.snapshot();
        let out = f(self);
        self.reconcile(before);
        out
    }
}

impl Default for ColorState {
    fn default() -> Self {
        Self::new(Rgb::RED)
    }
}

impl fmt::Debug for ColorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, h, s, v] = self.fields;
        write!(f, "ColorState(rgb=({r}, {g}, {b}), hsv=({h}, {s}, {v}))")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

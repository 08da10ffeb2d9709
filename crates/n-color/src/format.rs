// SPDX-License-Identifier: MIT
//
// Textual encodings of the current color.
//
// Presentation only: each function is a pure view of an RGB or HSV triple.
// `hsl()` and `hwb()` are built from the engine's HSV channels, so the
// "lightness" slot carries value.

use std::fmt;

use crate::math::{Hsv, Rgb};

/// Hue on the 0–255 scale expressed in whole degrees (truncated).
#[allow(clippy::cast_possible_truncation)]
fn degrees(h: u8) -> i32 {
    (f64::from(h) * 360.0 / 255.0) as i32
}

/// A 0–255 channel expressed as a whole percentage (truncated).
#[allow(clippy::cast_possible_truncation)]
fn percent(x: u8) -> i32 {
    (f64::from(x) * 100.0 / 255.0) as i32
}

/// `#RRGGBB` with uppercase digits.
#[must_use]
pub fn hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// `rgb(R, G, B)`.
#[must_use]
pub fn rgb_fn(rgb: Rgb) -> String {
    format!("rgb({}, {}, {})", rgb.r, rgb.g, rgb.b)
}

/// `hsl(H, S%, V%)` — hue in degrees, saturation and value in percent.
#[must_use]
pub fn hsl_fn(hsv: Hsv) -> String {
    format!("hsl({}, {}%, {}%)", degrees(hsv.h), percent(hsv.s), percent(hsv.v))
}

/// `hwb(H, W%, B%)` with whiteness `(255 - s) * v / 255` and blackness `255 - v`.
#[must_use]
pub fn hwb_fn(hsv: Hsv) -> String {
    let white = (255 - u16::from(hsv.s)) * u16::from(hsv.v) / 255;
    let black = 255 - hsv.v;
    // white ≤ 255 because both factors are ≤ 255.
    #[allow(clippy::cast_possible_truncation)]
    let white = white as u8;
    format!("hwb({}, {}%, {}%)", degrees(hsv.h), percent(white), percent(black))
}

/// `cmyk(C%, M%, Y%, K%)`.
///
/// Arithmetic runs in f64 but every stored ratio is narrowed to f32, so the
/// truncated percentages land where the picker has always put them
/// (`rgb(0, 1, 2)` is `cmyk(100%, 49%, 0%, 99%)`, not 50%).
///
/// Black has no defined ink ratios and takes the dedicated
/// `cmyk(0%, 0%, 0%, 100%)` branch.
#[must_use]
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
pub fn cmyk_fn(rgb: Rgb) -> String {
    let unit = |channel: u8| (f64::from(channel) / 255.0) as f32;
    let (rf, gf, bf) = (unit(rgb.r), unit(rgb.g), unit(rgb.b));

    let k = (1.0 - f64::from(rf.max(gf).max(bf))) as f32;
    if k == 1.0 {
        return String::from("cmyk(0%, 0%, 0%, 100%)");
    }

    let pct = |ratio: f32| (f64::from(ratio) * 100.0) as i32;
    let ink = |channel: f32| {
        let k = f64::from(k);
        pct(((1.0 - f64::from(channel) - k) / (1.0 - k)) as f32)
    };
    format!(
        "cmyk({}%, {}%, {}%, {}%)",
        ink(rf),
        ink(gf),
        ink(bf),
        pct(k),
    )
}

/// Channels right-aligned for the status readout: `255 ,   0 ,   0 `.
#[must_use]
pub fn rgb_label(rgb: Rgb) -> String {
    format!("{:3} , {:3} , {:3} ", rgb.r, rgb.g, rgb.b)
}

/// Degrees and percentages right-aligned: `  0°, 100%, 100%`.
#[must_use]
pub fn hsv_label(hsv: Hsv) -> String {
    format!(
        "{:3}°, {:3}%, {:3}%",
        degrees(hsv.h),
        percent(hsv.s),
        percent(hsv.v)
    )
}

// ─── Encoding ────────────────────────────────────────────────────────────────

/// One of the copyable text encodings, in the order the copy buttons show them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Hex,
    Rgb,
    Hsl,
    Hwb,
    Cmyk,
}

impl Encoding {
    pub const ALL: [Self; 5] = [Self::Hex, Self::Rgb, Self::Hsl, Self::Hwb, Self::Cmyk];

    /// Short lowercase name (`"hex"`, `"rgb"`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
            Self::Hwb => "hwb",
            Self::Cmyk => "cmyk",
        }
    }

    /// Encode a color. Hex, `rgb()` and `cmyk()` read the RGB view; `hsl()`
    /// and `hwb()` read the HSV view.
    #[must_use]
    pub fn encode(self, rgb: Rgb, hsv: Hsv) -> String {
        match self {
            Self::Hex => hex(rgb),
            Self::Rgb => rgb_fn(rgb),
            Self::Hsl => hsl_fn(hsv),
            Self::Hwb => hwb_fn(hsv),
            Self::Cmyk => cmyk_fn(rgb),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

// SPDX-License-Identifier: MIT
//
// Integer RGB ↔ HSV engine.
//
// Every channel, hue included, lives on a 0–255 scale. The conversions are
// the classic 8-bit fixed-point approximation used by LED firmware and
// terminal toolkits. They are lossy and NOT exact sRGB/HSV; the gradient
// grid and the sliders rely on these exact numbers to agree with each other.
//
// Two quirks are part of the contract:
//
//   - The forward conversion spaces its three sectors 85 apart (0, 85, 171)
//     but interpolates with a half-width of 43. The inverse slices the hue
//     circle into six regions of width 43. The two granularities disagree,
//     so a round trip drifts by a few units in some sectors.
//
//   - A red-max color whose blue exceeds its green produces a negative hue.
//     That hue wraps modulo 256 into the top of the circle (magenta side).
//
// Single-letter channel names are the standard notation here.
#![allow(clippy::many_single_char_names)]

use std::fmt;

/// Hue offset of the green-max sector in the forward conversion.
const GREEN_SECTOR: i32 = 85;
/// Hue offset of the blue-max sector in the forward conversion.
const BLUE_SECTOR: i32 = 171;
/// Hue span of one interpolation half-step (forward) and one region (inverse).
const HALF_SECTOR: i32 = 43;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An 8-bit RGB triple.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

// ─── Hsv ─────────────────────────────────────────────────────────────────────

/// An 8-bit HSV triple. Hue runs 0–255 around the full circle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    #[inline]
    #[must_use]
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

impl fmt::Debug for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hsv({}, {}, {})", self.h, self.s, self.v)
    }
}

// ─── Conversions ─────────────────────────────────────────────────────────────

/// RGB → HSV using the 85-spaced, 43-wide sector scheme.
///
/// Degenerate inputs are explicit branches: black yields `(0, 0, 0)` and any
/// gray yields `(0, 0, v)`.
#[must_use]
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = i32::from(rgb.r);
    let g = i32::from(rgb.g);
    let b = i32::from(rgb.b);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    // v == max, which already fits in a u8.
    let v = rgb.r.max(rgb.g).max(rgb.b);
    if v == 0 {
        return Hsv::new(0, 0, 0);
    }

    let delta = max - min;
    let s = 255 * delta / max;
    if s == 0 {
        return Hsv::new(0, 0, v);
    }

    // Integer division truncates toward zero, so the red sector can go
    // negative when blue > green.
    let h = if max == r {
        HALF_SECTOR * (g - b) / delta
    } else if max == g {
        GREEN_SECTOR + HALF_SECTOR * (b - r) / delta
    } else {
        BLUE_SECTOR + HALF_SECTOR * (r - g) / delta
    };

    // Safe casts: rem_euclid(256) is in 0..=255 and s ≤ 255 since delta ≤ max.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Hsv::new(h.rem_euclid(256) as u8, s as u8, v)
}

/// HSV → RGB using six regions of width 43 and `>> 8` fixed-point blends.
///
/// Intermediate products fit in `u16`; every blend result is truncated to
/// 8 bits exactly like the reference firmware arithmetic.
#[must_use]
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let Hsv { h, s, v } = hsv;
    if s == 0 {
        return Rgb::new(v, v, v);
    }

    // 255 / 43 == 5, so region is always 0..=5.
    let region = h / 43;
    let remainder = (h - region * 43).wrapping_mul(6);

    let s16 = u16::from(s);
    let v16 = u16::from(v);
    let rem16 = u16::from(remainder);

    #[allow(clippy::cast_possible_truncation)]
    let p = ((v16 * (255 - s16)) >> 8) as u8;
    #[allow(clippy::cast_possible_truncation)]
    let q = ((v16 * (255 - ((s16 * rem16) >> 8))) >> 8) as u8;
    #[allow(clippy::cast_possible_truncation)]
    let t = ((v16 * (255 - ((s16 * (255 - rem16)) >> 8))) >> 8) as u8;

    match region {
        0 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Worst round-trip drift this arithmetic produces over the whole cube.
    /// Reached at `Rgb(0, 237, 11)`, where the 85-vs-43 sector mismatch peaks.
    const ROUND_TRIP_BOUND: u8 = 11;

    /// Largest per-channel distance between two colors.
    fn deviation(a: Rgb, b: Rgb) -> u8 {
        a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
    }

    fn round_trip(rgb: Rgb) -> Rgb {
        hsv_to_rgb(rgb_to_hsv(rgb))
    }

    // ── Forward ──────────────────────────────────────────────────────────

    #[test]
    fn primaries_to_hsv() {
        assert_eq!(rgb_to_hsv(Rgb::new(255, 0, 0)), Hsv::new(0, 255, 255));
        assert_eq!(rgb_to_hsv(Rgb::new(0, 255, 0)), Hsv::new(85, 255, 255));
        assert_eq!(rgb_to_hsv(Rgb::new(0, 0, 255)), Hsv::new(171, 255, 255));
    }

    #[test]
    fn secondaries_to_hsv() {
        assert_eq!(rgb_to_hsv(Rgb::new(255, 255, 0)), Hsv::new(43, 255, 255));
        assert_eq!(rgb_to_hsv(Rgb::new(0, 255, 255)), Hsv::new(128, 255, 255));
    }

    #[test]
    fn black_is_degenerate() {
        assert_eq!(rgb_to_hsv(Rgb::BLACK), Hsv::new(0, 0, 0));
    }

    #[test]
    fn negative_red_sector_hue_wraps() {
        // 43 * (0 - 255) / 255 = -43 → 213.
        assert_eq!(rgb_to_hsv(Rgb::new(255, 0, 255)), Hsv::new(213, 255, 255));
        assert_eq!(rgb_to_hsv(Rgb::new(255, 0, 128)).h, 235);
    }

    #[test]
    fn mid_tones_to_hsv() {
        assert_eq!(rgb_to_hsv(Rgb::new(18, 52, 86)), Hsv::new(150, 201, 86));
        assert_eq!(rgb_to_hsv(Rgb::new(200, 100, 50)), Hsv::new(14, 191, 200));
    }

    // ── Inverse ──────────────────────────────────────────────────────────

    #[test]
    fn zero_saturation_is_gray() {
        assert_eq!(hsv_to_rgb(Hsv::new(77, 0, 140)), Rgb::new(140, 140, 140));
    }

    #[test]
    fn region_boundaries() {
        assert_eq!(hsv_to_rgb(Hsv::new(0, 255, 255)), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(42, 255, 255)), Rgb::new(255, 252, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(43, 255, 255)), Rgb::new(254, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(255, 255, 255)), Rgb::new(255, 0, 15));
    }

    #[test]
    fn fixed_point_blend() {
        assert_eq!(hsv_to_rgb(Hsv::new(128, 128, 200)), Rgb::new(99, 200, 198));
    }

    #[test]
    fn every_hue_is_defined() {
        for h in 0..=255u8 {
            let rgb = hsv_to_rgb(Hsv::new(h, 255, 255));
            // Full saturation and value always pin one channel to 255.
            assert!(rgb.r == 255 || rgb.g == 255 || rgb.b == 255, "h={h}: {rgb:?}");
        }
    }

    // ── Round trip ───────────────────────────────────────────────────────

    #[test]
    fn green_drifts_by_three() {
        // Forward puts pure green at 85, the inverse reads 85 as region 1.
        let back = round_trip(Rgb::new(0, 255, 0));
        assert_eq!(back, Rgb::new(3, 255, 0));
    }

    #[test]
    fn achromatic_round_trip_is_exact() {
        for level in 0..=255u8 {
            let gray = Rgb::new(level, level, level);
            let hsv = rgb_to_hsv(gray);
            assert_eq!(hsv.h, 0);
            assert_eq!(hsv.s, 0);
            assert_eq!(hsv.v, level);
            assert_eq!(hsv_to_rgb(hsv), gray);
        }
    }

    #[test]
    fn round_trip_deviation_is_bounded() {
        let mut worst = 0;
        for r in 0..=255u8 {
            for g in 0..=255u8 {
                for b in 0..=255u8 {
                    let rgb = Rgb::new(r, g, b);
                    worst = worst.max(deviation(rgb, round_trip(rgb)));
                }
            }
        }
        assert_eq!(worst, ROUND_TRIP_BOUND);
    }

    #[test]
    fn worst_case_color() {
        let rgb = Rgb::new(0, 237, 11);
        let hsv = rgb_to_hsv(rgb);
        assert_eq!(hsv, Hsv::new(86, 255, 237));
        assert_eq!(deviation(rgb, hsv_to_rgb(hsv)), ROUND_TRIP_BOUND);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Rgb::new(1, 2, 3)), "Rgb(1, 2, 3)");
        assert_eq!(format!("{:?}", Hsv::new(4, 5, 6)), "Hsv(4, 5, 6)");
    }
}

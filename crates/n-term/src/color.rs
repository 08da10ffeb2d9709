// SPDX-License-Identifier: MIT
//
// n-term cell colors.
//
// The picker paints exact 8-bit channels computed by its own integer color
// engine, so the terminal layer does no color math of its own: a cell
// color is either a 24-bit triple sent verbatim as `TrueColor`, a palette
// index for UI chrome, or the terminal's default.
//
// The one piece of color reasoning that lives here is contrast: picking
// black or white text that stays readable on top of an arbitrary
// background (labels drawn over the color tile, focused buttons).

use std::fmt;

// ─── CellColor ───────────────────────────────────────────────────────────────

/// Compact color for terminal cell storage.
///
/// This is what gets written to the [`FrameBuffer`](crate::buffer::FrameBuffer)
/// and converted to ANSI escape sequences. Small and cheap to compare, which
/// is what the diff renderer's hot loop wants.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// ANSI 256-color palette index. 0–15 are the terminal's themed colors.
    Ansi256(u8),

    /// Terminal default color (inherits from terminal settings).
    #[default]
    Default,
}

impl CellColor {
    pub const BLACK: Self = Self::Rgb(0, 0, 0);
    pub const WHITE: Self = Self::Rgb(255, 255, 255);

    /// Themed bright black; used for de-emphasized chrome.
    pub const GRAY: Self = Self::Ansi256(8);

    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// The RGB triple for `Rgb` colors, `None` otherwise.
    #[inline]
    #[must_use]
    pub const fn rgb(self) -> Option<(u8, u8, u8)> {
        match self {
            Self::Rgb(r, g, b) => Some((r, g, b)),
            _ => None,
        }
    }

    /// Perceived brightness on a 0–255 scale (ITU-R BT.601 weights).
    ///
    /// Returns `None` for palette and default colors, whose actual value
    /// depends on the terminal theme.
    #[must_use]
    pub fn luma(self) -> Option<u8> {
        let (r, g, b) = self.rgb()?;
        let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
        // The weights sum to 1000, so the result is ≤ 255.
        #[allow(clippy::cast_possible_truncation)]
        Some((weighted / 1000) as u8)
    }

    /// Black or white, whichever reads better on top of `self`.
    ///
    /// Non-RGB backgrounds get the terminal default foreground.
    #[must_use]
    pub fn contrast(self) -> Self {
        match self.luma() {
            Some(l) if l >= 128 => Self::BLACK,
            Some(_) => Self::WHITE,
            None => Self::Default,
        }
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<(u8, u8, u8)> for CellColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::Rgb(r, g, b)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_terminal_default() {
        assert_eq!(CellColor::default(), CellColor::Default);
        assert!(CellColor::Default.is_default());
        assert!(!CellColor::BLACK.is_default());
    }

    #[test]
    fn from_tuple() {
        assert_eq!(CellColor::from((1, 2, 3)), CellColor::Rgb(1, 2, 3));
    }

    #[test]
    fn debug_formats() {
        assert_eq!(format!("{:?}", CellColor::Rgb(255, 0, 16)), "#ff0010");
        assert_eq!(format!("{:?}", CellColor::Ansi256(8)), "ansi(8)");
        assert_eq!(CellColor::Default.to_string(), "default");
    }

    #[test]
    fn luma_extremes() {
        assert_eq!(CellColor::BLACK.luma(), Some(0));
        assert_eq!(CellColor::WHITE.luma(), Some(255));
        assert_eq!(CellColor::Rgb(255, 0, 0).luma(), Some(76));
        assert_eq!(CellColor::GRAY.luma(), None);
    }

    #[test]
    fn contrast_picks_readable_text() {
        assert_eq!(CellColor::WHITE.contrast(), CellColor::BLACK);
        assert_eq!(CellColor::BLACK.contrast(), CellColor::WHITE);
        // Pure yellow is bright, pure blue is dark.
        assert_eq!(CellColor::Rgb(255, 255, 0).contrast(), CellColor::BLACK);
        assert_eq!(CellColor::Rgb(0, 0, 255).contrast(), CellColor::WHITE);
        assert_eq!(CellColor::Default.contrast(), CellColor::Default);
    }
}

// SPDX-License-Identifier: MIT
//
// GridArea — the screen rectangle the gradient was last painted into.
//
// The renderer writes it once per frame; the pointer controller reads it to
// map pointer coordinates back onto saturation/value, and the gradient reads
// it to size its columns. Bounds are inclusive on both ends, so a one-cell
// area has `x_min == x_max`.

/// Inclusive screen-space rectangle in display cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridArea {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl GridArea {
    /// Placeholder used before the first frame has been painted.
    pub const INITIAL: Self = Self::new(0, 0, 80, 1);

    #[inline]
    #[must_use]
    pub const fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Build from a top-left corner and a size in cells.
    ///
    /// A zero width or height yields a degenerate area whose max edge sits
    /// one cell before its min edge; [`contains`](Self::contains) is then
    /// false everywhere.
    #[must_use]
    pub fn from_origin_size(x: u16, y: u16, width: u16, height: u16) -> Self {
        let x = i32::from(x);
        let y = i32::from(y);
        Self::new(x, y, x + i32::from(width) - 1, y + i32::from(height) - 1)
    }

    /// `x_max - x_min`: the divisor used by pointer mapping.
    #[inline]
    #[must_use]
    pub const fn span_x(self) -> i32 {
        self.x_max - self.x_min
    }

    /// `y_max - y_min`.
    #[inline]
    #[must_use]
    pub const fn span_y(self) -> i32 {
        self.y_max - self.y_min
    }

    /// Whether a screen cell falls inside (inclusive bounds).
    #[inline]
    #[must_use]
    pub fn contains(self, x: u16, y: u16) -> bool {
        let x = i32::from(x);
        let y = i32::from(y);
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

impl Default for GridArea {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_bounds() {
        let area = GridArea::new(2, 3, 10, 8);
        assert!(area.contains(2, 3));
        assert!(area.contains(10, 8));
        assert!(!area.contains(11, 8));
        assert!(!area.contains(1, 3));
        assert!(!area.contains(5, 9));
    }

    #[test]
    fn from_origin_size() {
        let area = GridArea::from_origin_size(1, 1, 78, 16);
        assert_eq!(area, GridArea::new(1, 1, 78, 16));
        assert_eq!(area.span_x(), 77);
        assert_eq!(area.span_y(), 15);
    }

    #[test]
    fn zero_size_contains_nothing() {
        let area = GridArea::from_origin_size(4, 4, 0, 0);
        assert!(!area.contains(4, 4));
        assert!(!area.contains(3, 3));
    }

    #[test]
    fn default_is_initial_placeholder() {
        assert_eq!(GridArea::default(), GridArea::new(0, 0, 80, 1));
    }
}

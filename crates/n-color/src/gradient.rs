// SPDX-License-Identifier: MIT
//
// GradientGrid — the saturation/value plane for a fixed hue.
//
// Columns sweep value from 0 toward 255 left to right; rows sweep
// saturation top to bottom. Every cell is drawn with the upper-half-block
// glyph, so one cell carries two saturation steps: the top half in the
// foreground color and the bottom half in the background color. That gives
// `2 * GRID_ROWS` vertical steps in `GRID_ROWS` terminal rows.
//
// Exactly one half-cell is replaced by the marker color to show where the
// current saturation/value sits.

use crate::area::GridArea;
use crate::math::{Hsv, Rgb, hsv_to_rgb};

/// Terminal rows in the grid.
pub const GRID_ROWS: usize = 16;

/// Lower bound on the column span before the `+ 1`.
pub const MIN_GRID_SPAN: i32 = 10;

/// Color painted over the selected half-cell.
pub const MARKER_COLOR: Rgb = Rgb::BLACK;

/// Which half of a cell the marker occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Top,
    Bottom,
}

/// One rendered cell: top half (glyph foreground) and bottom half
/// (background).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub top: Rgb,
    pub bottom: Rgb,
    /// Set on the single cell carrying the selection marker.
    pub marker: Option<Half>,
}

/// Where the marker sits, in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Column, `0..columns`.
    pub column: usize,
    /// Half-row step, `0..2 * rows`. Even steps are top halves.
    pub step: usize,
}

impl Marker {
    /// Locate the marker for a saturation/value pair.
    #[must_use]
    pub fn locate(s: u8, v: u8, columns: usize, rows: usize) -> Self {
        let column = (usize::from(v) * columns / 255).min(columns.saturating_sub(1));
        let steps = 2 * rows;
        let step = (usize::from(s) * steps / 255).min(steps.saturating_sub(1));
        Self { column, step }
    }

    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        self.step / 2
    }

    #[inline]
    #[must_use]
    pub const fn half(self) -> Half {
        if self.step % 2 == 0 { Half::Top } else { Half::Bottom }
    }
}

/// Column count for an area: `max(10, x_max - x_min) + 1`.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn columns_for(area: GridArea) -> usize {
    // Always ≥ 11, so the cast cannot see a negative.
    (area.span_x().max(MIN_GRID_SPAN) + 1) as usize
}

#[allow(clippy::cast_possible_truncation)]
fn scale(numerator: usize, denominator: usize) -> u8 {
    // numerator < denominator * 256 for every caller, so this fits.
    (255 * numerator / denominator) as u8
}

/// A fully computed frame of the gradient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientGrid {
    hue: u8,
    columns: usize,
    rows: usize,
    marker: Marker,
    cells: Vec<GridCell>,
}

impl GradientGrid {
    /// Compute the grid for `hsv.h` with the marker placed at `hsv.s`/`hsv.v`.
    #[must_use]
    pub fn new(hsv: Hsv, columns: usize, rows: usize) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let marker = Marker::locate(hsv.s, hsv.v, columns, rows);

        let mut cells = Vec::with_capacity(columns * rows);
        for y in 0..rows {
            let sat_top = scale(2 * y, 2 * rows);
            let sat_bottom = scale(2 * y + 1, 2 * rows);
            for x in 0..columns {
                let value = scale(x, columns);
                let top = hsv_to_rgb(Hsv::new(hsv.h, sat_top, value));
                let bottom = hsv_to_rgb(Hsv::new(hsv.h, sat_bottom, value));
                let marked = (x == marker.column && y == marker.row()).then(|| marker.half());
                cells.push(GridCell {
                    top,
                    bottom,
                    marker: marked,
                });
            }
        }

        Self {
            hue: hsv.h,
            columns,
            rows,
            marker,
            cells,
        }
    }

    /// Grid sized for the area it was last painted into.
    #[must_use]
    pub fn for_area(hsv: Hsv, area: GridArea) -> Self {
        Self::new(hsv, columns_for(area), GRID_ROWS)
    }

    #[inline]
    #[must_use]
    pub const fn hue(&self) -> u8 {
        self.hue
    }

    #[inline]
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn marker(&self) -> Marker {
        self.marker
    }

    /// Cell at `(x, y)`, or `None` when out of range.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<&GridCell> {
        if x >= self.columns || y >= self.rows {
            return None;
        }
        self.cells.get(y * self.columns + x)
    }

    /// Colors to draw for a cell: `(foreground, background)` with the marker
    /// already applied.
    #[must_use]
    pub fn paint_colors(&self, x: usize, y: usize) -> Option<(Rgb, Rgb)> {
        let cell = self.cell(x, y)?;
        Some(match cell.marker {
            Some(Half::Top) => (MARKER_COLOR, cell.bottom),
            Some(Half::Bottom) => (cell.top, MARKER_COLOR),
            None => (cell.top, cell.bottom),
        })
    }

    /// Iterate rows as slices of cells.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn marked(grid: &GradientGrid) -> Vec<(usize, usize, Half)> {
        let mut out = Vec::new();
        for (y, row) in grid.iter_rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(half) = cell.marker {
                    out.push((x, y, half));
                }
            }
        }
        out
    }

    #[test]
    fn column_count_has_a_floor() {
        assert_eq!(columns_for(GridArea::new(0, 0, 77, 15)), 78);
        assert_eq!(columns_for(GridArea::new(5, 0, 7, 15)), 11);
        assert_eq!(columns_for(GridArea::new(5, 0, 4, 15)), 11);
        assert_eq!(columns_for(GridArea::INITIAL), 81);
    }

    #[test]
    fn marker_at_origin_for_black() {
        let grid = GradientGrid::new(Hsv::new(0, 0, 0), 40, GRID_ROWS);
        assert_eq!(grid.marker(), Marker { column: 0, step: 0 });
        assert_eq!(marked(&grid), vec![(0, 0, Half::Top)]);
    }

    #[test]
    fn marker_at_far_corner_for_full_sv() {
        let grid = GradientGrid::new(Hsv::new(0, 255, 255), 40, GRID_ROWS);
        assert_eq!(
            grid.marker(),
            Marker {
                column: 39,
                step: 2 * GRID_ROWS - 1
            }
        );
        assert_eq!(marked(&grid), vec![(39, GRID_ROWS - 1, Half::Bottom)]);
    }

    #[test]
    fn exactly_one_cell_is_marked() {
        for s in (0..=255).step_by(17) {
            for v in (0..=255).step_by(15) {
                let grid = GradientGrid::new(Hsv::new(100, s, v), 23, GRID_ROWS);
                assert_eq!(marked(&grid).len(), 1, "s={s} v={v}");
            }
        }
    }

    #[test]
    fn odd_step_marks_bottom_half() {
        // s = 24 → 24 * 32 / 255 = 3 → row 1, bottom.
        let grid = GradientGrid::new(Hsv::new(0, 24, 0), 11, GRID_ROWS);
        assert_eq!(grid.marker().row(), 1);
        assert_eq!(grid.marker().half(), Half::Bottom);
    }

    #[test]
    fn gradient_endpoints() {
        let grid = GradientGrid::new(Hsv::new(0, 128, 128), 11, GRID_ROWS);
        // First column has value 0: black regardless of saturation.
        let cell = grid.cell(0, 5).copied().map(|c| (c.top, c.bottom));
        assert_eq!(cell, Some((Rgb::BLACK, Rgb::BLACK)));
        // Top-left half is saturation 0, so the far column is gray.
        let far = grid.cell(10, 0).map(|c| c.top);
        assert_eq!(far, Some(Rgb::new(231, 231, 231)));
        // Bottom half of the last row: saturation 247.
        let deep = grid.cell(10, 15).map(|c| c.bottom);
        assert_eq!(deep, Some(hsv_to_rgb(Hsv::new(0, 247, 231))));
    }

    #[test]
    fn paint_colors_apply_marker() {
        let grid = GradientGrid::new(Hsv::new(0, 255, 255), 11, GRID_ROWS);
        let (fg, bg) = grid.paint_colors(10, 15).unwrap_or((Rgb::WHITE, Rgb::WHITE));
        assert_eq!(bg, MARKER_COLOR);
        assert_eq!(fg, hsv_to_rgb(Hsv::new(0, 239, 231)));
        assert_eq!(grid.paint_colors(11, 0), None);
    }

    #[test]
    fn grid_follows_hue() {
        let grid = GradientGrid::for_area(Hsv::new(85, 0, 0), GridArea::new(0, 0, 9, 15));
        assert_eq!(grid.hue(), 85);
        assert_eq!(grid.columns(), 11);
        assert_eq!(grid.rows(), GRID_ROWS);
        let corner = grid.cell(10, 15).map(|c| c.bottom);
        assert_eq!(corner, Some(hsv_to_rgb(Hsv::new(85, 247, 231))));
    }
}

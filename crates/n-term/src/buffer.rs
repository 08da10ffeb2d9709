// SPDX-License-Identifier: MIT
//
// FrameBuffer — the 2D cell grid that everything paints to.
//
// The picker paints its window, gradient, sliders and buttons here each
// frame. The diff renderer then compares this frame against the previous
// one and emits escape sequences only for the cells that changed.
//
// Design:
//
//   - Flat `Vec<Cell>` with row-major indexing. A row's cells are
//     contiguous, so the renderer's left-to-right scan is linear.
//
//   - Paint operations accept an optional `ClipRect`. Widgets paint freely;
//     clipping constrains them to their region. Everything is also clipped
//     to the buffer itself, so a window larger than the terminal just gets
//     cut off.
//
//   - Wide characters occupy two columns. The first cell holds the
//     codepoint; the second is a continuation cell (ch = 0). Paint methods
//     create continuation cells and clean up wide chars they overwrite.
//
//   - Box drawing: bordered windows with an optional centered title, and
//     horizontal separators whose ends join the window border with tees.

use unicode_width::UnicodeWidthChar;

use crate::cell::{Attr, Cell};
use crate::color::CellColor;

// ─── ClipRect ────────────────────────────────────────────────────────────────

/// A rectangle used for clipping and layout.
///
/// Coordinates are signed so a region can hang partially off-screen.
///
/// ```
/// use n_term::buffer::ClipRect;
///
/// let clip = ClipRect::new(10, 5, 80, 24);
/// assert!(clip.contains(10, 5));
/// assert!(clip.contains(89, 28));
/// assert!(!clip.contains(90, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl ClipRect {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Create from unsigned screen-space coordinates.
    #[inline]
    #[must_use]
    pub const fn from_unsigned(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(self) -> i32 {
        self.x + self.width as i32
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> i32 {
        self.y + self.height as i32
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether a screen-space point is inside.
    #[inline]
    #[must_use]
    pub fn contains(self, px: u16, py: u16) -> bool {
        let px = i32::from(px);
        let py = i32::from(py);
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Intersection of two rectangles, `None` if they don't overlap.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 > x1 && y2 > y1 {
            // Both differences are positive and bounded by u16 inputs.
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            Some(Self {
                x: x1,
                y: y1,
                width: (x2 - x1) as u16,
                height: (y2 - y1) as u16,
            })
        } else {
            None
        }
    }

    /// Shrink by `n` cells on every side. Collapses to zero size rather
    /// than going negative.
    #[must_use]
    pub const fn inset(self, n: u16) -> Self {
        Self {
            x: self.x + n as i32,
            y: self.y + n as i32,
            width: self.width.saturating_sub(2 * n),
            height: self.height.saturating_sub(2 * n),
        }
    }
}

// ─── Borders ─────────────────────────────────────────────────────────────────

/// Line style for boxes and separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    /// `┌─┐` square corners.
    #[default]
    Single,
    /// `╭─╮` rounded corners.
    Rounded,
}

struct Glyphs {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
    left_tee: char,
    right_tee: char,
}

impl BorderStyle {
    const fn glyphs(self) -> Glyphs {
        let (top_left, top_right, bottom_left, bottom_right) = match self {
            Self::Single => ('┌', '┐', '└', '┘'),
            Self::Rounded => ('╭', '╮', '╰', '╯'),
        };
        Glyphs {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            horizontal: '─',
            vertical: '│',
            left_tee: '├',
            right_tee: '┤',
        }
    }
}

// ─── FrameBuffer ─────────────────────────────────────────────────────────────

/// A 2D buffer of terminal cells.
///
/// Row-major: `index = y * width + x`.
///
/// ```
/// use n_term::buffer::FrameBuffer;
/// use n_term::cell::Cell;
///
/// let mut buf = FrameBuffer::new(80, 24);
/// buf.set(5, 3, Cell::new('X'));
/// assert_eq!(buf.get(5, 3).and_then(|c| c.character()), Some('X'));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a buffer filled with empty cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer bounds.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Cell at `(x, y)`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            self.cells.get(self.index(x, y))
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.cells.get_mut(idx)
        } else {
            None
        }
    }

    /// The raw cell slice.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// A single row as a slice.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            self.cells.get(start..start + usize::from(self.width))
        } else {
            None
        }
    }

    /// The characters of a row, continuation cells skipped.
    ///
    /// Handy for asserting on painted layouts.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).map_or_else(String::new, |row| {
            row.iter()
                .filter(|c| !c.is_continuation())
                .map(|c| c.character().unwrap_or(' '))
                .collect()
        })
    }

    // ─── Clear & Resize ──────────────────────────────────────────────────

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize, clearing all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = usize::from(width) * usize::from(height);
        self.cells.clear();
        self.cells.resize(size, Cell::EMPTY);
    }

    /// Copy another buffer's contents into this one, reusing the allocation.
    pub fn copy_from(&mut self, other: &Self) {
        self.width = other.width;
        self.height = other.height;
        self.cells.clone_from(&other.cells);
    }

    /// Bounds-checked raw write. Returns `true` if in bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    // ─── Wide Character Cleanup ──────────────────────────────────────────

    /// Break any wide character touching `(x, y)`.
    fn break_wide_char_at(&mut self, x: u16, y: u16) {
        let idx = self.index(x, y);

        if self.cells[idx].is_continuation() && x > 0 {
            let prev = self.index(x - 1, y);
            self.cells[prev].ch = u32::from(b' ');
        }

        if x + 1 < self.width {
            let next = self.index(x + 1, y);
            if self.cells[next].is_continuation() {
                self.cells[next] = Cell::EMPTY;
            }
        }
    }

    // ─── Paint ───────────────────────────────────────────────────────────

    /// Paint one cell with clipping and wide-char cleanup.
    ///
    /// Returns `true` if the cell was painted.
    #[allow(clippy::too_many_arguments)]
    pub fn paint_cell(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: CellColor,
        bg: CellColor,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        if clip.is_some_and(|c| !c.contains(x, y)) {
            return false;
        }

        self.break_wide_char_at(x, y);
        let idx = self.index(x, y);
        self.cells[idx] = Cell::styled(ch, fg, bg, attrs);
        true
    }

    /// Fill a rectangle with spaces on `bg`.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn fill_rect(&mut self, rect: ClipRect, bg: CellColor, clip: Option<&ClipRect>) {
        let Some(mut effective) = rect.intersect(self.bounds()) else {
            return;
        };
        if let Some(clip) = clip {
            let Some(clipped) = effective.intersect(*clip) else {
                return;
            };
            effective = clipped;
        }

        // Intersection with the buffer bounds keeps these non-negative.
        let x1 = effective.x as u16;
        let y1 = effective.y as u16;
        let x2 = effective.right() as u16;
        let y2 = effective.bottom() as u16;

        let blank = Cell::EMPTY.with_bg(bg);
        for row in y1..y2 {
            let start = self.index(x1, row);
            let end = self.index(x2, row);
            self.cells[start..end].fill(blank);
        }
    }

    /// Paint a string left to right from `(x, y)`.
    ///
    /// Wide characters take two columns; zero-width characters are skipped.
    /// A wide character that would straddle the right edge becomes a space.
    ///
    /// Returns the number of columns consumed.
    #[allow(clippy::too_many_arguments)]
    pub fn paint_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: CellColor,
        bg: CellColor,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        if y >= self.height {
            return 0;
        }

        let mut col = x;
        for ch in text.chars() {
            if col >= self.width {
                break;
            }

            let char_w = ch.width().unwrap_or(0);
            if char_w == 0 {
                continue;
            }
            let is_wide = char_w == 2;

            if is_wide && col + 1 >= self.width {
                self.paint_cell(col, y, ' ', fg, bg, attrs, clip);
                col += 1;
                break;
            }

            if self.paint_cell(col, y, ch, fg, bg, attrs, clip) && is_wide {
                let cont_x = col + 1;
                if clip.is_none_or(|c| c.contains(cont_x, y)) {
                    self.break_wide_char_at(cont_x, y);
                    let idx = self.index(cont_x, y);
                    self.cells[idx] = Cell::continuation(fg, bg, attrs);
                }
            }

            // char_w is 1 or 2.
            #[allow(clippy::cast_possible_truncation)]
            let w = char_w as u16;
            col = col.saturating_add(w);
        }

        col.saturating_sub(x)
    }

    /// Paint `text` centered inside `[x, x + width)`.
    #[allow(clippy::too_many_arguments)]
    pub fn paint_centered(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        text: &str,
        fg: CellColor,
        bg: CellColor,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let text_w = u16::try_from(string_width(text)).unwrap_or(u16::MAX);
        let offset = width.saturating_sub(text_w) / 2;
        self.paint_text(x.saturating_add(offset), y, text, fg, bg, attrs, clip)
    }

    /// Draw a bordered box around `rect`, with `title` centered in the top
    /// edge. The interior is left untouched.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn draw_box(
        &mut self,
        rect: ClipRect,
        style: BorderStyle,
        title: Option<&str>,
        fg: CellColor,
        attrs: Attr,
    ) {
        if rect.width < 2 || rect.height < 2 || rect.x < 0 || rect.y < 0 {
            return;
        }
        let g = style.glyphs();
        let x0 = rect.x as u16;
        let y0 = rect.y as u16;
        let x1 = (rect.right() - 1) as u16;
        let y1 = (rect.bottom() - 1) as u16;
        let bg = CellColor::Default;

        for x in x0 + 1..x1 {
            self.paint_cell(x, y0, g.horizontal, fg, bg, attrs, None);
            self.paint_cell(x, y1, g.horizontal, fg, bg, attrs, None);
        }
        for y in y0 + 1..y1 {
            self.paint_cell(x0, y, g.vertical, fg, bg, attrs, None);
            self.paint_cell(x1, y, g.vertical, fg, bg, attrs, None);
        }
        self.paint_cell(x0, y0, g.top_left, fg, bg, attrs, None);
        self.paint_cell(x1, y0, g.top_right, fg, bg, attrs, None);
        self.paint_cell(x0, y1, g.bottom_left, fg, bg, attrs, None);
        self.paint_cell(x1, y1, g.bottom_right, fg, bg, attrs, None);

        if let Some(title) = title {
            let inner = ClipRect::new(rect.x + 1, rect.y, rect.width - 2, 1);
            self.paint_centered(
                x0 + 1,
                y0,
                rect.width - 2,
                title,
                fg,
                bg,
                attrs | Attr::BOLD,
                Some(&inner),
            );
        }
    }

    /// Horizontal rule from `x` to `x + width - 1`, with tees at both ends
    /// so it joins a surrounding box border.
    pub fn draw_separator(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        style: BorderStyle,
        fg: CellColor,
        attrs: Attr,
    ) {
        if width < 2 {
            return;
        }
        let g = style.glyphs();
        let bg = CellColor::Default;
        let last = x + width - 1;
        self.paint_cell(x, y, g.left_tee, fg, bg, attrs, None);
        for col in x + 1..last {
            self.paint_cell(col, y, g.horizontal, fg, bg, attrs, None);
        }
        self.paint_cell(last, y, g.right_tee, fg, bg, attrs, None);
    }

    /// Vertical rule of `height` cells.
    pub fn draw_vline(&mut self, x: u16, y: u16, height: u16, fg: CellColor, attrs: Attr) {
        for row in y..y.saturating_add(height) {
            self.paint_cell(x, row, '│', fg, CellColor::Default, attrs, None);
        }
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

// ─── Text Width Utilities ────────────────────────────────────────────────────

/// Display width of a character in terminal columns.
///
/// ```
/// use n_term::buffer::char_width;
///
/// assert_eq!(char_width('a'), 1);
/// assert_eq!(char_width('中'), 2);
/// assert_eq!(char_width('\n'), 0);
/// ```
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Display width of a string in terminal columns.
///
/// ```
/// use n_term::buffer::string_width;
///
/// assert_eq!(string_width("255°"), 4);
/// assert_eq!(string_width("中文"), 4);
/// ```
#[must_use]
pub fn string_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: CellColor = CellColor::Rgb(255, 0, 0);

    fn text(buf: &mut FrameBuffer, x: u16, y: u16, s: &str) -> u16 {
        buf.paint_text(x, y, s, CellColor::Default, CellColor::Default, Attr::empty(), None)
    }

    // ── ClipRect ────────────────────────────────────────────────────────

    #[test]
    fn clip_intersect() {
        let a = ClipRect::new(0, 0, 10, 10);
        let b = ClipRect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(b), Some(ClipRect::new(5, 5, 5, 5)));
        assert_eq!(a.intersect(ClipRect::new(20, 20, 2, 2)), None);
    }

    #[test]
    fn clip_inset() {
        assert_eq!(ClipRect::new(0, 0, 10, 4).inset(1), ClipRect::new(1, 1, 8, 2));
        assert!(ClipRect::new(0, 0, 1, 1).inset(1).is_empty());
    }

    // ── Basic access ────────────────────────────────────────────────────

    #[test]
    fn new_buffer_is_blank() {
        let buf = FrameBuffer::new(4, 2);
        assert_eq!(buf.cells().len(), 8);
        assert!(buf.cells().iter().all(|c| c.is_empty()));
        assert_eq!(buf.row_text(1), "    ");
    }

    #[test]
    fn out_of_bounds_access() {
        let mut buf = FrameBuffer::new(4, 2);
        assert!(buf.get(4, 0).is_none());
        assert!(!buf.set(0, 2, Cell::new('x')));
        assert_eq!(buf.row_text(5), "");
    }

    #[test]
    fn resize_clears() {
        let mut buf = FrameBuffer::new(4, 2);
        buf.set(0, 0, Cell::new('x'));
        buf.resize(6, 3);
        assert_eq!(buf.width(), 6);
        assert_eq!(buf.height(), 3);
        assert!(buf.cells().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn copy_from_matches_source() {
        let mut src = FrameBuffer::new(3, 1);
        text(&mut src, 0, 0, "abc");
        let mut dst = FrameBuffer::new(3, 1);
        dst.copy_from(&src);
        assert_eq!(dst, src);
    }

    // ── Text ────────────────────────────────────────────────────────────

    #[test]
    fn paint_text_returns_width() {
        let mut buf = FrameBuffer::new(10, 1);
        assert_eq!(text(&mut buf, 1, 0, "hi°"), 3);
        assert_eq!(buf.row_text(0), " hi°      ");
    }

    #[test]
    fn paint_text_truncates_at_edge() {
        let mut buf = FrameBuffer::new(4, 1);
        assert_eq!(text(&mut buf, 2, 0, "hello"), 2);
        assert_eq!(buf.row_text(0), "  he");
    }

    #[test]
    fn wide_char_gets_continuation() {
        let mut buf = FrameBuffer::new(4, 1);
        text(&mut buf, 0, 0, "中");
        assert!(buf.get(1, 0).is_some_and(|c| c.is_continuation()));
        // Overwriting the continuation breaks the wide char.
        text(&mut buf, 1, 0, "x");
        assert_eq!(buf.row_text(0), " x  ");
    }

    #[test]
    fn wide_char_at_edge_becomes_space() {
        let mut buf = FrameBuffer::new(3, 1);
        assert_eq!(text(&mut buf, 2, 0, "中"), 1);
        assert_eq!(buf.row_text(0), "   ");
    }

    #[test]
    fn clip_limits_painting() {
        let mut buf = FrameBuffer::new(10, 1);
        let clip = ClipRect::new(0, 0, 3, 1);
        buf.paint_text(0, 0, "abcdef", RED, CellColor::Default, Attr::empty(), Some(&clip));
        assert_eq!(buf.row_text(0), "abc       ");
        assert_eq!(buf.get(0, 0).map(|c| c.fg), Some(RED));
    }

    #[test]
    fn centered_text() {
        let mut buf = FrameBuffer::new(10, 1);
        buf.paint_centered(0, 0, 10, "Copy", RED, CellColor::Default, Attr::BOLD, None);
        assert_eq!(buf.row_text(0), "   Copy   ");
    }

    // ── Fill ────────────────────────────────────────────────────────────

    #[test]
    fn fill_rect_is_clipped_to_buffer() {
        let mut buf = FrameBuffer::new(4, 3);
        buf.fill_rect(ClipRect::new(2, 1, 10, 10), RED, None);
        assert_eq!(buf.get(1, 1).map(|c| c.bg), Some(CellColor::Default));
        assert_eq!(buf.get(3, 2).map(|c| c.bg), Some(RED));
        assert_eq!(buf.get(2, 0).map(|c| c.bg), Some(CellColor::Default));
    }

    // ── Boxes ───────────────────────────────────────────────────────────

    #[test]
    fn box_with_title() {
        let mut buf = FrameBuffer::new(12, 3);
        buf.draw_box(
            ClipRect::new(0, 0, 12, 3),
            BorderStyle::Single,
            Some(" pick "),
            CellColor::Default,
            Attr::empty(),
        );
        assert_eq!(buf.row_text(0), "┌── pick ──┐");
        assert_eq!(buf.row_text(1), "│          │");
        assert_eq!(buf.row_text(2), "└──────────┘");
        assert!(buf.get(4, 0).is_some_and(|c| c.attrs.contains(Attr::BOLD)));
    }

    #[test]
    fn box_title_is_clipped_to_border() {
        let mut buf = FrameBuffer::new(6, 2);
        buf.draw_box(
            ClipRect::new(0, 0, 6, 2),
            BorderStyle::Rounded,
            Some("long title"),
            CellColor::Default,
            Attr::empty(),
        );
        assert_eq!(buf.row_text(0), "╭long╮");
        assert_eq!(buf.row_text(1), "╰────╯");
    }

    #[test]
    fn separator_joins_border() {
        let mut buf = FrameBuffer::new(5, 1);
        buf.draw_separator(0, 0, 5, BorderStyle::Single, CellColor::Default, Attr::empty());
        assert_eq!(buf.row_text(0), "├───┤");
    }

    #[test]
    fn vline() {
        let mut buf = FrameBuffer::new(1, 3);
        buf.draw_vline(0, 1, 5, CellColor::GRAY, Attr::empty());
        assert_eq!(buf.row_text(0), " ");
        assert_eq!(buf.row_text(2), "│");
    }

    #[test]
    fn width_helpers() {
        assert_eq!(char_width('▀'), 1);
        assert_eq!(string_width("hsl(0, 100%, 100%)"), 18);
    }
}

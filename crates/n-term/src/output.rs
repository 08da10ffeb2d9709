// SPDX-License-Identifier: MIT
//
// Frame output: one byte buffer, one pen.
//
//   OutputBuffer — every escape and glyph of a frame lands here first and
//   leaves in a single write(). Dragging across the gradient repaints a few
//   hundred half blocks per tick; issuing those as separate writes would
//   tear visibly on slower terminals.
//
//   CellWriter — remembers where the terminal cursor is and which colors
//   and attributes are active (the "pen"), and emits only what differs for
//   the next cell. A gradient row is a run of adjacent cells, so the cursor
//   move happens once per run and only the colors change in between.

use std::io::{self, Write};

use crate::ansi;
use crate::cell::{Attr, Cell};
use crate::color::CellColor;

// ─── OutputBuffer ────────────────────────────────────────────────────────────

const DEFAULT_CAPACITY: usize = 16_384;

/// In-memory sink for a frame's ANSI output.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

impl OutputBuffer {
    /// An empty buffer with 16 KB reserved.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The bytes accumulated so far.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a codepoint as UTF-8. Anything that is not a valid `char`
    /// (including the continuation marker 0) is written as `?`.
    pub fn write_codepoint(&mut self, cp: u32) {
        match char::from_u32(cp).filter(|&c| c != '\0') {
            Some(ch) => {
                let mut enc = [0u8; 4];
                self.buf.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
            }
            None => self.buf.push(b'?'),
        }
    }

    /// Drop the contents, keep the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write everything to stdout, flush, and clear.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        self.flush_to(&mut stdout)
    }

    /// Write everything to `w`, flush, and clear.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        w.write_all(&self.buf)?;
        w.flush()?;
        self.buf.clear();
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    /// No-op; bytes leave through `flush_stdout` / `flush_to`.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── CellWriter ──────────────────────────────────────────────────────────────

/// What the terminal is currently set to draw with.
///
/// `None` colors mean "unknown": the next cell must emit its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pen {
    fg: Option<CellColor>,
    bg: Option<CellColor>,
    attrs: Attr,
}

impl Pen {
    const UNKNOWN: Self = Self {
        fg: None,
        bg: None,
        attrs: Attr::empty(),
    };
}

/// Renders cells while skipping escapes that would not change anything.
///
/// - The cursor move is skipped when the cell sits right after the last one
///   written on the same row.
/// - An attribute change resets with SGR 0 (unless nothing was set), which
///   also forgets both colors.
/// - Colors are emitted only when they differ from the pen.
/// - A continuation cell directly after its wide character is skipped; the
///   terminal already covered that column.
pub struct CellWriter {
    cursor: Option<(u16, u16)>,
    pen: Pen,
}

impl CellWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursor: None,
            pen: Pen::UNKNOWN,
        }
    }

    /// Forget everything. Call after a terminal reset or screen clear.
    pub const fn reset_state(&mut self) {
        self.cursor = None;
        self.pen = Pen::UNKNOWN;
    }

    /// Whether the terminal cursor is sitting right after `(x - 1, y)`.
    fn follows(&self, x: u16, y: u16) -> bool {
        matches!(self.cursor, Some((lx, ly)) if ly == y && lx.checked_add(1) == Some(x))
    }

    /// Emit `cell` at `(x, y)`.
    pub fn render_cell(&mut self, out: &mut OutputBuffer, x: u16, y: u16, cell: &Cell) {
        let adjacent = self.follows(x, y);

        if cell.is_continuation() && adjacent {
            self.cursor = Some((x, y));
            return;
        }

        if !adjacent {
            ansi::cursor_to(out, x, y).ok();
        }
        self.apply_style(out, cell);

        if cell.is_continuation() {
            // Orphaned half of a wide char: fill with background.
            out.buf.push(b' ');
        } else {
            out.write_codepoint(cell.ch);
        }
        self.cursor = Some((x, y));
    }

    fn apply_style(&mut self, out: &mut OutputBuffer, cell: &Cell) {
        if cell.attrs != self.pen.attrs {
            if !self.pen.attrs.is_empty() {
                ansi::reset(out).ok();
                self.pen.fg = None;
                self.pen.bg = None;
            }
            if !cell.attrs.is_empty() {
                ansi::attrs(out, cell.attrs).ok();
            }
            self.pen.attrs = cell.attrs;
        }

        if self.pen.fg != Some(cell.fg) {
            ansi::fg(out, cell.fg).ok();
            self.pen.fg = Some(cell.fg);
        }
        if self.pen.bg != Some(cell.bg) {
            ansi::bg(out, cell.bg).ok();
            self.pen.bg = Some(cell.bg);
        }
    }
}

impl Default for CellWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: CellColor = CellColor::Rgb(255, 0, 0);
    const BLUE: CellColor = CellColor::Rgb(0, 0, 255);

    fn render(cells: &[(u16, u16, Cell)]) -> String {
        let mut out = OutputBuffer::new();
        let mut writer = CellWriter::new();
        for (x, y, cell) in cells {
            writer.render_cell(&mut out, *x, *y, cell);
        }
        String::from_utf8(out.as_bytes().to_vec()).unwrap()
    }

    // ── OutputBuffer ────────────────────────────────────────────────────

    #[test]
    fn buffer_collects_writes() {
        let mut buf = OutputBuffer::new();
        assert!(buf.is_empty());
        write!(buf, "#{:02X}", 255).unwrap();
        assert_eq!(buf.as_bytes(), b"#FF");
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn codepoints() {
        let mut buf = OutputBuffer::new();
        buf.write_codepoint(u32::from('▀'));
        buf.write_codepoint(0);
        buf.write_codepoint(0xD800);
        assert_eq!(buf.as_bytes(), "▀??".as_bytes());
    }

    #[test]
    fn flush_to_drains() {
        let mut buf = OutputBuffer::new();
        write!(buf, "frame").unwrap();
        let mut dest = Vec::new();
        buf.flush_to(&mut dest).unwrap();
        assert_eq!(dest, b"frame");
        assert!(buf.is_empty());

        buf.flush_to(&mut dest).unwrap();
        assert_eq!(dest, b"frame");
    }

    // ── CellWriter ──────────────────────────────────────────────────────

    #[test]
    fn first_cell_positions_cursor() {
        let out = render(&[(5, 3, Cell::new('A'))]);
        assert!(out.starts_with("\x1b[4;6H"));
        assert!(out.ends_with('A'));
        // Pen starts unknown, so default colors are stated.
        assert!(out.contains("\x1b[39m"));
        assert!(out.contains("\x1b[49m"));
    }

    #[test]
    fn a_run_moves_the_cursor_once() {
        let out = render(&[
            (0, 0, Cell::half_block(RED, BLUE)),
            (1, 0, Cell::half_block(RED, BLUE)),
            (2, 0, Cell::half_block(RED, BLUE)),
        ]);
        assert_eq!(out.matches('H').count(), 1);
        assert_eq!(out.matches("\x1b[38;2;255;0;0m").count(), 1);
        assert_eq!(out.matches("\x1b[48;2;0;0;255m").count(), 1);
        assert!(out.ends_with("▀▀▀"));
    }

    #[test]
    fn gap_or_new_row_moves_the_cursor() {
        let out = render(&[
            (0, 0, Cell::new('A')),
            (5, 0, Cell::new('B')),
            (5, 1, Cell::new('C')),
        ]);
        assert_eq!(out.matches('H').count(), 3);
    }

    #[test]
    fn only_changed_color_is_emitted() {
        let out = render(&[
            (0, 0, Cell::half_block(RED, BLUE)),
            (1, 0, Cell::half_block(CellColor::BLACK, BLUE)),
        ]);
        assert!(out.contains("\x1b[38;2;0;0;0m"));
        assert_eq!(out.matches("48;2;0;0;255").count(), 1);
    }

    #[test]
    fn attribute_change_resets_and_restates_colors() {
        let out = render(&[
            (0, 0, Cell::styled('A', RED, CellColor::Default, Attr::BOLD)),
            (1, 0, Cell::styled('B', RED, CellColor::Default, Attr::INVERSE)),
        ]);
        assert!(out.contains("\x1b[0m"));
        assert!(out.contains("\x1b[7m"));
        assert_eq!(out.matches("\x1b[38;2;255;0;0m").count(), 2);
    }

    #[test]
    fn setting_attrs_from_none_skips_reset() {
        let out = render(&[
            (0, 0, Cell::new('A')),
            (1, 0, Cell::styled('B', CellColor::Default, CellColor::Default, Attr::BOLD)),
        ]);
        assert!(!out.contains("\x1b[0m"));
        assert!(out.contains("\x1b[1m"));
    }

    #[test]
    fn continuation_after_wide_char_is_silent() {
        let out = render(&[
            (3, 0, Cell::new('中')),
            (4, 0, Cell::continuation(CellColor::Default, CellColor::Default, Attr::empty())),
        ]);
        assert!(out.ends_with('中'));
    }

    #[test]
    fn orphan_continuation_paints_background() {
        let out = render(&[(4, 0, Cell::continuation(CellColor::Default, BLUE, Attr::empty()))]);
        assert!(out.starts_with("\x1b[1;5H"));
        assert!(out.contains("\x1b[48;2;0;0;255m"));
        assert!(out.ends_with(' '));
    }
}

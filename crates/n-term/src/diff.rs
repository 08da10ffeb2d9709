// SPDX-License-Identifier: MIT
//
// Differential renderer.
//
// Each frame the picker repaints its whole window into a FrameBuffer. Most
// of it is unchanged from the last frame: nudging the hue with an arrow key
// rewrites the gradient and the hue row, while borders, labels and buttons
// stay put. The renderer compares the new frame with the previous one and
// hands only the differing cells to the CellWriter.
//
//   1. App paints into a FrameBuffer.
//   2. render() diffs it against the stored previous frame.
//   3. Changed cells go through CellWriter into the OutputBuffer.
//   4. flush() writes the frame in one syscall.
//
// Whole rows are compared as slices first, so an untouched row costs one
// memcmp. The frame is wrapped in synchronized output (DEC 2026). The
// previous frame is kept with copy_from(), so steady state allocates
// nothing.

use std::io::{self, Write};

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::output::{CellWriter, OutputBuffer};

// ─── RenderStats ─────────────────────────────────────────────────────────────

/// What a render pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub cells_rendered: usize,
    pub cells_skipped: usize,
    pub bytes_written: usize,
}

// ─── DiffRenderer ────────────────────────────────────────────────────────────

/// Emits ANSI for the cells that changed since the previous frame.
///
/// ```no_run
/// use n_term::buffer::FrameBuffer;
/// use n_term::diff::DiffRenderer;
///
/// let mut renderer = DiffRenderer::new();
/// let frame = FrameBuffer::new(80, 24);
/// let stats = renderer.render(&frame);
/// renderer.flush().unwrap();
/// assert_eq!(stats.cells_rendered, 80 * 24);
/// ```
pub struct DiffRenderer {
    output: OutputBuffer,
    writer: CellWriter,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    /// A renderer with no previous frame; the first render draws everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            writer: CellWriter::new(),
            previous: None,
        }
    }

    /// Diff `current` against the previous frame and queue the output.
    pub fn render(&mut self, current: &FrameBuffer) -> RenderStats {
        self.output.clear();
        self.writer.reset_state();

        let width = current.width();
        let height = current.height();
        let mut stats = RenderStats::default();

        if width == 0 || height == 0 {
            self.store_frame(current);
            return stats;
        }

        ansi::begin_sync(&mut self.output).ok();

        let previous = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == width && prev.height() == height);

        if previous.is_none() {
            ansi::clear_screen(&mut self.output).ok();
            ansi::cursor_to(&mut self.output, 0, 0).ok();
        }

        for y in 0..height {
            let Some(row) = current.row(y) else { continue };
            let prev_row = previous.and_then(|p| p.row(y));

            if prev_row == Some(row) {
                stats.cells_skipped += row.len();
                continue;
            }

            for (x, cell) in (0..width).zip(row) {
                let unchanged = prev_row
                    .and_then(|p| p.get(usize::from(x)))
                    .is_some_and(|old| old == cell);
                if unchanged {
                    stats.cells_skipped += 1;
                } else {
                    self.writer.render_cell(&mut self.output, x, y, cell);
                    stats.cells_rendered += 1;
                }
            }
        }

        // Leave the terminal's pen clean for whatever draws after us.
        ansi::reset(&mut self.output).ok();
        ansi::end_sync(&mut self.output).ok();

        stats.bytes_written = self.output.len();
        self.store_frame(current);
        stats
    }

    /// Write the queued frame to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush_stdout()
    }

    /// Write the queued frame to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.output.flush_to(w)
    }

    /// Forget the previous frame so the next render repaints everything
    /// (Ctrl-L, or after something else scribbled on the screen).
    pub fn force_redraw(&mut self) {
        self.previous = None;
    }

    fn store_frame(&mut self, current: &FrameBuffer) {
        match &mut self.previous {
            Some(prev) => prev.copy_from(current),
            None => self.previous = Some(current.clone()),
        }
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Attr, Cell};
    use crate::color::CellColor;
    use pretty_assertions::assert_eq;

    fn render(renderer: &mut DiffRenderer, frame: &FrameBuffer) -> (RenderStats, String) {
        let stats = renderer.render(frame);
        let out = String::from_utf8(renderer.output.as_bytes().to_vec()).unwrap();
        (stats, out)
    }

    #[test]
    fn first_render_draws_everything() {
        let mut renderer = DiffRenderer::new();
        let (stats, out) = render(&mut renderer, &FrameBuffer::new(10, 5));

        assert_eq!(stats.cells_rendered, 50);
        assert_eq!(stats.cells_skipped, 0);
        assert!(out.starts_with("\x1b[?2026h"));
        assert!(out.contains("\x1b[2J"));
        assert!(out.ends_with("\x1b[0m\x1b[?2026l"));
    }

    #[test]
    fn identical_frame_renders_nothing() {
        let mut renderer = DiffRenderer::new();
        let frame = FrameBuffer::new(10, 5);
        renderer.render(&frame);

        let (stats, out) = render(&mut renderer, &frame);
        assert_eq!(stats.cells_rendered, 0);
        assert_eq!(stats.cells_skipped, 50);
        assert!(!out.contains("\x1b[2J"));
        assert!(stats.bytes_written < 30);
    }

    #[test]
    fn single_change_is_positioned() {
        let mut renderer = DiffRenderer::new();
        let mut frame = FrameBuffer::new(10, 5);
        renderer.render(&frame);

        frame.set(7, 4, Cell::new('Z'));
        let (stats, out) = render(&mut renderer, &frame);
        assert_eq!(stats.cells_rendered, 1);
        assert_eq!(stats.cells_skipped, 49);
        assert!(out.contains("\x1b[5;8H"));
        assert!(out.contains('Z'));
    }

    #[test]
    fn recolored_gradient_row() {
        let mut renderer = DiffRenderer::new();
        let mut frame = FrameBuffer::new(20, 4);
        for x in 0..20 {
            frame.set(x, 1, Cell::half_block(CellColor::WHITE, CellColor::WHITE));
        }
        renderer.render(&frame);

        for x in 0..20 {
            frame.set(x, 1, Cell::half_block(CellColor::Rgb(255, 0, 0), CellColor::WHITE));
        }
        let (stats, out) = render(&mut renderer, &frame);
        assert_eq!(stats.cells_rendered, 20);
        assert_eq!(stats.cells_skipped, 60);
        assert_eq!(out.matches("\x1b[38;2;255;0;0m").count(), 1);
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut renderer = DiffRenderer::new();
        renderer.render(&FrameBuffer::new(10, 5));

        let (stats, out) = render(&mut renderer, &FrameBuffer::new(20, 10));
        assert_eq!(stats.cells_rendered, 200);
        assert!(out.contains("\x1b[2J"));

        // And the new size becomes the baseline.
        let (stats, _) = render(&mut renderer, &FrameBuffer::new(20, 10));
        assert_eq!(stats.cells_rendered, 0);
    }

    #[test]
    fn styled_cell_escapes() {
        let mut renderer = DiffRenderer::new();
        let mut frame = FrameBuffer::new(4, 1);
        renderer.render(&frame);

        frame.set(
            0,
            0,
            Cell::styled('E', CellColor::Rgb(255, 0, 0), CellColor::Rgb(0, 0, 255), Attr::BOLD | Attr::INVERSE),
        );
        let (_, out) = render(&mut renderer, &frame);
        assert!(out.contains("\x1b[1;7m"));
        assert!(out.contains("\x1b[38;2;255;0;0m"));
        assert!(out.contains("\x1b[48;2;0;0;255m"));
    }

    #[test]
    fn force_redraw() {
        let mut renderer = DiffRenderer::new();
        let frame = FrameBuffer::new(10, 5);
        renderer.render(&frame);
        renderer.force_redraw();

        let (stats, out) = render(&mut renderer, &frame);
        assert_eq!(stats.cells_rendered, 50);
        assert!(out.contains("\x1b[2J"));
    }

    #[test]
    fn zero_size_is_silent() {
        let mut renderer = DiffRenderer::new();
        let (stats, out) = render(&mut renderer, &FrameBuffer::new(0, 0));
        assert_eq!(stats, RenderStats::default());
        assert!(out.is_empty());
    }

    #[test]
    fn change_then_revert() {
        let mut renderer = DiffRenderer::new();
        let mut frame = FrameBuffer::new(10, 5);
        renderer.render(&frame);

        frame.set(0, 0, Cell::new('!'));
        assert_eq!(renderer.render(&frame).cells_rendered, 1);
        frame.set(0, 0, Cell::EMPTY);
        assert_eq!(renderer.render(&frame).cells_rendered, 1);
        assert_eq!(renderer.render(&frame).cells_rendered, 0);
    }

    #[test]
    fn flush_to_writer() {
        let mut renderer = DiffRenderer::new();
        renderer.render(&FrameBuffer::new(2, 1));
        let mut sink = Vec::new();
        renderer.flush_to(&mut sink).unwrap();
        assert!(!sink.is_empty());
        assert!(renderer.output.as_bytes().is_empty());
    }
}

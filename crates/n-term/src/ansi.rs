// SPDX-License-Identifier: MIT
//
// Escape sequence encoding.
//
// Stateless writers for every terminal command the picker sends. Deciding
// when to send them is the CellWriter's and Terminal's business; this
// module only knows the bytes.
//
// Coordinates are 0-indexed here and converted to the terminal's 1-indexed
// form on the way out. Every function returns the writer's `io::Result`;
// writes into an `OutputBuffer` cannot fail.

use std::io::{self, Write};

use crate::cell::Attr;
use crate::color::CellColor;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// CUP: move the cursor to `(x, y)`.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// ED 2: clear the whole screen.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// SGR 0: drop every attribute and both colors.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Colors ──────────────────────────────────────────────────────────────────

/// Shared encoder for fg/bg. `base` is 30 for foreground, 40 for background;
/// bright palette entries live at `base + 60`, extended ones at `base + 8`.
fn color(w: &mut impl Write, base: u8, color: CellColor) -> io::Result<()> {
    let base = u16::from(base);
    match color {
        CellColor::Default => write!(w, "\x1b[{}m", base + 9),
        CellColor::Ansi256(idx @ 0..=7) => write!(w, "\x1b[{}m", base + u16::from(idx)),
        CellColor::Ansi256(idx @ 8..=15) => write!(w, "\x1b[{}m", base + 60 + u16::from(idx - 8)),
        CellColor::Ansi256(idx) => write!(w, "\x1b[{};5;{idx}m", base + 8),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[{};2;{r};{g};{b}m", base + 8),
    }
}

/// Set the foreground color: SGR 30–37, 90–97, 38;5;N, or 38;2;R;G;B.
#[inline]
pub fn fg(w: &mut impl Write, c: CellColor) -> io::Result<()> {
    color(w, 30, c)
}

/// Set the background color: SGR 40–47, 100–107, 48;5;N, or 48;2;R;G;B.
#[inline]
pub fn bg(w: &mut impl Write, c: CellColor) -> io::Result<()> {
    color(w, 40, c)
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

const ATTR_CODES: [(Attr, &str); 5] = [
    (Attr::BOLD, "1"),
    (Attr::DIM, "2"),
    (Attr::ITALIC, "3"),
    (Attr::UNDERLINE, "4"),
    (Attr::INVERSE, "7"),
];

/// All set attributes in one SGR sequence, e.g. `\x1b[1;7m`.
/// Writes nothing for an empty set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }
    w.write_all(b"\x1b[")?;
    let mut sep = "";
    for (flag, code) in ATTR_CODES {
        if attr.contains(flag) {
            write!(w, "{sep}{code}")?;
            sep = ";";
        }
    }
    w.write_all(b"m")
}

// ─── Synchronized Output ─────────────────────────────────────────────────────

/// DEC 2026: hold rendering until [`end_sync`].
#[inline]
pub fn begin_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026h")
}

#[inline]
pub fn end_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026l")
}

// ─── Alternate Screen ────────────────────────────────────────────────────────

/// DEC 1049: switch to the alternate screen; leaving restores the shell.
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── Mouse ───────────────────────────────────────────────────────────────────

/// How much mouse activity the terminal reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseMode {
    /// Press and release only (DEC 1000).
    Click,
    /// Plus motion while a button is held (DEC 1002). What dragging the
    /// gradient marker needs.
    Drag,
    /// Plus motion with no button held (DEC 1003).
    Motion,
}

/// Turn on SGR-encoded (DEC 1006) mouse reporting at `mode`.
pub fn enable_mouse(w: &mut impl Write, mode: MouseMode) -> io::Result<()> {
    w.write_all(b"\x1b[?1000h")?;
    if matches!(mode, MouseMode::Drag | MouseMode::Motion) {
        w.write_all(b"\x1b[?1002h")?;
    }
    if mode == MouseMode::Motion {
        w.write_all(b"\x1b[?1003h")?;
    }
    w.write_all(b"\x1b[?1006h")
}

/// Turn off every mouse mode, most specific first.
pub fn disable_mouse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1006l\x1b[?1003l\x1b[?1002l\x1b[?1000l")
}

// ─── Clipboard ───────────────────────────────────────────────────────────────

/// OSC 52: ask the terminal to put `base64_payload` on the system clipboard.
///
/// The payload must already be base64-encoded. Terminated with BEL, which
/// more terminals accept than ST.
#[inline]
pub fn set_clipboard(w: &mut impl Write, base64_payload: &str) -> io::Result<()> {
    write!(w, "\x1b]52;c;{base64_payload}\x07")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn emit(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn cursor_is_one_indexed() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
        assert_eq!(emit(|w| cursor_to(w, 10, 20)), "\x1b[21;11H");
        assert_eq!(emit(|w| cursor_to(w, u16::MAX, 0)), "\x1b[1;65536H");
    }

    #[test]
    fn cursor_visibility() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    #[test]
    fn screen_and_reset() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J");
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    #[test]
    fn fg_encodings() {
        assert_eq!(emit(|w| fg(w, CellColor::Default)), "\x1b[39m");
        assert_eq!(emit(|w| fg(w, CellColor::Ansi256(1))), "\x1b[31m");
        assert_eq!(emit(|w| fg(w, CellColor::GRAY)), "\x1b[90m");
        assert_eq!(emit(|w| fg(w, CellColor::Ansi256(15))), "\x1b[97m");
        assert_eq!(emit(|w| fg(w, CellColor::Ansi256(42))), "\x1b[38;5;42m");
        assert_eq!(emit(|w| fg(w, CellColor::Rgb(255, 128, 0))), "\x1b[38;2;255;128;0m");
    }

    #[test]
    fn bg_encodings() {
        assert_eq!(emit(|w| bg(w, CellColor::Default)), "\x1b[49m");
        assert_eq!(emit(|w| bg(w, CellColor::Ansi256(2))), "\x1b[42m");
        assert_eq!(emit(|w| bg(w, CellColor::Ansi256(8))), "\x1b[100m");
        assert_eq!(emit(|w| bg(w, CellColor::Ansi256(200))), "\x1b[48;5;200m");
        assert_eq!(emit(|w| bg(w, CellColor::Rgb(0, 100, 200))), "\x1b[48;2;0;100;200m");
    }

    #[test]
    fn attribute_sets() {
        assert_eq!(emit(|w| attrs(w, Attr::empty())), "");
        assert_eq!(emit(|w| attrs(w, Attr::BOLD)), "\x1b[1m");
        assert_eq!(emit(|w| attrs(w, Attr::BOLD | Attr::INVERSE)), "\x1b[1;7m");
        assert_eq!(emit(|w| attrs(w, Attr::all())), "\x1b[1;2;3;4;7m");
    }

    #[test]
    fn sync_and_alt_screen() {
        assert_eq!(emit(|w| begin_sync(w)), "\x1b[?2026h");
        assert_eq!(emit(|w| end_sync(w)), "\x1b[?2026l");
        assert_eq!(emit(|w| enter_alt_screen(w)), "\x1b[?1049h");
        assert_eq!(emit(|w| exit_alt_screen(w)), "\x1b[?1049l");
    }

    #[test]
    fn mouse_modes() {
        let click = emit(|w| enable_mouse(w, MouseMode::Click));
        assert_eq!(click, "\x1b[?1000h\x1b[?1006h");

        let drag = emit(|w| enable_mouse(w, MouseMode::Drag));
        assert_eq!(drag, "\x1b[?1000h\x1b[?1002h\x1b[?1006h");

        let motion = emit(|w| enable_mouse(w, MouseMode::Motion));
        assert!(motion.contains("\x1b[?1003h"));

        let off = emit(|w| disable_mouse(w));
        for code in ["1006l", "1003l", "1002l", "1000l"] {
            assert!(off.contains(code), "missing {code}");
        }
    }

    #[test]
    fn clipboard_osc52() {
        assert_eq!(emit(|w| set_clipboard(w, "I0ZGMDAwMA==")), "\x1b]52;c;I0ZGMDAwMA==\x07");
    }

    #[test]
    fn sequences_compose() {
        let s = emit(|w| {
            cursor_to(w, 5, 3)?;
            fg(w, CellColor::Rgb(255, 0, 0))?;
            bg(w, CellColor::Ansi256(0))?;
            attrs(w, Attr::BOLD)
        });
        assert_eq!(s, "\x1b[4;6H\x1b[38;2;255;0;0m\x1b[40m\x1b[1m");
    }
}

// SPDX-License-Identifier: MIT
//
// Clipboard — where the copy buttons send their text.
//
// The terminal is the only clipboard a TUI can count on, so the default
// backend is OSC 52: the text goes out base64-encoded and the terminal puts
// it on the system clipboard. OSC 52 is write-only from our side, so the
// backend remembers the last text it sent and reports that back.

use std::io::{self, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use n_term::ansi;

use crate::error::{PickError, Result};

/// Something that can hold a line of text for the user.
pub trait Clipboard {
    /// Replace the clipboard contents.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::Clipboard`] if the text could not be delivered.
    fn set_text(&mut self, text: &str) -> Result<()>;

    /// Current contents as far as this backend knows.
    fn text(&self) -> String;
}

// ─── OSC 52 ──────────────────────────────────────────────────────────────────

/// OSC 52 to any writer, stdout by default.
pub struct Osc52Clipboard<W: Write = io::Stdout> {
    out: W,
    last: String,
}

impl Osc52Clipboard {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            last: String::new(),
        }
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let payload = STANDARD.encode(text);
        ansi::set_clipboard(&mut self.out, &payload)
            .and_then(|()| self.out.flush())
            .map_err(|e| PickError::Clipboard(e.to_string()))?;
        self.last = text.to_string();
        Ok(())
    }

    fn text(&self) -> String {
        self.last.clone()
    }
}

// ─── In-memory ───────────────────────────────────────────────────────────────

/// Keeps the text to itself. Used with `--no-clipboard` and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: String,
}

impl MemoryClipboard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        text.clone_into(&mut self.text);
        Ok(())
    }

    fn text(&self) -> String {
        self.text.clone()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn osc52_writes_base64() {
        let mut cb = Osc52Clipboard::new(Vec::new());
        assert_eq!(cb.text(), "");
        cb.set_text("#FF0000").unwrap();
        assert_eq!(cb.text(), "#FF0000");
        let written = String::from_utf8(cb.out.clone()).unwrap();
        assert_eq!(written, "\x1b]52;c;I0ZGMDAwMA==\x07");
    }

    #[test]
    fn osc52_failure_keeps_previous_text() {
        let mut cb = Osc52Clipboard::new(Broken);
        let err = cb.set_text("rgb(1, 2, 3)").unwrap_err();
        assert!(matches!(err, PickError::Clipboard(_)));
        assert_eq!(cb.text(), "");
    }

    #[test]
    fn memory_round_trip() {
        let mut cb = MemoryClipboard::new();
        cb.set_text("hsl(0, 100%, 100%)").unwrap();
        assert_eq!(cb.text(), "hsl(0, 100%, 100%)");
        cb.set_text("").unwrap();
        assert_eq!(cb.text(), "");
    }
}

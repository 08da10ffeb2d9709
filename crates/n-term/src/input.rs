// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into key and mouse events. Covers what the picker
// enables in `terminal.rs`:
//
// - Control bytes and printable ASCII / UTF-8
// - Legacy CSI keys (arrows, Home/End, PageUp/PageDown, F-keys) with xterm
//   modifier parameters
// - SS3 keys (some terminals send arrows and F1–F4 this way)
// - SGR mouse reports (press / release / drag / move / wheel)
// - Alt+key (ESC followed by a printable byte)
//
// Escape sequences may be split across reads, so the parser keeps a small
// byte buffer between `advance` calls. A lone ESC stays pending until the
// caller decides no more bytes are coming and calls `flush`.

use bitflags::bitflags;

// ─── Event Types ─────────────────────────────────────────────────────────────

/// A parsed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key with no modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// Ctrl + `c`.
    #[must_use]
    pub fn is_ctrl(&self, c: char) -> bool {
        self.modifiers.contains(Modifiers::CTRL) && self.code == KeyCode::Char(c)
    }
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// F1 through F20.
    F(u8),
}

bitflags! {
    /// Modifier keys, in xterm's `1 + bitmask` parameter order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
    }
}

/// A mouse report. Coordinates are 0-indexed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press(MouseButton),
    Release(MouseButton),
    /// Motion with a button held.
    Drag(MouseButton),
    /// Motion with no button held.
    Move,
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

// ─── Parser ──────────────────────────────────────────────────────────────────

/// Incremental byte-to-event parser.
pub struct Parser {
    buf: Vec<u8>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
        }
    }

    /// Feed bytes; returns every complete event. Incomplete trailing
    /// sequences stay buffered for the next call.
    pub fn advance(&mut self, data: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match try_parse(&self.buf[pos..]) {
                Parsed::Event(event, used) => {
                    events.push(event);
                    pos += used;
                }
                Parsed::Skip(used) => pos += used,
                Parsed::Incomplete => break,
            }
        }

        self.buf.drain(..pos);
        events
    }

    /// Whether bytes are waiting on a sequence to complete.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Give up waiting: a pending lone ESC becomes the Escape key, other
    /// leftover bytes become plain keys where they make sense.
    pub fn flush(&mut self) -> Vec<Event> {
        let events = self
            .buf
            .iter()
            .filter_map(|&b| match b {
                0x1B => Some(key(KeyCode::Escape, Modifiers::empty())),
                0x20..=0x7E => Some(key(KeyCode::Char(char::from(b)), Modifiers::empty())),
                _ => None,
            })
            .collect();
        self.buf.clear();
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing ───────────────────────────────────────────────────────

enum Parsed {
    /// An event and the number of bytes it used.
    Event(Event, usize),
    /// Need more bytes.
    Incomplete,
    /// Unrecognized; drop this many bytes.
    Skip(usize),
}

const fn key(code: KeyCode, modifiers: Modifiers) -> Event {
    Event::Key(KeyEvent { code, modifiers })
}

/// Ctrl+letter from its control byte (0x01 → Ctrl-A).
fn ctrl_letter(b: u8) -> KeyCode {
    KeyCode::Char(char::from(b + b'a' - 1))
}

fn try_parse(buf: &[u8]) -> Parsed {
    let Some(&first) = buf.first() else {
        return Parsed::Incomplete;
    };
    let plain = |code| Parsed::Event(key(code, Modifiers::empty()), 1);

    match first {
        0x1B => parse_escape(buf),
        0x09 => plain(KeyCode::Tab),
        0x0A | 0x0D => plain(KeyCode::Enter),
        0x08 | 0x7F => plain(KeyCode::Backspace),
        b @ 0x01..=0x1A => Parsed::Event(key(ctrl_letter(b), Modifiers::CTRL), 1),
        b @ 0x20..=0x7E => plain(KeyCode::Char(char::from(b))),
        0xC0..=0xFF => parse_utf8(buf),
        _ => Parsed::Skip(1),
    }
}

fn parse_escape(buf: &[u8]) -> Parsed {
    let Some(&second) = buf.get(1) else {
        return Parsed::Incomplete;
    };
    match second {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        b @ 0x20..=0x7E => Parsed::Event(key(KeyCode::Char(char::from(b)), Modifiers::ALT), 2),
        0x1B => Parsed::Event(key(KeyCode::Escape, Modifiers::ALT), 2),
        _ => Parsed::Event(key(KeyCode::Escape, Modifiers::empty()), 1),
    }
}

fn parse_csi(buf: &[u8]) -> Parsed {
    match buf.get(2) {
        None => return Parsed::Incomplete,
        Some(b'<') => return parse_sgr_mouse(buf),
        Some(_) => {}
    }

    // Parameter and intermediate bytes are 0x20–0x3F, the final 0x40–0x7E.
    let mut end = 2;
    loop {
        match buf.get(end) {
            None => return Parsed::Incomplete,
            Some(0x40..=0x7E) => break,
            Some(0x20..=0x3F) => end += 1,
            Some(_) => return Parsed::Skip(end + 1),
        }
    }

    let params = parse_params(&buf[2..end]);
    let used = end + 1;
    let modifiers = params.get(1).copied().map_or(Modifiers::empty(), decode_modifiers);

    let code = match buf[end] {
        b'~' => match params.first().copied().unwrap_or(0) {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            n @ 11..=15 => fkey(n - 10),
            n @ 17..=21 => fkey(n - 11),
            n @ 23..=26 => fkey(n - 12),
            n @ 28..=29 => fkey(n - 13),
            n @ 31..=34 => fkey(n - 14),
            _ => return Parsed::Skip(used),
        },
        b'Z' => return Parsed::Event(key(KeyCode::Tab, Modifiers::SHIFT), used),
        letter => match cursor_key(letter) {
            Some(code) => code,
            None => return Parsed::Skip(used),
        },
    };

    Parsed::Event(key(code, modifiers), used)
}

/// Final bytes shared by CSI and SS3 cursor/function keys.
const fn cursor_key(b: u8) -> Option<KeyCode> {
    Some(match b {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        _ => return None,
    })
}

#[allow(clippy::cast_possible_truncation)]
const fn fkey(n: u16) -> KeyCode {
    // Callers pass 1..=20.
    KeyCode::F(n as u8)
}

fn parse_ss3(buf: &[u8]) -> Parsed {
    match buf.get(2) {
        None => Parsed::Incomplete,
        Some(&b) => cursor_key(b).map_or(Parsed::Skip(3), |code| {
            Parsed::Event(key(code, Modifiers::empty()), 3)
        }),
    }
}

/// `ESC [ < Cb ; Cx ; Cy M` (press/motion) or `... m` (release).
fn parse_sgr_mouse(buf: &[u8]) -> Parsed {
    let mut end = 3;
    loop {
        match buf.get(end) {
            None => return Parsed::Incomplete,
            Some(b'M' | b'm') => break,
            Some(b) if b.is_ascii_digit() || *b == b';' => end += 1,
            Some(_) => return Parsed::Skip(end + 1),
        }
    }

    let used = end + 1;
    let params = parse_params(&buf[3..end]);
    let [cb, cx, cy] = [0, 1, 2].map(|i| params.get(i).copied().unwrap_or(0));

    let mut modifiers = Modifiers::empty();
    for (bit, flag) in [(4, Modifiers::SHIFT), (8, Modifiers::ALT), (16, Modifiers::CTRL)] {
        if cb & bit != 0 {
            modifiers |= flag;
        }
    }

    let button = match cb & 3 {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Middle),
        2 => Some(MouseButton::Right),
        _ => None,
    };

    let kind = if cb & 64 != 0 {
        if cb & 1 == 0 {
            MouseEventKind::ScrollUp
        } else {
            MouseEventKind::ScrollDown
        }
    } else if cb & 32 != 0 {
        button.map_or(MouseEventKind::Move, MouseEventKind::Drag)
    } else {
        let button = button.unwrap_or(MouseButton::Left);
        if buf[end] == b'm' {
            MouseEventKind::Release(button)
        } else {
            MouseEventKind::Press(button)
        }
    };

    Parsed::Event(
        Event::Mouse(MouseEvent {
            kind,
            x: cx.saturating_sub(1),
            y: cy.saturating_sub(1),
            modifiers,
        }),
        used,
    )
}

fn parse_utf8(buf: &[u8]) -> Parsed {
    let len = match buf[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Parsed::Skip(1),
    };
    let Some(bytes) = buf.get(..len) else {
        return Parsed::Incomplete;
    };
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(Parsed::Skip(1), |ch| {
            Parsed::Event(key(KeyCode::Char(ch), Modifiers::empty()), len)
        })
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Semicolon-separated decimal parameters. Colon sub-parameters are
/// ignored; empty parameters read as 0.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &d| acc.saturating_mul(10).saturating_add(u16::from(d - b'0')))
        })
        .collect()
}

/// xterm modifier parameter: `1 + bitmask`; 0 and 1 mean none.
#[allow(clippy::cast_possible_truncation)]
const fn decode_modifiers(param: u16) -> Modifiers {
    Modifiers::from_bits_truncate(param.saturating_sub(1) as u8)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop: stdin bytes in, frames out.
//
// Bytes arrive from the background reader, the parser turns them into
// events, the App updates itself, and if anything changed the App paints a
// fresh FrameBuffer that the diff renderer turns into a minimal update.
//
// The loop blocks on the reader's channel with a timeout (8.3 ms by
// default, 120 Hz). Input is handled the moment it arrives, an idle picker
// sleeps in `recv_timeout`, and the timeout doubles as the lone-ESC
// deadline: if nothing followed an ESC within one tick, it was the Escape
// key.
//
// SIGWINCH sets an AtomicBool; the loop checks it every iteration, resizes
// the frame and forces a full redraw.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::diff::DiffRenderer;
use crate::input::{Event, Parser};
use crate::reader::StdinReader;
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
fn install_sigwinch_handler() {
    // SAFETY: the handler only stores to an atomic, which is
    // async-signal-safe.
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
const fn install_sigwinch_handler() {}

// ─── App ─────────────────────────────────────────────────────────────────────

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    /// Throw away the previous frame and repaint every cell.
    Redraw,
    Quit,
}

/// The application driven by [`EventLoop`].
///
/// Per iteration: `on_event` for each input event, `on_resize` if the
/// window changed, `on_tick`, then `paint` if anything asked for a
/// repaint. The cursor stays hidden throughout.
pub trait App {
    fn on_event(&mut self, _event: &Event) -> Action {
        Action::Continue
    }

    /// Called after the frame has been resized to `size`.
    fn on_resize(&mut self, _size: Size) {}

    /// Once per iteration, input or not. Return `true` to repaint.
    fn on_tick(&mut self) -> bool {
        false
    }

    /// Paint everything into a cleared buffer.
    fn paint(&mut self, buf: &mut FrameBuffer);
}

// ─── LoopConfig ──────────────────────────────────────────────────────────────

/// Loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// `recv_timeout` duration in microseconds: tick period and lone-ESC
    /// deadline.
    pub tick_interval_us: u64,
}

impl LoopConfig {
    pub const DEFAULT_TICK_US: u64 = 8333;
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval_us: Self::DEFAULT_TICK_US,
        }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// Owns the terminal, parser and renderer; runs an [`App`] until it quits.
///
/// ```no_run
/// use n_term::buffer::FrameBuffer;
/// use n_term::event_loop::{Action, App, EventLoop};
/// use n_term::input::{Event, KeyCode};
///
/// struct Quitter;
///
/// impl App for Quitter {
///     fn on_event(&mut self, event: &Event) -> Action {
///         match event {
///             Event::Key(k) if k.code == KeyCode::Char('q') => Action::Quit,
///             _ => Action::Continue,
///         }
///     }
///
///     fn paint(&mut self, _buf: &mut FrameBuffer) {}
/// }
///
/// EventLoop::new().run(&mut Quitter)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    renderer: DiffRenderer,
    config: LoopConfig,
}

/// Outcome of feeding a batch of events to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispatch {
    Idle,
    Dirty,
    Redraw,
    Quit,
}

fn dispatch(app: &mut impl App, events: &[Event]) -> Dispatch {
    let mut outcome = if events.is_empty() {
        Dispatch::Idle
    } else {
        Dispatch::Dirty
    };
    for event in events {
        match app.on_event(event) {
            Action::Quit => return Dispatch::Quit,
            Action::Redraw => outcome = Dispatch::Redraw,
            Action::Continue => {}
        }
    }
    outcome
}

impl EventLoop {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoopConfig::default())
    }

    #[must_use]
    pub fn with_config(config: LoopConfig) -> Self {
        Self {
            terminal: Terminal::new(),
            parser: Parser::new(),
            renderer: DiffRenderer::new(),
            config,
        }
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> LoopConfig {
        self.config
    }

    /// Enter the terminal, run `app` until it quits, and restore the
    /// terminal whether or not the loop failed.
    ///
    /// # Errors
    ///
    /// Returns an error if entering/leaving the terminal, spawning the
    /// reader, or writing a frame fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let result = StdinReader::spawn().and_then(|(mut reader, rx)| {
            let result = self.run_inner(app, &rx);
            reader.stop();
            result
        });

        self.terminal.leave()?;
        result
    }

    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let size = self.terminal.size();
        app.on_resize(size);
        let mut frame = FrameBuffer::new(size.cols, size.rows);
        let timeout = Duration::from_micros(self.config.tick_interval_us);
        let mut dirty = true;

        loop {
            let events = match rx.recv_timeout(timeout) {
                Ok(bytes) => self.parser.advance(&bytes),
                Err(RecvTimeoutError::Timeout) if self.parser.has_pending() => self.parser.flush(),
                Err(RecvTimeoutError::Timeout) => Vec::new(),
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            };

            match dispatch(app, &events) {
                Dispatch::Quit => return Ok(()),
                Dispatch::Redraw => {
                    self.renderer.force_redraw();
                    dirty = true;
                }
                Dispatch::Dirty => dirty = true,
                Dispatch::Idle => {}
            }

            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let size = self.terminal.refresh_size();
                frame.resize(size.cols, size.rows);
                self.renderer.force_redraw();
                app.on_resize(size);
                dirty = true;
            }

            dirty |= app.on_tick();

            if dirty {
                frame.clear();
                app.paint(&mut frame);
                self.renderer.render(&frame);
                self.renderer.flush()?;

                let mut out = io::stdout().lock();
                ansi::cursor_hide(&mut out)?;
                out.flush()?;
                dirty = false;
            }
        }
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

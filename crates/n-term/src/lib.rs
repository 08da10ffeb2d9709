// SPDX-License-Identifier: MIT
//
// n-term — the terminal layer under n-pick.
//
// Raw termios, hand-written ANSI, SGR mouse, and a differential renderer:
// the picker paints a full frame of cells each time something changes and
// only the cells that differ from the last frame are written. No TUI
// framework in between; every escape sequence sent is one of ours.
//
//   color       CellColor, the per-cell color value
//   cell        Cell and text attributes
//   buffer      FrameBuffer, clipping, box drawing
//   ansi        escape sequence encoders (incl. OSC 52 clipboard)
//   output      OutputBuffer and the state-tracking CellWriter
//   diff        DiffRenderer
//   input       byte → key/mouse event parser
//   reader      stdin reader thread
//   terminal    raw mode, alternate screen, panic-safe restore
//   event_loop  App trait and the run loop

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod diff;
pub mod event_loop;
pub mod input;
pub mod output;
pub mod reader;
pub mod terminal;

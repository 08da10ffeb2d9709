// SPDX-License-Identifier: MIT
//
// n-color — the color core behind n-pick.
//
// Everything here is pure and terminal-agnostic: integer RGB/HSV math, the
// reconciled color state the widgets edit, the saturation/value gradient,
// and the pointer capture protocol that drags it. The binary owns the
// terminal and feeds events in; this crate never touches I/O.
//
//   math      8-bit RGB ↔ HSV conversions
//   state     ColorState and its snapshot/reconcile cycle
//   format    hex / rgb() / hsl() / hwb() / cmyk() text
//   parse     color strings → Rgb
//   area      the grid's last painted rectangle
//   gradient  GradientGrid and the selection marker
//   capture   the single mouse capture slot
//   pointer   PointerController state machine

pub mod area;
pub mod capture;
pub mod format;
pub mod gradient;
pub mod math;
pub mod parse;
pub mod pointer;
pub mod state;

pub use area::GridArea;
pub use capture::{CaptureOwner, CaptureSlot};
pub use format::Encoding;
pub use gradient::{GradientGrid, GridCell, Half, Marker};
pub use math::{Hsv, Rgb, hsv_to_rgb, rgb_to_hsv};
pub use parse::{ParseColorError, parse};
pub use pointer::{
    CaptureState, PointerButton, PointerController, PointerEvent, PointerKind, PointerResponse,
};
pub use state::{Channel, ColorState, Family, Snapshot};

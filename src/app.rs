// SPDX-License-Identifier: MIT
//
// PickerApp — the picker's n-term `App`.
//
// Owns the color state, the pointer controller and its capture slot, the six
// sliders, the copy buttons and the clipboard. Every input event runs inside
// exactly one snapshot/reconcile cycle, so whatever a widget writes (h, s, v
// or r, g, b) the other family is recomputed before the next paint.
//
// Layout (window at most 80 columns wide, anchored top-left):
//
//   ╭──────────────────── n-pick ────────────────────╮
//   │▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀│  16 rows: gradient
//   ├────────────────────┬───────────────────────────┤
//   │                    │Hue:        ████──────────│
//   │   20 × 7 tile      │Saturation: ██████████────│
//   │                    │Value:      ██████████████│
//   │                    ├──────────────────────────┤
//   │                    │Red:        ██████████████│
//   │                    │Green:      ──────────────│
//   │                    │Blue:       ──────────────│
//   ├────────────────────── Copy ────────────────────┤
//   │ #FF0000   rgb(255, 0, 0)   hsl(0, 100%, 100%) │
//   │                                                │
//   │ hwb(0, 0%, 0%)   cmyk(0%, 100%, 100%, 0%)      │
//   ├─────────────────── Clipboard ──────────────────┤
//   │#FF0000                                         │
//   ╰────────────────────────────────────────────────╯
//
// Hit rectangles (grid area, slider bars, buttons) are recorded while
// painting and used by the next event, so pointer handling always matches
// what is on screen.

use n_color::gradient::GRID_ROWS;
use n_color::{CaptureSlot, Channel, ColorState, Encoding, GradientGrid, GridArea, Rgb};
use n_color::{PointerButton, PointerController, PointerEvent, PointerKind};
use n_color::format;
use n_term::buffer::{BorderStyle, ClipRect, FrameBuffer, string_width};
use n_term::cell::{Attr, Cell};
use n_term::color::CellColor;
use n_term::event_loop::{Action, App};
use n_term::input::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
use n_term::terminal::Size;

use crate::clipboard::Clipboard;
use crate::slider::Slider;

// ─── Layout ──────────────────────────────────────────────────────────────────

const MAX_WIDTH: u16 = 80;
const TITLE: &str = " n-pick ";

#[allow(clippy::cast_possible_truncation)]
const GRID_HEIGHT: u16 = GRID_ROWS as u16;
const TILE_WIDTH: u16 = 20;
const TILE_HEIGHT: u16 = 7;

const GRID_TOP: u16 = 1;
const CONTROLS_SEP: u16 = GRID_TOP + GRID_HEIGHT;
const CONTROLS_TOP: u16 = CONTROLS_SEP + 1;
const COPY_SEP: u16 = CONTROLS_TOP + TILE_HEIGHT;
const BUTTON_ROWS: [u16; 2] = [COPY_SEP + 1, COPY_SEP + 3];
const CLIPBOARD_SEP: u16 = COPY_SEP + 4;
const CLIPBOARD_LINE: u16 = CLIPBOARD_SEP + 1;

/// Total window height, borders included.
pub const WINDOW_HEIGHT: u16 = CLIPBOARD_LINE + 2;

/// Copy buttons per row, in `Encoding::ALL` order: hex rgb hsl / hwb cmyk.
const BUTTONS_PER_ROW: [usize; 2] = [3, 2];

const BORDER_FG: CellColor = CellColor::GRAY;
const BUTTON_BG: CellColor = CellColor::Ansi256(238);
const BUTTON_FOCUS_BG: CellColor = CellColor::Ansi256(250);

#[inline]
const fn cell_color(rgb: Rgb) -> CellColor {
    CellColor::Rgb(rgb.r, rgb.g, rgb.b)
}

// ─── Focus ───────────────────────────────────────────────────────────────────

/// Keyboard focus. Tab order: grid, the six sliders, the five buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Grid,
    /// Index into [`Channel::ALL`].
    Slider(usize),
    /// Index into [`Encoding::ALL`].
    Button(usize),
}

impl Focus {
    const SLIDERS: usize = Channel::ALL.len();
    const BUTTONS: usize = Encoding::ALL.len();
    const RING: usize = 1 + Self::SLIDERS + Self::BUTTONS;

    const fn index(self) -> usize {
        match self {
            Self::Grid => 0,
            Self::Slider(i) => 1 + i,
            Self::Button(i) => 1 + Self::SLIDERS + i,
        }
    }

    const fn from_index(i: usize) -> Self {
        let i = i % Self::RING;
        if i == 0 {
            Self::Grid
        } else if i <= Self::SLIDERS {
            Self::Slider(i - 1)
        } else {
            Self::Button(i - 1 - Self::SLIDERS)
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        Self::from_index(self.index() + Self::RING - 1)
    }
}

// ─── Copy buttons ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct CopyButton {
    encoding: Encoding,
    rect: Option<ClipRect>,
}

// ─── PickerApp ───────────────────────────────────────────────────────────────

pub struct PickerApp {
    color: ColorState,
    pointer: PointerController,
    slot: CaptureSlot,
    /// The gradient's rectangle as of the last paint.
    area: GridArea,
    sliders: [Slider; 6],
    buttons: [CopyButton; 5],
    focus: Focus,
    clipboard: Box<dyn Clipboard>,
    /// Last text read back from the clipboard.
    clipboard_line: String,
}

impl PickerApp {
    #[must_use]
    pub fn new(initial: Rgb, clipboard: Box<dyn Clipboard>) -> Self {
        let clipboard_line = clipboard.text();
        Self {
            color: ColorState::new(initial),
            pointer: PointerController::new(),
            slot: CaptureSlot::new(),
            area: GridArea::INITIAL,
            sliders: Channel::ALL.map(Slider::new),
            buttons: Encoding::ALL.map(|encoding| CopyButton {
                encoding,
                rect: None,
            }),
            focus: Focus::Grid,
            clipboard,
            clipboard_line,
        }
    }

    #[inline]
    #[must_use]
    pub const fn color(&self) -> &ColorState {
        &self.color
    }

    #[inline]
    #[must_use]
    pub fn clipboard_line(&self) -> &str {
        &self.clipboard_line
    }

    /// Route one event through a reconciliation cycle. Returns whether any
    /// widget consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let before = self.color.snapshot();
        let consumed = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
        };
        self.color.reconcile(before);
        consumed
    }

    /// Copy button `i`'s encoding, then re-read the clipboard.
    fn copy(&mut self, i: usize) {
        let Some(encoding) = self.buttons.get(i).map(|b| b.encoding) else {
            return;
        };
        let text = encoding.encode(self.color.rgb(), self.color.hsv());
        match self.clipboard.set_text(&text) {
            Ok(()) => log::info!("copied {encoding}: {text}"),
            Err(e) => log::warn!("copy {encoding} failed: {e}"),
        }
        self.clipboard_line = self.clipboard.text();
    }

    // ── Keyboard ────────────────────────────────────────────────────

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.code == KeyCode::Tab {
            self.focus = if key.modifiers.contains(Modifiers::SHIFT) {
                self.focus.prev()
            } else {
                self.focus.next()
            };
            return true;
        }

        match self.focus {
            Focus::Grid => {
                let (channel, delta) = match key.code {
                    KeyCode::Left => (Channel::Value, -1),
                    KeyCode::Right => (Channel::Value, 1),
                    KeyCode::Up => (Channel::Saturation, -1),
                    KeyCode::Down => (Channel::Saturation, 1),
                    _ => return false,
                };
                self.color.nudge(channel, delta);
                true
            }
            Focus::Slider(i) => {
                let channel = self.sliders[i].channel();
                match key.code {
                    KeyCode::Left => self.color.nudge(channel, -1),
                    KeyCode::Right => self.color.nudge(channel, 1),
                    KeyCode::Up => self.focus = self.focus.prev(),
                    KeyCode::Down => self.focus = self.focus.next(),
                    _ => return false,
                }
                true
            }
            Focus::Button(i) => {
                match key.code {
                    KeyCode::Left | KeyCode::Up => self.focus = self.focus.prev(),
                    KeyCode::Right | KeyCode::Down => self.focus = self.focus.next(),
                    KeyCode::Enter | KeyCode::Char(' ') => self.copy(i),
                    _ => return false,
                }
                true
            }
        }
    }

    // ── Mouse ───────────────────────────────────────────────────────

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        let Some(event) = pointer_event(mouse) else {
            return false;
        };

        let response = self
            .pointer
            .handle(event, self.area, &mut self.slot, &mut self.color);
        if response.wants_focus() {
            self.focus = Focus::Grid;
        }
        if response.is_consumed() {
            return true;
        }

        for (i, slider) in self.sliders.iter_mut().enumerate() {
            let response = slider.handle_pointer(event, &mut self.slot, &mut self.color);
            if response.wants_focus() {
                self.focus = Focus::Slider(i);
            }
            if response.is_consumed() {
                return true;
            }
        }

        if event.kind == PointerKind::Press(PointerButton::Left) && self.slot.is_free() {
            let hit = self
                .buttons
                .iter()
                .position(|b| b.rect.is_some_and(|r| r.contains(event.x, event.y)));
            if let Some(i) = hit {
                self.focus = Focus::Button(i);
                self.copy(i);
                return true;
            }
        }
        false
    }

    // ── Paint ───────────────────────────────────────────────────────

    fn paint_grid(&mut self, buf: &mut FrameBuffer, x: u16, width: u16) {
        self.area = GridArea::from_origin_size(x, GRID_TOP, width, GRID_HEIGHT);
        let grid = GradientGrid::for_area(self.color.hsv(), self.area);
        let clip = ClipRect::from_unsigned(x, GRID_TOP, width, GRID_HEIGHT);

        for (row_y, row) in (GRID_TOP..).zip(grid.iter_rows()) {
            for (col, col_x) in (0..row.len()).zip(x..) {
                let Some((top, bottom)) = grid.paint_colors(col, usize::from(row_y - GRID_TOP))
                else {
                    continue;
                };
                if clip.contains(col_x, row_y) {
                    buf.set(col_x, row_y, Cell::half_block(cell_color(top), cell_color(bottom)));
                }
            }
        }
    }

    fn paint_tile(&self, buf: &mut FrameBuffer, x: u16, clip: &ClipRect) {
        let rgb = self.color.rgb();
        let bg = cell_color(rgb);
        let rect = ClipRect::from_unsigned(x, CONTROLS_TOP, TILE_WIDTH, TILE_HEIGHT);
        buf.fill_rect(rect, bg, Some(clip));

        let fg = bg.contrast();
        let labels = [
            format::rgb_label(rgb),
            format::hsv_label(self.color.hsv()),
        ];
        for (dy, label) in [2, 4].into_iter().zip(&labels) {
            buf.paint_centered(
                x,
                CONTROLS_TOP + dy,
                TILE_WIDTH,
                label,
                fg,
                bg,
                Attr::empty(),
                Some(clip),
            );
        }
    }

    fn paint_sliders(&mut self, buf: &mut FrameBuffer, x: u16, width: u16, right: u16) {
        let rows = [0, 1, 2, 4, 5, 6];
        for ((i, slider), dy) in self.sliders.iter_mut().enumerate().zip(rows) {
            let focused = self.focus == Focus::Slider(i);
            slider.paint(buf, x, CONTROLS_TOP + dy, width, &self.color, focused);
        }
        // Between the HSV and RGB families.
        let sep_width = (right + 1).saturating_sub(x - 1);
        buf.draw_separator(
            x - 1,
            CONTROLS_TOP + 3,
            sep_width,
            BorderStyle::Single,
            BORDER_FG,
            Attr::empty(),
        );
    }

    fn paint_buttons(&mut self, buf: &mut FrameBuffer, x: u16, clip: &ClipRect) {
        let (rgb, hsv) = (self.color.rgb(), self.color.hsv());
        let mut buttons = self.buttons.iter_mut().enumerate();
        for (row, count) in BUTTON_ROWS.into_iter().zip(BUTTONS_PER_ROW) {
            let mut col = x;
            for (index, button) in buttons.by_ref().take(count) {
                let text = format!(" {} ", button.encoding.encode(rgb, hsv));
                let width = u16::try_from(string_width(&text)).unwrap_or(u16::MAX);
                let (fg, bg, attrs) = if self.focus == Focus::Button(index) {
                    (CellColor::BLACK, BUTTON_FOCUS_BG, Attr::BOLD)
                } else {
                    (CellColor::Default, BUTTON_BG, Attr::empty())
                };
                buf.paint_text(col, row, &text, fg, bg, attrs, Some(clip));
                button.rect = ClipRect::from_unsigned(col, row, width, 1).intersect(*clip);
                col = col.saturating_add(width).saturating_add(1);
            }
        }
    }

    fn paint_section(buf: &mut FrameBuffer, y: u16, width: u16, title: &str) {
        buf.draw_separator(0, y, width, BorderStyle::Single, BORDER_FG, Attr::empty());
        let inner = ClipRect::from_unsigned(1, y, width.saturating_sub(2), 1);
        buf.paint_centered(
            1,
            y,
            width.saturating_sub(2),
            title,
            CellColor::Default,
            CellColor::Default,
            Attr::BOLD,
            Some(&inner),
        );
    }
}

/// Translate an n-term mouse report into the core's pointer event.
/// Wheel events have no meaning for the picker.
const fn pointer_event(mouse: &MouseEvent) -> Option<PointerEvent> {
    const fn button(b: MouseButton) -> PointerButton {
        match b {
            MouseButton::Left => PointerButton::Left,
            MouseButton::Middle => PointerButton::Middle,
            MouseButton::Right => PointerButton::Right,
        }
    }
    let kind = match mouse.kind {
        MouseEventKind::Press(b) => PointerKind::Press(button(b)),
        MouseEventKind::Release(_) => PointerKind::Release,
        MouseEventKind::Drag(b) => PointerKind::Drag(button(b)),
        MouseEventKind::Move => PointerKind::Move,
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => return None,
    };
    Some(PointerEvent::new(kind, mouse.x, mouse.y))
}

const fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Escape)
        || (matches!(key.code, KeyCode::Char('q')) && key.modifiers.is_empty())
        || (matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(Modifiers::CTRL))
}

// ─── App implementation ──────────────────────────────────────────────────────

impl App for PickerApp {
    fn on_event(&mut self, event: &Event) -> Action {
        if let Event::Key(key) = event {
            if is_quit(key) {
                return Action::Quit;
            }
            if key.is_ctrl('l') {
                return Action::Redraw;
            }
        }

        if !self.handle_event(event) {
            log::trace!("unhandled {event:?}");
        }
        Action::Continue
    }

    fn on_resize(&mut self, size: Size) {
        log::debug!("terminal is {}x{}", size.cols, size.rows);
    }

    fn paint(&mut self, buf: &mut FrameBuffer) {
        let width = buf.width().min(MAX_WIDTH);
        if width < 3 || buf.height() < 3 {
            return;
        }
        let inner_w = width - 2;
        let window = ClipRect::from_unsigned(0, 0, width, WINDOW_HEIGHT);
        let Some(inner) = window.inset(1).intersect(buf.bounds()) else {
            return;
        };

        buf.draw_box(window, BorderStyle::Rounded, Some(TITLE), BORDER_FG, Attr::empty());

        self.paint_grid(buf, 1, inner_w);

        // Tile on the left, sliders on the right of a vertical rule.
        buf.draw_separator(0, CONTROLS_SEP, width, BorderStyle::Single, BORDER_FG, Attr::empty());
        self.paint_tile(buf, 1, &inner);
        let rule_x = 1 + TILE_WIDTH;
        if rule_x < width - 1 {
            buf.paint_cell(rule_x, CONTROLS_SEP, '┬', BORDER_FG, CellColor::Default, Attr::empty(), None);
            buf.draw_vline(rule_x, CONTROLS_TOP, TILE_HEIGHT, BORDER_FG, Attr::empty());
            let slider_x = rule_x + 1;
            let slider_w = (width - 1).saturating_sub(slider_x);
            self.paint_sliders(buf, slider_x, slider_w, width - 1);
        } else {
            // No room for sliders: a zero-width paint drops their hit areas.
            for slider in &mut self.sliders {
                slider.paint(buf, 0, 0, 0, &self.color, false);
            }
        }

        Self::paint_section(buf, COPY_SEP, width, " Copy ");
        // The vertical rule ends on the section line.
        if rule_x < width - 1 {
            buf.paint_cell(rule_x, COPY_SEP, '┴', BORDER_FG, CellColor::Default, Attr::empty(), None);
        }
        self.paint_buttons(buf, 2, &inner);

        Self::paint_section(buf, CLIPBOARD_SEP, width, " Clipboard ");
        buf.paint_text(
            1,
            CLIPBOARD_LINE,
            self.clipboard_line(),
            CellColor::Default,
            CellColor::Default,
            Attr::empty(),
            Some(&inner),
        );
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

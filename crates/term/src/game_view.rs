//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O) and unit-tested. Only rows from `top_row`
//! down are drawn; the dead spawn rows above the field stay off screen.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{CellState, Color, Coord};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PANEL_GAP: u16 = 2;
const PANEL_W: u16 = 16;

const GEM: char = '◆';
const EMPTY: char = '·';

const BG: Rgb = Rgb::new(24, 24, 32);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 90);
const SELECTED_BG: Rgb = Rgb::new(150, 150, 60);

/// Renders the board, the cursor and a side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps the grid roughly square.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Terminal position of the top-left frame corner for `snap`.
    pub fn origin(&self, snap: &GameSnapshot, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size(snap);
        let total_w = frame_w.saturating_add(PANEL_GAP + PANEL_W);
        (
            viewport.width.saturating_sub(total_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        let rows = snap.height.saturating_sub(snap.top_row);
        (
            snap.width.saturating_mul(self.cell_w).saturating_add(2),
            rows.saturating_add(2),
        )
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Coord>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default());

        let (frame_w, frame_h) = self.frame_size(snap);
        let (ox, oy) = self.origin(snap, viewport);
        let border = Style::new(Rgb::new(190, 190, 200), Rgb::new(0, 0, 0));
        fb.draw_box(ox, oy, frame_w, frame_h, border);

        for y in snap.top_row..snap.height {
            for x in 0..snap.width {
                let Some(cell) = snap.cell(x, y) else {
                    continue;
                };
                let at = Coord::new(x as i16, y as i16);
                let (ch, mut style) = match cell {
                    CellState::Dead => (' ', Style::default()),
                    CellState::Empty => (EMPTY, Style::new(Rgb::new(80, 80, 90), BG)),
                    CellState::Occupied(color) => (GEM, Style::new(gem_rgb(color), BG).bold()),
                };
                if cell.is_playable() {
                    if snap.selected == Some(at) {
                        style.bg = SELECTED_BG;
                    } else if cursor == Some(at) {
                        style.bg = CURSOR_BG;
                    }
                }

                let px = ox.saturating_add(1).saturating_add(x.saturating_mul(self.cell_w));
                let py = oy.saturating_add(1).saturating_add(y - snap.top_row);
                fb.fill_rect(px, py, self.cell_w, 1, ' ', style);
                fb.put_char(px, py, ch, style);
            }
        }

        let panel_x = ox.saturating_add(frame_w).saturating_add(PANEL_GAP);
        self.draw_side_panel(fb, snap, panel_x, oy);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, cursor: Option<Coord>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = Style::new(Rgb::new(150, 150, 160), Rgb::new(0, 0, 0));
        let value = Style::new(Rgb::new(240, 240, 240), Rgb::new(0, 0, 0)).bold();

        fb.put_str(x, y, "GEMS", value);
        let stats = [
            ("SWAPS", snap.swaps),
            ("PASSES", snap.passes),
            ("CLEARED", snap.cleared),
            ("SEED", snap.seed),
            ("EPISODE", snap.episode_id),
        ];
        for (i, (name, n)) in stats.into_iter().enumerate() {
            let row = y.saturating_add(2 + i as u16);
            fb.put_str(x, row, name, label);
            fb.put_u32(x.saturating_add(8), row, n, value);
        }

        let (state, state_style) = if snap.interactive() {
            ("READY", Style::new(Rgb::new(120, 220, 120), Rgb::new(0, 0, 0)).bold())
        } else {
            ("BUSY", Style::new(Rgb::new(230, 160, 80), Rgb::new(0, 0, 0)).bold())
        };
        fb.put_str(x, y.saturating_add(8), state, state_style);

        let help = Style::new(Rgb::new(110, 110, 120), Rgb::new(0, 0, 0)).dim();
        fb.put_str(x, y.saturating_add(10), "arrows  move", help);
        fb.put_str(x, y.saturating_add(11), "space   pick", help);
        fb.put_str(x, y.saturating_add(12), "r       restart", help);
        fb.put_str(x, y.saturating_add(13), "q       quit", help);
    }
}

fn gem_rgb(color: Color) -> Rgb {
    match color {
        Color::Blue => Rgb::new(70, 130, 240),
        Color::Purple => Rgb::new(170, 90, 220),
        Color::Red => Rgb::new(230, 60, 60),
        Color::Yellow => Rgb::new(240, 220, 70),
        Color::Orange => Rgb::new(245, 150, 40),
        Color::Green => Rgb::new(80, 200, 90),
    }
}

//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout: the board frame is centered horizontally, with the side panel
//! (score, best, move count, controls, keys) to its right when it fits. A status
//! line sits under the board.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, GRID_SIZE};

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

/// Front-end state that is not part of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// The full wipe prompt is showing
    pub confirm_wipe: bool,
}

const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

/// Background and text color for a tile value
pub fn tile_colors(value: u32) -> (Rgb, Rgb) {
    let bg = match value {
        2 => Rgb::new(238, 228, 218),
        4 => Rgb::new(237, 224, 200),
        8 => Rgb::new(242, 177, 121),
        16 => Rgb::new(245, 149, 99),
        32 => Rgb::new(246, 124, 95),
        64 => Rgb::new(246, 94, 59),
        128 => Rgb::new(237, 207, 114),
        256 => Rgb::new(237, 204, 97),
        512 => Rgb::new(237, 200, 80),
        1024 => Rgb::new(237, 197, 63),
        2048 => Rgb::new(237, 194, 46),
        0 => EMPTY_BG,
        _ => Rgb::new(60, 58, 50),
    };
    let fg = if value <= 4 { DARK_TEXT } else { LIGHT_TEXT };
    (bg, fg)
}

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 fits "65536" with padding and looks roughly square.
        Self {
            cell_w: 7,
            cell_h: 3,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Board frame size including the border
    pub fn frame_size(&self) -> (u16, u16) {
        let n = GRID_SIZE as u16;
        (n * self.cell_w + 2, n * self.cell_h + 2)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        state: ViewState,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        // Leave room for the status line below the board.
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h + 2) / 2;

        let board = CellStyle::new(BOARD_BG, BOARD_BG);
        fb.fill_rect(start_x, start_y, frame_w, frame_h, ' ', board);
        fb.draw_box(
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG),
        );

        for (row, values) in snap.grid.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                self.draw_tile(fb, start_x, start_y, row as u16, col as u16, value);
            }
        }

        self.draw_status(fb, snap, state, start_x, start_y + frame_h, frame_w);
        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, state: ViewState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, state, viewport, &mut fb);
        fb
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u16,
        col: u16,
        value: u32,
    ) {
        let (bg, fg) = tile_colors(value);
        let x = start_x + 1 + col * self.cell_w;
        let y = start_y + 1 + row * self.cell_h;

        // One column of board color between tiles when there is room.
        let gap = u16::from(self.cell_w > 3);
        let style = CellStyle::new(fg, bg).bold();
        fb.fill_rect(x, y, self.cell_w - gap, self.cell_h, ' ', style);
        if value != 0 {
            let label = value.to_string();
            fb.put_centered(x, y + self.cell_h / 2, self.cell_w - gap, &label, style);
        } else if self.cell_h == 1 {
            fb.put_centered(x, y, self.cell_w - gap, "·", style.dim());
        }
    }

    fn draw_status(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        state: ViewState,
        x: u16,
        y: u16,
        w: u16,
    ) {
        let style = CellStyle::default().bold();
        if state.confirm_wipe {
            let warn = CellStyle::new(Rgb::new(255, 120, 100), SCREEN_BG).bold();
            fb.put_centered(x, y, w, "Clear game and best? y/n", warn);
            return;
        }
        match snap.status {
            GameStatus::Playing => {}
            GameStatus::Won => {
                fb.put_centered(x, y, w, "YOU WIN! Keep going", style);
            }
            GameStatus::GameOver => {
                fb.put_centered(x, y, w, "GAME OVER  (n: new game)", style);
            }
            GameStatus::Replaying => {
                let (done, total) = snap.replay_progress.unwrap_or((0, 0));
                fb.put_centered(x, y, w, &format!("REPLAY {done}/{total}"), style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let mut y = start_y;

        for (name, n) in [
            ("SCORE", snap.score.current),
            ("BEST", snap.score.best),
            ("MOVES", snap.move_count),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y + 1, &n.to_string(), value);
            y += 3;
        }

        let controls = snap.controls;
        for (key, name, enabled) in [
            ("u", "undo", controls.undo),
            ("r", "redo", controls.redo),
            ("p", "replay", controls.replay),
            ("n", "new", controls.reset),
        ] {
            let style = if enabled { value } else { value.dim() };
            let x = fb.put_str(panel_x, y, key, label);
            fb.put_str(x + 1, y, name, style);
            y += 1;
        }
        y += 1;
        fb.put_str(panel_x, y, "X clear all", value.dim());
        fb.put_str(panel_x, y + 1, "q quit", value.dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Score;
    use crate::types::ControlStates;

    fn snapshot() -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        snap.grid[0][0] = 2;
        snap.grid[3][3] = 2048;
        snap.score = Score::new(120, 400);
        snap.controls = ControlStates {
            undo: true,
            redo: false,
            replay: true,
            reset: true,
        };
        snap
    }

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_tile_values_are_drawn() {
        let fb = GameView::default().render(&snapshot(), ViewState::default(), Viewport::new(80, 24));
        let text = screen_text(&fb);
        assert!(text.contains("2048"));
        assert!(text.contains("SCORE"));
        assert!(text.contains("120"));
        assert!(text.contains("400"));
    }

    #[test]
    fn test_tile_color_follows_value() {
        let view = GameView::default();
        let fb = view.render(&snapshot(), ViewState::default(), Viewport::new(80, 24));
        let (frame_w, frame_h) = view.frame_size();
        let start_x = (80 - frame_w) / 2;
        let start_y = (24 - (frame_h + 2)) / 2;

        let two = fb.get(start_x + 1, start_y + 1).unwrap();
        assert_eq!(two.style.bg, tile_colors(2).0);
        let empty = fb.get(start_x + 1 + 7, start_y + 1).unwrap();
        assert_eq!(empty.style.bg, EMPTY_BG);
    }

    #[test]
    fn test_disabled_controls_are_dim() {
        let fb = GameView::default().render(&snapshot(), ViewState::default(), Viewport::new(80, 24));
        let find = |word: &str| {
            (0..fb.height()).find_map(|y| {
                fb.row_text(y)
                    .find(word)
                    .map(|x| fb.get(fb.row_text(y)[..x].chars().count() as u16, y).unwrap())
            })
        };
        assert!(!find("undo").unwrap().style.dim);
        assert!(find("redo").unwrap().style.dim);
    }

    #[test]
    fn test_status_lines() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);

        let mut snap = snapshot();
        snap.status = GameStatus::GameOver;
        assert!(screen_text(&view.render(&snap, ViewState::default(), vp)).contains("GAME OVER"));

        snap.status = GameStatus::Replaying;
        snap.replay_progress = Some((3, 9));
        assert!(screen_text(&view.render(&snap, ViewState::default(), vp)).contains("REPLAY 3/9"));

        let prompt = ViewState { confirm_wipe: true };
        assert!(screen_text(&view.render(&snap, prompt, vp)).contains("y/n"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let view = GameView::default();
        for (w, h) in [(0, 0), (1, 1), (10, 4), (30, 10)] {
            let fb = view.render(&snapshot(), ViewState::default(), Viewport::new(w, h));
            assert_eq!(fb.width(), w);
            assert_eq!(fb.height(), h);
        }
    }

    #[test]
    fn test_compact_cells() {
        let view = GameView::new(5, 1);
        assert_eq!(view.frame_size(), (22, 6));
        let fb = view.render(&snapshot(), ViewState::default(), Viewport::new(40, 10));
        assert!(screen_text(&fb).contains("2048"));
    }
}

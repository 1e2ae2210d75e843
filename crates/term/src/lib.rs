//! Terminal "game renderer" module.
//!
//! Renders [`GameSnapshot`](core::GameSnapshot)s into a simple framebuffer
//! that is then flushed to the terminal. There are no widgets or layout
//! engines; the board, side panel and status line are drawn cell by cell.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: snapshot → framebuffer (pure, unit-tested)
//! - [`renderer`]: framebuffer → terminal, redrawing only changed cells

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_colors, GameView, ViewState, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};

//! Terminal rendering for the gem board.
//!
//! Renders into a plain framebuffer that is diffed and flushed through
//! crossterm, without a widget/layout library.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_gems_core as core;
pub use tui_gems_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

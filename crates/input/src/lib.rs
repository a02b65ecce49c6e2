//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::InputAction`] and keeps a board
//! cursor that turns those actions into the coordinates handed to the
//! controller's `select`.

pub mod cursor;
pub mod map;

pub use tui_gems_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit};

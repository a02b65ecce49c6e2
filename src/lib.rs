//! TUI Gems (workspace facade crate).
//!
//! The engine and its collaborators live in dedicated crates under `crates/`
//! and are re-exported here as `tui_gems::{core, input, term, types}`. This
//! package adds what the binary needs around them: configuration, level files
//! and the event log.

pub mod config;
pub mod event_log;
pub mod level;

pub use tui_gems_core as core;
pub use tui_gems_input as input;
pub use tui_gems_term as term;
pub use tui_gems_types as types;

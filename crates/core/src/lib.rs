//! Core game logic - pure, deterministic, and testable
//!
//! This crate is the logic core of a falling-tile match-3 puzzle. It has
//! **zero dependencies** on rendering, input or I/O, which keeps it:
//!
//! - **Deterministic**: the same seed produces the same board, spawn for spawn
//! - **Testable**: every rule is exercised from ASCII boards
//! - **Portable**: the terminal front-end is only one possible collaborator
//!
//! # Module Structure
//!
//! - [`shape`]: which cells of a level carry a base tile
//! - [`board`]: the grid of dead, empty and occupied cells
//! - [`matcher`]: run detection and clearing
//! - [`spawner`]: colors for tiles entering from above, with the
//!   anti-premade-match exclusion rule
//! - [`cascade`]: one gravity/refill/clear pass over the board
//! - [`controller`]: selection, swaps and input locking
//! - [`snapshot`]: plain-data view for renderers
//! - [`rng`]: seeded LCG used for every random choice
//!
//! # Example
//!
//! ```
//! use tui_gems_core::{ControllerOptions, InteractionController, LevelShape, SelectOutcome};
//! use tui_gems_core::types::Coord;
//!
//! let shape = LevelShape::rect(6, 6).unwrap();
//! let mut game = InteractionController::new(shape, ControllerOptions::default()).unwrap();
//!
//! // An empty board fills from the top and settles.
//! game.settle().unwrap();
//! assert!(game.board().is_filled());
//! assert!(game.can_interact());
//!
//! let outcome = game.select(Coord::new(2, 3)).unwrap();
//! assert_eq!(outcome, SelectOutcome::Selected(Coord::new(2, 3)));
//! ```

pub mod board;
pub mod cascade;
pub mod controller;
pub mod error;
pub mod matcher;
pub mod rng;
pub mod shape;
pub mod snapshot;
pub mod spawner;

pub use tui_gems_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use cascade::{CascadeResolver, PassReport};
pub use controller::{ControllerOptions, InteractionController, Phase, SelectOutcome};
pub use error::BoardError;
pub use matcher::{clear_run, find_run, find_runs, has_any_run, Run};
pub use rng::SimpleRng;
pub use shape::LevelShape;
pub use snapshot::GameSnapshot;
pub use spawner::{excluded_colors, TileSpawner};

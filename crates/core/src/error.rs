//! Error taxonomy for board operations.
//!
//! All of these are integration errors: a collaborator passed a coordinate
//! that does not exist, touched a dead cell, or configured a palette too small
//! for the spawn exclusion rule. None of them are recovered internally.
//! Rejected swaps and cells that cannot be filled this pass are not errors.

use thiserror::Error;

use crate::types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("coordinate ({x}, {y}) is outside the board")]
    OutOfBounds { x: i16, y: i16 },
    #[error("invalid operation at ({x}, {y}): {reason}")]
    InvalidOperation {
        x: i16,
        y: i16,
        reason: &'static str,
    },
    #[error("no color left to spawn at ({x}, {y}): {excluded} of the palette excluded")]
    Exhausted { x: i16, y: i16, excluded: usize },
    #[error("invalid level shape: {0}")]
    InvalidShape(&'static str),
}

impl BoardError {
    pub fn out_of_bounds(at: Coord) -> Self {
        BoardError::OutOfBounds { x: at.x, y: at.y }
    }

    pub fn invalid(at: Coord, reason: &'static str) -> Self {
        BoardError::InvalidOperation {
            x: at.x,
            y: at.y,
            reason,
        }
    }
}

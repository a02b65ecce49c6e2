//! Match detection - finds runs of three or more same-colored tiles
//!
//! From a starting cell the detector walks in one [`Direction`] while the next
//! cell holds a tile of the same color. The walk is an explicit loop bounded by
//! the board size. A run is reported by its far end (`start`), so clearing
//! walks back against the direction towards the cell the scan began at.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::error::BoardError;
use crate::types::{Color, Coord, Direction};

/// Shortest clearable run.
pub const MIN_RUN: u16 = 3;

/// A clearable line of tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Farthest cell reached by the scan.
    pub start: Coord,
    pub direction: Direction,
    pub length: u16,
    pub color: Color,
}

impl Run {
    /// Cells of the run, from `start` walking back against `direction`.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let (dx, dy) = self.direction.delta();
        let start = self.start;
        (0..self.length as i16).map(move |i| start.offset(-dx * i, -dy * i))
    }

    /// The cell the scan began at.
    pub fn origin(&self) -> Coord {
        let (dx, dy) = self.direction.delta();
        let back = self.length as i16 - 1;
        self.start.offset(-dx * back, -dy * back)
    }
}

/// Scan one direction from `at`.
///
/// Returns a run when `at` holds a tile and at least [`MIN_RUN`] consecutive
/// cells, `at` included, share its color.
pub fn scan(board: &Board, at: Coord, direction: Direction) -> Option<Run> {
    let color = board.color_at(at)?;
    let (dx, dy) = direction.delta();

    let mut end = at;
    let mut length: u16 = 1;
    loop {
        let next = end.offset(dx, dy);
        if board.color_at(next) != Some(color) {
            break;
        }
        end = next;
        length += 1;
    }

    (length >= MIN_RUN).then_some(Run {
        start: end,
        direction,
        length,
        color,
    })
}

/// Find a run through `at`, preferring the horizontal one on a tie.
pub fn find_run(board: &Board, at: Coord) -> Option<Run> {
    scan(board, at, Direction::Right).or_else(|| scan(board, at, Direction::Up))
}

/// Both runs through `at`, horizontal first.
pub fn find_runs(board: &Board, at: Coord) -> ArrayVec<Run, 2> {
    [Direction::Right, Direction::Up]
        .into_iter()
        .filter_map(|direction| scan(board, at, direction))
        .collect()
}

/// True if any occupied cell on the board starts a run.
pub fn has_any_run(board: &Board) -> bool {
    board.playable_coords().any(|at| find_run(board, at).is_some())
}

impl Board {
    /// True if a run passes through any cell of the board.
    pub fn has_run(&self) -> bool {
        has_any_run(self)
    }
}

/// Clear every cell of `run`, appending the removed tiles to `removed`.
///
/// Cells already emptied (a crossing run cleared first) are skipped, so fewer
/// than `run.length` tiles are removed when runs overlap. Returns the number
/// of tiles removed.
pub fn clear_run(
    board: &mut Board,
    run: &Run,
    removed: &mut Vec<(Coord, Color)>,
) -> Result<usize, BoardError> {
    let before = removed.len();
    for at in run.cells() {
        if let Some(color) = board.clear(at)? {
            removed.push((at, color));
        }
    }
    Ok(removed.len() - before)
}

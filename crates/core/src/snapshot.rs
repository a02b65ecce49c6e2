//! Read-only view of a controller for renderers and observers.
//!
//! Snapshots are plain data and can be reused across frames with
//! [`InteractionController::snapshot_into`], which keeps the cell buffer
//! allocation.

use crate::controller::{InteractionController, Phase};
use crate::types::{CellState, Color, Coord};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    pub top_row: u16,
    /// Row-major cell bytes, see [`CellState::as_u8`].
    pub cells: Vec<u8>,
    /// FNV-1a 64-bit hash of `cells`.
    pub board_hash: u64,
    pub selected: Option<Coord>,
    pub locked: bool,
    pub settled: bool,
    pub episode_id: u32,
    pub seed: u32,
    pub swaps: u32,
    pub passes: u32,
    pub cleared: u32,
}

impl GameSnapshot {
    /// Cell at `(x, y)`; `None` out of bounds.
    pub fn cell(&self, x: u16, y: u16) -> Option<CellState> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let v = self.cells[y as usize * self.width as usize + x as usize];
        Some(cell_from_u8(v))
    }

    /// Input is open.
    pub fn interactive(&self) -> bool {
        self.settled && !self.locked
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            top_row: 0,
            cells: Vec::new(),
            board_hash: fnv1a64(std::iter::empty()),
            selected: None,
            locked: false,
            settled: false,
            episode_id: 0,
            seed: 0,
            swaps: 0,
            passes: 0,
            cleared: 0,
        }
    }
}

/// Inverse of [`CellState::as_u8`]; unknown bytes read as dead.
pub fn cell_from_u8(v: u8) -> CellState {
    match v {
        1 => CellState::Empty,
        2..=7 => CellState::Occupied(Color::ALL[(v - 2) as usize]),
        _ => CellState::Dead,
    }
}

/// FNV-1a 64-bit.
pub fn fnv1a64(bytes: impl Iterator<Item = u8>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

impl InteractionController {
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let board = self.board();
        board.write_u8_cells(&mut out.cells);
        out.board_hash = fnv1a64(out.cells.iter().copied());
        out.width = board.width();
        out.height = board.height();
        out.top_row = board.top_row();
        out.selected = self.selected();
        out.locked = self.phase() == Phase::Locked;
        out.settled = self.is_settled();
        out.episode_id = self.episode_id();
        out.seed = self.options().seed;
        out.swaps = self.swaps();
        out.passes = self.passes();
        out.cleared = self.cleared();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

//! Cascade resolution - gravity, refill and run clearing
//!
//! One pass sweeps the playable rows from the bottom up, each row left to
//! right. For every playable cell:
//!
//! 1. An occupied cell is checked for runs in both directions; every run
//!    found is cleared.
//! 2. An empty cell looks for a tile to pull in:
//!    - the tile directly above, if there is one;
//!    - otherwise, on the top playable row, a freshly spawned tile;
//!    - otherwise a tile from one of the two upper diagonals (a coin flip
//!      picks one when both are available). The cell above may be dead or
//!      simply empty; a cell with no diagonal tile stays empty this pass.
//!
//! The caller repeats passes until one reports no movement.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::error::BoardError;
use crate::matcher::{clear_run, find_runs};
use crate::rng::SimpleRng;
use crate::spawner::{excluded_colors, TileSpawner};
use crate::types::{BoardEvent, Color, Coord, DEFAULT_MOVE_MS, MAX_SETTLE_PASSES};

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Any tile moved, spawned or was cleared.
    pub moved_any: bool,
    pub moved: u32,
    pub spawned: u32,
    pub cleared: u32,
}

impl PassReport {
    fn absorb(&mut self, other: PassReport) {
        self.moved_any |= other.moved_any;
        self.moved += other.moved;
        self.spawned += other.spawned;
        self.cleared += other.cleared;
    }
}

/// Runs gravity/refill passes over a board.
#[derive(Debug, Clone)]
pub struct CascadeResolver {
    spawner: TileSpawner,
    /// Coin flips between two diagonal sources.
    rng: SimpleRng,
    /// Animation duration attached to move and spawn events.
    move_ms: u32,
    /// Scratch buffer for tiles removed by a clear.
    removed: Vec<(Coord, Color)>,
}

impl CascadeResolver {
    pub fn new(spawner: TileSpawner) -> Self {
        // Derive the coin-flip stream from the spawner so one seed drives both.
        let rng = SimpleRng::new(spawner.seed() ^ 0x9e37_79b9);
        Self {
            spawner,
            rng,
            move_ms: DEFAULT_MOVE_MS,
            removed: Vec::new(),
        }
    }

    pub fn with_move_ms(mut self, move_ms: u32) -> Self {
        self.move_ms = move_ms;
        self
    }

    pub fn move_ms(&self) -> u32 {
        self.move_ms
    }

    pub fn spawner(&self) -> &TileSpawner {
        &self.spawner
    }

    /// Run one pass over `board`, queueing render events into `events`.
    pub fn resolve_pass(
        &mut self,
        board: &mut Board,
        events: &mut Vec<BoardEvent>,
    ) -> Result<PassReport, BoardError> {
        let mut report = PassReport::default();
        let top = board.top_row() as i16;

        for y in (top..board.height() as i16).rev() {
            for x in 0..board.width() as i16 {
                let here = Coord::new(x, y);
                if !board.is_playable(here) {
                    continue;
                }

                if board.is_occupied(here) {
                    self.clear_runs_at(board, here, events, &mut report)?;
                }

                if board.is_empty(here) {
                    self.fill(board, here, events, &mut report)?;
                }
            }
        }

        Ok(report)
    }

    /// Repeat passes until one reports no movement.
    ///
    /// Returns the combined report and the number of passes that moved
    /// something. Fails with `InvalidOperation` if the board is still moving
    /// after [`MAX_SETTLE_PASSES`] passes.
    pub fn settle(
        &mut self,
        board: &mut Board,
        events: &mut Vec<BoardEvent>,
    ) -> Result<(PassReport, u32), BoardError> {
        let top_row = board.top_row();
        repeat_until_settled(top_row, || self.resolve_pass(board, events))
    }

    fn clear_runs_at(
        &mut self,
        board: &mut Board,
        here: Coord,
        events: &mut Vec<BoardEvent>,
        report: &mut PassReport,
    ) -> Result<(), BoardError> {
        // Both runs are found before either is cleared, so a crossing pair
        // goes together.
        let runs = find_runs(board, here);
        if runs.is_empty() {
            return Ok(());
        }

        self.removed.clear();
        for run in &runs {
            clear_run(board, run, &mut self.removed)?;
        }
        for &(at, color) in &self.removed {
            events.push(BoardEvent::Removed { at, color });
        }
        report.cleared += self.removed.len() as u32;
        report.moved_any = true;
        Ok(())
    }

    fn fill(
        &mut self,
        board: &mut Board,
        here: Coord,
        events: &mut Vec<BoardEvent>,
        report: &mut PassReport,
    ) -> Result<(), BoardError> {
        let above = here.above();

        if board.is_occupied(above) {
            return self.pull(board, above, here, events, report);
        }

        if above.y < board.top_row() as i16 {
            let excluded = excluded_colors(board, here);
            let color = self.spawner.spawn(here, &excluded)?;
            board.occupy(here, color)?;
            events.push(BoardEvent::Spawned {
                from: above,
                to: here,
                color,
                duration_ms: self.move_ms,
            });
            report.spawned += 1;
            report.moved_any = true;
            return Ok(());
        }

        let candidates: ArrayVec<Coord, 2> = [above.offset(1, 0), above.offset(-1, 0)]
            .into_iter()
            .filter(|c| board.is_occupied(*c))
            .collect();

        let source = match candidates.len() {
            0 => return Ok(()),
            1 => candidates[0],
            _ => {
                if self.rng.coin_flip() {
                    candidates[0]
                } else {
                    candidates[1]
                }
            }
        };
        self.pull(board, source, here, events, report)
    }

    fn pull(
        &mut self,
        board: &mut Board,
        from: Coord,
        to: Coord,
        events: &mut Vec<BoardEvent>,
        report: &mut PassReport,
    ) -> Result<(), BoardError> {
        let color = board.move_tile(from, to)?;
        events.push(BoardEvent::Moved {
            from,
            to,
            color,
            duration_ms: self.move_ms,
        });
        report.moved += 1;
        report.moved_any = true;
        Ok(())
    }
}

/// Run `pass` until it reports no movement, at most [`MAX_SETTLE_PASSES`]
/// times.
///
/// Returns the combined report of the moving passes and their count.
pub(crate) fn repeat_until_settled(
    top_row: u16,
    mut pass: impl FnMut() -> Result<PassReport, BoardError>,
) -> Result<(PassReport, u32), BoardError> {
    let mut total = PassReport::default();
    for passes in 0..MAX_SETTLE_PASSES {
        let report = pass()?;
        if !report.moved_any {
            return Ok((total, passes));
        }
        total.absorb(report);
    }
    Err(BoardError::invalid(
        Coord::new(0, top_row as i16),
        "board did not settle",
    ))
}

impl Default for CascadeResolver {
    fn default() -> Self {
        Self::new(TileSpawner::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellState;

    fn resolver() -> CascadeResolver {
        CascadeResolver::new(TileSpawner::new(12345))
    }

    #[test]
    fn tile_falls_one_row_per_pass() {
        let mut board = Board::from_ascii(&[".", "r", "_", "_"]).unwrap();
        let mut events = Vec::new();
        let mut cascade = resolver();

        cascade.resolve_pass(&mut board, &mut events).unwrap();
        assert_eq!(board.color_at(Coord::new(0, 2)), Some(Color::Red));
        assert!(events.contains(&BoardEvent::Moved {
            from: Coord::new(0, 1),
            to: Coord::new(0, 2),
            color: Color::Red,
            duration_ms: DEFAULT_MOVE_MS,
        }));

        cascade.resolve_pass(&mut board, &mut events).unwrap();
        assert_eq!(board.color_at(Coord::new(0, 3)), Some(Color::Red));
    }

    #[test]
    fn top_row_spawns_into_empty_cells() {
        let mut board = Board::from_ascii(&["..", "__", "rb"]).unwrap();
        let mut events = Vec::new();
        let report = resolver().resolve_pass(&mut board, &mut events).unwrap();

        assert_eq!(report.spawned, 2);
        assert!(board.is_occupied(Coord::new(0, 1)));
        assert!(board.is_occupied(Coord::new(1, 1)));
        assert!(matches!(
            events[0],
            BoardEvent::Spawned { from, to, .. } if from == Coord::new(0, 0) && to == Coord::new(0, 1)
        ));
    }

    #[test]
    fn empty_cell_above_falls_back_to_diagonal() {
        // (0, 1) is empty and so is (0, 0) above it: the red tile on the
        // upper diagonal slides in during the same pass.
        let mut board = Board::from_ascii(&["_r", "__"]).unwrap();
        let mut events = Vec::new();
        resolver().resolve_pass(&mut board, &mut events).unwrap();

        assert_eq!(board.color_at(Coord::new(0, 1)), Some(Color::Red));
        assert!(events.contains(&BoardEvent::Moved {
            from: Coord::new(1, 0),
            to: Coord::new(0, 1),
            color: Color::Red,
            duration_ms: DEFAULT_MOVE_MS,
        }));
    }

    #[test]
    fn open_column_pulls_from_either_diagonal() {
        // (1, 3) is empty under an empty playable (1, 2): one of the
        // diagonal tiles at (0, 2) and (2, 2) moves down into it.
        let mut board = Board::from_ascii(&["...", "rgb", "y_o", "p_p"]).unwrap();
        let mut events = Vec::new();
        resolver().resolve_pass(&mut board, &mut events).unwrap();

        let filled = board.color_at(Coord::new(1, 3));
        assert!(filled == Some(Color::Yellow) || filled == Some(Color::Orange));
        assert!(events.iter().any(|e| matches!(
            e,
            BoardEvent::Moved { from, to, .. }
                if *to == Coord::new(1, 3)
                    && (*from == Coord::new(0, 2) || *from == Coord::new(2, 2))
        )));
    }

    #[test]
    fn cell_under_dead_cell_pulls_from_diagonal() {
        let mut board = Board::from_ascii(&["...", "y.o", "p_b"]).unwrap();
        let mut events = Vec::new();
        resolver().resolve_pass(&mut board, &mut events).unwrap();

        let filled = board.color_at(Coord::new(1, 2));
        assert!(filled == Some(Color::Yellow) || filled == Some(Color::Orange));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, BoardEvent::Moved { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn diagonal_with_no_candidates_stays_empty() {
        let mut board = Board::from_ascii(&["_._", "b_r"]).unwrap();
        // Top row is 0: (0,0) and (2,0) are empty, so (1,1) has no diagonal
        // source on this pass.
        let mut events = Vec::new();
        resolver().resolve_pass(&mut board, &mut events).unwrap();
        assert_eq!(board.get(Coord::new(1, 1)), Some(CellState::Empty));
    }

    #[test]
    fn runs_are_cleared_and_refilled_in_the_same_pass() {
        let mut board = Board::from_ascii(&["...", "___", "rrr"]).unwrap();
        let mut events = Vec::new();
        let report = resolver().resolve_pass(&mut board, &mut events).unwrap();

        assert_eq!(report.cleared, 3);
        let removed = events
            .iter()
            .filter(|e| matches!(e, BoardEvent::Removed { color: Color::Red, .. }))
            .count();
        assert_eq!(removed, 3);
        // Top row cells were spawned on this pass.
        assert_eq!(report.spawned, 3);
    }

    #[test]
    fn settle_fills_a_rectangle_without_runs() {
        let mut board = Board::rect(7, 7).unwrap();
        let mut events = Vec::new();
        let mut cascade = resolver();
        let (report, passes) = cascade.settle(&mut board, &mut events).unwrap();

        assert!(passes > 0);
        assert!(report.spawned >= 49);
        assert!(board.is_filled());
        assert!(!crate::matcher::has_any_run(&board));
    }

    #[test]
    fn settled_board_pass_is_a_no_op() {
        let mut board = Board::from_ascii(&["rgb", "gbr", "brg"]).unwrap();
        let before = board.clone();
        let mut events = Vec::new();
        let report = resolver().resolve_pass(&mut board, &mut events).unwrap();

        assert!(!report.moved_any);
        assert!(events.is_empty());
        assert_eq!(board, before);
    }
}

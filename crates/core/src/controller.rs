//! Interaction controller - selection, swaps and input locking
//!
//! The controller owns the board and the cascade resolver and decides when the
//! player may act. Input is accepted only while the board is settled and no
//! swap is being resolved.
//!
//! # States
//!
//! - `Idle`: nothing selected
//! - `Selected(a)`: one tile picked
//! - `Locked`: a swap is being animated or resolved; input is ignored
//!
//! Selecting the same tile again deselects it. Selecting a horizontal or
//! vertical neighbour swaps the two tiles and locks input. Selecting any other
//! tile moves the selection there; a rejected swap is not an error.
//!
//! # Timing
//!
//! [`InteractionController::tick`] is called by the frame loop with the
//! elapsed time. After a swap, and after every pass that moved something, the
//! controller waits for the move animation (`move_ms`) before running the next
//! pass. A pass that moves nothing settles the board and reopens input.

use crate::board::Board;
use crate::cascade::{repeat_until_settled, CascadeResolver, PassReport};
use crate::error::BoardError;
use crate::shape::LevelShape;
use crate::spawner::TileSpawner;
use crate::types::{BoardEvent, Coord, COLOR_COUNT, DEFAULT_MOVE_MS};

/// Selection state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selected(Coord),
    Locked,
}

/// What a call to [`InteractionController::select`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Input is closed, or the cell holds no tile.
    Ignored,
    /// First pick.
    Selected(Coord),
    /// The selected tile was picked again.
    Deselected,
    /// Adjacent pick: the tiles were exchanged and input is locked.
    Swapped { a: Coord, b: Coord },
    /// Non-adjacent pick: the selection moved to the new tile.
    Reselected(Coord),
}

/// Construction options for a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub seed: u32,
    /// Palette size, clamped to `1..=6` by the spawner.
    pub colors: usize,
    /// Visual duration of one move; also the pause between passes.
    pub move_ms: u32,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            seed: 1,
            colors: COLOR_COUNT,
            move_ms: DEFAULT_MOVE_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    shape: LevelShape,
    board: Board,
    resolver: CascadeResolver,
    options: ControllerOptions,
    phase: Phase,
    /// Last pass found nothing to move or clear.
    settled: bool,
    /// Time left before the next pass may run.
    cooldown_ms: u32,
    /// A swap is waiting for its animation before resolution starts.
    resolution_pending: bool,
    /// Queued render events (consumed by the frame loop).
    events: Vec<BoardEvent>,
    /// Monotonic id, incremented on restart.
    episode_id: u32,
    swaps: u32,
    passes: u32,
    cleared: u32,
}

impl InteractionController {
    /// Build a controller over an empty board of the given shape.
    ///
    /// The board starts unsettled; ticks fill it from the top.
    pub fn new(shape: LevelShape, options: ControllerOptions) -> Result<Self, BoardError> {
        let board = Board::from_shape(&shape)?;
        Ok(Self::with_board(shape, board, options))
    }

    /// Build a controller around an existing board.
    ///
    /// The board is treated as unsettled until a pass confirms otherwise.
    pub fn from_board(board: Board, options: ControllerOptions) -> Self {
        let shape = board.level_shape();
        Self::with_board(shape, board, options)
    }

    fn with_board(shape: LevelShape, board: Board, options: ControllerOptions) -> Self {
        Self {
            shape,
            board,
            resolver: Self::resolver_for(&options),
            options,
            phase: Phase::Idle,
            settled: false,
            cooldown_ms: 0,
            resolution_pending: false,
            events: Vec::new(),
            episode_id: 0,
            swaps: 0,
            passes: 0,
            cleared: 0,
        }
    }

    fn resolver_for(options: &ControllerOptions) -> CascadeResolver {
        CascadeResolver::new(TileSpawner::with_palette(options.seed, options.colors))
            .with_move_ms(options.move_ms)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<Coord> {
        match self.phase {
            Phase::Selected(at) => Some(at),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn is_locked(&self) -> bool {
        self.phase == Phase::Locked
    }

    /// Input is accepted only on a settled, unlocked board.
    pub fn can_interact(&self) -> bool {
        self.settled && self.phase != Phase::Locked
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn cleared(&self) -> u32 {
        self.cleared
    }

    /// Queued events, oldest first.
    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    /// Drain queued events into `out` (appending).
    pub fn drain_events_into(&mut self, out: &mut Vec<BoardEvent>) {
        out.append(&mut self.events);
    }

    /// Take all queued events.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pick the tile at `at`.
    ///
    /// Fails only when `at` is outside the grid.
    pub fn select(&mut self, at: Coord) -> Result<SelectOutcome, BoardError> {
        let cell = self.board.cell_at(at)?;
        if !self.can_interact() || !cell.is_occupied() {
            return Ok(SelectOutcome::Ignored);
        }

        let outcome = match self.phase {
            Phase::Idle => {
                self.phase = Phase::Selected(at);
                SelectOutcome::Selected(at)
            }
            Phase::Selected(anchor) if anchor == at => {
                self.phase = Phase::Idle;
                SelectOutcome::Deselected
            }
            Phase::Selected(anchor) if anchor.is_adjacent(at) => {
                self.swap(anchor, at)?;
                SelectOutcome::Swapped { a: anchor, b: at }
            }
            Phase::Selected(_) => {
                self.phase = Phase::Selected(at);
                SelectOutcome::Reselected(at)
            }
            Phase::Locked => SelectOutcome::Ignored,
        };
        Ok(outcome)
    }

    /// Exchange two adjacent tiles and lock input until the board settles.
    fn swap(&mut self, a: Coord, b: Coord) -> Result<(), BoardError> {
        self.board.swap(a, b)?;
        self.events.push(BoardEvent::Swapped {
            a,
            b,
            duration_ms: self.options.move_ms,
        });
        self.phase = Phase::Locked;
        self.settled = false;
        self.resolution_pending = true;
        self.cooldown_ms = self.options.move_ms;
        self.swaps = self.swaps.wrapping_add(1);
        Ok(())
    }

    /// Advance time by `elapsed_ms`, running at most one pass.
    ///
    /// Returns the report of the pass that ran, if any. A settled board is
    /// left untouched.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<Option<PassReport>, BoardError> {
        if self.settled {
            return Ok(None);
        }

        self.cooldown_ms = self.cooldown_ms.saturating_sub(elapsed_ms);
        if self.cooldown_ms > 0 {
            return Ok(None);
        }

        let report = self.run_pass()?;
        if report.moved_any {
            self.cooldown_ms = self.options.move_ms;
        }
        Ok(Some(report))
    }

    /// Run passes back to back until the board settles, ignoring timing.
    ///
    /// Returns the number of passes that moved something.
    pub fn settle(&mut self) -> Result<u32, BoardError> {
        if self.settled {
            return Ok(0);
        }
        self.cooldown_ms = 0;
        let top_row = self.board.top_row();
        let (_, moving) = repeat_until_settled(top_row, || self.run_pass())?;
        Ok(moving)
    }

    fn run_pass(&mut self) -> Result<PassReport, BoardError> {
        if self.resolution_pending {
            self.resolution_pending = false;
            self.events.push(BoardEvent::ResolutionRequested);
        }

        let report = self.resolver.resolve_pass(&mut self.board, &mut self.events)?;
        self.passes = self.passes.wrapping_add(1);
        self.cleared = self.cleared.wrapping_add(report.cleared);

        if !report.moved_any {
            self.settled = true;
            if self.phase == Phase::Locked {
                self.phase = Phase::Idle;
            }
            self.events.push(BoardEvent::Settled);
        }
        Ok(report)
    }

    /// Rebuild the board from its shape, continuing the random sequence.
    pub fn restart(&mut self) -> Result<(), BoardError> {
        let options = ControllerOptions {
            seed: self.resolver.spawner().seed(),
            ..self.options
        };
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::new(self.shape.clone(), options)?;
        self.episode_id = next_episode;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    /// 5×6 board without runs; (2,3) is yellow and (2,4) is red.
    fn settled_controller() -> InteractionController {
        let board = Board::from_ascii(&[
            "rgbyo", //
            "gbyor", //
            "rgbyo", //
            "gbyor", //
            "yorgb", //
            "orgby", //
        ])
        .unwrap();
        let mut controller = InteractionController::from_board(board, ControllerOptions::default());
        assert_eq!(controller.settle().unwrap(), 0);
        controller.take_events();
        controller
    }

    #[test]
    fn test_new_board_is_unsettled_and_ignores_input() {
        let mut c = InteractionController::new(LevelShape::rect(4, 4).unwrap(), ControllerOptions::default())
            .unwrap();
        assert!(!c.is_settled());
        assert!(!c.can_interact());
        assert_eq!(c.select(Coord::new(0, 0)).unwrap(), SelectOutcome::Ignored);
    }

    #[test]
    fn test_select_then_deselect() {
        let mut c = settled_controller();
        let at = Coord::new(1, 1);
        assert_eq!(c.select(at).unwrap(), SelectOutcome::Selected(at));
        assert_eq!(c.phase(), Phase::Selected(at));
        assert_eq!(c.select(at).unwrap(), SelectOutcome::Deselected);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn test_select_out_of_bounds_is_an_error() {
        let mut c = settled_controller();
        assert_eq!(
            c.select(Coord::new(5, 0)),
            Err(BoardError::OutOfBounds { x: 5, y: 0 })
        );
    }

    #[test]
    fn test_adjacent_pick_swaps_and_locks() {
        let mut c = settled_controller();
        let a = Coord::new(2, 3);
        let b = Coord::new(2, 4);
        let color_a = c.board().color_at(a);
        let color_b = c.board().color_at(b);

        c.select(a).unwrap();
        assert_eq!(c.select(b).unwrap(), SelectOutcome::Swapped { a, b });
        assert_eq!(c.phase(), Phase::Locked);
        assert_eq!(c.board().color_at(a), color_b);
        assert_eq!(c.board().color_at(b), color_a);

        // Locked: picks are ignored.
        assert_eq!(c.select(Coord::new(0, 0)).unwrap(), SelectOutcome::Ignored);
    }

    #[test]
    fn test_distant_pick_moves_selection() {
        let mut c = settled_controller();
        let before = c.board().clone();
        c.select(Coord::new(2, 3)).unwrap();
        assert_eq!(
            c.select(Coord::new(4, 3)).unwrap(),
            SelectOutcome::Reselected(Coord::new(4, 3))
        );
        assert_eq!(c.phase(), Phase::Selected(Coord::new(4, 3)));
        assert_eq!(c.board(), &before);
    }

    #[test]
    fn test_diagonal_pick_is_rejected() {
        let mut c = settled_controller();
        c.select(Coord::new(1, 1)).unwrap();
        assert_eq!(
            c.select(Coord::new(2, 2)).unwrap(),
            SelectOutcome::Reselected(Coord::new(2, 2))
        );
        assert_eq!(c.swaps(), 0);
    }

    #[test]
    fn test_swap_waits_for_animation_then_resolves() {
        let mut c = settled_controller();
        c.select(Coord::new(2, 3)).unwrap();
        c.select(Coord::new(2, 4)).unwrap();
        c.take_events();

        // Animation still running.
        assert_eq!(c.tick(DEFAULT_MOVE_MS - 1).unwrap(), None);
        assert!(c.events().is_empty());

        let report = c.tick(1).unwrap().unwrap();
        assert_eq!(c.events()[0], BoardEvent::ResolutionRequested);

        let mut guard = 0;
        while !c.is_settled() {
            c.tick(DEFAULT_MOVE_MS).unwrap();
            guard += 1;
            assert!(guard < 1000);
        }
        assert!(report.moved_any || c.is_settled());
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.can_interact());
        assert_eq!(c.events().last(), Some(&BoardEvent::Settled));
    }

    #[test]
    fn test_settled_tick_is_a_no_op() {
        let mut c = settled_controller();
        let before = c.board().clone();
        assert_eq!(c.tick(10_000).unwrap(), None);
        assert_eq!(c.board(), &before);
        assert!(c.events().is_empty());
    }

    #[test]
    fn test_empty_cells_cannot_be_selected() {
        let board = Board::from_ascii(&["...", "rgb", "gbr"]).unwrap();
        let mut c = InteractionController::from_board(board, ControllerOptions::default());
        c.settle().unwrap();
        assert_eq!(c.select(Coord::new(0, 0)).unwrap(), SelectOutcome::Ignored);
        assert_eq!(c.board().color_at(Coord::new(0, 1)), Some(Color::Red));
    }

    #[test]
    fn test_restart_rebuilds_board() {
        let mut c = InteractionController::new(LevelShape::rect(5, 5).unwrap(), ControllerOptions::default())
            .unwrap();
        c.settle().unwrap();
        assert!(c.board().is_filled());

        c.restart().unwrap();
        assert_eq!(c.episode_id(), 1);
        assert_eq!(c.board().occupied_count(), 0);
        assert!(!c.is_settled());
        assert!(c.events().is_empty());
    }

    #[test]
    fn test_settle_counts_moving_passes() {
        let mut c = InteractionController::new(LevelShape::rect(4, 5).unwrap(), ControllerOptions::default())
            .unwrap();
        let moving = c.settle().unwrap();

        // One pass per row at least, plus the final pass that found nothing.
        assert!(moving >= 5);
        assert_eq!(c.passes(), moving + 1);
        assert!(c.is_settled());
        assert_eq!(c.settle().unwrap(), 0);
        assert_eq!(c.passes(), moving + 1);
    }
}

//! Tile spawner - colors for tiles entering from above the board
//!
//! A spawned tile lands in a cell of the top playable row. Before picking its
//! color the resolver asks [`excluded_colors`] which colors would complete a
//! run with tiles that have already settled next to the landing cell:
//!
//! - the two cells below it in the same column, if they share a color;
//! - the two cells to its left in the same row, if they share a color.
//!
//! Cells to the right are not consulted: the cascade sweeps left to right, so
//! they have not been filled yet in the current pass.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::error::BoardError;
use crate::rng::SimpleRng;
use crate::types::{Color, Coord, COLOR_COUNT};

/// Colors that would form an instant run if spawned into `landing`.
///
/// At most two colors, without duplicates.
pub fn excluded_colors(board: &Board, landing: Coord) -> ArrayVec<Color, 2> {
    let mut excluded = ArrayVec::new();

    let pairs = [
        (landing.offset(0, 1), landing.offset(0, 2)),
        (landing.offset(-1, 0), landing.offset(-2, 0)),
    ];
    for (near, far) in pairs {
        if let (Some(a), Some(b)) = (board.color_at(near), board.color_at(far)) {
            if a == b && !excluded.contains(&a) {
                excluded.push(a);
            }
        }
    }

    excluded
}

/// Picks colors uniformly from a palette minus an exclusion set.
#[derive(Debug, Clone)]
pub struct TileSpawner {
    palette: ArrayVec<Color, COLOR_COUNT>,
    rng: SimpleRng,
}

impl TileSpawner {
    /// Spawner over the full six-color palette.
    pub fn new(seed: u32) -> Self {
        Self::with_palette(seed, COLOR_COUNT)
    }

    /// Spawner over the first `colors` colors of [`Color::ALL`].
    ///
    /// `colors` is clamped to `1..=6`.
    pub fn with_palette(seed: u32, colors: usize) -> Self {
        let colors = colors.clamp(1, COLOR_COUNT);
        Self {
            palette: Color::ALL.iter().copied().take(colors).collect(),
            rng: SimpleRng::new(seed),
        }
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Choose a color for a tile spawning at `at`.
    ///
    /// Fails with `Exhausted` when `excluded` covers the whole palette rather
    /// than falling back to a biased pick.
    pub fn spawn(&mut self, at: Coord, excluded: &[Color]) -> Result<Color, BoardError> {
        let allowed: ArrayVec<Color, COLOR_COUNT> = self
            .palette
            .iter()
            .copied()
            .filter(|color| !excluded.contains(color))
            .collect();

        if allowed.is_empty() {
            return Err(BoardError::Exhausted {
                x: at.x,
                y: at.y,
                excluded: excluded.len(),
            });
        }

        let pick = self.rng.next_range(allowed.len() as u32) as usize;
        Ok(allowed[pick])
    }

    /// Generator state, for restarting with a follow-up seed.
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new(1)
    }
}

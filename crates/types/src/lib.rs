//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, event logging).
//!
//! # Coordinates
//!
//! A [`Coord`] is a `(column, row)` pair. Row 0 is the top of the full grid,
//! including any dead rows above the playable area. Columns grow to the right,
//! rows grow downwards, so "above" means `y - 1`.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame loop interval (~60 FPS) |
//! | `DEFAULT_MOVE_MS` | 120 | Visual duration of one tile move |
//! | `MAX_SETTLE_PASSES` | 4096 | Upper bound for synchronous settling |
//!
//! # Examples
//!
//! ```
//! use tui_gems_types::{CellState, Color, Coord};
//!
//! let a = Coord::new(2, 3);
//! let b = Coord::new(2, 4);
//! assert!(a.is_adjacent(b));
//! assert_eq!(a.manhattan(Coord::new(4, 3)), 2);
//!
//! let cell = CellState::Occupied(Color::Red);
//! assert_eq!(cell.color(), Some(Color::Red));
//! assert!(cell.is_playable());
//!
//! assert_eq!(Color::from_str("purple"), Some(Color::Purple));
//! ```

/// Frame loop interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default visual duration of a single tile move, in milliseconds.
///
/// The engine never animates anything itself; this is the value handed to
/// the rendering collaborator and used as the cooldown between passes.
pub const DEFAULT_MOVE_MS: u32 = 120;

/// Upper bound on passes run by a synchronous settle before giving up.
pub const MAX_SETTLE_PASSES: u32 = 4096;

/// Number of distinct gem colors.
pub const COLOR_COUNT: usize = 6;

/// Grid coordinate: `x` is the column, `y` the row (0 = top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i16,
    pub y: i16,
}

impl Coord {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Coordinate one row up.
    pub const fn above(self) -> Self {
        self.offset(0, -1)
    }

    /// Manhattan distance between two coordinates.
    pub fn manhattan(self, other: Coord) -> u32 {
        (self.x - other.x).unsigned_abs() as u32 + (self.y - other.y).unsigned_abs() as u32
    }

    /// True for strict horizontal or vertical neighbours (never diagonal).
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(i16, i16)> for Coord {
    fn from((x, y): (i16, i16)) -> Self {
        Self { x, y }
    }
}

/// The six gem colors
///
/// Color carries identity only; anything color-specific (glyphs, RGB values)
/// lives in the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Blue,
    Purple,
    Red,
    Yellow,
    Orange,
    Green,
}

impl Color {
    /// Every color in palette order.
    pub const ALL: [Color; COLOR_COUNT] = [
        Color::Blue,
        Color::Purple,
        Color::Red,
        Color::Yellow,
        Color::Orange,
        Color::Green,
    ];

    /// Position of the color in [`Color::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Color::Blue => 0,
            Color::Purple => 1,
            Color::Red => 2,
            Color::Yellow => 3,
            Color::Orange => 4,
            Color::Green => 5,
        }
    }

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_gems_types::Color;
    ///
    /// assert_eq!(Color::from_str("red"), Some(Color::Red));
    /// assert_eq!(Color::from_str("GREEN"), Some(Color::Green));
    /// assert_eq!(Color::from_str("pink"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blue" => Some(Color::Blue),
            "purple" => Some(Color::Purple),
            "red" => Some(Color::Red),
            "yellow" => Some(Color::Yellow),
            "orange" => Some(Color::Orange),
            "green" => Some(Color::Green),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Green => "green",
        }
    }
}

/// Content of one grid position.
///
/// - `Dead`: not part of the playable board, fixed at construction
/// - `Empty`: playable, currently holding no tile
/// - `Occupied`: playable, holding a tile of the given color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Dead,
    Empty,
    Occupied(Color),
}

impl CellState {
    pub fn is_playable(&self) -> bool {
        !matches!(self, CellState::Dead)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, CellState::Occupied(_))
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            CellState::Occupied(color) => Some(*color),
            _ => None,
        }
    }

    /// Compact byte encoding used by snapshots and hashing.
    ///
    /// `0` = dead, `1` = empty, `2 + color index` = occupied.
    pub fn as_u8(&self) -> u8 {
        match self {
            CellState::Dead => 0,
            CellState::Empty => 1,
            CellState::Occupied(color) => 2 + color.index() as u8,
        }
    }
}

/// Scan direction of a run.
///
/// Only two directions are ever scanned: to the right (`+x`) and upwards
/// (`-y`). A board swept bottom-up and left-to-right meets every run at its
/// left or bottom end first, so these two cover all runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `(1, 0)`
    Right,
    /// `(0, -1)`
    Up,
}

impl Direction {
    /// Unit step `(dx, dy)` of the direction.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Up => "up",
        }
    }
}

/// Events emitted by the engine for the rendering collaborator.
///
/// The logical board is already updated when an event is queued; events only
/// describe what a renderer should animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// A new tile entered the board at `to`, coming from `from` above the
    /// playable area.
    Spawned {
        from: Coord,
        to: Coord,
        color: Color,
        duration_ms: u32,
    },
    /// A tile slid from `from` to `to`.
    Moved {
        from: Coord,
        to: Coord,
        color: Color,
        duration_ms: u32,
    },
    /// A tile was destroyed as part of a cleared run.
    Removed { at: Coord, color: Color },
    /// The player exchanged the tiles at `a` and `b`.
    Swapped { a: Coord, b: Coord, duration_ms: u32 },
    /// The swap animation elapsed and resolution passes begin.
    ResolutionRequested,
    /// A pass found nothing to move or clear; input is open again.
    Settled,
}

impl BoardEvent {
    /// Event name used by the event log
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardEvent::Spawned { .. } => "spawned",
            BoardEvent::Moved { .. } => "moved",
            BoardEvent::Removed { .. } => "removed",
            BoardEvent::Swapped { .. } => "swapped",
            BoardEvent::ResolutionRequested => "resolutionRequested",
            BoardEvent::Settled => "settled",
        }
    }
}

/// Player-facing actions produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Move the cursor one cell left
    CursorLeft,
    /// Move the cursor one cell right
    CursorRight,
    /// Move the cursor one cell up
    CursorUp,
    /// Move the cursor one cell down
    CursorDown,
    /// Select the tile under the cursor
    Select,
    /// Rebuild the board with a fresh seed
    Restart,
}

impl InputAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_gems_types::InputAction;
    ///
    /// assert_eq!(InputAction::from_str("select"), Some(InputAction::Select));
    /// assert_eq!(InputAction::from_str("cursorLeft"), Some(InputAction::CursorLeft));
    /// assert_eq!(InputAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorleft" => Some(InputAction::CursorLeft),
            "cursorright" => Some(InputAction::CursorRight),
            "cursorup" => Some(InputAction::CursorUp),
            "cursordown" => Some(InputAction::CursorDown),
            "select" => Some(InputAction::Select),
            "restart" => Some(InputAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            InputAction::CursorLeft => "cursorLeft",
            InputAction::CursorRight => "cursorRight",
            InputAction::CursorUp => "cursorUp",
            InputAction::CursorDown => "cursorDown",
            InputAction::Select => "select",
            InputAction::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_is_manhattan_one() {
        let c = Coord::new(2, 3);
        assert!(c.is_adjacent(Coord::new(2, 4)));
        assert!(c.is_adjacent(Coord::new(1, 3)));
        assert!(!c.is_adjacent(Coord::new(3, 4)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(4, 3)));
    }

    #[test]
    fn color_index_matches_palette_order() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
            assert_eq!(Color::from_str(color.as_str()), Some(*color));
        }
    }

    #[test]
    fn cell_byte_encoding_is_distinct() {
        assert_eq!(CellState::Dead.as_u8(), 0);
        assert_eq!(CellState::Empty.as_u8(), 1);
        assert_eq!(CellState::Occupied(Color::Blue).as_u8(), 2);
        assert_eq!(CellState::Occupied(Color::Green).as_u8(), 7);
    }

    #[test]
    fn direction_deltas() {
        assert_eq!(Direction::Right.delta(), (1, 0));
        assert_eq!(Direction::Up.delta(), (0, -1));
    }
}

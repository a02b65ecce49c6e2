//! Board module - owns the grid of cells
//!
//! The board is built once from a [`LevelShape`] and afterwards only mutated
//! through [`Board::occupy`] and [`Board::clear`] (and the helpers layered on
//! them). Dead cells never change, and `top_row` is fixed at construction.
//!
//! Storage is a flat row-major vector (y * width + x) for cache locality.
//! Coordinates: (x, y) with x growing right and y growing down; row 0 is the
//! top of the full grid, dead spawn rows included.

use crate::error::BoardError;
use crate::shape::LevelShape;
use crate::types::{CellState, Color, Coord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    /// First row holding any playable cell.
    top_row: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<CellState>,
}

impl Board {
    /// Build a board from a level shape.
    ///
    /// Rows are scanned top to bottom; a cell with a base tile becomes
    /// `Empty`, anything else `Dead`. The first row with a base tile becomes
    /// `top_row`. A shape without any base tile is rejected.
    pub fn from_shape(shape: &LevelShape) -> Result<Self, BoardError> {
        let width = shape.width();
        let height = shape.height();
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        let mut top_row = None;

        for y in 0..height {
            for x in 0..width {
                if shape.has_base(x, y) {
                    top_row.get_or_insert(y);
                    cells.push(CellState::Empty);
                } else {
                    cells.push(CellState::Dead);
                }
            }
        }

        let top_row = top_row.ok_or(BoardError::InvalidShape("no playable cells"))?;
        Ok(Self {
            width,
            height,
            top_row,
            cells,
        })
    }

    /// Fully playable rectangle with no dead cells.
    pub fn rect(width: u16, height: u16) -> Result<Self, BoardError> {
        Self::from_shape(&LevelShape::rect(width, height)?)
    }

    #[inline(always)]
    fn index(&self, at: Coord) -> Option<usize> {
        if at.x < 0 || at.y < 0 || at.x >= self.width as i16 || at.y >= self.height as i16 {
            return None;
        }
        Some(at.y as usize * self.width as usize + at.x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn top_row(&self) -> u16 {
        self.top_row
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        self.index(at).is_some()
    }

    /// Cell at `at`, or `OutOfBounds`.
    pub fn cell_at(&self, at: Coord) -> Result<CellState, BoardError> {
        self.get(at).ok_or(BoardError::out_of_bounds(at))
    }

    /// Cell at `at`; `None` out of bounds.
    pub fn get(&self, at: Coord) -> Option<CellState> {
        self.index(at).map(|idx| self.cells[idx])
    }

    /// Color of the tile at `at`, if any.
    pub fn color_at(&self, at: Coord) -> Option<Color> {
        self.get(at).and_then(|cell| cell.color())
    }

    /// True iff `at` is in bounds and not dead.
    pub fn is_playable(&self, at: Coord) -> bool {
        matches!(self.get(at), Some(cell) if cell.is_playable())
    }

    pub fn is_occupied(&self, at: Coord) -> bool {
        matches!(self.get(at), Some(CellState::Occupied(_)))
    }

    pub fn is_empty(&self, at: Coord) -> bool {
        matches!(self.get(at), Some(CellState::Empty))
    }

    /// Put a tile of `color` at `at`, overwriting whatever tile is there.
    pub fn occupy(&mut self, at: Coord, color: Color) -> Result<(), BoardError> {
        let idx = self.index(at).ok_or(BoardError::out_of_bounds(at))?;
        if self.cells[idx] == CellState::Dead {
            return Err(BoardError::invalid(at, "cannot occupy a dead cell"));
        }
        self.cells[idx] = CellState::Occupied(color);
        Ok(())
    }

    /// Empty the cell at `at`, returning the color it held.
    ///
    /// Clearing an already empty cell is a no-op returning `None`.
    pub fn clear(&mut self, at: Coord) -> Result<Option<Color>, BoardError> {
        let idx = self.index(at).ok_or(BoardError::out_of_bounds(at))?;
        match self.cells[idx] {
            CellState::Dead => Err(BoardError::invalid(at, "cannot clear a dead cell")),
            CellState::Empty => Ok(None),
            CellState::Occupied(color) => {
                self.cells[idx] = CellState::Empty;
                Ok(Some(color))
            }
        }
    }

    /// Move the tile at `from` into `to`, vacating `from`.
    ///
    /// Returns the moved color. `from` must hold a tile.
    pub fn move_tile(&mut self, from: Coord, to: Coord) -> Result<Color, BoardError> {
        if !self.is_playable(to) {
            self.cell_at(to)?;
            return Err(BoardError::invalid(to, "cannot move onto a dead cell"));
        }
        let color = self
            .clear(from)?
            .ok_or(BoardError::invalid(from, "no tile to move"))?;
        self.occupy(to, color)?;
        Ok(color)
    }

    /// Exchange the contents of two playable cells.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<(), BoardError> {
        let ia = self.index(a).ok_or(BoardError::out_of_bounds(a))?;
        let ib = self.index(b).ok_or(BoardError::out_of_bounds(b))?;
        if self.cells[ia] == CellState::Dead {
            return Err(BoardError::invalid(a, "cannot swap a dead cell"));
        }
        if self.cells[ib] == CellState::Dead {
            return Err(BoardError::invalid(b, "cannot swap a dead cell"));
        }
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Every playable coordinate, row by row from the top.
    pub fn playable_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_playable())
            .map(move |(idx, _)| Coord::new((idx % width) as i16, (idx / width) as i16))
    }

    /// True when no playable cell is empty.
    pub fn is_filled(&self) -> bool {
        !self.cells.contains(&CellState::Empty)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// The shape this board's playable area corresponds to.
    pub fn level_shape(&self) -> LevelShape {
        let base = self.cells.iter().map(CellState::is_playable).collect();
        LevelShape::from_parts(self.width, self.height, base)
    }

    /// Write the byte encoding of every cell into `out`, row-major.
    pub fn write_u8_cells(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(CellState::as_u8));
    }

    /// Build a board from ASCII rows.
    ///
    /// `.` dead, `_` empty, and the first letter of a color name
    /// (`b p r y o g`) for an occupied cell. Handy in tests and docs.
    ///
    /// ```
    /// use tui_gems_core::Board;
    /// use tui_gems_core::types::{CellState, Color, Coord};
    ///
    /// let board = Board::from_ascii(&["....", "rgb_"]).unwrap();
    /// assert_eq!(board.top_row(), 1);
    /// assert_eq!(board.cell_at(Coord::new(1, 1)), Ok(CellState::Occupied(Color::Green)));
    /// assert_eq!(board.cell_at(Coord::new(3, 1)), Ok(CellState::Empty));
    /// ```
    pub fn from_ascii<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let mut shape_rows = Vec::with_capacity(rows.len());
        for row in rows {
            let mapped: String = row
                .as_ref()
                .chars()
                .map(|ch| if ch == '.' { '.' } else { '#' })
                .collect();
            shape_rows.push(mapped);
        }
        let mut board = Self::from_shape(&LevelShape::from_rows(&shape_rows)?)?;

        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.as_ref().chars().enumerate() {
                let at = Coord::new(x as i16, y as i16);
                match ch {
                    '.' | '_' => {}
                    other => {
                        let color = color_from_letter(other)
                            .ok_or(BoardError::InvalidShape("unknown board character"))?;
                        board.occupy(at, color)?;
                    }
                }
            }
        }
        Ok(board)
    }

    /// Render the board back into the [`Board::from_ascii`] notation.
    pub fn to_ascii(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        CellState::Dead => '.',
                        CellState::Empty => '_',
                        CellState::Occupied(color) => color_letter(*color),
                    })
                    .collect()
            })
            .collect()
    }
}

fn color_from_letter(ch: char) -> Option<Color> {
    match ch.to_ascii_lowercase() {
        'b' => Some(Color::Blue),
        'p' => Some(Color::Purple),
        'r' => Some(Color::Red),
        'y' => Some(Color::Yellow),
        'o' => Some(Color::Orange),
        'g' => Some(Color::Green),
        _ => None,
    }
}

fn color_letter(color: Color) -> char {
    match color {
        Color::Blue => 'b',
        Color::Purple => 'p',
        Color::Red => 'r',
        Color::Yellow => 'y',
        Color::Orange => 'o',
        Color::Green => 'g',
    }
}

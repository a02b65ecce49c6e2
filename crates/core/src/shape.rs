//! Level shape - which grid cells carry a base tile
//!
//! A shape is the only input the board is built from: a width × height matrix
//! of "has base tile" flags, row-major. Cells with a base tile become playable,
//! everything else is dead. Reading the flags out of a level asset is the job
//! of whoever constructs the shape.

use crate::error::BoardError;

/// Width × height matrix of base-tile flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelShape {
    width: u16,
    height: u16,
    /// Row-major flags (y * width + x)
    base: Vec<bool>,
}

impl LevelShape {
    /// Build a shape from row-major flags.
    pub fn new(width: u16, height: u16, base: Vec<bool>) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidShape("zero width or height"));
        }
        // Coordinates are i16, so every cell must be addressable by one.
        if width > i16::MAX as u16 || height > i16::MAX as u16 {
            return Err(BoardError::InvalidShape("level is too large"));
        }
        if base.len() != width as usize * height as usize {
            return Err(BoardError::InvalidShape("flag count does not match dimensions"));
        }
        Ok(Self {
            width,
            height,
            base,
        })
    }

    /// Dimensions already validated by the caller.
    pub(crate) fn from_parts(width: u16, height: u16, base: Vec<bool>) -> Self {
        debug_assert_eq!(base.len(), width as usize * height as usize);
        Self {
            width,
            height,
            base,
        }
    }

    /// Fully playable rectangle.
    pub fn rect(width: u16, height: u16) -> Result<Self, BoardError> {
        Self::new(width, height, vec![true; width as usize * height as usize])
    }

    /// Parse ASCII rows: `#` marks a base tile, `.` or space marks none.
    ///
    /// ```
    /// use tui_gems_core::LevelShape;
    ///
    /// let shape = LevelShape::from_rows(&["....", "####", "####"]).unwrap();
    /// assert_eq!(shape.width(), 4);
    /// assert_eq!(shape.height(), 3);
    /// assert!(!shape.has_base(0, 0));
    /// assert!(shape.has_base(3, 2));
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if height > i16::MAX as usize || width > i16::MAX as usize {
            return Err(BoardError::InvalidShape("level is too large"));
        }

        let mut base = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(BoardError::InvalidShape("rows have different lengths"));
            }
            for ch in row.chars() {
                match ch {
                    '#' => base.push(true),
                    '.' | ' ' => base.push(false),
                    _ => return Err(BoardError::InvalidShape("unknown level character")),
                }
            }
        }

        Self::new(width as u16, height as u16, base)
    }

    /// The built-in level: a 9×9 playable field with notched corners under
    /// two dead spawn rows.
    pub fn default_level() -> Self {
        const WIDTH: u16 = 9;
        const HEIGHT: u16 = 11;
        let mut base = Vec::with_capacity(WIDTH as usize * HEIGHT as usize);
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let corner = (y == 2 || y == HEIGHT - 1) && (x == 0 || x == WIDTH - 1);
                base.push(y >= 2 && !corner);
            }
        }
        Self {
            width: WIDTH,
            height: HEIGHT,
            base,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Base-tile flag at `(x, y)`; false outside the matrix.
    pub fn has_base(&self, x: u16, y: u16) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.base[y as usize * self.width as usize + x as usize]
    }
}

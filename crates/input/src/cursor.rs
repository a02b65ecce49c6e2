//! Board cursor driven by keyboard actions.
//!
//! The cursor stays inside the playable rows (`top_row..height`) and the
//! board's columns. It may rest on a dead cell; selecting there is simply
//! ignored by the controller.

use crate::types::{Coord, InputAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    at: Coord,
    width: u16,
    height: u16,
    top_row: u16,
}

impl Cursor {
    /// Cursor centred on the playable area.
    pub fn new(width: u16, height: u16, top_row: u16) -> Self {
        let rows = height.saturating_sub(top_row);
        let at = Coord::new((width / 2) as i16, (top_row + rows / 2) as i16);
        Self {
            at,
            width,
            height,
            top_row,
        }
    }

    pub fn position(&self) -> Coord {
        self.at
    }

    /// Apply a cursor action.
    ///
    /// Returns the coordinate to select for [`InputAction::Select`]; other
    /// actions move the cursor and return `None`.
    pub fn apply(&mut self, action: InputAction) -> Option<Coord> {
        let (dx, dy) = match action {
            InputAction::CursorLeft => (-1, 0),
            InputAction::CursorRight => (1, 0),
            InputAction::CursorUp => (0, -1),
            InputAction::CursorDown => (0, 1),
            InputAction::Select => return Some(self.at),
            InputAction::Restart => return None,
        };

        let next = self.at.offset(dx, dy);
        if next.x >= 0
            && next.x < self.width as i16
            && next.y >= self.top_row as i16
            && next.y < self.height as i16
        {
            self.at = next;
        }
        None
    }
}

//! HD44780 cursor model
//!
//! Reproduces how character LCD drivers in the `putstr` family advance the
//! cursor:
//!
//! - printable characters are written at the cursor, which then advances
//! - reaching the last column wraps to column 0 of the next row
//! - `\n` jumps to the start of the next row, unless the previous character
//!   already wrapped the cursor there (the newline is then swallowed)
//! - moving past the last row wraps back to row 0
//!
//! The classic driver never clears its "implied newline" flag after the next
//! printable character, so a newline arriving any time after a wrap was
//! dropped. Here the flag only covers the character immediately following
//! the wrap.

/// Cursor position and wrap state for a `cols` x `rows` character display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineCursor {
    cols: u8,
    rows: u8,
    col: u8,
    row: u8,
    implied_newline: bool,
}

impl LineCursor {
    /// Create a cursor at the home position
    pub const fn new(cols: u8, rows: u8) -> Self {
        Self {
            cols,
            rows,
            col: 0,
            row: 0,
            implied_newline: false,
        }
    }

    /// Move to row 0, column 0
    pub fn home(&mut self) {
        self.col = 0;
        self.row = 0;
        self.implied_newline = false;
    }

    /// Current (row, col)
    pub fn position(&self) -> (u8, u8) {
        (self.row, self.col)
    }

    /// Feed one byte
    ///
    /// Returns the (row, col) cell the byte must be drawn into, or `None`
    /// for a newline.
    pub fn put(&mut self, byte: u8) -> Option<(u8, u8)> {
        if self.cols == 0 || self.rows == 0 {
            return None;
        }

        let placed = if byte == b'\n' {
            if !self.implied_newline {
                self.col = self.cols;
            }
            None
        } else {
            let cell = (self.row, self.col);
            self.col += 1;
            Some(cell)
        };

        if self.col >= self.cols {
            self.col = 0;
            self.row += 1;
            self.implied_newline = byte != b'\n';
        } else {
            self.implied_newline = false;
        }

        if self.row >= self.rows {
            self.row = 0;
        }

        placed
    }
}

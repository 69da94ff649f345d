//! In-memory character screen
//!
//! A `COLS` x `ROWS` grid of ASCII cells written through a `LineCursor`.
//! The firmware copies dirty grids out to the LCD; tests read lines back.

use crate::backend::{DisplayError, TextDisplay};
use crate::cursor::LineCursor;

/// Columns on the bucket's LCD
pub const LCD_COLS: usize = 16;

/// Rows on the bucket's LCD
pub const LCD_ROWS: usize = 2;

/// Glyph drawn for characters the LCD ROM cannot show
const REPLACEMENT: u8 = b'?';

/// Character grid implementing `TextDisplay`
#[derive(Debug, Clone)]
pub struct CharScreen<const COLS: usize, const ROWS: usize> {
    cells: [[u8; COLS]; ROWS],
    cursor: LineCursor,
    dirty: bool,
}

impl<const COLS: usize, const ROWS: usize> Default for CharScreen<COLS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize, const ROWS: usize> CharScreen<COLS, ROWS> {
    /// Create a blank screen
    pub fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
            cursor: LineCursor::new(COLS as u8, ROWS as u8),
            dirty: true,
        }
    }

    /// Text of one row, padded with spaces
    pub fn line(&self, row: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|cells| core::str::from_utf8(cells).ok())
            .unwrap_or("")
    }

    /// Raw cell contents
    pub fn cells(&self) -> &[[u8; COLS]; ROWS] {
        &self.cells
    }

    /// Whether the grid changed since the last `take_dirty`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return and clear the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}

impl<const COLS: usize, const ROWS: usize> TextDisplay for CharScreen<COLS, ROWS> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for row in self.cells.iter_mut() {
            row.fill(b' ');
        }
        self.cursor.home();
        self.dirty = true;
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<(), DisplayError> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() && (ch == '\n' || !ch.is_ascii_control()) {
                ch as u8
            } else {
                REPLACEMENT
            };
            if let Some((row, col)) = self.cursor.put(byte) {
                self.cells[row as usize][col as usize] = byte;
            }
        }
        self.dirty = true;
        Ok(())
    }
}

//! Text display collaborator
//!
//! Defines the two-call interface the engine uses to talk to a display.

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction with the display failed
    Communication,
    /// Display never answered during bring-up
    NotInitialized,
}

/// Text display collaborator
///
/// `write` appends at the cursor. Text may contain `\n`; a line that exactly
/// fills the display width already moves the cursor to the next row, so a
/// `\n` directly after it is swallowed.
pub trait TextDisplay {
    /// Blank the display and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Write text at the cursor
    fn write(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Replace the whole display content
    fn show(&mut self, text: &str) -> Result<(), DisplayError> {
        self.clear()?;
        self.write(text)
    }
}

/// A missing display is a silent one
impl<T: TextDisplay> TextDisplay for Option<T> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        match self {
            Some(display) => display.clear(),
            None => Ok(()),
        }
    }

    fn write(&mut self, text: &str) -> Result<(), DisplayError> {
        match self {
            Some(display) => display.write(text),
            None => Ok(()),
        }
    }
}

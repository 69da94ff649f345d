//! Character display abstraction for the bucket timer
//!
//! This crate provides:
//! - `TextDisplay` trait, the only surface the game engine writes to
//! - `LineCursor`, a model of the HD44780 cursor as driven by the classic
//!   `putstr` routine (including its wrap/newline behaviour)
//! - `CharScreen`, an in-memory character grid implementing `TextDisplay`
//!
//! # Architecture
//!
//! The engine runs synchronously inside the cooperative scheduler, while the
//! LCD itself sits behind an async I2C bus. The engine therefore writes into a
//! `CharScreen`; the firmware flushes dirty screens to the glass from its own
//! task. Host tests read the same `CharScreen` back.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod cursor;
pub mod screen;

pub use backend::{DisplayError, TextDisplay};
pub use cursor::LineCursor;
pub use screen::{CharScreen, LCD_COLS, LCD_ROWS};

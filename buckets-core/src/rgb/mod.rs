//! RGB indicator
//!
//! Game logic describes *what* the strip should do by registering an
//! `RgbSettings` value; the `PatternEngine` turns the latest registration
//! into frames at its own cadence.

pub mod color;
pub mod engine;
pub mod settings;

pub use color::{Color, Rgb};
pub use engine::PatternEngine;
pub use settings::{Pattern, RgbRegister, RgbSettings, REPEAT_FOREVER};

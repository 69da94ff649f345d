//! Character LCD
//!
//! The engine draws into a `CharScreen` inside the device task. Dirty
//! frames travel through `SCREEN_UPDATE` to the LCD task, which owns the
//! I2C bus and pushes them to the glass.

pub mod lcd;

pub use lcd::Lcd;

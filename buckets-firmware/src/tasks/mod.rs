//! Embassy async tasks
//!
//! The device task runs the engine; the others own one peripheral each and
//! talk to it through `crate::channels`.

pub mod device;
pub mod encoder;
pub mod lcd;
pub mod led;
pub mod radio;

pub use device::{device_task, DeviceParts};
pub use encoder::encoder_task;
pub use lcd::lcd_task;
pub use led::led_task;
pub use radio::radio_task;

//! Addressable LED strip

use crate::rgb::Rgb;

/// Full-strip colour sink
pub trait LedStrip {
    /// Show a complete frame
    fn write(&mut self, frame: &[Rgb]);
}

impl<T: LedStrip> LedStrip for Option<T> {
    fn write(&mut self, frame: &[Rgb]) {
        if let Some(strip) = self {
            strip.write(frame);
        }
    }
}

//! Per-turn input snapshot
//!
//! Taking a snapshot drains pending counts, long presses and the encoder
//! delta, so each fact is acted on by exactly one consumer turn.

use super::button::{Button, Buttons};
use super::encoder::EncoderTracker;
use crate::state::Side;

/// One button as seen by the consumer this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonRead {
    pub pressed: bool,
    pub just_pressed: bool,
    pub just_released: bool,
    /// Completed short-press series length
    pub clicks: u8,
    /// Long press crossed its threshold (reported once)
    pub long_press: bool,
    /// Long press registered and still held
    pub long_held: bool,
}

impl ButtonRead {
    /// Drain a button
    pub fn take(button: &mut Button) -> Self {
        Self {
            pressed: button.is_pressed(),
            just_pressed: button.just_pressed(),
            just_released: button.just_released(),
            clicks: button.take_short_count(),
            long_press: button.take_long_press(),
            long_held: button.is_long_held(),
        }
    }
}

/// Everything the flow reads in one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    pub red: ButtonRead,
    pub blue: ButtonRead,
    pub confirm: ButtonRead,
    /// Encoder detents since the last snapshot, clockwise positive
    pub encoder: i32,
}

impl InputSnapshot {
    /// Drain the samplers' facts
    pub fn capture(buttons: &mut Buttons, encoder: &mut EncoderTracker) -> Self {
        Self {
            red: ButtonRead::take(&mut buttons.red),
            blue: ButtonRead::take(&mut buttons.blue),
            confirm: ButtonRead::take(&mut buttons.confirm),
            encoder: encoder.take_delta(),
        }
    }

    /// Team button by side
    pub fn side(&self, side: Side) -> &ButtonRead {
        match side {
            Side::Red => &self.red,
            Side::Blue => &self.blue,
        }
    }

    /// Short presses on either team button
    pub fn team_clicks(&self) -> u16 {
        self.red.clicks as u16 + self.blue.clicks as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ButtonTiming;

    #[test]
    fn test_capture_drains() {
        let timing = ButtonTiming {
            debounce_ms: 0,
            click_window_ms: 100,
            long_ms: 1000,
        };
        let mut buttons = Buttons::new(timing, timing);
        let mut encoder = EncoderTracker::new(0);

        buttons.confirm.update(true, 0);
        buttons.confirm.update(false, 10);
        buttons.confirm.update(false, 200);
        encoder.sample(-2);

        let snap = InputSnapshot::capture(&mut buttons, &mut encoder);
        assert_eq!(snap.confirm.clicks, 1);
        assert_eq!(snap.encoder, -2);

        let again = InputSnapshot::capture(&mut buttons, &mut encoder);
        assert_eq!(again.confirm.clicks, 0);
        assert_eq!(again.encoder, 0);
    }
}

//! Debounced button with press-series detection
//!
//! A press series is a run of presses that each start within
//! `click_window_ms` of the previous release. When the series goes quiet
//! its length becomes the pending short-press count. Holding a press past
//! `long_ms` registers a long press instead, and the presses before it in
//! the series are reported as short presses.

/// Timing thresholds for one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTiming {
    /// Level must be stable this long before it is believed
    pub debounce_ms: u32,
    /// Quiet time that closes a press series
    pub click_window_ms: u32,
    /// Hold time for a long press
    pub long_ms: u32,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self {
            debounce_ms: 10,
            click_window_ms: 200,
            long_ms: 1000,
        }
    }
}

/// One debounced button
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    timing: ButtonTiming,
    raw: bool,
    raw_since_ms: u32,
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
    last_change_ms: u32,
    series: u8,
    short_pending: u8,
    long_registered: bool,
    long_reported: bool,
}

impl Button {
    /// Create a released button
    pub fn new(timing: ButtonTiming) -> Self {
        Self {
            timing,
            raw: false,
            raw_since_ms: 0,
            pressed: false,
            just_pressed: false,
            just_released: false,
            last_change_ms: 0,
            series: 0,
            short_pending: 0,
            long_registered: false,
            long_reported: false,
        }
    }

    /// Sample the contact
    ///
    /// `raw_pressed` is the undebounced contact state with any wiring
    /// inversion already applied.
    pub fn update(&mut self, raw_pressed: bool, now_ms: u32) {
        self.just_pressed = false;
        self.just_released = false;

        if raw_pressed != self.raw {
            self.raw = raw_pressed;
            self.raw_since_ms = now_ms;
        }
        if self.raw != self.pressed
            && now_ms.wrapping_sub(self.raw_since_ms) >= self.timing.debounce_ms
        {
            self.pressed = self.raw;
            if self.pressed {
                self.just_pressed = true;
            } else {
                self.just_released = true;
            }
        }

        if self.just_pressed {
            self.last_change_ms = now_ms;
            self.series = self.series.saturating_add(1);
        } else if self.just_released {
            self.last_change_ms = now_ms;
            if self.long_registered {
                self.long_registered = false;
                self.long_reported = false;
            }
        } else {
            let held = now_ms.wrapping_sub(self.last_change_ms);
            if !self.long_registered && self.pressed && held > self.timing.long_ms {
                self.long_registered = true;
                self.short_pending = self.series.saturating_sub(1);
                self.series = 0;
            } else if self.series > 0 && !self.pressed && held > self.timing.click_window_ms {
                self.short_pending = self.series;
                self.series = 0;
            }
        }
    }

    /// Debounced level
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Went down on the latest sample
    pub fn just_pressed(&self) -> bool {
        self.just_pressed
    }

    /// Came up on the latest sample
    pub fn just_released(&self) -> bool {
        self.just_released
    }

    /// A long press is registered and the button is still down
    pub fn is_long_held(&self) -> bool {
        self.long_registered && self.pressed
    }

    /// Take the length of the last completed press series
    pub fn take_short_count(&mut self) -> u8 {
        core::mem::take(&mut self.short_pending)
    }

    /// Take the long press, reported once per hold
    pub fn take_long_press(&mut self) -> bool {
        if self.long_registered && !self.long_reported {
            self.long_reported = true;
            return true;
        }
        false
    }

    /// Drop pending counts and an unreported long press
    pub fn discard_pending(&mut self) {
        self.short_pending = 0;
        self.series = 0;
        if self.long_registered {
            self.long_reported = true;
        }
    }
}

/// The bucket's three buttons
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons {
    pub red: Button,
    pub blue: Button,
    /// Encoder push switch
    pub confirm: Button,
}

impl Buttons {
    pub fn new(team: ButtonTiming, confirm: ButtonTiming) -> Self {
        Self {
            red: Button::new(team),
            blue: Button::new(team),
            confirm: Button::new(confirm),
        }
    }

    /// Drop every pending count and long press
    pub fn discard_pending(&mut self) {
        self.red.discard_pending();
        self.blue.discard_pending();
        self.confirm.discard_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> Button {
        Button::new(ButtonTiming {
            debounce_ms: 10,
            click_window_ms: 200,
            long_ms: 1000,
        })
    }

    /// Hold `level` from `from` to `to` inclusive, sampling every ms
    fn hold(b: &mut Button, level: bool, from: u32, to: u32) {
        for t in from..=to {
            b.update(level, t);
        }
    }

    #[test]
    fn test_bounce_is_filtered() {
        let mut b = button();
        for t in 0..8 {
            b.update(t % 2 == 0, t);
            assert!(!b.just_pressed());
        }
        assert!(!b.is_pressed());
    }

    #[test]
    fn test_edge_lasts_one_sample() {
        let mut b = button();
        hold(&mut b, true, 0, 9);
        assert!(!b.is_pressed());
        b.update(true, 10);
        assert!(b.just_pressed());
        b.update(true, 11);
        assert!(!b.just_pressed());
        assert!(b.is_pressed());
    }

    #[test]
    fn test_single_click() {
        let mut b = button();
        hold(&mut b, true, 0, 60);
        hold(&mut b, false, 61, 150);
        // Series still open
        assert_eq!(b.take_short_count(), 0);
        hold(&mut b, false, 151, 400);
        assert_eq!(b.take_short_count(), 1);
        // Drained
        assert_eq!(b.take_short_count(), 0);
    }

    #[test]
    fn test_double_click() {
        let mut b = button();
        hold(&mut b, true, 0, 50);
        hold(&mut b, false, 51, 120);
        hold(&mut b, true, 121, 170);
        hold(&mut b, false, 171, 500);
        assert_eq!(b.take_short_count(), 2);
    }

    #[test]
    fn test_long_press_reported_once() {
        let mut b = button();
        hold(&mut b, true, 0, 900);
        assert!(!b.take_long_press());
        hold(&mut b, true, 901, 1100);
        assert!(b.is_long_held());
        assert!(b.take_long_press());
        assert!(!b.take_long_press());
        // No stray click after a long press
        hold(&mut b, false, 1101, 1500);
        assert_eq!(b.take_short_count(), 0);
        assert!(!b.is_long_held());
    }

    #[test]
    fn test_pending_count_survives_until_taken() {
        let mut b = button();
        hold(&mut b, true, 0, 50);
        hold(&mut b, false, 51, 400);
        // Many more samples without a consumer
        hold(&mut b, false, 401, 2000);
        assert_eq!(b.take_short_count(), 1);
    }

    #[test]
    fn test_discard_pending() {
        let mut b = button();
        hold(&mut b, true, 0, 50);
        hold(&mut b, false, 51, 400);
        b.discard_pending();
        assert_eq!(b.take_short_count(), 0);
    }
}

//! Whole-second match clock

/// Fires at most once per elapsed second of monotonic time
///
/// Each tick restarts the second from the moment it was observed, so a slow
/// scheduler turn delays the next tick instead of producing two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SecondClock {
    last_ms: u32,
}

impl SecondClock {
    pub const PERIOD_MS: u32 = 1000;

    pub fn new(now_ms: u32) -> Self {
        Self { last_ms: now_ms }
    }

    /// Start a fresh second, e.g. after a pause
    pub fn restart(&mut self, now_ms: u32) {
        self.last_ms = now_ms;
    }

    /// True when a full second has passed since the last tick
    pub fn tick(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_ms) >= Self::PERIOD_MS {
            self.last_ms = now_ms;
            return true;
        }
        false
    }
}

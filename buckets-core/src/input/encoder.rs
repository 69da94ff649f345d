//! Encoder position tracking
//!
//! The encoder driver only exposes an absolute position. The sampler
//! records it every turn and raises `rotated`; the consumer takes the delta
//! since the last position it acted on. Several detents between two
//! consumer turns add up rather than overwrite each other.

/// Last-seen position bookkeeping
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderTracker {
    position: i32,
    consumed: i32,
    rotated: bool,
}

impl EncoderTracker {
    /// Start at `position` with nothing pending
    pub fn new(position: i32) -> Self {
        Self {
            position,
            consumed: position,
            rotated: false,
        }
    }

    /// Record a sampled position
    pub fn sample(&mut self, position: i32) {
        self.position = position;
        if position != self.consumed {
            self.rotated = true;
        }
    }

    /// Take the movement since the last call
    pub fn take_delta(&mut self) -> i32 {
        if !self.rotated {
            return 0;
        }
        let delta = self.position.wrapping_sub(self.consumed);
        self.consumed = self.position;
        self.rotated = false;
        delta
    }
}

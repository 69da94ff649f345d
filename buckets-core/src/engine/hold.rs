//! Capture holds on the team buttons

use crate::input::{ButtonRead, InputSnapshot};
use crate::state::Side;

/// Result of a completed hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldOutcome {
    /// One side held long enough while the other button was up
    Claim(Side),
    /// Both sides held long enough at the same time
    Neutral,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Hold {
    since_ms: Option<u32>,
    spent: bool,
}

impl Hold {
    fn follow(&mut self, read: &ButtonRead, now_ms: u32) {
        if !read.pressed {
            *self = Hold::default();
        } else if read.just_pressed || self.since_ms.is_none() {
            self.since_ms = Some(now_ms);
            self.spent = false;
        }
    }

    fn elapsed(&self, now_ms: u32, long_ms: u32) -> bool {
        self.since_ms
            .is_some_and(|since| now_ms.wrapping_sub(since) >= long_ms)
    }
}

/// Tracks how long each team button has been down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldTracker {
    red: Hold,
    blue: Hold,
}

impl HoldTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget running holds; buttons still down start over
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn hold_mut(&mut self, side: Side) -> &mut Hold {
        match side {
            Side::Red => &mut self.red,
            Side::Blue => &mut self.blue,
        }
    }

    /// Feed this turn's buttons
    ///
    /// With `repeat` a claim restarts the hold so that keeping the button
    /// down claims again after another `long_ms`. Without it a hold claims
    /// once.
    pub fn update(
        &mut self,
        input: &InputSnapshot,
        now_ms: u32,
        long_ms: u32,
        repeat: bool,
    ) -> Option<HoldOutcome> {
        self.red.follow(&input.red, now_ms);
        self.blue.follow(&input.blue, now_ms);

        let red_long = self.red.elapsed(now_ms, long_ms);
        let blue_long = self.blue.elapsed(now_ms, long_ms);

        if self.red.since_ms.is_some() && self.blue.since_ms.is_some() {
            if red_long && blue_long && !(self.red.spent && self.blue.spent) {
                self.red.spent = true;
                self.blue.spent = true;
                return Some(HoldOutcome::Neutral);
            }
            return None;
        }

        let side = if red_long {
            Side::Red
        } else if blue_long {
            Side::Blue
        } else {
            return None;
        };

        let hold = self.hold_mut(side);
        if hold.spent {
            return None;
        }
        if repeat {
            hold.since_ms = Some(now_ms);
        } else {
            hold.spent = true;
        }
        Some(HoldOutcome::Claim(side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(red: (bool, bool), blue: (bool, bool)) -> InputSnapshot {
        let mut snap = InputSnapshot::default();
        snap.red.pressed = red.0;
        snap.red.just_pressed = red.1;
        snap.blue.pressed = blue.0;
        snap.blue.just_pressed = blue.1;
        snap
    }

    #[test]
    fn test_single_hold_claims_once() {
        let mut holds = HoldTracker::new();
        assert_eq!(holds.update(&input((true, true), (false, false)), 0, 1000, false), None);
        assert_eq!(holds.update(&input((true, false), (false, false)), 999, 1000, false), None);
        assert_eq!(
            holds.update(&input((true, false), (false, false)), 1000, 1000, false),
            Some(HoldOutcome::Claim(Side::Red))
        );
        assert_eq!(holds.update(&input((true, false), (false, false)), 5000, 1000, false), None);
    }

    #[test]
    fn test_repeating_hold() {
        let mut holds = HoldTracker::new();
        holds.update(&input((false, false), (true, true)), 0, 500, true);
        assert!(holds.update(&input((false, false), (true, false)), 500, 500, true).is_some());
        assert!(holds.update(&input((false, false), (true, false)), 700, 500, true).is_none());
        assert_eq!(
            holds.update(&input((false, false), (true, false)), 1000, 500, true),
            Some(HoldOutcome::Claim(Side::Blue))
        );
    }

    #[test]
    fn test_release_cancels() {
        let mut holds = HoldTracker::new();
        holds.update(&input((true, true), (false, false)), 0, 1000, false);
        holds.update(&input((false, false), (false, false)), 600, 1000, false);
        holds.update(&input((true, true), (false, false)), 700, 1000, false);
        assert_eq!(holds.update(&input((true, false), (false, false)), 1200, 1000, false), None);
        assert!(holds.update(&input((true, false), (false, false)), 1700, 1000, false).is_some());
    }

    #[test]
    fn test_contested_hold_does_not_claim() {
        let mut holds = HoldTracker::new();
        holds.update(&input((true, true), (false, false)), 0, 1000, false);
        holds.update(&input((true, false), (true, true)), 500, 1000, false);
        // Red is past the threshold but blue is down too
        assert_eq!(holds.update(&input((true, false), (true, false)), 1200, 1000, false), None);
        assert_eq!(
            holds.update(&input((true, false), (true, false)), 1500, 1000, false),
            Some(HoldOutcome::Neutral)
        );
        assert_eq!(holds.update(&input((true, false), (true, false)), 3000, 1000, false), None);
    }

    #[test]
    fn test_dual_hold_overrides_spent_claim() {
        let mut holds = HoldTracker::new();
        holds.update(&input((true, true), (false, false)), 0, 1000, false);
        assert!(holds.update(&input((true, false), (false, false)), 1000, 1000, false).is_some());
        holds.update(&input((true, false), (true, true)), 1100, 1000, false);
        assert_eq!(
            holds.update(&input((true, false), (true, false)), 2100, 1000, false),
            Some(HoldOutcome::Neutral)
        );
    }
}

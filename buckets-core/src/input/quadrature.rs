//! Quadrature decoding for the rotary encoder
//!
//! Noise-rejecting state machine: a detent only counts once both channels
//! have passed through the low/low state in order.
//!
//! ```text
//! CW:  (1,1) -> (0,1) -> (0,0) -> either high => one step
//! CCW: (1,1) -> (1,0) -> (0,0) -> either high => one step
//! ```

/// Direction of one detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    Idle,
    CwLead,
    CwBoth,
    CcwLead,
    CcwBoth,
}

/// Decoder plus running position counter
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    phase: Phase,
    last: (bool, bool),
    position: i32,
}

impl QuadratureDecoder {
    /// Start from the channel levels seen at power-on
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            phase: Phase::Idle,
            last: (a, b),
            position: 0,
        }
    }

    /// Detents counted so far, clockwise positive
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Feed the current channel levels
    pub fn update(&mut self, a: bool, b: bool) -> Option<Step> {
        if (a, b) == self.last {
            return None;
        }
        self.last = (a, b);

        let step = self.advance(a, b);
        match step {
            Some(Step::Clockwise) => self.position = self.position.wrapping_add(1),
            Some(Step::CounterClockwise) => self.position = self.position.wrapping_sub(1),
            None => {}
        }
        step
    }

    fn advance(&mut self, a: bool, b: bool) -> Option<Step> {
        match self.phase {
            Phase::Idle => {
                if !a && b {
                    self.phase = Phase::CwLead;
                } else if a && !b {
                    self.phase = Phase::CcwLead;
                }
                None
            }
            Phase::CwLead | Phase::CcwLead => {
                if !a && !b {
                    self.phase = if self.phase == Phase::CwLead {
                        Phase::CwBoth
                    } else {
                        Phase::CcwBoth
                    };
                } else if a && b {
                    // Bounced back
                    self.phase = Phase::Idle;
                }
                None
            }
            Phase::CwBoth | Phase::CcwBoth => {
                if !(a || b) {
                    return None;
                }
                let step = if self.phase == Phase::CwBoth {
                    Step::Clockwise
                } else {
                    Step::CounterClockwise
                };
                self.phase = Phase::Idle;
                Some(step)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(dec: &mut QuadratureDecoder, seq: &[(bool, bool)]) -> Option<Step> {
        let mut out = None;
        for &(a, b) in seq {
            if let Some(step) = dec.update(a, b) {
                out = Some(step);
            }
        }
        out
    }

    #[test]
    fn test_clockwise_detent() {
        let mut dec = QuadratureDecoder::new(true, true);
        let step = feed(&mut dec, &[(false, true), (false, false), (true, false), (true, true)]);
        assert_eq!(step, Some(Step::Clockwise));
        assert_eq!(dec.position(), 1);
    }

    #[test]
    fn test_counter_clockwise_detent() {
        let mut dec = QuadratureDecoder::new(true, true);
        let step = feed(&mut dec, &[(true, false), (false, false), (false, true), (true, true)]);
        assert_eq!(step, Some(Step::CounterClockwise));
        assert_eq!(dec.position(), -1);
    }

    #[test]
    fn test_bounce_does_not_count() {
        let mut dec = QuadratureDecoder::new(true, true);
        let step = feed(&mut dec, &[(false, true), (true, true), (false, true), (true, true)]);
        assert_eq!(step, None);
        assert_eq!(dec.position(), 0);
    }

    #[test]
    fn test_repeated_levels_are_ignored() {
        let mut dec = QuadratureDecoder::new(true, true);
        assert_eq!(dec.update(true, true), None);
        assert_eq!(dec.update(true, true), None);
    }
}

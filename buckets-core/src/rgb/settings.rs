//! Pattern settings and the shared settings register

use super::color::Color;
use crate::state::Team;

/// Repeat count meaning "until overwritten"
pub const REPEAT_FOREVER: i16 = -1;

/// Animation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    /// Whole strip in `color1`, no animation
    Solid,
    /// Sweep `color1` across the strip one pixel per step
    #[default]
    Fill,
    /// Sweep `color1`, then sweep `color2`
    FillCycle,
    /// Whole strip alternating `color1` / `color2`
    SolidBlink,
    /// Alternate pixels in `color1` / `color2`, swapping every step
    SingleBlinkCycle,
}

/// What the strip should be doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbSettings {
    pub color1: Color,
    pub color2: Color,
    pub pattern: Pattern,
    /// Time between animation steps
    pub delay_ms: u16,
    /// Full cycles to play, `REPEAT_FOREVER` for no end
    pub repeat: i16,
    /// Raise the register's hold flag until the pattern has played out
    pub hold: bool,
}

impl Default for RgbSettings {
    fn default() -> Self {
        Self {
            color1: Color::Green,
            color2: Color::Off,
            pattern: Pattern::Fill,
            delay_ms: 5,
            repeat: 1,
            hold: false,
        }
    }
}

impl RgbSettings {
    /// Default fill in `color`
    pub fn fill(color: Color) -> Self {
        Self {
            color1: color,
            ..Self::default()
        }
    }

    /// Static colour
    pub fn solid(color: Color) -> Self {
        Self {
            color1: color,
            pattern: Pattern::Solid,
            ..Self::default()
        }
    }

    /// Fill in a team's colour
    pub fn team(team: Team) -> Self {
        Self::fill(team.color())
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_color2(mut self, color: Color) -> Self {
        self.color2 = color;
        self
    }

    pub fn with_delay(mut self, delay_ms: u16) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn forever(mut self) -> Self {
        self.repeat = REPEAT_FOREVER;
        self
    }

    pub fn holding(mut self) -> Self {
        self.hold = true;
        self
    }
}

/// Latest-wins settings register shared by every task
///
/// There is no queue: a registration replaces whatever was there, and the
/// renderer picks it up on its next pass.
#[derive(Debug, Clone, Default)]
pub struct RgbRegister {
    settings: RgbSettings,
    generation: u32,
    holding: bool,
}

impl RgbRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current settings
    pub fn register(&mut self, settings: RgbSettings) {
        self.settings = settings;
        self.generation = self.generation.wrapping_add(1);
        self.holding = settings.hold;
    }

    /// Current settings
    pub fn settings(&self) -> &RgbSettings {
        &self.settings
    }

    /// Bumped on every registration
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// True while a hold pattern is still playing
    pub fn holding(&self) -> bool {
        self.holding
    }

    /// Called by the renderer when registration `generation` finished
    pub(crate) fn finished(&mut self, generation: u32) {
        if generation == self.generation {
            self.holding = false;
        }
    }
}

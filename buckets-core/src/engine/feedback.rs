//! Outputs produced by one engine step

use core::fmt::{self, Write};

use heapless::String;

use crate::rgb::RgbSettings;
use crate::state::Team;

/// Text for one full screen, lines separated by `\n`
pub type ScreenText = String<48>;

/// The two discrete team LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TeamLeds {
    pub red: bool,
    pub blue: bool,
}

impl TeamLeds {
    /// LEDs lit for a holder
    pub fn for_team(team: Team) -> Self {
        Self {
            red: team == Team::Red,
            blue: team == Team::Blue,
        }
    }
}

/// Display, RGB and LED changes requested during a step
///
/// Later requests in the same step replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Feedback {
    pub screen: Option<ScreenText>,
    pub rgb: Option<RgbSettings>,
    pub leds: Option<TeamLeds>,
}

impl Feedback {
    /// Replace the screen text
    pub fn show(&mut self, args: fmt::Arguments<'_>) {
        let mut text = ScreenText::new();
        // Overlong text is cut at the buffer size
        let _ = text.write_fmt(args);
        self.screen = Some(text);
    }

    /// Register an RGB pattern
    pub fn light(&mut self, settings: RgbSettings) {
        self.rgb = Some(settings);
    }

    /// New holder: team LEDs plus an RGB pattern
    pub fn team(&mut self, team: Team, settings: RgbSettings) {
        self.leds = Some(TeamLeds::for_team(team));
        self.rgb = Some(settings);
    }

    pub fn is_empty(&self) -> bool {
        self.screen.is_none() && self.rgb.is_none() && self.leds.is_none()
    }
}

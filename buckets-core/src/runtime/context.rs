//! State shared by the cooperative tasks

use crate::config::DeviceConfig;
use crate::engine::TeamLeds;
use crate::input::{Buttons, EncoderTracker};
use crate::rgb::RgbRegister;
use crate::state::MatchState;

/// Everything the tasks share, owned in one place
///
/// Samplers write `buttons` and `encoder`; the match flow drains them,
/// edits `live` and writes `rgb`, `leds` and `display`; the renderer reads
/// `rgb`.
pub struct Context<D, P> {
    /// Configuration edited by setup screens
    pub live: MatchState,
    pub buttons: Buttons,
    pub encoder: EncoderTracker,
    pub rgb: RgbRegister,
    pub leds: TeamLeds,
    pub display: D,
    pub peer: P,
    pub config: DeviceConfig,
}

impl<D, P> Context<D, P> {
    pub fn new(config: DeviceConfig, display: D, peer: P) -> Self {
        Self {
            live: MatchState::new(),
            buttons: Buttons::new(
                config.timing.team_buttons(),
                config.timing.confirm_button(),
            ),
            encoder: EncoderTracker::new(0),
            rgb: RgbRegister::new(),
            leds: TeamLeds::default(),
            display,
            peer,
            config,
        }
    }
}

//! Device configuration
//!
//! Tunables that belong to the hardware build rather than to a match. The
//! firmware embeds a `bucket.toml`, parses it with `parse_config` at boot and
//! falls back to `DeviceConfig::default()` when it cannot.

mod toml;

pub use self::toml::{parse_config, ParseError};

use crate::input::ButtonTiming;

/// Timing constants, all in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingConfig {
    pub debounce_ms: u32,
    /// Quiet time that ends a press series
    pub click_window_ms: u32,
    /// Long press on the encoder button (exit)
    pub confirm_long_ms: u32,
    /// Long press on the team buttons (life modes)
    pub team_long_ms: u32,
    /// Pause between screens so one press never confirms two of them
    pub settle_ms: u32,
    /// Lead time between the hub's `Start` and the clock
    pub peer_start_delay_ms: u32,
    /// How long `exiting...` stays up
    pub exit_notice_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 10,
            click_window_ms: 200,
            confirm_long_ms: 2000,
            team_long_ms: 1000,
            settle_ms: 500,
            peer_start_delay_ms: 6000,
            exit_notice_ms: 500,
        }
    }
}

impl TimingConfig {
    /// Thresholds for the red and blue buttons
    pub fn team_buttons(&self) -> ButtonTiming {
        ButtonTiming {
            debounce_ms: self.debounce_ms,
            click_window_ms: self.click_window_ms,
            long_ms: self.team_long_ms,
        }
    }

    /// Thresholds for the encoder push switch
    pub fn confirm_button(&self) -> ButtonTiming {
        ButtonTiming {
            debounce_ms: self.debounce_ms,
            click_window_ms: self.click_window_ms,
            long_ms: self.confirm_long_ms,
        }
    }
}

/// Character LCD
///
/// The panel is always 16x2; only the backpack address varies between units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    /// I2C addresses to probe, first answer wins
    pub addresses: [u8; 2],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            addresses: [0x27, 0x3F],
        }
    }
}

/// RGB indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RgbConfig {
    /// Global brightness, 0-255
    pub brightness: u8,
}

impl Default for RgbConfig {
    fn default() -> Self {
        Self { brightness: 96 }
    }
}

/// Radio bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeerConfig {
    pub enabled: bool,
    pub channel: u8,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            channel: 1,
        }
    }
}

/// Serial MP3 module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AudioConfig {
    pub enabled: bool,
    /// 0-30
    pub volume: u8,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            volume: 20,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    pub timing: TimingConfig,
    pub display: DisplayConfig,
    pub rgb: RgbConfig,
    pub peer: PeerConfig,
    pub audio: AudioConfig,
}

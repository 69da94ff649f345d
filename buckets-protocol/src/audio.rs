//! Serial MP3 module command codec
//!
//! The module listens at 9600 baud for short frames that start with 0xAA,
//! followed by a command byte, a data length, the data, and (for commands
//! with data) a checksum: the low byte of the sum of every byte after the
//! start byte.

use heapless::Vec;

/// Frame start byte
pub const AUDIO_START: u8 = 0xAA;

/// Highest volume the module accepts
pub const MAX_VOLUME: u8 = 30;

/// Longest encoded command
pub const MAX_AUDIO_FRAME: usize = 6;

/// Commands understood by the module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioCommand {
    /// Play a track by index
    PlayTrack(u16),
    /// One step louder
    VolumeUp,
    /// One step quieter
    VolumeDown,
    /// Absolute volume, clamped to `MAX_VOLUME`
    SetVolume(u8),
}

impl AudioCommand {
    /// Encode to wire bytes
    pub fn encode(self) -> Vec<u8, MAX_AUDIO_FRAME> {
        let bytes: &[u8] = match self {
            // Volume steps are fixed frames from the module datasheet
            AudioCommand::VolumeUp => &[AUDIO_START, 0x14, 0x00, 0xBE],
            AudioCommand::VolumeDown => &[AUDIO_START, 0x15, 0x00, 0xBF],
            AudioCommand::PlayTrack(track) => {
                let [hi, lo] = track.to_be_bytes();
                return with_checksum(&[0x07, 0x02, hi, lo]);
            }
            AudioCommand::SetVolume(level) => {
                return with_checksum(&[0x13, 0x01, level.min(MAX_VOLUME)]);
            }
        };
        Vec::from_slice(bytes).unwrap_or_default()
    }
}

/// Frame `body` behind the start byte and append its byte sum
fn with_checksum(body: &[u8]) -> Vec<u8, MAX_AUDIO_FRAME> {
    let sum = body.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    let mut out = Vec::new();
    let _ = out.push(AUDIO_START);
    let _ = out.extend_from_slice(body);
    let _ = out.push(sum);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_steps_are_fixed_frames() {
        assert_eq!(AudioCommand::VolumeUp.encode().as_slice(), &[0xAA, 0x14, 0x00, 0xBE]);
        assert_eq!(AudioCommand::VolumeDown.encode().as_slice(), &[0xAA, 0x15, 0x00, 0xBF]);
    }

    #[test]
    fn test_play_track() {
        let frame = AudioCommand::PlayTrack(0x0102).encode();
        let sum = (0x07u16 + 0x02 + 0x01 + 0x02) as u8;
        assert_eq!(frame.as_slice(), &[0xAA, 0x07, 0x02, 0x01, 0x02, sum]);
    }

    #[test]
    fn test_play_track_checksum_wraps() {
        let frame = AudioCommand::PlayTrack(0xFFFF).encode();
        let sum = (0x07u16 + 0x02 + 0xFF + 0xFF) as u8;
        assert_eq!(frame[5], sum);
    }

    #[test]
    fn test_set_volume_clamps() {
        let frame = AudioCommand::SetVolume(99).encode();
        assert_eq!(frame.as_slice(), &[0xAA, 0x13, 0x01, 30, 0x13 + 0x01 + 30]);
    }
}

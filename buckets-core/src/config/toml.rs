//! Minimal TOML reader for `bucket.toml`
//!
//! Handles only the subset the device file uses:
//! - `[section]` headers (no dotted or array-of-table headers)
//! - `key = value` with integers (decimal or `0x` hex, `_` separators),
//!   booleans, and flat integer arrays
//! - `#` comments, whole-line or trailing
//!
//! Keys not listed in the device schema are rejected so that typos surface
//! at boot instead of silently falling back to defaults.

use heapless::Vec;

use super::DeviceConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed or unknown section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Key not known in this section
    UnknownKey,
    /// Value has the wrong type or does not parse
    InvalidValue,
    /// Value outside the accepted range
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Display,
    Rgb,
    Peer,
    Audio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Int(u32),
    Bool(bool),
    Array(Vec<u32, 4>),
}

/// Parse `bucket.toml` text, starting from the defaults
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(name.trim())?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidLine)?;
        let key = key.trim();
        let value = parse_value(value.trim())?;
        apply(&mut config, section, key, value)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_section_header(name: &str) -> Result<Section, ParseError> {
    match name {
        "timing" => Ok(Section::Timing),
        "display" => Ok(Section::Display),
        "rgb" => Ok(Section::Rgb),
        "peer" => Ok(Section::Peer),
        "audio" => Ok(Section::Audio),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_int(text: &str) -> Result<u32, ParseError> {
    let mut digits: heapless::String<16> = heapless::String::new();
    for ch in text.chars().filter(|&c| c != '_') {
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }
    let parsed = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => digits.parse::<u32>(),
    };
    parsed.map_err(|_| ParseError::InvalidValue)
}

fn parse_value(text: &str) -> Result<Value, ParseError> {
    match text {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {}
    }

    if let Some(inner) = text.strip_prefix('[') {
        let inner = inner.strip_suffix(']').ok_or(ParseError::InvalidValue)?;
        let mut items = Vec::new();
        for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            items
                .push(parse_int(item)?)
                .map_err(|_| ParseError::OutOfRange)?;
        }
        return Ok(Value::Array(items));
    }

    parse_int(text).map(Value::Int)
}

fn int(value: &Value) -> Result<u32, ParseError> {
    match value {
        Value::Int(v) => Ok(*v),
        _ => Err(ParseError::InvalidValue),
    }
}

fn int_in(value: &Value, min: u32, max: u32) -> Result<u32, ParseError> {
    let v = int(value)?;
    if v < min || v > max {
        return Err(ParseError::OutOfRange);
    }
    Ok(v)
}

fn byte_in(value: &Value, min: u8, max: u8) -> Result<u8, ParseError> {
    int_in(value, min as u32, max as u32).map(|v| v as u8)
}

fn boolean(value: &Value) -> Result<bool, ParseError> {
    match value {
        Value::Bool(b) => Ok(*b),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply(
    config: &mut DeviceConfig,
    section: Section,
    key: &str,
    value: Value,
) -> Result<(), ParseError> {
    const MINUTE_MS: u32 = 60_000;

    match (section, key) {
        (Section::Timing, "debounce_ms") => config.timing.debounce_ms = int_in(&value, 0, 100)?,
        (Section::Timing, "click_window_ms") => {
            config.timing.click_window_ms = int_in(&value, 50, 2000)?
        }
        (Section::Timing, "confirm_long_ms") => {
            config.timing.confirm_long_ms = int_in(&value, 200, 10_000)?
        }
        (Section::Timing, "team_long_ms") => {
            config.timing.team_long_ms = int_in(&value, 200, 10_000)?
        }
        (Section::Timing, "settle_ms") => config.timing.settle_ms = int_in(&value, 0, 5000)?,
        (Section::Timing, "peer_start_delay_ms") => {
            config.timing.peer_start_delay_ms = int_in(&value, 0, MINUTE_MS)?
        }
        (Section::Timing, "exit_notice_ms") => {
            config.timing.exit_notice_ms = int_in(&value, 0, 5000)?
        }

        (Section::Display, "addresses") => {
            let Value::Array(items) = value else {
                return Err(ParseError::InvalidValue);
            };
            if items.is_empty() || items.len() > config.display.addresses.len() {
                return Err(ParseError::OutOfRange);
            }
            for &addr in &items {
                if addr > 0x7F {
                    return Err(ParseError::OutOfRange);
                }
            }
            // A single address is probed twice
            let first = items[0] as u8;
            let second = items.get(1).map_or(first, |&a| a as u8);
            config.display.addresses = [first, second];
        }

        (Section::Rgb, "brightness") => config.rgb.brightness = byte_in(&value, 0, 255)?,

        (Section::Peer, "enabled") => config.peer.enabled = boolean(&value)?,
        (Section::Peer, "channel") => config.peer.channel = byte_in(&value, 1, 14)?,

        (Section::Audio, "enabled") => config.audio.enabled = boolean(&value)?,
        (Section::Audio, "volume") => config.audio.volume = byte_in(&value, 0, 30)?,

        (Section::Root, _) => return Err(ParseError::InvalidSection),
        _ => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Bucket hardware settings

[timing]
debounce_ms = 15
click_window_ms = 250     # double-press window
confirm_long_ms = 2_000
peer_start_delay_ms = 6000

[display]
addresses = [0x27, 0x3F]

[rgb]
brightness = 128

[peer]
enabled = true
channel = 6

[audio]
enabled = false
volume = 25
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.timing.debounce_ms, 15);
        assert_eq!(config.timing.click_window_ms, 250);
        assert_eq!(config.timing.confirm_long_ms, 2000);
        assert_eq!(config.timing.team_long_ms, 1000);
        assert_eq!(config.display.addresses, [0x27, 0x3F]);
        assert_eq!(config.rgb.brightness, 128);
        assert!(config.peer.enabled);
        assert_eq!(config.peer.channel, 6);
        assert_eq!(config.audio.volume, 25);
    }

    #[test]
    fn test_empty_file_is_defaults() {
        assert_eq!(parse_config("").unwrap(), DeviceConfig::default());
        assert_eq!(parse_config("# nothing\n\n").unwrap(), DeviceConfig::default());
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(parse_config("[motor]\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[timing\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_key_outside_section() {
        assert_eq!(parse_config("brightness = 3\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_config("[rgb]\nbrightnes = 3\n"),
            Err(ParseError::UnknownKey)
        );
        // Panel geometry is fixed at build time
        assert_eq!(parse_config("[display]\ncols = 20\n"), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(parse_config("[peer]\nenabled = 1\n"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[rgb]\nbrightness = 300\n"), Err(ParseError::OutOfRange));
        assert_eq!(parse_config("[audio]\nvolume = 31\n"), Err(ParseError::OutOfRange));
        assert_eq!(parse_config("[rgb]\nbrightness = bright\n"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[rgb]\nbrightness\n"), Err(ParseError::InvalidLine));
    }

    #[test]
    fn test_single_display_address() {
        let config = parse_config("[display]\naddresses = [0x3F]\n").unwrap();
        assert_eq!(config.display.addresses, [0x3F, 0x3F]);
        assert_eq!(
            parse_config("[display]\naddresses = [0x80]\n"),
            Err(ParseError::OutOfRange)
        );
    }
}

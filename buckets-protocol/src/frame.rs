//! Radio bridge link framing
//!
//! Frame format:
//! - START (1 byte): 0xAA
//! - LENGTH (1 byte): payload length, at most `MAX_FRAME_PAYLOAD`
//! - KIND (1 byte): message kind
//! - PAYLOAD (LENGTH bytes)
//! - CHECKSUM (1 byte): XOR of LENGTH, KIND and every payload byte

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Largest payload carried in one frame
pub const MAX_FRAME_PAYLOAD: usize = 64;

/// Largest encoded frame
pub const MAX_FRAME_LEN: usize = MAX_FRAME_PAYLOAD + 4;

/// Framing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload longer than `MAX_FRAME_PAYLOAD`
    PayloadTooLarge,
    /// Declared length out of range
    BadLength,
    /// Checksum byte did not match
    BadChecksum,
    /// Frame kind not understood by the receiver
    UnknownKind(u8),
}

/// One link frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Message kind
    pub kind: u8,
    /// Payload bytes
    pub payload: Vec<u8, MAX_FRAME_PAYLOAD>,
}

fn checksum(kind: u8, payload: &[u8]) -> u8 {
    payload
        .iter()
        .fold(payload.len() as u8 ^ kind, |acc, &b| acc ^ b)
}

impl Frame {
    /// Build a frame, rejecting oversized payloads
    pub fn new(kind: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { kind, payload })
    }

    /// Serialize to wire bytes
    pub fn encode(&self) -> Vec<u8, MAX_FRAME_LEN> {
        let mut out = Vec::new();
        // Capacity covers header, largest payload and checksum
        let _ = out.push(FRAME_START);
        let _ = out.push(self.payload.len() as u8);
        let _ = out.push(self.kind);
        let _ = out.extend_from_slice(&self.payload);
        let _ = out.push(checksum(self.kind, &self.payload));
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Sync,
    Length,
    Kind,
    Payload,
    Checksum,
}

/// Byte-at-a-time frame decoder
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    length: usize,
    kind: u8,
    payload: Vec<u8, MAX_FRAME_PAYLOAD>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a parser waiting for a start byte
    pub const fn new() -> Self {
        Self {
            stage: Stage::Sync,
            length: 0,
            kind: 0,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.stage = Stage::Sync;
        self.length = 0;
        self.payload.clear();
    }

    /// Feed one received byte
    ///
    /// Returns `Ok(Some(frame))` once a frame completes. Errors reset the
    /// parser, which then hunts for the next start byte.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.stage {
            Stage::Sync => {
                if byte == FRAME_START {
                    self.stage = Stage::Length;
                }
            }
            Stage::Length => {
                if byte as usize > MAX_FRAME_PAYLOAD {
                    self.reset();
                    return Err(FrameError::BadLength);
                }
                self.length = byte as usize;
                self.stage = Stage::Kind;
            }
            Stage::Kind => {
                self.kind = byte;
                self.payload.clear();
                self.stage = if self.length == 0 {
                    Stage::Checksum
                } else {
                    Stage::Payload
                };
            }
            Stage::Payload => {
                // Length was bounded above, push cannot overflow
                let _ = self.payload.push(byte);
                if self.payload.len() == self.length {
                    self.stage = Stage::Checksum;
                }
            }
            Stage::Checksum => {
                let expected = checksum(self.kind, &self.payload);
                let frame = Frame {
                    kind: self.kind,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                if byte != expected {
                    return Err(FrameError::BadChecksum);
                }
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(parser: &mut FrameParser, bytes: &[u8]) -> Option<Result<Frame, FrameError>> {
        for &b in bytes {
            match parser.feed(b) {
                Ok(Some(frame)) => return Some(Ok(frame)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }

    #[test]
    fn test_encode_layout() {
        let frame = Frame::new(0x01, b"End").unwrap();
        let bytes = frame.encode();
        assert_eq!(bytes[0], FRAME_START);
        assert_eq!(bytes[1], 3);
        assert_eq!(bytes[2], 0x01);
        assert_eq!(&bytes[3..6], b"End");
        assert_eq!(bytes[6], 3 ^ 0x01 ^ b'E' ^ b'n' ^ b'd');
    }

    #[test]
    fn test_parser_skips_line_noise() {
        let frame = Frame::new(0x02, &[]).unwrap();
        let mut stream: Vec<u8, 16> = Vec::from_slice(&[0x00, 0x13, 0x37]).unwrap();
        stream.extend_from_slice(&frame.encode()).unwrap();

        let mut parser = FrameParser::new();
        assert_eq!(parse_all(&mut parser, &stream), Some(Ok(frame)));
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let mut bytes = Frame::new(0x01, b"Start").unwrap().encode();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let mut parser = FrameParser::new();
        assert_eq!(
            parse_all(&mut parser, &bytes),
            Some(Err(FrameError::BadChecksum))
        );
    }

    #[test]
    fn test_oversized_length_rejected() {
        let mut parser = FrameParser::new();
        assert_eq!(
            parse_all(&mut parser, &[FRAME_START, (MAX_FRAME_PAYLOAD + 1) as u8]),
            Some(Err(FrameError::BadLength))
        );
    }

    #[test]
    fn test_parser_recovers_after_error() {
        let mut parser = FrameParser::new();
        let _ = parse_all(&mut parser, &[FRAME_START, 0xFF]);
        let good = Frame::new(0x01, b"Pause").unwrap();
        assert_eq!(parse_all(&mut parser, &good.encode()), Some(Ok(good)));
    }

    #[test]
    fn test_payload_too_large() {
        let big = [0u8; MAX_FRAME_PAYLOAD + 1];
        assert_eq!(Frame::new(0x81, &big), Err(FrameError::PayloadTooLarge));
    }
}

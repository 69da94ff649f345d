//! Messages exchanged with the radio bridge
//!
//! The bridge is a small radio co-processor that relays broadcast payloads
//! between the UART link and the air. It neither interprets nor filters
//! payloads.

use crate::frame::{Frame, FrameError};
use crate::token::{PeerPayload, MAX_PEER_PAYLOAD};

/// Message kind identifiers
pub mod kind {
    /// Bridge → bucket: a broadcast was heard
    pub const RECEIVED: u8 = 0x01;
    /// Bridge → bucket: radio is up
    pub const READY: u8 = 0x02;
    /// Bucket → bridge: broadcast this payload
    pub const BROADCAST: u8 = 0x81;
    /// Bucket → bridge: tune to this channel
    pub const SET_CHANNEL: u8 = 0x82;
}

/// Bridge → bucket messages
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeEvent {
    /// Payload heard on the air
    Received(PeerPayload),
    /// Radio initialised and listening
    Ready,
}

impl BridgeEvent {
    /// Decode a received frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.kind {
            kind::RECEIVED => {
                if frame.payload.len() > MAX_PEER_PAYLOAD {
                    return Err(FrameError::PayloadTooLarge);
                }
                let payload = PeerPayload::from_slice(&frame.payload)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Ok(BridgeEvent::Received(payload))
            }
            kind::READY => Ok(BridgeEvent::Ready),
            other => Err(FrameError::UnknownKind(other)),
        }
    }
}

/// Bucket → bridge messages
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeCommand {
    /// Broadcast a payload to every peer
    Broadcast(PeerPayload),
    /// Select the radio channel
    SetChannel(u8),
}

impl BridgeCommand {
    /// Encode as a link frame
    pub fn to_frame(&self) -> Frame {
        let (kind, payload): (u8, &[u8]) = match self {
            BridgeCommand::Broadcast(payload) => (kind::BROADCAST, payload),
            BridgeCommand::SetChannel(channel) => (kind::SET_CHANNEL, core::slice::from_ref(channel)),
        };
        // Peer payloads are smaller than a frame payload
        Frame::new(kind, payload).unwrap_or_else(|_| Frame {
            kind,
            payload: heapless::Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::PeerToken;

    #[test]
    fn test_received_token() {
        let frame = Frame::new(kind::RECEIVED, b"Resume").unwrap();
        let event = BridgeEvent::from_frame(&frame).unwrap();
        match event {
            BridgeEvent::Received(payload) => {
                assert_eq!(PeerToken::from_payload(&payload), Some(PeerToken::Resume));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_oversized_broadcast_rejected() {
        let frame = Frame::new(kind::RECEIVED, &[b'x'; MAX_PEER_PAYLOAD + 1]).unwrap();
        assert_eq!(
            BridgeEvent::from_frame(&frame),
            Err(FrameError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_unknown_kind() {
        let frame = Frame::new(0x7F, &[]).unwrap();
        assert_eq!(
            BridgeEvent::from_frame(&frame),
            Err(FrameError::UnknownKind(0x7F))
        );
    }

    #[test]
    fn test_set_channel_frame() {
        let frame = BridgeCommand::SetChannel(6).to_frame();
        assert_eq!(frame.kind, kind::SET_CHANNEL);
        assert_eq!(frame.payload.as_slice(), &[6]);
    }

    #[test]
    fn test_broadcast_frame() {
        let frame = BridgeCommand::Broadcast(PeerToken::End.to_payload()).to_frame();
        assert_eq!(frame.kind, kind::BROADCAST);
        assert_eq!(frame.payload.as_slice(), b"End");
    }
}

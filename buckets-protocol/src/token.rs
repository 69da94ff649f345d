//! Peer sync token vocabulary
//!
//! Tokens travel as bare UTF-8 text with no framing of their own. Anything
//! that is not exactly one of the six words is not a token.

use heapless::Vec;

/// Largest broadcast payload a bucket will accept
pub const MAX_PEER_PAYLOAD: usize = 32;

/// Raw broadcast payload as received from the radio
pub type PeerPayload = Vec<u8, MAX_PEER_PAYLOAD>;

/// Control tokens exchanged between buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeerToken {
    /// Hub started the match clock
    Start,
    /// Match clock paused
    Pause,
    /// Match clock resumed
    Resume,
    /// Hub opened this point for capture
    Active,
    /// Hub closed this point
    Inactive,
    /// Match over
    End,
}

impl PeerToken {
    /// Every token, in wire order
    pub const ALL: [PeerToken; 6] = [
        PeerToken::Start,
        PeerToken::Pause,
        PeerToken::Resume,
        PeerToken::Active,
        PeerToken::Inactive,
        PeerToken::End,
    ];

    /// Wire text
    pub const fn as_str(self) -> &'static str {
        match self {
            PeerToken::Start => "Start",
            PeerToken::Pause => "Pause",
            PeerToken::Resume => "Resume",
            PeerToken::Active => "Active",
            PeerToken::Inactive => "Inactive",
            PeerToken::End => "End",
        }
    }

    /// Wire bytes
    pub const fn as_bytes(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    /// Interpret a received payload
    ///
    /// Matching is exact: no trimming, no case folding.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|token| token.as_bytes() == payload)
    }

    /// Build an outgoing payload
    pub fn to_payload(self) -> PeerPayload {
        // Longest token is 8 bytes, always fits
        Vec::from_slice(self.as_bytes()).unwrap_or_default()
    }
}

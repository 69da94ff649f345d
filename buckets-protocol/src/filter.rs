//! Receive-side de-duplication
//!
//! Broadcasts carry no sequence number and the radio may deliver a frame
//! more than once. A bucket applies a token only when it differs from the
//! last token it applied. A fresh filter is used for every match.

use crate::token::PeerToken;

/// Last-applied-token filter
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerFilter {
    last_applied: Option<PeerToken>,
}

impl PeerFilter {
    /// Create a filter that has applied nothing yet
    pub const fn new() -> Self {
        Self { last_applied: None }
    }

    /// Forget the last applied token
    pub fn reset(&mut self) {
        self.last_applied = None;
    }

    /// Decode a payload and decide whether it should be applied
    ///
    /// Unrecognised payloads are dropped without touching the filter state.
    pub fn accept(&mut self, payload: &[u8]) -> Option<PeerToken> {
        let token = PeerToken::from_payload(payload)?;
        self.accept_token(token)
    }

    /// Decide whether an already decoded token should be applied
    pub fn accept_token(&mut self, token: PeerToken) -> Option<PeerToken> {
        if self.last_applied == Some(token) {
            return None;
        }
        self.last_applied = Some(token);
        Some(token)
    }
}

//! Peer broadcast link

use buckets_protocol::PeerPayload;

/// Receive side of the peer broadcast bus
///
/// Polled from the cooperative scheduler, so it must never wait.
pub trait PeerLink {
    /// Next pending payload, or `None` right away if nothing is queued
    fn try_recv(&mut self) -> Option<PeerPayload>;
}

impl<T: PeerLink> PeerLink for Option<T> {
    fn try_recv(&mut self) -> Option<PeerPayload> {
        self.as_mut().and_then(PeerLink::try_recv)
    }
}

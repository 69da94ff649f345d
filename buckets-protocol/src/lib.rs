//! Bucket timer wire protocols
//!
//! Three byte-level protocols live here:
//!
//! - **Peer sync**: the broadcast token vocabulary shared by every bucket in
//!   a match (`Start`, `Pause`, `Resume`, `Active`, `Inactive`, `End`) and
//!   the receive-side de-duplication filter.
//! - **Radio bridge link**: the UART framing between the bucket and its
//!   radio bridge, which carries peer broadcasts in both directions.
//!
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ KIND │ PAYLOAD     │ CHECKSUM │
//! │ 0xAA  │ 1B     │ 1B   │ 0–64B       │ XOR      │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! - **Audio**: command frames for the serial MP3 module.

#![no_std]
#![deny(unsafe_code)]

pub mod audio;
pub mod bridge;
pub mod filter;
pub mod frame;
pub mod token;

pub use audio::AudioCommand;
pub use bridge::{BridgeCommand, BridgeEvent};
pub use filter::PeerFilter;
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_PAYLOAD};
pub use token::{PeerPayload, PeerToken, MAX_PEER_PAYLOAD};

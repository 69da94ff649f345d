//! Hardware collaborator traits
//!
//! These traits define the seams between the engine and the board. Every
//! one of them is implemented for `Option<T>`, where `None` stands for a
//! peripheral that failed to come up and now behaves as a no-op.

pub mod input;
pub mod led;
pub mod peer;

pub use buckets_display::{DisplayError, TextDisplay};
pub use input::{LevelInput, PositionSource};
pub use led::LedStrip;
pub use peer::PeerLink;

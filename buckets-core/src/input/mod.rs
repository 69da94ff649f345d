//! Input samplers
//!
//! Samplers run as their own scheduler tasks and leave *facts* behind
//! (levels, one-turn edges, pending press counts, encoder position). The
//! match flow turns those facts into an `InputSnapshot` once per turn.
//!
//! Edge flags live for exactly one sampler pass. Counts and encoder deltas
//! accumulate until a consumer takes them.

pub mod button;
pub mod encoder;
pub mod quadrature;
pub mod snapshot;

pub use button::{Button, ButtonTiming, Buttons};
pub use encoder::EncoderTracker;
pub use quadrature::{QuadratureDecoder, Step};
pub use snapshot::{ButtonRead, InputSnapshot};

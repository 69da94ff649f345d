//! Match state and flow state machine
//!
//! `MatchState` is the one live record the device keeps between matches;
//! every match runs on its own copy of it. `Phase`/`Event` describe where
//! the device is in the menu → setup → match → restart loop.

pub mod events;
pub mod machine;
pub mod match_state;
pub mod team;

pub use events::Event;
pub use machine::Phase;
pub use match_state::{format_clock, ClockText, MatchState, RestartChoice, BUCKET_IDS};
pub use team::{Side, Team};

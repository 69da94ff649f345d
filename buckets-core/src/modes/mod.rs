//! Game mode catalogue
//!
//! Every mode is an immutable [`ModeDescriptor`]: the setup steps it runs,
//! the scoring policy the engine applies, how the match clock behaves and
//! what ends the match. The engine has no per-mode code paths beyond these
//! policy values.

mod descriptor;
mod table;

pub use descriptor::{
    ClaimRule, ClockPolicy, LifeCounting, ModeDescriptor, Presentation, ReadyScreen,
    RotationGate, ScoringPolicy, SetupStep, Termination, MAX_SETUP_STEPS,
};
pub use table::{get, mode_count, MODES};

//! Game-mode execution
//!
//! - `setup`: setup screen field policies and screen texts
//! - `game`: one match of any mode, driven by its descriptor
//! - `flow`: the match-flow task walking menu, setup, match and restart

mod clock;
mod feedback;
mod flow;
mod game;
mod hold;
mod setup;

pub use clock::SecondClock;
pub use feedback::{Feedback, ScreenText, TeamLeds};
pub use flow::MatchFlow;
pub use game::{EndReason, Game};
pub use hold::{HoldOutcome, HoldTracker};
pub use setup::{adjust, prompt, ready_text, scroll_menu, scroll_restart};

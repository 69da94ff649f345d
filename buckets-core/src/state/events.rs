//! Flow events
//!
//! Events are raised by the match flow as the operator and the hub move the
//! device through a match.

/// Events that drive the flow state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Boot gate passed, peripherals up
    BootComplete,
    /// A mode was confirmed on the menu
    ModeChosen,
    /// The chosen menu entry has no descriptor
    ModeUnavailable,
    /// Last setup step confirmed
    SetupComplete,
    /// Operator confirmed the ready screen of a local mode
    StartLocal,
    /// Operator confirmed the ready screen of a wireless mode
    AwaitPeer,
    /// Hub sent `Start` and the settle delay elapsed
    PeerStarted,
    /// Operator abandoned the wait for the hub
    Abort,
    /// Countdown, threshold, exit or peer `End`
    MatchOver,
    /// Operator dismissed the result screen
    Acknowledge,
    /// Restart prompt answered Yes
    Replay,
    /// Restart prompt answered No
    Quit,
}

//! Flow state machine
//!
//! What the device shows and which inputs it listens to is a function of the
//! current phase. The engine owns the side effects; this table only decides
//! where an event leads.

use super::events::Event;

/// Device phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Power-on, before the first menu
    Boot,
    /// Mode selection
    Menu,
    /// Running the chosen mode's setup steps
    Setup,
    /// Ready screen, waiting for the operator to start
    Standby,
    /// Wireless modes: waiting for the hub's `Start`
    WaitingForPeer,
    /// Match in progress
    Running,
    /// Result on screen
    Ended,
    /// Replay-or-quit prompt
    Restarting,
}

impl Phase {
    /// Whether peer tokens are consumed (rather than drained) in this phase
    pub fn listens_to_peers(&self) -> bool {
        matches!(self, Phase::WaitingForPeer | Phase::Running)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Boot, BootComplete) => Menu,

            (Menu, ModeChosen) => Setup,
            (Menu, ModeUnavailable) => Menu,

            (Setup, SetupComplete) => Standby,
            (Setup, ModeUnavailable) => Menu,

            (Standby, StartLocal) => Running,
            (Standby, AwaitPeer) => WaitingForPeer,

            (WaitingForPeer, PeerStarted) => Running,
            (WaitingForPeer, Abort) => Restarting,

            (Running, MatchOver) => Ended,

            (Ended, Acknowledge) => Restarting,

            (Restarting, Replay) => Standby,
            (Restarting, Quit) => Menu,

            // Default: stay in current phase
            _ => self,
        }
    }
}

//! Mode descriptor types

/// Longest setup sequence any mode uses
pub const MAX_SETUP_STEPS: usize = 4;

/// One interactive setup screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupStep {
    Lives,
    BucketIndex,
    BucketCount,
    LoopCount,
    /// Team chosen with the red/blue buttons
    Team,
    GameLength,
    CapLength,
    Checkpoint,
    LongPress,
    /// Acknowledge that a hub timer drives the match
    TimerBoxCheck,
}

impl SetupStep {
    /// Whether this step starts a new group of screens
    ///
    /// Steps that continue a group (bucket count after bucket ID, cap time
    /// after game time) appear without a settle pause.
    pub fn opens_group(self) -> bool {
        !matches!(
            self,
            SetupStep::BucketCount
                | SetupStep::LoopCount
                | SetupStep::CapLength
                | SetupStep::Checkpoint
        )
    }
}

/// Direction of the life counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifeCounting {
    /// Presses spend lives, the match ends at zero
    Down,
    /// Presses count deaths
    Up,
}

/// What a completed hold does to possession
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClaimRule {
    /// The holder takes (or keeps) the point, once per hold
    Latch,
    /// Possession moves one stage toward the holder: opponent, neutral,
    /// holder. Keeping the button down repeats the step.
    Stepwise,
    /// Either button captures for the bucket's own team while it is down and
    /// drains the capture budget
    Budget,
}

/// What opens and closes a rotation point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotationGate {
    /// The countdown passing through this bucket's windows
    Windows,
    /// `Active` / `Inactive` tokens from the hub
    Hub,
}

/// Scoring policy applied while running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScoringPolicy {
    /// Team button presses adjust a shared life counter
    LifeBased(LifeCounting),
    /// Holding a button takes the objective; holder time accrues
    CaptureHold(ClaimRule),
    /// A press takes the point while it is open; holder time accrues
    TimeWindowRotation(RotationGate),
    /// Both sides start with the full clock and the holder's runs down
    DualCountdown,
}

/// Behaviour of `game_length_s` while running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockPolicy {
    /// No match clock
    None,
    /// Counts down to zero
    Countdown,
    /// The hub keeps time, the device only scores
    OpenEnded,
    /// Counts down a warm-up before play opens
    Warmup,
}

/// Extra condition (besides the local exit) that ends a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Termination {
    LivesExhausted,
    /// Only the local exit ends the match
    ExitOnly,
    /// Clock out while nobody is capturing, or budget out while someone is
    BudgetOrClock,
    ClockExpired,
    /// One side's clock reached zero
    EitherTimerZero,
    /// First completed capture after the warm-up
    FirstCapture,
    /// The hub's `End` token
    PeerEnd,
}

/// Screen layout used while running and on the result screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Presentation {
    Lives,
    Deaths,
    /// Mode clock and capture budget
    Budget,
    /// Red and blue clocks
    Scoreboard,
    /// Holder and clock
    Territory,
    HotPockets,
}

/// Ready screen shown before a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadyScreen {
    Lives,
    Bucket,
    TeamTimer,
    Team,
    TimerLongPress,
    Timer,
    TimerBox,
}

/// Immutable definition of one game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeDescriptor {
    pub name: &'static str,
    pub setup: &'static [SetupStep],
    pub scoring: ScoringPolicy,
    pub clock: ClockPolicy,
    pub termination: Termination,
    pub presentation: Presentation,
    /// Waits for the hub's `Start` and listens to peer tokens
    pub wireless: bool,
}

impl ModeDescriptor {
    fn has(&self, step: SetupStep) -> bool {
        self.setup.contains(&step)
    }

    /// Whether the operator picks a team for this bucket
    pub fn is_team_based(&self) -> bool {
        self.has(SetupStep::Team)
    }

    /// Whether a configured hold time applies
    pub fn uses_long_press(&self) -> bool {
        self.has(SetupStep::LongPress)
    }

    /// Ready screen layout, by priority of the configured fields
    pub fn ready_screen(&self) -> ReadyScreen {
        let timer = self.has(SetupStep::GameLength);
        if self.has(SetupStep::Lives) {
            ReadyScreen::Lives
        } else if self.has(SetupStep::BucketIndex) {
            ReadyScreen::Bucket
        } else if self.is_team_based() {
            if timer {
                ReadyScreen::TeamTimer
            } else {
                ReadyScreen::Team
            }
        } else if timer {
            if self.uses_long_press() {
                ReadyScreen::TimerLongPress
            } else {
                ReadyScreen::Timer
            }
        } else if self.has(SetupStep::TimerBoxCheck) {
            ReadyScreen::TimerBox
        } else {
            ReadyScreen::Timer
        }
    }
}

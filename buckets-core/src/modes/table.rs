//! The twelve supported modes, in menu order

use super::descriptor::{
    ClaimRule, ClockPolicy, LifeCounting, ModeDescriptor, Presentation, RotationGate,
    ScoringPolicy, SetupStep, Termination,
};

use SetupStep::*;

/// Menu entries
pub static MODES: [ModeDescriptor; 12] = [
    ModeDescriptor {
        name: "Attrition",
        setup: &[Lives, Team],
        scoring: ScoringPolicy::LifeBased(LifeCounting::Down),
        clock: ClockPolicy::None,
        termination: Termination::LivesExhausted,
        presentation: Presentation::Lives,
        wireless: false,
    },
    ModeDescriptor {
        name: "Death Clicks",
        setup: &[Team],
        scoring: ScoringPolicy::LifeBased(LifeCounting::Up),
        clock: ClockPolicy::None,
        termination: Termination::ExitOnly,
        presentation: Presentation::Deaths,
        wireless: false,
    },
    ModeDescriptor {
        name: "Control",
        setup: &[Team, GameLength, CapLength, Checkpoint],
        scoring: ScoringPolicy::CaptureHold(ClaimRule::Budget),
        clock: ClockPolicy::Countdown,
        termination: Termination::BudgetOrClock,
        presentation: Presentation::Budget,
        wireless: false,
    },
    ModeDescriptor {
        name: "Crazy King",
        setup: &[BucketIndex, BucketCount, LoopCount, GameLength],
        scoring: ScoringPolicy::TimeWindowRotation(RotationGate::Windows),
        clock: ClockPolicy::Countdown,
        termination: Termination::ClockExpired,
        presentation: Presentation::Scoreboard,
        wireless: false,
    },
    ModeDescriptor {
        name: "Crazy King W",
        setup: &[TimerBoxCheck],
        scoring: ScoringPolicy::TimeWindowRotation(RotationGate::Hub),
        clock: ClockPolicy::OpenEnded,
        termination: Termination::PeerEnd,
        presentation: Presentation::Scoreboard,
        wireless: true,
    },
    ModeDescriptor {
        name: "Domination",
        setup: &[GameLength],
        scoring: ScoringPolicy::CaptureHold(ClaimRule::Latch),
        clock: ClockPolicy::Countdown,
        termination: Termination::ClockExpired,
        presentation: Presentation::Scoreboard,
        wireless: false,
    },
    ModeDescriptor {
        name: "Domination W",
        setup: &[TimerBoxCheck],
        scoring: ScoringPolicy::CaptureHold(ClaimRule::Latch),
        clock: ClockPolicy::OpenEnded,
        termination: Termination::PeerEnd,
        presentation: Presentation::Scoreboard,
        wireless: true,
    },
    ModeDescriptor {
        name: "KOTH W",
        setup: &[TimerBoxCheck],
        scoring: ScoringPolicy::CaptureHold(ClaimRule::Latch),
        clock: ClockPolicy::OpenEnded,
        termination: Termination::PeerEnd,
        presentation: Presentation::Scoreboard,
        wireless: true,
    },
    ModeDescriptor {
        name: "Lockout",
        setup: &[GameLength],
        scoring: ScoringPolicy::DualCountdown,
        clock: ClockPolicy::None,
        termination: Termination::EitherTimerZero,
        presentation: Presentation::Scoreboard,
        wireless: false,
    },
    ModeDescriptor {
        name: "Territory",
        setup: &[GameLength, LongPress],
        scoring: ScoringPolicy::CaptureHold(ClaimRule::Stepwise),
        clock: ClockPolicy::Countdown,
        termination: Termination::ClockExpired,
        presentation: Presentation::Territory,
        wireless: false,
    },
    ModeDescriptor {
        name: "Territory W",
        setup: &[LongPress, TimerBoxCheck],
        scoring: ScoringPolicy::CaptureHold(ClaimRule::Stepwise),
        clock: ClockPolicy::OpenEnded,
        termination: Termination::PeerEnd,
        presentation: Presentation::Territory,
        wireless: true,
    },
    ModeDescriptor {
        name: "HotPockets",
        setup: &[GameLength, LongPress],
        scoring: ScoringPolicy::CaptureHold(ClaimRule::Stepwise),
        clock: ClockPolicy::Warmup,
        termination: Termination::FirstCapture,
        presentation: Presentation::HotPockets,
        wireless: false,
    },
];

/// Number of menu entries
pub fn mode_count() -> usize {
    MODES.len()
}

/// Look up a mode by menu index
pub fn get(index: usize) -> Option<&'static ModeDescriptor> {
    MODES.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::{ReadyScreen, MAX_SETUP_STEPS};

    fn by_name(name: &str) -> &'static ModeDescriptor {
        MODES.iter().find(|m| m.name == name).unwrap()
    }

    #[test]
    fn test_names_fit_one_lcd_line() {
        for mode in MODES.iter() {
            assert!(mode.name.len() <= 16, "{}", mode.name);
            assert!(mode.setup.len() <= MAX_SETUP_STEPS);
        }
    }

    #[test]
    fn test_wireless_modes_use_the_timer_box() {
        for mode in MODES.iter() {
            assert_eq!(mode.wireless, mode.setup.contains(&TimerBoxCheck), "{}", mode.name);
            assert_eq!(mode.wireless, mode.name.ends_with('W'));
        }
    }

    #[test]
    fn test_team_based_modes() {
        let team_based: Vec<_> = MODES
            .iter()
            .filter(|m| m.is_team_based())
            .map(|m| m.name)
            .collect();
        assert_eq!(team_based, ["Attrition", "Death Clicks", "Control"]);
    }

    #[test]
    fn test_ready_screen_priority() {
        assert_eq!(by_name("Attrition").ready_screen(), ReadyScreen::Lives);
        assert_eq!(by_name("Death Clicks").ready_screen(), ReadyScreen::Team);
        assert_eq!(by_name("Control").ready_screen(), ReadyScreen::TeamTimer);
        assert_eq!(by_name("Crazy King").ready_screen(), ReadyScreen::Bucket);
        assert_eq!(by_name("Domination").ready_screen(), ReadyScreen::Timer);
        assert_eq!(by_name("Territory").ready_screen(), ReadyScreen::TimerLongPress);
        assert_eq!(by_name("Territory W").ready_screen(), ReadyScreen::TimerBox);
        assert_eq!(by_name("KOTH W").ready_screen(), ReadyScreen::TimerBox);
    }

    #[test]
    fn test_lookup_out_of_range() {
        assert!(get(mode_count()).is_none());
        assert_eq!(get(0).map(|m| m.name), Some("Attrition"));
    }
}

//! Setup screens: field adjustment and screen text
//!
//! Encoder movement is applied as `delta * step`, then wrapped or clamped per
//! field. Out-of-range values are never an error.

use core::fmt::Write;

use super::feedback::ScreenText;
use crate::modes::{ModeDescriptor, ReadyScreen, SetupStep};
use crate::state::{format_clock, MatchState, RestartChoice, BUCKET_IDS};

/// Largest lives count the counter screen offers
const MAX_LIVES: i64 = u16::MAX as i64;

fn clamp_add(value: u32, delta: i32, step: u32, min: u32) -> u32 {
    let next = value as i64 + delta as i64 * step as i64;
    next.clamp(min as i64, u32::MAX as i64) as u32
}

fn wrap_add(value: u8, delta: i32, modulus: u8) -> u8 {
    (value as i64 + delta as i64).rem_euclid(modulus as i64) as u8
}

/// Apply encoder movement to the field a setup step edits
pub fn adjust(state: &mut MatchState, step: SetupStep, delta: i32) {
    if delta == 0 {
        return;
    }
    let ids = BUCKET_IDS.len() as u8;

    match step {
        SetupStep::Lives => {
            let next = state.lives_count as i64 + delta as i64;
            state.lives_count = next.clamp(0, MAX_LIVES) as u16;
        }
        SetupStep::BucketIndex => state.bucket_index = wrap_add(state.bucket_index, delta, ids),
        SetupStep::BucketCount => state.bucket_count = wrap_add(state.bucket_count, delta, ids),
        SetupStep::LoopCount => state.loop_count = wrap_add(state.loop_count, delta, 3).max(1),
        SetupStep::GameLength => state.game_length_s = clamp_add(state.game_length_s, delta, 15, 0),
        SetupStep::CapLength => state.cap_length_s = clamp_add(state.cap_length_s, delta, 5, 0),
        SetupStep::Checkpoint => state.checkpoint_s = clamp_add(state.checkpoint_s, delta, 1, 0),
        SetupStep::LongPress => {
            state.long_press_ms = clamp_add(state.long_press_ms, delta, 1000, 1000)
        }
        SetupStep::Team | SetupStep::TimerBoxCheck => {}
    }
}

/// Scroll the mode menu
pub fn scroll_menu(index: u8, delta: i32, entries: usize) -> u8 {
    if entries == 0 {
        return 0;
    }
    (index as i64 + delta as i64).rem_euclid(entries as i64) as u8
}

/// Move the restart prompt selection
pub fn scroll_restart(choice: RestartChoice, delta: i32) -> RestartChoice {
    if delta.rem_euclid(2) == 1 {
        choice.toggled()
    } else {
        choice
    }
}

/// Prompt for a setup step
pub fn prompt(mode: &ModeDescriptor, step: SetupStep, state: &MatchState) -> ScreenText {
    let name = mode.name;
    let mut out = ScreenText::new();
    let _ = match step {
        SetupStep::Lives => write!(out, "{}\nLives: {}", name, state.lives_count),
        SetupStep::BucketIndex => write!(out, "{}\nBucket ID: {}", name, state.bucket_id()),
        SetupStep::BucketCount => write!(out, "{}\nBucket Count: {}", name, state.bucket_count),
        SetupStep::LoopCount => write!(out, "{}\nLoop Count: {}", name, state.loop_count),
        SetupStep::Team if state.team.is_side() => {
            write!(out, "{}\nTeam {}", name, state.team.name())
        }
        SetupStep::Team => write!(out, "{}\nTeam:", name),
        SetupStep::GameLength => {
            write!(out, "{}\nTime: {}", name, format_clock(state.game_length_s))
        }
        SetupStep::CapLength => {
            write!(out, "{}\nCap time: {}", name, format_clock(state.cap_length_s))
        }
        SetupStep::Checkpoint => write!(out, "{}\nCheckpoint: {}s", name, state.checkpoint_s),
        SetupStep::LongPress => {
            write!(out, "{}\nLong press: {}s", name, state.long_press_ms / 1000)
        }
        SetupStep::TimerBoxCheck => write!(out, "{}\nUses TimerBox", name),
    };
    out
}

/// Ready screen shown before the match starts
pub fn ready_text(mode: &ModeDescriptor, state: &MatchState) -> ScreenText {
    let name = mode.name;
    let game = format_clock(state.game_length_s);
    let mut out = ScreenText::new();
    let _ = match mode.ready_screen() {
        ReadyScreen::Lives => write!(out, "{} Ready\nTeam lives {}", name, state.lives_count),
        ReadyScreen::Bucket => write!(out, "{} Ready\n{} {}", name, game, state.bucket_id()),
        ReadyScreen::TeamTimer => write!(
            out,
            "{} Ready\n{} {} {}",
            name,
            state.team.name(),
            game,
            format_clock(state.cap_length_s)
        ),
        ReadyScreen::Team => write!(out, "{}\nReady Team {}", name, state.team.name()),
        ReadyScreen::TimerLongPress => {
            write!(out, "{}\nReady {} {}s", name, game, state.long_press_ms / 1000)
        }
        ReadyScreen::Timer => write!(out, "{}\nReady {}", name, game),
        ReadyScreen::TimerBox => write!(out, "{}\nReady w TimerBox", name),
    };
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::MODES;
    use crate::state::Team;
    use proptest::prelude::*;

    fn mode(name: &str) -> &'static ModeDescriptor {
        MODES.iter().find(|m| m.name == name).unwrap()
    }

    #[test]
    fn test_game_length_steps_by_fifteen() {
        let mut state = MatchState::new();
        adjust(&mut state, SetupStep::GameLength, 3);
        assert_eq!(state.game_length_s, 45);
        adjust(&mut state, SetupStep::GameLength, -10);
        assert_eq!(state.game_length_s, 0);
    }

    #[test]
    fn test_long_press_floor() {
        let mut state = MatchState::new();
        adjust(&mut state, SetupStep::LongPress, 2);
        assert_eq!(state.long_press_ms, 3000);
        adjust(&mut state, SetupStep::LongPress, -5);
        assert_eq!(state.long_press_ms, 1000);
    }

    #[test]
    fn test_bucket_id_wraps() {
        let mut state = MatchState::new();
        assert_eq!(state.bucket_id(), 'F');
        adjust(&mut state, SetupStep::BucketIndex, 1);
        assert_eq!(state.bucket_id(), 'A');
        adjust(&mut state, SetupStep::BucketIndex, -1);
        assert_eq!(state.bucket_id(), 'F');
    }

    #[test]
    fn test_loop_count_never_zero() {
        let mut state = MatchState::new();
        assert_eq!(state.loop_count, 2);
        adjust(&mut state, SetupStep::LoopCount, 1);
        assert_eq!(state.loop_count, 1);
        adjust(&mut state, SetupStep::LoopCount, 1);
        assert_eq!(state.loop_count, 2);
    }

    #[test]
    fn test_menu_and_restart_scroll() {
        assert_eq!(scroll_menu(0, -1, 12), 11);
        assert_eq!(scroll_menu(11, 1, 12), 0);
        assert_eq!(scroll_restart(RestartChoice::No, 1), RestartChoice::Yes);
        assert_eq!(scroll_restart(RestartChoice::No, -3), RestartChoice::Yes);
        assert_eq!(scroll_restart(RestartChoice::Yes, 2), RestartChoice::Yes);
    }

    #[test]
    fn test_prompts() {
        let mut state = MatchState::new();
        let control = mode("Control");
        assert_eq!(prompt(control, SetupStep::Team, &state).as_str(), "Control\nTeam:");
        state.team = Team::Blue;
        assert_eq!(prompt(control, SetupStep::Team, &state).as_str(), "Control\nTeam Blue");
        state.cap_length_s = 65;
        assert_eq!(
            prompt(control, SetupStep::CapLength, &state).as_str(),
            "Control\nCap time: 01:05"
        );
        assert_eq!(
            prompt(mode("KOTH W"), SetupStep::TimerBoxCheck, &state).as_str(),
            "KOTH W\nUses TimerBox"
        );
    }

    #[test]
    fn test_ready_texts() {
        let mut state = MatchState::new();
        state.game_length_s = 300;
        state.cap_length_s = 60;
        state.lives_count = 7;
        state.team = Team::Red;
        assert_eq!(
            ready_text(mode("Attrition"), &state).as_str(),
            "Attrition Ready\nTeam lives 7"
        );
        assert_eq!(
            ready_text(mode("Control"), &state).as_str(),
            "Control Ready\nRed 05:00 01:00"
        );
        assert_eq!(
            ready_text(mode("Crazy King"), &state).as_str(),
            "Crazy King Ready\n05:00 F"
        );
        assert_eq!(
            ready_text(mode("Territory"), &state).as_str(),
            "Territory\nReady 05:00 1s"
        );
        assert_eq!(
            ready_text(mode("Domination W"), &state).as_str(),
            "Domination W\nReady w TimerBox"
        );
    }

    fn step_strategy() -> impl Strategy<Value = SetupStep> {
        prop_oneof![
            Just(SetupStep::Lives),
            Just(SetupStep::BucketIndex),
            Just(SetupStep::BucketCount),
            Just(SetupStep::LoopCount),
            Just(SetupStep::GameLength),
            Just(SetupStep::CapLength),
            Just(SetupStep::Checkpoint),
            Just(SetupStep::LongPress),
        ]
    }

    proptest! {
        #[test]
        fn test_fields_stay_in_bounds(
            moves in proptest::collection::vec((step_strategy(), -20i32..20), 0..100)
        ) {
            let mut state = MatchState::new();
            for (step, delta) in moves {
                adjust(&mut state, step, delta);
                prop_assert!((state.bucket_index as usize) < BUCKET_IDS.len());
                prop_assert!((state.bucket_count as usize) < BUCKET_IDS.len());
                prop_assert!((1..3).contains(&state.loop_count));
                prop_assert!(state.long_press_ms >= 1000);
                prop_assert_eq!(state.long_press_ms % 1000, 0);
                prop_assert_eq!(state.game_length_s % 15, 0);
                prop_assert_eq!(state.cap_length_s % 5, 0);
            }
        }
    }
}

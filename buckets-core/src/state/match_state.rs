//! The live match record and its snapshot discipline
//!
//! Every field is a plain value, so a `MatchState` copy shares nothing with
//! its source. The live record is edited by the setup screens; a running
//! match owns a copy taken by `begin_match` and hands results back through
//! `commit_result`.

use core::fmt::Write;

use heapless::String;

use super::team::Team;

/// Letters used to name buckets on the field
pub const BUCKET_IDS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// `MM:SS` rendering of a duration
pub type ClockText = String<12>;

/// Format seconds as `MM:SS`
pub fn format_clock(seconds: u32) -> ClockText {
    let mut out = ClockText::new();
    let _ = write!(out, "{:02}:{:02}", seconds / 60, seconds % 60);
    out
}

/// Answer on the restart prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestartChoice {
    #[default]
    No,
    Yes,
}

impl RestartChoice {
    /// Prompt text
    pub const fn label(self) -> &'static str {
        match self {
            RestartChoice::No => "No",
            RestartChoice::Yes => "Yes",
        }
    }

    /// The other answer
    pub const fn toggled(self) -> Self {
        match self {
            RestartChoice::No => RestartChoice::Yes,
            RestartChoice::Yes => RestartChoice::No,
        }
    }
}

/// Match configuration and progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    /// Configured team, or current holder while a match runs
    pub team: Team,
    /// Lives left (Attrition) or deaths counted (Death Clicks)
    pub lives_count: u16,
    /// Red's score or remaining time, in seconds
    pub red_time: u32,
    /// Blue's score or remaining time, in seconds
    pub blue_time: u32,
    /// Match clock, counts down while running
    pub game_length_s: u32,
    /// Capture budget (Control)
    pub cap_length_s: u32,
    /// Capture budget rounding step (Control)
    pub checkpoint_s: u32,
    /// Hold time needed to take a point
    pub long_press_ms: u32,
    /// False while paused
    pub timer_running: bool,
    /// Whether the objective is currently held (or live, for rotation modes)
    pub capture_active: bool,
    /// This bucket's position in the rotation, index into `BUCKET_IDS`
    pub bucket_index: u8,
    /// Buckets in the rotation
    pub bucket_count: u8,
    /// Passes through the rotation per match
    pub loop_count: u8,
    /// Highlighted entry on the mode menu
    pub menu_index: u8,
    /// Highlighted answer on the restart prompt
    pub restart_choice: RestartChoice,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// Power-on values
    pub const fn new() -> Self {
        Self {
            team: Team::Green,
            lives_count: 0,
            red_time: 0,
            blue_time: 0,
            game_length_s: 0,
            cap_length_s: 0,
            checkpoint_s: 1,
            long_press_ms: 1000,
            timer_running: true,
            capture_active: false,
            bucket_index: 5,
            bucket_count: 3,
            loop_count: 2,
            menu_index: 0,
            restart_choice: RestartChoice::No,
        }
    }

    /// Working copy for one match
    ///
    /// The copy is independent: edits to either side never show up in the
    /// other.
    pub fn begin_match(&self) -> MatchState {
        *self
    }

    /// Bring a finished match's team and scores back into the live record
    pub fn commit_result(&mut self, run: &MatchState) {
        self.team = run.team;
        self.red_time = run.red_time;
        self.blue_time = run.blue_time;
    }

    /// Forget everything chosen since power-on
    pub fn reset_to_defaults(&mut self) {
        *self = Self::new();
    }

    /// Letter naming this bucket
    pub fn bucket_id(&self) -> char {
        BUCKET_IDS[self.bucket_index as usize % BUCKET_IDS.len()]
    }

    /// Length of one bucket's turn in the rotation, in seconds
    ///
    /// Zero when the rotation has no slots.
    pub fn rotation_interval(&self) -> u32 {
        let slots = self.bucket_count as u32 * self.loop_count as u32;
        if slots == 0 {
            return 0;
        }
        self.game_length_s / slots
    }

    /// Whether a countdown value falls in one of this bucket's turns
    ///
    /// The upper window is this bucket's slot counted from the top of the
    /// whole match, the lower one its slot in the final pass. Each window
    /// covers `(stop, start]`. Both are derived from this record's
    /// `game_length_s`, so call it on the configured values and pass the
    /// running countdown.
    pub fn in_rotation_window(&self, countdown: u32) -> bool {
        let interval = self.rotation_interval() as i64;
        let id = self.bucket_index as i64;
        let count = self.bucket_count as i64;
        let slots = count * self.loop_count as i64;
        let value = countdown as i64;

        let within = |start: i64, stop: i64| stop < value && value <= start;

        within(interval * (slots - id), interval * (slots - id - 1))
            || within(interval * (count - id), interval * (count - id - 1))
    }

    /// Round the capture budget up to the next checkpoint multiple
    pub fn round_cap_to_checkpoint(&mut self) {
        if self.checkpoint_s == 0 || self.cap_length_s == 0 {
            return;
        }
        let step = self.checkpoint_s;
        self.cap_length_s = (self.cap_length_s - 1) / step * step + step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn team_strategy() -> impl Strategy<Value = Team> {
        prop_oneof![
            Just(Team::Red),
            Just(Team::Blue),
            Just(Team::Green),
            Just(Team::Purple)
        ]
    }

    prop_compose! {
        fn state_strategy()(
            team in team_strategy(),
            lives_count in 0u16..50,
            times in (0u32..3600, 0u32..3600, 0u32..3600, 0u32..600, 0u32..60),
            long_press_ms in 1000u32..10_000,
            flags in (any::<bool>(), any::<bool>()),
            rotation in (0u8..6, 0u8..6, 1u8..3, 0u8..12),
        ) -> MatchState {
            MatchState {
                team,
                lives_count,
                red_time: times.0,
                blue_time: times.1,
                game_length_s: times.2,
                cap_length_s: times.3,
                checkpoint_s: times.4,
                long_press_ms,
                timer_running: flags.0,
                capture_active: flags.1,
                bucket_index: rotation.0,
                bucket_count: rotation.1,
                loop_count: rotation.2,
                menu_index: rotation.3,
                restart_choice: RestartChoice::No,
            }
        }
    }

    #[derive(Debug, Clone, Copy)]
    enum Edit {
        Team(Team),
        Lives(u16),
        RedTime(u32),
        GameLength(u32),
        Running(bool),
        Capture(bool),
        BucketIndex(u8),
    }

    fn edit_strategy() -> impl Strategy<Value = Edit> {
        prop_oneof![
            team_strategy().prop_map(Edit::Team),
            (0u16..99).prop_map(Edit::Lives),
            (0u32..999).prop_map(Edit::RedTime),
            (0u32..999).prop_map(Edit::GameLength),
            any::<bool>().prop_map(Edit::Running),
            any::<bool>().prop_map(Edit::Capture),
            (0u8..6).prop_map(Edit::BucketIndex),
        ]
    }

    fn apply(state: &mut MatchState, edit: Edit) {
        match edit {
            Edit::Team(t) => state.team = t,
            Edit::Lives(n) => state.lives_count = n,
            Edit::RedTime(n) => state.red_time = n,
            Edit::GameLength(n) => state.game_length_s = n,
            Edit::Running(b) => state.timer_running = b,
            Edit::Capture(b) => state.capture_active = b,
            Edit::BucketIndex(i) => state.bucket_index = i,
        }
    }

    #[test]
    fn test_defaults() {
        let state = MatchState::new();
        assert_eq!(state.team, Team::Green);
        assert_eq!(state.bucket_id(), 'F');
        assert_eq!(state.bucket_count, 3);
        assert_eq!(state.loop_count, 2);
        assert_eq!(state.checkpoint_s, 1);
        assert_eq!(state.long_press_ms, 1000);
        assert!(state.timer_running);
        assert!(!state.capture_active);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0).as_str(), "00:00");
        assert_eq!(format_clock(75).as_str(), "01:15");
        assert_eq!(format_clock(6000).as_str(), "100:00");
    }

    #[test]
    fn test_commit_merges_team_and_scores_only() {
        let mut live = MatchState::new();
        live.lives_count = 10;
        let mut run = live.begin_match();
        run.team = Team::Purple;
        run.red_time = 30;
        run.blue_time = 30;
        run.lives_count = 0;
        run.game_length_s = 0;

        live.commit_result(&run);
        assert_eq!(live.team, Team::Purple);
        assert_eq!(live.red_time, 30);
        assert_eq!(live.blue_time, 30);
        assert_eq!(live.lives_count, 10);
    }

    #[test]
    fn test_rotation_windows() {
        // 3 buckets, 2 loops, 60s: 10s per slot
        let mut state = MatchState::new();
        state.game_length_s = 60;
        state.bucket_count = 3;
        state.loop_count = 2;
        state.bucket_index = 0;
        assert_eq!(state.rotation_interval(), 10);

        // Bucket A owns (50, 60] and (20, 30]
        assert!(state.in_rotation_window(60));
        assert!(state.in_rotation_window(51));
        assert!(!state.in_rotation_window(50));
        assert!(state.in_rotation_window(30));
        assert!(state.in_rotation_window(21));
        assert!(!state.in_rotation_window(20));
        assert!(!state.in_rotation_window(0));

        // Bucket C owns (30, 40] and (0, 10]
        state.bucket_index = 2;
        assert!(state.in_rotation_window(35));
        assert!(state.in_rotation_window(1));
        assert!(!state.in_rotation_window(0));
        assert!(!state.in_rotation_window(45));
    }

    #[test]
    fn test_rotation_without_slots_never_opens() {
        let mut state = MatchState::new();
        state.game_length_s = 60;
        state.bucket_count = 0;
        assert_eq!(state.rotation_interval(), 0);
        for t in 0..=60 {
            assert!(!state.in_rotation_window(t));
        }
    }

    #[test]
    fn test_round_cap_to_checkpoint() {
        let mut state = MatchState::new();
        state.checkpoint_s = 10;
        state.cap_length_s = 41;
        state.round_cap_to_checkpoint();
        assert_eq!(state.cap_length_s, 50);

        state.cap_length_s = 40;
        state.round_cap_to_checkpoint();
        assert_eq!(state.cap_length_s, 40);

        state.cap_length_s = 0;
        state.round_cap_to_checkpoint();
        assert_eq!(state.cap_length_s, 0);

        state.checkpoint_s = 0;
        state.cap_length_s = 7;
        state.round_cap_to_checkpoint();
        assert_eq!(state.cap_length_s, 7);
    }

    proptest! {
        #[test]
        fn test_begin_then_reset_matches_fresh(state in state_strategy()) {
            let mut live = state;
            let _run = live.begin_match();
            live.reset_to_defaults();
            prop_assert_eq!(live, MatchState::new());
        }

        #[test]
        fn test_snapshot_isolation(
            base in state_strategy(),
            run_edits in proptest::collection::vec(edit_strategy(), 0..16),
            live_edits in proptest::collection::vec(edit_strategy(), 0..16),
        ) {
            let mut live = base;
            let mut run = live.begin_match();

            let mut expected_live = base;
            let mut expected_run = base;
            for (i, edit) in run_edits.iter().enumerate() {
                apply(&mut run, *edit);
                apply(&mut expected_run, *edit);
                if let Some(live_edit) = live_edits.get(i) {
                    apply(&mut live, *live_edit);
                    apply(&mut expected_live, *live_edit);
                }
            }
            for edit in live_edits.iter().skip(run_edits.len()) {
                apply(&mut live, *edit);
                apply(&mut expected_live, *edit);
            }

            prop_assert_eq!(live, expected_live);
            prop_assert_eq!(run, expected_run);
        }

        #[test]
        fn test_rounded_cap_is_checkpoint_multiple(cap in 1u32..1000, step in 1u32..60) {
            let mut state = MatchState::new();
            state.cap_length_s = cap;
            state.checkpoint_s = step;
            state.round_cap_to_checkpoint();
            prop_assert_eq!(state.cap_length_s % step, 0);
            prop_assert!(state.cap_length_s >= cap);
            prop_assert!(state.cap_length_s < cap + step);
        }
    }
}

//! Data-driven match execution
//!
//! A [`Game`] runs one match of any mode. It owns the working copy of the
//! match state taken at match start and interprets the mode descriptor's
//! policies against it, one scheduler turn at a time.
//!
//! Order of work within a step:
//! 1. local exit (confirm long press)
//! 2. pause: local double press, then peer `Pause`/`Resume` as explicit sets
//! 3. peer `End` and hub `Active`/`Inactive`
//! 4. nothing else while paused
//! 5. button scoring for the mode's policy
//! 6. whole-second tick: clock, accrual, screen refresh
//! 7. end condition

use core::cmp::Ordering;

use buckets_protocol::PeerToken;

use super::clock::SecondClock;
use super::feedback::Feedback;
use super::hold::{HoldOutcome, HoldTracker};
use crate::input::InputSnapshot;
use crate::modes::{
    ClaimRule, ClockPolicy, LifeCounting, ModeDescriptor, Presentation, RotationGate,
    ScoringPolicy, Termination,
};
use crate::rgb::{Color, Pattern, RgbSettings};
use crate::state::{format_clock, MatchState, Side, Team};

/// Animation step used when possession changes
const CLAIM_DELAY_MS: u16 = 3;

/// Blink cadence while a stepwise hold is in progress
const CONTEST_BLINK_MS: u16 = 250;

/// Blink cadence of the HotPockets warm-up
const WARMUP_BLINK_MS: u16 = 500;

/// Why a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndReason {
    /// Confirm button long press
    Exit,
    LivesExhausted,
    ClockExpired,
    /// Control capture budget ran out while capturing
    BudgetSpent,
    /// A Lockout clock reached zero
    TimerZero,
    /// HotPockets hill taken
    Captured,
    /// Hub sent `End`
    PeerEnd,
}

/// One match in progress
#[derive(Debug, Clone)]
pub struct Game {
    mode: &'static ModeDescriptor,
    run: MatchState,
    /// Values as configured at match start, never ticked
    snapshot: MatchState,
    clock: SecondClock,
    holds: HoldTracker,
    warming_up: bool,
}

impl Game {
    /// Prepare a match from a snapshot of the live state
    pub fn new(mode: &'static ModeDescriptor, snapshot: MatchState, now_ms: u32) -> Self {
        let mut run = snapshot;
        run.red_time = 0;
        run.blue_time = 0;
        run.timer_running = true;
        run.capture_active = false;
        if mode.scoring == ScoringPolicy::DualCountdown {
            run.red_time = run.game_length_s;
            run.blue_time = run.game_length_s;
        }
        if !mode.is_team_based() {
            run.team = Team::Green;
        }

        Self {
            mode,
            run,
            snapshot,
            clock: SecondClock::new(now_ms),
            holds: HoldTracker::new(),
            warming_up: mode.clock == ClockPolicy::Warmup,
        }
    }

    /// The match's working copy
    pub fn state(&self) -> &MatchState {
        &self.run
    }

    /// First screen and colours
    pub fn start(&mut self, now_ms: u32, fb: &mut Feedback) {
        info!("match start: {}", self.mode.name);
        self.clock.restart(now_ms);

        match self.mode.presentation {
            Presentation::Lives | Presentation::Deaths => {
                fb.light(RgbSettings::team(self.run.team));
            }
            Presentation::Budget => fb.light(RgbSettings::fill(Color::Green)),
            Presentation::HotPockets => fb.light(
                RgbSettings::fill(Color::Green)
                    .with_color2(Color::Purple)
                    .with_pattern(Pattern::SolidBlink)
                    .with_delay(WARMUP_BLINK_MS)
                    .forever(),
            ),
            Presentation::Scoreboard | Presentation::Territory => {
                self.set_holder(Team::Green, fb);
            }
        }
        self.refresh(fb);
    }

    /// Advance the match by one scheduler turn
    pub fn step(
        &mut self,
        input: &InputSnapshot,
        tokens: &[PeerToken],
        now_ms: u32,
        fb: &mut Feedback,
    ) -> Option<EndReason> {
        if input.confirm.long_press {
            return Some(EndReason::Exit);
        }

        let tokens: &[PeerToken] = if self.mode.wireless { tokens } else { &[] };

        let mut running = self.run.timer_running;
        if input.confirm.clicks > 1 {
            running = !running;
        }
        for token in tokens {
            match token {
                PeerToken::Pause => running = false,
                PeerToken::Resume => running = true,
                _ => {}
            }
        }
        self.set_running(running, now_ms, fb);

        let hub = self.mode.scoring == ScoringPolicy::TimeWindowRotation(RotationGate::Hub);
        for token in tokens {
            match token {
                PeerToken::End => return Some(EndReason::PeerEnd),
                PeerToken::Active if hub => self.open_point(fb),
                PeerToken::Inactive if hub => self.close_point(fb),
                _ => {}
            }
        }

        if !self.run.timer_running {
            return None;
        }

        if self.warming_up {
            if self.clock.tick(now_ms) {
                self.run.game_length_s = self.run.game_length_s.saturating_sub(1);
                self.refresh(fb);
            }
            if self.run.game_length_s == 0 {
                self.open_hill(now_ms, fb);
            }
            return None;
        }

        match self.mode.scoring {
            ScoringPolicy::LifeBased(counting) => self.score_lives(counting, input, fb),
            ScoringPolicy::CaptureHold(ClaimRule::Budget) => self.score_budget(input, now_ms, fb),
            ScoringPolicy::CaptureHold(ClaimRule::Stepwise) => {
                if self.score_stepwise(input, now_ms, fb) {
                    return Some(EndReason::Captured);
                }
            }
            ScoringPolicy::CaptureHold(ClaimRule::Latch) | ScoringPolicy::DualCountdown => {
                if let Some(team) = self.score_latch(input, now_ms) {
                    self.set_holder(team, fb);
                }
            }
            ScoringPolicy::TimeWindowRotation(gate) => self.score_rotation(gate, input, now_ms, fb),
        }

        if self.clock.tick(now_ms) {
            self.on_second();
            self.refresh(fb);
        }

        self.end_condition()
    }

    /// Result screen and colours
    pub fn finish(&mut self, reason: EndReason, fb: &mut Feedback) {
        info!("match over: {} ({})", self.mode.name, reason);
        let team = self.run.team;

        match self.mode.presentation {
            Presentation::Lives | Presentation::Deaths => {
                self.refresh(fb);
                fb.light(result_cycle(team.color(), Color::Green));
            }
            Presentation::Budget => {
                if self.run.cap_length_s == 0 {
                    fb.show(format_args!(
                        "{} {}\nPoint Locked",
                        self.mode.name,
                        format_clock(self.run.cap_length_s)
                    ));
                    fb.light(result_cycle(team.color(), Color::Off));
                } else {
                    self.refresh(fb);
                    fb.light(RgbSettings::fill(Color::Green));
                }
            }
            Presentation::Scoreboard => {
                let winner = self.winner();
                self.run.team = winner;
                self.refresh(fb);
                fb.team(winner, result_cycle(winner.color(), Color::Green));
            }
            Presentation::Territory => {
                fb.show(format_args!("{} Team\nPoint Locked", team.name()));
                fb.light(result_cycle(team.color(), Color::Off));
            }
            Presentation::HotPockets => {
                fb.show(format_args!("{} Team\nCAPTURED", team.name()));
                fb.light(result_cycle(Color::Green, team.color()));
            }
        }
    }

    /// Winner by strict comparison of the two clocks
    ///
    /// In Lockout the side with less time left wins. Equal clocks are a tie.
    pub fn winner(&self) -> Team {
        let (red, blue) = (self.run.red_time, self.run.blue_time);
        let order = match self.mode.scoring {
            ScoringPolicy::DualCountdown => blue.cmp(&red),
            _ => red.cmp(&blue),
        };
        match order {
            Ordering::Greater => Team::Red,
            Ordering::Less => Team::Blue,
            Ordering::Equal => Team::Purple,
        }
    }

    fn set_running(&mut self, running: bool, now_ms: u32, fb: &mut Feedback) {
        if running == self.run.timer_running {
            return;
        }
        self.run.timer_running = running;
        self.holds.clear();

        if running {
            info!("match resumed");
            self.clock.restart(now_ms);
            let color = match self.mode.scoring {
                ScoringPolicy::TimeWindowRotation(_) if !self.run.capture_active => Color::Green,
                _ => self.run.team.color(),
            };
            fb.light(RgbSettings::fill(color).with_delay(CLAIM_DELAY_MS));
        } else {
            info!("match paused");
            fb.light(RgbSettings::fill(Color::Yellow).with_delay(CLAIM_DELAY_MS));
        }
    }

    fn set_holder(&mut self, team: Team, fb: &mut Feedback) {
        if team != self.run.team {
            debug!("possession: {}", team);
        }
        self.run.team = team;
        fb.team(team, RgbSettings::team(team).with_delay(CLAIM_DELAY_MS));
    }

    fn open_point(&mut self, fb: &mut Feedback) {
        self.run.capture_active = true;
        self.set_holder(Team::Green, fb);
    }

    fn close_point(&mut self, fb: &mut Feedback) {
        self.run.capture_active = false;
        self.set_holder(Team::Green, fb);
    }

    fn open_hill(&mut self, now_ms: u32, fb: &mut Feedback) {
        debug!("warm-up over");
        self.warming_up = false;
        self.holds.clear();
        self.clock.restart(now_ms);
        self.set_holder(Team::Green, fb);
        self.refresh(fb);
    }

    fn score_lives(&mut self, counting: LifeCounting, input: &InputSnapshot, fb: &mut Feedback) {
        let before = self.run.lives_count;
        let clicks = input.team_clicks();
        if clicks > 0 {
            self.run.lives_count = match counting {
                LifeCounting::Down => self.run.lives_count.saturating_sub(clicks),
                LifeCounting::Up => self.run.lives_count.saturating_add(clicks),
            };
            fb.light(
                RgbSettings::fill(Color::Green)
                    .with_color2(self.run.team.color())
                    .with_pattern(Pattern::FillCycle)
                    .with_delay(1),
            );
        }
        if input.red.long_press || input.blue.long_press {
            // A long press takes back one press
            self.run.lives_count = match counting {
                LifeCounting::Down => self
                    .run
                    .lives_count
                    .saturating_add(1)
                    .min(self.snapshot.lives_count),
                LifeCounting::Up => self.run.lives_count.saturating_sub(1),
            };
        }
        if self.run.lives_count != before {
            self.refresh(fb);
        }
    }

    fn score_budget(&mut self, input: &InputSnapshot, now_ms: u32, fb: &mut Feedback) {
        let released = input.red.just_released || input.blue.just_released;
        let pressed = input.red.just_pressed || input.blue.just_pressed;
        let dual = self.holds.update(input, now_ms, self.run.long_press_ms, false)
            == Some(HoldOutcome::Neutral);

        if (released || dual) && self.run.capture_active {
            self.run.capture_active = false;
            self.run.round_cap_to_checkpoint();
            fb.light(RgbSettings::fill(Color::Green).with_delay(1));
            self.refresh(fb);
        }
        if pressed && !dual {
            self.run.capture_active = true;
            fb.light(RgbSettings::team(self.run.team).with_delay(1));
        }
    }

    fn score_latch(&mut self, input: &InputSnapshot, now_ms: u32) -> Option<Team> {
        match self.holds.update(input, now_ms, self.run.long_press_ms, false)? {
            HoldOutcome::Claim(side) => Some(side.team()),
            HoldOutcome::Neutral => Some(Team::Green),
        }
    }

    /// Returns true when a claim completed
    fn score_stepwise(&mut self, input: &InputSnapshot, now_ms: u32, fb: &mut Feedback) -> bool {
        for side in Side::BOTH {
            if input.side(side).just_pressed {
                fb.light(contest_blink(side, self.run.team));
            }
        }
        if input.red.just_released || input.blue.just_released {
            fb.light(RgbSettings::team(self.run.team));
        }

        match self.holds.update(input, now_ms, self.run.long_press_ms, true) {
            Some(HoldOutcome::Claim(side)) => {
                let next = match self.run.team {
                    Team::Green => side.team(),
                    held if held == side.other().team() => Team::Green,
                    held => held,
                };
                self.set_holder(next, fb);
                fb.light(contest_blink(side, next));
                self.refresh(fb);
                self.mode.termination == Termination::FirstCapture
            }
            Some(HoldOutcome::Neutral) => {
                self.set_holder(Team::Green, fb);
                self.refresh(fb);
                false
            }
            None => false,
        }
    }

    fn score_rotation(
        &mut self,
        gate: RotationGate,
        input: &InputSnapshot,
        now_ms: u32,
        fb: &mut Feedback,
    ) {
        if gate == RotationGate::Windows {
            let live = self.snapshot.in_rotation_window(self.run.game_length_s);
            if live && !self.run.capture_active {
                self.open_point(fb);
            } else if !live && self.run.capture_active {
                self.close_point(fb);
            }
        }

        let dual = self.holds.update(input, now_ms, self.run.long_press_ms, false)
            == Some(HoldOutcome::Neutral);
        if !self.run.capture_active {
            return;
        }
        if input.red.just_pressed && self.run.team != Team::Red {
            self.set_holder(Team::Red, fb);
        } else if input.blue.just_pressed && self.run.team != Team::Blue {
            self.set_holder(Team::Blue, fb);
        }
        if dual {
            self.set_holder(Team::Green, fb);
        }
    }

    fn on_second(&mut self) {
        if self.mode.clock == ClockPolicy::Countdown {
            self.run.game_length_s = self.run.game_length_s.saturating_sub(1);
        }

        let holder = match self.run.team {
            Team::Red => Some(&mut self.run.red_time),
            Team::Blue => Some(&mut self.run.blue_time),
            _ => None,
        };

        match self.mode.scoring {
            ScoringPolicy::CaptureHold(ClaimRule::Latch) => {
                if let Some(time) = holder {
                    *time += 1;
                }
            }
            ScoringPolicy::TimeWindowRotation(_) => {
                if let (true, Some(time)) = (self.run.capture_active, holder) {
                    *time += 1;
                }
            }
            ScoringPolicy::DualCountdown => {
                if let Some(time) = holder {
                    *time = time.saturating_sub(1);
                }
            }
            ScoringPolicy::CaptureHold(ClaimRule::Budget) => {
                if self.run.capture_active {
                    self.run.cap_length_s = self.run.cap_length_s.saturating_sub(1);
                }
            }
            ScoringPolicy::CaptureHold(ClaimRule::Stepwise) | ScoringPolicy::LifeBased(_) => {}
        }
    }

    fn end_condition(&self) -> Option<EndReason> {
        let run = &self.run;
        match self.mode.termination {
            Termination::LivesExhausted if run.lives_count == 0 => Some(EndReason::LivesExhausted),
            Termination::BudgetOrClock if run.capture_active && run.cap_length_s == 0 => {
                Some(EndReason::BudgetSpent)
            }
            Termination::BudgetOrClock if !run.capture_active && run.game_length_s == 0 => {
                Some(EndReason::ClockExpired)
            }
            Termination::ClockExpired if run.game_length_s == 0 => Some(EndReason::ClockExpired),
            Termination::EitherTimerZero if run.red_time == 0 || run.blue_time == 0 => {
                Some(EndReason::TimerZero)
            }
            _ => None,
        }
    }

    /// Running screen
    fn refresh(&self, fb: &mut Feedback) {
        let run = &self.run;
        let team = run.team.name();
        match self.mode.presentation {
            Presentation::Lives => fb.show(format_args!("{} Lives Left\n{}", team, run.lives_count)),
            Presentation::Deaths => fb.show(format_args!("{} team\nDeaths {}", team, run.lives_count)),
            Presentation::Budget => fb.show(format_args!(
                "{} {}\n{} {}",
                self.mode.name,
                format_clock(run.game_length_s),
                team,
                format_clock(run.cap_length_s)
            )),
            Presentation::Scoreboard => fb.show(format_args!(
                "RED:  {}\nBLUE: {}",
                format_clock(run.red_time),
                format_clock(run.blue_time)
            )),
            Presentation::Territory => {
                fb.show(format_args!("{} Team\n{}", team, format_clock(run.game_length_s)))
            }
            Presentation::HotPockets if self.warming_up => {
                fb.show(format_args!("Countdown\n{}", format_clock(run.game_length_s)))
            }
            Presentation::HotPockets => fb.show(format_args!("HotPockets\nHill neutral")),
        }
    }
}

fn result_cycle(first: Color, second: Color) -> RgbSettings {
    RgbSettings::fill(first)
        .with_color2(second)
        .with_pattern(Pattern::FillCycle)
        .with_delay(CLAIM_DELAY_MS)
        .forever()
}

fn contest_blink(side: Side, holder: Team) -> RgbSettings {
    RgbSettings::fill(side.team().color())
        .with_color2(holder.color())
        .with_pattern(Pattern::SolidBlink)
        .with_delay(CONTEST_BLINK_MS)
        .forever()
}

//! Device flow: menu, setup, standby, match, result, restart
//!
//! [`MatchFlow`] is the match-flow task. It walks the [`Phase`] machine and
//! runs each phase's screen as a small non-blocking loop. Every wait is a
//! deadline checked on later turns; while one is pending the flow only
//! drains input, so a press made during a screen change is never carried
//! into the next screen.

use heapless::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use buckets_protocol::{PeerFilter, PeerToken};

use super::feedback::Feedback;
use super::game::{EndReason, Game};
use super::setup;
use crate::input::InputSnapshot;
use crate::modes::{self, ModeDescriptor};
use crate::rgb::{Color, Pattern, RgbSettings};
use crate::runtime::{Context, Task};
use crate::state::{Event, Phase, RestartChoice, Team};
use crate::traits::{PeerLink, TextDisplay};

/// Peer payloads read per turn at most
const PEER_READS_PER_TURN: usize = 4;

/// Pause after acknowledging a result
const ACK_PAUSE_MS: u32 = 100;

/// Menu splash lines
const SPLASH: [&str; 12] = [
    "Buckets up",
    "Hold the line",
    "Mind the \nbucket",
    "Stay hydrated",
    "Check your \nbatteries",
    "No bucket left \nbehind",
    "Respawn is \na state of mind",
    "Point is \nneutral",
    "Bring a spare \nbucket",
    "Sponsored by \nbuckets",
    "Red or blue?",
    "Green means go",
];

/// Where the flow is within the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Stage {
    /// Phase just entered
    Enter,
    /// Menu colour sweep, one team colour at a time
    Sweep { color: usize, started: bool },
    /// Screen is up, waiting for its inputs
    Prompt,
    /// Taking inputs
    Active,
    /// Leaving once the pending wait is over
    Closing,
}

#[derive(Debug, Clone, Copy)]
struct Wait {
    since_ms: u32,
    ms: u32,
}

impl Wait {
    fn over(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.since_ms) >= self.ms
    }
}

/// The match-flow task
pub struct MatchFlow {
    phase: Phase,
    stage: Stage,
    wait: Option<Wait>,
    mode: Option<&'static ModeDescriptor>,
    setup_index: usize,
    game: Option<Game>,
    pending_end: Option<EndReason>,
    filter: PeerFilter,
    rng: SmallRng,
}

impl MatchFlow {
    /// `seed` picks the splash lines
    pub fn new(seed: u64) -> Self {
        Self {
            phase: Phase::Boot,
            stage: Stage::Enter,
            wait: None,
            mode: None,
            setup_index: 0,
            game: None,
            pending_end: None,
            filter: PeerFilter::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Match in progress or just finished
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    fn go(&mut self, event: Event) {
        let next = self.phase.transition(event);
        debug!("{} -> {}", self.phase, next);
        self.phase = next;
        self.stage = Stage::Enter;
    }

    fn wait(&mut self, now_ms: u32, ms: u32) {
        self.wait = Some(Wait { since_ms: now_ms, ms });
    }

    /// Read up to a turn's worth of tokens, stopping early after `stop_after`
    ///
    /// Payloads behind the stop token stay queued on the link for the next
    /// reader.
    fn peer_tokens<P: PeerLink>(
        &mut self,
        peer: &mut P,
        stop_after: Option<PeerToken>,
    ) -> Vec<PeerToken, PEER_READS_PER_TURN> {
        let mut tokens = Vec::new();
        for _ in 0..PEER_READS_PER_TURN {
            let Some(payload) = peer.try_recv() else {
                break;
            };
            if let Some(token) = self.filter.accept(&payload) {
                debug!("peer token: {}", token);
                let _ = tokens.push(token);
                if Some(token) == stop_after {
                    break;
                }
            }
        }
        tokens
    }

    fn menu<D, P>(
        &mut self,
        ctx: &mut Context<D, P>,
        input: &InputSnapshot,
        now_ms: u32,
        fb: &mut Feedback,
    ) {
        let settle = ctx.config.timing.settle_ms;
        match self.stage {
            Stage::Enter => {
                let quip = SPLASH[self.rng.random_range(0..SPLASH.len())];
                fb.show(format_args!("{}", quip));
                fb.light(RgbSettings::solid(Color::Green));
                self.wait(now_ms, settle);
                self.stage = Stage::Sweep { color: 0, started: false };
            }
            Stage::Sweep { color, started } => {
                const SWEEP: [Team; 3] = [Team::Red, Team::Blue, Team::Green];
                if !started {
                    let team = SWEEP[color];
                    ctx.live.team = team;
                    fb.team(team, RgbSettings::team(team).holding());
                    self.stage = Stage::Sweep { color, started: true };
                } else if !ctx.rgb.holding() {
                    self.stage = match color + 1 {
                        next if next < SWEEP.len() => Stage::Sweep { color: next, started: false },
                        _ => Stage::Prompt,
                    };
                }
            }
            Stage::Prompt | Stage::Closing => {
                self.show_menu_entry(ctx.live.menu_index, fb);
                self.stage = Stage::Active;
            }
            Stage::Active => {
                if input.encoder != 0 {
                    ctx.live.menu_index =
                        setup::scroll_menu(ctx.live.menu_index, input.encoder, modes::mode_count());
                    self.show_menu_entry(ctx.live.menu_index, fb);
                }
                if input.confirm.clicks == 0 {
                    return;
                }
                match modes::get(ctx.live.menu_index as usize) {
                    Some(mode) => {
                        info!("mode selected: {}", mode.name);
                        fb.show(format_args!("Running:\n{}", mode.name));
                        self.mode = Some(mode);
                        self.go(Event::ModeChosen);
                    }
                    None => {
                        warn!("no mode at menu index {}", ctx.live.menu_index);
                        self.go(Event::ModeUnavailable);
                        self.stage = Stage::Prompt;
                    }
                }
            }
        }
    }

    fn show_menu_entry(&self, index: u8, fb: &mut Feedback) {
        let name = modes::get(index as usize).map_or("?", |m| m.name);
        fb.show(format_args!("Select a game:\n{}", name));
    }

    fn setup<D, P>(
        &mut self,
        ctx: &mut Context<D, P>,
        mode: &'static ModeDescriptor,
        input: &InputSnapshot,
        now_ms: u32,
        fb: &mut Feedback,
    ) {
        if self.stage == Stage::Enter {
            self.setup_index = 0;
            self.stage = Stage::Active;
            self.open_step(ctx, mode, now_ms, fb);
            return;
        }

        let Some(&step) = mode.setup.get(self.setup_index) else {
            self.go(Event::SetupComplete);
            return;
        };

        if step == modes::SetupStep::Team {
            // Team is taken when the button comes back up
            let picked = if input.red.just_released {
                Some(Team::Red)
            } else if input.blue.just_released {
                Some(Team::Blue)
            } else {
                None
            };
            if let Some(team) = picked {
                ctx.live.team = team;
                fb.team(team, RgbSettings::team(team).with_delay(3));
                fb.screen = Some(setup::prompt(mode, step, &ctx.live));
            }
        }

        if input.encoder != 0 {
            setup::adjust(&mut ctx.live, step, input.encoder);
            fb.screen = Some(setup::prompt(mode, step, &ctx.live));
        }

        if input.confirm.clicks > 0 {
            self.setup_index += 1;
            self.open_step(ctx, mode, now_ms, fb);
        }
    }

    fn open_step<D, P>(
        &mut self,
        ctx: &mut Context<D, P>,
        mode: &'static ModeDescriptor,
        now_ms: u32,
        fb: &mut Feedback,
    ) {
        match mode.setup.get(self.setup_index) {
            Some(&step) => {
                fb.screen = Some(setup::prompt(mode, step, &ctx.live));
                if step.opens_group() {
                    self.wait(now_ms, ctx.config.timing.settle_ms);
                }
            }
            None => self.go(Event::SetupComplete),
        }
    }

    fn standby<D, P>(
        &mut self,
        ctx: &mut Context<D, P>,
        mode: &'static ModeDescriptor,
        input: &InputSnapshot,
        now_ms: u32,
        fb: &mut Feedback,
    ) {
        let settle = ctx.config.timing.settle_ms;
        match self.stage {
            Stage::Enter => {
                self.wait(now_ms, settle);
                self.stage = Stage::Prompt;
            }
            Stage::Prompt => {
                fb.screen = Some(setup::ready_text(mode, &ctx.live));
                fb.light(RgbSettings::default());
                self.wait(now_ms, settle);
                self.stage = Stage::Active;
            }
            _ => {
                if input.confirm.clicks == 0 {
                    return;
                }
                fb.show(format_args!("{}\nStarting...", mode.name));
                self.filter.reset();
                if mode.wireless {
                    self.go(Event::AwaitPeer);
                } else {
                    self.go(Event::StartLocal);
                }
            }
        }
    }

    fn waiting_for_peer<D, P: PeerLink>(
        &mut self,
        ctx: &mut Context<D, P>,
        input: &InputSnapshot,
        now_ms: u32,
        fb: &mut Feedback,
    ) {
        match self.stage {
            Stage::Enter => {
                self.wait(now_ms, ctx.config.timing.settle_ms);
                self.stage = Stage::Prompt;
            }
            Stage::Prompt => {
                fb.show(format_args!("Waiting for timer..."));
                fb.light(
                    RgbSettings::team(ctx.live.team)
                        .with_pattern(Pattern::SingleBlinkCycle)
                        .forever(),
                );
                self.stage = Stage::Active;
            }
            Stage::Active => {
                if input.confirm.clicks > 0 {
                    info!("peer wait aborted");
                    self.go(Event::Abort);
                    return;
                }
                let tokens = self.peer_tokens(&mut ctx.peer, Some(PeerToken::Start));
                if tokens.contains(&PeerToken::Start) {
                    info!("hub start received");
                    self.wait(now_ms, ctx.config.timing.peer_start_delay_ms);
                    self.stage = Stage::Closing;
                }
            }
            _ => self.go(Event::PeerStarted),
        }
    }

    fn running<D, P: PeerLink>(
        &mut self,
        ctx: &mut Context<D, P>,
        mode: &'static ModeDescriptor,
        input: &InputSnapshot,
        now_ms: u32,
        fb: &mut Feedback,
    ) {
        match self.stage {
            Stage::Enter => {
                // The hub's start delay already gave the field its lead time
                if !mode.wireless {
                    self.wait(now_ms, ctx.config.timing.settle_ms);
                }
                self.stage = Stage::Prompt;
            }
            Stage::Prompt => {
                let mut game = Game::new(mode, ctx.live.begin_match(), now_ms);
                game.start(now_ms, fb);
                self.game = Some(game);
                self.pending_end = None;
                self.stage = Stage::Active;
            }
            Stage::Active => {
                let tokens = self.peer_tokens(&mut ctx.peer, None);
                let Some(game) = self.game.as_mut() else {
                    return;
                };
                match game.step(input, &tokens, now_ms, fb) {
                    Some(EndReason::Exit) => {
                        fb.show(format_args!("exiting..."));
                        self.pending_end = Some(EndReason::Exit);
                        self.wait(now_ms, ctx.config.timing.exit_notice_ms);
                        self.stage = Stage::Closing;
                    }
                    Some(reason) => self.end_match(ctx, reason, fb),
                    None => {}
                }
            }
            _ => {
                let reason = self.pending_end.take().unwrap_or(EndReason::Exit);
                self.end_match(ctx, reason, fb);
            }
        }
    }

    fn end_match<D, P>(&mut self, ctx: &mut Context<D, P>, reason: EndReason, fb: &mut Feedback) {
        if let Some(game) = self.game.as_mut() {
            game.finish(reason, fb);
            ctx.live.commit_result(game.state());
        }
        self.go(Event::MatchOver);
    }

    fn ended(&mut self, input: &InputSnapshot, now_ms: u32) {
        match self.stage {
            Stage::Closing => self.go(Event::Acknowledge),
            _ if input.confirm.clicks > 0 => {
                self.wait(now_ms, ACK_PAUSE_MS);
                self.stage = Stage::Closing;
            }
            _ => {}
        }
    }

    fn restarting<D, P>(
        &mut self,
        ctx: &mut Context<D, P>,
        mode: &'static ModeDescriptor,
        input: &InputSnapshot,
        now_ms: u32,
        fb: &mut Feedback,
    ) {
        let settle = ctx.config.timing.settle_ms;
        match self.stage {
            Stage::Enter => {
                self.wait(now_ms, settle);
                self.stage = Stage::Prompt;
            }
            Stage::Prompt => {
                fb.light(RgbSettings::default());
                fb.show(format_args!("Restart?:\n{}", ctx.live.restart_choice.label()));
                self.wait(now_ms, settle);
                self.stage = Stage::Active;
            }
            Stage::Active => {
                if input.encoder != 0 {
                    ctx.live.restart_choice =
                        setup::scroll_restart(ctx.live.restart_choice, input.encoder);
                    fb.show(format_args!("Restart?:\n{}", ctx.live.restart_choice.label()));
                }
                if input.confirm.clicks > 0 {
                    self.wait(now_ms, settle);
                    self.stage = Stage::Closing;
                }
            }
            _ => match ctx.live.restart_choice {
                RestartChoice::Yes => {
                    let team = if mode.is_team_based() {
                        ctx.live.team.swapped()
                    } else {
                        Team::Green
                    };
                    info!("replay {} as {}", mode.name, team);
                    ctx.live.team = team;
                    fb.team(team, RgbSettings::team(team));
                    self.go(Event::Replay);
                }
                RestartChoice::No => {
                    ctx.live.reset_to_defaults();
                    self.mode = None;
                    self.game = None;
                    self.go(Event::Quit);
                }
            },
        }
    }
}

impl<D: TextDisplay, P: PeerLink> Task<Context<D, P>> for MatchFlow {
    fn name(&self) -> &'static str {
        "flow"
    }

    fn poll(&mut self, ctx: &mut Context<D, P>, now_ms: u32) {
        if !self.phase.listens_to_peers() {
            while ctx.peer.try_recv().is_some() {}
        }

        let input = InputSnapshot::capture(&mut ctx.buttons, &mut ctx.encoder);
        if let Some(wait) = self.wait {
            if !wait.over(now_ms) {
                return;
            }
            self.wait = None;
            // Inputs made during the wait are dropped with this snapshot
            ctx.buttons.discard_pending();
            return;
        }

        let mut fb = Feedback::default();
        match (self.phase, self.mode) {
            (Phase::Boot, _) => self.go(Event::BootComplete),
            (Phase::Menu, _) => self.menu(ctx, &input, now_ms, &mut fb),
            (Phase::Setup, Some(mode)) => self.setup(ctx, mode, &input, now_ms, &mut fb),
            (Phase::Standby, Some(mode)) => self.standby(ctx, mode, &input, now_ms, &mut fb),
            (Phase::WaitingForPeer, Some(_)) => {
                self.waiting_for_peer(ctx, &input, now_ms, &mut fb)
            }
            (Phase::Running, Some(mode)) => self.running(ctx, mode, &input, now_ms, &mut fb),
            (Phase::Ended, _) => self.ended(&input, now_ms),
            (Phase::Restarting, Some(mode)) => {
                self.restarting(ctx, mode, &input, now_ms, &mut fb)
            }
            (phase, None) => {
                warn!("no mode selected in {}", phase);
                self.phase = Phase::Menu;
                self.stage = Stage::Enter;
            }
        }

        apply(ctx, fb);
    }
}

fn apply<D: TextDisplay, P>(ctx: &mut Context<D, P>, fb: Feedback) {
    if let Some(text) = fb.screen {
        if let Err(err) = ctx.display.show(&text) {
            warn!("display write failed: {}", err);
        }
    }
    if let Some(settings) = fb.rgb {
        ctx.rgb.register(settings);
    }
    if let Some(leds) = fb.leds {
        ctx.leds = leds;
    }
}

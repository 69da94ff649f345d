//! Whole-device scenarios on simulated pins

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;

use buckets_display::{CharScreen, LCD_COLS, LCD_ROWS};
use buckets_protocol::{PeerPayload, PeerToken};

use super::*;
use crate::config::DeviceConfig;
use crate::engine::MatchFlow;
use crate::rgb::Rgb;
use crate::state::{Phase, Team};
use crate::traits::{LedStrip, LevelInput, PeerLink, PositionSource};

type Screen = CharScreen<LCD_COLS, LCD_ROWS>;
type Ctx = Context<Screen, Radio>;

#[derive(Clone, Default)]
struct Pin(Rc<Cell<bool>>);

impl LevelInput for Pin {
    fn is_active(&mut self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Default)]
struct Knob(Rc<Cell<i32>>);

impl PositionSource for Knob {
    fn position(&mut self) -> i32 {
        self.0.get()
    }
}

#[derive(Clone, Default)]
struct Strip(Rc<Cell<u32>>);

impl LedStrip for Strip {
    fn write(&mut self, _frame: &[Rgb]) {
        self.0.set(self.0.get() + 1);
    }
}

#[derive(Default)]
struct Radio(VecDeque<PeerPayload>);

impl PeerLink for Radio {
    fn try_recv(&mut self) -> Option<PeerPayload> {
        self.0.pop_front()
    }
}

struct Rig {
    red: Pin,
    blue: Pin,
    confirm: Pin,
    knob: Knob,
    frames: Strip,
    ctx: Ctx,
    buttons: ButtonSampler<Pin, Pin, Pin>,
    encoder: EncoderSampler<Knob>,
    flow: MatchFlow,
    rgb: RgbRenderer<Strip, 3>,
    now: u32,
}

impl Rig {
    fn new() -> Self {
        let (red, blue, confirm) = (Pin::default(), Pin::default(), Pin::default());
        let knob = Knob::default();
        let frames = Strip::default();
        Self {
            buttons: ButtonSampler::new(red.clone(), blue.clone(), confirm.clone()),
            encoder: EncoderSampler::new(knob.clone()),
            rgb: RgbRenderer::new(frames.clone(), u8::MAX),
            flow: MatchFlow::new(7),
            ctx: Context::new(DeviceConfig::default(), Screen::new(), Radio::default()),
            red,
            blue,
            confirm,
            knob,
            frames,
            now: 0,
        }
    }

    /// Run the scheduler for `ms` one-millisecond turns
    fn run(&mut self, ms: u32) {
        let Rig {
            ctx,
            buttons,
            encoder,
            flow,
            rgb,
            now,
            ..
        } = self;
        let mut scheduler = Scheduler::new([
            buttons as &mut dyn Task<Ctx>,
            encoder as &mut dyn Task<Ctx>,
            flow as &mut dyn Task<Ctx>,
            rgb as &mut dyn Task<Ctx>,
        ]);
        for _ in 0..ms {
            *now += 1;
            scheduler.run_turn(ctx, *now);
        }
    }

    /// Short press, then enough quiet for the series to close
    fn tap(&mut self, pin: &Pin) {
        pin.0.set(true);
        self.run(50);
        pin.0.set(false);
        self.run(300);
    }

    fn turn(&mut self, detents: i32) {
        self.knob.0.set(self.knob.0.get() + detents);
        self.run(20);
    }

    fn send(&mut self, token: PeerToken) {
        self.ctx.peer.0.push_back(token.to_payload());
    }

    fn screen(&self) -> (String, String) {
        (
            self.ctx.display.line(0).trim_end().into(),
            self.ctx.display.line(1).trim_end().into(),
        )
    }

    fn assert_screen(&self, top: &str, bottom: &str) {
        assert_eq!(self.screen(), (top.into(), bottom.into()));
    }

    /// Boot through the splash and colour sweep to the menu
    fn to_menu(&mut self) {
        self.run(1500);
        assert_eq!(self.flow.phase(), Phase::Menu);
    }

    /// Pick the menu entry `index` places down
    fn choose(&mut self, index: i32) {
        if index != 0 {
            self.turn(index);
        }
        let confirm = self.confirm.clone();
        self.tap(&confirm);
        self.run(600);
    }
}

#[test]
fn test_boot_gate() {
    assert!(boot_allowed(false));
    assert!(!boot_allowed(true));
}

#[test]
fn test_task_order() {
    let mut rig = Rig::new();
    let Rig {
        buttons,
        encoder,
        flow,
        rgb,
        ..
    } = &mut rig;
    let scheduler = Scheduler::new([
        buttons as &mut dyn Task<Ctx>,
        encoder as &mut dyn Task<Ctx>,
        flow as &mut dyn Task<Ctx>,
        rgb as &mut dyn Task<Ctx>,
    ]);
    assert_eq!(scheduler.names(), ["buttons", "encoder", "flow", "rgb"]);
    assert_eq!(scheduler.turns(), 0);
}

#[test]
fn test_menu_after_sweep() {
    let mut rig = Rig::new();
    rig.to_menu();
    rig.assert_screen("Select a game:", "Attrition");
    // Sweep ends on green and the renderer drew every step of it
    assert_eq!(rig.ctx.live.team, Team::Green);
    assert!(!rig.ctx.rgb.holding());
    assert!(rig.frames.0.get() >= 9);
}

#[test]
fn test_menu_scroll_wraps() {
    let mut rig = Rig::new();
    rig.to_menu();
    rig.turn(-1);
    rig.assert_screen("Select a game:", "HotPockets");
    rig.turn(2);
    rig.assert_screen("Select a game:", "Death Clicks");
}

#[test]
fn test_detents_between_turns_add_up() {
    let mut rig = Rig::new();
    rig.to_menu();
    // Three detents land before the flow's next turn
    rig.knob.0.set(3);
    rig.run(1);
    rig.assert_screen("Select a game:", "Crazy King");
}

#[test]
fn test_attrition_round_and_replay() {
    let mut rig = Rig::new();
    let (red, confirm) = (rig.red.clone(), rig.confirm.clone());
    rig.to_menu();

    rig.choose(0);
    assert_eq!(rig.flow.phase(), Phase::Setup);
    rig.assert_screen("Attrition", "Lives: 0");
    rig.turn(3);
    rig.assert_screen("Attrition", "Lives: 3");

    rig.tap(&confirm);
    rig.run(600);
    rig.assert_screen("Attrition", "Team:");
    rig.tap(&red);
    rig.assert_screen("Attrition", "Team Red");

    rig.tap(&confirm);
    rig.run(1200);
    assert_eq!(rig.flow.phase(), Phase::Standby);
    rig.assert_screen("Attrition Ready", "Team lives 3");

    rig.tap(&confirm);
    rig.run(700);
    assert_eq!(rig.flow.phase(), Phase::Running);
    rig.assert_screen("Red Lives Left", "3");

    rig.tap(&red);
    rig.assert_screen("Red Lives Left", "2");
    rig.tap(&red);
    rig.tap(&red);
    assert_eq!(rig.flow.phase(), Phase::Ended);
    rig.assert_screen("Red Lives Left", "0");
    // Setup values survive the match
    assert_eq!(rig.ctx.live.lives_count, 3);

    rig.tap(&confirm);
    rig.run(1200);
    assert_eq!(rig.flow.phase(), Phase::Restarting);
    rig.assert_screen("Restart?:", "No");
    rig.turn(1);
    rig.assert_screen("Restart?:", "Yes");

    rig.tap(&confirm);
    rig.run(1200);
    assert_eq!(rig.flow.phase(), Phase::Standby);
    assert_eq!(rig.ctx.live.team, Team::Blue);
    rig.assert_screen("Attrition Ready", "Team lives 3");
}

#[test]
fn test_quit_resets_to_menu() {
    let mut rig = Rig::new();
    let confirm = rig.confirm.clone();
    rig.to_menu();
    rig.choose(1);
    rig.assert_screen("Death Clicks", "Team:");
    let blue = rig.blue.clone();
    rig.tap(&blue);
    rig.tap(&confirm);
    rig.run(1200);
    rig.tap(&confirm);
    rig.run(700);
    rig.assert_screen("Blue team", "Deaths 0");

    // Long press on the encoder button leaves the match
    confirm.0.set(true);
    rig.run(2100);
    confirm.0.set(false);
    rig.run(20);
    rig.assert_screen("exiting...", "");
    rig.run(600);
    assert_eq!(rig.flow.phase(), Phase::Ended);

    rig.tap(&confirm);
    rig.run(1200);
    rig.assert_screen("Restart?:", "No");
    rig.tap(&confirm);
    rig.run(1500);
    assert_eq!(rig.flow.phase(), Phase::Menu);
    assert_eq!(rig.ctx.live.lives_count, 0);
}

#[test]
fn test_press_during_screen_change_is_dropped() {
    let mut rig = Rig::new();
    let confirm = rig.confirm.clone();
    rig.to_menu();
    rig.choose(0);

    // Confirm the lives step, then click again inside the settle pause
    confirm.0.set(true);
    rig.run(50);
    confirm.0.set(false);
    rig.run(250);
    rig.tap(&confirm);
    rig.run(600);
    assert_eq!(rig.flow.phase(), Phase::Setup);
    rig.assert_screen("Attrition", "Team:");
}

fn to_waiting(rig: &mut Rig) {
    let confirm = rig.confirm.clone();
    rig.to_menu();
    rig.choose(6);
    rig.assert_screen("Domination W", "Uses TimerBox");
    rig.tap(&confirm);
    rig.run(1200);
    rig.assert_screen("Domination W", "Ready w TimerBox");
    rig.tap(&confirm);
    rig.run(600);
    assert_eq!(rig.flow.phase(), Phase::WaitingForPeer);
    rig.assert_screen("Waiting for time", "r...");
}

#[test]
fn test_hub_starts_pauses_and_ends_match() {
    let mut rig = Rig::new();
    to_waiting(&mut rig);

    rig.send(PeerToken::Start);
    rig.run(10);
    assert_eq!(rig.flow.phase(), Phase::WaitingForPeer);
    rig.run(6100);
    assert_eq!(rig.flow.phase(), Phase::Running);
    rig.assert_screen("RED:  00:00", "BLUE: 00:00");

    rig.send(PeerToken::Pause);
    rig.send(PeerToken::Pause);
    rig.run(5);
    let paused = rig.flow.game().map(|g| g.state().timer_running);
    assert_eq!(paused, Some(false));

    rig.send(PeerToken::Resume);
    rig.run(5);
    let resumed = rig.flow.game().map(|g| g.state().timer_running);
    assert_eq!(resumed, Some(true));

    rig.send(PeerToken::End);
    rig.run(5);
    assert_eq!(rig.flow.phase(), Phase::Ended);
    assert_eq!(rig.ctx.live.team, Team::Purple);
}

#[test]
fn test_tokens_behind_start_reach_the_match() {
    let mut rig = Rig::new();
    to_waiting(&mut rig);

    // Pause lands in the same batch as Start
    rig.send(PeerToken::Start);
    rig.send(PeerToken::Pause);
    rig.run(6200);
    assert_eq!(rig.flow.phase(), Phase::Running);
    let paused = rig.flow.game().map(|g| g.state().timer_running);
    assert_eq!(paused, Some(false));

    // The hub repeating it changes nothing
    rig.send(PeerToken::Pause);
    rig.run(5);
    let still = rig.flow.game().map(|g| g.state().timer_running);
    assert_eq!(still, Some(false));

    rig.send(PeerToken::Resume);
    rig.run(5);
    let resumed = rig.flow.game().map(|g| g.state().timer_running);
    assert_eq!(resumed, Some(true));
}

#[test]
fn test_tokens_before_wait_are_dropped() {
    let mut rig = Rig::new();
    rig.run(5);
    rig.send(PeerToken::Start);
    to_waiting(&mut rig);
    rig.run(7000);
    assert_eq!(rig.flow.phase(), Phase::WaitingForPeer);
}

#[test]
fn test_garbage_payloads_are_ignored() {
    let mut rig = Rig::new();
    to_waiting(&mut rig);
    rig.ctx.peer.0.push_back(PeerPayload::from_slice(b"start").unwrap());
    rig.ctx.peer.0.push_back(PeerPayload::from_slice(b"\xff\xfe").unwrap());
    rig.run(7000);
    assert_eq!(rig.flow.phase(), Phase::WaitingForPeer);
}

#[test]
fn test_abort_peer_wait() {
    let mut rig = Rig::new();
    let confirm = rig.confirm.clone();
    to_waiting(&mut rig);
    rig.tap(&confirm);
    rig.run(1200);
    assert_eq!(rig.flow.phase(), Phase::Restarting);
}

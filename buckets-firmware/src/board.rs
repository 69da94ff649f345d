//! Board adapters for the engine's collaborator traits
//!
//! Pin map (RP2040 devboard retrofit):
//!
//! | Function            | GPIO |
//! |---------------------|------|
//! | Red button          | 7    |
//! | Blue button         | 4    |
//! | Encoder A / B       | 14 / 13 |
//! | Encoder button      | 12   |
//! | Red / blue LED      | 6 / 5 |
//! | RGB strip data      | 16   |
//! | LCD SDA / SCL       | 20 / 21 |
//! | Radio bridge TX / RX | 8 / 9 |
//! | Audio TX / RX       | 0 / 1 |

use core::sync::atomic::Ordering;

use embassy_rp::gpio::{Input, Level, Output};

use buckets_core::engine::TeamLeds;
use buckets_core::rgb::Rgb;
use buckets_core::traits::{LedStrip, LevelInput, PeerLink, PositionSource};
use buckets_protocol::PeerPayload;

use crate::channels::{ENCODER_POSITION, LED_COUNT, LED_FRAME, PEER_INBOX};

/// Button wired to ground with the internal pull-up
pub struct ActiveLow(pub Input<'static>);

impl LevelInput for ActiveLow {
    fn is_active(&mut self) -> bool {
        self.0.is_low()
    }
}

/// Position published by the encoder task
pub struct SharedEncoder;

impl PositionSource for SharedEncoder {
    fn position(&mut self) -> i32 {
        ENCODER_POSITION.load(Ordering::Relaxed)
    }
}

/// Hands frames to the LED task
pub struct StripSink;

impl LedStrip for StripSink {
    fn write(&mut self, frame: &[Rgb]) {
        let mut out = [Rgb::OFF; LED_COUNT];
        for (dst, src) in out.iter_mut().zip(frame) {
            *dst = *src;
        }
        LED_FRAME.signal(out);
    }
}

/// Payloads queued by the radio task
pub struct RadioInbox;

impl PeerLink for RadioInbox {
    fn try_recv(&mut self) -> Option<PeerPayload> {
        PEER_INBOX.try_receive().ok()
    }
}

/// The two discrete team LEDs
pub struct TeamLedPins {
    pub red: Output<'static>,
    pub blue: Output<'static>,
}

impl TeamLedPins {
    pub fn show(&mut self, leds: TeamLeds) {
        self.red.set_level(Level::from(leds.red));
        self.blue.set_level(Level::from(leds.blue));
    }
}

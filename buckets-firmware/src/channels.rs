//! Inter-task communication channels
//!
//! The device task owns the engine. Everything async (LCD bus, LED strip,
//! radio bridge, encoder edges) talks to it through these statics.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicI32;

use buckets_core::rgb::Rgb;
use buckets_display::{LCD_COLS, LCD_ROWS};
use buckets_protocol::PeerPayload;

/// Pixels on the RGB strip
pub const LED_COUNT: usize = 12;

/// Peer payloads queued between the radio task and the engine
const PEER_INBOX_SIZE: usize = 8;

/// One full LCD frame
pub type ScreenCells = [[u8; LCD_COLS]; LCD_ROWS];

/// Payloads received by the radio bridge, oldest first
pub static PEER_INBOX: Channel<CriticalSectionRawMutex, PeerPayload, PEER_INBOX_SIZE> =
    Channel::new();

/// Latest screen contents for the LCD task (latest wins)
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ScreenCells> = Signal::new();

/// Latest RGB frame for the LED task (latest wins)
pub static LED_FRAME: Signal<CriticalSectionRawMutex, [Rgb; LED_COUNT]> = Signal::new();

/// Encoder detents since power-on, written by the encoder task
pub static ENCODER_POSITION: AtomicI32 = AtomicI32::new(0);

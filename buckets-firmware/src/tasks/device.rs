//! Device task
//!
//! Owns the engine context and runs the cooperative scheduler once per
//! millisecond. Screen and LED changes leave through the channels.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use buckets_core::config::DeviceConfig;
use buckets_core::engine::MatchFlow;
use buckets_core::runtime::{ButtonSampler, Context, EncoderSampler, RgbRenderer, Scheduler, Task};
use buckets_display::{CharScreen, LCD_COLS, LCD_ROWS};

use crate::board::{ActiveLow, RadioInbox, SharedEncoder, StripSink, TeamLedPins};
use crate::channels::{LED_COUNT, SCREEN_UPDATE};

/// Scheduler turn length
pub const TURN_MS: u64 = 1;

type DeviceContext = Context<CharScreen<LCD_COLS, LCD_ROWS>, Option<RadioInbox>>;

/// Pins and settings handed to the device task
pub struct DeviceParts {
    pub config: DeviceConfig,
    pub red: ActiveLow,
    pub blue: ActiveLow,
    pub confirm: ActiveLow,
    pub leds: TeamLedPins,
    /// Splash selection seed
    pub seed: u64,
}

#[embassy_executor::task]
pub async fn device_task(parts: DeviceParts) {
    info!("Device task started");

    let DeviceParts {
        config,
        red,
        blue,
        confirm,
        mut leds,
        seed,
    } = parts;

    let peer = config.peer.enabled.then_some(RadioInbox);
    let mut ctx: DeviceContext = Context::new(config, CharScreen::new(), peer);

    let mut buttons = ButtonSampler::new(red, blue, confirm);
    let mut encoder = EncoderSampler::new(SharedEncoder);
    let mut flow = MatchFlow::new(seed);
    let mut rgb = RgbRenderer::<_, LED_COUNT>::new(StripSink, config.rgb.brightness);
    let mut scheduler = Scheduler::new([
        &mut buttons as &mut dyn Task<DeviceContext>,
        &mut encoder as &mut dyn Task<DeviceContext>,
        &mut flow as &mut dyn Task<DeviceContext>,
        &mut rgb as &mut dyn Task<DeviceContext>,
    ]);
    debug!("Scheduler order: {}", scheduler.names());

    let mut ticker = Ticker::every(Duration::from_millis(TURN_MS));
    let start = Instant::now();
    let mut shown = ctx.leds;
    leds.show(shown);

    loop {
        ticker.next().await;
        let now_ms = start.elapsed().as_millis() as u32;
        scheduler.run_turn(&mut ctx, now_ms);

        if ctx.display.take_dirty() {
            SCREEN_UPDATE.signal(*ctx.display.cells());
        }
        if ctx.leds != shown {
            shown = ctx.leds;
            leds.show(shown);
        }
    }
}

//! RGB strip task
//!
//! Streams frames rendered by the pattern engine to the WS2812 strip over
//! PIO.

use defmt::*;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use smart_leds::RGB8;

use crate::channels::{LED_COUNT, LED_FRAME};

#[embassy_executor::task]
pub async fn led_task(mut strip: PioWs2812<'static, PIO0, 0, LED_COUNT>) {
    info!("LED task started");

    loop {
        let frame = LED_FRAME.wait().await;
        let pixels: [RGB8; LED_COUNT] = frame.map(|px| RGB8::new(px.r, px.g, px.b));
        strip.write(&pixels).await;
    }
}

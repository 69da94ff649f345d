//! LCD task
//!
//! Pushes screen frames from the device task to the panel. A panel that
//! does not answer at boot leaves the device running without a display.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;

use crate::channels::SCREEN_UPDATE;
use crate::display::Lcd;

#[embassy_executor::task]
pub async fn lcd_task(i2c: I2c<'static, I2C0, Async>, addresses: [u8; 2]) {
    info!("LCD task started");

    let mut lcd = match Lcd::probe(i2c, &addresses).await {
        Ok(lcd) => {
            info!("LCD found at {=u8:#x}", lcd.address());
            lcd
        }
        Err(e) => {
            warn!("LCD unavailable: {}", e);
            return;
        }
    };

    loop {
        let cells = SCREEN_UPDATE.wait().await;
        if let Err(e) = lcd.draw(&cells).await {
            warn!("LCD write failed: {}", e);
        }
    }
}

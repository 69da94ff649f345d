//! Encoder task
//!
//! Decodes the A/B channels on every edge and publishes the absolute
//! position. The engine's encoder sampler reads it once per turn.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::Input;

use buckets_core::input::QuadratureDecoder;

use crate::channels::ENCODER_POSITION;

#[embassy_executor::task]
pub async fn encoder_task(mut a: Input<'static>, mut b: Input<'static>) {
    info!("Encoder task started");

    let mut decoder = QuadratureDecoder::new(a.is_high(), b.is_high());

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;
        if let Some(step) = decoder.update(a.is_high(), b.is_high()) {
            trace!("Encoder step: {}", step);
            ENCODER_POSITION.store(decoder.position(), Ordering::Relaxed);
        }
    }
}

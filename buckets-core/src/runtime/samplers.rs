//! Input sampling and RGB rendering tasks

use super::context::Context;
use super::scheduler::Task;
use crate::rgb::PatternEngine;
use crate::traits::{LedStrip, LevelInput, PositionSource};

/// Samples the three button contacts into the debouncers
pub struct ButtonSampler<R, B, F> {
    red: R,
    blue: B,
    confirm: F,
}

impl<R, B, F> ButtonSampler<R, B, F>
where
    R: LevelInput,
    B: LevelInput,
    F: LevelInput,
{
    pub fn new(red: R, blue: B, confirm: F) -> Self {
        Self { red, blue, confirm }
    }
}

impl<R, B, F, D, P> Task<Context<D, P>> for ButtonSampler<R, B, F>
where
    R: LevelInput,
    B: LevelInput,
    F: LevelInput,
{
    fn name(&self) -> &'static str {
        "buttons"
    }

    fn poll(&mut self, ctx: &mut Context<D, P>, now_ms: u32) {
        ctx.buttons.red.update(self.red.is_active(), now_ms);
        ctx.buttons.blue.update(self.blue.is_active(), now_ms);
        ctx.buttons.confirm.update(self.confirm.is_active(), now_ms);
    }
}

/// Samples the encoder position
pub struct EncoderSampler<E> {
    source: E,
}

impl<E: PositionSource> EncoderSampler<E> {
    pub fn new(source: E) -> Self {
        Self { source }
    }
}

impl<E: PositionSource, D, P> Task<Context<D, P>> for EncoderSampler<E> {
    fn name(&self) -> &'static str {
        "encoder"
    }

    fn poll(&mut self, ctx: &mut Context<D, P>, _now_ms: u32) {
        ctx.encoder.sample(self.source.position());
    }
}

/// Renders the registered RGB pattern onto an `N`-pixel strip
pub struct RgbRenderer<L, const N: usize> {
    strip: L,
    engine: PatternEngine<N>,
}

impl<L: LedStrip, const N: usize> RgbRenderer<L, N> {
    pub fn new(strip: L, brightness: u8) -> Self {
        Self {
            strip,
            engine: PatternEngine::new(brightness),
        }
    }
}

impl<L: LedStrip, const N: usize, D, P> Task<Context<D, P>> for RgbRenderer<L, N> {
    fn name(&self) -> &'static str {
        "rgb"
    }

    fn poll(&mut self, ctx: &mut Context<D, P>, now_ms: u32) {
        if let Some(frame) = self.engine.render(&mut ctx.rgb, now_ms) {
            self.strip.write(&frame);
        }
    }
}

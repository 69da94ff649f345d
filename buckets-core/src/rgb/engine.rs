//! Pattern renderer
//!
//! Polled once per scheduler turn. Each call either adopts a newer
//! registration (and draws its first frame immediately), advances the
//! current pattern by one step if `delay_ms` has elapsed, or does nothing.

use super::color::Rgb;
use super::settings::{Pattern, RgbRegister, RgbSettings};

/// Frame generator for an `N`-pixel strip
#[derive(Debug, Clone)]
pub struct PatternEngine<const N: usize> {
    frame: [Rgb; N],
    brightness: u8,
    adopted: Option<u32>,
    settings: RgbSettings,
    step: u32,
    last_step_ms: u32,
    finished: bool,
}

impl<const N: usize> PatternEngine<N> {
    /// Create a renderer with a dark strip
    pub fn new(brightness: u8) -> Self {
        Self {
            frame: [Rgb::OFF; N],
            brightness,
            adopted: None,
            settings: RgbSettings::default(),
            step: 0,
            last_step_ms: 0,
            finished: false,
        }
    }

    /// Produce the next frame, if one is due
    pub fn render(&mut self, register: &mut RgbRegister, now_ms: u32) -> Option<[Rgb; N]> {
        let generation = register.generation();
        if self.adopted != Some(generation) {
            self.adopted = Some(generation);
            self.settings = *register.settings();
            self.step = 0;
            self.last_step_ms = now_ms;
            self.finished = false;
            self.draw();
            return Some(self.output());
        }

        if self.finished || now_ms.wrapping_sub(self.last_step_ms) < self.settings.delay_ms as u32 {
            return None;
        }

        self.last_step_ms = now_ms;
        self.step += 1;
        if let Some(total) = self.total_steps() {
            if self.step >= total {
                self.finished = true;
                register.finished(generation);
                return None;
            }
        }
        self.draw();
        Some(self.output())
    }

    /// Whether the current pattern has played out
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn steps_per_cycle(&self) -> u32 {
        let pixels = N.max(1) as u32;
        match self.settings.pattern {
            Pattern::Solid => 1,
            Pattern::Fill => pixels,
            Pattern::FillCycle => pixels * 2,
            Pattern::SolidBlink | Pattern::SingleBlinkCycle => 2,
        }
    }

    fn total_steps(&self) -> Option<u32> {
        if self.settings.repeat < 0 {
            return None;
        }
        let cycles = (self.settings.repeat as u32).max(1);
        Some(self.steps_per_cycle() * cycles)
    }

    fn draw(&mut self) {
        let per_cycle = self.steps_per_cycle();
        let k = (self.step % per_cycle) as usize;
        let first_cycle = self.step < per_cycle;
        let c1 = self.settings.color1.rgb();
        let c2 = self.settings.color2.rgb();

        match self.settings.pattern {
            Pattern::Solid => self.frame.fill(c1),
            Pattern::Fill => {
                // Later passes restart from the background colour
                if k == 0 && !first_cycle {
                    self.frame.fill(c2);
                }
                self.set(k, c1);
            }
            Pattern::FillCycle => {
                if k < N {
                    self.set(k, c1);
                } else {
                    self.set(k - N, c2);
                }
            }
            Pattern::SolidBlink => self.frame.fill(if k == 0 { c1 } else { c2 }),
            Pattern::SingleBlinkCycle => {
                for (i, px) in self.frame.iter_mut().enumerate() {
                    *px = if (i + k) % 2 == 0 { c1 } else { c2 };
                }
            }
        }
    }

    fn set(&mut self, index: usize, color: Rgb) {
        if let Some(px) = self.frame.get_mut(index) {
            *px = color;
        }
    }

    fn output(&self) -> [Rgb; N] {
        self.frame.map(|px| px.dimmed(self.brightness))
    }
}

impl<const N: usize> Default for PatternEngine<N> {
    fn default() -> Self {
        Self::new(u8::MAX)
    }
}

//! Cooperative runtime
//!
//! One [`Context`] is built at startup and every task borrows it mutably for
//! the duration of its turn. Tasks run to completion one after another, so
//! no two ever touch the context at the same time.

mod context;
mod samplers;
mod scheduler;

pub use context::Context;
pub use samplers::{ButtonSampler, EncoderSampler, RgbRenderer};
pub use scheduler::{Scheduler, Task};

/// Whether the engine may start
///
/// Holding the confirm button at power-on keeps the device in maintenance
/// mode with the engine stopped.
pub fn boot_allowed(confirm_held: bool) -> bool {
    !confirm_held
}

#[cfg(test)]
mod tests;

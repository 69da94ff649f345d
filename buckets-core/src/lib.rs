//! Board-agnostic core logic for the bucket timer firmware
//!
//! This crate contains everything that does not touch a pin:
//!
//! - Match state record and its per-match snapshot discipline
//! - Mode descriptor table for the twelve game modes
//! - Setup flow and the data-driven execution engine
//! - RGB pattern engine
//! - Button and encoder samplers
//! - Cooperative scheduler and the device context it shares between tasks
//! - Device configuration and its TOML loader

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod engine;
pub mod input;
pub mod modes;
pub mod rgb;
pub mod runtime;
pub mod state;
pub mod traits;

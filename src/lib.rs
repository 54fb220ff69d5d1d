//! tinymorse firmware library.
//!
//! Exposes the pure-logic modules (code table, decoder, password gate,
//! playback, control loop) for integration testing.  All ESP-IDF-specific
//! code is guarded by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod decoder;
pub mod error;
pub mod gate;
pub mod morse;
pub mod pins;
pub mod playback;
pub mod store;

pub mod adapters;
pub mod drivers;

pub use app::service::{Inputs, Transceiver};
pub use clock::DurationCounter;
pub use config::KeyerConfig;
pub use error::{Error, Result};

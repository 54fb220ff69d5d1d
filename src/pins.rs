//! GPIO assignments for the transceiver board.
//!
//! Single source of truth: `main.rs` takes pins by these numbers rather
//! than hard-coding them.

/// Key output: LED, buzzer or transmitter keying transistor.
pub const KEY_OUTPUT_GPIO: i32 = 3;

/// Paddle / straight key input.
pub const PADDLE_GPIO: i32 = 4;

/// Playback trigger input (BOOT button on most dev boards).
pub const TRIGGER_GPIO: i32 = 0;

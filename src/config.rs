//! Transceiver configuration parameters
//!
//! All tunable parameters for the keyer.  Defaults reproduce the classic
//! device: 150 ms Morse unit, 10 ms counter tick, 2.5 s receiver timeout.
//! Values can be overridden via NVS (see [`crate::adapters::nvs`]).

use serde::{Deserialize, Serialize};

use crate::morse::Timing;

/// Byte offsets inside the persistent store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLayout {
    /// Address of the preamble flag byte (`'1'` = framed playback).
    pub preamble_addr: u16,
    /// First byte of the password region.
    pub password_addr: u16,
    /// Size of the password region in bytes.
    pub password_len: u8,
    /// First byte of the hidden message.
    pub message_addr: u16,
}

impl Default for StoreLayout {
    fn default() -> Self {
        Self {
            preamble_addr: 0,
            password_addr: 1,
            password_len: 8,
            message_addr: 9,
        }
    }
}

/// Core keyer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyerConfig {
    // --- Timing ---
    /// Duration counter granularity (milliseconds per tick)
    pub tick_period_ms: u16,
    /// Morse base unit U (one DIT) in counter ticks
    pub unit_ticks: u16,
    /// Idle time after which pending input is flushed (counter ticks)
    pub receiver_timeout_ticks: u16,
    /// Settle time after a paddle edge before it is processed (milliseconds)
    pub debounce_ms: u16,

    // --- Input lines ---
    /// Paddle reads low when pressed
    pub paddle_active_low: bool,
    /// Trigger reads low when asserted
    pub trigger_active_low: bool,

    // --- Behaviour ---
    /// Keep a log of decoded letters and echo it on receiver timeout
    pub echo_letters: bool,

    // --- Store ---
    pub layout: StoreLayout,
}

impl Default for KeyerConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_period_ms: 10,
            unit_ticks: 15,           // 150 ms
            receiver_timeout_ticks: 250, // 2.5 s
            debounce_ms: 3,

            // Input lines
            paddle_active_low: false,
            trigger_active_low: false,

            // Behaviour
            echo_letters: true,

            layout: StoreLayout::default(),
        }
    }
}

impl KeyerConfig {
    /// Timing derived from the configured unit and tick period.
    pub fn timing(&self) -> Timing {
        Timing::new(self.unit_ticks, self.tick_period_ms)
    }

    /// Range-check every field.  The returned message names the field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(1..=1000).contains(&self.tick_period_ms) {
            return Err("tick_period_ms must be 1–1000");
        }
        if !(1..=1000).contains(&self.unit_ticks) {
            return Err("unit_ticks must be 1–1000");
        }
        if self.receiver_timeout_ticks <= self.timing().word_gap() {
            return Err("receiver_timeout_ticks must exceed the word gap (7 units)");
        }
        if self.debounce_ms > 100 {
            return Err("debounce_ms must be 0–100");
        }

        let l = &self.layout;
        if !(1..=32).contains(&l.password_len) {
            return Err("layout.password_len must be 1–32");
        }
        let password_end = u32::from(l.password_addr) + u32::from(l.password_len);
        if (u32::from(l.password_addr)..password_end).contains(&u32::from(l.preamble_addr)) {
            return Err("layout.preamble_addr overlaps the password region");
        }
        if l.preamble_addr >= l.message_addr {
            return Err("layout.preamble_addr must precede message_addr");
        }
        if password_end > u32::from(l.message_addr) {
            return Err("layout password region overlaps message_addr");
        }
        Ok(())
    }
}

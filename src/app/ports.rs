//! Port traits: the hexagonal boundary between the Morse core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Transceiver (domain)
//! ```
//!
//! Driven adapters (output line, delay, byte store, event sinks, config
//! storage) implement these traits.  The [`Transceiver`](super::service::Transceiver)
//! and the playback engine consume them via generics, so the core never
//! touches hardware directly and runs unchanged against host mocks.

use crate::config::KeyerConfig;
use crate::error::{Result, StoreError};

// ───────────────────────────────────────────────────────────────
// Key output port (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The single actuator: an LED, buzzer or transmitter key line.
pub trait KeyOutput {
    /// Drive the line active (pulse start).
    fn key_down(&mut self) -> Result<()>;

    /// Release the line (pulse end).
    fn key_up(&mut self) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Blocking wait.  Nothing else in the control flow runs while a delay is
/// in progress; only the tick source keeps counting.
pub trait Clock {
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Byte store port (persistent memory → domain)
// ───────────────────────────────────────────────────────────────

/// Read-only, byte-addressed persistent memory (EEPROM / flash image).
///
/// Unwritten cells read as [`UNWRITTEN`](crate::store::UNWRITTEN).
pub trait ByteStore {
    fn read_byte(&self, address: u16) -> core::result::Result<u8, StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s through
/// this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists keyer configuration.
///
/// Implementations MUST validate before persisting; out-of-range values are
/// rejected with [`ConfigError::ValidationFailed`], not clamped.
pub trait ConfigPort {
    /// Returns [`KeyerConfig::default()`] if no stored config exists.
    fn load(&self) -> core::result::Result<KeyerConfig, ConfigError>;

    fn save(&self, config: &KeyerConfig) -> core::result::Result<(), ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Corrupted => Self::Config("stored config corrupted"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
            ConfigError::IoError => Self::Init("config storage unavailable"),
        }
    }
}

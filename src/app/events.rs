//! Outbound application events.
//!
//! The [`Transceiver`](super::service::Transceiver) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, test recorder, ...).

use crate::gate::Outcome;
use crate::morse::{Sequence, Symbol};

/// Why the playback engine was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackKind {
    /// Hidden message after a correct password.
    Unlocked,
    /// Hidden message requested on the trigger line.
    Triggered,
    /// End-of-contact marker after a wrong password.
    Refused,
    /// Echo of the letter log on receiver timeout.
    Echo,
}

/// Structured events emitted by the control loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The transceiver is ready (carries the configured unit in ms).
    Started { unit_ms: u32 },

    /// A press was classified.
    Symbol(Symbol),

    /// A letter (or word space) was decoded.
    Letter(char),

    /// A sequence ended without matching any table entry.
    Dropped(Sequence),

    /// The password gate judged a character.
    Gate { c: char, outcome: Outcome },

    /// Playback is about to start.
    Playback(PlaybackKind),

    /// Playback failed part way; the loop carries on.
    PlaybackFailed(crate::error::Error),

    /// Pending input was flushed after the paddle stayed idle.
    ReceiverTimeout { echoed: usize },
}

//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every application event to the
//! `log` facade (UART / USB-CDC via the ESP-IDF logger in production).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::gate::Outcome;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { unit_ms } => {
                info!("START | unit={}ms", unit_ms);
            }
            AppEvent::Symbol(symbol) => {
                debug!("RX    | {}", symbol.as_char());
            }
            AppEvent::Letter(' ') => {
                info!("RX    | <space>");
            }
            AppEvent::Letter(c) => {
                info!("RX    | {}", c);
            }
            AppEvent::Dropped(seq) => {
                info!("RX    | {} (no match, dropped)", seq);
            }
            AppEvent::Gate { c, outcome } => {
                let verdict = match outcome {
                    Outcome::Pending => "pending",
                    Outcome::Accepted => "ACCEPTED",
                    Outcome::Rejected => "REJECTED",
                };
                info!("GATE  | {} -> {}", c, verdict);
            }
            AppEvent::Playback(kind) => {
                info!("TX    | {:?}", kind);
            }
            AppEvent::PlaybackFailed(e) => {
                warn!("TX    | aborted: {}", e);
            }
            AppEvent::ReceiverTimeout { echoed } => {
                info!("IDLE  | receiver timeout, echoed={}", echoed);
            }
        }
    }
}

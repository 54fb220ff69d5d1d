//! Transceiver: the main control loop.
//!
//! [`Transceiver`] owns the symbol assembler, the password gate, the
//! playback engine and the optional letter log.  It shares only the
//! [`DurationCounter`] with the tick source.  All I/O flows through port
//! traits passed in at each call, so the whole loop runs on the host
//! against mock adapters.
//!
//! ```text
//!  paddle ─▶ ┌─────────────────────────────┐ ─▶ KeyOutput
//! trigger ─▶ │        Transceiver          │ ─▶ EventSink
//!   ticks ─▶ │ Assembler · Gate · Player   │ ◀─ ByteStore
//!            └─────────────────────────────┘
//! ```

use heapless::String;
use log::{info, warn};

use crate::app::events::{AppEvent, PlaybackKind};
use crate::app::ports::{ByteStore, Clock, EventSink, KeyOutput};
use crate::clock::DurationCounter;
use crate::config::KeyerConfig;
use crate::decoder::{Decoded, SymbolAssembler};
use crate::error::Result;
use crate::gate::{Outcome, PasswordGate};
use crate::morse::END_OF_CONTACT;
use crate::playback::Player;
use crate::store::StoreView;

/// Capacity of the decoded-letter log.
pub const LETTER_LOG_CAP: usize = 32;

/// Sampled input levels for one poll, already polarity-corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inputs {
    pub paddle_pressed: bool,
    pub trigger: bool,
}

pub struct Transceiver<'c> {
    config: KeyerConfig,
    counter: &'c DurationCounter,
    decoder: SymbolAssembler,
    gate: PasswordGate,
    player: Player,
    letters: Option<String<LETTER_LOG_CAP>>,
    paddle_pressed: bool,
}

impl<'c> Transceiver<'c> {
    /// Build the loop state.  `config` should already be validated.
    pub fn new(config: KeyerConfig, counter: &'c DurationCounter) -> Self {
        let timing = config.timing();
        let letters = config.echo_letters.then(String::new);
        Self {
            decoder: SymbolAssembler::new(timing),
            gate: PasswordGate::new(),
            player: Player::new(timing),
            letters,
            paddle_pressed: false,
            counter,
            config,
        }
    }

    pub fn start(&mut self, sink: &mut impl EventSink) {
        let t = self.player.timing();
        let unit_ms = t.to_ms(t.dit());
        info!("Transceiver started (unit={}ms, timeout={} ticks)", unit_ms, self.config.receiver_timeout_ticks);
        sink.emit(&AppEvent::Started { unit_ms });
    }

    // ── Per-poll orchestration ────────────────────────────────

    /// Run one pass of the control loop.
    ///
    /// 1. trigger asserted → play the stored message
    /// 2. paddle edge → debounce, read-and-clear the counter, decode
    /// 3. paddle idle past the timeout with input pending → receiver timeout
    pub fn poll<S: ByteStore>(
        &mut self,
        inputs: Inputs,
        hw: &mut (impl KeyOutput + Clock),
        store: &S,
        sink: &mut impl EventSink,
    ) {
        let view = StoreView::new(store, self.config.layout);

        if inputs.trigger {
            self.play(PlaybackKind::Triggered, hw, sink, |p, hw| p.play_stored_message(&view, hw));
        }

        if inputs.paddle_pressed != self.paddle_pressed {
            hw.delay_ms(u32::from(self.config.debounce_ms));
            let elapsed = self.counter.take();
            let decoded = self.decoder.on_transition(self.paddle_pressed, elapsed);
            self.dispatch(decoded, &view, hw, sink);
        }
        self.paddle_pressed = inputs.paddle_pressed;

        if !inputs.paddle_pressed
            && self.counter.peek() > self.config.receiver_timeout_ticks
            && self.buffer_filled()
        {
            self.receiver_timeout(&view, hw, sink);
        }
    }

    /// Flush pending input, echo the letter log and reset the gate.
    pub fn receiver_timeout<S: ByteStore>(
        &mut self,
        view: &StoreView<'_, S>,
        hw: &mut (impl KeyOutput + Clock),
        sink: &mut impl EventSink,
    ) {
        // Resolve whatever is in flight as if the pause had just ended.
        let elapsed = self.counter.peek();
        let decoded = self.decoder.on_transition(false, elapsed);
        self.dispatch(decoded, view, hw, sink);

        let mut echoed = 0;
        if let Some(log) = self.letters.take() {
            echoed = log.len();
            if !log.is_empty() {
                self.play(PlaybackKind::Echo, hw, sink, |p, hw| p.play_string(&log, hw));
            }
            self.letters = Some(String::new());
        }

        self.decoder.flush();
        self.gate.reset();
        self.counter.take();
        info!("Receiver timeout, {} letters echoed", echoed);
        sink.emit(&AppEvent::ReceiverTimeout { echoed });
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &KeyerConfig {
        &self.config
    }

    /// Letters decoded since the last flush (empty when the log is off).
    pub fn letters(&self) -> &str {
        self.letters.as_deref().unwrap_or("")
    }

    pub fn password_progress(&self) -> u8 {
        self.gate.progress()
    }

    /// Whether anything is waiting for a receiver timeout.
    pub fn buffer_filled(&self) -> bool {
        self.decoder.has_pending() || !self.letters().is_empty()
    }

    // ── Internal ──────────────────────────────────────────────

    fn dispatch<S: ByteStore>(
        &mut self,
        decoded: Decoded,
        view: &StoreView<'_, S>,
        hw: &mut (impl KeyOutput + Clock),
        sink: &mut impl EventSink,
    ) {
        if let Some(symbol) = decoded.symbol {
            sink.emit(&AppEvent::Symbol(symbol));
        }
        if let Some(seq) = decoded.dropped {
            sink.emit(&AppEvent::Dropped(seq));
        }
        for c in decoded.chars() {
            self.received_letter(c, view, hw, sink);
        }
    }

    fn received_letter<S: ByteStore>(
        &mut self,
        c: char,
        view: &StoreView<'_, S>,
        hw: &mut (impl KeyOutput + Clock),
        sink: &mut impl EventSink,
    ) {
        sink.emit(&AppEvent::Letter(c));
        if let Some(log) = self.letters.as_mut() {
            if log.push(c).is_err() {
                warn!("letter log full, dropping {:?}", c);
            }
        }

        let outcome = self.gate.submit(c, view);
        if c != ' ' {
            sink.emit(&AppEvent::Gate { c, outcome });
        }
        match outcome {
            Outcome::Accepted => {
                info!("Password accepted");
                self.play(PlaybackKind::Unlocked, hw, sink, |p, hw| p.play_stored_message(view, hw));
            }
            Outcome::Rejected => {
                info!("Password rejected at {:?}", c);
                self.play(PlaybackKind::Refused, hw, sink, |p, hw| p.play_sequence(END_OF_CONTACT, hw));
            }
            Outcome::Pending => {}
        }
    }

    /// Run a playback; failures are reported and swallowed.
    fn play<H, F>(&self, kind: PlaybackKind, hw: &mut H, sink: &mut impl EventSink, f: F)
    where
        H: KeyOutput + Clock,
        F: FnOnce(&Player, &mut H) -> Result<()>,
    {
        sink.emit(&AppEvent::Playback(kind));
        if let Err(e) = f(&self.player, hw) {
            warn!("Playback {:?} failed: {}", kind, e);
            // Leave the line released whatever happened mid-pulse.
            let _ = hw.key_up();
            sink.emit(&AppEvent::PlaybackFailed(e));
        }
    }
}

//! Mock hardware and a paddle bench for integration tests.
//!
//! [`MockKeyer`] records the key line as `(on, ms)` segments so tests can
//! assert on exact pulse timing or read the output back as dot/dash
//! patterns.  [`Bench`] wires a [`Transceiver`] to the mocks and simulates
//! a human on the paddle by ticking the shared counter.

use tinymorse::adapters::memory_store::MemoryStore;
use tinymorse::app::events::AppEvent;
use tinymorse::app::ports::{Clock, EventSink, KeyOutput};
use tinymorse::config::{KeyerConfig, StoreLayout};
use tinymorse::error::{LineError, Result};
use tinymorse::morse::{Symbol, Timing, lookup_char};
use tinymorse::{DurationCounter, Inputs, Transceiver};

// ── MockKeyer ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockKeyer {
    pub on: bool,
    pub segments: Vec<(bool, u32)>,
    pub key_ups: usize,
    pub fail_key_down: bool,
}

#[allow(dead_code)]
impl MockKeyer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments with consecutive same-level waits joined, leading idle
    /// time dropped.
    pub fn merged(&self) -> Vec<(bool, u32)> {
        let mut out: Vec<(bool, u32)> = Vec::new();
        for &(on, ms) in self.segments.iter().skip_while(|(on, _)| !on) {
            match out.last_mut() {
                Some(last) if last.0 == on => last.1 += ms,
                _ => out.push((on, ms)),
            }
        }
        out
    }

    /// Durations of every pulse, in order.
    pub fn pulses(&self) -> Vec<u32> {
        self.merged()
            .into_iter()
            .filter_map(|(on, ms)| on.then_some(ms))
            .collect()
    }

    /// Read the line back as one dot/dash pattern per letter.  Pauses of
    /// at least three units separate letters.
    pub fn keyed_patterns(&self, unit_ms: u32) -> Vec<String> {
        let mut out = Vec::new();
        let mut cur = String::new();
        for (on, ms) in self.merged() {
            if on {
                cur.push(if ms < 2 * unit_ms { '.' } else { '-' });
            } else if ms >= 3 * unit_ms && !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
        }
        if !cur.is_empty() {
            out.push(cur);
        }
        out
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

impl KeyOutput for MockKeyer {
    fn key_down(&mut self) -> Result<()> {
        if self.fail_key_down {
            return Err(LineError::WriteFailed.into());
        }
        self.on = true;
        Ok(())
    }

    fn key_up(&mut self) -> Result<()> {
        self.on = false;
        self.key_ups += 1;
        Ok(())
    }
}

impl Clock for MockKeyer {
    fn delay_ms(&mut self, ms: u32) {
        self.segments.push((self.on, ms));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    /// Decoded characters, in order.
    pub fn text(&self) -> String {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Letter(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Bench ─────────────────────────────────────────────────────

/// A transceiver plus everything it talks to.
pub struct Bench<'c> {
    pub tx: Transceiver<'c>,
    pub counter: &'c DurationCounter,
    pub hw: MockKeyer,
    pub sink: RecordingSink,
    pub store: MemoryStore,
    timing: Timing,
    pressed: bool,
}

#[allow(dead_code)]
impl<'c> Bench<'c> {
    pub fn new(config: KeyerConfig, counter: &'c DurationCounter, store: MemoryStore) -> Self {
        let timing = config.timing();
        let mut sink = RecordingSink::default();
        let mut tx = Transceiver::new(config, counter);
        tx.start(&mut sink);
        Self {
            tx,
            counter,
            hw: MockKeyer::new(),
            sink,
            store,
            timing,
            pressed: false,
        }
    }

    /// Default config with the letter echo off, and a store holding
    /// `password` / `message` in the default layout.
    pub fn quiet(counter: &'c DurationCounter, preamble: bool, password: &str, message: &str) -> Self {
        let config = KeyerConfig {
            echo_letters: false,
            ..KeyerConfig::default()
        };
        let store = MemoryStore::with_parts(preamble, password, message, StoreLayout::default())
            .expect("image fits");
        Self::new(config, counter, store)
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Milliseconds in one Morse unit.
    pub fn unit_ms(&self) -> u32 {
        self.timing.to_ms(self.timing.dit())
    }

    pub fn poll(&mut self, trigger: bool) {
        let inputs = Inputs {
            paddle_pressed: self.pressed,
            trigger,
        };
        self.tx.poll(inputs, &mut self.hw, &self.store, &mut self.sink);
    }

    /// Put the paddle in `pressed` and keep it there for `ticks`.
    pub fn hold(&mut self, pressed: bool, ticks: u16) {
        self.pressed = pressed;
        self.poll(false);
        self.idle(ticks);
    }

    /// Let `ticks` pass without touching the paddle.
    pub fn idle(&mut self, ticks: u16) {
        for _ in 0..ticks {
            self.counter.tick();
            self.poll(false);
        }
    }

    /// Key one dot/dash pattern with canonical timing, then a letter gap.
    pub fn key_pattern(&mut self, pattern: &str) {
        let t = self.timing;
        for (i, ch) in pattern.chars().enumerate() {
            if i > 0 {
                self.hold(false, t.symbol_gap());
            }
            self.hold(true, if ch == '.' { t.dit() } else { t.dah() });
        }
        self.hold(false, t.letter_gap());
    }

    /// Key text with canonical timing; a space stretches the gap to a
    /// word gap.
    pub fn key_text(&mut self, text: &str) {
        let t = self.timing;
        for c in text.chars() {
            if c == ' ' {
                self.idle(t.word_gap() - t.letter_gap());
                continue;
            }
            let seq = lookup_char(c).expect("keyable character");
            let pattern: String = seq
                .iter()
                .map(|s| match s {
                    Symbol::Dit => '.',
                    Symbol::Dah => '-',
                })
                .collect();
            self.key_pattern(&pattern);
        }
    }

    /// Stay idle until just past the receiver timeout.
    pub fn wait_for_timeout(&mut self) {
        let timeout = self.tx.config().receiver_timeout_ticks;
        self.idle(timeout + 1);
    }

    /// One poll with the trigger asserted.
    pub fn pull_trigger(&mut self) {
        self.poll(true);
    }
}

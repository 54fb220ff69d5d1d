//! Playback engine: characters and stored messages → timed pulses.
//!
//! Every call blocks until the last pulse and its trailing pause are done;
//! there is no way to stop a message once started.  The `hw` parameter
//! satisfies both [`KeyOutput`] and [`Clock`] so one adapter owns the line
//! and the delay source.
//!
//! ## Message framing
//!
//! ```text
//!  [START] 2·DAH  c₀ gap c₁ gap … cₙ gap  2·DAH [END]
//! ```
//!
//! The markers and their pauses are only sent when the store's preamble
//! flag is set.

use log::{debug, info};

use crate::app::ports::{ByteStore, Clock, KeyOutput};
use crate::error::Result;
use crate::morse::{lookup_char, Sequence, Symbol, Timing, END_MARKER, START_MARKER};
use crate::store::StoreView;

pub struct Player {
    timing: Timing,
}

impl Player {
    pub fn new(timing: Timing) -> Self {
        Self { timing }
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// One pulse per symbol, each followed by a symbol gap.
    pub fn play_sequence(&self, seq: Sequence, hw: &mut (impl KeyOutput + Clock)) -> Result<()> {
        for symbol in seq.iter() {
            let len = match symbol {
                Symbol::Dit => self.timing.dit(),
                Symbol::Dah => self.timing.dah(),
            };
            self.pulse(len, hw)?;
            self.pause(self.timing.symbol_gap(), hw);
        }
        Ok(())
    }

    /// Space waits one word gap; unknown characters play nothing.
    pub fn play_char(&self, c: char, hw: &mut (impl KeyOutput + Clock)) -> Result<()> {
        if c == ' ' {
            self.pause(self.timing.word_gap(), hw);
            return Ok(());
        }
        match lookup_char(c) {
            Some(seq) => self.play_sequence(seq, hw),
            None => {
                debug!("playback: no code for {:?}, skipped", c);
                Ok(())
            }
        }
    }

    /// Each character followed by a letter gap.
    pub fn play_string(&self, s: &str, hw: &mut (impl KeyOutput + Clock)) -> Result<()> {
        for c in s.chars() {
            self.play_char(c, hw)?;
            self.pause(self.timing.letter_gap(), hw);
        }
        Ok(())
    }

    /// Speak the hidden message, framed when the preamble flag is set.
    pub fn play_stored_message<S: ByteStore>(
        &self,
        store: &StoreView<'_, S>,
        hw: &mut (impl KeyOutput + Clock),
    ) -> Result<()> {
        let preamble = store.preamble_enabled();
        info!("playback: stored message (preamble={})", preamble);

        if preamble {
            self.play_sequence(START_MARKER, hw)?;
            self.pause(self.timing.preamble_pause(), hw);
        }

        for byte in store.message() {
            self.play_char(char::from(byte), hw)?;
            self.pause(self.timing.letter_gap(), hw);
        }

        if preamble {
            self.pause(self.timing.preamble_pause(), hw);
            self.play_sequence(END_MARKER, hw)?;
        }
        Ok(())
    }

    fn pulse(&self, ticks: u16, hw: &mut (impl KeyOutput + Clock)) -> Result<()> {
        hw.key_down()?;
        hw.delay_ms(self.timing.to_ms(ticks));
        hw.key_up()
    }

    fn pause(&self, ticks: u16, hw: &mut impl Clock) {
        hw.delay_ms(self.timing.to_ms(ticks));
    }
}

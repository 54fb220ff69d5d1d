//! Element and gap durations, all derived from one base unit.
//!
//! Every value is expressed in duration-counter ticks so the decoder can
//! compare counter readings directly and the playback engine can convert
//! to milliseconds with [`Timing::to_ms`].
//!
//! | Element        | Length |
//! |----------------|--------|
//! | DIT            | U      |
//! | DAH            | 3U     |
//! | symbol gap     | U      |
//! | letter gap     | 3U     |
//! | word gap       | 7U     |
//! | preamble pause | 2·DAH  |

use super::sequence::Symbol;

/// Classification of a released-paddle interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    /// Pause between symbols of one letter; not a boundary.
    Symbol,
    /// Ends the current letter.
    Letter,
    /// Ends the current letter and the current word.
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    unit: u16,
    tick_period_ms: u16,
}

impl Timing {
    /// `unit_ticks` is the DIT length in counter ticks, `tick_period_ms`
    /// the counter granularity.
    pub const fn new(unit_ticks: u16, tick_period_ms: u16) -> Self {
        Self {
            unit: unit_ticks,
            tick_period_ms,
        }
    }

    pub const fn dit(&self) -> u16 {
        self.unit
    }

    pub const fn dah(&self) -> u16 {
        self.unit * 3
    }

    pub const fn symbol_gap(&self) -> u16 {
        self.unit
    }

    pub const fn letter_gap(&self) -> u16 {
        self.dah()
    }

    pub const fn word_gap(&self) -> u16 {
        self.unit * 7
    }

    /// Pause between the preamble markers and the message body.
    pub const fn preamble_pause(&self) -> u16 {
        self.dah() * 2
    }

    /// Presses shorter than this are DITs; this long or longer are DAHs.
    pub const fn dit_dah_midpoint(&self) -> u16 {
        (self.dit() + self.dah()) / 2
    }

    /// Gaps strictly longer than this end a letter.
    pub const fn letter_threshold(&self) -> u16 {
        (self.symbol_gap() + 2 * self.letter_gap()) / 3
    }

    /// Gaps strictly longer than this end a word.
    pub const fn word_threshold(&self) -> u16 {
        (self.letter_gap() + self.word_gap()) / 2
    }

    pub const fn tick_period_ms(&self) -> u16 {
        self.tick_period_ms
    }

    pub fn classify_press(&self, elapsed: u16) -> Symbol {
        if elapsed < self.dit_dah_midpoint() {
            Symbol::Dit
        } else {
            Symbol::Dah
        }
    }

    pub fn classify_gap(&self, elapsed: u16) -> Gap {
        if elapsed > self.word_threshold() {
            Gap::Word
        } else if elapsed > self.letter_threshold() {
            Gap::Letter
        } else {
            Gap::Symbol
        }
    }

    /// Convert counter ticks to wall-clock milliseconds.
    pub const fn to_ms(&self, ticks: u16) -> u32 {
        ticks as u32 * self.tick_period_ms as u32
    }
}

//! Symbol assembler: paddle timing → symbols → letters.
//!
//! Pure logic, no hardware.  The control loop calls
//! [`SymbolAssembler::on_transition`] once per debounced paddle edge with
//! the ticks that elapsed since the previous edge.
//!
//! ```text
//!   press ended   ── elapsed <  midpoint ──▶ DIT
//!                 ── elapsed >= midpoint ──▶ DAH
//!   release ended ── gap > letter threshold ──▶ resolve letter, clear
//!                 ── gap > word threshold   ──▶ ... and emit ' '
//! ```
//!
//! # Overflow
//!
//! A ninth symbol cannot be stored.  Once the sequence is full any further
//! symbols are rejected and the sequence is marked overflowed; at the next
//! letter boundary it resolves to nothing and is dropped, exactly like an
//! unknown code.

use log::{debug, trace};

use crate::morse::{lookup_sequence, Gap, Sequence, Symbol, Timing};

/// What a single transition produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decoded {
    /// Symbol appended by a press.
    pub symbol: Option<Symbol>,
    /// Letter resolved at a letter boundary.
    pub letter: Option<char>,
    /// A non-empty sequence ended without resolving to a letter.
    pub dropped: Option<Sequence>,
    /// A word boundary followed already-decoded text.
    pub space: bool,
}

impl Decoded {
    /// Characters to hand on, in order.
    pub fn chars(&self) -> impl Iterator<Item = char> {
        self.letter
            .into_iter()
            .chain(self.space.then_some(' '))
    }
}

pub struct SymbolAssembler {
    timing: Timing,
    sequence: Sequence,
    overflowed: bool,
    decoded_since_flush: bool,
}

impl SymbolAssembler {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            sequence: Sequence::EMPTY,
            overflowed: false,
            decoded_since_flush: false,
        }
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Symbols collected for the letter in progress.
    pub fn pending(&self) -> Sequence {
        self.sequence
    }

    pub fn has_pending(&self) -> bool {
        !self.sequence.is_empty()
    }

    /// Whether any letter was produced since the last [`flush`](Self::flush).
    pub fn decoded_since_flush(&self) -> bool {
        self.decoded_since_flush
    }

    /// Handle one paddle edge.
    ///
    /// `pressed_before` is the paddle state that just ended; `elapsed` is
    /// how long it lasted in counter ticks.
    pub fn on_transition(&mut self, pressed_before: bool, elapsed: u16) -> Decoded {
        if pressed_before {
            self.on_press_end(elapsed)
        } else {
            self.on_gap_end(elapsed)
        }
    }

    /// Forget the letter in progress and the word context.
    pub fn flush(&mut self) {
        self.clear_sequence();
        self.decoded_since_flush = false;
    }

    fn on_press_end(&mut self, elapsed: u16) -> Decoded {
        let symbol = self.timing.classify_press(elapsed);
        trace!("decoder: press {} ticks -> {:?}", elapsed, symbol);

        if self.sequence.push(symbol).is_err() {
            if !self.overflowed {
                debug!("decoder: sequence overflow, letter will be dropped");
            }
            self.overflowed = true;
        }

        Decoded {
            symbol: Some(symbol),
            ..Decoded::default()
        }
    }

    fn on_gap_end(&mut self, elapsed: u16) -> Decoded {
        let gap = self.timing.classify_gap(elapsed);
        let mut out = Decoded::default();

        if gap == Gap::Symbol {
            return out;
        }

        if self.has_pending() {
            let resolved = if self.overflowed {
                None
            } else {
                lookup_sequence(self.sequence)
            };
            match resolved {
                Some(c) => {
                    debug!("decoder: {} -> {:?}", self.sequence, c);
                    self.decoded_since_flush = true;
                    out.letter = Some(c);
                }
                None => {
                    debug!("decoder: {} unresolved, dropped", self.sequence);
                    out.dropped = Some(self.sequence);
                }
            }
            self.clear_sequence();
        }

        if gap == Gap::Word && self.decoded_since_flush {
            out.space = true;
        }
        out
    }

    fn clear_sequence(&mut self) {
        self.sequence.clear();
        self.overflowed = false;
    }
}

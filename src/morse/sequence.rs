//! Fixed-capacity symbol sequence.
//!
//! A [`Sequence`] holds up to eight symbols packed into one byte.  Symbols
//! are ordered most-significant used bit first; a set bit is a DIT and a
//! clear bit is a DAH.  Only the low `len` bits carry meaning.
//!
//! ```text
//!   'A'  .-    len=2  code=0b10
//!   'N'  -.    len=2  code=0b01
//!   'S'  ...   len=3  code=0b111
//! ```

use core::fmt;

/// Maximum number of symbols a sequence can hold.
pub const MAX_SYMBOLS: u8 = 8;

/// A single Morse element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Dit,
    Dah,
}

impl Symbol {
    /// Pattern character used in logs and table definitions.
    pub const fn as_char(self) -> char {
        match self {
            Symbol::Dit => '.',
            Symbol::Dah => '-',
        }
    }
}

/// Returned by [`Sequence::push`] when all eight slots are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceFull;

impl fmt::Display for SequenceFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sequence already holds {} symbols", MAX_SYMBOLS)
    }
}

/// Ordered list of at most eight symbols.
///
/// Equality compares length and raw code; unused high bits are not
/// normalised, so two sequences built from different raw codes with the
/// same meaningful bits are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sequence {
    len: u8,
    code: u8,
}

impl Sequence {
    pub const EMPTY: Self = Self { len: 0, code: 0 };

    /// Build from a raw length and bitmask.
    ///
    /// Panics (at compile time in const contexts) if `len` exceeds
    /// [`MAX_SYMBOLS`].
    pub const fn from_raw(len: u8, code: u8) -> Self {
        assert!(len <= MAX_SYMBOLS, "sequence length exceeds 8 symbols");
        Self { len, code }
    }

    /// Build from a dot/dash pattern such as `".-.."`.
    pub const fn from_pattern(pattern: &str) -> Self {
        let bytes = pattern.as_bytes();
        assert!(bytes.len() <= MAX_SYMBOLS as usize, "pattern longer than 8 symbols");
        let mut code = 0u8;
        let mut i = 0;
        while i < bytes.len() {
            code <<= 1;
            match bytes[i] {
                b'.' => code |= 1,
                b'-' => {}
                _ => panic!("pattern may only contain '.' and '-'"),
            }
            i += 1;
        }
        Self {
            len: bytes.len() as u8,
            code,
        }
    }

    /// Append a symbol at the least-significant end.
    pub fn push(&mut self, symbol: Symbol) -> Result<(), SequenceFull> {
        if self.len >= MAX_SYMBOLS {
            return Err(SequenceFull);
        }
        self.code <<= 1;
        if symbol == Symbol::Dit {
            self.code |= 1;
        }
        self.len += 1;
        Ok(())
    }

    pub const fn len(&self) -> u8 {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn is_full(&self) -> bool {
        self.len >= MAX_SYMBOLS
    }

    /// Raw bitmask, including any unused high bits.
    pub const fn code(&self) -> u8 {
        self.code
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// Symbols in transmission order (most significant used bit first).
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        let code = self.code;
        (0..self.len).rev().map(move |bit| {
            if code & (1 << bit) != 0 {
                Symbol::Dit
            } else {
                Symbol::Dah
            }
        })
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.iter() {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

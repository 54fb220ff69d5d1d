//! Password gate.
//!
//! Consumes decoded characters one at a time and compares them against the
//! stored passphrase.  Only the cursor is kept in RAM; expected bytes are
//! read from the store on demand.
//!
//! | Input                  | Outcome  | Cursor          |
//! |------------------------|----------|-----------------|
//! | `' '`                  | Pending  | unchanged       |
//! | match, more to come    | Pending  | +1              |
//! | match, last required   | Accepted | reset to 0      |
//! | mismatch               | Rejected | reset to 0      |
//!
//! "Last required" means the cursor reached `len - 1` or the stored byte at
//! the new cursor is a terminator.

use log::debug;

use crate::app::ports::ByteStore;
use crate::store::{is_password_terminator, StoreView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Default)]
pub struct PasswordGate {
    progress: u8,
}

impl PasswordGate {
    pub const fn new() -> Self {
        Self { progress: 0 }
    }

    /// Number of characters matched so far.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn reset(&mut self) {
        self.progress = 0;
    }

    /// Feed one decoded character.  Comparison ignores ASCII case.
    pub fn submit<S: ByteStore>(&mut self, c: char, store: &StoreView<'_, S>) -> Outcome {
        if c == ' ' {
            return Outcome::Pending;
        }

        let matches = store
            .password_byte(self.progress)
            .is_some_and(|expected| char::from(expected).eq_ignore_ascii_case(&c));

        if !matches {
            debug!("gate: mismatch at {} ({:?})", self.progress, c);
            self.progress = 0;
            return Outcome::Rejected;
        }

        self.progress += 1;
        let complete = self.progress + 1 >= store.password_len()
            || store.password_byte(self.progress).is_none_or(is_password_terminator);
        if complete {
            self.progress = 0;
            Outcome::Accepted
        } else {
            Outcome::Pending
        }
    }
}

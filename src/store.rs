//! Layout-aware view over the persistent byte store.
//!
//! The core never computes addresses itself; it asks this view for the
//! preamble flag, the password byte at a cursor, or the message bytes.
//!
//! ```text
//!  addr  0      1 .. 8          9 ..
//!       [flag] [password ....] [message .... 0xFF]
//! ```

use log::warn;

use crate::app::ports::ByteStore;
use crate::config::StoreLayout;

/// Value of an erased, never-written cell.
pub const UNWRITTEN: u8 = 0xFF;

/// Preamble flag value that enables framed playback.
pub const PREAMBLE_ENABLED: u8 = b'1';

/// Ends the hidden message.
pub fn is_message_terminator(b: u8) -> bool {
    b == UNWRITTEN || b == b'\n'
}

/// Ends a password shorter than its region.
pub fn is_password_terminator(b: u8) -> bool {
    b == UNWRITTEN || b == b' '
}

pub struct StoreView<'a, S: ByteStore> {
    store: &'a S,
    layout: StoreLayout,
}

impl<'a, S: ByteStore> StoreView<'a, S> {
    pub fn new(store: &'a S, layout: StoreLayout) -> Self {
        Self { store, layout }
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Whether playback is framed by start/end markers.  A failed read
    /// counts as disabled.
    pub fn preamble_enabled(&self) -> bool {
        match self.store.read_byte(self.layout.preamble_addr) {
            Ok(b) => b == PREAMBLE_ENABLED,
            Err(e) => {
                warn!("store: preamble flag unreadable ({}), assuming off", e);
                false
            }
        }
    }

    /// Size of the password region.
    pub fn password_len(&self) -> u8 {
        self.layout.password_len
    }

    /// Password byte at `cursor`, or `None` past the region or on a failed
    /// read.
    pub fn password_byte(&self, cursor: u8) -> Option<u8> {
        if cursor >= self.layout.password_len {
            return None;
        }
        let addr = self.layout.password_addr.checked_add(u16::from(cursor))?;
        match self.store.read_byte(addr) {
            Ok(b) => Some(b),
            Err(e) => {
                warn!("store: password byte {} unreadable ({})", cursor, e);
                None
            }
        }
    }

    /// Message bytes up to (not including) the first terminator.
    ///
    /// A failed read or the end of the address space also ends the message.
    pub fn message(&self) -> MessageBytes<'_, S> {
        MessageBytes {
            store: self.store,
            next: Some(self.layout.message_addr),
        }
    }
}

/// Iterator returned by [`StoreView::message`].
pub struct MessageBytes<'a, S: ByteStore> {
    store: &'a S,
    next: Option<u16>,
}

impl<S: ByteStore> Iterator for MessageBytes<'_, S> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let addr = self.next?;
        let byte = match self.store.read_byte(addr) {
            Ok(b) => b,
            Err(e) => {
                warn!("store: message read stopped ({})", e);
                self.next = None;
                return None;
            }
        };
        if is_message_terminator(byte) {
            self.next = None;
            return None;
        }
        self.next = addr.checked_add(1);
        Some(byte)
    }
}

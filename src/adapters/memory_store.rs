//! In-memory store image.
//!
//! Serves the [`ByteStore`] port from a fixed-capacity byte buffer.  On the
//! device the buffer is filled from NVS at boot; on the host tests build it
//! directly with [`MemoryStore::with_parts`].

use heapless::Vec;
use log::debug;

use crate::app::ports::ByteStore;
use crate::config::StoreLayout;
use crate::error::StoreError;
use crate::store::UNWRITTEN;

/// Largest image the store can hold (matches a small EEPROM).
pub const IMAGE_CAPACITY: usize = 512;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    image: Vec<u8, IMAGE_CAPACITY>,
}

impl MemoryStore {
    /// A blank store: every address reads [`UNWRITTEN`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let image = Vec::from_slice(bytes).map_err(|_| StoreError::ImageTooLarge)?;
        Ok(Self { image })
    }

    /// Lay out a complete image.
    ///
    /// The password is space-padded to its region (and cut if longer); the
    /// message is terminated with [`UNWRITTEN`].
    pub fn with_parts(
        preamble: bool,
        password: &str,
        message: &str,
        layout: StoreLayout,
    ) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.write(layout.preamble_addr, if preamble { b'1' } else { b'0' })?;

        let mut pw = password.bytes();
        for i in 0..u16::from(layout.password_len) {
            let b = pw.next().unwrap_or(b' ');
            store.write(layout.password_addr + i, b)?;
        }

        let mut addr = layout.message_addr;
        for b in message.bytes() {
            store.write(addr, b)?;
            addr = addr.checked_add(1).ok_or(StoreError::ImageTooLarge)?;
        }
        store.write(addr, UNWRITTEN)?;

        debug!("memory_store: image built, {} bytes", store.image.len());
        Ok(store)
    }

    /// Write one byte, growing the image with [`UNWRITTEN`] fill as needed.
    pub fn write(&mut self, address: u16, value: u8) -> Result<(), StoreError> {
        let idx = usize::from(address);
        if idx >= IMAGE_CAPACITY {
            return Err(StoreError::ImageTooLarge);
        }
        if idx >= self.image.len() {
            self.image
                .resize(idx + 1, UNWRITTEN)
                .map_err(|_| StoreError::ImageTooLarge)?;
        }
        self.image[idx] = value;
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.image
    }

    pub fn len(&self) -> usize {
        self.image.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }
}

impl ByteStore for MemoryStore {
    fn read_byte(&self, address: u16) -> Result<u8, StoreError> {
        Ok(self
            .image
            .get(usize::from(address))
            .copied()
            .unwrap_or(UNWRITTEN))
    }
}

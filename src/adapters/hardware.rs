//! Hardware adapter bridging an embedded-hal output pin and delay source
//! to the [`KeyOutput`] and [`Clock`] ports.
//!
//! Any HAL that implements `embedded_hal::digital::OutputPin` and
//! `embedded_hal::delay::DelayNs` plugs in here: the ESP-IDF `PinDriver` +
//! `Delay` on the device, simple mocks on the host.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{Clock, KeyOutput};
use crate::error::{LineError, Result};

/// Key line plus blocking delay, exposed through the port traits.
pub struct PinKeyer<P, D> {
    pin: P,
    delay: D,
    active_high: bool,
}

impl<P: OutputPin, D: DelayNs> PinKeyer<P, D> {
    /// Key line driven high while a pulse is active.
    pub fn new(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            active_high: true,
        }
    }

    /// Key line driven low while a pulse is active.
    pub fn active_low(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            active_high: false,
        }
    }

    /// Give the pin and delay back (e.g. to reconfigure them).
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    fn drive(&mut self, active: bool) -> Result<()> {
        let high = active == self.active_high;
        let res = if high { self.pin.set_high() } else { self.pin.set_low() };
        res.map_err(|e| {
            warn!("key line write failed: {:?}", e);
            LineError::WriteFailed.into()
        })
    }
}

impl<P: OutputPin, D: DelayNs> KeyOutput for PinKeyer<P, D> {
    fn key_down(&mut self) -> Result<()> {
        self.drive(true)
    }

    fn key_up(&mut self) -> Result<()> {
        self.drive(false)
    }
}

impl<P: OutputPin, D: DelayNs> Clock for PinKeyer<P, D> {
    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

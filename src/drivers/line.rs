//! Digital input line (paddle, playback trigger).
//!
//! Wraps any embedded-hal [`InputPin`] and folds the wiring polarity in, so
//! the control loop only ever sees "active" / "inactive".  Debouncing is
//! not done here: the control loop waits a settle time after each edge.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::error::{LineError, Result};

pub struct InputLine<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> InputLine<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Sample the line.
    pub fn is_active(&mut self) -> Result<bool> {
        let high = self.pin.is_high().map_err(|e| {
            warn!("input line read failed: {:?}", e);
            LineError::ReadFailed
        })?;
        Ok(high != self.active_low)
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

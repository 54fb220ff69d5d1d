//! Shared duration counter.
//!
//! The periodic tick source is the only writer; the control loop is the
//! only resetter.  Both sides touch the counter through atomics so the
//! tick handler never has to lock:
//!
//! ```text
//!  tick ISR ──tick()──▶ ┌──────────────────┐ ◀──take()── control loop
//!                       │ DurationCounter  │ ◀──peek()──
//!                       └──────────────────┘
//! ```
//!
//! `take()` is a single atomic swap, so a tick that lands between the
//! read and the reset can neither be lost nor counted twice.

use core::sync::atomic::{AtomicU16, Ordering};

pub struct DurationCounter {
    ticks: AtomicU16,
}

impl DurationCounter {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU16::new(0),
        }
    }

    /// Advance by one tick, saturating at `u16::MAX`.
    ///
    /// Safe to call from interrupt or timer-task context.
    #[inline]
    pub fn tick(&self) {
        // `checked_add` returning `None` leaves the value untouched, which
        // is exactly saturation.
        let _ = self
            .ticks
            .fetch_update(Ordering::AcqRel, Ordering::Relaxed, |t| t.checked_add(1));
    }

    /// Current elapsed ticks without resetting.
    #[inline]
    pub fn peek(&self) -> u16 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Read the elapsed ticks and reset to zero in one atomic step.
    #[inline]
    pub fn take(&self) -> u16 {
        self.ticks.swap(0, Ordering::AcqRel)
    }
}

impl Default for DurationCounter {
    fn default() -> Self {
        Self::new()
    }
}

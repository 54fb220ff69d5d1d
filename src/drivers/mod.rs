//! Peripheral drivers: input lines and the tick timer.

pub mod hw_timer;
pub mod line;

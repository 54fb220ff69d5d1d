//! Application core: pure domain logic, zero I/O.
//!
//! The control loop that ties the decoder, password gate and playback
//! engine together.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! real peripherals.

pub mod events;
pub mod ports;
pub mod service;

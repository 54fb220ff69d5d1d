//! Periodic tick source for the duration counter.
//!
//! On ESP32 an `esp_timer` fires every `period_ms` and calls
//! [`DurationCounter::tick`].  The callback runs in the ESP timer task (not
//! an ISR), and the counter is a single atomic, so no locking is involved.
//!
//! On the host nothing is started: tests and simulations tick the counter
//! themselves.

use crate::clock::DurationCounter;
use crate::error::Result;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `&'static DurationCounter` handed to
    // `start_tick_timer`, so it is valid for the life of the program.
    let counter = unsafe { &*(arg as *const DurationCounter) };
    counter.tick();
}

/// Start ticking `counter` every `period_ms`.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer(counter: &'static DurationCounter, period_ms: u16) -> Result<()> {
    use crate::error::Error;

    // SAFETY: TICK_TIMER is written here once at boot from the main task
    // before the callback can fire.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_cb),
            arg: counter as *const DurationCounter as *mut core::ffi::c_void,
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"morse_tick\0".as_ptr() as *const _,
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK {
            log::error!("hw_timer: create failed (rc={})", ret);
            return Err(Error::Init("tick timer create failed"));
        }
        let ret = esp_timer_start_periodic(TICK_TIMER, u64::from(period_ms) * 1000);
        if ret != ESP_OK {
            log::error!("hw_timer: start failed (rc={})", ret);
            return Err(Error::Init("tick timer start failed"));
        }
    }

    info!("hw_timer: tick every {}ms", period_ms);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer(_counter: &'static DurationCounter, period_ms: u16) -> Result<()> {
    log::info!("hw_timer(sim): {}ms tick not started (caller drives the counter)", period_ms);
    Ok(())
}

/// Stop the tick timer if it was started.
#[cfg(target_os = "espidf")]
pub fn stop_tick_timer() {
    // SAFETY: handle is either null or the one created in start_tick_timer.
    unsafe {
        let t = TICK_TIMER;
        if !t.is_null() {
            esp_timer_stop(t);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_tick_timer() {}

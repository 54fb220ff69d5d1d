//! tinymorse firmware main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  PinKeyer          InputLine x2     NvsAdapter           │
//! │  (KeyOutput+Clock) (paddle/trigger) (ConfigPort, image)  │
//! │  MemoryStore       LogEventSink     hw_timer             │
//! │  (ByteStore)       (EventSink)      (DurationCounter)    │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ─────────────────  │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │          Transceiver (pure logic)                  │  │
//! │  │  SymbolAssembler · PasswordGate · Player           │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::{Delay, FreeRtos};
use esp_idf_hal::gpio::{AnyIOPin, PinDriver, Pull};
use log::{info, warn};

use tinymorse::adapters::hardware::PinKeyer;
use tinymorse::adapters::log_sink::LogEventSink;
use tinymorse::adapters::nvs::NvsAdapter;
use tinymorse::app::ports::ConfigPort;
use tinymorse::drivers::hw_timer;
use tinymorse::drivers::line::InputLine;
use tinymorse::{pins, DurationCounter, Inputs, KeyerConfig, Transceiver};

/// Ticked by the esp_timer task, read-and-cleared by the control loop.
static TICKS: DurationCounter = DurationCounter::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  tinymorse v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config + store image from NVS ──────────────────────
    let nvs = NvsAdapter::new().map_err(|e| anyhow::anyhow!("NVS init failed: {}", e))?;
    let config = match nvs.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("NVS config load failed ({}), using defaults", e);
            KeyerConfig::default()
        }
    };
    let store = nvs.load_image()?;

    // ── 3. Pins ───────────────────────────────────────────────
    // SAFETY: each GPIO number is claimed exactly once, here.
    let key_pin = PinDriver::output(unsafe { AnyIOPin::new(pins::KEY_OUTPUT_GPIO) })?;
    let mut paddle_pin = PinDriver::input(unsafe { AnyIOPin::new(pins::PADDLE_GPIO) })?;
    let mut trigger_pin = PinDriver::input(unsafe { AnyIOPin::new(pins::TRIGGER_GPIO) })?;
    if config.paddle_active_low {
        paddle_pin.set_pull(Pull::Up)?;
    }
    if config.trigger_active_low {
        trigger_pin.set_pull(Pull::Up)?;
    }

    let mut keyer = PinKeyer::new(key_pin, Delay::new_default());
    let mut paddle = InputLine::new(paddle_pin, config.paddle_active_low);
    let mut trigger = InputLine::new(trigger_pin, config.trigger_active_low);

    // ── 4. Tick source + control loop ─────────────────────────
    hw_timer::start_tick_timer(&TICKS, config.tick_period_ms)?;

    let mut sink = LogEventSink::new();
    let mut transceiver = Transceiver::new(config, &TICKS);
    transceiver.start(&mut sink);

    loop {
        let inputs = Inputs {
            paddle_pressed: paddle.is_active().unwrap_or_else(|e| {
                warn!("paddle: {}", e);
                false
            }),
            trigger: trigger.is_active().unwrap_or(false),
        };
        transceiver.poll(inputs, &mut keyer, &store, &mut sink);
        FreeRtos::delay_ms(1);
    }
}

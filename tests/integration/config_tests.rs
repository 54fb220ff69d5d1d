//! Integration tests: persisted config and store image → running transceiver.

use crate::mock_hw::Bench;
use tinymorse::adapters::memory_store::MemoryStore;
use tinymorse::adapters::nvs::NvsAdapter;
use tinymorse::app::events::{AppEvent, PlaybackKind};
use tinymorse::app::ports::{ConfigError, ConfigPort};
use tinymorse::config::{KeyerConfig, StoreLayout};
use tinymorse::DurationCounter;

fn custom_config() -> KeyerConfig {
    KeyerConfig {
        unit_ticks: 8,
        echo_letters: false,
        layout: StoreLayout {
            preamble_addr: 0,
            password_addr: 16,
            password_len: 4,
            message_addr: 32,
        },
        ..KeyerConfig::default()
    }
}

#[test]
fn provisioned_device_boots_with_stored_settings() {
    let nvs = NvsAdapter::new().unwrap();
    let config = custom_config();
    nvs.save(&config).unwrap();
    let image = MemoryStore::with_parts(false, "CQ", "TEST", config.layout).unwrap();
    nvs.store_image(&image).unwrap();

    // "Reboot": everything comes back from NVS.
    let config = nvs.load().unwrap();
    let store = nvs.load_image().unwrap();
    assert_eq!(config, custom_config());

    let counter = DurationCounter::new();
    let mut bench = Bench::new(config, &counter, store);
    assert_eq!(bench.unit_ms(), 80);

    bench.key_text("CQ");
    bench.wait_for_timeout();

    assert!(bench.sink.contains(&AppEvent::Playback(PlaybackKind::Unlocked)));
    assert_eq!(bench.hw.keyed_patterns(80), ["-", ".", "...", "-"]);
    assert_eq!(bench.hw.pulses()[0], 3 * 80);
}

#[test]
fn password_region_is_read_through_the_layout() {
    let config = custom_config();
    // Same bytes in the default layout would put the password elsewhere.
    let store = MemoryStore::with_parts(false, "CQ", "E", config.layout).unwrap();
    let default_view = MemoryStore::with_parts(false, "CQ", "E", StoreLayout::default()).unwrap();
    assert_ne!(store, default_view);

    let counter = DurationCounter::new();
    let mut bench = Bench::new(config, &counter, store);
    bench.key_text("CQ");
    bench.wait_for_timeout();
    assert!(bench.sink.contains(&AppEvent::Playback(PlaybackKind::Unlocked)));
}

#[test]
fn invalid_config_is_never_persisted() {
    let nvs = NvsAdapter::new().unwrap();
    let bad = KeyerConfig {
        receiver_timeout_ticks: 10,
        ..KeyerConfig::default()
    };
    assert!(matches!(nvs.save(&bad), Err(ConfigError::ValidationFailed(_))));
    assert_eq!(nvs.load().unwrap(), KeyerConfig::default());
}

#[test]
fn fresh_device_is_silent() {
    let nvs = NvsAdapter::new().unwrap();
    let store = nvs.load_image().unwrap();

    let counter = DurationCounter::new();
    let mut bench = Bench::new(nvs.load().unwrap(), &counter, store);
    bench.pull_trigger();
    bench.key_text("SOS");
    bench.wait_for_timeout();

    // Every letter is refused: an empty password region matches nothing.
    assert!(!bench.sink.contains(&AppEvent::Playback(PlaybackKind::Unlocked)));
    assert!(bench.hw.pulses().iter().all(|&ms| ms == 150 || ms == 450));
}

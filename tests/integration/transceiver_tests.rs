//! Integration tests: paddle → Transceiver → gate → playback on the key line.

use crate::mock_hw::{Bench, MockKeyer};
use tinymorse::adapters::memory_store::MemoryStore;
use tinymorse::app::events::{AppEvent, PlaybackKind};
use tinymorse::config::{KeyerConfig, StoreLayout};
use tinymorse::error::{Error, LineError};
use tinymorse::gate::Outcome;
use tinymorse::morse::Sequence;
use tinymorse::DurationCounter;

/// Expected `(on, ms)` segments for one pattern followed by `trailing`
/// extra milliseconds of silence.
fn keyed(out: &mut Vec<(bool, u32)>, pattern: &str, trailing: u32, u: u32) {
    for (i, c) in pattern.chars().enumerate() {
        if i > 0 {
            out.push((false, u));
        }
        out.push((true, if c == '.' { u } else { 3 * u }));
    }
    out.push((false, u + trailing));
}

fn playback_count(bench: &Bench<'_>, kind: PlaybackKind) -> usize {
    bench.sink.count(|e| *e == AppEvent::Playback(kind))
}

fn timeouts(bench: &Bench<'_>) -> usize {
    bench.sink.count(|e| matches!(e, AppEvent::ReceiverTimeout { .. }))
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_reports_unit() {
    let counter = DurationCounter::new();
    let bench = Bench::quiet(&counter, false, "SOS", "HELLO");
    assert_eq!(bench.sink.events[0], AppEvent::Started { unit_ms: 150 });
    assert!(bench.hw.segments.is_empty());
}

// ── Password gate scenarios ───────────────────────────────────

#[test]
fn correct_password_plays_hidden_message() {
    let counter = DurationCounter::new();
    let mut bench = Bench::quiet(&counter, false, "SOS", "HELLO");

    bench.key_text("SOS");
    bench.wait_for_timeout();

    assert_eq!(
        bench.sink.events.iter().filter_map(|e| match e {
            AppEvent::Gate { c, outcome } => Some((*c, *outcome)),
            _ => None,
        }).collect::<Vec<_>>(),
        [('S', Outcome::Pending), ('O', Outcome::Pending), ('S', Outcome::Accepted)]
    );
    assert_eq!(playback_count(&bench, PlaybackKind::Unlocked), 1);
    assert_eq!(playback_count(&bench, PlaybackKind::Refused), 0);

    let u = bench.unit_ms();
    let mut expected = Vec::new();
    for pattern in ["....", ".", ".-..", ".-..", "---"] {
        keyed(&mut expected, pattern, 3 * u, u);
    }
    assert_eq!(bench.hw.merged(), expected);
    assert!(!bench.hw.is_on());
}

#[test]
fn wrong_third_letter_plays_only_end_of_contact() {
    let counter = DurationCounter::new();
    let mut bench = Bench::quiet(&counter, false, "SOS", "HELLO");

    bench.key_text("SOX");
    bench.wait_for_timeout();

    assert!(bench.sink.contains(&AppEvent::Gate {
        c: 'X',
        outcome: Outcome::Rejected
    }));
    assert_eq!(playback_count(&bench, PlaybackKind::Refused), 1);
    assert_eq!(playback_count(&bench, PlaybackKind::Unlocked), 0);
    assert_eq!(bench.hw.keyed_patterns(bench.unit_ms()), ["...-.-"]);
    assert_eq!(bench.tx.password_progress(), 0);
}

#[test]
fn rejection_restarts_the_password() {
    let counter = DurationCounter::new();
    let mut bench = Bench::quiet(&counter, false, "SOS", "HELLO");

    bench.key_text("XSOS");
    bench.wait_for_timeout();

    assert_eq!(playback_count(&bench, PlaybackKind::Refused), 1);
    assert_eq!(playback_count(&bench, PlaybackKind::Unlocked), 1);
}

#[test]
fn word_spaces_do_not_break_the_password() {
    let counter = DurationCounter::new();
    let mut bench = Bench::quiet(&counter, false, "SOS", "E");

    bench.key_text("S O S");
    bench.wait_for_timeout();

    assert_eq!(bench.sink.text(), "S O S ");
    assert_eq!(playback_count(&bench, PlaybackKind::Unlocked), 1);
    assert_eq!(bench.hw.keyed_patterns(bench.unit_ms()), ["."]);
}

#[test]
fn unterminated_region_accepts_one_short_of_its_length() {
    let counter = DurationCounter::new();
    let mut bench = Bench::quiet(&counter, false, "PARIS123", "OK");

    bench.key_text("PARIS12");
    bench.wait_for_timeout();

    assert!(bench.sink.contains(&AppEvent::Gate {
        c: '2',
        outcome: Outcome::Accepted
    }));
    assert_eq!(playback_count(&bench, PlaybackKind::Unlocked), 1);
    assert_eq!(bench.hw.keyed_patterns(bench.unit_ms()), ["---", "-.-"]);
}

// ── Receiver timeout ──────────────────────────────────────────

#[test]
fn idle_paddle_never_times_out_on_empty_buffer() {
    let counter = DurationCounter::new();
    let mut bench = Bench::quiet(&counter, false, "SOS", "HELLO");

    bench.idle(25);
    assert_eq!(timeouts(&bench), 0);

    bench.idle(1000);
    assert_eq!(timeouts(&bench), 0);
    assert!(bench.hw.segments.is_empty());
}

#[test]
fn pending_unknown_sequence_times_out_once_silently() {
    let counter = DurationCounter::new();
    let mut bench = Bench::quiet(&counter, false, "SOS", "HELLO");

    bench.key_pattern("........");
    assert!(bench.tx.buffer_filled());
    bench.wait_for_timeout();
    bench.idle(1000);

    assert_eq!(timeouts(&bench), 1);
    assert!(bench.sink.contains(&AppEvent::Dropped(Sequence::from_pattern("........"))));
    assert_eq!(bench.sink.text(), "");
    assert!(!bench.tx.buffer_filled());
}

#[test]
fn timeout_resets_password_progress() {
    let counter = DurationCounter::new();
    let mut bench = Bench::quiet(&counter, false, "SOS", "HELLO");

    bench.key_text("SO");
    bench.wait_for_timeout();
    assert_eq!(bench.tx.password_progress(), 0);

    bench.key_text("S");
    bench.wait_for_timeout();
    assert_eq!(playback_count(&bench, PlaybackKind::Unlocked), 0);
    assert_eq!(timeouts(&bench), 2);
}

#[test]
fn timeout_echoes_letter_log() {
    let counter = DurationCounter::new();
    let config = KeyerConfig::default();
    let store = MemoryStore::with_parts(false, "HI", "E", StoreLayout::default()).unwrap();
    let mut bench = Bench::new(config, &counter, store);

    bench.key_text("HI");
    assert_eq!(bench.tx.letters(), "H");
    bench.wait_for_timeout();

    let kinds: Vec<_> = bench
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Playback(k) => Some(*k),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, [PlaybackKind::Unlocked, PlaybackKind::Echo]);
    assert!(bench.sink.contains(&AppEvent::ReceiverTimeout { echoed: 3 }));
    assert_eq!(bench.hw.keyed_patterns(bench.unit_ms()), [".", "....", ".."]);
    assert_eq!(bench.tx.letters(), "");
}

// ── Trigger + preamble ────────────────────────────────────────

#[test]
fn trigger_plays_message_without_password() {
    let counter = DurationCounter::new();
    let mut bench = Bench::quiet(&counter, false, "SOS", "HELLO");

    bench.pull_trigger();

    assert_eq!(playback_count(&bench, PlaybackKind::Triggered), 1);
    assert_eq!(
        bench.hw.keyed_patterns(bench.unit_ms()),
        ["....", ".", ".-..", ".-..", "---"]
    );
}

#[test]
fn preamble_frames_the_message() {
    let counter = DurationCounter::new();
    let mut bench = Bench::quiet(&counter, true, "SOS", "HI");

    bench.pull_trigger();

    let u = bench.unit_ms();
    let pause = 2 * 3 * u;
    let mut expected = Vec::new();
    keyed(&mut expected, ".-.-.", pause, u);
    keyed(&mut expected, "....", 3 * u, u);
    keyed(&mut expected, "..", 3 * u + pause, u);
    keyed(&mut expected, "-.-.-", 0, u);
    assert_eq!(bench.hw.merged(), expected);
}

#[test]
fn blank_store_plays_nothing() {
    let counter = DurationCounter::new();
    let mut bench = Bench::new(KeyerConfig::default(), &counter, MemoryStore::new());

    bench.pull_trigger();

    assert_eq!(playback_count(&bench, PlaybackKind::Triggered), 1);
    assert!(bench.hw.pulses().is_empty());
}

// ── Failure handling ──────────────────────────────────────────

#[test]
fn output_failure_is_reported_and_loop_continues() {
    let counter = DurationCounter::new();
    let mut bench = Bench::quiet(&counter, false, "SOS", "HELLO");
    bench.hw = MockKeyer {
        fail_key_down: true,
        ..MockKeyer::default()
    };

    bench.pull_trigger();
    assert!(bench.sink.contains(&AppEvent::PlaybackFailed(Error::Line(
        LineError::WriteFailed
    ))));
    assert!(!bench.hw.is_on());
    assert!(bench.hw.key_ups >= 1);

    bench.key_text("E");
    bench.wait_for_timeout();
    assert_eq!(bench.sink.text(), "E ");
}

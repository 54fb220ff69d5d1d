//! Fuzz target: stored-message playback over an arbitrary image
//!
//! Any byte image, however garbled, must play to completion: the message
//! stops at a terminator or the end of the image, the line is left
//! released, and the password gate never panics on odd bytes.
//!
//! cargo fuzz run fuzz_store_image

#![no_main]

use libfuzzer_sys::fuzz_target;
use tinymorse::adapters::memory_store::MemoryStore;
use tinymorse::app::ports::{Clock, KeyOutput};
use tinymorse::config::StoreLayout;
use tinymorse::gate::PasswordGate;
use tinymorse::morse::Timing;
use tinymorse::playback::Player;
use tinymorse::store::StoreView;

struct Line {
    on: bool,
}

impl KeyOutput for Line {
    fn key_down(&mut self) -> tinymorse::Result<()> {
        self.on = true;
        Ok(())
    }

    fn key_up(&mut self) -> tinymorse::Result<()> {
        self.on = false;
        Ok(())
    }
}

impl Clock for Line {
    fn delay_ms(&mut self, _ms: u32) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(store) = MemoryStore::from_bytes(data) else {
        return;
    };
    let view = StoreView::new(&store, StoreLayout::default());

    let mut line = Line { on: false };
    Player::new(Timing::new(1, 1))
        .play_stored_message(&view, &mut line)
        .unwrap();
    assert!(!line.on);

    let mut gate = PasswordGate::new();
    for &b in data.iter().take(16) {
        let _ = gate.submit(char::from(b), &view);
        assert!(gate.progress() < view.password_len());
    }
});

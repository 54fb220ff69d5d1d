//! Fuzz target: `SymbolAssembler::on_transition`
//!
//! Treats the input as a stream of paddle edges (one level byte plus a
//! little-endian tick count each) and checks that the assembler never
//! panics, never holds more than eight symbols, and only ever yields
//! characters from the code table or a word space.
//!
//! cargo fuzz run fuzz_paddle_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use tinymorse::decoder::SymbolAssembler;
use tinymorse::morse::{lookup_char, Timing, MAX_SYMBOLS};

fuzz_target!(|data: &[u8]| {
    let Some((&unit, rest)) = data.split_first() else {
        return;
    };
    let timing = Timing::new(u16::from(unit.max(1)), 10);
    let mut dec = SymbolAssembler::new(timing);

    for edge in rest.chunks_exact(3) {
        let pressed = edge[0] & 1 == 1;
        let elapsed = u16::from_le_bytes([edge[1], edge[2]]);
        let out = dec.on_transition(pressed, elapsed);

        assert!(dec.pending().len() <= MAX_SYMBOLS);
        for c in out.chars() {
            assert!(c == ' ' || lookup_char(c).is_some(), "decoded {c:?} is not in the table");
        }
    }

    dec.flush();
    assert!(!dec.has_pending());
});

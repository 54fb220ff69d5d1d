//! Morse primitives shared by the decoder and the playback engine.

pub mod sequence;
pub mod table;
pub mod timing;

pub use sequence::{Sequence, SequenceFull, Symbol, MAX_SYMBOLS};
pub use table::{lookup_char, lookup_sequence, END_MARKER, END_OF_CONTACT, START_MARKER};
pub use timing::{Gap, Timing};

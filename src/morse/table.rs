//! Static character ↔ sequence table and framing markers.
//!
//! Both lookups scan the table in order and return the first match.  The
//! table holds no duplicate sequences, so sequence lookup is unambiguous.

use super::sequence::Sequence;

/// Sent before a framed message.
pub const START_MARKER: Sequence = Sequence::from_raw(5, 0b10101);
/// Sent after a framed message.
pub const END_MARKER: Sequence = Sequence::from_raw(5, 0b01010);
/// End of communication; answers a wrong password.
pub const END_OF_CONTACT: Sequence = Sequence::from_raw(6, 0b111010);

const fn entry(c: char, pattern: &str) -> (char, Sequence) {
    (c, Sequence::from_pattern(pattern))
}

/// ITU Morse for the supported symbols.
pub static CODE_TABLE: [(char, Sequence); 54] = [
    entry('A', ".-"),
    entry('B', "-..."),
    entry('C', "-.-."),
    entry('D', "-.."),
    entry('E', "."),
    entry('F', "..-."),
    entry('G', "--."),
    entry('H', "...."),
    entry('I', ".."),
    entry('J', ".---"),
    entry('K', "-.-"),
    entry('L', ".-.."),
    entry('M', "--"),
    entry('N', "-."),
    entry('O', "---"),
    entry('P', ".--."),
    entry('Q', "--.-"),
    entry('R', ".-."),
    entry('S', "..."),
    entry('T', "-"),
    entry('U', "..-"),
    entry('V', "...-"),
    entry('W', ".--"),
    entry('X', "-..-"),
    entry('Y', "-.--"),
    entry('Z', "--.."),
    entry('0', "-----"),
    entry('1', ".----"),
    entry('2', "..---"),
    entry('3', "...--"),
    entry('4', "....-"),
    entry('5', "....."),
    entry('6', "-...."),
    entry('7', "--..."),
    entry('8', "---.."),
    entry('9', "----."),
    entry('!', "-.-.--"),
    entry('"', ".-..-."),
    entry('$', "...-..-"),
    entry('&', ".-..."),
    entry('\'', ".----."),
    entry('(', "-.--."),
    entry(')', "-.--.-"),
    entry('+', ".-.-."),
    entry(',', "--..--"),
    entry('-', "-....-"),
    entry('.', ".-.-.-"),
    entry('/', "-..-."),
    entry(':', "---..."),
    entry(';', "-.-.-."),
    entry('=', "-...-"),
    entry('?', "..--.."),
    entry('@', ".--.-."),
    entry('_', "..--.-"),
];

/// Sequence for `c`, folding ASCII lowercase onto uppercase.
pub fn lookup_char(c: char) -> Option<Sequence> {
    let c = c.to_ascii_uppercase();
    CODE_TABLE
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, seq)| *seq)
}

/// Character for `seq`; empty sequences never match.
pub fn lookup_sequence(seq: Sequence) -> Option<char> {
    if seq.is_empty() {
        return None;
    }
    CODE_TABLE
        .iter()
        .find(|(_, s)| *s == seq)
        .map(|(ch, _)| *ch)
}

//! Fixed character to dot/dash table.
//!
//! Both lookup directions are built once from [`ALPHABET`] and never mutated.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::SymbolGroup;

/// International Morse table plus the punctuation needed for base64 payloads.
pub const ALPHABET: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('\'', ".----."),
    ('!', "-.-.--"),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    (';', "-.-.-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('_', "..--.-"),
    ('"', ".-..-."),
    ('$', "...-..-"),
    ('@', ".--.-."),
    ('|', "...-.-"),
];

static ENCODE_TABLE: OnceLock<HashMap<char, SymbolGroup>> = OnceLock::new();
static DECODE_TABLE: OnceLock<HashMap<&'static str, char>> = OnceLock::new();

fn encode_table() -> &'static HashMap<char, SymbolGroup> {
    ENCODE_TABLE.get_or_init(|| {
        ALPHABET
            .iter()
            .map(|&(ch, code)| {
                let group = SymbolGroup::parse(code).expect("alphabet entries are valid groups");
                (ch, group)
            })
            .collect()
    })
}

fn decode_table() -> &'static HashMap<&'static str, char> {
    DECODE_TABLE.get_or_init(|| ALPHABET.iter().map(|&(ch, code)| (code, ch)).collect())
}

/// Looks up the group for a character, folding ASCII case.
pub fn group_for(ch: char) -> Option<&'static SymbolGroup> {
    encode_table().get(&ch.to_ascii_uppercase())
}

/// Looks up the character for a group in dot/dash form.
pub fn char_for(code: &str) -> Option<char> {
    decode_table().get(code).copied()
}

/// Returns every encodable character (whitespace excluded), in table order.
pub fn supported_characters() -> Vec<char> {
    ALPHABET.iter().map(|&(ch, _)| ch).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_bijective() {
        assert_eq!(encode_table().len(), ALPHABET.len());
        assert_eq!(decode_table().len(), ALPHABET.len());

        for &(ch, code) in ALPHABET {
            assert_eq!(char_for(code), Some(ch));
            assert_eq!(group_for(ch).map(|g| g.to_string()), Some(code.to_string()));
        }
    }

    #[test]
    fn test_lowercase_folds() {
        assert_eq!(group_for('q'), group_for('Q'));
        assert!(group_for('\u{e9}').is_none());
    }

    #[test]
    fn test_base64_alphabet_covered() {
        let base64 = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";
        for ch in base64.chars() {
            assert!(group_for(ch).is_some(), "missing {ch}");
        }
    }
}

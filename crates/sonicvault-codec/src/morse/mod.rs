//! Symbol codec: text to dot/dash groups and back.
//!
//! Each supported character maps to exactly one non-empty [`SymbolGroup`].
//! Adjacent groups inside a word are separated by an implicit character
//! boundary; every whitespace character becomes one explicit
//! [`SymbolToken::WordBreak`].
//!
//! The transportable text form joins groups with `/` and writes each word
//! break as `//`, so `"SOS"` becomes `.../---/...` and `"A B"` becomes
//! `.-//-...`.

mod alphabet;


use std::fmt;
use std::str::FromStr;

use crate::error::{CodecError, CodecResult};

pub use alphabet::{supported_characters, ALPHABET};

/// One Morse element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Short element.
    Dot,
    /// Long element.
    Dash,
}

impl Symbol {
    /// Returns the text form (`.` or `-`).
    pub fn as_char(self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Symbol::Dot),
            '-' => Some(Symbol::Dash),
            _ => None,
        }
    }
}

/// The dot/dash sequence for one character. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolGroup(Vec<Symbol>);

impl SymbolGroup {
    /// Creates a group from symbols, rejecting an empty list.
    pub fn new(symbols: Vec<Symbol>) -> Option<Self> {
        if symbols.is_empty() {
            None
        } else {
            Some(Self(symbols))
        }
    }

    /// Parses dot/dash text such as `"-.-."`.
    pub fn parse(code: &str) -> Option<Self> {
        let symbols = code
            .chars()
            .map(Symbol::from_char)
            .collect::<Option<Vec<_>>>()?;
        Self::new(symbols)
    }

    /// Returns the symbols of this group.
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Returns the number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; groups are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SymbolGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

/// One token of a symbol sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolToken {
    /// The group for one character.
    Group(SymbolGroup),
    /// Inter-word boundary.
    WordBreak,
}

/// Ordered symbol groups and word breaks for one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSequence {
    tokens: Vec<SymbolToken>,
}

impl SymbolSequence {
    /// Creates a sequence from tokens.
    pub fn new(tokens: Vec<SymbolToken>) -> Self {
        Self { tokens }
    }

    /// Returns the tokens.
    pub fn tokens(&self) -> &[SymbolToken] {
        &self.tokens
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the sequence has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the number of symbol groups (characters).
    pub fn group_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| matches!(t, SymbolToken::Group(_)))
            .count()
    }
}

impl fmt::Display for SymbolSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prev_was_group = false;
        for token in &self.tokens {
            match token {
                SymbolToken::Group(group) => {
                    if prev_was_group {
                        f.write_str("/")?;
                    }
                    write!(f, "{group}")?;
                    prev_was_group = true;
                }
                SymbolToken::WordBreak => {
                    f.write_str("//")?;
                    prev_was_group = false;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for SymbolSequence {
    type Err = CodecError;

    /// Parses the `/` and `//` text form.
    ///
    /// A single `/` is only valid between two groups; any other slash run
    /// must have even length and becomes one word break per `//`.
    fn from_str(s: &str) -> CodecResult<Self> {
        let chars: Vec<char> = s.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '.' | '-' => {
                    let start = i;
                    while i < chars.len() && matches!(chars[i], '.' | '-') {
                        i += 1;
                    }
                    let code: String = chars[start..i].iter().collect();
                    let group = SymbolGroup::parse(&code)
                        .ok_or_else(|| CodecError::malformed(start, "empty symbol group"))?;
                    tokens.push(SymbolToken::Group(group));
                }
                '/' => {
                    let start = i;
                    while i < chars.len() && chars[i] == '/' {
                        i += 1;
                    }
                    let run = i - start;
                    let between_groups = start > 0 && i < chars.len();
                    if run == 1 {
                        if !between_groups {
                            return Err(CodecError::malformed(
                                start,
                                "character boundary must sit between two groups",
                            ));
                        }
                    } else if run % 2 == 0 {
                        tokens.extend(std::iter::repeat(SymbolToken::WordBreak).take(run / 2));
                    } else {
                        return Err(CodecError::malformed(
                            start,
                            format!("ambiguous separator run of {run} slashes"),
                        ));
                    }
                }
                other => {
                    return Err(CodecError::malformed(
                        i,
                        format!("unexpected character {other:?}"),
                    ));
                }
            }
        }

        Ok(Self { tokens })
    }
}

/// Encodes text into a symbol sequence.
///
/// Letters are case-folded. Each whitespace character becomes one word
/// break. The whole input is rejected on the first character without a
/// table entry.
pub fn encode(text: &str) -> CodecResult<SymbolSequence> {
    let mut tokens = Vec::with_capacity(text.len());

    for (position, character) in text.chars().enumerate() {
        if character.is_whitespace() {
            tokens.push(SymbolToken::WordBreak);
            continue;
        }
        let group = alphabet::group_for(character).ok_or(CodecError::UnsupportedCharacter {
            character,
            position,
        })?;
        tokens.push(SymbolToken::Group(group.clone()));
    }

    tracing::debug!(
        chars = text.chars().count(),
        tokens = tokens.len(),
        "encoded text to symbols"
    );
    Ok(SymbolSequence { tokens })
}

/// Decodes a symbol sequence into uppercase text.
///
/// Each word break becomes a single space. Input casing is not recoverable.
pub fn decode(sequence: &SymbolSequence) -> CodecResult<String> {
    let mut text = String::with_capacity(sequence.len());

    for (position, token) in sequence.tokens.iter().enumerate() {
        match token {
            SymbolToken::Group(group) => {
                let code = group.to_string();
                let ch = alphabet::char_for(&code).ok_or(CodecError::UnrecognizedSymbolGroup {
                    group: code,
                    position,
                })?;
                text.push(ch);
            }
            SymbolToken::WordBreak => text.push(' '),
        }
    }

    Ok(text)
}

/// Returns true if every character of `text` can be encoded.
pub fn validate_text(text: &str) -> bool {
    text.chars()
        .all(|ch| ch.is_whitespace() || alphabet::group_for(ch).is_some())
}

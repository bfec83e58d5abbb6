//! Binary pulse streams with in-line separator markers.

use std::fmt;
use std::str::FromStr;

use crate::error::{CodecError, CodecResult};
use crate::morse::{Symbol, SymbolGroup, SymbolSequence, SymbolToken};

/// Off-units between characters.
pub const CHAR_GAP_UNITS: u32 = 3;
/// Off-units between words.
pub const WORD_GAP_UNITS: u32 = 7;
/// On-units in a dash.
pub const DASH_UNITS: u32 = 3;

/// One pulse token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pulse {
    /// One tone-on unit (`1`).
    On,
    /// One tone-off unit between symbols of a character (`0`).
    Off,
    /// Character boundary (`/`), a 3-unit off-run.
    CharSep,
    /// Word boundary (`//`), a 7-unit off-run.
    WordSep,
}

impl Pulse {
    /// Returns true for the tone-on token.
    pub fn is_on(self) -> bool {
        self == Pulse::On
    }

    fn as_str(self) -> &'static str {
        match self {
            Pulse::On => "1",
            Pulse::Off => "0",
            Pulse::CharSep => "/",
            Pulse::WordSep => "//",
        }
    }
}

/// A maximal run of identical pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PulseRun {
    pub pulse: Pulse,
    pub len: usize,
    pub start: usize,
}

pub(crate) fn runs(pulses: &[Pulse]) -> Vec<PulseRun> {
    let mut out: Vec<PulseRun> = Vec::new();
    for (i, &pulse) in pulses.iter().enumerate() {
        match out.last_mut() {
            Some(run) if run.pulse == pulse => run.len += 1,
            _ => out.push(PulseRun {
                pulse,
                len: 1,
                start: i,
            }),
        }
    }
    out
}

/// A validated sequence of pulses.
///
/// Grammar enforced on construction:
/// - on-runs are 1 (dot) or 3 (dash) units long
/// - `Off` and `CharSep` each appear singly, between two on-runs
/// - `WordSep` runs may have any length and may lead or trail
///
/// Under this grammar the `/`/`//` text form parses back to the identical
/// token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PulseStream {
    pulses: Vec<Pulse>,
}

impl PulseStream {
    /// Creates a stream, validating the framing grammar.
    pub fn new(pulses: Vec<Pulse>) -> CodecResult<Self> {
        let runs = runs(&pulses);
        for (i, run) in runs.iter().enumerate() {
            let prev_on = i > 0 && runs[i - 1].pulse.is_on();
            let next_on = runs.get(i + 1).is_some_and(|r| r.pulse.is_on());
            match run.pulse {
                Pulse::On => {
                    if run.len != 1 && run.len != DASH_UNITS as usize {
                        return Err(CodecError::malformed(
                            run.start,
                            format!("tone run of {} units is neither dot nor dash", run.len),
                        ));
                    }
                }
                Pulse::Off | Pulse::CharSep => {
                    if run.len != 1 || !prev_on || !next_on {
                        return Err(CodecError::malformed(
                            run.start,
                            format!("'{}' must sit alone between two tones", run.pulse.as_str()),
                        ));
                    }
                }
                Pulse::WordSep => {}
            }
        }
        Ok(Self { pulses })
    }

    /// Returns the pulses.
    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    /// Returns true if the stream has no tokens.
    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }
}

impl fmt::Display for PulseStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pulse in &self.pulses {
            f.write_str(pulse.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for PulseStream {
    type Err = CodecError;

    /// Parses `1`, `0`, `/` and `//` tokens, reading `//` greedily.
    fn from_str(s: &str) -> CodecResult<Self> {
        let bytes = s.as_bytes();
        let mut pulses = Vec::with_capacity(bytes.len());
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'1' => pulses.push(Pulse::On),
                b'0' => pulses.push(Pulse::Off),
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    pulses.push(Pulse::WordSep);
                    i += 1;
                }
                b'/' => pulses.push(Pulse::CharSep),
                _ => {
                    let ch = s[i..].chars().next().unwrap_or('?');
                    return Err(CodecError::malformed(
                        i,
                        format!("unexpected character {ch:?}"),
                    ));
                }
            }
            i += 1;
        }

        Self::new(pulses)
    }
}

/// Converts symbols to pulses.
///
/// A dot is one on-unit, a dash three. Symbols of a character are joined by
/// one `Off`, adjacent characters by `CharSep`, and each word break is a
/// `WordSep`.
pub fn symbols_to_binary(sequence: &SymbolSequence) -> PulseStream {
    let mut pulses = Vec::new();
    let mut prev_was_group = false;

    for token in sequence.tokens() {
        match token {
            SymbolToken::Group(group) => {
                if prev_was_group {
                    pulses.push(Pulse::CharSep);
                }
                for (i, symbol) in group.symbols().iter().enumerate() {
                    if i > 0 {
                        pulses.push(Pulse::Off);
                    }
                    let on_units = match symbol {
                        Symbol::Dot => 1,
                        Symbol::Dash => DASH_UNITS as usize,
                    };
                    pulses.extend(std::iter::repeat(Pulse::On).take(on_units));
                }
                prev_was_group = true;
            }
            SymbolToken::WordBreak => {
                pulses.push(Pulse::WordSep);
                prev_was_group = false;
            }
        }
    }

    tracing::debug!(pulses = pulses.len(), "framed symbols as pulses");
    PulseStream { pulses }
}

/// Converts pulses back to symbols by run-length analysis.
pub fn binary_to_symbols(stream: &PulseStream) -> SymbolSequence {
    let mut tokens = Vec::new();
    let mut current: Vec<Symbol> = Vec::new();

    fn flush(current: &mut Vec<Symbol>, tokens: &mut Vec<SymbolToken>) {
        if let Some(group) = SymbolGroup::new(std::mem::take(current)) {
            tokens.push(SymbolToken::Group(group));
        }
    }

    for run in runs(stream.pulses()) {
        match run.pulse {
            Pulse::On => current.push(if run.len == 1 {
                Symbol::Dot
            } else {
                Symbol::Dash
            }),
            Pulse::Off => {}
            Pulse::CharSep => flush(&mut current, &mut tokens),
            Pulse::WordSep => {
                flush(&mut current, &mut tokens);
                tokens.extend(std::iter::repeat(SymbolToken::WordBreak).take(run.len));
            }
        }
    }
    flush(&mut current, &mut tokens);

    SymbolSequence::new(tokens)
}

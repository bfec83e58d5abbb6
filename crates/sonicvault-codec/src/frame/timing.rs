//! Timing model: pulse runs to durations in seconds and back.

use serde::{Deserialize, Serialize};

use crate::config::TimingConfig;
use crate::error::{CodecError, CodecResult};

use super::pulse::{runs, Pulse, PulseStream, CHAR_GAP_UNITS, DASH_UNITS, WORD_GAP_UNITS};

/// Whether a unit carries tone or silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keying {
    /// Tone present.
    Tone,
    /// No tone.
    Silence,
}

/// Atomic timing unit categories and their length in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// 1 unit of tone.
    Dot,
    /// 3 units of tone.
    Dash,
    /// 1 unit of silence between symbols of a character.
    SymbolGap,
    /// 3 units of silence between characters.
    CharGap,
    /// 7 units of silence between words.
    WordGap,
}

impl UnitKind {
    /// All kinds, shortest first within each keying.
    pub const ALL: [UnitKind; 5] = [
        UnitKind::Dot,
        UnitKind::Dash,
        UnitKind::SymbolGap,
        UnitKind::CharGap,
        UnitKind::WordGap,
    ];

    /// Returns the length in base units.
    pub fn units(self) -> u32 {
        match self {
            UnitKind::Dot | UnitKind::SymbolGap => 1,
            UnitKind::Dash => DASH_UNITS,
            UnitKind::CharGap => CHAR_GAP_UNITS,
            UnitKind::WordGap => WORD_GAP_UNITS,
        }
    }

    /// Returns whether this unit is tone or silence.
    pub fn keying(self) -> Keying {
        match self {
            UnitKind::Dot | UnitKind::Dash => Keying::Tone,
            _ => Keying::Silence,
        }
    }
}

/// One timed unit: tone or silence lasting `seconds`.
///
/// Units produced from a pulse stream carry their category. Units measured
/// from audio only know their keying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedUnit {
    /// Tone or silence.
    pub keying: Keying,
    /// Length in seconds.
    pub seconds: f64,
    /// Category, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<UnitKind>,
}

impl TimedUnit {
    /// Creates an uncategorized tone unit.
    pub fn tone(seconds: f64) -> Self {
        Self {
            keying: Keying::Tone,
            seconds,
            kind: None,
        }
    }

    /// Creates an uncategorized silence unit.
    pub fn silence(seconds: f64) -> Self {
        Self {
            keying: Keying::Silence,
            seconds,
            kind: None,
        }
    }

    /// Creates a unit of a known category.
    pub fn of_kind(kind: UnitKind, seconds: f64) -> Self {
        Self {
            keying: kind.keying(),
            seconds,
            kind: Some(kind),
        }
    }

    /// Returns the category, treating uncategorized tones as dots and
    /// uncategorized silences as symbol gaps.
    pub fn category(&self) -> UnitKind {
        self.kind.unwrap_or(match self.keying {
            Keying::Tone => UnitKind::Dot,
            Keying::Silence => UnitKind::SymbolGap,
        })
    }
}

/// Ordered timed units for one message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationSequence {
    units: Vec<TimedUnit>,
}

impl DurationSequence {
    /// Creates a sequence from units.
    pub fn new(units: Vec<TimedUnit>) -> Self {
        Self { units }
    }

    /// Returns the units.
    pub fn units(&self) -> &[TimedUnit] {
        &self.units
    }

    /// Returns the number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if there are no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns the summed length in seconds.
    pub fn total_seconds(&self) -> f64 {
        self.units.iter().map(|u| u.seconds).sum()
    }
}

/// Converts between pulse streams and durations for one base unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingModel {
    base_unit: f64,
    tolerance: f64,
}

impl TimingModel {
    /// Default classification tolerance, in base units.
    pub const DEFAULT_TOLERANCE: f64 = 0.25;

    /// Creates a model with the default tolerance.
    pub fn new(base_unit: f64) -> CodecResult<Self> {
        Self::with_tolerance(base_unit, Self::DEFAULT_TOLERANCE)
    }

    /// Creates a model with an explicit tolerance in base units.
    ///
    /// The tolerance must be below 0.5 so that neighbouring multiples never
    /// overlap.
    pub fn with_tolerance(base_unit: f64, tolerance: f64) -> CodecResult<Self> {
        if !base_unit.is_finite() || base_unit <= 0.0 {
            return Err(CodecError::invalid_config(
                "base_unit_seconds",
                format!("must be a positive number of seconds, got {base_unit}"),
            ));
        }
        if !(tolerance > 0.0 && tolerance < 0.5) {
            return Err(CodecError::invalid_config(
                "tolerance_units",
                format!("must be in (0, 0.5), got {tolerance}"),
            ));
        }
        Ok(Self {
            base_unit,
            tolerance,
        })
    }

    /// Creates a model from timing configuration.
    pub fn from_config(config: &TimingConfig) -> CodecResult<Self> {
        Self::with_tolerance(config.base_unit_seconds, config.tolerance_units)
    }

    /// Returns the base unit in seconds.
    pub fn base_unit(&self) -> f64 {
        self.base_unit
    }

    /// Returns the tolerance in base units.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the duration of a unit kind in seconds.
    pub fn seconds_for(&self, kind: UnitKind) -> f64 {
        kind.units() as f64 * self.base_unit
    }

    fn timed(&self, kind: UnitKind) -> TimedUnit {
        TimedUnit::of_kind(kind, self.seconds_for(kind))
    }

    /// Converts each pulse run into one categorized timed unit.
    ///
    /// Consecutive word separators each produce their own 7-unit silence.
    pub fn binary_to_durations(&self, stream: &PulseStream) -> DurationSequence {
        let mut units = Vec::new();

        for run in runs(stream.pulses()) {
            match run.pulse {
                Pulse::On => {
                    let kind = if run.len == DASH_UNITS as usize {
                        UnitKind::Dash
                    } else {
                        UnitKind::Dot
                    };
                    units.push(self.timed(kind));
                }
                Pulse::Off => units.push(self.timed(UnitKind::SymbolGap)),
                Pulse::CharSep => units.push(self.timed(UnitKind::CharGap)),
                Pulse::WordSep => {
                    units.extend(std::iter::repeat(self.timed(UnitKind::WordGap)).take(run.len));
                }
            }
        }

        tracing::debug!(
            units = units.len(),
            base_unit = self.base_unit,
            "converted pulses to durations"
        );
        DurationSequence { units }
    }

    /// Classifies each duration into its nearest unit-count bucket.
    ///
    /// Tones match 1 or 3 units. Silences match 1, 3 or any positive multiple
    /// of 7 units; a multiple of 7 expands into that many word separators, so
    /// word gaps that merged into one silence in audio still decode.
    pub fn durations_to_binary(&self, durations: &DurationSequence) -> CodecResult<PulseStream> {
        let mut pulses = Vec::new();

        for (index, unit) in durations.units().iter().enumerate() {
            let ratio = unit.seconds / self.base_unit;
            let out_of_tolerance = || CodecError::TimingOutOfTolerance {
                index,
                seconds: unit.seconds,
                units: ratio,
            };
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(out_of_tolerance());
            }

            match unit.keying {
                Keying::Tone => {
                    let units = self
                        .nearest(ratio, &[1, DASH_UNITS])
                        .ok_or_else(out_of_tolerance)?;
                    pulses.extend(std::iter::repeat(Pulse::On).take(units as usize));
                }
                Keying::Silence => {
                    let words = ((ratio / WORD_GAP_UNITS as f64).round() as u32).max(1);
                    let units = self
                        .nearest(ratio, &[1, CHAR_GAP_UNITS, words * WORD_GAP_UNITS])
                        .ok_or_else(out_of_tolerance)?;
                    match units {
                        1 => pulses.push(Pulse::Off),
                        CHAR_GAP_UNITS => pulses.push(Pulse::CharSep),
                        _ => pulses.extend(
                            std::iter::repeat(Pulse::WordSep).take((units / WORD_GAP_UNITS) as usize),
                        ),
                    }
                }
            }
        }

        PulseStream::new(pulses)
    }

    fn nearest(&self, ratio: f64, buckets: &[u32]) -> Option<u32> {
        buckets
            .iter()
            .copied()
            .map(|b| (b, (ratio - b as f64).abs()))
            .filter(|&(_, distance)| distance <= self.tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(b, _)| b)
    }
}

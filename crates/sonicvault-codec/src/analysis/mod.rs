//! Waveform analysis.
//!
//! Recovers a [`DurationSequence`] from audio by thresholding short-window
//! RMS energy:
//!
//! 1. Split the signal into non-overlapping windows and measure each RMS.
//! 2. Key each window as tone when its RMS exceeds
//!    `max(absolute_threshold, relative_threshold * loudest_window)`.
//! 3. Join equal neighbours into runs measured in samples.
//! 4. Debounce: runs shorter than `min_run_seconds` merge into a neighbour.
//! 5. Check that every run is close to a whole number of one shared base
//!    unit; otherwise the signal is reported as ambiguous.

mod energy;
mod runs;

#[cfg(test)]
mod tests;

use crate::config::{AnalyzerConfig, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE};
use crate::error::{CodecError, CodecResult};
use crate::frame::{DurationSequence, Keying, TimedUnit};
use crate::signal::AudioSignal;

pub use energy::{keyed_runs, threshold, window_rms};
pub use runs::{debounce, Run};

/// Energy-based duration extractor for one sample rate.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    sample_rate: u32,
}

impl Analyzer {
    /// Creates an analyzer for signals at `sample_rate`.
    pub fn new(config: AnalyzerConfig, sample_rate: u32) -> CodecResult<Self> {
        config.validate()?;
        if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
            return Err(CodecError::invalid_config(
                "sample_rate",
                format!("must be between {MIN_SAMPLE_RATE} and {MAX_SAMPLE_RATE} Hz, got {sample_rate}"),
            ));
        }
        Ok(Self {
            config,
            sample_rate,
        })
    }

    /// Returns the analysis configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Returns the expected sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn seconds_to_samples(&self, seconds: f64) -> usize {
        (seconds * self.sample_rate as f64).round().max(0.0) as usize
    }

    /// Detects debounced keyed runs.
    pub fn detect_runs(&self, signal: &AudioSignal) -> CodecResult<Vec<Run>> {
        if signal.sample_rate() != self.sample_rate {
            return Err(CodecError::SampleRateMismatch {
                expected: self.sample_rate,
                found: signal.sample_rate(),
            });
        }

        let window = self.seconds_to_samples(self.config.window_seconds).max(1);
        let levels = window_rms(signal.samples(), window);
        let level = threshold(
            &levels,
            self.config.relative_threshold,
            self.config.absolute_threshold,
        );
        let raw = keyed_runs(&levels, window, signal.len(), level);
        let runs = debounce(&raw, self.seconds_to_samples(self.config.min_run_seconds));

        tracing::debug!(
            windows = levels.len(),
            threshold = level,
            raw_runs = raw.len(),
            runs = runs.len(),
            "detected keyed runs"
        );
        Ok(runs)
    }

    /// Recovers the duration sequence of a signal.
    ///
    /// `base_unit_hint` is the expected dot length in seconds. The returned
    /// durations are the measured run lengths; the hint is only used to
    /// check that the runs agree on one base unit.
    pub fn extract_durations(
        &self,
        signal: &AudioSignal,
        base_unit_hint: f64,
    ) -> CodecResult<DurationSequence> {
        let (durations, _) = self.extract_with_base_unit(signal, base_unit_hint)?;
        Ok(durations)
    }

    /// Like [`Analyzer::extract_durations`], also returning the base unit
    /// inferred from the runs.
    pub fn extract_with_base_unit(
        &self,
        signal: &AudioSignal,
        base_unit_hint: f64,
    ) -> CodecResult<(DurationSequence, f64)> {
        let sample_rate = self.sample_rate as f64;
        let units: Vec<TimedUnit> = self
            .detect_runs(signal)?
            .into_iter()
            .map(|run| {
                let seconds = run.len as f64 / sample_rate;
                match run.keying {
                    Keying::Tone => TimedUnit::tone(seconds),
                    Keying::Silence => TimedUnit::silence(seconds),
                }
            })
            .collect();
        let durations = DurationSequence::new(units);

        let base_unit = self.estimate_base_unit(&durations, base_unit_hint)?;
        tracing::debug!(
            units = durations.len(),
            base_unit,
            hint = base_unit_hint,
            "extracted durations"
        );
        Ok((durations, base_unit))
    }

    /// Infers the base unit shared by a set of durations.
    ///
    /// Each duration is divided by its nearest whole multiple of the hint
    /// (at least one). The mean of those per-run units is returned, unless
    /// one of them deviates from the mean by more than `unit_tolerance`
    /// (relative), in which case the signal is [`CodecError::AmbiguousSignal`].
    /// An empty sequence yields the hint itself.
    pub fn estimate_base_unit(
        &self,
        durations: &DurationSequence,
        base_unit_hint: f64,
    ) -> CodecResult<f64> {
        if !base_unit_hint.is_finite() || base_unit_hint <= 0.0 {
            return Err(CodecError::invalid_config(
                "base_unit_seconds",
                format!("hint must be a positive number of seconds, got {base_unit_hint}"),
            ));
        }
        if durations.is_empty() {
            return Ok(base_unit_hint);
        }

        let estimates: Vec<f64> = durations
            .units()
            .iter()
            .map(|unit| {
                let multiple = (unit.seconds / base_unit_hint).round().max(1.0);
                unit.seconds / multiple
            })
            .collect();
        let mean = estimates.iter().sum::<f64>() / estimates.len() as f64;
        let spread = estimates
            .iter()
            .map(|u| (u - mean).abs() / mean)
            .fold(0.0f64, f64::max);

        if spread.is_nan() || spread > self.config.unit_tolerance {
            return Err(CodecError::AmbiguousSignal {
                spread,
                tolerance: self.config.unit_tolerance,
            });
        }
        Ok(mean)
    }
}

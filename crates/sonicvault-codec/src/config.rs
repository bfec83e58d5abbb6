//! Codec configuration.
//!
//! All sections have defaults, so an empty JSON object is a valid config:
//!
//! ```
//! use sonicvault_codec::CodecConfig;
//!
//! let config = CodecConfig::from_json("{}").unwrap();
//! assert_eq!(config.audio.sample_rate, 44100);
//! assert_eq!(config.timing.base_unit_seconds, 0.1);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::synthesis::Theme;
use crate::wav;

/// Lowest accepted sample rate in Hz.
pub const MIN_SAMPLE_RATE: u32 = 8000;
/// Highest accepted sample rate in Hz.
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// How far a tone's quietest window must sit above the absolute threshold.
const THRESHOLD_HEADROOM: f64 = 2.0;

/// Full codec configuration shared by synthesizer and analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Unit timing.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Waveform synthesis.
    #[serde(default)]
    pub audio: AudioConfig,
    /// Waveform analysis.
    #[serde(default)]
    pub analysis: AnalyzerConfig,
}

/// Unit timing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    /// Length of one dot in seconds.
    #[serde(default = "default_base_unit")]
    pub base_unit_seconds: f64,
    /// Maximum distance, in base units, between a measured duration and its bucket.
    #[serde(default = "default_tolerance")]
    pub tolerance_units: f64,
}

/// Synthesis parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioConfig {
    /// Sample rate in Hz, shared with the analyzer and the WAV container.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Reference frequency that each theme scales from, in Hz.
    #[serde(default = "default_base_frequency")]
    pub base_frequency: f64,
    /// Peak amplitude of tone units (0.0 to 1.0].
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    /// Fade-in and fade-out length at each tone edge, in seconds.
    #[serde(default = "default_fade")]
    pub fade_seconds: f64,
    /// Initial theme.
    #[serde(default)]
    pub theme: Theme,
    /// Seed for noise-based themes.
    #[serde(default)]
    pub seed: u32,
}

/// Energy-detection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// RMS window length in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: f64,
    /// Threshold as a fraction of the loudest window's RMS.
    #[serde(default = "default_relative_threshold")]
    pub relative_threshold: f64,
    /// Threshold floor in absolute RMS, so pure silence never reads as tone.
    #[serde(default = "default_absolute_threshold")]
    pub absolute_threshold: f64,
    /// Runs shorter than this are merged into a neighbour.
    #[serde(default = "default_min_run")]
    pub min_run_seconds: f64,
    /// Maximum relative spread of per-run base unit estimates.
    #[serde(default = "default_unit_tolerance")]
    pub unit_tolerance: f64,
}

fn default_base_unit() -> f64 {
    0.1
}

fn default_tolerance() -> f64 {
    0.25
}

fn default_sample_rate() -> u32 {
    44100
}

fn default_base_frequency() -> f64 {
    440.0
}

fn default_amplitude() -> f64 {
    0.8
}

fn default_fade() -> f64 {
    0.004
}

fn default_window() -> f64 {
    0.005
}

fn default_relative_threshold() -> f64 {
    0.2
}

fn default_absolute_threshold() -> f64 {
    0.01
}

fn default_min_run() -> f64 {
    0.015
}

fn default_unit_tolerance() -> f64 {
    0.2
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            base_unit_seconds: default_base_unit(),
            tolerance_units: default_tolerance(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            base_frequency: default_base_frequency(),
            amplitude: default_amplitude(),
            fade_seconds: default_fade(),
            theme: Theme::default(),
            seed: 0,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window(),
            relative_threshold: default_relative_threshold(),
            absolute_threshold: default_absolute_threshold(),
            min_run_seconds: default_min_run(),
            unit_tolerance: default_unit_tolerance(),
        }
    }
}

fn require(ok: bool, name: &str, message: impl Into<String>) -> CodecResult<()> {
    if ok {
        Ok(())
    } else {
        Err(CodecError::invalid_config(name, message))
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl AudioConfig {
    /// Validates synthesis parameters on their own.
    pub fn validate(&self) -> CodecResult<()> {
        require(
            (MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&self.sample_rate),
            "sample_rate",
            format!(
                "must be between {MIN_SAMPLE_RATE} and {MAX_SAMPLE_RATE} Hz, got {}",
                self.sample_rate
            ),
        )?;
        let nyquist = self.sample_rate as f64 / 2.0;
        let limit = nyquist / Theme::MAX_PARTIAL_RATIO;
        require(
            positive(self.base_frequency) && self.base_frequency < limit,
            "base_frequency",
            format!(
                "must be positive and below {limit:.0} Hz so every partial stays under Nyquist ({nyquist:.0} Hz), got {}",
                self.base_frequency
            ),
        )?;
        require(
            positive(self.amplitude) && self.amplitude <= 1.0,
            "amplitude",
            format!("must be in (0, 1], got {}", self.amplitude),
        )?;
        require(
            self.fade_seconds.is_finite() && self.fade_seconds >= 0.0,
            "fade_seconds",
            format!("must be non-negative, got {}", self.fade_seconds),
        )
    }
}

impl AnalyzerConfig {
    /// Validates analysis parameters on their own.
    pub fn validate(&self) -> CodecResult<()> {
        require(
            positive(self.window_seconds),
            "window_seconds",
            format!("must be positive, got {}", self.window_seconds),
        )?;
        require(
            positive(self.relative_threshold) && self.relative_threshold < 1.0,
            "relative_threshold",
            format!("must be in (0, 1), got {}", self.relative_threshold),
        )?;
        require(
            self.absolute_threshold.is_finite() && self.absolute_threshold >= 0.0,
            "absolute_threshold",
            format!("must be non-negative, got {}", self.absolute_threshold),
        )?;
        require(
            self.min_run_seconds.is_finite() && self.min_run_seconds >= 0.0,
            "min_run_seconds",
            format!("must be non-negative, got {}", self.min_run_seconds),
        )?;
        require(
            positive(self.unit_tolerance),
            "unit_tolerance",
            format!("must be positive, got {}", self.unit_tolerance),
        )
    }
}

impl CodecConfig {
    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> CodecResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CodecError::invalid_config("json", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config as pretty JSON.
    pub fn to_json(&self) -> CodecResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CodecError::invalid_config("json", e.to_string()))
    }

    /// Loads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> CodecResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| CodecError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Writes the config atomically as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> CodecResult<()> {
        let json = self.to_json()?;
        wav::write_atomic(path.as_ref(), json.as_bytes())
    }

    /// Shortest base unit the analyzer can resolve.
    ///
    /// A measured run can be off by up to one analysis window. That error
    /// has to stay within half of the tighter of the two tolerances.
    pub fn min_base_unit_seconds(&self) -> f64 {
        let tolerance = self.analysis.unit_tolerance.min(self.timing.tolerance_units);
        2.0 * self.analysis.window_seconds / tolerance
    }

    /// Quietest amplitude whose tones still clear the absolute threshold.
    pub fn min_amplitude(&self) -> f64 {
        THRESHOLD_HEADROOM * self.analysis.absolute_threshold / Theme::MIN_RMS_RATIO
    }

    /// Validates every section and their cross-constraints.
    pub fn validate(&self) -> CodecResult<()> {
        let base_unit = self.timing.base_unit_seconds;
        require(
            positive(base_unit),
            "base_unit_seconds",
            format!("must be positive, got {base_unit}"),
        )?;
        require(
            self.timing.tolerance_units > 0.0 && self.timing.tolerance_units < 0.5,
            "tolerance_units",
            format!("must be in (0, 0.5), got {}", self.timing.tolerance_units),
        )?;
        self.audio.validate()?;
        self.analysis.validate()?;

        let min_base_unit = self.min_base_unit_seconds();
        require(
            base_unit >= min_base_unit,
            "base_unit_seconds",
            format!(
                "must be at least {min_base_unit:.4}s for {}s analysis windows, got {base_unit}",
                self.analysis.window_seconds
            ),
        )?;
        let min_amplitude = self.min_amplitude();
        require(
            self.audio.amplitude >= min_amplitude,
            "amplitude",
            format!(
                "must be at least {min_amplitude:.4} to clear absolute_threshold {}, got {}",
                self.analysis.absolute_threshold, self.audio.amplitude
            ),
        )?;
        require(
            self.audio.fade_seconds <= base_unit / 4.0,
            "fade_seconds",
            format!(
                "must not exceed a quarter of the base unit ({}s), got {}",
                base_unit / 4.0,
                self.audio.fade_seconds
            ),
        )?;
        require(
            self.analysis.min_run_seconds < base_unit / 2.0,
            "min_run_seconds",
            format!(
                "must be shorter than half the base unit ({}s), got {}",
                base_unit / 2.0,
                self.analysis.min_run_seconds
            ),
        )
    }
}

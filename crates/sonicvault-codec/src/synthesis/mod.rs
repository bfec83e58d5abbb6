//! Waveform synthesis.
//!
//! Renders a [`DurationSequence`] as mono audio. Each tone unit is generated
//! by the active theme's voice, peak-normalized to the configured amplitude
//! and faded at both edges. Dots and dashes are voiced differently within a
//! theme; uncategorized tones are voiced as dots. Silence units are digital
//! zero. A unit of `s` seconds is always exactly `round(s * sample_rate)`
//! samples long, so the analyzer can measure durations back to the sample.

mod voices;


use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::AudioConfig;
use crate::envelope;
use crate::error::{CodecError, CodecResult};
use crate::frame::{DurationSequence, Keying, UnitKind};
use crate::rng;
use crate::signal::AudioSignal;
use crate::wav::{self, WavResult};

pub use voices::{BirdCall, BirdVoice, DigitalVoice, RainVoice, SineVoice, SynthVoice, Voice};

/// Sound palette used for tone units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Plain sine tone.
    #[default]
    Sine,
    /// Filtered noise over a high tone.
    Rain,
    /// Rising chirps.
    Birds,
    /// Harmonic synth tone.
    Synth,
    /// Square-wave beeps.
    Digital,
}

impl Theme {
    /// Every theme, in display order.
    pub const ALL: [Theme; 5] = [
        Theme::Sine,
        Theme::Rain,
        Theme::Birds,
        Theme::Synth,
        Theme::Digital,
    ];

    /// Highest sine partial any theme emits, as a multiple of the base
    /// frequency (the overtone at the top of a bird chirp). The digital
    /// theme's square wave is not band-limited and aliases regardless.
    pub const MAX_PARTIAL_RATIO: f64 = 8.0;

    /// Lowest sustained 5 ms RMS of any theme's tone, relative to the
    /// normalized peak.
    pub const MIN_RMS_RATIO: f64 = 0.25;

    /// Lowercase theme name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Theme::Sine => "sine",
            Theme::Rain => "rain",
            Theme::Birds => "birds",
            Theme::Synth => "synth",
            Theme::Digital => "digital",
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            Theme::Sine => "Clean sine wave tones",
            Theme::Rain => "Raindrop-like filtered noise over a high tone",
            Theme::Birds => "Chirping frequency sweeps",
            Theme::Synth => "Electronic tone with harmonics",
            Theme::Digital => "Two-level square beeps",
        }
    }

    /// Generates raw (unnormalized) tone samples for this theme.
    ///
    /// Dashes get their own voicing; every other kind is voiced as a dot.
    pub fn synthesize(
        self,
        base_frequency: f64,
        kind: UnitKind,
        num_samples: usize,
        sample_rate: f64,
        rng: &mut Pcg32,
    ) -> Vec<f64> {
        let dash = kind == UnitKind::Dash;
        match self {
            Theme::Sine => SineVoice {
                frequency: if dash { base_frequency * 0.8 } else { base_frequency },
            }
            .synthesize(num_samples, sample_rate, rng),
            Theme::Rain => RainVoice {
                frequency: base_frequency,
                tone_ratio: if dash { 1.5 } else { 2.0 },
            }
            .synthesize(num_samples, sample_rate, rng),
            Theme::Birds => BirdVoice {
                frequency: base_frequency,
                call: if dash { BirdCall::Warble } else { BirdCall::Chirp },
            }
            .synthesize(num_samples, sample_rate, rng),
            Theme::Synth => SynthVoice {
                frequency: if dash { base_frequency * 0.6 } else { base_frequency },
            }
            .synthesize(num_samples, sample_rate, rng),
            Theme::Digital => DigitalVoice {
                frequency: if dash { base_frequency } else { base_frequency * 1.5 },
                duty: 0.5,
            }
            .synthesize(num_samples, sample_rate, rng),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.name() == wanted)
            .ok_or_else(|| CodecError::UnknownTheme {
                name: s.to_string(),
            })
    }
}

/// Scales samples so the largest magnitude equals `target`.
fn normalize_peak(samples: &mut [f64], target: f64) {
    let peak = samples.iter().fold(0.0f64, |m, s| m.max(s.abs()));
    if peak > 0.0 {
        let gain = target / peak;
        for sample in samples.iter_mut() {
            *sample *= gain;
        }
    }
}

/// Turns durations into audio using the active theme.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    config: AudioConfig,
    theme: Theme,
}

impl Synthesizer {
    /// Creates a synthesizer, starting with the configured theme.
    pub fn new(config: AudioConfig) -> CodecResult<Self> {
        config.validate()?;
        let theme = config.theme;
        Ok(Self { config, theme })
    }

    /// Returns the active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switches theme by name. On failure the active theme is unchanged.
    pub fn set_theme(&mut self, name: &str) -> CodecResult<()> {
        let theme: Theme = name.parse()?;
        tracing::debug!(from = %self.theme, to = %theme, "switching theme");
        self.theme = theme;
        Ok(())
    }

    /// Lists every theme that [`Synthesizer::set_theme`] accepts.
    pub fn available_themes() -> &'static [Theme] {
        &Theme::ALL
    }

    /// Returns the audio configuration.
    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Returns the output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    /// Number of samples a unit of `seconds` occupies.
    pub fn unit_samples(&self, seconds: f64) -> usize {
        let samples = (seconds * self.config.sample_rate as f64).round();
        if samples.is_finite() && samples > 0.0 {
            samples as usize
        } else {
            0
        }
    }

    /// Renders a single unit of the given category.
    pub fn render_unit(&self, seconds: f64, kind: UnitKind, rng: &mut Pcg32) -> AudioSignal {
        let num_samples = self.unit_samples(seconds);
        let sample_rate = self.config.sample_rate;

        let samples = match kind.keying() {
            Keying::Silence => vec![0.0; num_samples],
            Keying::Tone => {
                let mut samples = self.theme.synthesize(
                    self.config.base_frequency,
                    kind,
                    num_samples,
                    sample_rate as f64,
                    rng,
                );
                normalize_peak(&mut samples, self.config.amplitude);
                let ramp =
                    envelope::fade_samples(self.config.fade_seconds, sample_rate as f64, num_samples);
                envelope::apply_fade(&mut samples, ramp);
                samples
            }
        };

        AudioSignal::new(samples, sample_rate)
    }

    /// Renders a whole duration sequence.
    ///
    /// Unit `i` draws its randomness from a stream derived from the
    /// configured seed and `i`. Each unit is voiced by its category.
    pub fn render(&self, durations: &DurationSequence) -> AudioSignal {
        let total: usize = durations
            .units()
            .iter()
            .map(|unit| self.unit_samples(unit.seconds))
            .sum();
        let mut signal = AudioSignal::new(Vec::with_capacity(total), self.config.sample_rate);

        for (index, unit) in durations.units().iter().enumerate() {
            let mut unit_rng = rng::create_unit_rng(self.config.seed, index as u32);
            let rendered = self.render_unit(unit.seconds, unit.category(), &mut unit_rng);
            signal.extend_from_slice(rendered.samples());
        }

        tracing::debug!(
            theme = %self.theme,
            units = durations.len(),
            samples = signal.len(),
            "rendered signal"
        );
        signal
    }

    /// Encodes a signal as a 16-bit mono WAV in memory.
    pub fn to_wav(&self, signal: &AudioSignal) -> CodecResult<WavResult> {
        if signal.sample_rate() != self.config.sample_rate {
            return Err(CodecError::SampleRateMismatch {
                expected: self.config.sample_rate,
                found: signal.sample_rate(),
            });
        }
        Ok(WavResult::from_mono(signal.samples(), signal.sample_rate()))
    }

    /// Writes a signal to `path` as a WAV file, replacing any existing file.
    pub fn save(&self, signal: &AudioSignal, path: impl AsRef<Path>) -> CodecResult<WavResult> {
        let path = path.as_ref();
        let result = self.to_wav(signal)?;
        wav::write_atomic(path, &result.wav_data)?;
        tracing::info!(
            path = %path.display(),
            seconds = result.duration_seconds(),
            pcm_hash = %result.pcm_hash,
            "saved wav"
        );
        Ok(result)
    }
}

//! End-to-end text/audio pipeline.

use std::path::Path;

use serde::Serialize;

use crate::analysis::Analyzer;
use crate::config::CodecConfig;
use crate::error::CodecResult;
use crate::frame::{binary_to_symbols, symbols_to_binary, DurationSequence, PulseStream, TimingModel};
use crate::morse::{self, SymbolSequence};
use crate::signal::AudioSignal;
use crate::synthesis::{Synthesizer, Theme};
use crate::wav::{self, WavResult};

/// Every intermediate form produced while encoding.
#[derive(Debug, Clone)]
pub struct Transmission {
    /// Dot/dash groups and word breaks.
    pub symbols: SymbolSequence,
    /// Pulse tokens.
    pub pulses: PulseStream,
    /// Timed units.
    pub durations: DurationSequence,
    /// Rendered audio.
    pub signal: AudioSignal,
}

/// Every intermediate form recovered while decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reception {
    /// Measured runs.
    pub durations: DurationSequence,
    /// Base unit inferred from the runs, in seconds.
    pub base_unit: f64,
    /// Classified pulse tokens, in text form.
    #[serde(serialize_with = "serialize_display")]
    pub pulses: PulseStream,
    /// Recovered groups, in text form.
    #[serde(serialize_with = "serialize_display")]
    pub symbols: SymbolSequence,
    /// Decoded text (uppercase).
    pub text: String,
}

fn serialize_display<T: std::fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Text-to-audio codec with a selectable theme.
///
/// Each call allocates its own buffers, so clones can run on separate
/// threads.
///
/// ```
/// use sonicvault_codec::{CodecConfig, MorseAudioCodec};
///
/// let mut config = CodecConfig::default();
/// config.audio.sample_rate = 16000;
/// let codec = MorseAudioCodec::new(config).unwrap();
///
/// let sent = codec.encode("SOS").unwrap();
/// assert_eq!(sent.pulses.to_string(), "10101/11101110111/10101");
///
/// let received = codec.decode_signal(&sent.signal).unwrap();
/// assert_eq!(received.text, "SOS");
/// ```
#[derive(Debug, Clone)]
pub struct MorseAudioCodec {
    config: CodecConfig,
    timing: TimingModel,
    synthesizer: Synthesizer,
    analyzer: Analyzer,
}

impl MorseAudioCodec {
    /// Creates a codec after validating `config`.
    pub fn new(config: CodecConfig) -> CodecResult<Self> {
        config.validate()?;
        let timing = TimingModel::from_config(&config.timing)?;
        let synthesizer = Synthesizer::new(config.audio.clone())?;
        let analyzer = Analyzer::new(config.analysis.clone(), config.audio.sample_rate)?;
        Ok(Self {
            config,
            timing,
            synthesizer,
            analyzer,
        })
    }

    /// Returns the configuration, with the active theme.
    pub fn config(&self) -> CodecConfig {
        let mut config = self.config.clone();
        config.audio.theme = self.synthesizer.theme();
        config
    }

    /// Returns the timing model.
    pub fn timing(&self) -> &TimingModel {
        &self.timing
    }

    /// Returns the active theme.
    pub fn theme(&self) -> Theme {
        self.synthesizer.theme()
    }

    /// Switches theme by name. On failure the active theme is unchanged.
    pub fn set_theme(&mut self, name: &str) -> CodecResult<()> {
        self.synthesizer.set_theme(name)
    }

    /// Encodes text into audio, keeping every intermediate form.
    pub fn encode(&self, text: &str) -> CodecResult<Transmission> {
        let symbols = morse::encode(text)?;
        let pulses = symbols_to_binary(&symbols);
        let durations = self.timing.binary_to_durations(&pulses);
        let signal = self.synthesizer.render(&durations);

        tracing::info!(
            chars = text.chars().count(),
            groups = symbols.group_count(),
            seconds = signal.duration_seconds(),
            theme = %self.synthesizer.theme(),
            "encoded message"
        );
        Ok(Transmission {
            symbols,
            pulses,
            durations,
            signal,
        })
    }

    /// Encodes text and writes it to `path` as a WAV file.
    pub fn encode_to_file(&self, text: &str, path: impl AsRef<Path>) -> CodecResult<WavResult> {
        let transmission = self.encode(text)?;
        self.synthesizer.save(&transmission.signal, path)
    }

    /// Decodes audio back into text, keeping every intermediate form.
    pub fn decode_signal(&self, signal: &AudioSignal) -> CodecResult<Reception> {
        let (durations, base_unit) = self
            .analyzer
            .extract_with_base_unit(signal, self.timing.base_unit())?;
        let pulses = self.timing.durations_to_binary(&durations)?;
        let symbols = binary_to_symbols(&pulses);
        let text = morse::decode(&symbols)?;

        tracing::info!(
            seconds = signal.duration_seconds(),
            units = durations.len(),
            base_unit,
            chars = text.chars().count(),
            "decoded message"
        );
        Ok(Reception {
            durations,
            base_unit,
            pulses,
            symbols,
            text,
        })
    }

    /// Reads a WAV file and decodes it.
    pub fn decode_file(&self, path: impl AsRef<Path>) -> CodecResult<Reception> {
        let signal = wav::load_wav(path.as_ref(), self.config.audio.sample_rate)?;
        self.decode_signal(&signal)
    }
}

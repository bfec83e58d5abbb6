//! SonicVault audio codec
//!
//! Turns text into a keyed-tone waveform and back, through a Morse-style
//! symbol alphabet and a unit-timed pulse representation.
//!
//! # Overview
//!
//! Encoding runs four stages, and decoding runs them in reverse:
//!
//! - **Symbol codec** ([`morse`]) - text to dot/dash groups and word breaks
//! - **Frame codec** ([`frame`]) - groups to pulse tokens, pulses to timed units
//! - **Synthesis** ([`synthesis`]) - timed units to audio in one of five themes
//! - **Analysis** ([`analysis`]) - audio back to timed units by energy detection
//!
//! # Determinism
//!
//! Rendering is deterministic. Given the same text, configuration and seed,
//! the PCM output is byte-identical across runs. Noise-based themes draw from
//! PCG32 streams whose per-unit seeds are derived with BLAKE3.
//!
//! # Example
//!
//! ```no_run
//! use sonicvault_codec::{CodecConfig, MorseAudioCodec};
//!
//! let mut codec = MorseAudioCodec::new(CodecConfig::default())?;
//! codec.set_theme("rain")?;
//!
//! let wav = codec.encode_to_file("U2FsdGVkX1+/", "message.wav")?;
//! println!("PCM hash: {}", wav.pcm_hash);
//!
//! let received = codec.decode_file("message.wav")?;
//! assert_eq!(received.text, "U2FSDGVKX1+/");
//! # Ok::<(), sonicvault_codec::CodecError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`MorseAudioCodec`] - Pipeline facade
//! - [`config`] - JSON-backed configuration
//! - [`envelope`] - Tone edge fades
//! - [`filter`] - Biquad filters
//! - [`oscillator`] - Basic waveform generators
//! - [`rng`] - Deterministic RNG with seed derivation
//! - [`wav`] - Deterministic WAV writer and `hound`-based reader

pub mod analysis;
pub mod codec;
pub mod config;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod frame;
pub mod morse;
pub mod oscillator;
pub mod rng;
pub mod signal;
pub mod synthesis;
pub mod wav;

// Re-export main types at crate root
pub use analysis::Analyzer;
pub use codec::{MorseAudioCodec, Reception, Transmission};
pub use config::{AnalyzerConfig, AudioConfig, CodecConfig, TimingConfig};
pub use error::{CodecError, CodecResult};
pub use frame::{DurationSequence, Keying, Pulse, PulseStream, TimedUnit, TimingModel, UnitKind};
pub use morse::{Symbol, SymbolGroup, SymbolSequence, SymbolToken};
pub use signal::{AudioSignal, SignalStats};
pub use synthesis::{Synthesizer, Theme};
pub use wav::WavResult;

//! Shared codecs and message corpora.

use std::path::{Path, PathBuf};

use sonicvault_codec::{CodecConfig, MorseAudioCodec, Theme};
use tempfile::TempDir;

/// Sample rate used by the end-to-end tests to keep buffers small.
pub const TEST_SAMPLE_RATE: u32 = 16000;

/// Messages that every theme must carry through a full round trip.
pub const ROUND_TRIP_MESSAGES: &[&str] = &[
    "SOS",
    "HELLO WORLD",
    "the quick brown fox 0123456789",
    "U2FsdGVkX1+vupppZksvRf5pq5g5XjFRIipRkwB0K1Y=",
    "WAIT?! (5 MIN) @ \"HQ\" $10 & 20 OFF; A=B_C-D:E|F'G.",
];

/// Builds a codec at `sample_rate` with `theme` selected.
pub fn codec_at(sample_rate: u32, theme: Theme) -> MorseAudioCodec {
    let mut config = CodecConfig::default();
    config.audio.sample_rate = sample_rate;
    config.audio.theme = theme;
    MorseAudioCodec::new(config).expect("test config should be valid")
}

/// A temporary directory holding rendered messages.
pub struct MessageFixture {
    pub root: TempDir,
}

impl MessageFixture {
    /// Creates an empty fixture directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        Self { root }
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path for a named WAV file inside the fixture.
    pub fn wav_path(&self, name: &str) -> PathBuf {
        self.root.path().join(format!("{name}.wav"))
    }
}

impl Default for MessageFixture {
    fn default() -> Self {
        Self::new()
    }
}

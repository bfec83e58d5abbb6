//! Error types for the audio codec.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur anywhere in the encode or decode pipeline.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A character in the input text has no Morse table entry.
    #[error("unsupported character {character:?} at position {position}")]
    UnsupportedCharacter {
        /// The offending character.
        character: char,
        /// Character index in the input text.
        position: usize,
    },

    /// A dot/dash group does not correspond to any character.
    #[error("unrecognized symbol group '{group}' at position {position}")]
    UnrecognizedSymbolGroup {
        /// The group in dot/dash form.
        group: String,
        /// Token index in the symbol sequence.
        position: usize,
    },

    /// A pulse or symbol stream violates the framing grammar.
    #[error("malformed frame at position {position}: {message}")]
    MalformedFrame {
        /// Offset of the first invalid token.
        position: usize,
        /// Error message.
        message: String,
    },

    /// A recovered duration does not fit any unit bucket.
    #[error("duration {index} ({seconds:.4}s, {units:.2} units) matches no timing bucket")]
    TimingOutOfTolerance {
        /// Index of the duration in the sequence.
        index: usize,
        /// Measured duration.
        seconds: f64,
        /// Duration expressed in base units.
        units: f64,
    },

    /// Theme name outside the closed set.
    #[error("unknown theme '{name}' (available: sine, rain, birds, synth, digital)")]
    UnknownTheme {
        /// The requested name.
        name: String,
    },

    /// No consistent base unit could be inferred from the detected runs.
    #[error("ambiguous signal: base unit spread {spread:.3} exceeds tolerance {tolerance:.3}")]
    AmbiguousSignal {
        /// Largest relative deviation of a per-run base unit from the mean.
        spread: f64,
        /// Configured tolerance.
        tolerance: f64,
    },

    /// Audio was recorded at a different sample rate than configured.
    #[error("sample rate mismatch: expected {expected} Hz, found {found} Hz")]
    SampleRateMismatch {
        /// Configured sample rate.
        expected: u32,
        /// Sample rate of the signal or file.
        found: u32,
    },

    /// Audio container is unreadable or not mono 16-bit PCM.
    #[error("unsupported audio format: {message}")]
    AudioFormatMismatch {
        /// Error message.
        message: String,
    },

    /// Configuration value out of range or unparseable.
    #[error("invalid config '{name}': {message}")]
    InvalidConfig {
        /// Field name.
        name: String,
        /// Error message.
        message: String,
    },

    /// File read or write failed.
    #[error("I/O failure on {}: {source}", path.display())]
    IoFailure {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    /// Creates an invalid config error.
    pub fn invalid_config(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a malformed frame error.
    pub fn malformed(position: usize, message: impl Into<String>) -> Self {
        Self::MalformedFrame {
            position,
            message: message.into(),
        }
    }

    /// Creates an I/O failure for the given path.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::IoFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::UnsupportedCharacter { .. } => "SV_001",
            CodecError::UnrecognizedSymbolGroup { .. } => "SV_002",
            CodecError::MalformedFrame { .. } => "SV_003",
            CodecError::TimingOutOfTolerance { .. } => "SV_004",
            CodecError::UnknownTheme { .. } => "SV_005",
            CodecError::AmbiguousSignal { .. } => "SV_006",
            CodecError::SampleRateMismatch { .. } => "SV_007",
            CodecError::AudioFormatMismatch { .. } => "SV_008",
            CodecError::InvalidConfig { .. } => "SV_009",
            CodecError::IoFailure { .. } => "SV_010",
        }
    }

    /// Returns the error category used to pick a user-facing message.
    ///
    /// - `message`: the text or its symbolic form cannot be represented
    /// - `timing`: recovered timing matches no known pattern
    /// - `audio`: the audio is corrupted or recorded at the wrong quality
    /// - `config`: a setting is invalid
    /// - `io`: the filesystem failed
    pub fn category(&self) -> &'static str {
        match self {
            CodecError::UnsupportedCharacter { .. }
            | CodecError::UnrecognizedSymbolGroup { .. }
            | CodecError::MalformedFrame { .. } => "message",
            CodecError::TimingOutOfTolerance { .. } => "timing",
            CodecError::AmbiguousSignal { .. }
            | CodecError::SampleRateMismatch { .. }
            | CodecError::AudioFormatMismatch { .. } => "audio",
            CodecError::UnknownTheme { .. } | CodecError::InvalidConfig { .. } => "config",
            CodecError::IoFailure { .. } => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_helper() {
        let err = CodecError::invalid_config("base_unit_seconds", "must be positive");
        assert!(err.to_string().contains("base_unit_seconds"));
        assert!(err.to_string().contains("must be positive"));
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_categories_separate_user_messages() {
        let input = CodecError::UnsupportedCharacter {
            character: '\u{1F600}',
            position: 3,
        };
        let timing = CodecError::TimingOutOfTolerance {
            index: 0,
            seconds: 0.2,
            units: 2.0,
        };
        let audio = CodecError::SampleRateMismatch {
            expected: 44100,
            found: 22050,
        };

        assert_eq!(input.category(), "message");
        assert_eq!(timing.category(), "timing");
        assert_eq!(audio.category(), "audio");
        assert_eq!(audio.code(), "SV_007");
    }

    #[test]
    fn test_io_failure_names_path() {
        let err = CodecError::io(
            Path::new("/no/such/dir/out.wav"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("out.wav"));
        assert_eq!(err.code(), "SV_010");
    }
}

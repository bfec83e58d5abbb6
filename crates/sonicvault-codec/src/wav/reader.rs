//! WAV decoding via `hound`.

use std::io::Read;

use crate::error::{CodecError, CodecResult};
use crate::signal::AudioSignal;

use super::format::BITS_PER_SAMPLE;
use super::writer::pcm16_to_sample;

fn format_error(message: impl Into<String>) -> CodecError {
    CodecError::AudioFormatMismatch {
        message: message.into(),
    }
}

/// Reads a mono 16-bit integer PCM WAV stream recorded at `expected_rate`.
///
/// Any other layout is an [`CodecError::AudioFormatMismatch`]; a different
/// sample rate is a [`CodecError::SampleRateMismatch`].
pub fn read_wav<R: Read>(reader: R, expected_rate: u32) -> CodecResult<AudioSignal> {
    let mut reader = hound::WavReader::new(reader)
        .map_err(|e| format_error(format!("not a readable WAV stream: {e}")))?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(format_error(format!(
            "expected 16-bit integer PCM, got {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }
    if spec.channels != 1 {
        return Err(format_error(format!(
            "expected mono, got {} channels",
            spec.channels
        )));
    }
    if spec.sample_rate != expected_rate {
        return Err(CodecError::SampleRateMismatch {
            expected: expected_rate,
            found: spec.sample_rate,
        });
    }

    let samples = reader
        .samples::<i16>()
        .map(|s| s.map(pcm16_to_sample))
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|e| format_error(format!("failed to read samples: {e}")))?;

    tracing::debug!(
        samples = samples.len(),
        sample_rate = spec.sample_rate,
        "read wav"
    );
    Ok(AudioSignal::new(samples, spec.sample_rate))
}

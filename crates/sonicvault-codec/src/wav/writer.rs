//! Byte-exact WAV serialization.
//!
//! Headers carry no timestamps or optional chunks, so identical samples
//! always produce identical files.

use std::io::{self, Write};

use super::format::WavFormat;

/// Size of the RIFF, fmt and data headers together.
pub const HEADER_BYTES: usize = 44;

/// Writes a complete WAV file to a writer.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let riff_size = 36 + data_size;

    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // integer PCM
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)
}

/// Writes a WAV file into a new byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(HEADER_BYTES + pcm_data.len());
    // Writing into a Vec cannot fail.
    let _ = write_wav(&mut buffer, format, pcm_data);
    buffer
}

/// Converts samples to little-endian 16-bit PCM.
///
/// Values outside [-1.0, 1.0] are clipped; NaN becomes silence.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = if sample.is_nan() {
            0
        } else {
            (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
        };
        pcm.extend_from_slice(&value.to_le_bytes());
    }
    pcm
}

/// Inverse of [`samples_to_pcm16`] for a single sample.
#[inline]
pub fn pcm16_to_sample(value: i16) -> f64 {
    (value as f64 / 32767.0).max(-1.0)
}

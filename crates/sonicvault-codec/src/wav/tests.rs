//! Tests for WAV writing and reading.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use super::*;
use crate::error::CodecError;
use crate::signal::AudioSignal;

fn le_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn hound_bytes(spec: hound::WavSpec, frames: usize) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..frames * spec.channels as usize {
            match spec.sample_format {
                hound::SampleFormat::Int if spec.bits_per_sample == 16 => {
                    writer.write_sample((i % 100) as i16).unwrap()
                }
                hound::SampleFormat::Int => writer.write_sample((i % 100) as i32).unwrap(),
                hound::SampleFormat::Float => writer.write_sample(0.25f32).unwrap(),
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

// =========================================================================
// PCM conversion
// =========================================================================

#[test]
fn test_samples_to_pcm16_values() {
    let pcm = samples_to_pcm16(&[0.0, 0.5, -0.5, 1.0, -1.0]);
    assert_eq!(pcm.len(), 10);

    let values: Vec<i16> = pcm
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect();
    // (0.5 * 32767).round() = 16384
    assert_eq!(values, vec![0, 16384, -16384, 32767, -32767]);
}

#[test]
fn test_samples_to_pcm16_clips() {
    let pcm = samples_to_pcm16(&[1.5, -7.0, f64::INFINITY, f64::NAN]);
    let values: Vec<i16> = pcm
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect();
    assert_eq!(values, vec![32767, -32767, 32767, 0]);
}

#[test]
fn test_pcm16_to_sample_inverts() {
    assert_eq!(pcm16_to_sample(0), 0.0);
    assert_eq!(pcm16_to_sample(32767), 1.0);
    assert_eq!(pcm16_to_sample(-32767), -1.0);
    assert_eq!(pcm16_to_sample(i16::MIN), -1.0);
}

// =========================================================================
// Header layout
// =========================================================================

#[test]
fn test_header_layout() {
    let pcm = samples_to_pcm16(&[0.0; 10]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm);

    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(le_u32(&wav, 4), wav.len() as u32 - 8);
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(le_u32(&wav, 16), 16);
    assert_eq!(le_u16(&wav, 20), 1); // PCM
    assert_eq!(le_u16(&wav, 22), 1); // mono
    assert_eq!(le_u32(&wav, 24), 44100);
    assert_eq!(le_u32(&wav, 28), 88200);
    assert_eq!(le_u16(&wav, 32), 2);
    assert_eq!(le_u16(&wav, 34), 16);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(le_u32(&wav, 40), 20);
    assert_eq!(wav.len(), HEADER_BYTES + 20);
}

#[test]
fn test_write_wav_matches_vec() {
    let format = WavFormat::mono(16000);
    let pcm = samples_to_pcm16(&[0.3, -0.3]);

    let mut buffer = Vec::new();
    write_wav(&mut buffer, &format, &pcm).unwrap();
    assert_eq!(buffer, write_wav_to_vec(&format, &pcm));
}

#[test]
fn test_empty_audio_is_valid_file() {
    let result = WavResult::from_mono(&[], 44100);
    assert_eq!(result.wav_data.len(), HEADER_BYTES);
    assert_eq!(result.num_samples, 0);
    assert_eq!(result.duration_seconds(), 0.0);

    let signal = read_wav(Cursor::new(result.wav_data), 44100).unwrap();
    assert!(signal.is_empty());
}

// =========================================================================
// Hashing
// =========================================================================

#[test]
fn test_pcm_hash_is_deterministic() {
    let samples: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.01).sin()).collect();
    let a = WavResult::from_mono(&samples, 44100);
    let b = WavResult::from_mono(&samples, 44100);
    assert_eq!(a.pcm_hash, b.pcm_hash);
    assert_eq!(a.wav_data, b.wav_data);
    assert_eq!(a.pcm_hash.len(), 64);
}

#[test]
fn test_pcm_hash_ignores_header() {
    let a = WavResult::from_mono(&[0.1, 0.2], 16000);
    let b = WavResult::from_mono(&[0.1, 0.2], 44100);
    assert_eq!(a.pcm_hash, b.pcm_hash);
    assert_ne!(a.wav_data, b.wav_data);

    let c = WavResult::from_mono(&[0.1, 0.3], 16000);
    assert_ne!(a.pcm_hash, c.pcm_hash);
}

// =========================================================================
// Reading
// =========================================================================

#[test]
fn test_read_back_written_file() {
    let samples = vec![0.0, 0.25, -0.25, 0.8, -0.8];
    let result = WavResult::from_mono(&samples, 22050);
    let signal = read_wav(Cursor::new(result.wav_data), 22050).unwrap();

    assert_eq!(signal.sample_rate(), 22050);
    assert_eq!(signal.len(), samples.len());
    for (read, original) in signal.samples().iter().zip(&samples) {
        assert!((read - original).abs() < 1.0 / 32767.0);
    }
}

#[test]
fn test_read_rejects_sample_rate_mismatch() {
    let result = WavResult::from_mono(&[0.0; 4], 48000);
    match read_wav(Cursor::new(result.wav_data), 44100) {
        Err(CodecError::SampleRateMismatch { expected, found }) => {
            assert_eq!((expected, found), (44100, 48000));
        }
        other => panic!("expected SampleRateMismatch, got {other:?}"),
    }
}

#[test]
fn test_read_rejects_other_layouts() {
    let base = hound::WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let layouts = [
        hound::WavSpec { channels: 2, ..base },
        hound::WavSpec {
            bits_per_sample: 24,
            ..base
        },
        hound::WavSpec {
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
            ..base
        },
    ];
    for spec in layouts {
        let bytes = hound_bytes(spec, 8);
        let err = read_wav(Cursor::new(bytes), 44100).unwrap_err();
        assert!(
            matches!(err, CodecError::AudioFormatMismatch { .. }),
            "{spec:?}: {err}"
        );
    }
}

#[test]
fn test_read_accepts_hound_mono() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let signal = read_wav(Cursor::new(hound_bytes(spec, 50)), 8000).unwrap();
    assert_eq!(signal.len(), 50);
}

#[test]
fn test_read_rejects_garbage() {
    let err = read_wav(Cursor::new(b"not a wav file at all".to_vec()), 44100).unwrap_err();
    assert_eq!(err.code(), "SV_008");
}

// =========================================================================
// Files
// =========================================================================

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("tone.wav");
    let signal = AudioSignal::new(vec![0.5; 100], 16000);

    let result = WavResult::from_mono(signal.samples(), signal.sample_rate());
    write_atomic(&path, &result.wav_data).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), result.wav_data);

    let loaded = load_wav(&path, 16000).unwrap();
    assert_eq!(loaded.len(), 100);
}

#[test]
fn test_write_atomic_replaces_existing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bin");
    std::fs::write(&path, b"old contents that are longer").unwrap();

    write_atomic(&path, b"new").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"new");

    // No temporary files left behind.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_wav(&dir.path().join("missing.wav"), 44100).unwrap_err();
    assert!(matches!(err, CodecError::IoFailure { .. }));
}

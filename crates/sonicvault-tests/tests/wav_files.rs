//! WAV file save/load tests through the public codec API.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use sonicvault_codec::{wav, CodecError, Theme};
use sonicvault_tests::{codec_at, verify_determinism, MessageFixture, TEST_SAMPLE_RATE};

// ============================================================================
// Round trips through files
// ============================================================================

#[test]
fn encode_to_file_then_decode_file() {
    let fixture = MessageFixture::new();
    for theme in Theme::ALL {
        let codec = codec_at(TEST_SAMPLE_RATE, theme);
        let path = fixture.wav_path(theme.name());

        let written = codec.encode_to_file("CQ CQ DE SV1", &path).unwrap();
        assert_eq!(written.sample_rate, TEST_SAMPLE_RATE);
        assert_eq!(std::fs::read(&path).unwrap(), written.wav_data);

        let received = codec.decode_file(&path).unwrap();
        assert_eq!(received.text, "CQ CQ DE SV1", "theme {theme}");
    }
}

#[test]
fn written_file_is_mono_16_bit_pcm() {
    let fixture = MessageFixture::new();
    let path = fixture.wav_path("layout");
    let codec = codec_at(TEST_SAMPLE_RATE, Theme::Synth);
    let written = codec.encode_to_file("K", &path).unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, TEST_SAMPLE_RATE);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(reader.len() as usize, written.num_samples);
}

#[test]
fn empty_message_writes_valid_empty_file() {
    let fixture = MessageFixture::new();
    let path = fixture.wav_path("empty");
    let codec = codec_at(TEST_SAMPLE_RATE, Theme::Sine);

    let written = codec.encode_to_file("", &path).unwrap();
    assert_eq!(written.num_samples, 0);
    assert_eq!(written.wav_data.len(), wav::HEADER_BYTES);
    assert_eq!(codec.decode_file(&path).unwrap().text, "");
}

#[test]
fn overwrite_replaces_previous_file() {
    let fixture = MessageFixture::new();
    let path = fixture.wav_path("msg");
    let codec = codec_at(TEST_SAMPLE_RATE, Theme::Sine);

    codec.encode_to_file("A LONGER FIRST MESSAGE", &path).unwrap();
    codec.encode_to_file("B", &path).unwrap();
    assert_eq!(codec.decode_file(&path).unwrap().text, "B");
}

#[test]
fn pcm_hash_is_stable_across_runs() {
    let codec = codec_at(TEST_SAMPLE_RATE, Theme::Rain);
    let fixture = MessageFixture::new();
    let path = fixture.wav_path("rain");
    verify_determinism(
        || codec.encode_to_file("RAIN 7", &path).unwrap().pcm_hash,
        3,
    )
    .assert_deterministic();
}

// ============================================================================
// Rejected files
// ============================================================================

#[test]
fn wrong_sample_rate_is_rejected() {
    let fixture = MessageFixture::new();
    let path = fixture.wav_path("fast");
    codec_at(44100, Theme::Sine)
        .encode_to_file("E", &path)
        .unwrap();

    let err = codec_at(TEST_SAMPLE_RATE, Theme::Sine)
        .decode_file(&path)
        .unwrap_err();
    assert!(matches!(
        err,
        CodecError::SampleRateMismatch {
            expected: 16000,
            found: 44100
        }
    ));
}

#[test]
fn stereo_file_is_rejected() {
    let fixture = MessageFixture::new();
    let path = fixture.wav_path("stereo");
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: TEST_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for _ in 0..200 {
        writer.write_sample(1000i16).unwrap();
    }
    writer.finalize().unwrap();

    let err = codec_at(TEST_SAMPLE_RATE, Theme::Sine)
        .decode_file(&path)
        .unwrap_err();
    assert!(matches!(err, CodecError::AudioFormatMismatch { .. }), "{err}");
    assert_eq!(err.code(), "SV_008");
}

#[test]
fn truncated_file_is_rejected() {
    let codec = codec_at(TEST_SAMPLE_RATE, Theme::Sine);
    let written = codec.encode("E").unwrap().signal;
    let bytes = wav::WavResult::from_mono(written.samples(), written.sample_rate()).wav_data;

    let err = wav::read_wav(Cursor::new(&bytes[..20]), TEST_SAMPLE_RATE).unwrap_err();
    assert!(matches!(err, CodecError::AudioFormatMismatch { .. }));
}

#[test]
fn missing_file_is_io_failure() {
    let fixture = MessageFixture::new();
    let err = codec_at(TEST_SAMPLE_RATE, Theme::Sine)
        .decode_file(fixture.path().join("nope.wav"))
        .unwrap_err();
    assert!(matches!(err, CodecError::IoFailure { .. }));
    assert_eq!(err.category(), "io");
}

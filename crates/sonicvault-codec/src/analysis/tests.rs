use pretty_assertions::assert_eq;

use super::*;
use crate::config::AudioConfig;
use crate::frame::{symbols_to_binary, Keying, TimingModel};
use crate::morse;
use crate::synthesis::{Synthesizer, Theme};

const RATE: u32 = 16000;

fn analyzer() -> Analyzer {
    Analyzer::new(AnalyzerConfig::default(), RATE).unwrap()
}

fn render(text: &str, theme: Theme, base_unit: f64) -> (DurationSequence, AudioSignal) {
    let model = TimingModel::new(base_unit).unwrap();
    let durations = model.binary_to_durations(&symbols_to_binary(&morse::encode(text).unwrap()));
    let synth = Synthesizer::new(AudioConfig {
        sample_rate: RATE,
        theme,
        ..AudioConfig::default()
    })
    .unwrap();
    let signal = synth.render(&durations);
    (durations, signal)
}

/// Constant-level sine bursts, aligned to sample boundaries.
fn keyed(units: &[(Keying, f64)]) -> AudioSignal {
    let mut samples = Vec::new();
    for &(keying, seconds) in units {
        let n = (seconds * RATE as f64).round() as usize;
        samples.extend((0..n).map(|i| match keying {
            Keying::Tone => 0.5 * (i as f64 * 0.3).sin(),
            Keying::Silence => 0.0,
        }));
    }
    AudioSignal::new(samples, RATE)
}

#[test]
fn test_recovers_sos_durations() {
    let (expected, signal) = render("SOS", Theme::Sine, 0.1);
    let recovered = analyzer().extract_durations(&signal, 0.1).unwrap();

    assert_eq!(recovered.len(), expected.len());
    for (got, want) in recovered.units().iter().zip(expected.units()) {
        assert_eq!(got.keying, want.keying);
        assert!(
            (got.seconds - want.seconds).abs() < 0.02,
            "{} vs {}",
            got.seconds,
            want.seconds
        );
    }
}

#[test]
fn test_every_theme_classifies_back() {
    let model = TimingModel::new(0.1).unwrap();
    for theme in Theme::ALL {
        let (durations, signal) = render("HI 42", theme, 0.1);
        let recovered = analyzer().extract_durations(&signal, 0.1).unwrap();
        assert_eq!(
            model.durations_to_binary(&recovered).unwrap(),
            model.durations_to_binary(&durations).unwrap(),
            "theme {theme}"
        );
    }
}

#[test]
fn test_consecutive_word_gaps_merge() {
    let (_, signal) = render("E  T", Theme::Sine, 0.1);
    let recovered = analyzer().extract_durations(&signal, 0.1).unwrap();

    // tone, one 1.4 s silence, tone
    assert_eq!(recovered.len(), 3);
    assert_eq!(recovered.units()[1].keying, Keying::Silence);
    assert!((recovered.units()[1].seconds - 1.4).abs() < 0.02);
}

#[test]
fn test_silent_signal_is_one_silence_run() {
    let signal = AudioSignal::new(vec![0.0; 11200], RATE);
    let recovered = analyzer().extract_durations(&signal, 0.1).unwrap();
    assert_eq!(recovered.units(), &[TimedUnit::silence(0.7)]);
}

#[test]
fn test_empty_signal() {
    let recovered = analyzer()
        .extract_durations(&AudioSignal::new(Vec::new(), RATE), 0.1)
        .unwrap();
    assert!(recovered.is_empty());
}

#[test]
fn test_short_glitch_is_debounced() {
    let mut signal = keyed(&[
        (Keying::Tone, 0.1),
        (Keying::Silence, 0.3),
        (Keying::Tone, 0.3),
    ]);
    // A 5 ms click in the middle of the character gap.
    let samples: Vec<f64> = signal
        .samples()
        .iter()
        .enumerate()
        .map(|(i, &s)| if (2400..2480).contains(&i) { 0.5 } else { s })
        .collect();
    signal = AudioSignal::new(samples, RATE);

    let recovered = analyzer().extract_durations(&signal, 0.1).unwrap();
    let keyings: Vec<Keying> = recovered.units().iter().map(|u| u.keying).collect();
    assert_eq!(keyings, vec![Keying::Tone, Keying::Silence, Keying::Tone]);
}

#[test]
fn test_quiet_recording_still_keys() {
    let signal = keyed(&[(Keying::Tone, 0.1), (Keying::Silence, 0.1), (Keying::Tone, 0.3)]);
    let quiet = AudioSignal::new(signal.samples().iter().map(|s| s * 0.1).collect(), RATE);
    let recovered = analyzer().extract_durations(&quiet, 0.1).unwrap();
    assert_eq!(recovered.len(), 3);
}

#[test]
fn test_inconsistent_units_are_ambiguous() {
    // 1.45 units rounds to one unit, far from the 0.1 s runs around it.
    let signal = keyed(&[
        (Keying::Tone, 0.1),
        (Keying::Silence, 0.1),
        (Keying::Tone, 0.145),
    ]);
    match analyzer().extract_durations(&signal, 0.1) {
        Err(CodecError::AmbiguousSignal { spread, tolerance }) => {
            assert!(spread > tolerance);
        }
        other => panic!("expected AmbiguousSignal, got {other:?}"),
    }
}

#[test]
fn test_estimate_base_unit() {
    let durations = DurationSequence::new(vec![
        TimedUnit::tone(0.105),
        TimedUnit::silence(0.105),
        TimedUnit::tone(0.315),
        TimedUnit::silence(0.735),
    ]);
    let unit = analyzer().estimate_base_unit(&durations, 0.1).unwrap();
    assert!((unit - 0.105).abs() < 1e-9);

    assert_eq!(
        analyzer()
            .estimate_base_unit(&DurationSequence::default(), 0.1)
            .unwrap(),
        0.1
    );
    assert!(analyzer().estimate_base_unit(&durations, 0.0).is_err());
}

#[test]
fn test_sample_rate_mismatch() {
    let signal = AudioSignal::new(vec![0.0; 100], 44100);
    assert!(matches!(
        analyzer().extract_durations(&signal, 0.1),
        Err(CodecError::SampleRateMismatch {
            expected: RATE,
            found: 44100
        })
    ));
}

#[test]
fn test_rejects_bad_sample_rate() {
    assert!(Analyzer::new(AnalyzerConfig::default(), 1000).is_err());
}

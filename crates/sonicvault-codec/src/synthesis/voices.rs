//! Tone generators, one per theme.
//!
//! Every voice keeps a steady envelope for the whole unit: the analyzer
//! reads keying from short-window energy, so a voice that decays inside a
//! dash would split it in two. Output is not normalized here.

use rand_pcg::Pcg32;

use crate::filter::BiquadFilter;
use crate::oscillator::{self, PhaseAccumulator, TWO_PI};

/// Common trait for all theme voices.
pub trait Voice {
    /// Generates tone samples.
    ///
    /// # Arguments
    /// * `num_samples` - Number of samples to generate
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `rng` - Deterministic RNG for any randomness
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64>;
}

/// Plain sine at the base frequency.
#[derive(Debug, Clone)]
pub struct SineVoice {
    /// Frequency in Hz.
    pub frequency: f64,
}

impl Voice for SineVoice {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        let mut phase_acc = PhaseAccumulator::new(sample_rate);
        (0..num_samples)
            .map(|_| oscillator::sine(phase_acc.advance(self.frequency)))
            .collect()
    }
}

/// Raindrop texture: band-limited noise over a high tone with a slow patter.
#[derive(Debug, Clone)]
pub struct RainVoice {
    /// Reference frequency in Hz.
    pub frequency: f64,
    /// Tone frequency as a multiple of `frequency`.
    pub tone_ratio: f64,
}

impl RainVoice {
    const TONE_LEVEL: f64 = 0.6;
    const NOISE_LEVEL: f64 = 0.4;
    const PATTER_HZ: f64 = 11.0;
    const PATTER_DEPTH: f64 = 0.15;
}

impl Voice for RainVoice {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let mut noise = oscillator::white_noise(rng, num_samples);
        let mut band = BiquadFilter::bandpass(self.frequency * 3.0, 1.5, sample_rate);
        band.process_buffer(&mut noise);
        let mut rumble_cut = BiquadFilter::highpass(self.frequency, 0.707, sample_rate);
        rumble_cut.process_buffer(&mut noise);

        let noise_peak = noise.iter().fold(0.0f64, |m, s| m.max(s.abs()));
        let noise_gain = if noise_peak > 0.0 {
            Self::NOISE_LEVEL / noise_peak
        } else {
            0.0
        };

        let mut phase_acc = PhaseAccumulator::new(sample_rate);
        noise
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let t = i as f64 / sample_rate;
                let patter = 1.0 - Self::PATTER_DEPTH * (0.5 + 0.5 * (TWO_PI * Self::PATTER_HZ * t).sin());
                let tone = Self::TONE_LEVEL * oscillator::sine(phase_acc.advance(self.frequency * self.tone_ratio));
                (tone + n * noise_gain) * patter
            })
            .collect()
    }
}

/// Bird call shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdCall {
    /// Repeating upward sweeps.
    Chirp,
    /// Frequency wobble between two close pitches.
    Warble,
}

/// Bird calls with a soft second harmonic.
#[derive(Debug, Clone)]
pub struct BirdVoice {
    /// Reference frequency in Hz.
    pub frequency: f64,
    /// Call shape.
    pub call: BirdCall,
}

impl BirdVoice {
    const CHIRP_SECONDS: f64 = 0.04;
    const START_RATIO: f64 = 2.5;
    const END_RATIO: f64 = 4.0;
    const WARBLE_LOW_RATIO: f64 = 2.5;
    const WARBLE_HIGH_RATIO: f64 = 2.75;
    const WARBLE_HZ: f64 = 25.0;

    /// Instantaneous call frequency at `t` seconds into the unit.
    fn call_frequency(&self, t: f64) -> f64 {
        match self.call {
            BirdCall::Chirp => {
                // Exponential sweep, restarting every chirp.
                let progress = (t / Self::CHIRP_SECONDS).fract();
                let start = self.frequency * Self::START_RATIO;
                let end = self.frequency * Self::END_RATIO;
                start * (end / start).powf(progress)
            }
            BirdCall::Warble => {
                let depth = 0.5 + 0.5 * (TWO_PI * Self::WARBLE_HZ * t).sin();
                let ratio = Self::WARBLE_LOW_RATIO
                    + (Self::WARBLE_HIGH_RATIO - Self::WARBLE_LOW_RATIO) * depth;
                self.frequency * ratio
            }
        }
    }
}

impl Voice for BirdVoice {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        let mut fundamental = PhaseAccumulator::new(sample_rate);
        let mut overtone = PhaseAccumulator::new(sample_rate);

        (0..num_samples)
            .map(|i| {
                let freq = self.call_frequency(i as f64 / sample_rate);
                oscillator::sine(fundamental.advance(freq))
                    + 0.3 * oscillator::sine(overtone.advance(freq * 2.0))
            })
            .collect()
    }
}

/// Additive synth tone with three harmonics.
#[derive(Debug, Clone)]
pub struct SynthVoice {
    /// Fundamental frequency in Hz.
    pub frequency: f64,
}

impl SynthVoice {
    const HARMONICS: [f64; 3] = [0.6, 0.3, 0.15];
}

impl Voice for SynthVoice {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        let mut phase_acc = PhaseAccumulator::new(sample_rate);
        (0..num_samples)
            .map(|_| {
                let phase = phase_acc.advance(self.frequency);
                Self::HARMONICS
                    .iter()
                    .enumerate()
                    .map(|(h, amp)| amp * oscillator::sine(phase * (h + 1) as f64))
                    .sum::<f64>()
            })
            .collect()
    }
}

/// Two-level square beep.
#[derive(Debug, Clone)]
pub struct DigitalVoice {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Duty cycle (0.0 to 1.0).
    pub duty: f64,
}

impl Voice for DigitalVoice {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        let mut phase_acc = PhaseAccumulator::new(sample_rate);
        (0..num_samples)
            .map(|_| oscillator::square(phase_acc.advance(self.frequency), self.duty))
            .collect()
    }
}

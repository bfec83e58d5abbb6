//! Basic periodic waveforms and noise.
//!
//! Phases are in radians unless noted otherwise.

use rand::Rng;
use rand_pcg::Pcg32;

/// 2 * PI.
pub const TWO_PI: f64 = std::f64::consts::TAU;

/// Tracks oscillator phase across samples so frequency can change smoothly.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    phase: f64,
    sample_rate: f64,
}

impl PhaseAccumulator {
    /// Creates an accumulator starting at phase 0.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            sample_rate,
        }
    }

    /// Returns the current phase and advances by one sample at `frequency`.
    pub fn advance(&mut self, frequency: f64) -> f64 {
        let current = self.phase;
        self.phase += TWO_PI * frequency / self.sample_rate;
        if self.phase >= TWO_PI {
            self.phase -= TWO_PI;
        }
        current
    }
}

/// Sine of a phase.
#[inline]
pub fn sine(phase: f64) -> f64 {
    phase.sin()
}

/// Two-level square wave: +1 for the first `duty` of the cycle, -1 after.
#[inline]
pub fn square(phase: f64, duty: f64) -> f64 {
    let t = (phase / TWO_PI).rem_euclid(1.0);
    if t < duty {
        1.0
    } else {
        -1.0
    }
}

/// Uniform white noise in [-1, 1).
pub fn white_noise(rng: &mut Pcg32, num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|_| rng.gen::<f64>() * 2.0 - 1.0)
        .collect()
}

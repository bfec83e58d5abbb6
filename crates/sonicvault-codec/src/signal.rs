//! In-memory mono audio.

use serde::Serialize;

/// Mono samples in [-1.0, 1.0] at a fixed sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSignal {
    samples: Vec<f64>,
    sample_rate: u32,
}

/// Summary levels of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalStats {
    /// Length in seconds.
    pub duration_seconds: f64,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Largest absolute sample.
    pub peak_amplitude: f64,
    /// Root mean square level.
    pub rms: f64,
}

impl AudioSignal {
    /// Wraps samples at a sample rate.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Returns the samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the signal has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Appends another buffer of samples.
    pub fn extend_from_slice(&mut self, samples: &[f64]) {
        self.samples.extend_from_slice(samples);
    }

    /// Computes duration, peak and RMS.
    pub fn stats(&self) -> SignalStats {
        let peak_amplitude = self
            .samples
            .iter()
            .map(|s| s.abs())
            .fold(0.0f64, f64::max);
        let rms = if self.samples.is_empty() {
            0.0
        } else {
            (self.samples.iter().map(|s| s * s).sum::<f64>() / self.samples.len() as f64).sqrt()
        };

        SignalStats {
            duration_seconds: self.duration_seconds(),
            sample_rate: self.sample_rate,
            peak_amplitude,
            rms,
        }
    }
}

//! Edge fades for keyed tones.
//!
//! Each tone unit gets a raised-cosine ramp at both ends so that keying does
//! not click and the energy detector sees a clean edge.

use std::f64::consts::PI;

/// Returns the fade length in samples for a unit of `num_samples`.
///
/// The fade is capped at a quarter of the unit so short units keep a
/// full-level middle.
pub fn fade_samples(fade_seconds: f64, sample_rate: f64, num_samples: usize) -> usize {
    let requested = (fade_seconds * sample_rate).round().max(0.0) as usize;
    requested.min(num_samples / 4)
}

/// Raised-cosine gain at `position` within a ramp of `ramp` samples (0 to 1).
#[inline]
pub fn raised_cosine(position: usize, ramp: usize) -> f64 {
    if ramp == 0 {
        return 1.0;
    }
    0.5 * (1.0 - (PI * position as f64 / ramp as f64).cos())
}

/// Applies a raised-cosine fade-in and fade-out of `ramp` samples in place.
pub fn apply_fade(samples: &mut [f64], ramp: usize) {
    let len = samples.len();
    let ramp = ramp.min(len / 2);
    if ramp == 0 {
        return;
    }
    for i in 0..ramp {
        let gain = raised_cosine(i, ramp);
        samples[i] *= gain;
        samples[len - 1 - i] *= gain;
    }
}

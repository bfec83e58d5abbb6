//! Short-window energy detection.

use crate::frame::Keying;

use super::runs::Run;

/// RMS level of each non-overlapping window. The last window may be partial.
pub fn window_rms(samples: &[f64], window: usize) -> Vec<f64> {
    samples
        .chunks(window.max(1))
        .map(|chunk| (chunk.iter().map(|s| s * s).sum::<f64>() / chunk.len() as f64).sqrt())
        .collect()
}

/// Tone/silence threshold for a set of window levels.
///
/// Scales with the loudest window so quiet recordings still key, but never
/// drops below `absolute` so digital silence stays silent.
pub fn threshold(levels: &[f64], relative: f64, absolute: f64) -> f64 {
    let peak = levels.iter().copied().fold(0.0f64, f64::max);
    (relative * peak).max(absolute)
}

/// Groups window levels into alternating keyed runs measured in samples.
///
/// `total_samples` is the signal length, so the final partial window
/// contributes only the samples it actually covers.
pub fn keyed_runs(levels: &[f64], window: usize, total_samples: usize, threshold: f64) -> Vec<Run> {
    let window = window.max(1);
    let mut runs: Vec<Run> = Vec::new();

    for (i, &rms) in levels.iter().enumerate() {
        let len = window.min(total_samples.saturating_sub(i * window));
        let keying = if rms > threshold {
            Keying::Tone
        } else {
            Keying::Silence
        };
        match runs.last_mut() {
            Some(run) if run.keying == keying => run.len += len,
            _ => runs.push(Run { keying, len }),
        }
    }

    runs
}

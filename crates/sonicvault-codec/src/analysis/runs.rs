//! Keyed runs and debouncing.

use crate::frame::Keying;

/// A contiguous stretch of tone or silence, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Tone or silence.
    pub keying: Keying,
    /// Length in samples.
    pub len: usize,
}

/// Absorbs runs shorter than `min_len` samples into a neighbour.
///
/// A short run joins the run before it, or the run after it when nothing
/// precedes it. Neighbours that end up with the same keying coalesce, so
/// the output alternates strictly. If every run is short the whole input
/// collapses into one run keyed like the first.
pub fn debounce(runs: &[Run], min_len: usize) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::with_capacity(runs.len());
    let mut pending = 0usize;

    for run in runs {
        if run.len < min_len {
            match out.last_mut() {
                Some(prev) => prev.len += run.len,
                None => pending += run.len,
            }
            continue;
        }

        let len = run.len + std::mem::take(&mut pending);
        match out.last_mut() {
            Some(prev) if prev.keying == run.keying => prev.len += len,
            _ => out.push(Run {
                keying: run.keying,
                len,
            }),
        }
    }

    if pending > 0 {
        if let Some(first) = runs.first() {
            out.push(Run {
                keying: first.keying,
                len: pending,
            });
        }
    }

    out
}

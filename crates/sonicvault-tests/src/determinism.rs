//! Determinism checks for rendered audio.

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// Byte offset of the first difference, if any.
    pub first_difference: Option<usize>,
}

impl DeterminismResult {
    /// Panics with the first difference if the output was not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(offset) = self.first_difference {
            panic!(
                "output differs at byte {offset} across {} runs (reference hash {})",
                self.runs, self.hash
            );
        }
    }
}

/// Runs `generate_fn` `runs` times and compares every output byte-for-byte.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<[u8]>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference = reference.as_ref();
    let hash = blake3::hash(reference).to_hex().to_string();

    let first_difference = (1..runs).find_map(|_| {
        let output = generate_fn();
        let output = output.as_ref();
        reference
            .iter()
            .zip(output)
            .position(|(a, b)| a != b)
            .or_else(|| (reference.len() != output.len()).then(|| reference.len().min(output.len())))
    });

    DeterminismResult {
        is_deterministic: first_difference.is_none(),
        runs,
        hash,
        first_difference,
    }
}

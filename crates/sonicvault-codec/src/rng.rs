//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! Noise-based themes draw from here so the same message, theme and seed
//! always render to the same PCM. Each tone unit gets an independent stream
//! derived from the base seed and the unit's index.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives a seed for one unit from the base seed.
///
/// Hashes the base seed and unit index (little-endian) with BLAKE3 and keeps
/// the first four bytes.
pub fn derive_unit_seed(base_seed: u32, unit_index: u32) -> u32 {
    let mut input = [0u8; 8];
    input[..4].copy_from_slice(&base_seed.to_le_bytes());
    input[4..].copy_from_slice(&unit_index.to_le_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Creates the RNG for one unit.
pub fn create_unit_rng(base_seed: u32, unit_index: u32) -> Pcg32 {
    create_rng(derive_unit_seed(base_seed, unit_index))
}

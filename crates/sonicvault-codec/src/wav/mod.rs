//! Mono 16-bit PCM WAV files.
//!
//! Writing is deterministic: no timestamps or optional chunks, so the
//! BLAKE3 hash of the PCM payload identifies a rendering. Reading goes
//! through `hound` and accepts only the layout this module writes.

mod file;
mod format;
mod reader;
mod result;
mod writer;

#[cfg(test)]
mod tests;

pub use file::{load_wav, write_atomic};
pub use format::{WavFormat, BITS_PER_SAMPLE};
pub use reader::read_wav;
pub use result::WavResult;
pub use writer::{pcm16_to_sample, samples_to_pcm16, write_wav, write_wav_to_vec, HEADER_BYTES};

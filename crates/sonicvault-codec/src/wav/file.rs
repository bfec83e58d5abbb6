//! Filesystem helpers.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{CodecError, CodecResult};
use crate::signal::AudioSignal;

use super::reader::read_wav;

/// Writes `bytes` to `path` through a temporary sibling file.
///
/// Missing parent directories are created. Readers never observe a
/// partially written file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CodecResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| CodecError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| CodecError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| CodecError::io(path, e))?;
    tmp.flush().map_err(|e| CodecError::io(path, e))?;
    tmp.persist(path).map_err(|e| CodecError::io(path, e.error))?;
    Ok(())
}

/// Reads a WAV file recorded at `expected_rate`.
pub fn load_wav(path: &Path, expected_rate: u32) -> CodecResult<AudioSignal> {
    let file = File::open(path).map_err(|e| CodecError::io(path, e))?;
    let signal = read_wav(BufReader::new(file), expected_rate)?;
    tracing::info!(
        path = %path.display(),
        seconds = signal.duration_seconds(),
        "loaded wav"
    );
    Ok(signal)
}

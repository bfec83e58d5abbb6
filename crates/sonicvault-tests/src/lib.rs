//! SonicVault End-to-End Test Infrastructure
//!
//! Integration tests for the text/audio round trip:
//!
//! - Round trip: text -> audio -> text for every theme
//! - Files: WAV save/load and container validation
//! - **Determinism**: byte-identical PCM across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sonicvault-tests
//! ```

pub mod determinism;
pub mod fixtures;

pub use determinism::{verify_determinism, DeterminismResult};
pub use fixtures::{codec_at, MessageFixture, ROUND_TRIP_MESSAGES, TEST_SAMPLE_RATE};

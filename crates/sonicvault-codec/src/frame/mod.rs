//! Frame codec.
//!
//! Converts symbol sequences to binary pulse streams (`1`/`0` units with
//! `/` and `//` boundary markers) and pulse streams to timed durations.
//!
//! Unit table, in multiples of the base unit:
//!
//! | Unit | Units | Keying |
//! |------|-------|--------|
//! | dot | 1 | tone |
//! | dash | 3 | tone |
//! | gap between symbols | 1 | silence |
//! | gap between characters (`/`) | 3 | silence |
//! | gap between words (`//`) | 7 | silence |

mod pulse;
mod timing;


pub use pulse::{
    binary_to_symbols, symbols_to_binary, Pulse, PulseStream, CHAR_GAP_UNITS, DASH_UNITS,
    WORD_GAP_UNITS,
};
pub use timing::{DurationSequence, Keying, TimedUnit, TimingModel, UnitKind};

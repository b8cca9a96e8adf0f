//! Modulation codec.
//!
//! Converts [`Data`] trees to and from the wire's bit-string format, where
//! every bit is the ASCII character `0` or `1`.
//!
//! # Format
//!
//! | value | bits |
//! |-------|------|
//! | nil | `00` |
//! | cons | `11` car cdr |
//! | n >= 0 | `01` width magnitude |
//! | n < 0 | `10` width magnitude |
//!
//! The width is `w` one-bits and a terminating zero-bit, where `w` is the
//! least integer with `|n| < 2^(4w)`. The magnitude follows in exactly
//! `4w` big-endian bits. Zero therefore encodes as `010`.

mod demodulate;
mod modulate;

pub use demodulate::demodulate;
pub use modulate::modulate;

use gx_ir::Data;

/// Malformed bit string handed to [`demodulate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    #[error("invalid signal: tag `{tag}` at bit {offset}")]
    InvalidTag { tag: String, offset: usize },
    #[error("invalid signal: ends inside a value at bit {offset}")]
    Truncated { offset: usize },
    #[error("invalid signal: {count} unconsumed bits after bit {offset}")]
    TrailingBits { offset: usize, count: usize },
    #[error("invalid signal: {found:?} at {offset} is not a binary digit")]
    InvalidCharacter { found: char, offset: usize },
}

/// Encode then decode, checking the value survives the wire.
///
/// `modem` uses this to detach state values from the graph that produced them.
pub fn round_trip(data: &Data) -> Result<Data, SignalError> {
    demodulate(&modulate(data))
}

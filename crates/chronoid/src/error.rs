use core::time::Duration;

/// A result type defaulting to [`enum@Error`].
///
/// Generator construction, packing, parsing, and any operation touching
/// shared state return this alias.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `chronoid` can produce.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A component does not fit the bit width allocated to it.
    ///
    /// Returned when packing a timestamp, node ID, or sequence that exceeds
    /// its configured width, and at construction when the node ID is out of
    /// range for the layout.
    #[error("{field} value {value} does not fit in {bits} bits")]
    OutOfRange {
        /// Which component overflowed (`"timestamp"`, `"node_id"`, or
        /// `"sequence"`).
        field: &'static str,
        /// The offending value.
        value: u64,
        /// The width allocated to the component.
        bits: u32,
    },

    /// The requested bit widths do not describe a valid 63-bit layout.
    ///
    /// Widths must sum to exactly 63 (the sign bit stays clear), and the
    /// timestamp and sequence fields must be non-zero.
    #[error(
        "bit layout {timestamp_bits}/{node_bits}/{sequence_bits} is invalid: \
         widths must sum to 63 with non-zero timestamp and sequence"
    )]
    InvalidLayout {
        /// Requested timestamp width.
        timestamp_bits: u32,
        /// Requested node width.
        node_bits: u32,
        /// Requested sequence width.
        sequence_bits: u32,
    },

    /// The clock reported a time earlier than previously observed.
    ///
    /// Surfaced when the regression exceeds the configured
    /// [`RegressionPolicy`](crate::RegressionPolicy) tolerance. Generator
    /// state is left untouched; retrying once the clock recovers succeeds.
    #[error("clock moved backwards by {behind:?}")]
    ClockRegression {
        /// How far behind the last observed timestamp the clock is.
        behind: Duration,
    },

    /// The sequence space for the current millisecond is exhausted and the
    /// clock did not advance within the caller's wait bound.
    #[error("sequence exhausted, clock did not advance within {waited:?}")]
    SequenceExhausted {
        /// How long the caller waited before giving up.
        waited: Duration,
    },

    /// The configured epoch lies in the clock's future.
    #[error("epoch is {ahead:?} ahead of the current clock")]
    EpochAhead {
        /// How far ahead of the clock the epoch is.
        ahead: Duration,
    },

    /// A textual identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidFormat(#[from] FormatError),

    /// Another thread panicked while holding generator state.
    ///
    /// Only reachable with the std mutex; `parking_lot` locks do not poison.
    #[error("generator lock poisoned")]
    LockPoisoned,
}

/// Why a textual identifier failed to parse.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormatError {
    /// The input length does not match the expected encoding length.
    #[error("expected {expected} characters, found {found}")]
    Length { expected: usize, found: usize },

    /// A byte outside the expected alphabet.
    #[error("invalid character {byte:#04x} at index {index}")]
    Char { byte: u8, index: usize },

    /// Hex input with an odd number of digits.
    #[error("hex input has odd length {len}")]
    OddLength { len: usize },

    /// The decoded value does not fit the target type.
    #[error("decoded value overflows the identifier width")]
    Overflow,

    /// A security token without the `.` separating payload from signature.
    #[error("missing `.` separator between payload and signature")]
    MissingSeparator,

    /// A security token's signature did not match its payload.
    #[error("signature mismatch")]
    SignatureMismatch,
}

#[cfg(not(feature = "parking-lot"))]
use std::sync::{MutexGuard, PoisonError};

// Collapse poisoned std locks into `LockPoisoned` so callers see one variant
// regardless of guard type.
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}

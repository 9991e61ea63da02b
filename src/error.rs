//! Error types for fallible operations in this crate.
//!
//! Every fallible API returns a [`RandResult`](crate::RandResult) carrying a
//! [`RandError`], the single error enum used throughout the crate.

use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// This enum contains all error conditions this library can report. Fallible
/// API functions generally return a [`RandResult`].
///
/// Every condition is a local, synchronous failure: the call that produced it
/// is aborted before any random word is consumed, so the generator state is
/// unchanged and subsequent calls behave as if the failed call never happened.
///
/// [`RandResult`]: crate::RandResult
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RandError {
    /// A bounded draw was requested with an upper bound that admits no values.
    ///
    /// Signed bounds must be strictly positive; unsigned bounds must be
    /// non-zero.
    InvalidBound {
        /// Further specifies which operation rejected which bound.
        info: String,
    },
    /// Weighted sampling was invoked with an empty weight slice.
    EmptyWeights,
    /// A weight sequence of a positivity-required type (floating-point or
    /// signed integer) contained a value less than or equal to zero, or a NaN.
    NonPositiveWeight {
        /// Position of the offending weight in the input slice.
        index: usize,
    },
    /// An unsigned weight sequence summed to zero, leaving no index with any
    /// probability mass to draw from.
    ZeroTotalWeight,
}

impl Display for RandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandError::InvalidBound { info } => {
                write!(f, "Invalid bound: {}", info)
            }
            RandError::EmptyWeights => {
                write!(f, "Weighted sampling requires a non-empty weight slice.")
            }
            RandError::NonPositiveWeight { index } => {
                write!(
                    f,
                    "Weight at index {} must be strictly positive for this weight type.",
                    index
                )
            }
            RandError::ZeroTotalWeight => {
                write!(
                    f,
                    "Unsigned weights sum to zero; at least one weight must be non-zero."
                )
            }
        }
    }
}

impl Error for RandError {}

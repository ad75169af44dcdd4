//! Errors reported by the checked scorers.

use thiserror::Error;

/// Misuse of a [`crate::jaro::MultiJaro`] scorer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum JaroError {
    /// A pattern does not fit in one lane
    #[error("pattern of {len} symbols does not fit in a lane of {max}")]
    PatternTooLong {
        /// Length of the rejected pattern
        len: usize,
        /// Longest pattern a lane holds
        max: usize,
    },
    /// More patterns inserted than the scorer was created for
    #[error("scorer is full ({capacity} patterns)")]
    CapacityExceeded {
        /// Number of patterns the scorer was created for
        capacity: usize,
    },
    /// The score buffer cannot hold one score per pattern
    #[error("score buffer holds {got} scores, {needed} needed")]
    OutputTooSmall {
        /// Number of inserted patterns
        needed: usize,
        /// Length of the provided buffer
        got: usize,
    },
}

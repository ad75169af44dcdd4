//! Bit-parallel Jaro similarity for Rust.
//!
//! Scores two sequences of comparable symbols (bytes, chars, token ids, ...)
//! with the Jaro metric using a few 64-bit word operations per text symbol,
//! and scores many short patterns against one text at once with a SIMD lane
//! kernel.
//!
//! # Examples
//!
//! ```
//! use bitjaro::prelude::*;
//!
//! assert!((jaro_similarity(b"DIXON", b"DICKSONX", 0.0) - 0.7667).abs() < 1e-4);
//!
//! let cached = CachedJaro::new(b"MARTHA");
//! assert!(cached.similarity(b"MARHTA", 0.9) > 0.94);
//! assert_eq!(cached.similarity(b"DICKSONX", 0.9), 0.0);
//!
//! let matcher = JaroMatcher::new(JaroOptionsBuilder::default().score_cutoff(0.9).build().unwrap());
//! assert!(matcher.similarity("marhta", "martha").is_some());
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub use crate::error::JaroError;
pub use crate::jaro::{
    CachedJaro, MultiJaro, jaro_distance, jaro_similarity, jaro_similarity_batch, jaro_similarity_with_index,
};
pub use crate::matcher::JaroMatcher;
pub use crate::options::JaroOptions;
pub use crate::pattern_match::OccurrenceIndex;
pub use crate::symbol::Symbol;

pub mod error;
pub mod jaro;
pub mod matcher;
pub mod options;
pub mod pattern_match;
pub mod prelude;
pub mod symbol;
mod util;

//==============================================================================
// Case handling of the string matcher

#[derive(Eq, PartialEq, Debug, Copy, Clone, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "cli", clap(rename_all = "snake_case"))]
/// Case sensitivity mode for matching
pub enum CaseMatching {
    /// Case-sensitive matching
    Respect,
    /// Case-insensitive matching
    Ignore,
    /// Smart case: case-insensitive unless query contains uppercase
    #[default]
    Smart,
}

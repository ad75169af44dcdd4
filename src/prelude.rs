//! Convenience re-exports of commonly used types.
//!
//! This module provides a convenient way to import the scorers, indices and
//! options with a single `use bitjaro::prelude::*;` statement.

pub use crate::CaseMatching;
pub use crate::error::JaroError;
pub use crate::jaro::{
    CachedJaro, MultiJaro, jaro_distance, jaro_similarity, jaro_similarity_batch, jaro_similarity_with_index,
};
pub use crate::matcher::JaroMatcher;
pub use crate::options::{JaroOptions, JaroOptionsBuilder};
pub use crate::pattern_match::{BlockPatternMatchVector, OccurrenceIndex, PatternMatchVector};
pub use crate::symbol::Symbol;

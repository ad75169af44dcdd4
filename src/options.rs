//! Configuration options for the string matcher.
//!
//! This module provides the `JaroOptions` struct and builder, shared by the
//! library matcher and the `sk-jaro` command line.

use derive_builder::Builder;

use crate::CaseMatching;

/// Scoring options
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(default)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct JaroOptions {
    /// Minimum similarity to report
    ///
    /// Pairs scoring below the cutoff are rejected without computing their exact score.
    /// A cutoff above 1.0 rejects everything.
    #[cfg_attr(feature = "cli", arg(short = 'c', long = "cutoff", default_value_t = 0.0))]
    pub score_cutoff: f64,

    /// Case sensitivity
    ///
    /// smart: case-insensitive unless the query contains an uppercase letter
    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t = CaseMatching::Smart))]
    pub case: CaseMatching,
}

impl Default for JaroOptions {
    fn default() -> Self {
        Self {
            score_cutoff: 0.0,
            case: CaseMatching::default(),
        }
    }
}

impl JaroOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.score_cutoff {
            Some(cutoff) if cutoff.is_nan() => Err(String::from("score cutoff must be a number")),
            _ => Ok(()),
        }
    }
}

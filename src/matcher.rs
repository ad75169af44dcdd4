//! String-level Jaro matcher.
//!
//! Wraps the sequence kernels for `&str` inputs: applies the case mode,
//! converts to `char` sequences in per-thread buffers and turns scores below
//! the cutoff into `None`.

use std::cell::RefCell;

use thread_local::ThreadLocal;

use crate::CaseMatching;
use crate::jaro::{jaro_distance, jaro_similarity};
use crate::options::JaroOptions;

/// Jaro matcher for strings.
///
/// # Example:
/// ```
/// use bitjaro::matcher::JaroMatcher;
/// use bitjaro::options::JaroOptionsBuilder;
///
/// let matcher = JaroMatcher::new(JaroOptionsBuilder::default().score_cutoff(0.7).build().unwrap());
///
/// assert!(matcher.similarity("Martha", "marhta").unwrap() > 0.94);
/// // an uppercase letter in the pattern makes the comparison case-sensitive
/// assert!(matcher.similarity("martha", "MARHTA").is_none());
/// assert!(matcher.similarity("abc", "xyz").is_none());
/// ```
#[derive(Debug, Default)]
pub struct JaroMatcher {
    options: JaroOptions,
    c_cache: ThreadLocal<RefCell<Vec<char>>>,
    p_cache: ThreadLocal<RefCell<Vec<char>>>,
}

impl JaroMatcher {
    /// Creates a matcher from options.
    pub fn new(options: JaroOptions) -> Self {
        debug!(
            "Creating jaro matcher with cutoff {} and case {:?}",
            options.score_cutoff, options.case
        );
        Self {
            options,
            c_cache: ThreadLocal::new(),
            p_cache: ThreadLocal::new(),
        }
    }

    /// The options this matcher was created with.
    pub fn options(&self) -> &JaroOptions {
        &self.options
    }

    fn contains_upper(string: &str) -> bool {
        string.chars().any(|ch| ch.is_uppercase())
    }

    fn is_case_sensitive(&self, pattern: &str) -> bool {
        match self.options.case {
            CaseMatching::Respect => true,
            CaseMatching::Ignore => false,
            CaseMatching::Smart => Self::contains_upper(pattern),
        }
    }

    /// Runs `score` over both strings with the case mode applied.
    fn with_sequences<R>(&self, choice: &str, pattern: &str, score: impl FnOnce(&[char], &[char]) -> R) -> R {
        let case_sensitive = self.is_case_sensitive(pattern);

        let mut choice_chars = self.c_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();
        let mut pattern_chars = self.p_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();

        choice_chars.clear();
        pattern_chars.clear();
        if case_sensitive {
            choice_chars.extend(choice.chars());
            pattern_chars.extend(pattern.chars());
        } else {
            choice_chars.extend(choice.chars().flat_map(char::to_lowercase));
            pattern_chars.extend(pattern.chars().flat_map(char::to_lowercase));
        }

        score(&pattern_chars, &choice_chars)
    }

    /// Similarity of `choice` and `pattern`, `None` below the cutoff.
    pub fn similarity(&self, choice: &str, pattern: &str) -> Option<f64> {
        let cutoff = self.options.score_cutoff;

        // ASCII fast path, no buffer needed
        if self.is_case_sensitive(pattern) && choice.is_ascii() && pattern.is_ascii() {
            let sim = jaro_similarity(pattern.as_bytes(), choice.as_bytes(), cutoff);
            return Self::accept(sim, cutoff);
        }

        let sim = self.with_sequences(choice, pattern, |p, c| jaro_similarity(p, c, cutoff));
        Self::accept(sim, cutoff)
    }

    /// Distance (`1 - similarity`) of `choice` and `pattern`, `None` when the
    /// similarity is below the cutoff.
    pub fn distance(&self, choice: &str, pattern: &str) -> Option<f64> {
        let max_distance = 1.0 - self.options.score_cutoff;
        let dist = self.with_sequences(choice, pattern, |p, c| jaro_distance(p, c, max_distance));
        if dist <= max_distance { Some(dist) } else { None }
    }

    fn accept(sim: f64, cutoff: f64) -> Option<f64> {
        // a zero score is only a real match when nothing is filtered
        (sim > 0.0 || cutoff <= 0.0).then_some(sim)
    }
}

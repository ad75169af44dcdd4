//! Bit-parallel Jaro similarity.
//!
//! The classic algorithm slides a window of half-width `bound` over the
//! pattern for every text position and greedily matches the leftmost free
//! equal symbol inside it. Here the window, the free positions and the
//! occurrences of a symbol are all 64-bit masks, so every text position costs
//! a handful of word operations:
//!
//! - sequences of at most 64 symbols use a single word (`word`),
//! - longer sequences walk an array of words with a sliding boundary mask
//!   (`block`),
//! - many short patterns against a shared text run side by side in SIMD
//!   lanes ([`batch`]).
//!
//! Two filters (see [`filter`]) reject pairs that cannot reach the score
//! cutoff before, and right after, the matching pass.
//!
//! # Example:
//! ```
//! use bitjaro::jaro::jaro_similarity;
//!
//! let martha: Vec<char> = "MARTHA".chars().collect();
//! let marhta: Vec<char> = "MARHTA".chars().collect();
//! let sim = jaro_similarity(&martha, &marhta, 0.0);
//! assert!((sim - 0.9444).abs() < 1e-4);
//!
//! // below the cutoff, the exact value is not computed
//! assert_eq!(jaro_similarity(&martha, &marhta, 0.95), 0.0);
//! ```

pub mod batch;
mod block;
pub mod filter;
pub mod reference;
mod word;

pub use self::batch::{LANES, MAX_LANE_LEN, NARROW_LANE_LEN, NARROW_LANES, jaro_similarity_batch};

use self::block::{count_transpositions_block, flag_similar_characters_block};
use self::filter::{calculate_similarity, common_char_filter, length_filter, trim_unreachable};
use self::word::{count_transpositions_word, flag_similar_characters_word};
use crate::error::JaroError;
use crate::pattern_match::{BlockPatternMatchVector, OccurrenceIndex, PatternMatchVector};
use crate::symbol::Symbol;
use crate::util::{WORD_BITS, common_prefix_len};

/// Jaro similarity of `p` and `t`.
///
/// Returns 0 when the similarity is below `score_cutoff` (the exact value is
/// not computed in that case) and the exact similarity otherwise. A cutoff
/// above 1.0 always yields 0.
pub fn jaro_similarity<S: Symbol>(p: &[S], t: &[S], score_cutoff: f64) -> f64 {
    let p_len = p.len();
    let t_len = t.len();

    if score_cutoff > 1.0 {
        return 0.0;
    }

    if p_len == 0 && t_len == 0 {
        return 1.0;
    }

    if !length_filter(p_len, t_len, score_cutoff) {
        trace!("length filter rejected {p_len}/{t_len} at cutoff {score_cutoff}");
        return 0.0;
    }

    if p_len == 1 && t_len == 1 {
        return f64::from(u8::from(p[0] == t[0]));
    }

    let (p, t, bound) = trim_unreachable(p, t);

    // the shared leading run is matched in order, it never transposes
    let prefix = common_prefix_len(p, t);
    let (p, t) = (&p[prefix..], &t[prefix..]);
    let mut common_chars = prefix;
    let mut transpositions = 0;

    if p.is_empty() || t.is_empty() {
        // nothing left to match
    } else if p.len() <= WORD_BITS && t.len() <= WORD_BITS {
        let pm = PatternMatchVector::new(p);
        let flagged = flag_similar_characters_word(&pm, p.len(), t, bound);
        common_chars += flagged.count_common_chars();

        if !common_char_filter(p_len, t_len, common_chars, score_cutoff) {
            trace!("common character filter rejected {p_len}/{t_len} with {common_chars} common");
            return 0.0;
        }

        transpositions = count_transpositions_word(&pm, t, &flagged);
    } else {
        let pm = BlockPatternMatchVector::new(p);
        let flagged = flag_similar_characters_block(&pm, p.len(), t, bound);
        let flagged_chars = flagged.count_common_chars();
        common_chars += flagged_chars;

        if !common_char_filter(p_len, t_len, common_chars, score_cutoff) {
            trace!("common character filter rejected {p_len}/{t_len} with {common_chars} common");
            return 0.0;
        }

        transpositions = count_transpositions_block(&pm, t, &flagged, flagged_chars);
    }

    let sim = calculate_similarity(p_len, t_len, common_chars, transpositions);
    if sim >= score_cutoff { sim } else { 0.0 }
}

/// Jaro similarity of `p` and `t`, reusing a prebuilt index of `p`.
///
/// `pm` must have been built from `p` (or hold `p` at word 0). Results are
/// identical to [`jaro_similarity`].
pub fn jaro_similarity_with_index<S: Symbol, I: OccurrenceIndex<S>>(
    pm: &I,
    p: &[S],
    t: &[S],
    score_cutoff: f64,
) -> f64 {
    similarity_with_index(pm, p.len(), t, score_cutoff)
}

/// Indexed path, only the pattern length is needed next to its index.
pub(crate) fn similarity_with_index<S: Symbol, I: OccurrenceIndex<S>>(
    pm: &I,
    p_len: usize,
    t: &[S],
    score_cutoff: f64,
) -> f64 {
    let t_len = t.len();

    if score_cutoff > 1.0 {
        return 0.0;
    }

    if p_len == 0 && t_len == 0 {
        return 1.0;
    }

    if !length_filter(p_len, t_len, score_cutoff) {
        return 0.0;
    }

    if p_len == 1 && t_len == 1 {
        return f64::from(u8::from(pm.get(0, t[0]) & 1 != 0));
    }

    let bound = filter::jaro_bound(p_len, t_len);
    let p_len_trimmed = p_len.min(t_len + bound);
    let t = &t[..t_len.min(p_len + bound)];

    let common_chars;
    let transpositions;
    if p_len_trimmed <= WORD_BITS && t.len() <= WORD_BITS {
        let flagged = flag_similar_characters_word(pm, p_len_trimmed, t, bound);
        common_chars = flagged.count_common_chars();

        if !common_char_filter(p_len, t_len, common_chars, score_cutoff) {
            return 0.0;
        }

        transpositions = count_transpositions_word(pm, t, &flagged);
    } else {
        let flagged = flag_similar_characters_block(pm, p_len_trimmed, t, bound);
        common_chars = flagged.count_common_chars();

        if !common_char_filter(p_len, t_len, common_chars, score_cutoff) {
            return 0.0;
        }

        transpositions = count_transpositions_block(pm, t, &flagged, common_chars);
    }

    let sim = calculate_similarity(p_len, t_len, common_chars, transpositions);
    if sim >= score_cutoff { sim } else { 0.0 }
}

/// Maps a distance cutoff onto the similarity cutoff that decides it.
#[inline]
fn distance_from_similarity(score_cutoff: f64, similarity: impl FnOnce(f64) -> f64) -> f64 {
    let cutoff_similarity = (1.0 - score_cutoff).max(0.0);
    let dist = 1.0 - similarity(cutoff_similarity);
    if dist <= score_cutoff { dist } else { 1.0 }
}

/// Jaro distance (`1 - similarity`) of `p` and `t`.
///
/// Returns 1.0 when the distance is above `score_cutoff`.
pub fn jaro_distance<S: Symbol>(p: &[S], t: &[S], score_cutoff: f64) -> f64 {
    distance_from_similarity(score_cutoff, |cutoff| jaro_similarity(p, t, cutoff))
}

//==============================================================================
/// A pattern together with its occurrence index, scored against many texts.
#[derive(Debug, Clone)]
pub struct CachedJaro<S: Symbol> {
    pattern: Vec<S>,
    pm: BlockPatternMatchVector<S>,
}

impl<S: Symbol> CachedJaro<S> {
    /// Index `pattern` once.
    pub fn new(pattern: &[S]) -> Self {
        Self {
            pattern: pattern.to_vec(),
            pm: BlockPatternMatchVector::new(pattern),
        }
    }

    /// The cached pattern.
    pub fn pattern(&self) -> &[S] {
        &self.pattern
    }

    /// See [`jaro_similarity`].
    pub fn similarity(&self, text: &[S], score_cutoff: f64) -> f64 {
        jaro_similarity_with_index(&self.pm, &self.pattern, text, score_cutoff)
    }

    /// See [`jaro_distance`].
    pub fn distance(&self, text: &[S], score_cutoff: f64) -> f64 {
        distance_from_similarity(score_cutoff, |cutoff| self.similarity(text, cutoff))
    }

    /// Jaro is already normalized, this is [`CachedJaro::similarity`].
    pub fn normalized_similarity(&self, text: &[S], score_cutoff: f64) -> f64 {
        self.similarity(text, score_cutoff)
    }

    /// Jaro is already normalized, this is [`CachedJaro::distance`].
    pub fn normalized_distance(&self, text: &[S], score_cutoff: f64) -> f64 {
        self.distance(text, score_cutoff)
    }
}

//==============================================================================
/// Many short patterns scored against one text per call with the lane kernel.
///
/// # Example:
/// ```
/// use bitjaro::jaro::MultiJaro;
///
/// let mut scorer = MultiJaro::<u8>::new(2);
/// scorer.insert(b"martha").unwrap();
/// scorer.insert(b"dixon").unwrap();
///
/// let mut scores = vec![0.0; scorer.result_count()];
/// scorer.similarity(b"marhta", 0.0, &mut scores).unwrap();
/// assert!((scores[0] - 0.9444).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct MultiJaro<S: Symbol> {
    capacity: usize,
    pm: BlockPatternMatchVector<S>,
    lens: Vec<usize>,
}

impl<S: Symbol> MultiJaro<S> {
    /// A scorer with room for `count` patterns.
    pub fn new(count: usize) -> Self {
        let words = count.div_ceil(NARROW_LANES) * NARROW_LANES;
        debug!("creating multi-pattern jaro scorer for {count} patterns ({words} lanes)");
        Self {
            capacity: count,
            pm: BlockPatternMatchVector::with_words(words),
            lens: Vec::with_capacity(count),
        }
    }

    /// Add the next pattern. Patterns keep their insertion order in the scores.
    pub fn insert(&mut self, pattern: &[S]) -> Result<(), JaroError> {
        if self.lens.len() >= self.capacity {
            return Err(JaroError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if pattern.len() > MAX_LANE_LEN {
            return Err(JaroError::PatternTooLong {
                len: pattern.len(),
                max: MAX_LANE_LEN,
            });
        }

        self.pm.insert_at(self.lens.len(), pattern);
        self.lens.push(pattern.len());
        Ok(())
    }

    /// Number of scores written by [`MultiJaro::similarity`].
    pub fn result_count(&self) -> usize {
        self.lens.len()
    }

    /// Score every inserted pattern against `text` into `scores`.
    pub fn similarity(&self, text: &[S], score_cutoff: f64, scores: &mut [f64]) -> Result<(), JaroError> {
        if scores.len() < self.lens.len() {
            return Err(JaroError::OutputTooSmall {
                needed: self.lens.len(),
                got: scores.len(),
            });
        }

        jaro_similarity_batch(scores, &self.pm, &self.lens, text, score_cutoff);
        Ok(())
    }
}

//! Multi-word matcher for sequences longer than 64 symbols.
//!
//! The pattern window `[j - bound, j + bound]` is tracked per text position by
//! a [`SearchBoundMask`]: a run of `words` consecutive pattern words starting
//! after `empty_words` words that already fell out of the window. The first
//! and last word of the run are only partially inside the window and are
//! masked by `first_mask` and `last_mask`; the words between them are scanned
//! unmasked.

use crate::pattern_match::OccurrenceIndex;
use crate::symbol::Symbol;
use crate::util::{WORD_BITS, blsi, blsr};

/// Matched positions of both sequences, one bit per position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FlaggedCharsMultiword {
    pub(crate) p_flag: Vec<u64>,
    pub(crate) t_flag: Vec<u64>,
}

impl FlaggedCharsMultiword {
    /// Both flag sets hold the same number of bits, count the shorter one.
    pub(crate) fn count_common_chars(&self) -> usize {
        let flags = if self.p_flag.len() < self.t_flag.len() {
            &self.p_flag
        } else {
            &self.t_flag
        };
        flags.iter().map(|flag| flag.count_ones() as usize).sum()
    }
}

/// Pattern window of the current text position, at word granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SearchBoundMask {
    pub(crate) words: usize,
    pub(crate) empty_words: usize,
    pub(crate) last_mask: u64,
    pub(crate) first_mask: u64,
}

impl SearchBoundMask {
    /// Window of text position 0: pattern positions `[0, min(bound + 1, p_len))`.
    pub(crate) fn new(p_len: usize, bound: usize) -> Self {
        let start_range = (bound + 1).min(p_len);
        Self {
            words: 1 + start_range / WORD_BITS,
            empty_words: 0,
            last_mask: (1u64 << (start_range % WORD_BITS)) - 1,
            first_mask: u64::MAX,
        }
    }

    /// Move the window from text position `j` to `j + 1`.
    pub(crate) fn advance(&mut self, j: usize, p_len: usize, bound: usize) {
        if j + bound + 1 < p_len {
            self.last_mask = (self.last_mask << 1) | 1;
            if j + bound + 2 < p_len && self.last_mask == u64::MAX {
                self.last_mask = 0;
                self.words += 1;
            }
        }

        if j >= bound {
            self.first_mask <<= 1;
            if self.first_mask == 0 {
                self.first_mask = u64::MAX;
                self.words -= 1;
                self.empty_words += 1;
            }
        }
    }
}

/// Flag the pattern position matched by `symbol`, the text symbol at `j`.
#[inline]
fn flag_similar_characters_step<S: Symbol, I: OccurrenceIndex<S>>(
    pm: &I,
    symbol: S,
    flagged: &mut FlaggedCharsMultiword,
    j: usize,
    bound_mask: SearchBoundMask,
) {
    let j_word = j / WORD_BITS;
    let j_pos = j % WORD_BITS;
    let mut word = bound_mask.empty_words;
    let last_word = word + bound_mask.words;

    if bound_mask.words == 1 {
        let pm_j =
            pm.get(word, symbol) & bound_mask.last_mask & bound_mask.first_mask & !flagged.p_flag[word];

        flagged.p_flag[word] |= blsi(pm_j);
        flagged.t_flag[j_word] |= u64::from(pm_j != 0) << j_pos;
        return;
    }

    if bound_mask.first_mask != 0 {
        let pm_j = pm.get(word, symbol) & bound_mask.first_mask & !flagged.p_flag[word];

        if pm_j != 0 {
            flagged.p_flag[word] |= blsi(pm_j);
            flagged.t_flag[j_word] |= 1u64 << j_pos;
            return;
        }
        word += 1;
    }

    // unrolled scan, only worth it when lookups hit the dense table
    if symbol.extended_ascii().is_some() {
        while word + 3 < last_word - 1 {
            let pm_j: [u64; 4] = std::array::from_fn(|i| pm.get(word + i, symbol) & !flagged.p_flag[word + i]);

            if let Some(i) = pm_j.iter().position(|&m| m != 0) {
                flagged.p_flag[word + i] |= blsi(pm_j[i]);
                flagged.t_flag[j_word] |= 1u64 << j_pos;
                return;
            }
            word += 4;
        }
    }

    while word < last_word - 1 {
        let pm_j = pm.get(word, symbol) & !flagged.p_flag[word];

        if pm_j != 0 {
            flagged.p_flag[word] |= blsi(pm_j);
            flagged.t_flag[j_word] |= 1u64 << j_pos;
            return;
        }
        word += 1;
    }

    if bound_mask.last_mask != 0 {
        let pm_j = pm.get(word, symbol) & bound_mask.last_mask & !flagged.p_flag[word];

        flagged.p_flag[word] |= blsi(pm_j);
        flagged.t_flag[j_word] |= u64::from(pm_j != 0) << j_pos;
    }
}

/// Multi-word counterpart of [`super::word::flag_similar_characters_word`],
/// with identical matching decisions.
pub(crate) fn flag_similar_characters_block<S: Symbol, I: OccurrenceIndex<S>>(
    pm: &I,
    p_len: usize,
    t: &[S],
    bound: usize,
) -> FlaggedCharsMultiword {
    debug_assert!(p_len > WORD_BITS || t.len() > WORD_BITS);
    debug_assert!(bound > p_len || p_len - bound <= t.len());
    debug_assert!(bound >= 31);

    let mut flagged = FlaggedCharsMultiword {
        p_flag: vec![0; p_len.div_ceil(WORD_BITS)],
        t_flag: vec![0; t.len().div_ceil(WORD_BITS)],
    };

    let mut bound_mask = SearchBoundMask::new(p_len, bound);
    for (j, &symbol) in t.iter().enumerate() {
        flag_similar_characters_step(pm, symbol, &mut flagged, j, bound_mask);
        bound_mask.advance(j, p_len, bound);
    }

    flagged
}

/// Transposition count over multi-word flag sets; `flagged_chars` is the
/// number of matched pairs.
pub(crate) fn count_transpositions_block<S: Symbol, I: OccurrenceIndex<S>>(
    pm: &I,
    t: &[S],
    flagged: &FlaggedCharsMultiword,
    mut flagged_chars: usize,
) -> usize {
    let mut text_word = 0;
    let mut pattern_word = 0;
    let mut t_flag = flagged.t_flag.first().copied().unwrap_or(0);
    let mut p_flag = flagged.p_flag.first().copied().unwrap_or(0);

    let mut transpositions = 0;
    while flagged_chars != 0 {
        while t_flag == 0 {
            text_word += 1;
            t_flag = flagged.t_flag[text_word];
        }

        while t_flag != 0 {
            while p_flag == 0 {
                pattern_word += 1;
                p_flag = flagged.p_flag[pattern_word];
            }

            let pattern_flag_mask = blsi(p_flag);

            let symbol = t[text_word * WORD_BITS + t_flag.trailing_zeros() as usize];
            transpositions += usize::from(pm.get(pattern_word, symbol) & pattern_flag_mask == 0);

            t_flag = blsr(t_flag);
            p_flag ^= pattern_flag_mask;

            flagged_chars -= 1;
        }
    }

    transpositions
}

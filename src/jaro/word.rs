//! Single-word matcher for sequences of at most 64 symbols.

use crate::pattern_match::OccurrenceIndex;
use crate::symbol::Symbol;
use crate::util::{WORD_BITS, bit_mask_lsb, blsi, blsr};

/// Matched positions of both sequences, one bit per position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FlaggedCharsWord {
    pub(crate) p_flag: u64,
    pub(crate) t_flag: u64,
}

impl FlaggedCharsWord {
    #[inline]
    pub(crate) fn count_common_chars(&self) -> usize {
        self.p_flag.count_ones() as usize
    }
}

/// Flag the symbols of `t` that have a counterpart in the pattern window.
///
/// Every text position takes the lowest unflagged pattern position holding
/// the same symbol inside `[j - bound, j + bound]`. The window starts with
/// `bound + 1` bits, grows by one bit per step for the first `bound` steps and
/// slides afterwards.
pub(crate) fn flag_similar_characters_word<S: Symbol, I: OccurrenceIndex<S>>(
    pm: &I,
    p_len: usize,
    t: &[S],
    bound: usize,
) -> FlaggedCharsWord {
    debug_assert!(p_len <= WORD_BITS);
    debug_assert!(t.len() <= WORD_BITS);
    debug_assert!(bound > p_len || p_len - bound <= t.len());

    let mut flagged = FlaggedCharsWord::default();
    let mut bound_mask = bit_mask_lsb(bound + 1);

    let growing = bound.min(t.len());
    for (j, &symbol) in t[..growing].iter().enumerate() {
        let pm_j = pm.get(0, symbol) & bound_mask & !flagged.p_flag;

        flagged.p_flag |= blsi(pm_j);
        flagged.t_flag |= u64::from(pm_j != 0) << j;

        bound_mask = (bound_mask << 1) | 1;
    }

    for (j, &symbol) in t.iter().enumerate().skip(growing) {
        let pm_j = pm.get(0, symbol) & bound_mask & !flagged.p_flag;

        flagged.p_flag |= blsi(pm_j);
        flagged.t_flag |= u64::from(pm_j != 0) << j;

        bound_mask <<= 1;
    }

    flagged
}

/// Count matched pairs whose symbols differ once both sides are read in
/// position order.
pub(crate) fn count_transpositions_word<S: Symbol, I: OccurrenceIndex<S>>(
    pm: &I,
    t: &[S],
    flagged: &FlaggedCharsWord,
) -> usize {
    let mut p_flag = flagged.p_flag;
    let mut t_flag = flagged.t_flag;
    let mut transpositions = 0;

    while t_flag != 0 {
        let pattern_flag_mask = blsi(p_flag);

        let symbol = t[t_flag.trailing_zeros() as usize];
        transpositions += usize::from(pm.get(0, symbol) & pattern_flag_mask == 0);

        t_flag = blsr(t_flag);
        p_flag ^= pattern_flag_mask;
    }

    transpositions
}

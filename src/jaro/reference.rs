//! Straightforward nested-loop Jaro, kept to cross-check the bit-parallel
//! matchers. `O(t_len * bound)` with no filters and no cutoff.

use super::filter::{calculate_similarity, jaro_bound};

/// Jaro similarity computed position by position.
///
/// Every text position takes the lowest unmatched pattern position with an
/// equal symbol inside its window, the same choice the bit-parallel matchers
/// make.
pub fn jaro_similarity<S: PartialEq>(p: &[S], t: &[S]) -> f64 {
    if p.is_empty() && t.is_empty() {
        return 1.0;
    }
    if p.is_empty() || t.is_empty() {
        return 0.0;
    }

    let bound = jaro_bound(p.len(), t.len());
    let mut p_matched = vec![false; p.len()];
    let mut t_matched = vec![false; t.len()];
    let mut common_chars = 0;

    for (j, symbol) in t.iter().enumerate() {
        let lo = j.saturating_sub(bound);
        let hi = (j + bound + 1).min(p.len());
        if lo >= hi {
            continue;
        }
        if let Some(i) = (lo..hi).find(|&i| !p_matched[i] && p[i] == *symbol) {
            p_matched[i] = true;
            t_matched[j] = true;
            common_chars += 1;
        }
    }

    if common_chars == 0 {
        return 0.0;
    }

    let p_order = p.iter().zip(&p_matched).filter(|(_, m)| **m).map(|(s, _)| s);
    let t_order = t.iter().zip(&t_matched).filter(|(_, m)| **m).map(|(s, _)| s);
    let transpositions = p_order.zip(t_order).filter(|(a, b)| a != b).count();

    calculate_similarity(p.len(), t.len(), common_chars, transpositions)
}

//! Window bounds, early-rejection filters and score assembly.

/// Half-width of the Jaro matching window.
///
/// `max(p_len, t_len) / 2 - 1`, clamped at zero so that sequences of length
/// one or less only ever match position-to-position.
#[inline]
pub fn jaro_bound(p_len: usize, t_len: usize) -> usize {
    (p_len.max(t_len) / 2).saturating_sub(1)
}

/// Drop the suffix of the longer sequence that no window can ever reach.
///
/// Returns the trimmed sequences and the bound derived from the untrimmed
/// lengths. The similarity of the trimmed pair, scored against the original
/// lengths, is the similarity of the original pair.
#[inline]
pub fn trim_unreachable<'a, 'b, S>(p: &'a [S], t: &'b [S]) -> (&'a [S], &'b [S], usize) {
    let bound = jaro_bound(p.len(), t.len());
    if t.len() > p.len() {
        let reach = p.len() + bound;
        (p, &t[..t.len().min(reach)], bound)
    } else {
        let reach = t.len() + bound;
        (&p[..p.len().min(reach)], t, bound)
    }
}

/// Upper bound of the score from the lengths alone: every symbol of the
/// shorter sequence matched, no transpositions.
#[inline]
pub fn length_filter(p_len: usize, t_len: usize, score_cutoff: f64) -> bool {
    if p_len == 0 || t_len == 0 {
        return false;
    }

    let min_len = p_len.min(t_len) as f64;
    let sim = (min_len / p_len as f64 + min_len / t_len as f64 + 1.0) / 3.0;
    sim >= score_cutoff
}

/// Upper bound of the score once the common characters are known.
#[inline]
pub fn common_char_filter(p_len: usize, t_len: usize, common_chars: usize, score_cutoff: f64) -> bool {
    if common_chars == 0 {
        return false;
    }

    let common = common_chars as f64;
    let sim = (common / p_len as f64 + common / t_len as f64 + 1.0) / 3.0;
    sim >= score_cutoff
}

/// Final Jaro score. `transpositions` is the raw count of out-of-order pairs
/// and is halved (rounding down) before use.
#[inline]
pub fn calculate_similarity(p_len: usize, t_len: usize, common_chars: usize, transpositions: usize) -> f64 {
    debug_assert!(common_chars > 0);
    debug_assert!(transpositions <= common_chars);

    let transpositions = transpositions / 2;
    let common = common_chars as f64;
    let sim = common / p_len as f64 + common / t_len as f64 + (common - transpositions as f64) / common;
    sim / 3.0
}

//! Lane-parallel Jaro kernel: many short patterns against one shared text.
//!
//! Each lane of a SIMD vector carries the word matcher state of one pattern.
//! The lanes step through the text together, each consulting its own word
//! of a lane-packed [`BlockPatternMatchVector`], and are finalized one by one
//! exactly like the scalar word path.
//!
//! Patterns and reachable text of at most 32 symbols run eight at a time in
//! `u32x8` lanes, everything else four at a time in `u64x4` lanes.

use std::ops::{Add, BitAnd, BitOr, Not, Shl, Shr, Sub};

use wide::{u32x8, u64x4};

use super::filter::{calculate_similarity, common_char_filter, jaro_bound};
use super::similarity_with_index;
use crate::pattern_match::{BlockPatternMatchVector, LaneView, OccurrenceIndex};
use crate::symbol::Symbol;
use crate::util::{WORD_BITS, bit_mask_lsb, blsi, blsr};

/// Number of patterns scored per pass with 64-bit lanes.
pub const LANES: usize = 4;

/// Maximum pattern length of a lane.
pub const MAX_LANE_LEN: usize = WORD_BITS;

/// Number of patterns scored per pass with 32-bit lanes.
pub const NARROW_LANES: usize = 8;

/// Longest pattern (and reachable text) the 32-bit lanes take.
pub const NARROW_LANE_LEN: usize = 32;

/// Widest lane count of any vector type.
const MAX_LANES: usize = NARROW_LANES;

/// Unsigned SIMD vector, one pattern word per lane.
trait LaneVector:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Shl<i32, Output = Self>
    + Shr<i32, Output = Self>
{
    const LANES: usize;
    const BITS: usize;

    fn splat_word(x: u64) -> Self;

    /// Low `BITS` bits of the first `LANES` words.
    fn from_words(words: &[u64; MAX_LANES]) -> Self;

    fn to_words(self) -> [u64; MAX_LANES];
}

impl LaneVector for u64x4 {
    const LANES: usize = LANES;
    const BITS: usize = 64;

    #[inline(always)]
    fn splat_word(x: u64) -> Self {
        u64x4::splat(x)
    }

    #[inline(always)]
    fn from_words(words: &[u64; MAX_LANES]) -> Self {
        u64x4::from([words[0], words[1], words[2], words[3]])
    }

    #[inline(always)]
    fn to_words(self) -> [u64; MAX_LANES] {
        let lanes = self.to_array();
        std::array::from_fn(|lane| lanes.get(lane).copied().unwrap_or(0))
    }
}

impl LaneVector for u32x8 {
    const LANES: usize = NARROW_LANES;
    const BITS: usize = 32;

    #[inline(always)]
    fn splat_word(x: u64) -> Self {
        u32x8::splat(x as u32)
    }

    #[inline(always)]
    fn from_words(words: &[u64; MAX_LANES]) -> Self {
        u32x8::from(words.map(|word| word as u32))
    }

    #[inline(always)]
    fn to_words(self) -> [u64; MAX_LANES] {
        self.to_array().map(u64::from)
    }
}

/// `x & -x` per lane.
#[inline(always)]
fn blsi_lanes<V: LaneVector>(x: V, one: V) -> V {
    x & (!x + one)
}

/// All ones in lanes where `x != 0`, zero elsewhere.
#[inline(always)]
fn nonzero_lanes<V: LaneVector>(x: V, zero: V, one: V) -> V {
    let top = (x | (!x + one)) >> (V::BITS as i32 - 1);
    zero - top
}

/// Whether every pattern, and the part of the text any of them can reach,
/// fits in a 32-bit lane.
fn fits_narrow_lanes(pattern_lens: &[usize], text_len: usize) -> bool {
    let max_len = pattern_lens.iter().copied().max().unwrap_or(0);
    let reach = text_len.min(max_len + jaro_bound(max_len, text_len));
    max_len <= NARROW_LANE_LEN && reach <= NARROW_LANE_LEN
}

/// Score every pattern of `pm` against `text`.
///
/// Pattern `k` occupies word `k` of `pm` and has length `pattern_lens[k]`
/// (at most [`MAX_LANE_LEN`]). `scores[k]` receives the same value
/// [`super::jaro_similarity`] would return for that pattern.
pub fn jaro_similarity_batch<S: Symbol>(
    scores: &mut [f64],
    pm: &BlockPatternMatchVector<S>,
    pattern_lens: &[usize],
    text: &[S],
    score_cutoff: f64,
) {
    debug_assert!(scores.len() >= pattern_lens.len());
    debug_assert!(pattern_lens.len() <= pm.words());
    debug_assert!(pattern_lens.iter().all(|&len| len <= MAX_LANE_LEN));

    let scores = &mut scores[..pattern_lens.len()];

    if score_cutoff > 1.0 {
        scores.fill(0.0);
        return;
    }

    if text.is_empty() {
        for (score, &len) in scores.iter_mut().zip(pattern_lens) {
            *score = if len == 0 { 1.0 } else { 0.0 };
        }
        return;
    }

    if fits_narrow_lanes(pattern_lens, text.len()) {
        trace!("scoring {} patterns in 32-bit lanes", pattern_lens.len());
        similarity_groups::<u32x8, S>(scores, pm, pattern_lens, text, score_cutoff);
    } else {
        similarity_groups::<u64x4, S>(scores, pm, pattern_lens, text, score_cutoff);
    }
}

fn similarity_groups<V: LaneVector, S: Symbol>(
    scores: &mut [f64],
    pm: &BlockPatternMatchVector<S>,
    pattern_lens: &[usize],
    text: &[S],
    score_cutoff: f64,
) {
    for (group, (lens, out)) in pattern_lens
        .chunks(V::LANES)
        .zip(scores.chunks_mut(V::LANES))
        .enumerate()
    {
        similarity_lanes::<V, S>(out, pm, group * V::LANES, lens, text, score_cutoff);
    }
}

fn similarity_lanes<V: LaneVector, S: Symbol>(
    scores: &mut [f64],
    pm: &BlockPatternMatchVector<S>,
    first_word: usize,
    lens: &[usize],
    text: &[S],
    score_cutoff: f64,
) {
    debug_assert!(lens.len() <= V::LANES);

    let mut bound_mask = [0u64; MAX_LANES];
    let mut grow = [0u64; MAX_LANES];
    let mut last_relevant = 0;
    for (lane, &len) in lens.iter().enumerate() {
        let bound = jaro_bound(len, text.len());
        last_relevant = last_relevant.max(len + bound);
        bound_mask[lane] = bit_mask_lsb(bound + 1);
        grow[lane] = bit_mask_lsb(bound);
    }

    let text_cur = &text[..text.len().min(last_relevant)];
    if text_cur.len() > V::BITS {
        debug!(
            "text reaches {} symbols, scoring lanes {}..{} one by one",
            text_cur.len(),
            first_word,
            first_word + lens.len()
        );
        for (lane, (score, &len)) in scores.iter_mut().zip(lens).enumerate() {
            let view = LaneView {
                block: pm,
                word: first_word + lane,
            };
            *score = similarity_with_index(&view, len, text, score_cutoff);
        }
        return;
    }

    let zero = V::splat_word(0);
    let one = V::splat_word(1);
    let mut bound_mask = V::from_words(&bound_mask);
    let mut grow = V::from_words(&grow);
    let mut p_flag = zero;
    let mut t_flag = zero;
    let mut counter = one;

    let words = pm.words();
    for &symbol in text_cur {
        let stored: [u64; MAX_LANES] = std::array::from_fn(|lane| {
            let word = first_word + lane;
            if lane < lens.len() && word < words {
                pm.get(word, symbol)
            } else {
                0
            }
        });
        let pm_j = V::from_words(&stored) & bound_mask & !p_flag;

        p_flag = p_flag | blsi_lanes(pm_j, one);
        t_flag = t_flag | (counter & nonzero_lanes(pm_j, zero, one));

        counter = counter << 1;
        bound_mask = (bound_mask << 1) | (grow & one);
        grow = grow >> 1;
    }

    let p_flags = p_flag.to_words();
    let t_flags = t_flag.to_words();
    for (lane, (score, &len)) in scores.iter_mut().zip(lens).enumerate() {
        let common_chars = p_flags[lane].count_ones() as usize;
        if !common_char_filter(len, text.len(), common_chars, score_cutoff) {
            *score = 0.0;
            continue;
        }

        let word = first_word + lane;
        let mut p_flag_cur = p_flags[lane];
        let mut t_flag_cur = t_flags[lane];
        let mut transpositions = 0;
        while t_flag_cur != 0 {
            let pattern_flag_mask = blsi(p_flag_cur);

            let symbol = text[t_flag_cur.trailing_zeros() as usize];
            transpositions += usize::from(pm.get(word, symbol) & pattern_flag_mask == 0);

            t_flag_cur = blsr(t_flag_cur);
            p_flag_cur ^= pattern_flag_mask;
        }

        let sim = calculate_similarity(len, text.len(), common_chars, transpositions);
        *score = if sim >= score_cutoff { sim } else { 0.0 };
    }
}

//! Occurrence indices: for every symbol, the bitmask of positions holding it.
//!
//! The matchers only ever ask one question of a pattern: "which positions of
//! word `w` hold symbol `c`?". Byte-sized symbols are answered from a dense
//! 256-entry table, everything else from a hash map. Both index types are
//! immutable once built, so a single instance can be shared between threads
//! and reused across any number of texts.

use std::collections::HashMap;

use crate::symbol::Symbol;
use crate::util::WORD_BITS;

const EXTENDED_ASCII: usize = 256;

/// Answers "bitmask of positions in word `word` equal to `symbol`".
pub trait OccurrenceIndex<S: Symbol> {
    /// Bit `k` of the result is set iff position `word * 64 + k` holds `symbol`.
    fn get(&self, word: usize, symbol: S) -> u64;
}

/// Occurrence index for a pattern of at most 64 symbols.
#[derive(Debug, Clone)]
pub struct PatternMatchVector<S: Symbol> {
    extended_ascii: [u64; EXTENDED_ASCII],
    map: HashMap<S, u64>,
}

impl<S: Symbol> PatternMatchVector<S> {
    /// Build the index of `pattern`, which must fit in a single word.
    pub fn new(pattern: &[S]) -> Self {
        debug_assert!(pattern.len() <= WORD_BITS, "pattern does not fit in one word");

        let mut pm = Self {
            extended_ascii: [0; EXTENDED_ASCII],
            map: HashMap::new(),
        };
        for (i, &symbol) in pattern.iter().enumerate() {
            pm.insert_mask(symbol, 1u64 << i);
        }
        pm
    }

    fn insert_mask(&mut self, symbol: S, mask: u64) {
        match symbol.extended_ascii() {
            Some(byte) => self.extended_ascii[byte as usize] |= mask,
            None => *self.map.entry(symbol).or_insert(0) |= mask,
        }
    }
}

impl<S: Symbol> OccurrenceIndex<S> for PatternMatchVector<S> {
    #[inline(always)]
    fn get(&self, word: usize, symbol: S) -> u64 {
        debug_assert_eq!(word, 0);
        match symbol.extended_ascii() {
            Some(byte) => self.extended_ascii[byte as usize],
            None => self.map.get(&symbol).copied().unwrap_or(0),
        }
    }
}

/// Occurrence index spanning any number of 64-bit words.
///
/// Built from one long pattern with [`BlockPatternMatchVector::new`], or
/// lane-packed with [`BlockPatternMatchVector::with_words`] followed by one
/// [`BlockPatternMatchVector::insert_at`] per pattern, so that every word
/// describes an independent pattern of the batch kernel.
#[derive(Debug, Clone)]
pub struct BlockPatternMatchVector<S: Symbol> {
    block_count: usize,
    /// `EXTENDED_ASCII` rows of `block_count` words.
    extended_ascii: Vec<u64>,
    map: HashMap<S, Vec<u64>>,
}

impl<S: Symbol> BlockPatternMatchVector<S> {
    /// Build the index of `pattern` over `ceil(len / 64)` words.
    pub fn new(pattern: &[S]) -> Self {
        let mut pm = Self::with_words(pattern.len().div_ceil(WORD_BITS));
        pm.insert_at(0, pattern);
        pm
    }

    /// An empty index with room for `block_count` words.
    pub fn with_words(block_count: usize) -> Self {
        Self {
            block_count,
            extended_ascii: vec![0; EXTENDED_ASCII * block_count],
            map: HashMap::new(),
        }
    }

    /// Record `sequence` starting at word `first_word`: position `i` lands in
    /// bit `i % 64` of word `first_word + i / 64`.
    pub fn insert_at(&mut self, first_word: usize, sequence: &[S]) {
        debug_assert!(
            first_word + sequence.len().div_ceil(WORD_BITS) <= self.block_count,
            "sequence exceeds the index capacity"
        );

        for (i, &symbol) in sequence.iter().enumerate() {
            let word = first_word + i / WORD_BITS;
            let mask = 1u64 << (i % WORD_BITS);
            match symbol.extended_ascii() {
                Some(byte) => self.extended_ascii[byte as usize * self.block_count + word] |= mask,
                None => {
                    let block_count = self.block_count;
                    self.map.entry(symbol).or_insert_with(|| vec![0; block_count])[word] |= mask;
                }
            }
        }
    }

    /// Number of words in the index.
    pub fn words(&self) -> usize {
        self.block_count
    }
}

impl<S: Symbol> OccurrenceIndex<S> for BlockPatternMatchVector<S> {
    #[inline(always)]
    fn get(&self, word: usize, symbol: S) -> u64 {
        debug_assert!(word < self.block_count);
        match symbol.extended_ascii() {
            Some(byte) => self.extended_ascii[byte as usize * self.block_count + word],
            None => self.map.get(&symbol).map_or(0, |words| words[word]),
        }
    }
}

/// Single-word view of one lane of a lane-packed index.
pub(crate) struct LaneView<'a, S: Symbol> {
    pub(crate) block: &'a BlockPatternMatchVector<S>,
    pub(crate) word: usize,
}

impl<S: Symbol> OccurrenceIndex<S> for LaneView<'_, S> {
    #[inline(always)]
    fn get(&self, word: usize, symbol: S) -> u64 {
        debug_assert_eq!(word, 0);
        self.block.get(self.word, symbol)
    }
}

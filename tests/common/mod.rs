use rand::rngs::StdRng;
use rand::{RngExt as _, SeedableRng};

/// Seeded generator, so that a failing case can be replayed.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random byte sequence over the first `alphabet` lowercase letters.
///
/// Small alphabets produce many common characters and transpositions.
pub fn random_bytes(rng: &mut StdRng, alphabet: u8, lens: std::ops::Range<usize>) -> Vec<u8> {
    let len = rng.random_range(lens);
    (0..len).map(|_| b'a' + rng.random_range(0..alphabet)).collect()
}

/// Random pair sharing an alphabet.
pub fn random_pair(rng: &mut StdRng, lens: std::ops::Range<usize>) -> (Vec<u8>, Vec<u8>) {
    let alphabet = rng.random_range(1..10);
    let p = random_bytes(rng, alphabet, lens.clone());
    let t = random_bytes(rng, alphabet, lens);
    (p, t)
}

/// `t` derived from `p` by swapping a few neighbours and replacing a few symbols.
pub fn mutate(rng: &mut StdRng, p: &[u8], edits: usize) -> Vec<u8> {
    let mut t = p.to_vec();
    if t.len() < 2 {
        return t;
    }
    for _ in 0..edits {
        let i = rng.random_range(0..t.len() - 1);
        if rng.random_bool(0.5) {
            t.swap(i, i + 1);
        } else {
            t[i] = b'a' + rng.random_range(0..26);
        }
    }
    t
}

pub fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[allow(dead_code)]
mod common;

use bitjaro::jaro::filter::{common_char_filter, length_filter};
use bitjaro::jaro::reference;
use bitjaro::prelude::*;
use rand::RngExt as _;

use common::{chars, mutate, random_pair, rng};

/// Matched pairs of the greedy window matching.
fn common_chars(p: &[u8], t: &[u8]) -> usize {
    let bound = bitjaro::jaro::filter::jaro_bound(p.len(), t.len());
    let mut taken = vec![false; p.len()];
    let mut common = 0;
    for (j, symbol) in t.iter().enumerate() {
        let lo = j.saturating_sub(bound);
        let hi = (j + bound + 1).min(p.len());
        if let Some(i) = (lo..hi).find(|&i| !taken[i] && p[i] == *symbol) {
            taken[i] = true;
            common += 1;
        }
    }
    common
}

#[test]
fn known_scores() {
    let cases = [
        ("MARTHA", "MARHTA"),
        ("DIXON", "DICKSONX"),
        ("JELLYFISH", "SMELLYFISH"),
        ("abcxyz", "bcaxyz"),
        ("", ""),
        ("abc", ""),
        ("", "abc"),
        ("a", "a"),
        ("a", "b"),
    ];
    let table = cases
        .iter()
        .map(|(p, t)| format!("{p:?} {t:?} {:.4}", jaro_similarity(p.as_bytes(), t.as_bytes(), 0.0)))
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(table, @r#"
    "MARTHA" "MARHTA" 0.9444
    "DIXON" "DICKSONX" 0.7667
    "JELLYFISH" "SMELLYFISH" 0.8963
    "abcxyz" "bcaxyz" 0.9444
    "" "" 1.0000
    "abc" "" 0.0000
    "" "abc" 0.0000
    "a" "a" 1.0000
    "a" "b" 0.0000
    "#);
}

#[test]
fn chars_and_bytes_agree() {
    let p = "JELLYFISH";
    let t = "SMELLYFISH";
    assert_eq!(
        jaro_similarity(&chars(p), &chars(t), 0.0),
        jaro_similarity(p.as_bytes(), t.as_bytes(), 0.0)
    );
}

#[test]
fn symmetry() {
    let mut rng = rng(1);
    for _ in 0..2000 {
        let (p, t) = random_pair(&mut rng, 0..150);
        assert_eq!(
            jaro_similarity(&p, &t, 0.0),
            jaro_similarity(&t, &p, 0.0),
            "p={p:?} t={t:?}"
        );
    }
}

#[test]
fn identity_and_range() {
    let mut rng = rng(2);
    for _ in 0..2000 {
        let (p, t) = random_pair(&mut rng, 0..150);
        assert_eq!(jaro_similarity(&p, &p, 0.0), 1.0, "p={p:?}");

        let sim = jaro_similarity(&p, &t, 0.0);
        assert!((0.0..=1.0).contains(&sim), "p={p:?} t={t:?} sim={sim}");
    }
}

#[test]
fn filters_never_reject_a_passing_pair() {
    let mut rng = rng(3);
    for _ in 0..2000 {
        let (p, t) = random_pair(&mut rng, 0..100);
        let cutoff = rng.random_range(0.0..1.0);
        // two empty sequences are scored before any filter runs
        if p.is_empty() && t.is_empty() {
            assert_eq!(jaro_similarity(&p, &t, cutoff), 1.0);
            continue;
        }
        let sim = reference::jaro_similarity(&p, &t);
        if sim > 0.0 && sim >= cutoff {
            assert!(length_filter(p.len(), t.len(), cutoff), "p={p:?} t={t:?}");
            assert!(
                common_char_filter(p.len(), t.len(), common_chars(&p, &t), cutoff),
                "p={p:?} t={t:?}"
            );
        }
    }
}

#[test]
fn cutoff_consistency() {
    let mut rng = rng(4);
    for _ in 0..3000 {
        let p = common::random_bytes(&mut rng, 6, 1..120);
        let t = mutate(&mut rng, &p, 3);
        let cutoff = rng.random_range(0.0..1.0);

        let unpruned = jaro_similarity(&p, &t, 0.0);
        let pruned = jaro_similarity(&p, &t, cutoff);
        assert!(pruned == 0.0 || pruned == unpruned, "p={p:?} t={t:?} cutoff={cutoff}");
        if unpruned >= cutoff {
            assert_eq!(pruned, unpruned, "p={p:?} t={t:?} cutoff={cutoff}");
        }
    }
}

#[test]
fn empty_pair_is_identical() {
    for cutoff in [0.0, 0.5, 1.0] {
        assert_eq!(jaro_similarity(b"", b"", cutoff), 1.0);
        assert_eq!(CachedJaro::new(b"").similarity(b"", cutoff), 1.0);
    }
    assert!(!length_filter(0, 0, 0.0));
}

#[test]
fn cutoff_above_one() {
    assert_eq!(jaro_similarity(b"abc", b"abc", 1.0), 1.0);
    assert_eq!(jaro_similarity(b"abc", b"abc", 1.0001), 0.0);
    assert_eq!(jaro_similarity(b"", b"", 2.0), 0.0);
}

#[test]
fn word_block_boundary() {
    let a64 = vec![b'a'; 64];
    let a65 = vec![b'a'; 65];
    let expected = (1.0 + 64.0 / 65.0 + 1.0) / 3.0;

    assert_eq!(jaro_similarity(&a64, &a64, 0.0), 1.0);
    assert_eq!(jaro_similarity(&a65, &a65, 0.0), 1.0);
    assert_eq!(jaro_similarity(&a64, &a65, 0.0), expected);
    assert_eq!(jaro_similarity(&a65, &a64, 0.0), expected);
    assert_eq!(reference::jaro_similarity(&a64, &a65), expected);

    let pm = BlockPatternMatchVector::new(&a64);
    assert_eq!(jaro_similarity_with_index(&pm, &a64, &a65, 0.0), expected);
}

#[test]
fn agrees_with_reference() {
    let mut rng = rng(5);
    for _ in 0..2000 {
        let (p, t) = random_pair(&mut rng, 0..200);
        assert_eq!(
            jaro_similarity(&p, &t, 0.0),
            reference::jaro_similarity(&p, &t),
            "p={p:?} t={t:?}"
        );
    }
}

#[test]
fn agrees_with_reference_on_near_duplicates() {
    let mut rng = rng(6);
    for _ in 0..1000 {
        let p = common::random_bytes(&mut rng, 26, 0..300);
        let t = mutate(&mut rng, &p, 10);
        assert_eq!(
            jaro_similarity(&p, &t, 0.0),
            reference::jaro_similarity(&p, &t),
            "p={p:?} t={t:?}"
        );
    }
}

#[test]
fn cached_matches_free_functions() {
    let mut rng = rng(7);
    for _ in 0..500 {
        let (p, t) = random_pair(&mut rng, 0..130);
        let cutoff = rng.random_range(0.0..1.0);
        let cached = CachedJaro::new(&p);
        assert_eq!(cached.similarity(&t, cutoff), jaro_similarity(&p, &t, cutoff));
        assert_eq!(cached.distance(&t, cutoff), jaro_distance(&p, &t, cutoff));
    }
}

#[test]
fn distance_cutoff() {
    let sim = jaro_similarity(b"DIXON", b"DICKSONX", 0.0);
    assert_eq!(jaro_distance(b"DIXON", b"DICKSONX", 1.0), 1.0 - sim);
    assert_eq!(jaro_distance(b"DIXON", b"DICKSONX", 0.2), 1.0);
    // no distance is at or below a negative cutoff
    assert_eq!(jaro_distance(b"abc", b"abc", -1.0), 1.0);
}

#[test]
fn string_matcher() {
    let matcher = JaroMatcher::new(
        JaroOptionsBuilder::default()
            .score_cutoff(0.8)
            .case(CaseMatching::Ignore)
            .build()
            .unwrap(),
    );
    let sim = matcher.similarity("jellyfish", "SMELLYFISH").unwrap();
    assert_eq!(sim, jaro_similarity(b"jellyfish", b"smellyfish", 0.0));
    assert!(matcher.similarity("xyz", "SMELLYFISH").is_none());
}

#[test]
fn wide_symbols() {
    let p: Vec<u64> = (0..90).map(|i| (i * 7919) % 13 + 10_000).collect();
    let t: Vec<u64> = (0..80).map(|i| (i * 104_729) % 11 + 10_000).collect();
    assert_eq!(jaro_similarity(&p, &t, 0.0), reference::jaro_similarity(&p, &t));

    let p: Vec<i32> = vec![-1, -2, 3, 4];
    let t: Vec<i32> = vec![-2, -1, 3, 4];
    assert_eq!(
        jaro_similarity(&p, &t, 0.0),
        jaro_similarity(b"abcd", b"bacd", 0.0)
    );
}

//! Differential soundness of exact search against `memchr::memmem`.
//!
//! Small alphabets make repeated and overlapping matches common, which is
//! where shift-table and lane-mask bugs show up.

use bytematch::{
    find, find_byteset, rfind, rfind_byteset, Backend, ByteSet, HORSPOOL_MAX_NEEDLE,
};
use memchr::memmem;
use proptest::prelude::*;

// =============================================================================
// Constants
// =============================================================================

/// Alphabet for exhaustive enumeration.
const ALPHABET: &[u8] = b"ab";

/// Longest haystack enumerated exhaustively.
/// Total haystacks: 2^0 + 2^1 + ... + 2^9 = 1023.
const EXHAUSTIVE_MAX_HAY: usize = 9;

// =============================================================================
// Helper Functions
// =============================================================================

/// Every string over `alphabet` of exactly `len` bytes.
fn all_strings(alphabet: &[u8], len: usize) -> Vec<Vec<u8>> {
    let mut out = vec![Vec::new()];
    for _ in 0..len {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                alphabet.iter().map(move |&b| {
                    let mut next = prefix.clone();
                    next.push(b);
                    next
                })
            })
            .collect();
    }
    out
}

/// Brute-force leftmost match.
fn naive_find(hay: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| &hay[i..i + needle.len()] == needle)
}

/// Brute-force rightmost match.
fn naive_rfind(hay: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len())
        .rev()
        .find(|&i| &hay[i..i + needle.len()] == needle)
}

fn small_alphabet_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"abc".to_vec()), 0..=max_len)
}

// =============================================================================
// Exhaustive Tests
// =============================================================================

/// Every needle of length 0..=6 against every haystack of length 0..=9.
#[test]
fn exhaustive_small_domain_matches_brute_force() {
    let haystacks: Vec<Vec<u8>> = (0..=EXHAUSTIVE_MAX_HAY)
        .flat_map(|len| all_strings(ALPHABET, len))
        .collect();
    let needles: Vec<Vec<u8>> = (0..=6).flat_map(|len| all_strings(ALPHABET, len)).collect();

    for hay in &haystacks {
        for needle in &needles {
            assert_eq!(find(hay, needle), naive_find(hay, needle), "{hay:?} {needle:?}");
            assert_eq!(rfind(hay, needle), naive_rfind(hay, needle), "{hay:?} {needle:?}");
        }
    }
}

/// Needles on both sides of the Horspool table limit.
#[test]
fn table_limit_boundaries() {
    for n_len in [HORSPOOL_MAX_NEEDLE - 1, HORSPOOL_MAX_NEEDLE, HORSPOOL_MAX_NEEDLE + 1] {
        let needle: Vec<u8> = (0..n_len).map(|i| b"xyz"[i % 3] ^ (i as u8 & 1)).collect();
        for at in [0usize, 1, 37, 500] {
            let mut hay = vec![b'x'; at];
            hay.extend_from_slice(&needle);
            hay.extend_from_slice(b"xyzxyz");
            assert_eq!(find(&hay, &needle), memmem::find(&hay, &needle), "n {n_len} at {at}");
            assert_eq!(rfind(&hay, &needle), memmem::rfind(&hay, &needle), "n {n_len} at {at}");
        }
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A reported offset is a match and no smaller offset matches.
    #[test]
    fn find_is_leftmost_and_sound(
        hay in small_alphabet_bytes(300),
        needle in small_alphabet_bytes(12),
    ) {
        let got = find(&hay, &needle);
        prop_assert_eq!(got, memmem::find(&hay, &needle));
        if let Some(at) = got {
            prop_assert_eq!(&hay[at..at + needle.len()], &needle[..]);
        }
    }

    /// Mirror of the forward property for the rightmost match.
    #[test]
    fn rfind_is_rightmost_and_sound(
        hay in small_alphabet_bytes(300),
        needle in small_alphabet_bytes(12),
    ) {
        let got = rfind(&hay, &needle);
        prop_assert_eq!(got, memmem::rfind(&hay, &needle));
        if let Some(at) = got {
            prop_assert_eq!(&hay[at..at + needle.len()], &needle[..]);
        }
    }

    /// A planted needle is always found, at or before the plant site.
    #[test]
    fn planted_needle_is_found(
        mut hay in prop::collection::vec(any::<u8>(), 0..2048),
        needle in prop::collection::vec(any::<u8>(), 1..400),
        pos in any::<prop::sample::Index>(),
    ) {
        let at = pos.index(hay.len() + 1);
        hay.splice(at..at, needle.iter().copied());
        let first = find(&hay, &needle);
        let last = rfind(&hay, &needle);
        prop_assert!(first.is_some_and(|i| i <= at));
        prop_assert!(last.is_some_and(|i| i >= at));
        prop_assert_eq!(first, memmem::find(&hay, &needle));
        prop_assert_eq!(last, memmem::rfind(&hay, &needle));
    }

    /// Byte-set search agrees with a linear scan, in both directions.
    #[test]
    fn byteset_search_agrees_with_scan(
        hay in prop::collection::vec(any::<u8>(), 0..256),
        members in prop::collection::vec(any::<u8>(), 0..6),
        invert in any::<bool>(),
    ) {
        let mut set: ByteSet = members.iter().copied().collect();
        if invert {
            set = set.invert();
        }
        prop_assert_eq!(find_byteset(&hay, &set), hay.iter().position(|&b| set.contains(b)));
        prop_assert_eq!(rfind_byteset(&hay, &set), hay.iter().rposition(|&b| set.contains(b)));
    }

    /// Both backends honour the same contract.
    #[test]
    fn backends_are_interchangeable(
        hay in small_alphabet_bytes(200),
        needle in small_alphabet_bytes(6),
    ) {
        let portable = Backend::portable();
        let vectorized = Backend::vectorized();
        prop_assert_eq!(portable.find(&hay, &needle), vectorized.find(&hay, &needle));
        prop_assert_eq!(portable.rfind(&hay, &needle), vectorized.rfind(&hay, &needle));
    }
}

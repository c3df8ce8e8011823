//! Metric properties of the distance kernels, checked against a full-matrix
//! reference implementation.

use bytematch::{
    alignment_score, edit_distance, edit_distance_utf8, hamming_distance, hamming_distance_utf8,
    FixedArena, SubstitutionMatrix, SystemAllocator,
};
use proptest::prelude::*;

// =============================================================================
// Helper Functions
// =============================================================================

/// Full-matrix Levenshtein distance over any comparable units.
fn reference_levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut m = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in m.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        m[0][j] = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let sub = m[i - 1][j - 1] + usize::from(a[i - 1] != b[j - 1]);
            m[i][j] = sub.min(m[i - 1][j] + 1).min(m[i][j - 1] + 1);
        }
    }
    m[a.len()][b.len()]
}

fn dist(a: &[u8], b: &[u8]) -> usize {
    edit_distance(a, b, 0, &SystemAllocator).unwrap()
}

fn dna(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"ACGT".to_vec()), 0..=max_len)
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn matches_reference(a in dna(40), b in dna(40)) {
        prop_assert_eq!(dist(&a, &b), reference_levenshtein(&a, &b));
    }

    #[test]
    fn identity(a in prop::collection::vec(any::<u8>(), 0..80)) {
        prop_assert_eq!(dist(&a, &a), 0);
    }

    #[test]
    fn symmetry(a in dna(40), b in dna(40)) {
        prop_assert_eq!(dist(&a, &b), dist(&b, &a));
    }

    #[test]
    fn bound_clamps(a in dna(30), b in dna(30), bound in 1usize..40) {
        let full = dist(&a, &b);
        prop_assert_eq!(edit_distance(&a, &b, bound, &SystemAllocator), Ok(full.min(bound)));
    }

    #[test]
    fn triangle_inequality(a in dna(20), b in dna(20), c in dna(20)) {
        prop_assert!(dist(&a, &c) <= dist(&a, &b) + dist(&b, &c));
    }

    #[test]
    fn alignment_is_negated_levenshtein(a in dna(30), b in dna(30)) {
        let unit = SubstitutionMatrix::unit_levenshtein();
        let score = alignment_score(&a, &b, &unit, -1, &SystemAllocator).unwrap();
        prop_assert_eq!(score, -(dist(&a, &b) as i64));
    }

    #[test]
    fn hamming_counts_differing_positions(
        pairs in prop::collection::vec((any::<u8>(), any::<u8>()), 0..100),
    ) {
        let a: Vec<u8> = pairs.iter().map(|p| p.0).collect();
        let b: Vec<u8> = pairs.iter().map(|p| p.1).collect();
        let expect = pairs.iter().filter(|(x, y)| x != y).count();
        prop_assert_eq!(hamming_distance(&a, &b, 0), expect);
        prop_assert!(hamming_distance(&a, &b, 0) >= dist(&a, &b));
    }

    #[test]
    fn rune_distance_counts_chars(
        a in "[a-cé€😀]{0,12}",
        b in "[a-cé€😀]{0,12}",
        bound in 1usize..16,
    ) {
        let ca: Vec<char> = a.chars().collect();
        let cb: Vec<char> = b.chars().collect();
        let full = reference_levenshtein(&ca, &cb);
        prop_assert_eq!(
            edit_distance_utf8(a.as_bytes(), b.as_bytes(), 0, &SystemAllocator),
            Ok(full)
        );
        prop_assert_eq!(
            edit_distance_utf8(a.as_bytes(), b.as_bytes(), bound, &SystemAllocator),
            Ok(full.min(bound))
        );
        let overlap = ca.iter().zip(&cb).filter(|(x, y)| x != y).count();
        prop_assert_eq!(
            hamming_distance_utf8(a.as_bytes(), b.as_bytes(), 0),
            overlap + ca.len().abs_diff(cb.len())
        );
    }

    /// Arbitrary bytes never stall the rune decoder and stay symmetric.
    #[test]
    fn rune_distance_total_on_arbitrary_bytes(
        a in prop::collection::vec(any::<u8>(), 0..40),
        b in prop::collection::vec(any::<u8>(), 0..40),
    ) {
        let ab = edit_distance_utf8(&a, &b, 0, &SystemAllocator).unwrap();
        let ba = edit_distance_utf8(&b, &a, 0, &SystemAllocator).unwrap();
        prop_assert_eq!(ab, ba);
        prop_assert!(ab <= a.len().max(b.len()));
    }

    /// The same arena serves call after call: every block is returned.
    #[test]
    fn arena_is_reusable(inputs in prop::collection::vec((dna(20), dna(20)), 1..10)) {
        let arena = FixedArena::init(4096).unwrap();
        for (a, b) in &inputs {
            prop_assert_eq!(edit_distance(a, b, 0, &arena), Ok(reference_levenshtein(a, b)));
            prop_assert_eq!(arena.used_bytes(), 0);
        }
    }
}

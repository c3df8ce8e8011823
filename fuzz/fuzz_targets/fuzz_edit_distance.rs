#![no_main]

use libfuzzer_sys::fuzz_target;

use bytematch::{
    alignment_score, edit_distance, edit_distance_utf8, FixedArena, SubstitutionMatrix,
};

/// Full-matrix reference.
fn reference(a: &[u8], b: &[u8]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, x) in a.iter().enumerate() {
        let mut curr = vec![i + 1; b.len() + 1];
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = (prev[j] + usize::from(x != y))
                .min(prev[j + 1] + 1)
                .min(curr[j] + 1);
        }
        prev = curr;
    }
    prev[b.len()]
}

// Byte layout:
// - Byte 0 → bound (0 = unbounded)
// - Byte 1 → split point (scaled to the remaining input)
// - Remaining bytes → `a` then `b`
//
// Inputs are capped so the quadratic reference stays fast. The arena is
// sized for the largest scratch block any call can request, so a refusal
// would be a bug.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let bound = data[0] as usize;
    let rest = &data[2..data.len().min(2 + 512)];
    let split = data[1] as usize * rest.len() / 256;
    let (a, b) = rest.split_at(split);

    let arena = match FixedArena::init(64 * 1024) {
        Ok(arena) => arena,
        Err(_) => return,
    };

    let full = reference(a, b);
    let expect = if bound == 0 { full } else { full.min(bound) };
    assert_eq!(edit_distance(a, b, bound, &arena), Ok(expect));
    assert_eq!(arena.used_bytes(), 0);

    let unit = SubstitutionMatrix::unit_levenshtein();
    assert_eq!(
        alignment_score(a, b, &unit, -1, &arena),
        Ok(-(full as i64))
    );

    let ab = edit_distance_utf8(a, b, 0, &arena);
    let ba = edit_distance_utf8(b, a, 0, &arena);
    assert_eq!(ab, ba);
    assert_eq!(arena.used_bytes(), 0);
});

//! Hamming distance with length-difference padding.
//!
//! The overlap is compared eight bytes at a time using the same exact
//! per-lane equality mask as the packed searcher; every position past the
//! shorter input counts as one mismatch.

use super::utf8::Units;
use crate::search::packed::each_byte_equal;

#[inline(always)]
fn load_u64(chunk: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(chunk);
    u64::from_le_bytes(word)
}

/// Byte-wise Hamming distance, padded by `|len(a) - len(b)|`.
///
/// `bound == 0` is unbounded. Otherwise scanning stops once the count
/// reaches `bound` and `bound` is returned.
///
/// # Examples
/// ```
/// assert_eq!(bytematch::hamming_distance(b"abc", b"abd", 0), 1);
/// assert_eq!(bytematch::hamming_distance(b"abc", b"abcde", 0), 2);
/// ```
pub fn hamming_distance(a: &[u8], b: &[u8], bound: usize) -> usize {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let bound = if bound == 0 { long.len() } else { bound };

    let mut distance = long.len() - short.len();
    if distance >= bound {
        return bound;
    }

    let long = &long[..short.len()];
    let mut xs = short.chunks_exact(8);
    let mut ys = long.chunks_exact(8);
    for (x, y) in xs.by_ref().zip(ys.by_ref()) {
        let equal = each_byte_equal(load_u64(x), load_u64(y));
        distance += 8 - equal.count_ones() as usize;
        if distance >= bound {
            return bound;
        }
    }
    for (x, y) in xs.remainder().iter().zip(ys.remainder()) {
        distance += usize::from(x != y);
        if distance >= bound {
            return bound;
        }
    }
    distance
}

/// Rune-wise Hamming distance.
///
/// Both inputs are walked rune by rune in lockstep; once one runs out, each
/// remaining rune of the other counts as one mismatch. `bound == 0` is
/// unbounded.
pub fn hamming_distance_utf8(a: &[u8], b: &[u8], bound: usize) -> usize {
    if a.is_ascii() && b.is_ascii() {
        return hamming_distance(a, b, bound);
    }
    let bound = if bound == 0 { usize::MAX } else { bound };

    let mut xs = Units::new(a);
    let mut ys = Units::new(b);
    let mut distance = 0usize;
    loop {
        let step = match (xs.next(), ys.next()) {
            (None, None) => return distance,
            (Some(x), Some(y)) => usize::from(x != y),
            _ => 1,
        };
        distance += step;
        if distance >= bound {
            return bound;
        }
    }
}

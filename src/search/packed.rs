//! Fixed-width packed search for 2, 3 and 4 byte needles.
//!
//! Each step evaluates eight candidate offsets at once. For a needle of
//! width `W` we load `W` overlapping little-endian words starting at
//! `i, i + 1, .., i + W - 1` and compare word `j` against needle byte `j`
//! broadcast into every lane. ANDing the per-lane equality masks leaves a
//! high bit in lane `k` exactly when `haystack[i + k .. i + k + W] == needle`.
//!
//! The routine is generic over `W` and monomorphized per width, so the inner
//! loop over `j` unrolls completely.

const LO7: u64 = 0x7F7F_7F7F_7F7F_7F7F;
const HI: u64 = 0x8080_8080_8080_8080;
const BROADCAST: u64 = 0x0101_0101_0101_0101;

/// Lanes scanned per step.
const LANES: usize = 8;

#[inline(always)]
fn load_u64(bytes: &[u8], at: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(word)
}

/// High bit set in every byte lane where `a` and `b` agree.
///
/// Exact: the `LO7` addition cannot carry across lanes, so there are no
/// false positives from neighboring bytes.
#[inline(always)]
pub(crate) fn each_byte_equal(a: u64, b: u64) -> u64 {
    let x = a ^ b;
    !(((x & LO7).wrapping_add(LO7)) | x | LO7)
}

#[inline(always)]
fn broadcast<const W: usize>(needle: &[u8]) -> [u64; W] {
    let mut lanes = [0u64; W];
    for (lane, &b) in lanes.iter_mut().zip(needle) {
        *lane = u64::from(b) * BROADCAST;
    }
    lanes
}

/// Lane mask of the eight candidates starting at `i`.
///
/// Requires `i + LANES + W - 1 <= haystack.len()`.
#[inline(always)]
fn candidates<const W: usize>(haystack: &[u8], i: usize, lanes: &[u64; W]) -> u64 {
    let mut matches = HI;
    for (j, &lane) in lanes.iter().enumerate() {
        matches &= each_byte_equal(load_u64(haystack, i + j), lane);
    }
    matches
}

/// Leftmost occurrence of a `W`-byte needle.
pub(crate) fn find_packed<const W: usize>(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    debug_assert_eq!(needle.len(), W);
    if haystack.len() < W {
        return None;
    }
    let lanes = broadcast::<W>(needle);

    let mut i = 0;
    while i + LANES + W - 1 <= haystack.len() {
        let matches = candidates::<W>(haystack, i, &lanes);
        if matches != 0 {
            return Some(i + (matches.trailing_zeros() / 8) as usize);
        }
        i += LANES;
    }

    while i + W <= haystack.len() {
        if haystack[i..i + W] == *needle {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Rightmost occurrence of a `W`-byte needle.
pub(crate) fn rfind_packed<const W: usize>(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    debug_assert_eq!(needle.len(), W);
    if haystack.len() < W {
        return None;
    }
    let lanes = broadcast::<W>(needle);

    // Candidate offsets not yet examined are `0..end`.
    let mut end = haystack.len() - W + 1;
    while end >= LANES {
        let start = end - LANES;
        let matches = candidates::<W>(haystack, start, &lanes);
        if matches != 0 {
            let top_lane = (63 - matches.leading_zeros()) / 8;
            return Some(start + top_lane as usize);
        }
        end = start;
    }

    while end > 0 {
        end -= 1;
        if haystack[end..end + W] == *needle {
            return Some(end);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use memchr::memmem;

    #[test]
    fn each_byte_equal_has_no_cross_lane_noise() {
        let a = u64::from_le_bytes([0x00, 0x80, 0x7F, 0xFF, 0x01, 0x00, 0x42, 0x80]);
        let b = u64::from_le_bytes([0x00, 0x00, 0x7F, 0x7F, 0x00, 0x00, 0x42, 0x81]);
        let m = each_byte_equal(a, b);
        let lanes: Vec<bool> = m.to_le_bytes().iter().map(|&x| x == 0x80).collect();
        assert_eq!(
            lanes,
            vec![true, false, true, false, false, true, true, false]
        );
        assert_eq!(m & !HI, 0);
    }

    #[test]
    fn finds_match_in_every_lane_and_tail() {
        for pos in 0..40 {
            let mut hay = vec![b'.'; 40];
            hay[pos..(pos + 3).min(40)].copy_from_slice(&b"abc"[..(40 - pos).min(3)]);
            let expect = memmem::find(&hay, b"abc");
            assert_eq!(find_packed::<3>(&hay, b"abc"), expect, "pos {pos}");
            assert_eq!(rfind_packed::<3>(&hay, b"abc"), expect, "pos {pos}");
        }
    }

    #[test]
    fn leftmost_and_rightmost_of_overlapping_runs() {
        let hay = b"xxaaaaaaaaaaaaaaaaaaaaaaaayy";
        assert_eq!(find_packed::<2>(hay, b"aa"), Some(2));
        assert_eq!(rfind_packed::<2>(hay, b"aa"), Some(24));
        assert_eq!(find_packed::<4>(hay, b"aaaa"), Some(2));
        assert_eq!(rfind_packed::<4>(hay, b"aaaa"), Some(22));
    }

    #[test]
    fn short_haystacks() {
        assert_eq!(find_packed::<2>(b"a", b"ab"), None);
        assert_eq!(find_packed::<2>(b"ab", b"ab"), Some(0));
        assert_eq!(rfind_packed::<4>(b"abcd", b"abcd"), Some(0));
        assert_eq!(rfind_packed::<4>(b"abc", b"abcd"), None);
    }

    #[test]
    fn high_bytes_compare_exactly() {
        let hay = [0xFFu8, 0x7F, 0xFF, 0xFF, 0x80, 0x00, 0xFF, 0xFF, 0xFF, 0x7F, 0xFE];
        assert_eq!(find_packed::<2>(&hay, &[0xFF, 0x7F]), Some(0));
        assert_eq!(rfind_packed::<2>(&hay, &[0xFF, 0x7F]), Some(8));
        assert_eq!(find_packed::<3>(&hay, &[0xFF, 0xFF, 0x80]), Some(2));
        assert_eq!(find_packed::<4>(&hay, &[0x00, 0xFF, 0xFF, 0xFE]), None);
    }
}

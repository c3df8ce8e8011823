//! Selection of discriminative needle offsets for the cheap pre-check.
//!
//! Comparing the same byte value at several probe positions wastes the
//! pre-check: for a needle like `aXaYa`, probing offsets 0, 2 and 4 tests
//! `a` three times. We pick three offsets whose bytes differ whenever the
//! needle allows it.
//!
//! For longer needles we also steer `first` and `mid` away from bytes above
//! `0xBF`. Those are UTF-8 lead bytes, which carry only 3 to 5 bits of
//! information and repeat constantly in non-Latin text. This only affects
//! throughput; any in-range offsets give correct results.

/// Bytes above this value are UTF-8 lead bytes (`110xxxxx` and up).
const LOW_ENTROPY_ABOVE: u8 = 0xBF;

/// Needle length above which the UTF-8 lead-byte bias is applied.
const LEAD_BYTE_BIAS_MIN_LEN: usize = 8;

/// Three probe offsets into a needle.
///
/// Always satisfies `first <= mid <= last < len` for the needle it was
/// computed from. For needles longer than 4 bytes `first + 1 <= mid` also
/// holds, so `first + 1` is a valid probe too.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anomalies {
    pub first: usize,
    pub mid: usize,
    pub last: usize,
}

/// Choose the probe offsets for `needle`.
///
/// # Panics
/// Debug builds assert `needle` is non-empty.
pub fn locate_anomalies(needle: &[u8]) -> Anomalies {
    debug_assert!(!needle.is_empty(), "anomalies of an empty needle");
    let len = needle.len();
    let n = needle;

    let mut first = 0;
    let mut mid = len / 2;
    let mut last = len - 1;

    let has_duplicates = n[first] == n[mid] || n[first] == n[last] || n[mid] == n[last];

    if len > 3 && has_duplicates {
        // Slide `mid` right until it differs from `first`.
        while n[mid] == n[first] && mid + 1 < last {
            mid += 1;
        }
        // Slide `last` left until it differs from both.
        while (n[last] == n[mid] || n[last] == n[first]) && last > mid + 1 {
            last -= 1;
        }
    }

    if len > LEAD_BYTE_BIAS_MIN_LEN {
        let mut vibrant_mid = mid;
        while (n[vibrant_mid] > LOW_ENTROPY_ABOVE || n[vibrant_mid] == n[last])
            && vibrant_mid + 1 < last
        {
            vibrant_mid += 1;
        }
        if n[vibrant_mid] <= LOW_ENTROPY_ABOVE {
            mid = vibrant_mid;
        }

        let mut vibrant_first = first;
        while (n[vibrant_first] > LOW_ENTROPY_ABOVE
            || n[vibrant_first] == n[mid]
            || n[vibrant_first] == n[last])
            && vibrant_first + 1 < mid
        {
            vibrant_first += 1;
        }
        // `last` stays put: the final byte of a text is the last byte of a
        // rune and already the most informative.
        if n[vibrant_first] <= LOW_ENTROPY_ABOVE {
            first = vibrant_first;
        }
    }

    debug_assert!(first <= mid && mid <= last && last < len);
    Anomalies { first, mid, last }
}

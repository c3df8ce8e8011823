//! Boyer-Moore-Horspool search for needles of up to 256 bytes, with a Raita
//! style pre-check, plus the prefix/suffix decomposition for longer needles.
//!
//! # Algorithm
//! - A 256-entry bad-character table gives, for the haystack byte aligned
//!   with the needle's last byte (forward) or first byte (reverse), how far
//!   the window may slide without skipping a match.
//! - Before a full comparison each window is checked at four probe bytes
//!   (`first`, `first + 1`, `mid`, `last` from [`locate_anomalies`]) packed
//!   into one `u32` compare.
//!
//! # Limitations
//! There is no periodic-needle skip rule (Galil). Worst case is
//! `O(haystack * min(needle, 256))` on inputs like `aaaa...` searched for
//! `aaa...ab`. Results are still exact.

use super::anomaly::{locate_anomalies, Anomalies};

/// Longest needle a single shift table can describe.
pub const HORSPOOL_MAX_NEEDLE: usize = 256;

/// Precomputed forward or reverse Horspool searcher for one needle.
///
/// Built once per call and reused across resumed scans, so the long-needle
/// path never rebuilds its table after a failed verification.
pub(crate) struct Horspool<'n> {
    needle: &'n [u8],
    shifts: [u16; 256],
    probes: Anomalies,
    packed: u32,
}

#[inline(always)]
fn pack_probes(window: &[u8], p: &Anomalies) -> u32 {
    u32::from_le_bytes([
        window[p.first],
        window[p.first + 1],
        window[p.mid],
        window[p.last],
    ])
}

impl<'n> Horspool<'n> {
    fn with_shifts(needle: &'n [u8], shifts: [u16; 256]) -> Self {
        debug_assert!(needle.len() >= 2 && needle.len() <= HORSPOOL_MAX_NEEDLE);
        let probes = locate_anomalies(needle);
        let packed = pack_probes(needle, &probes);
        Self {
            needle,
            shifts,
            probes,
            packed,
        }
    }

    /// Searcher for the leftmost match. Shift is keyed on the byte under the
    /// needle's last position.
    pub(crate) fn forward(needle: &'n [u8]) -> Self {
        let len = needle.len();
        let mut shifts = [len as u16; 256];
        for (i, &b) in needle[..len - 1].iter().enumerate() {
            shifts[b as usize] = (len - 1 - i) as u16;
        }
        Self::with_shifts(needle, shifts)
    }

    /// Searcher for the rightmost match. Shift is keyed on the byte under the
    /// needle's first position.
    pub(crate) fn reverse(needle: &'n [u8]) -> Self {
        let len = needle.len();
        let mut shifts = [len as u16; 256];
        for (i, &b) in needle.iter().enumerate().skip(1).rev() {
            shifts[b as usize] = i as u16;
        }
        Self::with_shifts(needle, shifts)
    }

    #[inline(always)]
    fn matches_at(&self, haystack: &[u8], at: usize) -> bool {
        let window = &haystack[at..at + self.needle.len()];
        pack_probes(window, &self.probes) == self.packed && window == self.needle
    }

    pub(crate) fn find(&self, haystack: &[u8]) -> Option<usize> {
        let n = self.needle.len();
        if haystack.len() < n {
            return None;
        }
        let last_start = haystack.len() - n;
        let mut i = 0;
        while i <= last_start {
            if self.matches_at(haystack, i) {
                return Some(i);
            }
            i += self.shifts[haystack[i + n - 1] as usize] as usize;
        }
        None
    }

    pub(crate) fn rfind(&self, haystack: &[u8]) -> Option<usize> {
        let n = self.needle.len();
        if haystack.len() < n {
            return None;
        }
        let mut i = haystack.len() - n;
        loop {
            if self.matches_at(haystack, i) {
                return Some(i);
            }
            let shift = self.shifts[haystack[i] as usize] as usize;
            if shift > i {
                return None;
            }
            i -= shift;
        }
    }
}

/// Leftmost match of a needle of `5..=256` bytes (any `2..=256` works).
pub(crate) fn find_horspool(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    Horspool::forward(needle).find(haystack)
}

/// Rightmost match of a needle of `2..=256` bytes.
pub(crate) fn rfind_horspool(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    Horspool::reverse(needle).rfind(haystack)
}

/// Leftmost match of a needle longer than 256 bytes.
///
/// Searches for the 256-byte prefix, then verifies the suffix in place. A
/// failed verification resumes one byte after the prefix hit with the same
/// searcher.
pub(crate) fn find_long(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    debug_assert!(needle.len() > HORSPOOL_MAX_NEEDLE);
    let (prefix, suffix) = needle.split_at(HORSPOOL_MAX_NEEDLE);
    let searcher = Horspool::forward(prefix);

    let mut start = 0;
    while start < haystack.len() {
        let found = start + searcher.find(&haystack[start..])?;
        let tail_start = found + HORSPOOL_MAX_NEEDLE;
        let tail_end = found + needle.len();
        if tail_end > haystack.len() {
            // Every later prefix hit is even closer to the end.
            return None;
        }
        if haystack[tail_start..tail_end] == *suffix {
            return Some(found);
        }
        start = found + 1;
    }
    None
}

/// Rightmost match of a needle longer than 256 bytes.
///
/// Mirror of [`find_long`]: searches for the 256-byte suffix from the right,
/// verifies the prefix, and on failure narrows the haystack so the next
/// suffix hit starts strictly earlier.
pub(crate) fn rfind_long(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    debug_assert!(needle.len() > HORSPOOL_MAX_NEEDLE);
    let head_len = needle.len() - HORSPOOL_MAX_NEEDLE;
    let (prefix, suffix) = needle.split_at(head_len);
    let searcher = Horspool::reverse(suffix);

    let mut end = haystack.len();
    loop {
        let found = searcher.rfind(&haystack[..end])?;
        if found < head_len {
            // Every earlier suffix hit leaves even less room for the prefix.
            return None;
        }
        let start = found - head_len;
        if haystack[start..found] == *prefix {
            return Some(start);
        }
        end = found + HORSPOOL_MAX_NEEDLE - 1;
    }
}

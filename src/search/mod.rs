//! Exact substring and byte-set search.
//!
//! ## Dispatch by needle length
//! | needle      | strategy                                              |
//! |-------------|-------------------------------------------------------|
//! | 0           | matches at 0 (`find`) or at `haystack.len()` (`rfind`) |
//! | 1           | single-byte scan (`memchr`)                           |
//! | 2..=4       | packed fixed-width compare, 8 offsets per step        |
//! | 5..=256     | Horspool + four-byte probe pre-check                  |
//! | > 256       | Horspool on a 256-byte prefix/suffix, then verify     |
//!
//! ## Key invariants
//! - `find` returns the smallest matching offset, `rfind` the largest.
//! - `needle.len() > haystack.len()` returns `None` before any scanning.
//! - Nothing here allocates; the only per-call state is a 512-byte shift
//!   table on the stack.
//!
//! An empty needle matches everywhere, so the leftmost match is `0` and the
//! rightmost is `haystack.len()`. This is the same convention as
//! `str::find` / `str::rfind` and `memchr::memmem`.

mod anomaly;
mod horspool;
pub(crate) mod packed;


pub use anomaly::{locate_anomalies, Anomalies};
pub use horspool::HORSPOOL_MAX_NEEDLE;

use crate::stdx::ByteSet;

/// Flat "not found" sentinel for callers that cannot use `Option`.
pub const NOT_FOUND: usize = usize::MAX;

/// Collapse a search result into the flat sentinel form.
#[inline]
pub const fn offset_or_not_found(found: Option<usize>) -> usize {
    match found {
        Some(offset) => offset,
        None => NOT_FOUND,
    }
}

/// Length buckets used by the dispatch tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeedleClass {
    Empty,
    Byte,
    Packed2,
    Packed3,
    Packed4,
    Horspool,
    Long,
}

impl NeedleClass {
    #[inline]
    pub const fn of(len: usize) -> Self {
        match len {
            0 => Self::Empty,
            1 => Self::Byte,
            2 => Self::Packed2,
            3 => Self::Packed3,
            4 => Self::Packed4,
            5..=HORSPOOL_MAX_NEEDLE => Self::Horspool,
            _ => Self::Long,
        }
    }
}

/// Leftmost offset where `needle` occurs in `haystack`.
///
/// # Examples
/// ```
/// assert_eq!(bytematch::find(b"hello world", b"world"), Some(6));
/// assert_eq!(bytematch::find(b"abc", b"z"), None);
/// ```
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    match NeedleClass::of(needle.len()) {
        NeedleClass::Empty => Some(0),
        NeedleClass::Byte => find_byte(haystack, needle[0]),
        NeedleClass::Packed2 => packed::find_packed::<2>(haystack, needle),
        NeedleClass::Packed3 => packed::find_packed::<3>(haystack, needle),
        NeedleClass::Packed4 => packed::find_packed::<4>(haystack, needle),
        NeedleClass::Horspool => horspool::find_horspool(haystack, needle),
        NeedleClass::Long => horspool::find_long(haystack, needle),
    }
}

/// Rightmost offset where `needle` occurs in `haystack`.
pub fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    match NeedleClass::of(needle.len()) {
        NeedleClass::Empty => Some(haystack.len()),
        NeedleClass::Byte => rfind_byte(haystack, needle[0]),
        NeedleClass::Packed2 => packed::rfind_packed::<2>(haystack, needle),
        NeedleClass::Packed3 => packed::rfind_packed::<3>(haystack, needle),
        NeedleClass::Packed4 => packed::rfind_packed::<4>(haystack, needle),
        NeedleClass::Horspool => horspool::rfind_horspool(haystack, needle),
        NeedleClass::Long => horspool::rfind_long(haystack, needle),
    }
}

/// First occurrence of `byte`.
#[inline]
pub fn find_byte(haystack: &[u8], byte: u8) -> Option<usize> {
    memchr::memchr(byte, haystack)
}

/// Last occurrence of `byte`.
#[inline]
pub fn rfind_byte(haystack: &[u8], byte: u8) -> Option<usize> {
    memchr::memrchr(byte, haystack)
}

/// First byte of `haystack` that is a member of `set`.
pub fn find_byteset(haystack: &[u8], set: &ByteSet) -> Option<usize> {
    haystack.iter().position(|&b| set.contains(b))
}

/// Last byte of `haystack` that is a member of `set`.
pub fn rfind_byteset(haystack: &[u8], set: &ByteSet) -> Option<usize> {
    haystack.iter().rposition(|&b| set.contains(b))
}

/// First byte of `haystack` that appears anywhere in `bytes`.
pub fn find_byte_from(haystack: &[u8], bytes: &[u8]) -> Option<usize> {
    find_byteset(haystack, &ByteSet::from_bytes(bytes))
}

/// First byte of `haystack` that does not appear in `bytes`.
pub fn find_byte_not_from(haystack: &[u8], bytes: &[u8]) -> Option<usize> {
    find_byteset(haystack, &ByteSet::from_bytes(bytes).invert())
}

/// Last byte of `haystack` that appears anywhere in `bytes`.
pub fn rfind_byte_from(haystack: &[u8], bytes: &[u8]) -> Option<usize> {
    rfind_byteset(haystack, &ByteSet::from_bytes(bytes))
}

/// Last byte of `haystack` that does not appear in `bytes`.
pub fn rfind_byte_not_from(haystack: &[u8], bytes: &[u8]) -> Option<usize> {
    rfind_byteset(haystack, &ByteSet::from_bytes(bytes).invert())
}

#[cfg(feature = "bench")]
pub fn bench_find_horspool(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    horspool::find_horspool(haystack, needle)
}

#[cfg(feature = "bench")]
pub fn bench_find_packed4(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    packed::find_packed::<4>(haystack, needle)
}

//! Approximate-matching distances over byte strings.
//!
//! ## Scope
//! - Hamming distance over bytes or decoded runes ([`hamming_distance`],
//!   [`hamming_distance_utf8`]).
//! - Levenshtein edit distance over bytes or runes, bounded or unbounded
//!   ([`edit_distance`], [`edit_distance_utf8`]).
//! - Needleman-Wunsch alignment score with a full substitution table
//!   ([`alignment_score`]).
//!
//! ## Key invariants
//! - `bound == 0` means unbounded. A bounded call returns
//!   `min(true distance, bound)`.
//! - Edit distance and alignment take one scratch block of
//!   `O(min(len(a), len(b)))` from the caller's [`ScratchAllocator`] and
//!   release it before returning, on every path. Hamming never allocates.
//! - Allocation failure is the only error. It is reported as
//!   [`DistanceError::AllocationFailure`]; nothing leaks.
//!
//! ## Rune variants
//! Inputs are decoded with [`decode_unit`]; malformed bytes become one-byte
//! units that never equal a real codepoint (see [`utf8`]). When both inputs
//! are pure ASCII the byte kernels run directly.

mod alignment;
mod hamming;
mod levenshtein;
pub mod utf8;


pub use alignment::{alignment_score, SubstitutionMatrix};
pub use hamming::{hamming_distance, hamming_distance_utf8};
pub use levenshtein::{edit_distance, edit_distance_utf8};
pub use utf8::{decode_rune, decode_unit, runes_valid, InvalidEncoding, Rune, INVALID_RUNE_TAG};

use thiserror::Error;

/// Flat sentinel for callers that cannot carry a `Result`.
pub const ALLOC_FAILURE: usize = usize::MAX;

/// Errors returned by the allocating distance kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// The scratch allocator refused the single block this call needed.
    #[error("scratch allocation of {bytes} bytes failed")]
    AllocationFailure { bytes: usize },
}

/// Collapse a distance result into the flat sentinel form.
#[inline]
pub fn distance_or_alloc_failure(result: Result<usize, DistanceError>) -> usize {
    result.unwrap_or(ALLOC_FAILURE)
}

//! Byte-string search and approximate-matching distances.
//!
//! ## Scope
//! - Exact substring search, forward and reverse, dispatched by needle
//!   length ([`find`], [`rfind`]).
//! - First/last byte belonging to a [`ByteSet`] ([`find_byteset`],
//!   [`rfind_byteset`]).
//! - Hamming, Levenshtein and Needleman-Wunsch scoring over bytes, plus
//!   rune-aware variants for UTF-8 text.
//!
//! ## Key invariants
//! - Inputs are borrowed and never mutated; no call keeps state between
//!   invocations.
//! - `find` returns the leftmost match and `rfind` the rightmost. An empty
//!   needle matches at `0` and `haystack.len()` respectively.
//! - A needle longer than the haystack returns `None` before any scanning.
//! - Search never allocates. Edit distance and alignment take exactly one
//!   scratch block from a caller-supplied [`ScratchAllocator`] and give it
//!   back before returning.
//! - A bounded distance (`bound > 0`) returns `min(distance, bound)` and may
//!   stop early; `bound == 0` means unbounded.
//!
//! ## Failure reporting
//! No operation panics on valid input. "Not found" is `None`; allocator
//! refusal is [`DistanceError::AllocationFailure`]. Flat sentinels
//! ([`NOT_FOUND`], [`ALLOC_FAILURE`]) are available for callers that need
//! them.
//!
//! ## Backends
//! The free functions run the portable kernels. [`Backend`] selects an
//! equivalent kernel set by CPU capability or the `BYTEMATCH_BACKEND`
//! environment variable.

pub mod backend;
pub mod detect;
pub mod distance;
pub mod scratch_memory;
pub mod search;
pub mod stdx;
#[cfg(test)]
pub mod test_utils;

pub use backend::{Backend, BackendKind, Kernels, PortableKernels, VectorizedKernels};
pub use detect::Capabilities;
pub use distance::{
    alignment_score, decode_rune, distance_or_alloc_failure, edit_distance, edit_distance_utf8,
    hamming_distance, hamming_distance_utf8, runes_valid, DistanceError, InvalidEncoding, Rune,
    SubstitutionMatrix, ALLOC_FAILURE,
};
pub use scratch_memory::{
    FixedArena, ScratchAllocator, ScratchBuffer, ScratchMemoryError, SystemAllocator,
};
pub use search::{
    find, find_byte, find_byte_from, find_byte_not_from, find_byteset, locate_anomalies,
    offset_or_not_found, rfind, rfind_byte, rfind_byte_from, rfind_byte_not_from, rfind_byteset,
    Anomalies, HORSPOOL_MAX_NEEDLE, NOT_FOUND,
};
pub use stdx::ByteSet;

#[cfg(feature = "bench")]
pub use search::{bench_find_horspool, bench_find_packed4};

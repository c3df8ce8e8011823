//! Small, self-contained data structures used across the crate.

pub mod byteset;

pub use byteset::{ByteSet, ByteSetIter, BYTESET_WORDS};

//! Property-based and differential soundness tests.
//!
//! Run with: `cargo test --test property`

mod byteset_algebra;
mod distance_properties;
mod search_soundness;

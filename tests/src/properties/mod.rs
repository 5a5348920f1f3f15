//! # Property Tests
//!
//! Invariants checked over generated inputs with `proptest`.

pub mod auction;
pub mod merkle;
pub mod time_locks;

//! # Conformance Vectors
//!
//! Byte-exact outputs the contracts and the reference SDK agree on.

pub mod escrow;
pub mod order;

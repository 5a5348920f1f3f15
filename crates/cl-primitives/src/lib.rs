//! # Crosslock Primitives
//!
//! EVM value types shared by every Crosslock crate.
//!
//! ## Contents
//!
//! | Module | Provides |
//! |--------|----------|
//! | `address` | 20-byte [`Address`], native-currency sentinel |
//! | `hash` | 32-byte [`Hash`], [`keccak256`] |
//! | `abi` | static ABI words, `bytes32[]` tails |
//! | `bytes` | packed big-endian builder and cursor |
//! | `bits` | [`BitMask`] ranges over `U256` |
//! | `interaction` | [`Interaction`] (`target ++ data`) |
//!
//! All encoders here are byte-exact with Solidity's `abi.encode` and
//! `abi.encodePacked` for the types they cover.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod address;
pub mod bits;
pub mod bytes;
pub mod errors;
pub mod hash;
pub mod interaction;

// Re-exports
pub use abi::{u256_word, AbiDecoder, AbiEncoder};
pub use address::Address;
pub use bits::{with_bit, BitMask};
pub use bytes::{BytesBuilder, BytesIter};
pub use errors::{decode_hex, encode_hex, PrimitiveError};
pub use hash::{keccak256, keccak256_concat, Hash};
pub use interaction::Interaction;
pub use primitive_types::{U256, U512};

/// Largest `uint16`.
pub const UINT_16_MAX: u64 = u16::MAX as u64;
/// Largest `uint24`.
pub const UINT_24_MAX: u64 = (1 << 24) - 1;
/// Largest `uint32`.
pub const UINT_32_MAX: u64 = u32::MAX as u64;
/// Largest `uint40`.
pub const UINT_40_MAX: u64 = (1 << 40) - 1;
/// Largest `uint80`.
pub fn uint_80_max() -> U256 {
    (U256::one() << 80) - 1
}
/// Largest `uint128`.
pub fn uint_128_max() -> U256 {
    U256::from(u128::MAX)
}
/// Largest `uint160`.
pub fn uint_160_max() -> U256 {
    (U256::one() << 160) - 1
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # Algorithms Module
//!
//! Hashing, Merkle proofs and address derivation used by the escrow domain.

pub mod create2;
pub mod merkle;
pub mod secret;

pub use create2::{calc_proxy_bytecode_hash, create2_address, zksync_create2_address};
pub use merkle::{hash_pair, process_proof, verify_proof, SortedPairMerkleTree};
pub use secret::{generate_random_secret, hash_secret, hash_secret_hex, verify_secret};

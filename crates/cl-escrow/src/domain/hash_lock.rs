//! # Hash-Lock
//!
//! The `bytes32` commitment an escrow withdrawal must open.
//!
//! | Mode | Value |
//! |------|-------|
//! | Single fill | `keccak256(secret)` |
//! | Multiple fills | sorted-pair Merkle root, bits [240,256) = `leaves - 1` |
//!
//! Each Merkle leaf is `keccak256(uint64 index ++ keccak256(secret))`, so a
//! secret only opens the position it was created for.

use super::errors::EscrowError;
use crate::algorithms::{hash_secret, merkle, SortedPairMerkleTree};
use cl_primitives::{keccak256_concat, BitMask, Hash, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Bits of a multi-fill root that carry `parts_count`.
pub const PARTS_COUNT_MASK: BitMask = BitMask::new(240, 256);

/// Hash-lock value shared by the source and destination escrows.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashLock(Hash);

impl HashLock {
    /// Wraps an existing 32-byte value.
    pub fn new(value: Hash) -> Self {
        Self(value)
    }

    /// Parse from 32 raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EscrowError> {
        Ok(Self(Hash::from_slice(bytes)?))
    }

    /// keccak256 of a 32-byte secret.
    pub fn hash_secret(secret: &[u8]) -> Result<Hash, EscrowError> {
        hash_secret(secret)
    }

    /// Hash-lock for an order filled at once.
    pub fn for_single_fill(secret: &[u8]) -> Result<Self, EscrowError> {
        Ok(Self(hash_secret(secret)?))
    }

    /// Index-salted leaves for a list of secrets.
    pub fn get_merkle_leaves<S: AsRef<[u8]>>(secrets: &[S]) -> Result<Vec<Hash>, EscrowError> {
        let hashes = secrets
            .iter()
            .map(|s| hash_secret(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::get_merkle_leaves_from_secret_hashes(&hashes))
    }

    /// Index-salted leaves for already-hashed secrets.
    pub fn get_merkle_leaves_from_secret_hashes(secret_hashes: &[Hash]) -> Vec<Hash> {
        secret_hashes
            .iter()
            .enumerate()
            .map(|(idx, hash)| Self::merkle_leaf(idx as u64, hash))
            .collect()
    }

    /// `keccak256(uint64 idx ++ bytes32 secret_hash)`.
    pub fn merkle_leaf(idx: u64, secret_hash: &Hash) -> Hash {
        keccak256_concat(&[&idx.to_be_bytes(), secret_hash.as_bytes()])
    }

    /// Hash-lock for an order that may be filled in parts.
    pub fn for_multiple_fills(leaves: &[Hash]) -> Result<Self, EscrowError> {
        if leaves.len() <= 2 {
            return Err(EscrowError::TooFewLeaves {
                count: leaves.len(),
            });
        }
        let root = SortedPairMerkleTree::build(leaves)?.root();
        let with_count = PARTS_COUNT_MASK
            .set(root.to_u256(), U256::from(leaves.len() - 1))
            .map_err(|_| EscrowError::TooManyLeaves {
                count: leaves.len(),
            })?;

        let lock = Self(Hash::from_u256(with_count));
        debug!("[cl-escrow] Built multi-fill hash-lock {} over {} leaves", lock, leaves.len());
        Ok(lock)
    }

    /// Merkle proof for the leaf at `idx` (position in `leaves`).
    pub fn get_proof(leaves: &[Hash], idx: usize) -> Result<Vec<Hash>, EscrowError> {
        SortedPairMerkleTree::build(leaves)?.proof(idx)
    }

    /// Check a proof against a plain Merkle root.
    pub fn verify_proof(proof: &[Hash], root: &Hash, leaf: &Hash) -> bool {
        merkle::verify_proof(proof, root, leaf)
    }

    /// Check a proof against this multi-fill lock, ignoring the parts-count bits.
    pub fn verify_leaf(&self, proof: &[Hash], leaf: &Hash) -> bool {
        let computed = merkle::process_proof(proof, leaf).to_u256();
        let low = BitMask::new(0, 240);
        low.get(computed) == low.get(self.0.to_u256())
    }

    /// Bits [240,256): `leaves - 1` for a multi-fill lock.
    ///
    /// On a single-fill lock this is just the top 16 bits of the secret hash.
    pub fn get_parts_count(&self) -> u64 {
        PARTS_COUNT_MASK.get(self.0.to_u256()).low_u64()
    }

    /// Underlying value.
    pub fn value(&self) -> Hash {
        self.0
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for HashLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashLock({})", self.0)
    }
}

impl fmt::Display for HashLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for HashLock {
    type Err = EscrowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Hash> for HashLock {
    fn from(value: Hash) -> Self {
        Self(value)
    }
}

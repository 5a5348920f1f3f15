//! # Sorted-Pair Merkle Tree
//!
//! Binary hash tree in array form whose parent nodes hash their children in
//! ascending byte order, so proofs carry no left/right flags.
//!
//! ## Layout
//!
//! Leaves are sorted ascending and written from the end of a `2n - 1`
//! array backwards (`nodes[len - 1 - i] = sorted[i]`). Parent `i` has
//! children `2i + 1` and `2i + 2`; the root sits at index 0. This is the
//! layout the on-chain `MerkleProof` verifier expects.

use crate::domain::EscrowError;
use cl_primitives::{keccak256_concat, Hash};

/// Array-form Merkle tree over 32-byte leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedPairMerkleTree {
    /// All nodes, root at index 0.
    nodes: Vec<Hash>,
    /// Position in `nodes` of each leaf, by original index.
    leaf_positions: Vec<usize>,
}

impl SortedPairMerkleTree {
    /// Build a tree from leaves in caller order.
    pub fn build(leaves: &[Hash]) -> Result<Self, EscrowError> {
        if leaves.is_empty() {
            return Err(EscrowError::TooFewLeaves { count: 0 });
        }

        let mut sorted: Vec<(usize, Hash)> = leaves.iter().copied().enumerate().collect();
        sorted.sort_by(|a, b| a.1.cmp(&b.1));

        let total = 2 * leaves.len() - 1;
        let mut nodes = vec![Hash::ZERO; total];
        let mut leaf_positions = vec![0usize; leaves.len()];

        for (i, (original, leaf)) in sorted.iter().enumerate() {
            let position = total - 1 - i;
            nodes[position] = *leaf;
            leaf_positions[*original] = position;
        }

        for i in (0..total - leaves.len()).rev() {
            nodes[i] = hash_pair(&nodes[2 * i + 1], &nodes[2 * i + 2]);
        }

        Ok(Self {
            nodes,
            leaf_positions,
        })
    }

    /// Root hash.
    pub fn root(&self) -> Hash {
        self.nodes[0]
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_positions.len()
    }

    /// Sibling path from the leaf at original `index` up to the root.
    pub fn proof(&self, index: usize) -> Result<Vec<Hash>, EscrowError> {
        let mut current = *self
            .leaf_positions
            .get(index)
            .ok_or(EscrowError::LeafIndexOutOfRange {
                index,
                count: self.leaf_count(),
            })?;

        let mut path = Vec::new();
        while current > 0 {
            let sibling = if current % 2 == 0 {
                current - 1
            } else {
                current + 1
            };
            path.push(self.nodes[sibling]);
            current = (current - 1) / 2;
        }
        Ok(path)
    }
}

/// Fold a proof onto a leaf and return the implied root.
pub fn process_proof(proof: &[Hash], leaf: &Hash) -> Hash {
    proof
        .iter()
        .fold(*leaf, |current, sibling| hash_pair(&current, sibling))
}

/// Check that `proof` links `leaf` to `root`.
pub fn verify_proof(proof: &[Hash], root: &Hash, leaf: &Hash) -> bool {
    process_proof(proof, leaf) == *root
}

/// keccak256 of the two nodes, smaller first.
pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    if a <= b {
        keccak256_concat(&[a.as_bytes(), b.as_bytes()])
    } else {
        keccak256_concat(&[b.as_bytes(), a.as_bytes()])
    }
}

//! # Domain Errors
//!
//! Error types for escrow parameter construction and decoding.

use cl_primitives::PrimitiveError;
use thiserror::Error;

/// Escrow error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscrowError {
    /// Malformed hex, length or ABI word.
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    /// Secret is not 32 bytes.
    #[error("Secret must be 32 bytes, got {0}")]
    InvalidSecretLength(usize),

    /// Multi-fill hash-locks need more than two leaves.
    #[error("Merkle leaves must be more than 2, got {count}; use a single-fill hash-lock")]
    TooFewLeaves {
        /// Leaves supplied
        count: usize,
    },

    /// Parts count does not fit the 16 top bits of the root.
    #[error("Too many Merkle leaves: {count}")]
    TooManyLeaves {
        /// Leaves supplied
        count: usize,
    },

    /// Proof requested for a leaf that does not exist.
    #[error("Leaf index {index} out of range for {count} leaves")]
    LeafIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of leaves
        count: usize,
    },

    /// Time-lock field wider than 32 bits.
    #[error("{field} can not be > uint32 max value, got {value}")]
    TimeLockOverflow {
        /// Field name
        field: &'static str,
        /// Offending value
        value: u64,
    },

    /// Stage boundaries not strictly increasing.
    #[error("{earlier} ({earlier_value}) must be < {later} ({later_value})")]
    TimeLockOrder {
        /// Earlier stage name
        earlier: &'static str,
        /// Earlier stage delay
        earlier_value: u64,
        /// Later stage name
        later: &'static str,
        /// Later stage delay
        later_value: u64,
    },

    /// Anchor timestamp is zero or wider than 32 bits.
    #[error("deployedAt must be in (0, uint32 max], got {0}")]
    InvalidDeployedAt(u64),

    /// Anchor timestamp is not after a stage delay.
    #[error("deployedAt {deployed_at} can not be less than {field} delay {delay}")]
    DeployedAtBeforeDelay {
        /// Anchor timestamp
        deployed_at: u64,
        /// Stage name
        field: &'static str,
        /// Stage delay
        delay: u64,
    },

    /// Rescue delay pushes the rescue start past u64.
    #[error("Rescue delay {0} overflows the rescue start")]
    RescueDelayOverflow(u64),

    /// Amount field is not a decimal integer.
    #[error("Invalid decimal amount: {0}")]
    InvalidAmount(String),
}

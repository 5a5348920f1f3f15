//! # Order Errors

use cl_auction::AuctionError;
use cl_escrow::EscrowError;
use cl_primitives::{Hash, PrimitiveError};
use thiserror::Error;

/// Errors raised while building, decoding or relaying cross-chain orders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Malformed bytes or hex.
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    /// Escrow parameter failure.
    #[error(transparent)]
    Escrow(#[from] EscrowError),

    /// Auction or fee failure.
    #[error(transparent)]
    Auction(#[from] AuctionError),

    /// Chain id outside the configured set.
    #[error("Not supported chain {0}")]
    UnsupportedChain(u64),

    /// Source and destination chain are the same.
    #[error("Chains must be different, got {0} twice")]
    SameChain(u64),

    /// Extension bytes do not describe a valid escrow order.
    #[error("Invalid extension: {0}")]
    InvalidExtension(String),

    /// Salt does not commit to the extension.
    #[error("Invalid salt for passed extension")]
    SaltMismatch,

    /// Value wider than its on-chain field.
    #[error("{field} does not fit in {bits} bits")]
    FieldTooWide {
        /// Field name
        field: &'static str,
        /// On-chain width
        bits: u32,
    },

    /// Timestamp arithmetic left the u64 range.
    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),

    /// Order flags not usable for an escrow order.
    #[error("Invalid maker traits: {0}")]
    InvalidMakerTraits(&'static str),

    /// Bit-invalidator orders need an explicit nonce.
    #[error("Nonce required, when partial fill or multiple fill disallowed")]
    NonceRequired,

    /// A partial fill was requested against the root hash-lock.
    #[error("Provide leaf of merkle tree as HashLock for partial fill")]
    PartialFillNeedsLeaf,

    /// Fill index requested for a single-fill order.
    #[error("Multiple fills disabled for order")]
    MultipleFillsDisabled,

    /// Fill amount is zero or exceeds what remains.
    #[error("Invalid fill amount {fill} with {remaining} remaining")]
    InvalidFillAmount {
        /// Requested fill
        fill: String,
        /// Remaining making amount
        remaining: String,
    },

    /// Configuration value could not be parsed.
    #[error("Invalid configuration {key}: {reason}")]
    Config {
        /// Environment key
        key: &'static str,
        /// Parse failure
        reason: String,
    },

    /// Unknown order hash.
    #[error("Order not found: {0}")]
    OrderNotFound(Hash),

    /// Order is not ready to accept a secret.
    #[error("Order {0} is not ready to accept secret fills")]
    SecretNotExpected(Hash),

    /// Relayer or signer transport failure.
    #[error("Transport error: {0}")]
    Transport(String),
}

//! # Auction Errors

use cl_primitives::PrimitiveError;
use thiserror::Error;

/// Errors raised by auction, fee and whitelist computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    /// Malformed packed bytes.
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    /// Division by zero.
    #[error("Division by zero in {0}")]
    DivisionByZero(&'static str),

    /// Result wider than 256 bits.
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// Auction field does not fit its on-chain width.
    #[error("{field} does not fit in {bits} bits: {value}")]
    FieldTooWide {
        /// Field name
        field: &'static str,
        /// On-chain width
        bits: u32,
        /// Offending value
        value: u64,
    },

    /// Whitelist has no entries.
    #[error("Whitelist can not be empty")]
    EmptyWhitelist,

    /// Gap between two whitelist entries does not fit `uint16`.
    #[error("Too big diff between timestamps: {0}")]
    WhitelistDelayTooBig(u64),

    /// Fee or percentage outside its base.
    #[error("Invalid {field}: {value} exceeds {max}")]
    InvalidFee {
        /// Field name
        field: &'static str,
        /// Offending value
        value: u64,
        /// Upper bound
        max: u64,
    },
}

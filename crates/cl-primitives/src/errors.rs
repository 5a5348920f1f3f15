//! # Primitive Errors
//!
//! Decoding failures for hex strings, fixed-size values and packed byte streams.

use thiserror::Error;

/// Errors raised while parsing or decoding primitive values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Input is not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Input has the wrong number of bytes.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },

    /// Packed stream ended before the requested field.
    #[error("Unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd {
        /// Bytes requested
        needed: usize,
        /// Bytes left in the stream
        remaining: usize,
    },

    /// Value does not fit the target width.
    #[error("Value does not fit in {bits} bits")]
    Overflow {
        /// Target width
        bits: usize,
    },

    /// ABI word carried non-zero padding.
    #[error("Malformed ABI word at offset {offset}: {reason}")]
    MalformedAbi {
        /// Byte offset of the offending word
        offset: usize,
        /// What was wrong with it
        reason: &'static str,
    },
}

/// Decode a hex string, with or without a `0x` prefix.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, PrimitiveError> {
    let trimmed = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(trimmed).map_err(|e| PrimitiveError::InvalidHex(e.to_string()))
}

/// Encode bytes as a `0x`-prefixed lowercase hex string.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

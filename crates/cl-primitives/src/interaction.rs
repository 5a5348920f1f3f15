//! # Interaction
//!
//! A call target plus calldata, encoded as `target ++ data`.

use crate::address::Address;
use crate::errors::{encode_hex, PrimitiveError};
use serde::{Deserialize, Serialize};

/// Target contract and the bytes passed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Contract that receives the call.
    pub target: Address,
    /// Calldata.
    #[serde(with = "hex_bytes")]
    pub data: Vec<u8>,
}

impl Interaction {
    /// Creates an interaction.
    #[must_use]
    pub fn new(target: Address, data: Vec<u8>) -> Self {
        Self { target, data }
    }

    /// `target ++ data`.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(20 + self.data.len());
        out.extend_from_slice(self.target.as_bytes());
        out.extend_from_slice(&self.data);
        out
    }

    /// Splits the first 20 bytes off as the target.
    pub fn decode(bytes: &[u8]) -> Result<Self, PrimitiveError> {
        if bytes.len() < 20 {
            return Err(PrimitiveError::UnexpectedEnd {
                needed: 20,
                remaining: bytes.len(),
            });
        }
        Ok(Self {
            target: Address::from_slice(&bytes[..20])?,
            data: bytes[20..].to_vec(),
        })
    }

    /// `0x`-prefixed hex of [`Self::encode`].
    #[must_use]
    pub fn to_hex(&self) -> String {
        encode_hex(&self.encode())
    }
}

/// Serde helper for `Vec<u8>` as a `0x`-hex string.
pub mod hex_bytes {
    use crate::errors::{decode_hex, encode_hex};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as hex.
    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode_hex(bytes))
    }

    /// Deserialize bytes from hex.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        decode_hex(&s).map_err(serde::de::Error::custom)
    }
}

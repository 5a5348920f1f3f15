//! # Secure Secret Type
//!
//! Wrapper for hash-lock secrets that zeroizes memory on drop.

use super::errors::EscrowError;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 32-byte escrow secret that zeroizes on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureSecret {
    inner: [u8; 32],
}

impl SecureSecret {
    /// Create a new secure secret from bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self { inner: bytes }
    }

    /// Create from a slice (copies into fixed array).
    pub fn from_slice(slice: &[u8]) -> Result<Self, EscrowError> {
        let inner: [u8; 32] = slice
            .try_into()
            .map_err(|_| EscrowError::InvalidSecretLength(slice.len()))?;
        Ok(Self { inner })
    }

    /// Parse from `0x`-hex.
    pub fn from_hex(s: &str) -> Result<Self, EscrowError> {
        let bytes = cl_primitives::decode_hex(s)?;
        Self::from_slice(&bytes)
    }

    /// Get the secret bytes.
    ///
    /// Avoid keeping references to the returned slice.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.inner
    }

    /// `0x`-hex form, as submitted to the relayer.
    pub fn to_hex(&self) -> String {
        cl_primitives::encode_hex(&self.inner)
    }
}

impl AsRef<[u8]> for SecureSecret {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl std::fmt::Debug for SecureSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the actual secret
        f.write_str("SecureSecret(***)")
    }
}

impl Serialize for SecureSecret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SecureSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let trimmed = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(trimmed).map_err(serde::de::Error::custom)?;
        Self::from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}

//! # Secret Generation and Verification

use crate::domain::{EscrowError, SecureSecret};
use cl_primitives::{keccak256, Hash};
use rand::RngCore;

/// Generate a cryptographically secure random secret.
pub fn generate_random_secret() -> SecureSecret {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let secret = SecureSecret::new(bytes);
    zeroize::Zeroize::zeroize(&mut bytes);
    secret
}

/// keccak256 of a 32-byte secret.
pub fn hash_secret(secret: &[u8]) -> Result<Hash, EscrowError> {
    if secret.len() != 32 {
        return Err(EscrowError::InvalidSecretLength(secret.len()));
    }
    Ok(keccak256(secret))
}

/// keccak256 of a `0x`-hex encoded 32-byte secret.
pub fn hash_secret_hex(secret: &str) -> Result<Hash, EscrowError> {
    let bytes = cl_primitives::decode_hex(secret)?;
    hash_secret(&bytes)
}

/// Verify that a secret opens a single-fill hash-lock value.
pub fn verify_secret(secret: &[u8], hash_lock: &Hash) -> bool {
    hash_secret(secret).map(|h| h == *hash_lock).unwrap_or(false)
}

//! # Maker Traits
//!
//! Order flags and small fields packed into one `uint256`.
//!
//! | Bits | Field |
//! |------|-------|
//! | 0..80 | allowed sender (low 80 bits of the address) |
//! | 80..120 | expiration |
//! | 120..160 | nonce or epoch |
//! | 160..200 | series |
//! | 247 | unwrap WETH |
//! | 248 | use permit2 |
//! | 249 | has extension |
//! | 250 | check epoch manager |
//! | 251 | post-interaction call |
//! | 252 | pre-interaction call |
//! | 254 | allow multiple fills |
//! | 255 | no partial fills |

use crate::errors::OrderError;
use cl_primitives::{with_bit, BitMask, U256, UINT_40_MAX};
use serde::{Deserialize, Serialize};

const ALLOWED_SENDER_MASK: BitMask = BitMask::new(0, 80);
const EXPIRATION_MASK: BitMask = BitMask::new(80, 120);
const NONCE_OR_EPOCH_MASK: BitMask = BitMask::new(120, 160);
const SERIES_MASK: BitMask = BitMask::new(160, 200);

const NO_PARTIAL_FILLS_FLAG: usize = 255;
const ALLOW_MULTIPLE_FILLS_FLAG: usize = 254;
const PRE_INTERACTION_CALL_FLAG: usize = 252;
const POST_INTERACTION_CALL_FLAG: usize = 251;
const NEED_CHECK_EPOCH_MANAGER_FLAG: usize = 250;
const HAS_EXTENSION_FLAG: usize = 249;
const USE_PERMIT2_FLAG: usize = 248;
const UNWRAP_WETH_FLAG: usize = 247;

/// Packed maker traits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MakerTraits(U256);

fn bit(word: U256, index: usize) -> bool {
    BitMask::bit(index).is_set(word)
}

fn set_u40(
    word: U256,
    mask: &BitMask,
    field: &'static str,
    value: u64,
) -> Result<U256, OrderError> {
    if value > UINT_40_MAX {
        return Err(OrderError::FieldTooWide { field, bits: 40 });
    }
    Ok(mask.set(word, U256::from(value))?)
}

impl MakerTraits {
    /// Wrap a raw value.
    pub fn new(value: U256) -> Self {
        Self(value)
    }

    /// Raw value.
    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Low 80 bits of the only address allowed to fill, zero when anyone may.
    pub fn allowed_sender(&self) -> U256 {
        ALLOWED_SENDER_MASK.get(self.0)
    }

    /// Check if only one sender may fill.
    pub fn is_private(&self) -> bool {
        !self.allowed_sender().is_zero()
    }

    /// Restrict filling to `sender`, matched on its low 80 bits.
    pub fn with_allowed_sender(self, sender: &cl_primitives::Address) -> Result<Self, OrderError> {
        let low = U256::from_big_endian(&sender.last_half());
        Ok(Self(ALLOWED_SENDER_MASK.set(self.0, low)?))
    }

    /// Expiration timestamp, `None` when the order never expires.
    pub fn expiration(&self) -> Option<u64> {
        let value = EXPIRATION_MASK.get(self.0).low_u64();
        (value != 0).then_some(value)
    }

    /// Set the expiration timestamp.
    pub fn with_expiration(self, expiration: u64) -> Result<Self, OrderError> {
        Ok(Self(set_u40(self.0, &EXPIRATION_MASK, "expiration", expiration)?))
    }

    /// Nonce, or epoch when the epoch manager is used.
    pub fn nonce_or_epoch(&self) -> u64 {
        NONCE_OR_EPOCH_MASK.get(self.0).low_u64()
    }

    /// Set the nonce.
    pub fn with_nonce(self, nonce: u64) -> Result<Self, OrderError> {
        Ok(Self(set_u40(self.0, &NONCE_OR_EPOCH_MASK, "nonce", nonce)?))
    }

    /// Series for the epoch manager.
    pub fn series(&self) -> u64 {
        SERIES_MASK.get(self.0).low_u64()
    }

    /// Set series and epoch, enabling the epoch manager check.
    pub fn with_epoch(self, series: u64, epoch: u64) -> Result<Self, OrderError> {
        let word = set_u40(self.0, &SERIES_MASK, "series", series)?;
        let word = set_u40(word, &NONCE_OR_EPOCH_MASK, "epoch", epoch)?;
        Ok(Self(with_bit(word, NEED_CHECK_EPOCH_MANAGER_FLAG, true)))
    }

    /// Check if the epoch manager must be consulted.
    pub fn is_epoch_manager_enabled(&self) -> bool {
        bit(self.0, NEED_CHECK_EPOCH_MANAGER_FLAG)
    }

    /// Check if the order may be filled in parts.
    pub fn is_partial_fill_allowed(&self) -> bool {
        !bit(self.0, NO_PARTIAL_FILLS_FLAG)
    }

    /// Allow or forbid partial fills.
    pub fn set_partial_fills(self, allow: bool) -> Self {
        Self(with_bit(self.0, NO_PARTIAL_FILLS_FLAG, !allow))
    }

    /// Check if the order may be filled more than once.
    pub fn is_multiple_fills_allowed(&self) -> bool {
        bit(self.0, ALLOW_MULTIPLE_FILLS_FLAG)
    }

    /// Allow or forbid multiple fills.
    pub fn set_multiple_fills(self, allow: bool) -> Self {
        Self(with_bit(self.0, ALLOW_MULTIPLE_FILLS_FLAG, allow))
    }

    /// Check if the bit invalidator tracks this order, i.e. it fills once.
    pub fn is_bit_invalidator_mode(&self) -> bool {
        !self.is_partial_fill_allowed() || !self.is_multiple_fills_allowed()
    }

    /// Check if a pre-interaction is called.
    pub fn has_pre_interaction(&self) -> bool {
        bit(self.0, PRE_INTERACTION_CALL_FLAG)
    }

    /// Call the pre-interaction.
    pub fn enable_pre_interaction(self) -> Self {
        Self(with_bit(self.0, PRE_INTERACTION_CALL_FLAG, true))
    }

    /// Check if a post-interaction is called.
    pub fn has_post_interaction(&self) -> bool {
        bit(self.0, POST_INTERACTION_CALL_FLAG)
    }

    /// Call the post-interaction.
    pub fn enable_post_interaction(self) -> Self {
        Self(with_bit(self.0, POST_INTERACTION_CALL_FLAG, true))
    }

    /// Check if the order carries an extension.
    pub fn has_extension(&self) -> bool {
        bit(self.0, HAS_EXTENSION_FLAG)
    }

    /// Mark the order as carrying an extension.
    pub fn with_extension(self) -> Self {
        Self(with_bit(self.0, HAS_EXTENSION_FLAG, true))
    }

    /// Check if transfers go through permit2.
    pub fn is_permit2(&self) -> bool {
        bit(self.0, USE_PERMIT2_FLAG)
    }

    /// Route transfers through permit2.
    pub fn enable_permit2(self) -> Self {
        Self(with_bit(self.0, USE_PERMIT2_FLAG, true))
    }

    /// Check if received WETH is unwrapped.
    pub fn is_native_unwrap_enabled(&self) -> bool {
        bit(self.0, UNWRAP_WETH_FLAG)
    }

    /// Unwrap received WETH.
    pub fn enable_native_unwrap(self) -> Self {
        Self(with_bit(self.0, UNWRAP_WETH_FLAG, true))
    }
}

impl From<U256> for MakerTraits {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

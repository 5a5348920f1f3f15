//! # Escrow Extension
//!
//! A settlement extension with the escrow parameters appended to the
//! post-interaction, so the source escrow factory can read them.
//!
//! ## Trailer
//!
//! | Word | Value |
//! |------|-------|
//! | 0 | hash-lock |
//! | 1 | destination chain id |
//! | 2 | destination token (zero for the native coin) |
//! | 3 | `srcSafetyDeposit << 128 \| dstSafetyDeposit` |
//! | 4 | packed time-locks |

use crate::errors::OrderError;
use crate::extension::Extension;
use crate::settlement_extension::SettlementExtension;
use cl_escrow::{HashLock, TimeLocks};
use cl_primitives::{uint_128_max, AbiDecoder, AbiEncoder, Address, U256};
use tracing::debug;

/// Trailer size in bytes.
pub const EXTRA_DATA_LENGTH: usize = 5 * 32;

/// Escrow fields carried in the trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowExtraData {
    /// Root or single-fill hash-lock.
    pub hash_lock: HashLock,
    /// Destination chain id.
    pub dst_chain_id: u64,
    /// Destination token; the native-currency sentinel for the native coin.
    pub dst_token: Address,
    /// Source safety deposit.
    pub src_safety_deposit: U256,
    /// Destination safety deposit.
    pub dst_safety_deposit: U256,
    /// Stage delays, not yet anchored.
    pub time_locks: TimeLocks,
}

impl EscrowExtraData {
    /// ABI-encoded trailer.
    pub fn encode(&self) -> Vec<u8> {
        let dst_token = if self.dst_token.is_native() {
            Address::ZERO
        } else {
            self.dst_token
        };
        let deposits = (self.src_safety_deposit << 128) | self.dst_safety_deposit;
        let mut enc = AbiEncoder::new();
        enc.bytes32(&self.hash_lock.value())
            .uint(U256::from(self.dst_chain_id))
            .address(&dst_token)
            .uint(deposits)
            .uint(self.time_locks.build());
        enc.finish()
    }

    /// Parse a trailer of exactly [`EXTRA_DATA_LENGTH`] bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, OrderError> {
        let dec = AbiDecoder::exact(bytes, 5)?;
        let dst_chain_id = dec.uint(1)?;
        if dst_chain_id > U256::from(u64::MAX) {
            return Err(OrderError::FieldTooWide {
                field: "dstChainId",
                bits: 64,
            });
        }
        let deposits = dec.uint(3)?;
        Ok(Self {
            hash_lock: HashLock::new(dec.bytes32(0)?),
            dst_chain_id: dst_chain_id.low_u64(),
            dst_token: native_if_zero(dec.address(2)?),
            src_safety_deposit: deposits >> 128,
            dst_safety_deposit: deposits & uint_128_max(),
            time_locks: TimeLocks::from_u256(dec.uint(4)?)?,
        })
    }
}

fn native_if_zero(token: Address) -> Address {
    if token.is_zero() {
        Address::NATIVE_CURRENCY
    } else {
        token
    }
}

/// Settlement extension plus escrow trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowExtension {
    settlement: SettlementExtension,
    extra: EscrowExtraData,
}

impl EscrowExtension {
    /// Combine settlement data with escrow parameters.
    ///
    /// Both safety deposits must fit in 128 bits; a zero destination token
    /// is stored as the native-currency sentinel.
    pub fn new(settlement: SettlementExtension, mut extra: EscrowExtraData) -> Result<Self, OrderError> {
        for (field, value) in [
            ("srcSafetyDeposit", extra.src_safety_deposit),
            ("dstSafetyDeposit", extra.dst_safety_deposit),
        ] {
            if value > uint_128_max() {
                return Err(OrderError::FieldTooWide { field, bits: 128 });
            }
        }
        extra.dst_token = native_if_zero(extra.dst_token);
        Ok(Self { settlement, extra })
    }

    /// Settlement part.
    pub fn settlement(&self) -> &SettlementExtension {
        &self.settlement
    }

    /// Escrow trailer fields.
    pub fn extra(&self) -> &EscrowExtraData {
        &self.extra
    }

    /// Hash-lock committed by the maker.
    pub fn hash_lock(&self) -> HashLock {
        self.extra.hash_lock
    }

    /// Destination chain id.
    pub fn dst_chain_id(&self) -> u64 {
        self.extra.dst_chain_id
    }

    /// Destination token.
    pub fn dst_token(&self) -> Address {
        self.extra.dst_token
    }

    /// Source safety deposit.
    pub fn src_safety_deposit(&self) -> U256 {
        self.extra.src_safety_deposit
    }

    /// Destination safety deposit.
    pub fn dst_safety_deposit(&self) -> U256 {
        self.extra.dst_safety_deposit
    }

    /// Stage delays.
    pub fn time_locks(&self) -> TimeLocks {
        self.extra.time_locks
    }

    /// Limit-order extension with the trailer appended to the post-interaction.
    pub fn build(&self) -> Result<Extension, OrderError> {
        let mut extension = self.settlement.build()?;
        extension.post_interaction.extend(self.extra.encode());
        Ok(extension)
    }

    /// Parse encoded extension bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, OrderError> {
        Self::from_extension(&Extension::decode(bytes)?)
    }

    /// Split the trailer off the post-interaction and parse both parts.
    pub fn from_extension(extension: &Extension) -> Result<Self, OrderError> {
        let post = &extension.post_interaction;
        if post.len() < 20 + EXTRA_DATA_LENGTH {
            return Err(OrderError::InvalidExtension(format!(
                "post-interaction of {} bytes has no escrow trailer",
                post.len()
            )));
        }
        let split = post.len() - EXTRA_DATA_LENGTH;
        let settlement = SettlementExtension::from_extension(&Extension {
            post_interaction: post[..split].to_vec(),
            ..extension.clone()
        })?;
        let extra = EscrowExtraData::decode(&post[split..])?;
        debug!(
            "[cl-order] Decoded escrow extension (dst chain {}, hashlock {})",
            extra.dst_chain_id,
            extra.hash_lock
        );
        Self::new(settlement, extra)
    }
}

//! # Limit Order
//!
//! The limit-order protocol v4 order that carries a cross-chain swap on the
//! source chain.
//!
//! When an extension is attached, the low 160 bits of the salt must equal
//! the low 160 bits of `keccak256(extension)`; the upper 96 bits are free.

use crate::eip712::{order_digest, EIP712Domain, EIP712TypedData};
use crate::errors::OrderError;
use crate::extension::Extension;
use crate::maker_traits::MakerTraits;
use cl_primitives::{uint_160_max, Address, Hash, U256};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Width of the caller-chosen part of a salt.
pub const BASE_SALT_BITS: usize = 96;

/// Order fields as signed and submitted on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrderV4Struct {
    /// Salt
    #[serde(with = "u256_dec")]
    pub salt: U256,
    /// Maker
    pub maker: Address,
    /// Receiver of the taker asset, zero for the maker
    pub receiver: Address,
    /// Asset the maker sells
    pub maker_asset: Address,
    /// Asset the maker buys
    pub taker_asset: Address,
    /// Amount of maker asset
    #[serde(with = "u256_dec")]
    pub making_amount: U256,
    /// Amount of taker asset
    #[serde(with = "u256_dec")]
    pub taking_amount: U256,
    /// Packed maker traits
    #[serde(with = "u256_dec")]
    pub maker_traits: U256,
}

/// Serde helper for `U256` as a decimal string.
pub mod u256_dec {
    use cl_primitives::U256;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    /// Serialize as decimal.
    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// Deserialize from decimal.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        U256::from_dec_str(&raw).map_err(|e| D::Error::custom(format!("{raw}: {e:?}")))
    }
}

/// Caller-supplied order fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderInfo {
    /// Maker
    pub maker: Address,
    /// Asset the maker sells
    pub maker_asset: Address,
    /// Asset the maker buys
    pub taker_asset: Address,
    /// Amount of maker asset
    pub making_amount: U256,
    /// Amount of taker asset
    pub taking_amount: U256,
    /// Receiver, zero for the maker
    pub receiver: Address,
    /// Full salt; must commit to the extension when one is attached
    pub salt: U256,
}

/// A limit order with its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitOrder {
    salt: U256,
    maker: Address,
    receiver: Address,
    maker_asset: Address,
    taker_asset: Address,
    making_amount: U256,
    taking_amount: U256,
    maker_traits: MakerTraits,
    extension: Extension,
}

impl LimitOrder {
    /// Create an order; sets the has-extension flag when `extension` is not empty.
    pub fn new(
        info: OrderInfo,
        maker_traits: MakerTraits,
        extension: Extension,
    ) -> Result<Self, OrderError> {
        let salt = Self::verify_salt(info.salt, &extension)?;
        let maker_traits = if extension.is_empty() {
            maker_traits
        } else {
            maker_traits.with_extension()
        };
        Ok(Self {
            salt,
            maker: info.maker,
            receiver: info.receiver,
            maker_asset: info.maker_asset,
            taker_asset: info.taker_asset,
            making_amount: info.making_amount,
            taking_amount: info.taking_amount,
            maker_traits,
            extension,
        })
    }

    /// Random 96-bit base salt.
    pub fn random_base_salt() -> U256 {
        let mut bytes = [0u8; BASE_SALT_BITS / 8];
        rand::thread_rng().fill(&mut bytes[..]);
        U256::from_big_endian(&bytes)
    }

    /// `base_salt << 160 | keccak256(extension) & uint160`, or `base_salt`
    /// unchanged when the extension is empty.
    pub fn build_salt(extension: &Extension, base_salt: U256) -> Result<U256, OrderError> {
        if extension.is_empty() {
            return Ok(base_salt);
        }
        if base_salt.bits() > BASE_SALT_BITS {
            return Err(OrderError::FieldTooWide {
                field: "base salt",
                bits: BASE_SALT_BITS as u32,
            });
        }
        Ok((base_salt << 160) | extension.salt_commitment()?)
    }

    /// Check that `salt` commits to `extension`.
    pub fn verify_salt(salt: U256, extension: &Extension) -> Result<U256, OrderError> {
        if extension.is_empty() {
            return Ok(salt);
        }
        if salt & uint_160_max() != extension.salt_commitment()? {
            return Err(OrderError::SaltMismatch);
        }
        Ok(salt)
    }

    /// Reassemble an order from its signed fields and extension.
    pub fn from_struct(order: &LimitOrderV4Struct, extension: Extension) -> Result<Self, OrderError> {
        let maker_traits = MakerTraits::new(order.maker_traits);
        if maker_traits.has_extension() == extension.is_empty() {
            return Err(OrderError::InvalidMakerTraits(
                "has-extension flag does not match the extension",
            ));
        }
        Self::new(
            OrderInfo {
                maker: order.maker,
                maker_asset: order.maker_asset,
                taker_asset: order.taker_asset,
                making_amount: order.making_amount,
                taking_amount: order.taking_amount,
                receiver: order.receiver,
                salt: order.salt,
            },
            maker_traits,
            extension,
        )
    }

    /// Signed fields.
    pub fn build(&self) -> LimitOrderV4Struct {
        LimitOrderV4Struct {
            salt: self.salt,
            maker: self.maker,
            receiver: self.receiver,
            maker_asset: self.maker_asset,
            taker_asset: self.taker_asset,
            making_amount: self.making_amount,
            taking_amount: self.taking_amount,
            maker_traits: self.maker_traits.as_u256(),
        }
    }

    /// Typed data for signing on `chain_id`.
    pub fn typed_data(&self, chain_id: u64, verifying_contract: Address) -> EIP712TypedData {
        EIP712TypedData::for_order(
            EIP712Domain::limit_order(chain_id, verifying_contract),
            self.build(),
        )
    }

    /// EIP-712 order hash on `chain_id`.
    pub fn order_hash(&self, chain_id: u64, verifying_contract: Address) -> Hash {
        order_digest(
            &EIP712Domain::limit_order(chain_id, verifying_contract),
            &self.build(),
        )
    }

    /// Salt
    pub fn salt(&self) -> U256 {
        self.salt
    }

    /// Maker
    pub fn maker(&self) -> Address {
        self.maker
    }

    /// Receiver, zero for the maker
    pub fn receiver(&self) -> Address {
        self.receiver
    }

    /// Maker asset
    pub fn maker_asset(&self) -> Address {
        self.maker_asset
    }

    /// Taker asset
    pub fn taker_asset(&self) -> Address {
        self.taker_asset
    }

    /// Making amount
    pub fn making_amount(&self) -> U256 {
        self.making_amount
    }

    /// Taking amount
    pub fn taking_amount(&self) -> U256 {
        self.taking_amount
    }

    /// Maker traits
    pub fn maker_traits(&self) -> MakerTraits {
        self.maker_traits
    }

    /// Attached extension
    pub fn extension(&self) -> &Extension {
        &self.extension
    }
}

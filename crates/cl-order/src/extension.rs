//! # Limit-Order Extension
//!
//! Optional bytes attached to a limit order. Eight dynamic fields plus
//! trailing custom data, prefixed by one word of cumulative end offsets.
//!
//! ## Layout
//!
//! ```text
//! [offsets: 32 bytes][field 0][field 1]...[field 7][custom data]
//!
//! offsets: field i ends at byte (offsets >> 32*i) & 0xffffffff
//! ```
//!
//! An extension with all eight fields empty encodes to no bytes at all.

use crate::errors::OrderError;
use cl_primitives::{keccak256, uint_160_max, u256_word, Address, Hash, Interaction, U256};
use serde::{Deserialize, Serialize};

const FIELDS: usize = 8;

/// Extension fields in on-chain order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    /// Appended to the maker asset transfer call.
    #[serde(with = "cl_primitives::interaction::hex_bytes")]
    pub maker_asset_suffix: Vec<u8>,
    /// Appended to the taker asset transfer call.
    #[serde(with = "cl_primitives::interaction::hex_bytes")]
    pub taker_asset_suffix: Vec<u8>,
    /// Making-amount getter: target address and call data.
    #[serde(with = "cl_primitives::interaction::hex_bytes")]
    pub making_amount_data: Vec<u8>,
    /// Taking-amount getter: target address and call data.
    #[serde(with = "cl_primitives::interaction::hex_bytes")]
    pub taking_amount_data: Vec<u8>,
    /// Fill predicate.
    #[serde(with = "cl_primitives::interaction::hex_bytes")]
    pub predicate: Vec<u8>,
    /// Maker permit: token address and permit call data.
    #[serde(with = "cl_primitives::interaction::hex_bytes")]
    pub maker_permit: Vec<u8>,
    /// Pre-interaction: target address and call data.
    #[serde(with = "cl_primitives::interaction::hex_bytes")]
    pub pre_interaction: Vec<u8>,
    /// Post-interaction: target address and call data.
    #[serde(with = "cl_primitives::interaction::hex_bytes")]
    pub post_interaction: Vec<u8>,
    /// Bytes after the last field.
    #[serde(with = "cl_primitives::interaction::hex_bytes")]
    pub custom_data: Vec<u8>,
}

impl Extension {
    fn fields(&self) -> [&[u8]; FIELDS] {
        [
            self.maker_asset_suffix.as_slice(),
            self.taker_asset_suffix.as_slice(),
            self.making_amount_data.as_slice(),
            self.taking_amount_data.as_slice(),
            self.predicate.as_slice(),
            self.maker_permit.as_slice(),
            self.pre_interaction.as_slice(),
            self.post_interaction.as_slice(),
        ]
    }

    /// Check if every field is empty.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|f| f.is_empty())
    }

    /// Check if a maker permit is present.
    pub fn has_maker_permit(&self) -> bool {
        !self.maker_permit.is_empty()
    }

    /// Offsets word followed by the concatenated fields.
    pub fn encode(&self) -> Result<Vec<u8>, OrderError> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let mut offsets = U256::zero();
        let mut end: u64 = 0;
        for (i, field) in self.fields().iter().enumerate() {
            end += field.len() as u64;
            if end > u32::MAX as u64 {
                return Err(OrderError::FieldTooWide {
                    field: "extension offset",
                    bits: 32,
                });
            }
            offsets |= U256::from(end) << (32 * i);
        }

        let mut out = Vec::with_capacity(32 + end as usize + self.custom_data.len());
        out.extend_from_slice(&u256_word(offsets));
        for field in self.fields() {
            out.extend_from_slice(field);
        }
        out.extend_from_slice(&self.custom_data);
        Ok(out)
    }

    /// Parse encoded bytes. Empty input is the empty extension.
    pub fn decode(bytes: &[u8]) -> Result<Self, OrderError> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        if bytes.len() < 32 {
            return Err(OrderError::InvalidExtension(format!(
                "{} bytes is shorter than the offsets word",
                bytes.len()
            )));
        }

        let offsets = U256::from_big_endian(&bytes[..32]);
        let data = &bytes[32..];
        let mut fields: Vec<Vec<u8>> = Vec::with_capacity(FIELDS);
        let mut start = 0usize;
        for i in 0..FIELDS {
            let end = ((offsets >> (32 * i)).low_u64() & u32::MAX as u64) as usize;
            if end < start || end > data.len() {
                return Err(OrderError::InvalidExtension(format!(
                    "field {i} ends at {end}, outside [{start}, {}]",
                    data.len()
                )));
            }
            fields.push(data[start..end].to_vec());
            start = end;
        }

        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Ok(Self {
            maker_asset_suffix: next(),
            taker_asset_suffix: next(),
            making_amount_data: next(),
            taking_amount_data: next(),
            predicate: next(),
            maker_permit: next(),
            pre_interaction: next(),
            post_interaction: next(),
            custom_data: data[start..].to_vec(),
        })
    }

    /// keccak256 of the encoding.
    pub fn keccak256(&self) -> Result<Hash, OrderError> {
        Ok(keccak256(self.encode()?))
    }

    /// Low 160 bits of [`Self::keccak256`], as committed in the order salt.
    pub fn salt_commitment(&self) -> Result<U256, OrderError> {
        Ok(self.keccak256()?.to_u256() & uint_160_max())
    }
}

/// Builds an [`Extension`] from target/data pairs.
#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    extension: Extension,
}

fn call(target: &Address, data: &[u8]) -> Vec<u8> {
    Interaction::new(*target, data.to_vec()).encode()
}

impl ExtensionBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Making-amount getter.
    pub fn with_making_amount_data(mut self, target: &Address, data: &[u8]) -> Self {
        self.extension.making_amount_data = call(target, data);
        self
    }

    /// Taking-amount getter.
    pub fn with_taking_amount_data(mut self, target: &Address, data: &[u8]) -> Self {
        self.extension.taking_amount_data = call(target, data);
        self
    }

    /// Maker permit for `token`.
    pub fn with_maker_permit(mut self, token: &Address, permit: &[u8]) -> Self {
        self.extension.maker_permit = call(token, permit);
        self
    }

    /// Post-interaction.
    pub fn with_post_interaction(mut self, interaction: &Interaction) -> Self {
        self.extension.post_interaction = interaction.encode();
        self
    }

    /// Trailing custom data.
    pub fn with_custom_data(mut self, data: &[u8]) -> Self {
        self.extension.custom_data = data.to_vec();
        self
    }

    /// Finished extension.
    pub fn build(self) -> Extension {
        self.extension
    }
}

//! # EIP-712 Order Hashing
//!
//! Typed-data hash of a limit order under the aggregation router domain.
//!
//! ```text
//! orderHash = keccak256(0x1901 ++ domainSeparator ++ keccak256(ORDER_TYPEHASH ++ fields))
//! ```

use crate::limit_order::LimitOrderV4Struct;
use cl_primitives::{keccak256, keccak256_concat, AbiEncoder, Address, Hash, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Domain name of the limit-order protocol.
pub const DOMAIN_NAME: &str = "1inch Aggregation Router";

/// Domain version of the limit-order protocol.
pub const DOMAIN_VERSION: &str = "6";

/// Canonical `EIP712Domain` type string.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Canonical `Order` type string.
pub const ORDER_TYPE: &str = "Order(uint256 salt,address maker,address receiver,address makerAsset,address takerAsset,uint256 makingAmount,uint256 takingAmount,uint256 makerTraits)";

/// One member of an EIP-712 struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EIP712Field {
    /// Member name.
    pub name: String,
    /// Solidity type.
    #[serde(rename = "type")]
    pub kind: String,
}

impl EIP712Field {
    fn new(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Signing domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EIP712Domain {
    /// Protocol name.
    pub name: String,
    /// Protocol version.
    pub version: String,
    /// Chain the order is valid on.
    pub chain_id: u64,
    /// Limit-order protocol contract.
    pub verifying_contract: Address,
}

impl EIP712Domain {
    /// Limit-order protocol domain on `chain_id`.
    pub fn limit_order(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id,
            verifying_contract,
        }
    }

    /// `hashStruct(domain)`.
    pub fn separator(&self) -> Hash {
        let mut enc = AbiEncoder::new();
        enc.bytes32(&keccak256(EIP712_DOMAIN_TYPE))
            .bytes32(&keccak256(&self.name))
            .bytes32(&keccak256(&self.version))
            .uint(U256::from(self.chain_id))
            .address(&self.verifying_contract);
        keccak256(enc.finish())
    }
}

/// Payload handed to a wallet for `eth_signTypedData_v4`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EIP712TypedData {
    /// Type definitions, including `EIP712Domain`.
    pub types: BTreeMap<String, Vec<EIP712Field>>,
    /// Signing domain.
    pub domain: EIP712Domain,
    /// Name of the signed type.
    pub primary_type: String,
    /// Signed order.
    pub message: LimitOrderV4Struct,
}

impl EIP712TypedData {
    /// Typed data for `order` under `domain`.
    pub fn for_order(domain: EIP712Domain, order: LimitOrderV4Struct) -> Self {
        let mut types = BTreeMap::new();
        types.insert(
            "EIP712Domain".to_string(),
            vec![
                EIP712Field::new("name", "string"),
                EIP712Field::new("version", "string"),
                EIP712Field::new("chainId", "uint256"),
                EIP712Field::new("verifyingContract", "address"),
            ],
        );
        types.insert(
            "Order".to_string(),
            vec![
                EIP712Field::new("salt", "uint256"),
                EIP712Field::new("maker", "address"),
                EIP712Field::new("receiver", "address"),
                EIP712Field::new("makerAsset", "address"),
                EIP712Field::new("takerAsset", "address"),
                EIP712Field::new("makingAmount", "uint256"),
                EIP712Field::new("takingAmount", "uint256"),
                EIP712Field::new("makerTraits", "uint256"),
            ],
        );
        Self {
            types,
            domain,
            primary_type: "Order".to_string(),
            message: order,
        }
    }

    /// Digest the wallet signs.
    pub fn hash(&self) -> Hash {
        order_digest(&self.domain, &self.message)
    }
}

/// `hashStruct(order)`.
pub fn order_struct_hash(order: &LimitOrderV4Struct) -> Hash {
    let mut enc = AbiEncoder::new();
    enc.bytes32(&keccak256(ORDER_TYPE))
        .uint(order.salt)
        .address(&order.maker)
        .address(&order.receiver)
        .address(&order.maker_asset)
        .address(&order.taker_asset)
        .uint(order.making_amount)
        .uint(order.taking_amount)
        .uint(order.maker_traits);
    keccak256(enc.finish())
}

/// EIP-712 digest of `order` under `domain`.
pub fn order_digest(domain: &EIP712Domain, order: &LimitOrderV4Struct) -> Hash {
    keccak256_concat(&[
        &[0x19, 0x01],
        domain.separator().as_bytes(),
        order_struct_hash(order).as_bytes(),
    ])
}

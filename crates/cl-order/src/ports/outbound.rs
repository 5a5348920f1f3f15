//! # Outbound Ports
//!
//! Request and response shapes of the relayer and orders services, and the
//! traits through which an order is submitted, watched and completed.

use crate::cross_chain_order::CrossChainOrder;
use crate::eip712::EIP712TypedData;
use crate::errors::OrderError;
use crate::limit_order::{u256_dec, LimitOrderV4Struct};
use async_trait::async_trait;
use cl_escrow::SecureSecret;
use cl_primitives::{encode_hex, Address, Hash, U256};
use serde::{Deserialize, Serialize};

/// Order submission to the relayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayerRequest {
    /// Signed order fields
    pub order: LimitOrderV4Struct,
    /// Maker signature, `0x`-hex
    pub signature: String,
    /// Quote the order was built from
    pub quote_id: String,
    /// Encoded extension, `0x`-hex
    pub extension: String,
    /// Source chain id
    pub src_chain_id: u64,
    /// Secret hashes of a multi-fill order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_hashes: Option<Vec<Hash>>,
}

impl RelayerRequest {
    /// Request for a signed cross-chain order.
    pub fn from_order(
        order: &CrossChainOrder,
        src_chain_id: u64,
        signature: String,
        quote_id: String,
        secret_hashes: Option<Vec<Hash>>,
    ) -> Result<Self, OrderError> {
        Ok(Self {
            order: order.build(),
            signature,
            quote_id,
            extension: encode_hex(&order.extension().encode()?),
            src_chain_id,
            secret_hashes,
        })
    }
}

/// Relayer view of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Open for resolvers.
    Pending,
    /// Fully filled and settled.
    Executed,
    /// Past its deadline.
    Expired,
    /// Cancelled by the maker.
    Cancelled,
    /// Escrows are being cancelled.
    Refunding,
    /// Escrows were cancelled.
    Refunded,
}

/// Status of a single fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStatus {
    /// Escrows deployed, secret not yet shared.
    Pending,
    /// Secret shared, withdrawals done.
    Executed,
    /// Escrows are being cancelled.
    Refunding,
    /// Escrows were cancelled.
    Refunded,
}

/// One fill of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    /// Merkle index of the secret, 0 for single-fill orders
    pub idx: u64,
    /// Fill status
    pub status: FillStatus,
    /// Maker amount consumed
    #[serde(with = "u256_dec")]
    pub filled_maker_amount: U256,
}

/// Order status as reported by the orders API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusResponse {
    /// Order hash
    pub order_hash: Hash,
    /// Order status
    pub status: OrderStatus,
    /// Source chain id
    pub src_chain_id: u64,
    /// Destination chain id
    pub dst_chain_id: u64,
    /// Maker amount not yet filled
    #[serde(with = "u256_dec")]
    pub remaining_making_amount: U256,
    /// Fills so far
    pub fills: Vec<Fill>,
}

/// A fill whose escrows are both deployed and final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyFill {
    /// Merkle index of the secret to reveal
    pub idx: u64,
    /// Source escrow deployment transaction
    pub src_escrow_deploy_tx_hash: Hash,
    /// Destination escrow deployment transaction
    pub dst_escrow_deploy_tx_hash: Hash,
}

/// Fills waiting for the maker's secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyToAcceptSecretFills {
    /// Ready fills
    pub fills: Vec<ReadyFill>,
}

/// Whether an order reveals one secret or a Merkle tree of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// One secret
    SingleFill,
    /// One secret per part plus one
    MultipleFills,
}

/// A secret the maker has shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedSecret {
    /// Merkle index
    pub idx: u64,
    /// Secret
    pub secret: SecureSecret,
}

/// Secrets shared so far for an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedSecretsResponse {
    /// Order type
    pub order_type: OrderType,
    /// Shared secrets
    pub secrets: Vec<PublishedSecret>,
    /// Secret hashes of a multi-fill order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_hashes: Option<Vec<Hash>>,
}

/// Lifecycle notification about an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OrderEvent {
    /// Order accepted by the relayer.
    OrderCreated {
        /// Order hash
        order_hash: Hash,
        /// Source chain id
        src_chain_id: u64,
    },
    /// Escrows of a fill are deployed and final.
    EscrowsDeployed {
        /// Order hash
        order_hash: Hash,
        /// Merkle index of the fill
        idx: u64,
    },
    /// Maker shared a secret; carries only its hash.
    SecretShared {
        /// Order hash
        order_hash: Hash,
        /// Merkle index
        idx: u64,
        /// keccak256 of the shared secret
        secret_hash: Hash,
    },
    /// Part of the order was filled.
    OrderFilledPartially {
        /// Order hash
        order_hash: Hash,
        /// Maker amount still open
        #[serde(with = "u256_dec")]
        remaining_making_amount: U256,
    },
    /// The whole order was filled.
    OrderFilled {
        /// Order hash
        order_hash: Hash,
    },
    /// Order cancelled by the maker.
    OrderCancelled {
        /// Order hash
        order_hash: Hash,
    },
}

impl OrderEvent {
    /// Order the event refers to.
    pub fn order_hash(&self) -> Hash {
        match self {
            Self::OrderCreated { order_hash, .. }
            | Self::EscrowsDeployed { order_hash, .. }
            | Self::SecretShared { order_hash, .. }
            | Self::OrderFilledPartially { order_hash, .. }
            | Self::OrderFilled { order_hash }
            | Self::OrderCancelled { order_hash } => *order_hash,
        }
    }
}

/// Relayer submission - outbound port.
#[async_trait]
pub trait RelayerApi: Send + Sync {
    /// Submit one signed order.
    async fn submit_order(&self, request: RelayerRequest) -> Result<(), OrderError>;

    /// Submit several signed orders.
    async fn submit_order_batch(&self, requests: Vec<RelayerRequest>) -> Result<(), OrderError>;

    /// Share a secret for a fill whose escrows are ready.
    async fn submit_secret(&self, order_hash: Hash, secret: SecureSecret) -> Result<(), OrderError>;
}

/// Order queries - outbound port.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Status of one order.
    async fn order_status(&self, order_hash: Hash) -> Result<OrderStatusResponse, OrderError>;

    /// Fills waiting for a secret.
    async fn ready_to_accept_secret_fills(
        &self,
        order_hash: Hash,
    ) -> Result<ReadyToAcceptSecretFills, OrderError>;

    /// Secrets shared so far.
    async fn published_secrets(&self, order_hash: Hash)
        -> Result<PublishedSecretsResponse, OrderError>;
}

/// Wallet access - outbound port.
#[async_trait]
pub trait TypedDataSigner: Send + Sync {
    /// Sign EIP-712 typed data, returning a `0x`-hex signature.
    async fn sign_typed_data(&self, typed_data: &EIP712TypedData) -> Result<String, OrderError>;

    /// Read-only contract call.
    async fn eth_call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, OrderError>;
}

/// Order lifecycle notifications - outbound port.
#[async_trait]
pub trait OrderEventFeed: Send + Sync {
    /// Next event, `None` once the feed is closed.
    async fn next_event(&self) -> Result<Option<OrderEvent>, OrderError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock signer for testing.
///
/// The "signature" is the typed-data hash twice followed by `0x1b`.
#[derive(Clone, Default)]
pub struct MockSigner {
    /// Canned `eth_call` result.
    pub call_result: Vec<u8>,
    /// Should fail?
    pub should_fail: bool,
}

#[async_trait]
impl TypedDataSigner for MockSigner {
    async fn sign_typed_data(&self, typed_data: &EIP712TypedData) -> Result<String, OrderError> {
        if self.should_fail {
            return Err(OrderError::Transport("Mock failure".to_string()));
        }
        let digest = typed_data.hash();
        let mut signature = Vec::with_capacity(65);
        signature.extend_from_slice(digest.as_bytes());
        signature.extend_from_slice(digest.as_bytes());
        signature.push(0x1b);
        Ok(encode_hex(&signature))
    }

    async fn eth_call(&self, _to: Address, _data: Vec<u8>) -> Result<Vec<u8>, OrderError> {
        if self.should_fail {
            return Err(OrderError::Transport("Mock failure".to_string()));
        }
        Ok(self.call_result.clone())
    }
}

/// Mock event feed replaying a fixed list.
#[derive(Default)]
pub struct MockEventFeed {
    events: parking_lot::Mutex<std::collections::VecDeque<OrderEvent>>,
}

impl MockEventFeed {
    /// Feed that yields `events` in order, then `None`.
    pub fn new(events: Vec<OrderEvent>) -> Self {
        Self {
            events: parking_lot::Mutex::new(events.into()),
        }
    }
}

#[async_trait]
impl OrderEventFeed for MockEventFeed {
    async fn next_event(&self) -> Result<Option<OrderEvent>, OrderError> {
        Ok(self.events.lock().pop_front())
    }
}

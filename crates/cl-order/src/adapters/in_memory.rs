//! # In-Memory Relayer
//!
//! A relayer that keeps submitted orders in memory. It checks every order it
//! accepts the way a real relayer would and is used in tests and local
//! simulations.

use crate::config::ChainConfig;
use crate::cross_chain_order::CrossChainOrder;
use crate::errors::OrderError;
use crate::extension::Extension;
use crate::ports::{
    Fill, FillStatus, OrderEvent, OrderEventFeed, OrderStatus, OrderStatusResponse, OrderType,
    OrdersApi, PublishedSecret, PublishedSecretsResponse, ReadyFill, ReadyToAcceptSecretFills,
    RelayerApi, RelayerRequest,
};
use async_trait::async_trait;
use cl_escrow::{HashLock, SecureSecret};
use cl_primitives::{decode_hex, keccak256, Hash, U256};
use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

/// Events buffered per subscriber before the oldest are dropped.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

struct StoredOrder {
    order: CrossChainOrder,
    src_chain_id: u64,
    secret_hashes: Option<Vec<Hash>>,
    status: OrderStatus,
    remaining: U256,
    fills: Vec<Fill>,
    ready: Vec<ReadyFill>,
    secrets: Vec<PublishedSecret>,
}

impl StoredOrder {
    fn secret_index(&self, secret_hash: &Hash) -> Option<u64> {
        match &self.secret_hashes {
            Some(hashes) => hashes
                .iter()
                .position(|h| h == secret_hash)
                .map(|idx| idx as u64),
            None => (self.order.escrow_extension().hash_lock().value() == *secret_hash).then_some(0),
        }
    }
}

/// In-memory relayer and orders API.
pub struct InMemoryRelayer {
    config: ChainConfig,
    orders: RwLock<HashMap<Hash, StoredOrder>>,
    events: broadcast::Sender<OrderEvent>,
}

impl InMemoryRelayer {
    /// Relayer accepting orders on the chains in `config`.
    pub fn new(config: ChainConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            config,
            orders: RwLock::new(HashMap::new()),
            events,
        }
    }

    /// Feed of events published after this call.
    pub fn subscribe(&self) -> InMemoryEventFeed {
        InMemoryEventFeed {
            receiver: Mutex::new(self.events.subscribe()),
        }
    }

    /// Number of stored orders.
    pub fn order_count(&self) -> usize {
        self.orders.read().len()
    }

    fn publish(&self, event: OrderEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }

    fn accept(&self, request: RelayerRequest) -> Result<Hash, OrderError> {
        let extension = Extension::decode(&decode_hex(&request.extension)?)?;
        let order =
            CrossChainOrder::from_data_and_extension(&request.order, extension, &self.config)?;
        let order_hash = order.order_hash(request.src_chain_id)?;

        let hash_lock = order.escrow_extension().hash_lock();
        if let Some(hashes) = &request.secret_hashes {
            let leaves = HashLock::get_merkle_leaves_from_secret_hashes(hashes);
            if HashLock::for_multiple_fills(&leaves)? != hash_lock {
                return Err(OrderError::InvalidExtension(
                    "secret hashes do not match the hash-lock".to_string(),
                ));
            }
        }

        let stored = StoredOrder {
            remaining: order.making_amount(),
            order,
            src_chain_id: request.src_chain_id,
            secret_hashes: request.secret_hashes,
            status: OrderStatus::Pending,
            fills: Vec::new(),
            ready: Vec::new(),
            secrets: Vec::new(),
        };
        self.orders.write().insert(order_hash, stored);
        debug!(
            "[cl-order] Relayer accepted order {} on chain {}",
            order_hash, request.src_chain_id
        );
        self.publish(OrderEvent::OrderCreated {
            order_hash,
            src_chain_id: request.src_chain_id,
        });
        Ok(order_hash)
    }

    /// Record that a resolver deployed both escrows for a fill.
    ///
    /// The fill must use the Merkle index the order expects for `amount`.
    pub fn record_escrows_deployed(
        &self,
        order_hash: Hash,
        amount: U256,
        src_escrow_deploy_tx_hash: Hash,
        dst_escrow_deploy_tx_hash: Hash,
    ) -> Result<u64, OrderError> {
        let mut orders = self.orders.write();
        let stored = orders
            .get_mut(&order_hash)
            .ok_or(OrderError::OrderNotFound(order_hash))?;

        let idx = if stored.order.multiple_fills_allowed() {
            stored
                .order
                .get_multiple_fill_idx(amount, Some(stored.remaining))?
        } else if amount == stored.remaining && stored.fills.is_empty() {
            0
        } else {
            return Err(OrderError::InvalidFillAmount {
                fill: amount.to_string(),
                remaining: stored.remaining.to_string(),
            });
        };

        stored.remaining -= amount;
        stored.fills.push(Fill {
            idx,
            status: FillStatus::Pending,
            filled_maker_amount: amount,
        });
        stored.ready.push(ReadyFill {
            idx,
            src_escrow_deploy_tx_hash,
            dst_escrow_deploy_tx_hash,
        });
        let remaining = stored.remaining;
        drop(orders);

        self.publish(OrderEvent::EscrowsDeployed { order_hash, idx });
        if !remaining.is_zero() {
            self.publish(OrderEvent::OrderFilledPartially {
                order_hash,
                remaining_making_amount: remaining,
            });
        }
        Ok(idx)
    }

    /// Maker cancels an order that has no pending fills.
    pub fn cancel(&self, order_hash: Hash) -> Result<(), OrderError> {
        let mut orders = self.orders.write();
        let stored = orders
            .get_mut(&order_hash)
            .ok_or(OrderError::OrderNotFound(order_hash))?;
        if !stored.ready.is_empty() {
            return Err(OrderError::InvalidFillAmount {
                fill: "0".to_string(),
                remaining: stored.remaining.to_string(),
            });
        }
        stored.status = OrderStatus::Cancelled;
        drop(orders);
        self.publish(OrderEvent::OrderCancelled { order_hash });
        Ok(())
    }
}

impl Default for InMemoryRelayer {
    fn default() -> Self {
        Self::new(ChainConfig::default())
    }
}

#[async_trait]
impl RelayerApi for InMemoryRelayer {
    async fn submit_order(&self, request: RelayerRequest) -> Result<(), OrderError> {
        self.accept(request).map(|_| ())
    }

    async fn submit_order_batch(&self, requests: Vec<RelayerRequest>) -> Result<(), OrderError> {
        for request in requests {
            self.accept(request)?;
        }
        Ok(())
    }

    async fn submit_secret(&self, order_hash: Hash, secret: SecureSecret) -> Result<(), OrderError> {
        let secret_hash = keccak256(secret.as_bytes());
        let mut orders = self.orders.write();
        let stored = orders
            .get_mut(&order_hash)
            .ok_or(OrderError::OrderNotFound(order_hash))?;

        let idx = stored
            .secret_index(&secret_hash)
            .ok_or(OrderError::SecretNotExpected(order_hash))?;
        let Some(pos) = stored.ready.iter().position(|fill| fill.idx == idx) else {
            warn!(
                "[cl-order] Secret {} for order {} arrived before its escrows",
                idx, order_hash
            );
            return Err(OrderError::SecretNotExpected(order_hash));
        };

        stored.ready.remove(pos);
        for fill in stored.fills.iter_mut().filter(|fill| fill.idx == idx) {
            fill.status = FillStatus::Executed;
        }
        stored.secrets.push(PublishedSecret { idx, secret });
        let done = stored.remaining.is_zero() && stored.ready.is_empty();
        if done {
            stored.status = OrderStatus::Executed;
        }
        drop(orders);

        debug!("[cl-order] Secret {} shared for order {}", idx, order_hash);
        self.publish(OrderEvent::SecretShared {
            order_hash,
            idx,
            secret_hash,
        });
        if done {
            self.publish(OrderEvent::OrderFilled { order_hash });
        }
        Ok(())
    }
}

#[async_trait]
impl OrdersApi for InMemoryRelayer {
    async fn order_status(&self, order_hash: Hash) -> Result<OrderStatusResponse, OrderError> {
        let orders = self.orders.read();
        let stored = orders
            .get(&order_hash)
            .ok_or(OrderError::OrderNotFound(order_hash))?;
        Ok(OrderStatusResponse {
            order_hash,
            status: stored.status,
            src_chain_id: stored.src_chain_id,
            dst_chain_id: stored.order.dst_chain_id(),
            remaining_making_amount: stored.remaining,
            fills: stored.fills.clone(),
        })
    }

    async fn ready_to_accept_secret_fills(
        &self,
        order_hash: Hash,
    ) -> Result<ReadyToAcceptSecretFills, OrderError> {
        let orders = self.orders.read();
        let stored = orders
            .get(&order_hash)
            .ok_or(OrderError::OrderNotFound(order_hash))?;
        Ok(ReadyToAcceptSecretFills {
            fills: stored.ready.clone(),
        })
    }

    async fn published_secrets(
        &self,
        order_hash: Hash,
    ) -> Result<PublishedSecretsResponse, OrderError> {
        let orders = self.orders.read();
        let stored = orders
            .get(&order_hash)
            .ok_or(OrderError::OrderNotFound(order_hash))?;
        let order_type = if stored.secret_hashes.is_some() {
            OrderType::MultipleFills
        } else {
            OrderType::SingleFill
        };
        Ok(PublishedSecretsResponse {
            order_type,
            secrets: stored.secrets.clone(),
            secret_hashes: stored.secret_hashes.clone(),
        })
    }
}

/// Subscription to an [`InMemoryRelayer`].
pub struct InMemoryEventFeed {
    receiver: Mutex<broadcast::Receiver<OrderEvent>>,
}

#[async_trait]
impl OrderEventFeed for InMemoryEventFeed {
    async fn next_event(&self) -> Result<Option<OrderEvent>, OrderError> {
        let mut receiver = self.receiver.lock().await;
        loop {
            match receiver.recv().await {
                Ok(event) => return Ok(Some(event)),
                Err(broadcast::error::RecvError::Closed) => return Ok(None),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("[cl-order] Event feed lagged, skipped {} events", skipped);
                }
            }
        }
    }
}

//! # Crosslock Orders
//!
//! The maker order of a cross-chain swap and the ports through which it
//! reaches a relayer.
//!
//! ## Purpose
//!
//! A cross-chain order is a limit-order protocol v4 order on the source
//! chain. Its extension tells the escrow factory how to price the fill and
//! which escrow to deploy:
//! - [`Extension`] and [`MakerTraits`], the limit-order wire format
//! - [`LimitOrder`] and its EIP-712 order hash
//! - [`SettlementExtension`], auction, fees and whitelist for the settlement
//! - [`EscrowExtension`], the 160-byte escrow trailer
//! - [`CrossChainOrder`], which binds all of the above
//!
//! ## Module Structure
//!
//! ```text
//! cl-order/
//! ├── config               # ChainConfig (CL_* env overrides)
//! ├── extension            # Extension codec and builder
//! ├── maker_traits         # MakerTraits bit fields
//! ├── limit_order, eip712  # LimitOrder, typed data, order hash
//! ├── settlement_extension # auction / fee / whitelist encoding
//! ├── escrow_extension     # escrow trailer
//! ├── cross_chain_order    # CrossChainOrder
//! ├── lifecycle            # predicted escrow phases
//! ├── ports/               # relayer, orders, signer, event feed
//! └── adapters/            # InMemoryRelayer
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod cross_chain_order;
pub mod eip712;
pub mod errors;
pub mod escrow_extension;
pub mod extension;
pub mod lifecycle;
pub mod limit_order;
pub mod maker_traits;
pub mod ports;
pub mod settlement_extension;

// Re-exports
pub use adapters::{InMemoryEventFeed, InMemoryRelayer};
pub use config::{ChainConfig, LIMIT_ORDER_PROTOCOL, LIMIT_ORDER_PROTOCOL_ZKSYNC, TRUE_ERC20};
pub use cross_chain_order::{
    CrossChainOrder, CrossChainOrderInfo, Details, EscrowParams, Extra,
    DEFAULT_ORDER_EXPIRATION_DELAY,
};
pub use eip712::{order_digest, order_struct_hash, EIP712Domain, EIP712Field, EIP712TypedData};
pub use errors::OrderError;
pub use escrow_extension::{EscrowExtension, EscrowExtraData, EXTRA_DATA_LENGTH};
pub use extension::{Extension, ExtensionBuilder};
pub use lifecycle::{dst_next_action, next_action, src_next_action, NextAction};
pub use limit_order::{LimitOrder, LimitOrderV4Struct, OrderInfo};
pub use maker_traits::MakerTraits;
pub use ports::{
    Fill, FillStatus, MockEventFeed, MockSigner, OrderEvent, OrderEventFeed, OrderStatus,
    OrderStatusResponse, OrderType, OrdersApi, PublishedSecret, PublishedSecretsResponse,
    ReadyFill, ReadyToAcceptSecretFills, RelayerApi, RelayerRequest, TypedDataSigner,
};
pub use settlement_extension::SettlementExtension;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

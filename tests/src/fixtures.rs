//! # Shared Fixtures
//!
//! One swap used across the suite: 1 000 000 units of a source token on
//! Ethereum for 2 000 000 units of a destination token on Arbitrum, split
//! into three parts.

use cl_auction::{AuctionDetails, AuctionGasCostInfo, AuctionPoint, Whitelist};
use cl_escrow::{ChainId, HashLock, TimeLockDurations, TimeLocks};
use cl_order::{ChainConfig, CrossChainOrder, CrossChainOrderInfo, Details, EscrowParams, Extra};
use cl_primitives::{keccak256, Address, Hash, U256};

/// Escrow factory on both chains.
pub const FACTORY: Address = Address::new([0x5E; 20]);
/// Source escrow implementation.
pub const SRC_IMPLEMENTATION: Address = Address::new([0x44; 20]);
/// Destination escrow implementation.
pub const DST_IMPLEMENTATION: Address = Address::new([0x45; 20]);
/// Maker wallet.
pub const MAKER: Address = Address::new([0x11; 20]);
/// Resolver allowed from the resolving start.
pub const RESOLVER: Address = Address::new([0xAA; 20]);
/// Resolver allowed twenty seconds later.
pub const LATE_RESOLVER: Address = Address::new([0xBB; 20]);

/// Auction start, unix seconds.
pub const AUCTION_START: u64 = 1000;
/// Auction length.
pub const AUCTION_DURATION: u64 = 180;
/// Making amount of the fixture order.
pub const MAKING_AMOUNT: u64 = 1_000_000;
/// Taking amount of the fixture order.
pub const TAKING_AMOUNT: u64 = 2_000_000;

/// Secret whose last byte is `n`.
pub fn secret(n: u8) -> [u8; 32] {
    let mut s = [0u8; 32];
    s[31] = n;
    s
}

/// Secrets `1..=count`.
pub fn secrets(count: u8) -> Vec<[u8; 32]> {
    (1..=count).map(secret).collect()
}

/// keccak256 of each secret.
pub fn secret_hashes(count: u8) -> Vec<Hash> {
    secrets(count).iter().map(keccak256).collect()
}

/// Merkle lock over four secrets, i.e. three parts.
pub fn multi_fill_lock() -> HashLock {
    let leaves = HashLock::get_merkle_leaves(&secrets(4)).unwrap();
    HashLock::for_multiple_fills(&leaves).unwrap()
}

/// Stage lengths 10/20/30/40 on the source and 5/15/25 on the destination.
pub fn time_locks() -> TimeLocks {
    TimeLocks::from_durations(TimeLockDurations {
        src_finality_lock: 10,
        src_private_withdrawal: 20,
        src_public_withdrawal: 30,
        src_private_cancellation: 40,
        dst_finality_lock: 5,
        dst_private_withdrawal: 15,
        dst_public_withdrawal: 25,
    })
    .unwrap()
}

/// Five percent bump falling to two percent after a minute, then to zero.
pub fn auction() -> AuctionDetails {
    AuctionDetails::new(
        AUCTION_START,
        AUCTION_DURATION,
        50_000,
        vec![AuctionPoint {
            delay: 60,
            coefficient: 20_000,
        }],
        AuctionGasCostInfo::default(),
    )
    .unwrap()
}

/// [`RESOLVER`] from the start, [`LATE_RESOLVER`] from 1010.
pub fn whitelist() -> Whitelist {
    Whitelist::new(AUCTION_START - 10, &[(RESOLVER, 0), (LATE_RESOLVER, 1010)]).unwrap()
}

/// Fixture order guarded by `hash_lock`.
pub fn order(hash_lock: HashLock, extra: Extra) -> CrossChainOrder {
    CrossChainOrder::new(
        FACTORY,
        CrossChainOrderInfo {
            maker: MAKER,
            maker_asset: Address::new([0x22; 20]),
            taker_asset: Address::new([0x33; 20]),
            making_amount: U256::from(MAKING_AMOUNT),
            taking_amount: U256::from(TAKING_AMOUNT),
            receiver: Address::ZERO,
            salt: Some(U256::from(42u64)),
        },
        EscrowParams {
            hash_lock,
            src_chain_id: ChainId::Ethereum.id(),
            dst_chain_id: ChainId::Arbitrum.id(),
            src_safety_deposit: U256::from(1000u64),
            dst_safety_deposit: U256::from(500u64),
            time_locks: time_locks(),
        },
        Details {
            auction: auction(),
            whitelist: whitelist(),
            fees: None,
        },
        extra,
        &ChainConfig::default(),
    )
    .unwrap()
}

/// Three-part order with default flags.
pub fn multi_fill_order() -> CrossChainOrder {
    order(multi_fill_lock(), Extra::default())
}

/// Single-fill order for `secret(9)`.
pub fn single_fill_order() -> CrossChainOrder {
    order(
        HashLock::for_single_fill(&secret(9)).unwrap(),
        Extra {
            allow_partial_fills: false,
            allow_multiple_fills: false,
            nonce: Some(1),
            ..Extra::default()
        },
    )
}

//! # Crosslock Benchmarks
//!
//! Hot paths of a resolver quoting and preparing fills:
//!
//! | Group | Operation |
//! |-------|-----------|
//! | merkle | lock and proof for growing secret counts |
//! | escrow | immutables hash and both escrow addresses |
//! | auction | taking amount along the curve |
//! | order | order build and EIP-712 hash |

use cl_escrow::{
    ChainId, DstImmutablesComplement, EscrowAddressDerivation, EscrowFactoryFacade, HashLock,
};
use cl_primitives::{Address, U256};
use cl_tests::fixtures::{
    multi_fill_order, secrets, DST_IMPLEMENTATION, FACTORY, MAKER, RESOLVER, SRC_IMPLEMENTATION,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// ============================================================================
// Merkle hash-locks
// ============================================================================

fn bench_merkle(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle");

    for count in [4u8, 16, 64, 200] {
        let secrets = secrets(count);
        let leaves = HashLock::get_merkle_leaves(&secrets).unwrap();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("for_multiple_fills", count), &leaves, |b, leaves| {
            b.iter(|| black_box(HashLock::for_multiple_fills(leaves).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("get_proof", count), &leaves, |b, leaves| {
            b.iter(|| black_box(HashLock::get_proof(leaves, leaves.len() - 1).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// Escrow addresses
// ============================================================================

fn bench_escrow_addresses(c: &mut Criterion) {
    let mut group = c.benchmark_group("escrow");
    let order = multi_fill_order();
    let leaves = HashLock::get_merkle_leaves(&secrets(4)).unwrap();
    let src = order
        .to_src_immutables(1, RESOLVER, U256::from(250_000u64), Some(HashLock::new(leaves[0])))
        .unwrap()
        .with_deployed_at(2000)
        .unwrap();
    let complement = DstImmutablesComplement::new(
        MAKER,
        U256::from(500_000u64),
        order.taker_asset(),
        U256::from(500u64),
    );

    group.bench_function("immutables_hash", |b| b.iter(|| black_box(src.hash())));

    for chain in [ChainId::Ethereum, ChainId::ZkSync] {
        let factory = EscrowFactoryFacade::new(chain, FACTORY);
        group.bench_function(BenchmarkId::new("src_address", chain.id()), |b| {
            b.iter(|| black_box(factory.src_escrow_address(&src, &SRC_IMPLEMENTATION)))
        });
        group.bench_function(BenchmarkId::new("dst_address", chain.id()), |b| {
            b.iter(|| {
                black_box(
                    factory
                        .dst_escrow_address(&src, &complement, 2005, RESOLVER, &DST_IMPLEMENTATION)
                        .unwrap(),
                )
            })
        });
    }

    group.finish();
}

// ============================================================================
// Auction pricing
// ============================================================================

fn bench_auction(c: &mut Criterion) {
    let mut group = c.benchmark_group("auction");
    let order = multi_fill_order();
    let taker = Address::new([0xCC; 20]);

    for time in [1000u64, 1030, 1100, 1200] {
        group.bench_with_input(BenchmarkId::new("calc_taking_amount", time), &time, |b, t| {
            b.iter(|| {
                black_box(
                    order
                        .calc_taking_amount(&taker, U256::from(250_000u64), *t, U256::zero())
                        .unwrap(),
                )
            })
        });
    }

    group.finish();
}

// ============================================================================
// Order hashing
// ============================================================================

fn bench_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("order");

    group.bench_function("build", |b| b.iter(|| black_box(multi_fill_order())));

    let order = multi_fill_order();
    group.bench_function("order_hash", |b| {
        b.iter(|| black_box(order.order_hash(1).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_merkle,
    bench_escrow_addresses,
    bench_auction,
    bench_order
);
criterion_main!(benches);

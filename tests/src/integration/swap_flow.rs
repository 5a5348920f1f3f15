//! # Swap Flow
//!
//! A three-part order followed end to end:
//!
//! 1. **Maker**: builds, signs and submits the order with its secret hashes
//! 2. **Resolver**: prices each fill, derives both escrow addresses and
//!    checks what the escrows will accept
//! 3. **Relayer**: tracks fills and hands out secrets once escrows are final
//!
//! All parties meet only through the `cl-order` ports.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cl_escrow::{
        ChainId, DstImmutablesComplement, EscrowAction, EscrowAddressDerivation,
        EscrowFactoryFacade, EscrowPhase, EscrowSide, HashLock, SecureSecret,
    };
    use cl_order::{
        next_action, CrossChainOrder, FillStatus, InMemoryEventFeed, InMemoryRelayer, MockSigner,
        OrderError, OrderEvent, OrderEventFeed, OrderStatus, OrderType, OrdersApi, RelayerApi,
        RelayerRequest, TypedDataSigner,
    };
    use cl_primitives::{keccak256, Hash, U256};
    use tokio::time::timeout;

    use crate::fixtures::{
        multi_fill_lock, multi_fill_order, secret, secret_hashes, secrets, single_fill_order,
        DST_IMPLEMENTATION, FACTORY, LATE_RESOLVER, MAKER, MAKING_AMOUNT, RESOLVER,
        SRC_IMPLEMENTATION,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const SRC_CHAIN: u64 = 1;

    async fn signed_request(
        order: &CrossChainOrder,
        secret_hashes: Option<Vec<Hash>>,
    ) -> RelayerRequest {
        let signer = MockSigner::default();
        let signature = signer
            .sign_typed_data(&order.typed_data(SRC_CHAIN).unwrap())
            .await
            .unwrap();
        RelayerRequest::from_order(
            order,
            SRC_CHAIN,
            signature,
            "quote-1".to_string(),
            secret_hashes,
        )
        .unwrap()
    }

    async fn next(feed: &InMemoryEventFeed) -> OrderEvent {
        timeout(Duration::from_secs(1), feed.next_event())
            .await
            .expect("event within a second")
            .unwrap()
            .expect("feed still open")
    }

    /// What a resolver does for one fill before asking for the secret.
    struct PreparedFill {
        idx: u64,
        taking_amount: U256,
        src_escrow: cl_primitives::Address,
        dst_escrow: cl_primitives::Address,
    }

    fn prepare_fill(
        order: &CrossChainOrder,
        amount: u64,
        remaining: u64,
        time: u64,
    ) -> PreparedFill {
        let amount = U256::from(amount);
        let idx = order
            .get_multiple_fill_idx(amount, Some(U256::from(remaining)))
            .unwrap();

        let leaves = HashLock::get_merkle_leaves(&secrets(4)).unwrap();
        let proof = HashLock::get_proof(&leaves, idx as usize).unwrap();
        assert!(multi_fill_lock().verify_leaf(&proof, &leaves[idx as usize]));

        let src_factory = EscrowFactoryFacade::new(ChainId::Ethereum, FACTORY);
        let interaction =
            src_factory.multiple_fill_interaction(&proof, idx, &secret_hashes(4)[idx as usize]);
        assert_eq!(interaction.target, FACTORY);

        let taking_amount = order
            .calc_taking_amount(&RESOLVER, amount, time, U256::zero())
            .unwrap();
        let src = order
            .to_src_immutables(SRC_CHAIN, RESOLVER, amount, Some(HashLock::new(leaves[idx as usize])))
            .unwrap()
            .with_deployed_at(time + 10)
            .unwrap();
        let src_escrow = src_factory.src_escrow_address(&src, &SRC_IMPLEMENTATION);

        let complement = DstImmutablesComplement::new(
            MAKER,
            taking_amount,
            order.taker_asset(),
            order.escrow_extension().dst_safety_deposit(),
        );
        let dst_factory = EscrowFactoryFacade::new(ChainId::Arbitrum, FACTORY);
        let dst_escrow = dst_factory
            .dst_escrow_address(&src, &complement, time + 15, RESOLVER, &DST_IMPLEMENTATION)
            .unwrap();

        PreparedFill {
            idx,
            taking_amount,
            src_escrow,
            dst_escrow,
        }
    }

    // =============================================================================
    // INTEGRATION TESTS: MULTI-FILL SWAP
    // =============================================================================

    #[tokio::test]
    async fn test_three_part_swap() {
        // keep the cl-* debug lines when run with CL_LOG_LEVEL=debug
        let _ = cl_telemetry::init_tracing(&cl_telemetry::TelemetryConfig::from_env());

        let order = multi_fill_order();
        let order_hash = order.order_hash(SRC_CHAIN).unwrap();
        let relayer = InMemoryRelayer::default();
        let feed = relayer.subscribe();

        relayer
            .submit_order(signed_request(&order, Some(secret_hashes(4))).await)
            .await
            .unwrap();
        assert_eq!(
            next(&feed).await,
            OrderEvent::OrderCreated {
                order_hash,
                src_chain_id: SRC_CHAIN
            }
        );

        // Resolver may act, the late one not yet
        assert!(order.can_execute_at(&RESOLVER, 1000));
        assert!(!order.can_execute_at(&LATE_RESOLVER, 1000));

        // (amount, remaining, time, secret revealed)
        let fills = [
            (250_000u64, MAKING_AMOUNT, 1000u64, 0u64),
            (500_000, 750_000, 1060, 2),
            (250_000, 250_000, 1120, 3),
        ];
        let mut previous_bump = u64::MAX;
        for (amount, remaining, time, expected_idx) in fills {
            let fill = prepare_fill(&order, amount, remaining, time);
            assert_eq!(fill.idx, expected_idx);
            assert_ne!(fill.src_escrow, fill.dst_escrow);

            // price only falls toward the plain rate
            let plain = U256::from(amount * 2);
            assert!(fill.taking_amount >= plain);
            let bump = ((fill.taking_amount - plain) * U256::from(10_000_000u64) / plain).low_u64();
            assert!(bump <= previous_bump);
            previous_bump = bump;

            let idx = relayer
                .record_escrows_deployed(order_hash, U256::from(amount), Hash::new([1; 32]), Hash::new([2; 32]))
                .unwrap();
            assert_eq!(idx, expected_idx);
            assert_eq!(next(&feed).await, OrderEvent::EscrowsDeployed { order_hash, idx });
            if remaining != amount {
                assert_eq!(
                    next(&feed).await,
                    OrderEvent::OrderFilledPartially {
                        order_hash,
                        remaining_making_amount: U256::from(remaining - amount)
                    }
                );
            }

            let ready = relayer.ready_to_accept_secret_fills(order_hash).await.unwrap();
            assert_eq!(ready.fills.len(), 1);
            let secret_bytes = secret(ready.fills[0].idx as u8 + 1);
            relayer
                .submit_secret(order_hash, SecureSecret::new(secret_bytes))
                .await
                .unwrap();
            assert_eq!(
                next(&feed).await,
                OrderEvent::SecretShared {
                    order_hash,
                    idx,
                    secret_hash: keccak256(secret_bytes)
                }
            );
        }
        assert_eq!(next(&feed).await, OrderEvent::OrderFilled { order_hash });

        let status = relayer.order_status(order_hash).await.unwrap();
        assert_eq!(status.status, OrderStatus::Executed);
        assert!(status.remaining_making_amount.is_zero());
        assert_eq!(status.fills.len(), 3);
        assert!(status.fills.iter().all(|f| f.status == FillStatus::Executed));

        let published = relayer.published_secrets(order_hash).await.unwrap();
        assert_eq!(published.order_type, OrderType::MultipleFills);
        let indices: Vec<u64> = published.secrets.iter().map(|s| s.idx).collect();
        assert_eq!(indices, vec![0, 2, 3]);
    }

    #[tokio::test]
    async fn test_secret_waits_for_escrows() {
        let order = multi_fill_order();
        let order_hash = order.order_hash(SRC_CHAIN).unwrap();
        let relayer = InMemoryRelayer::default();
        relayer
            .submit_order(signed_request(&order, Some(secret_hashes(4))).await)
            .await
            .unwrap();

        assert_eq!(
            relayer
                .submit_secret(order_hash, SecureSecret::new(secret(1)))
                .await,
            Err(OrderError::SecretNotExpected(order_hash))
        );
        assert!(relayer
            .published_secrets(order_hash)
            .await
            .unwrap()
            .secrets
            .is_empty());

        // nothing pending, so the maker may still walk away
        relayer.cancel(order_hash).unwrap();
        assert_eq!(
            relayer.order_status(order_hash).await.unwrap().status,
            OrderStatus::Cancelled
        );
    }

    // =============================================================================
    // INTEGRATION TESTS: SINGLE-FILL SWAP
    // =============================================================================

    #[tokio::test]
    async fn test_single_fill_swap_and_escrow_windows() {
        let order = single_fill_order();
        let order_hash = order.order_hash(SRC_CHAIN).unwrap();
        let relayer = InMemoryRelayer::default();
        relayer
            .submit_order(signed_request(&order, None).await)
            .await
            .unwrap();

        // whole amount only
        let making = U256::from(MAKING_AMOUNT);
        let src = order
            .to_src_immutables(SRC_CHAIN, RESOLVER, making, None)
            .unwrap();
        assert_eq!(src.hash_lock(), order.escrow_extension().hash_lock());
        assert_eq!(
            order.to_src_immutables(SRC_CHAIN, RESOLVER, making / 2, None),
            Err(OrderError::PartialFillNeedsLeaf)
        );

        let time_locks = order.escrow_extension().time_locks();
        let src_deployed = 2000;
        let dst_deployed = 2005;

        let before = next_action(&time_locks, EscrowSide::Source, None, 2000).unwrap();
        assert_eq!(before.phase, EscrowPhase::Created);

        let src_now = next_action(&time_locks, EscrowSide::Source, Some(src_deployed), 2005).unwrap();
        assert_eq!(src_now.phase, EscrowPhase::FinalityLock);
        assert!(src_now.actions.is_empty());

        // secret is safe to reveal once both escrows accept withdrawals
        let t = 2015;
        let src_now = next_action(&time_locks, EscrowSide::Source, Some(src_deployed), t).unwrap();
        let dst_now =
            next_action(&time_locks, EscrowSide::Destination, Some(dst_deployed), t).unwrap();
        assert!(src_now.allows(EscrowAction::Withdraw));
        assert!(dst_now.allows(EscrowAction::Withdraw));
        assert!(src_now.is_taker_only() && dst_now.is_taker_only());

        relayer
            .record_escrows_deployed(order_hash, making, Hash::ZERO, Hash::ZERO)
            .unwrap();
        relayer
            .submit_secret(order_hash, SecureSecret::new(secret(9)))
            .await
            .unwrap();
        let published = relayer.published_secrets(order_hash).await.unwrap();
        assert_eq!(published.order_type, OrderType::SingleFill);
        assert_eq!(published.secrets[0].secret.as_bytes(), &secret(9));

        // long after: the destination can only be cancelled by the taker
        let late = next_action(&time_locks, EscrowSide::Destination, Some(dst_deployed), 10_000)
            .unwrap();
        assert_eq!(late.phase, EscrowPhase::PrivateCancellation);
        assert!(late.allows(EscrowAction::Cancel));
        assert!(order.is_expired_at(10_000));
    }

    // =============================================================================
    // INTEGRATION TESTS: WIRE FORMAT
    // =============================================================================

    #[tokio::test]
    async fn test_relayer_request_json() {
        let order = multi_fill_order();
        let request = signed_request(&order, Some(secret_hashes(4))).await;
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["srcChainId"], 1);
        assert_eq!(json["quoteId"], "quote-1");
        assert_eq!(json["order"]["makingAmount"], "1000000");
        assert_eq!(json["secretHashes"].as_array().unwrap().len(), 4);
        // digest twice plus v
        assert_eq!(request.signature.len(), 2 + 65 * 2);

        let back: RelayerRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, request);
    }

    #[tokio::test]
    async fn test_failing_signer() {
        let signer = MockSigner {
            should_fail: true,
            ..MockSigner::default()
        };
        let typed = multi_fill_order().typed_data(SRC_CHAIN).unwrap();
        assert!(matches!(
            signer.sign_typed_data(&typed).await,
            Err(OrderError::Transport(_))
        ));
    }
}

//! # Order Vectors
//!
//! EIP-712 hashing and the layout of the cross-chain extension.

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use cl_escrow::ChainId;
    use cl_order::{
        order_digest, ChainConfig, CrossChainOrder, EIP712Domain, EIP712TypedData,
        EscrowExtension, EscrowExtraData, Extension, LimitOrderV4Struct, MakerTraits,
        EXTRA_DATA_LENGTH, LIMIT_ORDER_PROTOCOL,
    };
    use cl_primitives::{keccak256, uint_160_max, Address, U256};

    use crate::fixtures::{multi_fill_lock, multi_fill_order, FACTORY};

    fn lop() -> Address {
        Address::from_str(LIMIT_ORDER_PROTOCOL).unwrap()
    }

    // =========================================================================
    // EIP-712
    // =========================================================================

    #[test]
    fn test_domain_separator() {
        assert_eq!(
            EIP712Domain::limit_order(1, lop()).separator().to_string(),
            "0xd999e213f11c7bfa3e796c3409e316f25e02aa3e25e5c207a92e381c7d22b6de"
        );
    }

    #[test]
    fn test_plain_order_digest() {
        let order = LimitOrderV4Struct {
            salt: U256::one(),
            maker: Address::new([0x11; 20]),
            receiver: Address::ZERO,
            maker_asset: Address::new([0x22; 20]),
            taker_asset: Address::new([0x33; 20]),
            making_amount: U256::from(1000u64),
            taking_amount: U256::from(2000u64),
            maker_traits: U256::zero(),
        };
        let domain = EIP712Domain::limit_order(1, lop());
        let expected = "0xe3c9bdf7bbbf7af498dbc45d1c990993f1a10a4599e91a9eab28eb1e2f5d8bde";

        assert_eq!(order_digest(&domain, &order).to_string(), expected);
        assert_eq!(
            EIP712TypedData::for_order(domain, order).hash().to_string(),
            expected
        );
    }

    #[test]
    fn test_cross_chain_order_hash_uses_source_protocol() {
        let order = multi_fill_order();
        let expected = order_digest(&EIP712Domain::limit_order(1, lop()), &order.build());
        assert_eq!(order.order_hash(ChainId::Ethereum.id()).unwrap(), expected);
        assert_eq!(order.typed_data(1).unwrap().hash(), expected);

        // zkSync Era has its own protocol deployment
        assert_ne!(order.order_hash(ChainId::ZkSync.id()).unwrap(), expected);
        assert!(order.order_hash(5).is_err());
    }

    // =========================================================================
    // EXTENSION LAYOUT
    // =========================================================================

    #[test]
    fn test_salt_commits_to_extension() {
        let order = multi_fill_order();
        let extension = order.extension();
        let commitment = keccak256(extension.encode().unwrap()).to_u256() & uint_160_max();
        assert_eq!(order.salt() & uint_160_max(), commitment);
        assert_eq!(order.salt() >> 160, U256::from(42u64));
    }

    #[test]
    fn test_escrow_trailer_closes_post_interaction() {
        let order = multi_fill_order();
        let post = &order.extension().post_interaction;
        assert!(post.len() > 20 + EXTRA_DATA_LENGTH);
        assert_eq!(&post[..20], FACTORY.as_bytes());

        let trailer = EscrowExtraData::decode(&post[post.len() - EXTRA_DATA_LENGTH..]).unwrap();
        assert_eq!(trailer.hash_lock, multi_fill_lock());
        assert_eq!(trailer.dst_chain_id, ChainId::Arbitrum.id());
        assert_eq!(trailer.dst_token, Address::new([0x33; 20]));
        assert_eq!(trailer.src_safety_deposit, U256::from(1000u64));
        assert_eq!(trailer.dst_safety_deposit, U256::from(500u64));

        // deposits share one word, source in the high half
        let word = &post[post.len() - 2 * 32..post.len() - 32];
        assert_eq!(word[15], 0x03);
        assert_eq!(word[14], 0xe8);
        assert_eq!(word[31], 0xf4);
        assert_eq!(word[30], 0x01);
    }

    #[test]
    fn test_signed_order_rebuilds_from_wire() {
        let order = multi_fill_order();
        let wire = order.extension().encode().unwrap();
        let extension = Extension::decode(&wire).unwrap();
        let escrow = EscrowExtension::from_extension(&extension).unwrap();
        assert_eq!(escrow.extra(), order.escrow_extension().extra());
        assert_eq!(
            escrow.settlement().auction_details(),
            order.escrow_extension().settlement().auction_details()
        );

        let rebuilt =
            CrossChainOrder::from_data_and_extension(&order.build(), extension, &ChainConfig::default())
                .unwrap();
        assert_eq!(rebuilt.order_hash(1).unwrap(), order.order_hash(1).unwrap());
        assert_eq!(rebuilt.build(), order.build());
        assert_eq!(rebuilt.taker_asset(), order.taker_asset());
        assert!(rebuilt.multiple_fills_allowed());
    }

    #[test]
    fn test_maker_traits_of_default_order() {
        let order = multi_fill_order();
        let traits = MakerTraits::new(order.build().maker_traits);
        assert!(traits.has_extension());
        assert!(traits.has_post_interaction());
        assert!(traits.is_partial_fill_allowed());
        assert!(traits.is_multiple_fills_allowed());
        assert!(!traits.is_native_unwrap_enabled());
        assert!(!traits.is_permit2());
        assert_eq!(traits.expiration(), Some(order.deadline()));
    }
}

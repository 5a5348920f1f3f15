//! # Escrow Vectors
//!
//! Hash-locks, immutables hashes and escrow addresses as the contracts
//! compute them.

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use cl_escrow::{
        calc_proxy_bytecode_hash, create2_address, hash_secret, ChainId,
        DstImmutablesComplement, EscrowAddressDerivation, EscrowFactoryFacade, HashLock,
        Immutables, ImmutablesParams, TimeLocks,
    };
    use cl_primitives::{Address, Hash, U256};

    use crate::fixtures::{secret, secrets, time_locks};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn immutables() -> Immutables {
        Immutables::new(ImmutablesParams {
            order_hash: Hash::new([0x11; 32]),
            hash_lock: HashLock::for_single_fill(&secret(1)).unwrap(),
            maker: Address::new([0x22; 20]),
            taker: Address::new([0x33; 20]),
            token: Address::ZERO,
            amount: U256::from(1000u64),
            safety_deposit: U256::from(50u64),
            time_locks: time_locks().with_deployed_at(1000).unwrap(),
        })
    }

    // =========================================================================
    // HASH-LOCKS
    // =========================================================================

    #[test]
    fn test_single_fill_lock() {
        let lock = HashLock::for_single_fill(&secret(1)).unwrap();
        assert_eq!(
            lock.to_string(),
            "0xb10e2d527612073b26eecdfd717e6a320cf44b4afac2b0732d9fcbe2b7fa0cf6"
        );
        assert_eq!(lock.value(), hash_secret(&secret(1)).unwrap());
    }

    #[test]
    fn test_multiple_fills_lock_carries_parts_count() {
        let leaves = HashLock::get_merkle_leaves(&secrets(4)).unwrap();
        assert_eq!(
            leaves[0].to_string(),
            "0xa0007178b07c67454652c6c218db198f4c8743bd4dbd6eeab07a4005f916db49"
        );

        let lock = HashLock::for_multiple_fills(&leaves).unwrap();
        assert_eq!(
            lock.to_string(),
            "0x00036143b53f264e10e8e7a6876abd9b19a2059c474c5d62e58140e832c92a5a"
        );
        assert_eq!(lock.get_parts_count(), 3);
    }

    #[test]
    fn test_leaves_from_hashes_match_leaves_from_secrets() {
        let from_secrets = HashLock::get_merkle_leaves(&secrets(5)).unwrap();
        let hashes: Vec<Hash> = secrets(5)
            .iter()
            .map(|s| hash_secret(s).unwrap())
            .collect();
        assert_eq!(
            HashLock::get_merkle_leaves_from_secret_hashes(&hashes),
            from_secrets
        );
    }

    // =========================================================================
    // IMMUTABLES AND ADDRESSES
    // =========================================================================

    #[test]
    fn test_immutables_hash() {
        assert_eq!(
            immutables().hash().to_string(),
            "0xf274a8f351e81022b6176231d437902c68bc69e1c76bbc26609bd286353dc603"
        );
    }

    #[test]
    fn test_immutables_abi_roundtrip() {
        let imm = immutables();
        let encoded = imm.encode();
        assert_eq!(encoded.len(), 256);
        assert_eq!(Immutables::decode(&encoded).unwrap(), imm);
    }

    #[test]
    fn test_src_and_dst_escrow_addresses() {
        let factory = EscrowFactoryFacade::new(ChainId::Ethereum, Address::new([0x55; 20]));
        let implementation = Address::new([0x44; 20]);

        assert_eq!(
            factory
                .src_escrow_address(&immutables(), &implementation)
                .to_string(),
            "0x210b206657a2d716214c71b88a0787dd993f952e"
        );

        let complement = DstImmutablesComplement::new(
            Address::new([0x66; 20]),
            U256::from(900u64),
            Address::new([0x77; 20]),
            U256::from(40u64),
        );
        let dst = factory
            .dst_escrow_address(
                &immutables(),
                &complement,
                2000,
                Address::new([0x88; 20]),
                &implementation,
            )
            .unwrap();
        assert_eq!(dst.to_string(), "0xf94d0b6336427cd142f564a93480aa24dbc25414");
    }

    #[test]
    fn test_zksync_and_create2_disagree() {
        let factory = Address::new([0x11; 20]);
        let salt = Hash::new([0x33; 32]);
        let implementation = Address::new([0x22; 20]);

        let zk = EscrowFactoryFacade::new(ChainId::ZkSync, factory);
        let eth = EscrowFactoryFacade::new(ChainId::Ethereum, factory);
        assert_eq!(
            zk.escrow_address(&salt, &implementation).to_string(),
            "0x8e5f091af488f715fbaa6a2cfaaf0532f7f4c513"
        );
        assert_eq!(
            eth.escrow_address(&salt, &implementation),
            create2_address(&factory, &salt, &calc_proxy_bytecode_hash(&implementation))
        );
        assert_eq!(
            eth.escrow_address(&salt, &implementation).to_string(),
            "0xe7e83b9b970bf8e28065358e3e0a06edf6e24bbc"
        );
    }

    #[test]
    fn test_time_locks_word_layout() {
        let word = time_locks().with_deployed_at(1000).unwrap().build();
        // deployedAt in the lowest 32 bits, srcWithdrawal in the highest
        assert_eq!(word.low_u64() & 0xffff_ffff, 1000);
        assert_eq!((word >> 224).low_u64(), 10);
        assert_eq!(TimeLocks::from_u256(word).unwrap().deployed_at(), 1000);
    }

    #[test]
    fn test_parse_rejects_short_lock() {
        assert!(HashLock::from_str("0x1234").is_err());
    }
}

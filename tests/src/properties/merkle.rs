//! # Merkle Properties
//!
//! Every leaf of a multi-fill lock proves against it, and fill indices
//! stay inside the tree.

#[cfg(test)]
mod tests {
    use cl_escrow::HashLock;
    use cl_primitives::U256;
    use proptest::prelude::*;

    use crate::fixtures::{multi_fill_order, MAKING_AMOUNT};

    fn secrets() -> impl Strategy<Value = Vec<[u8; 32]>> {
        prop::collection::vec(prop::array::uniform32(any::<u8>()), 3..40)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_every_leaf_proves(secrets in secrets()) {
            let leaves = HashLock::get_merkle_leaves(&secrets).unwrap();
            let lock = HashLock::for_multiple_fills(&leaves).unwrap();
            prop_assert_eq!(lock.get_parts_count(), secrets.len() as u64 - 1);

            for (i, leaf) in leaves.iter().enumerate() {
                let proof = HashLock::get_proof(&leaves, i).unwrap();
                prop_assert!(lock.verify_leaf(&proof, leaf));
                if i > 0 {
                    prop_assert!(!lock.verify_leaf(&proof, &leaves[i - 1]));
                }
            }
        }

        #[test]
        fn prop_fill_index_within_parts(fill in 1u64..=MAKING_AMOUNT, filled in 0u64..MAKING_AMOUNT) {
            let order = multi_fill_order();
            let remaining = MAKING_AMOUNT - filled;
            prop_assume!(fill <= remaining);

            let idx = order
                .get_multiple_fill_idx(U256::from(fill), Some(U256::from(remaining)))
                .unwrap();
            prop_assert!(idx <= 3);
            if fill == remaining {
                // the last fill always reveals the extra secret
                prop_assert_eq!(idx, 3);
            } else {
                prop_assert!(idx < 3);
            }
        }
    }
}

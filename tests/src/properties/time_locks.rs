//! # Time-Lock Properties
//!
//! Packing is lossless and exactly one stage is active at any time.

#[cfg(test)]
mod tests {
    use cl_escrow::{DstStage, SrcStage, TimeLockDurations, TimeLocks};
    use proptest::prelude::*;

    fn src_rank(stage: SrcStage) -> u8 {
        match stage {
            SrcStage::FinalityLock => 0,
            SrcStage::PrivateWithdrawal => 1,
            SrcStage::PublicWithdrawal => 2,
            SrcStage::PrivateCancellation => 3,
            SrcStage::PublicCancellation => 4,
        }
    }

    fn dst_rank(stage: DstStage) -> u8 {
        match stage {
            DstStage::FinalityLock => 0,
            DstStage::PrivateWithdrawal => 1,
            DstStage::PublicWithdrawal => 2,
            DstStage::PrivateCancellation => 3,
        }
    }

    prop_compose! {
        fn durations()(
            src_finality_lock in 0u64..10_000,
            src_private_withdrawal in 1u64..10_000,
            src_public_withdrawal in 1u64..10_000,
            src_private_cancellation in 1u64..10_000,
            dst_finality_lock in 0u64..10_000,
            dst_private_withdrawal in 1u64..10_000,
            dst_public_withdrawal in 1u64..10_000,
        ) -> TimeLockDurations {
            TimeLockDurations {
                src_finality_lock,
                src_private_withdrawal,
                src_public_withdrawal,
                src_private_cancellation,
                dst_finality_lock,
                dst_private_withdrawal,
                dst_public_withdrawal,
            }
        }
    }

    proptest! {
        #[test]
        fn prop_word_roundtrip(d in durations(), deployed_at in 50_000u64..=u32::MAX as u64) {
            let locks = TimeLocks::from_durations(d).unwrap().with_deployed_at(deployed_at).unwrap();
            let back = TimeLocks::from_u256(locks.build()).unwrap();
            prop_assert_eq!(back, locks);
            prop_assert_eq!(back.deployed_at(), deployed_at);
        }

        #[test]
        fn prop_src_stages_partition_time(
            d in durations(),
            deployed_at in 50_000u64..1_000_000,
            offset in 0u64..50_000,
            step in 0u64..50_000,
        ) {
            let locks = TimeLocks::from_durations(d).unwrap().to_src_time_locks_at(deployed_at).unwrap();
            let t = deployed_at + offset;
            let active = [
                locks.is_finality_lock(t),
                locks.is_private_withdrawal(t),
                locks.is_public_withdrawal(t),
                locks.is_private_cancellation(t),
                locks.is_public_cancellation(t),
            ];
            prop_assert_eq!(active.iter().filter(|a| **a).count(), 1);
            prop_assert!(active[src_rank(locks.get_stage(t)) as usize]);
            prop_assert!(src_rank(locks.get_stage(t)) <= src_rank(locks.get_stage(t + step)));
        }

        #[test]
        fn prop_dst_stages_partition_time(
            d in durations(),
            deployed_at in 50_000u64..1_000_000,
            offset in 0u64..50_000,
            step in 0u64..50_000,
        ) {
            let locks = TimeLocks::from_durations(d).unwrap().to_dst_time_locks_at(deployed_at).unwrap();
            let t = deployed_at + offset;
            let active = [
                locks.is_finality_lock(t),
                locks.is_private_withdrawal(t),
                locks.is_public_withdrawal(t),
                locks.is_private_cancellation(t),
            ];
            prop_assert_eq!(active.iter().filter(|a| **a).count(), 1);
            prop_assert!(active[dst_rank(locks.get_stage(t)) as usize]);
            prop_assert!(dst_rank(locks.get_stage(t)) <= dst_rank(locks.get_stage(t + step)));
        }
    }
}

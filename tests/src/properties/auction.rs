//! # Auction Properties
//!
//! The bump never rises over time and rate conversions lose at most one
//! unit.

#[cfg(test)]
mod tests {
    use cl_auction::{
        calc_making_amount, calc_taking_amount, AuctionCalculator, AuctionDetails,
        AuctionGasCostInfo, AuctionPoint,
    };
    use cl_primitives::{UINT_24_MAX, U256};
    use proptest::prelude::*;

    prop_compose! {
        fn auction()(
            start_time in 1u64..1_000_000,
            initial in 1u64..=UINT_24_MAX,
            coefficients in prop::collection::vec(0u64..=UINT_24_MAX, 0..5),
            delays in prop::collection::vec(1u64..600, 5),
            tail in 1u64..600,
        ) -> AuctionDetails {
            // non-increasing curve below the initial bump
            let mut coefficients = coefficients;
            coefficients.iter_mut().for_each(|c| *c = (*c).min(initial));
            coefficients.sort_unstable_by(|a, b| b.cmp(a));
            let points: Vec<AuctionPoint> = coefficients
                .iter()
                .zip(&delays)
                .map(|(coefficient, delay)| AuctionPoint { delay: *delay, coefficient: *coefficient })
                .collect();
            let duration = points.iter().map(|p| p.delay).sum::<u64>() + tail;
            AuctionDetails::new(start_time, duration, initial, points, AuctionGasCostInfo::default())
                .unwrap()
        }
    }

    proptest! {
        #[test]
        fn prop_bump_non_increasing(details in auction(), a in 0u64..5000, b in 0u64..5000) {
            let calc = AuctionCalculator::from_auction_details(&details);
            let (early, late) = (a.min(b), a.max(b));
            let t1 = details.start_time() + early;
            let t2 = details.start_time() + late;

            prop_assert!(calc.get_auction_bump(t1) >= calc.get_auction_bump(t2));
            prop_assert!(calc.get_auction_bump(t1) <= details.initial_rate_bump());
            prop_assert_eq!(calc.get_auction_bump(details.end_time()), 0);
        }

        #[test]
        fn prop_auction_amounts_within_one(amount in 1u64..u64::MAX, rate in 0u64..=UINT_24_MAX) {
            let amount = U256::from(amount);
            let taking = AuctionCalculator::calc_auction_taking_amount(amount, rate).unwrap();
            let back = AuctionCalculator::calc_auction_making_amount(taking, rate).unwrap();
            prop_assert!(taking >= amount);
            prop_assert!(back >= amount && back <= amount + 1);
        }

        #[test]
        fn prop_order_amounts_within_one(
            making in 1u64..u64::MAX,
            extra in 0u64..u64::MAX,
            fill in 1u64..u64::MAX,
        ) {
            let making_amount = U256::from(making);
            let taking_amount = making_amount + U256::from(extra);
            let fill = U256::from(fill.min(making));

            let taking = calc_taking_amount(fill, making_amount, taking_amount).unwrap();
            let back = calc_making_amount(taking, making_amount, taking_amount).unwrap();
            prop_assert!(back >= fill && back <= fill + 1);
        }
    }
}

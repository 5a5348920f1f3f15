//! # Fees
//!
//! Resolver and integrator fees charged on top of the taking amount.
//!
//! | Value | Unit |
//! |-------|------|
//! | `fee` | `1e-5` of the taking amount ([`FEE_BASE_1E5`]) |
//! | `whitelist_discount`, `share` | percent ([`FEE_BASE_1E2`]) |

use crate::errors::AuctionError;
use crate::mul_div::{mul_div, Rounding};
use crate::whitelist::Whitelist;
use cl_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Base of fee values.
pub const FEE_BASE_1E5: u64 = 100_000;

/// Base of percentages.
pub const FEE_BASE_1E2: u64 = 100;

/// Fee paid to the protocol by resolvers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverFee {
    /// Fee receiver.
    pub receiver: Address,
    /// Fee in `1e-5` units.
    pub fee: u64,
    /// Percent of the fee waived for whitelisted resolvers.
    pub whitelist_discount: u64,
}

impl ResolverFee {
    /// Bound-checked resolver fee.
    pub fn new(receiver: Address, fee: u64, whitelist_discount: u64) -> Result<Self, AuctionError> {
        check_max("resolver fee", fee, u16::MAX as u64)?;
        check_max("whitelist discount", whitelist_discount, FEE_BASE_1E2)?;
        Ok(Self {
            receiver,
            fee,
            whitelist_discount,
        })
    }

    /// No fee.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Fee taken by the integrator that brought the order, shared with the protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegratorFee {
    /// Integrator receiver.
    pub integrator: Address,
    /// Protocol receiver.
    pub protocol: Address,
    /// Fee in `1e-5` units.
    pub fee: u64,
    /// Percent of the fee the integrator keeps.
    pub share: u64,
}

impl IntegratorFee {
    /// Bound-checked integrator fee.
    pub fn new(
        integrator: Address,
        protocol: Address,
        fee: u64,
        share: u64,
    ) -> Result<Self, AuctionError> {
        check_max("integrator fee", fee, u16::MAX as u64)?;
        check_max("integrator share", share, FEE_BASE_1E2)?;
        Ok(Self {
            integrator,
            protocol,
            fee,
            share,
        })
    }

    /// No fee.
    pub fn zero() -> Self {
        Self::default()
    }
}

fn check_max(field: &'static str, value: u64, max: u64) -> Result<(), AuctionError> {
    if value > max {
        return Err(AuctionError::InvalidFee { field, value, max });
    }
    Ok(())
}

/// Both fees of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fees {
    /// Resolver fee.
    pub resolver: ResolverFee,
    /// Integrator fee.
    pub integrator: IntegratorFee,
}

impl Fees {
    /// Pair of fees.
    pub fn new(resolver: ResolverFee, integrator: IntegratorFee) -> Self {
        Self {
            resolver,
            integrator,
        }
    }

    /// Protocol receiver: the resolver fee receiver, else the integrator's protocol address.
    pub fn protocol(&self) -> Address {
        if self.resolver.receiver.is_zero() {
            self.integrator.protocol
        } else {
            self.resolver.receiver
        }
    }
}

/// Fee units effective for one taker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakerFees {
    /// Resolver fee after the whitelist discount, `1e-5` units.
    pub resolver_fee: u64,
    /// Integrator fee, `1e-5` units.
    pub integrator_fee: u64,
}

impl TakerFees {
    fn total(&self) -> U256 {
        U256::from(FEE_BASE_1E5 + self.resolver_fee + self.integrator_fee)
    }
}

/// Applies [`Fees`] to amounts, with discounts for whitelisted resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeCalculator {
    fees: Fees,
    whitelist: Whitelist,
}

impl FeeCalculator {
    /// Calculator for `fees` and the order's `whitelist`.
    pub fn new(fees: Fees, whitelist: Whitelist) -> Self {
        Self { fees, whitelist }
    }

    /// Configured fees.
    pub fn fees(&self) -> &Fees {
        &self.fees
    }

    /// Fee units `taker` pays.
    pub fn fees_for_taker(&self, taker: &Address) -> TakerFees {
        let resolver = self.fees.resolver;
        let resolver_fee = if self.whitelist.is_whitelisted(taker) {
            resolver.fee * (FEE_BASE_1E2 - resolver.whitelist_discount) / FEE_BASE_1E2
        } else {
            resolver.fee
        };
        TakerFees {
            resolver_fee,
            integrator_fee: self.fees.integrator.fee,
        }
    }

    /// Taking amount including every fee, rounded up.
    pub fn taking_amount_with_fee(
        &self,
        taker: &Address,
        order_taking_amount: U256,
    ) -> Result<U256, AuctionError> {
        let fees = self.fees_for_taker(taker);
        mul_div(
            order_taking_amount,
            fees.total(),
            U256::from(FEE_BASE_1E5),
            Rounding::Ceil,
        )
    }

    /// Making amount once fees are carved out of it, rounded down.
    pub fn making_amount_without_fee(
        &self,
        taker: &Address,
        making_amount: U256,
    ) -> Result<U256, AuctionError> {
        let fees = self.fees_for_taker(taker);
        mul_div(
            making_amount,
            U256::from(FEE_BASE_1E5),
            fees.total(),
            Rounding::Floor,
        )
    }

    /// Resolver fee on `order_taking_amount`.
    pub fn resolver_fee(
        &self,
        taker: &Address,
        order_taking_amount: U256,
    ) -> Result<U256, AuctionError> {
        let fees = self.fees_for_taker(taker);
        mul_div(
            order_taking_amount,
            U256::from(fees.resolver_fee),
            U256::from(FEE_BASE_1E5),
            Rounding::Floor,
        )
    }

    fn total_integrator_fee(
        &self,
        taker: &Address,
        order_taking_amount: U256,
    ) -> Result<U256, AuctionError> {
        let fees = self.fees_for_taker(taker);
        mul_div(
            order_taking_amount,
            U256::from(fees.integrator_fee),
            U256::from(FEE_BASE_1E5),
            Rounding::Floor,
        )
    }

    /// Integrator's share of the integrator fee.
    pub fn integrator_fee(
        &self,
        taker: &Address,
        order_taking_amount: U256,
    ) -> Result<U256, AuctionError> {
        let total = self.total_integrator_fee(taker, order_taking_amount)?;
        mul_div(
            total,
            U256::from(self.fees.integrator.share),
            U256::from(FEE_BASE_1E2),
            Rounding::Floor,
        )
    }

    /// Protocol's share of the integrator fee.
    pub fn protocol_share_of_integrator_fee(
        &self,
        taker: &Address,
        order_taking_amount: U256,
    ) -> Result<U256, AuctionError> {
        let total = self.total_integrator_fee(taker, order_taking_amount)?;
        Ok(total - self.integrator_fee(taker, order_taking_amount)?)
    }

    /// Everything the protocol receives: resolver fee plus its integrator share.
    pub fn protocol_fee(
        &self,
        taker: &Address,
        order_taking_amount: U256,
    ) -> Result<U256, AuctionError> {
        let resolver = self.resolver_fee(taker, order_taking_amount)?;
        let share = self.protocol_share_of_integrator_fee(taker, order_taking_amount)?;
        Ok(resolver + share)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::whitelist::tests::{resolver, sample as sample_whitelist};

    pub(crate) fn sample() -> FeeCalculator {
        let fees = Fees::new(
            ResolverFee::new(Address::new([0xF1; 20]), 1000, 50).unwrap(),
            IntegratorFee::new(Address::new([0xF2; 20]), Address::new([0xF3; 20]), 500, 10)
                .unwrap(),
        );
        FeeCalculator::new(fees, sample_whitelist())
    }

    #[test]
    fn test_whitelist_discount() {
        let calc = sample();
        let listed = calc.fees_for_taker(&resolver(0xAA));
        assert_eq!(listed.resolver_fee, 500);
        assert_eq!(listed.integrator_fee, 500);

        let stranger = calc.fees_for_taker(&resolver(0x01));
        assert_eq!(stranger.resolver_fee, 1000);
    }

    #[test]
    fn test_taking_and_making_with_fee() {
        let calc = sample();
        let amount = U256::from(1_000_000u64);

        let listed = calc.taking_amount_with_fee(&resolver(0xAA), amount).unwrap();
        assert_eq!(listed, U256::from(1_010_000u64));
        let stranger = calc.taking_amount_with_fee(&resolver(0x01), amount).unwrap();
        assert_eq!(stranger, U256::from(1_015_000u64));

        let making = calc
            .making_amount_without_fee(&resolver(0xAA), U256::from(1_010_000u64))
            .unwrap();
        assert_eq!(making, amount);
    }

    #[test]
    fn test_fee_split() {
        let calc = sample();
        let taker = resolver(0xAA);
        let amount = U256::from(1_000_000u64);

        assert_eq!(calc.resolver_fee(&taker, amount).unwrap(), U256::from(5000u64));
        assert_eq!(calc.integrator_fee(&taker, amount).unwrap(), U256::from(500u64));
        assert_eq!(
            calc.protocol_share_of_integrator_fee(&taker, amount).unwrap(),
            U256::from(4500u64)
        );
        assert_eq!(calc.protocol_fee(&taker, amount).unwrap(), U256::from(9500u64));
    }

    #[test]
    fn test_protocol_receiver() {
        let calc = sample();
        assert_eq!(calc.fees().protocol(), Address::new([0xF1; 20]));

        let integrator_only = Fees::new(
            ResolverFee::zero(),
            IntegratorFee::new(Address::new([0xF2; 20]), Address::new([0xF3; 20]), 10, 50)
                .unwrap(),
        );
        assert_eq!(integrator_only.protocol(), Address::new([0xF3; 20]));
    }

    #[test]
    fn test_fee_bounds() {
        assert!(ResolverFee::new(Address::ZERO, 1, 101).is_err());
        assert!(IntegratorFee::new(Address::ZERO, Address::ZERO, 70_000, 0).is_err());
        assert_eq!(ResolverFee::zero().fee, 0);
    }
}

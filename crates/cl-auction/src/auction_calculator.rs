//! # Auction Calculator
//!
//! Rate bump of a Dutch auction at a given time, net of gas compensation.
//!
//! The curve starts at `initialRateBump`, walks linearly through each
//! point and reaches zero at `startTime + duration`. Rates are in
//! `1e-7` units, so a bump of `10_000_000` doubles the taking amount.

use crate::auction_details::{AuctionDetails, AuctionGasCostInfo, AuctionPoint};
use crate::errors::AuctionError;
use crate::mul_div::{mul_div, Rounding};
use cl_primitives::U256;

/// Denominator of rate bumps.
pub const RATE_BUMP_DENOMINATOR: u64 = 10_000_000;

/// Scale between a base fee in wei and a gas price estimate.
pub const GAS_PRICE_BASE: u64 = 1_000_000;

/// Evaluates one auction curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionCalculator {
    start_time: u64,
    duration: u64,
    initial_rate_bump: u64,
    points: Vec<AuctionPoint>,
    gas_cost: AuctionGasCostInfo,
}

impl AuctionCalculator {
    /// Calculator for `details`.
    pub fn from_auction_details(details: &AuctionDetails) -> Self {
        Self {
            start_time: details.start_time(),
            duration: details.duration(),
            initial_rate_bump: details.initial_rate_bump(),
            points: details.points().to_vec(),
            gas_cost: details.gas_cost(),
        }
    }

    /// Time the bump reaches zero.
    pub fn finish_time(&self) -> u64 {
        self.start_time + self.duration
    }

    /// Auction bump at `time`, before gas compensation.
    pub fn get_auction_bump(&self, time: u64) -> u64 {
        let finish_time = self.finish_time();
        if time <= self.start_time {
            return self.initial_rate_bump;
        }
        if time >= finish_time {
            return 0;
        }

        let mut current_time = self.start_time;
        let mut current_rate = self.initial_rate_bump as u128;
        let t = time as u128;

        for point in &self.points {
            let next_time = current_time + point.delay;
            let next_rate = point.coefficient as u128;
            if time <= next_time {
                let (cur, next) = (current_time as u128, next_time as u128);
                let bump = ((t - cur) * next_rate + (next - t) * current_rate) / (next - cur);
                return bump as u64;
            }
            current_time = next_time;
            current_rate = next_rate;
        }

        let (cur, finish) = (current_time as u128, finish_time as u128);
        ((finish - t) * current_rate / (finish - cur)) as u64
    }

    /// Gas compensation for `base_fee`, in rate-bump units.
    ///
    /// Zero when any estimate or the base fee is zero.
    pub fn gas_price_bump(&self, base_fee: U256) -> Result<U256, AuctionError> {
        let AuctionGasCostInfo {
            gas_bump_estimate,
            gas_price_estimate,
        } = self.gas_cost;
        if gas_bump_estimate == 0 || gas_price_estimate == 0 || base_fee.is_zero() {
            return Ok(U256::zero());
        }
        let scaled = mul_div(
            U256::from(gas_bump_estimate),
            base_fee,
            U256::from(gas_price_estimate),
            Rounding::Floor,
        )?;
        Ok(scaled / U256::from(GAS_PRICE_BASE))
    }

    /// Auction bump minus gas compensation, floored at zero.
    pub fn calc_rate_bump(&self, time: u64, base_fee: U256) -> Result<u64, AuctionError> {
        let auction_bump = U256::from(self.get_auction_bump(time));
        let gas_bump = self.gas_price_bump(base_fee)?;
        if auction_bump > gas_bump {
            Ok((auction_bump - gas_bump).low_u64())
        } else {
            Ok(0)
        }
    }

    /// Taking amount after a rate bump, rounded up.
    pub fn calc_auction_taking_amount(
        taking_amount: U256,
        rate: u64,
    ) -> Result<U256, AuctionError> {
        mul_div(
            taking_amount,
            U256::from(rate) + U256::from(RATE_BUMP_DENOMINATOR),
            U256::from(RATE_BUMP_DENOMINATOR),
            Rounding::Ceil,
        )
    }

    /// Making amount matching a bumped taking amount, rounded down.
    pub fn calc_auction_making_amount(
        making_amount: U256,
        rate: u64,
    ) -> Result<U256, AuctionError> {
        mul_div(
            making_amount,
            U256::from(RATE_BUMP_DENOMINATOR),
            U256::from(rate) + U256::from(RATE_BUMP_DENOMINATOR),
            Rounding::Floor,
        )
    }

    /// Initial bump so that the auction starts at `start_amount` and ends at
    /// `end_amount` of taker asset.
    pub fn calc_initial_rate_bump(start_amount: U256, end_amount: U256) -> Result<u64, AuctionError> {
        let denominator = U256::from(RATE_BUMP_DENOMINATOR);
        let scaled = mul_div(denominator, start_amount, end_amount, Rounding::Floor)?;
        let bump = scaled.saturating_sub(denominator);
        if bump > U256::from(u64::MAX) {
            return Err(AuctionError::Overflow("calc_initial_rate_bump"));
        }
        Ok(bump.low_u64())
    }

    /// Gas price estimate for a base fee in wei.
    pub fn base_fee_to_gas_price_estimate(base_fee: U256) -> U256 {
        base_fee / U256::from(GAS_PRICE_BASE)
    }

    /// Rate bump that pays `gas_cost_in_to_token` on top of `end_taking_amount`.
    pub fn calc_gas_bump_estimate(
        end_taking_amount: U256,
        gas_cost_in_to_token: U256,
    ) -> Result<U256, AuctionError> {
        mul_div(
            gas_cost_in_to_token,
            U256::from(RATE_BUMP_DENOMINATOR),
            end_taking_amount,
            Rounding::Floor,
        )
    }
}

impl From<&AuctionDetails> for AuctionCalculator {
    fn from(details: &AuctionDetails) -> Self {
        Self::from_auction_details(details)
    }
}

//! # Amount Calculator
//!
//! Combines the auction curve with fees into the amounts a resolver must
//! provide at a given time.

use crate::auction_calculator::AuctionCalculator;
use crate::errors::AuctionError;
use crate::fees::{FeeCalculator, FEE_BASE_1E5};
use crate::mul_div::{mul_div, Rounding};
use cl_primitives::{Address, U256};
use tracing::debug;

/// Amounts for one order at a given time and base fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountCalculator {
    auction: AuctionCalculator,
    fees: Option<FeeCalculator>,
}

impl AmountCalculator {
    /// Calculator over an auction and optional fees.
    pub fn new(auction: AuctionCalculator, fees: Option<FeeCalculator>) -> Self {
        Self { auction, fees }
    }

    /// Underlying auction.
    pub fn auction(&self) -> &AuctionCalculator {
        &self.auction
    }

    /// Underlying fees, if any.
    pub fn fee_calculator(&self) -> Option<&FeeCalculator> {
        self.fees.as_ref()
    }

    /// Taking amount with the rate bump at `time` applied.
    pub fn auction_bumped_amount(
        &self,
        taking_amount: U256,
        time: u64,
        base_fee: U256,
    ) -> Result<U256, AuctionError> {
        let rate_bump = self.auction.calc_rate_bump(time, base_fee)?;
        AuctionCalculator::calc_auction_taking_amount(taking_amount, rate_bump)
    }

    /// Taker asset `taker` must send for `taking_amount`, fees and auction included.
    pub fn required_taking_amount(
        &self,
        taker: &Address,
        taking_amount: U256,
        time: u64,
        base_fee: U256,
    ) -> Result<U256, AuctionError> {
        let with_fee = match &self.fees {
            Some(fees) => fees.taking_amount_with_fee(taker, taking_amount)?,
            None => taking_amount,
        };
        let required = self.auction_bumped_amount(with_fee, time, base_fee)?;
        debug!(
            "[cl-auction] Required taking amount {} for {} at {}",
            required, taker, time
        );
        Ok(required)
    }

    /// Maker asset released for `making_amount`, fees and auction included.
    pub fn required_making_amount(
        &self,
        taker: &Address,
        making_amount: U256,
        time: u64,
        base_fee: U256,
    ) -> Result<U256, AuctionError> {
        let without_fee = match &self.fees {
            Some(fees) => fees.making_amount_without_fee(taker, making_amount)?,
            None => making_amount,
        };
        let rate_bump = self.auction.calc_rate_bump(time, base_fee)?;
        AuctionCalculator::calc_auction_making_amount(without_fee, rate_bump)
    }

    /// Resolver fee on the auction-bumped `taking_amount`.
    pub fn resolver_fee(
        &self,
        taker: &Address,
        taking_amount: U256,
        time: u64,
        base_fee: U256,
    ) -> Result<U256, AuctionError> {
        self.with_fees(taker, taking_amount, time, base_fee, FeeCalculator::resolver_fee)
    }

    /// Integrator share on the auction-bumped `taking_amount`.
    pub fn integrator_fee(
        &self,
        taker: &Address,
        taking_amount: U256,
        time: u64,
        base_fee: U256,
    ) -> Result<U256, AuctionError> {
        self.with_fees(taker, taking_amount, time, base_fee, FeeCalculator::integrator_fee)
    }

    /// Protocol share of the integrator fee on the auction-bumped `taking_amount`.
    pub fn protocol_share_of_integrator_fee(
        &self,
        taker: &Address,
        taking_amount: U256,
        time: u64,
        base_fee: U256,
    ) -> Result<U256, AuctionError> {
        self.with_fees(
            taker,
            taking_amount,
            time,
            base_fee,
            FeeCalculator::protocol_share_of_integrator_fee,
        )
    }

    /// Protocol fee on the auction-bumped `taking_amount`.
    pub fn protocol_fee(
        &self,
        taker: &Address,
        taking_amount: U256,
        time: u64,
        base_fee: U256,
    ) -> Result<U256, AuctionError> {
        self.with_fees(taker, taking_amount, time, base_fee, FeeCalculator::protocol_fee)
    }

    /// Integrator fee plus protocol fee.
    pub fn total_fee(
        &self,
        taker: &Address,
        taking_amount: U256,
        time: u64,
        base_fee: U256,
    ) -> Result<U256, AuctionError> {
        let integrator = self.integrator_fee(taker, taking_amount, time, base_fee)?;
        let protocol = self.protocol_fee(taker, taking_amount, time, base_fee)?;
        Ok(integrator + protocol)
    }

    /// What the maker's receiver ends up with after fees are paid out.
    pub fn user_taking_amount(
        &self,
        taker: &Address,
        taking_amount: U256,
        time: u64,
        base_fee: U256,
    ) -> Result<U256, AuctionError> {
        let whole = self.required_taking_amount(taker, taking_amount, time, base_fee)?;
        let fees = self.total_fee(taker, taking_amount, time, base_fee)?;
        Ok(whole.saturating_sub(fees))
    }

    /// Auction-bumped amount with a `fee` (`1e-5` units) added on top.
    pub fn calc_auction_taking_amount_with_fee(
        base_taking_amount: U256,
        rate: u64,
        fee: u64,
    ) -> Result<U256, AuctionError> {
        let bumped = AuctionCalculator::calc_auction_taking_amount(base_taking_amount, rate)?;
        if fee == 0 {
            return Ok(bumped);
        }
        mul_div(
            bumped,
            U256::from(FEE_BASE_1E5 + fee),
            U256::from(FEE_BASE_1E5),
            Rounding::Floor,
        )
    }

    /// Fee part of an amount that includes a `fee` (`1e-5` units).
    pub fn extract_fee_amount(required_taking_amount: U256, fee: u64) -> Result<U256, AuctionError> {
        let net = mul_div(
            required_taking_amount,
            U256::from(FEE_BASE_1E5),
            U256::from(FEE_BASE_1E5 + fee),
            Rounding::Ceil,
        )?;
        Ok(required_taking_amount - net)
    }

    fn with_fees(
        &self,
        taker: &Address,
        taking_amount: U256,
        time: u64,
        base_fee: U256,
        f: fn(&FeeCalculator, &Address, U256) -> Result<U256, AuctionError>,
    ) -> Result<U256, AuctionError> {
        let Some(fees) = &self.fees else {
            return Ok(U256::zero());
        };
        let bumped = self.auction_bumped_amount(taking_amount, time, base_fee)?;
        f(fees, taker, bumped)
    }
}

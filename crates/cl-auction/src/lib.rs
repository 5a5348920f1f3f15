//! # Crosslock Auction
//!
//! Pricing of a cross-chain order while resolvers compete for it.
//!
//! ## Contents
//!
//! | Module | Provides |
//! |--------|----------|
//! | `auction_details` | [`AuctionDetails`] and its packed encoding |
//! | `auction_calculator` | rate bump at a time, gas compensation |
//! | `amount_calculator` | amounts with auction and fees combined |
//! | `fees` | resolver and integrator fees |
//! | `whitelist` | resolver admission and exclusivity |
//! | `mul_div` | 512-bit `a * b / x` with explicit rounding |
//!
//! Amounts are `U256`; rate bumps are `1e-7` units; fees are `1e-5` units.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod amount_calculator;
pub mod auction_calculator;
pub mod auction_details;
pub mod errors;
pub mod fees;
pub mod mul_div;
pub mod whitelist;

// Re-exports
pub use amount_calculator::AmountCalculator;
pub use auction_calculator::{AuctionCalculator, GAS_PRICE_BASE, RATE_BUMP_DENOMINATOR};
pub use auction_details::{AuctionDetails, AuctionGasCostInfo, AuctionPoint};
pub use errors::AuctionError;
pub use fees::{
    FeeCalculator, Fees, IntegratorFee, ResolverFee, TakerFees, FEE_BASE_1E2, FEE_BASE_1E5,
};
pub use mul_div::{calc_making_amount, calc_taking_amount, mul_div, Rounding};
pub use whitelist::{AddressHalf, Whitelist, WhitelistItem};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

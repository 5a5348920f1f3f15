//! # Fixed-Point Helpers
//!
//! `a * b / x` with a 512-bit intermediate, so the product never wraps.

use crate::errors::AuctionError;
use cl_primitives::{U256, U512};

/// Rounding direction for [`mul_div`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Towards zero.
    #[default]
    Floor,
    /// Away from zero when a remainder exists.
    Ceil,
}

fn u256_to_u512(value: U256) -> U512 {
    let mut bytes = [0u8; 64];
    value.to_big_endian(&mut bytes[32..]);
    U512::from_big_endian(&bytes)
}

fn u512_to_u256(value: U512) -> Result<U256, AuctionError> {
    let mut bytes = [0u8; 64];
    value.to_big_endian(&mut bytes);
    if bytes[..32].iter().any(|b| *b != 0) {
        return Err(AuctionError::Overflow("mul_div"));
    }
    Ok(U256::from_big_endian(&bytes[32..]))
}

/// `a * b / x` rounded as requested.
pub fn mul_div(a: U256, b: U256, x: U256, rounding: Rounding) -> Result<U256, AuctionError> {
    if x.is_zero() {
        return Err(AuctionError::DivisionByZero("mul_div"));
    }
    let product = u256_to_u512(a) * u256_to_u512(b);
    let divisor = u256_to_u512(x);
    let (quotient, remainder) = product.div_mod(divisor);
    let quotient = match rounding {
        Rounding::Ceil if !remainder.is_zero() => quotient + U512::one(),
        _ => quotient,
    };
    u512_to_u256(quotient)
}

/// Taker amount owed for `swap_making_amount` of an order, rounded up.
pub fn calc_taking_amount(
    swap_making_amount: U256,
    order_making_amount: U256,
    order_taking_amount: U256,
) -> Result<U256, AuctionError> {
    mul_div(
        swap_making_amount,
        order_taking_amount,
        order_making_amount,
        Rounding::Ceil,
    )
}

/// Maker amount released for `swap_taking_amount` of an order, rounded down.
pub fn calc_making_amount(
    swap_taking_amount: U256,
    order_making_amount: U256,
    order_taking_amount: U256,
) -> Result<U256, AuctionError> {
    mul_div(
        swap_taking_amount,
        order_making_amount,
        order_taking_amount,
        Rounding::Floor,
    )
}

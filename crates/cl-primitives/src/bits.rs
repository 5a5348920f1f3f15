//! # Bit Masks
//!
//! Half-open bit ranges `[start, end)` over a 256-bit word.

use crate::errors::PrimitiveError;
use primitive_types::U256;

/// A contiguous bit range inside a `U256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitMask {
    /// First bit (inclusive).
    pub start: usize,
    /// Last bit (exclusive).
    pub end: usize,
}

impl BitMask {
    /// Range `[start, end)`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Single bit.
    #[must_use]
    pub const fn bit(index: usize) -> Self {
        Self {
            start: index,
            end: index + 1,
        }
    }

    /// Number of bits covered.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.end - self.start
    }

    /// Mask of `width` ones, unshifted.
    #[must_use]
    pub fn value_mask(&self) -> U256 {
        if self.width() >= 256 {
            U256::MAX
        } else {
            (U256::one() << self.width()) - 1
        }
    }

    /// Mask positioned over the range.
    #[must_use]
    pub fn mask(&self) -> U256 {
        self.value_mask() << self.start
    }

    /// Extracts the range as an integer.
    #[must_use]
    pub fn get(&self, word: U256) -> U256 {
        (word >> self.start) & self.value_mask()
    }

    /// Replaces the range with `value`; fails if `value` is wider than the range.
    pub fn set(&self, word: U256, value: U256) -> Result<U256, PrimitiveError> {
        if value > self.value_mask() {
            return Err(PrimitiveError::Overflow {
                bits: self.width(),
            });
        }
        Ok((word & !self.mask()) | (value << self.start))
    }

    /// True if any bit in the range is set.
    #[must_use]
    pub fn is_set(&self, word: U256) -> bool {
        !(word & self.mask()).is_zero()
    }
}

/// Sets or clears a single bit.
#[must_use]
pub fn with_bit(word: U256, index: usize, on: bool) -> U256 {
    let bit = U256::one() << index;
    if on {
        word | bit
    } else {
        word & !bit
    }
}

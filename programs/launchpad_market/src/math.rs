//! Checked integer arithmetic
//!
//! Every value in the program is an unsigned base-unit magnitude. Nothing
//! wraps: each step either produces an exact result or fails the whole
//! instruction with `ArithmeticOverflow`, `ArithmeticUnderflow` or
//! `DivisionByZero`.

use anchor_lang::prelude::*;

use crate::constants::BPS_DIVISOR;
use crate::errors::MarketError;

/// Checked arithmetic returning program errors instead of `Option`
pub trait SafeMath: Sized {
    fn safe_add(self, rhs: Self) -> Result<Self>;
    fn safe_sub(self, rhs: Self) -> Result<Self>;
    fn safe_mul(self, rhs: Self) -> Result<Self>;
    /// Floor division
    fn safe_div(self, rhs: Self) -> Result<Self>;
}

macro_rules! impl_safe_math {
    ($($t:ty),*) => {
        $(
            impl SafeMath for $t {
                fn safe_add(self, rhs: Self) -> Result<Self> {
                    self.checked_add(rhs)
                        .ok_or_else(|| error!(MarketError::ArithmeticOverflow))
                }

                fn safe_sub(self, rhs: Self) -> Result<Self> {
                    self.checked_sub(rhs)
                        .ok_or_else(|| error!(MarketError::ArithmeticUnderflow))
                }

                fn safe_mul(self, rhs: Self) -> Result<Self> {
                    self.checked_mul(rhs)
                        .ok_or_else(|| error!(MarketError::ArithmeticOverflow))
                }

                fn safe_div(self, rhs: Self) -> Result<Self> {
                    self.checked_div(rhs)
                        .ok_or_else(|| error!(MarketError::DivisionByZero))
                }
            }
        )*
    };
}

impl_safe_math!(u32, u64, u128);

/// `floor(value * numerator / denominator)` with a u128 intermediate
pub fn mul_div(value: u64, numerator: u64, denominator: u64) -> Result<u64> {
    let result = (value as u128)
        .safe_mul(numerator as u128)?
        .safe_div(denominator as u128)?;

    u64::try_from(result).map_err(|_| error!(MarketError::ArithmeticOverflow))
}

/// `floor(amount * bps / 10_000)`
pub fn bps_of(amount: u64, bps: u64) -> Result<u64> {
    mul_div(amount, bps, BPS_DIVISOR)
}

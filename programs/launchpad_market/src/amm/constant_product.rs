//! # Constant-Product Share Curve
//!
//! Each side of a market has a **virtual reserve**. Both start at
//! `INITIAL_Q`, and their product is pinned to a constant fixed at creation:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │              YES_reserve × NO_reserve = k                    │
//! │                                                              │
//! │   Where:                                                     │
//! │   • k = INITIAL_Q²  (computed once, never from live state)   │
//! │   • YES_reserve, NO_reserve = unissued virtual shares        │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Buying shares
//!
//! Depositing `L` (net of fees) on side S injects `L` into the *opposite*
//! reserve and withdraws S shares until the product is back on the curve:
//!
//! ```text
//! 1. other' = other + L
//! 2. side'  = floor(k / other')     (rounds toward the protocol)
//! 3. shares = side - side'          (must be > 0)
//! ```
//!
//! ## Prices
//!
//! ```text
//! YES_price = NO_reserve  / (YES_reserve + NO_reserve)
//! NO_price  = YES_reserve / (YES_reserve + NO_reserve)
//! ```
//!
//! Buying YES shrinks the YES reserve and grows the NO reserve, so the YES
//! price rises and the NO price falls. The two always sum to 1.

use anchor_lang::prelude::*;

use crate::constants::PRICE_PRECISION;
use crate::errors::MarketError;
use crate::math::SafeMath;

/// Result of pricing a buy against the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyQuote {
    /// Shares issued to the buyer
    pub shares_out: u64,
    /// Reserve of the bought side after the trade
    pub side_reserve_after: u64,
    /// Reserve of the opposite side after the trade
    pub other_reserve_after: u64,
}

/// Constant-product pricing over two virtual reserves
pub struct ConstantProductCurve;

impl ConstantProductCurve {
    /// The curve constant `k = initial_q²`
    pub fn invariant(initial_q: u64) -> Result<u128> {
        (initial_q as u128).safe_mul(initial_q as u128)
    }

    /// Price a deposit of `net_amount` on the side whose reserve is
    /// `side_reserve`.
    ///
    /// # Arguments
    /// * `side_reserve` - Current reserve of the side being bought
    /// * `other_reserve` - Current reserve of the opposite side
    /// * `k` - The market's fixed invariant
    /// * `net_amount` - Deposit after the trade fee
    ///
    /// # Example
    /// ```ignore
    /// // Balanced toy market: 1000 / 1000, k = 1_000_000
    /// let quote = ConstantProductCurve::quote_buy(1_000, 1_000, 1_000_000, 100)?;
    /// // other' = 1100, side' = 909, shares = 91
    /// ```
    pub fn quote_buy(
        side_reserve: u64,
        other_reserve: u64,
        k: u128,
        net_amount: u64,
    ) -> Result<BuyQuote> {
        require!(net_amount > 0, MarketError::InvalidTradeOutcome);

        // Step 1: the deposit lands in the opposite reserve
        let other_reserve_after = other_reserve.safe_add(net_amount)?;

        // Step 2: solve the invariant for the bought side, rounding down
        let side_reserve_after = k.safe_div(other_reserve_after as u128)?;
        let side_reserve_after = u64::try_from(side_reserve_after)
            .map_err(|_| error!(MarketError::ArithmeticOverflow))?;

        // Step 3: the buyer receives the difference
        require!(
            side_reserve_after < side_reserve,
            MarketError::InvalidTradeOutcome
        );
        let shares_out = side_reserve.safe_sub(side_reserve_after)?;

        Ok(BuyQuote {
            shares_out,
            side_reserve_after,
            other_reserve_after,
        })
    }

    /// Current `(yes_price, no_price)` scaled by `PRICE_PRECISION`
    pub fn prices(yes_reserve: u64, no_reserve: u64) -> Result<(u64, u64)> {
        let total = (yes_reserve as u128).safe_add(no_reserve as u128)?;

        let yes_price = (no_reserve as u128)
            .safe_mul(PRICE_PRECISION)?
            .safe_div(total)?;
        let no_price = PRICE_PRECISION.safe_sub(yes_price)?;

        Ok((yes_price as u64, no_price as u64))
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Participant Position
//!
//! One record per (market, wallet). A wallet commits to a single side of a
//! market: once it holds YES shares it can never hold NO shares there, and
//! the reverse.

use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::math::SafeMath;
use crate::state::Side;

/// A wallet's stake in one market
///
/// Seeds: ["position", market, owner]
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Position {
    /// Wallet that owns the shares
    pub owner: Pubkey,

    /// Market the shares belong to
    pub market: Pubkey,

    /// YES shares held
    pub yes_shares: u64,

    /// NO shares held
    pub no_shares: u64,

    /// Sum of gross deposits, before the trade fee
    pub total_invested: u64,

    /// Set once rewards have been claimed
    pub claimed: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl Position {
    pub const SEED: &'static [u8] = b"position";

    pub fn address(market: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED, market.as_ref(), owner.as_ref()], &crate::ID)
    }

    pub fn new(owner: Pubkey, market: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            market,
            bump,
            ..Default::default()
        }
    }

    /// True until the first shares are credited
    pub fn is_empty(&self) -> bool {
        self.yes_shares == 0 && self.no_shares == 0
    }

    /// The side this position is committed to, if any
    pub fn side(&self) -> Option<Side> {
        if self.yes_shares > 0 {
            Some(Side::Yes)
        } else if self.no_shares > 0 {
            Some(Side::No)
        } else {
            None
        }
    }

    pub fn shares(&self, side: Side) -> u64 {
        match side {
            Side::Yes => self.yes_shares,
            Side::No => self.no_shares,
        }
    }

    pub fn ensure_can_buy(&self, side: Side) -> Result<()> {
        match self.side() {
            Some(held) if held != side => err!(MarketError::AlreadyHasPosition),
            _ => Ok(()),
        }
    }

    /// Add freshly issued shares and the gross deposit that bought them
    pub fn credit(&mut self, side: Side, shares: u64, gross_amount: u64) -> Result<()> {
        self.ensure_can_buy(side)?;

        let held = self.shares(side).safe_add(shares)?;
        let total_invested = self.total_invested.safe_add(gross_amount)?;

        match side {
            Side::Yes => self.yes_shares = held,
            Side::No => self.no_shares = held,
        }
        self.total_invested = total_invested;
        Ok(())
    }
}

//! Protocol Treasury
//!
//! Singleton account that receives every protocol fee and holds it in
//! custody until the admin withdraws it.

use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::math::SafeMath;

/// Global fee ledger (singleton PDA)
///
/// Seeds: ["treasury"]
#[account]
#[derive(InitSpace, Debug)]
pub struct Treasury {
    /// Authority allowed to withdraw fees and rotate itself
    pub admin: Pubkey,

    /// Every fee ever collected: creation, trade, completion and close sweeps.
    /// Withdrawals do not reduce it.
    pub total_fees_accrued: u64,

    /// Every fee ever withdrawn
    pub total_fees_withdrawn: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Treasury {
    pub const SEED: &'static [u8] = b"treasury";

    pub fn address() -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED], &crate::ID)
    }

    pub fn new(admin: Pubkey, bump: u8) -> Self {
        Self {
            admin,
            total_fees_accrued: 0,
            total_fees_withdrawn: 0,
            bump,
        }
    }

    /// Record a fee that has been moved into treasury custody
    pub fn accrue(&mut self, fee: u64) -> Result<()> {
        self.total_fees_accrued = self.total_fees_accrued.safe_add(fee)?;
        Ok(())
    }

    /// Fees collected and not yet withdrawn
    pub fn withdrawable(&self) -> Result<u64> {
        self.total_fees_accrued.safe_sub(self.total_fees_withdrawn)
    }

    /// Validate and book a withdrawal.
    ///
    /// `custody_available` is what the treasury account can actually pay out
    /// without dropping below rent exemption.
    pub fn withdraw(&mut self, caller: &Pubkey, amount: u64, custody_available: u64) -> Result<()> {
        require_keys_eq!(*caller, self.admin, MarketError::Unauthorized);
        require!(
            amount <= self.withdrawable()? && amount <= custody_available,
            MarketError::InsufficientBalance
        );

        self.total_fees_withdrawn = self.total_fees_withdrawn.safe_add(amount)?;
        Ok(())
    }

    pub fn set_admin(&mut self, caller: &Pubkey, new_admin: Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.admin, MarketError::Unauthorized);
        self.admin = new_admin;
        Ok(())
    }
}

//! Fee Withdrawal
//!
//! The admin moves collected fees out of the treasury to any wallet.
//! `total_fees_accrued` keeps counting lifetime revenue; withdrawals are
//! tracked separately in `total_fees_withdrawn`.

use anchor_lang::prelude::*;

use crate::custody;
use crate::state::Treasury;

#[event]
pub struct FeesWithdrawn {
    pub admin: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub remaining: u64,
}

#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    /// Must match `treasury.admin`
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [Treasury::SEED],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    /// CHECK: any wallet chosen by the admin; it only receives lamports
    #[account(mut)]
    pub recipient: UncheckedAccount<'info>,
}

impl<'info> WithdrawFees<'info> {
    pub fn withdraw_fees(&mut self, amount: u64) -> Result<()> {
        let treasury_info = self.treasury.to_account_info();
        let custody_available = custody::spendable_lamports(&treasury_info)?;

        self.treasury
            .withdraw(&self.admin.key(), amount, custody_available)?;
        custody::move_lamports(&treasury_info, &self.recipient.to_account_info(), amount)?;

        let remaining = self.treasury.withdrawable()?;
        emit!(FeesWithdrawn {
            admin: self.admin.key(),
            recipient: self.recipient.key(),
            amount,
            remaining,
        });

        msg!("Withdrew {} lamports of fees, {} remaining", amount, remaining);

        Ok(())
    }
}

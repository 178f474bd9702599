//! Treasury Initialization
//!
//! Creates the fee treasury. Called once at deployment; the payer becomes
//! the admin.

use anchor_lang::prelude::*;

use crate::state::Treasury;

#[event]
pub struct TreasuryInitialized {
    pub treasury: Pubkey,
    pub admin: Pubkey,
}

/// Accounts required to create the treasury
#[derive(Accounts)]
pub struct InitTreasury<'info> {
    /// Pays rent and becomes the admin
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Treasury singleton (created)
    #[account(
        init,
        payer = admin,
        space = 8 + Treasury::INIT_SPACE,
        seeds = [Treasury::SEED],
        bump,
    )]
    pub treasury: Account<'info, Treasury>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitTreasury<'info> {
    pub fn init_treasury(&mut self, bumps: &InitTreasuryBumps) -> Result<()> {
        self.treasury
            .set_inner(Treasury::new(self.admin.key(), bumps.treasury));

        emit!(TreasuryInitialized {
            treasury: self.treasury.key(),
            admin: self.admin.key(),
        });

        msg!("Treasury initialized, admin: {}", self.admin.key());

        Ok(())
    }
}

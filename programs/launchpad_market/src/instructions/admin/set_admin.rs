use anchor_lang::prelude::*;

use crate::state::Treasury;

#[event]
pub struct AdminChanged {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
}

/// Hand treasury control to a new wallet
#[derive(Accounts)]
pub struct SetAdmin<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [Treasury::SEED],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,
}

impl<'info> SetAdmin<'info> {
    pub fn set_admin(&mut self, new_admin: Pubkey) -> Result<()> {
        let previous_admin = self.treasury.admin;
        self.treasury.set_admin(&self.admin.key(), new_admin)?;

        emit!(AdminChanged {
            previous_admin,
            new_admin,
        });

        msg!("Treasury admin: {} -> {}", previous_admin, new_admin);

        Ok(())
    }
}

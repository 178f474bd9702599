use anchor_lang::prelude::*;

use crate::custody;
use crate::errors::MarketError;
use crate::state::{Market, Treasury};

#[event]
pub struct MarketClosed {
    pub market: Pubkey,
    pub founder: Pubkey,
    pub swept_to_treasury: u64,
}

/// Reclaim the market's rent once every claim is settled. Rounding dust
/// left in the pool goes to the treasury as a fee.
#[derive(Accounts)]
pub struct CloseMarket<'info> {
    #[account(mut)]
    pub founder: Signer<'info>,

    #[account(
        mut,
        seeds = [Treasury::SEED],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(
        mut,
        close = founder,
        has_one = founder @ MarketError::Unauthorized,
        seeds = [
            Market::SEED,
            market.founder.as_ref(),
            &Market::question_seed(&market.question_identifier),
        ],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,
}

impl<'info> CloseMarket<'info> {
    pub fn close_market(&mut self) -> Result<()> {
        let clock = Clock::get()?;
        let dust = self.market.close_out(clock.unix_timestamp)?;

        custody::move_lamports(
            &self.market.to_account_info(),
            &self.treasury.to_account_info(),
            dust,
        )?;
        self.treasury.accrue(dust)?;

        emit!(MarketClosed {
            market: self.market.key(),
            founder: self.founder.key(),
            swept_to_treasury: dust,
        });

        msg!("Market {} closed, {} lamports swept", self.market.key(), dust);

        Ok(())
    }
}

//! Market Resolution
//!
//! Anyone may resolve a market once it has expired. The side with the larger
//! share supply wins; equal supplies refund everyone.
//!
//! ## Resolution Flow
//!
//! 1. Expiry passes
//! 2. Any wallet calls `resolve_market`
//! 3. On a YES or NO win the completion fee moves to the treasury
//! 4. Market transitions to `Resolved` and claims open

use anchor_lang::prelude::*;

use crate::custody;
use crate::state::{Market, Resolution, Treasury};

/// Event emitted when a market is resolved
#[event]
pub struct MarketResolved {
    pub market: Pubkey,
    pub resolution: Resolution,
    pub q_yes: u64,
    pub q_no: u64,
    pub completion_fee: u64,
    pub distribution_pool: u64,
    pub resolver: Pubkey,
    pub timestamp: i64,
}

#[derive(Accounts)]
pub struct ResolveMarket<'info> {
    pub resolver: Signer<'info>,

    #[account(
        mut,
        seeds = [Treasury::SEED],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(
        mut,
        seeds = [
            Market::SEED,
            market.founder.as_ref(),
            &Market::question_seed(&market.question_identifier),
        ],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,
}

impl<'info> ResolveMarket<'info> {
    pub fn resolve_market(&mut self) -> Result<()> {
        let clock = Clock::get()?;

        let receipt = self.market.resolve(clock.unix_timestamp)?;

        custody::move_lamports(
            &self.market.to_account_info(),
            &self.treasury.to_account_info(),
            receipt.completion_fee,
        )?;
        self.treasury.accrue(receipt.completion_fee)?;

        emit!(MarketResolved {
            market: self.market.key(),
            resolution: receipt.resolution,
            q_yes: self.market.q_yes,
            q_no: self.market.q_no,
            completion_fee: receipt.completion_fee,
            distribution_pool: receipt.distribution_pool,
            resolver: self.resolver.key(),
            timestamp: clock.unix_timestamp,
        });

        msg!(
            "Market {} resolved: {:?}",
            self.market.key(),
            receipt.resolution
        );

        Ok(())
    }
}

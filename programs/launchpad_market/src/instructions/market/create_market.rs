//! Market Creation
//!
//! A founder opens a market for a token idea. The market account is a PDA
//! of the founder and the question identifier, so one founder cannot open
//! the same question twice. The flat creation fee goes to the treasury.

use anchor_lang::prelude::*;

use crate::constants::CREATION_FEE_LAMPORTS;
use crate::custody;
use crate::state::{Market, Treasury};

/// Event emitted when a market is created
#[event]
pub struct MarketCreated {
    pub market: Pubkey,
    pub founder: Pubkey,
    pub question_identifier: String,
    pub target_pool: u64,
    pub expiry_time: i64,
    pub creation_fee: u64,
}

#[derive(Accounts)]
#[instruction(question_identifier: String)]
pub struct CreateMarket<'info> {
    #[account(mut)]
    pub founder: Signer<'info>,

    #[account(
        mut,
        seeds = [Treasury::SEED],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(
        init,
        payer = founder,
        space = 8 + Market::INIT_SPACE,
        seeds = [
            Market::SEED,
            founder.key().as_ref(),
            &Market::question_seed(&question_identifier),
        ],
        bump,
    )]
    pub market: Account<'info, Market>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreateMarket<'info> {
    pub fn create_market(
        &mut self,
        question_identifier: String,
        target_pool: u64,
        expiry_time: i64,
        metadata_uri: String,
        bumps: &CreateMarketBumps,
    ) -> Result<()> {
        let clock = Clock::get()?;

        self.market.set_inner(Market::open(
            self.founder.key(),
            question_identifier,
            metadata_uri,
            target_pool,
            expiry_time,
            clock.unix_timestamp,
            bumps.market,
        )?);

        custody::deposit_lamports(
            self.system_program.to_account_info(),
            self.founder.to_account_info(),
            self.treasury.to_account_info(),
            CREATION_FEE_LAMPORTS,
        )?;
        self.treasury.accrue(CREATION_FEE_LAMPORTS)?;

        emit!(MarketCreated {
            market: self.market.key(),
            founder: self.founder.key(),
            question_identifier: self.market.question_identifier.clone(),
            target_pool,
            expiry_time,
            creation_fee: CREATION_FEE_LAMPORTS,
        });

        msg!(
            "Market created: {} (target {} lamports, expires {})",
            self.market.question_identifier,
            target_pool,
            expiry_time
        );

        Ok(())
    }
}

//! Share Purchase
//!
//! Buys YES or NO shares on the constant-product curve. The trade fee is
//! split off first and sent to the treasury; the net amount goes into the
//! market pool and is priced against the curve.

use anchor_lang::prelude::*;

use crate::custody;
use crate::state::{Market, Position, Side, Treasury};

/// Event emitted when shares are bought
#[event]
pub struct SharesBought {
    pub market: Pubkey,
    pub buyer: Pubkey,
    pub side: Side,
    pub amount: u64,
    pub fee: u64,
    pub shares_out: u64,
    pub yes_price: u64,
    pub no_price: u64,
    pub pool_balance: u64,
}

#[derive(Accounts)]
pub struct Buy<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

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

    /// Created on the buyer's first purchase in this market
    #[account(
        init_if_needed,
        payer = buyer,
        space = 8 + Position::INIT_SPACE,
        seeds = [Position::SEED, market.key().as_ref(), buyer.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, Position>,

    pub system_program: Program<'info, System>,
}

impl<'info> Buy<'info> {
    /// Returns the number of shares issued
    pub fn buy(&mut self, side: Side, amount: u64, bumps: &BuyBumps) -> Result<u64> {
        let clock = Clock::get()?;

        if self.position.owner == Pubkey::default() {
            self.position.set_inner(Position::new(
                self.buyer.key(),
                self.market.key(),
                bumps.position,
            ));
        }

        let receipt = self
            .market
            .buy(&mut self.position, side, amount, clock.unix_timestamp)?;

        custody::deposit_lamports(
            self.system_program.to_account_info(),
            self.buyer.to_account_info(),
            self.treasury.to_account_info(),
            receipt.fee,
        )?;
        custody::deposit_lamports(
            self.system_program.to_account_info(),
            self.buyer.to_account_info(),
            self.market.to_account_info(),
            receipt.net_amount,
        )?;
        self.treasury.accrue(receipt.fee)?;

        let (yes_price, no_price) = self.market.prices()?;
        emit!(SharesBought {
            market: self.market.key(),
            buyer: self.buyer.key(),
            side,
            amount,
            fee: receipt.fee,
            shares_out: receipt.shares_out,
            yes_price,
            no_price,
            pool_balance: self.market.pool_balance,
        });

        msg!(
            "Bought {} {:?} shares for {} lamports (fee {})",
            receipt.shares_out,
            side,
            amount,
            receipt.fee
        );

        Ok(receipt.shares_out)
    }
}

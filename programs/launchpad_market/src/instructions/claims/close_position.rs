use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::state::Position;

#[event]
pub struct PositionClosed {
    pub market: Pubkey,
    pub owner: Pubkey,
}

/// Return a claimed position's rent to its owner
#[derive(Accounts)]
pub struct ClosePosition<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        close = owner,
        has_one = owner @ MarketError::Unauthorized,
        constraint = position.claimed @ MarketError::CannotClosePosition,
        seeds = [Position::SEED, position.market.as_ref(), owner.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Account<'info, Position>,
}

impl<'info> ClosePosition<'info> {
    pub fn close_position(&mut self) -> Result<()> {
        emit!(PositionClosed {
            market: self.position.market,
            owner: self.owner.key(),
        });

        msg!("Position closed for {}", self.owner.key());

        Ok(())
    }
}

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody;
use crate::errors::MarketError;
use crate::state::Market;

#[event]
pub struct TeamTokensClaimed {
    pub market: Pubkey,
    pub founder: Pubkey,
    pub amount: u64,
    pub total_claimed: u64,
}

/// Pay out the founder's unlocked team allocation
#[derive(Accounts)]
pub struct ClaimTeamTokens<'info> {
    pub founder: Signer<'info>,

    #[account(
        mut,
        has_one = founder @ MarketError::Unauthorized,
        seeds = [
            Market::SEED,
            market.founder.as_ref(),
            &Market::question_seed(&market.question_identifier),
        ],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub market_token_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub founder_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> ClaimTeamTokens<'info> {
    pub fn claim_team_tokens(&mut self) -> Result<()> {
        let clock = Clock::get()?;

        let launch = self
            .market
            .token_launch
            .ok_or(MarketError::LaunchNotRegistered)?;
        custody::verify_launch_accounts(
            &launch,
            &self.market.key(),
            &self.token_mint,
            &self.market_token_vault,
            &self.founder_token_account,
            &self.founder.key(),
        )?;

        let amount = self.market.claim_team_tokens(clock.unix_timestamp)?;

        custody::release_from_market(
            &self.market,
            self.token_program.to_account_info(),
            self.market_token_vault.to_account_info(),
            self.token_mint.to_account_info(),
            self.founder_token_account.to_account_info(),
            amount,
            launch.decimals,
        )?;

        let total_claimed = self
            .market
            .token_launch
            .map(|launch| launch.team_claimed)
            .unwrap_or_default();
        emit!(TeamTokensClaimed {
            market: self.market.key(),
            founder: self.founder.key(),
            amount,
            total_claimed,
        });

        msg!("Team claimed {} tokens ({} total)", amount, total_claimed);

        Ok(())
    }
}

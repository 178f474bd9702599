use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody;
use crate::errors::MarketError;
use crate::state::{Market, Treasury};

#[event]
pub struct PlatformTokensClaimed {
    pub market: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
}

/// Send the platform's share of a launch to the treasury admin.
/// Anyone may crank this.
#[derive(Accounts)]
pub struct ClaimPlatformTokens<'info> {
    pub payer: Signer<'info>,

    #[account(
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

    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub market_token_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub platform_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> ClaimPlatformTokens<'info> {
    pub fn claim_platform_tokens(&mut self) -> Result<()> {
        let launch = self
            .market
            .token_launch
            .ok_or(MarketError::LaunchNotRegistered)?;
        custody::verify_launch_accounts(
            &launch,
            &self.market.key(),
            &self.token_mint,
            &self.market_token_vault,
            &self.platform_token_account,
            &self.treasury.admin,
        )?;

        let amount = self.market.claim_platform_tokens()?;

        custody::release_from_market(
            &self.market,
            self.token_program.to_account_info(),
            self.market_token_vault.to_account_info(),
            self.token_mint.to_account_info(),
            self.platform_token_account.to_account_info(),
            amount,
            launch.decimals,
        )?;

        emit!(PlatformTokensClaimed {
            market: self.market.key(),
            recipient: self.platform_token_account.key(),
            amount,
        });

        msg!("Platform claimed {} tokens", amount);

        Ok(())
    }
}

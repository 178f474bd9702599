//! Launch Registration
//!
//! Once a market resolves YES, the founder launches the token elsewhere and
//! deposits its supply into the market's vault. In exchange the founder
//! receives the pool (the launch capital). The deposited supply is split:
//!
//! ```text
//! platform        2%
//! team immediate  8%
//! team vested    25%   (linear over 360 days)
//! YES holders    65%   (plus rounding remainder)
//! ```

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::custody;
use crate::errors::MarketError;
use crate::state::Market;

#[event]
pub struct LaunchRegistered {
    pub market: Pubkey,
    pub mint: Pubkey,
    pub total_tokens: u64,
    pub voter_tokens: u64,
    pub launch_capital: u64,
}

#[derive(Accounts)]
pub struct RegisterLaunch<'info> {
    #[account(mut)]
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

    /// The launched token
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Founder's source of the launched supply
    #[account(
        mut,
        constraint = founder_token_account.mint == token_mint.key() @ MarketError::InvalidTokenAccount,
        constraint = founder_token_account.owner == founder.key() @ MarketError::InvalidTokenAccount,
    )]
    pub founder_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Market's vault for the launched token
    #[account(
        init_if_needed,
        payer = founder,
        associated_token::mint = token_mint,
        associated_token::authority = market,
        associated_token::token_program = token_program,
    )]
    pub market_token_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> RegisterLaunch<'info> {
    pub fn register_launch(&mut self, total_tokens: u64) -> Result<()> {
        let clock = Clock::get()?;

        let launch_capital = self.market.register_launch(
            self.token_mint.key(),
            self.token_mint.decimals,
            total_tokens,
            clock.unix_timestamp,
        )?;

        let vault_before = self.market_token_vault.amount;
        custody::transfer_tokens(
            self.token_program.to_account_info(),
            self.founder_token_account.to_account_info(),
            self.token_mint.to_account_info(),
            self.market_token_vault.to_account_info(),
            self.founder.to_account_info(),
            total_tokens,
            self.token_mint.decimals,
        )?;

        // Transfer-fee mints deliver less than was sent
        self.market_token_vault.reload()?;
        let received = self.market_token_vault.amount.saturating_sub(vault_before);
        require!(received >= total_tokens, MarketError::InvalidLaunchAmount);

        custody::move_lamports(
            &self.market.to_account_info(),
            &self.founder.to_account_info(),
            launch_capital,
        )?;

        let voter_tokens = self
            .market
            .token_launch
            .map(|launch| launch.voter_tokens)
            .unwrap_or_default();
        emit!(LaunchRegistered {
            market: self.market.key(),
            mint: self.token_mint.key(),
            total_tokens,
            voter_tokens,
            launch_capital,
        });

        msg!(
            "Launch registered: {} tokens of {}, {} lamports to founder",
            total_tokens,
            self.token_mint.key(),
            launch_capital
        );

        Ok(())
    }
}

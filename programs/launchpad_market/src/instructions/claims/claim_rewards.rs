//! Reward Claims
//!
//! After resolution each position claims exactly once:
//!
//! ```text
//! NoWins:  lamports = no_shares  / issued_no  * distribution_pool
//! YesWins: tokens   = yes_shares / issued_yes * voter_tokens
//!          (lamports of distribution_pool if the launch window lapsed)
//! Refund:  lamports = total_invested * (1 - trade fee rate)
//! losing side: nothing, but the claim still succeeds
//! ```
//!
//! Token accounts are only needed for a YES win and are passed as optional
//! accounts.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody;
use crate::errors::MarketError;
use crate::settlement::Payout;
use crate::state::{Market, Position};

#[event]
pub struct RewardsClaimed {
    pub market: Pubkey,
    pub claimant: Pubkey,
    pub lamports: u64,
    pub tokens: u64,
}

#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    #[account(mut)]
    pub claimant: Signer<'info>,

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

    /// CHECK: address is pinned by the seeds; ownership and contents are
    /// checked in the handler so a missing position reports `PositionNotFound`
    #[account(
        mut,
        seeds = [Position::SEED, market.key().as_ref(), claimant.key().as_ref()],
        bump,
    )]
    pub position: UncheckedAccount<'info>,

    pub token_mint: Option<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub market_token_vault: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub claimant_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Option<Interface<'info, TokenInterface>>,
}

impl<'info> ClaimRewards<'info> {
    pub fn claim_rewards(&mut self) -> Result<()> {
        let position_info = self.position.to_account_info();
        require!(
            *position_info.owner == crate::ID && !position_info.data_is_empty(),
            MarketError::PositionNotFound
        );
        let mut position = Position::try_deserialize(&mut &position_info.try_borrow_data()?[..])?;

        let clock = Clock::get()?;
        let payout = self.market.claim(&mut position, clock.unix_timestamp)?;
        position.try_serialize(&mut &mut position_info.try_borrow_mut_data()?[..])?;

        let (lamports, tokens) = match payout {
            Payout::Nothing => (0, 0),
            Payout::Lamports(lamports) => {
                custody::move_lamports(
                    &self.market.to_account_info(),
                    &self.claimant.to_account_info(),
                    lamports,
                )?;
                (lamports, 0)
            }
            Payout::Tokens(tokens) => {
                self.release_voter_tokens(tokens)?;
                (0, tokens)
            }
        };

        emit!(RewardsClaimed {
            market: self.market.key(),
            claimant: self.claimant.key(),
            lamports,
            tokens,
        });

        msg!(
            "Claimed {} lamports and {} tokens for {}",
            lamports,
            tokens,
            self.claimant.key()
        );

        Ok(())
    }

    fn release_voter_tokens(&self, amount: u64) -> Result<()> {
        let launch = self
            .market
            .token_launch
            .ok_or(MarketError::LaunchNotRegistered)?;

        let (Some(mint), Some(vault), Some(destination), Some(token_program)) = (
            self.token_mint.as_ref(),
            self.market_token_vault.as_ref(),
            self.claimant_token_account.as_ref(),
            self.token_program.as_ref(),
        ) else {
            return err!(MarketError::MissingTokenAccounts);
        };

        custody::verify_launch_accounts(
            &launch,
            &self.market.key(),
            mint,
            vault,
            destination,
            &self.claimant.key(),
        )?;

        custody::release_from_market(
            &self.market,
            token_program.to_account_info(),
            vault.to_account_info(),
            mint.to_account_info(),
            destination.to_account_info(),
            amount,
            launch.decimals,
        )
    }
}

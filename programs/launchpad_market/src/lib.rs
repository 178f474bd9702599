//! # Launchpad Market: Prediction Markets for Token Launches
//!
//! Founders propose a token; the crowd votes with SOL by buying YES or NO
//! shares before the market expires.
//!
//! ## Overview
//!
//! - Shares are priced on a constant-product curve, one virtual reserve per side.
//! - At expiry the side with more shares issued wins; a tie refunds everyone.
//! - NO wins: NO holders split the pool.
//! - YES wins: the founder takes the pool to launch the token and deposits the
//!   launched supply, which YES holders claim pro-rata.
//!
//! All protocol fees (creation, trade, completion) accrue in a single
//! treasury PDA controlled by an admin.

use anchor_lang::prelude::*;

pub mod amm;
pub mod constants;
pub mod custody;
pub mod errors;
pub mod instructions;
pub mod math;
pub mod settlement;
pub mod state;

pub use amm::*;
pub use instructions::*;
pub use state::Side;

declare_id!("FHFqjNGzKuXYjB212SXWFRm6N1jxsYFzjZT1ceBd7fkY");

#[program]
pub mod launchpad_market {
    use super::*;

    /// Create the fee treasury; the signer becomes admin
    pub fn init_treasury(ctx: Context<InitTreasury>) -> Result<()> {
        ctx.accounts.init_treasury(&ctx.bumps)
    }

    /// Rotate the treasury admin
    pub fn set_admin(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
        ctx.accounts.set_admin(new_admin)
    }

    /// Withdraw accrued fees to any wallet (admin only)
    pub fn withdraw_fees(ctx: Context<WithdrawFees>, amount: u64) -> Result<()> {
        ctx.accounts.withdraw_fees(amount)
    }

    /// Open a market for a token idea (permissionless, pays the creation fee)
    pub fn create_market(
        ctx: Context<CreateMarket>,
        question_identifier: String,
        target_pool: u64,
        expiry_time: i64,
        metadata_uri: String,
    ) -> Result<()> {
        ctx.accounts.create_market(
            question_identifier,
            target_pool,
            expiry_time,
            metadata_uri,
            &ctx.bumps,
        )
    }

    /// Buy YES or NO shares; returns the number of shares issued
    pub fn buy(ctx: Context<Buy>, side: Side, amount: u64) -> Result<u64> {
        ctx.accounts.buy(side, amount, &ctx.bumps)
    }

    /// Settle an expired market (permissionless)
    pub fn resolve_market(ctx: Context<ResolveMarket>) -> Result<()> {
        ctx.accounts.resolve_market()
    }

    /// Claim a position's payout, once
    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        ctx.accounts.claim_rewards()
    }

    /// Deposit the launched supply after a YES win and take the launch capital
    pub fn register_launch(ctx: Context<RegisterLaunch>, total_tokens: u64) -> Result<()> {
        ctx.accounts.register_launch(total_tokens)
    }

    /// Send the platform's token share to the treasury admin
    pub fn claim_platform_tokens(ctx: Context<ClaimPlatformTokens>) -> Result<()> {
        ctx.accounts.claim_platform_tokens()
    }

    /// Pay out the founder's unlocked team tokens
    pub fn claim_team_tokens(ctx: Context<ClaimTeamTokens>) -> Result<()> {
        ctx.accounts.claim_team_tokens()
    }

    /// Reclaim rent from a claimed position
    pub fn close_position(ctx: Context<ClosePosition>) -> Result<()> {
        ctx.accounts.close_position()
    }

    /// Reclaim rent from a fully settled market
    pub fn close_market(ctx: Context<CloseMarket>) -> Result<()> {
        ctx.accounts.close_market()
    }
}

//! # Settlement
//!
//! Everything that happens to a market after trading stops:
//!
//! ```text
//!   Active ──resolve──▶ Resolved(YesWins) ──register_launch──▶ token claims
//!                   │                    └─launch window lapses─▶ lamport claims
//!                   ├─▶ Resolved(NoWins)  ──▶ lamport claims (pro-rata)
//!                   └─▶ Resolved(Refund)  ──▶ lamport claims (deposit - trade fee)
//! ```
//!
//! Resolution compares share supplies, not deposited value. Pro-rata payouts
//! divide a snapshot taken at resolution, so the order in which holders claim
//! never changes what any of them receives. Every division floors, which
//! leaves any rounding dust in the pool.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::MarketError;
use crate::math::{bps_of, mul_div, SafeMath};
use crate::state::{Market, MarketPhase, Position, Resolution, Side, TokenLaunch};

/// What a claim pays out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payout {
    /// Losing side: the claim succeeds and transfers nothing
    Nothing,
    /// Lamports from the market pool
    Lamports(u64),
    /// Launched tokens from the market's token vault
    Tokens(u64),
}

/// Outcome of resolving a market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionReceipt {
    pub resolution: Resolution,
    pub completion_fee: u64,
    pub distribution_pool: u64,
}

/// Launched supply split into its allocations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAllocation {
    pub platform: u64,
    pub team_immediate: u64,
    pub team_vesting: u64,
    /// Remainder after the other three, so the parts always sum to the total
    pub voters: u64,
}

impl TokenAllocation {
    pub fn split(total_tokens: u64) -> Result<Self> {
        let platform = bps_of(total_tokens, PLATFORM_TOKEN_SHARE_BPS)?;
        let team_immediate = bps_of(total_tokens, TEAM_IMMEDIATE_SHARE_BPS)?;
        let team_vesting = bps_of(total_tokens, TEAM_VESTED_SHARE_BPS)?;
        let voters = total_tokens
            .safe_sub(platform)?
            .safe_sub(team_immediate)?
            .safe_sub(team_vesting)?;

        Ok(Self {
            platform,
            team_immediate,
            team_vesting,
            voters,
        })
    }
}

/// Larger share supply wins; a tie refunds
pub fn determine_resolution(q_yes: u64, q_no: u64) -> Resolution {
    use std::cmp::Ordering;

    match q_yes.cmp(&q_no) {
        Ordering::Greater => Resolution::YesWins,
        Ordering::Less => Resolution::NoWins,
        Ordering::Equal => Resolution::Refund,
    }
}

pub fn completion_fee(resolution: Resolution, pool_balance: u64) -> Result<u64> {
    match resolution {
        Resolution::Refund => Ok(0),
        Resolution::YesWins | Resolution::NoWins => bps_of(pool_balance, COMPLETION_FEE_BPS),
    }
}

/// `floor(holder_shares * amount / total_shares)`
pub fn pro_rata(holder_shares: u64, total_shares: u64, amount: u64) -> Result<u64> {
    mul_div(holder_shares, amount, total_shares)
}

/// Gross deposits minus the trade fee rate
pub fn refund_amount(total_invested: u64) -> Result<u64> {
    mul_div(
        total_invested,
        BPS_DIVISOR.safe_sub(TRADE_FEE_BPS)?,
        BPS_DIVISOR,
    )
}

/// Portion of `vesting_tokens` unlocked `now`, linear from `start`
pub fn vested_amount(vesting_tokens: u64, start: i64, now: i64) -> Result<u64> {
    let elapsed = now.saturating_sub(start);
    if elapsed <= 0 {
        return Ok(0);
    }
    if elapsed >= TEAM_VESTING_DURATION {
        return Ok(vesting_tokens);
    }
    mul_div(vesting_tokens, elapsed as u64, TEAM_VESTING_DURATION as u64)
}

impl Market {
    /// Close trading and fix the outcome. Anyone may call this after expiry.
    pub fn resolve(&mut self, now: i64) -> Result<ResolutionReceipt> {
        require!(self.is_active(), MarketError::AlreadyResolved);
        require!(now >= self.expiry_time, MarketError::MarketNotExpired);

        let resolution = determine_resolution(self.q_yes, self.q_no);
        let completion_fee = completion_fee(resolution, self.pool_balance)?;
        let distribution_pool = self.pool_balance.safe_sub(completion_fee)?;

        self.pool_balance = distribution_pool;
        self.distribution_pool = distribution_pool;
        self.phase = MarketPhase::Resolved(resolution);
        self.resolved_at = now;

        Ok(ResolutionReceipt {
            resolution,
            completion_fee,
            distribution_pool,
        })
    }

    /// Whether a YES win has gone unlaunched for longer than [`LAUNCH_WINDOW`]
    pub fn launch_window_closed(&self, now: i64) -> bool {
        self.resolution() == Some(Resolution::YesWins)
            && self.token_launch.is_none()
            && now >= self.resolved_at.saturating_add(LAUNCH_WINDOW)
    }

    /// Settle one position. Succeeds at most once per position.
    pub fn claim(&mut self, position: &mut Position, now: i64) -> Result<Payout> {
        let resolution = self.resolution().ok_or(MarketError::MarketNotResolved)?;
        require!(!position.claimed, MarketError::AlreadyClaimed);

        let payout = match resolution {
            Resolution::NoWins if position.no_shares > 0 => Payout::Lamports(pro_rata(
                position.no_shares,
                self.issued_shares(Side::No)?,
                self.distribution_pool,
            )?),
            Resolution::YesWins if position.yes_shares > 0 => {
                let issued = self.issued_shares(Side::Yes)?;
                match self.token_launch {
                    Some(launch) => Payout::Tokens(pro_rata(
                        position.yes_shares,
                        issued,
                        launch.voter_tokens,
                    )?),
                    // founder never launched: YES holders take the pool back
                    None if self.launch_window_closed(now) => Payout::Lamports(pro_rata(
                        position.yes_shares,
                        issued,
                        self.distribution_pool,
                    )?),
                    None => return err!(MarketError::LaunchNotRegistered),
                }
            }
            Resolution::Refund => Payout::Lamports(refund_amount(position.total_invested)?),
            _ => Payout::Nothing,
        };

        let pool_balance = match payout {
            Payout::Lamports(lamports) => self.pool_balance.safe_sub(lamports)?,
            Payout::Nothing | Payout::Tokens(_) => self.pool_balance,
        };
        let open_positions = self.open_positions.safe_sub(1)?;

        self.pool_balance = pool_balance;
        self.open_positions = open_positions;
        position.claimed = true;

        Ok(payout)
    }

    /// Record the founder's token deposit and release the launch capital.
    ///
    /// The voter share must cover at least one token per issued YES share,
    /// so every YES holder receives a non-zero amount.
    ///
    /// Returns the lamports owed to the founder.
    pub fn register_launch(
        &mut self,
        mint: Pubkey,
        decimals: u8,
        total_tokens: u64,
        now: i64,
    ) -> Result<u64> {
        require!(
            self.resolution() == Some(Resolution::YesWins),
            MarketError::InvalidResolutionState
        );
        require!(
            self.token_launch.is_none(),
            MarketError::LaunchAlreadyRegistered
        );
        require!(total_tokens > 0, MarketError::InvalidLaunchAmount);
        require!(
            !self.launch_window_closed(now),
            MarketError::LaunchWindowClosed
        );

        let allocation = TokenAllocation::split(total_tokens)?;
        require!(
            allocation.voters >= self.issued_shares(Side::Yes)?,
            MarketError::LaunchSupplyTooSmall
        );
        let launch_capital = self.pool_balance;

        self.token_launch = Some(TokenLaunch {
            mint,
            decimals,
            launched_at: now,
            voter_tokens: allocation.voters,
            platform_tokens: allocation.platform,
            platform_claimed: false,
            team_immediate_tokens: allocation.team_immediate,
            team_vesting_tokens: allocation.team_vesting,
            team_claimed: 0,
        });
        self.pool_balance = 0;

        Ok(launch_capital)
    }

    pub fn claim_platform_tokens(&mut self) -> Result<u64> {
        let launch = self
            .token_launch
            .as_mut()
            .ok_or(MarketError::LaunchNotRegistered)?;
        require!(!launch.platform_claimed, MarketError::AlreadyClaimed);

        launch.platform_claimed = true;
        Ok(launch.platform_tokens)
    }

    /// Immediate share plus whatever has vested, minus what was already taken
    pub fn claim_team_tokens(&mut self, now: i64) -> Result<u64> {
        let launch = self
            .token_launch
            .as_mut()
            .ok_or(MarketError::LaunchNotRegistered)?;

        let unlocked = launch.team_immediate_tokens.safe_add(vested_amount(
            launch.team_vesting_tokens,
            launch.launched_at,
            now,
        )?)?;
        let claimable = unlocked.safe_sub(launch.team_claimed)?;
        require!(claimable > 0, MarketError::NothingToClaim);

        launch.team_claimed = launch.team_claimed.safe_add(claimable)?;
        Ok(claimable)
    }

    /// Check the market can be closed and take the residual pool.
    ///
    /// Returns the dust to sweep into the treasury.
    pub fn close_out(&mut self, now: i64) -> Result<u64> {
        let resolution = self.resolution().ok_or(MarketError::MarketNotResolved)?;
        require!(self.open_positions == 0, MarketError::OpenPositionsRemain);

        if resolution == Resolution::YesWins {
            match self.token_launch {
                Some(launch) => require!(
                    launch.platform_claimed && launch.team_claimed == launch.team_allocation()?,
                    MarketError::LaunchNotSettled
                ),
                None => require!(
                    self.launch_window_closed(now),
                    MarketError::LaunchNotSettled
                ),
            }
        }

        let dust = self.pool_balance;
        self.pool_balance = 0;
        Ok(dust)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

    const NOW: i64 = 1_700_000_000;
    const EXPIRY: i64 = NOW + 3_600;
    const SUPPLY: u64 = 1_000_000_000_000_000;

    fn market() -> Market {
        Market::open(
            Pubkey::new_unique(),
            "question".to_string(),
            String::new(),
            5 * LAMPORTS_PER_SOL,
            EXPIRY,
            NOW,
            255,
        )
        .unwrap()
    }

    fn buy(market: &mut Market, side: Side, amount: u64) -> Position {
        let mut position = Position::new(Pubkey::new_unique(), Pubkey::new_unique(), 1);
        market.buy(&mut position, side, amount, NOW).unwrap();
        position
    }

    #[test]
    fn test_resolution_rule() {
        assert_eq!(determine_resolution(2, 1), Resolution::YesWins);
        assert_eq!(determine_resolution(1, 2), Resolution::NoWins);
        assert_eq!(determine_resolution(7, 7), Resolution::Refund);
    }

    #[test]
    fn test_completion_fee_only_on_a_win() {
        assert_eq!(completion_fee(Resolution::YesWins, 1_000_000).unwrap(), 50_000);
        assert_eq!(completion_fee(Resolution::NoWins, 1_000_000).unwrap(), 50_000);
        assert_eq!(completion_fee(Resolution::Refund, 1_000_000).unwrap(), 0);
    }

    #[test]
    fn test_refund_deducts_trade_fee_rate() {
        assert_eq!(refund_amount(10_000_000).unwrap(), 9_850_000);
        assert_eq!(refund_amount(0).unwrap(), 0);
    }

    #[test]
    fn test_token_split_sums_to_total() {
        let allocation = TokenAllocation::split(1_000_000_000).unwrap();
        assert_eq!(allocation.platform, 20_000_000);
        assert_eq!(allocation.team_immediate, 80_000_000);
        assert_eq!(allocation.team_vesting, 250_000_000);
        assert_eq!(allocation.voters, 650_000_000);

        // Rounding dust always lands with the voters
        let odd = TokenAllocation::split(999).unwrap();
        assert_eq!(
            odd.platform + odd.team_immediate + odd.team_vesting + odd.voters,
            999
        );
    }

    #[test]
    fn test_vesting_is_linear_and_capped() {
        assert_eq!(vested_amount(1_000, NOW, NOW - 10).unwrap(), 0);
        assert_eq!(vested_amount(1_000, NOW, NOW).unwrap(), 0);
        assert_eq!(
            vested_amount(1_000, NOW, NOW + TEAM_VESTING_DURATION / 2).unwrap(),
            500
        );
        assert_eq!(
            vested_amount(1_000, NOW, NOW + TEAM_VESTING_DURATION * 3).unwrap(),
            1_000
        );
    }

    #[test]
    fn test_resolve_before_expiry_is_rejected() {
        let mut market = market();
        assert_eq!(
            market.resolve(EXPIRY - 1).unwrap_err(),
            MarketError::MarketNotExpired.into()
        );
        assert!(market.is_active());
    }

    #[test]
    fn test_second_resolve_is_rejected() {
        let mut market = market();
        buy(&mut market, Side::No, LAMPORTS_PER_SOL);
        let first = market.resolve(EXPIRY).unwrap();
        let snapshot = market.pool_balance;

        assert_eq!(
            market.resolve(EXPIRY + 100).unwrap_err(),
            MarketError::AlreadyResolved.into()
        );
        assert_eq!(market.resolution(), Some(first.resolution));
        assert_eq!(market.pool_balance, snapshot);
    }

    #[test]
    fn test_no_win_pays_pro_rata_regardless_of_claim_order() {
        let mut market = market();
        let mut big = buy(&mut market, Side::No, 2 * LAMPORTS_PER_SOL);
        let mut small = buy(&mut market, Side::No, LAMPORTS_PER_SOL);
        let mut loser = buy(&mut market, Side::Yes, MIN_INVESTMENT_LAMPORTS);

        let receipt = market.resolve(EXPIRY).unwrap();
        assert_eq!(receipt.resolution, Resolution::NoWins);
        let issued_no = market.issued_shares(Side::No).unwrap();

        let small_payout = market.claim(&mut small, EXPIRY).unwrap();
        let big_payout = market.claim(&mut big, EXPIRY).unwrap();

        assert_eq!(
            small_payout,
            Payout::Lamports(pro_rata(small.no_shares, issued_no, receipt.distribution_pool).unwrap())
        );
        assert_eq!(
            big_payout,
            Payout::Lamports(pro_rata(big.no_shares, issued_no, receipt.distribution_pool).unwrap())
        );
        assert_eq!(market.claim(&mut loser, EXPIRY).unwrap(), Payout::Nothing);
        assert!(loser.claimed);
        assert_eq!(market.open_positions, 0);
    }

    #[test]
    fn test_claim_is_at_most_once() {
        let mut market = market();
        let mut position = buy(&mut market, Side::No, LAMPORTS_PER_SOL);
        market.resolve(EXPIRY).unwrap();

        market.claim(&mut position, EXPIRY).unwrap();
        let pool_after_first = market.pool_balance;

        assert_eq!(
            market.claim(&mut position, EXPIRY).unwrap_err(),
            MarketError::AlreadyClaimed.into()
        );
        assert_eq!(market.pool_balance, pool_after_first);
    }

    #[test]
    fn test_claim_before_resolution_is_rejected() {
        let mut market = market();
        let mut position = buy(&mut market, Side::Yes, LAMPORTS_PER_SOL);

        assert_eq!(
            market.claim(&mut position, EXPIRY).unwrap_err(),
            MarketError::MarketNotResolved.into()
        );
        assert!(!position.claimed);
    }

    #[test]
    fn test_yes_claim_waits_for_launch() {
        let mut market = market();
        let mut position = buy(&mut market, Side::Yes, LAMPORTS_PER_SOL);
        market.resolve(EXPIRY).unwrap();

        assert_eq!(
            market.claim(&mut position, EXPIRY).unwrap_err(),
            MarketError::LaunchNotRegistered.into()
        );
        assert!(!position.claimed);
    }

    #[test]
    fn test_launch_only_after_yes_win() {
        let mut market = market();
        buy(&mut market, Side::No, LAMPORTS_PER_SOL);
        market.resolve(EXPIRY).unwrap();

        assert_eq!(
            market
                .register_launch(Pubkey::new_unique(), 6, 1_000, EXPIRY)
                .unwrap_err(),
            MarketError::InvalidResolutionState.into()
        );
    }

    #[test]
    fn test_launch_releases_capital_once() {
        let mut market = market();
        buy(&mut market, Side::Yes, LAMPORTS_PER_SOL);
        let receipt = market.resolve(EXPIRY).unwrap();
        let mint = Pubkey::new_unique();

        assert_eq!(
            market.register_launch(mint, 6, 0, EXPIRY).unwrap_err(),
            MarketError::InvalidLaunchAmount.into()
        );
        let capital = market.register_launch(mint, 6, SUPPLY, EXPIRY).unwrap();
        assert_eq!(capital, receipt.distribution_pool);
        assert_eq!(market.pool_balance, 0);
        assert_eq!(
            market.register_launch(mint, 6, SUPPLY, EXPIRY).unwrap_err(),
            MarketError::LaunchAlreadyRegistered.into()
        );
    }

    #[test]
    fn test_team_tokens_unlock_over_time() {
        let mut market = market();
        buy(&mut market, Side::Yes, LAMPORTS_PER_SOL);
        market.resolve(EXPIRY).unwrap();
        market.register_launch(Pubkey::new_unique(), 6, SUPPLY, EXPIRY).unwrap();

        // Immediate share is available right away
        assert_eq!(market.claim_team_tokens(EXPIRY).unwrap(), 80_000_000_000_000);
        assert_eq!(
            market.claim_team_tokens(EXPIRY).unwrap_err(),
            MarketError::NothingToClaim.into()
        );

        let halfway = EXPIRY + TEAM_VESTING_DURATION / 2;
        assert_eq!(market.claim_team_tokens(halfway).unwrap(), 125_000_000_000_000);

        let done = EXPIRY + TEAM_VESTING_DURATION;
        assert_eq!(market.claim_team_tokens(done).unwrap(), 125_000_000_000_000);
        assert_eq!(
            market.claim_team_tokens(done + 1).unwrap_err(),
            MarketError::NothingToClaim.into()
        );
    }

    #[test]
    fn test_close_requires_settled_market() {
        let mut market = market();
        let mut position = buy(&mut market, Side::Yes, LAMPORTS_PER_SOL);

        assert_eq!(market.close_out(EXPIRY).unwrap_err(), MarketError::MarketNotResolved.into());
        market.resolve(EXPIRY).unwrap();
        market.register_launch(Pubkey::new_unique(), 6, SUPPLY, EXPIRY).unwrap();
        assert_eq!(market.close_out(EXPIRY).unwrap_err(), MarketError::OpenPositionsRemain.into());

        let voter_tokens = TokenAllocation::split(SUPPLY).unwrap().voters;
        assert_eq!(
            market.claim(&mut position, EXPIRY).unwrap(),
            Payout::Tokens(voter_tokens)
        );
        assert_eq!(market.close_out(EXPIRY).unwrap_err(), MarketError::LaunchNotSettled.into());

        market.claim_platform_tokens().unwrap();
        assert_eq!(
            market.claim_platform_tokens().unwrap_err(),
            MarketError::AlreadyClaimed.into()
        );
        market.claim_team_tokens(EXPIRY + TEAM_VESTING_DURATION).unwrap();

        assert_eq!(market.close_out(EXPIRY).unwrap(), 0);
    }

    #[test]
    fn test_launch_supply_must_cover_yes_shares() {
        let mut market = market();
        let mut alice = buy(&mut market, Side::Yes, 3 * LAMPORTS_PER_SOL);
        let mut bob = buy(&mut market, Side::Yes, 2 * LAMPORTS_PER_SOL);
        let receipt = market.resolve(EXPIRY).unwrap();
        let issued_yes = market.issued_shares(Side::Yes).unwrap();

        // One token would hand the founder the whole pool for nothing
        assert_eq!(
            market
                .register_launch(Pubkey::new_unique(), 0, 1, EXPIRY)
                .unwrap_err(),
            MarketError::LaunchSupplyTooSmall.into()
        );
        // Voters get 65%, so a supply equal to the issued shares is short too
        assert_eq!(
            market
                .register_launch(Pubkey::new_unique(), 0, issued_yes, EXPIRY)
                .unwrap_err(),
            MarketError::LaunchSupplyTooSmall.into()
        );
        assert!(market.token_launch.is_none());
        assert_eq!(market.pool_balance, receipt.distribution_pool);

        let capital = market
            .register_launch(Pubkey::new_unique(), 0, 2 * issued_yes, EXPIRY)
            .unwrap();
        assert_eq!(capital, receipt.distribution_pool);

        for position in [&mut alice, &mut bob] {
            match market.claim(position, EXPIRY).unwrap() {
                Payout::Tokens(tokens) => assert!(tokens >= position.yes_shares),
                other => panic!("expected tokens, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unlaunched_yes_win_refunds_after_window() {
        let mut market = market();
        let mut alice = buy(&mut market, Side::Yes, 3 * LAMPORTS_PER_SOL);
        let mut bob = buy(&mut market, Side::Yes, LAMPORTS_PER_SOL);
        let mut carol = buy(&mut market, Side::No, LAMPORTS_PER_SOL);
        let receipt = market.resolve(EXPIRY).unwrap();
        assert_eq!(receipt.resolution, Resolution::YesWins);
        assert_eq!(market.resolved_at, EXPIRY);

        let deadline = EXPIRY + LAUNCH_WINDOW;
        assert!(!market.launch_window_closed(deadline - 1));
        assert_eq!(
            market.claim(&mut alice, deadline - 1).unwrap_err(),
            MarketError::LaunchNotRegistered.into()
        );
        assert!(!alice.claimed);

        assert!(market.launch_window_closed(deadline));
        assert_eq!(
            market
                .register_launch(Pubkey::new_unique(), 6, SUPPLY, deadline)
                .unwrap_err(),
            MarketError::LaunchWindowClosed.into()
        );

        let issued_yes = market.issued_shares(Side::Yes).unwrap();
        let mut paid = 0;
        for position in [&mut alice, &mut bob] {
            let expected =
                pro_rata(position.yes_shares, issued_yes, receipt.distribution_pool).unwrap();
            assert_eq!(
                market.claim(position, deadline).unwrap(),
                Payout::Lamports(expected)
            );
            paid += expected;
        }
        assert_eq!(market.claim(&mut carol, deadline).unwrap(), Payout::Nothing);

        assert_eq!(
            market.close_out(deadline - 1).unwrap_err(),
            MarketError::LaunchNotSettled.into()
        );
        assert_eq!(
            market.close_out(deadline).unwrap(),
            receipt.distribution_pool - paid
        );
    }

    #[test]
    fn test_refund_close_sweeps_dust() {
        let mut market = market();
        let mut a = buy(&mut market, Side::Yes, MIN_INVESTMENT_LAMPORTS);
        let mut b = buy(&mut market, Side::No, MIN_INVESTMENT_LAMPORTS);
        market.resolve(EXPIRY).unwrap();
        market.claim(&mut a, EXPIRY).unwrap();
        market.claim(&mut b, EXPIRY).unwrap();

        // Each deposit nets 9_850_000 and refunds 9_850_000: nothing left over
        assert_eq!(market.close_out(EXPIRY).unwrap(), 0);
    }

    #[test]
    fn test_refund_can_fall_one_lamport_short_of_net() {
        let mut market = market();
        let gross = MIN_INVESTMENT_LAMPORTS + 1;
        let mut a = buy(&mut market, Side::Yes, gross);
        let mut b = buy(&mut market, Side::No, gross);
        let receipt = market.resolve(EXPIRY).unwrap();
        assert_eq!(receipt.resolution, Resolution::Refund);

        // net = gross - floor(fee) = 9_850_001, refund = floor(gross * 98.5%)
        assert_eq!(market.claim(&mut a, EXPIRY).unwrap(), Payout::Lamports(9_850_000));
        assert_eq!(market.claim(&mut b, EXPIRY).unwrap(), Payout::Lamports(9_850_000));
        assert_eq!(market.close_out(EXPIRY).unwrap(), 2);
    }
}

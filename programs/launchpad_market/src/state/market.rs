//! Launchpad Market State
//!
//! Each market is a single yes/no question ("should this token launch?")
//! with its own value pool and a pair of virtual curve reserves.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

use crate::amm::ConstantProductCurve;
use crate::constants::*;
use crate::errors::MarketError;
use crate::math::{bps_of, SafeMath};
use crate::state::Position;

/// Individual launchpad market account
///
/// Seeds: ["market", founder, sha256(question_identifier)]
#[account]
#[derive(InitSpace, Debug)]
pub struct Market {
    /// Wallet that created the market and receives the launch capital
    pub founder: Pubkey,

    /// Founder-chosen question id, usually an IPFS CID
    #[max_len(59)]
    pub question_identifier: String,

    /// Off-chain metadata (name, ticker, description)
    #[max_len(200)]
    pub metadata_uri: String,

    /// Pool size tier in lamports
    pub target_pool: u64,

    /// `target_pool / 100`, recorded at creation
    pub liquidity_parameter: u64,

    /// Unix timestamp when trading ends
    pub expiry_time: i64,

    /// Unix timestamp when the market was created
    pub created_at: i64,

    /// Lamports held on behalf of participants
    pub pool_balance: u64,

    /// Pool snapshot after the completion fee, the base for pro-rata payouts
    pub distribution_pool: u64,

    /// Virtual YES reserve
    pub yes_reserve: u64,

    /// Virtual NO reserve
    pub no_reserve: u64,

    /// Curve constant, fixed at creation
    pub invariant_k: u128,

    /// YES share supply counter (starts at `INITIAL_Q`)
    pub q_yes: u64,

    /// NO share supply counter (starts at `INITIAL_Q`)
    pub q_no: u64,

    /// Positions holding shares that have not claimed yet
    pub open_positions: u32,

    /// Lifecycle phase
    pub phase: MarketPhase,

    /// Unix timestamp of resolution, zero while active
    pub resolved_at: i64,

    /// Launched token bookkeeping, set once after a YES win
    pub token_launch: Option<TokenLaunch>,

    /// PDA bump seed
    pub bump: u8,
}

/// Side of a binary market
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Yes,
    No,
}

/// How a market was settled
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum Resolution {
    /// YES holders receive the launched token
    YesWins,
    /// NO holders split the pool
    NoWins,
    /// Tie: everyone gets their deposit back, less the trade fee
    Refund,
}

/// Market lifecycle
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum MarketPhase {
    /// Open for trading until expiry, then awaiting resolution
    #[default]
    Active,
    /// Settled; claims are open
    Resolved(Resolution),
}

/// Token launched by the founder after a YES win
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub struct TokenLaunch {
    pub mint: Pubkey,
    pub decimals: u8,
    pub launched_at: i64,
    /// Split pro-rata across YES shares
    pub voter_tokens: u64,
    pub platform_tokens: u64,
    pub platform_claimed: bool,
    pub team_immediate_tokens: u64,
    /// Released linearly over `TEAM_VESTING_DURATION`
    pub team_vesting_tokens: u64,
    pub team_claimed: u64,
}

impl TokenLaunch {
    pub fn team_allocation(&self) -> Result<u64> {
        self.team_immediate_tokens.safe_add(self.team_vesting_tokens)
    }
}

/// Outcome of a successful buy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyReceipt {
    pub fee: u64,
    pub net_amount: u64,
    pub shares_out: u64,
    /// First shares credited to this position
    pub opened_position: bool,
}

impl Market {
    pub const SEED: &'static [u8] = b"market";

    /// Fixed-width seed for a variable-length question identifier
    pub fn question_seed(question_identifier: &str) -> [u8; 32] {
        hash(question_identifier.as_bytes()).to_bytes()
    }

    pub fn address(founder: &Pubkey, question_identifier: &str) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                Self::SEED,
                founder.as_ref(),
                &Self::question_seed(question_identifier),
            ],
            &crate::ID,
        )
    }

    /// Validate creation parameters and build the initial market state
    pub fn open(
        founder: Pubkey,
        question_identifier: String,
        metadata_uri: String,
        target_pool: u64,
        expiry_time: i64,
        now: i64,
        bump: u8,
    ) -> Result<Self> {
        require!(
            TARGET_POOL_TIERS.contains(&target_pool),
            MarketError::InvalidTargetPool
        );
        require!(
            question_identifier.len() <= MAX_QUESTION_ID_LEN
                && metadata_uri.len() <= MAX_METADATA_URI_LEN,
            MarketError::InvalidMetadata
        );
        require!(expiry_time > now, MarketError::InvalidExpiryTime);

        Ok(Self {
            founder,
            question_identifier,
            metadata_uri,
            target_pool,
            liquidity_parameter: target_pool.safe_div(LIQUIDITY_DIVISOR)?,
            expiry_time,
            created_at: now,
            pool_balance: 0,
            distribution_pool: 0,
            yes_reserve: INITIAL_Q,
            no_reserve: INITIAL_Q,
            invariant_k: ConstantProductCurve::invariant(INITIAL_Q)?,
            q_yes: INITIAL_Q,
            q_no: INITIAL_Q,
            open_positions: 0,
            phase: MarketPhase::Active,
            resolved_at: 0,
            token_launch: None,
            bump,
        })
    }

    pub fn is_active(&self) -> bool {
        self.phase == MarketPhase::Active
    }

    pub fn resolution(&self) -> Option<Resolution> {
        match self.phase {
            MarketPhase::Active => None,
            MarketPhase::Resolved(resolution) => Some(resolution),
        }
    }

    /// Shares issued to participants on one side
    pub fn issued_shares(&self, side: Side) -> Result<u64> {
        match side {
            Side::Yes => self.q_yes.safe_sub(INITIAL_Q),
            Side::No => self.q_no.safe_sub(INITIAL_Q),
        }
    }

    /// `(yes_price, no_price)` scaled by `PRICE_PRECISION`
    pub fn prices(&self) -> Result<(u64, u64)> {
        ConstantProductCurve::prices(self.yes_reserve, self.no_reserve)
    }

    /// Apply a buy to the market and the buyer's position.
    ///
    /// Every check and every checked computation runs before either record
    /// is written.
    pub fn buy(
        &mut self,
        position: &mut Position,
        side: Side,
        amount: u64,
        now: i64,
    ) -> Result<BuyReceipt> {
        require!(self.is_active(), MarketError::MarketNotActive);
        require!(now < self.expiry_time, MarketError::MarketExpired);
        require!(
            amount >= MIN_INVESTMENT_LAMPORTS,
            MarketError::InvestmentTooSmall
        );
        position.ensure_can_buy(side)?;

        let fee = bps_of(amount, TRADE_FEE_BPS)?;
        let net_amount = amount.safe_sub(fee)?;

        let (side_reserve, other_reserve) = match side {
            Side::Yes => (self.yes_reserve, self.no_reserve),
            Side::No => (self.no_reserve, self.yes_reserve),
        };
        let quote =
            ConstantProductCurve::quote_buy(side_reserve, other_reserve, self.invariant_k, net_amount)?;

        let pool_balance = self.pool_balance.safe_add(net_amount)?;
        let opened_position = position.is_empty();
        let open_positions = if opened_position {
            self.open_positions.safe_add(1)?
        } else {
            self.open_positions
        };
        let q_side = match side {
            Side::Yes => self.q_yes,
            Side::No => self.q_no,
        }
        .safe_add(quote.shares_out)?;

        position.credit(side, quote.shares_out, amount)?;

        match side {
            Side::Yes => {
                self.yes_reserve = quote.side_reserve_after;
                self.no_reserve = quote.other_reserve_after;
                self.q_yes = q_side;
            }
            Side::No => {
                self.no_reserve = quote.side_reserve_after;
                self.yes_reserve = quote.other_reserve_after;
                self.q_no = q_side;
            }
        }
        self.pool_balance = pool_balance;
        self.open_positions = open_positions;

        Ok(BuyReceipt {
            fee,
            net_amount,
            shares_out: quote.shares_out,
            opened_position,
        })
    }
}

//! Protocol constants
//!
//! All value amounts are lamports. Rates are basis points over [`BPS_DIVISOR`].

use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

/// Basis points divisor (100%)
pub const BPS_DIVISOR: u64 = 10_000;

/// Flat market creation fee (0.015 SOL), paid by the founder to the treasury
pub const CREATION_FEE_LAMPORTS: u64 = 15_000_000;

/// Per-trade fee (1.5%), taken from the gross deposit before it reaches the curve
pub const TRADE_FEE_BPS: u64 = 150;

/// Completion fee (5%), taken once from the pool when YES or NO wins
pub const COMPLETION_FEE_BPS: u64 = 500;

/// Minimum gross deposit per buy (0.01 SOL)
pub const MIN_INVESTMENT_LAMPORTS: u64 = 10_000_000;

/// Allowed target pool sizes: 5, 10 and 15 SOL
pub const TARGET_POOL_TIERS: [u64; 3] = [
    5 * LAMPORTS_PER_SOL,
    10 * LAMPORTS_PER_SOL,
    15 * LAMPORTS_PER_SOL,
];

/// `liquidity_parameter = target_pool / LIQUIDITY_DIVISOR`
pub const LIQUIDITY_DIVISOR: u64 = 100;

/// Starting virtual reserve and share supply of each side (one million SOL).
///
/// The depth keeps single trades near 1:1 while still pricing them on the
/// curve; `k = INITIAL_Q²` fits comfortably in a u128.
pub const INITIAL_Q: u64 = 1_000_000 * LAMPORTS_PER_SOL;

/// Fixed-point scale for quoted prices (1e9 = probability 1.0)
pub const PRICE_PRECISION: u128 = 1_000_000_000;

/// Maximum question identifier length (CIDv1 strings run up to 59 chars)
pub const MAX_QUESTION_ID_LEN: usize = 59;

/// Maximum metadata URI length
pub const MAX_METADATA_URI_LEN: usize = 200;

// Launched token split, in basis points of the deposited supply.
// YES holders receive whatever is left after the platform and team shares.
pub const PLATFORM_TOKEN_SHARE_BPS: u64 = 200;
pub const TEAM_IMMEDIATE_SHARE_BPS: u64 = 800;
pub const TEAM_VESTED_SHARE_BPS: u64 = 2_500;

/// Linear vesting period for the team's vested share (12 x 30 days)
pub const TEAM_VESTING_DURATION: i64 = 31_104_000;

/// After a YES win the founder has this long (7 days) to register the launch.
/// Past it, YES holders reclaim the distribution pool in lamports.
pub const LAUNCH_WINDOW: i64 = 7 * 86_400;

use anchor_lang::prelude::*;

/// Every rejection the program can return.
///
/// Codes start at 6000 (Anchor convention) and are stable: clients match on
/// them to show a specific message.
#[error_code]
pub enum MarketError {
    #[msg("Invalid target pool size (must be 5, 10, or 15 SOL)")]
    InvalidTargetPool,
    #[msg("Question identifier or metadata URI is too long")]
    InvalidMetadata,
    #[msg("Expiry time must be in the future")]
    InvalidExpiryTime,
    #[msg("Market is not open for trading")]
    MarketNotActive,
    #[msg("Market has expired")]
    MarketExpired,
    #[msg("Investment is below the minimum (0.01 SOL)")]
    InvestmentTooSmall,
    #[msg("Wallet already holds a position on the opposite side")]
    AlreadyHasPosition,
    #[msg("Market has not expired yet")]
    MarketNotExpired,
    #[msg("Market has already been resolved")]
    AlreadyResolved,
    #[msg("Market has not been resolved")]
    MarketNotResolved,
    #[msg("Market resolution does not allow this action")]
    InvalidResolutionState,
    #[msg("Rewards have already been claimed")]
    AlreadyClaimed,
    #[msg("No position exists for this wallet")]
    PositionNotFound,
    #[msg("Position must be claimed before it can be closed")]
    CannotClosePosition,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Arithmetic underflow")]
    ArithmeticUnderflow,
    #[msg("Division by zero")]
    DivisionByZero,
    #[msg("Trade would issue no shares")]
    InvalidTradeOutcome,
    #[msg("Signer is not authorized for this action")]
    Unauthorized,
    #[msg("Insufficient balance")]
    InsufficientBalance,
    #[msg("Launch token has not been registered")]
    LaunchNotRegistered,
    #[msg("Launch token has already been registered")]
    LaunchAlreadyRegistered,
    #[msg("Launch token amount must be greater than zero")]
    InvalidLaunchAmount,
    #[msg("Token account does not match the launched token")]
    InvalidTokenAccount,
    #[msg("Token accounts are required to claim launched tokens")]
    MissingTokenAccounts,
    #[msg("Nothing to claim at this time")]
    NothingToClaim,
    #[msg("Positions remain unclaimed")]
    OpenPositionsRemain,
    #[msg("Launch allocations have not been fully claimed")]
    LaunchNotSettled,
    #[msg("Launch supply leaves YES holders less than one token per share")]
    LaunchSupplyTooSmall,
    #[msg("Launch registration window has closed")]
    LaunchWindowClosed,
}

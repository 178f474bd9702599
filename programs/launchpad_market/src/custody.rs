//! Value custody
//!
//! The market PDA holds participant lamports and the launched token vault;
//! the treasury PDA holds fees. Lamports enter through the system program
//! (the payer signs) and leave by direct debit, which the runtime only
//! allows because this program owns both PDAs. Tokens leave the vault with
//! `transfer_checked` signed by the market's seeds.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token_interface::{transfer_checked, Mint, TokenAccount, TransferChecked};

use crate::errors::MarketError;
use crate::math::SafeMath;
use crate::state::{Market, TokenLaunch};

/// Move lamports from a signing wallet into a program account
pub fn deposit_lamports<'info>(
    system_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    lamports: u64,
) -> Result<()> {
    if lamports == 0 {
        return Ok(());
    }

    system_program::transfer(
        CpiContext::new(system_program, system_program::Transfer { from, to }),
        lamports,
    )
}

/// Debit a program-owned account and credit any other account
pub fn move_lamports(from: &AccountInfo, to: &AccountInfo, lamports: u64) -> Result<()> {
    if lamports == 0 {
        return Ok(());
    }

    let debited = from.lamports().safe_sub(lamports)?;
    let credited = to.lamports().safe_add(lamports)?;

    **from.try_borrow_mut_lamports()? = debited;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}

/// Lamports above the rent-exempt minimum for the account's current size
pub fn spendable_lamports(account: &AccountInfo) -> Result<u64> {
    let reserved = Rent::get()?.minimum_balance(account.data_len());
    Ok(account.lamports().saturating_sub(reserved))
}

/// Token transfer authorised by a wallet signature
pub fn transfer_tokens<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    amount: u64,
    decimals: u8,
) -> Result<()> {
    transfer_checked(
        CpiContext::new(
            token_program,
            TransferChecked {
                from,
                mint,
                to,
                authority,
            },
        ),
        amount,
        decimals,
    )
}

/// Token transfer out of a vault owned by a program PDA
#[allow(clippy::too_many_arguments)]
pub fn release_tokens<'info>(
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
    decimals: u8,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            TransferChecked {
                from: vault,
                mint,
                to,
                authority: vault_authority,
            },
            signer_seeds,
        ),
        amount,
        decimals,
    )
}

/// Release launched tokens from the market's vault, signed by the market PDA
pub fn release_from_market<'info>(
    market: &Account<'info, Market>,
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    amount: u64,
    decimals: u8,
) -> Result<()> {
    let question_seed = Market::question_seed(&market.question_identifier);
    let bump = [market.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[
        Market::SEED,
        market.founder.as_ref(),
        &question_seed,
        &bump,
    ]];

    release_tokens(
        token_program,
        vault,
        mint,
        to,
        market.to_account_info(),
        signer_seeds,
        amount,
        decimals,
    )
}

/// The mint is the launched token, the vault belongs to the market and the
/// destination belongs to `recipient`
pub fn verify_launch_accounts(
    launch: &TokenLaunch,
    market: &Pubkey,
    mint: &InterfaceAccount<Mint>,
    vault: &InterfaceAccount<TokenAccount>,
    destination: &InterfaceAccount<TokenAccount>,
    recipient: &Pubkey,
) -> Result<()> {
    require_keys_eq!(mint.key(), launch.mint, MarketError::InvalidTokenAccount);
    require_keys_eq!(vault.mint, launch.mint, MarketError::InvalidTokenAccount);
    require_keys_eq!(vault.owner, *market, MarketError::InvalidTokenAccount);
    require_keys_eq!(destination.mint, launch.mint, MarketError::InvalidTokenAccount);
    require_keys_eq!(destination.owner, *recipient, MarketError::InvalidTokenAccount);
    Ok(())
}

//! Instruction-level flow through the program entrypoint on a local bank:
//! account constraints, lamport custody and the treasury rent floor.

use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};
use solana_program_test::{
    processor, BanksClientError, ProgramTest, ProgramTestBanksClientExt, ProgramTestContext,
};
use solana_sdk::{
    account_info::AccountInfo,
    clock::Clock,
    entrypoint::ProgramResult,
    instruction::{Instruction, InstructionError},
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction, system_program,
    transaction::{Transaction, TransactionError},
};

use launchpad_market::errors::MarketError;
use launchpad_market::state::{Market, Position, Side, Treasury};

const QUESTION: &str = "bafkreiflowquestion";

fn entry_wrapper(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    launchpad_market::entry(program_id, accounts, data)
}

async fn setup() -> ProgramTestContext {
    let program_test = ProgramTest::new(
        "launchpad_market",
        launchpad_market::ID,
        processor!(entry_wrapper),
    );
    program_test.start_with_context().await
}

async fn send(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let blockhash = context
        .banks_client
        .get_new_latest_blockhash(&context.last_blockhash)
        .await
        .unwrap();
    context.last_blockhash = blockhash;

    let mut all_signers = vec![&context.payer];
    all_signers.extend_from_slice(signers);
    let transaction = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        all_signers.as_slice(),
        blockhash,
    );
    context.banks_client.process_transaction(transaction).await
}

fn assert_market_error(result: Result<(), BanksClientError>, expected: MarketError) {
    match result.unwrap_err().unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
            assert_eq!(code, u32::from(expected))
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

async fn lamports(context: &mut ProgramTestContext, address: Pubkey) -> u64 {
    context.banks_client.get_balance(address).await.unwrap()
}

async fn fetch<T: AccountDeserialize>(context: &mut ProgramTestContext, address: Pubkey) -> T {
    let account = context
        .banks_client
        .get_account(address)
        .await
        .unwrap()
        .unwrap();
    T::try_deserialize(&mut account.data.as_slice()).unwrap()
}

async fn funded_wallet(context: &mut ProgramTestContext, sol: u64) -> Keypair {
    let wallet = Keypair::new();
    let transfer = system_instruction::transfer(
        &context.payer.pubkey(),
        &wallet.pubkey(),
        sol * LAMPORTS_PER_SOL,
    );
    send(context, &[transfer], &[]).await.unwrap();
    wallet
}

fn claim_rewards(market: Pubkey, claimant: Pubkey) -> Instruction {
    let (position, _) = Position::address(&market, &claimant);
    Instruction {
        program_id: launchpad_market::ID,
        accounts: launchpad_market::accounts::ClaimRewards {
            claimant,
            market,
            position,
            token_mint: None,
            market_token_vault: None,
            claimant_token_account: None,
            token_program: None,
        }
        .to_account_metas(None),
        data: launchpad_market::instruction::ClaimRewards {}.data(),
    }
}

fn close_position(market: Pubkey, owner: Pubkey) -> Instruction {
    let (position, _) = Position::address(&market, &owner);
    Instruction {
        program_id: launchpad_market::ID,
        accounts: launchpad_market::accounts::ClosePosition { owner, position }
            .to_account_metas(None),
        data: launchpad_market::instruction::ClosePosition {}.data(),
    }
}

fn withdraw_fees(admin: Pubkey, recipient: Pubkey, amount: u64) -> Instruction {
    let (treasury, _) = Treasury::address();
    Instruction {
        program_id: launchpad_market::ID,
        accounts: launchpad_market::accounts::WithdrawFees {
            admin,
            treasury,
            recipient,
        }
        .to_account_metas(None),
        data: launchpad_market::instruction::WithdrawFees { amount }.data(),
    }
}

#[tokio::test]
async fn test_no_win_claim_close_and_fee_withdrawal() {
    let mut context = setup().await;
    let founder = context.payer.pubkey();
    let (treasury, _) = Treasury::address();
    let (market, _) = Market::address(&founder, QUESTION);

    let init_treasury = Instruction {
        program_id: launchpad_market::ID,
        accounts: launchpad_market::accounts::InitTreasury {
            admin: founder,
            treasury,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: launchpad_market::instruction::InitTreasury {}.data(),
    };
    send(&mut context, &[init_treasury], &[]).await.unwrap();

    let clock: Clock = context.banks_client.get_sysvar().await.unwrap();
    let expiry_time = clock.unix_timestamp + 3_600;
    let create_market = Instruction {
        program_id: launchpad_market::ID,
        accounts: launchpad_market::accounts::CreateMarket {
            founder,
            treasury,
            market,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: launchpad_market::instruction::CreateMarket {
            question_identifier: QUESTION.to_string(),
            target_pool: 5 * LAMPORTS_PER_SOL,
            expiry_time,
            metadata_uri: "ipfs://flow".to_string(),
        }
        .data(),
    };
    send(&mut context, &[create_market], &[]).await.unwrap();

    let alice = funded_wallet(&mut context, 2).await;
    let bob = funded_wallet(&mut context, 1).await;

    let (alice_position, _) = Position::address(&market, &alice.pubkey());
    let buy = Instruction {
        program_id: launchpad_market::ID,
        accounts: launchpad_market::accounts::Buy {
            buyer: alice.pubkey(),
            treasury,
            market,
            position: alice_position,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: launchpad_market::instruction::Buy {
            side: Side::No,
            amount: LAMPORTS_PER_SOL,
        }
        .data(),
    };
    send(&mut context, &[buy], &[&alice]).await.unwrap();

    // An unclaimed position keeps its rent
    assert_market_error(
        send(&mut context, &[close_position(market, alice.pubkey())], &[&alice]).await,
        MarketError::CannotClosePosition,
    );

    let mut clock: Clock = context.banks_client.get_sysvar().await.unwrap();
    clock.unix_timestamp = expiry_time;
    context.set_sysvar(&clock);

    let resolve = Instruction {
        program_id: launchpad_market::ID,
        accounts: launchpad_market::accounts::ResolveMarket {
            resolver: founder,
            treasury,
            market,
        }
        .to_account_metas(None),
        data: launchpad_market::instruction::ResolveMarket {}.data(),
    };
    send(&mut context, &[resolve], &[]).await.unwrap();
    let resolved: Market = fetch(&mut context, market).await;

    // Bob never bought, so there is no position account behind his PDA
    assert_market_error(
        send(&mut context, &[claim_rewards(market, bob.pubkey())], &[&bob]).await,
        MarketError::PositionNotFound,
    );

    // Alice holds every NO share and takes the whole distribution pool
    let before = lamports(&mut context, alice.pubkey()).await;
    send(&mut context, &[claim_rewards(market, alice.pubkey())], &[&alice])
        .await
        .unwrap();
    let after = lamports(&mut context, alice.pubkey()).await;
    assert_eq!(after - before, resolved.distribution_pool);

    let settled: Market = fetch(&mut context, market).await;
    assert_eq!(settled.pool_balance, 0);
    assert_eq!(settled.open_positions, 0);

    send(&mut context, &[close_position(market, alice.pubkey())], &[&alice])
        .await
        .unwrap();
    assert!(context
        .banks_client
        .get_account(alice_position)
        .await
        .unwrap()
        .is_none());

    // Withdrawing every accrued fee leaves exactly the rent-exempt minimum
    let ledger: Treasury = fetch(&mut context, treasury).await;
    let withdrawable = ledger.withdrawable().unwrap();
    let recipient = Pubkey::new_unique();
    send(&mut context, &[withdraw_fees(founder, recipient, withdrawable)], &[])
        .await
        .unwrap();

    let rent = context.banks_client.get_rent().await.unwrap();
    let treasury_account = context
        .banks_client
        .get_account(treasury)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        treasury_account.lamports,
        rent.minimum_balance(treasury_account.data.len())
    );
    assert_eq!(lamports(&mut context, recipient).await, withdrawable);

    assert_market_error(
        send(&mut context, &[withdraw_fees(founder, recipient, 1)], &[]).await,
        MarketError::InsufficientBalance,
    );
}

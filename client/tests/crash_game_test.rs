use std::sync::Arc;

use num_bigint::BigUint;
use tonplay_client::contract::{
    CrashGameContract, GameRecordContract, GameWalletContract, TonContractError,
};
use tonplay_client::types::{StackParseError, TvmStackEntry, TvmStackEntryKind};
use tonplay_core::cell::{Cell, CellBuilder};
use tonplay_core::message::{
    BetMessage, CrashMessage, JettonTransferMessage, NewRoundMessage, OpcodeTable,
    SettlementMessage, CRASH_GAME_BET,
};
use tonplay_core::tlb_types::tlb::TLB;

mod common;

use common::{
    address, new_factory, MockChain, MockSender, CRASH_GAME, JETTON_MINTER, PLAYER,
    PLAYER_JETTON_WALLET,
};

fn code(tag: u32) -> anyhow::Result<Cell> {
    Ok(CellBuilder::new().store_u32(32, tag)?.build()?)
}

fn crash_game_info_stack() -> anyhow::Result<Vec<TvmStackEntry>> {
    let mut stack: Vec<TvmStackEntry> = [7u64, 0, 123456, 250, 3, 1_700_000_000, 1_700_000_001]
        .into_iter()
        .map(TvmStackEntry::from)
        .collect();
    stack.push(TvmStackEntry::from(1_700_000_002u64));
    stack.push(TvmStackEntry::from(30u64));
    stack.push(TvmStackEntry::try_from(&address(PLAYER))?);
    stack.push(TvmStackEntry::try_from(&address(JETTON_MINTER))?);
    stack.push(TvmStackEntry::from(code(1)?));
    stack.push(TvmStackEntry::from(code(2)?));
    stack.push(TvmStackEntry::from(code(3)?));
    Ok(stack)
}

#[tokio::test]
async fn test_get_crash_game_data() -> anyhow::Result<()> {
    common::init_logging();
    let game = address(CRASH_GAME);
    let chain = Arc::new(MockChain::new().with_stack(&game, "get_info", crash_game_info_stack()?));
    let factory = new_factory(&chain, None);
    let contract = factory.get_contract(&game);

    let info = contract.get_crash_game_data(true).await?;
    assert_eq!(info.round_num, 7);
    assert!(info.is_betting());
    assert_eq!(info.seed, 123456);
    assert_eq!(info.crash_multiple, 250);
    assert_eq!(info.player_nums, 3);
    assert_eq!(info.start_blk_time, 1_700_000_002);
    assert_eq!(info.min_interval_time, 30);
    assert_eq!(info.admin_address, address(PLAYER));
    assert_eq!(info.jetton_minter_address, address(JETTON_MINTER));
    let codes = info.codes.expect("codes requested");
    assert_eq!(codes.game_wallet.as_ref(), &code(2)?);

    let info = contract.get_crash_game_data(false).await?;
    assert_eq!(info.codes, None);
    Ok(())
}

#[tokio::test]
async fn test_get_crash_game_data_names_bad_field() -> anyhow::Result<()> {
    common::init_logging();
    let game = address(CRASH_GAME);
    let mut stack = crash_game_info_stack()?;
    stack[2] = TvmStackEntry::from(code(9)?);
    let chain = Arc::new(MockChain::new().with_stack(&game, "get_info", stack));
    let factory = new_factory(&chain, None);

    let result = factory.get_contract(&game).get_crash_game_data(false).await;
    match result {
        Err(TonContractError::TvmStackParseError { method, error, .. }) => {
            assert_eq!(method, "get_info");
            assert!(matches!(
                *error,
                StackParseError::TypeMismatch {
                    index: 2,
                    expected: TvmStackEntryKind::Int,
                    found: TvmStackEntryKind::Cell,
                    ..
                }
            ));
        }
        other => panic!("unexpected result {:?}", other),
    }

    let mut stack = crash_game_info_stack()?;
    stack.truncate(12);
    let chain = Arc::new(MockChain::new().with_stack(&game, "get_info", stack));
    let factory = new_factory(&chain, None);
    let result = factory.get_contract(&game).get_crash_game_data(true).await;
    assert!(matches!(
        result,
        Err(TonContractError::InvalidMethodResultStackSize {
            actual: 12,
            expected: 14,
            ..
        })
    ));
    Ok(())
}

#[tokio::test]
async fn test_bet_goes_through_player_jetton_wallet() -> anyhow::Result<()> {
    common::init_logging();
    let game = address(CRASH_GAME);
    let minter = address(JETTON_MINTER);
    let player = address(PLAYER);
    let player_wallet = address(PLAYER_JETTON_WALLET);
    let chain = Arc::new(
        MockChain::new()
            .with_stack(&game, "get_info", crash_game_info_stack()?)
            .with_stack(
                &minter,
                "get_wallet_address",
                vec![TvmStackEntry::try_from(&player_wallet)?],
            ),
    );
    let sender = Arc::new(MockSender::new(&player));
    let factory = new_factory(&chain, Some(&sender));
    let opcodes = OpcodeTable::default().with_bet_opcode(CRASH_GAME_BET);

    factory
        .get_contract(&game)
        .bet(
            &opcodes,
            7,
            150,
            &BigUint::from(1_000_000_000u64),
            &BigUint::from(100_000_000u64),
            &BigUint::from(150_000_000u64),
        )
        .await?;

    let calls = chain.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].address, minter);
    assert_eq!(calls[1].stack[0].get_address_opt()?, Some(player.clone()));

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].destination, player_wallet);
    assert_eq!(sent[0].value, BigUint::from(150_000_000u64));

    let transfer = JettonTransferMessage::from_cell(&sent[0].body)?;
    assert_eq!(transfer.destination, game);
    assert_eq!(transfer.response_destination, Some(player));
    assert_eq!(transfer.amount, BigUint::from(1_000_000_000u64));
    assert_eq!(transfer.forward_ton_amount, BigUint::from(100_000_000u64));
    let bet = BetMessage::from_cell(&transfer.forward_payload.value, &opcodes)?;
    assert_eq!(bet, BetMessage::new(7, 150));
    Ok(())
}

#[tokio::test]
async fn test_bet_needs_opcode_and_sender() -> anyhow::Result<()> {
    common::init_logging();
    let game = address(CRASH_GAME);
    let chain = Arc::new(MockChain::new());
    let sender = Arc::new(MockSender::new(&address(PLAYER)));
    let one = BigUint::from(1u8);

    let factory = new_factory(&chain, Some(&sender));
    let result = factory
        .get_contract(&game)
        .bet(&OpcodeTable::default(), 1, 200, &one, &one, &one)
        .await;
    assert!(matches!(result, Err(TonContractError::MessageError { .. })));

    let factory = new_factory(&chain, None);
    let opcodes = OpcodeTable::default().with_bet_opcode(CRASH_GAME_BET);
    let result = factory
        .get_contract(&game)
        .bet(&opcodes, 1, 200, &one, &one, &one)
        .await;
    assert!(matches!(result, Err(TonContractError::InvalidArgument(_))));

    assert!(chain.calls().is_empty());
    assert!(sender.sent().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_round_admin_messages() -> anyhow::Result<()> {
    common::init_logging();
    let game = address(CRASH_GAME);
    let chain = Arc::new(MockChain::new());
    let sender = Arc::new(MockSender::new(&address(PLAYER)));
    let factory = new_factory(&chain, Some(&sender));
    let contract = factory.get_contract(&game);

    contract.new_round(&BigUint::from(50_000_000u64)).await?;
    contract
        .crash(
            7,
            &BigUint::from(50_000_000u64),
            &BigUint::from(100_000_000u64),
        )
        .await?;

    let sent = sender.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|m| m.destination == game));
    assert_eq!(sent[0].value, BigUint::from(50_000_000u64));
    NewRoundMessage::from_cell(&sent[0].body)?;
    let crash = CrashMessage::from_cell(&sent[1].body)?;
    assert_eq!(crash.round_num, 7);
    assert_eq!(crash.forward_gas_fee, BigUint::from(50_000_000u64));
    Ok(())
}

#[tokio::test]
async fn test_game_wallet() -> anyhow::Result<()> {
    common::init_logging();
    let game_wallet = address(PLAYER_JETTON_WALLET);
    let chain = Arc::new(MockChain::new().with_stack(
        &game_wallet,
        "get_info",
        vec![
            TvmStackEntry::from(4u64),
            TvmStackEntry::from(BigUint::from(2_000_000_000u64)),
            TvmStackEntry::from(180u64),
            TvmStackEntry::try_from(&address(PLAYER))?,
            TvmStackEntry::try_from(&address(CRASH_GAME))?,
            TvmStackEntry::try_from(&address(JETTON_MINTER))?,
            TvmStackEntry::from(code(1)?),
            TvmStackEntry::from(code(3)?),
        ],
    ));
    let sender = Arc::new(MockSender::new(&address(PLAYER)));
    let factory = new_factory(&chain, Some(&sender));
    let contract = factory.get_contract(&game_wallet);

    let info = contract.get_game_wallet_data(true).await?;
    assert_eq!(info.round_num, 4);
    assert_eq!(info.bet_amount, BigUint::from(2_000_000_000u64));
    assert_eq!(info.multiple, 180);
    assert_eq!(info.owner_address, address(PLAYER));
    assert_eq!(info.crash_game_address, address(CRASH_GAME));
    assert_eq!(info.game_record_code.as_deref(), Some(&code(3)?));

    contract
        .settle(
            4,
            3,
            &BigUint::from(200_000_000u64),
            &address(PLAYER),
            &BigUint::from(250_000_000u64),
        )
        .await?;
    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    let settlement = SettlementMessage::from_cell(&sent[0].body)?;
    assert_eq!(settlement.round_num, 4);
    assert_eq!(settlement.round_index, 0);
    assert_eq!(settlement.settle_address, address(PLAYER));

    let result = contract
        .settle(0, 3, &BigUint::from(1u8), &address(PLAYER), &BigUint::from(1u8))
        .await;
    assert!(matches!(result, Err(TonContractError::MessageError { .. })));
    assert_eq!(sender.sent().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_game_record() -> anyhow::Result<()> {
    common::init_logging();
    let record = address(PLAYER_JETTON_WALLET);
    let stack: Vec<TvmStackEntry> = [2u64, 5, 99, 310, 1, 12]
        .into_iter()
        .map(TvmStackEntry::from)
        .chain([
            TvmStackEntry::try_from(&address(CRASH_GAME))?,
            TvmStackEntry::try_from(&address(JETTON_MINTER))?,
        ])
        .collect();
    let chain = Arc::new(MockChain::new().with_stack(&record, "get_info", stack));
    let factory = new_factory(&chain, None);
    let contract = factory.get_contract(&record);

    let info = contract.get_game_record_data(false).await?;
    assert_eq!(info.round_index, 2);
    assert_eq!(info.round_num, 5);
    assert_eq!(info.crash_multiple, 310);
    assert_eq!(info.game_state, 1);
    assert_eq!(info.player_nums, 12);
    assert_eq!(info.crash_game_address, address(CRASH_GAME));
    assert_eq!(info.jetton_wallet_code, None);

    let result = contract.get_game_record_data(true).await;
    assert!(matches!(
        result,
        Err(TonContractError::InvalidMethodResultStackSize {
            actual: 8,
            expected: 10,
            ..
        })
    ));
    Ok(())
}

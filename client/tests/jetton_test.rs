use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use tokio_test::assert_ok;
use tonplay_client::client::SmcRunResult;
use tonplay_client::contract::{JettonMasterContract, JettonWalletContract, TonContractError};
use tonplay_client::types::TvmStackEntry;
use tonplay_core::cell::{CellBuilder, CellSlice};
use tonplay_core::message::JettonTransferMessage;
use tonplay_core::meta::{JettonContent, JettonMetaData};
use tonplay_core::tlb_types::tlb::TLB;

mod common;

use common::{address, new_factory, MockChain, MockSender, JETTON_MINTER, PLAYER, PLAYER_JETTON_WALLET};

fn crsh_meta() -> JettonMetaData {
    JettonMetaData {
        name: Some("Crash Coin".to_string()),
        symbol: Some("CRSH".to_string()),
        decimals: Some(9),
        ..Default::default()
    }
}

fn jetton_data_stack(
    admin: Option<&str>,
    meta: &JettonMetaData,
) -> anyhow::Result<Vec<TvmStackEntry>> {
    let admin = match admin {
        Some(admin) => TvmStackEntry::try_from(&address(admin))?,
        None => {
            let none = CellBuilder::new().store_u8(2, 0)?.build()?.to_arc();
            TvmStackEntry::Slice(CellSlice::full_cell(none))
        }
    };
    let content = meta.to_content()?.to_cell()?;
    let wallet_code = CellBuilder::new().store_u32(32, 0xc0de)?.build()?;
    Ok(vec![
        TvmStackEntry::from(BigUint::from(1_000_000_000_000u64)),
        TvmStackEntry::from(true),
        admin,
        TvmStackEntry::from(content),
        TvmStackEntry::from(wallet_code),
    ])
}

#[tokio::test]
async fn test_get_jetton_data() -> anyhow::Result<()> {
    common::init_logging();
    let minter = address(JETTON_MINTER);
    let chain = Arc::new(MockChain::new().with_stack(
        &minter,
        "get_jetton_data",
        jetton_data_stack(Some(PLAYER), &crsh_meta())?,
    ));
    let factory = new_factory(&chain, None);

    let data = assert_ok!(factory.get_contract(&minter).get_jetton_data().await);
    assert_eq!(data.total_supply, BigUint::from(1_000_000_000_000u64));
    assert!(data.mintable);
    assert_eq!(data.admin_address, Some(address(PLAYER)));
    assert!(matches!(data.content, JettonContent::Onchain(_)));
    assert_eq!(JettonMetaData::from_content(&data.content)?, crsh_meta());
    assert_eq!(chain.calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_get_jetton_data_without_admin() -> anyhow::Result<()> {
    common::init_logging();
    let minter = address(JETTON_MINTER);
    let meta = JettonMetaData {
        uri: Some("https://example.org/crsh.json".to_string()),
        ..Default::default()
    };
    let chain = Arc::new(MockChain::new().with_stack(
        &minter,
        "get_jetton_data",
        jetton_data_stack(None, &meta)?,
    ));
    let factory = new_factory(&chain, None);

    let data = factory.get_contract(&minter).get_jetton_data().await?;
    assert_eq!(data.admin_address, None);
    assert_eq!(data.content.uri(), Some("https://example.org/crsh.json"));
    Ok(())
}

#[tokio::test]
async fn test_get_jetton_data_errors() -> anyhow::Result<()> {
    common::init_logging();
    let minter = address(JETTON_MINTER);
    let mut short_stack = jetton_data_stack(Some(PLAYER), &crsh_meta())?;
    short_stack.pop();
    let chain = Arc::new(
        MockChain::new()
            .with_stack(&minter, "get_jetton_data", short_stack)
            .with_result(
                &address(PLAYER_JETTON_WALLET),
                "get_wallet_data",
                SmcRunResult {
                    gas_used: 300,
                    stack: vec![],
                    exit_code: 11,
                },
            ),
    );
    let factory = new_factory(&chain, None);

    let result = factory.get_contract(&minter).get_jetton_data().await;
    assert!(matches!(
        result,
        Err(TonContractError::InvalidMethodResultStackSize {
            actual: 4,
            expected: 5,
            ..
        })
    ));

    let result = factory
        .get_contract(&address(PLAYER_JETTON_WALLET))
        .get_wallet_data()
        .await;
    assert!(matches!(
        result,
        Err(TonContractError::TvmRunError { exit_code: 11, .. })
    ));

    let result = factory.get_contract(&address(PLAYER)).get_jetton_data().await;
    assert!(matches!(result, Err(TonContractError::ChainError { .. })));
    Ok(())
}

#[tokio::test]
async fn test_get_wallet_address() -> anyhow::Result<()> {
    common::init_logging();
    let minter = address(JETTON_MINTER);
    let player = address(PLAYER);
    let wallet = address(PLAYER_JETTON_WALLET);
    let chain = Arc::new(MockChain::new().with_stack(
        &minter,
        "get_wallet_address",
        vec![TvmStackEntry::try_from(&wallet)?],
    ));
    let factory = new_factory(&chain, None);

    let result = factory.get_contract(&minter).get_wallet_address(&player).await?;
    assert_eq!(result, wallet);

    let calls = chain.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].stack.len(), 1);
    assert_eq!(calls[0].stack[0].get_address_opt()?, Some(player));
    Ok(())
}

#[tokio::test]
async fn test_get_wallet_data() -> anyhow::Result<()> {
    common::init_logging();
    let wallet = address(PLAYER_JETTON_WALLET);
    let code = CellBuilder::new().store_u32(32, 0xc0de)?.build()?;
    let chain = Arc::new(MockChain::new().with_stack(
        &wallet,
        "get_wallet_data",
        vec![
            TvmStackEntry::from(BigInt::from(777)),
            TvmStackEntry::try_from(&address(PLAYER))?,
            TvmStackEntry::try_from(&address(JETTON_MINTER))?,
            TvmStackEntry::from(code.clone()),
        ],
    ));
    let factory = new_factory(&chain, None);

    let data = factory.get_contract(&wallet).get_wallet_data().await?;
    assert_eq!(data.balance, BigUint::from(777u32));
    assert_eq!(data.owner_address, address(PLAYER));
    assert_eq!(data.master_address, address(JETTON_MINTER));
    assert_eq!(data.wallet_code.as_ref(), &code);
    Ok(())
}

#[tokio::test]
async fn test_transfer_and_burn() -> anyhow::Result<()> {
    common::init_logging();
    let wallet = address(PLAYER_JETTON_WALLET);
    let player = address(PLAYER);
    let chain = Arc::new(MockChain::new());
    let sender = Arc::new(MockSender::new(&player));
    let factory = new_factory(&chain, Some(&sender));
    let contract = factory.get_contract(&wallet);

    let comment = CellBuilder::new().store_u32(32, 0)?.build()?.to_arc();
    let confirmation = contract
        .transfer(
            &address(JETTON_MINTER),
            &BigUint::from(500u32),
            &player,
            &BigUint::from(1u8),
            Some(&comment),
            &BigUint::from(50_000_000u32),
        )
        .await?;
    contract
        .burn(&BigUint::from(10u8), &player, &BigUint::from(50_000_000u32))
        .await?;

    let sent = sender.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].destination, wallet);
    assert_eq!(sent[0].value, BigUint::from(50_000_000u32));
    assert_eq!(confirmation.tx_hash, sent[0].body.cell_hash());

    let transfer = JettonTransferMessage::from_cell(&sent[0].body)?;
    assert_eq!(transfer.destination, address(JETTON_MINTER));
    assert_eq!(transfer.amount, BigUint::from(500u32));
    assert_eq!(transfer.response_destination, Some(player));
    assert_eq!(transfer.forward_payload.value, comment);
    // burn opcode
    assert_eq!(&sent[1].body.data()[..4], &[0x59, 0x5f, 0x07, 0xbc]);
    Ok(())
}

#[tokio::test]
async fn test_send_without_sender() -> anyhow::Result<()> {
    common::init_logging();
    let chain = Arc::new(MockChain::new());
    let factory = new_factory(&chain, None);

    let result = factory
        .get_contract(&address(JETTON_MINTER))
        .mint(
            &address(PLAYER),
            &BigUint::from(50_000_000u32),
            &BigUint::from(1_000u32),
            &BigUint::from(0u8),
            &BigUint::from(150_000_000u32),
        )
        .await;
    assert!(matches!(result, Err(TonContractError::InvalidArgument(_))));
    Ok(())
}

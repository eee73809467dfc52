use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::Config;
use num_bigint::BigUint;
use tonplay_client::client::{
    BlockIdExt, MessageSender, SmcRunResult, TonChainApi, TonClientError, TxConfirmation,
};
use tonplay_client::contract::TonContractFactory;
use tonplay_client::types::TvmStackEntry;
use tonplay_core::cell::ArcCell;
use tonplay_core::TonAddress;

#[allow(dead_code)]
static LOG: Once = Once::new();

#[allow(dead_code)]
pub fn init_logging() {
    LOG.call_once(|| {
        let stderr = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(log4rs::encode::pattern::PatternEncoder::new(
                "{d(%Y-%m-%d %H:%M:%S%.6f)} {T:>15.15} {h({l:>5.5})} {t}:{L} - {m}{n}",
            )))
            .build();

        let config = Config::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(LevelFilter::Info))
            .unwrap();

        log4rs::init_config(config).unwrap();
    })
}

#[allow(dead_code)]
pub const CRASH_GAME: &str = "EQAd8QRKoA5sKcug9bwK6vMdmhSAoAxr8vvABvC1TCeTude5";
#[allow(dead_code)]
pub const JETTON_MINTER: &str = "EQB3ncyBUTjZUA5EnFKR5_EnOMI9V1tTEAAPaiU71gc4TiUt";
#[allow(dead_code)]
pub const PLAYER: &str = "EQCGY3OVLtD9KRcOsP2ldQDtuY0FMzV7wPoxjrFbayBXc23c";
#[allow(dead_code)]
pub const PLAYER_JETTON_WALLET: &str = "EQDk2VTvn04SUKJrW7rXahzdF8_Qi6utb0wj43InCu9vdjrR";

#[allow(dead_code)]
pub fn address(text: &str) -> TonAddress {
    text.parse().unwrap()
}

/// Recorded get-method call.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct GetMethodCall {
    pub address: TonAddress,
    pub method: String,
    pub stack: Vec<TvmStackEntry>,
}

/// Chain answering get-methods from canned results.
#[derive(Default)]
pub struct MockChain {
    results: Mutex<HashMap<(TonAddress, String), SmcRunResult>>,
    calls: Mutex<Vec<GetMethodCall>>,
}

#[allow(dead_code)]
impl MockChain {
    pub fn new() -> MockChain {
        MockChain::default()
    }

    pub fn with_stack(self, address: &TonAddress, method: &str, stack: Vec<TvmStackEntry>) -> Self {
        self.with_result(
            address,
            method,
            SmcRunResult {
                gas_used: 1000,
                stack,
                exit_code: 0,
            },
        )
    }

    pub fn with_result(self, address: &TonAddress, method: &str, result: SmcRunResult) -> Self {
        self.results
            .lock()
            .unwrap()
            .insert((address.clone(), method.to_string()), result);
        self
    }

    pub fn calls(&self) -> Vec<GetMethodCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TonChainApi for MockChain {
    async fn current_head(&self) -> Result<BlockIdExt, TonClientError> {
        Ok(BlockIdExt {
            workchain: -1,
            shard: i64::MIN,
            seqno: 42,
            ..Default::default()
        })
    }

    async fn run_get_method(
        &self,
        _block: &BlockIdExt,
        address: &TonAddress,
        method: &str,
        stack: &[TvmStackEntry],
    ) -> Result<SmcRunResult, TonClientError> {
        self.calls.lock().unwrap().push(GetMethodCall {
            address: address.clone(),
            method: method.to_string(),
            stack: stack.to_vec(),
        });
        self.results
            .lock()
            .unwrap()
            .get(&(address.clone(), method.to_string()))
            .cloned()
            .ok_or_else(|| {
                TonClientError::chain_error(method, format!("no account state for {}", address))
            })
    }
}

/// Message captured by [`MockSender`].
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub destination: TonAddress,
    pub value: BigUint,
    pub body: ArcCell,
}

/// Wallet that confirms every message right away.
pub struct MockSender {
    address: TonAddress,
    sent: Mutex<Vec<SentMessage>>,
}

#[allow(dead_code)]
impl MockSender {
    pub fn new(address: &TonAddress) -> MockSender {
        MockSender {
            address: address.clone(),
            sent: Mutex::new(vec![]),
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for MockSender {
    fn address(&self) -> &TonAddress {
        &self.address
    }

    async fn send_and_wait(
        &self,
        destination: &TonAddress,
        value: &BigUint,
        body: ArcCell,
    ) -> Result<TxConfirmation, TonClientError> {
        let tx_hash = body.cell_hash();
        self.sent.lock().unwrap().push(SentMessage {
            destination: destination.clone(),
            value: value.clone(),
            body,
        });
        Ok(TxConfirmation {
            tx_hash,
            block: BlockIdExt::default(),
        })
    }
}

#[allow(dead_code)]
pub fn new_factory(chain: &Arc<MockChain>, sender: Option<&Arc<MockSender>>) -> TonContractFactory {
    match sender {
        Some(sender) => TonContractFactory::with_sender(chain.clone(), sender.clone()),
        None => TonContractFactory::new(chain.clone()),
    }
}

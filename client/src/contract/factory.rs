use std::sync::Arc;

use tonplay_core::TonAddress;

use crate::client::{MessageSender, TonChainApi};
use crate::contract::TonContract;

/// Hands out contract facades bound to one chain connection and, optionally, one sending wallet.
#[derive(Clone)]
pub struct TonContractFactory {
    inner: Arc<Inner>,
}

struct Inner {
    chain: Arc<dyn TonChainApi>,
    sender: Option<Arc<dyn MessageSender>>,
}

impl TonContractFactory {
    /// Read-only factory: get-methods work, sending messages fails.
    pub fn new(chain: Arc<dyn TonChainApi>) -> TonContractFactory {
        TonContractFactory {
            inner: Arc::new(Inner {
                chain,
                sender: None,
            }),
        }
    }

    pub fn with_sender(
        chain: Arc<dyn TonChainApi>,
        sender: Arc<dyn MessageSender>,
    ) -> TonContractFactory {
        TonContractFactory {
            inner: Arc::new(Inner {
                chain,
                sender: Some(sender),
            }),
        }
    }

    pub fn chain(&self) -> &Arc<dyn TonChainApi> {
        &self.inner.chain
    }

    pub fn sender(&self) -> Option<&Arc<dyn MessageSender>> {
        self.inner.sender.as_ref()
    }

    pub fn get_contract(&self, address: &TonAddress) -> TonContract {
        TonContract::new(self, address)
    }
}

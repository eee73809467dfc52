use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::message::{
    TonMessageError, CRASH_GAME_CRASH, CRASH_GAME_NEW_ROUND, CRASH_GAME_SET_TEST_DICT,
    GAME_WALLET_SETTLEMENT, JETTON_BURN, JETTON_BURN_NOTIFICATION, JETTON_EXCESSES,
    JETTON_INTERNAL_TRANSFER, JETTON_MINT, JETTON_TRANSFER, JETTON_TRANSFER_NOTIFICATION,
};

/// Every message body kind the tools send or decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PayloadKind {
    Transfer,
    TransferNotification,
    InternalTransfer,
    Excesses,
    Burn,
    BurnNotification,
    Mint,
    NewRound,
    Crash,
    Settlement,
    SetTestDict,
    Bet,
}

/// Where a payload kind is dispatched on its opcode. Opcodes only have to be unique per receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PayloadReceiver {
    JettonWallet,
    JettonMinter,
    CrashGame,
    GameWallet,
    ResponseDestination,
    /// Carried inside the forward payload of a jetton transfer.
    ForwardPayload,
}

impl PayloadKind {
    pub fn receiver(self) -> PayloadReceiver {
        match self {
            PayloadKind::Transfer | PayloadKind::InternalTransfer | PayloadKind::Burn => {
                PayloadReceiver::JettonWallet
            }
            PayloadKind::Mint | PayloadKind::BurnNotification => PayloadReceiver::JettonMinter,
            PayloadKind::TransferNotification
            | PayloadKind::NewRound
            | PayloadKind::Crash
            | PayloadKind::SetTestDict => PayloadReceiver::CrashGame,
            PayloadKind::Settlement => PayloadReceiver::GameWallet,
            PayloadKind::Excesses => PayloadReceiver::ResponseDestination,
            PayloadKind::Bet => PayloadReceiver::ForwardPayload,
        }
    }

    /// Opcode written and expected by the message layout of this kind. `None` for the bet,
    /// whose opcode depends on the contract revision.
    pub fn layout_opcode(self) -> Option<u32> {
        match self {
            PayloadKind::Transfer => Some(JETTON_TRANSFER),
            PayloadKind::TransferNotification => Some(JETTON_TRANSFER_NOTIFICATION),
            PayloadKind::InternalTransfer => Some(JETTON_INTERNAL_TRANSFER),
            PayloadKind::Excesses => Some(JETTON_EXCESSES),
            PayloadKind::Burn => Some(JETTON_BURN),
            PayloadKind::BurnNotification => Some(JETTON_BURN_NOTIFICATION),
            PayloadKind::Mint => Some(JETTON_MINT),
            PayloadKind::NewRound => Some(CRASH_GAME_NEW_ROUND),
            PayloadKind::Crash => Some(CRASH_GAME_CRASH),
            PayloadKind::Settlement => Some(GAME_WALLET_SETTLEMENT),
            PayloadKind::SetTestDict => Some(CRASH_GAME_SET_TEST_DICT),
            PayloadKind::Bet => None,
        }
    }
}

/// Opcodes of one deployed contract revision.
///
/// Deployed crash game revisions disagree on the bet opcode (a dedicated `0x9b0663d8` or the
/// jetton transfer opcode `0x0f8a7ea5`), so it has no default and must be configured.
/// Every other kind has a fixed message layout, and [`OpcodeTable::validate`] rejects a table
/// configuring a different opcode for it.
/// In JSON every opcode is a `"0x..."` string or a plain number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpcodeTable {
    #[serde(with = "hex_opcode")]
    pub transfer: u32,
    #[serde(with = "hex_opcode")]
    pub transfer_notification: u32,
    #[serde(with = "hex_opcode")]
    pub internal_transfer: u32,
    #[serde(with = "hex_opcode")]
    pub excesses: u32,
    #[serde(with = "hex_opcode")]
    pub burn: u32,
    #[serde(with = "hex_opcode")]
    pub burn_notification: u32,
    #[serde(with = "hex_opcode")]
    pub mint: u32,
    #[serde(with = "hex_opcode")]
    pub new_round: u32,
    #[serde(with = "hex_opcode")]
    pub crash: u32,
    #[serde(with = "hex_opcode")]
    pub settlement: u32,
    #[serde(with = "hex_opcode")]
    pub set_test_dict: u32,
    #[serde(with = "hex_opcode::option")]
    pub bet: Option<u32>,
}

impl Default for OpcodeTable {
    fn default() -> Self {
        OpcodeTable {
            transfer: JETTON_TRANSFER,
            transfer_notification: JETTON_TRANSFER_NOTIFICATION,
            internal_transfer: JETTON_INTERNAL_TRANSFER,
            excesses: JETTON_EXCESSES,
            burn: JETTON_BURN,
            burn_notification: JETTON_BURN_NOTIFICATION,
            mint: JETTON_MINT,
            new_round: CRASH_GAME_NEW_ROUND,
            crash: CRASH_GAME_CRASH,
            settlement: GAME_WALLET_SETTLEMENT,
            set_test_dict: CRASH_GAME_SET_TEST_DICT,
            bet: None,
        }
    }
}

impl OpcodeTable {
    pub fn with_bet_opcode(mut self, opcode: u32) -> Self {
        self.bet = Some(opcode);
        self
    }

    pub fn from_json(json: &str) -> Result<OpcodeTable, TonMessageError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, TonMessageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn opcode(&self, kind: PayloadKind) -> Option<u32> {
        match kind {
            PayloadKind::Transfer => Some(self.transfer),
            PayloadKind::TransferNotification => Some(self.transfer_notification),
            PayloadKind::InternalTransfer => Some(self.internal_transfer),
            PayloadKind::Excesses => Some(self.excesses),
            PayloadKind::Burn => Some(self.burn),
            PayloadKind::BurnNotification => Some(self.burn_notification),
            PayloadKind::Mint => Some(self.mint),
            PayloadKind::NewRound => Some(self.new_round),
            PayloadKind::Crash => Some(self.crash),
            PayloadKind::Settlement => Some(self.settlement),
            PayloadKind::SetTestDict => Some(self.set_test_dict),
            PayloadKind::Bet => self.bet,
        }
    }

    pub fn require(&self, kind: PayloadKind) -> Result<u32, TonMessageError> {
        self.opcode(kind)
            .ok_or(TonMessageError::MissingOpcode(kind))
    }

    /// Fails when the configured opcode differs from the one baked into the message layout.
    pub fn ensure_layout(&self, kind: PayloadKind, layout: u32) -> Result<(), TonMessageError> {
        let configured = self.require(kind)?;
        if configured != layout {
            return Err(TonMessageError::LayoutMismatch {
                kind,
                configured,
                layout,
            });
        }
        Ok(())
    }

    /// Rejects two kinds sharing an opcode on the same receiver, and any opcode that differs
    /// from the message layout it would be encoded with.
    pub fn validate(&self) -> Result<(), TonMessageError> {
        let configured: Vec<(PayloadKind, u32)> = PayloadKind::iter()
            .filter_map(|kind| self.opcode(kind).map(|opcode| (kind, opcode)))
            .collect();
        for (idx, (first, first_opcode)) in configured.iter().enumerate() {
            for (second, second_opcode) in &configured[idx + 1..] {
                if first.receiver() == second.receiver() && first_opcode == second_opcode {
                    return Err(TonMessageError::OpcodeConflict {
                        receiver: first.receiver().to_string(),
                        first: *first,
                        second: *second,
                        opcode: *first_opcode,
                    });
                }
            }
        }
        for kind in PayloadKind::iter() {
            if let Some(layout) = kind.layout_opcode() {
                self.ensure_layout(kind, layout)?;
            }
        }

        match self.bet {
            Some(bet) if bet == self.transfer => log::warn!(
                "bet opcode {:#010x} aliases the jetton transfer opcode, accepted only inside transfer forward payloads",
                bet
            ),
            Some(bet) => log::debug!("bet opcode {:#010x}", bet),
            None => log::warn!("bet opcode is not configured, bets can not be encoded"),
        }
        Ok(())
    }
}

/// Parses `0x`-prefixed hex or decimal opcode text.
pub fn parse_opcode(text: &str) -> Result<u32, TonMessageError> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex_digits) => u32::from_str_radix(hex_digits, 16),
        None => text.parse::<u32>(),
    };
    parsed.map_err(|e| TonMessageError::InvalidArgument(format!("opcode {text:?}: {e}")))
}

mod hex_opcode {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::parse_opcode;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawOpcode {
        Number(u32),
        Text(String),
    }

    impl RawOpcode {
        fn into_opcode<E: Error>(self) -> Result<u32, E> {
            match self {
                RawOpcode::Number(opcode) => Ok(opcode),
                RawOpcode::Text(text) => parse_opcode(&text).map_err(E::custom),
            }
        }
    }

    pub fn serialize<S: Serializer>(opcode: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{opcode:#010x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        RawOpcode::deserialize(deserializer)?.into_opcode()
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        use super::RawOpcode;

        pub fn serialize<S: Serializer>(
            opcode: &Option<u32>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match opcode {
                Some(opcode) => serializer.serialize_some(&format!("{opcode:#010x}")),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<u32>, D::Error> {
            Option::<RawOpcode>::deserialize(deserializer)?
                .map(RawOpcode::into_opcode)
                .transpose()
        }
    }
}

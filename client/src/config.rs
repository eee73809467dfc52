use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonplay_core::contract_data::ROUND_DICT_KEY_BITS;
use tonplay_core::message::{OpcodeTable, TonMessageError};
use tonplay_core::TonAddress;

/// Decimals of Toncoin amounts.
pub const TON_DECIMALS: u32 = 9;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid amount {value:?} ({message})")]
    InvalidAmount { value: String, message: String },

    #[error("Invalid parameter {name} ({message})")]
    InvalidParam { name: &'static str, message: String },

    #[error("{0}")]
    OpcodeError(#[from] TonMessageError),

    #[error("Config JSON error ({0})")]
    Json(#[from] serde_json::Error),
}

/// Crash game deploy and operation parameters.
///
/// ```json
/// {
///   "crash_game_addr": "EQ...",
///   "jetton_minter_addr": "EQ...",
///   "max_rounds_parallel": 3,
///   "min_interval_time": 30,
///   "round_num": 1,
///   "bet": { "amount": "100", "multiple": 150 },
///   "opcodes": { "bet": "0x9b0663d8" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrashGameParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crash_game_addr: Option<TonAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jetton_minter_addr: Option<TonAddress>,
    pub max_rounds_parallel: u32,
    /// Seconds.
    pub min_interval_time: u32,
    #[serde(default = "default_round_num")]
    pub round_num: u32,
    pub bet: BetParams,
    #[serde(default)]
    pub fees: GasFees,
    #[serde(default = "default_jetton_decimals")]
    pub jetton_decimals: u32,
    #[serde(default)]
    pub opcodes: OpcodeTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetParams {
    /// Jetton amount as a decimal string, e.g. `"12.5"`.
    pub amount: String,
    /// Cash-out multiple in percent.
    pub multiple: u32,
}

/// Toncoin amounts attached to each operation, as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasFees {
    pub new_round: String,
    pub crash: String,
    pub crash_forward: String,
    pub bet: String,
    pub bet_forward: String,
    pub settlement: String,
    pub settlement_forward: String,
    pub mint: String,
    pub deploy: String,
}

impl Default for GasFees {
    fn default() -> Self {
        GasFees {
            new_round: "0.05".to_string(),
            crash: "0.1".to_string(),
            crash_forward: "0.05".to_string(),
            bet: "0.15".to_string(),
            bet_forward: "0.1".to_string(),
            settlement: "0.25".to_string(),
            settlement_forward: "0.2".to_string(),
            mint: "0.15".to_string(),
            deploy: "0.2".to_string(),
        }
    }
}

fn default_round_num() -> u32 {
    1
}

fn default_jetton_decimals() -> u32 {
    TON_DECIMALS
}

impl GasFees {
    fn all(&self) -> [(&'static str, &String); 9] {
        [
            ("new_round", &self.new_round),
            ("crash", &self.crash),
            ("crash_forward", &self.crash_forward),
            ("bet", &self.bet),
            ("bet_forward", &self.bet_forward),
            ("settlement", &self.settlement),
            ("settlement_forward", &self.settlement_forward),
            ("mint", &self.mint),
            ("deploy", &self.deploy),
        ]
    }
}

impl CrashGameParams {
    pub fn from_json(json: &str) -> Result<CrashGameParams, ConfigError> {
        let params: CrashGameParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds_parallel == 0 || self.max_rounds_parallel > 1 << ROUND_DICT_KEY_BITS {
            return Err(ConfigError::InvalidParam {
                name: "max_rounds_parallel",
                message: format!(
                    "{} is outside 1..={}",
                    self.max_rounds_parallel,
                    1 << ROUND_DICT_KEY_BITS
                ),
            });
        }
        if self.round_num == 0 {
            return Err(ConfigError::InvalidParam {
                name: "round_num",
                message: "round numbers start at 1".to_string(),
            });
        }
        if self.bet.multiple == 0 {
            return Err(ConfigError::InvalidParam {
                name: "bet.multiple",
                message: "must be positive".to_string(),
            });
        }
        self.bet_amount()?;
        for (_, fee) in self.fees.all() {
            parse_decimal_amount(fee, TON_DECIMALS)?;
        }
        self.opcodes.validate()?;
        Ok(())
    }

    /// Bet amount in jetton base units.
    pub fn bet_amount(&self) -> Result<BigUint, ConfigError> {
        parse_decimal_amount(&self.bet.amount, self.jetton_decimals)
    }

    /// Nanotons of the fee called `name`, see [`GasFees`].
    pub fn fee(&self, name: &str) -> Result<BigUint, ConfigError> {
        let (_, value) = self
            .fees
            .all()
            .into_iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| ConfigError::InvalidParam {
                name: "fees",
                message: format!("unknown fee {}", name),
            })?;
        parse_decimal_amount(value, TON_DECIMALS)
    }

    pub fn crash_game_address(&self) -> Result<&TonAddress, ConfigError> {
        self.crash_game_addr
            .as_ref()
            .ok_or_else(|| ConfigError::InvalidParam {
                name: "crash_game_addr",
                message: "not configured".to_string(),
            })
    }

    pub fn jetton_minter_address(&self) -> Result<&TonAddress, ConfigError> {
        self.jetton_minter_addr
            .as_ref()
            .ok_or_else(|| ConfigError::InvalidParam {
                name: "jetton_minter_addr",
                message: "not configured".to_string(),
            })
    }
}

/// Parses a non-negative decimal string (`"0.05"`, `"12"`, `".5"`) into base units of a token
/// with `decimals` decimals.
pub fn parse_decimal_amount(value: &str, decimals: u32) -> Result<BigUint, ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidAmount {
        value: value.to_string(),
        message: message.to_string(),
    };

    let trimmed = value.trim();
    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (trimmed, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid("empty amount"));
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(invalid("not a decimal number"));
    }
    if frac_part.len() > decimals as usize {
        return Err(invalid(&format!("more than {} decimals", decimals)));
    }

    let mut digits = String::with_capacity(int_part.len() + decimals as usize);
    digits.push_str(int_part);
    digits.push_str(frac_part);
    digits.extend(std::iter::repeat('0').take(decimals as usize - frac_part.len()));
    if digits.is_empty() {
        return Ok(BigUint::zero());
    }
    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| invalid("not a decimal number"))
}

use crate::cell::dict::{DictKey, Dictionary};
use crate::cell::{ArcCell, Cell, CellBuilder, CellParser, TonCellError};
use crate::meta::{attribute_key, MetaDataError, ATTRIBUTE_KEY_BITS, META_URI};

/// Content layout tag of an on-chain attribute dictionary.
pub const ONCHAIN_CONTENT_PREFIX: u8 = 0x00;
/// Content layout tag of an off-chain URI.
pub const OFFCHAIN_CONTENT_PREFIX: u8 = 0x01;

/// Attribute value stored inline as a snake string.
pub const SNAKE_DATA_FORMAT: u8 = 0x00;
/// Attribute value stored as a dictionary of chunks. Recognized, not supported.
pub const CHUNKED_DATA_FORMAT: u8 = 0x01;

/// On-chain attributes: a `HashmapE 256` keyed by `SHA256(name)`. Every value is a cell holding
/// a single reference to `format:uint8 data:SnakeData`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnchainContent {
    dict: Dictionary,
}

impl Default for OnchainContent {
    fn default() -> Self {
        OnchainContent::new()
    }
}

impl OnchainContent {
    pub fn new() -> OnchainContent {
        OnchainContent {
            dict: Dictionary::new(ATTRIBUTE_KEY_BITS),
        }
    }

    pub fn from_dict(dict: Dictionary) -> Result<OnchainContent, TonCellError> {
        if dict.key_len_bits() != ATTRIBUTE_KEY_BITS {
            return Err(TonCellError::KeyLengthMismatch {
                expected: ATTRIBUTE_KEY_BITS,
                actual: dict.key_len_bits(),
            });
        }
        Ok(OnchainContent { dict })
    }

    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    pub fn contains(&self, name: &str) -> Result<bool, TonCellError> {
        Ok(self.dict.get(&Self::key(name))?.is_some())
    }

    /// Stores `value` as a snake-formatted attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: &str, value: &[u8]) -> Result<&mut Self, TonCellError> {
        let data = CellBuilder::new()
            .store_u8(8, SNAKE_DATA_FORMAT)?
            .store_snake_bytes(value)?
            .build()?;
        self.set_attribute_cell(name, &data.to_arc())
    }

    /// Stores an already encoded `format:uint8 data` cell under `name`.
    pub fn set_attribute_cell(
        &mut self,
        name: &str,
        data: &ArcCell,
    ) -> Result<&mut Self, TonCellError> {
        let wrapper = CellBuilder::new().store_reference(data)?.build()?;
        self.dict.set(Self::key(name), wrapper.to_arc())?;
        Ok(self)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Result<Option<ArcCell>, TonCellError> {
        self.dict.remove(&Self::key(name))
    }

    /// Returns the raw attribute bytes, `None` when the attribute is absent.
    pub fn get_attribute(&self, name: &str) -> Result<Option<Vec<u8>>, MetaDataError> {
        let wrapper = match self.dict.get(&Self::key(name))? {
            Some(wrapper) => wrapper,
            None => return Ok(None),
        };
        let data = wrapper.reference(0)?;
        let mut parser = data.parser();
        match parser.load_u8(8)? {
            CHUNKED_DATA_FORMAT => Err(MetaDataError::UnsupportedContentEncoding {
                format: CHUNKED_DATA_FORMAT,
            }),
            _ => Ok(Some(parser.load_snake_bytes()?)),
        }
    }

    pub fn get_string(&self, name: &str) -> Result<Option<String>, MetaDataError> {
        self.get_attribute(name)?
            .map(|bytes| String::from_utf8(bytes).map_err(|e| MetaDataError::invalid_utf8(name, e)))
            .transpose()
    }

    fn key(name: &str) -> DictKey {
        DictKey::from_hash(&attribute_key(name))
    }
}

/// Token content cell in one of its three layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JettonContent {
    Offchain { uri: String },
    Onchain(OnchainContent),
    /// On-chain attributes plus a `uri` attribute pointing to the rest of the metadata.
    Hybrid { uri: String, onchain: OnchainContent },
}

impl JettonContent {
    pub fn offchain(uri: &str) -> JettonContent {
        JettonContent::Offchain {
            uri: uri.to_string(),
        }
    }

    pub fn uri(&self) -> Option<&str> {
        match self {
            JettonContent::Offchain { uri } | JettonContent::Hybrid { uri, .. } => Some(uri),
            JettonContent::Onchain(_) => None,
        }
    }

    pub fn onchain(&self) -> Option<&OnchainContent> {
        match self {
            JettonContent::Onchain(onchain) | JettonContent::Hybrid { onchain, .. } => {
                Some(onchain)
            }
            JettonContent::Offchain { .. } => None,
        }
    }

    pub fn to_cell(&self) -> Result<Cell, TonCellError> {
        let cell = match self {
            JettonContent::Offchain { uri } => encode_offchain(uri)?,
            JettonContent::Onchain(onchain) => encode_onchain(onchain)?,
            JettonContent::Hybrid { uri, onchain } => {
                let mut attributes = onchain.clone();
                attributes.set_attribute(META_URI.name, uri.as_bytes())?;
                encode_onchain(&attributes)?
            }
        };
        log::debug!("content cell hash: {}", cell.cell_hash_hex());
        Ok(cell)
    }

    pub fn from_cell(cell: &Cell) -> Result<JettonContent, MetaDataError> {
        let mut parser = cell.parser();
        if parser.remaining_bits() < 8 {
            if parser.remaining_refs() == 0 {
                return Ok(JettonContent::offchain(""));
            }
            let inner = parser.next_reference()?;
            return Self::parse(&mut inner.parser());
        }
        Self::parse(&mut parser)
    }

    fn parse(parser: &mut CellParser) -> Result<JettonContent, MetaDataError> {
        let prefix = parser.load_u8(8)?;
        match prefix {
            ONCHAIN_CONTENT_PREFIX => {
                let mut onchain = OnchainContent::from_dict(parser.load_dict(ATTRIBUTE_KEY_BITS)?)?;
                match onchain.get_string(META_URI.name)? {
                    Some(uri) if !uri.is_empty() => {
                        onchain.remove_attribute(META_URI.name)?;
                        Ok(JettonContent::Hybrid { uri, onchain })
                    }
                    _ => Ok(JettonContent::Onchain(onchain)),
                }
            }
            OFFCHAIN_CONTENT_PREFIX => Ok(JettonContent::Offchain {
                uri: load_snake_string(parser)?,
            }),
            // Content written without the layout tag: the byte already read is the first
            // character of the URI.
            first => {
                let mut uri = String::new();
                uri.push(char::from(first));
                uri.push_str(&load_snake_string(parser)?);
                Ok(JettonContent::Offchain { uri })
            }
        }
    }
}

pub fn encode_offchain(uri: &str) -> Result<Cell, TonCellError> {
    CellBuilder::new()
        .store_u8(8, OFFCHAIN_CONTENT_PREFIX)?
        .store_snake_bytes(uri.as_bytes())?
        .build()
}

pub fn encode_onchain(content: &OnchainContent) -> Result<Cell, TonCellError> {
    CellBuilder::new()
        .store_u8(8, ONCHAIN_CONTENT_PREFIX)?
        .store_dict(&content.dict)?
        .build()
}

fn load_snake_string(parser: &mut CellParser) -> Result<String, MetaDataError> {
    let bytes = parser.load_snake_bytes()?;
    String::from_utf8(bytes).map_err(|e| MetaDataError::invalid_utf8(META_URI.name, e))
}

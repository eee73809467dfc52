pub use content::*;
pub use error::*;
pub use jetton::*;

mod content;
mod error;
mod jetton;

use lazy_static::lazy_static;
use sha2::{Digest, Sha256};

use crate::TonHash;

/// Key width of the on-chain attribute dictionary.
pub const ATTRIBUTE_KEY_BITS: usize = 256;

/// Dictionary key of an on-chain attribute: `SHA256(name)`.
pub fn attribute_key(name: &str) -> TonHash {
    let mut hasher: Sha256 = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.finalize().into()
}

pub(crate) struct MetaDataField {
    pub(crate) name: &'static str,
    pub(crate) key: TonHash,
}

impl MetaDataField {
    fn new(name: &'static str) -> MetaDataField {
        MetaDataField {
            name,
            key: attribute_key(name),
        }
    }
}

lazy_static! {
    pub(crate) static ref META_NAME: MetaDataField = MetaDataField::new("name");
    pub(crate) static ref META_DESCRIPTION: MetaDataField = MetaDataField::new("description");
    pub(crate) static ref META_IMAGE: MetaDataField = MetaDataField::new("image");
    pub(crate) static ref META_IMAGE_DATA: MetaDataField = MetaDataField::new("image_data");
    pub(crate) static ref META_SYMBOL: MetaDataField = MetaDataField::new("symbol");
    pub(crate) static ref META_DECIMALS: MetaDataField = MetaDataField::new("decimals");
    pub(crate) static ref META_AMOUNT_STYLE: MetaDataField = MetaDataField::new("amount_style");
    pub(crate) static ref META_RENDER_TYPE: MetaDataField = MetaDataField::new("render_type");
    pub(crate) static ref META_URI: MetaDataField = MetaDataField::new("uri");
}

#[cfg(test)]
mod tests {
    use super::{attribute_key, META_SYMBOL};

    #[test]
    fn test_attribute_key() {
        assert_eq!(
            hex::encode(attribute_key("symbol")),
            "b76a7ca153c24671658335bbd08946350ffc621fa1c516e7123095d4ffd5c581"
        );
        assert_eq!(META_SYMBOL.key, attribute_key(META_SYMBOL.name));
    }
}

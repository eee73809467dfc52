use serde::{Deserialize, Serialize};
use serde_aux::prelude::*;

use crate::cell::TonCellError;
use crate::meta::*;

#[derive(Serialize, PartialEq, Eq, Deserialize, Debug, Clone, Default)]
pub struct JettonMetaData {
    ///Optional. UTF8 string. The name of the token - e.g. "Crash Coin".
    pub name: Option<String>,
    ///Optional. Used by "Semi-chain content layout". ASCII string. A URI pointing to JSON document with metadata.
    pub uri: Option<String>,
    ///Optional. UTF8 string. The symbol of the token - e.g. "CRSH".
    pub symbol: Option<String>,
    ///Optional. UTF8 string. Describes the token.
    pub description: Option<String>,
    ///Optional. ASCII string. A URI pointing to a jetton icon with mime type image.
    pub image: Option<String>,
    ///Optional. Either binary representation of the image for onchain layout or base64 for offchain layout.
    pub image_data: Option<String>,
    ///Optional. If not specified, 9 is used by default. UTF8 encoded string with number from 0 to 255.
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub decimals: Option<u8>,
    ///Optional. "n", "n-of-total" or "%". How the amount is displayed.
    #[serde(default)]
    pub amount_style: Option<String>,
    ///Optional. "currency" or "game". How the token is rendered.
    #[serde(default)]
    pub render_type: Option<String>,
}

impl JettonMetaData {
    pub fn from_json(json: &str) -> Result<JettonMetaData, MetaDataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, MetaDataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads the named attributes. `uri` is filled for off-chain and hybrid content.
    pub fn from_content(content: &JettonContent) -> Result<JettonMetaData, MetaDataError> {
        let mut meta = match content.onchain() {
            Some(onchain) => Self::from_onchain(onchain)?,
            None => JettonMetaData::default(),
        };
        if let Some(uri) = content.uri() {
            meta.uri = Some(uri.to_string());
        }
        Ok(meta)
    }

    pub fn from_onchain(onchain: &OnchainContent) -> Result<JettonMetaData, MetaDataError> {
        let decimals = onchain
            .get_string(META_DECIMALS.name)?
            .and_then(|v| v.trim().parse::<u8>().ok());
        Ok(JettonMetaData {
            name: onchain.get_string(META_NAME.name)?,
            uri: onchain.get_string(META_URI.name)?,
            symbol: onchain.get_string(META_SYMBOL.name)?,
            description: onchain.get_string(META_DESCRIPTION.name)?,
            image: onchain.get_string(META_IMAGE.name)?,
            image_data: onchain.get_string(META_IMAGE_DATA.name)?,
            decimals,
            amount_style: onchain.get_string(META_AMOUNT_STYLE.name)?,
            render_type: onchain.get_string(META_RENDER_TYPE.name)?,
        })
    }

    /// Writes every non-empty named attribute except `uri`.
    pub fn to_onchain(&self) -> Result<OnchainContent, TonCellError> {
        let decimals = self.decimals.map(|d| d.to_string());
        let fields = [
            (&*META_NAME, &self.name),
            (&*META_DESCRIPTION, &self.description),
            (&*META_IMAGE, &self.image),
            (&*META_IMAGE_DATA, &self.image_data),
            (&*META_SYMBOL, &self.symbol),
            (&*META_DECIMALS, &decimals),
            (&*META_AMOUNT_STYLE, &self.amount_style),
            (&*META_RENDER_TYPE, &self.render_type),
        ];

        let mut onchain = OnchainContent::new();
        for (field, value) in fields {
            match value {
                Some(value) if !value.is_empty() => {
                    onchain.set_attribute(field.name, value.as_bytes())?;
                }
                _ => {}
            }
        }
        Ok(onchain)
    }

    /// Picks the layout: off-chain when only `uri` is set, hybrid when `uri` comes with other
    /// attributes, on-chain otherwise.
    pub fn to_content(&self) -> Result<JettonContent, TonCellError> {
        let onchain = self.to_onchain()?;
        let uri = self.uri.as_ref().filter(|uri| !uri.is_empty());
        let content = match uri {
            Some(uri) if onchain.is_empty() => JettonContent::offchain(uri),
            Some(uri) => JettonContent::Hybrid {
                uri: uri.clone(),
                onchain,
            },
            None => JettonContent::Onchain(onchain),
        };
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::JettonMetaData;
    use crate::meta::JettonContent;

    #[test]
    fn test_decimals_from_string_or_number() -> anyhow::Result<()> {
        let from_str = JettonMetaData::from_json(r#"{"symbol":"CRSH","decimals":"9"}"#)?;
        let from_num = JettonMetaData::from_json(r#"{"symbol":"CRSH","decimals":9}"#)?;
        assert_eq!(from_str.decimals, Some(9));
        assert_eq!(from_str, from_num);

        let absent = JettonMetaData::from_json(r#"{"name":"Crash"}"#)?;
        assert_eq!(absent.decimals, None);
        assert_eq!(absent.render_type, None);
        Ok(())
    }

    #[test]
    fn test_layout_choice() -> anyhow::Result<()> {
        let offchain = JettonMetaData {
            uri: Some("https://tonplay.io/crsh.json".to_string()),
            ..Default::default()
        };
        assert!(matches!(offchain.to_content()?, JettonContent::Offchain { .. }));

        let onchain = JettonMetaData {
            symbol: Some("CRSH".to_string()),
            decimals: Some(9),
            ..Default::default()
        };
        let content = onchain.to_content()?;
        assert!(matches!(content, JettonContent::Onchain(_)));

        let hybrid = JettonMetaData {
            uri: Some("https://tonplay.io/crsh.json".to_string()),
            ..onchain.clone()
        };
        assert!(matches!(hybrid.to_content()?, JettonContent::Hybrid { .. }));
        Ok(())
    }

    #[test]
    fn test_content_cell_round_trip() -> anyhow::Result<()> {
        let meta = JettonMetaData {
            name: Some("Crash".to_string()),
            uri: Some("https://tonplay.io/crsh.json".to_string()),
            symbol: Some("CRSH".to_string()),
            description: Some(String::new()),
            decimals: Some(6),
            render_type: Some("game".to_string()),
            ..Default::default()
        };
        let cell = meta.to_content()?.to_cell()?;
        let decoded = JettonMetaData::from_content(&JettonContent::from_cell(&cell)?)?;

        // empty attributes are not written
        let expected = JettonMetaData {
            description: None,
            ..meta
        };
        assert_eq!(decoded, expected);
        Ok(())
    }
}

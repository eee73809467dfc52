use num_bigint::BigUint;

use crate::cell::{ArcCell, CellBuilder, CellParser, TonCellError};
use crate::meta::{JettonContent, MetaDataError};
use crate::tlb_types::primitives::reference::Ref;
use crate::tlb_types::tlb::TLB;
use crate::TonAddress;

/// Jetton minter storage:
///
/// ```raw
/// total_supply:Coins admin_address:MsgAddress content:^Cell jetton_wallet_code:^Cell
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JettonMinterData {
    pub total_supply: BigUint,
    /// `None` once the admin has been dropped.
    pub admin: Option<TonAddress>,
    pub content: Ref<ArcCell>,
    pub wallet_code: Ref<ArcCell>,
}

impl JettonMinterData {
    pub fn new(
        total_supply: &BigUint,
        admin: &TonAddress,
        content: &JettonContent,
        wallet_code: &ArcCell,
    ) -> Result<Self, TonCellError> {
        Ok(JettonMinterData {
            total_supply: total_supply.clone(),
            admin: Some(admin.clone()),
            content: Ref::new(content.to_cell()?.to_arc()),
            wallet_code: Ref::new(wallet_code.clone()),
        })
    }

    pub fn jetton_content(&self) -> Result<JettonContent, MetaDataError> {
        JettonContent::from_cell(&self.content)
    }
}

impl TLB for JettonMinterData {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let total_supply = parser.load_coins()?;
        let admin = parser.load_address_opt()?;
        let content = TLB::read(parser)?;
        let wallet_code = TLB::read(parser)?;
        parser.ensure_empty()?;

        Ok(JettonMinterData {
            total_supply,
            admin,
            content,
            wallet_code,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        dst.store_coins(&self.total_supply)?;
        dst.store_address_opt(self.admin.as_ref())?;
        self.content.write(dst)?;
        self.wallet_code.write(dst)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_bigint::BigUint;

    use super::JettonMinterData;
    use crate::cell::CellBuilder;
    use crate::meta::{JettonContent, JettonMetaData};
    use crate::tlb_types::tlb::TLB;
    use crate::TonAddress;

    #[test]
    fn test_minter_data_layout() -> anyhow::Result<()> {
        let admin = TonAddress::from_str("EQAd8QRKoA5sKcug9bwK6vMdmhSAoAxr8vvABvC1TCeTude5")?;
        let wallet_code = CellBuilder::new().store_u32(32, 0xdeadbeef)?.build()?.to_arc();
        let meta = JettonMetaData {
            symbol: Some("CRSH".to_string()),
            decimals: Some(9),
            ..Default::default()
        };
        let data = JettonMinterData::new(
            &BigUint::from(0u8),
            &admin,
            &meta.to_content()?,
            &wallet_code,
        )?;

        let cell = data.to_cell()?;
        assert_eq!(cell.bit_len(), 4 + 267);
        assert_eq!(cell.references().len(), 2);
        assert_eq!(cell.reference(1)?, &wallet_code);

        let parsed = JettonMinterData::from_cell(&cell)?;
        assert_eq!(parsed, data);
        let content = parsed.jetton_content()?;
        assert!(matches!(content, JettonContent::Onchain(_)));
        assert_eq!(JettonMetaData::from_content(&content)?, meta);
        Ok(())
    }
}

use crate::cell::{ArcCell, CellBuilder, CellParser, TonCellError};
use crate::tlb_types::primitives::option::OptionRef;
use crate::tlb_types::tlb::TLB;
use crate::TonAddress;

// https://github.com/ton-blockchain/ton/blob/59a8cf0ae5c3062d14ec4c89a04fee80b5fd05c1/crypto/block/block.tlb#L281
#[derive(Debug, Clone, PartialEq)]
pub struct StateInit {
    pub split_depth: Option<u8>,
    pub tick_tock: Option<TickTock>,
    pub code: OptionRef<ArcCell>,
    pub data: OptionRef<ArcCell>,
    // library:(HashmapE 256 SimpleLib) kept as a raw cell
    pub library: OptionRef<ArcCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickTock {
    pub tick: bool,
    pub tock: bool,
}

impl StateInit {
    pub const fn new(code: ArcCell, data: ArcCell) -> Self {
        StateInit {
            split_depth: None,
            tick_tock: None,
            code: OptionRef::new(code),
            data: OptionRef::new(data),
            library: OptionRef::NONE,
        }
    }

    /// Address a contract deployed with this state init gets in `workchain`.
    pub fn derive_address(&self, workchain: i32) -> Result<TonAddress, TonCellError> {
        let hash = self.to_cell_hash()?;
        Ok(TonAddress::new(workchain, &hash))
    }
}

impl TLB for StateInit {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let split_depth = if parser.load_bit()? {
            Some(parser.load_u8(5)?)
        } else {
            None
        };
        Ok(StateInit {
            split_depth,
            tick_tock: TLB::read(parser)?,
            code: TLB::read(parser)?,
            data: TLB::read(parser)?,
            library: TLB::read(parser)?,
        })
    }

    fn write_definition(&self, dst: &mut CellBuilder) -> Result<(), TonCellError> {
        match self.split_depth {
            Some(depth) => dst.store_bit(true)?.store_u8(5, depth)?,
            None => dst.store_bit(false)?,
        };
        self.tick_tock.write(dst)?;
        self.code.write(dst)?;
        self.data.write(dst)?;
        self.library.write(dst)?;
        Ok(())
    }
}

impl TLB for TickTock {
    fn read_definition(parser: &mut CellParser) -> Result<Self, TonCellError> {
        let tick = parser.load_bit()?;
        let tock = parser.load_bit()?;
        Ok(TickTock { tick, tock })
    }

    fn write_definition(&self, builder: &mut CellBuilder) -> Result<(), TonCellError> {
        builder.store_bit(self.tick)?;
        builder.store_bit(self.tock)?;
        Ok(())
    }
}

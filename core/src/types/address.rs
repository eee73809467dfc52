use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use crc::Crc;
use lazy_static::lazy_static;

use super::{TonAddressParseError, TonHash};

mod serde_impl;

lazy_static! {
    pub static ref CRC_16_XMODEM: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_XMODEM);
}

/// Internal standard address (`addr_std` without anycast).
///
/// The "none" address (`addr_none$00`) is not a value of this type: fields that may hold it
/// are typed `Option<TonAddress>` and go through `store_address_opt`/`load_address_opt`.
#[derive(PartialEq, Eq, Clone, Hash, PartialOrd, Ord)]
pub struct TonAddress {
    pub workchain: i32,
    pub hash_part: TonHash,
}

impl TonAddress {
    pub const fn new(workchain: i32, hash_part: &TonHash) -> TonAddress {
        TonAddress {
            workchain,
            hash_part: *hash_part,
        }
    }

    pub fn from_hex_str(s: &str) -> Result<TonAddress, TonAddressParseError> {
        let (wc, hash) = s.split_once(':').ok_or_else(|| {
            TonAddressParseError::new(s, "Invalid hex address string: wrong address format")
        })?;

        let workchain = wc.parse::<i32>().map_err(|_| {
            TonAddressParseError::new(s, "Invalid hex address string: parse int error")
        })?;

        let hash_part: TonHash = hex::decode(hash)
            .map_err(|_| TonAddressParseError::new(s, "Invalid hex address string: hex decode error"))?
            .as_slice()
            .try_into()
            .map_err(|_| {
                TonAddressParseError::new(s, "Invalid hex address string: hash must be 32 bytes")
            })?;

        Ok(TonAddress::new(workchain, &hash_part))
    }

    pub fn from_base64_url(s: &str) -> Result<TonAddress, TonAddressParseError> {
        Ok(Self::from_base64_url_flags(s)?.0)
    }

    /// Parses url-safe base64 representation of an address
    ///
    /// # Returns
    /// the address, non-bounceable flag, non-production flag.
    pub fn from_base64_url_flags(
        s: &str,
    ) -> Result<(TonAddress, bool, bool), TonAddressParseError> {
        Self::decode_base64(s, URL_SAFE_NO_PAD.decode(s).ok(), "base64url")
    }

    pub fn from_base64_std(s: &str) -> Result<TonAddress, TonAddressParseError> {
        Ok(Self::from_base64_std_flags(s)?.0)
    }

    /// Parses standard base64 representation of an address
    ///
    /// # Returns
    /// the address, non-bounceable flag, non-production flag.
    pub fn from_base64_std_flags(
        s: &str,
    ) -> Result<(TonAddress, bool, bool), TonAddressParseError> {
        Self::decode_base64(s, STANDARD_NO_PAD.decode(s).ok(), "base64std")
    }

    fn decode_base64(
        src: &str,
        decoded: Option<Vec<u8>>,
        kind: &str,
    ) -> Result<(TonAddress, bool, bool), TonAddressParseError> {
        if src.len() != 48 {
            return Err(TonAddressParseError::new(
                src,
                format!("Invalid {kind} address: wrong length"),
            ));
        }
        let bytes: [u8; 36] = decoded
            .ok_or_else(|| {
                TonAddressParseError::new(src, format!("Invalid {kind} address: decode error"))
            })?
            .as_slice()
            .try_into()
            .map_err(|_| {
                TonAddressParseError::new(src, format!("Invalid {kind} address: wrong size"))
            })?;

        let (non_production, non_bounceable) = match bytes[0] {
            0x11 => (false, false),
            0x51 => (false, true),
            0x91 => (true, false),
            0xD1 => (true, true),
            _ => {
                return Err(TonAddressParseError::new(
                    src,
                    format!("Invalid {kind} address: wrong tag byte"),
                ))
            }
        };
        let workchain = bytes[1] as i8 as i32;
        let calc_crc = CRC_16_XMODEM.checksum(&bytes[0..34]);
        let addr_crc = u16::from_be_bytes([bytes[34], bytes[35]]);
        if calc_crc != addr_crc {
            return Err(TonAddressParseError::new(
                src,
                format!("Invalid {kind} address: CRC mismatch"),
            ));
        }
        let mut hash_part = [0u8; 32];
        hash_part.copy_from_slice(&bytes[2..34]);
        Ok((
            TonAddress::new(workchain, &hash_part),
            non_bounceable,
            non_production,
        ))
    }

    pub fn to_hex(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash_part))
    }

    pub fn to_base64_url(&self) -> String {
        self.to_base64_url_flags(false, false)
    }

    pub fn to_base64_url_flags(&self, non_bounceable: bool, non_production: bool) -> String {
        URL_SAFE_NO_PAD.encode(self.to_base64_src(non_bounceable, non_production))
    }

    pub fn to_base64_std(&self) -> String {
        self.to_base64_std_flags(false, false)
    }

    pub fn to_base64_std_flags(&self, non_bounceable: bool, non_production: bool) -> String {
        STANDARD_NO_PAD.encode(self.to_base64_src(non_bounceable, non_production))
    }

    fn to_base64_src(&self, non_bounceable: bool, non_production: bool) -> [u8; 36] {
        let mut bytes = [0u8; 36];
        bytes[0] = match (non_production, non_bounceable) {
            (false, false) => 0x11,
            (false, true) => 0x51,
            (true, false) => 0x91,
            (true, true) => 0xD1,
        };
        bytes[1] = (self.workchain & 0xff) as u8;
        bytes[2..34].copy_from_slice(self.hash_part.as_slice());
        let crc = CRC_16_XMODEM.checksum(&bytes[0..34]);
        bytes[34..36].copy_from_slice(&crc.to_be_bytes());
        bytes
    }
}

impl Display for TonAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_base64_url().as_str())
    }
}

impl Debug for TonAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_base64_url().as_str())
    }
}

impl FromStr for TonAddress {
    type Err = TonAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 48 {
            // Some form of base64 address, check which one
            if s.contains('-') || s.contains('_') {
                TonAddress::from_base64_url(s)
            } else {
                TonAddress::from_base64_std(s)
            }
        } else {
            TonAddress::from_hex_str(s)
        }
    }
}

impl TryFrom<String> for TonAddress {
    type Error = TonAddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::TonAddressParseError;
    use crate::{TonAddress, TonHash};

    fn sample_hash() -> TonHash {
        hex::decode("e4d954ef9f4e1250a26b5bbad76a1cdd17cfd08babad6f4c23e372270aef6f76")
            .unwrap()
            .as_slice()
            .try_into()
            .unwrap()
    }

    #[test]
    fn format_works() {
        let addr = TonAddress::new(0, &sample_hash());
        assert_eq!(
            addr.to_hex(),
            "0:e4d954ef9f4e1250a26b5bbad76a1cdd17cfd08babad6f4c23e372270aef6f76"
        );
        assert_eq!(
            addr.to_base64_url(),
            "EQDk2VTvn04SUKJrW7rXahzdF8_Qi6utb0wj43InCu9vdjrR"
        );
        assert_eq!(
            addr.to_base64_std(),
            "EQDk2VTvn04SUKJrW7rXahzdF8/Qi6utb0wj43InCu9vdjrR"
        );
    }

    #[test]
    fn parse_works() -> Result<(), TonAddressParseError> {
        let addr = TonAddress::new(0, &sample_hash());
        assert_eq!(
            "0:e4d954ef9f4e1250a26b5bbad76a1cdd17cfd08babad6f4c23e372270aef6f76"
                .parse::<TonAddress>()?,
            addr
        );
        assert_eq!(
            "EQDk2VTvn04SUKJrW7rXahzdF8_Qi6utb0wj43InCu9vdjrR".parse::<TonAddress>()?,
            addr
        );
        assert_eq!(
            "EQDk2VTvn04SUKJrW7rXahzdF8/Qi6utb0wj43InCu9vdjrR".parse::<TonAddress>()?,
            addr
        );
        let res: TonAddress = "EQDk2VTvn04SUKJrW7rXahzdF8_Qi6utb0wj43InCu9vdjrR"
            .to_string()
            .try_into()?;
        assert_eq!(res, addr);
        Ok(())
    }

    #[test]
    fn parse_flags_works() -> Result<(), TonAddressParseError> {
        let addr = TonAddress::new(-1, &sample_hash());
        let text = addr.to_base64_url_flags(true, true);
        let (parsed, non_bounceable, non_production) = TonAddress::from_base64_url_flags(&text)?;
        assert_eq!(parsed, addr);
        assert!(non_bounceable);
        assert!(non_production);
        Ok(())
    }

    #[test]
    fn parse_verifies_crc() {
        let res = "EQDk2VTvn04SUKJrW7rXahzdF8_Qi6utb0wj43InCu9vdjra".parse::<TonAddress>();
        assert!(res.is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("0:zz".parse::<TonAddress>().is_err());
        assert!("e4d954ef".parse::<TonAddress>().is_err());
        assert!("x:e4d954ef9f4e1250a26b5bbad76a1cdd17cfd08babad6f4c23e372270aef6f76"
            .parse::<TonAddress>()
            .is_err());
    }

    #[test]
    fn serialization_works() -> anyhow::Result<()> {
        let expected = "\"EQDk2VTvn04SUKJrW7rXahzdF8_Qi6utb0wj43InCu9vdjrR\"";

        let res = "EQDk2VTvn04SUKJrW7rXahzdF8_Qi6utb0wj43InCu9vdjrR".parse::<TonAddress>()?;
        let serial = serde_json::to_string(&res)?;
        assert_eq!(serial.as_str(), expected);

        let deserial: TonAddress = serde_json::from_str(
            "\"0:e4d954ef9f4e1250a26b5bbad76a1cdd17cfd08babad6f4c23e372270aef6f76\"",
        )?;
        assert_eq!(deserial, res);
        Ok(())
    }
}

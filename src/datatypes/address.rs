// ABOUTME: TP address fields (GSM 03.40 9.1.2.5) with TON/NPI classification
// ABOUTME: Numeric digits travel as semi-octets, alphanumeric senders as packed GSM 7-bit text

use crate::codec::{CodecError, Decodable, Encodable, decode_bytes, decode_u8, length_octet};
use crate::datatypes::alphabet::gsm7bit;
use crate::datatypes::{NumericPlanIndicator, TypeOfNumber, semi_octet};
use bytes::{BufMut, BytesMut};
use std::fmt;
use std::io::Cursor;

/// Originating, destination or recipient address of a TPDU
///
/// On the wire: `{length, type, value...}` where `length` counts useful
/// semi-octets of the value and `type = 0x80 | ton << 4 | npi`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Address {
    pub ton: TypeOfNumber,
    pub npi: NumericPlanIndicator,
    pub digits: String,
}

impl Address {
    pub fn new(digits: impl Into<String>, ton: TypeOfNumber, npi: NumericPlanIndicator) -> Self {
        Self {
            ton,
            npi,
            digits: digits.into(),
        }
    }

    /// Creates an international ISDN number (ton 1, npi 1)
    pub fn international(digits: impl Into<String>) -> Self {
        Self::new(digits, TypeOfNumber::International, NumericPlanIndicator::Isdn)
    }

    /// Creates an alphanumeric sender id
    pub fn alphanumeric(text: impl Into<String>) -> Self {
        Self::new(text, TypeOfNumber::Alphanumeric, NumericPlanIndicator::Unknown)
    }

    pub fn is_alphanumeric(&self) -> bool {
        self.ton == TypeOfNumber::Alphanumeric
    }

    /// Type-of-address octet
    ///
    /// Alphanumeric addresses always carry numbering plan 0000.
    pub fn type_octet(&self) -> u8 {
        let npi = if self.is_alphanumeric() {
            0
        } else {
            self.npi.to_u8()
        };
        0x80 | (self.ton as u8) << 4 | npi
    }
}

impl From<&str> for Address {
    fn from(digits: &str) -> Self {
        Address::international(digits)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl Encodable for Address {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        let (length, value) = if self.is_alphanumeric() {
            let chars = self.digits.chars().count();
            ((chars * 7).div_ceil(4), gsm7bit::encode(&self.digits)?)
        } else {
            (self.digits.chars().count(), semi_octet::encode(&self.digits)?)
        };

        buf.put_u8(length_octet("address", length)?);
        buf.put_u8(self.type_octet());
        buf.put_slice(&value);
        Ok(())
    }
}

impl Decodable for Address {
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let semi_octets = usize::from(decode_u8(buf)?);
        let type_octet = decode_u8(buf)?;
        let value = decode_bytes(buf, semi_octets.div_ceil(2))?;

        let ton = TypeOfNumber::from_type_octet(type_octet);
        let npi = NumericPlanIndicator::from_type_octet(type_octet);

        let digits = if ton == TypeOfNumber::Alphanumeric {
            gsm7bit::decode(&value, Some(semi_octets * 4 / 7))
        } else {
            semi_octet::decode(&value)
        };

        Ok(Address { ton, npi, digits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(address: &Address, expected: &str) {
        let bytes = address.to_bytes().unwrap();
        assert_eq!(hex::encode(&bytes), expected);
        assert_eq!(&Address::from_slice(&bytes).unwrap(), address);
    }

    #[test]
    fn numeric_odd_length() {
        roundtrip(&Address::international("123456768"), "099121436567f8");
    }

    #[test]
    fn numeric_even_length() {
        roundtrip(&Address::international("1234567689"), "0a912143656798");
    }

    #[test]
    fn alphanumeric() {
        let address = Address::alphanumeric("test");
        assert_eq!(address.type_octet(), 0xD0);
        roundtrip(&address, "07d0f4f29c0e");
    }

    #[test]
    fn alphanumeric_ignores_numbering_plan() {
        let address = Address::new("Bank", TypeOfNumber::Alphanumeric, NumericPlanIndicator::Isdn);
        assert_eq!(address.type_octet(), 0xD0);
    }

    #[test]
    fn decode_consumes_exactly_the_field() {
        let data = hex::decode("0b919758700027f340").unwrap();
        let mut cursor = Cursor::new(data.as_slice());

        let address = Address::decode(&mut cursor).unwrap();
        assert_eq!(address, Address::international("79850700723"));
        assert_eq!(cursor.position(), 8);
        assert_eq!(decode_u8(&mut cursor).unwrap(), 0x40);
    }

    #[test]
    fn truncated_value() {
        assert!(matches!(
            Address::from_slice(&[0x0B, 0x91, 0x97, 0x58]),
            Err(CodecError::Incomplete)
        ));
    }

    #[test]
    fn rejects_non_digits() {
        assert!(matches!(
            Address::international("+7123").to_bytes(),
            Err(CodecError::InvalidCharacter('+'))
        ));
    }

    #[test]
    fn string_conversion_defaults_to_international() {
        let address = Address::from("71231234567");
        assert_eq!(address.ton, TypeOfNumber::International);
        assert_eq!(address.npi, NumericPlanIndicator::Isdn);
        assert_eq!(address.to_string(), "71231234567");
    }
}

// ABOUTME: RP-DATA (GSM 04.11 7.3.1), the relay envelope of SMS-SUBMIT, SMS-DELIVER and SMS-COMMAND
// ABOUTME: Layout: MTI, message reference, originator, destination, then a length-prefixed TPDU

use super::{RpduType, address};
use crate::codec::{CodecError, Decodable, Encodable, decode_bytes, decode_u8, length_octet};
use crate::datatypes::Address;
use crate::tpdu::Direction;
use bytes::{BufMut, Bytes, BytesMut};
use std::io::Cursor;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Data {
    pub direction: Direction,
    pub reference: u8,
    /// RP-Originator Address, only set towards the mobile
    pub origin: Option<Address>,
    /// RP-Destination Address, only set towards the network
    pub destination: Option<Address>,
    /// RP-User-Data: the embedded TPDU
    pub payload: Bytes,
}

impl Encodable for Data {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u8(RpduType::Data.mti(self.direction));
        buf.put_u8(self.reference);
        address::encode(self.origin.as_ref(), buf)?;
        address::encode(self.destination.as_ref(), buf)?;
        buf.put_u8(length_octet("rp_user_data", self.payload.len())?);
        buf.put_slice(&self.payload);
        Ok(())
    }
}

impl Decodable for Data {
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let mti = decode_u8(buf)?;
        let reference = decode_u8(buf)?;
        let origin = address::decode(buf)?;
        let destination = address::decode(buf)?;
        let length = usize::from(decode_u8(buf)?);
        let payload = decode_bytes(buf, length)?;

        Ok(Self {
            direction: Direction::from_network_flag(mti & 1 != 0),
            reference,
            origin,
            destination,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBMIT: &str = "00010007913712896745f31201010b911732214365f7000005e8329bfd06";

    #[test]
    fn mobile_originated_envelope() {
        let data = Data::from_slice(&hex::decode(SUBMIT).unwrap()).unwrap();
        assert_eq!(data.direction, Direction::MobileOriginated);
        assert_eq!(data.reference, 1);
        assert_eq!(data.origin, None);
        assert_eq!(data.destination, Some(Address::international("73219876543")));
        assert_eq!(hex::encode(&data.payload), "01010b911732214365f7000005e8329bfd06");

        assert_eq!(hex::encode(data.to_bytes().unwrap()), SUBMIT);
    }

    #[test]
    fn payload_is_bounded_by_length() {
        let mut bytes = hex::decode(SUBMIT).unwrap();
        bytes.push(0xFF);
        let data = Data::from_slice(&bytes).unwrap();
        assert_eq!(data.payload.len(), 0x12);

        bytes.truncate(bytes.len() - 2);
        assert!(matches!(Data::from_slice(&bytes), Err(CodecError::Incomplete)));
    }
}

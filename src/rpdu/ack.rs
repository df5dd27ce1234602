// ABOUTME: RP-ACK (GSM 04.11 7.3.3), a positive relay acknowledgement
// ABOUTME: May carry an SMS-SUBMIT-REPORT or SMS-DELIVER-REPORT in an RP-User-Data element

use super::{RpduType, decode_user_data_element, encode_user_data_element};
use crate::codec::{CodecError, Encodable, decode_u8};
use crate::tpdu::Direction;
use bytes::{BufMut, Bytes, BytesMut};
use std::io::Cursor;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ack {
    pub direction: Direction,
    pub reference: u8,
    pub payload: Option<Bytes>,
}

impl Ack {
    /// `Ok(None)` when an unknown optional element follows the reference
    pub fn parse(buf: &mut Cursor<&[u8]>) -> Result<Option<Self>, CodecError> {
        let mti = decode_u8(buf)?;
        let reference = decode_u8(buf)?;
        let Some(payload) = decode_user_data_element(buf)? else {
            return Ok(None);
        };

        Ok(Some(Self {
            direction: Direction::from_network_flag(mti & 1 != 0),
            reference,
            payload,
        }))
    }
}

impl Encodable for Ack {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u8(RpduType::Ack.mti(self.direction));
        buf.put_u8(self.reference);
        encode_user_data_element(buf, self.payload.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_acknowledgement() {
        let ack = Ack {
            direction: Direction::Network,
            reference: 5,
            payload: None,
        };
        assert_eq!(ack.to_bytes().unwrap().as_ref(), &[0x03, 0x05]);

        let mut cursor = Cursor::new(&[0x03u8, 0x05][..]);
        assert_eq!(Ack::parse(&mut cursor).unwrap(), Some(ack));
    }

    #[test]
    fn with_submit_report() {
        let report = hex::decode("010022219281739121").unwrap();
        let ack = Ack {
            direction: Direction::Network,
            reference: 1,
            payload: Some(Bytes::from(report)),
        };
        let bytes = ack.to_bytes().unwrap();
        assert_eq!(hex::encode(&bytes), "03014109010022219281739121");

        let mut cursor = Cursor::new(bytes.as_ref());
        assert_eq!(Ack::parse(&mut cursor).unwrap(), Some(ack));
    }

    #[test]
    fn truncated_element() {
        let mut cursor = Cursor::new(&[0x03u8, 0x01, 0x41, 0x05, 0x01][..]);
        assert!(matches!(Ack::parse(&mut cursor), Err(CodecError::Incomplete)));
    }
}

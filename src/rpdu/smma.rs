// ABOUTME: RP-SMMA, sent by the mobile once it has memory available for short messages again
// ABOUTME: Carries only the MTI and the message reference

use super::RpduType;
use crate::codec::{CodecError, Decodable, Encodable, decode_u8};
use crate::tpdu::Direction;
use bytes::{BufMut, BytesMut};
use std::io::Cursor;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Smma {
    pub reference: u8,
}

impl Encodable for Smma {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u8(RpduType::Smma.mti(Direction::MobileOriginated));
        buf.put_u8(self.reference);
        Ok(())
    }
}

impl Decodable for Smma {
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let _mti = decode_u8(buf)?;
        let reference = decode_u8(buf)?;
        Ok(Self { reference })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_available() {
        let smma = Smma { reference: 1 };
        assert_eq!(hex::encode(smma.to_bytes().unwrap()), "0601");
        assert_eq!(Smma::from_slice(&[0x06, 0x01]).unwrap(), smma);
    }

    #[test]
    fn missing_reference() {
        assert!(matches!(Smma::from_slice(&[0x06]), Err(CodecError::Incomplete)));
    }
}

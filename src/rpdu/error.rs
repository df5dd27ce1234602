// ABOUTME: RP-ERROR (GSM 04.11 7.3.4), a negative relay acknowledgement with an RP-Cause
// ABOUTME: Any embedded report is the negative variant and so carries a TP-Failure-Cause

use super::{RpCause, RpduType, decode_user_data_element, encode_user_data_element};
use crate::codec::{CodecError, Encodable, decode_bytes, decode_u8};
use crate::tpdu::Direction;
use bytes::{BufMut, Bytes, BytesMut};
use std::io::Cursor;
use tracing::trace;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Error {
    pub direction: Direction,
    pub reference: u8,
    /// Cause value; the extension bit is masked off
    pub cause: u8,
    pub payload: Option<Bytes>,
}

impl Error {
    pub fn rp_cause(&self) -> RpCause {
        RpCause::from(self.cause)
    }

    /// `Ok(None)` when an unknown optional element follows the cause
    pub fn parse(buf: &mut Cursor<&[u8]>) -> Result<Option<Self>, CodecError> {
        let mti = decode_u8(buf)?;
        let reference = decode_u8(buf)?;

        let length = usize::from(decode_u8(buf)?);
        if length == 0 {
            return Err(CodecError::FieldValidation {
                field: "rp_cause",
                reason: "cause element is empty".to_string(),
            });
        }
        let cause = decode_u8(buf)? & 0x7F;
        let diagnostic = decode_bytes(buf, length - 1)?;
        if !diagnostic.is_empty() {
            trace!(cause, diagnostic = ?diagnostic, "skipping RP-Cause diagnostic");
        }

        let Some(payload) = decode_user_data_element(buf)? else {
            return Ok(None);
        };

        Ok(Some(Self {
            direction: Direction::from_network_flag(mti & 1 != 0),
            reference,
            cause,
            payload,
        }))
    }
}

impl Encodable for Error {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u8(RpduType::Error.mti(self.direction));
        buf.put_u8(self.reference);
        buf.put_u8(0x01);
        buf.put_u8(self.cause & 0x7F);
        encode_user_data_element(buf, self.payload.as_ref())
    }
}

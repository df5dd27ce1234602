// ABOUTME: RP-Originator and RP-Destination addresses (GSM 04.11 8.2.5.1, 8.2.5.2)
// ABOUTME: Unlike TP addresses the length octet counts octets, and zero marks an absent address

use crate::codec::{CodecError, decode_bytes, decode_u8, length_octet};
use crate::datatypes::{Address, NumericPlanIndicator, TypeOfNumber, semi_octet};
use bytes::{BufMut, BytesMut};
use std::io::Cursor;

/// Write `{length, type, semi-octets}`, or a single zero octet for `None`
pub fn encode(address: Option<&Address>, buf: &mut BytesMut) -> Result<(), CodecError> {
    let Some(address) = address else {
        buf.put_u8(0);
        return Ok(());
    };

    let value = semi_octet::encode(&address.digits)?;
    buf.put_u8(length_octet("rp_address", value.len() + 1)?);
    buf.put_u8(0x80 | (address.ton as u8) << 4 | address.npi.to_u8());
    buf.put_slice(&value);
    Ok(())
}

pub fn decode(buf: &mut Cursor<&[u8]>) -> Result<Option<Address>, CodecError> {
    let length = usize::from(decode_u8(buf)?);
    if length == 0 {
        return Ok(None);
    }

    let type_octet = decode_u8(buf)?;
    let value = decode_bytes(buf, length - 1)?;

    Ok(Some(Address {
        ton: TypeOfNumber::from_type_octet(type_octet),
        npi: NumericPlanIndicator::from_type_octet(type_octet),
        digits: semi_octet::decode(&value),
    }))
}

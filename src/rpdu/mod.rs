// ABOUTME: Relay layer (GSM 04.11 clause 7.3): RP-DATA, RP-ACK, RP-ERROR and RP-SMMA
// ABOUTME: The three MTI bits carry the message kind and the network direction flag

pub mod address;
mod ack;
mod cause;
mod data;
mod error;
mod smma;

pub use ack::Ack;
pub use cause::RpCause;
pub use data::Data;
pub use error::Error;
pub use smma::Smma;

use crate::codec::{CodecError, Decodable, Encodable, decode_bytes, decode_u8, length_octet, peek_u8};
use crate::tpdu::Direction;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;
use std::io::Cursor;
use tracing::{debug, warn};

/// Tag of the RP-User-Data element in RP-ACK and RP-ERROR
pub const USER_DATA_TAG: u8 = 0x41;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RpduType {
    Data,
    Ack,
    Error,
    Smma,
}

impl RpduType {
    /// RP-MTI for this kind sent in `direction`
    pub fn mti(&self, direction: Direction) -> u8 {
        let kind = match self {
            RpduType::Data => 0,
            RpduType::Ack => 1,
            RpduType::Error => 2,
            RpduType::Smma => 3,
        };
        kind << 1 | u8::from(direction.is_network())
    }

    /// Kind and direction of an RP-MTI; `0b111` is reserved
    pub fn from_mti(octet: u8) -> Option<(Self, Direction)> {
        let direction = Direction::from_network_flag(octet & 1 != 0);
        let kind = match (octet >> 1) & 0b11 {
            0 => RpduType::Data,
            1 => RpduType::Ack,
            2 => RpduType::Error,
            _ if direction.is_network() => return None,
            _ => RpduType::Smma,
        };
        Some((kind, direction))
    }

    pub fn name(&self) -> &'static str {
        match self {
            RpduType::Data => "RP-DATA",
            RpduType::Ack => "RP-ACK",
            RpduType::Error => "RP-ERROR",
            RpduType::Smma => "RP-SMMA",
        }
    }
}

impl fmt::Display for RpduType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A relay layer message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rpdu {
    Data(Data),
    Ack(Ack),
    Error(Error),
    Smma(Smma),
}

impl Rpdu {
    pub fn kind(&self) -> RpduType {
        match self {
            Rpdu::Data(_) => RpduType::Data,
            Rpdu::Ack(_) => RpduType::Ack,
            Rpdu::Error(_) => RpduType::Error,
            Rpdu::Smma(_) => RpduType::Smma,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Rpdu::Data(pdu) => pdu.direction,
            Rpdu::Ack(pdu) => pdu.direction,
            Rpdu::Error(pdu) => pdu.direction,
            Rpdu::Smma(_) => Direction::MobileOriginated,
        }
    }

    pub fn reference(&self) -> u8 {
        match self {
            Rpdu::Data(pdu) => pdu.reference,
            Rpdu::Ack(pdu) => pdu.reference,
            Rpdu::Error(pdu) => pdu.reference,
            Rpdu::Smma(pdu) => pdu.reference,
        }
    }

    /// Embedded TPDU octets, if the message carries any
    pub fn payload(&self) -> Option<&Bytes> {
        match self {
            Rpdu::Data(pdu) => Some(&pdu.payload),
            Rpdu::Ack(pdu) => pdu.payload.as_ref(),
            Rpdu::Error(pdu) => pdu.payload.as_ref(),
            Rpdu::Smma(_) => None,
        }
    }
}

impl Encodable for Rpdu {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        match self {
            Rpdu::Data(pdu) => pdu.encode(buf),
            Rpdu::Ack(pdu) => pdu.encode(buf),
            Rpdu::Error(pdu) => pdu.encode(buf),
            Rpdu::Smma(pdu) => pdu.encode(buf),
        }
    }
}

/// Decode a relay layer message
///
/// `Ok(None)` when the MTI is reserved or RP-ACK/RP-ERROR carry an optional
/// element this codec does not know.
pub fn decode(data: &[u8]) -> Result<Option<Rpdu>, CodecError> {
    let mut cursor = Cursor::new(data);
    let first = peek_u8(&cursor)?;

    let Some((kind, direction)) = RpduType::from_mti(first) else {
        warn!(first_octet = first, "reserved RP-MTI");
        return Ok(None);
    };
    debug!(%kind, %direction, "decoding RPDU");

    let rpdu = match kind {
        RpduType::Data => Some(Rpdu::Data(Data::decode(&mut cursor)?)),
        RpduType::Ack => Ack::parse(&mut cursor)?.map(Rpdu::Ack),
        RpduType::Error => Error::parse(&mut cursor)?.map(Rpdu::Error),
        RpduType::Smma => Some(Rpdu::Smma(Smma::decode(&mut cursor)?)),
    };

    Ok(rpdu)
}

/// Read the optional elements that may trail RP-ACK and RP-ERROR
///
/// Only RP-User-Data is known; `Ok(None)` when any other tag appears.
pub(crate) fn decode_user_data_element(
    buf: &mut Cursor<&[u8]>,
) -> Result<Option<Option<Bytes>>, CodecError> {
    let mut payload = None;

    while buf.has_remaining() {
        let tag = decode_u8(buf)?;
        if tag != USER_DATA_TAG {
            warn!(tag, "unknown RP optional element");
            return Ok(None);
        }
        let length = usize::from(decode_u8(buf)?);
        payload = Some(decode_bytes(buf, length)?);
    }

    Ok(Some(payload))
}

pub(crate) fn encode_user_data_element(
    buf: &mut BytesMut,
    payload: Option<&Bytes>,
) -> Result<(), CodecError> {
    if let Some(payload) = payload {
        buf.put_u8(USER_DATA_TAG);
        buf.put_u8(length_octet("rp_user_data", payload.len())?);
        buf.put_slice(payload);
    }
    Ok(())
}

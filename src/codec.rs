// SMS PDU codec - separates wire-format handling from the logical messages
//
// Every PDU and every sub-field that appears on the wire implements Encodable
// and, where it can be read without outside context, Decodable. Decoding is
// cursor based: each sub-decoder consumes exactly the bytes it owns from a
// shared `Cursor` so the caller can continue with the next field.

use bytes::{Buf, Bytes, BytesMut};
use std::io::Cursor;
use thiserror::Error;

/// Trait for types that can be encoded to bytes
pub trait Encodable {
    /// Encode this value onto the end of the buffer
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError>;

    /// Convert this value to bytes (convenience method)
    fn to_bytes(&self) -> Result<Bytes, CodecError> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }
}

/// Trait for types that can be decoded from a cursor without outside context
pub trait Decodable: Sized {
    /// Decode this value, advancing the cursor past the bytes it owns
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError>;

    /// Decode from a standalone slice (convenience method)
    fn from_slice(data: &[u8]) -> Result<Self, CodecError> {
        let mut cursor = Cursor::new(data);
        Self::decode(&mut cursor)
    }
}

/// Codec errors with enough context to tell malformed input from unsupported input
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Incomplete PDU: need more data")]
    Incomplete,

    #[error("Character {0:?} is not part of the active alphabet")]
    InvalidCharacter(char),

    #[error("Invalid type of DCS: expected an octet or a non-empty buffer")]
    InvalidType,

    #[error("Data coding scheme {0:#04x} is reserved")]
    UnsupportedDcs(u8),

    #[error("{0} is not supported")]
    Unsupported(&'static str),

    #[error("Field '{field}' validation failed: {reason}")]
    FieldValidation { field: &'static str, reason: String },
}

impl CodecError {
    /// True when the input was understood but uses a format this crate does not implement
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CodecError::Unsupported(_))
    }
}

/// Decode a single byte
pub fn decode_u8(buf: &mut Cursor<&[u8]>) -> Result<u8, CodecError> {
    if buf.remaining() < 1 {
        return Err(CodecError::Incomplete);
    }
    Ok(buf.get_u8())
}

/// Decode a 16-bit big-endian integer
pub fn decode_u16(buf: &mut Cursor<&[u8]>) -> Result<u16, CodecError> {
    if buf.remaining() < 2 {
        return Err(CodecError::Incomplete);
    }
    Ok(buf.get_u16())
}

/// Decode exactly `len` bytes
pub fn decode_bytes(buf: &mut Cursor<&[u8]>, len: usize) -> Result<Bytes, CodecError> {
    if buf.remaining() < len {
        return Err(CodecError::Incomplete);
    }
    Ok(buf.copy_to_bytes(len))
}

/// Decode everything left in the buffer
pub fn decode_remaining(buf: &mut Cursor<&[u8]>) -> Bytes {
    let len = buf.remaining();
    buf.copy_to_bytes(len)
}

/// Peek at the next byte without advancing the cursor
pub fn peek_u8(buf: &Cursor<&[u8]>) -> Result<u8, CodecError> {
    buf.chunk().first().copied().ok_or(CodecError::Incomplete)
}

/// Convert a length to its single-octet wire form
pub(crate) fn length_octet(field: &'static str, len: usize) -> Result<u8, CodecError> {
    u8::try_from(len).map_err(|_| CodecError::FieldValidation {
        field,
        reason: format!("length {len} does not fit in one octet"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut;

    struct Pair(u8, u16);

    impl Encodable for Pair {
        fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
            buf.put_u8(self.0);
            buf.put_u16(self.1);
            Ok(())
        }
    }

    impl Decodable for Pair {
        fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
            Ok(Pair(decode_u8(buf)?, decode_u16(buf)?))
        }
    }

    #[test]
    fn encodable_helpers() {
        let pair = Pair(0x01, 0x0203);
        assert_eq!(pair.to_bytes().unwrap().as_ref(), &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn decodable_from_slice() {
        let pair = Pair::from_slice(&[0x07, 0x00, 0x09]).unwrap();
        assert_eq!(pair.0, 7);
        assert_eq!(pair.1, 9);

        assert!(matches!(
            Pair::from_slice(&[0x07, 0x00]),
            Err(CodecError::Incomplete)
        ));
    }

    #[test]
    fn cursor_helpers_advance_exactly() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut cursor = Cursor::new(&data[..]);

        assert_eq!(peek_u8(&cursor).unwrap(), 0x01);
        assert_eq!(cursor.position(), 0);

        let bytes = decode_bytes(&mut cursor, 2).unwrap();
        assert_eq!(bytes.as_ref(), &[0x01, 0x02]);
        assert_eq!(cursor.position(), 2);

        assert!(matches!(
            decode_bytes(&mut cursor, 3),
            Err(CodecError::Incomplete)
        ));
        assert_eq!(decode_remaining(&mut cursor).as_ref(), &[0x03, 0x04]);
        assert!(matches!(peek_u8(&cursor), Err(CodecError::Incomplete)));
    }

    #[test]
    fn length_octet_bounds() {
        assert_eq!(length_octet("user_data", 255).unwrap(), 255);
        assert!(matches!(
            length_octet("user_data", 256),
            Err(CodecError::FieldValidation { field: "user_data", .. })
        ));
    }

    #[test]
    fn unsupported_is_distinct() {
        assert!(CodecError::Unsupported("enhanced validity period").is_unsupported());
        assert!(!CodecError::Incomplete.is_unsupported());
    }
}

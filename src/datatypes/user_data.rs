// ABOUTME: TP-UD assembly (GSM 03.40 9.2.3.24): optional header followed by alphabet-coded content
// ABOUTME: TP-UDL counts septets for the default alphabet and octets for binary and UCS2

use crate::codec::{CodecError, length_octet};
use crate::datatypes::alphabet::{gsm7bit, ucs2};
use crate::datatypes::{Coding, UserDataHeader};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

/// Message body, text for alphabet codings or raw octets for binary
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Content {
    Text(String),
    Binary(Bytes),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Binary(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Text(text) => text.as_bytes(),
            Content::Binary(bytes) => bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Text(String::new())
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_owned())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Bytes> for Content {
    fn from(bytes: Bytes) -> Self {
        Content::Binary(bytes)
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Content::Binary(bytes.into())
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => f.write_str(text),
            Content::Binary(bytes) => {
                for byte in bytes.iter() {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// Wire form of the user data and its TP-UDL value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedUserData {
    pub buffer: Bytes,
    pub length: u8,
}

/// Decoded user data
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserData {
    pub header: Option<UserDataHeader>,
    pub content: Content,
}

fn fill_septets(header_len: usize) -> usize {
    (header_len * 8).div_ceil(7)
}

fn text_only<'a>(content: &'a Content, coding: Coding) -> Result<&'a str, CodecError> {
    content.as_text().ok_or_else(|| CodecError::FieldValidation {
        field: "user_data",
        reason: format!("{coding} coding needs text content"),
    })
}

/// Lay out `content` behind an already encoded header
///
/// With the default alphabet the header is padded to a septet boundary, so
/// TP-UDL counts those fill septets plus the content characters.
pub fn encode(
    content: &Content,
    coding: Coding,
    header: Option<&[u8]>,
) -> Result<EncodedUserData, CodecError> {
    let header = header.unwrap_or_default();

    let (buffer, length) = match coding {
        Coding::Default => {
            let text = text_only(content, coding)?;
            let fill = if header.is_empty() {
                0
            } else {
                fill_septets(header.len())
            };

            let mut septets = vec![0u8; fill];
            for ch in text.chars() {
                septets.push(gsm7bit::septet(ch).ok_or(CodecError::InvalidCharacter(ch))?);
            }

            let mut packed = gsm7bit::pack(&septets);
            packed[..header.len()].copy_from_slice(header);
            (Bytes::from(packed), septets.len())
        }
        Coding::Binary => {
            let mut buf = BytesMut::with_capacity(header.len() + content.as_bytes().len());
            buf.put_slice(header);
            buf.put_slice(content.as_bytes());
            let length = buf.len();
            (buf.freeze(), length)
        }
        Coding::Ucs2 => {
            let text = ucs2::encode(text_only(content, coding)?);
            let mut buf = BytesMut::with_capacity(header.len() + text.len());
            buf.put_slice(header);
            buf.put_slice(&text);
            let length = buf.len();
            (buf.freeze(), length)
        }
        Coding::Reserved => return Err(CodecError::Unsupported("reserved alphabet")),
    };

    Ok(EncodedUserData {
        buffer,
        length: length_octet("user_data_length", length)?,
    })
}

/// Split user data into header and content
///
/// `length` is the TP-UDL value; `None` decodes every whole unit in `data`.
pub fn decode(
    data: &[u8],
    coding: Coding,
    header_present: bool,
    length: Option<usize>,
) -> Result<UserData, CodecError> {
    let (header, header_len) = if header_present {
        let header_len = 1 + usize::from(*data.first().ok_or(CodecError::Incomplete)?);
        if data.len() < header_len {
            return Err(CodecError::Incomplete);
        }
        (UserDataHeader::decode(data)?, header_len)
    } else {
        (None, 0)
    };

    let content = match coding {
        Coding::Default => {
            if let Some(septets) = length {
                if data.len() < gsm7bit::packed_len(septets) {
                    return Err(CodecError::Incomplete);
                }
            }
            let fill = if header_present {
                fill_septets(header_len)
            } else {
                0
            };
            Content::Text(gsm7bit::decode(data, length).chars().skip(fill).collect())
        }
        Coding::Binary | Coding::Ucs2 => {
            let end = length.unwrap_or(data.len());
            if data.len() < end {
                return Err(CodecError::Incomplete);
            }
            if end < header_len {
                return Err(CodecError::FieldValidation {
                    field: "user_data_length",
                    reason: format!("length {end} is shorter than the {header_len} octet header"),
                });
            }
            let body = &data[header_len..end];
            if coding == Coding::Ucs2 {
                Content::Text(ucs2::decode(body)?)
            } else {
                Content::Binary(Bytes::copy_from_slice(body))
            }
        }
        Coding::Reserved => return Err(CodecError::Unsupported("reserved alphabet")),
    };

    Ok(UserData { header, content })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{Concatenation, UdhFields};

    fn concatenation_header() -> Bytes {
        let fields = UdhFields::default().with_concatenation(Concatenation {
            reference: 0x42,
            total: 2,
            sequence: 1,
        });
        UserDataHeader::prepare(&fields).encode().unwrap().unwrap()
    }

    #[test]
    fn default_alphabet_without_header() {
        let encoded = encode(&"hello".into(), Coding::Default, None).unwrap();
        assert_eq!(hex::encode(&encoded.buffer), "e8329bfd06");
        assert_eq!(encoded.length, 5);

        let decoded = decode(&encoded.buffer, Coding::Default, false, None).unwrap();
        assert_eq!(decoded.content, Content::from("hello"));
        assert_eq!(decoded.header, None);
    }

    #[test]
    fn default_alphabet_with_header() {
        let header = concatenation_header();
        let encoded = encode(&"hello".into(), Coding::Default, Some(header.as_ref())).unwrap();

        // six header octets pad to seven septets
        assert_eq!(encoded.length, 12);
        assert_eq!(encoded.buffer.len(), gsm7bit::packed_len(12));
        assert_eq!(&encoded.buffer[..6], header.as_ref());

        let decoded = decode(
            &encoded.buffer,
            Coding::Default,
            true,
            Some(usize::from(encoded.length)),
        )
        .unwrap();
        assert_eq!(decoded.content, Content::from("hello"));
        assert_eq!(decoded.header.unwrap().concatenation().unwrap().reference, 0x42);
    }

    #[test]
    fn length_bounds_trailing_fill() {
        let encoded = encode(&"1234567".into(), Coding::Default, None).unwrap();
        let unbounded = decode(&encoded.buffer, Coding::Default, false, None).unwrap();
        assert_eq!(unbounded.content, Content::from("1234567@"));

        let bounded = decode(&encoded.buffer, Coding::Default, false, Some(7)).unwrap();
        assert_eq!(bounded.content, Content::from("1234567"));
    }

    #[test]
    fn binary_with_header() {
        let header = concatenation_header();
        let body = Content::from(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        let encoded = encode(&body, Coding::Binary, Some(header.as_ref())).unwrap();
        assert_eq!(encoded.length, 10);

        let decoded = decode(&encoded.buffer, Coding::Binary, true, Some(10)).unwrap();
        assert_eq!(decoded.content, body);
        assert!(decoded.header.is_some());
    }

    #[test]
    fn ucs2_content() {
        let encoded = encode(&"Привет".into(), Coding::Ucs2, None).unwrap();
        assert_eq!(encoded.length, 12);

        let decoded = decode(&encoded.buffer, Coding::Ucs2, false, Some(12)).unwrap();
        assert_eq!(decoded.content, Content::from("Привет"));
    }

    #[test]
    fn content_must_match_coding() {
        let binary = Content::from(vec![0x01]);
        assert!(matches!(
            encode(&binary, Coding::Default, None),
            Err(CodecError::FieldValidation { field: "user_data", .. })
        ));
        assert!(encode(&binary, Coding::Ucs2, None).is_err());
        assert!(encode(&"x".into(), Coding::Reserved, None).unwrap_err().is_unsupported());
    }

    #[test]
    fn oversized_content() {
        let text = "a".repeat(256);
        assert!(matches!(
            encode(&text.as_str().into(), Coding::Default, None),
            Err(CodecError::FieldValidation { field: "user_data_length", .. })
        ));
    }

    #[test]
    fn truncated_user_data() {
        assert!(matches!(
            decode(&[0xE8, 0x32], Coding::Default, false, Some(5)),
            Err(CodecError::Incomplete)
        ));
        assert!(matches!(
            decode(&[0x01, 0x02], Coding::Binary, false, Some(4)),
            Err(CodecError::Incomplete)
        ));
        assert!(matches!(
            decode(&[0x06, 0x00], Coding::Binary, true, None),
            Err(CodecError::Incomplete)
        ));
    }

    #[test]
    fn length_shorter_than_header() {
        let header = concatenation_header();
        let mut data = header.to_vec();
        data.extend_from_slice(&[0x00, 0x41]);

        for coding in [Coding::Binary, Coding::Ucs2] {
            assert!(matches!(
                decode(&data, coding, true, Some(3)),
                Err(CodecError::FieldValidation { field: "user_data_length", .. })
            ));
        }
    }

    #[test]
    fn binary_display_is_hex() {
        assert_eq!(Content::from(vec![0x0A, 0xFF]).to_string(), "0aff");
    }
}

// ABOUTME: User data header (GSM 03.40 9.2.3.24): an ordered list of information elements
// ABOUTME: Concatenation and application port elements decode into typed views; others stay raw

use crate::codec::{CodecError, decode_bytes, decode_u8, decode_u16, length_octet};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::collections::BTreeMap;
use std::io::Cursor;
use tracing::{trace, warn};

/// One information element of a user data header
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InformationElement {
    /// The IEI identifies the element type
    pub id: u8,

    /// The element data; its length is written as the IEDL octet
    pub data: Bytes,
}

impl InformationElement {
    /// Concatenated short messages, 8-bit reference number
    pub const CONCATENATION_8BIT: u8 = 0x00;
    /// Application port addressing scheme, 8 bit address
    pub const PORT_8BIT: u8 = 0x04;
    /// Application port addressing scheme, 16 bit address
    pub const PORT_16BIT: u8 = 0x05;
    /// Concatenated short messages, 16-bit reference number
    pub const CONCATENATION_16BIT: u8 = 0x08;

    pub fn new(id: u8, data: impl Into<Bytes>) -> Self {
        Self {
            id,
            data: data.into(),
        }
    }

    /// 8-bit reference concatenation element; references above 255 keep their low byte
    pub fn concatenation_8bit(concatenation: &Concatenation) -> Self {
        if concatenation.reference > 0xFF {
            warn!(
                reference = concatenation.reference,
                "concatenation reference truncated to 8 bits"
            );
        }
        Self::new(
            Self::CONCATENATION_8BIT,
            vec![
                concatenation.reference as u8,
                concatenation.total,
                concatenation.sequence,
            ],
        )
    }

    pub fn concatenation_16bit(concatenation: &Concatenation) -> Self {
        let mut data = BytesMut::with_capacity(4);
        data.put_u16(concatenation.reference);
        data.put_u8(concatenation.total);
        data.put_u8(concatenation.sequence);
        Self::new(Self::CONCATENATION_16BIT, data.freeze())
    }

    /// Port addressing element, 16-bit when either port exceeds 255
    pub fn port(port: &PortAddressing) -> Self {
        if port.destination > 0xFF || port.source > 0xFF {
            let mut data = BytesMut::with_capacity(4);
            data.put_u16(port.destination);
            data.put_u16(port.source);
            Self::new(Self::PORT_16BIT, data.freeze())
        } else {
            Self::new(
                Self::PORT_8BIT,
                vec![port.destination as u8, port.source as u8],
            )
        }
    }

    /// Typed view of a concatenation element
    pub fn as_concatenation(&self) -> Option<Concatenation> {
        let data = self.data.as_ref();
        match (self.id, data.len()) {
            (Self::CONCATENATION_8BIT, 3) => Some(Concatenation {
                reference: u16::from(data[0]),
                total: data[1],
                sequence: data[2],
            }),
            (Self::CONCATENATION_16BIT, 4) => {
                let mut cursor = Cursor::new(data);
                Some(Concatenation {
                    reference: decode_u16(&mut cursor).ok()?,
                    total: decode_u8(&mut cursor).ok()?,
                    sequence: decode_u8(&mut cursor).ok()?,
                })
            }
            _ => None,
        }
    }

    /// Typed view of a port addressing element
    pub fn as_port(&self) -> Option<PortAddressing> {
        let data = self.data.as_ref();
        match (self.id, data.len()) {
            (Self::PORT_8BIT, 2) => Some(PortAddressing {
                destination: u16::from(data[0]),
                source: u16::from(data[1]),
            }),
            (Self::PORT_16BIT, 4) => {
                let mut cursor = Cursor::new(data);
                Some(PortAddressing {
                    destination: decode_u16(&mut cursor).ok()?,
                    source: decode_u16(&mut cursor).ok()?,
                })
            }
            _ => None,
        }
    }
}

/// Position of one part in a concatenated message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Concatenation {
    pub reference: u16,
    pub total: u8,
    pub sequence: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortAddressing {
    pub destination: u16,
    pub source: u16,
}

impl PortAddressing {
    /// Destination port only, source 0
    pub fn destination(port: u16) -> Self {
        Self {
            destination: port,
            source: 0,
        }
    }
}

/// Logical header content before it is laid out as information elements
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UdhFields {
    pub concatenation: Option<Concatenation>,
    pub port: Option<PortAddressing>,
    /// Elements passed through verbatim, keyed by IEI
    pub raw: BTreeMap<u8, Bytes>,
}

impl UdhFields {
    pub fn with_concatenation(mut self, concatenation: Concatenation) -> Self {
        self.concatenation = Some(concatenation);
        self
    }

    pub fn with_port(mut self, port: PortAddressing) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_raw(mut self, id: u8, data: impl Into<Bytes>) -> Self {
        self.raw.insert(id, data.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UserDataHeader {
    pub elements: Vec<InformationElement>,
}

impl UserDataHeader {
    pub fn new(elements: Vec<InformationElement>) -> Self {
        Self { elements }
    }

    /// Lay out logical fields as information elements
    ///
    /// Raw elements come first in IEI order, then concatenation, then port
    /// addressing. Concatenation always uses the 8-bit reference element;
    /// build the 16-bit one with [`InformationElement::concatenation_16bit`].
    pub fn prepare(fields: &UdhFields) -> Self {
        let mut elements: Vec<InformationElement> = fields
            .raw
            .iter()
            .map(|(&id, data)| InformationElement::new(id, data.clone()))
            .collect();

        if let Some(concatenation) = &fields.concatenation {
            elements.push(InformationElement::concatenation_8bit(concatenation));
        }
        if let Some(port) = &fields.port {
            elements.push(InformationElement::port(port));
        }

        trace!(?elements, "prepared user data header");
        Self { elements }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Encoded size including the UDHL octet, 0 when there are no elements
    pub fn encoded_len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        1 + self
            .elements
            .iter()
            .map(|element| 2 + element.data.len())
            .sum::<usize>()
    }

    /// `{UDHL, (IEI, IEDL, data)...}`, or `None` when there are no elements
    pub fn encode(&self) -> Result<Option<Bytes>, CodecError> {
        if self.is_empty() {
            return Ok(None);
        }

        let mut buf = BytesMut::with_capacity(self.encoded_len());
        buf.put_u8(length_octet("udh", self.encoded_len() - 1)?);
        for element in &self.elements {
            buf.put_u8(element.id);
            buf.put_u8(length_octet("udh_element", element.data.len())?);
            buf.put_slice(&element.data);
        }

        Ok(Some(buf.freeze()))
    }

    /// Parse a header from the start of `data`
    ///
    /// Returns `None` when the UDHL octet is zero.
    pub fn decode(data: &[u8]) -> Result<Option<Self>, CodecError> {
        let mut cursor = Cursor::new(data);
        let length = usize::from(decode_u8(&mut cursor)?);
        if length == 0 {
            return Ok(None);
        }

        let body = decode_bytes(&mut cursor, length)?;
        let mut cursor = Cursor::new(body.as_ref());
        let mut elements = Vec::new();

        while cursor.has_remaining() {
            let id = decode_u8(&mut cursor)?;
            let len = usize::from(decode_u8(&mut cursor)?);
            let data = decode_bytes(&mut cursor, len)?;
            elements.push(InformationElement { id, data });
        }

        Ok(Some(Self { elements }))
    }

    /// Concatenation info; the last matching element wins
    pub fn concatenation(&self) -> Option<Concatenation> {
        self.elements
            .iter()
            .rev()
            .find_map(InformationElement::as_concatenation)
    }

    /// Port addressing; the last matching element wins
    pub fn port(&self) -> Option<PortAddressing> {
        self.elements.iter().rev().find_map(InformationElement::as_port)
    }

    pub fn get(&self, id: u8) -> Option<&InformationElement> {
        self.elements.iter().rev().find(|element| element.id == id)
    }
}

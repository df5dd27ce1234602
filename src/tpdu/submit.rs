// ABOUTME: SMS-SUBMIT (GSM 03.40 9.2.2.2), a short message from the mobile station to the service centre
// ABOUTME: Layout: first octet, TP-MR, TP-DA, TP-PID, TP-DCS, TP-VP, TP-UDL, TP-UD

use super::header::SubmitHeader;
use super::{TpduType, build_user_data, coding_of, put_user_data, read_user_data, resolve_dcs};
use crate::codec::{CodecError, Decodable, Encodable, decode_remaining, decode_u8};
use crate::datatypes::{Address, Coding, Content, UserDataHeader, ValidityPeriod};
use crate::reference::ReferenceSource;
use bytes::{BufMut, Bytes, BytesMut};
use std::io::Cursor;
use tracing::debug;

/// Logical SMS-SUBMIT fields
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitMessage {
    /// TP-MR; drawn from the codec's reference source when `None`
    pub reference: Option<u8>,
    pub destination: Address,
    pub protocol_id: u8,
    /// Raw TP-DCS octet, sent verbatim; when `None` it is derived from `coding`
    pub dcs: Option<u8>,
    pub coding: Coding,
    pub validity: ValidityPeriod,
    pub status_report_request: bool,
    pub reject_duplicates: bool,
    pub reply_path: bool,
    pub header: Option<UserDataHeader>,
    pub content: Content,
}

impl SubmitMessage {
    pub fn new(destination: impl Into<Address>, content: impl Into<Content>) -> Self {
        Self {
            destination: destination.into(),
            content: content.into(),
            ..Default::default()
        }
    }
}

/// SMS-SUBMIT as laid out on the wire
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submit {
    pub header: SubmitHeader,
    pub reference: u8,
    pub destination: Address,
    pub protocol_id: u8,
    pub dcs: u8,
    pub validity: ValidityPeriod,
    pub user_data_length: u8,
    pub user_data: Bytes,
}

impl Submit {
    pub fn from_message(
        message: &SubmitMessage,
        references: &impl ReferenceSource,
    ) -> Result<Self, CodecError> {
        let (dcs, coding) = resolve_dcs(message.dcs, message.coding)?;
        let (user_data, udhi) =
            build_user_data(&message.content, coding, message.header.as_ref())?;
        let reference = message
            .reference
            .unwrap_or_else(|| references.next_reference());

        debug!(reference, destination = %message.destination, %coding, "built SMS-SUBMIT");

        Ok(Self {
            header: SubmitHeader {
                reject_duplicates: message.reject_duplicates,
                validity_format: message.validity.format(),
                status_report_request: message.status_report_request,
                udhi,
                reply_path: message.reply_path,
            },
            reference,
            destination: message.destination.clone(),
            protocol_id: message.protocol_id,
            dcs,
            validity: message.validity,
            user_data_length: user_data.length,
            user_data: user_data.buffer,
        })
    }

    pub fn to_message(&self) -> Result<SubmitMessage, CodecError> {
        let coding = coding_of(self.dcs)?;
        let user_data = read_user_data(
            &self.user_data,
            self.user_data_length,
            coding,
            self.header.udhi,
        )?;

        Ok(SubmitMessage {
            reference: Some(self.reference),
            destination: self.destination.clone(),
            protocol_id: self.protocol_id,
            dcs: Some(self.dcs),
            coding,
            validity: self.validity,
            status_report_request: self.header.status_report_request,
            reject_duplicates: self.header.reject_duplicates,
            reply_path: self.header.reply_path,
            header: user_data.header,
            content: user_data.content,
        })
    }
}

impl Encodable for Submit {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        // TP-VPF always follows the period actually carried
        let header = SubmitHeader {
            validity_format: self.validity.format(),
            ..self.header
        };

        buf.put_u8(header.pack(TpduType::Submit.mti()));
        buf.put_u8(self.reference);
        self.destination.encode(buf)?;
        buf.put_u8(self.protocol_id);
        buf.put_u8(self.dcs);
        self.validity.encode(buf)?;
        put_user_data(buf, self.user_data_length, &self.user_data);
        Ok(())
    }
}

impl Decodable for Submit {
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let header = SubmitHeader::unpack(decode_u8(buf)?);
        let reference = decode_u8(buf)?;
        let destination = Address::decode(buf)?;
        let protocol_id = decode_u8(buf)?;
        let dcs = decode_u8(buf)?;
        let validity = ValidityPeriod::decode(buf, header.validity_format)?;
        let user_data_length = decode_u8(buf)?;
        let user_data = decode_remaining(buf);

        Ok(Self {
            header,
            reference,
            destination,
            protocol_id,
            dcs,
            validity,
            user_data_length,
            user_data,
        })
    }
}

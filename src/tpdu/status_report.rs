// ABOUTME: SMS-STATUS-REPORT (GSM 03.40 9.2.2.3), the delivery outcome of an earlier SMS-SUBMIT
// ABOUTME: Layout: first octet, [TP-FCS], TP-MR, TP-RA, TP-SCTS, TP-DT, TP-ST, then an optional TP-PI tail

use super::TpduType;
use super::header::StatusReportHeader;
use super::report::ReportParameters;
use crate::codec::{CodecError, Decodable, Encodable, decode_u8};
use crate::datatypes::{Address, Coding, Content, Status, TimeStamp, UserDataHeader};
use bytes::{Buf, BufMut, BytesMut};
use std::io::Cursor;

/// Logical SMS-STATUS-REPORT fields
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusReportMessage {
    /// TP-MR of the SMS-SUBMIT this report is about
    pub reference: u8,
    pub recipient: Address,
    /// When the service centre received the original message
    pub timestamp: TimeStamp,
    /// TP-DT: when the outcome in `status` was reached
    pub discharge: TimeStamp,
    pub status: Status,
    pub more_messages: bool,
    pub loop_prevention: bool,
    /// TP-SRQ: the report answers an SMS-COMMAND
    pub qualifier: bool,
    pub failure_cause: Option<u8>,
    pub protocol_id: Option<u8>,
    pub dcs: Option<u8>,
    pub coding: Coding,
    pub header: Option<UserDataHeader>,
    pub content: Option<Content>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusReport {
    pub header: StatusReportHeader,
    pub failure_cause: Option<u8>,
    pub reference: u8,
    pub recipient: Address,
    pub timestamp: TimeStamp,
    pub discharge: TimeStamp,
    pub status: Status,
    /// TP-PI and its fields; `None` when the PDU ends after TP-ST
    pub parameters: Option<ReportParameters>,
}

impl StatusReport {
    pub fn from_message(message: &StatusReportMessage) -> Result<Self, CodecError> {
        let (parameters, udhi) = ReportParameters::build(
            message.protocol_id,
            message.dcs,
            message.coding,
            message.header.as_ref(),
            message.content.as_ref(),
        )?;

        Ok(Self {
            header: StatusReportHeader {
                more_messages: message.more_messages,
                loop_prevention: message.loop_prevention,
                status_report_qualifier: message.qualifier,
                udhi,
            },
            failure_cause: message.failure_cause,
            reference: message.reference,
            recipient: message.recipient.clone(),
            timestamp: message.timestamp,
            discharge: message.discharge,
            status: message.status,
            parameters: (!parameters.is_empty()).then_some(parameters),
        })
    }

    pub fn parse(buf: &mut Cursor<&[u8]>, with_failure_cause: bool) -> Result<Self, CodecError> {
        let header = StatusReportHeader::unpack(decode_u8(buf)?);
        let failure_cause = if with_failure_cause {
            Some(decode_u8(buf)?)
        } else {
            None
        };
        let reference = decode_u8(buf)?;
        let recipient = Address::decode(buf)?;
        let timestamp = TimeStamp::decode(buf)?;
        let discharge = TimeStamp::decode(buf)?;
        let status = Status::decode(buf)?;

        let parameters = if buf.has_remaining() {
            let indicator = decode_u8(buf)?;
            Some(ReportParameters::decode_fields(buf, indicator)?)
        } else {
            None
        };

        Ok(Self {
            header,
            failure_cause,
            reference,
            recipient,
            timestamp,
            discharge,
            status,
            parameters,
        })
    }

    pub fn to_message(&self) -> Result<StatusReportMessage, CodecError> {
        let parameters = self.parameters.clone().unwrap_or_default();
        let (header, content) = match parameters.content(self.header.udhi)? {
            Some(user_data) => (user_data.header, Some(user_data.content)),
            None => (None, None),
        };

        Ok(StatusReportMessage {
            reference: self.reference,
            recipient: self.recipient.clone(),
            timestamp: self.timestamp,
            discharge: self.discharge,
            status: self.status,
            more_messages: self.header.more_messages,
            loop_prevention: self.header.loop_prevention,
            qualifier: self.header.status_report_qualifier,
            failure_cause: self.failure_cause,
            protocol_id: parameters.protocol_id,
            dcs: parameters.dcs,
            coding: parameters.coding()?,
            header,
            content,
        })
    }
}

impl Encodable for StatusReport {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u8(self.header.pack(TpduType::StatusReport.mti()));
        if let Some(cause) = self.failure_cause {
            buf.put_u8(cause);
        }
        buf.put_u8(self.reference);
        self.recipient.encode(buf)?;
        self.timestamp.encode(buf)?;
        self.discharge.encode(buf)?;
        self.status.encode(buf)?;
        if let Some(parameters) = &self.parameters {
            buf.put_u8(parameters.indicator());
            parameters.encode_fields(buf);
        }
        Ok(())
    }
}

// ABOUTME: SMS-SUBMIT-REPORT (GSM 03.40 9.2.2.2a), the service centre's answer to an SMS-SUBMIT
// ABOUTME: The failure cause is only present in the RP-ERROR variant

use super::TpduType;
use super::header::SubmitReportHeader;
use super::report::ReportParameters;
use crate::codec::{CodecError, Decodable, Encodable, decode_u8};
use crate::config::CodecConfig;
use crate::datatypes::{Coding, Content, FailureCause, TimeStamp, UserDataHeader};
use bytes::{BufMut, BytesMut};
use std::io::Cursor;

/// Logical SMS-SUBMIT-REPORT fields
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitReportMessage {
    /// TP-FCS, set for negative reports
    pub failure_cause: Option<u8>,
    /// TP-SCTS; stamped with the current time when `None`
    pub timestamp: Option<TimeStamp>,
    pub protocol_id: Option<u8>,
    pub dcs: Option<u8>,
    pub coding: Coding,
    pub header: Option<UserDataHeader>,
    pub content: Option<Content>,
}

impl SubmitReportMessage {
    pub fn cause(&self) -> Option<FailureCause> {
        self.failure_cause.map(FailureCause::from)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitReport {
    pub header: SubmitReportHeader,
    pub failure_cause: Option<u8>,
    pub timestamp: TimeStamp,
    pub parameters: ReportParameters,
}

impl SubmitReport {
    pub fn from_message(
        message: &SubmitReportMessage,
        config: &CodecConfig,
    ) -> Result<Self, CodecError> {
        let (parameters, udhi) = ReportParameters::build(
            message.protocol_id,
            message.dcs,
            message.coding,
            message.header.as_ref(),
            message.content.as_ref(),
        )?;
        let timestamp = match message.timestamp {
            Some(timestamp) => timestamp,
            None => TimeStamp::now(config)?,
        };

        Ok(Self {
            header: SubmitReportHeader { udhi },
            failure_cause: message.failure_cause,
            timestamp,
            parameters,
        })
    }

    /// Parse a report; `with_failure_cause` is set for the RP-ERROR variant
    pub fn parse(buf: &mut Cursor<&[u8]>, with_failure_cause: bool) -> Result<Self, CodecError> {
        let header = SubmitReportHeader::unpack(decode_u8(buf)?);
        let failure_cause = if with_failure_cause {
            Some(decode_u8(buf)?)
        } else {
            None
        };
        let indicator = decode_u8(buf)?;
        let timestamp = TimeStamp::decode(buf)?;
        let parameters = ReportParameters::decode_fields(buf, indicator)?;

        Ok(Self {
            header,
            failure_cause,
            timestamp,
            parameters,
        })
    }

    pub fn to_message(&self) -> Result<SubmitReportMessage, CodecError> {
        let user_data = self.parameters.content(self.header.udhi)?;
        let (header, content) = match user_data {
            Some(user_data) => (user_data.header, Some(user_data.content)),
            None => (None, None),
        };

        Ok(SubmitReportMessage {
            failure_cause: self.failure_cause,
            timestamp: Some(self.timestamp),
            protocol_id: self.parameters.protocol_id,
            dcs: self.parameters.dcs,
            coding: self.parameters.coding()?,
            header,
            content,
        })
    }
}

impl Encodable for SubmitReport {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u8(self.header.pack(TpduType::SubmitReport.mti()));
        if let Some(cause) = self.failure_cause {
            buf.put_u8(cause);
        }
        buf.put_u8(self.parameters.indicator());
        self.timestamp.encode(buf)?;
        self.parameters.encode_fields(buf);
        Ok(())
    }
}

// ABOUTME: SMS-DELIVER-REPORT (GSM 03.40 9.2.2.1a)
// ABOUTME: Recognised by its message type but the body is not implemented

use super::header::DeliverReportHeader;
use crate::codec::{CodecError, Encodable, decode_u8};
use bytes::BytesMut;
use std::io::Cursor;
use tracing::debug;

/// First octet of an SMS-DELIVER-REPORT; everything after it is unsupported
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeliverReport {
    pub header: DeliverReportHeader,
}

impl DeliverReport {
    const UNSUPPORTED: CodecError = CodecError::Unsupported("SMS-DELIVER-REPORT");

    /// Reads the first octet, then reports the body as unsupported
    pub fn parse(buf: &mut Cursor<&[u8]>, _with_failure_cause: bool) -> Result<Self, CodecError> {
        let header = DeliverReportHeader::unpack(decode_u8(buf)?);
        debug!(udhi = header.udhi, "SMS-DELIVER-REPORT body not implemented");
        Err(Self::UNSUPPORTED)
    }
}

impl Encodable for DeliverReport {
    fn encode(&self, _buf: &mut BytesMut) -> Result<(), CodecError> {
        Err(Self::UNSUPPORTED)
    }
}

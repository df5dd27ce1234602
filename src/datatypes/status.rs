// ABOUTME: TP-Status (GSM 03.40 9.2.3.15) carried by SMS-STATUS-REPORT
// ABOUTME: Splits the octet into a delivery outcome group and a reason looked up in a fixed table

use crate::codec::{CodecError, Decodable, Encodable, decode_u8};
use bytes::{BufMut, BytesMut};
use std::fmt;
use std::io::Cursor;

/// Outcome group, bits 6-5 of TP-Status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusGroup {
    /// Short message transaction completed
    Completed,
    /// Temporary error, SC still trying to transfer SM
    TemporaryRetrying,
    /// Permanent error, SC is not making any more transfer attempts
    PermanentError,
    /// Temporary error, SC is not making any more transfer attempts
    TemporaryFinal,
}

impl StatusGroup {
    pub fn description(&self) -> &'static str {
        match self {
            StatusGroup::Completed => "Short message transaction completed",
            StatusGroup::TemporaryRetrying => "Temporary error, SC still trying to transfer SM",
            StatusGroup::PermanentError => {
                "Permanent error, SC is not making any more transfer attempts"
            }
            StatusGroup::TemporaryFinal => {
                "Temporary error, SC is not making any more transfer attempts"
            }
        }
    }
}

/// Raw TP-Status octet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Status(pub u8);

impl Status {
    pub const RECEIVED: Status = Status(0x00);

    pub fn group(&self) -> StatusGroup {
        match (self.0 >> 5) & 0b11 {
            0b00 => StatusGroup::Completed,
            0b01 => StatusGroup::TemporaryRetrying,
            0b10 => StatusGroup::PermanentError,
            _ => StatusGroup::TemporaryFinal,
        }
    }

    /// Low five bits, the reason within the group
    pub fn code(&self) -> u8 {
        self.0 & 0b1_1111
    }

    /// Values 0x10-0x1F within each group are defined by the service centre
    pub fn is_sc_specific(&self) -> bool {
        self.0 & 0x80 == 0 && self.code() >= 0x10
    }

    /// Reason text, `None` for reserved and SC-specific values
    pub fn reason(&self) -> Option<&'static str> {
        if self.0 & 0x80 != 0 || self.is_sc_specific() {
            return None;
        }

        let reason = match (self.group(), self.code()) {
            (StatusGroup::Completed, 0x00) => "Short message received by the SME",
            (StatusGroup::Completed, 0x01) => {
                "Short message forwarded by the SC to the SME but the SC is unable to confirm delivery"
            }
            (StatusGroup::Completed, 0x02) => "Short message replaced by the SC",
            (StatusGroup::PermanentError, 0x00) => "Remote procedure error",
            (StatusGroup::PermanentError, 0x01) => "Incompatible destination",
            (StatusGroup::PermanentError, 0x02) => "Connection rejected by SME",
            (StatusGroup::PermanentError, 0x03) => "Not obtainable",
            (StatusGroup::PermanentError, 0x04) => "Quality of service not available",
            (StatusGroup::PermanentError, 0x05) => "No interworking available",
            (StatusGroup::PermanentError, 0x06) => "SM Validity Period Expired",
            (StatusGroup::PermanentError, 0x07) => "SM Deleted by originating SME",
            (StatusGroup::PermanentError, 0x08) => "SM Deleted by SC Administration",
            (StatusGroup::PermanentError, 0x09) => "SM does not exist",
            (StatusGroup::TemporaryRetrying | StatusGroup::TemporaryFinal, code) => match code {
                0x00 => "Congestion",
                0x01 => "SME busy",
                0x02 => "No response from SME",
                0x03 => "Service rejected",
                0x04 => "Quality of service not available",
                0x05 => "Error in SME",
                _ => return None,
            },
            _ => return None,
        };

        Some(reason)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{}: {}", self.group().description(), reason),
            None => write!(f, "{} ({:#04x})", self.group().description(), self.0),
        }
    }
}

impl Encodable for Status {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u8(self.0);
        Ok(())
    }
}

impl Decodable for Status {
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Ok(Status(decode_u8(buf)?))
    }
}

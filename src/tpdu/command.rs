// ABOUTME: SMS-COMMAND (GSM 03.40 9.2.2.4), an operation on a previously submitted message
// ABOUTME: Layout: first octet, TP-MR, TP-PID, TP-CT, TP-MN, TP-DA, TP-CDL, TP-CD

use super::header::CommandHeader;
use super::{TpduType, octet_length};
use crate::codec::{CodecError, Decodable, Encodable, decode_bytes, decode_u8};
use crate::datatypes::Address;
use crate::reference::ReferenceSource;
use bytes::{BufMut, Bytes, BytesMut};
use num_enum::FromPrimitive;
use std::io::Cursor;
use tracing::debug;

/// TP-Command-Type (9.2.3.19)
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandType {
    /// Enquiry relating to previously submitted short message
    Enquiry = 0x00,
    /// Cancel Status Report Request relating to previously submitted short message
    CancelStatusReportRequest = 0x01,
    /// Delete previously submitted Short Message
    Delete = 0x02,
    /// Enable Status Report Request relating to previously submitted short message
    EnableStatusReportRequest = 0x03,
    // 0x04 - 0x1F reserved, 0xE0 - 0xFF SC specific
    #[num_enum(catch_all)]
    Other(u8),
}

impl Default for CommandType {
    fn default() -> Self {
        CommandType::Enquiry
    }
}

impl CommandType {
    pub fn to_u8(self) -> u8 {
        match self {
            CommandType::Enquiry => 0x00,
            CommandType::CancelStatusReportRequest => 0x01,
            CommandType::Delete => 0x02,
            CommandType::EnableStatusReportRequest => 0x03,
            CommandType::Other(value) => value,
        }
    }
}

/// Logical SMS-COMMAND fields
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandMessage {
    pub reference: Option<u8>,
    pub protocol_id: u8,
    pub command: CommandType,
    /// TP-MN: reference of the message the command applies to
    pub message_number: u8,
    pub destination: Address,
    pub status_report_request: bool,
    /// TP-CD, passed through as raw octets
    pub data: Bytes,
}

impl CommandMessage {
    pub fn new(destination: impl Into<Address>, command: CommandType) -> Self {
        Self {
            destination: destination.into(),
            command,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub header: CommandHeader,
    pub reference: u8,
    pub protocol_id: u8,
    pub command: CommandType,
    pub message_number: u8,
    pub destination: Address,
    pub data: Bytes,
}

impl Command {
    pub fn from_message(message: &CommandMessage, references: &impl ReferenceSource) -> Self {
        let reference = message
            .reference
            .unwrap_or_else(|| references.next_reference());
        debug!(reference, command = ?message.command, "built SMS-COMMAND");

        Self {
            header: CommandHeader {
                status_report_request: message.status_report_request,
                udhi: false,
            },
            reference,
            protocol_id: message.protocol_id,
            command: message.command,
            message_number: message.message_number,
            destination: message.destination.clone(),
            data: message.data.clone(),
        }
    }

    pub fn to_message(&self) -> CommandMessage {
        CommandMessage {
            reference: Some(self.reference),
            protocol_id: self.protocol_id,
            command: self.command,
            message_number: self.message_number,
            destination: self.destination.clone(),
            status_report_request: self.header.status_report_request,
            data: self.data.clone(),
        }
    }
}

impl Encodable for Command {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u8(self.header.pack(TpduType::Command.mti()));
        buf.put_u8(self.reference);
        buf.put_u8(self.protocol_id);
        buf.put_u8(self.command.to_u8());
        buf.put_u8(self.message_number);
        self.destination.encode(buf)?;
        buf.put_u8(octet_length("command_data", &self.data)?);
        buf.put_slice(&self.data);
        Ok(())
    }
}

impl Decodable for Command {
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let header = CommandHeader::unpack(decode_u8(buf)?);
        let reference = decode_u8(buf)?;
        let protocol_id = decode_u8(buf)?;
        let command = CommandType::from(decode_u8(buf)?);
        let message_number = decode_u8(buf)?;
        let destination = Address::decode(buf)?;
        let length = usize::from(decode_u8(buf)?);
        let data = decode_bytes(buf, length)?;

        Ok(Self {
            header,
            reference,
            protocol_id,
            command,
            message_number,
            destination,
            data,
        })
    }
}

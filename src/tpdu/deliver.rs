// ABOUTME: SMS-DELIVER (GSM 03.40 9.2.2.1), a short message from the service centre to the mobile station
// ABOUTME: Layout: first octet, TP-OA, TP-PID, TP-DCS, TP-SCTS, TP-UDL, TP-UD

use super::header::DeliverHeader;
use super::{TpduType, build_user_data, coding_of, put_user_data, read_user_data, resolve_dcs};
use crate::codec::{CodecError, Decodable, Encodable, decode_remaining, decode_u8};
use crate::config::CodecConfig;
use crate::datatypes::{Address, Coding, Content, TimeStamp, UserDataHeader};
use bytes::{BufMut, Bytes, BytesMut};
use std::io::Cursor;
use tracing::debug;

/// Logical SMS-DELIVER fields
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeliverMessage {
    pub origin: Address,
    pub protocol_id: u8,
    pub dcs: Option<u8>,
    pub coding: Coding,
    /// TP-SCTS; stamped with the current time when `None`
    pub timestamp: Option<TimeStamp>,
    pub more_messages: bool,
    pub loop_prevention: bool,
    pub status_report_indication: bool,
    pub reply_path: bool,
    pub header: Option<UserDataHeader>,
    pub content: Content,
}

impl DeliverMessage {
    pub fn new(origin: impl Into<Address>, content: impl Into<Content>) -> Self {
        Self {
            origin: origin.into(),
            content: content.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deliver {
    pub header: DeliverHeader,
    pub origin: Address,
    pub protocol_id: u8,
    pub dcs: u8,
    pub timestamp: TimeStamp,
    pub user_data_length: u8,
    pub user_data: Bytes,
}

impl Deliver {
    pub fn from_message(message: &DeliverMessage, config: &CodecConfig) -> Result<Self, CodecError> {
        let (dcs, coding) = resolve_dcs(message.dcs, message.coding)?;
        let (user_data, udhi) =
            build_user_data(&message.content, coding, message.header.as_ref())?;
        let timestamp = match message.timestamp {
            Some(timestamp) => timestamp,
            None => TimeStamp::now(config)?,
        };

        debug!(origin = %message.origin, %timestamp, %coding, "built SMS-DELIVER");

        Ok(Self {
            header: DeliverHeader {
                more_messages: message.more_messages,
                loop_prevention: message.loop_prevention,
                status_report_indication: message.status_report_indication,
                udhi,
                reply_path: message.reply_path,
            },
            origin: message.origin.clone(),
            protocol_id: message.protocol_id,
            dcs,
            timestamp,
            user_data_length: user_data.length,
            user_data: user_data.buffer,
        })
    }

    pub fn to_message(&self) -> Result<DeliverMessage, CodecError> {
        let coding = coding_of(self.dcs)?;
        let user_data = read_user_data(
            &self.user_data,
            self.user_data_length,
            coding,
            self.header.udhi,
        )?;

        Ok(DeliverMessage {
            origin: self.origin.clone(),
            protocol_id: self.protocol_id,
            dcs: Some(self.dcs),
            coding,
            timestamp: Some(self.timestamp),
            more_messages: self.header.more_messages,
            loop_prevention: self.header.loop_prevention,
            status_report_indication: self.header.status_report_indication,
            reply_path: self.header.reply_path,
            header: user_data.header,
            content: user_data.content,
        })
    }
}

impl Encodable for Deliver {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u8(self.header.pack(TpduType::Deliver.mti()));
        self.origin.encode(buf)?;
        buf.put_u8(self.protocol_id);
        buf.put_u8(self.dcs);
        self.timestamp.encode(buf)?;
        put_user_data(buf, self.user_data_length, &self.user_data);
        Ok(())
    }
}

impl Decodable for Deliver {
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Ok(Self {
            header: DeliverHeader::unpack(decode_u8(buf)?),
            origin: Address::decode(buf)?,
            protocol_id: decode_u8(buf)?,
            dcs: decode_u8(buf)?,
            timestamp: TimeStamp::decode(buf)?,
            user_data_length: decode_u8(buf)?,
            user_data: decode_remaining(buf),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{PortAddressing, UdhFields};

    // Received from a live SMSC: MMS and SRI set, PID 0x40, empty body
    const EMPTY_DELIVER: &str = "240b919758700027f340002221928173912100";

    fn stamp() -> TimeStamp {
        TimeStamp {
            year: 22,
            month: 12,
            day: 29,
            hour: 18,
            minute: 37,
            second: 19,
            timezone: 12,
        }
    }

    #[test]
    fn parse_live_deliver() {
        let data = hex::decode(EMPTY_DELIVER).unwrap();
        let message = Deliver::from_slice(&data).unwrap().to_message().unwrap();

        assert_eq!(message.origin, Address::international("79850700723"));
        assert_eq!(message.protocol_id, 0x40);
        assert_eq!(message.dcs, Some(0));
        assert_eq!(message.timestamp, Some(stamp()));
        assert!(message.more_messages);
        assert!(message.status_report_indication);
        assert!(!message.loop_prevention);
        assert_eq!(message.content, Content::from(""));
    }

    #[test]
    fn encode_matches_live_deliver() {
        let message = DeliverMessage {
            protocol_id: 0x40,
            timestamp: Some(stamp()),
            more_messages: true,
            status_report_indication: true,
            ..DeliverMessage::new("79850700723", "")
        };
        let pdu = Deliver::from_message(&message, &CodecConfig::default()).unwrap();
        assert_eq!(hex::encode(pdu.to_bytes().unwrap()), EMPTY_DELIVER);
    }

    #[test]
    fn timestamp_defaults_to_now() {
        let config = CodecConfig::default().with_timezone(-4);
        let pdu = Deliver::from_message(&DeliverMessage::new("123", "hi"), &config).unwrap();
        assert_eq!(pdu.timestamp.timezone, -4);
    }

    #[test]
    fn alphanumeric_origin_with_port_header() {
        let header = UserDataHeader::prepare(
            &UdhFields::default().with_port(PortAddressing::destination(2948)),
        );
        let message = DeliverMessage {
            origin: Address::alphanumeric("Bank"),
            timestamp: Some(stamp()),
            header: Some(header.clone()),
            ..DeliverMessage::new("", "Balance: 10")
        };

        let bytes = Deliver::from_message(&message, &CodecConfig::default())
            .unwrap()
            .to_bytes()
            .unwrap();
        assert_eq!(bytes[0] & 0b0100_0000, 0b0100_0000);

        let decoded = Deliver::from_slice(&bytes).unwrap().to_message().unwrap();
        assert_eq!(decoded.origin, Address::alphanumeric("Bank"));
        assert_eq!(decoded.header, Some(header));
        assert_eq!(decoded.content, Content::from("Balance: 10"));
    }

    #[test]
    fn invalid_character_aborts() {
        let message = DeliverMessage::new("123", "snow ☃");
        assert!(matches!(
            Deliver::from_message(&message, &CodecConfig::default()),
            Err(CodecError::InvalidCharacter('☃'))
        ));
    }
}

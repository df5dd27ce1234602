// ABOUTME: Transfer layer (GSM 03.40): the six TPDU kinds and direction-aware dispatch
// ABOUTME: The two MTI bits select a different kind depending on who sent the message

pub mod header;

mod command;
mod deliver;
mod deliver_report;
mod report;
mod status_report;
mod submit;
mod submit_report;

pub use command::{Command, CommandMessage, CommandType};
pub use deliver::{Deliver, DeliverMessage};
pub use deliver_report::DeliverReport;
pub use report::ReportParameters;
pub use status_report::{StatusReport, StatusReportMessage};
pub use submit::{Submit, SubmitMessage};
pub use submit_report::{SubmitReport, SubmitReportMessage};

use crate::codec::{CodecError, Decodable, Encodable, length_octet, peek_u8};
use crate::datatypes::{Coding, DataCodingScheme, UserData, UserDataHeader, user_data};
use crate::datatypes::{Content, EncodedUserData};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use std::io::Cursor;
use tracing::{debug, warn};

/// Which side of the air interface sent a PDU
///
/// The relay layer carries this as its network flag; the transfer layer
/// needs it to interpret the MTI bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Mobile station to service centre
    #[default]
    MobileOriginated,
    /// Service centre to mobile station
    Network,
}

impl Direction {
    pub fn from_network_flag(network: bool) -> Self {
        if network {
            Direction::Network
        } else {
            Direction::MobileOriginated
        }
    }

    pub fn is_network(&self) -> bool {
        *self == Direction::Network
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::MobileOriginated => write!(f, "ms"),
            Direction::Network => write!(f, "network"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TpduType {
    Submit,
    Deliver,
    Command,
    SubmitReport,
    DeliverReport,
    StatusReport,
}

impl TpduType {
    /// TP-MTI (9.2.3.1); `0b11` is reserved in both directions
    pub fn from_mti(mti: u8, direction: Direction) -> Option<Self> {
        match (direction, mti & 0b11) {
            (Direction::MobileOriginated, 0b00) => Some(TpduType::DeliverReport),
            (Direction::MobileOriginated, 0b01) => Some(TpduType::Submit),
            (Direction::MobileOriginated, 0b10) => Some(TpduType::Command),
            (Direction::Network, 0b00) => Some(TpduType::Deliver),
            (Direction::Network, 0b01) => Some(TpduType::SubmitReport),
            (Direction::Network, 0b10) => Some(TpduType::StatusReport),
            _ => None,
        }
    }

    pub fn mti(&self) -> u8 {
        match self {
            TpduType::Deliver | TpduType::DeliverReport => 0b00,
            TpduType::Submit | TpduType::SubmitReport => 0b01,
            TpduType::Command | TpduType::StatusReport => 0b10,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            TpduType::Submit | TpduType::Command | TpduType::DeliverReport => {
                Direction::MobileOriginated
            }
            TpduType::Deliver | TpduType::SubmitReport | TpduType::StatusReport => {
                Direction::Network
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TpduType::Submit => "SMS-SUBMIT",
            TpduType::Deliver => "SMS-DELIVER",
            TpduType::Command => "SMS-COMMAND",
            TpduType::SubmitReport => "SMS-SUBMIT-REPORT",
            TpduType::DeliverReport => "SMS-DELIVER-REPORT",
            TpduType::StatusReport => "SMS-STATUS-REPORT",
        }
    }
}

impl fmt::Display for TpduType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A transfer layer PDU in its wire-level form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tpdu {
    Submit(Submit),
    Deliver(Deliver),
    Command(Command),
    SubmitReport(SubmitReport),
    DeliverReport(DeliverReport),
    StatusReport(StatusReport),
}

impl Tpdu {
    pub fn kind(&self) -> TpduType {
        match self {
            Tpdu::Submit(_) => TpduType::Submit,
            Tpdu::Deliver(_) => TpduType::Deliver,
            Tpdu::Command(_) => TpduType::Command,
            Tpdu::SubmitReport(_) => TpduType::SubmitReport,
            Tpdu::DeliverReport(_) => TpduType::DeliverReport,
            Tpdu::StatusReport(_) => TpduType::StatusReport,
        }
    }

    /// Parse a TPDU sent in `direction`
    ///
    /// `with_failure_cause` is set when the relay layer carried the PDU in an
    /// RP-ERROR, which is the only case the reports include TP-FCS. Returns
    /// `None` for the reserved message type.
    pub fn parse(
        data: &[u8],
        direction: Direction,
        with_failure_cause: bool,
    ) -> Result<Option<Self>, CodecError> {
        let mut cursor = Cursor::new(data);
        let first = peek_u8(&cursor)?;

        let Some(kind) = TpduType::from_mti(first, direction) else {
            warn!(first_octet = first, %direction, "reserved TP-MTI");
            return Ok(None);
        };
        debug!(%kind, %direction, "parsing TPDU");

        let tpdu = match kind {
            TpduType::Submit => Tpdu::Submit(Submit::decode(&mut cursor)?),
            TpduType::Deliver => Tpdu::Deliver(Deliver::decode(&mut cursor)?),
            TpduType::Command => Tpdu::Command(Command::decode(&mut cursor)?),
            TpduType::SubmitReport => {
                Tpdu::SubmitReport(SubmitReport::parse(&mut cursor, with_failure_cause)?)
            }
            TpduType::DeliverReport => {
                Tpdu::DeliverReport(DeliverReport::parse(&mut cursor, with_failure_cause)?)
            }
            TpduType::StatusReport => {
                Tpdu::StatusReport(StatusReport::parse(&mut cursor, with_failure_cause)?)
            }
        };

        Ok(Some(tpdu))
    }

    /// Logical fields of the PDU
    pub fn to_message(&self) -> Result<TpMessage, CodecError> {
        Ok(match self {
            Tpdu::Submit(pdu) => TpMessage::Submit(pdu.to_message()?),
            Tpdu::Deliver(pdu) => TpMessage::Deliver(pdu.to_message()?),
            Tpdu::Command(pdu) => TpMessage::Command(pdu.to_message()),
            Tpdu::SubmitReport(pdu) => TpMessage::SubmitReport(pdu.to_message()?),
            Tpdu::DeliverReport(_) => return Err(CodecError::Unsupported("SMS-DELIVER-REPORT")),
            Tpdu::StatusReport(pdu) => TpMessage::StatusReport(pdu.to_message()?),
        })
    }
}

impl Encodable for Tpdu {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        match self {
            Tpdu::Submit(pdu) => pdu.encode(buf),
            Tpdu::Deliver(pdu) => pdu.encode(buf),
            Tpdu::Command(pdu) => pdu.encode(buf),
            Tpdu::SubmitReport(pdu) => pdu.encode(buf),
            Tpdu::DeliverReport(pdu) => pdu.encode(buf),
            Tpdu::StatusReport(pdu) => pdu.encode(buf),
        }
    }
}

/// Decoded transfer layer message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TpMessage {
    Submit(SubmitMessage),
    Deliver(DeliverMessage),
    Command(CommandMessage),
    SubmitReport(SubmitReportMessage),
    StatusReport(StatusReportMessage),
}

impl TpMessage {
    pub fn kind(&self) -> TpduType {
        match self {
            TpMessage::Submit(_) => TpduType::Submit,
            TpMessage::Deliver(_) => TpduType::Deliver,
            TpMessage::Command(_) => TpduType::Command,
            TpMessage::SubmitReport(_) => TpduType::SubmitReport,
            TpMessage::StatusReport(_) => TpduType::StatusReport,
        }
    }
}

/// Decode the TPDU carried by a relay layer message
///
/// `Ok(None)` when the message type is reserved or the DCS octet belongs to a
/// reserved coding group, so no alphabet can be chosen for the user data.
pub fn decode(
    payload: &[u8],
    direction: Direction,
    with_failure_cause: bool,
) -> Result<Option<TpMessage>, CodecError> {
    let Some(tpdu) = Tpdu::parse(payload, direction, with_failure_cause)? else {
        return Ok(None);
    };

    match tpdu.to_message() {
        Ok(message) => Ok(Some(message)),
        Err(CodecError::UnsupportedDcs(octet)) => {
            warn!(dcs = octet, kind = %tpdu.kind(), "cannot detect scheme for DCS");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// TP-DCS octet and alphabet for an outgoing message
///
/// An explicit octet is sent verbatim and fails when its group is reserved;
/// otherwise the octet is derived from `coding`. The derived octet only
/// tells UCS2 from the default alphabet, so binary coding needs an explicit one.
pub(crate) fn resolve_dcs(dcs: Option<u8>, coding: Coding) -> Result<(u8, Coding), CodecError> {
    match (dcs, coding) {
        (Some(octet), _) => Ok((octet, coding_of(octet)?)),
        (None, Coding::Binary) => Err(CodecError::FieldValidation {
            field: "dcs",
            reason: "binary coding needs an explicit TP-DCS octet".to_string(),
        }),
        (None, coding) => Ok((DataCodingScheme::general(coding).encode_sms(), coding)),
    }
}

/// Alphabet selected by a received TP-DCS octet
pub(crate) fn coding_of(dcs: u8) -> Result<Coding, CodecError> {
    DataCodingScheme::from_sms_octet(dcs)
        .coding()
        .ok_or(CodecError::UnsupportedDcs(dcs))
}

/// Build TP-UD from logical fields; returns the user data and whether TP-UDHI is set
pub(crate) fn build_user_data(
    content: &Content,
    coding: Coding,
    header: Option<&UserDataHeader>,
) -> Result<(EncodedUserData, bool), CodecError> {
    let header = match header {
        Some(header) => header.encode()?,
        None => None,
    };
    let encoded = user_data::encode(content, coding, header.as_deref())?;
    Ok((encoded, header.is_some()))
}

/// Split TP-UD, bounded by TP-UDL
pub(crate) fn read_user_data(
    user_data: &[u8],
    length: u8,
    coding: Coding,
    udhi: bool,
) -> Result<UserData, CodecError> {
    user_data::decode(user_data, coding, udhi, Some(usize::from(length)))
}

/// `{UDL, UD}` as written by every kind that carries user data
pub(crate) fn put_user_data(buf: &mut BytesMut, length: u8, user_data: &Bytes) {
    buf.put_u8(length);
    buf.put_slice(user_data);
}

/// One-octet length of a byte field that has no septet form
pub(crate) fn octet_length(field: &'static str, data: &[u8]) -> Result<u8, CodecError> {
    length_octet(field, data.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mti_depends_on_direction() {
        use Direction::*;

        assert_eq!(TpduType::from_mti(0, MobileOriginated), Some(TpduType::DeliverReport));
        assert_eq!(TpduType::from_mti(1, MobileOriginated), Some(TpduType::Submit));
        assert_eq!(TpduType::from_mti(2, MobileOriginated), Some(TpduType::Command));
        assert_eq!(TpduType::from_mti(0, Network), Some(TpduType::Deliver));
        assert_eq!(TpduType::from_mti(1, Network), Some(TpduType::SubmitReport));
        assert_eq!(TpduType::from_mti(0x26, Network), Some(TpduType::StatusReport));
        assert_eq!(TpduType::from_mti(3, Network), None);
        assert_eq!(TpduType::from_mti(0xFF, MobileOriginated), None);
    }

    #[test]
    fn mti_round_trips_with_direction() {
        for kind in [
            TpduType::Submit,
            TpduType::Deliver,
            TpduType::Command,
            TpduType::SubmitReport,
            TpduType::DeliverReport,
            TpduType::StatusReport,
        ] {
            assert_eq!(TpduType::from_mti(kind.mti(), kind.direction()), Some(kind));
        }
    }

    #[test]
    fn reserved_mti_is_absent() {
        assert_eq!(Tpdu::parse(&[0x03], Direction::Network, false).unwrap(), None);
        assert_eq!(decode(&[0x07, 0x00], Direction::MobileOriginated, false).unwrap(), None);
    }

    #[test]
    fn reserved_dcs_is_absent() {
        // SMS-DELIVER with DCS 0x80 (reserved group)
        let pdu = hex::decode("000b919758700027f340802221928173912100").unwrap();
        assert_eq!(decode(&pdu, Direction::Network, false).unwrap(), None);
    }

    #[test]
    fn deliver_report_is_unsupported() {
        let err = decode(&[0x00, 0x00], Direction::MobileOriginated, false).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn empty_payload_is_incomplete() {
        assert!(matches!(
            decode(&[], Direction::Network, false),
            Err(CodecError::Incomplete)
        ));
    }

    #[test]
    fn explicit_dcs_is_checked() {
        assert_eq!(resolve_dcs(None, Coding::Ucs2).unwrap(), (0x08, Coding::Ucs2));
        assert_eq!(resolve_dcs(Some(0xF6), Coding::Default).unwrap(), (0xF6, Coding::Binary));
        assert!(matches!(
            resolve_dcs(Some(0x80), Coding::Default),
            Err(CodecError::UnsupportedDcs(0x80))
        ));
        assert_eq!(resolve_dcs(Some(0x04), Coding::Binary).unwrap(), (0x04, Coding::Binary));
        assert!(matches!(
            resolve_dcs(None, Coding::Binary),
            Err(CodecError::FieldValidation { field: "dcs", .. })
        ));
    }
}

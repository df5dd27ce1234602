// ABOUTME: One-call builders that wrap a TPDU in its relay envelope, and the matching decoder
// ABOUTME: SmsCodec owns the configuration and the source of message references

use crate::codec::{CodecError, Encodable};
use crate::config::CodecConfig;
use crate::datatypes::Address;
use crate::reference::{FixedReference, RandomReference, ReferenceSource};
use crate::rpdu::{self, Ack, Data, Error, RpCause, Rpdu, RpduType, Smma};
use crate::tpdu::{
    self, Command, CommandMessage, Deliver, DeliverMessage, Direction, Submit, SubmitMessage,
    SubmitReport, SubmitReportMessage, TpMessage,
};
use bytes::Bytes;
use tracing::{debug, trace, warn};

/// TP-FCS "unspecified error cause"
const UNSPECIFIED_FAILURE: u8 = 0xFF;

/// Relay layer addressing for an outgoing message
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Envelope {
    /// RP-MR; drawn from the codec's reference source when `None`
    pub reference: Option<u8>,
    /// RP-Originator Address of an SMS-SUBMIT
    pub source: Option<Address>,
    /// Service centre address
    pub smsc: Option<Address>,
    /// Direction of RP-ACK and RP-ERROR. The other kinds have a fixed direction.
    pub direction: Direction,
}

impl Envelope {
    pub fn new(smsc: impl Into<Address>) -> Self {
        Self {
            smsc: Some(smsc.into()),
            ..Default::default()
        }
    }

    pub fn with_reference(mut self, reference: u8) -> Self {
        self.reference = Some(reference);
        self
    }
}

/// A decoded relay message and the transfer layer message it carries
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedMessage {
    pub kind: RpduType,
    pub direction: Direction,
    pub reference: u8,
    pub source: Option<Address>,
    pub destination: Option<Address>,
    /// RP-Cause of an RP-ERROR
    pub cause: Option<RpCause>,
    /// Raw TPDU octets
    pub content: Option<Bytes>,
    pub tpdu: Option<TpMessage>,
}

/// Builds and decodes complete relay layer messages
#[derive(Clone, Debug, Default)]
pub struct SmsCodec<R: ReferenceSource = RandomReference> {
    config: CodecConfig,
    references: R,
}

impl<R: ReferenceSource> SmsCodec<R> {
    pub fn new(config: CodecConfig, references: R) -> Self {
        Self { config, references }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn reference(&self, reference: Option<u8>) -> u8 {
        reference.unwrap_or_else(|| self.references.next_reference())
    }

    /// SMS-SUBMIT in a mobile originated RP-DATA addressed to the service centre
    ///
    /// TP-MR follows RP-MR unless the message sets its own.
    pub fn submit(&self, envelope: &Envelope, message: &SubmitMessage) -> Result<Bytes, CodecError> {
        let reference = self.reference(envelope.reference.or(message.reference));
        let tpdu = Submit::from_message(message, &FixedReference(reference))?;

        self.relay(Rpdu::Data(Data {
            direction: Direction::MobileOriginated,
            reference,
            origin: envelope.source.clone(),
            destination: envelope.smsc.clone(),
            payload: tpdu.to_bytes()?,
        }))
    }

    /// SMS-DELIVER in a network RP-DATA originated by the service centre
    pub fn deliver(
        &self,
        envelope: &Envelope,
        message: &DeliverMessage,
    ) -> Result<Bytes, CodecError> {
        let tpdu = Deliver::from_message(message, &self.config)?;

        self.relay(Rpdu::Data(Data {
            direction: Direction::Network,
            reference: self.reference(envelope.reference),
            origin: envelope.smsc.clone(),
            destination: None,
            payload: tpdu.to_bytes()?,
        }))
    }

    /// SMS-COMMAND in a mobile originated RP-DATA addressed to the service centre
    pub fn command(
        &self,
        envelope: &Envelope,
        message: &CommandMessage,
    ) -> Result<Bytes, CodecError> {
        let reference = self.reference(envelope.reference.or(message.reference));
        let tpdu = Command::from_message(message, &FixedReference(reference));

        self.relay(Rpdu::Data(Data {
            direction: Direction::MobileOriginated,
            reference,
            origin: None,
            destination: envelope.smsc.clone(),
            payload: tpdu.to_bytes()?,
        }))
    }

    /// RP-ACK, optionally carrying a positive SMS-SUBMIT-REPORT
    pub fn ack(
        &self,
        envelope: &Envelope,
        report: Option<&SubmitReportMessage>,
    ) -> Result<Bytes, CodecError> {
        let payload = match report {
            Some(report) => Some(SubmitReport::from_message(report, &self.config)?.to_bytes()?),
            None => None,
        };

        self.relay(Rpdu::Ack(Ack {
            direction: envelope.direction,
            reference: self.reference(envelope.reference),
            payload,
        }))
    }

    /// RP-ERROR with `cause`, optionally carrying a negative SMS-SUBMIT-REPORT
    ///
    /// The report always carries TP-FCS; "unspecified" is used when it has none.
    pub fn error(
        &self,
        envelope: &Envelope,
        cause: u8,
        report: Option<&SubmitReportMessage>,
    ) -> Result<Bytes, CodecError> {
        let payload = match report {
            Some(report) => {
                let report = SubmitReportMessage {
                    failure_cause: report.failure_cause.or(Some(UNSPECIFIED_FAILURE)),
                    ..report.clone()
                };
                Some(SubmitReport::from_message(&report, &self.config)?.to_bytes()?)
            }
            None => None,
        };

        self.relay(Rpdu::Error(Error {
            direction: envelope.direction,
            reference: self.reference(envelope.reference),
            cause,
            payload,
        }))
    }

    /// RP-SMMA: the mobile has memory available again
    pub fn smma(&self, envelope: &Envelope) -> Result<Bytes, CodecError> {
        self.relay(Rpdu::Smma(Smma {
            reference: self.reference(envelope.reference),
        }))
    }

    pub fn decode(&self, data: &[u8]) -> Result<Option<DecodedMessage>, CodecError> {
        decode(data)
    }

    fn relay(&self, rpdu: Rpdu) -> Result<Bytes, CodecError> {
        debug!(
            kind = %rpdu.kind(),
            direction = %rpdu.direction(),
            reference = rpdu.reference(),
            "built RPDU"
        );
        let bytes = rpdu.to_bytes()?;
        trace!(pdu = ?bytes, "encoded RPDU");
        Ok(bytes)
    }
}

/// Decode a relay message and the TPDU it carries
///
/// `Ok(None)` when the relay message is unrecognized. A recognized relay
/// message whose TPDU is unrecognized, unsupported or malformed decodes with
/// `tpdu: None`; its raw octets stay in `content`.
pub fn decode(data: &[u8]) -> Result<Option<DecodedMessage>, CodecError> {
    let Some(rpdu) = rpdu::decode(data)? else {
        return Ok(None);
    };

    let direction = rpdu.direction();
    let content = rpdu.payload().cloned();
    let tpdu = match &content {
        Some(payload) => {
            match tpdu::decode(payload, direction, rpdu.kind() == RpduType::Error) {
                Ok(tpdu) => tpdu,
                Err(e) => {
                    warn!(kind = %rpdu.kind(), %direction, error = %e, "TPDU not decoded");
                    None
                }
            }
        }
        None => None,
    };

    let (source, destination, cause) = match &rpdu {
        Rpdu::Data(data) => (data.origin.clone(), data.destination.clone(), None),
        Rpdu::Error(error) => (None, None, Some(error.rp_cause())),
        Rpdu::Ack(_) | Rpdu::Smma(_) => (None, None, None),
    };

    Ok(Some(DecodedMessage {
        kind: rpdu.kind(),
        direction,
        reference: rpdu.reference(),
        source,
        destination,
        cause,
        content,
        tpdu,
    }))
}

pub fn submit(envelope: &Envelope, message: &SubmitMessage) -> Result<Bytes, CodecError> {
    SmsCodec::<RandomReference>::default().submit(envelope, message)
}

pub fn deliver(envelope: &Envelope, message: &DeliverMessage) -> Result<Bytes, CodecError> {
    SmsCodec::<RandomReference>::default().deliver(envelope, message)
}

pub fn command(envelope: &Envelope, message: &CommandMessage) -> Result<Bytes, CodecError> {
    SmsCodec::<RandomReference>::default().command(envelope, message)
}

pub fn ack(envelope: &Envelope, report: Option<&SubmitReportMessage>) -> Result<Bytes, CodecError> {
    SmsCodec::<RandomReference>::default().ack(envelope, report)
}

pub fn error(
    envelope: &Envelope,
    cause: u8,
    report: Option<&SubmitReportMessage>,
) -> Result<Bytes, CodecError> {
    SmsCodec::<RandomReference>::default().error(envelope, cause, report)
}

pub fn smma(envelope: &Envelope) -> Result<Bytes, CodecError> {
    SmsCodec::<RandomReference>::default().smma(envelope)
}

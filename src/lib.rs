#[macro_use]
mod macros;

pub mod codec;
pub mod config;
pub mod datatypes;
pub mod message;
pub mod reference;
pub mod rpdu;
pub mod tpdu;


// Re-export codec types for direct access
pub use codec::{CodecError, Decodable, Encodable};
pub use config::CodecConfig;
pub use reference::{FixedReference, RandomReference, ReferenceSource};

// Re-export the dispatch surface for easy access
pub use message::{
    DecodedMessage, Envelope, SmsCodec, ack, command, decode, deliver, error, smma, submit,
};

/// A specialized `Result` type for codec operations.
///
/// # Examples
///
/// ## Submitting a message
///
/// ```rust
/// use sms_pdu::{Envelope, SmsCodec, FixedReference, CodecConfig};
/// use sms_pdu::tpdu::SubmitMessage;
///
/// fn main() -> sms_pdu::Result<()> {
///     let codec = SmsCodec::new(CodecConfig::default(), FixedReference(1));
///     let envelope = Envelope::new("73219876543");
///     let message = SubmitMessage::new("71231234567", "hello");
///
///     let pdu = codec.submit(&envelope, &message)?;
///     assert_eq!(pdu.len(), 30);
///     Ok(())
/// }
/// ```
///
/// ## Decoding a relay message
///
/// ```rust
/// use sms_pdu::tpdu::TpMessage;
///
/// let pdu = [
///     0x00, 0x01, 0x00, 0x07, 0x91, 0x37, 0x12, 0x89, 0x67, 0x45, 0xf3, 0x12, 0x01, 0x01,
///     0x0b, 0x91, 0x17, 0x32, 0x21, 0x43, 0x65, 0xf7, 0x00, 0x00, 0x05, 0xe8, 0x32, 0x9b,
///     0xfd, 0x06,
/// ];
/// let message = sms_pdu::decode(&pdu).unwrap().expect("recognized RPDU");
///
/// match message.tpdu {
///     Some(TpMessage::Submit(submit)) => assert_eq!(submit.content.as_text(), Some("hello")),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub type Result<T> = std::result::Result<T, CodecError>;

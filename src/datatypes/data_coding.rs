// ABOUTME: Strongly-typed TP-DCS (GSM 03.38 clause 4) for point-to-point SMS and cell broadcast
// ABOUTME: One octet decodes to exactly one scheme; reserved ranges keep their raw value

use crate::codec::CodecError;
use num_enum::TryFromPrimitive;
use std::fmt;

/// Character repertoire of the user data
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Coding {
    /// GSM 7-bit default alphabet
    #[default]
    Default = 0,
    /// 8-bit data
    Binary = 1,
    /// UCS2, big-endian
    Ucs2 = 2,
    Reserved = 3,
}

impl Coding {
    fn from_bits(bits: u8) -> Self {
        Coding::try_from(bits & 0b11).unwrap_or(Coding::Reserved)
    }

    /// Returns the alphabet name for this coding
    pub fn name(&self) -> &'static str {
        match self {
            Coding::Default => "default",
            Coding::Binary => "binary",
            Coding::Ucs2 => "ucs2",
            Coding::Reserved => "reserved",
        }
    }
}

impl fmt::Display for Coding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Message class for SMS delivery
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum MessageClass {
    /// Class 0: flash SMS (displayed immediately, not stored)
    #[default]
    Flash,
    /// Class 1: mobile equipment specific
    MobileEquipment,
    /// Class 2: SIM-specific message (stored on SIM card)
    SimSpecific,
    /// Class 3: terminal equipment specific
    TerminalEquipment,
}

impl MessageClass {
    /// Returns a human-readable description of the message class
    pub fn description(&self) -> &'static str {
        match self {
            MessageClass::Flash => "Flash SMS (immediate display)",
            MessageClass::MobileEquipment => "Mobile Equipment specific",
            MessageClass::SimSpecific => "SIM card storage",
            MessageClass::TerminalEquipment => "Terminal Equipment specific",
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            MessageClass::Flash => 0,
            MessageClass::MobileEquipment => 1,
            MessageClass::SimSpecific => 2,
            MessageClass::TerminalEquipment => 3,
        }
    }
}

impl From<u8> for MessageClass {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0 => MessageClass::Flash,
            1 => MessageClass::MobileEquipment,
            2 => MessageClass::SimSpecific,
            _ => MessageClass::TerminalEquipment,
        }
    }
}

/// Kind of message waiting, bits 1-0 of the MWI groups
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum IndicationType {
    Voicemail,
    Fax,
    Email,
    Other,
}

impl From<u8> for IndicationType {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0 => IndicationType::Voicemail,
            1 => IndicationType::Fax,
            2 => IndicationType::Email,
            _ => IndicationType::Other,
        }
    }
}

/// Cell broadcast language group (coding group 0000)
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Language {
    German = 0,
    English = 1,
    Italian = 2,
    French = 3,
    Spanish = 4,
    Dutch = 5,
    Swedish = 6,
    Danish = 7,
    Portuguese = 8,
    Finnish = 9,
    Norwegian = 10,
    Greek = 11,
    Turkish = 12,
    Reserved1 = 13,
    Reserved2 = 14,
    #[default]
    Unspecified = 15,
}

/// Raw DCS as it reaches the decoder: a bare octet or the buffer it starts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DcsInput<'a> {
    Octet(u8),
    Buffer(&'a [u8]),
}

impl DcsInput<'_> {
    fn octet(&self) -> Result<u8, CodecError> {
        match self {
            DcsInput::Octet(octet) => Ok(*octet),
            DcsInput::Buffer(buffer) => buffer.first().copied().ok_or(CodecError::InvalidType),
        }
    }
}

impl From<u8> for DcsInput<'_> {
    fn from(octet: u8) -> Self {
        DcsInput::Octet(octet)
    }
}

impl<'a> From<&'a [u8]> for DcsInput<'a> {
    fn from(buffer: &'a [u8]) -> Self {
        DcsInput::Buffer(buffer)
    }
}

/// Decoded data coding scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataCodingScheme {
    /// General data coding indication
    General {
        compressed: bool,
        coding: Coding,
        /// Present only when the class bits are meaningful
        class: Option<MessageClass>,
    },
    /// Data coding / message class group (1111)
    Class {
        coding: Coding,
        class: MessageClass,
        /// Bit 3, reserved by GSM 03.38 and carried so the octet survives a round trip
        reserved_bit: bool,
    },
    /// Message waiting indication groups (1100, 1101, 1110)
    MessageWaiting {
        active: bool,
        reserved_bit: bool,
        discard: bool,
        coding: Coding,
        indication: IndicationType,
    },
    /// Cell broadcast language group, default alphabet
    Language(Language),
    /// Reserved coding group
    Reserved(u8),
}

impl DataCodingScheme {
    /// General group scheme with no class and no compression
    pub fn general(coding: Coding) -> Self {
        DataCodingScheme::General {
            compressed: false,
            coding,
            class: None,
        }
    }

    /// Decode with the point-to-point SMS profile
    pub fn decode_sms<'a>(input: impl Into<DcsInput<'a>>) -> Result<Self, CodecError> {
        Ok(Self::from_sms_octet(input.into().octet()?))
    }

    /// Decode with the cell broadcast profile
    pub fn decode_cell<'a>(input: impl Into<DcsInput<'a>>) -> Result<Self, CodecError> {
        Ok(Self::from_cell_octet(input.into().octet()?))
    }

    pub fn from_sms_octet(octet: u8) -> Self {
        let high = octet >> 4;

        match high >> 2 {
            0b00 => Self::general_group(octet),
            0b11 if high == 0b1111 => Self::class_group(octet),
            0b11 => DataCodingScheme::MessageWaiting {
                active: octet & 0b1000 != 0,
                reserved_bit: octet & 0b0100 != 0,
                discard: high == 0b1100,
                coding: if high == 0b1110 {
                    Coding::Ucs2
                } else {
                    Coding::Default
                },
                indication: IndicationType::from(octet),
            },
            _ => DataCodingScheme::Reserved(octet),
        }
    }

    pub fn from_cell_octet(octet: u8) -> Self {
        let high = octet >> 4;

        match high {
            0b0000 => match Language::try_from(octet & 0x0F) {
                Ok(language) => DataCodingScheme::Language(language),
                Err(_) => DataCodingScheme::Reserved(octet),
            },
            0b0100..=0b0111 => Self::general_group(octet),
            0b1111 => Self::class_group(octet),
            _ => DataCodingScheme::Reserved(octet),
        }
    }

    fn general_group(octet: u8) -> Self {
        let high = octet >> 4;
        DataCodingScheme::General {
            compressed: high & 0b0010 != 0,
            coding: Coding::from_bits(octet >> 2),
            class: (high & 0b0001 != 0).then(|| MessageClass::from(octet)),
        }
    }

    fn class_group(octet: u8) -> Self {
        DataCodingScheme::Class {
            coding: if octet & 0b0100 != 0 {
                Coding::Binary
            } else {
                Coding::Default
            },
            class: MessageClass::from(octet),
            reserved_bit: octet & 0b1000 != 0,
        }
    }

    /// Encode with the point-to-point SMS profile
    ///
    /// Only the alphabet is distinguished: UCS2 gives `0x08`, everything else
    /// the plain default alphabet `0x00`. Callers needing a richer octet pass
    /// it through verbatim instead.
    pub fn encode_sms(&self) -> u8 {
        match self.coding() {
            Some(Coding::Ucs2) => 0x08,
            _ => 0x00,
        }
    }

    /// Encode with the cell broadcast profile
    pub fn encode_cell(&self) -> Result<u8, CodecError> {
        match *self {
            DataCodingScheme::Language(language) => Ok(language as u8),
            DataCodingScheme::General {
                compressed,
                coding,
                class,
            } => Ok(0b0100_0000
                | u8::from(compressed) << 5
                | u8::from(class.is_some()) << 4
                | (coding as u8) << 2
                | class.map_or(0, |class| class.number())),
            DataCodingScheme::Class {
                coding,
                class,
                reserved_bit,
            } => Ok(0b1111_0000
                | u8::from(reserved_bit) << 3
                | u8::from(coding == Coding::Binary) << 2
                | class.number()),
            DataCodingScheme::MessageWaiting { .. } => {
                Err(CodecError::Unsupported("message waiting indication in cell broadcast"))
            }
            DataCodingScheme::Reserved(octet) => Ok(octet),
        }
    }

    /// Pick the cell broadcast group that can express the given fields
    ///
    /// Compressed, UCS2 and reserved codings need the general group; binary
    /// data or an explicit class needs the class group; plain default-alphabet
    /// text goes in the language group.
    pub fn for_cell(
        coding: Coding,
        compressed: bool,
        class: Option<MessageClass>,
        language: Option<Language>,
    ) -> Self {
        if compressed || matches!(coding, Coding::Ucs2 | Coding::Reserved) {
            DataCodingScheme::General {
                compressed,
                coding,
                class,
            }
        } else if coding == Coding::Binary || class.is_some() {
            DataCodingScheme::Class {
                coding,
                class: class.unwrap_or_default(),
                reserved_bit: false,
            }
        } else {
            DataCodingScheme::Language(language.unwrap_or_default())
        }
    }

    /// Alphabet of the user data, `None` for reserved groups
    pub fn coding(&self) -> Option<Coding> {
        match self {
            DataCodingScheme::General { coding, .. }
            | DataCodingScheme::Class { coding, .. }
            | DataCodingScheme::MessageWaiting { coding, .. } => Some(*coding),
            DataCodingScheme::Language(_) => Some(Coding::Default),
            DataCodingScheme::Reserved(_) => None,
        }
    }

    /// Returns the message class if this coding scheme includes one
    pub fn message_class(&self) -> Option<MessageClass> {
        match self {
            DataCodingScheme::General { class, .. } => *class,
            DataCodingScheme::Class { class, .. } => Some(*class),
            _ => None,
        }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self, DataCodingScheme::Reserved(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sms_class_group() {
        let scheme = DataCodingScheme::decode_sms(0xF6u8).unwrap();
        assert_eq!(
            scheme,
            DataCodingScheme::Class {
                coding: Coding::Binary,
                class: MessageClass::SimSpecific,
                reserved_bit: false,
            }
        );

        let scheme = DataCodingScheme::decode_sms(0xF0u8).unwrap();
        assert_eq!(scheme.coding(), Some(Coding::Default));
        assert_eq!(scheme.message_class(), Some(MessageClass::Flash));
    }

    #[test]
    fn sms_general_group() {
        assert_eq!(
            DataCodingScheme::decode_sms(0x10u8).unwrap(),
            DataCodingScheme::General {
                compressed: false,
                coding: Coding::Default,
                class: Some(MessageClass::Flash),
            }
        );
        assert_eq!(
            DataCodingScheme::decode_sms(0x18u8).unwrap(),
            DataCodingScheme::General {
                compressed: false,
                coding: Coding::Ucs2,
                class: Some(MessageClass::Flash),
            }
        );
        assert_eq!(
            DataCodingScheme::decode_sms(0x00u8).unwrap(),
            DataCodingScheme::general(Coding::Default)
        );
        assert_eq!(
            DataCodingScheme::decode_sms(0x24u8).unwrap(),
            DataCodingScheme::General {
                compressed: true,
                coding: Coding::Binary,
                class: None,
            }
        );
    }

    #[test]
    fn sms_message_waiting_groups() {
        assert_eq!(
            DataCodingScheme::decode_sms(0xC8u8).unwrap(),
            DataCodingScheme::MessageWaiting {
                active: true,
                reserved_bit: false,
                discard: true,
                coding: Coding::Default,
                indication: IndicationType::Voicemail,
            }
        );

        match DataCodingScheme::decode_sms(0xE2u8).unwrap() {
            DataCodingScheme::MessageWaiting {
                active,
                discard,
                coding,
                indication,
                ..
            } => {
                assert!(!active);
                assert!(!discard);
                assert_eq!(coding, Coding::Ucs2);
                assert_eq!(indication, IndicationType::Email);
            }
            other => panic!("unexpected scheme {other:?}"),
        }
    }

    #[test]
    fn sms_reserved_groups() {
        for octet in [0x40u8, 0x7F, 0x80, 0xBF] {
            let scheme = DataCodingScheme::decode_sms(octet).unwrap();
            assert_eq!(scheme, DataCodingScheme::Reserved(octet));
            assert_eq!(scheme.coding(), None);
        }
    }

    #[test]
    fn decode_from_buffer() {
        let buffer = [0x08u8, 0xFF];
        let scheme = DataCodingScheme::decode_sms(&buffer[..]).unwrap();
        assert_eq!(scheme.coding(), Some(Coding::Ucs2));

        let empty: &[u8] = &[];
        assert!(matches!(
            DataCodingScheme::decode_sms(empty),
            Err(CodecError::InvalidType)
        ));
        assert!(matches!(
            DataCodingScheme::decode_cell(empty),
            Err(CodecError::InvalidType)
        ));
    }

    #[test]
    fn sms_encode_only_distinguishes_ucs2() {
        assert_eq!(DataCodingScheme::general(Coding::Ucs2).encode_sms(), 0x08);
        assert_eq!(DataCodingScheme::general(Coding::Default).encode_sms(), 0x00);
        assert_eq!(DataCodingScheme::general(Coding::Binary).encode_sms(), 0x00);
        assert_eq!(DataCodingScheme::decode_sms(0xF6u8).unwrap().encode_sms(), 0x00);
    }

    #[test]
    fn cell_language_group() {
        let scheme = DataCodingScheme::decode_cell(0x01u8).unwrap();
        assert_eq!(scheme, DataCodingScheme::Language(Language::English));
        assert_eq!(scheme.coding(), Some(Coding::Default));
        assert_eq!(scheme.encode_cell().unwrap(), 0x01);
    }

    #[test]
    fn cell_groups() {
        assert_eq!(
            DataCodingScheme::decode_cell(0x11u8).unwrap(),
            DataCodingScheme::Reserved(0x11)
        );
        assert_eq!(
            DataCodingScheme::decode_cell(0x58u8).unwrap(),
            DataCodingScheme::General {
                compressed: false,
                coding: Coding::Ucs2,
                class: Some(MessageClass::Flash),
            }
        );
        assert_eq!(
            DataCodingScheme::decode_cell(0xC0u8).unwrap(),
            DataCodingScheme::Reserved(0xC0)
        );

        for octet in [0x00u8, 0x0F, 0x40, 0x58, 0x7F, 0xF0, 0xF7, 0xFF, 0x9A] {
            let scheme = DataCodingScheme::decode_cell(octet).unwrap();
            assert_eq!(scheme.encode_cell().unwrap(), octet, "octet {octet:#04x}");
        }
    }

    #[test]
    fn cell_auto_select() {
        let scheme = DataCodingScheme::for_cell(Coding::Default, false, None, None);
        assert_eq!(scheme.encode_cell().unwrap(), Language::Unspecified as u8);

        let scheme = DataCodingScheme::for_cell(Coding::Default, false, None, Some(Language::French));
        assert_eq!(scheme.encode_cell().unwrap(), 0x03);

        let scheme = DataCodingScheme::for_cell(Coding::Binary, false, None, None);
        assert_eq!(scheme.encode_cell().unwrap(), 0xF4);

        let scheme = DataCodingScheme::for_cell(
            Coding::Default,
            false,
            Some(MessageClass::TerminalEquipment),
            None,
        );
        assert_eq!(scheme.encode_cell().unwrap(), 0xF3);

        let scheme = DataCodingScheme::for_cell(Coding::Ucs2, false, None, None);
        assert_eq!(scheme.encode_cell().unwrap(), 0x48);

        let scheme = DataCodingScheme::for_cell(Coding::Default, true, None, None);
        assert_eq!(scheme.encode_cell().unwrap(), 0x60);
    }

    #[test]
    fn cell_rejects_message_waiting() {
        let scheme = DataCodingScheme::decode_sms(0xD0u8).unwrap();
        assert!(scheme.encode_cell().unwrap_err().is_unsupported());
    }

    #[test]
    fn message_class_descriptions() {
        assert_eq!(MessageClass::from(0xF6).description(), "SIM card storage");
        assert_eq!(MessageClass::TerminalEquipment.number(), 3);
        assert_eq!(Coding::Ucs2.to_string(), "ucs2");
    }
}

// ABOUTME: First-octet layouts for every TPDU kind and the bit-field helper they share
// ABOUTME: The message type indicator always occupies bits 0-1; other flags differ per kind

use crate::datatypes::ValidityPeriodFormat;

/// A run of bits inside one octet, counted from the least significant bit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitField {
    pub shift: u8,
    pub width: u8,
}

impl BitField {
    /// TP-MTI, shared by every TPDU kind
    pub const MTI: BitField = BitField::new(0, 2);

    pub const fn new(shift: u8, width: u8) -> Self {
        Self { shift, width }
    }

    pub const fn mask(&self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    pub fn get(&self, octet: u8) -> u8 {
        (octet >> self.shift) & self.mask()
    }

    pub fn put(&self, value: u8) -> u8 {
        (value & self.mask()) << self.shift
    }
}

/// Conversion between a flag value and its raw bits
pub trait HeaderBits {
    fn to_bits(&self) -> u8;
    fn from_bits(bits: u8) -> Self;
}

impl HeaderBits for bool {
    fn to_bits(&self) -> u8 {
        u8::from(*self)
    }

    fn from_bits(bits: u8) -> Self {
        bits != 0
    }
}

impl HeaderBits for ValidityPeriodFormat {
    fn to_bits(&self) -> u8 {
        *self as u8
    }

    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => ValidityPeriodFormat::NotPresent,
            0b01 => ValidityPeriodFormat::Enhanced,
            0b10 => ValidityPeriodFormat::Relative,
            _ => ValidityPeriodFormat::Absolute,
        }
    }
}

first_octet! {
    /// SMS-SUBMIT first octet
    pub struct SubmitHeader {
        /// TP-RD: reject duplicates
        reject_duplicates: bool = 2, 1;
        /// TP-VPF: validity period format
        validity_format: ValidityPeriodFormat = 3, 2;
        /// TP-SRR: status report requested
        status_report_request: bool = 5, 1;
        /// TP-UDHI: user data header included
        udhi: bool = 6, 1;
        /// TP-RP: reply path
        reply_path: bool = 7, 1;
    }
}

first_octet! {
    /// SMS-DELIVER first octet
    pub struct DeliverHeader {
        /// TP-MMS: more messages to send
        more_messages: bool = 2, 1;
        /// TP-LP: loop prevention
        loop_prevention: bool = 3, 1;
        /// TP-SRI: status report indication
        status_report_indication: bool = 5, 1;
        udhi: bool = 6, 1;
        reply_path: bool = 7, 1;
    }
}

first_octet! {
    /// SMS-COMMAND first octet
    pub struct CommandHeader {
        status_report_request: bool = 5, 1;
        udhi: bool = 6, 1;
    }
}

first_octet! {
    /// SMS-SUBMIT-REPORT first octet
    pub struct SubmitReportHeader {
        udhi: bool = 6, 1;
    }
}

first_octet! {
    /// SMS-DELIVER-REPORT first octet
    pub struct DeliverReportHeader {
        udhi: bool = 6, 1;
    }
}

first_octet! {
    /// SMS-STATUS-REPORT first octet
    pub struct StatusReportHeader {
        more_messages: bool = 2, 1;
        loop_prevention: bool = 3, 1;
        /// TP-SRQ: this report answers an SMS-COMMAND rather than an SMS-SUBMIT
        status_report_qualifier: bool = 5, 1;
        udhi: bool = 6, 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_field_masks() {
        let vpf = BitField::new(3, 2);
        assert_eq!(vpf.mask(), 0b11);
        assert_eq!(vpf.put(0b10), 0b10000);
        assert_eq!(vpf.get(0b0001_0000), 0b10);
        assert_eq!(BitField::MTI.get(0xFF), 0b11);
        assert_eq!(BitField::new(0, 8).mask(), 0xFF);
    }

    #[test]
    fn submit_header_layout() {
        let header = SubmitHeader {
            reject_duplicates: true,
            validity_format: ValidityPeriodFormat::Absolute,
            status_report_request: true,
            udhi: false,
            reply_path: true,
        };
        let octet = header.pack(1);
        assert_eq!(octet, 0b1011_1101);
        assert_eq!(SubmitHeader::unpack(octet), header);
    }

    #[test]
    fn deliver_header_from_wire() {
        // MMS and SRI set, as sent by a live SMSC
        let header = DeliverHeader::unpack(0x24);
        assert!(header.more_messages);
        assert!(header.status_report_indication);
        assert!(!header.loop_prevention);
        assert!(!header.udhi);
        assert_eq!(header.pack(0), 0x24);
    }

    #[test]
    fn command_header_ignores_other_bits() {
        let header = CommandHeader::unpack(0xFF);
        assert!(header.status_report_request);
        assert!(header.udhi);
        assert_eq!(header.pack(2), 0b0110_0010);
        assert_eq!(CommandHeader::default().pack(2), 0x02);
    }

    #[test]
    fn status_report_header_layout() {
        let header = StatusReportHeader::unpack(0x26);
        assert!(header.more_messages);
        assert!(header.status_report_qualifier);
        assert_eq!(header.pack(2), 0x26);
    }
}

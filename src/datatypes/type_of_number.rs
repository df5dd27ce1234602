use num_enum::TryFromPrimitive;

/// Type of number, bits 6-4 of the address type octet
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TypeOfNumber {
    #[default]
    Unknown = 0b000,
    International = 0b001,
    National = 0b010,
    NetworkSpecific = 0b011,
    SubscriberNumber = 0b100,
    /// Digits are GSM 7-bit text rather than semi-octets
    Alphanumeric = 0b101,
    Abbreviated = 0b110,
    Reserved = 0b111,
}

impl TypeOfNumber {
    /// Extract the type of number from an address type octet
    pub fn from_type_octet(octet: u8) -> Self {
        TypeOfNumber::try_from((octet >> 4) & 0b111).unwrap_or(TypeOfNumber::Reserved)
    }
}

use num_enum::FromPrimitive;

/// Numbering plan identification, bits 3-0 of the address type octet
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumericPlanIndicator {
    Unknown = 0b0000,
    /// ISDN/telephone numbering plan (E.164/E.163)
    Isdn = 0b0001,
    /// Data numbering plan (X.121)
    Data = 0b0011,
    Telex = 0b0100,
    ServiceCentreSpecific = 0b0101,
    ServiceCentreSpecificAlt = 0b0110,
    National = 0b1000,
    Private = 0b1001,
    /// ERMES numbering plan (ETSI DE/PS 3 01-3)
    Ermes = 0b1010,
    #[num_enum(catch_all)]
    Reserved(u8),
}

impl Default for NumericPlanIndicator {
    fn default() -> Self {
        NumericPlanIndicator::Unknown
    }
}

impl NumericPlanIndicator {
    /// Extract the numbering plan from an address type octet
    pub fn from_type_octet(octet: u8) -> Self {
        NumericPlanIndicator::from(octet & 0x0F)
    }

    pub fn to_u8(self) -> u8 {
        match self {
            NumericPlanIndicator::Unknown => 0b0000,
            NumericPlanIndicator::Isdn => 0b0001,
            NumericPlanIndicator::Data => 0b0011,
            NumericPlanIndicator::Telex => 0b0100,
            NumericPlanIndicator::ServiceCentreSpecific => 0b0101,
            NumericPlanIndicator::ServiceCentreSpecificAlt => 0b0110,
            NumericPlanIndicator::National => 0b1000,
            NumericPlanIndicator::Private => 0b1001,
            NumericPlanIndicator::Ermes => 0b1010,
            NumericPlanIndicator::Reserved(value) => value & 0x0F,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_plans_keep_their_value() {
        assert_eq!(NumericPlanIndicator::from_type_octet(0x91), NumericPlanIndicator::Isdn);
        assert_eq!(NumericPlanIndicator::from_type_octet(0x9F), NumericPlanIndicator::Reserved(15));
        assert_eq!(NumericPlanIndicator::Reserved(15).to_u8(), 15);
        assert_eq!(NumericPlanIndicator::Ermes.to_u8(), 10);
    }
}

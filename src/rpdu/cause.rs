use num_enum::FromPrimitive;

/// RP-Cause (GSM 04.11 8.2.5.4, Annex E)
///
/// Every value without a definition is treated as 111, "Protocol error,
/// unspecified".
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RpCause {
    UnassignedNumber = 1,
    OperatorDeterminedBarring = 8,
    CallBarred = 10,
    Reserved = 11,
    TransferRejected = 21,
    MemoryCapacityExceeded = 22,
    DestinationOutOfOrder = 27,
    UnidentifiedSubscriber = 28,
    FacilityRejected = 29,
    UnknownSubscriber = 30,
    NetworkOutOfOrder = 38,
    TemporaryFailure = 41,
    Congestion = 42,
    ResourcesUnavailable = 47,
    FacilityNotSubscribed = 50,
    FacilityNotImplemented = 69,
    InvalidReference = 81,
    SemanticallyIncorrect = 95,
    InvalidMandatoryInformation = 96,
    MessageTypeNotImplemented = 97,
    MessageNotCompatible = 98,
    InformationElementNotImplemented = 99,
    #[num_enum(default)]
    ProtocolError = 111,
    Interworking = 127,
}

impl RpCause {
    pub fn description(&self) -> &'static str {
        match self {
            RpCause::UnassignedNumber => "Unassigned (unallocated) number",
            RpCause::OperatorDeterminedBarring => "Operator determined barring",
            RpCause::CallBarred => "Call barred",
            RpCause::Reserved => "Reserved",
            RpCause::TransferRejected => "Short message transfer rejected",
            RpCause::MemoryCapacityExceeded => "Memory capacity exceeded",
            RpCause::DestinationOutOfOrder => "Destination out of order",
            RpCause::UnidentifiedSubscriber => "Unidentified subscriber",
            RpCause::FacilityRejected => "Facility rejected",
            RpCause::UnknownSubscriber => "Unknown subscriber",
            RpCause::NetworkOutOfOrder => "Network out of order",
            RpCause::TemporaryFailure => "Temporary failure",
            RpCause::Congestion => "Congestion",
            RpCause::ResourcesUnavailable => "Resources unavailable, unspecified",
            RpCause::FacilityNotSubscribed => "Requested facility not subscribed",
            RpCause::FacilityNotImplemented => "Requested facility not implemented",
            RpCause::InvalidReference => "Invalid short message transfer reference value",
            RpCause::SemanticallyIncorrect => "Semantically incorrect message",
            RpCause::InvalidMandatoryInformation => "Invalid mandatory information",
            RpCause::MessageTypeNotImplemented => "Message type non-existent or not implemented",
            RpCause::MessageNotCompatible => {
                "Message not compatible with short message protocol state"
            }
            RpCause::InformationElementNotImplemented => {
                "Information element non-existent or not implemented"
            }
            RpCause::ProtocolError => "Protocol error, unspecified",
            RpCause::Interworking => "Interworking, unspecified",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_causes() {
        assert_eq!(RpCause::from(22u8), RpCause::MemoryCapacityExceeded);
        assert_eq!(RpCause::from(42u8).description(), "Congestion");
        assert_eq!(RpCause::from(127u8), RpCause::Interworking);
    }

    #[test]
    fn undefined_causes_are_protocol_errors() {
        assert_eq!(RpCause::from(0u8), RpCause::ProtocolError);
        assert_eq!(RpCause::from(100u8).description(), "Protocol error, unspecified");
    }
}

use num_enum::FromPrimitive;
/// TP-Failure-Cause (GSM 03.40 9.2.3.22) reports why an SMS-SUBMIT or
/// SMS-DELIVER could not be handled. It travels in the negative variants of
/// SMS-SUBMIT-REPORT and SMS-DELIVER-REPORT, which are carried by RP-ERROR.
/// Values below 0x80 are reserved; 0xE0 to 0xFE are application specific.

#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FailureCause {
    /// Telematic interworking not supported
    TelematicInterworkingNotSupported = 0x80,

    /// Short message Type 0 not supported
    ShortMessageType0NotSupported = 0x81,

    /// Cannot replace short message
    CannotReplaceShortMessage = 0x82,

    // Reserved 0x83 - 0x8E
    /// Unspecified TP-PID error
    UnspecifiedPidError = 0x8F,

    /// Data coding scheme (alphabet) not supported
    DataCodingSchemeNotSupported = 0x90,

    /// Message class not supported
    MessageClassNotSupported = 0x91,

    // Reserved 0x92 - 0x9E
    /// Unspecified TP-DCS error
    UnspecifiedDcsError = 0x9F,

    /// Command cannot be actioned
    CommandCannotBeActioned = 0xA0,

    /// Command unsupported
    CommandUnsupported = 0xA1,

    // Reserved 0xA2 - 0xAE
    /// Unspecified TP-Command error
    UnspecifiedCommandError = 0xAF,

    /// TPDU not supported
    TpduNotSupported = 0xB0,

    // Reserved 0xB1 - 0xBF
    /// SC busy
    ScBusy = 0xC0,
    /// No SC subscription
    NoScSubscription = 0xC1,
    /// SC system failure
    ScSystemFailure = 0xC2,
    /// Invalid SME address
    InvalidSmeAddress = 0xC3,
    /// Destination SME barred
    DestinationSmeBarred = 0xC4,
    /// SM Rejected-Duplicate SM
    DuplicateRejected = 0xC5,
    /// TP-VPF not supported
    ValidityPeriodFormatNotSupported = 0xC6,
    /// TP-VP not supported
    ValidityPeriodNotSupported = 0xC7,

    // Reserved 0xC8 - 0xCF
    /// (U)SIM SMS storage full
    SimStorageFull = 0xD0,
    /// No SMS storage capability in (U)SIM
    NoSimStorageCapability = 0xD1,
    /// Error in MS
    ErrorInMs = 0xD2,
    /// Memory Capacity Exceeded
    MemoryCapacityExceeded = 0xD3,
    /// (U)SIM Application Toolkit Busy
    SimToolkitBusy = 0xD4,
    /// (U)SIM data download error
    SimDataDownloadError = 0xD5,

    // Reserved 0xD6 - 0xDF
    // Application specific 0xE0 - 0xFE
    /// Unspecified error cause
    Unspecified = 0xFF,

    /// Reserved or application specific value
    #[num_enum(catch_all)]
    Other(u8) = 0x00,
}

impl FailureCause {
    pub fn description(&self) -> &'static str {
        match self {
            FailureCause::TelematicInterworkingNotSupported => "Telematic interworking not supported",
            FailureCause::ShortMessageType0NotSupported => "Short message Type 0 not supported",
            FailureCause::CannotReplaceShortMessage => "Cannot replace short message",
            FailureCause::UnspecifiedPidError => "Unspecified TP-PID error",
            FailureCause::DataCodingSchemeNotSupported => "Data coding scheme (alphabet) not supported",
            FailureCause::MessageClassNotSupported => "Message class not supported",
            FailureCause::UnspecifiedDcsError => "Unspecified TP-DCS error",
            FailureCause::CommandCannotBeActioned => "Command cannot be actioned",
            FailureCause::CommandUnsupported => "Command unsupported",
            FailureCause::UnspecifiedCommandError => "Unspecified TP-Command error",
            FailureCause::TpduNotSupported => "TPDU not supported",
            FailureCause::ScBusy => "SC busy",
            FailureCause::NoScSubscription => "No SC subscription",
            FailureCause::ScSystemFailure => "SC system failure",
            FailureCause::InvalidSmeAddress => "Invalid SME address",
            FailureCause::DestinationSmeBarred => "Destination SME barred",
            FailureCause::DuplicateRejected => "SM Rejected-Duplicate SM",
            FailureCause::ValidityPeriodFormatNotSupported => "TP-VPF not supported",
            FailureCause::ValidityPeriodNotSupported => "TP-VP not supported",
            FailureCause::SimStorageFull => "(U)SIM SMS storage full",
            FailureCause::NoSimStorageCapability => "No SMS storage capability in (U)SIM",
            FailureCause::ErrorInMs => "Error in MS",
            FailureCause::MemoryCapacityExceeded => "Memory Capacity Exceeded",
            FailureCause::SimToolkitBusy => "(U)SIM Application Toolkit Busy",
            FailureCause::SimDataDownloadError => "(U)SIM data download error",
            FailureCause::Unspecified => "Unspecified error cause",
            FailureCause::Other(value) if *value >= 0xE0 => "Application specific error",
            FailureCause::Other(_) => "Reserved",
        }
    }
}

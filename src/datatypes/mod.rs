pub mod alphabet;
mod address;
mod data_coding;
mod failure_cause;
mod numeric_plan_indicator;
pub mod semi_octet;
mod status;
mod timestamp;
mod type_of_number;
mod udh;
pub mod user_data;
mod validity_period;

pub use address::Address;
pub use data_coding::{
    Coding, DataCodingScheme, DcsInput, IndicationType, Language, MessageClass,
};
pub use failure_cause::FailureCause;
pub use numeric_plan_indicator::NumericPlanIndicator;
pub use status::{Status, StatusGroup};
pub use timestamp::TimeStamp;
pub use type_of_number::TypeOfNumber;
pub use udh::{Concatenation, InformationElement, PortAddressing, UdhFields, UserDataHeader};
pub use user_data::{Content, EncodedUserData, UserData};
pub use validity_period::{ValidityPeriod, ValidityPeriodFormat};

// ABOUTME: TP-VPF and TP-VP (GSM 03.40 9.2.3.3, 9.2.3.12)
// ABOUTME: Relative periods map minutes onto a piecewise one-octet scale; absolute periods are time stamps

use crate::codec::{CodecError, Decodable, Encodable, decode_u8};
use crate::config::CodecConfig;
use crate::datatypes::TimeStamp;
use bytes::{BufMut, BytesMut};
use chrono::{DateTime, Duration, Utc};
use num_enum::TryFromPrimitive;
use std::io::Cursor;

/// Validity period format, bits 4-3 of the SMS-SUBMIT first octet
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidityPeriodFormat {
    NotPresent = 0b00,
    Enhanced = 0b01,
    Relative = 0b10,
    Absolute = 0b11,
}

impl Default for ValidityPeriodFormat {
    fn default() -> Self {
        ValidityPeriodFormat::NotPresent
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ValidityPeriod {
    #[default]
    Absent,
    /// Recognised but not implemented; encoding or decoding it fails with `Unsupported`
    Enhanced,
    /// Raw relative code, see [`ValidityPeriod::relative_minutes`]
    Relative(u8),
    Absolute(TimeStamp),
}

const FIVE_MINUTE_STEPS_END: i64 = 5 * 144;
const HALF_HOUR_STEPS_END: i64 = FIVE_MINUTE_STEPS_END + 30 * 24;
const DAY_STEPS_END: i64 = HALF_HOUR_STEPS_END + 1440 * 30;
const WEEK_STEPS_END: i64 = DAY_STEPS_END + 1440 * 7 * 58;

impl ValidityPeriod {
    pub fn format(&self) -> ValidityPeriodFormat {
        match self {
            ValidityPeriod::Absent => ValidityPeriodFormat::NotPresent,
            ValidityPeriod::Enhanced => ValidityPeriodFormat::Enhanced,
            ValidityPeriod::Relative(_) => ValidityPeriodFormat::Relative,
            ValidityPeriod::Absolute(_) => ValidityPeriodFormat::Absolute,
        }
    }

    /// Read the period selected by `format` from the cursor
    pub fn decode(buf: &mut Cursor<&[u8]>, format: ValidityPeriodFormat) -> Result<Self, CodecError> {
        match format {
            ValidityPeriodFormat::NotPresent => Ok(ValidityPeriod::Absent),
            ValidityPeriodFormat::Enhanced => Err(CodecError::Unsupported("enhanced validity period")),
            ValidityPeriodFormat::Relative => Ok(ValidityPeriod::Relative(decode_u8(buf)?)),
            ValidityPeriodFormat::Absolute => Ok(ValidityPeriod::Absolute(TimeStamp::decode(buf)?)),
        }
    }

    /// Relative code for a period of `minutes`
    pub fn relative_from_minutes(minutes: i64) -> u8 {
        let code = match minutes {
            m if m < 5 => 0,
            m if m < FIVE_MINUTE_STEPS_END => m / 5,
            m if m < HALF_HOUR_STEPS_END => 143 + (m - FIVE_MINUTE_STEPS_END + 29) / 30,
            m if m < DAY_STEPS_END => 166 + (m + 1439) / 1440,
            m if m < WEEK_STEPS_END => 192 + (m + 10079) / 10080,
            _ => 0xFF,
        };
        u8::try_from(code).unwrap_or(0xFF)
    }

    /// Length in minutes of a relative code
    pub fn relative_minutes(code: u8) -> u32 {
        let code = u32::from(code);
        match code {
            0..=143 => (code + 1) * 5,
            144..=167 => 12 * 60 + (code - 143) * 30,
            168..=196 => (code - 166) * 24 * 60,
            _ => (code - 192) * 7 * 24 * 60,
        }
    }

    /// Relative period that expires at `expiry`, measured from `now`
    pub fn relative_until(expiry: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        ValidityPeriod::Relative(Self::relative_from_minutes((expiry - now).num_minutes()))
    }

    /// Absolute period stamped in the configured time zone
    pub fn absolute(expiry: DateTime<Utc>, config: &CodecConfig) -> Result<Self, CodecError> {
        Ok(ValidityPeriod::Absolute(TimeStamp::from_datetime(
            expiry,
            config.timezone,
        )?))
    }

    /// Expiry instant, counting relative periods from `now`
    pub fn resolve(&self, now: DateTime<Utc>, config: &CodecConfig) -> Option<DateTime<Utc>> {
        match self {
            ValidityPeriod::Absent | ValidityPeriod::Enhanced => None,
            ValidityPeriod::Relative(code) => {
                Some(now + Duration::minutes(i64::from(Self::relative_minutes(*code))))
            }
            ValidityPeriod::Absolute(stamp) => stamp.to_datetime(config.century),
        }
    }
}

impl Encodable for ValidityPeriod {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        match self {
            ValidityPeriod::Absent => Ok(()),
            ValidityPeriod::Enhanced => Err(CodecError::Unsupported("enhanced validity period")),
            ValidityPeriod::Relative(code) => {
                buf.put_u8(*code);
                Ok(())
            }
            ValidityPeriod::Absolute(stamp) => stamp.encode(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn relative_scale() {
        assert_eq!(ValidityPeriod::relative_from_minutes(-10), 0);
        assert_eq!(ValidityPeriod::relative_from_minutes(4), 0);
        assert_eq!(ValidityPeriod::relative_from_minutes(60), 12);
        assert_eq!(ValidityPeriod::relative_from_minutes(719), 143);
        assert_eq!(ValidityPeriod::relative_from_minutes(720), 143);
        assert_eq!(ValidityPeriod::relative_from_minutes(750), 144);
        assert_eq!(ValidityPeriod::relative_from_minutes(751), 145);
        assert_eq!(ValidityPeriod::relative_from_minutes(1440), 167);
        assert_eq!(ValidityPeriod::relative_from_minutes(3 * 1440), 169);
        assert_eq!(ValidityPeriod::relative_from_minutes(44640), 197);
        assert_eq!(ValidityPeriod::relative_from_minutes(629279), 255);
        assert_eq!(ValidityPeriod::relative_from_minutes(629280), 255);
    }

    #[test]
    fn relative_minutes_per_range() {
        assert_eq!(ValidityPeriod::relative_minutes(0), 5);
        assert_eq!(ValidityPeriod::relative_minutes(143), 720);
        assert_eq!(ValidityPeriod::relative_minutes(144), 750);
        assert_eq!(ValidityPeriod::relative_minutes(167), 1440);
        assert_eq!(ValidityPeriod::relative_minutes(168), 2880);
        assert_eq!(ValidityPeriod::relative_minutes(196), 30 * 1440);
        assert_eq!(ValidityPeriod::relative_minutes(197), 5 * 10080);
        assert_eq!(ValidityPeriod::relative_minutes(255), 63 * 10080);
    }

    #[test]
    fn relative_until_and_resolve() {
        let config = CodecConfig::default();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let period = ValidityPeriod::relative_until(now + Duration::days(2), now);
        assert_eq!(period, ValidityPeriod::Relative(168));
        assert_eq!(period.resolve(now, &config), Some(now + Duration::days(2)));
    }

    #[test]
    fn absolute_period() {
        let config = CodecConfig::new(2000, 0);
        let expiry = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        let period = ValidityPeriod::absolute(expiry, &config).unwrap();

        assert_eq!(period.format(), ValidityPeriodFormat::Absolute);
        let bytes = period.to_bytes().unwrap();
        assert_eq!(bytes.len(), 7);

        let mut cursor = Cursor::new(bytes.as_ref());
        let decoded = ValidityPeriod::decode(&mut cursor, ValidityPeriodFormat::Absolute).unwrap();
        assert_eq!(decoded, period);
        assert_eq!(decoded.resolve(Utc::now(), &config), Some(expiry));
    }

    #[test]
    fn absent_and_relative_on_the_wire() {
        assert!(ValidityPeriod::Absent.to_bytes().unwrap().is_empty());
        assert_eq!(ValidityPeriod::Relative(0xA7).to_bytes().unwrap().as_ref(), &[0xA7]);

        let data = [0xA7u8, 0x00];
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(
            ValidityPeriod::decode(&mut cursor, ValidityPeriodFormat::NotPresent).unwrap(),
            ValidityPeriod::Absent
        );
        assert_eq!(cursor.position(), 0);
        assert_eq!(
            ValidityPeriod::decode(&mut cursor, ValidityPeriodFormat::Relative).unwrap(),
            ValidityPeriod::Relative(0xA7)
        );
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn enhanced_is_unsupported() {
        assert!(ValidityPeriod::Enhanced.to_bytes().unwrap_err().is_unsupported());

        let data = [0u8; 7];
        let mut cursor = Cursor::new(&data[..]);
        let err = ValidityPeriod::decode(&mut cursor, ValidityPeriodFormat::Enhanced).unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(ValidityPeriod::Enhanced.resolve(Utc::now(), &CodecConfig::default()), None);
    }

    #[test]
    fn format_from_raw_bits() {
        assert_eq!(ValidityPeriodFormat::try_from(2u8).unwrap(), ValidityPeriodFormat::Relative);
        assert!(ValidityPeriodFormat::try_from(4u8).is_err());
    }
}

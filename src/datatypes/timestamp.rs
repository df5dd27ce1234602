// ABOUTME: Service centre time stamp (GSM 03.40 9.2.3.11), also used by absolute validity periods
// ABOUTME: Seven swapped-BCD octets with the time zone in signed quarter hours

use crate::codec::{CodecError, Decodable, Encodable, decode_bytes};
use crate::config::CodecConfig;
use bytes::{BufMut, BytesMut};
use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc};
use std::fmt;
use std::io::Cursor;

/// Local date and time of the sending entity
///
/// Fields hold the values as written on the wire: a two-digit year and the
/// offset from UTC in quarters of an hour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct TimeStamp {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Quarter hours east of UTC
    pub timezone: i8,
}

impl TimeStamp {
    pub const SIZE: usize = 7;

    /// Largest time zone a swapped-BCD octet with a sign bit can carry
    pub const MAX_TIMEZONE: i8 = 79;

    /// Express `instant` as local time in `timezone` (quarter hours)
    pub fn from_datetime(instant: DateTime<Utc>, timezone: i8) -> Result<Self, CodecError> {
        let offset = offset(timezone)?;
        let local = instant.with_timezone(&offset);

        Ok(TimeStamp {
            year: (local.year().rem_euclid(100)) as u8,
            month: local.month() as u8,
            day: local.day() as u8,
            hour: local.hour() as u8,
            minute: local.minute() as u8,
            second: local.second() as u8,
            timezone,
        })
    }

    /// Current time in the configured time zone
    pub fn now(config: &CodecConfig) -> Result<Self, CodecError> {
        Self::from_datetime(Utc::now(), config.timezone)
    }

    /// The instant this stamp denotes, with the two-digit year placed in `century`
    ///
    /// `None` when the fields do not form a valid calendar date.
    pub fn to_datetime(&self, century: u16) -> Option<DateTime<Utc>> {
        let offset = offset(self.timezone).ok()?;
        offset
            .with_ymd_and_hms(
                i32::from(century) + i32::from(self.year),
                u32::from(self.month),
                u32::from(self.day),
                u32::from(self.hour),
                u32::from(self.minute),
                u32::from(self.second),
            )
            .single()
            .map(|local| local.with_timezone(&Utc))
    }

    fn fields(&self) -> [(&'static str, u8); 6] {
        [
            ("year", self.year),
            ("month", self.month),
            ("day", self.day),
            ("hour", self.hour),
            ("minute", self.minute),
            ("second", self.second),
        ]
    }
}

fn offset(timezone: i8) -> Result<FixedOffset, CodecError> {
    if timezone.unsigned_abs() > TimeStamp::MAX_TIMEZONE as u8 {
        return Err(CodecError::FieldValidation {
            field: "timezone",
            reason: format!("{timezone} quarter hours is out of range"),
        });
    }
    FixedOffset::east_opt(i32::from(timezone) * 15 * 60).ok_or(CodecError::FieldValidation {
        field: "timezone",
        reason: format!("{timezone} quarter hours is not a valid offset"),
    })
}

/// Two decimal digits, units in the high nibble
fn swap(value: u8) -> u8 {
    (value % 10) << 4 | value / 10
}

/// Non-decimal nibbles read as 0
fn unswap(octet: u8) -> u8 {
    let digit = |nibble: u8| if nibble > 9 { 0 } else { nibble };
    digit(octet >> 4) + digit(octet & 0x0F) * 10
}

impl Encodable for TimeStamp {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        for (field, value) in self.fields() {
            if value > 99 {
                return Err(CodecError::FieldValidation {
                    field,
                    reason: format!("{value} does not fit in two digits"),
                });
            }
            buf.put_u8(swap(value));
        }

        offset(self.timezone)?;
        let quarters = self.timezone.unsigned_abs();
        let sign = if self.timezone < 0 { 0b1000 } else { 0 };
        buf.put_u8(swap(quarters) | sign);
        Ok(())
    }
}

impl Decodable for TimeStamp {
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let raw = decode_bytes(buf, Self::SIZE)?;

        let zone = raw[6];
        let units = zone >> 4;
        let quarters = (if units > 9 { 0 } else { units }) + (zone & 0b0111) * 10;
        let timezone = if zone & 0b1000 != 0 {
            -(quarters as i8)
        } else {
            quarters as i8
        };

        Ok(TimeStamp {
            year: unswap(raw[0]),
            month: unswap(raw[1]),
            day: unswap(raw[2]),
            hour: unswap(raw[3]),
            minute: unswap(raw[4]),
            second: unswap(raw[5]),
            timezone,
        })
    }
}

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:02},{:02}:{:02}:{:02}{:+03}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.timezone
        )
    }
}

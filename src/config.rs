// ABOUTME: Codec-wide settings that the wire formats leave to the implementation
// ABOUTME: Covers the century for two-digit years and the time zone stamped on outgoing timestamps

use chrono::{Datelike, Utc};

/// Settings shared by every encode/decode call made through an `SmsCodec`
///
/// The GSM timestamp carries a two-digit year and a local time zone, so both
/// the century used to expand decoded years and the zone used when stamping
/// outgoing messages are configuration rather than protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// Century added to decoded two-digit years (e.g. 2000)
    pub century: u16,
    /// Time zone written into outgoing timestamps, in quarter hours east of UTC
    pub timezone: i8,
}

impl CodecConfig {
    /// Default time zone: UTC+3, expressed in quarter hours
    pub const DEFAULT_TIMEZONE: i8 = 12;

    pub fn new(century: u16, timezone: i8) -> Self {
        Self { century, timezone }
    }

    pub fn with_century(mut self, century: u16) -> Self {
        self.century = century;
        self
    }

    pub fn with_timezone(mut self, timezone: i8) -> Self {
        self.timezone = timezone;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        let year = Utc::now().year();
        Self {
            century: u16::try_from(year - year % 100).unwrap_or(2000),
            timezone: Self::DEFAULT_TIMEZONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CodecConfig::default();
        assert_eq!(config.century % 100, 0);
        assert_eq!(config.timezone, 12);
    }

    #[test]
    fn builder_methods() {
        let config = CodecConfig::default().with_century(1900).with_timezone(-8);
        assert_eq!(config, CodecConfig::new(1900, -8));
    }
}

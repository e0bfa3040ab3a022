//! Time zone resolution for record timestamps.

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;

/// Timestamp layout with millisecond precision.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Zone applied to record timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZoneSpec {
    Named(Tz),
    Local,
}

impl TimeZoneSpec {
    /// Resolve an IANA zone name; unknown or empty names fall back to the
    /// process-local zone.
    pub fn resolve(name: &str) -> Self {
        name.trim()
            .parse::<Tz>()
            .map(TimeZoneSpec::Named)
            .unwrap_or(TimeZoneSpec::Local)
    }

    pub fn is_local(&self) -> bool {
        matches!(self, TimeZoneSpec::Local)
    }

    pub fn format(&self, at: DateTime<Utc>) -> String {
        match self {
            TimeZoneSpec::Named(tz) => at.with_timezone(tz).format(TIME_FORMAT).to_string(),
            TimeZoneSpec::Local => at.with_timezone(&Local).format(TIME_FORMAT).to_string(),
        }
    }

    pub fn now(&self) -> String {
        self.format(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_resolve_named_zone() {
        assert_eq!(
            TimeZoneSpec::resolve("Asia/Shanghai"),
            TimeZoneSpec::Named(chrono_tz::Asia::Shanghai)
        );
    }

    #[test]
    fn test_invalid_zone_falls_back_to_local() {
        assert!(TimeZoneSpec::resolve("Not/AZone").is_local());
        assert!(TimeZoneSpec::resolve("").is_local());
    }

    #[test]
    fn test_format_in_zone() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::milliseconds(67);

        assert_eq!(
            TimeZoneSpec::resolve("UTC").format(at),
            "2024-01-02 03:04:05.067"
        );
        assert_eq!(
            TimeZoneSpec::resolve("Asia/Shanghai").format(at),
            "2024-01-02 11:04:05.067"
        );
    }
}

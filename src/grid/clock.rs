//! Reference timezone adapter.
//!
//! All calendar fields and display strings are derived in one fixed IANA
//! zone, never the viewer's local zone.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Zone used when nothing else is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Moscow;

/// Calendar fields of an instant as observed in the reference zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFields {
    /// Hour of day, 0..=23.
    pub hour: u32,
    /// `YYYY-MM-DD`.
    pub date_key: String,
}

/// The single timezone all grid arithmetic is performed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceZone {
    tz: Tz,
}

impl Default for ReferenceZone {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl ReferenceZone {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// IANA name, appended to every display string.
    pub fn label(&self) -> &'static str {
        self.tz.name()
    }

    /// Convert a unix timestamp into a zoned datetime.
    ///
    /// Timestamps chrono cannot represent collapse to the epoch.
    pub fn at(&self, ts: i64) -> DateTime<Tz> {
        DateTime::from_timestamp(ts, 0)
            .unwrap_or_default()
            .with_timezone(&self.tz)
    }

    /// Hour-of-day and date key using the zone's real offset at `ts`.
    pub fn calendar_fields(&self, ts: i64) -> CalendarFields {
        let local = self.at(ts);
        CalendarFields {
            hour: local.hour(),
            date_key: local.format("%Y-%m-%d").to_string(),
        }
    }

    /// `YYYY-MM-DD HH:MM` in the reference zone.
    pub fn format_datetime(&self, ts: i64) -> String {
        self.at(ts).format("%Y-%m-%d %H:%M").to_string()
    }

    /// `HH:MM` in the reference zone.
    pub fn format_time(&self, ts: i64) -> String {
        self.at(ts).format("%H:%M").to_string()
    }

    /// `YYYY-MM-DD` in the reference zone.
    pub fn format_date(&self, ts: i64) -> String {
        self.calendar_fields(ts).date_key
    }
}

/// Current time as a unix timestamp.
pub fn now_ts() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Moscow;

    #[test]
    fn test_moscow_fields() {
        let zone = ReferenceZone::default();
        let ts = Moscow.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().timestamp();
        assert_eq!(ts, 1704056400);

        let fields = zone.calendar_fields(ts);
        assert_eq!(fields.hour, 0);
        assert_eq!(fields.date_key, "2024-01-01");

        // One second earlier is still the previous day
        let fields = zone.calendar_fields(ts - 1);
        assert_eq!(fields.hour, 23);
        assert_eq!(fields.date_key, "2023-12-31");
    }

    #[test]
    fn test_uses_offset_at_instant() {
        let zone = ReferenceZone::default();

        // Moscow observed summer time (UTC+4) in 2010
        let summer = Utc.with_ymd_and_hms(2010, 7, 1, 0, 0, 0).unwrap().timestamp();
        assert_eq!(zone.calendar_fields(summer).hour, 4);

        let winter = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap().timestamp();
        assert_eq!(zone.calendar_fields(winter).hour, 3);
    }

    #[test]
    fn test_other_zone() {
        let zone = ReferenceZone::new(chrono_tz::UTC);
        let fields = zone.calendar_fields(1704056400);
        assert_eq!(fields.hour, 21);
        assert_eq!(fields.date_key, "2023-12-31");
        assert_eq!(zone.label(), "UTC");
    }

    #[test]
    fn test_pre_epoch_is_unchecked() {
        // Not validated: whatever chrono yields is passed through.
        let zone = ReferenceZone::default();
        let fields = zone.calendar_fields(-3600);
        assert_eq!(fields.hour, 2);
        assert_eq!(fields.date_key, "1970-01-01");
    }

    #[test]
    fn test_formatting() {
        let zone = ReferenceZone::default();
        let ts = Moscow.with_ymd_and_hms(2024, 3, 5, 7, 0, 0).unwrap().timestamp();
        assert_eq!(zone.format_datetime(ts), "2024-03-05 07:00");
        assert_eq!(zone.format_time(ts + 3599), "07:59");
        assert_eq!(zone.format_date(ts), "2024-03-05");
        assert_eq!(zone.label(), "Europe/Moscow");
    }
}

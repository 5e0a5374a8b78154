//! Human-readable time ranges for grid buckets.

use super::bucket::GRID_SHIFT_HOURS;
use super::clock::ReferenceZone;

/// Hours the hover tooltip moves a day-mode bucket forward.
///
/// Kept independent of the grid shift: the tooltip names the real-world
/// hour a column stands for, which sits two hours short of undoing the
/// grid rotation.
pub const TOOLTIP_SHIFT_HOURS: u32 = GRID_SHIFT_HOURS - 2;

/// Rendered in place of a label when there is no data to describe.
pub const NO_DATA_LABEL: &str = "—";

const HOUR_SPAN_SECS: i64 = 3599;

/// Range covered by an hourly bucket, `[t, t + 3599]`.
pub fn hour_range(zone: &ReferenceZone, t: i64) -> String {
    let end = t.saturating_add(HOUR_SPAN_SECS);
    let end_str = if zone.format_date(t) == zone.format_date(end) {
        zone.format_time(end)
    } else {
        zone.format_datetime(end)
    };
    format!("{} — {} ({})", zone.format_datetime(t), end_str, zone.label())
}

/// Tooltip range for an hourly bucket, shifted by [`TOOLTIP_SHIFT_HOURS`].
pub fn hour_range_shifted(zone: &ReferenceZone, t: i64) -> String {
    hour_range(zone, t.saturating_add(TOOLTIP_SHIFT_HOURS as i64 * 3600))
}

/// Calendar date of a daily bucket.
pub fn day_range(zone: &ReferenceZone, t: i64) -> String {
    format!("{} ({})", zone.format_date(t), zone.label())
}

/// Start of an hourly bucket, used for row labels.
pub fn hour_start_label(zone: &ReferenceZone, t: i64) -> String {
    zone.format_datetime(t)
}

/// Last minute of an hourly bucket, used for row labels.
pub fn hour_end_label(zone: &ReferenceZone, t: i64) -> String {
    zone.format_datetime(t.saturating_add(HOUR_SPAN_SECS))
}

pub fn day_label(zone: &ReferenceZone, t: i64) -> String {
    zone.format_date(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Moscow;

    fn msk(d: u32, h: u32) -> i64 {
        Moscow.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap().timestamp()
    }

    #[test]
    fn test_shift_constants_are_separate_knobs() {
        assert_eq!(GRID_SHIFT_HOURS, 4);
        assert_eq!(TOOLTIP_SHIFT_HOURS, 2);
    }

    #[test]
    fn test_hour_range() {
        let zone = ReferenceZone::default();
        assert_eq!(
            hour_range(&zone, msk(1, 10)),
            "2024-01-01 10:00 — 10:59 (Europe/Moscow)"
        );
    }

    #[test]
    fn test_hour_range_crossing_midnight() {
        let zone = ReferenceZone::default();
        // Not hour-aligned, so the span ends on the next day
        let t = msk(1, 23) + 1800;
        assert_eq!(
            hour_range(&zone, t),
            "2024-01-01 23:30 — 2024-01-02 00:29 (Europe/Moscow)"
        );
    }

    #[test]
    fn test_shifted_range_starts_two_hours_later() {
        let zone = ReferenceZone::default();
        let t = msk(1, 10);
        assert_eq!(hour_range_shifted(&zone, t), hour_range(&zone, msk(1, 12)));
        assert_eq!(
            hour_range_shifted(&zone, t),
            "2024-01-01 12:00 — 12:59 (Europe/Moscow)"
        );

        // Wraps into the next day
        assert_eq!(
            hour_range_shifted(&zone, msk(1, 23)),
            "2024-01-02 01:00 — 01:59 (Europe/Moscow)"
        );
    }

    #[test]
    fn test_shifted_never_equals_plain() {
        let zone = ReferenceZone::default();
        let start = msk(1, 0);
        for i in 0..48 {
            let t = start + i * 3600;
            assert_ne!(hour_range(&zone, t), hour_range_shifted(&zone, t));
        }
    }

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        let zone = ReferenceZone::default();
        // Unrepresentable instants fall back to the epoch
        assert_eq!(hour_end_label(&zone, i64::MAX), "1970-01-01 03:00");
        assert!(hour_range(&zone, i64::MAX - 100).ends_with("(Europe/Moscow)"));
        assert!(hour_range_shifted(&zone, i64::MAX).ends_with("(Europe/Moscow)"));
    }

    #[test]
    fn test_day_range_and_labels() {
        let zone = ReferenceZone::default();
        let t = msk(2, 5);
        assert_eq!(day_range(&zone, t), "2024-01-02 (Europe/Moscow)");
        assert_eq!(day_label(&zone, t), "2024-01-02");
        assert_eq!(hour_start_label(&zone, t), "2024-01-02 05:00");
        assert_eq!(hour_end_label(&zone, t), "2024-01-02 05:59");
    }
}

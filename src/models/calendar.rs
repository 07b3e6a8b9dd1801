//! Calendar primitives.
//!
//! Half-open time windows and calendar-day distances. Rest rules in this
//! crate are measured in whole calendar days between dates; time of day
//! never enters a day-gap computation.
//!
//! # Time Model
//! All timestamps are naive local wall-clock times (`NaiveDateTime`).
//! The stadium lives in one timezone and the consumer decides which.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end. A window that ends
/// exactly when another starts does not overlap it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive).
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Creates a window of `hours` starting at `start`.
    pub fn starting_at(start: NaiveDateTime, hours: i64) -> Self {
        Self::new(start, add_hours(start, hours))
    }

    /// Duration of this window.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `end > start`.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start
    }

    /// Whether a timestamp falls within this window.
    #[inline]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at < self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Absolute number of calendar days between the dates of two timestamps.
///
/// ```
/// use chrono::NaiveDate;
/// use referee_scheduler::models::day_gap;
///
/// let a = NaiveDate::from_ymd_opt(2031, 3, 1).unwrap().and_hms_opt(23, 0, 0).unwrap();
/// let b = NaiveDate::from_ymd_opt(2031, 3, 2).unwrap().and_hms_opt(1, 0, 0).unwrap();
/// assert_eq!(day_gap(a, b), 1);
/// assert_eq!(day_gap(b, a), 1);
/// ```
pub fn day_gap(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
    signed_day_gap(a, b).abs()
}

/// Calendar days from the date of `from` to the date of `to`.
///
/// Negative when `to` falls on an earlier date.
pub fn signed_day_gap(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to.date() - from.date()).num_days()
}

/// Monday 00:00:00 to Sunday 23:59:59 of the week containing `at`.
pub fn week_range(at: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let monday = at.date() - Duration::days(at.weekday().num_days_from_monday() as i64);
    let sunday = monday + Duration::days(6);
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    (monday.and_time(NaiveTime::MIN), sunday.and_time(end_of_day))
}

/// `start` shifted by `hours`, clamped to the representable range.
pub fn add_hours(start: NaiveDateTime, hours: i64) -> NaiveDateTime {
    Duration::try_hours(hours)
        .and_then(|d| start.checked_add_signed(d))
        .unwrap_or(if hours < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
}

/// `date` at `hour`:00:00, or `None` if the hour is not a valid clock hour.
pub fn at_hour(date: NaiveDate, hour: u32) -> Option<NaiveDateTime> {
    date.and_hms_opt(hour, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_time_window() {
        let w = TimeWindow::new(dt(2031, 12, 25, 15, 0), dt(2031, 12, 25, 17, 0));
        assert_eq!(w.duration(), Duration::hours(2));
        assert!(w.contains(dt(2031, 12, 25, 15, 0)));
        assert!(w.contains(dt(2031, 12, 25, 16, 59)));
        assert!(!w.contains(dt(2031, 12, 25, 17, 0))); // exclusive end
        assert!(w.is_well_formed());
        assert!(!TimeWindow::new(w.end, w.start).is_well_formed());
    }

    #[test]
    fn test_time_window_overlap() {
        let a = TimeWindow::starting_at(dt(2031, 12, 25, 15, 0), 2);
        let b = TimeWindow::starting_at(dt(2031, 12, 25, 16, 0), 2);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = TimeWindow::starting_at(dt(2031, 12, 25, 17, 0), 2); // touching
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_add_hours_clamps() {
        let start = dt(2031, 12, 25, 15, 0);
        assert_eq!(add_hours(start, 2), dt(2031, 12, 25, 17, 0));
        assert_eq!(add_hours(start, i64::MAX), NaiveDateTime::MAX);
        assert_eq!(add_hours(start, i64::MIN), NaiveDateTime::MIN);
        assert_eq!(TimeWindow::starting_at(start, 9_000_000_000_000_000).end, NaiveDateTime::MAX);
    }

    #[test]
    fn test_day_gap_ignores_time_of_day() {
        assert_eq!(day_gap(dt(2031, 1, 1, 23, 59), dt(2031, 1, 2, 0, 1)), 1);
        assert_eq!(day_gap(dt(2031, 1, 1, 0, 0), dt(2031, 1, 1, 23, 0)), 0);
        assert_eq!(day_gap(dt(2031, 1, 8, 12, 0), dt(2031, 1, 1, 20, 0)), 7);
    }

    #[test]
    fn test_signed_day_gap() {
        assert_eq!(signed_day_gap(dt(2031, 1, 1, 12, 0), dt(2031, 1, 3, 9, 0)), 2);
        assert_eq!(signed_day_gap(dt(2031, 1, 3, 9, 0), dt(2031, 1, 1, 12, 0)), -2);
    }

    #[test]
    fn test_week_range() {
        // 2031-12-25 is a Thursday
        let (start, end) = week_range(dt(2031, 12, 25, 15, 0));
        assert_eq!(start, dt(2031, 12, 22, 0, 0));
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2031, 12, 28).unwrap());
    }

    #[test]
    fn test_at_hour() {
        let d = NaiveDate::from_ymd_opt(2031, 5, 1).unwrap();
        assert_eq!(at_hour(d, 20), Some(dt(2031, 5, 1, 20, 0)));
        assert_eq!(at_hour(d, 24), None);
    }
}

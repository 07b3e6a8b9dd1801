//! Kickoff parsing and date formatting.
//!
//! Turns free text typed by an operator (`DD/MM/YYYY HH:MM`) into a
//! validated kickoff, or names exactly why it was refused. The parser is
//! a pure function of the input, the current time, and [`DateRules`].

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use thiserror::Error;

use crate::config::DateRules;
use crate::models::add_hours;

/// Display format for a date with time.
pub const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";
/// Display format for a date.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Why a kickoff string was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRejection {
    #[error("the date cannot be empty")]
    Empty,

    #[error("negative numbers are not allowed in a date")]
    NegativeNumber,

    #[error("the date cannot contain letters; use digits with the / and : separators")]
    ContainsLetters,

    #[error("the date contains invalid characters: {0}")]
    InvalidCharacters(String),

    #[error("wrong format, use DD/MM/YYYY HH:MM (missing the / separator)")]
    MissingDateSeparator,

    #[error("wrong format, use DD/MM/YYYY HH:MM (missing the time with :)")]
    MissingTimeSeparator,

    #[error("wrong format, the date must be DD/MM/YYYY (two / separators)")]
    DateSeparatorCount,

    #[error("wrong format, the time must be HH:MM (one : separator)")]
    TimeSeparatorCount,

    #[error("wrong format, use exactly DD/MM/YYYY HH:MM (for example 25/12/2031 15:00)")]
    Malformed,

    #[error("the month must be between 1 and 12")]
    MonthOutOfRange,

    #[error("the day is not valid for the given month")]
    DayOutOfRange,

    #[error("the hour must be between 0 and 23")]
    HourOutOfRange,

    #[error("the minutes must be between 0 and 59")]
    MinuteOutOfRange,

    #[error("matches cannot be scheduled in the past")]
    InPast,

    #[error("the year cannot be earlier than {0}")]
    YearTooEarly(i32),

    #[error("the year cannot be later than {0}")]
    YearTooLate(i32),

    #[error("kickoff must be at {0}:00 or later")]
    HourTooEarly(u32),

    #[error("kickoff cannot be after {0}:00")]
    HourTooLate(u32),
}

/// Parses a kickoff typed as `DD/MM/YYYY HH:MM`.
///
/// Character-level checks run first, then calendar-field ranges, then
/// the past / year / operating-hour rules in that order. The hour window
/// is checked on the hour field only, so `22:45` passes when
/// `max_hour` is 22.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use referee_scheduler::config::DateRules;
/// use referee_scheduler::dates::{parse_kickoff, DateRejection};
///
/// let now = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let rules = DateRules::default();
///
/// let kickoff = parse_kickoff("25/12/2031 15:00", now, &rules).unwrap();
/// assert_eq!(kickoff.format("%Y-%m-%d %H:%M").to_string(), "2031-12-25 15:00");
///
/// assert_eq!(parse_kickoff("25/12/2031 09:00", now, &rules), Err(DateRejection::HourTooEarly(10)));
/// ```
pub fn parse_kickoff(
    input: &str,
    now: NaiveDateTime,
    rules: &DateRules,
) -> Result<NaiveDateTime, DateRejection> {
    let text = input.trim();
    if text.is_empty() {
        return Err(DateRejection::Empty);
    }
    if text.contains('-') {
        return Err(DateRejection::NegativeNumber);
    }
    if text.chars().any(char::is_alphabetic) {
        return Err(DateRejection::ContainsLetters);
    }

    let mut invalid: Vec<char> = text
        .chars()
        .filter(|c| !(c.is_ascii_digit() || matches!(c, '/' | ':' | ' ')))
        .collect();
    if !invalid.is_empty() {
        invalid.sort_unstable();
        invalid.dedup();
        let listed: Vec<String> = invalid.iter().map(|c| format!("'{c}'")).collect();
        return Err(DateRejection::InvalidCharacters(listed.join(", ")));
    }

    if !text.contains('/') {
        return Err(DateRejection::MissingDateSeparator);
    }
    if !text.contains(':') {
        return Err(DateRejection::MissingTimeSeparator);
    }
    if text.matches('/').count() != 2 {
        return Err(DateRejection::DateSeparatorCount);
    }
    if text.matches(':').count() != 1 {
        return Err(DateRejection::TimeSeparatorCount);
    }

    let kickoff = parse_fields(text)?;

    if kickoff < now {
        return Err(DateRejection::InPast);
    }
    let year = kickoff.year();
    if year < rules.min_year {
        return Err(DateRejection::YearTooEarly(rules.min_year));
    }
    if year > rules.max_year {
        return Err(DateRejection::YearTooLate(rules.max_year));
    }
    if kickoff.hour() < rules.min_hour {
        return Err(DateRejection::HourTooEarly(rules.min_hour));
    }
    if kickoff.hour() > rules.max_hour {
        return Err(DateRejection::HourTooLate(rules.max_hour));
    }

    Ok(kickoff)
}

/// Splits `DD/MM/YYYY HH:MM` into fields and range-checks them.
fn parse_fields(text: &str) -> Result<NaiveDateTime, DateRejection> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [date_part, time_part] = parts.as_slice() else {
        return Err(DateRejection::Malformed);
    };

    let date_fields: Vec<&str> = date_part.split('/').collect();
    let time_fields: Vec<&str> = time_part.split(':').collect();
    let (Some(day), Some(month), Some(year)) = (
        field(date_fields.first(), 2),
        field(date_fields.get(1), 2),
        field(date_fields.get(2), 4),
    ) else {
        return Err(DateRejection::Malformed);
    };
    let (Some(hour), Some(minute)) = (field(time_fields.first(), 2), field(time_fields.get(1), 2))
    else {
        return Err(DateRejection::Malformed);
    };
    if date_fields.len() != 3 || time_fields.len() != 2 || date_fields[2].len() != 4 {
        return Err(DateRejection::Malformed);
    }

    if !(1..=12).contains(&month) {
        return Err(DateRejection::MonthOutOfRange);
    }
    if hour > 23 {
        return Err(DateRejection::HourOutOfRange);
    }
    if minute > 59 {
        return Err(DateRejection::MinuteOutOfRange);
    }
    let date = NaiveDate::from_ymd_opt(year as i32, month, day).ok_or(DateRejection::DayOutOfRange)?;
    date.and_hms_opt(hour, minute, 0).ok_or(DateRejection::Malformed)
}

/// A numeric field of 1..=`max_len` digits.
fn field(raw: Option<&&str>, max_len: usize) -> Option<u32> {
    let raw = raw?;
    if raw.is_empty() || raw.len() > max_len || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// `DD/MM/YYYY HH:MM`.
pub fn format_datetime(at: NaiveDateTime) -> String {
    at.format(DATETIME_FORMAT).to_string()
}

/// `DD/MM/YYYY`.
pub fn format_date(at: NaiveDateTime) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// Human-readable length of `[start, end)`, e.g. `"1 hour(s) 30 minute(s)"`.
pub fn format_duration(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let total = (end - start).num_minutes().max(0);
    let (hours, minutes) = (total / 60, total % 60);
    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours} hour(s)"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} minute(s)"));
    }
    if parts.is_empty() {
        "0 minutes".to_string()
    } else {
        parts.join(" ")
    }
}

/// Final whistle for a kickoff.
pub fn match_end(start: NaiveDateTime, duration_hours: i64) -> NaiveDateTime {
    add_hours(start, duration_hours)
}

/// The next whole hour at which a kickoff may be typed.
///
/// Inside operating hours this is the next full hour; at or after the
/// last kickoff hour it is the first kickoff hour tomorrow; before
/// opening it is today's first kickoff hour.
pub fn next_kickoff_hour(now: NaiveDateTime, rules: &DateRules) -> NaiveDateTime {
    let opening = |date: NaiveDate| date.and_hms_opt(rules.min_hour, 0, 0).unwrap_or(now);
    let hour = now.hour();
    if hour >= rules.max_hour {
        return opening(now.date() + Duration::days(1));
    }
    if hour < rules.min_hour {
        return opening(now.date());
    }
    now.date()
        .and_hms_opt(hour, 0, 0)
        .map(|h| h + Duration::hours(1))
        .unwrap_or(now)
}

//! Time utilities: parsing HH:MM, duration computations, formatting seconds, etc.
//!
//! Every start/end pair check in the crate goes through [`duration_seconds`].

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder rendered wherever a time value is missing.
pub const NO_TIME_DATA: &str = "--:--";

pub const TIME_FORMAT: &str = "%H:%M";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("time pattern compiles")
});

/// Parse `HH:MM` or `HH:MM:SS` (seconds are dropped).
///
/// Empty input means "no value" and yields `Ok(None)`.
pub fn parse_time(s: &str) -> AppResult<Option<NaiveTime>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    let caps = TIME_RE
        .captures(s)
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))?;

    let field = |i: usize| -> u32 {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };

    let (h, m, sec) = (field(1), field(2), field(3));
    if sec > 59 {
        return Err(AppError::InvalidTime(s.to_string()));
    }

    NaiveTime::from_hms_opt(h, m, 0)
        .map(Some)
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Parse a combined timestamp as stored by the relational backend.
pub fn parse_datetime(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AppError::InvalidFormat(format!("timestamp '{s}'")))
}

/// Signed `end - start` in seconds; both are placed on the same reference day.
pub fn duration_seconds(start: NaiveTime, end: NaiveTime) -> AppResult<i64> {
    let day = NaiveDate::default();
    let secs = (merge_date_time(day, end) - merge_date_time(day, start)).num_seconds();

    if secs < 0 {
        return Err(AppError::EndBeforeStart { start, end });
    }
    Ok(secs)
}

/// Render seconds as `HH:MM`, flooring to whole minutes of the magnitude.
///
/// With `signed` the result carries a leading `"+ "` or `"- "`.
pub fn format_duration(seconds: Option<i64>, signed: bool) -> String {
    let Some(secs) = seconds else {
        return NO_TIME_DATA.to_string();
    };

    let total_minutes = secs.unsigned_abs() / 60;
    let body = format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60);

    if !signed {
        body
    } else if secs < 0 {
        format!("- {body}")
    } else {
        format!("+ {body}")
    }
}

pub fn format_time(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| NO_TIME_DATA.to_string())
}

pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Like [`format_datetime`] but keeps sub-second precision, for live markers.
pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()
}

pub fn merge_date_time(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

pub fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

/// Parse a break duration typed by a user or read from a file.
///
/// Accepts plain seconds (`"1800"`, `"1800.0"`) or `HH:MM` (`"00:30"`).
pub fn parse_break(s: &str) -> AppResult<Option<i64>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    if s.contains(':') {
        let t = parse_time(s)?.ok_or_else(|| AppError::InvalidFormat(s.to_string()))?;
        return Ok(Some(i64::from(t.num_seconds_from_midnight())));
    }

    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v.round() as i64)),
        _ => Err(AppError::InvalidFormat(format!("break time '{s}'"))),
    }
}

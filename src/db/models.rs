//! Database row model for the timesheet table.
//! These are thin wrappers around SQLite rows, kept in their stored form.

use crate::errors::AppResult;
use crate::models::{DayState, WorkingDay};
use crate::utils::time::{
    DATE_FORMAT, format_datetime, merge_date_time, parse_date, parse_datetime, parse_time,
};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetRow {
    pub employee_id: String,
    pub date: String,
    pub starttime: Option<String>,
    pub endtime: Option<String>,
    /// Cached net work time in seconds; recomputed on every write.
    pub workhours: Option<f64>,
    /// Seconds.
    pub breaktime: Option<f64>,
    pub state: String,
}

impl TimesheetRow {
    pub fn from_day(employee_id: &str, day: &WorkingDay) -> Self {
        let date = day.date();
        Self {
            employee_id: employee_id.to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            starttime: day
                .start_time
                .map(|t| format_datetime(merge_date_time(date, t))),
            endtime: day.end_time.map(|t| format_datetime(merge_date_time(date, t))),
            workhours: day.get_work_time().map(|s| s as f64),
            breaktime: day.break_time.map(|s| s as f64),
            state: day.state.to_db_str().to_string(),
        }
    }

    pub fn parsed_date(&self) -> AppResult<NaiveDate> {
        parse_date(&self.date)
    }

    /// Rebuild the day. Unreadable fields are dropped rather than failing
    /// the whole row.
    pub fn to_day(&self) -> AppResult<WorkingDay> {
        let mut day = WorkingDay::new(self.parsed_date()?);

        let time_of = |column: &str, raw: &Option<String>| {
            raw.as_deref()
                .filter(|s| !s.trim().is_empty())
                .and_then(|s| match parse_datetime(s) {
                    Ok(dt) => Some(dt.time()),
                    // rows updated by older clients hold a bare time of day
                    Err(e) => parse_time(s).unwrap_or_else(|_| {
                        tracing::warn!(date = %self.date, column, "ignoring stored value: {e}");
                        None
                    }),
                })
        };

        day.start_time = time_of("starttime", &self.starttime);
        day.end_time = time_of("endtime", &self.endtime);
        day.break_time = self
            .breaktime
            .filter(|b| b.is_finite() && *b >= 0.0)
            .map(|b| b.round() as i64);
        day.state = DayState::from_db_str(&self.state).unwrap_or_else(|| {
            tracing::warn!(date = %self.date, state = %self.state, "unknown state, using default");
            DayState::Default
        });

        Ok(day)
    }

    /// Canonical string form of every stored column, for change detection.
    fn normalized(&self) -> [String; 7] {
        let date = parse_date(&self.date)
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|_| self.date.trim().to_string());
        let stamp = |v: &Option<String>| {
            v.as_deref()
                .map(|s| parse_datetime(s).map(format_datetime).unwrap_or_else(|_| s.to_string()))
                .unwrap_or_default()
        };
        let number = |v: Option<f64>| v.map(|n| format!("{n:.0}")).unwrap_or_default();

        [
            self.employee_id.clone(),
            date,
            stamp(&self.starttime),
            stamp(&self.endtime),
            number(self.workhours),
            number(self.breaktime),
            self.state.trim().to_lowercase(),
        ]
    }

    /// Field-by-field comparison of the normalized rows.
    pub fn same_content(&self, other: &TimesheetRow) -> bool {
        self.normalized() == other.normalized()
    }
}

use super::day_state::DayState;
use crate::errors::AppResult;
use crate::utils::date::is_weekday;
use crate::utils::time::duration_seconds;
use chrono::{NaiveDate, NaiveTime};

/// One calendar day of recorded work for an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDay {
    date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    /// Accumulated break in seconds.
    pub break_time: Option<i64>,
    pub state: DayState,
}

impl WorkingDay {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            start_time: None,
            end_time: None,
            break_time: None,
            state: DayState::Default,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Net seconds worked, or `None` when start/end are missing or inverted.
    pub fn get_work_time(&self) -> Option<i64> {
        let (start, end) = (self.start_time?, self.end_time?);
        match duration_seconds(start, end) {
            Ok(secs) => Some(secs - self.break_time.unwrap_or(0)),
            Err(e) => {
                tracing::debug!(date = %self.date, "no work time: {e}");
                None
            }
        }
    }

    pub fn has_entry(&self) -> bool {
        self.start_time.is_some()
            || self.end_time.is_some()
            || self.break_time.is_some()
            || self.state != DayState::Default
    }

    /// Fails with `EndBeforeStart` when both times are set and inverted.
    pub fn validate(&self) -> AppResult<()> {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            duration_seconds(start, end)?;
        }
        Ok(())
    }

    pub fn is_weekday(&self) -> bool {
        is_weekday(self.date)
    }

    /// Does this day carry expected working hours?
    pub fn is_due(&self) -> bool {
        !self.state.is_absence() && self.is_weekday()
    }

    pub fn clear(&mut self) {
        self.start_time = None;
        self.end_time = None;
        self.break_time = None;
        self.state = DayState::Default;
    }

    /// Reset breaks shorter than `min_seconds` (accidental double taps).
    /// Returns true when something was dropped.
    pub fn discard_short_break(&mut self, min_seconds: i64) -> bool {
        match self.break_time {
            Some(b) if b < min_seconds => {
                self.break_time = None;
                true
            }
            _ => false,
        }
    }
}

//! Best-effort edits of a single day.
//!
//! Each field is applied on its own: a bad value is reported and leaves the
//! stored value in place, the other fields still go through.

use crate::errors::AppError;
use crate::models::{DayState, WorkingDay};
use crate::utils::time::{parse_break, parse_time};
use chrono::NaiveTime;

/// Raw user input for one day. `None` leaves the field alone, an empty
/// string clears it.
#[derive(Debug, Default, Clone)]
pub struct DayInput {
    pub start: Option<String>,
    pub end: Option<String>,
    pub break_time: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Default)]
pub enum FieldOutcome {
    #[default]
    Unchanged,
    Stored,
    Cleared,
    Rejected(AppError),
}

impl FieldOutcome {
    fn written<T>(value: &Option<T>) -> Self {
        if value.is_some() {
            FieldOutcome::Stored
        } else {
            FieldOutcome::Cleared
        }
    }

    pub fn is_change(&self) -> bool {
        matches!(self, FieldOutcome::Stored | FieldOutcome::Cleared)
    }
}

#[derive(Debug, Default)]
pub struct EditReport {
    pub start: FieldOutcome,
    pub end: FieldOutcome,
    pub break_time: FieldOutcome,
    pub state: FieldOutcome,
}

impl EditReport {
    pub fn changed(&self) -> bool {
        self.fields().iter().any(|(_, o)| o.is_change())
    }

    pub fn fields(&self) -> [(&'static str, &FieldOutcome); 4] {
        [
            ("start", &self.start),
            ("end", &self.end),
            ("break", &self.break_time),
            ("state", &self.state),
        ]
    }

    pub fn rejected(&self) -> impl Iterator<Item = (&'static str, &AppError)> + '_ {
        self.fields().into_iter().filter_map(|(name, o)| match o {
            FieldOutcome::Rejected(e) => Some((name, e)),
            _ => None,
        })
    }
}

fn pair_is_valid(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Result<(), AppError> {
    let mut probe = WorkingDay::new(chrono::NaiveDate::default());
    probe.start_time = start;
    probe.end_time = end;
    probe.validate()
}

/// Apply `input` to `day`.
///
/// When start and end together form an inverted pair the end is rejected
/// first and the start is retried against the end already stored.
pub fn edit_day(day: &mut WorkingDay, input: &DayInput) -> EditReport {
    let mut report = EditReport::default();

    let start = match input.start.as_deref().map(parse_time) {
        Some(Err(e)) => {
            report.start = FieldOutcome::Rejected(e);
            None
        }
        Some(Ok(v)) => Some(v),
        None => None,
    };
    let end = match input.end.as_deref().map(parse_time) {
        Some(Err(e)) => {
            report.end = FieldOutcome::Rejected(e);
            None
        }
        Some(Ok(v)) => Some(v),
        None => None,
    };

    let new_start = start.unwrap_or(day.start_time);
    let new_end = end.unwrap_or(day.end_time);

    match pair_is_valid(new_start, new_end) {
        Ok(()) => {
            if let Some(v) = start {
                day.start_time = v;
                report.start = FieldOutcome::written(&v);
            }
            if let Some(v) = end {
                day.end_time = v;
                report.end = FieldOutcome::written(&v);
            }
        }
        Err(e) if end.is_some() => {
            report.end = FieldOutcome::Rejected(e);
            if let Some(v) = start {
                match pair_is_valid(v, day.end_time) {
                    Ok(()) => {
                        day.start_time = v;
                        report.start = FieldOutcome::written(&v);
                    }
                    Err(e) => report.start = FieldOutcome::Rejected(e),
                }
            }
        }
        Err(e) => {
            if start.is_some() {
                report.start = FieldOutcome::Rejected(e);
            }
        }
    }

    if let Some(raw) = input.break_time.as_deref() {
        report.break_time = match parse_break(raw) {
            Ok(v) => {
                day.break_time = v;
                FieldOutcome::written(&v)
            }
            Err(e) => FieldOutcome::Rejected(e),
        };
    }

    if let Some(raw) = input.state.as_deref() {
        report.state = match raw.parse::<DayState>() {
            Ok(state) => {
                day.state = state;
                FieldOutcome::Stored
            }
            Err(e) => FieldOutcome::Rejected(e),
        };
    }

    for (field, err) in report.rejected() {
        tracing::warn!(date = %day.date(), field, "edit rejected: {err}");
    }

    report
}

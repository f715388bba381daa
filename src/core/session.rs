//! Start/break/end logging on today's working day.
//!
//! ```text
//! Idle --work--> Working --work--> Ended --work--> Ended (end overwritten)
//!                  |  ^
//!               break break
//!                  v  |
//!                 OnBreak --work--> Ended (break merged first)
//! ```

use super::clock::Clock;
use crate::errors::AppResult;
use crate::models::WorkTimeEmployee;
use crate::utils::time::truncate_to_minute;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Working,
    OnBreak,
    Ended,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::Idle => "not started",
            SessionState::Working => "working",
            SessionState::OnBreak => "on break",
            SessionState::Ended => "ended",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOutcome {
    Started { at: NaiveTime },
    /// `closed_break` holds the seconds of a break that was still open.
    Ended { at: NaiveTime, closed_break: Option<i64> },
    /// End time moved on a day that had already ended.
    Extended { at: NaiveTime },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakRejected {
    NotStarted,
    AlreadyEnded,
}

impl fmt::Display for BreakRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BreakRejected::NotStarted => "work has not been started today",
            BreakRejected::AlreadyEnded => "work has already ended today",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakOutcome {
    Started { at: NaiveDateTime },
    Ended { added: i64, total: i64 },
    Rejected(BreakRejected),
}

/// Forget a break marker left open on an earlier day.
fn drop_stale_break(employee: &mut WorkTimeEmployee, today: NaiveDate) -> bool {
    match employee.on_break {
        Some(started) if started.date() < today => {
            tracing::warn!(
                employee_id = employee.employee_id(),
                %started,
                "discarding break left open on an earlier day"
            );
            employee.on_break = None;
            true
        }
        _ => false,
    }
}

fn elapsed_seconds(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_seconds().max(0)
}

/// Record a start or end time for today, depending on the current state.
pub fn log_work_time(employee: &mut WorkTimeEmployee, clock: &dyn Clock) -> AppResult<WorkOutcome> {
    let now = clock.now();
    let today = now.date();
    drop_stale_break(employee, today);

    let stamp = truncate_to_minute(now).time();
    let on_break = employee.on_break;
    let day = employee.create_day(today);

    if day.start_time.is_none() {
        let mut candidate = day.clone();
        candidate.start_time = Some(stamp);
        candidate.validate()?;
        *day = candidate;
        return Ok(WorkOutcome::Started { at: stamp });
    }

    let mut candidate = day.clone();
    candidate.end_time = Some(stamp);
    candidate.validate()?;

    let already_ended = day.end_time.is_some();
    let closed_break = on_break.map(|started| elapsed_seconds(started, now));
    if let Some(secs) = closed_break {
        candidate.break_time = Some(candidate.break_time.unwrap_or(0) + secs);
    }
    *day = candidate;
    employee.on_break = None;

    Ok(if already_ended && closed_break.is_none() {
        WorkOutcome::Extended { at: stamp }
    } else {
        WorkOutcome::Ended {
            at: stamp,
            closed_break,
        }
    })
}

/// Open a break, or close the open one and add it to today's total.
pub fn log_break_time(employee: &mut WorkTimeEmployee, clock: &dyn Clock) -> BreakOutcome {
    let now = clock.now();
    let today = now.date();
    drop_stale_break(employee, today);

    let on_break = employee.on_break;
    let Some(day) = employee.get_day_mut(today).filter(|d| d.start_time.is_some()) else {
        return BreakOutcome::Rejected(BreakRejected::NotStarted);
    };
    if day.end_time.is_some() {
        return BreakOutcome::Rejected(BreakRejected::AlreadyEnded);
    }

    match on_break {
        None => {
            employee.on_break = Some(now);
            BreakOutcome::Started { at: now }
        }
        Some(started) => {
            let added = elapsed_seconds(started, now);
            let total = day.break_time.unwrap_or(0) + added;
            day.break_time = Some(total);
            employee.on_break = None;
            BreakOutcome::Ended { added, total }
        }
    }
}

pub fn session_state(employee: &WorkTimeEmployee, today: NaiveDate) -> SessionState {
    let Some(day) = employee.get_day(today).filter(|d| d.start_time.is_some()) else {
        return SessionState::Idle;
    };
    if day.end_time.is_some() {
        SessionState::Ended
    } else if employee.on_break.is_some_and(|b| b.date() == today) {
        SessionState::OnBreak
    } else {
        SessionState::Working
    }
}

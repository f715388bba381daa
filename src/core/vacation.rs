use crate::errors::{AppError, AppResult};
use crate::models::{DayState, WorkTimeEmployee};
use crate::utils::date::is_weekday;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VacationOutcome {
    /// `from_old` is set when a carried-over day was used.
    Granted { remaining: i32, from_old: bool },
    AlreadyVacation,
}

/// Mark `date` as vacation, spending carried-over days before this year's.
///
/// Balances are only ever decremented here; nothing refunds them.
pub fn request_vacation(
    employee: &mut WorkTimeEmployee,
    date: NaiveDate,
) -> AppResult<VacationOutcome> {
    if !is_weekday(date) {
        return Err(AppError::NotAWorkday(date));
    }
    if employee
        .get_day(date)
        .is_some_and(|d| d.state == DayState::Vacation)
    {
        return Ok(VacationOutcome::AlreadyVacation);
    }

    let from_old = if employee.amount_old_vacation_days > 0 {
        employee.amount_old_vacation_days -= 1;
        true
    } else if employee.amount_vacation_days > 0 {
        employee.amount_vacation_days -= 1;
        false
    } else {
        return Err(AppError::NoVacationDaysLeft);
    };

    employee.create_day(date).state = DayState::Vacation;
    tracing::info!(employee_id = employee.employee_id(), %date, from_old, "vacation granted");

    Ok(VacationOutcome::Granted {
        remaining: employee.amount_vacation_days + employee.amount_old_vacation_days,
        from_old,
    })
}

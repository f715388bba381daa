//! `Timesheet` binds one employee to a backend, a config and a clock.
//!
//! Every mutating call persists before it returns.

use super::clock::{Clock, SystemClock};
use super::edit::{self, DayInput, EditReport, FieldOutcome};
use super::flex;
use super::session::{self, BreakOutcome, SessionState, WorkOutcome};
use super::vacation::{self, VacationOutcome};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{DayState, WorkTimeEmployee, WorkingDay};
use crate::storage::{Backend, SaveReport, open_backend};
use chrono::NaiveDate;

pub struct Timesheet {
    config: Config,
    backend: Box<dyn Backend>,
    clock: Box<dyn Clock>,
    employee: WorkTimeEmployee,
}

impl Timesheet {
    /// Open the employee named in `config` on the configured backend.
    pub fn open(config: Config) -> AppResult<Self> {
        let backend = open_backend(&config);
        Self::with_backend(config, backend, Box::new(SystemClock))
    }

    pub fn with_backend(
        config: Config,
        backend: Box<dyn Backend>,
        clock: Box<dyn Clock>,
    ) -> AppResult<Self> {
        let employee =
            WorkTimeEmployee::new(config.employee_id.clone(), config.default_vacation_days);
        let mut sheet = Self {
            config,
            backend,
            clock,
            employee,
        };
        sheet.load_working_days()?;
        Ok(sheet)
    }

    /// Replace the in-memory state with what the backend holds.
    ///
    /// An employee seen for the first time is stored with the default balances.
    pub fn load_working_days(&mut self) -> AppResult<()> {
        let id = self.employee.employee_id().to_string();

        let days = self.backend.load_working_days(&id)?;
        self.employee.set_working_days(days);

        match self.backend.load_employee(&id)? {
            Some(record) => self.employee.apply_record(&record),
            None => {
                self.backend.save_employee(&self.employee.record())?;
                tracing::info!(employee_id = %id, backend = self.backend.kind().as_str(), "registered new employee");
            }
        }
        Ok(())
    }

    /// Drop too-short breaks, then write days and employee record.
    pub fn save_working_days(&mut self) -> AppResult<SaveReport> {
        let dropped = self
            .employee
            .discard_short_breaks(self.config.min_break_seconds);
        if dropped > 0 {
            tracing::debug!(dropped, "discarded short breaks");
        }

        let report = self
            .backend
            .save_working_days(self.employee.employee_id(), self.employee.working_days())?;
        self.backend.save_employee(&self.employee.record())?;
        Ok(report)
    }

    pub fn create_day(&mut self, date: NaiveDate) -> &mut WorkingDay {
        self.employee.create_day(date)
    }

    pub fn get_day(&self, date: NaiveDate) -> Option<&WorkingDay> {
        self.employee.get_day(date)
    }

    pub fn get_flex_time(&self) -> i64 {
        self.employee.get_flex_time(self.config.daily_working_hours)
    }

    pub fn flex_time_until(&self, until: NaiveDate) -> i64 {
        flex::flex_time_until(
            self.employee.working_days().values(),
            self.config.daily_working_hours,
            until,
        )
    }

    pub fn log_work_time(&mut self) -> AppResult<WorkOutcome> {
        let outcome = session::log_work_time(&mut self.employee, self.clock.as_ref())?;
        self.save_working_days()?;
        Ok(outcome)
    }

    pub fn log_break_time(&mut self) -> AppResult<BreakOutcome> {
        let outcome = session::log_break_time(&mut self.employee, self.clock.as_ref());
        if !matches!(outcome, BreakOutcome::Rejected(_)) {
            self.save_working_days()?;
        }
        Ok(outcome)
    }

    pub fn session_state(&self) -> SessionState {
        session::session_state(&self.employee, self.today())
    }

    /// Apply a best-effort edit; saves only when a field actually changed.
    ///
    /// A break shorter than `min_break_seconds` is dropped on save, so it is
    /// reported as cleared rather than stored.
    pub fn edit_day(&mut self, date: NaiveDate, input: &DayInput) -> AppResult<EditReport> {
        let min_break = self.config.min_break_seconds;
        let day = self.employee.create_day(date);
        let mut report = edit::edit_day(day, input);
        if matches!(report.break_time, FieldOutcome::Stored) && day.discard_short_break(min_break) {
            tracing::debug!(%date, min_break, "break below minimum, cleared");
            report.break_time = FieldOutcome::Cleared;
        }
        if report.changed() {
            self.save_working_days()?;
        }
        Ok(report)
    }

    pub fn set_state(&mut self, date: NaiveDate, state: DayState) -> AppResult<()> {
        self.employee.create_day(date).state = state;
        self.save_working_days()?;
        Ok(())
    }

    /// Reset a day and remove it from storage. Returns false if nothing was stored.
    pub fn clear_day(&mut self, date: NaiveDate) -> AppResult<bool> {
        if let Some(day) = self.employee.get_day_mut(date) {
            day.clear();
        }
        if self.employee.on_break.is_some_and(|b| b.date() == date) {
            self.employee.on_break = None;
            self.backend.save_employee(&self.employee.record())?;
        }
        self.backend.delete_day(self.employee.employee_id(), date)
    }

    pub fn request_vacation(&mut self, date: NaiveDate) -> AppResult<VacationOutcome> {
        let outcome = vacation::request_vacation(&mut self.employee, date)?;
        if outcome != VacationOutcome::AlreadyVacation {
            self.save_working_days()?;
        }
        Ok(outcome)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn employee(&self) -> &WorkTimeEmployee {
        &self.employee
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }
}

use super::working_day::WorkingDay;
use crate::core::flex;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// The per-employee row kept next to the timesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub vacation_days: i32,
    pub old_vacation_days: i32,
    pub on_break: Option<NaiveDateTime>,
}

/// An employee together with every day recorded for them.
#[derive(Debug, Clone)]
pub struct WorkTimeEmployee {
    employee_id: String,
    pub name: String,
    pub role: String,
    working_days: BTreeMap<NaiveDate, WorkingDay>,
    pub amount_vacation_days: i32,
    pub amount_old_vacation_days: i32,
    /// Start of the break in progress, if any.
    pub on_break: Option<NaiveDateTime>,
}

impl WorkTimeEmployee {
    pub fn new(employee_id: impl Into<String>, vacation_days: i32) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: "default".to_string(),
            role: "employee".to_string(),
            working_days: BTreeMap::new(),
            amount_vacation_days: vacation_days,
            amount_old_vacation_days: 0,
            on_break: None,
        }
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// Day for `date`, created empty on first access.
    pub fn create_day(&mut self, date: NaiveDate) -> &mut WorkingDay {
        self.working_days
            .entry(date)
            .or_insert_with(|| WorkingDay::new(date))
    }

    pub fn get_day(&self, date: NaiveDate) -> Option<&WorkingDay> {
        self.working_days.get(&date)
    }

    pub fn get_day_mut(&mut self, date: NaiveDate) -> Option<&mut WorkingDay> {
        self.working_days.get_mut(&date)
    }

    /// All days, ordered by date.
    pub fn working_days(&self) -> &BTreeMap<NaiveDate, WorkingDay> {
        &self.working_days
    }

    pub fn set_working_days(&mut self, days: BTreeMap<NaiveDate, WorkingDay>) {
        self.working_days = days;
    }

    /// Flex balance in seconds over every recorded day.
    pub fn get_flex_time(&self, daily_working_hours: u32) -> i64 {
        flex::flex_time(self.working_days.values(), daily_working_hours)
    }

    /// Drop breaks below `min_seconds` on every day; returns how many were dropped.
    pub fn discard_short_breaks(&mut self, min_seconds: i64) -> usize {
        self.working_days
            .values_mut()
            .filter_map(|d| d.discard_short_break(min_seconds).then_some(()))
            .count()
    }

    pub fn record(&self) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: self.employee_id.clone(),
            vacation_days: self.amount_vacation_days,
            old_vacation_days: self.amount_old_vacation_days,
            on_break: self.on_break,
        }
    }

    pub fn apply_record(&mut self, record: &EmployeeRecord) {
        self.amount_vacation_days = record.vacation_days;
        self.amount_old_vacation_days = record.old_vacation_days;
        self.on_break = record.on_break;
    }
}

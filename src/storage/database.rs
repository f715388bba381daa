//! SQLite backend. Each call opens the database, works inside one
//! transaction and closes the connection again.

use super::{Backend, Days, SaveReport};
use crate::config::BackendKind;
use crate::db::models::TimesheetRow;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::EmployeeRecord;
use crate::utils::time::{DATE_FORMAT, parse_date};
use chrono::NaiveDate;
use rusqlite::{Connection, Transaction};
use std::collections::BTreeSet;
use std::path::PathBuf;

pub struct DatabaseBackend {
    path: PathBuf,
    /// Compare with the stored row before writing.
    reduced_traffic: bool,
}

impl DatabaseBackend {
    pub fn new(path: impl Into<PathBuf>, reduced_traffic: bool) -> Self {
        Self {
            path: path.into(),
            reduced_traffic,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Run `f` inside a transaction; commit on success, roll back on error.
    fn in_transaction<T>(&self, f: impl FnOnce(&Transaction<'_>) -> AppResult<T>) -> AppResult<T> {
        let mut pool = DbPool::new(&self.path)?;
        let tx = pool.conn.transaction()?;

        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rb) = tx.rollback() {
                    tracing::error!("rollback failed: {rb}");
                }
                Err(e)
            }
        }
    }

    fn write_days(&self, conn: &Connection, employee_id: &str, days: &Days) -> AppResult<SaveReport> {
        let mut report = SaveReport::default();
        let mut live = BTreeSet::new();

        for day in days.values().filter(|d| d.has_entry()) {
            live.insert(day.date());
            let row = TimesheetRow::from_day(employee_id, day);

            match queries::fetch_timesheet_row(conn, employee_id, &row.date)? {
                None => {
                    queries::insert_timesheet_row(conn, &row)?;
                    report.inserted += 1;
                }
                Some(stored) if self.reduced_traffic && stored.same_content(&row) => {
                    report.unchanged += 1;
                }
                Some(_) => {
                    queries::update_timesheet_row(conn, &row)?;
                    report.updated += 1;
                }
            }
        }

        for stored in queries::load_timesheet_dates(conn, employee_id)? {
            // rows with an unreadable date are never loaded, so leave them alone
            let Ok(date) = parse_date(&stored) else {
                continue;
            };
            if !live.contains(&date) {
                report.deleted += queries::delete_timesheet_row(conn, employee_id, &stored)?;
            }
        }

        Ok(report)
    }
}

impl Backend for DatabaseBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Database
    }

    fn load_working_days(&self, employee_id: &str) -> AppResult<Days> {
        let pool = DbPool::new(&self.path)?;
        let mut days = Days::new();

        for row in queries::load_timesheet(&pool.conn, employee_id)? {
            match row.to_day() {
                Ok(day) if day.has_entry() => {
                    days.insert(day.date(), day);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(employee_id, "skipping row: {e}"),
            }
        }

        tracing::info!(employee_id, days = days.len(), "loaded timesheet rows");
        Ok(days)
    }

    fn save_working_days(&self, employee_id: &str, days: &Days) -> AppResult<SaveReport> {
        let report = self.in_transaction(|tx| self.write_days(tx, employee_id, days))?;

        tracing::info!(employee_id, %report, "saved timesheet rows");
        Ok(report)
    }

    fn delete_day(&self, employee_id: &str, date: NaiveDate) -> AppResult<bool> {
        let key = date.format(DATE_FORMAT).to_string();
        self.in_transaction(|tx| Ok(queries::delete_timesheet_row(tx, employee_id, &key)? > 0))
    }

    fn load_employee(&self, employee_id: &str) -> AppResult<Option<EmployeeRecord>> {
        let pool = DbPool::new(&self.path)?;
        queries::load_employee(&pool.conn, employee_id)
    }

    fn save_employee(&self, record: &EmployeeRecord) -> AppResult<()> {
        let written =
            self.in_transaction(|tx| queries::upsert_employee(tx, record, self.reduced_traffic))?;
        if !written {
            tracing::debug!(employee_id = %record.employee_id, "employee row unchanged");
        }
        Ok(())
    }
}

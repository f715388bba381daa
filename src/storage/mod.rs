//! Persistence of working days and employee records.
//!
//! Both backends hold the same contract: after `save_working_days` the store
//! contains exactly the days that have an entry, one row per date.

pub mod database;
pub mod file;

use crate::config::{BackendKind, Config};
use crate::errors::AppResult;
use crate::models::{EmployeeRecord, WorkingDay};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

pub use database::DatabaseBackend;
pub use file::FileBackend;

pub type Days = BTreeMap<NaiveDate, WorkingDay>;

/// Row counts of one save.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub deleted: usize,
}

impl SaveReport {
    pub fn written(&self) -> usize {
        self.inserted + self.updated + self.deleted
    }
}

impl fmt::Display for SaveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inserted, {} updated, {} unchanged, {} deleted",
            self.inserted, self.updated, self.unchanged, self.deleted
        )
    }
}

pub trait Backend {
    fn kind(&self) -> BackendKind;

    fn load_working_days(&self, employee_id: &str) -> AppResult<Days>;

    /// Upsert every day with an entry and remove stored rows for the rest.
    fn save_working_days(&self, employee_id: &str, days: &Days) -> AppResult<SaveReport>;

    /// Remove one stored day. Returns false if there was nothing to remove.
    fn delete_day(&self, employee_id: &str, date: NaiveDate) -> AppResult<bool>;

    fn load_employee(&self, employee_id: &str) -> AppResult<Option<EmployeeRecord>>;

    fn save_employee(&self, record: &EmployeeRecord) -> AppResult<()>;
}

/// Backend selected by `cfg.backend`.
pub fn open_backend(cfg: &Config) -> Box<dyn Backend> {
    match cfg.backend {
        BackendKind::File => Box::new(FileBackend::new(cfg.data_dir_path())),
        BackendKind::Database => Box::new(DatabaseBackend::new(
            cfg.database_path(),
            cfg.reduced_database_traffic,
        )),
    }
}

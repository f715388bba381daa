//! Flat-file backend: one CSV per employee, rewritten from memory on save.
//!
//! `<data_dir>/timesheets/<employee_id>.csv` holds `Date,Start Time,End Time,Break Time,State`,
//! `<data_dir>/employees.csv` the vacation balances and open break marker.

use super::{Backend, Days, SaveReport};
use crate::config::BackendKind;
use crate::errors::{AppError, AppResult};
use crate::models::{DayState, EmployeeRecord, WorkingDay};
use crate::utils::path::employee_file;
use crate::utils::time::{
    DATE_FORMAT, TIME_FORMAT, format_timestamp, parse_break, parse_date, parse_datetime,
    parse_time,
};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

const TIMESHEET_HEADER: [&str; 5] = ["Date", "Start Time", "End Time", "Break Time", "State"];
const EMPLOYEES_HEADER: [&str; 4] = ["Employee Id", "Vacation Days", "Old Vacation Days", "On Break"];
const EMPLOYEES_FILE: &str = "employees.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DayRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Start Time", default)]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: String,
    #[serde(rename = "Break Time", default)]
    break_time: String,
    #[serde(rename = "State", default)]
    state: String,
}

impl DayRecord {
    fn from_day(day: &WorkingDay) -> Self {
        let hhmm = |t: Option<chrono::NaiveTime>| {
            t.map(|t| t.format(TIME_FORMAT).to_string())
                .unwrap_or_default()
        };
        Self {
            date: day.date().format(DATE_FORMAT).to_string(),
            start_time: hhmm(day.start_time),
            end_time: hhmm(day.end_time),
            break_time: day.break_time.map(|b| b.to_string()).unwrap_or_default(),
            state: day.state.to_db_str().to_string(),
        }
    }

    /// Unreadable fields are treated as absent; only the date is mandatory.
    fn to_day(&self) -> AppResult<WorkingDay> {
        let mut day = WorkingDay::new(parse_date(&self.date)?);

        day.start_time = parse_time(&self.start_time).unwrap_or_else(|e| {
            tracing::warn!(date = %self.date, "ignoring start time: {e}");
            None
        });
        day.end_time = parse_time(&self.end_time).unwrap_or_else(|e| {
            tracing::warn!(date = %self.date, "ignoring end time: {e}");
            None
        });
        day.break_time = parse_break(&self.break_time).unwrap_or_else(|e| {
            tracing::warn!(date = %self.date, "ignoring break time: {e}");
            None
        });
        day.state = self.state.parse().unwrap_or_else(|e| {
            tracing::warn!(date = %self.date, "{e}, using default");
            DayState::Default
        });

        Ok(day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct EmployeeRow {
    #[serde(rename = "Employee Id")]
    employee_id: String,
    #[serde(rename = "Vacation Days")]
    vacation_days: i32,
    #[serde(rename = "Old Vacation Days")]
    old_vacation_days: i32,
    #[serde(rename = "On Break", default)]
    on_break: String,
}

impl From<&EmployeeRecord> for EmployeeRow {
    fn from(r: &EmployeeRecord) -> Self {
        Self {
            employee_id: r.employee_id.clone(),
            vacation_days: r.vacation_days,
            old_vacation_days: r.old_vacation_days,
            on_break: r.on_break.map(format_timestamp).unwrap_or_default(),
        }
    }
}

impl From<EmployeeRow> for EmployeeRecord {
    fn from(r: EmployeeRow) -> Self {
        let on_break = match r.on_break.trim() {
            "" => None,
            s => parse_datetime(s)
                .inspect_err(|e| tracing::warn!(employee_id = %r.employee_id, "dropping break marker: {e}"))
                .ok(),
        };
        Self {
            employee_id: r.employee_id,
            vacation_days: r.vacation_days,
            old_vacation_days: r.old_vacation_days,
            on_break,
        }
    }
}

/// Read all rows, or `None` when the file does not exist yet.
fn read_rows<T: DeserializeOwned>(path: &Path) -> AppResult<Option<Vec<T>>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for row in rdr.deserialize() {
        out.push(row?);
    }
    Ok(Some(out))
}

/// Replace `path` with `header` + `rows`, via a temporary file in the same directory.
fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> AppResult<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let tmp = path.with_extension("csv.tmp");
    {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)?;
        wtr.write_record(header)?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        AppError::Storage(format!("cannot replace {}: {e}", path.display()))
    })
}

pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn timesheet_path(&self, employee_id: &str) -> PathBuf {
        employee_file(&self.data_dir, employee_id)
    }

    fn employees_path(&self) -> PathBuf {
        self.data_dir.join(EMPLOYEES_FILE)
    }

    fn read_day_records(&self, employee_id: &str) -> AppResult<BTreeMap<String, DayRecord>> {
        let rows: Vec<DayRecord> =
            read_rows(&self.timesheet_path(employee_id))?.unwrap_or_default();
        Ok(rows.into_iter().map(|r| (r.date.clone(), r)).collect())
    }
}

impl Backend for FileBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::File
    }

    fn load_working_days(&self, employee_id: &str) -> AppResult<Days> {
        let mut days = Days::new();

        for record in self.read_day_records(employee_id)?.values() {
            match record.to_day() {
                Ok(day) if day.has_entry() => {
                    days.insert(day.date(), day);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(employee_id, "skipping row: {e}"),
            }
        }

        tracing::info!(employee_id, days = days.len(), "loaded timesheet file");
        Ok(days)
    }

    fn save_working_days(&self, employee_id: &str, days: &Days) -> AppResult<SaveReport> {
        let path = self.timesheet_path(employee_id);

        let mut previous = self.read_day_records(employee_id)?;

        let mut report = SaveReport::default();
        let mut rows = Vec::new();
        for day in days.values().filter(|d| d.has_entry()) {
            let record = DayRecord::from_day(day);
            match previous.remove(&record.date) {
                Some(old) if old == record => report.unchanged += 1,
                Some(_) => report.updated += 1,
                None => report.inserted += 1,
            }
            rows.push(record);
        }
        report.deleted = previous.len();

        if report.written() == 0 && path.exists() {
            tracing::debug!(employee_id, "timesheet file unchanged");
            return Ok(report);
        }

        write_rows(&path, &TIMESHEET_HEADER, &rows)?;
        tracing::info!(employee_id, %report, "saved timesheet file");
        Ok(report)
    }

    fn delete_day(&self, employee_id: &str, date: NaiveDate) -> AppResult<bool> {
        let mut records = self.read_day_records(employee_id)?;
        if records.remove(&date.format(DATE_FORMAT).to_string()).is_none() {
            return Ok(false);
        }

        let rows: Vec<DayRecord> = records.into_values().collect();
        write_rows(&self.timesheet_path(employee_id), &TIMESHEET_HEADER, &rows)?;
        Ok(true)
    }

    fn load_employee(&self, employee_id: &str) -> AppResult<Option<EmployeeRecord>> {
        let rows: Vec<EmployeeRow> = read_rows(&self.employees_path())?.unwrap_or_default();
        Ok(rows
            .into_iter()
            .find(|r| r.employee_id == employee_id)
            .map(EmployeeRecord::from))
    }

    fn save_employee(&self, record: &EmployeeRecord) -> AppResult<()> {
        let path = self.employees_path();
        let mut rows: BTreeMap<String, EmployeeRow> = read_rows::<EmployeeRow>(&path)?
            .unwrap_or_default()
            .into_iter()
            .map(|r| (r.employee_id.clone(), r))
            .collect();

        let row = EmployeeRow::from(record);
        if rows.get(&row.employee_id) == Some(&row) {
            return Ok(());
        }
        rows.insert(row.employee_id.clone(), row);

        let rows: Vec<EmployeeRow> = rows.into_values().collect();
        write_rows(&path, &EMPLOYEES_HEADER, &rows)
    }
}

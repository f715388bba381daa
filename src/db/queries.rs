use crate::db::models::TimesheetRow;
use crate::errors::{AppError, AppResult};
use crate::models::EmployeeRecord;
use crate::utils::time::{format_timestamp, parse_datetime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<TimesheetRow> {
    Ok(TimesheetRow {
        employee_id: row.get("employee_id")?,
        date: row.get("date")?,
        starttime: row.get("starttime")?,
        endtime: row.get("endtime")?,
        workhours: row.get("workhours")?,
        breaktime: row.get("breaktime")?,
        state: row
            .get::<_, Option<String>>("state")?
            .unwrap_or_else(|| "default".to_string()),
    })
}

/// All timesheet rows of one employee, oldest first.
pub fn load_timesheet(conn: &Connection, employee_id: &str) -> AppResult<Vec<TimesheetRow>> {
    let mut stmt = conn.prepare(
        "SELECT employee_id, date, starttime, endtime, workhours, breaktime, state
         FROM timesheet
         WHERE employee_id = ?1
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map([employee_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn fetch_timesheet_row(
    conn: &Connection,
    employee_id: &str,
    date: &str,
) -> AppResult<Option<TimesheetRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT employee_id, date, starttime, endtime, workhours, breaktime, state
         FROM timesheet
         WHERE employee_id = ?1 AND date = ?2",
    )?;
    Ok(stmt.query_row([employee_id, date], map_row).optional()?)
}

pub fn insert_timesheet_row(conn: &Connection, row: &TimesheetRow) -> AppResult<()> {
    conn.execute(
        "INSERT INTO timesheet (employee_id, date, starttime, endtime, workhours, breaktime, state)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            row.employee_id,
            row.date,
            row.starttime,
            row.endtime,
            row.workhours,
            row.breaktime,
            row.state,
        ],
    )?;
    Ok(())
}

/// Update every column except the (employee_id, date) key.
pub fn update_timesheet_row(conn: &Connection, row: &TimesheetRow) -> AppResult<()> {
    conn.execute(
        "UPDATE timesheet
         SET starttime = ?1, endtime = ?2, workhours = ?3,
             breaktime = ?4, state = ?5
         WHERE employee_id = ?6 AND date = ?7",
        params![
            row.starttime,
            row.endtime,
            row.workhours,
            row.breaktime,
            row.state,
            row.employee_id,
            row.date,
        ],
    )?;
    Ok(())
}

/// Returns the number of rows removed (0 or 1).
pub fn delete_timesheet_row(conn: &Connection, employee_id: &str, date: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM timesheet WHERE employee_id = ?1 AND date = ?2",
        [employee_id, date],
    )?)
}

pub fn load_timesheet_dates(conn: &Connection, employee_id: &str) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT date FROM timesheet WHERE employee_id = ?1")?;
    let rows = stmt.query_map([employee_id], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_employee(conn: &Connection, employee_id: &str) -> AppResult<Option<EmployeeRecord>> {
    let mut stmt = conn.prepare(
        "SELECT employee_id, vacation_days, old_vacation_days, on_break
         FROM employees
         WHERE employee_id = ?1",
    )?;

    let raw = stmt
        .query_row([employee_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<i32>>(1)?,
                row.get::<_, Option<i32>>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })
        .optional()?;

    let Some((employee_id, vacation, old_vacation, on_break)) = raw else {
        return Ok(None);
    };

    let on_break = match on_break.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => match parse_datetime(s) {
            Ok(dt) => Some(dt),
            Err(e) => {
                tracing::warn!(employee_id = %employee_id, "dropping unreadable break marker: {e}");
                None
            }
        },
        None => None,
    };

    Ok(Some(EmployeeRecord {
        employee_id,
        vacation_days: vacation.unwrap_or(0),
        old_vacation_days: old_vacation.unwrap_or(0),
        on_break,
    }))
}

/// Insert or update an employee row. Returns false when the stored row
/// already matched and `skip_unchanged` avoided the write.
pub fn upsert_employee(
    conn: &Connection,
    record: &EmployeeRecord,
    skip_unchanged: bool,
) -> AppResult<bool> {
    if skip_unchanged && load_employee(conn, &record.employee_id)?.as_ref() == Some(record) {
        return Ok(false);
    }

    conn.execute(
        "INSERT INTO employees (employee_id, vacation_days, old_vacation_days, on_break)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(employee_id) DO UPDATE SET
             vacation_days = excluded.vacation_days,
             old_vacation_days = excluded.old_vacation_days,
             on_break = excluded.on_break",
        params![
            record.employee_id,
            record.vacation_days,
            record.old_vacation_days,
            record.on_break.map(format_timestamp),
        ],
    )
    .map_err(|e| AppError::Storage(format!("Failed to store employee {}: {e}", record.employee_id)))?;

    Ok(true)
}

//! Schema creation and upgrades for the relational backend.
//!
//! Tables are created when missing. Every later change is a named migration
//! recorded in the `log` table so it runs once per database.

use crate::db::log::{migration_applied, ttlog};
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Base tables, same layout the desktop client created.
fn create_base_tables(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS timesheet (
            employee_id TEXT,
            date        DATE,
            starttime   DATETIME,
            endtime     DATETIME,
            workhours   REAL,
            breaktime   REAL,
            state       TEXT
        );

        CREATE TABLE IF NOT EXISTS employees (
            employee_id       TEXT PRIMARY KEY,
            vacation_days     INTEGER,
            old_vacation_days INTEGER
        );
        "#,
    )?;
    Ok(())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    ttlog(conn, "migration_applied", version, message)?;
    tracing::info!(version, "{message}");
    Ok(())
}

/// One row per (employee, date): drop older duplicates, then enforce it.
fn migrate_unique_timesheet_key(conn: &Connection) -> AppResult<()> {
    let version = "20241120_0001_unique_timesheet_key";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        r#"
        DELETE FROM timesheet
        WHERE rowid NOT IN (
            SELECT MAX(rowid) FROM timesheet GROUP BY employee_id, date
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_timesheet_employee_date
            ON timesheet(employee_id, date);
        "#,
    )?;
    mark_applied(&tx, version, "Added unique (employee_id, date) index to timesheet")?;
    tx.commit()?;
    Ok(())
}

/// Persist the open break marker next to the vacation balances.
fn migrate_add_on_break(conn: &Connection) -> AppResult<()> {
    let version = "20241128_0002_employees_on_break";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !column_exists(conn, "employees", "on_break")? {
        conn.execute("ALTER TABLE employees ADD COLUMN on_break TEXT", [])
            .map_err(|e| AppError::Migration(format!("Failed to add 'on_break' column: {e}")))?;
    }

    mark_applied(conn, version, "Added on_break to employees")
}

/// Public entry point: create missing tables and run pending migrations.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let fresh = !table_exists(conn, "timesheet")?;
    create_base_tables(conn)?;
    if fresh {
        ttlog(conn, "init", "timesheet", "Created timesheet and employees tables")?;
    }

    migrate_unique_timesheet_key(conn)?;
    migrate_add_on_break(conn)?;

    Ok(())
}

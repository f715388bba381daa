use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

/// Write an internal log line into the `log` table.
///
/// Only schema and maintenance operations are logged here; day edits are not.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Has the migration `version` already been recorded?
pub fn migration_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(stmt.query_row([version], |_| Ok(())).optional()?.is_some())
}

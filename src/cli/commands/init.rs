use crate::cli::config_path;
use crate::cli::parser::Cli;
use crate::config::{BackendKind, Config};
use crate::core::Timesheet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::fs;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (kept if it already exists)
///  - the data directory or the SQLite schema, depending on the backend
///  - the employee record
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let path = config_path(cli);

    if path.exists() {
        info(format!("Config file : {} (kept)", path.display()));
    } else {
        cfg.save(&path)?;
        success(format!("Config file : {}", path.display()));
    }

    match cfg.backend {
        BackendKind::File => {
            let dir = cfg.data_dir_path();
            fs::create_dir_all(&dir)?;
            info(format!("Data dir    : {}", dir.display()));
        }
        BackendKind::Database => {
            let db = cfg.database_path();
            DbPool::new(&db)?;
            info(format!("Database    : {}", db.display()));
        }
    }

    let sheet = Timesheet::open(cfg.clone())?;
    success(format!(
        "Employee '{}' ready ({} vacation days left)",
        sheet.employee().employee_id(),
        sheet.employee().amount_vacation_days + sheet.employee().amount_old_vacation_days
    ));
    Ok(())
}

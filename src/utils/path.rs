//! Path utilities: expand ~ and build per-employee storage paths.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        if path == "~" {
            return home;
        }
        if let Some(rest) = path.strip_prefix("~/") {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Timesheets live one level below the data dir, apart from `employees.csv`.
pub const TIMESHEETS_DIR: &str = "timesheets";

/// `<data_dir>/timesheets/<employee_id>.csv`, with path separators in the id replaced.
pub fn employee_file(data_dir: &Path, employee_id: &str) -> PathBuf {
    let safe: String = employee_id
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    data_dir.join(TIMESHEETS_DIR).join(format!("{safe}.csv"))
}

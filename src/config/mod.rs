use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where working days are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One CSV file per employee
    #[default]
    File,
    /// Shared SQLite database
    Database,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::File => "file",
            BackendKind::Database => "database",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_employee_id")]
    pub employee_id: String,
    #[serde(default = "default_daily_working_hours")]
    pub daily_working_hours: u32,
    /// Breaks shorter than this are dropped on save.
    #[serde(default = "default_min_break_seconds")]
    pub min_break_seconds: i64,
    /// Compare against the stored row and skip unchanged writes.
    #[serde(default = "default_true")]
    pub reduced_database_traffic: bool,
    #[serde(default = "default_vacation_days")]
    pub default_vacation_days: i32,
}

fn default_data_dir() -> String {
    Config::config_dir().join("data").to_string_lossy().to_string()
}
fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_employee_id() -> String {
    "default".to_string()
}
fn default_daily_working_hours() -> u32 {
    8
}
fn default_min_break_seconds() -> i64 {
    60
}
fn default_true() -> bool {
    true
}
fn default_vacation_days() -> i32 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: default_data_dir(),
            database: default_database(),
            employee_id: default_employee_id(),
            daily_working_hours: default_daily_working_hours(),
            min_break_seconds: default_min_break_seconds(),
            reduced_database_traffic: default_true(),
            default_vacation_days: default_vacation_days(),
        }
    }
}

impl Config {
    /// `~/.flexsheet`, or `./.flexsheet` when no home directory is known.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".flexsheet")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("flexsheet.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("flexsheet.sqlite")
    }

    /// Load configuration from `path`, or return defaults if it does not exist.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn data_dir_path(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }
}

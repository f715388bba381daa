#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use flexsheet::config::{BackendKind, Config};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn fx() -> Command {
    cargo_bin_cmd!("flexsheet")
}

/// A fresh directory under the system temp dir holding config, CSV files and DB.
pub struct Sandbox {
    pub root: PathBuf,
}

impl Sandbox {
    pub fn new(name: &str) -> Self {
        let mut root: PathBuf = env::temp_dir();
        root.push(format!("{name}_flexsheet"));
        fs::remove_dir_all(&root).ok();
        fs::create_dir_all(&root).expect("create sandbox");
        Self { root }
    }

    pub fn config_file(&self) -> String {
        self.root.join("flexsheet.conf").to_string_lossy().to_string()
    }

    pub fn data_dir(&self) -> String {
        self.root.join("data").to_string_lossy().to_string()
    }

    pub fn db_file(&self) -> String {
        self.root.join("flexsheet.sqlite").to_string_lossy().to_string()
    }

    /// Config pointing every path into the sandbox.
    pub fn config(&self, backend: BackendKind) -> Config {
        Config {
            backend,
            data_dir: self.data_dir(),
            database: self.db_file(),
            employee_id: "e1".to_string(),
            ..Config::default()
        }
    }

    /// Global CLI flags pointing every path into the sandbox.
    pub fn args(&self, backend: &str) -> Vec<String> {
        vec![
            "--config".into(),
            self.config_file(),
            "--data-dir".into(),
            self.data_dir(),
            "--db".into(),
            self.db_file(),
            "--backend".into(),
            backend.into(),
            "--employee".into(),
            "e1".into(),
        ]
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    date(y, mo, d).and_hms_opt(h, mi, s).expect("valid timestamp")
}

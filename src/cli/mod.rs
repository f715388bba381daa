pub mod commands;
pub mod parser;

use crate::config::Config;
use crate::errors::AppResult;
use parser::Cli;
use std::path::PathBuf;

/// Config file named on the command line, or the default location.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(Config::config_file)
}

/// Load the config file and apply the global command-line overrides.
pub fn load_config(cli: &Cli) -> AppResult<Config> {
    let mut cfg = Config::load(&config_path(cli))?;

    if let Some(id) = &cli.employee {
        cfg.employee_id = id.clone();
    }
    if let Some(dir) = &cli.data_dir {
        cfg.data_dir = dir.clone();
    }
    if let Some(db) = &cli.db {
        cfg.database = db.clone();
    }
    if let Some(backend) = cli.backend {
        cfg.backend = backend;
    }

    Ok(cfg)
}

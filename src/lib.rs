//! flexsheet library root.
//! Exposes the timesheet core, both storage backends and the CLI dispatcher.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod storage;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli, cfg),
        Commands::Config { .. } => commands::config::handle(cli, cfg),
        Commands::Work => commands::work::handle(cfg),
        Commands::Break => commands::breaks::handle(cfg),
        Commands::Status => commands::status::handle(cfg),
        Commands::Set { .. } => commands::set::handle(&cli.command, cfg),
        Commands::Clear { date } => commands::clear::handle(date, cfg),
        Commands::Vacation { date } => commands::vacation::handle(date, cfg),
        Commands::Show { month } => commands::show::handle(month.as_deref(), cfg),
        Commands::Flex { until } => commands::flex::handle(until.as_deref(), cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let cfg = cli::load_config(&cli)?;
    tracing::debug!(backend = cfg.backend.as_str(), employee_id = %cfg.employee_id, "config loaded");
    dispatch(&cli, &cfg)
}

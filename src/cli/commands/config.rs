use crate::cli::config_path;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Handle the `config` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Config { print_config } = &cli.command else {
        return Ok(());
    };

    if *print_config {
        print!("{}", cfg.to_yaml()?);
    } else {
        info(format!("Config file: {}", config_path(cli).display()));
        info("Use --print to show the effective configuration");
    }
    Ok(())
}

use crate::config::BackendKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for flexsheet
#[derive(Parser)]
#[command(
    name = "flexsheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track daily work sessions, breaks and the resulting flex-time balance",
    long_about = None
)]
pub struct Cli {
    /// Use this config file instead of ~/.flexsheet/flexsheet.conf
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Employee to act on (overrides `employee_id` from the config)
    #[arg(global = true, long = "employee", short = 'e', value_name = "ID")]
    pub employee: Option<String>,

    /// Directory holding the per-employee CSV files
    #[arg(global = true, long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<String>,

    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db", value_name = "FILE")]
    pub db: Option<String>,

    /// Storage backend to use
    #[arg(global = true, long = "backend", value_enum)]
    pub backend: Option<BackendKind>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the configuration file and prepare the storage
    Init,

    /// Log a start time, or an end time once work has started
    Work,

    /// Start a break, or end the one in progress
    Break,

    /// Show today's session
    Status,

    /// Edit a day; fields not given are left alone, an empty value clears one
    Set {
        /// Date of the day (YYYY-MM-DD or "today")
        date: String,

        #[arg(long, value_name = "HH:MM", help = "Start time")]
        start: Option<String>,

        #[arg(long, value_name = "HH:MM", help = "End time")]
        end: Option<String>,

        #[arg(
            long = "break",
            value_name = "SECONDS|HH:MM",
            help = "Total break, in seconds or HH:MM"
        )]
        break_time: Option<String>,

        #[arg(long, value_name = "STATE", help = "default, sick or vacation")]
        state: Option<String>,
    },

    /// Reset a day and remove it from storage
    Clear {
        /// Date of the day (YYYY-MM-DD or "today")
        date: String,
    },

    /// Book a vacation day
    Vacation {
        /// Date of the day (YYYY-MM-DD or "today")
        date: String,
    },

    /// List recorded days
    Show {
        #[arg(long, value_name = "YYYY-MM", help = "Only days of this month")]
        month: Option<String>,
    },

    /// Print the flex-time balance
    Flex {
        #[arg(long, value_name = "DATE", help = "Balance as of this day (inclusive)")]
        until: Option<String>,
    },

    /// Show the effective configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,
    },
}

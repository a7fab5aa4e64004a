//! Command-line interface definitions.

pub mod check;
pub mod list;
pub mod output;
pub mod solve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// orlab - classroom linear and integer programming models, solved with HiGHS.
#[derive(Parser, Debug)]
#[command(name = "orlab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available scenarios
    List,

    /// Solve a scenario and print the optimum
    Solve(SolveArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Arguments for the `solve` subcommand.
#[derive(Parser, Debug)]
pub struct SolveArgs {
    /// Scenario name, as shown by `orlab list`
    #[arg(required_unless_present = "all")]
    pub scenario: Option<String>,

    /// Solve every scenario in the catalog
    #[arg(long, conflicts_with = "scenario")]
    pub all: bool,

    /// Override the coefficient sheet directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Subcommands for `orlab check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Solve a tiny known LP to verify the solver backend
    Solver,
    /// Load and echo a scenario's coefficient sheet without solving
    Data(DataArgs),
}

/// Arguments for the `check data` subcommand.
#[derive(Parser, Debug)]
pub struct DataArgs {
    /// Scenario name, as shown by `orlab list`
    pub scenario: String,

    /// Override the coefficient sheet directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

use clap::Parser;
use tracing::debug;

use orlab::cli::{check, list, output, solve, Cli, CheckCommand, Commands};
use orlab::config::Config;

fn main() {
    let cli = Cli::parse();

    let mut config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            output::error(&format!("failed to load config: {e}"));
            std::process::exit(1);
        }
    };

    // Command-line flags win over the config file.
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }

    config.init_logging();
    debug!(config = %cli.config.display(), "starting");

    let result = match &cli.command {
        Commands::List => list::execute(),
        Commands::Solve(args) => solve::execute(args, &config),
        Commands::Check(CheckCommand::Solver) => check::execute_solver(),
        Commands::Check(CheckCommand::Data(args)) => check::execute_data(args, &config),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

//! Solve scenarios and print their reports.

use tabled::builder::Builder;
use tracing::info;

use crate::cli::{output, SolveArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{self, Report, RunContext, Section};

pub fn execute(args: &SolveArgs, config: &Config) -> Result<()> {
    let solver = crate::solver::HighsSolver::new();
    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.dir.clone());
    let ctx = RunContext {
        solver: &solver,
        data_dir: &data_dir,
        report: &config.report,
    };

    output::header(env!("CARGO_PKG_VERSION"));

    if args.all {
        for scenario in model::catalog() {
            info!(scenario = scenario.name(), "solving");
            render(&scenario.run(&ctx)?);
        }
        return Ok(());
    }

    // clap guarantees a name when --all is absent.
    if let Some(name) = args.scenario.as_deref() {
        let scenario =
            model::find(name).ok_or_else(|| Error::UnknownScenario(name.to_string()))?;
        info!(scenario = scenario.name(), "solving");
        render(&scenario.run(&ctx)?);
    }

    Ok(())
}

/// Print a report, one block per section.
pub(crate) fn render(report: &Report) {
    output::section(report.scenario);

    if let Some((label, value)) = report.objective {
        output::key_value(label, output::highlight(model::fmt_value(value)));
    }

    for section in &report.sections {
        match section {
            Section::KeyValues(pairs) => {
                for (label, value) in pairs {
                    output::key_value(label, value);
                }
            }
            Section::Table { header, rows } => {
                let mut builder = Builder::default();
                builder.push_record(header.clone());
                for row in rows {
                    builder.push_record(row.clone());
                }
                println!();
                for line in builder.build().to_string().lines() {
                    println!("  {line}");
                }
            }
            Section::Lines(lines) => {
                println!();
                for line in lines {
                    println!("  {line}");
                }
            }
        }
    }

    println!();
}

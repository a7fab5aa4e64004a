//! Scenario listing.

use tabled::{Table, Tabled};

use crate::cli::output;
use crate::error::Result;
use crate::model;

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Data")]
    source: String,
    #[tabled(rename = "Description")]
    summary: &'static str,
}

/// List the scenario catalog.
pub fn execute() -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Available scenarios");
    println!();

    let rows: Vec<ScenarioRow> = model::catalog()
        .iter()
        .map(|scenario| ScenarioRow {
            name: scenario.name(),
            kind: scenario.kind().to_string(),
            source: scenario.source().to_string(),
            summary: scenario.summary(),
        })
        .collect();

    let table = Table::new(rows).to_string();
    for line in table.lines() {
        println!("  {line}");
    }

    println!();
    println!(
        "  Run {} to solve one",
        output::highlight("orlab solve <name>")
    );
    println!();

    Ok(())
}

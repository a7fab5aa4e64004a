//! The classroom models, one module per formulation.
//!
//! Each scenario owns its input data (baked lecture constants, or a
//! coefficient sheet read through fixed cell ranges), builds one
//! [`Problem`](crate::solver::Problem), hands it to the solver and interprets
//! the optimal values into a [`Report`]. Scenarios are registered in
//! [`catalog`] and looked up by name from the CLI.

pub mod assignment;
pub mod capital_budgeting;
pub mod crew_scheduling;
pub mod facility_planning;
pub mod fixed_charge;
pub mod matching;
pub mod pollution;
pub mod product_mix;
pub mod transportation;

use std::fmt;
use std::path::Path;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::solver::Solver;

/// Problem class, for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Continuous variables only.
    Lp,
    /// All variables 0/1.
    Bip,
    /// Continuous and integer variables mixed.
    Mip,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Lp => write!(f, "LP"),
            ModelKind::Bip => write!(f, "BIP"),
            ModelKind::Mip => write!(f, "MIP"),
        }
    }
}

/// Where a scenario's coefficients come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Constants baked into the module.
    Baked,
    /// A coefficient sheet under the data directory.
    Sheet(&'static str),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Baked => write!(f, "baked-in"),
            DataSource::Sheet(file) => write!(f, "{file}"),
        }
    }
}

/// Everything a scenario needs to run.
pub struct RunContext<'a> {
    pub solver: &'a dyn Solver,
    pub data_dir: &'a Path,
    pub report: &'a ReportConfig,
}

/// A solved scenario, ready for printing.
#[derive(Debug, Clone)]
pub struct Report {
    pub scenario: &'static str,
    /// Objective label and optimal value; absent for data echoes.
    pub objective: Option<(&'static str, f64)>,
    pub sections: Vec<Section>,
}

/// One block of report output.
#[derive(Debug, Clone)]
pub enum Section {
    KeyValues(Vec<(String, String)>),
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Lines(Vec<String>),
}

impl Report {
    pub fn new(scenario: &'static str, objective_label: &'static str, objective: f64) -> Self {
        Self {
            scenario,
            objective: Some((objective_label, objective)),
            sections: Vec::new(),
        }
    }

    /// A report with no objective, for `check data` echoes.
    pub fn data(scenario: &'static str) -> Self {
        Self {
            scenario,
            objective: None,
            sections: Vec::new(),
        }
    }

    pub fn with_key_values(
        mut self,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.sections
            .push(Section::KeyValues(pairs.into_iter().collect()));
        self
    }

    pub fn with_table(mut self, header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        self.sections.push(Section::Table { header, rows });
        self
    }

    pub fn with_lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.sections.push(Section::Lines(lines.into_iter().collect()));
        self
    }
}

/// A self-contained optimization exercise.
pub trait Scenario {
    /// CLI name, kebab-case.
    fn name(&self) -> &'static str;

    fn kind(&self) -> ModelKind;

    /// One-line description for listings.
    fn summary(&self) -> &'static str;

    fn source(&self) -> DataSource;

    /// Build the model, solve it and interpret the optimum.
    fn run(&self, ctx: &RunContext<'_>) -> Result<Report>;

    /// For sheet-driven scenarios: load and echo the coefficients without
    /// solving, for `orlab check data`.
    fn data_report(&self, _data_dir: &Path) -> Result<Option<Report>> {
        Ok(None)
    }
}

/// All registered scenarios, in course order.
pub fn catalog() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(product_mix::ProductMix),
        Box::new(facility_planning::FacilityPlanning),
        Box::new(assignment::Assignment),
        Box::new(crew_scheduling::CrewScheduling),
        Box::new(capital_budgeting::CapitalBudgeting),
        Box::new(capital_budgeting::CapitalBudgetingBonus),
        Box::new(pollution::PollutionAbatement),
        Box::new(fixed_charge::FixedChargeTransport),
        Box::new(transportation::Transportation),
        Box::new(matching::Matching),
    ]
}

/// Look a scenario up by its CLI name.
pub fn find(name: &str) -> Option<Box<dyn Scenario>> {
    catalog().into_iter().find(|s| s.name() == name)
}

/// Format a solved value the way the course sheets do: up to four decimal
/// places, trailing zeros trimmed.
pub fn fmt_value(value: f64) -> String {
    let mut text = format!("{value:.4}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    // Normalize negative zero from tiny float noise.
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Yes/no rendering for binary decisions.
pub fn fmt_decision(selected: bool) -> String {
    if selected { "yes" } else { "no" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_are_unique() {
        let names: Vec<_> = catalog().iter().map(|s| s.name()).collect();
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }

    #[test]
    fn find_is_by_cli_name() {
        assert!(find("product-mix").is_some());
        assert!(find("no-such-model").is_none());
    }

    #[test]
    fn value_formatting() {
        assert_eq!(fmt_value(36.0), "36");
        assert_eq!(fmt_value(20300.25), "20300.25");
        assert_eq!(fmt_value(0.12345), "0.1235");
        assert_eq!(fmt_value(-0.000001), "0");
    }
}

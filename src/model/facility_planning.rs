//! California Manufacturing: four yes/no build decisions (a factory and a
//! warehouse in each of two cities) under a capital budget, with the logic
//! constraints that a warehouse needs its city's factory and at most one
//! warehouse is built.

use crate::error::Result;
use crate::solver::{Constraint, Problem, Sense, Solver, Variable};

use super::{DataSource, ModelKind, Report, RunContext, Scenario};

#[derive(Debug, Clone)]
pub struct Decision {
    pub label: &'static str,
    /// Net present value if built, $M.
    pub npv: f64,
    /// Capital required, $M.
    pub capital: f64,
}

#[derive(Debug, Clone)]
pub struct Data {
    /// Ordered: LA factory, SF factory, LA warehouse, SF warehouse.
    pub decisions: Vec<Decision>,
    pub budget: f64,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            decisions: vec![
                Decision { label: "factory in Los Angeles", npv: 9.0, capital: 6.0 },
                Decision { label: "factory in San Francisco", npv: 5.0, capital: 3.0 },
                Decision { label: "warehouse in Los Angeles", npv: 6.0, capital: 5.0 },
                Decision { label: "warehouse in San Francisco", npv: 4.0, capital: 2.0 },
            ],
            budget: 10.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    /// Build flags in the same order as [`Data::decisions`].
    pub build: Vec<bool>,
    pub total_npv: f64,
    pub capital_used: f64,
}

pub fn solve(solver: &dyn Solver, data: &Data) -> Result<Outcome> {
    let mut problem = Problem::new("California Manufacturing", Sense::Maximize);

    let x: Vec<_> = data
        .decisions
        .iter()
        .map(|d| problem.add_variable(Variable::binary(d.label)))
        .collect();

    problem.set_objective(x.iter().zip(&data.decisions).map(|(&v, d)| (v, d.npv)));

    problem.add_constraint(Constraint::le(
        "capital",
        x.iter().zip(&data.decisions).map(|(&v, d)| (v, d.capital)),
        data.budget,
    ));

    // A warehouse can be built only if its city has a factory.
    problem.add_constraint(Constraint::le("la_warehouse_needs_factory", [(x[2], 1.0), (x[0], -1.0)], 0.0));
    problem.add_constraint(Constraint::le("sf_warehouse_needs_factory", [(x[3], 1.0), (x[1], -1.0)], 0.0));

    // At most one warehouse overall.
    problem.add_constraint(Constraint::le("at_most_one_warehouse", [(x[2], 1.0), (x[3], 1.0)], 1.0));

    let solution = solver.solve(&problem)?;

    let build: Vec<bool> = x.iter().map(|&v| solution.is_selected(v)).collect();
    let capital_used = build
        .iter()
        .zip(&data.decisions)
        .filter(|(built, _)| **built)
        .map(|(_, d)| d.capital)
        .sum();

    Ok(Outcome {
        build,
        total_npv: solution.objective(),
        capital_used,
    })
}

pub struct FacilityPlanning;

impl Scenario for FacilityPlanning {
    fn name(&self) -> &'static str {
        "facility-planning"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Bip
    }

    fn summary(&self) -> &'static str {
        "California Mfg: which factories/warehouses to build under a capital budget"
    }

    fn source(&self) -> DataSource {
        DataSource::Baked
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<Report> {
        let data = Data::default();
        let outcome = solve(ctx.solver, &data)?;

        let rows = data
            .decisions
            .iter()
            .zip(&outcome.build)
            .map(|(d, &built)| {
                vec![
                    d.label.to_string(),
                    super::fmt_decision(built),
                    super::fmt_value(d.npv),
                    super::fmt_value(d.capital),
                ]
            })
            .collect();

        Ok(Report::new(self.name(), "total NPV ($M)", outcome.total_npv)
            .with_table(
                vec![
                    "decision".into(),
                    "build".into(),
                    "NPV ($M)".into(),
                    "capital ($M)".into(),
                ],
                rows,
            )
            .with_key_values([(
                "capital used ($M)".to_string(),
                format!(
                    "{} of {}",
                    super::fmt_value(outcome.capital_used),
                    super::fmt_value(data.budget)
                ),
            )]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::HighsSolver;

    #[test]
    fn builds_both_factories_and_no_warehouse() {
        let outcome = solve(&HighsSolver::new(), &Data::default()).unwrap();
        assert_eq!(outcome.build, vec![true, true, false, false]);
        assert!((outcome.total_npv - 14.0).abs() < 1e-6);
        assert!((outcome.capital_used - 9.0).abs() < 1e-6);
    }

    #[test]
    fn warehouse_worth_building_once_budget_allows() {
        // With a looser budget the SF warehouse pays off, but only one
        // warehouse may be built.
        let data = Data {
            budget: 16.0,
            ..Data::default()
        };
        let outcome = solve(&HighsSolver::new(), &data).unwrap();
        assert!(outcome.build[0] && outcome.build[1]);
        assert!(!(outcome.build[2] && outcome.build[3]));
        assert!((outcome.total_npv - 20.0).abs() < 1e-6);
    }
}

//! Diagnostic checks.

use crate::cli::{output, DataArgs};
use crate::config::Config;
use crate::error::{Error, Result, SolveError};
use crate::model;
use crate::solver::{Constraint, HighsSolver, Problem, Sense, Solver, Variable};

/// Solve a two-variable LP with a known optimum to verify the backend.
pub fn execute_solver() -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Solver backend");

    let solver = HighsSolver::new();
    output::note(&format!("backend: {}", solver.name()));

    let mut problem = Problem::new("diagnostic", Sense::Maximize);
    let x = problem.add_variable(Variable::continuous("x").with_bounds(0.0, 4.0));
    let y = problem.add_variable(Variable::continuous("y").with_bounds(0.0, 6.0));
    problem.add_constraint(Constraint::le("shared", [(x, 3.0), (y, 2.0)], 18.0));
    problem.set_objective([(x, 3.0), (y, 5.0)]);

    let solution = solver.solve(&problem)?;
    let objective = solution.objective();

    if (objective - 36.0).abs() < 1e-6 {
        output::ok("solver returned the expected optimum (36)");
        Ok(())
    } else {
        output::error(&format!("solver returned {objective}, expected 36"));
        Err(SolveError::Backend {
            problem: "diagnostic".to_string(),
            reason: format!("optimum {objective} does not match the known value 36"),
        }
        .into())
    }
}

/// Load a scenario's coefficient sheet and echo it without solving.
pub fn execute_data(args: &DataArgs, config: &Config) -> Result<()> {
    let scenario = model::find(&args.scenario)
        .ok_or_else(|| Error::UnknownScenario(args.scenario.clone()))?;
    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.dir.clone());

    output::header(env!("CARGO_PKG_VERSION"));

    match scenario.data_report(&data_dir)? {
        Some(report) => {
            super::solve::render(&report);
            output::ok(&format!("sheet for '{}' loads cleanly", scenario.name()));
        }
        None => {
            output::warn(&format!(
                "'{}' uses baked-in data, nothing to check",
                scenario.name()
            ));
        }
    }

    Ok(())
}

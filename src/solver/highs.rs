//! HiGHS solver backend via good_lp.
//!
//! HiGHS is a high-performance open-source linear/mixed-integer programming
//! solver. This implementation wraps it using the good_lp crate, translating
//! a [`Problem`] into good_lp expressions and reading the optimum back.

use good_lp::solvers::highs::highs;
use good_lp::{constraint, variable, variables, Expression, ResolutionError, Solution as _, SolverModel};
use tracing::debug;

use super::{Domain, Problem, Relation, Sense, Solution, Solver};
use crate::error::{Result, SolveError};

/// HiGHS-based LP/MIP solver.
#[derive(Debug, Default, Clone)]
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&self, problem: &Problem) -> Result<Solution> {
        let n = problem.num_variables();

        // A model with no variables is trivially solved at its offset.
        if n == 0 {
            return Ok(Solution::new(vec![], problem.objective_offset()));
        }

        check_references(problem)?;

        let mut vars = variables!();
        let mut handles = Vec::with_capacity(n);

        for def in problem.variables() {
            let mut v = variable().name(&def.name);
            if let Some(lower) = def.lower {
                v = v.min(lower);
            }
            if let Some(upper) = def.upper {
                v = v.max(upper);
            }
            match def.domain {
                Domain::Continuous => {}
                Domain::Integer => v = v.integer(),
                Domain::Binary => v = v.binary(),
            }
            handles.push(vars.add(v));
        }

        let objective: Expression = problem
            .objective()
            .iter()
            .map(|(id, c)| *c * handles[id.index()])
            .sum();

        debug!(
            problem = problem.name(),
            variables = n,
            constraints = problem.num_constraints(),
            mip = problem.is_mixed_integer(),
            "handing model to HiGHS"
        );

        let mut model = match problem.sense() {
            Sense::Maximize => vars.maximise(objective).using(highs),
            Sense::Minimize => vars.minimise(objective).using(highs),
        };

        for constr in problem.constraints() {
            let lhs: Expression = constr
                .terms
                .iter()
                .map(|(id, c)| *c * handles[id.index()])
                .sum();

            match constr.relation {
                Relation::LessEqual => {
                    model = model.with(constraint!(lhs <= constr.rhs));
                }
                Relation::GreaterEqual => {
                    model = model.with(constraint!(lhs >= constr.rhs));
                }
                Relation::Equal => {
                    model = model.with(constraint!(lhs == constr.rhs));
                }
            }
        }

        let solved = model.solve().map_err(|e| match e {
            ResolutionError::Infeasible => SolveError::Infeasible {
                problem: problem.name().to_string(),
            },
            ResolutionError::Unbounded => SolveError::Unbounded {
                problem: problem.name().to_string(),
            },
            ResolutionError::Other(reason) => SolveError::Backend {
                problem: problem.name().to_string(),
                reason: reason.to_string(),
            },
            ResolutionError::Str(reason) => SolveError::Backend {
                problem: problem.name().to_string(),
                reason,
            },
        })?;

        let values: Vec<f64> = handles.iter().map(|h| solved.value(*h)).collect();

        // Re-evaluate the objective from the solved values.
        let objective_value: f64 = problem
            .objective()
            .iter()
            .map(|(id, c)| values[id.index()] * c)
            .sum::<f64>()
            + problem.objective_offset();

        Ok(Solution::new(values, objective_value))
    }
}

/// Every constraint and objective term must point at a variable of this problem.
fn check_references(problem: &Problem) -> Result<()> {
    let n = problem.num_variables();
    for constr in problem.constraints() {
        if constr.terms.iter().any(|(id, _)| id.index() >= n) {
            return Err(SolveError::UnknownVariable {
                problem: problem.name().to_string(),
                constraint: constr.label.clone(),
            }
            .into());
        }
    }
    if problem.objective().iter().any(|(id, _)| id.index() >= n) {
        return Err(SolveError::UnknownVariable {
            problem: problem.name().to_string(),
            constraint: "objective".to_string(),
        }
        .into());
    }
    Ok(())
}

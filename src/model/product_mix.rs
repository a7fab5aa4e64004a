//! Wyndor Glass product mix: how many batches of doors and windows to
//! produce per week given limited plant time. The introductory two-variable
//! LP of the course.

use crate::error::Result;
use crate::solver::{Constraint, Problem, Sense, Solver, VarId, Variable};

use super::{DataSource, ModelKind, Report, RunContext, Scenario};

/// Weekly plant data, from the lecture slides.
#[derive(Debug, Clone)]
pub struct Data {
    /// Plant 1 capacity, consumed only by doors.
    pub door_capacity: f64,
    /// Plant 2 capacity, consumed only by windows.
    pub window_capacity: f64,
    /// Plant 3 hours available.
    pub plant3_hours: f64,
    /// Plant 3 hours per batch of doors / windows.
    pub plant3_per_door: f64,
    pub plant3_per_window: f64,
    /// Profit per batch, in $1000s.
    pub door_profit: f64,
    pub window_profit: f64,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            door_capacity: 4.0,
            window_capacity: 6.0,
            plant3_hours: 18.0,
            plant3_per_door: 3.0,
            plant3_per_window: 2.0,
            door_profit: 3.0,
            window_profit: 5.0,
        }
    }
}

/// The optimal weekly production plan.
#[derive(Debug, Clone, Copy)]
pub struct Plan {
    pub doors: f64,
    pub windows: f64,
    pub profit: f64,
}

pub fn formulate(data: &Data) -> (Problem, VarId, VarId) {
    let mut problem = Problem::new("Wyndor Glass Co.", Sense::Maximize);

    let doors = problem.add_variable(
        Variable::continuous("doors").with_bounds(0.0, data.door_capacity),
    );
    let windows = problem.add_variable(
        Variable::continuous("windows").with_bounds(0.0, data.window_capacity),
    );

    problem.add_constraint(Constraint::le(
        "plant3",
        [
            (doors, data.plant3_per_door),
            (windows, data.plant3_per_window),
        ],
        data.plant3_hours,
    ));

    problem.set_objective([(doors, data.door_profit), (windows, data.window_profit)]);

    (problem, doors, windows)
}

pub fn solve(solver: &dyn Solver, data: &Data) -> Result<Plan> {
    let (problem, doors, windows) = formulate(data);
    let solution = solver.solve(&problem)?;

    Ok(Plan {
        doors: solution.value(doors),
        windows: solution.value(windows),
        profit: solution.objective(),
    })
}

pub struct ProductMix;

impl Scenario for ProductMix {
    fn name(&self) -> &'static str {
        "product-mix"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Lp
    }

    fn summary(&self) -> &'static str {
        "Wyndor Glass: weekly door/window batches under plant time limits"
    }

    fn source(&self) -> DataSource {
        DataSource::Baked
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<Report> {
        let plan = solve(ctx.solver, &Data::default())?;

        Ok(
            Report::new(self.name(), "profit ($1000s/week)", plan.profit).with_key_values([
                ("door batches".to_string(), super::fmt_value(plan.doors)),
                ("window batches".to_string(), super::fmt_value(plan.windows)),
            ]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::HighsSolver;

    #[test]
    fn formulation_shape() {
        let (problem, _, _) = formulate(&Data::default());
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_constraints(), 1);
        assert!(!problem.is_mixed_integer());
    }

    #[test]
    fn optimal_plan_is_two_doors_six_windows() {
        let plan = solve(&HighsSolver::new(), &Data::default()).unwrap();
        assert!((plan.doors - 2.0).abs() < 1e-6);
        assert!((plan.windows - 6.0).abs() < 1e-6);
        assert!((plan.profit - 36.0).abs() < 1e-6);
    }
}

//! Balanced transportation problem: ship truckloads from three plants to
//! four distribution centers at minimum freight cost. Freight is priced per
//! truckload from the mileage table, $100 flat plus 50 cents a mile, and
//! supply equals demand so both sides bind with equalities.

use crate::error::Result;
use crate::solver::{Constraint, Problem, Sense, Solver, Variable};

use super::{DataSource, ModelKind, Report, RunContext, Scenario};

/// Flat charge per truckload, $.
const BASE_RATE: f64 = 100.0;

/// Charge per mile per truckload, $.
const PER_MILE: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct Data {
    pub plants: Vec<String>,
    pub centers: Vec<String>,
    /// `miles[i][j]`: road distance from plant `i` to center `j`.
    pub miles: Vec<Vec<f64>>,
    /// Truckloads available per plant.
    pub supply: Vec<f64>,
    /// Truckloads required per center.
    pub demand: Vec<f64>,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            plants: vec!["P1".into(), "P2".into(), "P3".into()],
            centers: vec!["D1".into(), "D2".into(), "D3".into(), "D4".into()],
            miles: vec![
                vec![800.0, 1300.0, 400.0, 700.0],
                vec![1100.0, 1400.0, 600.0, 1000.0],
                vec![600.0, 1200.0, 800.0, 900.0],
            ],
            supply: vec![12.0, 17.0, 11.0],
            demand: vec![10.0, 10.0, 10.0, 10.0],
        }
    }
}

impl Data {
    /// Freight cost per truckload on lane `(i, j)`.
    pub fn lane_cost(&self, i: usize, j: usize) -> f64 {
        BASE_RATE + PER_MILE * self.miles[i][j]
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    /// `flows[i][j]`: truckloads shipped from plant `i` to center `j`.
    pub flows: Vec<Vec<f64>>,
    pub total_cost: f64,
}

pub fn solve(solver: &dyn Solver, data: &Data) -> Result<Outcome> {
    let mut problem = Problem::new("Transportation", Sense::Minimize);

    let flow: Vec<Vec<_>> = data
        .plants
        .iter()
        .map(|plant| {
            data.centers
                .iter()
                .map(|center| {
                    problem.add_variable(Variable::non_negative(format!("{plant}->{center}")))
                })
                .collect()
        })
        .collect();

    problem.set_objective(flow.iter().enumerate().flat_map(|(i, row)| {
        row.iter()
            .enumerate()
            .map(move |(j, &v)| (v, data.lane_cost(i, j)))
    }));

    // Balanced problem, every truckload leaves and every demand is met.
    for (i, plant) in data.plants.iter().enumerate() {
        problem.add_constraint(Constraint::eq(
            format!("supply_{plant}"),
            flow[i].iter().map(|&v| (v, 1.0)),
            data.supply[i],
        ));
    }
    for (j, center) in data.centers.iter().enumerate() {
        problem.add_constraint(Constraint::eq(
            format!("demand_{center}"),
            flow.iter().map(|row| (row[j], 1.0)),
            data.demand[j],
        ));
    }

    let solution = solver.solve(&problem)?;

    Ok(Outcome {
        flows: flow
            .iter()
            .map(|row| row.iter().map(|&v| solution.value(v)).collect())
            .collect(),
        total_cost: solution.objective(),
    })
}

pub struct Transportation;

impl Scenario for Transportation {
    fn name(&self) -> &'static str {
        "transportation"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Lp
    }

    fn summary(&self) -> &'static str {
        "Ship truckloads from 3 plants to 4 centers at minimum freight cost"
    }

    fn source(&self) -> DataSource {
        DataSource::Baked
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<Report> {
        let data = Data::default();
        let outcome = solve(ctx.solver, &data)?;

        let mut shipments = Vec::new();
        for (i, plant) in data.plants.iter().enumerate() {
            for (j, center) in data.centers.iter().enumerate() {
                let loads = outcome.flows[i][j];
                if loads > ctx.report.flow_epsilon {
                    shipments.push(vec![
                        plant.clone(),
                        center.clone(),
                        super::fmt_value(loads),
                        super::fmt_value(data.lane_cost(i, j)),
                    ]);
                }
            }
        }

        Ok(
            Report::new(self.name(), "freight cost ($)", outcome.total_cost).with_table(
                vec![
                    "from".into(),
                    "to".into(),
                    "truckloads".into(),
                    "$/truckload".into(),
                ],
                shipments,
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::HighsSolver;

    #[test]
    fn lane_costs_follow_the_mileage_table() {
        let data = Data::default();
        assert!((data.lane_cost(0, 0) - 500.0).abs() < 1e-9);
        assert!((data.lane_cost(1, 1) - 800.0).abs() < 1e-9);
    }

    #[test]
    fn optimal_shipping_plan_costs_20200() {
        let data = Data::default();
        let outcome = solve(&HighsSolver::new(), &data).unwrap();

        assert!((outcome.total_cost - 20_200.0).abs() < 1e-6);

        // The optimum is unique for this mileage table.
        let expected = [
            [0.0, 0.0, 2.0, 10.0],
            [0.0, 9.0, 8.0, 0.0],
            [10.0, 1.0, 0.0, 0.0],
        ];
        for (row, want) in outcome.flows.iter().zip(&expected) {
            for (&got, &want) in row.iter().zip(want) {
                assert!((got - want).abs() < 1e-6, "flow {got} != {want}");
            }
        }
    }
}

//! P&T Company fixed-charge network design: decide which canneries to keep
//! open (each open site pays a fixed operating cost) and how many truckloads
//! to ship from each open cannery to each warehouse. Shipping is only allowed
//! out of open sites, enforced with a big-M capacity of twice the cannery's
//! nominal output.

use std::path::Path;

use tracing::debug;

use crate::error::{Result, SolveError};
use crate::sheet::Sheet;
use crate::solver::{Constraint, Problem, Sense, Solver, Variable};

use super::{DataSource, ModelKind, Report, RunContext, Scenario};

pub const SHEET_FILE: &str = "fixed_charge.csv";

/// Cost of keeping a cannery open, $ per season.
const FIXED_COST: f64 = 5000.0;

/// Open capacity multiplier over nominal output.
const CAPACITY_FACTOR: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct Data {
    pub canneries: Vec<String>,
    pub warehouses: Vec<String>,
    /// `cost[i][j]`: $ per truckload from cannery `i` to warehouse `j`.
    pub cost: Vec<Vec<f64>>,
    /// Nominal output per cannery, truckloads.
    pub supply: Vec<f64>,
    /// Allocation per warehouse, truckloads.
    pub demand: Vec<f64>,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            canneries: vec!["Bellingham".into(), "Eugene".into(), "Albert Lea".into()],
            warehouses: vec![
                "Sacramento".into(),
                "Salt Lake City".into(),
                "Rapid City".into(),
                "Albuquerque".into(),
            ],
            cost: vec![
                vec![464.0, 513.0, 654.0, 867.0],
                vec![352.0, 416.0, 690.0, 791.0],
                vec![995.0, 682.0, 388.0, 685.0],
            ],
            supply: vec![75.0, 125.0, 100.0],
            demand: vec![80.0, 65.0, 70.0, 85.0],
        }
    }
}

impl Data {
    /// Fixed workbook ranges: warehouse labels in D3:G3, cannery labels in
    /// C5:C7, the per-truckload cost table in D5:G7, nominal outputs in
    /// K5:K7 and warehouse allocations in D17:G17.
    pub fn from_sheet(sheet: &Sheet) -> Result<Self> {
        let warehouses = sheet.row_text("D3:G3")?;
        let canneries = sheet.column_text("C5:C7")?;
        let cost = sheet.grid_numbers("D5:G7")?;
        let supply = sheet.column_numbers("K5:K7")?;
        let demand = sheet.row_numbers("D17:G17")?;

        debug!(
            sheet = sheet.name(),
            canneries = canneries.len(),
            warehouses = warehouses.len(),
            "loaded shipping network"
        );

        Ok(Self {
            canneries,
            warehouses,
            cost,
            supply,
            demand,
        })
    }

    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::from_sheet(&Sheet::open(data_dir.join(SHEET_FILE))?)
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    /// Whether each cannery stays open, aligned with [`Data::canneries`].
    pub open: Vec<bool>,
    /// `flows[i][j]`: truckloads shipped from cannery `i` to warehouse `j`.
    pub flows: Vec<Vec<f64>>,
    pub total_cost: f64,
}

pub fn solve(solver: &dyn Solver, data: &Data) -> Result<Outcome> {
    let mut problem = Problem::new("P&T network design", Sense::Minimize);

    // Even with every site open the network must be able to meet demand.
    let capacity: f64 = data.supply.iter().map(|&s| CAPACITY_FACTOR * s).sum();
    let required: f64 = data.demand.iter().sum();
    if capacity < required {
        return Err(SolveError::InfeasibleData {
            problem: problem.name().to_string(),
            reason: format!(
                "total open capacity {capacity} cannot meet total demand {required}"
            ),
        }
        .into());
    }

    let flow: Vec<Vec<_>> = data
        .canneries
        .iter()
        .map(|cannery| {
            data.warehouses
                .iter()
                .map(|warehouse| {
                    problem.add_variable(Variable::non_negative(format!(
                        "{cannery}->{warehouse}"
                    )))
                })
                .collect()
        })
        .collect();
    let open: Vec<_> = data
        .canneries
        .iter()
        .map(|cannery| problem.add_variable(Variable::binary(format!("open_{cannery}"))))
        .collect();

    problem.set_objective(
        flow.iter()
            .zip(&data.cost)
            .flat_map(|(row, costs)| row.iter().zip(costs).map(|(&v, &c)| (v, c)))
            .chain(open.iter().map(|&y| (y, FIXED_COST))),
    );

    // Outbound flow only from open canneries, capped at twice nominal output.
    for (i, cannery) in data.canneries.iter().enumerate() {
        let cap = CAPACITY_FACTOR * data.supply[i];
        problem.add_constraint(Constraint::le(
            format!("capacity_{cannery}"),
            flow[i]
                .iter()
                .map(|&v| (v, 1.0))
                .chain(std::iter::once((open[i], -cap))),
            0.0,
        ));
    }

    // Every warehouse receives at least its allocation. Costs are positive,
    // so nothing ships beyond it at the optimum.
    for (j, warehouse) in data.warehouses.iter().enumerate() {
        problem.add_constraint(Constraint::ge(
            format!("demand_{warehouse}"),
            flow.iter().map(|row| (row[j], 1.0)),
            data.demand[j],
        ));
    }

    let solution = solver.solve(&problem)?;

    Ok(Outcome {
        open: open.iter().map(|&y| solution.is_selected(y)).collect(),
        flows: flow
            .iter()
            .map(|row| row.iter().map(|&v| solution.value(v)).collect())
            .collect(),
        total_cost: solution.objective(),
    })
}

pub struct FixedChargeTransport;

impl Scenario for FixedChargeTransport {
    fn name(&self) -> &'static str {
        "fixed-charge-transport"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Mip
    }

    fn summary(&self) -> &'static str {
        "P&T Co: which canneries to keep open and how to ship to warehouses"
    }

    fn source(&self) -> DataSource {
        DataSource::Sheet(SHEET_FILE)
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<Report> {
        let data = Data::load(ctx.data_dir)?;
        let outcome = solve(ctx.solver, &data)?;

        let open = data
            .canneries
            .iter()
            .zip(&outcome.open)
            .map(|(cannery, &o)| (cannery.clone(), super::fmt_decision(o)))
            .collect::<Vec<_>>();

        let mut shipments = Vec::new();
        for (i, cannery) in data.canneries.iter().enumerate() {
            for (j, warehouse) in data.warehouses.iter().enumerate() {
                let loads = outcome.flows[i][j];
                if loads > ctx.report.flow_epsilon {
                    shipments.push(vec![
                        cannery.clone(),
                        warehouse.clone(),
                        super::fmt_value(loads),
                    ]);
                }
            }
        }

        Ok(Report::new(self.name(), "total cost ($)", outcome.total_cost)
            .with_key_values(open)
            .with_table(
                vec!["from".into(), "to".into(), "truckloads".into()],
                shipments,
            ))
    }

    fn data_report(&self, data_dir: &Path) -> Result<Option<Report>> {
        let data = Data::load(data_dir)?;

        let header = std::iter::once("cannery".to_string())
            .chain(data.warehouses.iter().cloned())
            .chain(std::iter::once("output".to_string()))
            .collect();
        let mut rows: Vec<Vec<String>> = data
            .canneries
            .iter()
            .zip(data.cost.iter().zip(&data.supply))
            .map(|(cannery, (costs, &supply))| {
                std::iter::once(cannery.clone())
                    .chain(costs.iter().map(|&c| super::fmt_value(c)))
                    .chain(std::iter::once(super::fmt_value(supply)))
                    .collect()
            })
            .collect();
        rows.push(
            std::iter::once("allocation".to_string())
                .chain(data.demand.iter().map(|&d| super::fmt_value(d)))
                .chain(std::iter::once(String::new()))
                .collect(),
        );

        Ok(Some(Report::data(self.name()).with_table(header, rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::solver::HighsSolver;

    #[test]
    fn bellingham_closes_at_the_optimum() {
        let data = Data::default();
        let outcome = solve(&HighsSolver::new(), &data).unwrap();

        assert_eq!(outcome.open, vec![false, true, true]);
        assert!((outcome.total_cost - 150_585.0).abs() < 1e-3);

        // No flow leaves a closed cannery.
        for (i, &open) in outcome.open.iter().enumerate() {
            if !open {
                let outbound: f64 = outcome.flows[i].iter().sum();
                assert!(outbound < 1e-6);
            }
        }

        // Every warehouse gets its full allocation.
        for (j, &demand) in data.demand.iter().enumerate() {
            let inbound: f64 = outcome.flows.iter().map(|row| row[j]).sum();
            assert!((inbound - demand).abs() < 1e-6);
        }
    }

    #[test]
    fn impossible_demand_is_caught_before_solving() {
        let data = Data {
            demand: vec![500.0, 500.0, 500.0, 500.0],
            ..Data::default()
        };
        let err = solve(&HighsSolver::new(), &data).unwrap_err();
        assert!(matches!(
            err,
            Error::Solve(crate::error::SolveError::InfeasibleData { .. })
        ));
    }
}

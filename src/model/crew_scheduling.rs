//! Southwestern Airways crew scheduling: choose exactly three of the twelve
//! feasible flight sequences so that every flight leg is covered by at least
//! one chosen crew, at minimum cost. A classic set-covering BIP; sequence
//! costs and the flight/sequence incidence table come from the sheet.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::sheet::Sheet;
use crate::solver::{Constraint, Problem, Sense, Solver, Variable};

use super::{DataSource, ModelKind, Report, RunContext, Scenario};

pub const SHEET_FILE: &str = "crew_scheduling.csv";

/// Number of crews to put in the air.
const CREWS: f64 = 3.0;

#[derive(Debug, Clone)]
pub struct Data {
    /// Cost of flying each sequence, $1000s.
    pub costs: Vec<f64>,
    /// Flight leg labels.
    pub flights: Vec<String>,
    /// `incidence[i][j]` is 1 when flight `i` is part of sequence `j`.
    pub incidence: Vec<Vec<f64>>,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            costs: vec![2.0, 3.0, 4.0, 6.0, 7.0, 5.0, 7.0, 8.0, 9.0, 9.0, 8.0, 9.0],
            flights: vec![
                "SFO-LAX".into(),
                "SFO-DEN".into(),
                "SFO-SEA".into(),
                "LAX-ORD".into(),
                "LAX-SFO".into(),
                "ORD-DEN".into(),
                "ORD-SEA".into(),
                "DEN-SFO".into(),
                "DEN-ORD".into(),
                "SEA-SFO".into(),
                "SEA-LAX".into(),
            ],
            incidence: vec![
                vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
                vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
                vec![0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
            ],
        }
    }
}

impl Data {
    /// Fixed workbook ranges: sequence costs in C5:N5, flight labels in
    /// B8:B18, incidence table in C8:N18.
    pub fn from_sheet(sheet: &Sheet) -> Result<Self> {
        let costs = sheet.row_numbers("C5:N5")?;
        let flights = sheet.column_text("B8:B18")?;
        let incidence = sheet.grid_numbers("C8:N18")?;

        debug!(
            sheet = sheet.name(),
            sequences = costs.len(),
            flights = flights.len(),
            "loaded crew scheduling table"
        );

        Ok(Self {
            costs,
            flights,
            incidence,
        })
    }

    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::from_sheet(&Sheet::open(data_dir.join(SHEET_FILE))?)
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    /// 1-based indices of the chosen sequences.
    pub chosen: Vec<usize>,
    pub total_cost: f64,
}

pub fn solve(solver: &dyn Solver, data: &Data) -> Result<Outcome> {
    let mut problem = Problem::new("Southwestern Airways", Sense::Minimize);

    let x: Vec<_> = (1..=data.costs.len())
        .map(|j| problem.add_variable(Variable::binary(format!("seq{j}"))))
        .collect();

    problem.set_objective(x.iter().zip(&data.costs).map(|(&v, &c)| (v, c)));

    problem.add_constraint(Constraint::eq(
        "num_crews",
        x.iter().map(|&v| (v, 1.0)),
        CREWS,
    ));

    // Every flight is covered by at least one chosen sequence.
    for (flight, row) in data.flights.iter().zip(&data.incidence) {
        problem.add_constraint(Constraint::ge(
            format!("cover_{flight}"),
            x.iter().zip(row).map(|(&v, &a)| (v, a)),
            1.0,
        ));
    }

    let solution = solver.solve(&problem)?;

    let chosen = x
        .iter()
        .enumerate()
        .filter(|(_, &v)| solution.is_selected(v))
        .map(|(j, _)| j + 1)
        .collect();

    Ok(Outcome {
        chosen,
        total_cost: solution.objective(),
    })
}

pub struct CrewScheduling;

impl Scenario for CrewScheduling {
    fn name(&self) -> &'static str {
        "crew-scheduling"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Bip
    }

    fn summary(&self) -> &'static str {
        "Southwestern Airways: pick 3 crew sequences covering all 11 flights"
    }

    fn source(&self) -> DataSource {
        DataSource::Sheet(SHEET_FILE)
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<Report> {
        let data = Data::load(ctx.data_dir)?;
        let outcome = solve(ctx.solver, &data)?;

        let chosen = outcome
            .chosen
            .iter()
            .map(|j| format!("sequence {j} (cost {})", super::fmt_value(data.costs[j - 1])))
            .collect::<Vec<_>>();

        Ok(Report::new(self.name(), "total cost ($1000s)", outcome.total_cost)
            .with_lines(chosen))
    }

    fn data_report(&self, data_dir: &Path) -> Result<Option<Report>> {
        let data = Data::load(data_dir)?;

        let header = std::iter::once("flight".to_string())
            .chain((1..=data.costs.len()).map(|j| format!("seq{j}")))
            .collect();
        let mut rows: Vec<Vec<String>> = data
            .flights
            .iter()
            .zip(&data.incidence)
            .map(|(flight, row)| {
                std::iter::once(flight.clone())
                    .chain(row.iter().map(|&a| super::fmt_value(a)))
                    .collect()
            })
            .collect();
        rows.push(
            std::iter::once("cost".to_string())
                .chain(data.costs.iter().map(|&c| super::fmt_value(c)))
                .collect(),
        );

        Ok(Some(Report::data(self.name()).with_table(header, rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::HighsSolver;

    #[test]
    fn three_crews_cover_every_flight_for_eighteen() {
        let data = Data::default();
        let outcome = solve(&HighsSolver::new(), &data).unwrap();

        assert_eq!(outcome.chosen.len(), 3);
        assert!((outcome.total_cost - 18.0).abs() < 1e-6);

        // The chosen sequences really cover all flights.
        for (flight, row) in data.flights.iter().zip(&data.incidence) {
            let covered = outcome.chosen.iter().any(|&j| row[j - 1] > 0.5);
            assert!(covered, "flight {flight} is not covered");
        }

        // And the reported cost matches the chosen sequences.
        let direct: f64 = outcome.chosen.iter().map(|&j| data.costs[j - 1]).sum();
        assert!((direct - outcome.total_cost).abs() < 1e-6);
    }
}

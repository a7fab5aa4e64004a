//! Assignment problem: pair each worker with exactly one task (and each task
//! with exactly one worker) at minimum total cost. The cost matrix comes from
//! a sheet laid out like the course workbook — row labels in column A, task
//! labels in row 1 — with a tiny baked-in matrix as fallback when the sheet
//! is missing.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::sheet::{column_label, Sheet};
use crate::solver::{Constraint, Problem, Sense, Solver, Variable};

use super::{DataSource, ModelKind, Report, RunContext, Scenario};

pub const SHEET_FILE: &str = "assignment.csv";

#[derive(Debug, Clone)]
pub struct Data {
    pub workers: Vec<String>,
    pub tasks: Vec<String>,
    /// `costs[i][j]` is the cost of worker `i` doing task `j`.
    pub costs: Vec<Vec<f64>>,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            workers: vec!["i1".into(), "i2".into(), "i3".into()],
            tasks: vec!["j1".into(), "j2".into(), "j3".into()],
            costs: vec![
                vec![4.0, 7.0, 3.0],
                vec![2.0, 5.0, 8.0],
                vec![6.0, 4.0, 5.0],
            ],
        }
    }
}

impl Data {
    /// Read the whole cost table: task labels across row 1 starting at B1,
    /// worker labels down column A starting at A2, costs in between.
    pub fn from_sheet(sheet: &Sheet) -> Result<Self> {
        let height = sheet.height();
        let last_col = column_label(sheet.width() - 1);

        let tasks = sheet.row_text(&format!("B1:{last_col}1"))?;
        let workers = sheet.column_text(&format!("A2:A{height}"))?;
        let costs = sheet.grid_numbers(&format!("B2:{last_col}{height}"))?;

        debug!(
            sheet = sheet.name(),
            workers = workers.len(),
            tasks = tasks.len(),
            "loaded assignment costs"
        );

        Ok(Self {
            workers,
            tasks,
            costs,
        })
    }

    /// Sheet data when present, baked fallback otherwise.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(SHEET_FILE);
        if path.exists() {
            Self::from_sheet(&Sheet::open(path)?)
        } else {
            warn!(path = %path.display(), "assignment sheet missing, using baked-in 3x3 costs");
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    /// `(worker, task)` label pairs, one per worker.
    pub assignments: Vec<(String, String)>,
    pub total_cost: f64,
}

pub fn solve(solver: &dyn Solver, data: &Data) -> Result<Outcome> {
    let mut problem = Problem::new("Assignment", Sense::Minimize);

    // x[i][j] = 1 if worker i is assigned to task j.
    let x: Vec<Vec<_>> = data
        .workers
        .iter()
        .map(|worker| {
            data.tasks
                .iter()
                .map(|task| problem.add_variable(Variable::binary(format!("{worker}_{task}"))))
                .collect()
        })
        .collect();

    problem.set_objective(
        x.iter()
            .zip(&data.costs)
            .flat_map(|(row, costs)| row.iter().zip(costs).map(|(&v, &c)| (v, c))),
    );

    // Each worker does exactly one task.
    for (i, worker) in data.workers.iter().enumerate() {
        problem.add_constraint(Constraint::eq(
            format!("row_{worker}"),
            x[i].iter().map(|&v| (v, 1.0)),
            1.0,
        ));
    }

    // Each task is done by exactly one worker.
    for (j, task) in data.tasks.iter().enumerate() {
        problem.add_constraint(Constraint::eq(
            format!("col_{task}"),
            x.iter().map(|row| (row[j], 1.0)),
            1.0,
        ));
    }

    let solution = solver.solve(&problem)?;

    let mut assignments = Vec::new();
    for (i, worker) in data.workers.iter().enumerate() {
        for (j, task) in data.tasks.iter().enumerate() {
            if solution.is_selected(x[i][j]) {
                assignments.push((worker.clone(), task.clone()));
            }
        }
    }

    Ok(Outcome {
        assignments,
        total_cost: solution.objective(),
    })
}

pub struct Assignment;

impl Scenario for Assignment {
    fn name(&self) -> &'static str {
        "assignment"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Bip
    }

    fn summary(&self) -> &'static str {
        "Assign each worker to exactly one task at minimum total cost"
    }

    fn source(&self) -> DataSource {
        DataSource::Sheet(SHEET_FILE)
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<Report> {
        let data = Data::load(ctx.data_dir)?;
        let outcome = solve(ctx.solver, &data)?;

        let lines = outcome
            .assignments
            .iter()
            .map(|(worker, task)| format!("{worker} -> {task}"))
            .collect::<Vec<_>>();

        Ok(Report::new(self.name(), "total cost", outcome.total_cost).with_lines(lines))
    }

    fn data_report(&self, data_dir: &Path) -> Result<Option<Report>> {
        let data = Data::from_sheet(&Sheet::open(data_dir.join(SHEET_FILE))?)?;

        let header = std::iter::once("worker".to_string())
            .chain(data.tasks.iter().cloned())
            .collect();
        let rows = data
            .workers
            .iter()
            .zip(&data.costs)
            .map(|(worker, costs)| {
                std::iter::once(worker.clone())
                    .chain(costs.iter().map(|&c| super::fmt_value(c)))
                    .collect()
            })
            .collect();

        Ok(Some(Report::data(self.name()).with_table(header, rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Sheet;
    use crate::solver::HighsSolver;

    #[test]
    fn baked_costs_give_total_nine() {
        let outcome = solve(&HighsSolver::new(), &Data::default()).unwrap();
        assert!((outcome.total_cost - 9.0).abs() < 1e-6);
        assert_eq!(
            outcome.assignments,
            vec![
                ("i1".to_string(), "j3".to_string()),
                ("i2".to_string(), "j1".to_string()),
                ("i3".to_string(), "j2".to_string()),
            ]
        );
    }

    #[test]
    fn sheet_table_parses() {
        let sheet = Sheet::from_rows(
            "assignment",
            vec![
                vec!["", "j1", "j2"],
                vec!["i1", "1", "9"],
                vec!["i2", "9", "1"],
            ],
        );
        let data = Data::from_sheet(&sheet).unwrap();
        assert_eq!(data.workers, vec!["i1", "i2"]);
        assert_eq!(data.tasks, vec!["j1", "j2"]);
        assert_eq!(data.costs, vec![vec![1.0, 9.0], vec![9.0, 1.0]]);

        let outcome = solve(&HighsSolver::new(), &data).unwrap();
        assert!((outcome.total_cost - 2.0).abs() < 1e-6);
    }
}

//! Capital budgeting: choose which projects to fund under a fixed budget,
//! maximizing total net present value. Two variants share the sheet:
//!
//! - the plain knapsack (`capital-budgeting`), and
//! - a version with synergy bonuses (`capital-budgeting-bonus`) paid only
//!   when both projects of a designated pair are funded. Each bonus uses an
//!   auxiliary binary z tied to the pair with the standard AND
//!   linearization: z <= x_a, z <= x_b, z >= x_a + x_b - 1.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::sheet::Sheet;
use crate::solver::{Constraint, Problem, Sense, Solver, VarId, Variable};

use super::{DataSource, ModelKind, Report, RunContext, Scenario};

pub const SHEET_FILE: &str = "capital_budgeting.csv";

/// Budget to assume when the budget cell is blank.
const DEFAULT_BUDGET: f64 = 20.0;

#[derive(Debug, Clone)]
pub struct Data {
    pub projects: Vec<String>,
    /// Net present value per project, $M.
    pub npv: Vec<f64>,
    /// Initial outlay per project, $M.
    pub outlay: Vec<f64>,
    pub budget: f64,
    /// Bonus paid when both of projects 1 and 2 are funded.
    pub bonus_first_pair: f64,
    /// Bonus paid when both of projects 4 and 5 are funded.
    pub bonus_second_pair: f64,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            projects: vec!["P1".into(), "P2".into(), "P3".into(), "P4".into(), "P5".into()],
            npv: vec![12.0, 9.0, 7.0, 8.0, 6.0],
            outlay: vec![8.0, 6.0, 5.0, 7.0, 4.0],
            budget: 20.0,
            bonus_first_pair: 3.0,
            bonus_second_pair: 4.0,
        }
    }
}

impl Data {
    /// Fixed workbook ranges: project names in C4:G4, NPV in C5:G5, outlay
    /// in C6:G6, pair bonuses in C7 and F7, budget in J13. Blank bonus cells
    /// mean no bonus; a blank budget cell falls back to 20.
    pub fn from_sheet(sheet: &Sheet) -> Result<Self> {
        let projects = sheet.row_text("C4:G4")?;
        let npv = sheet.row_numbers("C5:G5")?;
        let outlay = sheet.row_numbers("C6:G6")?;
        let bonus_first_pair = sheet.number_or("C7", 0.0)?;
        let bonus_second_pair = sheet.number_or("F7", 0.0)?;
        let budget = sheet.number_or("J13", DEFAULT_BUDGET)?;

        debug!(
            sheet = sheet.name(),
            projects = projects.len(),
            budget,
            "loaded capital budgeting sheet"
        );

        Ok(Self {
            projects,
            npv,
            outlay,
            budget,
            bonus_first_pair,
            bonus_second_pair,
        })
    }

    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::from_sheet(&Sheet::open(data_dir.join(SHEET_FILE))?)
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    /// Funding flags, aligned with [`Data::projects`].
    pub funded: Vec<bool>,
    /// Whether each pair bonus was earned (bonus variant only).
    pub first_pair_bonus: bool,
    pub second_pair_bonus: bool,
    pub total_npv: f64,
    pub budget_used: f64,
}

fn base_problem(data: &Data, name: &str) -> (Problem, Vec<VarId>) {
    let mut problem = Problem::new(name, Sense::Maximize);

    let x: Vec<_> = data
        .projects
        .iter()
        .map(|p| problem.add_variable(Variable::binary(p.clone())))
        .collect();

    problem.add_constraint(Constraint::le(
        "budget",
        x.iter().zip(&data.outlay).map(|(&v, &c)| (v, c)),
        data.budget,
    ));

    (problem, x)
}

fn read_outcome(
    data: &Data,
    solution: &crate::solver::Solution,
    x: &[VarId],
    bonuses: Option<(VarId, VarId)>,
) -> Outcome {
    let funded: Vec<bool> = x.iter().map(|&v| solution.is_selected(v)).collect();
    let budget_used = funded
        .iter()
        .zip(&data.outlay)
        .filter(|(f, _)| **f)
        .map(|(_, &c)| c)
        .sum();
    let (first_pair_bonus, second_pair_bonus) = match bonuses {
        Some((z12, z45)) => (solution.is_selected(z12), solution.is_selected(z45)),
        None => (false, false),
    };

    Outcome {
        funded,
        first_pair_bonus,
        second_pair_bonus,
        total_npv: solution.objective(),
        budget_used,
    }
}

/// Plain knapsack: maximize NPV within the budget.
pub fn solve_knapsack(solver: &dyn Solver, data: &Data) -> Result<Outcome> {
    let (mut problem, x) = base_problem(data, "Capital budgeting");
    problem.set_objective(x.iter().zip(&data.npv).map(|(&v, &n)| (v, n)));

    let solution = solver.solve(&problem)?;
    Ok(read_outcome(data, &solution, &x, None))
}

/// Knapsack plus pair bonuses with AND-linearized auxiliaries.
pub fn solve_with_bonuses(solver: &dyn Solver, data: &Data) -> Result<Outcome> {
    let (mut problem, x) = base_problem(data, "Capital budgeting with bonuses");

    let z12 = problem.add_variable(Variable::binary("both_p1_p2"));
    let z45 = problem.add_variable(Variable::binary("both_p4_p5"));

    // z turns on only when both projects of the pair do.
    for (z, a, b, tag) in [(z12, x[0], x[1], "12"), (z45, x[3], x[4], "45")] {
        problem.add_constraint(Constraint::le(
            format!("pair{tag}_first"),
            [(z, 1.0), (a, -1.0)],
            0.0,
        ));
        problem.add_constraint(Constraint::le(
            format!("pair{tag}_second"),
            [(z, 1.0), (b, -1.0)],
            0.0,
        ));
        problem.add_constraint(Constraint::ge(
            format!("pair{tag}_both"),
            [(z, 1.0), (a, -1.0), (b, -1.0)],
            -1.0,
        ));
    }

    problem.set_objective(
        x.iter()
            .zip(&data.npv)
            .map(|(&v, &n)| (v, n))
            .chain([(z12, data.bonus_first_pair), (z45, data.bonus_second_pair)]),
    );

    let solution = solver.solve(&problem)?;
    Ok(read_outcome(data, &solution, &x, Some((z12, z45))))
}

fn funded_table(data: &Data, outcome: &Outcome) -> (Vec<String>, Vec<Vec<String>>) {
    let header = vec![
        "project".into(),
        "fund".into(),
        "NPV ($M)".into(),
        "outlay ($M)".into(),
    ];
    let rows = data
        .projects
        .iter()
        .zip(&outcome.funded)
        .zip(data.npv.iter().zip(&data.outlay))
        .map(|((project, &funded), (&npv, &outlay))| {
            vec![
                project.clone(),
                super::fmt_decision(funded),
                super::fmt_value(npv),
                super::fmt_value(outlay),
            ]
        })
        .collect();
    (header, rows)
}

fn budget_line(data: &Data, outcome: &Outcome) -> (String, String) {
    (
        "budget used ($M)".to_string(),
        format!(
            "{} of {}",
            super::fmt_value(outcome.budget_used),
            super::fmt_value(data.budget)
        ),
    )
}

pub struct CapitalBudgeting;

impl Scenario for CapitalBudgeting {
    fn name(&self) -> &'static str {
        "capital-budgeting"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Bip
    }

    fn summary(&self) -> &'static str {
        "Fund the projects with the best total NPV within the budget"
    }

    fn source(&self) -> DataSource {
        DataSource::Sheet(SHEET_FILE)
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<Report> {
        let data = Data::load(ctx.data_dir)?;
        let outcome = solve_knapsack(ctx.solver, &data)?;

        let (header, rows) = funded_table(&data, &outcome);
        Ok(Report::new(self.name(), "total NPV ($M)", outcome.total_npv)
            .with_table(header, rows)
            .with_key_values([budget_line(&data, &outcome)]))
    }

    fn data_report(&self, data_dir: &Path) -> Result<Option<Report>> {
        let data = Data::load(data_dir)?;
        Ok(Some(data_echo(self.name(), &data)))
    }
}

pub struct CapitalBudgetingBonus;

impl Scenario for CapitalBudgetingBonus {
    fn name(&self) -> &'static str {
        "capital-budgeting-bonus"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Bip
    }

    fn summary(&self) -> &'static str {
        "Capital budgeting with synergy bonuses for funding project pairs"
    }

    fn source(&self) -> DataSource {
        DataSource::Sheet(SHEET_FILE)
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<Report> {
        let data = Data::load(ctx.data_dir)?;
        let outcome = solve_with_bonuses(ctx.solver, &data)?;

        let (header, rows) = funded_table(&data, &outcome);
        Ok(Report::new(self.name(), "total NPV ($M)", outcome.total_npv)
            .with_table(header, rows)
            .with_key_values([
                budget_line(&data, &outcome),
                (
                    "pair bonuses earned".to_string(),
                    format!(
                        "P1&P2: {}, P4&P5: {}",
                        super::fmt_decision(outcome.first_pair_bonus),
                        super::fmt_decision(outcome.second_pair_bonus)
                    ),
                ),
            ]))
    }

    fn data_report(&self, data_dir: &Path) -> Result<Option<Report>> {
        let data = Data::load(data_dir)?;
        Ok(Some(data_echo(self.name(), &data)))
    }
}

fn data_echo(name: &'static str, data: &Data) -> Report {
    let header = std::iter::once("".to_string())
        .chain(data.projects.iter().cloned())
        .collect();
    let rows = vec![
        std::iter::once("NPV ($M)".to_string())
            .chain(data.npv.iter().map(|&v| super::fmt_value(v)))
            .collect(),
        std::iter::once("outlay ($M)".to_string())
            .chain(data.outlay.iter().map(|&v| super::fmt_value(v)))
            .collect(),
    ];
    Report::data(name).with_table(header, rows).with_key_values([
        ("budget ($M)".to_string(), super::fmt_value(data.budget)),
        (
            "bonuses ($M)".to_string(),
            format!(
                "P1&P2: {}, P4&P5: {}",
                super::fmt_value(data.bonus_first_pair),
                super::fmt_value(data.bonus_second_pair)
            ),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::HighsSolver;

    #[test]
    fn knapsack_funds_first_three_projects() {
        let outcome = solve_knapsack(&HighsSolver::new(), &Data::default()).unwrap();
        assert_eq!(outcome.funded, vec![true, true, true, false, false]);
        assert!((outcome.total_npv - 28.0).abs() < 1e-6);
        assert!((outcome.budget_used - 19.0).abs() < 1e-6);
    }

    #[test]
    fn first_pair_bonus_is_earned_second_is_not() {
        let outcome = solve_with_bonuses(&HighsSolver::new(), &Data::default()).unwrap();
        assert_eq!(outcome.funded, vec![true, true, true, false, false]);
        assert!(outcome.first_pair_bonus);
        assert!(!outcome.second_pair_bonus);
        assert!((outcome.total_npv - 31.0).abs() < 1e-6);
    }

    #[test]
    fn large_second_bonus_flips_the_choice() {
        // Make the P4&P5 synergy dominant; the optimum must pick up both.
        let data = Data {
            bonus_second_pair: 20.0,
            ..Data::default()
        };
        let outcome = solve_with_bonuses(&HighsSolver::new(), &data).unwrap();
        assert!(outcome.funded[3] && outcome.funded[4]);
        assert!(outcome.second_pair_bonus);
    }

    #[test]
    fn bonus_variable_cannot_fire_alone() {
        // With no budget at all, nothing is funded and no bonus is paid even
        // though the bonus coefficients are positive.
        let data = Data {
            budget: 0.0,
            ..Data::default()
        };
        let outcome = solve_with_bonuses(&HighsSolver::new(), &data).unwrap();
        assert_eq!(outcome.funded, vec![false; 5]);
        assert!(!outcome.first_pair_bonus);
        assert!(!outcome.second_pair_bonus);
        assert!(outcome.total_npv.abs() < 1e-6);
    }
}

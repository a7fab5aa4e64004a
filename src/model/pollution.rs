//! Nori & Leets air pollution abatement: choose what fraction of each
//! abatement method to apply at each furnace type so that every pollutant is
//! reduced by at least its mandated amount, at minimum cost. Taller
//! smokestacks carry a one-time fixed charge, linked to their fractional use
//! with a big-M constraint (M is just the fraction's upper bound).

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::sheet::Sheet;
use crate::solver::{Constraint, Problem, Sense, Solver, Variable};

use super::{DataSource, ModelKind, Report, RunContext, Scenario};

pub const SHEET_FILE: &str = "pollution.csv";

/// How many of the leading options are smokestacks with a fixed charge.
const STACK_OPTIONS: usize = 2;

#[derive(Debug, Clone)]
pub struct Data {
    /// Six method-at-furnace options, in sheet column order.
    pub options: Vec<String>,
    /// Cost at full use, $M per option.
    pub variable_cost: Vec<f64>,
    /// Fixed charges for the two smokestack options, $M.
    pub stack_fixed_cost: Vec<f64>,
    pub pollutants: Vec<String>,
    /// Required reduction per pollutant, millions of lbs.
    pub min_reduction: Vec<f64>,
    /// `reduction[p][j]`: reduction of pollutant `p` at full use of option `j`.
    pub reduction: Vec<Vec<f64>>,
    /// Upper bound on the fraction used, per option.
    pub upper_bound: Vec<f64>,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            options: vec![
                "taller stacks (blast)".into(),
                "taller stacks (open-hearth)".into(),
                "filters (blast)".into(),
                "filters (open-hearth)".into(),
                "better fuel (blast)".into(),
                "better fuel (open-hearth)".into(),
            ],
            variable_cost: vec![6.0, 8.0, 7.0, 6.0, 11.0, 9.0],
            stack_fixed_cost: vec![2.0, 2.0],
            pollutants: vec![
                "particulates".into(),
                "sulfur oxides".into(),
                "hydrocarbons".into(),
            ],
            min_reduction: vec![60.0, 150.0, 125.0],
            reduction: vec![
                vec![12.0, 9.0, 25.0, 20.0, 17.0, 13.0],
                vec![35.0, 42.0, 18.0, 31.0, 56.0, 49.0],
                vec![37.0, 53.0, 28.0, 24.0, 29.0, 20.0],
            ],
            upper_bound: vec![1.0; 6],
        }
    }
}

impl Data {
    /// Fixed workbook ranges: option labels in C5:H5, variable costs in
    /// C6:H6, stack fixed charges in C8:D8, pollutant labels in B12:B14 with
    /// required reductions in K12:K14, the reduction table in C12:H14 and
    /// fraction upper bounds in C21:H21 (blank bound cells mean 1.0).
    pub fn from_sheet(sheet: &Sheet) -> Result<Self> {
        let options = sheet.row_text("C5:H5")?;
        let variable_cost = sheet.row_numbers("C6:H6")?;
        let stack_fixed_cost = sheet.row_numbers("C8:D8")?;
        let pollutants = sheet.column_text("B12:B14")?;
        let min_reduction = sheet.column_numbers("K12:K14")?;
        let reduction = sheet.grid_numbers("C12:H14")?;

        let mut upper_bound = Vec::with_capacity(variable_cost.len());
        for j in 0..variable_cost.len() {
            let column = crate::sheet::column_label(2 + j);
            upper_bound.push(sheet.number_or(&format!("{column}21"), 1.0)?);
        }

        debug!(
            sheet = sheet.name(),
            options = variable_cost.len(),
            pollutants = pollutants.len(),
            "loaded abatement sheet"
        );

        Ok(Self {
            options,
            variable_cost,
            stack_fixed_cost,
            pollutants,
            min_reduction,
            reduction,
            upper_bound,
        })
    }

    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::from_sheet(&Sheet::open(data_dir.join(SHEET_FILE))?)
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    /// Fraction of each option used, aligned with [`Data::options`].
    pub fractions: Vec<f64>,
    /// Whether each smokestack option was used at all.
    pub stacks_used: Vec<bool>,
    pub total_cost: f64,
}

pub fn solve(solver: &dyn Solver, data: &Data) -> Result<Outcome> {
    let mut problem = Problem::new("Nori & Leets abatement", Sense::Minimize);

    let x: Vec<_> = data
        .options
        .iter()
        .map(|opt| problem.add_variable(Variable::non_negative(opt.clone())))
        .collect();
    let y: Vec<_> = (0..STACK_OPTIONS)
        .map(|i| problem.add_variable(Variable::binary(format!("use_stacks_{}", i + 1))))
        .collect();

    // Fraction caps for every option.
    for (j, (&v, &ub)) in x.iter().zip(&data.upper_bound).enumerate() {
        problem.add_constraint(Constraint::le(format!("cap_{}", j + 1), [(v, 1.0)], ub));
    }

    // Smokestack use forces its fixed charge: x_j <= ub_j * y_j.
    for (j, &z) in y.iter().enumerate() {
        problem.add_constraint(Constraint::le(
            format!("stack_link_{}", j + 1),
            [(x[j], 1.0), (z, -data.upper_bound[j])],
            0.0,
        ));
    }

    // Mandated reduction per pollutant.
    for (pollutant, (row, &min)) in data
        .pollutants
        .iter()
        .zip(data.reduction.iter().zip(&data.min_reduction))
    {
        problem.add_constraint(Constraint::ge(
            format!("reduce_{pollutant}"),
            x.iter().zip(row).map(|(&v, &r)| (v, r)),
            min,
        ));
    }

    problem.set_objective(
        x.iter()
            .zip(&data.variable_cost)
            .map(|(&v, &c)| (v, c))
            .chain(y.iter().zip(&data.stack_fixed_cost).map(|(&z, &f)| (z, f))),
    );

    let solution = solver.solve(&problem)?;

    Ok(Outcome {
        fractions: x.iter().map(|&v| solution.value(v)).collect(),
        stacks_used: y.iter().map(|&z| solution.is_selected(z)).collect(),
        total_cost: solution.objective(),
    })
}

pub struct PollutionAbatement;

impl Scenario for PollutionAbatement {
    fn name(&self) -> &'static str {
        "pollution-abatement"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Mip
    }

    fn summary(&self) -> &'static str {
        "Nori & Leets: cheapest abatement mix meeting emission reduction minimums"
    }

    fn source(&self) -> DataSource {
        DataSource::Sheet(SHEET_FILE)
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<Report> {
        let data = Data::load(ctx.data_dir)?;
        let outcome = solve(ctx.solver, &data)?;

        let rows = data
            .options
            .iter()
            .zip(&outcome.fractions)
            .map(|(opt, &f)| vec![opt.clone(), super::fmt_value(f)])
            .collect();

        Ok(Report::new(self.name(), "total cost ($M)", outcome.total_cost)
            .with_table(vec!["option".into(), "fraction used".into()], rows)
            .with_key_values([(
                "stacks used (blast, open-hearth)".to_string(),
                format!(
                    "{}, {}",
                    super::fmt_decision(outcome.stacks_used[0]),
                    super::fmt_decision(outcome.stacks_used[1])
                ),
            )]))
    }

    fn data_report(&self, data_dir: &Path) -> Result<Option<Report>> {
        let data = Data::load(data_dir)?;

        let header = std::iter::once("pollutant".to_string())
            .chain(data.options.iter().cloned())
            .chain(std::iter::once("required".to_string()))
            .collect();
        let rows = data
            .pollutants
            .iter()
            .zip(data.reduction.iter().zip(&data.min_reduction))
            .map(|(pollutant, (row, &min))| {
                std::iter::once(pollutant.clone())
                    .chain(row.iter().map(|&r| super::fmt_value(r)))
                    .chain(std::iter::once(super::fmt_value(min)))
                    .collect()
            })
            .collect();

        Ok(Some(Report::data(self.name()).with_table(header, rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::HighsSolver;

    #[test]
    fn optimum_meets_every_reduction_minimum() {
        let data = Data::default();
        let outcome = solve(&HighsSolver::new(), &data).unwrap();

        for (row, &min) in data.reduction.iter().zip(&data.min_reduction) {
            let achieved: f64 = row
                .iter()
                .zip(&outcome.fractions)
                .map(|(&r, &f)| r * f)
                .sum();
            assert!(achieved >= min - 1e-6, "achieved {achieved}, required {min}");
        }

        // Cheaper than simply running everything flat out.
        let all_in: f64 =
            data.variable_cost.iter().sum::<f64>() + data.stack_fixed_cost.iter().sum::<f64>();
        assert!(outcome.total_cost < all_in);
    }

    #[test]
    fn stack_use_forces_its_fixed_charge() {
        let data = Data::default();
        let outcome = solve(&HighsSolver::new(), &data).unwrap();

        for (j, &fraction) in outcome.fractions.iter().take(STACK_OPTIONS).enumerate() {
            if fraction > 1e-6 {
                assert!(
                    outcome.stacks_used[j],
                    "stack option {j} used without paying its fixed charge"
                );
            }
        }
    }

    #[test]
    fn fractions_respect_their_caps() {
        let data = Data {
            upper_bound: vec![1.0, 1.0, 0.5, 1.0, 1.0, 0.25],
            ..Data::default()
        };
        let outcome = solve(&HighsSolver::new(), &data).unwrap();
        for (&f, &ub) in outcome.fractions.iter().zip(&data.upper_bound) {
            assert!(f <= ub + 1e-6);
        }
    }
}

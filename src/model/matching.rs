//! Maximum-weight matching on a small friendship graph: pair people up along
//! the given edges so nobody appears in more than one pair, maximizing the
//! total compatibility weight. Solved as a BIP with one binary per edge and a
//! degree constraint per person. With unit weights this is plain
//! maximum-cardinality matching, which is what the baked instance uses.

use crate::error::Result;
use crate::solver::{Constraint, Problem, Sense, Solver, Variable};

use super::{DataSource, ModelKind, Report, RunContext, Scenario};

/// An undirected edge with endpoints in sorted order.
#[derive(Debug, Clone)]
pub struct Edge {
    pub a: String,
    pub b: String,
    /// Compatibility weight of the pair.
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct Data {
    pub people: Vec<String>,
    pub edges: Vec<Edge>,
}

impl Default for Data {
    fn default() -> Self {
        Self::new(
            ["A", "B", "C", "D", "E"].map(String::from),
            [
                ("A".into(), "B".into()),
                ("A".into(), "C".into()),
                ("B".into(), "D".into()),
                ("C".into(), "E".into()),
            ],
        )
    }
}

impl Data {
    /// Unit-weight edges, endpoints normalized so `("B", "A")` and
    /// `("A", "B")` describe the same pair.
    pub fn new(
        people: impl IntoIterator<Item = String>,
        edges: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self::weighted(people, edges.into_iter().map(|(a, b)| (a, b, 1.0)))
    }

    /// Weighted edges, endpoints normalized.
    pub fn weighted(
        people: impl IntoIterator<Item = String>,
        edges: impl IntoIterator<Item = (String, String, f64)>,
    ) -> Self {
        let edges = edges
            .into_iter()
            .map(|(a, b, weight)| {
                let (a, b) = if a <= b { (a, b) } else { (b, a) };
                Edge { a, b, weight }
            })
            .collect();
        Self {
            people: people.into_iter().collect(),
            edges,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    /// The pairs in the matching.
    pub pairs: Vec<(String, String)>,
    pub total_weight: f64,
}

pub fn solve(solver: &dyn Solver, data: &Data) -> Result<Outcome> {
    let mut problem = Problem::new("Matching", Sense::Maximize);

    let x: Vec<_> = data
        .edges
        .iter()
        .map(|e| problem.add_variable(Variable::binary(format!("{}{}", e.a, e.b))))
        .collect();

    problem.set_objective(x.iter().zip(&data.edges).map(|(&v, e)| (v, e.weight)));

    // Each person appears in at most one chosen pair.
    for person in &data.people {
        let incident: Vec<_> = x
            .iter()
            .zip(&data.edges)
            .filter(|(_, e)| &e.a == person || &e.b == person)
            .map(|(&v, _)| (v, 1.0))
            .collect();
        if !incident.is_empty() {
            problem.add_constraint(Constraint::le(format!("degree_{person}"), incident, 1.0));
        }
    }

    let solution = solver.solve(&problem)?;

    let pairs = x
        .iter()
        .zip(&data.edges)
        .filter(|(&v, _)| solution.is_selected(v))
        .map(|(_, e)| (e.a.clone(), e.b.clone()))
        .collect();

    Ok(Outcome {
        pairs,
        total_weight: solution.objective(),
    })
}

pub struct Matching;

impl Scenario for Matching {
    fn name(&self) -> &'static str {
        "matching"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Bip
    }

    fn summary(&self) -> &'static str {
        "Pair up people along friendship edges for the best total weight"
    }

    fn source(&self) -> DataSource {
        DataSource::Baked
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<Report> {
        let outcome = solve(ctx.solver, &Data::default())?;

        let lines = outcome
            .pairs
            .iter()
            .map(|(a, b)| format!("{a} - {b}"))
            .collect::<Vec<_>>();

        Ok(
            Report::new(self.name(), "total match weight", outcome.total_weight)
                .with_lines(lines),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::HighsSolver;

    #[test]
    fn two_pairs_is_the_best_matching() {
        let data = Data::default();
        let outcome = solve(&HighsSolver::new(), &data).unwrap();

        assert_eq!(outcome.pairs.len(), 2);
        assert!((outcome.total_weight - 2.0).abs() < 1e-6);

        // The matching is valid: no person in two pairs.
        let mut seen = Vec::new();
        for (a, b) in &outcome.pairs {
            assert!(!seen.contains(a));
            assert!(!seen.contains(b));
            seen.push(a.clone());
            seen.push(b.clone());
        }
    }

    #[test]
    fn edge_endpoints_are_normalized() {
        let data = Data::new(
            ["A".to_string(), "B".to_string()],
            [("B".to_string(), "A".to_string())],
        );
        assert_eq!(data.edges[0].a, "A");
        assert_eq!(data.edges[0].b, "B");
        assert!((data.edges[0].weight - 1.0).abs() < 1e-9);
    }

    #[test]
    fn heavy_pair_beats_two_light_ones() {
        // One weight-5 pair outweighs the two disjoint unit pairs that
        // exclude it.
        let data = Data::weighted(
            ["A", "B", "C", "D"].map(String::from),
            [
                ("A".into(), "B".into(), 5.0),
                ("A".into(), "C".into(), 1.0),
                ("B".into(), "D".into(), 1.0),
            ],
        );
        let outcome = solve(&HighsSolver::new(), &data).unwrap();

        assert_eq!(outcome.pairs, vec![("A".to_string(), "B".to_string())]);
        assert!((outcome.total_weight - 5.0).abs() < 1e-6);
    }

    #[test]
    fn isolated_people_do_not_break_the_model() {
        let data = Data::new(
            ["A".to_string(), "B".to_string(), "Z".to_string()],
            [("A".to_string(), "B".to_string())],
        );
        let outcome = solve(&HighsSolver::new(), &data).unwrap();
        assert_eq!(outcome.pairs.len(), 1);
    }
}

//! LP/MIP problem representation and solver abstraction.
//!
//! Nothing in this module solves anything. A [`Problem`] is a plain
//! description of decision variables, linear constraints and one linear
//! objective; the [`Solver`] trait hands it to an external engine and reads
//! the optimal values back.

mod highs;

pub use highs::HighsSolver;

use crate::error::Result;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// Variable domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Continuous,
    Integer,
    Binary,
}

/// Handle to a variable of a [`Problem`], returned by [`Problem::add_variable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(usize);

impl VarId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A decision variable definition: name, domain and bounds.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub domain: Domain,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl Variable {
    /// Free continuous variable.
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: Domain::Continuous,
            lower: None,
            upper: None,
        }
    }

    /// Continuous variable with lower bound zero.
    pub fn non_negative(name: impl Into<String>) -> Self {
        Self::continuous(name).with_lower(0.0)
    }

    /// 0/1 decision variable.
    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: Domain::Binary,
            lower: Some(0.0),
            upper: Some(1.0),
        }
    }

    /// Integer variable with lower bound zero.
    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: Domain::Integer,
            lower: Some(0.0),
            upper: None,
        }
    }

    pub fn with_lower(mut self, lower: f64) -> Self {
        self.lower = Some(lower);
        self
    }

    pub fn with_upper(mut self, upper: f64) -> Self {
        self.upper = Some(upper);
        self
    }

    pub fn with_bounds(self, lower: f64, upper: f64) -> Self {
        self.with_lower(lower).with_upper(upper)
    }
}

/// Constraint relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessEqual,
    GreaterEqual,
    Equal,
}

/// A linear constraint: `sum(coefficient * variable) <relation> rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub label: String,
    pub terms: Vec<(VarId, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

impl Constraint {
    fn new(
        label: impl Into<String>,
        terms: impl IntoIterator<Item = (VarId, f64)>,
        relation: Relation,
        rhs: f64,
    ) -> Self {
        Self {
            label: label.into(),
            terms: terms.into_iter().collect(),
            relation,
            rhs,
        }
    }

    pub fn le(
        label: impl Into<String>,
        terms: impl IntoIterator<Item = (VarId, f64)>,
        rhs: f64,
    ) -> Self {
        Self::new(label, terms, Relation::LessEqual, rhs)
    }

    pub fn ge(
        label: impl Into<String>,
        terms: impl IntoIterator<Item = (VarId, f64)>,
        rhs: f64,
    ) -> Self {
        Self::new(label, terms, Relation::GreaterEqual, rhs)
    }

    pub fn eq(
        label: impl Into<String>,
        terms: impl IntoIterator<Item = (VarId, f64)>,
        rhs: f64,
    ) -> Self {
        Self::new(label, terms, Relation::Equal, rhs)
    }
}

/// A linear or mixed-integer program.
#[derive(Debug, Clone)]
pub struct Problem {
    name: String,
    sense: Sense,
    variables: Vec<Variable>,
    objective: Vec<(VarId, f64)>,
    objective_offset: f64,
    constraints: Vec<Constraint>,
}

impl Problem {
    pub fn new(name: impl Into<String>, sense: Sense) -> Self {
        Self {
            name: name.into(),
            sense,
            variables: Vec::new(),
            objective: Vec::new(),
            objective_offset: 0.0,
            constraints: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn add_variable(&mut self, variable: Variable) -> VarId {
        self.variables.push(variable);
        VarId(self.variables.len() - 1)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Replace the objective with `sum(coefficient * variable)`.
    pub fn set_objective(&mut self, terms: impl IntoIterator<Item = (VarId, f64)>) {
        self.objective = terms.into_iter().collect();
    }

    /// Constant added to the objective after solving.
    pub fn set_objective_offset(&mut self, offset: f64) {
        self.objective_offset = offset;
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.0]
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &[(VarId, f64)] {
        &self.objective
    }

    pub fn objective_offset(&self) -> f64 {
        self.objective_offset
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// True when any variable is integer or binary.
    pub fn is_mixed_integer(&self) -> bool {
        self.variables
            .iter()
            .any(|v| v.domain != Domain::Continuous)
    }
}

/// Optimal values read back from a solved [`Problem`].
#[derive(Debug, Clone)]
pub struct Solution {
    values: Vec<f64>,
    objective: f64,
}

impl Solution {
    pub(crate) fn new(values: Vec<f64>, objective: f64) -> Self {
        Self { values, objective }
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn value(&self, id: VarId) -> f64 {
        self.values[id.0]
    }

    /// Read a binary variable back as a yes/no decision.
    ///
    /// MIP engines report binaries as floats near 0 or 1, so the value is
    /// compared against 0.5 rather than exactly 1.
    pub fn is_selected(&self, id: VarId) -> bool {
        self.values[id.0] > 0.5
    }
}

/// An external optimization engine.
pub trait Solver {
    fn name(&self) -> &'static str;

    fn solve(&self, problem: &Problem) -> Result<Solution>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_variables_are_bounded() {
        let v = Variable::binary("pick");
        assert_eq!(v.domain, Domain::Binary);
        assert_eq!(v.lower, Some(0.0));
        assert_eq!(v.upper, Some(1.0));
    }

    #[test]
    fn problem_tracks_variables_and_constraints() {
        let mut p = Problem::new("test", Sense::Maximize);
        let x = p.add_variable(Variable::non_negative("x"));
        let y = p.add_variable(Variable::non_negative("y"));
        p.add_constraint(Constraint::le("cap", [(x, 1.0), (y, 1.0)], 10.0));
        p.set_objective([(x, 3.0), (y, 5.0)]);

        assert_eq!(p.num_variables(), 2);
        assert_eq!(p.num_constraints(), 1);
        assert!(!p.is_mixed_integer());
        assert_eq!(p.variable(x).name, "x");
        assert_eq!(p.constraints()[0].relation, Relation::LessEqual);
    }

    #[test]
    fn mixed_integer_detection() {
        let mut p = Problem::new("test", Sense::Minimize);
        p.add_variable(Variable::non_negative("flow"));
        assert!(!p.is_mixed_integer());
        p.add_variable(Variable::binary("open"));
        assert!(p.is_mixed_integer());
    }

    #[test]
    fn selection_threshold_is_half() {
        let solution = Solution::new(vec![0.9999, 0.0001, 0.4], 0.0);
        assert!(solution.is_selected(VarId(0)));
        assert!(!solution.is_selected(VarId(1)));
        assert!(!solution.is_selected(VarId(2)));
    }
}

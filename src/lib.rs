//! Classroom linear and integer programming models, solved with HiGHS.
//!
//! Each scenario in [`model`] builds one [`solver::Problem`] from baked-in
//! lecture constants or a coefficient sheet, hands it to the solver backend
//! and interprets the optimal values into a printable report.

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod sheet;
pub mod solver;

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while reading coefficient sheets.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("failed to read sheet {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("sheet not found: {0}")]
    NotFound(PathBuf),

    #[error("malformed cell address '{0}'")]
    Address(String),

    #[error("malformed range '{range}': {reason}")]
    Range { range: String, reason: &'static str },

    #[error("{sheet}!{cell} is empty")]
    EmptyCell { sheet: String, cell: String },

    #[error("{sheet}!{cell}: expected a number, found '{found}'")]
    NonNumeric {
        sheet: String,
        cell: String,
        found: String,
    },
}

/// Errors raised while handing a model to the solver or reading it back.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("'{problem}' is infeasible")]
    Infeasible { problem: String },

    #[error("'{problem}' is unbounded")]
    Unbounded { problem: String },

    #[error("constraint '{constraint}' references a variable that does not belong to '{problem}'")]
    UnknownVariable { problem: String, constraint: String },

    #[error("input data for '{problem}' cannot be feasible: {reason}")]
    InfeasibleData { problem: String, reason: String },

    #[error("solver failure on '{problem}': {reason}")]
    Backend { problem: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error("unknown scenario '{0}' (run 'orlab list' to see what is available)")]
    UnknownScenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

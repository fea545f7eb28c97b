//! # I/O Module
//!
//! CSV boundaries of a selection round: reading the prediction samples produced by a
//! model ensemble, and writing the ranked selections handed to the simulation scheduler.
//!
//! - [`predictions`] - Sample tensors shaped `(objectives, candidates, ensemble members)`
//! - [`selections`] - `rank,key,score` tables of dispensed computations

pub mod predictions;
pub mod selections;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Sample values do not form a complete tensor: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("First column must be 'key', found '{found}'")]
    MissingKeyColumn { found: String },
    #[error("No ensemble member columns found after the key column")]
    NoMemberColumns,
    #[error("Invalid value '{value}' for column '{column}' on line {line}")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },
    #[error("Invalid objective index '{value}' on line {line}")]
    InvalidObjective { line: u64, value: String },
    #[error("Objective {objective} has no rows although higher objectives do")]
    MissingObjective { objective: usize },
    #[error("Keys for objective {objective} differ from those of objective 0")]
    MismatchedKeys { objective: usize },
}

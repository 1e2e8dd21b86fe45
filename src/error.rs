//! Error definitions for data preparation
use thiserror::Error;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("not enough samples")]
    NotEnoughSamples,
    #[error("column '{0}' not found in the input data")]
    MissingColumn(String),
    #[error("column '{column}' holds non-numeric value '{value}'")]
    NotNumeric { column: String, value: String },
    #[error("column {0} has no observed values to impute from")]
    EmptyColumn(usize),
    #[error("unknown category '{category}' in column '{column}'")]
    UnknownCategory { column: String, category: String },
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ndarray::ShapeError),
    #[error("reading tabular data failed: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("serializing preprocessing object failed: {0}")]
    Serialization(#[from] bincode::Error),
    #[error(transparent)]
    LinfaError(#[from] linfa::error::Error),
}

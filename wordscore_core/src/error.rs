//! Error type shared by scoring, sheet import and configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Row {row}: missing target text")]
    MissingTarget { row: usize },

    #[error("Sheet error: {0}")]
    Sheet(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "python")]
impl From<ScoreError> for pyo3::PyErr {
    fn from(err: ScoreError) -> Self {
        match err {
            ScoreError::InvalidInput(_) => pyo3::exceptions::PyTypeError::new_err(err.to_string()),
            ScoreError::Config(_) => pyo3::exceptions::PyValueError::new_err(err.to_string()),
            _ => pyo3::exceptions::PyRuntimeError::new_err(err.to_string()),
        }
    }
}

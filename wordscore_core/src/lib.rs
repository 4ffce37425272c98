//! WordScore Core - typo-tolerant keyword accuracy scoring
//!
//! Scores how many target keywords a free-form response reproduces, allowing
//! small spelling errors. Built with the `python` feature it is also a Python
//! extension module.

mod accuracy;
mod batch;
mod config;
mod distance;
mod error;
mod response;
mod sheet;

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub use accuracy::{score, score_detailed, score_with, AccuracyResult, ScoreReport, TokenMatch};
pub use batch::{score_batch, BatchReport, BatchStats};
pub use config::{Config, Thresholds};
pub use distance::{edit_distance, normalized_distance};
pub use error::ScoreError;
pub use response::{tokenize, Response};
pub use sheet::{load_sheet, GradingRow, SheetOptions};

/// WordScore Core Python Module
#[cfg(feature = "python")]
#[pymodule]
fn wordscore_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Scoring
    m.add_function(wrap_pyfunction!(distance::py_edit_distance, m)?)?;
    m.add_function(wrap_pyfunction!(accuracy::py_score, m)?)?;
    m.add_function(wrap_pyfunction!(accuracy::py_score_detailed, m)?)?;

    // Sheets
    m.add_function(wrap_pyfunction!(batch::py_score_sheet, m)?)?;

    // Register classes
    m.add_class::<accuracy::AccuracyResult>()?;
    m.add_class::<accuracy::TokenMatch>()?;
    m.add_class::<accuracy::ScoreReport>()?;
    m.add_class::<batch::BatchStats>()?;
    m.add_class::<batch::BatchReport>()?;

    Ok(())
}

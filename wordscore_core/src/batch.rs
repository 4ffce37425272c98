//! Batch scoring and aggregate statistics

#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::accuracy::{round1, score_with, AccuracyResult};
use crate::config::Thresholds;
use crate::error::ScoreError;
use crate::sheet::GradingRow;

/// Totals across a batch of scored items
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub items: usize,
    pub blank_responses: usize,
    pub correct: usize,
    pub total: usize,
    /// Pooled over all keywords
    pub accuracy_percent: f64,
    /// Average of the per-item accuracies
    pub mean_accuracy: f64,
}

#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<AccuracyResult>,
    pub stats: BatchStats,
}

impl BatchStats {
    pub fn from_results<'a, I>(results: I, blank_responses: usize) -> Self
    where
        I: IntoIterator<Item = &'a AccuracyResult>,
    {
        let mut stats = BatchStats {
            blank_responses,
            ..Default::default()
        };
        let mut accuracy_sum = 0.0;
        for result in results {
            stats.items += 1;
            stats.correct += result.correct;
            stats.total += result.total;
            accuracy_sum += result.accuracy;
        }

        stats.accuracy_percent = AccuracyResult::new(stats.correct, stats.total).accuracy;
        stats.mean_accuracy = if stats.items > 0 {
            round1(accuracy_sum / stats.items as f64)
        } else {
            0.0
        };
        stats
    }
}

/// Score every row. Any row without a target fails the whole batch.
pub fn score_batch(
    rows: &[GradingRow],
    thresholds: &Thresholds,
) -> Result<BatchReport, ScoreError> {
    if let Some(row) = rows.iter().find(|r| r.target.is_none()) {
        return Err(ScoreError::MissingTarget { row: row.row });
    }

    let results: Vec<AccuracyResult> = rows
        .iter()
        .map(|r| {
            let target = r.target.as_deref().unwrap_or_default();
            score_with(target, &r.response, thresholds)
        })
        .collect();
    let blank_responses = rows.iter().filter(|r| r.response.is_blank()).count();
    let stats = BatchStats::from_results(&results, blank_responses);

    tracing::debug!(
        items = stats.items,
        correct = stats.correct,
        total = stats.total,
        "scored batch"
    );
    Ok(BatchReport { results, stats })
}

// ============= Python Bindings =============

#[cfg(feature = "python")]
#[pymethods]
impl BatchStats {
    fn __repr__(&self) -> String {
        format!(
            "BatchStats(items={}, correct={}, total={}, accuracy={:.1}%)",
            self.items, self.correct, self.total, self.accuracy_percent
        )
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl BatchReport {
    fn __repr__(&self) -> String {
        format!(
            "BatchReport(items={}, accuracy={:.1}%)",
            self.stats.items, self.stats.accuracy_percent
        )
    }
}

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(
    name = "score_sheet",
    signature = (
        path,
        target_column=None,
        response_column=None,
        max_distance=None,
        max_normalized=None
    )
)]
pub fn py_score_sheet(
    path: &str,
    target_column: Option<String>,
    response_column: Option<String>,
    max_distance: Option<usize>,
    max_normalized: Option<f64>,
) -> PyResult<BatchReport> {
    let thresholds = crate::accuracy::thresholds_from(max_distance, max_normalized)?;
    let options = crate::sheet::SheetOptions {
        target_column,
        response_column,
    };
    let rows = crate::sheet::load_sheet(path, &options)?;
    Ok(score_batch(&rows, &thresholds)?)
}

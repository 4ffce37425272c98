//! Keyword accuracy scoring
//!
//! Response tokens are paired greedily, left to right, with the closest target
//! token that no earlier response token has claimed. Ties go to the earliest
//! target position. A pair counts only when it passes [`Thresholds::accepts`].

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyDict;
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::distance::{edit_distance, normalize};
use crate::response::{tokenize, Response};

/// Correct / total keyword counts for one response
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyResult {
    pub correct: usize,
    pub total: usize,
    /// Percentage rounded to one decimal place
    pub accuracy: f64,
}

impl AccuracyResult {
    pub fn new(correct: usize, total: usize) -> Self {
        Self {
            correct,
            total,
            accuracy: percent(correct, total),
        }
    }
}

/// Outcome for a single response token
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMatch {
    pub response_token: String,
    /// Closest unused target position; `None` once every target was claimed
    pub target_index: Option<usize>,
    pub target_token: Option<String>,
    pub distance: Option<usize>,
    pub normalized: Option<f64>,
    pub accepted: bool,
}

/// Result plus the per-token decisions that produced it
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub result: AccuracyResult,
    pub matches: Vec<TokenMatch>,
    /// Target tokens no response token claimed, in target order
    pub unmatched_targets: Vec<String>,
}

impl ScoreReport {
    /// One-line message for the person who gave the response
    pub fn feedback(&self) -> String {
        let AccuracyResult {
            correct,
            total,
            accuracy,
        } = self.result;
        if total == 0 {
            "Nothing to score".to_string()
        } else if correct == total {
            "Perfect! ✓".to_string()
        } else if self.matches.is_empty() {
            format!("No response. Expected: '{}'", self.unmatched_targets.join(" "))
        } else {
            format!(
                "{}/{} keywords ({:.1}%). Missed: '{}'",
                correct,
                total,
                accuracy,
                self.unmatched_targets.join(", ")
            )
        }
    }
}

/// 100 * correct / total to one decimal; 0.0 for no targets.
fn percent(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(100.0 * correct as f64 / total as f64)
}

/// Round to one decimal from the exact decimal value of `value`, halves to
/// even, the same result as Python's `round(value, 1)`.
pub(crate) fn round1(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Score with the default thresholds.
pub fn score(target: &str, response: &Response) -> AccuracyResult {
    score_with(target, response, &Thresholds::default())
}

pub fn score_with(target: &str, response: &Response, thresholds: &Thresholds) -> AccuracyResult {
    score_detailed(target, response, thresholds).result
}

/// Score and keep every token decision.
pub fn score_detailed(target: &str, response: &Response, thresholds: &Thresholds) -> ScoreReport {
    let target_tokens = tokenize(target);

    let response_text = match response.as_text() {
        Some(text) if !response.is_blank() => text,
        _ => {
            tracing::debug!(total = target_tokens.len(), "blank response");
            return ScoreReport {
                result: AccuracyResult::new(0, target_tokens.len()),
                matches: Vec::new(),
                unmatched_targets: target_tokens,
            };
        }
    };

    let mut used = vec![false; target_tokens.len()];
    let mut correct = 0;
    let mut matches = Vec::new();

    for token in tokenize(response_text) {
        let best = target_tokens
            .iter()
            .enumerate()
            .filter(|(i, _)| !used[*i])
            .map(|(i, candidate)| (i, edit_distance(&token, candidate)))
            .fold(None, |best: Option<(usize, usize)>, (i, dist)| match best {
                Some((_, best_dist)) if best_dist <= dist => best,
                _ => Some((i, dist)),
            });

        let Some((index, dist)) = best else {
            // Every target is taken; the rest of the response cannot score
            matches.push(TokenMatch {
                response_token: token,
                target_index: None,
                target_token: None,
                distance: None,
                normalized: None,
                accepted: false,
            });
            continue;
        };

        let candidate = &target_tokens[index];
        let normalized = normalize(dist, &token, candidate);
        let accepted = thresholds.accepts(dist, normalized);
        if accepted {
            used[index] = true;
            correct += 1;
        }
        tracing::trace!(
            token = %token,
            candidate = %candidate,
            dist,
            normalized,
            accepted,
            "token decision"
        );

        matches.push(TokenMatch {
            response_token: token,
            target_index: Some(index),
            target_token: Some(candidate.clone()),
            distance: Some(dist),
            normalized: Some(normalized),
            accepted,
        });
    }

    let result = AccuracyResult::new(correct, target_tokens.len());
    tracing::debug!(
        correct,
        total = result.total,
        accuracy = result.accuracy,
        "scored response"
    );

    let unmatched_targets = target_tokens
        .into_iter()
        .zip(used)
        .filter_map(|(token, used)| (!used).then_some(token))
        .collect();

    ScoreReport {
        result,
        matches,
        unmatched_targets,
    }
}

// ============= Python Bindings =============

#[cfg(feature = "python")]
#[pymethods]
impl AccuracyResult {
    fn __repr__(&self) -> String {
        format!(
            "AccuracyResult(correct={}, total={}, accuracy={:.1})",
            self.correct, self.total, self.accuracy
        )
    }

    /// Same shape as the plain dict record: correct, total, accuracy
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("correct", self.correct)?;
        dict.set_item("total", self.total)?;
        dict.set_item("accuracy", self.accuracy)?;
        Ok(dict)
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl TokenMatch {
    fn __repr__(&self) -> String {
        format!(
            "TokenMatch(response='{}', target={:?}, distance={:?}, accepted={})",
            self.response_token, self.target_token, self.distance, self.accepted
        )
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl ScoreReport {
    fn __repr__(&self) -> String {
        format!(
            "ScoreReport(correct={}, total={}, unmatched={:?})",
            self.result.correct, self.result.total, self.unmatched_targets
        )
    }

    #[pyo3(name = "feedback")]
    fn py_feedback(&self) -> String {
        self.feedback()
    }
}

#[cfg(feature = "python")]
pub(crate) fn thresholds_from(
    max_distance: Option<usize>,
    max_normalized: Option<f64>,
) -> PyResult<Thresholds> {
    let defaults = Thresholds::default();
    let thresholds = Thresholds {
        max_distance: max_distance.unwrap_or(defaults.max_distance),
        max_normalized: max_normalized.unwrap_or(defaults.max_normalized),
    };
    thresholds.validate()?;
    Ok(thresholds)
}

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(
    name = "score",
    signature = (target, response=None, max_distance=None, max_normalized=None)
)]
pub fn py_score(
    target: &str,
    response: Option<Response>,
    max_distance: Option<usize>,
    max_normalized: Option<f64>,
) -> PyResult<AccuracyResult> {
    let thresholds = thresholds_from(max_distance, max_normalized)?;
    Ok(score_with(target, &response.unwrap_or_default(), &thresholds))
}

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(
    name = "score_detailed",
    signature = (target, response=None, max_distance=None, max_normalized=None)
)]
pub fn py_score_detailed(
    target: &str,
    response: Option<Response>,
    max_distance: Option<usize>,
    max_normalized: Option<f64>,
) -> PyResult<ScoreReport> {
    let thresholds = thresholds_from(max_distance, max_normalized)?;
    Ok(score_detailed(target, &response.unwrap_or_default(), &thresholds))
}

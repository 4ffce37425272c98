//! Response values and tokenization

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::{PyFloat, PyInt, PyString};
use serde::{Deserialize, Serialize};

/// A response as handed to the scorer.
///
/// `Missing` and `NotANumber` model the absent-value markers that spreadsheets
/// and data frames produce for unanswered items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Response {
    #[default]
    Missing,
    NotANumber,
    Text(String),
}

impl Response {
    /// Numeric cells are scored by their text; NaN counts as no answer.
    ///
    /// The text is the shortest round-trip spelling with a `.0` on whole
    /// numbers and a signed two-digit exponent (`7.0`, `1e+21`, `1e-05`),
    /// which is also how Python prints a float.
    pub fn from_number(value: f64) -> Self {
        if value.is_nan() {
            Response::NotANumber
        } else {
            Response::Text(float_text(value))
        }
    }

    /// True when there is nothing to score.
    pub fn is_blank(&self) -> bool {
        match self {
            Response::Missing | Response::NotANumber => true,
            Response::Text(text) => text.chars().all(is_separator),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Response::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for Response {
    fn from(text: &str) -> Self {
        Response::Text(text.to_string())
    }
}

impl From<String> for Response {
    fn from(text: String) -> Self {
        Response::Text(text)
    }
}

impl<T: Into<Response>> From<Option<T>> for Response {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Response::Missing)
    }
}

/// Unicode whitespace plus the ASCII file, group, record and unit
/// separators (U+001C..U+001F), which Python's `str.split()` also splits on.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Lowercase and split on runs of whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(is_separator)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

fn float_text(value: f64) -> String {
    // Debug already switches to an exponent outside 1e-4..1e16
    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

// ============= Python Conversion =============

#[cfg(feature = "python")]
impl<'py> FromPyObject<'py> for Response {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        if ob.is_none() {
            return Ok(Response::Missing);
        }
        if let Ok(text) = ob.downcast::<PyString>() {
            return Ok(Response::Text(text.to_cow()?.into_owned()));
        }
        if let Ok(number) = ob.downcast::<PyFloat>() {
            return Ok(Response::from_number(number.value()));
        }
        // bool is an int subclass
        if ob.is_instance_of::<PyInt>() {
            return Ok(Response::Text(ob.str()?.to_cow()?.into_owned()));
        }

        Err(crate::ScoreError::InvalidInput(format!(
            "response must be str, a number or None, got '{}'",
            ob.get_type().name()?
        ))
        .into())
    }
}

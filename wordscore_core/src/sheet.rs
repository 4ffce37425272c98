//! Grading sheet import (Excel and CSV)
//!
//! A sheet is one header row followed by one row per graded item, with a
//! target column and a response column. Other columns are ignored.

use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ScoreError;
use crate::response::Response;

const TARGET_ALIASES: &[&str] = &["target", "targets", "keywords", "expected", "answer"];
const RESPONSE_ALIASES: &[&str] = &[
    "response",
    "responses",
    "transcription",
    "transcript",
    "recall",
    "input",
];

/// Column names to look for instead of the built-in aliases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetOptions {
    #[serde(default)]
    pub target_column: Option<String>,
    #[serde(default)]
    pub response_column: Option<String>,
}

/// One graded item read from a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingRow {
    /// 1-based sheet row, header included
    pub row: usize,
    pub target: Option<String>,
    pub response: Response,
}

/// Column index mapping
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnMapping {
    target: usize,
    response: usize,
}

/// Parse a sheet, picking the reader from the file extension
pub fn load_sheet<P: AsRef<Path>>(
    path: P,
    options: &SheetOptions,
) -> Result<Vec<GradingRow>, ScoreError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => parse_workbook(path, options)?,
        "csv" => parse_csv(path, options)?,
        _ => {
            return Err(ScoreError::Sheet(format!(
                "Unsupported file format: .{}",
                extension
            )))
        }
    };

    tracing::info!("Loaded {} grading rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn find_column(headers: &[String], configured: Option<&str>, aliases: &[&str]) -> Option<usize> {
    let same = |header: &String, name: &str| header.trim().eq_ignore_ascii_case(name.trim());
    match configured {
        Some(name) => headers.iter().position(|h| same(h, name)),
        None => aliases
            .iter()
            .find_map(|&alias| headers.iter().position(|h| same(h, alias))),
    }
}

/// Detect column indices from header names
fn detect_columns(
    headers: &[String],
    options: &SheetOptions,
) -> Result<ColumnMapping, ScoreError> {
    let target = find_column(headers, options.target_column.as_deref(), TARGET_ALIASES)
        .ok_or_else(|| {
            ScoreError::Sheet(format!(
                "Missing target column '{}' in header",
                options.target_column.as_deref().unwrap_or("target")
            ))
        })?;
    let response = find_column(headers, options.response_column.as_deref(), RESPONSE_ALIASES)
        .ok_or_else(|| {
            ScoreError::Sheet(format!(
                "Missing response column '{}' in header",
                options.response_column.as_deref().unwrap_or("response")
            ))
        })?;

    if target == response {
        return Err(ScoreError::Sheet(
            "Target and response must be different columns".to_string(),
        ));
    }
    Ok(ColumnMapping { target, response })
}

/// Empty target and blank response together mean a spacer row
fn push_row(rows: &mut Vec<GradingRow>, row: usize, target: Option<String>, response: Response) {
    if target.is_none() && response.is_blank() {
        return;
    }
    rows.push(GradingRow {
        row,
        target,
        response,
    });
}

/// Parse the first worksheet of a workbook
fn parse_workbook(path: &Path, options: &SheetOptions) -> Result<Vec<GradingRow>, ScoreError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ScoreError::Sheet(format!("Failed to open workbook: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ScoreError::Sheet("No sheets found in workbook".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ScoreError::Sheet(format!("Failed to read sheet: {}", e)))?;

    let mut sheet_rows = range.rows();
    let header_row = sheet_rows
        .next()
        .ok_or_else(|| ScoreError::Sheet("Empty file - no header row".to_string()))?;
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_to_target(cell).unwrap_or_default())
        .collect();
    let mapping = detect_columns(&headers, options)?;

    let mut rows = Vec::new();
    for (i, row) in sheet_rows.enumerate() {
        let target = row.get(mapping.target).and_then(cell_to_target);
        let response = row
            .get(mapping.response)
            .map(cell_to_response)
            .unwrap_or_default();
        push_row(&mut rows, i + 2, target, response);
    }
    Ok(rows)
}

/// Parse a CSV file; empty fields are missing values
fn parse_csv(path: &Path, options: &SheetOptions) -> Result<Vec<GradingRow>, ScoreError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ScoreError::Sheet(format!("Failed to open CSV file: {}", e)))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ScoreError::Sheet(format!("Failed to read CSV headers: {}", e)))?
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mapping = detect_columns(&headers, options)?;

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| ScoreError::Sheet(format!("Failed to read CSV row: {}", e)))?;

        let target = record
            .get(mapping.target)
            .and_then(|field| target_text(Response::from(field)));
        let response = match record.get(mapping.response) {
            Some(field) if !field.is_empty() => Response::from(field),
            _ => Response::Missing,
        };
        push_row(&mut rows, i + 2, target, response);
    }
    Ok(rows)
}

/// Convert a workbook cell; error cells such as `#N/A` count as no answer
fn cell_to_response(cell: &Data) -> Response {
    match cell {
        Data::String(s) => Response::Text(s.clone()),
        Data::Int(i) => Response::Text(i.to_string()),
        Data::Float(f) => Response::from_number(*f),
        Data::Bool(b) => Response::Text(b.to_string()),
        Data::DateTime(dt) => Response::Text(dt.to_string()),
        Data::DateTimeIso(s) => Response::Text(s.clone()),
        Data::DurationIso(s) => Response::Text(s.clone()),
        Data::Error(_) => Response::NotANumber,
        Data::Empty => Response::Missing,
    }
}

fn cell_to_target(cell: &Data) -> Option<String> {
    target_text(cell_to_response(cell))
}

/// Non-blank text, trimmed
fn target_text(value: Response) -> Option<String> {
    if value.is_blank() {
        return None;
    }
    value.as_text().map(|text| text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use std::fs;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.csv");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn detects_aliases_case_insensitively() {
        let names = headers(&["id", " Keywords ", "TRANSCRIPT"]);
        let mapping = detect_columns(&names, &SheetOptions::default()).unwrap();
        assert_eq!(
            mapping,
            ColumnMapping {
                target: 1,
                response: 2
            }
        );
    }

    #[test]
    fn configured_names_win() {
        let options = SheetOptions {
            target_column: Some("gold".to_string()),
            response_column: Some("said".to_string()),
        };
        let mapping = detect_columns(&headers(&["target", "said", "gold"]), &options).unwrap();
        assert_eq!(
            mapping,
            ColumnMapping {
                target: 2,
                response: 1
            }
        );
    }

    #[test]
    fn missing_column_is_an_error() {
        let names = headers(&["target", "notes"]);
        let err = detect_columns(&names, &SheetOptions::default()).unwrap_err();
        assert!(err.to_string().contains("response"));
    }

    #[test]
    fn cells_convert_to_responses() {
        assert_eq!(cell_to_response(&Data::Empty), Response::Missing);
        assert_eq!(
            cell_to_response(&Data::Error(CellErrorType::NA)),
            Response::NotANumber
        );
        assert_eq!(
            cell_to_response(&Data::Float(f64::NAN)),
            Response::NotANumber
        );
        assert_eq!(cell_to_response(&Data::Float(7.0)), Response::from("7.0"));
        assert_eq!(cell_to_response(&Data::Int(12)), Response::from("12"));
        assert_eq!(cell_to_response(&Data::Bool(true)), Response::from("true"));
        assert_eq!(cell_to_target(&Data::String("  ".to_string())), None);
        assert_eq!(cell_to_target(&Data::String("\u{1e}".to_string())), None);
        assert_eq!(
            cell_to_target(&Data::String(" fox ".to_string())),
            Some("fox".to_string())
        );
    }

    #[test]
    fn reads_csv_rows() {
        let (_dir, path) = write_csv(
            "id,target,response\n\
             1,quick brown fox,quik brwn fx\n\
             2,data science,\n\
             3,,\n\
             4,,orphan answer\n",
        );
        let rows = load_sheet(&path, &SheetOptions::default()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            GradingRow {
                row: 2,
                target: Some("quick brown fox".to_string()),
                response: Response::from("quik brwn fx"),
            }
        );
        assert_eq!(rows[1].response, Response::Missing);
        assert_eq!(rows[2].row, 5);
        assert_eq!(rows[2].target, None);
    }

    #[test]
    fn short_csv_rows_have_missing_response() {
        let (_dir, path) = write_csv("target,response\nkitten sitting\n");
        let rows = load_sheet(&path, &SheetOptions::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].response, Response::Missing);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_sheet("answers.txt", &SheetOptions::default()).unwrap_err();
        assert!(matches!(err, ScoreError::Sheet(msg) if msg.contains(".txt")));
    }

    #[test]
    fn missing_workbook_is_a_sheet_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing.xlsx");
        let err = load_sheet(path, &SheetOptions::default()).unwrap_err();
        assert!(matches!(err, ScoreError::Sheet(_)));
    }
}

//! CSV input and output for price series.
//!
//! A series file has a header row and one numeric column named
//! [`SERIES_COLUMN`]; other columns are ignored. Every problem with the file
//! contents is reported as `MalformedInput` so a bad file never reaches the
//! regression stages.

use crate::errors::{validate_all_finite, CointResult, CointegrationError};
use crate::series::SeriesMatrix;
use std::path::Path;
use std::sync::Arc;

/// Column read by default and written by [`write_series_csv`].
pub const SERIES_COLUMN: &str = "price";

fn malformed(path: &Path, reason: impl Into<String>) -> CointegrationError {
    CointegrationError::MalformedInput {
        input: path.display().to_string(),
        reason: reason.into(),
    }
}

fn write_failure(path: &Path, error: csv::Error) -> CointegrationError {
    let source = match error.into_kind() {
        csv::ErrorKind::Io(io) => Some(Arc::new(io)),
        _ => None,
    };
    CointegrationError::Io {
        operation: format!("write {}", path.display()),
        source,
    }
}

/// Series name derived from a file path: the file stem.
fn series_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read the numeric column `column` of a CSV file.
///
/// # Errors
/// `MalformedInput` when the file cannot be opened, the column is missing,
/// a cell is empty or non-numeric, a value is not finite, or there are no
/// data rows.
pub fn load_series_csv<P: AsRef<Path>>(path: P, column: &str) -> CointResult<Vec<f64>> {
    let path = path.as_ref();

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| malformed(path, format!("failed to open CSV: {}", e)))?;

    let headers = reader
        .headers()
        .map_err(|e| malformed(path, format!("failed to read header row: {}", e)))?
        .clone();

    let col_idx = headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| {
            malformed(
                path,
                format!(
                    "missing column '{}', available columns: {:?}",
                    column,
                    headers.iter().collect::<Vec<_>>()
                ),
            )
        })?;

    let mut values = Vec::new();
    for (row, result) in reader.records().enumerate() {
        // Header is line 1
        let line = row + 2;
        let record = result.map_err(|e| malformed(path, format!("line {}: {}", line, e)))?;
        let cell = record
            .get(col_idx)
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .ok_or_else(|| malformed(path, format!("line {}: empty value in '{}'", line, column)))?;
        let value = cell.parse::<f64>().map_err(|_| {
            malformed(
                path,
                format!("line {}: '{}' in '{}' is not a number", line, cell, column),
            )
        })?;
        values.push(value);
    }

    if values.is_empty() {
        return Err(malformed(path, format!("no data rows in column '{}'", column)));
    }
    validate_all_finite(&values, &path.display().to_string())?;

    log::debug!("Loaded {} observations from {}", values.len(), path.display());
    Ok(values)
}

/// Read several series files into one matrix, one column per file.
///
/// Columns are named after the file stems and must all have the same length.
pub fn load_series_matrix<P: AsRef<Path>>(paths: &[P], column: &str) -> CointResult<SeriesMatrix> {
    if paths.is_empty() {
        return Err(CointegrationError::MalformedInput {
            input: "series files".to_string(),
            reason: "no input files given".to_string(),
        });
    }

    let mut columns: Vec<(String, Vec<f64>)> = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let values = load_series_csv(path, column)?;
        if let Some((first_name, first)) = columns.first() {
            if values.len() != first.len() {
                return Err(malformed(
                    path,
                    format!(
                        "{} observations, but {} has {}",
                        values.len(),
                        first_name,
                        first.len()
                    ),
                ));
            }
        }
        columns.push((series_name(path), values));
    }

    SeriesMatrix::from_columns(columns)
}

/// Write `values` as a single-column series CSV.
pub fn write_series_csv<P: AsRef<Path>>(path: P, values: &[f64]) -> CointResult<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(|e| write_failure(path, e))?;

    writer
        .write_record([SERIES_COLUMN])
        .map_err(|e| write_failure(path, e))?;
    for value in values {
        writer
            .write_record([value.to_string()])
            .map_err(|e| write_failure(path, e))?;
    }
    writer.flush().map_err(|e| CointegrationError::Io {
        operation: format!("flush {}", path.display()),
        source: Some(Arc::new(e)),
    })?;

    log::debug!("Wrote {} observations to {}", values.len(), path.display());
    Ok(())
}

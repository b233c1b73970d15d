//! CSV ingestion with per-column type inference
//!
//! The header row provides column names. A column where every non-empty cell
//! parses as `f64` is loaded as numeric (empty cells become NaN); any other
//! column is loaded as text. Ragged rows are an error.

use super::{Column, Frame};
use crate::error::{AuditError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a CSV file into a [`Frame`]
pub fn read_csv(path: &Path) -> Result<Frame> {
    let file = File::open(path)?;
    read_csv_reader(file)
}

/// Read CSV content from any reader into a [`Frame`]
pub fn read_csv_reader<R: Read>(reader: R) -> Result<Frame> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(AuditError::EmptyInput);
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in rdr.records() {
        let record = record?;
        // The csv reader rejects ragged rows before we get here
        for (idx, field) in record.iter().enumerate() {
            cells[idx].push(field.to_string());
        }
    }

    let mut frame = Frame::new();
    for (name, raw) in headers.into_iter().zip(cells) {
        frame.push_column(name, infer_column(raw))?;
    }
    Ok(frame)
}

/// Decide the column type from its raw string cells
fn infer_column(raw: Vec<String>) -> Column {
    let numeric = raw
        .iter()
        .all(|cell| cell.trim().is_empty() || cell.trim().parse::<f64>().is_ok());

    if numeric {
        Column::Numeric(
            raw.iter()
                .map(|cell| {
                    let cell = cell.trim();
                    if cell.is_empty() {
                        f64::NAN
                    } else {
                        cell.parse().unwrap_or(f64::NAN)
                    }
                })
                .collect(),
        )
    } else {
        Column::Text(raw)
    }
}

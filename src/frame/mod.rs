//! In-memory tabular data model
//!
//! A [`Frame`] is an ordered collection of named, equal-length columns. Columns
//! are either numeric (`f64`, with missing cells stored as NaN) or text. This is
//! the input type for every audit operation; nothing here mutates after load.

mod csv;

pub use csv::{read_csv, read_csv_reader};

use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};

/// A single typed column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    /// Continuous values; unparseable or missing cells are NaN
    Numeric(Vec<f64>),
    /// Free-form text values
    Text(Vec<String>),
}

impl Column {
    /// Number of cells in the column
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short type name for display ("numeric" or "text")
    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Numeric(_) => "numeric",
            Column::Text(_) => "text",
        }
    }

    /// Numeric view of the column, if it is numeric
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            Column::Numeric(v) => Some(v),
            Column::Text(_) => None,
        }
    }

    /// Canonical text rendering of one cell (NaN renders as "NaN")
    pub fn cell_text(&self, row: usize) -> Option<String> {
        match self {
            Column::Numeric(v) => v.get(row).map(|x| x.to_string()),
            Column::Text(v) => v.get(row).cloned(),
        }
    }
}

/// An ordered table of named columns
///
/// Column order is insertion order. All columns have the same length, enforced
/// by [`Frame::push_column`].
///
/// # Example
///
/// ```
/// use equidad::frame::{Column, Frame};
///
/// let mut frame = Frame::new();
/// frame.push_column("gender", Column::Numeric(vec![0.0, 1.0, 0.0])).unwrap();
/// frame.push_column("approved", Column::Numeric(vec![1.0, 0.0, 1.0])).unwrap();
///
/// assert_eq!(frame.len(), 3);
/// assert_eq!(frame.width(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    columns: Vec<(String, Column)>,
}

impl Frame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows (0 for a frame with no columns)
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Append a column; rejects duplicate names and length mismatches
    pub fn push_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        if self.columns.iter().any(|(n, _)| *n == name) {
            return Err(AuditError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && column.len() != self.len() {
            return Err(AuditError::LengthMismatch {
                expected: self.len(),
                got: column.len(),
            });
        }
        self.columns.push((name, column));
        Ok(())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Look up a column by name, erroring when absent
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| AuditError::MissingColumn(name.to_string()))
    }

    /// Numeric values of a column, erroring when absent or non-numeric
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        self.require(name)?
            .as_numeric()
            .ok_or_else(|| AuditError::NotNumeric {
                name: name.to_string(),
            })
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Columns with their names, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Small bundled demo table (binary group, age, binary outcome)
    pub fn sample() -> Self {
        let mut frame = Frame::new();
        let cols = [
            (
                "gender",
                Column::Numeric(vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]),
            ),
            (
                "age",
                Column::Numeric(vec![25.0, 32.0, 47.0, 51.0, 38.0, 29.0, 44.0, 36.0]),
            ),
            (
                "approved",
                Column::Numeric(vec![1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0]),
            ),
        ];
        for (name, column) in cols {
            // Columns are hand-built with equal lengths and unique names
            let _ = frame.push_column(name, column);
        }
        frame
    }
}

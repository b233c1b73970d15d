//! PII pattern scanning
//!
//! Renders every cell of every column to text and scans for personally
//! identifying information with a fixed set of regex patterns: email
//! addresses, US phone numbers, social security numbers, and credit card
//! numbers. Numeric columns are scanned too, so a phone number stored as
//! an integer column is still caught.

use crate::frame::Frame;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PII_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("email", r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"),
        ("phone", r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b"),
        ("ssn", r"\b\d{3}-\d{2}-\d{4}\b"),
        ("credit_card", r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("pattern is a valid literal")))
    .collect()
});

/// Columns in which one named pattern matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiFinding {
    /// Pattern name, e.g. `"email"`
    pub pattern: String,
    /// Columns with at least one matching cell, in frame order
    pub columns: Vec<String>,
}

/// Outcome of a PII scan over a whole frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PiiReport {
    /// Findings in fixed pattern order; empty means a clean scan
    pub findings: Vec<PiiFinding>,
}

impl PiiReport {
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Human-readable scan verdict
    pub fn to_message(&self) -> String {
        if self.findings.is_empty() {
            return "✅ No PII detected in the dataset.".to_string();
        }
        let parts: Vec<String> = self
            .findings
            .iter()
            .map(|f| format!("{} in {}", f.pattern, f.columns.join(", ")))
            .collect();
        format!("⚠️ Potential PII detected: {}", parts.join("; "))
    }
}

/// Scan every column of `frame` for PII patterns
///
/// This is a best-effort heuristic over cell text, not a compliance
/// guarantee; it cannot see PII that is hashed, truncated, or encoded.
pub fn scan_pii(frame: &Frame) -> PiiReport {
    let mut findings = Vec::new();
    for (name, pattern) in PII_PATTERNS.iter() {
        let columns: Vec<String> = frame
            .iter()
            .filter(|(_, column)| {
                (0..column.len())
                    .filter_map(|row| column.cell_text(row))
                    .any(|cell| pattern.is_match(&cell))
            })
            .map(|(col_name, _)| col_name.to_string())
            .collect();
        if !columns.is_empty() {
            findings.push(PiiFinding {
                pattern: name.to_string(),
                columns,
            });
        }
    }
    PiiReport { findings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Column;

    fn text_frame(name: &str, cells: Vec<&str>) -> Frame {
        let mut f = Frame::new();
        f.push_column(
            name,
            Column::Text(cells.into_iter().map(str::to_string).collect()),
        )
        .unwrap();
        f
    }

    #[test]
    fn test_clean_frame_has_no_findings() {
        let report = scan_pii(&Frame::sample());
        assert!(!report.has_findings());
        assert_eq!(report.to_message(), "✅ No PII detected in the dataset.");
    }

    #[test]
    fn test_email_detected() {
        let f = text_frame("contact", vec!["reach me at test@test.com", "none"]);
        let report = scan_pii(&f);

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].pattern, "email");
        assert_eq!(report.findings[0].columns, vec!["contact"]);
        let message = report.to_message();
        assert!(message.contains("email"));
        assert!(message.contains("contact"));
    }

    #[test]
    fn test_phone_formats_detected() {
        for cell in ["555-123-4567", "555.123.4567", "5551234567"] {
            let f = text_frame("phone", vec![cell]);
            let report = scan_pii(&f);
            assert_eq!(report.findings.len(), 1, "cell {cell:?}");
            assert_eq!(report.findings[0].pattern, "phone");
        }
    }

    #[test]
    fn test_ssn_detected() {
        let f = text_frame("tax_id", vec!["123-45-6789"]);
        let report = scan_pii(&f);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].pattern, "ssn");
    }

    #[test]
    fn test_credit_card_detected() {
        for cell in ["4111-1111-1111-1111", "4111 1111 1111 1111", "4111111111111111"] {
            let f = text_frame("card", vec![cell]);
            let report = scan_pii(&f);
            assert_eq!(report.findings.len(), 1, "cell {cell:?}");
            assert_eq!(report.findings[0].pattern, "credit_card");
        }
    }

    #[test]
    fn test_numeric_column_scanned_as_text() {
        let mut f = Frame::new();
        f.push_column("raw_phone", Column::Numeric(vec![5551234567.0]))
            .unwrap();
        let report = scan_pii(&f);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].pattern, "phone");
        assert_eq!(report.findings[0].columns, vec!["raw_phone"]);
    }

    #[test]
    fn test_same_pattern_multiple_columns() {
        let mut f = Frame::new();
        f.push_column("a", Column::Text(vec!["x@y.com".into()])).unwrap();
        f.push_column("b", Column::Text(vec!["clean".into()])).unwrap();
        f.push_column("c", Column::Text(vec!["z@w.org".into()])).unwrap();
        let report = scan_pii(&f);

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].columns, vec!["a", "c"]);
    }

    #[test]
    fn test_findings_follow_pattern_order() {
        let mut f = Frame::new();
        f.push_column("tax_id", Column::Text(vec!["123-45-6789".into()]))
            .unwrap();
        f.push_column("contact", Column::Text(vec!["a@b.co".into()]))
            .unwrap();
        let report = scan_pii(&f);

        // email is listed before ssn regardless of column order
        assert_eq!(report.findings[0].pattern, "email");
        assert_eq!(report.findings[1].pattern, "ssn");
        let message = report.to_message();
        assert!(message.contains("email in contact; ssn in tax_id"));
    }
}

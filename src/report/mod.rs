//! Audit report assembly and rendering
//!
//! Gathers the individual audit outcomes of one run into a single
//! [`AuditReport`], derives recommendations from structured fields
//! (ratings, scores, and flags), and renders either a fixed-layout text
//! report or JSON. Failed scorers are folded into the zero-score error
//! form so every section always has something to show.
//!
//! # Example
//!
//! ```
//! use equidad::audit::{BiasAuditor, scan_pii};
//! use equidad::frame::Frame;
//! use equidad::report::AuditReport;
//!
//! let frame = Frame::sample();
//! let report = AuditReport::new("loan-model-v2")
//!     .with_bias(BiasAuditor::new().assess(&frame, "gender", "approved"))
//!     .with_pii(scan_pii(&frame));
//! let text = report.render();
//! assert!(text.contains("Bias Detection"));
//! ```

use crate::audit::{PiiReport, Rating, ScoreResult, SignificanceReport};
use crate::error::{AuditError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;

pub mod insight;

pub use insight::{fallback_summary, InsightBackend, InsightService, InsightStatus};

/// All outcomes of one audit run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Name of the audited model or dataset
    pub title: String,

    /// Assembly timestamp
    pub generated_at: DateTime<Utc>,

    /// Outcome-rate bias result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias: Option<ScoreResult>,

    /// Prediction fairness result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fairness: Option<ScoreResult>,

    /// Documentation completeness result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<ScoreResult>,

    /// Pairwise significance test output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significance: Option<SignificanceReport>,

    /// Set when the significance test itself failed to run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significance_error: Option<String>,

    /// PII scan output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pii: Option<PiiReport>,
}

impl AuditReport {
    /// Start an empty report for the given model or dataset name
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated_at: Utc::now(),
            bias: None,
            fairness: None,
            documentation: None,
            significance: None,
            significance_error: None,
            pii: None,
        }
    }

    /// Attach the bias outcome; errors become the zero-score form
    pub fn with_bias(mut self, result: Result<ScoreResult>) -> Self {
        self.bias = Some(result.unwrap_or_else(|e| ScoreResult::from_error(&e)));
        self
    }

    /// Attach the fairness outcome; errors become the zero-score form
    pub fn with_fairness(mut self, result: Result<ScoreResult>) -> Self {
        self.fairness = Some(result.unwrap_or_else(|e| ScoreResult::from_error(&e)));
        self
    }

    /// Attach the documentation outcome; errors become the zero-score form
    pub fn with_documentation(mut self, result: Result<ScoreResult>) -> Self {
        self.documentation = Some(result.unwrap_or_else(|e| ScoreResult::from_error(&e)));
        self
    }

    /// Attach the significance test outcome
    pub fn with_significance(mut self, result: Result<SignificanceReport>) -> Self {
        match result {
            Ok(report) => self.significance = Some(report),
            Err(e) => self.significance_error = Some(e.to_string()),
        }
        self
    }

    /// Attach the PII scan outcome
    pub fn with_pii(mut self, report: PiiReport) -> Self {
        self.pii = Some(report);
        self
    }

    /// Derive recommendations from the structured outcomes
    ///
    /// Branches only on ratings, scores, and flags; message text is for
    /// people, not for control flow.
    pub fn recommendations(&self) -> Vec<String> {
        let mut recs = Vec::new();

        if let Some(bias) = &self.bias {
            match bias.rating {
                Rating::Poor => recs.push(
                    "Outcome rates differ strongly between groups. Review the training data for selection bias before deployment.".to_string(),
                ),
                Rating::Moderate => recs.push(
                    "Outcome rates show a moderate gap between groups. Track this disparity across releases.".to_string(),
                ),
                Rating::Error => recs.push(
                    "The bias audit could not be scored. Fix the underlying data issue and rerun the audit.".to_string(),
                ),
                Rating::Good => {}
            }
        }

        if let Some(fairness) = &self.fairness {
            match fairness.rating {
                Rating::Poor => recs.push(
                    "Prediction quality is unbalanced across groups. Rebalance the training data or recalibrate per group.".to_string(),
                ),
                Rating::Moderate => recs.push(
                    "Prediction quality differs somewhat across groups. Compare per-group error rates before release.".to_string(),
                ),
                Rating::Error => recs.push(
                    "The fairness audit could not be scored. Fix the underlying data issue and rerun the audit.".to_string(),
                ),
                Rating::Good => {}
            }
        }

        if let Some(docs) = &self.documentation {
            match docs.rating {
                Rating::Poor | Rating::Error => recs.push(
                    "Document the model's purpose, training data, and limitations before release.".to_string(),
                ),
                Rating::Moderate => recs.push(
                    "Documentation is incomplete. Cover the missing topics.".to_string(),
                ),
                Rating::Good => {}
            }
        }

        if let Some(significance) = &self.significance {
            if significance.has_flags() {
                recs.push(format!(
                    "Statistically significant outcome differences found ({}). Investigate these group pairs.",
                    significance.flagged_pairs().join(", ")
                ));
            }
        }
        if self.significance_error.is_some() {
            recs.push(
                "The significance test failed to run. Check the group and outcome columns.".to_string(),
            );
        }

        if let Some(pii) = &self.pii {
            if pii.has_findings() {
                recs.push(
                    "Remove or mask the detected PII columns before sharing the dataset.".to_string(),
                );
            }
        }

        if recs.is_empty() {
            recs.push("No immediate issues found. Continue monitoring periodically.".to_string());
        }

        recs
    }

    /// Render the fixed-layout text report
    pub fn render(&self) -> String {
        let mut output = String::new();

        writeln!(output, "═══════════════════════════════════════════════════════════════").unwrap();
        writeln!(output, "  MODEL AUDIT REPORT: {}", self.title).unwrap();
        writeln!(output, "═══════════════════════════════════════════════════════════════").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")).unwrap();
        writeln!(output).unwrap();

        writeln!(output, "─── Bias Detection ─────────────────────────────────────────────").unwrap();
        writeln!(output).unwrap();
        write_panel(&mut output, "Bias", self.bias.as_ref());
        write_panel(&mut output, "Fairness", self.fairness.as_ref());
        if let Some(significance) = &self.significance {
            writeln!(output, "Group outcome means:").unwrap();
            for group in &significance.group_means {
                writeln!(
                    output,
                    "  {}: mean {:.2} (n={})",
                    group.label, group.mean, group.size
                )
                .unwrap();
            }
            for pair in &significance.pairs {
                let marker = if pair.flagged { " *" } else { "" };
                writeln!(
                    output,
                    "  {}: t = {:.2}, p = {:.4}{}",
                    pair.label(),
                    pair.t_stat,
                    pair.p_value,
                    marker
                )
                .unwrap();
            }
            writeln!(output, "{}", significance.summary()).unwrap();
            writeln!(output).unwrap();
        }
        if let Some(error) = &self.significance_error {
            writeln!(output, "Significance test unavailable: {}", error).unwrap();
            writeln!(output).unwrap();
        }

        writeln!(output, "─── Documentation ──────────────────────────────────────────────").unwrap();
        writeln!(output).unwrap();
        write_panel(&mut output, "Documentation", self.documentation.as_ref());

        writeln!(output, "─── Privacy Check ──────────────────────────────────────────────").unwrap();
        writeln!(output).unwrap();
        match &self.pii {
            Some(pii) => writeln!(output, "{}", pii.to_message()).unwrap(),
            None => writeln!(output, "(not scanned)").unwrap(),
        }
        writeln!(output).unwrap();

        writeln!(output, "─── Recommendations ────────────────────────────────────────────").unwrap();
        writeln!(output).unwrap();
        for (i, rec) in self.recommendations().iter().enumerate() {
            writeln!(output, "{}. {}", i + 1, rec).unwrap();
        }
        writeln!(output).unwrap();

        writeln!(output, "═══════════════════════════════════════════════════════════════").unwrap();

        output
    }

    /// Serialize the whole report as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| AuditError::Serialization(e.to_string()))
    }
}

fn write_panel(output: &mut String, label: &str, result: Option<&ScoreResult>) {
    match result {
        None => {
            writeln!(output, "{} Rating: (not assessed)", label).unwrap();
        }
        Some(r) if r.is_error() => {
            writeln!(output, "{} Rating: {} Error", label, r.rating.emoji()).unwrap();
            writeln!(output, "{}", r.message).unwrap();
            writeln!(output, "Score: {:.2}", r.score).unwrap();
        }
        Some(r) => {
            writeln!(output, "{}", r.message).unwrap();
            writeln!(output, "Score: {:.2}", r.score).unwrap();
        }
    }
    writeln!(output).unwrap();
}

//! Documentation completeness scoring
//!
//! Checks model documentation text for three required topics (purpose,
//! data, limitations) by keyword containment, then deducts a fixed penalty
//! for each upstream audit (bias, fairness) that scored poorly. The rating
//! is taken from the post-penalty score, so strong prose cannot mask weak
//! audit results.
//!
//! # Example
//!
//! ```
//! use equidad::audit::DocAuditor;
//!
//! let text = "Purpose: credit risk scoring. Data: 2019 loan book. \
//!             Limitations: small sample, selection bias.";
//! let result = DocAuditor::new().assess(text, None, None).unwrap();
//! assert_eq!(result.score, 1.0);
//! ```

use crate::audit::{Rating, ScoreDetails, ScoreResult};
use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};

const PURPOSE_KEYWORDS: [&str; 3] = ["purpose", "objective", "goal"];
const DATA_KEYWORDS: [&str; 3] = ["data", "dataset", "collection"];
const LIMITATION_KEYWORDS: [&str; 4] = ["limitation", "constraint", "bias", "issue"];

/// Topic coverage and penalty breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocDetails {
    pub purpose: bool,
    pub data: bool,
    pub limitations: bool,
    /// Total deduction applied for low upstream scores
    pub penalty: f64,
}

/// Documentation completeness auditor
#[derive(Debug, Clone)]
pub struct DocAuditor {
    complete_threshold: f64,
    partial_threshold: f64,
    penalty: f64,
    penalty_threshold: f64,
    purpose_keywords: Vec<String>,
    data_keywords: Vec<String>,
    limitation_keywords: Vec<String>,
}

impl DocAuditor {
    /// Create an auditor with default thresholds and keyword sets
    pub fn new() -> Self {
        Self {
            complete_threshold: 0.8,
            partial_threshold: 0.5,
            penalty: 0.2,
            penalty_threshold: 0.6,
            purpose_keywords: PURPOSE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            data_keywords: DATA_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            limitation_keywords: LIMITATION_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Set the rating thresholds (strictly-greater comparisons)
    pub fn with_thresholds(mut self, complete: f64, partial: f64) -> Self {
        self.complete_threshold = complete;
        self.partial_threshold = partial;
        self
    }

    /// Set the per-audit penalty and the score below which it applies
    pub fn with_penalty(mut self, penalty: f64, threshold: f64) -> Self {
        self.penalty = penalty;
        self.penalty_threshold = threshold;
        self
    }

    /// Replace the keyword sets; matching is case-insensitive
    pub fn with_keywords(
        mut self,
        purpose: Vec<String>,
        data: Vec<String>,
        limitations: Vec<String>,
    ) -> Self {
        self.purpose_keywords = lowercase_all(purpose);
        self.data_keywords = lowercase_all(data);
        self.limitation_keywords = lowercase_all(limitations);
        self
    }

    /// Score documentation text, penalizing for poor upstream audit results
    ///
    /// Empty, whitespace-only, or `[bracketed template]` text is rejected
    /// with `EmptyDocumentation` before any keywords are checked.
    pub fn assess(
        &self,
        text: &str,
        bias: Option<&ScoreResult>,
        fairness: Option<&ScoreResult>,
    ) -> Result<ScoreResult> {
        let trimmed = text.trim();
        if trimmed.is_empty() || (trimmed.starts_with('[') && trimmed.ends_with(']')) {
            return Err(AuditError::EmptyDocumentation);
        }

        let lower = trimmed.to_lowercase();
        let contains_any =
            |keywords: &[String]| keywords.iter().any(|k| lower.contains(k.as_str()));
        let purpose = contains_any(&self.purpose_keywords);
        let data = contains_any(&self.data_keywords);
        let limitations = contains_any(&self.limitation_keywords);

        let found = [purpose, data, limitations].iter().filter(|b| **b).count();
        let base = found as f64 / 3.0;

        let mut penalty = 0.0;
        for prior in [bias, fairness].into_iter().flatten() {
            if prior.score < self.penalty_threshold {
                penalty += self.penalty;
            }
        }
        let score = (base - penalty).max(0.0);

        let rating = Rating::classify(score, self.complete_threshold, self.partial_threshold);
        let label = match rating {
            Rating::Good => "Complete",
            Rating::Moderate => "Partial",
            _ => "Incomplete",
        };

        let mut covered = Vec::new();
        if purpose {
            covered.push("purpose");
        }
        if data {
            covered.push("data");
        }
        if limitations {
            covered.push("limitations");
        }
        let covered = if covered.is_empty() {
            "none".to_string()
        } else {
            covered.join(", ")
        };

        let mut message = format!(
            "Documentation Rating: {} {}\nTopics covered: {}",
            rating.emoji(),
            label,
            covered
        );
        if penalty > 0.0 {
            message.push_str(&format!(
                "\nPenalty applied: -{:.1} (low upstream audit scores)",
                penalty
            ));
        }

        Ok(ScoreResult::new(score, rating, message).with_details(
            ScoreDetails::Documentation(DocDetails {
                purpose,
                data,
                limitations,
                penalty,
            }),
        ))
    }
}

impl Default for DocAuditor {
    fn default() -> Self {
        Self::new()
    }
}

fn lowercase_all(keywords: Vec<String>) -> Vec<String> {
    keywords.into_iter().map(|k| k.to_lowercase()).collect()
}

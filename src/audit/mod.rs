//! Group-fairness audit scorers
//!
//! Statistical scoring over small in-memory tables. Every scorer converts a
//! dataset (or documentation text) into a [`ScoreResult`]: a score in [0, 1],
//! a rating tier, and a human-readable message.
//!
//! # Architecture
//!
//! - **group**: two-group partition with per-group size and positive rate
//! - **bias**: demographic-parity disparity score
//! - **fairness**: accuracy and true-positive-rate parity score
//! - **significance**: pairwise Welch t-tests across N groups
//! - **docs**: documentation completeness via keyword coverage
//! - **pii**: regex scan for personal data patterns
//!
//! # Example
//!
//! ```
//! use equidad::audit::BiasAuditor;
//! use equidad::frame::Frame;
//!
//! let frame = Frame::sample();
//! let result = BiasAuditor::new()
//!     .assess(&frame, "gender", "approved")
//!     .unwrap();
//! assert!(result.score >= 0.0 && result.score <= 1.0);
//! ```
//!
//! Scorers return `Err` on invalid or insufficient input; callers that need
//! the always-renderable form convert with [`ScoreResult::from_error`].

use serde::{Deserialize, Serialize};

pub mod bias;
pub mod docs;
pub mod fairness;
pub mod group;
pub mod pii;
pub mod significance;

// Re-exports for convenience
pub use bias::{BiasAuditor, BiasDetails};
pub use docs::{DocAuditor, DocDetails};
pub use fairness::{FairnessAuditor, FairnessDetails, FairnessInput};
pub use group::{group_metrics, GroupMetrics, GroupStats};
pub use pii::{scan_pii, PiiFinding, PiiReport};
pub use significance::{GroupMean, PairResult, SignificanceReport, SignificanceTester};

use crate::error::AuditError;

// =============================================================================
// Rating
// =============================================================================

/// Rating tier for a score
///
/// The tier boundaries are strictly-greater comparisons, so a score sitting
/// exactly on a threshold falls into the lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// Score above the good threshold
    Good,
    /// Score above the moderate threshold
    Moderate,
    /// Score at or below the moderate threshold
    Poor,
    /// Assessment could not be performed
    Error,
}

impl Rating {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Good => "good",
            Rating::Moderate => "moderate",
            Rating::Poor => "poor",
            Rating::Error => "error",
        }
    }

    /// Get emoji for display
    pub fn emoji(&self) -> &'static str {
        match self {
            Rating::Good => "✅",
            Rating::Moderate => "⚠️",
            Rating::Poor => "❌",
            Rating::Error => "🛑",
        }
    }

    /// Classify a score against strictly-greater tier thresholds
    pub fn classify(score: f64, good: f64, moderate: f64) -> Self {
        if score > good {
            Rating::Good
        } else if score > moderate {
            Rating::Moderate
        } else {
            Rating::Poor
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// ScoreResult
// =============================================================================

/// Outcome of one audit assessment
///
/// Immutable once produced. Consumers branch on `rating` and `score`; the
/// `message` is for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Score in [0, 1]
    pub score: f64,
    /// Rating tier
    pub rating: Rating,
    /// Human-readable summary
    pub message: String,
    /// Scorer-specific measurements, when the assessment succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ScoreDetails>,
}

impl ScoreResult {
    /// Create a new score result
    pub fn new(score: f64, rating: Rating, message: impl Into<String>) -> Self {
        Self {
            score,
            rating,
            message: message.into(),
            details: None,
        }
    }

    /// Attach scorer-specific details
    pub fn with_details(mut self, details: ScoreDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Convert a failed assessment into the renderable zero-score form
    pub fn from_error(err: &AuditError) -> Self {
        Self::new(0.0, Rating::Error, err.to_string())
    }

    /// Whether this result represents a failed assessment
    pub fn is_error(&self) -> bool {
        self.rating == Rating::Error
    }
}

/// Scorer-specific measurement payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScoreDetails {
    Bias(BiasDetails),
    Fairness(FairnessDetails),
    Documentation(DocDetails),
}

//! Demographic-parity bias scorer
//!
//! Scores how evenly a binary outcome is distributed across two groups:
//! `score = 1 - |rate_0 - rate_1|`. A score of 1.0 means both groups receive
//! the positive outcome at the same rate.

use super::group::group_metrics;
use super::{Rating, ScoreDetails, ScoreResult};
use crate::error::{AuditError, Result};
use crate::frame::Frame;
use serde::{Deserialize, Serialize};

/// Measurements behind a bias score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasDetails {
    pub group_0_rate: f64,
    pub group_1_rate: f64,
    pub disparity: f64,
    pub group_0_size: usize,
    pub group_1_size: usize,
}

/// Demographic-parity scorer over a binary group column
///
/// # Example
///
/// ```
/// use equidad::audit::{BiasAuditor, Rating};
/// use equidad::frame::Frame;
///
/// let result = BiasAuditor::new()
///     .assess(&Frame::sample(), "gender", "approved")
///     .unwrap();
/// assert!(result.rating != Rating::Error);
/// ```
#[derive(Debug, Clone)]
pub struct BiasAuditor {
    good_threshold: f64,
    moderate_threshold: f64,
    min_rows: usize,
}

impl BiasAuditor {
    /// Create a scorer with the standard thresholds (0.8 / 0.6)
    pub fn new() -> Self {
        Self {
            good_threshold: 0.8,
            moderate_threshold: 0.6,
            min_rows: 2,
        }
    }

    /// Set rating tier thresholds
    pub fn with_thresholds(mut self, good: f64, moderate: f64) -> Self {
        self.good_threshold = good;
        self.moderate_threshold = moderate;
        self
    }

    /// Score outcome parity between the two groups of `group_col`
    ///
    /// Failure modes, in checking order: fewer than 2 rows, missing column,
    /// non-binary group value, empty group, NaN disparity. Each surfaces as a
    /// distinct [`AuditError`].
    pub fn assess(&self, frame: &Frame, group_col: &str, target_col: &str) -> Result<ScoreResult> {
        if frame.len() < self.min_rows {
            return Err(AuditError::InsufficientRows {
                rows: frame.len(),
                min: self.min_rows,
            });
        }

        let metrics = group_metrics(frame, group_col, target_col)?;
        let disparity = metrics.disparity();
        if disparity.is_nan() {
            return Err(AuditError::Indeterminate(
                "bias score: a group rate is undefined".to_string(),
            ));
        }

        let score = 1.0 - disparity;
        let rating = Rating::classify(score, self.good_threshold, self.moderate_threshold);
        let label = match rating {
            Rating::Good => "Low",
            Rating::Moderate => "Moderate",
            _ => "High",
        };

        let message = format!(
            "Bias Rating: {} {}\nGroup 0 Rate: {:.2}\nGroup 1 Rate: {:.2}",
            rating.emoji(),
            label,
            metrics.group_0.positive_rate,
            metrics.group_1.positive_rate,
        );

        Ok(ScoreResult::new(score, rating, message).with_details(ScoreDetails::Bias(BiasDetails {
            group_0_rate: metrics.group_0.positive_rate,
            group_1_rate: metrics.group_1.positive_rate,
            disparity,
            group_0_size: metrics.group_0.size,
            group_1_size: metrics.group_1.size,
        })))
    }
}

impl Default for BiasAuditor {
    fn default() -> Self {
        Self::new()
    }
}

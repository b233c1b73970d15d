//! Accuracy and true-positive-rate parity scorer
//!
//! Compares prediction quality across two groups: per-group accuracy and TPR,
//! then `score = 1 - mean(acc_diff, tpr_diff)` clamped to [0, 1]. The score is
//! symmetric under swapping the group labels.

use super::{Rating, ScoreDetails, ScoreResult};
use crate::error::{AuditError, Result};
use crate::frame::Frame;
use serde::{Deserialize, Serialize};

/// Measurements behind a fairness score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairnessDetails {
    pub accuracy_0: f64,
    pub accuracy_1: f64,
    pub tpr_0: f64,
    pub tpr_1: f64,
    pub group_0_size: usize,
    pub group_1_size: usize,
}

/// Validated triple of aligned binary sequences
///
/// Row `i` of each sequence refers to the same sample: its true label, the
/// model's prediction, and its group membership. Construction rejects empty
/// input, length mismatches, and any value outside {0, 1}.
#[derive(Debug, Clone, PartialEq)]
pub struct FairnessInput {
    y_true: Vec<u8>,
    y_pred: Vec<u8>,
    group: Vec<u8>,
}

impl FairnessInput {
    /// Build from raw binary sequences
    pub fn new(y_true: Vec<u8>, y_pred: Vec<u8>, group: Vec<u8>) -> Result<Self> {
        if y_true.is_empty() {
            return Err(AuditError::EmptyInput);
        }
        for values in [&y_pred, &group] {
            if values.len() != y_true.len() {
                return Err(AuditError::LengthMismatch {
                    expected: y_true.len(),
                    got: values.len(),
                });
            }
        }
        for (name, values) in [("y_true", &y_true), ("y_pred", &y_pred), ("group", &group)] {
            if let Some((row, &value)) = values.iter().enumerate().find(|(_, &v)| v > 1) {
                return Err(AuditError::NonBinaryValue {
                    column: name.to_string(),
                    value: f64::from(value),
                    row,
                });
            }
        }
        Ok(Self {
            y_true,
            y_pred,
            group,
        })
    }

    /// Build from three binary numeric columns of a frame
    pub fn from_frame(
        frame: &Frame,
        group_col: &str,
        target_col: &str,
        prediction_col: &str,
    ) -> Result<Self> {
        let to_binary = |name: &str| -> Result<Vec<u8>> {
            let values = frame.numeric(name)?;
            values
                .iter()
                .enumerate()
                .map(|(row, &v)| {
                    if v == 0.0 {
                        Ok(0)
                    } else if v == 1.0 {
                        Ok(1)
                    } else {
                        Err(AuditError::NonBinaryValue {
                            column: name.to_string(),
                            value: v,
                            row,
                        })
                    }
                })
                .collect()
        };

        Self::new(
            to_binary(target_col)?,
            to_binary(prediction_col)?,
            to_binary(group_col)?,
        )
    }

    /// Number of aligned rows
    pub fn len(&self) -> usize {
        self.y_true.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y_true.is_empty()
    }

    pub fn y_true(&self) -> &[u8] {
        &self.y_true
    }

    pub fn y_pred(&self) -> &[u8] {
        &self.y_pred
    }

    pub fn group(&self) -> &[u8] {
        &self.group
    }
}

/// Per-group accuracy and TPR counts
#[derive(Debug, Clone, Copy, Default)]
struct GroupCounts {
    size: usize,
    correct: usize,
    positives: usize,
    true_positives: usize,
}

impl GroupCounts {
    fn accuracy(&self) -> f64 {
        self.correct as f64 / self.size as f64
    }

    fn tpr(&self) -> Option<f64> {
        if self.positives == 0 {
            None
        } else {
            Some(self.true_positives as f64 / self.positives as f64)
        }
    }
}

/// Prediction-parity scorer over a validated [`FairnessInput`]
///
/// # Example
///
/// ```
/// use equidad::audit::{FairnessAuditor, FairnessInput};
///
/// let input = FairnessInput::new(
///     vec![1, 0, 1, 0],
///     vec![1, 0, 1, 1],
///     vec![0, 0, 1, 1],
/// ).unwrap();
/// let result = FairnessAuditor::new().assess(&input).unwrap();
/// assert!(result.score <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct FairnessAuditor {
    good_threshold: f64,
    moderate_threshold: f64,
}

impl FairnessAuditor {
    /// Create a scorer with the standard thresholds (0.8 / 0.6)
    pub fn new() -> Self {
        Self {
            good_threshold: 0.8,
            moderate_threshold: 0.6,
        }
    }

    /// Set rating tier thresholds
    pub fn with_thresholds(mut self, good: f64, moderate: f64) -> Self {
        self.good_threshold = good;
        self.moderate_threshold = moderate;
        self
    }

    /// Score accuracy and TPR parity between the two groups
    ///
    /// A group with no positive labels has an undefined TPR; that is an
    /// error naming the group, never a silent zero.
    pub fn assess(&self, input: &FairnessInput) -> Result<ScoreResult> {
        let mut counts = [GroupCounts::default(); 2];
        for ((&t, &p), &g) in input
            .y_true
            .iter()
            .zip(&input.y_pred)
            .zip(&input.group)
        {
            let c = &mut counts[g as usize];
            c.size += 1;
            if t == p {
                c.correct += 1;
            }
            if t == 1 {
                c.positives += 1;
                if p == 1 {
                    c.true_positives += 1;
                }
            }
        }

        let [c0, c1] = counts;
        if c0.size == 0 || c1.size == 0 {
            return Err(AuditError::EmptyGroup {
                group_0: c0.size,
                group_1: c1.size,
            });
        }

        let tpr = |c: &GroupCounts, g: u8| {
            c.tpr().ok_or_else(|| {
                AuditError::Indeterminate(format!(
                    "true positive rate for group {g} (no positive labels)"
                ))
            })
        };
        let tpr_0 = tpr(&c0, 0)?;
        let tpr_1 = tpr(&c1, 1)?;

        let acc_0 = c0.accuracy();
        let acc_1 = c1.accuracy();
        let acc_diff = (acc_0 - acc_1).abs();
        let tpr_diff = (tpr_0 - tpr_1).abs();
        let score = (1.0 - (acc_diff + tpr_diff) / 2.0).clamp(0.0, 1.0);

        let rating = Rating::classify(score, self.good_threshold, self.moderate_threshold);
        let label = match rating {
            Rating::Good => "Fair",
            Rating::Moderate => "Review",
            _ => "Unfair",
        };

        let message = format!(
            "Fairness Rating: {} {}\nGroup 0 (n={}): Acc={:.2}, TPR={:.2}\nGroup 1 (n={}): Acc={:.2}, TPR={:.2}",
            rating.emoji(),
            label,
            c0.size,
            acc_0,
            tpr_0,
            c1.size,
            acc_1,
            tpr_1,
        );

        Ok(
            ScoreResult::new(score, rating, message).with_details(ScoreDetails::Fairness(
                FairnessDetails {
                    accuracy_0: acc_0,
                    accuracy_1: acc_1,
                    tpr_0,
                    tpr_1,
                    group_0_size: c0.size,
                    group_1_size: c1.size,
                },
            )),
        )
    }
}

impl Default for FairnessAuditor {
    fn default() -> Self {
        Self::new()
    }
}

//! Two-group partition metrics
//!
//! Splits a frame by a binary group column and reports per-group sample size
//! and positive rate. This is the shared substrate for the bias scorer: a
//! group with no samples is a hard error here, never a silent zero.

use crate::error::{AuditError, Result};
use crate::frame::Frame;
use serde::{Deserialize, Serialize};

/// Per-group sample size and outcome rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    /// Number of rows in the group
    pub size: usize,
    /// Mean of the target over the group, ignoring NaN cells (NaN when the
    /// group has no finite target values)
    pub positive_rate: f64,
}

/// Metrics for a binary group partition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupMetrics {
    pub group_0: GroupStats,
    pub group_1: GroupStats,
}

impl GroupMetrics {
    /// Absolute difference between the two group rates
    pub fn disparity(&self) -> f64 {
        (self.group_0.positive_rate - self.group_1.positive_rate).abs()
    }
}

/// Partition a frame by a binary group column and compute per-group rates
///
/// The group column must be numeric with every value exactly 0 or 1; anything
/// else (including NaN) is rejected. The target column must be numeric. An
/// empty group after partitioning is an error.
///
/// # Example
///
/// ```
/// use equidad::audit::group_metrics;
/// use equidad::frame::Frame;
///
/// let frame = Frame::sample();
/// let metrics = group_metrics(&frame, "gender", "approved").unwrap();
/// assert_eq!(metrics.group_0.size + metrics.group_1.size, frame.len());
/// ```
pub fn group_metrics(frame: &Frame, group_col: &str, target_col: &str) -> Result<GroupMetrics> {
    let group = frame.numeric(group_col)?;
    let target = frame.numeric(target_col)?;

    for (row, &value) in group.iter().enumerate() {
        if value != 0.0 && value != 1.0 {
            return Err(AuditError::NonBinaryValue {
                column: group_col.to_string(),
                value,
                row,
            });
        }
    }

    let mut stats = [(0usize, 0usize, 0.0f64); 2]; // (size, finite count, sum)
    for (&g, &t) in group.iter().zip(target) {
        let slot = &mut stats[g as usize];
        slot.0 += 1;
        if !t.is_nan() {
            slot.1 += 1;
            slot.2 += t;
        }
    }

    let [(size_0, n0, sum_0), (size_1, n1, sum_1)] = stats;
    if size_0 == 0 || size_1 == 0 {
        return Err(AuditError::EmptyGroup {
            group_0: size_0,
            group_1: size_1,
        });
    }

    let rate = |finite: usize, sum: f64| {
        if finite == 0 {
            f64::NAN
        } else {
            sum / finite as f64
        }
    };

    Ok(GroupMetrics {
        group_0: GroupStats {
            size: size_0,
            positive_rate: rate(n0, sum_0),
        },
        group_1: GroupStats {
            size: size_1,
            positive_rate: rate(n1, sum_1),
        },
    })
}

//! Pairwise mean-comparison significance testing
//!
//! For every pair of groups in a column, runs Welch's two-sample t-test
//! (unequal variances, Welch-Satterthwaite degrees of freedom) on a numeric
//! outcome and flags pairs whose two-sided p-value falls below alpha. Pairs
//! where either subgroup has at most one observation are skipped silently:
//! they are under-powered, not invalid.

use crate::error::{AuditError, Result};
use crate::frame::{Column, Frame};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Mean outcome for one group (over finite cells only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub label: String,
    /// Number of finite outcome observations
    pub size: usize,
    pub mean: f64,
}

/// One pairwise test outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairResult {
    pub group_a: String,
    pub group_b: String,
    pub t_stat: f64,
    pub p_value: f64,
    pub flagged: bool,
}

impl PairResult {
    /// Display label, e.g. `"a vs b"`
    pub fn label(&self) -> String {
        format!("{} vs {}", self.group_a, self.group_b)
    }
}

/// Full output of a significance run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificanceReport {
    /// Per-group means in first-appearance order (for charting)
    pub group_means: Vec<GroupMean>,
    /// Tested pairs in first-appearance order
    pub pairs: Vec<PairResult>,
    /// Significance level the pairs were tested against
    pub alpha: f64,
}

impl SignificanceReport {
    /// Labels of the flagged pairs
    pub fn flagged_pairs(&self) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|p| p.flagged)
            .map(PairResult::label)
            .collect()
    }

    pub fn has_flags(&self) -> bool {
        self.pairs.iter().any(|p| p.flagged)
    }

    /// One-line verdict
    pub fn summary(&self) -> String {
        let flagged = self.flagged_pairs();
        if flagged.is_empty() {
            "No significant bias detected.".to_string()
        } else {
            format!("Potential bias detected between: {}", flagged.join(", "))
        }
    }
}

/// Pairwise Welch t-test runner
///
/// # Example
///
/// ```
/// use equidad::audit::SignificanceTester;
/// use equidad::frame::{Column, Frame};
///
/// let mut frame = Frame::new();
/// frame.push_column("dept", Column::Text(vec![
///     "a".into(), "a".into(), "b".into(), "b".into(),
/// ])).unwrap();
/// frame.push_column("salary", Column::Numeric(vec![50.0, 52.0, 70.0, 68.0])).unwrap();
///
/// let report = SignificanceTester::new().assess(&frame, "dept", "salary").unwrap();
/// assert_eq!(report.group_means.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SignificanceTester {
    alpha: f64,
}

impl SignificanceTester {
    /// Create a tester with the standard significance level (0.05)
    pub fn new() -> Self {
        Self { alpha: 0.05 }
    }

    /// Set the significance level
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Test all group pairs of `group_col` for mean differences in `outcome_col`
    ///
    /// The group column may be numeric or text; rows with a missing group
    /// value (NaN or blank) are skipped, as are non-finite outcome cells.
    pub fn assess(
        &self,
        frame: &Frame,
        group_col: &str,
        outcome_col: &str,
    ) -> Result<SignificanceReport> {
        let group = frame.require(group_col)?;
        let outcome = frame.numeric(outcome_col)?;

        // Per-group finite outcome samples, first-appearance order
        let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
        for row in 0..frame.len() {
            let label = match group {
                Column::Numeric(v) => {
                    if v[row].is_nan() {
                        continue;
                    }
                    v[row].to_string()
                }
                Column::Text(v) => {
                    if v[row].trim().is_empty() {
                        continue;
                    }
                    v[row].trim().to_string()
                }
            };
            let idx = match groups.iter().position(|(l, _)| *l == label) {
                Some(i) => i,
                None => {
                    groups.push((label, Vec::new()));
                    groups.len() - 1
                }
            };
            if outcome[row].is_finite() {
                groups[idx].1.push(outcome[row]);
            }
        }

        let group_means = groups
            .iter()
            .map(|(label, sample)| GroupMean {
                label: label.clone(),
                size: sample.len(),
                mean: mean(sample),
            })
            .collect();

        let mut pairs = Vec::new();
        for i in 0..groups.len() {
            for j in (i + 1)..groups.len() {
                let (label_a, sample_a) = &groups[i];
                let (label_b, sample_b) = &groups[j];
                if sample_a.len() <= 1 || sample_b.len() <= 1 {
                    continue;
                }
                let (t_stat, p_value) = welch_two_sided(sample_a, sample_b)?;
                pairs.push(PairResult {
                    group_a: label_a.clone(),
                    group_b: label_b.clone(),
                    t_stat,
                    p_value,
                    flagged: p_value < self.alpha,
                });
            }
        }

        Ok(SignificanceReport {
            group_means,
            pairs,
            alpha: self.alpha,
        })
    }
}

impl Default for SignificanceTester {
    fn default() -> Self {
        Self::new()
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Unbiased sample variance (n-1 denominator); caller guarantees n >= 2
fn var_sample(xs: &[f64]) -> f64 {
    let m = mean(xs);
    xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (xs.len() as f64 - 1.0)
}

/// Welch's t statistic and two-sided p-value
///
/// Zero-variance degenerate cases resolve without a distribution lookup:
/// identical constant samples give p = 1, constant samples with different
/// means give p = 0.
fn welch_two_sided(a: &[f64], b: &[f64]) -> Result<(f64, f64)> {
    let (ma, mb) = (mean(a), mean(b));
    let (va, vb) = (var_sample(a), var_sample(b));
    let (na, nb) = (a.len() as f64, b.len() as f64);

    let se2 = va / na + vb / nb;
    if se2 == 0.0 {
        return Ok(if ma == mb {
            (0.0, 1.0)
        } else if ma > mb {
            (f64::INFINITY, 0.0)
        } else {
            (f64::NEG_INFINITY, 0.0)
        });
    }

    let t = (ma - mb) / se2.sqrt();
    // Welch-Satterthwaite approximation
    let df = se2.powi(2)
        / ((va / na).powi(2) / (na - 1.0) + (vb / nb).powi(2) / (nb - 1.0));

    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| AuditError::Indeterminate(format!("t-distribution with df {df}: {e}")))?;
    let p = 2.0 * (1.0 - dist.cdf(t.abs()));
    Ok((t, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame(labels: Vec<&str>, outcome: Vec<f64>) -> Frame {
        let mut f = Frame::new();
        f.push_column(
            "group",
            Column::Text(labels.into_iter().map(str::to_string).collect()),
        )
        .unwrap();
        f.push_column("outcome", Column::Numeric(outcome)).unwrap();
        f
    }

    #[test]
    fn test_separated_groups_flagged() {
        let f = frame(
            vec!["a", "a", "a", "b", "b", "b"],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        );
        let report = SignificanceTester::new().assess(&f, "group", "outcome").unwrap();

        assert_eq!(report.pairs.len(), 1);
        let pair = &report.pairs[0];
        // Matches the reference value for these samples (p ~ 0.021)
        assert!(pair.p_value > 0.015 && pair.p_value < 0.03, "p = {}", pair.p_value);
        assert!(pair.flagged);
        assert!(report.summary().contains("Potential bias detected between: a vs b"));
    }

    #[test]
    fn test_identical_groups_not_flagged() {
        let f = frame(
            vec!["a", "a", "a", "b", "b", "b"],
            vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0],
        );
        let report = SignificanceTester::new().assess(&f, "group", "outcome").unwrap();

        assert_eq!(report.pairs.len(), 1);
        assert_relative_eq!(report.pairs[0].p_value, 1.0, epsilon = 1e-9);
        assert!(!report.pairs[0].flagged);
        assert_eq!(report.summary(), "No significant bias detected.");
    }

    #[test]
    fn test_identical_constant_groups_p_one() {
        let f = frame(vec!["a", "a", "b", "b"], vec![5.0, 5.0, 5.0, 5.0]);
        let report = SignificanceTester::new().assess(&f, "group", "outcome").unwrap();
        assert_eq!(report.pairs[0].p_value, 1.0);
        assert!(!report.pairs[0].flagged);
    }

    #[test]
    fn test_constant_groups_with_gap_flagged() {
        let f = frame(vec!["a", "a", "b", "b"], vec![1.0, 1.0, 9.0, 9.0]);
        let report = SignificanceTester::new().assess(&f, "group", "outcome").unwrap();
        assert_eq!(report.pairs[0].p_value, 0.0);
        assert!(report.pairs[0].flagged);
    }

    #[test]
    fn test_singleton_group_skipped_silently() {
        let f = frame(
            vec!["a", "a", "a", "b"],
            vec![1.0, 2.0, 3.0, 100.0],
        );
        let report = SignificanceTester::new().assess(&f, "group", "outcome").unwrap();

        assert_eq!(report.group_means.len(), 2);
        assert!(report.pairs.is_empty());
        assert!(!report.has_flags());
    }

    #[test]
    fn test_three_groups_pair_order() {
        let f = frame(
            vec!["x", "x", "y", "y", "z", "z"],
            vec![1.0, 2.0, 1.5, 2.5, 1.0, 3.0],
        );
        let report = SignificanceTester::new().assess(&f, "group", "outcome").unwrap();

        let labels: Vec<String> = report.pairs.iter().map(PairResult::label).collect();
        assert_eq!(labels, vec!["x vs y", "x vs z", "y vs z"]);
    }

    #[test]
    fn test_group_means_first_appearance_order() {
        let f = frame(vec!["b", "a", "b", "a"], vec![2.0, 10.0, 4.0, 20.0]);
        let report = SignificanceTester::new().assess(&f, "group", "outcome").unwrap();

        assert_eq!(report.group_means[0].label, "b");
        assert_relative_eq!(report.group_means[0].mean, 3.0);
        assert_eq!(report.group_means[1].label, "a");
        assert_relative_eq!(report.group_means[1].mean, 15.0);
    }

    #[test]
    fn test_numeric_group_labels() {
        let mut f = Frame::new();
        f.push_column("grp", Column::Numeric(vec![0.0, 0.0, 1.0, 1.0]))
            .unwrap();
        f.push_column("out", Column::Numeric(vec![1.0, 2.0, 3.0, 4.0]))
            .unwrap();
        let report = SignificanceTester::new().assess(&f, "grp", "out").unwrap();
        assert_eq!(report.group_means[0].label, "0");
        assert_eq!(report.group_means[1].label, "1");
    }

    #[test]
    fn test_missing_column_is_error() {
        let f = frame(vec!["a"], vec![1.0]);
        let err = SignificanceTester::new().assess(&f, "absent", "outcome").unwrap_err();
        assert!(matches!(err, AuditError::MissingColumn(_)));
    }

    #[test]
    fn test_non_numeric_outcome_is_error() {
        let mut f = Frame::new();
        f.push_column("group", Column::Text(vec!["a".into(), "b".into()]))
            .unwrap();
        f.push_column("outcome", Column::Text(vec!["hi".into(), "lo".into()]))
            .unwrap();
        let err = SignificanceTester::new().assess(&f, "group", "outcome").unwrap_err();
        assert!(matches!(err, AuditError::NotNumeric { .. }));
    }

    #[test]
    fn test_nan_cells_excluded() {
        let f = frame(
            vec!["a", "a", "a", "b", "b", "b"],
            vec![1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0],
        );
        let report = SignificanceTester::new().assess(&f, "group", "outcome").unwrap();
        assert_eq!(report.group_means[0].size, 2);
        assert_eq!(report.group_means[1].size, 3);
    }

    #[test]
    fn test_custom_alpha() {
        let f = frame(
            vec!["a", "a", "a", "b", "b", "b"],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        );
        // p ~ 0.021 is not significant at alpha = 0.01
        let report = SignificanceTester::new()
            .with_alpha(0.01)
            .assess(&f, "group", "outcome")
            .unwrap();
        assert!(!report.pairs[0].flagged);
    }

    #[test]
    fn test_welch_matches_reference() {
        // scipy.stats.ttest_ind([1,2,3], [4,5,6], equal_var=False)
        // -> t = -3.6742, p = 0.0213
        let (t, p) = welch_two_sided(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        assert_relative_eq!(t, -3.674234614174767, epsilon = 1e-9);
        assert_relative_eq!(p, 0.02131164, epsilon = 1e-5);
    }
}

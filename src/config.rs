//! YAML configuration for audit thresholds and keyword sets
//!
//! Every field has a default matching the built-in auditor settings, so an
//! empty mapping, a partial file, or no file at all each yield a working
//! configuration. `load_config` reads, parses, and validates in one step.

use crate::audit::{BiasAuditor, DocAuditor, FairnessAuditor, SignificanceTester};
use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Rating thresholds for one two-tier scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Scores strictly above this get the top rating
    #[serde(default = "default_good_threshold")]
    pub good_threshold: f64,

    /// Scores strictly above this (but not the good bar) get the middle rating
    #[serde(default = "default_moderate_threshold")]
    pub moderate_threshold: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            good_threshold: default_good_threshold(),
            moderate_threshold: default_moderate_threshold(),
        }
    }
}

/// Documentation scorer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocConfig {
    /// Scores strictly above this rate Complete
    #[serde(default = "default_complete_threshold")]
    pub complete_threshold: f64,

    /// Scores strictly above this rate Partial
    #[serde(default = "default_partial_threshold")]
    pub partial_threshold: f64,

    /// Deduction per low-scoring upstream audit
    #[serde(default = "default_penalty")]
    pub penalty: f64,

    /// Upstream score below which the penalty applies
    #[serde(default = "default_penalty_threshold")]
    pub penalty_threshold: f64,

    /// Keywords accepted as covering the purpose topic
    #[serde(default = "default_purpose_keywords")]
    pub purpose_keywords: Vec<String>,

    /// Keywords accepted as covering the data topic
    #[serde(default = "default_data_keywords")]
    pub data_keywords: Vec<String>,

    /// Keywords accepted as covering the limitations topic
    #[serde(default = "default_limitation_keywords")]
    pub limitation_keywords: Vec<String>,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            complete_threshold: default_complete_threshold(),
            partial_threshold: default_partial_threshold(),
            penalty: default_penalty(),
            penalty_threshold: default_penalty_threshold(),
            purpose_keywords: default_purpose_keywords(),
            data_keywords: default_data_keywords(),
            limitation_keywords: default_limitation_keywords(),
        }
    }
}

/// Pairwise significance test settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignificanceConfig {
    /// Two-sided p-value threshold for flagging a pair
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Default for SignificanceConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
        }
    }
}

/// Complete audit configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Outcome-rate bias scorer thresholds
    #[serde(default)]
    pub bias: ThresholdConfig,

    /// Prediction fairness scorer thresholds
    #[serde(default)]
    pub fairness: ThresholdConfig,

    /// Documentation scorer settings
    #[serde(default)]
    pub documentation: DocConfig,

    /// Pairwise significance test settings
    #[serde(default)]
    pub significance: SignificanceConfig,
}

impl AuditConfig {
    /// Bias auditor built from this configuration
    pub fn bias_auditor(&self) -> BiasAuditor {
        BiasAuditor::new().with_thresholds(self.bias.good_threshold, self.bias.moderate_threshold)
    }

    /// Fairness auditor built from this configuration
    pub fn fairness_auditor(&self) -> FairnessAuditor {
        FairnessAuditor::new()
            .with_thresholds(self.fairness.good_threshold, self.fairness.moderate_threshold)
    }

    /// Documentation auditor built from this configuration
    pub fn doc_auditor(&self) -> DocAuditor {
        DocAuditor::new()
            .with_thresholds(
                self.documentation.complete_threshold,
                self.documentation.partial_threshold,
            )
            .with_penalty(
                self.documentation.penalty,
                self.documentation.penalty_threshold,
            )
            .with_keywords(
                self.documentation.purpose_keywords.clone(),
                self.documentation.data_keywords.clone(),
                self.documentation.limitation_keywords.clone(),
            )
    }

    /// Significance tester built from this configuration
    pub fn significance_tester(&self) -> SignificanceTester {
        SignificanceTester::new().with_alpha(self.significance.alpha)
    }
}

/// Configuration validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid {scorer} threshold: {value} (must be within 0.0..=1.0)")]
    ThresholdRange { scorer: &'static str, value: f64 },

    #[error("Invalid {scorer} thresholds: good bar {good} must exceed moderate bar {moderate}")]
    ThresholdOrder {
        scorer: &'static str,
        good: f64,
        moderate: f64,
    },

    #[error("Invalid documentation penalty: {0} (must be within 0.0..=1.0)")]
    InvalidPenalty(f64),

    #[error("Invalid significance level: {0} (must be strictly between 0 and 1)")]
    InvalidAlpha(f64),

    #[error("Empty keyword list: {0}")]
    EmptyKeywords(&'static str),
}

/// Validate an audit configuration
///
/// Checks:
/// - Thresholds are within [0, 1] and ordered (good strictly above moderate)
/// - Documentation penalty and penalty threshold are within [0, 1]
/// - Keyword lists are non-empty
/// - Significance alpha is strictly between 0 and 1
pub fn validate_config(config: &AuditConfig) -> std::result::Result<(), ValidationError> {
    let tiers = [
        ("bias", config.bias.good_threshold, config.bias.moderate_threshold),
        (
            "fairness",
            config.fairness.good_threshold,
            config.fairness.moderate_threshold,
        ),
        (
            "documentation",
            config.documentation.complete_threshold,
            config.documentation.partial_threshold,
        ),
    ];
    for (scorer, good, moderate) in tiers {
        for value in [good, moderate] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::ThresholdRange { scorer, value });
            }
        }
        if good <= moderate {
            return Err(ValidationError::ThresholdOrder {
                scorer,
                good,
                moderate,
            });
        }
    }

    if !(0.0..=1.0).contains(&config.documentation.penalty) {
        return Err(ValidationError::InvalidPenalty(config.documentation.penalty));
    }
    if !(0.0..=1.0).contains(&config.documentation.penalty_threshold) {
        return Err(ValidationError::ThresholdRange {
            scorer: "documentation",
            value: config.documentation.penalty_threshold,
        });
    }

    let keyword_lists = [
        ("documentation.purpose_keywords", &config.documentation.purpose_keywords),
        ("documentation.data_keywords", &config.documentation.data_keywords),
        (
            "documentation.limitation_keywords",
            &config.documentation.limitation_keywords,
        ),
    ];
    for (name, keywords) in keyword_lists {
        if keywords.is_empty() {
            return Err(ValidationError::EmptyKeywords(name));
        }
    }

    if config.significance.alpha <= 0.0 || config.significance.alpha >= 1.0 {
        return Err(ValidationError::InvalidAlpha(config.significance.alpha));
    }

    Ok(())
}

/// Load and validate a YAML configuration file
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<AuditConfig> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        AuditError::Config(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;

    let config: AuditConfig = serde_yaml::from_str(&yaml_content)
        .map_err(|e| AuditError::Config(format!("Failed to parse YAML config: {}", e)))?;

    validate_config(&config)
        .map_err(|e| AuditError::Config(format!("Invalid config: {}", e)))?;

    Ok(config)
}

fn default_good_threshold() -> f64 {
    0.8
}

fn default_moderate_threshold() -> f64 {
    0.6
}

fn default_complete_threshold() -> f64 {
    0.8
}

fn default_partial_threshold() -> f64 {
    0.5
}

fn default_penalty() -> f64 {
    0.2
}

fn default_penalty_threshold() -> f64 {
    0.6
}

fn default_purpose_keywords() -> Vec<String> {
    vec!["purpose".into(), "objective".into(), "goal".into()]
}

fn default_data_keywords() -> Vec<String> {
    vec!["data".into(), "dataset".into(), "collection".into()]
}

fn default_limitation_keywords() -> Vec<String> {
    vec!["limitation".into(), "constraint".into(), "bias".into(), "issue".into()]
}

fn default_alpha() -> f64 {
    0.05
}

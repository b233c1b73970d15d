//! # Equidad: Group Fairness & Bias Auditing
//!
//! Equidad scores tabular model data for group fairness: outcome-rate bias
//! between two groups, prediction fairness (accuracy and true positive rate
//! parity), pairwise statistical significance of outcome differences,
//! documentation completeness, and PII exposure. Individual outcomes
//! assemble into a renderable audit report.
//!
//! ## Architecture
//!
//! - **frame**: Column-oriented tabular data with CSV loading and type inference
//! - **audit**: The scorers (bias, fairness, significance, docs, PII)
//! - **report**: Report assembly, rendering, and the insight backend seam
//! - **config**: Declarative YAML configuration for thresholds and keywords
//! - **cli**: Command-line argument parsing
//!
//! ## Example
//!
//! ```
//! use equidad::audit::BiasAuditor;
//! use equidad::frame::Frame;
//!
//! let frame = Frame::sample();
//! let result = BiasAuditor::new().assess(&frame, "gender", "approved").unwrap();
//! assert!(result.score >= 0.0 && result.score <= 1.0);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod frame;
pub mod report;

pub mod error;

// Re-export commonly used types
pub use audit::{BiasAuditor, DocAuditor, FairnessAuditor, Rating, ScoreResult, SignificanceTester};
pub use error::{AuditError, Result};
pub use frame::{Column, Frame};
pub use report::AuditReport;

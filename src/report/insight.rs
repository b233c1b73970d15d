//! Narrative analysis over assembled reports
//!
//! An optional analysis backend (a local language model, a remote service)
//! is modeled as an injectable trait object. The service initializes the
//! backend lazily on the first request and at most once per process; a
//! failed initialization parks the service in [`InsightStatus::Unavailable`]
//! permanently. Every failure path degrades to [`fallback_summary`], a pure
//! function of the report, so callers always get a usable narrative.

use crate::error::Result;
use crate::report::AuditReport;

/// Pluggable narrative generator
pub trait InsightBackend {
    /// Prepare the backend; called once before the first analysis
    fn init(&mut self) -> Result<()>;

    /// Produce a narrative for the report
    fn analyze(&self, report: &AuditReport) -> Result<String>;

    /// Backend name for diagnostics
    fn name(&self) -> &str;
}

/// Lifecycle state of the analysis backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightStatus {
    /// Backend present but not yet initialized
    Uninitialized,
    /// Backend initialized and answering
    Ready,
    /// No backend, or initialization failed; fallback only
    Unavailable,
}

/// Owns the backend and enforces the initialize-once lifecycle
pub struct InsightService {
    backend: Option<Box<dyn InsightBackend>>,
    status: InsightStatus,
    last_error: Option<String>,
}

impl InsightService {
    /// Service around an injected backend
    pub fn new(backend: Box<dyn InsightBackend>) -> Self {
        Self {
            backend: Some(backend),
            status: InsightStatus::Uninitialized,
            last_error: None,
        }
    }

    /// Service with no backend at all; every request uses the fallback
    pub fn disabled() -> Self {
        Self {
            backend: None,
            status: InsightStatus::Unavailable,
            last_error: None,
        }
    }

    pub fn status(&self) -> InsightStatus {
        self.status
    }

    /// Most recent backend failure, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Produce a narrative for the report
    ///
    /// Never fails: backend errors are recorded and the deterministic
    /// fallback is returned instead.
    pub fn analyze(&mut self, report: &AuditReport) -> String {
        if self.status == InsightStatus::Uninitialized {
            self.status = match self.backend.as_mut() {
                Some(backend) => match backend.init() {
                    Ok(()) => InsightStatus::Ready,
                    Err(e) => {
                        self.last_error = Some(format!("{}: {}", backend.name(), e));
                        InsightStatus::Unavailable
                    }
                },
                None => InsightStatus::Unavailable,
            };
        }

        if self.status == InsightStatus::Ready {
            if let Some(backend) = &self.backend {
                match backend.analyze(report) {
                    Ok(text) => return text,
                    Err(e) => {
                        self.last_error = Some(format!("{}: {}", backend.name(), e));
                    }
                }
            }
        }

        fallback_summary(report)
    }
}

/// Deterministic one-paragraph summary derived from the report fields
pub fn fallback_summary(report: &AuditReport) -> String {
    let mut lines = vec![format!("Audit summary for {}:", report.title)];

    let scored = [
        ("bias", &report.bias),
        ("fairness", &report.fairness),
        ("documentation", &report.documentation),
    ];
    for (label, result) in scored {
        if let Some(r) = result {
            lines.push(format!("- {}: {} (score {:.2})", label, r.rating, r.score));
        }
    }
    if let Some(significance) = &report.significance {
        lines.push(format!(
            "- significance: {} pairs tested, {} flagged",
            significance.pairs.len(),
            significance.flagged_pairs().len()
        ));
    }
    if let Some(pii) = &report.pii {
        lines.push(if pii.has_findings() {
            format!("- pii: {} pattern(s) matched", pii.findings.len())
        } else {
            "- pii: clean".to_string()
        });
    }
    if let Some(rec) = report.recommendations().first() {
        lines.push(format!("Next step: {}", rec));
    }

    lines.join("\n")
}

//! CLI argument parsing and validation
//!
//! This module provides the command-line interface for equidad audits.
//!
//! # Usage
//!
//! ```bash
//! equidad audit data.csv --group-col gender --target-col approved
//! equidad audit data.csv --group-col gender --target-col approved --pred-col predicted
//! equidad audit data.csv --group-col gender --target-col approved --format json
//! equidad scan data.csv
//! equidad info data.csv
//! equidad validate equidad.yaml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Equidad: Group Fairness & Bias Auditing
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "equidad")]
#[command(author = "PAIML")]
#[command(version)]
#[command(
    about = "Group fairness auditing for tabular data: bias, fairness, significance, documentation, and PII checks"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the full audit over a CSV dataset
    Audit(AuditArgs),

    /// Scan a CSV dataset for PII only
    Scan(ScanArgs),

    /// Display the inferred schema of a CSV dataset
    Info(InfoArgs),

    /// Validate a configuration file without auditing
    Validate(ValidateArgs),
}

/// Arguments for the audit command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AuditArgs {
    /// Path to the CSV dataset
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Column holding the binary group indicator (0/1)
    #[arg(long, value_name = "COLUMN")]
    pub group_col: String,

    /// Column holding the binary outcome (0/1)
    #[arg(long, value_name = "COLUMN")]
    pub target_col: String,

    /// Column holding binary model predictions; enables the fairness audit
    #[arg(long, value_name = "COLUMN")]
    pub pred_col: Option<String>,

    /// Column for the pairwise significance test (defaults to the target)
    #[arg(long, value_name = "COLUMN")]
    pub outcome_col: Option<String>,

    /// Column whose distinct values form the significance test groups
    /// (defaults to the group column)
    #[arg(long, value_name = "COLUMN")]
    pub sig_group_col: Option<String>,

    /// Path to a model documentation text file
    #[arg(short, long)]
    pub docs: Option<PathBuf>,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report title (defaults to the data file name)
    #[arg(long)]
    pub title: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the scan command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ScanArgs {
    /// Path to the CSV dataset
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to the CSV dataset
    #[arg(value_name = "DATA")]
    pub data: PathBuf,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to the YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown output format: {}. Valid formats: text, json",
                s
            )),
        }
    }
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_audit_command() {
        let cli = parse_args([
            "equidad",
            "audit",
            "data.csv",
            "--group-col",
            "gender",
            "--target-col",
            "approved",
        ])
        .unwrap();

        match cli.command {
            Command::Audit(args) => {
                assert_eq!(args.data, PathBuf::from("data.csv"));
                assert_eq!(args.group_col, "gender");
                assert_eq!(args.target_col, "approved");
                assert_eq!(args.pred_col, None);
                assert_eq!(args.format, OutputFormat::Text);
            }
            _ => panic!("Expected Audit command"),
        }
    }

    #[test]
    fn test_parse_audit_with_all_options() {
        let cli = parse_args([
            "equidad",
            "audit",
            "data.csv",
            "--group-col",
            "gender",
            "--target-col",
            "approved",
            "--pred-col",
            "predicted",
            "--outcome-col",
            "salary",
            "--sig-group-col",
            "department",
            "--docs",
            "model_card.md",
            "--config",
            "equidad.yaml",
            "--title",
            "loan-model-v2",
            "--format",
            "json",
            "--output",
            "report.json",
        ])
        .unwrap();

        match cli.command {
            Command::Audit(args) => {
                assert_eq!(args.pred_col, Some("predicted".to_string()));
                assert_eq!(args.outcome_col, Some("salary".to_string()));
                assert_eq!(args.sig_group_col, Some("department".to_string()));
                assert_eq!(args.docs, Some(PathBuf::from("model_card.md")));
                assert_eq!(args.config, Some(PathBuf::from("equidad.yaml")));
                assert_eq!(args.title, Some("loan-model-v2".to_string()));
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.output, Some(PathBuf::from("report.json")));
            }
            _ => panic!("Expected Audit command"),
        }
    }

    #[test]
    fn test_audit_requires_group_and_target() {
        assert!(parse_args(["equidad", "audit", "data.csv"]).is_err());
        assert!(parse_args(["equidad", "audit", "data.csv", "--group-col", "g"]).is_err());
        assert!(parse_args(["equidad", "audit", "data.csv", "--target-col", "t"]).is_err());
    }

    #[test]
    fn test_parse_scan_command() {
        let cli = parse_args(["equidad", "scan", "data.csv"]).unwrap();
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.data, PathBuf::from("data.csv"));
                assert_eq!(args.format, OutputFormat::Text);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_parse_info_command() {
        let cli = parse_args(["equidad", "info", "data.csv"]).unwrap();
        match cli.command {
            Command::Info(args) => {
                assert_eq!(args.data, PathBuf::from("data.csv"));
            }
            _ => panic!("Expected Info command"),
        }
    }

    #[test]
    fn test_parse_validate_command() {
        let cli = parse_args(["equidad", "validate", "equidad.yaml"]).unwrap();
        match cli.command {
            Command::Validate(args) => {
                assert_eq!(args.config, PathBuf::from("equidad.yaml"));
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_global_verbose_flag() {
        let cli = parse_args(["equidad", "-v", "scan", "data.csv"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_global_quiet_flag() {
        let cli = parse_args(["equidad", "-q", "scan", "data.csv"]).unwrap();
        assert!(!cli.verbose);
        assert!(cli.quiet);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_missing_data_file() {
        assert!(parse_args(["equidad", "scan"]).is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_args(["equidad", "unknown"]).is_err());
    }
}

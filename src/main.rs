//! Equidad CLI
//!
//! Audit entry point for the equidad library.
//!
//! # Usage
//!
//! ```bash
//! # Full audit
//! equidad audit data.csv --group-col gender --target-col approved
//!
//! # With predictions and documentation
//! equidad audit data.csv --group-col gender --target-col approved \
//!     --pred-col predicted --docs model_card.md
//!
//! # PII scan only
//! equidad scan data.csv
//!
//! # Inferred dataset schema
//! equidad info data.csv
//!
//! # Validate config
//! equidad validate equidad.yaml
//! ```

use clap::Parser;
use equidad::audit::{scan_pii, FairnessInput};
use equidad::cli::{AuditArgs, Cli, Command, InfoArgs, OutputFormat, ScanArgs, ValidateArgs};
use equidad::config::{load_config, AuditConfig};
use equidad::frame::read_csv;
use equidad::report::{AuditReport, InsightService};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configure output based on verbose/quiet flags
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    let result = match cli.command {
        Command::Audit(args) => run_audit(args, log_level),
        Command::Scan(args) => run_scan(args, log_level),
        Command::Info(args) => run_info(args, log_level),
        Command::Validate(args) => run_validate(args, log_level),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

fn run_audit(args: AuditArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Equidad: auditing {}", args.data.display()),
    );

    let config = match &args.config {
        Some(path) => load_config(path).map_err(|e| format!("Config error: {e}"))?,
        None => AuditConfig::default(),
    };

    let frame = read_csv(&args.data).map_err(|e| format!("Data error: {e}"))?;
    log(level, LogLevel::Verbose, &format!("  Rows: {}", frame.len()));
    log(
        level,
        LogLevel::Verbose,
        &format!("  Columns: {}", frame.width()),
    );

    let title = args.title.clone().unwrap_or_else(|| data_title(&args.data));

    let bias = config
        .bias_auditor()
        .assess(&frame, &args.group_col, &args.target_col);
    let mut report = AuditReport::new(title).with_bias(bias);

    if let Some(pred_col) = &args.pred_col {
        let fairness =
            FairnessInput::from_frame(&frame, &args.group_col, &args.target_col, pred_col)
                .and_then(|input| config.fairness_auditor().assess(&input));
        report = report.with_fairness(fairness);
    }

    let outcome_col = args.outcome_col.as_deref().unwrap_or(&args.target_col);
    let sig_group_col = args.sig_group_col.as_deref().unwrap_or(&args.group_col);
    report = report.with_significance(
        config
            .significance_tester()
            .assess(&frame, sig_group_col, outcome_col),
    );

    if let Some(docs_path) = &args.docs {
        let text = std::fs::read_to_string(docs_path)
            .map_err(|e| format!("Failed to read docs file {}: {e}", docs_path.display()))?;
        let docs =
            config
                .doc_auditor()
                .assess(&text, report.bias.as_ref(), report.fairness.as_ref());
        report = report.with_documentation(docs);
    }

    report = report.with_pii(scan_pii(&frame));

    let rendered = match args.format {
        OutputFormat::Text => report.render(),
        OutputFormat::Json => report
            .to_json()
            .map_err(|e| format!("Serialization error: {e}"))?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .map_err(|e| format!("Failed to write report to {}: {e}", path.display()))?;
            log(
                level,
                LogLevel::Normal,
                &format!("Report written to {}", path.display()),
            );
        }
        None => println!("{rendered}"),
    }

    if level == LogLevel::Verbose {
        let mut insight = InsightService::disabled();
        log(level, LogLevel::Verbose, "");
        log(level, LogLevel::Verbose, &insight.analyze(&report));
    }

    Ok(())
}

fn run_scan(args: ScanArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Equidad: scanning {} for PII", args.data.display()),
    );

    let frame = read_csv(&args.data).map_err(|e| format!("Data error: {e}"))?;
    let report = scan_pii(&frame);

    match args.format {
        OutputFormat::Text => println!("{}", report.to_message()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
    }

    Ok(())
}

fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let frame = read_csv(&args.data).map_err(|e| format!("Data error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Dataset: {}", args.data.display()),
    );
    println!("Rows: {}", frame.len());
    println!("Columns: {}", frame.width());
    println!();
    for (name, column) in frame.iter() {
        println!("  {} ({})", name, column.type_name());
    }

    Ok(())
}

fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Bias thresholds: {}/{}",
            config.bias.good_threshold, config.bias.moderate_threshold
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Fairness thresholds: {}/{}",
            config.fairness.good_threshold, config.fairness.moderate_threshold
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("  Documentation penalty: {}", config.documentation.penalty),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("  Significance alpha: {}", config.significance.alpha),
    );

    Ok(())
}

fn data_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use equidad::audit::{BiasAuditor, SignificanceTester};
use equidad::frame::{Column, Frame};

/// Fuzz target for the statistical scorers
///
/// Tests that bias scoring and pairwise significance testing never panic
/// and keep their outputs in range, even on degenerate group layouts and
/// extreme outcome values.

#[derive(Arbitrary, Debug)]
struct AuditFuzzInput {
    rows: Vec<(u8, u8, f64)>, // (group, target, outcome)
    alpha_milli: u16,         // scaled to (0, 1)
}

fuzz_target!(|input: AuditFuzzInput| {
    if input.rows.is_empty() || input.rows.len() > 4096 {
        return;
    }

    let mut frame = Frame::new();
    let group: Vec<f64> = input.rows.iter().map(|(g, _, _)| (*g % 4) as f64).collect();
    let target: Vec<f64> = input.rows.iter().map(|(_, t, _)| (*t % 2) as f64).collect();
    let outcome: Vec<f64> = input.rows.iter().map(|(_, _, o)| *o).collect();
    if frame.push_column("grp", Column::Numeric(group)).is_err() {
        return;
    }
    if frame.push_column("tgt", Column::Numeric(target)).is_err() {
        return;
    }
    if frame.push_column("out", Column::Numeric(outcome)).is_err() {
        return;
    }

    // Bias score stays in [0, 1] whenever scoring succeeds
    if let Ok(result) = BiasAuditor::new().assess(&frame, "grp", "tgt") {
        assert!((0.0..=1.0).contains(&result.score));
    }

    // Pairwise t-tests keep p-values in [0, 1] for every tested pair
    let alpha = (input.alpha_milli as f64 + 1.0) / (u16::MAX as f64 + 2.0);
    let tester = SignificanceTester::new().with_alpha(alpha);
    if let Ok(report) = tester.assess(&frame, "grp", "out") {
        for pair in &report.pairs {
            assert!((0.0..=1.0).contains(&pair.p_value));
        }
    }
});

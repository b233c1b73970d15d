//! Performance benchmarks for the audit scorers.
//!
//! Validates that a full audit pass stays cheap enough to run inline in
//! CI pipelines, even on datasets with tens of thousands of rows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use equidad::audit::{scan_pii, BiasAuditor, FairnessAuditor, FairnessInput, SignificanceTester};
use equidad::frame::{Column, Frame};
use equidad::report::AuditReport;

/// Build a deterministic two-group frame with binary target and
/// predictions plus a continuous outcome column
fn synthetic_frame(rows: usize) -> Frame {
    let mut frame = Frame::new();
    let group: Vec<f64> = (0..rows).map(|i| (i % 2) as f64).collect();
    let target: Vec<f64> = (0..rows).map(|i| ((i % 3) == 0) as u8 as f64).collect();
    let predicted: Vec<f64> = (0..rows).map(|i| ((i % 3) == 0 || (i % 7) == 0) as u8 as f64).collect();
    let outcome: Vec<f64> = (0..rows)
        .map(|i| 50.0 + (i % 10) as f64 + 5.0 * (i % 2) as f64)
        .collect();
    frame.push_column("grp", Column::Numeric(group)).unwrap();
    frame.push_column("tgt", Column::Numeric(target)).unwrap();
    frame.push_column("pred", Column::Numeric(predicted)).unwrap();
    frame.push_column("out", Column::Numeric(outcome)).unwrap();
    frame
}

/// Benchmark BiasAuditor::assess throughput
fn bench_bias_assess(c: &mut Criterion) {
    let mut group = c.benchmark_group("BiasAuditor");

    for size in [100, 1_000, 10_000].iter() {
        let frame = synthetic_frame(*size);
        let auditor = BiasAuditor::new();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("assess", size), size, |b, _| {
            b.iter(|| black_box(auditor.assess(&frame, "grp", "tgt").unwrap()));
        });
    }
    group.finish();
}

/// Benchmark FairnessAuditor end to end, including column extraction
fn bench_fairness_assess(c: &mut Criterion) {
    let mut group = c.benchmark_group("FairnessAuditor");

    for size in [100, 1_000, 10_000].iter() {
        let frame = synthetic_frame(*size);
        let auditor = FairnessAuditor::new();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("assess", size), size, |b, _| {
            b.iter(|| {
                let input = FairnessInput::from_frame(&frame, "grp", "tgt", "pred").unwrap();
                black_box(auditor.assess(&input).unwrap())
            });
        });
    }
    group.finish();
}

/// Benchmark pairwise significance testing over the outcome column
fn bench_significance(c: &mut Criterion) {
    let mut group = c.benchmark_group("Significance");

    for size in [100, 1_000, 10_000].iter() {
        let frame = synthetic_frame(*size);
        let tester = SignificanceTester::new();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("assess", size), size, |b, _| {
            b.iter(|| black_box(tester.assess(&frame, "grp", "out").unwrap()));
        });
    }
    group.finish();
}

/// Benchmark the PII regex scan over a mixed text frame
fn bench_pii_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("PiiScan");

    for size in [100, 1_000, 10_000].iter() {
        let mut frame = Frame::new();
        let notes: Vec<String> = (0..*size)
            .map(|i| format!("case {i} reviewed by analyst {}", i % 17))
            .collect();
        let ids: Vec<f64> = (0..*size).map(|i| i as f64).collect();
        frame.push_column("notes", Column::Text(notes)).unwrap();
        frame.push_column("id", Column::Numeric(ids)).unwrap();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("scan", size), size, |b, _| {
            b.iter(|| black_box(scan_pii(&frame)));
        });
    }
    group.finish();
}

/// Benchmark report rendering with every section populated
fn bench_report_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("ReportRender");

    let frame = synthetic_frame(1_000);
    let report = AuditReport::new("bench-dataset")
        .with_bias(BiasAuditor::new().assess(&frame, "grp", "tgt"))
        .with_fairness(
            FairnessInput::from_frame(&frame, "grp", "tgt", "pred")
                .and_then(|input| FairnessAuditor::new().assess(&input)),
        )
        .with_significance(SignificanceTester::new().assess(&frame, "grp", "out"))
        .with_pii(scan_pii(&frame));

    group.bench_function("render_text", |b| {
        b.iter(|| black_box(report.render()));
    });

    group.bench_function("render_json", |b| {
        b.iter(|| black_box(report.to_json().unwrap()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_bias_assess,
    bench_fairness_assess,
    bench_significance,
    bench_pii_scan,
    bench_report_render
);
criterion_main!(benches);

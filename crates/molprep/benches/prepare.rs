//! Matrix building, transform and split benchmarks.
//!
//! Run with: `cargo bench --bench prepare`

use std::collections::BTreeMap;
use std::hint::black_box;
use std::num::NonZeroUsize;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use molprep::split::{random_split_seeded, scaffold_split};
use molprep::testing::SyntheticDataset;
use molprep::transform::default_descriptor_transforms;
use molprep::{MatrixBuilder, NoopReporter, PrepConfig, prepare};

fn criterion_config() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5))
        .sample_size(10)
}

fn shape(n_compounds: usize) -> SyntheticDataset {
    SyntheticDataset {
        n_compounds,
        n_features: 1024,
        n_targets: 12,
        n_descriptors: 157,
        n_scaffolds: n_compounds / 10,
        missing_fraction: 0.3,
    }
}

// =============================================================================
// Matrix Building
// =============================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("component/build");

    for n in [1_000usize, 5_000] {
        let ds = shape(n).generate(42);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("with_descriptors", n), &ds, |b, ds| {
            b.iter(|| black_box(MatrixBuilder::new().with_descriptors(true).build(black_box(ds))))
        });
    }
    group.finish();
}

// =============================================================================
// Prepare (build + transform)
// =============================================================================

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("component/prepare");

    let task_transforms: BTreeMap<String, Vec<String>> = (0..12)
        .map(|t| {
            let chain = vec!["log".to_string(), "normalize".to_string()];
            (SyntheticDataset::target_name(t), chain)
        })
        .collect();

    let ds = shape(5_000).generate(42);
    group.throughput(Throughput::Elements(5_000));
    for n_threads in [1usize, 4] {
        let config = PrepConfig::builder()
            .task_transforms(task_transforms.clone())
            .desc_transforms(default_descriptor_transforms())
            .add_descriptors(true)
            .maybe_n_threads(NonZeroUsize::new(n_threads))
            .build()
            .expect("valid config");
        group.bench_with_input(BenchmarkId::new("threads", n_threads), &config, |b, config| {
            b.iter(|| black_box(prepare(black_box(&ds), config, &NoopReporter)))
        });
    }
    group.finish();
}

// =============================================================================
// Splits
// =============================================================================

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("component/split");

    let ds = shape(10_000).generate(7);
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("random", |b| b.iter(|| black_box(random_split_seeded(&ds, 0.8, Some(1)))));
    group.bench_function("scaffold", |b| b.iter(|| black_box(scaffold_split(&ds, 0.8, false))));
    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_build, bench_prepare, bench_split
}
criterion_main!(benches);

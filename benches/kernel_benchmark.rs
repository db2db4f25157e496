use anova_kernel::core::EvaluationMethod;
use anova_kernel::matrix::compute_kernel_matrix;
use anova_kernel::{AnovaKernel, DenseFeatures};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

fn vectors(n: usize) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin()).collect();
    let z: Vec<f64> = (0..n).map(|i| (i as f64 * 0.11).cos()).collect();
    (x, z)
}

fn bench_methods(c: &mut Criterion) {
    for method in [EvaluationMethod::SubsetSum, EvaluationMethod::PowerSum] {
        let mut group = c.benchmark_group(format!("anova_{method}"));
        for &(n, d) in &[(16, 2), (64, 4), (256, 4), (256, 16), (1024, 8)] {
            let (x, z) = vectors(n);
            let mut kernel = AnovaKernel::new(d as i32, 0).expect("valid degree");
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("n{n}_d{d}")),
                &n,
                |b, &_n| {
                    b.iter(|| kernel.compute_vectors_with(method, black_box(&x), black_box(&z)));
                },
            );
        }
        group.finish();
    }
}

fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("anova_matrix");
    group.sample_size(20);
    for &rows in &[32, 128] {
        let features = Arc::new(DenseFeatures::new(
            (0..rows)
                .map(|r| (0..64).map(|i| ((r * 64 + i) as f64 * 0.013).sin()).collect())
                .collect(),
        ));
        let kernel =
            AnovaKernel::with_features(features.clone(), features, 3, 0).expect("valid kernel");
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &_rows| {
            b.iter(|| compute_kernel_matrix(&kernel));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_methods, bench_matrix);
criterion_main!(benches);

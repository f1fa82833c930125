use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{s, Array2};
use rand::distr::{Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};
use single_quality::measures::{continuity, stress, strain, trustworthiness};
use single_quality::QualityArgs;
use std::time::Duration;

fn create_data(n_points: usize, n_features: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let value_dist = Uniform::try_from(0.0..1.0).unwrap();
    Array2::from_shape_fn((n_points, n_features), |_| value_dist.sample(&mut rng))
}

pub fn bench_measures(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut group = c.benchmark_group("Quality_Measures");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    for &n in [100usize, 500].iter() {
        let high = create_data(n, 32, 42 + n as u64);
        // Projection onto the first two coordinates as a cheap embedding.
        let low = high.slice(s![.., ..2]).to_owned();
        let args = QualityArgs::new()
            .high_data(high.view())
            .low_data(low.view())
            .n_neighbors(10);

        group.bench_with_input(BenchmarkId::new("trustworthiness", n), &n, |b, _| {
            b.iter(|| trustworthiness(&args).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("continuity", n), &n, |b, _| {
            b.iter(|| continuity(&args).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("stress", n), &n, |b, _| {
            b.iter(|| stress(&args).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("strain", n), &n, |b, _| {
            b.iter(|| strain(&args).unwrap());
        });
    }
    group.finish();
}

criterion_group!(measure_benches, bench_measures);
criterion_main!(measure_benches);

//! Criterion benchmarks for capsule-chain buffering.
//! Focus sizes: polylines with n in {2, 10, 50, 200} points.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use toolplace::geom::buffer_polyline;

fn random_polyline(n: usize, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pts = vec![Vector2::new(0.0, 0.0)];
    let mut heading: f64 = rng.gen::<f64>() * std::f64::consts::TAU;
    for i in 1..n {
        heading += rng.gen_range(-1.0..1.0);
        let len = rng.gen_range(5.0..15.0);
        pts.push(pts[i - 1] + Vector2::new(heading.cos(), heading.sin()) * len);
    }
    pts
}

fn bench_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer");
    for &n in &[2usize, 10, 50, 200] {
        group.bench_with_input(BenchmarkId::new("buffer_polyline", n), &n, |b, &n| {
            b.iter_batched(
                || random_polyline(n, 43),
                |pts| {
                    let _quads = buffer_polyline(&pts, 1.5).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_buffer);
criterion_main!(benches);

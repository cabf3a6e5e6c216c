//! Criterion benchmarks for contact-event consolidation.
//! Focus sizes: streams with m in {10, 100, 1000} events.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use toolplace::contact::{consolidate, ContactEvent, ContactKind};

fn random_events(m: usize, seed: u64) -> Vec<ContactEvent> {
    let ids = ["ball", "block", "goal", "tool", "floor", "wall"];
    let mut rng = StdRng::seed_from_u64(seed);
    (0..m)
        .map(|_| ContactEvent {
            first: ids[rng.gen_range(0..ids.len())].to_string(),
            second: ids[rng.gen_range(0..ids.len())].to_string(),
            kind: if rng.gen::<bool>() {
                ContactKind::Begin
            } else {
                ContactKind::End
            },
            time: rng.gen_range(0.0..60.0),
            normals: vec![Vector2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))],
        })
        .collect()
}

fn bench_consolidate(c: &mut Criterion) {
    let mut group = c.benchmark_group("contact");
    for &m in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("consolidate", m), &m, |b, &m| {
            b.iter_batched(
                || random_events(m, 43),
                |events| {
                    let _intervals = consolidate(&events, 0.2);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_consolidate);
criterion_main!(benches);

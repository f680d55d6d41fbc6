//! Benchmarks for trace generation.
//!
//! Run with: cargo bench -p sortviz-core

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sortviz_core::RandomArraySpec;
use sortviz_core::algorithms::{self, Algorithm};
use std::hint::black_box;

/// Deterministic random values in `1..100`.
fn make_values(n: usize) -> Vec<i32> {
    let spec = RandomArraySpec {
        len: n,
        values: 1..100,
    };
    spec.draw(&mut SmallRng::seed_from_u64(n as u64))
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace/generate");

    for n in [5, 15, 64, 256] {
        let values = make_values(n);
        for algorithm in Algorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), n),
                &values,
                |b, values| b.iter(|| black_box(algorithms::generate(algorithm, values))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);

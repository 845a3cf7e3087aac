use centravl::IntervalTree;
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::Lfsr;

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

/// Measure the time needed to insert `n_values` randomly generated
/// intervals into an empty tree.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    g.throughput(Throughput::Elements(n_values as _)); // Intervals inserted per second
    g.bench_function(BenchmarkId::new("n_values", n_values), |b| {
        b.iter_batched(
            || (IntervalTree::default(), Lfsr::default()),
            |(mut t, mut rand)| {
                for _i in 0..n_values {
                    t.add(rand.next_interval()).unwrap();
                }
                t
            },
            criterion::BatchSize::PerIteration,
        );
    });
}

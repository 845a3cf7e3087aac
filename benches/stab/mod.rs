use centravl::IntervalTree;
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::Lfsr;

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("stab");

    for n_values in [100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

/// Measure point-stab query time against a tree of `n_values` randomly
/// generated intervals.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let mut rand = Lfsr::default();
    let mut t = IntervalTree::default();
    for _i in 0..n_values {
        t.add(rand.next_interval()).unwrap();
    }

    // A fixed pool of query points, cycled through to keep the LFSR from
    // rolling over under long measurement runs.
    let mut rand = Lfsr::default();
    let points: Vec<i64> = (0..1024).map(|_i| i64::from(rand.next())).collect();

    g.throughput(Throughput::Elements(1));
    g.bench_function(BenchmarkId::new("n_values", n_values), |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % points.len();
            t.at(&points[i])
        });
    });
}

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rs2_query::*;

fn shuffled(size: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data: Vec<u64> = (0..size).collect();
    data.shuffle(&mut rng);
    data
}

fn bench_lazy_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("lazy_operations");

    for size in [1_000u64, 10_000, 100_000].iter() {
        let data: Vec<u64> = (0..*size).collect();

        group.bench_with_input(BenchmarkId::new("filter_select", size), &data, |b, data| {
            b.iter(|| {
                let result = stream(data)
                    .filter(|x| black_box(**x % 4 == 0))
                    .select(|x| black_box(x * 2))
                    .to_list();
                black_box(result)
            });
        });

        group.bench_with_input(BenchmarkId::new("select_many", size), &data, |b, data| {
            b.iter(|| {
                let result = stream(data)
                    .select_many(|x| [*x, x + 1])
                    .count();
                black_box(result)
            });
        });

        group.bench_with_input(BenchmarkId::new("skip_take_first", size), &data, |b, data| {
            b.iter(|| {
                let result = stream(data)
                    .skip(10)
                    .and_then(|s| s.take(5))
                    .and_then(|s| s.first());
                black_box(result)
            });
        });

        group.bench_with_input(BenchmarkId::new("distinct", size), &data, |b, data| {
            b.iter(|| {
                let result = stream(data).select(|x| x % 100).distinct().count();
                black_box(result)
            });
        });
    }

    group.finish();
}

fn bench_eager_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("eager_operations");

    for size in [1_000u64, 10_000, 100_000].iter() {
        let data = shuffled(*size);

        group.bench_with_input(BenchmarkId::new("order_by", size), &data, |b, data| {
            b.iter(|| {
                let result = stream(data).order_by(|x| **x).to_list();
                black_box(result)
            });
        });

        group.bench_with_input(BenchmarkId::new("order_by_then_by", size), &data, |b, data| {
            b.iter(|| {
                let result = stream(data)
                    .order_by(|x| **x % 10)
                    .then_by_descending(|x| **x)
                    .first();
                black_box(result)
            });
        });

        group.bench_with_input(BenchmarkId::new("group_by", size), &data, |b, data| {
            b.iter(|| {
                let result = stream(data)
                    .group_by(|x| **x % 64)
                    .select(|g| g.len())
                    .to_list();
                black_box(result)
            });
        });

        group.bench_with_input(BenchmarkId::new("reverse_materialized", size), &data, |b, data| {
            b.iter(|| {
                let result = from_iter(data.iter()).reverse().first();
                black_box(result)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lazy_operations, bench_eager_operations);
criterion_main!(benches);

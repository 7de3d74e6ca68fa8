use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use squid::{Record, SqlBuilder, spread_and, spread_insert, sql_fragment};

/// Build a record with `n` bound columns: col0 = 0, col1 = 1, ...
fn build_record(n: usize) -> Record {
    (0..n).map(|i| (format!("col{i}"), i as i64)).collect()
}

/// SELECT * FROM t WHERE ("col0" = $1 AND "col1" = $2 ...)
fn build_select(n: usize) -> SqlBuilder {
    let filter = spread_and(&build_record(n)).unwrap();
    sql_fragment!("SELECT * FROM t WHERE " { filter })
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/spread_and");

    for n in [1, 5, 10, 50, 100] {
        let builder = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &builder, |b, builder| {
            b.iter(|| black_box(builder.render(1)));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).render(1)));
        });
    }

    group.finish();
}

fn bench_spread_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/spread_insert");

    for rows in [1, 10, 100, 500] {
        let records: Vec<Record> = (0..rows).map(|_| build_record(5)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(rows), &records, |b, records| {
            b.iter(|| black_box(spread_insert(records).unwrap().render(1)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render,
    bench_build_and_render,
    bench_spread_insert
);
criterion_main!(benches);

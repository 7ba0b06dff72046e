use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use querykit::{Builder, Dialect, Expr, Select, Value};

/// SELECT col0, col1, ... FROM t WHERE col0=$1 AND col1=$2 ...
fn build_select(n: usize) -> Select {
    let fields: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let mut select = Builder::new(Dialect::Postgres).select(fields.join(", "), "t");
    for i in 0..n {
        select = select.filter(Expr::eq(format!("col{i}"), i as i64));
    }
    select
}

fn bench_to_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/to_sql");

    for n in [1, 5, 10, 50, 100] {
        let select = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &select, |b, select| {
            b.iter(|| black_box(select.to_sql()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let select = build_select(n);
                black_box(select.to_sql());
            });
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let expr = Expr::in_list("id", values.iter().copied());
                black_box(expr.generate(0, Dialect::Postgres));
            });
        });
    }

    group.finish();
}

fn bench_nested_subqueries(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/nested_subqueries");
    let b = Builder::new(Dialect::Postgres);

    for depth in [1, 4, 16] {
        let mut select = b.select("id", "t0").filter(Expr::eq("x", 0));
        for d in 1..depth {
            select = b
                .select("id", format!("t{d}"))
                .filter(Expr::in_subquery("id", select))
                .filter(Expr::eq("x", d as i64));
        }
        group.bench_with_input(BenchmarkId::from_parameter(depth), &select, |bench, select| {
            bench.iter(|| black_box(select.to_sql()));
        });
    }

    group.finish();
}

fn bench_bulk_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/bulk_insert");

    for rows in [10, 100, 1000] {
        let mut bulk = Builder::new(Dialect::Postgres).bulk_insert("t", ["a", "b", "c"]);
        for i in 0..rows {
            bulk.add_row([Value::Int(i), Value::from("name"), Value::Bool(true)])
                .unwrap();
        }
        group.bench_with_input(BenchmarkId::from_parameter(rows), &bulk, |b, bulk| {
            b.iter(|| black_box(bulk.to_sql()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_to_sql,
    bench_build_and_render,
    bench_in_list,
    bench_nested_subqueries,
    bench_bulk_insert
);
criterion_main!(benches);

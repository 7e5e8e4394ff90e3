// Criterion benchmarks for input shaping

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use house_price_form::core::{parse_csv, shape_manual, shape_table};
use house_price_form::models::{schema_columns, ManualEntryRequest};

/// CSV with the schema columns reversed and two unrelated columns mixed in
fn create_upload(rows: usize) -> String {
    let mut columns = schema_columns();
    columns.reverse();
    columns.insert(4, "listing id");
    columns.push("agent");

    let mut csv = columns.join(",");
    csv.push('\n');
    for i in 0..rows {
        let row: Vec<String> = (0..columns.len())
            .map(|c| ((i * 31 + c * 7) % 5000).to_string())
            .collect();
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

fn bench_shape_manual(c: &mut Criterion) {
    let entry = ManualEntryRequest::default();
    c.bench_function("shape_manual", |b| {
        b.iter(|| shape_manual(black_box(&entry)));
    });
}

fn bench_shape_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape_table");

    for row_count in [10, 100, 1000, 10000].iter() {
        let raw = parse_csv(create_upload(*row_count).as_bytes()).unwrap();

        group.bench_with_input(
            BenchmarkId::new("rows", row_count),
            row_count,
            |b, _| {
                b.iter(|| shape_table(black_box(&raw)));
            },
        );
    }

    group.finish();
}

fn bench_parse_and_shape(c: &mut Criterion) {
    let upload = create_upload(1000);

    c.bench_function("parse_and_shape_1000_rows", |b| {
        b.iter(|| {
            let raw = parse_csv(black_box(upload.as_bytes())).unwrap();
            black_box(shape_table(&raw))
        });
    });
}

criterion_group!(
    benches,
    bench_shape_manual,
    bench_shape_table,
    bench_parse_and_shape
);

criterion_main!(benches);

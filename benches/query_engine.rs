use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use tablequery::query::{filter, top_n_by_group, AggregateColumns, ColumnBindings, FilterCriteria};
use tablequery::types::{DataSet, DataType, Field, Schema, Sex, Value};

fn synthetic_events(n: usize) -> DataSet {
    let schema = Schema::new(vec![
        Field::lenient("patient_age", DataType::Float64),
        Field::new("patient_sex", DataType::Sex),
        Field::new("serious", DataType::Bool),
        Field::new("reaction_meddra", DataType::Utf8),
    ]);
    let reactions = ["Nausea", "Headache", "Dizziness", "Vomiting", "Fatigue"];
    let rows = (0..n)
        .map(|i| {
            vec![
                Value::Float64(18.0 + (i % 70) as f64),
                Value::Sex(if i % 2 == 0 { Sex::Male } else { Sex::Female }),
                Value::Bool(i % 3 == 0),
                Value::Utf8(reactions[i % reactions.len()].to_string()),
            ]
        })
        .collect();
    DataSet::new(schema, rows)
}

fn synthetic_names(n: usize) -> DataSet {
    let schema = Schema::new(vec![
        Field::new("name", DataType::Utf8),
        Field::new("sex", DataType::Sex),
        Field::new("year", DataType::Int64),
        Field::new("count", DataType::Int64),
    ]);
    let rows = (0..n)
        .map(|i| {
            vec![
                Value::Utf8(format!("Name{:04}", i % 500)),
                Value::Sex(if i % 2 == 0 { Sex::Male } else { Sex::Female }),
                Value::Int64(1900 + (i % 100) as i64),
                Value::Int64(((i * 37) % 1000) as i64),
            ]
        })
        .collect();
    DataSet::new(schema, rows)
}

fn bench_filter(c: &mut Criterion) {
    let ds = synthetic_events(10_000);
    let criteria = FilterCriteria::default()
        .with_age_range(30.0, 60.0)
        .with_keyword("nausea");
    let pred = criteria
        .compose(&ds.schema, &ColumnBindings::default())
        .unwrap();

    c.bench_function("filter_10k_age_keyword", |b| {
        b.iter(|| filter(black_box(&ds), black_box(&pred)))
    });
}

fn bench_top_n(c: &mut Criterion) {
    let ds = synthetic_names(10_000);
    let groups = [Value::Sex(Sex::Male), Value::Sex(Sex::Female)];

    c.bench_function("top_10_by_sex_10k", |b| {
        b.iter(|| top_n_by_group(black_box(&ds), &AggregateColumns::default(), &groups, 10))
    });
}

criterion_group!(benches, bench_filter, bench_top_n);
criterion_main!(benches);

//! Codec benchmarks
//!
//! The query codec sits on every read and write, so parse and stringify are
//! the engine's hot path.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench codec
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urlstate_codec::{parse_query, stringify_query};

fn flat_query(pairs: usize) -> String {
    (0..pairs)
        .map(|i| format!("key{}=value{}", i, i))
        .collect::<Vec<_>>()
        .join("&")
}

fn nested_query(width: usize) -> String {
    (0..width)
        .map(|i| format!("app[section{}][field]=v{}&app[list][]={}", i, i, i))
        .collect::<Vec<_>>()
        .join("&")
}

fn bench_parse(c: &mut Criterion) {
    let flat = flat_query(20);
    let nested = nested_query(10);

    c.bench_function("parse/flat_20", |b| {
        b.iter(|| parse_query(black_box(&flat)))
    });
    c.bench_function("parse/nested_10", |b| {
        b.iter(|| parse_query(black_box(&nested)))
    });
}

fn bench_stringify(c: &mut Criterion) {
    let flat = parse_query(&flat_query(20));
    let nested = parse_query(&nested_query(10));

    c.bench_function("stringify/flat_20", |b| {
        b.iter(|| stringify_query(black_box(&flat)))
    });
    c.bench_function("stringify/nested_10", |b| {
        b.iter(|| stringify_query(black_box(&nested)))
    });
}

fn bench_round_trip(c: &mut Criterion) {
    let nested = nested_query(10);
    c.bench_function("round_trip/nested_10", |b| {
        b.iter(|| stringify_query(&parse_query(black_box(&nested))))
    });
}

criterion_group!(benches, bench_parse, bench_stringify, bench_round_trip);
criterion_main!(benches);

//! Query Validation Benchmarks
//!
//! Measures validation cost across document shapes:
//!
//! - **Flat Queries**: single root property with paging
//! - **Nested Queries**: selections recursing through list properties
//! - **Wide Queries**: many aliased top-level keys
//! - **Rejections**: documents failing at various depths
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench nested_queries
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use query_validator::{Schema, Validator};
use serde_json::{Value, json};

const USER_ID: &str = "0123456789abcdef0123456789abcdef";

fn nested_friends(depth: usize) -> Value {
    let mut node = json!({"listArgs": {"limit": 5}, "select": {"birthDate": {}}});
    for _ in 0..depth {
        node = json!({"listArgs": {"limit": 5}, "select": {"friends": node, "birthDate": {}}});
    }
    json!({ "users": node })
}

fn bench_flat_queries(c: &mut Criterion) {
    let schema = Schema::example();
    let validator = Validator::new(&schema);
    let mut group = c.benchmark_group("flat_queries");

    let documents = vec![
        ("leaf_marker", json!({"users": {}})),
        ("limit", json!({"users": {"listArgs": {"limit": 10}}})),
        ("ids", json!({"users": {"listArgs": {"ids": [USER_ID, USER_ID]}}})),
        (
            "arguments",
            json!({"users": {"select": {"name": {
                "args": {"exampleArg1": [USER_ID]},
                "select": {"first": {}, "last": {}}
            }}}}),
        ),
        (
            "union",
            json!({"users": {"select": {"partner": {"accept": {
                "User": {"select": {"birthDate": {}}},
                "String": {}
            }}}}}),
        ),
    ];

    for (name, document) in documents {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(name), &document, |b, doc| {
            b.iter(|| validator.validate(black_box(doc)))
        });
    }

    group.finish();
}

fn bench_nested_queries(c: &mut Criterion) {
    let schema = Schema::example();
    let validator = Validator::new(&schema);
    let mut group = c.benchmark_group("nested_queries");

    for depth in [1, 8, 32, 128] {
        let document = nested_friends(depth);
        group.bench_with_input(BenchmarkId::new("depth", depth), &document, |b, doc| {
            b.iter(|| validator.validate(black_box(doc)))
        });
    }

    group.finish();
}

fn bench_wide_queries(c: &mut Criterion) {
    let schema = Schema::example();
    let validator = Validator::new(&schema);
    let mut group = c.benchmark_group("wide_queries");

    for width in [10, 100, 1000] {
        let mut document = serde_json::Map::new();
        for i in 0..width {
            document.insert(
                format!("users = @u{i}"),
                json!({"listArgs": {"ids": [USER_ID]}, "select": {"birthDate": {}}}),
            );
        }
        let document = Value::Object(document);
        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::new("aliases", width), &document, |b, doc| {
            b.iter(|| validator.validate(black_box(doc)))
        });
    }

    group.finish();
}

fn bench_rejections(c: &mut Criterion) {
    let schema = Schema::example();
    let validator = Validator::new(&schema);
    let mut group = c.benchmark_group("rejections");

    let mut deep = nested_friends(32);
    deep["users"]["select"]["nickname"] = json!({});

    let documents = vec![
        ("invalid_selector", json!({"wrongProp": {}})),
        ("illegal_combination", json!({"users": {"listArgs": {"ids": [USER_ID], "limit": 1}}})),
        ("deep_undefined_property", deep),
    ];

    for (name, document) in documents {
        group.bench_with_input(BenchmarkId::from_parameter(name), &document, |b, doc| {
            b.iter(|| validator.validate(black_box(doc)))
        });
    }

    group.finish();
}

fn bench_validate_str(c: &mut Criterion) {
    let schema = Schema::example();
    let validator = Validator::new(&schema);
    let source = nested_friends(8).to_string();

    c.bench_function("validate_str_depth_8", |b| {
        b.iter(|| validator.validate_str(black_box(&source)))
    });
}

criterion_group!(
    benches,
    bench_flat_queries,
    bench_nested_queries,
    bench_wide_queries,
    bench_rejections,
    bench_validate_str
);

criterion_main!(benches);

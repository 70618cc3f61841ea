//! Migration throughput benchmarks.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `preprocess` | Text repair on clean and `=`-separated exports |
//! | `migrate` | Full migration of documents with a growing number of designs |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench migration_bench
//! open target/criterion/report/index.html
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polemig_core::config::Config;
use polemig_core::preprocess::preprocess;
use polemig_core::{migrate_str, migrate_value};
use serde_json::{json, Value};

/// A version 9 document with `designs` designs of eight wires each.
fn document(designs: usize) -> Value {
    let wires: Vec<Value> = (0..8)
        .map(|i| match i % 4 {
            0 => json!({ "id": format!("W{i}"), "type": "PRIMARY", "connectionId": "A" }),
            1 => json!({ "id": format!("W{i}"), "type": "NEUTRAL", "connectionId": "A" }),
            2 => json!({ "id": format!("fiber-{i}"), "owner": "Comcast", "connectionId": format!("C{i}") }),
            _ => json!({ "id": format!("W{i}"), "type": "SECONDARY_OPEN", "owner": { "id": "Acme" } }),
        })
        .collect();

    let leads: Vec<Value> = (0..designs)
        .map(|d| {
            json!({
                "label": format!("Lead {d}"),
                "locations": [{
                    "designs": [{
                        "structure": {
                            "equipments": [{ "type": "STREET_LIGHT" }],
                            "wires": wires,
                        }
                    }]
                }]
            })
        })
        .collect();

    json!({
        "version": 9,
        "engineVersion": "9.3.1",
        "clientFile": "Utility.client",
        "leads": leads,
    })
}

// ---------------------------------------------------------------------------
// Preprocess
// ---------------------------------------------------------------------------

fn preprocess_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess");

    let clean = serde_json::to_string(&document(16)).unwrap_or_default();
    let malformed = format!("invalid JSON = {}", clean.replace("\":", "\"="));

    group.throughput(Throughput::Bytes(clean.len() as u64));
    group.bench_with_input(BenchmarkId::new("clean", clean.len()), &clean, |b, text| {
        b.iter(|| preprocess(black_box(text)))
    });
    group.bench_with_input(BenchmarkId::new("malformed", malformed.len()), &malformed, |b, text| {
        b.iter(|| preprocess(black_box(text)))
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Full migration
// ---------------------------------------------------------------------------

fn migrate_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("migrate");
    let defaults = Config::defaults().engine_defaults();

    for designs in [1usize, 16, 128] {
        let doc = document(designs);
        group.throughput(Throughput::Elements((designs * 8) as u64));
        group.bench_with_input(BenchmarkId::new("value", designs), &doc, |b, doc| {
            b.iter(|| migrate_value(black_box(doc), &defaults))
        });

        let text = serde_json::to_string(&doc).unwrap_or_default();
        group.bench_with_input(BenchmarkId::new("text", designs), &text, |b, text| {
            b.iter(|| migrate_str(black_box(text), &defaults))
        });
    }

    group.finish();
}

criterion_group!(benches, preprocess_bench, migrate_bench);
criterion_main!(benches);

//! Benchmarks for export decoding and encoding
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use reporter::report::{decode_document, encode_document, Day};
use reporter::source::{FilesystemSource, ReportSource};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::tempdir;

fn fixture(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read(path).unwrap()
}

/// A v2 day with `count` snapshots, roughly one report every 20 minutes
fn synthetic_day(count: usize) -> Vec<u8> {
    let snapshots: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "uniqueIdentifier": format!("SNAP-{:05}", i),
                "steps": i * 37,
                "battery": 1.0 - (i as f64 / count as f64),
                "audio": {"avg": -55.0 + (i % 10) as f64, "peak": -40.0},
                "date": format!("2015-10-23T{:02}:{:02}:00-0700", (i / 3) % 24, (i % 3) * 20),
                "location": {
                    "latitude": 37.77,
                    "longitude": -122.41,
                    "timestamp": "2015-10-23T08:00:00-0700",
                    "placemark": {"region": "<+37.77000000,-122.41000000> radius 70.85m"}
                },
                "responses": [{
                    "questionPrompt": "What are you doing?",
                    "tokens": [{"uniqueIdentifier": format!("TOK-{:05}", i), "text": "Working"}]
                }],
                "connection": i % 3,
                "reportImpetus": 2
            })
        })
        .collect();
    serde_json::to_vec(&json!({ "snapshots": snapshots })).unwrap()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for (name, bytes) in [
        ("fixture_v1", fixture("2014-01-15-reporter-export.json")),
        ("fixture_v2", fixture("2015-10-23-reporter-export.json")),
    ] {
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| decode_document(black_box(&bytes)).unwrap())
        });
    }

    for size in [10, 100, 1000] {
        let bytes = synthetic_day(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("snapshots_{}", size), |b| {
            b.iter(|| decode_document(black_box(&bytes)).unwrap())
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [10, 100, 1000] {
        let day: Day = decode_document(&synthetic_day(size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("snapshots_{}", size), |b| {
            b.iter(|| encode_document(black_box(&day)).unwrap())
        });
    }

    group.finish();
}

fn bench_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("source");

    group.bench_function("latest_of_365", |b| {
        let dir = tempdir().unwrap();
        let start = chrono::NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        for offset in 0..365 {
            let date = start + chrono::Duration::days(offset);
            let name = reporter::source::filename_for_date(date);
            std::fs::write(dir.path().join(name), r#"{"snapshots":[]}"#).unwrap();
        }
        let source = FilesystemSource::new(dir.path());

        b.iter(|| source.latest_report().unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode, bench_source);
criterion_main!(benches);

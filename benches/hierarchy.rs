use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ledger_transform::hierarchy::{attach_parents, KeyNormalize};
use ledger_transform::types::{Record, RecordSet, Value};

/// Synthetic chart of accounts: a three-level tree of dotted-free codes.
fn synthetic_records(groups: usize) -> RecordSet {
    let mut records = Vec::new();
    for g in 1..=groups {
        let top = format!("{g}");
        records.push(record(&top));
        for s in 1..=5 {
            let sub = format!("{g}{s}");
            records.push(record(&sub));
            for a in 1..=8 {
                records.push(record(&format!("{sub}0{a}")));
            }
        }
    }
    RecordSet::new(records)
}

fn record(key: &str) -> Record {
    let mut r = Record::new();
    r.insert("classifier", Value::Text(key.to_owned()));
    r.insert("finalBalance", Value::Number(0.0));
    r
}

fn bench_attach_parents(c: &mut Criterion) {
    // ~450 records, the scale of a real ledger export.
    let records = synthetic_records(10);

    c.bench_function("attach_parents full rescan", |b| {
        b.iter(|| {
            attach_parents(
                black_box(&records),
                "classifier",
                KeyNormalize::Identity,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_attach_parents);
criterion_main!(benches);

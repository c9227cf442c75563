//! Pipeline benchmark: raw log text → scan blocks → aligned feature vectors.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rssi_prep::align::{epoch_seconds, Aligner};
use rssi_prep::config::AlignConfig;
use rssi_prep::scan::parse_fingerprint_file;
use rssi_prep::schema::SchemaBuilder;
use rssi_prep::truth::{GroundTruthIndex, TruthRecord};

fn make_timestamp(i: usize) -> String {
    format!("2024-03-11 10:{:02}:{:02}.000000", (i / 60) % 60, i % 60)
}

/// Synthetic fingerprint log: `blocks` scans, each hearing `macs`
/// transmitters.
fn make_log(blocks: usize, macs: usize) -> String {
    let mut text = String::new();
    for i in 0..blocks {
        text.push_str(&format!("Timestamp: {}\n", make_timestamp(i)));
        for m in 0..macs {
            text.push_str(&format!(
                "MAC: AA:AA:AA:AA:{:02X}:{:02X}, RSSI: -{}dBm\n",
                m / 256,
                m % 256,
                40 + (i + m) % 50
            ));
        }
    }
    text
}

fn bench_parse_fingerprint(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench_1_deal.txt");
    std::fs::write(&path, make_log(100, 20)).unwrap();

    c.bench_function("parse_fingerprint_100_blocks", |b| {
        b.iter(|| black_box(parse_fingerprint_file(black_box(&path), 5).unwrap()))
    });
}

fn bench_align_full_pass(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench_1_deal.txt");
    std::fs::write(&path, make_log(100, 20)).unwrap();

    let parsed = parse_fingerprint_file(&path, 5).unwrap();
    let mut builder = SchemaBuilder::new();
    builder.add_file_counts(parsed.selected_counts);
    let schema = builder.build();

    let mut truth = GroundTruthIndex::new();
    for obs in &parsed.observations {
        truth.insert(TruthRecord {
            timestamp: epoch_seconds(&obs.timestamp).unwrap(),
            x: 1.0,
            y: 2.0,
        });
    }

    let aligner = Aligner::new(&schema, &truth, &AlignConfig::default());
    c.bench_function("align_100_observations", |b| {
        b.iter(|| {
            for obs in &parsed.observations {
                black_box(aligner.align(black_box(obs)).unwrap());
            }
        })
    });
}

fn bench_nearest_lookup(c: &mut Criterion) {
    let mut truth = GroundTruthIndex::new();
    for i in 0..1000 {
        truth.insert(TruthRecord {
            timestamp: 1_700_000_000.0 + i as f64 * 0.1,
            x: i as f64,
            y: -(i as f64),
        });
    }
    c.bench_function("nearest_lookup_1000_entries", |b| {
        b.iter(|| black_box(truth.nearest(black_box(1_700_000_050.03), 0.5)))
    });
}

criterion_group!(
    benches,
    bench_parse_fingerprint,
    bench_align_full_pass,
    bench_nearest_lookup
);
criterion_main!(benches);

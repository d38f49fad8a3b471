//! Benchmarks for the Codec 8 encoding path
//!
//! Covers the per-send work the session does:
//! - CRC-16/ARC over typical payload sizes
//! - Encoding one report into a 30-byte record
//! - Framing single and maximum-size packets

use avl_tracker::codec::{build_packet, checksum16, encode_record};
use avl_tracker::types::{PositionReport, Priority};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::{Duration, UNIX_EPOCH};

fn sample_report() -> PositionReport {
    PositionReport {
        timestamp: UNIX_EPOCH + Duration::from_millis(1_700_000_000_000),
        latitude: 40.7128,
        longitude: -74.0060,
        altitude: 100,
        speed: 42,
        heading: 270,
        satellite_count: 12,
        priority: Priority::Low,
    }
}

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksum16");

    for size in [33usize, 1024, 7653] {
        let data: Vec<u8> = (0..size).map(|i| i as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| black_box(checksum16(black_box(data))))
        });
    }

    group.finish();
}

fn bench_encode_record(c: &mut Criterion) {
    let report = sample_report();

    c.bench_function("encode_record", |b| b.iter(|| black_box(encode_record(black_box(&report)))));
}

fn bench_build_packet(c: &mut Criterion) {
    let record = encode_record(&sample_report());
    let mut group = c.benchmark_group("build_packet");

    for count in [1usize, 255] {
        let records = vec![record; count];
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
            b.iter(|| black_box(build_packet(black_box(records))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_checksum, bench_encode_record, bench_build_packet);
criterion_main!(benches);

//! Benchmarks for Vicinity pipeline throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vicinity::{AnalysisPipeline, RawRecord};

fn generate_records(devices: usize, per_device: usize) -> Vec<RawRecord> {
    let mut records = Vec::with_capacity(devices * per_device);
    for d in 0..devices {
        let device_id = format!("AA:BB:CC:DD:EE:{:02X}", d);
        for i in 0..per_device {
            let rssi = -50.0 - ((i * 7 + d * 3) % 40) as f64;
            records.push(
                RawRecord::new(
                    &format!("2025-03-01T10:{:02}:{:02}Z", i / 60, i % 60),
                    &device_id,
                    &format!("{}", rssi),
                )
                .with_channel("6"),
            );
        }
    }
    records
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let records = generate_records(10, 100);
    let pipeline = AnalysisPipeline::with_defaults();

    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("run_10_devices_1000_records", |b| {
        b.iter(|| {
            let report = pipeline.run(&records);
            black_box(report);
        })
    });

    group.finish();
}

fn bench_smoothing_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");

    // Single busy device: the window prune path dominates.
    let records = generate_records(1, 2000);
    let pipeline = AnalysisPipeline::with_defaults();

    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("single_device_2000_records", |b| {
        b.iter(|| {
            let report = pipeline.run(&records);
            black_box(report);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_smoothing_window);
criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hibc::{Decoder, checksum, decode};
use std::hint::black_box;

const LABELS: &[(&str, &str)] = &[
    ("primary", "+Z999009993020351F"),
    ("secondary_lot", "+$$30509283C001F5"),
    ("secondary_serial", "+$$+20928053C001F2"),
    ("secondary_julian", "+052713C001F1"),
    ("concatenated", "+Z999009993020351/$$4050928223C0019"),
];

fn bench_decode(c: &mut Criterion) {
    let decoder = Decoder::default();
    let mut group = c.benchmark_group("decode");

    for (name, label) in LABELS {
        group.throughput(Throughput::Bytes(label.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), label, |b, label| {
            b.iter(|| decoder.decode(black_box(label)));
        });
    }
    group.finish();
}

fn bench_decode_batch(c: &mut Criterion) {
    let batch: Vec<String> = (0..1000)
        .map(|i| LABELS[i % LABELS.len()].1.to_string())
        .collect();
    let mut group = c.benchmark_group("decode_batch");
    group.throughput(Throughput::Elements(batch.len() as u64));

    group.bench_function("1000_labels", |b| {
        b.iter(|| {
            batch
                .iter()
                .filter(|label| decode(black_box(label)).is_ok())
                .count()
        });
    });
    group.finish();
}

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksum");

    for size in [16, 64, 256].iter() {
        let data: String = "+Z999009993020351/$$4050928223C001"
            .chars()
            .cycle()
            .take(*size)
            .collect();
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| checksum(black_box(data)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_decode_batch, bench_checksum);
criterion_main!(benches);

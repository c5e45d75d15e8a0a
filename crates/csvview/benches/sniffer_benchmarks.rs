//! Encoding sniffer and decoder benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use csvview::encoding::{classify, decode_bytes, EncodingLabel, SNIFF_PREFIX_LEN};

fn ascii_bytes(len: usize) -> Vec<u8> {
    b"Invoice,Status,Amount\n".iter().copied().cycle().take(len).collect()
}

fn accented_bytes(len: usize) -> Vec<u8> {
    "Cliente,Método,Preço\nJoão,Cartão,€5\n"
        .as_bytes()
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let inputs = [
        ("ascii", ascii_bytes(SNIFF_PREFIX_LEN)),
        ("utf8_accented", accented_bytes(SNIFF_PREFIX_LEN)),
        (
            "windows_1252",
            ascii_bytes(SNIFF_PREFIX_LEN)
                .into_iter()
                .map(|b| if b == b'a' { 0xE9 } else { b })
                .collect::<Vec<u8>>(),
        ),
    ];

    for (name, bytes) in inputs.iter() {
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("prefix", name), bytes, |b, bytes| {
            b.iter(|| black_box(classify(bytes)))
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [64 * 1024, 1024 * 1024].iter() {
        let bytes = accented_bytes(*size);
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("utf8", size), &bytes, |b, bytes| {
            b.iter(|| black_box(decode_bytes(bytes, EncodingLabel::Utf8, "bench.csv")))
        });
        group.bench_with_input(BenchmarkId::new("windows_1252", size), &bytes, |b, bytes| {
            b.iter(|| black_box(decode_bytes(bytes, EncodingLabel::LatinFallback, "bench.csv")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_decode);
criterion_main!(benches);

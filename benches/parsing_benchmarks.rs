use criterion::{black_box, criterion_group, criterion_main, Criterion};
use proc_mem_check::parsing::{format_bytes, human_to_bytes, SizeFormat, SymbolVocabulary};

fn human_to_bytes_benchmark(c: &mut Criterion) {
    let test_values = vec![
        "1 K",
        "1 M",
        "1 Gi",
        "1 tera",
        "500k",
        "10M",
        "1.5G",
        "0.5kilo",
        "2.5 mebi",
        "20Y",
    ];

    c.bench_function("human_to_bytes", |b| {
        b.iter(|| {
            for value in &test_values {
                let _ = black_box(human_to_bytes(black_box(value)));
            }
        })
    });
}

fn format_bytes_benchmark(c: &mut Criterion) {
    let test_values: Vec<u128> = vec![
        0,
        1023,
        1024,
        50_000_000,
        200_000_000_000,
        1 << 40,
        1099511627776127398123789121,
    ];
    let format = SizeFormat::default();

    c.bench_function("format_bytes", |b| {
        b.iter(|| {
            for value in &test_values {
                black_box(format_bytes(black_box(*value), SymbolVocabulary::Customary, &format));
            }
        })
    });
}

criterion_group!(benches, human_to_bytes_benchmark, format_bytes_benchmark);
criterion_main!(benches);

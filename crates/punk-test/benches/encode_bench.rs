//! Benchmarks for PunkScript encoding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use punk_codec::{encode_run, QuoteStrategist};
use punk_core::{encode_bijective_u64, Alphabet, EncoderConfig, QuotePolicy, QuoteStyle};
use punk_encoder::{generate_document, tokenize};
use punk_test::random_text;

fn bench_bijective(c: &mut Criterion) {
    let alphabet = Alphabet::keys();

    c.bench_function("bijective_encode", |b| {
        b.iter(|| encode_bijective_u64(black_box(0xDEAD_BEEF), &alphabet))
    });
}

fn bench_run_codec(c: &mut Criterion) {
    let text = random_text(&mut StdRng::seed_from_u64(1), 500);

    let mut group = c.benchmark_group("run_codec");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("encode", |b| b.iter(|| encode_run(black_box(&text))));
    group.finish();
}

fn bench_quote(c: &mut Criterion) {
    let mut quotes = QuoteStrategist::new(QuotePolicy::Smart(QuoteStyle::ALL.to_vec()), Some(0));
    let text = "it's a \"quoted\" `template` ${string}";

    c.bench_function("quote_smart", |b| b.iter(|| quotes.quote(black_box(text))));
}

fn bench_tokenize(c: &mut Criterion) {
    let text = random_text(&mut StdRng::seed_from_u64(2), 2_000);

    c.bench_function("tokenize", |b| b.iter(|| tokenize(black_box(&text))));
}

fn bench_generate(c: &mut Criterion) {
    let config = EncoderConfig::default();
    let mut group = c.benchmark_group("generate_document");

    for pieces in [10usize, 100, 1_000] {
        let text = random_text(&mut StdRng::seed_from_u64(pieces as u64), pieces);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pieces), &text, |b, text| {
            b.iter(|| generate_document(black_box(text), &config).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_bijective,
    bench_run_codec,
    bench_quote,
    bench_tokenize,
    bench_generate
);
criterion_main!(benches);

//! Codec microbenchmarks.
//!
//! Run:
//!   cargo bench -p lexkey --bench codec

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lexkey::{Lex, Value, build_key, decode, encode, size};

mod common;

#[derive(Lex)]
struct MovieKey {
    pub year: i16,
    pub rating: f32,
    pub title: String,
}

fn bench_scalars(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar");
    let mut buf = [0u8; 8];

    group.bench_function("encode_i64", |b| {
        b.iter(|| encode(&mut buf, black_box(&-42i64)))
    });
    group.bench_function("encode_f64", |b| {
        b.iter(|| encode(&mut buf, black_box(&9.2f64)))
    });

    let mut encoded = [0u8; 8];
    encode(&mut encoded, &-42i64).expect("encode failed");
    group.bench_function("decode_i64", |b| {
        let mut dest = 0i64;
        b.iter(|| decode(black_box(&encoded), &mut dest))
    });
    group.finish();
}

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("string");
    for len in [8usize, 64, 512] {
        let value = "x".repeat(len);
        let mut buf = vec![0u8; len + 1];
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("size", len), &value, |b, v| {
            b.iter(|| size(black_box(v.as_str())))
        });
        group.bench_with_input(BenchmarkId::new("encode", len), &value, |b, v| {
            b.iter(|| encode(&mut buf, black_box(v.as_str())))
        });

        let encoded = buf.clone();
        group.bench_with_input(BenchmarkId::new("scan", len), &encoded, |b, e| {
            let mut dest = String::with_capacity(len);
            b.iter(|| dest.lex_decode(black_box(e)))
        });
        group.bench_with_input(BenchmarkId::new("whole", len), &encoded, |b, e| {
            let mut dest = String::with_capacity(len);
            b.iter(|| decode(black_box(e), &mut dest))
        });
    }
    group.finish();
}

fn bench_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("key");
    let year = 1994i16;
    let rating = 9.2f32;
    let title = "The Shawshank Redemption";

    let values: [&dyn Lex; 3] = [&year, &rating, &title];
    group.bench_function("build_key", |b| b.iter(|| build_key(black_box(&values))));

    let record = MovieKey {
        year,
        rating,
        title: title.to_string(),
    };
    let values: [&dyn Lex; 1] = [&record];
    group.bench_function("derived_record", |b| b.iter(|| build_key(black_box(&values))));

    let value = Value::record([Value::I16(year), Value::F32(rating), Value::from(title)]);
    let values: [&dyn Lex; 1] = [&value];
    group.bench_function("dynamic_record", |b| b.iter(|| build_key(black_box(&values))));
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = bench_scalars, bench_strings, bench_keys
}
criterion_main!(benches);

#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use nbon::prelude::*;

const N_BIG_ARR: usize = 2000;

fn big_arr() -> Value {
    let v: Vec<Value> = (0..N_BIG_ARR).map(|i| Value::from(i as i64 * 37 - 5000)).collect();
    Value::from(v)
}

const N_ARR: usize = 10;
const N_MAP: usize = 10;

fn big_v() -> Value {
    let v0: Vec<Value> = (0..N_ARR).map(|i| Value::from(i as i64)).collect();
    let m: Vec<(String, Value)> = (0..N_MAP)
        .map(|i| (format!("key{}", i), Value::from(v0.clone())))
        .collect();
    let v: Vec<Value> = std::iter::repeat(m).map(Value::from).take(N_ARR).collect();
    Value::from(v)
}

fn enc_len(v: &Value) -> usize { encode_full(v).map(|bs| bs.len()).unwrap_or(0) }

fn bench_enc(c: &mut Criterion) {
    let big_v = big_v();
    let enc_len = enc_len(&big_v);
    c.bench_function(
        &format!("Encoding an NBON value, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&big_v)).unwrap()),
    );
}

fn bench_enc_single_alloc(c: &mut Criterion) {
    let big_v = big_v();
    let enc_len = enc_len(&big_v);
    c.bench_function(
        &format!(
            "Encoding an NBON value, output size of {} bytes, buffer preallocated",
            enc_len
        ),
        move |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(enc_len * 2);
                encode(black_box(&big_v), &mut out).unwrap();
                out
            })
        },
    );
}

fn bench_write_cursor(c: &mut Criterion) {
    c.bench_function(
        &format!("Streaming {} integers through a writer", N_BIG_ARR),
        |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(N_BIG_ARR * 4);
                Writer::new(&mut out)
                    .write_array(|w| {
                        for i in 0..N_BIG_ARR {
                            w.write_int(black_box(i as i64 * 37 - 5000))?;
                        }
                        Ok(())
                    })
                    .unwrap();
                out
            })
        },
    );
}

fn bench_dec(c: &mut Criterion) {
    let enc = encode_full(&big_v()).unwrap();
    c.bench_function(
        &format!("Decoding an NBON value, input size of {} bytes", enc.len()),
        move |b| b.iter(|| decode_full(black_box(&enc)).unwrap()),
    );
}

fn bench_skip(c: &mut Criterion) {
    let enc = encode_full(&big_v()).unwrap();
    c.bench_function(
        &format!("Skipping an NBON value, input size of {} bytes", enc.len()),
        move |b| {
            b.iter(|| {
                let buf = &mut (&enc[..]).into_buf();
                Reader::new(black_box(buf)).skip().unwrap()
            })
        },
    );
}

fn bench_enc_flat(c: &mut Criterion) {
    let big_arr = big_arr();
    let enc_len = enc_len(&big_arr);
    c.bench_function(
        &format!("Encoding an NBON array, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&big_arr)).unwrap()),
    );
}

fn bench_dec_flat(c: &mut Criterion) {
    let enc = encode_full(&big_arr()).unwrap();
    c.bench_function(
        &format!("Decoding an NBON array, input size of {} bytes", enc.len()),
        move |b| b.iter(|| decode_full(black_box(&enc)).unwrap()),
    );
}

criterion_group!(
    benches,
    bench_enc,
    bench_enc_single_alloc,
    bench_write_cursor,
    bench_dec,
    bench_skip,
    bench_enc_flat,
    bench_dec_flat
);
criterion_main!(benches);

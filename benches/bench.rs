#![allow(missing_docs)]

use braille_trie::{BitKey, BitTrie};
use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::WallTime,
};
use std::{hint::black_box, time::Duration};

/// Benchmarks inserting every key of a trie.
pub fn set_benchmark(c: &mut Criterion) {
    let key_lens = [6usize, 8, 12, 16];

    let mut g = group(c, "set");
    for key_len in key_lens {
        let keys = keys(key_len);
        g.throughput(criterion::Throughput::Elements(keys.len() as u64));
        let id = criterion::BenchmarkId::new("key_len", key_len);
        g.bench_function(id, |b| {
            b.iter(|| {
                let mut trie = BitTrie::new(key_len);
                for key in &keys {
                    trie.set(key, "value").unwrap();
                }
                black_box(trie)
            })
        });
    }
}

/// Benchmarks looking up every key of a full trie.
pub fn get_benchmark(c: &mut Criterion) {
    let key_lens = [6usize, 8, 12, 16];

    let mut g = group(c, "get");
    for key_len in key_lens {
        let keys = keys(key_len);
        let trie = full_trie(key_len, &keys);
        g.throughput(criterion::Throughput::Elements(keys.len() as u64));
        let id = criterion::BenchmarkId::new("key_len", key_len);
        g.bench_function(id, |b| {
            b.iter(|| {
                for key in &keys {
                    black_box(trie.get(black_box(key)).unwrap());
                }
            })
        });
    }
}

/// Benchmarks the text round trip of a full trie.
pub fn codec_benchmark(c: &mut Criterion) {
    let key_lens = [6usize, 8, 12];

    let mut g = group(c, "codec");
    for key_len in key_lens {
        let keys = keys(key_len);
        let trie = full_trie(key_len, &keys);
        let text = trie.dump_to_string();
        g.throughput(criterion::Throughput::Bytes(text.len() as u64));

        g.bench_function(criterion::BenchmarkId::new("dump", key_len), |b| {
            b.iter(|| black_box(trie.dump_to_string()))
        });
        g.bench_function(criterion::BenchmarkId::new("load", key_len), |b| {
            b.iter(|| black_box(BitTrie::from_reader(key_len, text.as_bytes()).unwrap()))
        });
    }
}

fn group<'c>(c: &'c mut Criterion, name: &str) -> BenchmarkGroup<'c, WallTime> {
    let mut g = c.benchmark_group(name);
    g.warm_up_time(Duration::from_secs(1));
    g.noise_threshold(0.02);
    g
}

/// Every key of `key_len` bits, in ascending order.
fn keys(key_len: usize) -> Vec<String> {
    (0..1u32 << key_len).map(|code| BitKey::from_code(code, key_len).to_string()).collect()
}

fn full_trie(key_len: usize, keys: &[String]) -> BitTrie {
    let mut trie = BitTrie::new(key_len);
    for (i, key) in keys.iter().enumerate() {
        trie.set(key, i.to_string()).unwrap();
    }
    trie
}

criterion_group!(benches, set_benchmark, get_benchmark, codec_benchmark);
criterion_main!(benches);

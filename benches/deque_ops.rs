use std::collections::VecDeque;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use holodeque::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALPHABET_SIZES: &[u32] = &[4, 16, 64];
const SEQUENCE_LEN: usize = 64;

fn random_items(seed: u64, symbols: u32, len: usize) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(0..symbols)).collect()
}

// ============================================================================
// Push right then drain left: holodeque backends vs VecDeque
// ============================================================================

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_right + pop_left");
    group.throughput(Throughput::Elements(SEQUENCE_LEN as u64));

    for &k in ALPHABET_SIZES {
        let items = random_items(42, k, SEQUENCE_LEN);

        group.bench_with_input(BenchmarkId::new("nested", k), &items, |b, items| {
            b.iter(|| {
                let mut d = Holodeque::<u32>::new(0..k).unwrap();
                for &x in items {
                    d.push_right(x).unwrap();
                }
                while let Ok(x) = d.pop_left() {
                    black_box(x);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("array", k), &items, |b, items| {
            b.iter(|| {
                let mut d = Holodeque::<u32, ArrayMatrix>::new(0..k).unwrap();
                for &x in items {
                    d.push_right(x).unwrap();
                }
                while let Ok(x) = d.pop_left() {
                    black_box(x);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("vecdeque", k), &items, |b, items| {
            b.iter(|| {
                let mut d = VecDeque::new();
                for &x in items {
                    d.push_back(x);
                }
                while let Some(x) = d.pop_front() {
                    black_box(x);
                }
            })
        });
    }
    group.finish();
}

// ============================================================================
// Bounded push with eviction
// ============================================================================

fn bench_bounded(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded push_left");
    let items = random_items(7, 8, 4 * SEQUENCE_LEN);

    group.bench_function("holodeque", |b| {
        b.iter(|| {
            let mut d = Holodeque::<u32>::with_maxlen(0..8, Some(16)).unwrap();
            for &x in &items {
                d.push_left(black_box(x)).unwrap();
            }
            black_box(d.len())
        })
    });

    group.bench_function("vecdeque", |b| {
        b.iter(|| {
            let mut d = VecDeque::with_capacity(16);
            for &x in &items {
                if d.len() == 16 {
                    d.pop_back();
                }
                d.push_front(black_box(x));
            }
            black_box(d.len())
        })
    });
    group.finish();
}

// ============================================================================
// Concatenation: one matrix product vs element-wise append
// ============================================================================

fn bench_concat(c: &mut Criterion) {
    let mut group = c.benchmark_group("concat");
    let left = random_items(1, 8, SEQUENCE_LEN);
    let right = random_items(2, 8, SEQUENCE_LEN);
    let a = Holodeque::<u32>::from_items(0..8, left.clone(), None).unwrap();
    let b_deque = Holodeque::<u32>::from_items(0..8, right.clone(), None).unwrap();

    group.bench_function("holodeque", |b| {
        b.iter(|| black_box(a.concat(black_box(&b_deque)).unwrap()))
    });

    let va: VecDeque<u32> = left.into_iter().collect();
    let vb: VecDeque<u32> = right.into_iter().collect();
    group.bench_function("vecdeque", |b| {
        b.iter(|| {
            let mut out = va.clone();
            out.extend(black_box(&vb).iter().copied());
            black_box(out)
        })
    });
    group.finish();
}

fn bench_binary(c: &mut Criterion) {
    let bits: Vec<bool> = random_items(3, 2, SEQUENCE_LEN)
        .into_iter()
        .map(|x| x == 1)
        .collect();
    c.bench_function("binary push_right + pop_right", |b| {
        b.iter(|| {
            let mut d = BinaryDeque::<i128>::new();
            for &bit in &bits[..32] {
                d.push_right(bit).unwrap();
            }
            while let Ok(bit) = d.pop_right() {
                black_box(bit);
            }
        })
    });
}

criterion_group!(benches, bench_push_pop, bench_bounded, bench_concat, bench_binary);
criterion_main!(benches);

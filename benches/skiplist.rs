//! Benchmarks for the ordered skip list.
//!
//! Run with: cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use ordered_skiplist::OrderedSkipList;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const N: u64 = 1_000;

fn make_rng() -> SmallRng {
    SmallRng::seed_from_u64(12345)
}

/// Deterministic pseudo-random key sequence without allocation.
#[inline]
fn next_key(num: &mut u64) -> u64 {
    *num = num.wrapping_mul(17).wrapping_add(255);
    *num
}

fn filled_list() -> OrderedSkipList<u64, u64, SmallRng> {
    let mut list = OrderedSkipList::new(make_rng());
    let mut num = 0u64;
    for _ in 0..N {
        let k = next_key(&mut num);
        list.insert(k, !k);
    }
    list
}

// ============================================================================
// Insert
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(N));

    group.bench_function("sequence", |b| {
        b.iter(|| {
            let mut list = OrderedSkipList::new(make_rng());
            let mut num = 0u64;
            for _ in 0..N {
                let k = next_key(&mut num);
                list.insert(k, !k);
            }
            black_box(list.len())
        })
    });

    group.finish();
}

// ============================================================================
// Lookup
// ============================================================================

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.throughput(Throughput::Elements(N));

    let list = filled_list();
    group.bench_function("get", |b| {
        b.iter(|| {
            let mut num = 0u64;
            for _ in 0..N {
                let k = next_key(&mut num);
                black_box(list.get(&k));
            }
        })
    });

    group.finish();
}

// ============================================================================
// Iteration
// ============================================================================

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");
    group.throughput(Throughput::Elements(N));

    let list = filled_list();
    group.bench_function("ordered", |b| {
        b.iter(|| {
            for pair in list.iter() {
                black_box(pair);
            }
        })
    });

    group.finish();
}

// ============================================================================
// Churn
// ============================================================================

fn bench_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    group.throughput(Throughput::Elements(N * 2));

    group.bench_function("insert_remove", |b| {
        b.iter(|| {
            let mut list = OrderedSkipList::new(make_rng());
            let mut num = 0u64;
            for _ in 0..N {
                let k = next_key(&mut num);
                list.insert(k, !k);
            }
            let mut num = 0u64;
            for _ in 0..N {
                let k = next_key(&mut num);
                black_box(list.remove(&k));
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_lookup,
    bench_iter,
    bench_insert_remove
);
criterion_main!(benches);

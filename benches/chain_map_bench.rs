//! Benchmark for ChainMap vs standard BTreeMap.
//!
//! Compares the O(n) sorted chain against the standard library's balanced
//! tree for common operations. Sizes stay small: the chain is a linear
//! structure by design and is only meant for small maps.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use chainmap::sorted::ChainMap;
use std::collections::BTreeMap;

// =============================================================================
// put Benchmark
// =============================================================================

fn benchmark_put(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("put");

    for size in [16, 64, 256] {
        // ChainMap put
        group.bench_with_input(BenchmarkId::new("ChainMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map: ChainMap<i32, i32> = ChainMap::new();
                for index in 0..size {
                    map.put(black_box(&index), black_box(&(index * 2)))
                        .expect("put failed");
                }
                black_box(map)
            });
        });

        // Standard BTreeMap insert
        group.bench_with_input(
            BenchmarkId::new("BTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = BTreeMap::new();
                    for index in 0..size {
                        map.insert(black_box(index), black_box(index * 2));
                    }
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [16, 64, 256] {
        let mut chain_map: ChainMap<i32, i32> = ChainMap::new();
        let mut btree_map = BTreeMap::new();
        for index in 0..size {
            chain_map
                .put(&index, &(index * 2))
                .expect("put failed");
            btree_map.insert(index, index * 2);
        }

        group.bench_with_input(
            BenchmarkId::new("ChainMap", size),
            &chain_map,
            |bencher, map| {
                bencher.iter(|| {
                    for index in 0..size {
                        black_box(map.get(black_box(&index)));
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("BTreeMap", size),
            &btree_map,
            |bencher, map| {
                bencher.iter(|| {
                    for index in 0..size {
                        black_box(map.get(black_box(&index)));
                    }
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// iterate Benchmark
// =============================================================================

fn benchmark_iterate(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iterate");

    for size in [16, 64, 256] {
        let mut chain_map: ChainMap<i32, i32> = ChainMap::new();
        let mut btree_map = BTreeMap::new();
        for index in 0..size {
            chain_map.put(&index, &index).expect("put failed");
            btree_map.insert(index, index);
        }

        group.bench_with_input(
            BenchmarkId::new("ChainMap", size),
            &chain_map,
            |bencher, map| {
                bencher.iter(|| {
                    let sum: i32 = map.values().sum();
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("BTreeMap", size),
            &btree_map,
            |bencher, map| {
                bencher.iter(|| {
                    let sum: i32 = map.values().sum();
                    black_box(sum)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_put, benchmark_get, benchmark_iterate);
criterion_main!(benches);

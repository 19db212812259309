// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use allocvec::{Arena, ArenaConfig, MallocAllocator, Vector};

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench vector
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if is_fast_mode() {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

// =============================================================================
// push: Vec vs Vector (malloc) vs Vector (arena)
// =============================================================================

fn bench_push_individual(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_individual");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.push(i as u32);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("Vector<malloc>", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vector::new(MallocAllocator).expect("Failed to create Vector");
                for i in 0..s {
                    vec.push(i as u32).expect("Failed to push(..)");
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("Vector<arena>", size), &size, |b, &s| {
            b.iter_batched(
                || Arena::new(ArenaConfig::default()).expect("Failed to create Arena"),
                |arena| {
                    {
                        let mut vec =
                            Vector::new(arena.allocator()).expect("Failed to create Vector");
                        for i in 0..s {
                            vec.push(i as u32).expect("Failed to push(..)");
                        }
                        black_box(vec.len());
                    }
                    arena
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_push_reserved(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_reserved");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            let mut vec = Vec::<u32>::with_capacity(s);
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i as u32);
                }
                black_box(&vec);
            });
        });

        group.bench_with_input(BenchmarkId::new("Vector<malloc>", size), &size, |b, &s| {
            let mut vec = Vector::<u32>::with_malloc().expect("Failed to create Vector");
            vec.reserve(s).expect("Failed to reserve(..)");
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i as u32).expect("Failed to push(..)");
                }
                black_box(&vec);
            });
        });
    }

    group.finish();
}

fn bench_extend_from_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("extend_from_slice");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        let source: Vec<u32> = (0..size).map(|i| i as u32).collect();

        group.bench_with_input(BenchmarkId::new("Vec", size), &source, |b, src| {
            b.iter(|| {
                let mut vec = Vec::new();
                vec.extend_from_slice(src);
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("Vector<malloc>", size), &source, |b, src| {
            b.iter(|| {
                let vec =
                    Vector::from_slice(MallocAllocator, src).expect("Failed to from_slice(..)");
                black_box(vec)
            });
        });
    }

    group.finish();
}

// =============================================================================
// shifting: insert/erase at the front
// =============================================================================

fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_front");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.insert(0, i as u32);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("Vector<malloc>", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vector::<u32>::with_malloc().expect("Failed to create Vector");
                for i in 0..s {
                    vec.insert(0, i as u32).expect("Failed to insert(..)");
                }
                black_box(vec)
            });
        });
    }

    group.finish();
}

fn bench_erase_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_front");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s).map(|i| i as u32).collect::<Vec<_>>(),
                |mut vec| {
                    while !vec.is_empty() {
                        vec.remove(0);
                    }
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("Vector<malloc>", size), &size, |b, &s| {
            b.iter_batched(
                || {
                    let source: Vec<u32> = (0..s).map(|i| i as u32).collect();
                    Vector::from_slice(MallocAllocator, &source).expect("Failed to from_slice(..)")
                },
                |mut vec| {
                    while !vec.is_empty() {
                        vec.erase(0).expect("Failed to erase(..)");
                    }
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    vector_benches,
    bench_push_individual,
    bench_push_reserved,
    bench_extend_from_slice,
    bench_insert_front,
    bench_erase_front
);

criterion_main!(vector_benches);

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_rtree::{Aabb2D, RTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::<f64>::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, extent: f64, max_size: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * extent;
        let y0 = rng.next_f64() * extent;
        let w = rng.next_f64() * max_size;
        let h = rng.next_f64() * max_size;
        out.push(Aabb2D::<f64>::from_xywh(x0, y0, w, h));
    }
    out
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Aabb2D::<f64>::from_xywh(cx + dx, cy + dy, 12.0, 12.0));
        }
    }
    out
}

fn gen_queries(count: usize, extent: f64, size: f64) -> Vec<Aabb2D<f64>> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * extent;
            let y0 = rng.next_f64() * extent;
            Aabb2D::<f64>::from_xywh(x0, y0, size, size)
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let rects = gen_random_rects(10_000, 2000.0, 20.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    for &max_entries in &[9usize, 16] {
        group.bench_function(format!("insert_m{}", max_entries), |b| {
            b.iter_batched(
                || RTree::with_max_entries(max_entries),
                |mut tree| {
                    for r in rects.iter().copied() {
                        tree.insert(r);
                    }
                    black_box(tree.height());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("load_m{}", max_entries), |b| {
            b.iter_batched(
                || rects.clone(),
                |items| {
                    let mut tree = RTree::with_max_entries(max_entries);
                    tree.load(items);
                    black_box(tree.height());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.bench_function("load_in_batches_m9", |b| {
        b.iter_batched(
            || rects.clone(),
            |items| {
                let mut tree = RTree::new();
                for chunk in items.chunks(1_000) {
                    tree.load(chunk.iter().copied());
                }
                black_box(tree.height());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let datasets = [
        ("grid", gen_grid_rects(100, 20.0)),
        ("random", gen_random_rects(10_000, 2000.0, 20.0)),
        ("clustered", gen_clustered_rects(40, 250, 120.0)),
    ];
    for (name, rects) in datasets {
        let mut tree = RTree::new();
        tree.load(rects.iter().copied());
        for &size in &[10.0, 100.0, 400.0] {
            let queries = gen_queries(1_000, 2000.0, size);
            group.throughput(Throughput::Elements(queries.len() as u64));
            group.bench_function(format!("{name}_q{size}"), |b| {
                b.iter(|| {
                    let mut hits = 0;
                    for q in &queries {
                        hits += tree.search(*q).len();
                    }
                    black_box(hits);
                })
            });
        }
        let queries = gen_queries(1_000, 2000.0, 10.0);
        group.bench_function(format!("{name}_collides_q10"), |b| {
            b.iter(|| {
                let hits = queries.iter().filter(|q| tree.collides(**q)).count();
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    let rects = gen_random_rects(10_000, 2000.0, 20.0);
    let victims: Vec<_> = rects.iter().copied().step_by(10).collect();
    group.throughput(Throughput::Elements(victims.len() as u64));
    group.bench_function("remove_tenth", |b| {
        b.iter_batched(
            || {
                let mut tree = RTree::new();
                tree.load(rects.iter().copied());
                tree
            },
            |mut tree| {
                for v in &victims {
                    black_box(tree.remove(v));
                }
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_search, bench_remove);
criterion_main!(benches);

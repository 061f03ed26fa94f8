//! Criterion microbenches for the planar engine (groups "overlay", "relate").
//!
//! - Overlay of two star polygons at 60% overlap for every operator.
//! - DE-9IM of the same pairs, planar and stitched 3D.
//!
//! Inputs come from fixed replay tokens so runs are comparable across commits.
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use sfa_topo::prelude::*;

fn star_pair(n: usize) -> (Geometry, Geometry) {
    let (a, b) = draw_overlay_pair(StarShape::new(n, 1.0), 0.6, ReplayToken::new(42, n as u64));
    (Geometry::Polygon(a), Geometry::Polygon(b))
}

fn bench_overlay(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay");
    for n in [12usize, 64, 256] {
        let (a, b) = star_pair(n);
        for op in OverlayOp::ALL {
            group.bench_function(BenchmarkId::new(format!("{op:?}"), n), |bch| {
                bch.iter_batched(
                    || Overlay::new(a.clone(), b.clone()),
                    |mut ov| ov.compute_overlay(op),
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

fn bench_relate(c: &mut Criterion) {
    let mut group = c.benchmark_group("relate");
    for n in [12usize, 64, 256] {
        let (a, b) = star_pair(n);
        group.bench_function(BenchmarkId::new("planar", n), |bch| {
            bch.iter(|| RelateCompute::new(a.clone(), b.clone()).compute_im())
        });
        group.bench_function(BenchmarkId::new("stitched", n), |bch| {
            bch.iter(|| RelateCompute3D::new(&a, &b).map(|mut r| r.compute_im()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_overlay, bench_relate);
criterion_main!(benches);
